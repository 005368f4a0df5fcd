use std::io::{self, BufRead, Write};
use std::str::FromStr;
use std::sync::{Arc, Mutex};
use std::thread::{self, JoinHandle};

use crate::control::login;
use crate::control::registration::{RegistrationFlow, SubmitOutcome};
use crate::control::render;
use crate::control::roster::{EditField, Roster};
use crate::control::Route;
use crate::network::api::{ApiClient, RegistryApi};
use crate::notifications::{ConsoleNotifier, Notifier};
use crate::objects::registrant::{ServingUnit, GENDERS, SCHOOL_STATUSES, SERVING_UNITS};
use crate::objects::registration::{RegistrationField, REQUIRED_FIELDS};
use crate::session::Session;

/// Everything the views share. Built once in `main`.
pub struct Context {
    pub session: Arc<Mutex<Session>>,
    pub api: Arc<ApiClient>,
    pub notifier: Arc<ConsoleNotifier>,
    pub roster: Arc<Mutex<Roster>>,
    route: Route,
    mounted: bool,
    joiners: Vec<JoinHandle<()>>,
}

impl Context {
    pub fn new(session: Arc<Mutex<Session>>, api: Arc<ApiClient>) -> Context {
        Context {
            session,
            api,
            notifier: Arc::new(ConsoleNotifier),
            roster: Arc::new(Mutex::new(Roster::new())),
            route: Route::Home,
            mounted: false,
            joiners: Vec::new(),
        }
    }
}

/// Starts a roster load on its own thread.
///
/// The roster lock is released while the request runs so the user can keep
/// working. A load that has been overtaken by a newer one is dropped when it
/// settles.
pub fn spawn_load<A, N>(roster: Arc<Mutex<Roster>>, api: Arc<A>, notifier: Arc<N>, admin_id: Option<String>) -> Option<JoinHandle<()>>
where
    A: RegistryApi + Send + Sync + 'static,
    N: Notifier + Send + Sync + 'static,
{
    let ticket = match roster.lock() {
        Ok(mut r) => r.begin_load(),
        Err(_) => {
            log::error!("roster mutex poisoned");
            return None
        }
    };
    Some(thread::spawn(move || {
        let result = ticket.fetch(api.as_ref());
        if let Ok(mut r) = roster.lock() {
            if r.finish_load(ticket, result, notifier.as_ref()) {
                println!("{}", render::roster_page(&r, admin_id.as_deref()));
            }
        }
    }))
}

pub fn control_loop(mut ctx: Context) {
    let mut keepalive: bool = true;
    let mut input: String = String::new();
    let stdin = io::stdin();
    println!("Welcome to Danubreed. Type h for help.");
    while keepalive {
        input.clear();
        match stdin.lock().read_line(&mut input) {
            Ok(0) => break,
            Ok(_) => {},
            Err(e) => {
                log::error!("failed to read input: {e}");
                break
            }
        }
        let in_string = input.to_string();
        let parts: Vec<&str> = in_string.split_whitespace().collect();
        let first = if parts.len() > 0 { parts[0].to_lowercase() } else { String::from("") };
        let rest = remainder(&in_string);
        match first.as_str() {
            "" => {},
            "h" | "help" => print_help(),
            "q" | "quit" | "exit" => keepalive = false,
            "register" => register(&mut ctx),
            "login" => {
                if parts.len() < 3 {
                    println!("Usage: login <admin id> <password>");
                    continue
                }
                let next = login::login(ctx.api.as_ref(), &ctx.session, parts[1], parts[2], ctx.notifier.as_ref());
                navigate(&mut ctx, next);
            },
            "logout" => {
                let next = login::logout(&ctx.session);
                if let Ok(mut r) = ctx.roster.lock() {
                    r.reset();
                }
                ctx.mounted = false;
                navigate(&mut ctx, next);
            },
            "d" | "dashboard" => navigate(&mut ctx, Route::AdminDashboard),
            "refresh" => {
                let was_mounted = ctx.mounted;
                // a fresh mount already loads
                if guard(&mut ctx) && was_mounted {
                    start_load(&mut ctx);
                }
            },
            "u" | "unit" => {
                if !guard(&mut ctx) {
                    continue
                }
                let unit = match rest.trim().to_lowercase().as_str() {
                    "" => {
                        println!("Valid units: {}", render::unit_list());
                        continue
                    },
                    "all" => None,
                    name => match ServingUnit::from_str(name) {
                        Ok(u) => Some(u),
                        Err(e) => {
                            println!("{e}. Valid units: {}", render::unit_list());
                            continue
                        }
                    },
                };
                let changed = match ctx.roster.lock() {
                    Ok(mut r) => r.select_unit(unit),
                    Err(_) => false,
                };
                if changed {
                    start_load(&mut ctx);
                }
            },
            "s" | "search" => {
                if !guard(&mut ctx) {
                    continue
                }
                if let Ok(mut r) = ctx.roster.lock() {
                    r.set_search_term(rest);
                }
                show(&ctx);
            },
            "p" | "page" => {
                if !guard(&mut ctx) {
                    continue
                }
                let moved = match ctx.roster.lock() {
                    Ok(mut r) => match rest.trim() {
                        "next" | "n" => r.next_page(),
                        "prev" | "previous" => r.previous_page(),
                        other => match usize::from_str(other) {
                            Ok(p) => r.go_to_page(p),
                            Err(_) => false,
                        },
                    },
                    Err(_) => false,
                };
                if moved {
                    show(&ctx);
                } else {
                    println!("No such page.");
                }
            },
            "t" | "toggle" => {
                if !guard(&mut ctx) {
                    continue
                }
                if parts.len() < 2 {
                    println!("Usage: toggle <id>");
                    continue
                }
                if let Ok(mut r) = ctx.roster.lock() {
                    r.toggle_membership(parts[1], ctx.api.as_ref(), ctx.notifier.as_ref());
                }
            },
            "e" | "edit" => {
                if !guard(&mut ctx) {
                    continue
                }
                if parts.len() < 2 {
                    println!("Usage: edit <id>");
                    continue
                }
                let started = match ctx.roster.lock() {
                    Ok(mut r) => r.start_edit(parts[1]),
                    Err(_) => false,
                };
                if started {
                    show(&ctx);
                } else {
                    println!("No user with id '{}'.", parts[1]);
                }
            },
            "set" => {
                if !guard(&mut ctx) {
                    continue
                }
                if parts.len() < 3 {
                    println!("Usage: set <firstName|surname|phone|parentsNumber|schoolStatus|servingUnit> <value>");
                    continue
                }
                let field = match EditField::from_str(parts[1]) {
                    Ok(f) => f,
                    Err(e) => {
                        println!("{e}.");
                        continue
                    }
                };
                let value = remainder(rest);
                if let Ok(mut r) = ctx.roster.lock() {
                    if let Err(e) = r.set_edit_field(field, &value) {
                        println!("Unable to set field: {e}.");
                    }
                }
            },
            "save" => {
                if !guard(&mut ctx) {
                    continue
                }
                if let Ok(mut r) = ctx.roster.lock() {
                    if !r.save_edit(ctx.notifier.as_ref()) {
                        println!("Nothing is being edited.");
                    }
                }
            },
            "cancel" => {
                if !guard(&mut ctx) {
                    continue
                }
                if let Ok(mut r) = ctx.roster.lock() {
                    r.cancel_edit();
                }
            },
            "show" => {
                if guard(&mut ctx) {
                    show(&ctx);
                }
            },
            option => println!("'{option}' is not a valid command. Type h for help."),
        }
    }
    for j in ctx.joiners.drain(..) {
        _ = j.join();
    }
    println!("Goodbye!")
}

/// Everything after the command word and its separator, untouched apart
/// from the line ending.
fn remainder(line: &str) -> &str {
    let line = line.trim_start().trim_end_matches(|c| c == '\r' || c == '\n');
    match line.find(char::is_whitespace) {
        Some(ix) => {
            let rest = &line[ix..];
            let mut chars = rest.chars();
            chars.next();
            chars.as_str()
        },
        None => "",
    }
}

fn admin_id(ctx: &Context) -> Option<String> {
    match ctx.session.lock() {
        Ok(s) => s.admin_id().map(String::from),
        Err(_) => None,
    }
}

/// Admin views render a placeholder first and only then check the session,
/// redirecting to login when nobody is signed in.
fn guard(ctx: &mut Context) -> bool {
    let landed = match ctx.session.lock() {
        Ok(s) => s.guard(Route::AdminDashboard),
        Err(_) => Route::AdminLogin,
    };
    if landed != Route::AdminDashboard {
        println!("Loading...");
        println!("Admin login required. Use: login <admin id> <password>");
        ctx.route = landed;
        ctx.mounted = false;
        return false
    }
    if ctx.route != Route::AdminDashboard || !ctx.mounted {
        ctx.route = Route::AdminDashboard;
        ctx.mounted = true;
        start_load(ctx);
    }
    true
}

fn navigate(ctx: &mut Context, route: Route) {
    match route {
        Route::AdminDashboard => {
            ctx.mounted = false;
            guard(ctx);
        },
        Route::AdminLogin => {
            ctx.route = route;
            println!("Admin Login -- use: login <admin id> <password>");
        },
        other => ctx.route = other,
    }
}

fn start_load(ctx: &mut Context) {
    println!("Loading users...");
    let handle = spawn_load(ctx.roster.clone(), ctx.api.clone(), ctx.notifier.clone(), admin_id(ctx));
    if let Some(h) = handle {
        ctx.joiners.push(h);
    }
    // finished loads have nothing left to join
    ctx.joiners.retain(|j| !j.is_finished());
}

fn show(ctx: &Context) {
    let admin = admin_id(ctx);
    if let Ok(r) = ctx.roster.lock() {
        println!("{}", render::roster_page(&r, admin.as_deref()));
    }
}

fn prompt(label: &str) -> Option<String> {
    print!("{label}: ");
    _ = io::stdout().flush();
    let mut line = String::new();
    match io::stdin().lock().read_line(&mut line) {
        Ok(0) | Err(_) => None,
        Ok(_) => Some(String::from(line.trim())),
    }
}

fn choices<T: ToString>(values: &[T]) -> String {
    values.iter().map(|v| v.to_string()).collect::<Vec<String>>().join(", ")
}

fn register(ctx: &mut Context) {
    ctx.route = Route::Register;
    let mut flow = RegistrationFlow::new();
    println!("Join the Danubreed community.");
    for field in REQUIRED_FIELDS {
        let label = match field {
            RegistrationField::Gender => format!("{} ({})", field.label(), choices(&GENDERS)),
            RegistrationField::SchoolStatus => format!("{} ({})", field.label(), choices(&SCHOOL_STATUSES)),
            RegistrationField::ServingUnit => format!("{} ({})", field.label(), choices(&SERVING_UNITS)),
            _ => String::from(field.label()),
        };
        match prompt(&label) {
            Some(v) => flow.set_field(field, &v),
            None => return,
        }
    }
    match prompt("I want to be a member of Danubreed (y/N)") {
        Some(v) => flow.set_membership_status(matches!(v.to_lowercase().as_str(), "y" | "yes")),
        None => return,
    }
    if !flow.can_submit() {
        return
    }
    match flow.submit(ctx.api.as_ref(), ctx.notifier.as_ref()) {
        SubmitOutcome::Registered => {
            ctx.route = Route::Confirm;
            print_confirmation();
        },
        SubmitOutcome::Invalid(e) => {
            for err in e.errors() {
                println!("  {}", err.message);
            }
        },
        SubmitOutcome::Busy | SubmitOutcome::Failed => {},
    }
}

fn print_confirmation() {
    println!("Registration Successful!");
    println!("Welcome to Danubreed! Your registration has been submitted successfully.");
    println!("What happens next?");
    println!("  - Our team will review your application");
    println!("  - You'll receive a confirmation email");
    println!("  - Join our community events and activities");
    println!("Type register to add another member.");
}

fn print_help() {
    println!("register                     -- Fill in and submit the registration form.");
    println!("login <id> <password>        -- Sign in as an admin.");
    println!("logout                       -- Sign out and forget the stored session.");
    println!("(d)ashboard                  -- Open the admin roster.");
    println!("refresh                      -- Reload the roster for the current unit.");
    println!("(u)nit <name|all>            -- Filter the roster by serving unit.");
    println!("(s)earch [term]              -- Search by name or phone. No term clears the search.");
    println!("(p)age <n|next|prev>         -- Move between roster pages.");
    println!("(t)oggle <id>                -- Flip a user's membership status.");
    println!("(e)dit <id>                  -- Edit a user locally.");
    println!("set <field> <value>          -- Change a field of the user being edited.");
    println!("save | cancel                -- Finish or discard the current edit.");
    println!("show                         -- Print the current roster page.");
    println!("(q)uit                       -- Exit.");
}

#[cfg(test)]
mod tests {
    use std::sync::mpsc::{self, Receiver};
    use std::sync::{Arc, Mutex};

    use super::{remainder, spawn_load};
    use crate::control::roster::Roster;
    use crate::network::api::RegistryApi;
    use crate::network::errors::ApiError;
    use crate::network::fake::{registrants, FakeApi};
    use crate::notifications::RecordingNotifier;
    use crate::objects::registrant::{Registrant, ServingUnit};
    use crate::objects::registration::RegistrationRequest;

    // Holds list requests until the test lets them through.
    struct GatedApi {
        inner: FakeApi,
        gate: Mutex<Receiver<()>>,
    }

    impl GatedApi {
        fn wait(&self) {
            _ = self.gate.lock().unwrap().recv();
        }
    }

    impl RegistryApi for GatedApi {
        fn submit_registration(&self, request: &RegistrationRequest) -> Result<Option<Registrant>, ApiError> {
            self.inner.submit_registration(request)
        }

        fn admin_login(&self, admin_id: &str, password: &str) -> Result<Option<String>, ApiError> {
            self.inner.admin_login(admin_id, password)
        }

        fn list_all_registrants(&self) -> Result<Vec<Registrant>, ApiError> {
            self.wait();
            self.inner.list_all_registrants()
        }

        fn list_registrants_by_unit(&self, unit: ServingUnit) -> Result<Vec<Registrant>, ApiError> {
            self.wait();
            self.inner.list_registrants_by_unit(unit)
        }

        fn set_membership_status(&self, registrant_id: &str, status: bool) -> Result<Option<Registrant>, ApiError> {
            self.inner.set_membership_status(registrant_id, status)
        }
    }

    fn gated() -> (Arc<GatedApi>, mpsc::Sender<()>) {
        let (tx, rx) = mpsc::channel();
        let api = GatedApi {
            inner: FakeApi::new(),
            gate: Mutex::new(rx),
        };
        (Arc::new(api), tx)
    }

    #[test]
    fn test_load_lands_when_not_reset() {
        let (api, open) = gated();
        api.inner.push_list(Ok(registrants(3)));
        let roster = Arc::new(Mutex::new(Roster::new()));
        let handle = spawn_load(roster.clone(), api.clone(), Arc::new(RecordingNotifier::new()), None).unwrap();
        open.send(()).unwrap();
        handle.join().unwrap();
        assert_eq!(3, roster.lock().unwrap().all_rows().len());
    }

    #[test]
    fn test_load_in_flight_during_logout_is_dropped() {
        let (api, open) = gated();
        api.inner.push_list(Ok(registrants(3)));
        let roster = Arc::new(Mutex::new(Roster::new()));
        let notifier = Arc::new(RecordingNotifier::new());
        let handle = spawn_load(roster.clone(), api.clone(), notifier.clone(), Some(String::from("admin01"))).unwrap();
        roster.lock().unwrap().reset();
        open.send(()).unwrap();
        handle.join().unwrap();
        let r = roster.lock().unwrap();
        assert!(r.all_rows().is_empty());
        assert!(!r.is_loading());
        assert!(notifier.notes().is_empty());
    }

    #[test]
    fn test_remainder_keeps_inner_spacing() {
        assert_eq!("ada  obi", remainder("search ada  obi\n"));
        assert_eq!(" ada", remainder("  s  ada\r\n"));
        assert_eq!("", remainder("search\n"));
        assert_eq!("", remainder("search \n"));
        assert_eq!("Free spirit media", remainder("unit Free spirit media"));
    }
}
