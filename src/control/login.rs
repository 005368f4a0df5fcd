use std::sync::Mutex;

use crate::control::Route;
use crate::network::api::RegistryApi;
use crate::notifications::{Notification, Notifier};
use crate::session::Session;

pub const MISSING_FIELDS_MESSAGE: &str = "Please fill in all fields";
pub const LOGIN_SUCCESS_MESSAGE: &str = "Login successful";
pub const LOGIN_FAILED_MESSAGE: &str = "Invalid admin credentials";

/// Signs an admin in and returns the route to show next.
///
/// The session lock is not held while the request is in flight, since the
/// client reads the token from the same session.
pub fn login(
    api: &dyn RegistryApi,
    session: &Mutex<Session>,
    admin_id: &str,
    password: &str,
    notifier: &dyn Notifier,
) -> Route {
    if admin_id.is_empty() || password.is_empty() {
        notifier.notify(Notification::error(MISSING_FIELDS_MESSAGE));
        return Route::AdminLogin
    }
    let token = match api.admin_login(admin_id, password) {
        Ok(token) => token,
        Err(e) => {
            log::warn!("login failed for {admin_id}: {e}");
            notifier.notify(Notification::error(LOGIN_FAILED_MESSAGE));
            return Route::AdminLogin
        }
    };
    let mut session = match session.lock() {
        Ok(s) => s,
        Err(_) => {
            log::error!("session mutex poisoned");
            notifier.notify(Notification::error(LOGIN_FAILED_MESSAGE));
            return Route::AdminLogin
        }
    };
    let saved = match &token {
        Some(t) => session.save_token(t),
        None => {
            log::warn!("login response carried no token");
            Ok(())
        }
    };
    if let Err(e) = saved.and_then(|_| session.login(admin_id)) {
        log::error!("unable to persist session: {e}");
        notifier.notify(Notification::error(LOGIN_FAILED_MESSAGE));
        return Route::AdminLogin
    }
    log::info!("admin {admin_id} signed in");
    notifier.notify(Notification::success(LOGIN_SUCCESS_MESSAGE));
    Route::AdminDashboard
}

/// Clears the session and returns the login route.
pub fn logout(session: &Mutex<Session>) -> Route {
    match session.lock() {
        Ok(mut s) => {
            if let Err(e) = s.logout() {
                log::error!("unable to clear stored session: {e}");
            }
        },
        Err(_) => log::error!("session mutex poisoned"),
    }
    Route::AdminLogin
}
