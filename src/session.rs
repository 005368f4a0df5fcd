use crate::control::Route;
use crate::database::{Database, DBError};


pub const KEY_ADMIN_ID: &str = "adminId";
pub const KEY_ADMIN_TOKEN: &str = "adminToken";

/// The signed-in admin, backed by local storage.
///
/// One instance is owned by the application context and shared with the API
/// client, which reads the bearer token from storage on every request.
pub struct Session {
    store: Box<dyn Database + Send>,
    authenticated: bool,
    admin_id: Option<String>,
}

impl Session {
    /// Rehydrates from storage. Only a stored id together with a stored token
    /// counts as signed in.
    pub fn load(mut store: Box<dyn Database + Send>) -> Result<Session, DBError> {
        store.setup()?;
        let admin_id = read_optional(store.as_ref(), KEY_ADMIN_ID)?;
        let token = read_optional(store.as_ref(), KEY_ADMIN_TOKEN)?;
        let mut output = Session {
            store,
            authenticated: false,
            admin_id: None,
        };
        if let (Some(id), Some(_)) = (admin_id, token) {
            log::info!("restored session for admin {id}");
            output.admin_id = Some(id);
            output.authenticated = true;
        }
        Ok(output)
    }

    pub fn is_authenticated(&self) -> bool {
        self.authenticated
    }

    pub fn admin_id(&self) -> Option<&str> {
        self.admin_id.as_deref()
    }

    /// Current bearer token, if one is stored.
    pub fn token(&self) -> Option<String> {
        match read_optional(self.store.as_ref(), KEY_ADMIN_TOKEN) {
            Ok(token) => token,
            Err(e) => {
                log::warn!("unable to read stored token: {e}");
                None
            }
        }
    }

    pub fn save_token(&mut self, token: &str) -> Result<(), DBError> {
        self.store.set_value(KEY_ADMIN_TOKEN, token)
    }

    /// Marks the admin as signed in and persists the id. The token is stored
    /// separately by the caller through `save_token`.
    pub fn login(&mut self, admin_id: &str) -> Result<(), DBError> {
        self.admin_id = Some(String::from(admin_id));
        self.authenticated = true;
        self.store.set_value(KEY_ADMIN_ID, admin_id)
    }

    pub fn logout(&mut self) -> Result<(), DBError> {
        self.admin_id = None;
        self.authenticated = false;
        self.store.remove_value(KEY_ADMIN_ID)?;
        self.store.remove_value(KEY_ADMIN_TOKEN)?;
        log::info!("session cleared");
        Ok(())
    }

    /// Where a request for `route` actually lands.
    pub fn guard(&self, route: Route) -> Route {
        if route.admin_only() && !self.authenticated {
            return Route::AdminLogin
        }
        route
    }
}

fn read_optional(store: &(dyn Database + Send), name: &str) -> Result<Option<String>, DBError> {
    match store.get_value(name) {
        Ok(v) if v.is_empty() => Ok(None),
        Ok(v) => Ok(Some(v)),
        Err(DBError::NotFound) => Ok(None),
        Err(e) => Err(e),
    }
}
