use std::env;

use crate::database::sqlite::DATABASE_PATH_ENV;
use crate::defaults;

pub mod cli;
pub mod login;
pub mod registration;
pub mod render;
pub mod roster;

pub const API_URL_ENV: &str = "PORTAL_API_URL";

/// Views the portal can show.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Home,
    Register,
    Confirm,
    AdminLogin,
    AdminDashboard,
}

impl Route {
    pub fn admin_only(&self) -> bool {
        matches!(self, Route::AdminDashboard)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Control {
    pub api_url: String,
    pub database_path: String,
}

impl Control {
    /// Reads settings from the environment. Call after `.env` has been loaded.
    pub fn new() -> Control {
        Control::from_lookup(|name| env::var(name).ok())
    }

    fn from_lookup<F>(lookup: F) -> Control
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_url = match lookup(API_URL_ENV) {
            Some(v) if !v.trim().is_empty() => String::from(v.trim()),
            _ => String::from(defaults::DEFAULT_API_URL),
        };
        let database_path = match lookup(DATABASE_PATH_ENV) {
            Some(v) if !v.trim().is_empty() => String::from(v.trim()),
            _ => String::from(defaults::DEFAULT_DATABASE_PATH),
        };
        Control {
            api_url,
            database_path,
        }
    }
}
