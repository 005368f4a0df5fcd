use std::process;
use std::sync::{Arc, Mutex};

use crate::control::cli;
use crate::database::sqlite;
use crate::network::api::ApiClient;
use crate::session::Session;

pub mod control;
pub mod database;
pub mod defaults;
pub mod network;
pub mod notifications;
pub mod objects;
pub mod session;
pub mod util;

fn main() {
    dotenv::dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(defaults::DEFAULT_LOG_FILTER)).init();
    log::info!("Danubreed portal starting up...");
    let control = control::Control::new();
    let store = match sqlite::SQLite::open(&control.database_path) {
        Ok(s) => s,
        Err(e) => {
            log::error!("unable to open local storage: {e}");
            process::exit(1);
        }
    };
    let session = match Session::load(Box::new(store)) {
        Ok(s) => Arc::new(Mutex::new(s)),
        Err(e) => {
            log::error!("error setting up local storage: {e}");
            process::exit(1);
        }
    };
    let api = match ApiClient::new(&control.api_url, session.clone()) {
        Ok(a) => Arc::new(a),
        Err(e) => {
            log::error!("unable to create api client: {e}");
            process::exit(1);
        }
    };
    log::info!("using api at {}", api.base_url());
    cli::control_loop(cli::Context::new(session, api));
    log::info!("Danubreed portal shutting down.");
}
