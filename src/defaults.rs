pub const DEFAULT_API_URL: &str = "https://daniels-camp-backend.onrender.com";
pub const DEFAULT_DATABASE_PATH: &str = "./danubreed-portal.sqlite";
pub const DEFAULT_LOG_FILTER: &str = "info";

pub const PAGE_SIZE: usize = 100;
pub const PAGE_BUTTONS: usize = 5;
