pub mod config;
pub mod errors;
pub mod utils;

pub const LOCAL_BASE_URL_DEFAULT: &str = "http://localhost:3000";
pub const STATIC_DIR_DEFAULT: &str = "public";

pub const WEBHOOK_PATH: &str = "/api/webhook";

pub const TRIGGER_FAILED_ERROR: &str = "Failed to trigger Relay";
pub const NO_FINAL_PLAN_ERROR: &str = "No final_plan received";
pub const INVALID_ID_ERROR: &str = "Invalid id";
pub const UNAUTHORIZED_ERROR: &str = "Unauthorized";
