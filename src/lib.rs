pub mod common;
pub mod handlers;
pub mod router;
pub mod services;
pub mod store;
pub mod trigger;

pub use services::Services;
