pub mod discovery;
pub mod health;

pub use discovery::{api_root_handler, app1_root_handler};
pub use health::health_handler;
