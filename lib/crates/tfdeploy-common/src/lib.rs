pub mod config;
pub mod jsonapi;
pub mod redis_keys;
pub mod types;

pub use config::{PlatformSettings, ServerSettings};
pub use redis_keys::{keys, user_key, user_workspaces_key, validate_email};
pub use types::*;
