pub mod api;
pub mod config;
pub mod domain;
pub mod utils;

pub use api::ParseClient;
pub use config::ParseConfig;
pub use domain::errors::{ClientError, ConfigError};
pub use domain::types::{Completion, LocationRecord, StaticUser, UserContext};
