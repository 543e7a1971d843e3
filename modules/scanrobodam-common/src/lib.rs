pub mod config;
pub mod error;
pub mod recovery;

pub use config::{Config, ConfigError};
pub use error::ExtractError;
pub use recovery::{parse_assistant_json, recover_json, Recovered, RecoveryStrategy};
