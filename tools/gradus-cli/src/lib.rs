pub mod command;
pub mod config;
pub mod error;

pub use command::CommandRewriter;
pub use config::{CommandConfig, GradusConfig, CONFIG_FILE};
pub use error::ConfigError;
