pub mod config;
pub mod error;
pub mod serialization_utils;

pub use config::AppConfig;
pub use error::ConfigError;
