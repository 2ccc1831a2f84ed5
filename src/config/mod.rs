//! Configuration management module
//!
//! Responsible for loading client configuration from environment variables and configuration files

pub mod file;
pub mod settings;

pub use file::FileConfig;
pub use settings::{ClientConfig, LoggingConfig, Settings};
