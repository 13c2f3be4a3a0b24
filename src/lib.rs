// mc-sdk-config - Push-messaging SDK initialization loader
//
// This is the library crate: configuration sources, data models and platform lookups.
// The binary crate (main.rs) loads a configuration and reports what the SDK would receive.

pub mod config;
pub mod error;
pub mod logging;
pub mod models;
pub mod services;
pub mod settings;

// Re-export commonly used types for convenience
pub use crate::config::ConfigLoader;
pub use error::{ConfigError, SenderIdError, SourceError};
pub use models::{NotificationCustomizationOptions, SdkConfig, SdkConfigBuilder};
pub use settings::LoaderSettings;

/// Application version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Application name
pub const APP_NAME: &str = env!("CARGO_PKG_NAME");
