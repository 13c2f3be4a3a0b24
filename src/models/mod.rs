//! Data models for SDK initialization.
//!
//! - [`SdkConfigBuilder`]: accumulator filled field by field from a configuration source
//! - [`SdkConfig`]: the validated, immutable result handed to the push-messaging SDK
//! - [`NotificationCustomizationOptions`]: notification icon resource id

pub mod sdk_config;

pub use sdk_config::{NotificationCustomizationOptions, SdkConfig, SdkConfigBuilder, parse_flag};
