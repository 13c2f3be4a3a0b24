//! `mc_config.json` source.

use super::apply_sender_id_fallback;
use crate::error::SourceError;
use crate::models::{NotificationCustomizationOptions, SdkConfig, SdkConfigBuilder, parse_flag};
use crate::services::{ResourceResolver, SenderIdProvider};
use serde_json::{Map, Value};

/// Map a parsed `mc_config.json` object into a builder.
///
/// Keys are read in a fixed order and the first missing key stops
/// population: fields read before it are kept, later ones stay unset. The
/// failure is logged, never returned. The sender id always comes from the
/// provider, never from the file.
pub fn parse_json_config(
    config: &Map<String, Value>,
    resources: &dyn ResourceResolver,
    sender_ids: &dyn SenderIdProvider,
) -> SdkConfigBuilder {
    let mut builder = SdkConfig::builder();

    if let Err(e) = populate(&mut builder, config, resources) {
        tracing::error!("Unable to read mc_config.json: {}", e);
    }

    apply_sender_id_fallback(&mut builder, sender_ids);

    builder
}

fn populate(
    builder: &mut SdkConfigBuilder,
    config: &Map<String, Value>,
    resources: &dyn ResourceResolver,
) -> Result<(), SourceError> {
    builder.set_application_id(get_string(config, "app_id")?);
    builder.set_access_token(get_string(config, "access_token")?);
    builder.set_server_url(get_string(config, "tenant_specific_endpoint")?);
    builder.set_analytics_enabled(parse_flag(&get_string(config, "analytics")?));
    builder.set_delay_registration_until_contact_key_is_set(parse_flag(&get_string(
        config,
        "delay_registration_until_contact_key_is_set",
    )?));
    builder.set_geofencing_enabled(parse_flag(&get_string(config, "location_enabled")?));

    let icon = get_string(config, "notification_small_icon")?;
    let icon_id = resources.drawable_identifier(&icon);
    if icon_id != 0 {
        builder.set_notification_customization_options(NotificationCustomizationOptions::create(
            icon_id,
        ));
    } else {
        tracing::warn!("Notification icon {} not found, using SDK default", icon);
    }

    Ok(())
}

/// Strings are taken as-is; any other present value, `null` included, is
/// coerced to its JSON text. Only a missing key is an error.
fn get_string(config: &Map<String, Value>, key: &'static str) -> Result<String, SourceError> {
    match config.get(key) {
        None => Err(SourceError::MissingKey(key)),
        Some(Value::String(s)) => Ok(s.clone()),
        Some(value) => Ok(value.to_string()),
    }
}
