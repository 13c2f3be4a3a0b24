//! `res/xml/config.xml` preference source.
//!
//! Only `<preference name="..." value="..."/>` elements are read. Names are
//! matched lower-cased against [`CONFIG_PREFIX`] plus a fixed set of keys;
//! everything else in the document is ignored.

use super::apply_sender_id_fallback;
use crate::error::SourceError;
use crate::models::{NotificationCustomizationOptions, SdkConfig, SdkConfigBuilder, parse_flag};
use crate::services::{ResourceResolver, SenderIdProvider};
use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};
use std::io::BufRead;

/// Prefix shared by every recognized preference name.
pub const CONFIG_PREFIX: &str = "com.salesforce.marketingcloud.";

/// Recognized preference keys, without [`CONFIG_PREFIX`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PreferenceKey {
    AppId,
    AccessToken,
    SenderId,
    Analytics,
    NotificationSmallIcon,
    TenantSpecificEndpoint,
    DelayRegistrationUntilContactKeyIsSet,
    LocationEnabled,
}

impl PreferenceKey {
    fn parse(name: &str) -> Option<Self> {
        let lowered = name.to_ascii_lowercase();
        let key = lowered.strip_prefix(CONFIG_PREFIX)?;
        match key {
            "app_id" => Some(Self::AppId),
            "access_token" => Some(Self::AccessToken),
            "sender_id" => Some(Self::SenderId),
            "analytics" => Some(Self::Analytics),
            "notification_small_icon" => Some(Self::NotificationSmallIcon),
            "tenant_specific_endpoint" => Some(Self::TenantSpecificEndpoint),
            "delay_registration_until_contact_key_is_set" => {
                Some(Self::DelayRegistrationUntilContactKeyIsSet)
            }
            "location_enabled" => Some(Self::LocationEnabled),
            _ => None,
        }
    }
}

/// Map a preference resource into a builder.
///
/// A malformed document stops parsing where the error occurs; preferences
/// read before it are kept and the error is logged. If the document never
/// sets a sender id the provider is asked.
pub fn parse_xml_config<R: BufRead>(
    source: R,
    resources: &dyn ResourceResolver,
    sender_ids: &dyn SenderIdProvider,
) -> SdkConfigBuilder {
    let mut builder = SdkConfig::builder();

    let sender_id_set = match read_preferences(source, &mut builder, resources) {
        Ok(set) => set,
        Err((set, e)) => {
            tracing::error!("Unable to read config.xml: {}", e);
            set
        }
    };

    if !sender_id_set {
        apply_sender_id_fallback(&mut builder, sender_ids);
    }

    builder
}

/// Returns whether a sender id preference was applied, also on failure.
fn read_preferences<R: BufRead>(
    source: R,
    builder: &mut SdkConfigBuilder,
    resources: &dyn ResourceResolver,
) -> Result<bool, (bool, SourceError)> {
    let mut reader = Reader::from_reader(source);
    let mut buf = Vec::new();
    let mut sender_id_set = false;

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(element)) | Ok(Event::Empty(element))
                if element.name().as_ref() == b"preference" =>
            {
                if let Some((name, value)) = name_and_value(&element) {
                    match PreferenceKey::parse(&name) {
                        Some(key) => {
                            if key == PreferenceKey::SenderId {
                                sender_id_set = true;
                            }
                            apply(builder, key, value, resources);
                        }
                        None => tracing::debug!("Ignoring preference {}", name),
                    }
                }
            }
            Ok(Event::Eof) => break,
            Ok(_) => {}
            Err(e) => {
                let error = SourceError::Xml {
                    position: reader.buffer_position() as u64,
                    message: e.to_string(),
                };
                return Err((sender_id_set, error));
            }
        }
        buf.clear();
    }

    Ok(sender_id_set)
}

fn name_and_value(element: &BytesStart<'_>) -> Option<(String, String)> {
    let attribute = |key: &str| -> Option<String> {
        match element.try_get_attribute(key) {
            Ok(Some(attr)) => match attr.unescape_value() {
                Ok(value) => Some(value.into_owned()),
                Err(e) => {
                    tracing::warn!("Skipping preference with undecodable {}: {}", key, e);
                    None
                }
            },
            Ok(None) => None,
            Err(e) => {
                tracing::warn!("Skipping preference with malformed attributes: {}", e);
                None
            }
        }
    };

    Some((attribute("name")?, attribute("value")?))
}

fn apply(
    builder: &mut SdkConfigBuilder,
    key: PreferenceKey,
    value: String,
    resources: &dyn ResourceResolver,
) {
    match key {
        PreferenceKey::AppId => {
            builder.set_application_id(value);
        }
        PreferenceKey::AccessToken => {
            builder.set_access_token(value);
        }
        PreferenceKey::SenderId => {
            builder.set_sender_id(value);
        }
        PreferenceKey::Analytics => {
            builder.set_analytics_enabled(parse_flag(&value));
        }
        PreferenceKey::NotificationSmallIcon => {
            let icon_id = resources.drawable_identifier(&value);
            if icon_id != 0 {
                builder.set_notification_customization_options(
                    NotificationCustomizationOptions::create(icon_id),
                );
            } else {
                tracing::warn!("Notification icon {} not found, using SDK default", value);
            }
        }
        PreferenceKey::TenantSpecificEndpoint => {
            builder.set_server_url(value);
        }
        PreferenceKey::DelayRegistrationUntilContactKeyIsSet => {
            builder.set_delay_registration_until_contact_key_is_set(parse_flag(&value));
        }
        PreferenceKey::LocationEnabled => {
            builder.set_geofencing_enabled(parse_flag(&value));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SenderIdError;
    use crate::services::sender_id::MockSenderIdProvider;
    use crate::services::{DrawableTable, NoSenderId, StaticSenderId};

    fn drawables() -> DrawableTable {
        [("ic_notification", 5)].into_iter().collect()
    }

    #[test]
    fn test_preference_key_matching() {
        assert_eq!(
            PreferenceKey::parse("com.salesforce.marketingcloud.app_id"),
            Some(PreferenceKey::AppId)
        );
        assert_eq!(
            PreferenceKey::parse("COM.SALESFORCE.MARKETINGCLOUD.Location_Enabled"),
            Some(PreferenceKey::LocationEnabled)
        );
        assert_eq!(PreferenceKey::parse("app_id"), None);
        assert_eq!(
            PreferenceKey::parse("com.salesforce.marketingcloud.unknown"),
            None
        );
    }

    #[test]
    fn test_recognized_preferences() {
        let xml = r#"<?xml version="1.0" encoding="utf-8"?>
<widget id="com.example.app" version="1.0.0">
    <preference name="com.salesforce.marketingcloud.app_id" value="app-guid" />
    <preference name="com.salesforce.marketingcloud.access_token" value="token" />
    <preference name="com.salesforce.marketingcloud.sender_id" value="1234" />
    <preference name="com.salesforce.marketingcloud.analytics" value="True" />
    <preference name="com.salesforce.marketingcloud.notification_small_icon" value="ic_notification" />
    <preference name="com.salesforce.marketingcloud.tenant_specific_endpoint" value="https://mc.example.com?a=1&amp;b=2" />
    <preference name="com.salesforce.marketingcloud.delay_registration_until_contact_key_is_set" value="false" />
    <preference name="com.salesforce.marketingcloud.location_enabled" value="true"></preference>
</widget>"#;

        let mut provider = MockSenderIdProvider::new();
        provider.expect_sender_id().times(0);

        let builder = parse_xml_config(xml.as_bytes(), &drawables(), &provider);

        assert_eq!(builder.application_id.as_deref(), Some("app-guid"));
        assert_eq!(builder.access_token.as_deref(), Some("token"));
        assert_eq!(builder.sender_id.as_deref(), Some("1234"));
        assert!(builder.analytics_enabled);
        assert_eq!(
            builder.notification_customization_options,
            Some(NotificationCustomizationOptions::create(5))
        );
        assert_eq!(
            builder.server_url.as_deref(),
            Some("https://mc.example.com?a=1&b=2")
        );
        assert!(!builder.delay_registration_until_contact_key_is_set);
        assert!(builder.geofencing_enabled);
    }

    #[test]
    fn test_unrecognized_preferences_ignored() {
        let xml = r#"<widget>
    <preference name="Orientation" value="portrait" />
    <preference name="com.salesforce.marketingcloud.app_id" value="app-guid" />
    <preference name="com.salesforce.marketingcloud.app_idx" value="nope" />
    <feature name="com.salesforce.marketingcloud.access_token" value="not-a-preference" />
    <preference name="com.salesforce.marketingcloud.analytics" />
    <preference value="orphan" />
</widget>"#;

        let builder = parse_xml_config(xml.as_bytes(), &drawables(), &NoSenderId);

        assert_eq!(builder.application_id.as_deref(), Some("app-guid"));
        assert!(builder.access_token.is_none());
        assert!(!builder.analytics_enabled);
        assert!(builder.sender_id.is_none());
    }

    #[test]
    fn test_last_occurrence_wins() {
        let xml = r#"<widget>
    <preference name="com.salesforce.marketingcloud.app_id" value="first" />
    <preference name="com.salesforce.marketingcloud.APP_ID" value="second" />
</widget>"#;

        let builder = parse_xml_config(xml.as_bytes(), &drawables(), &NoSenderId);
        assert_eq!(builder.application_id.as_deref(), Some("second"));
    }

    #[test]
    fn test_malformed_document_keeps_prior_fields() {
        let xml = r#"<widget>
    <preference name="com.salesforce.marketingcloud.app_id" value="app-guid" />
    <platform name="android"></wrong>
    <preference name="com.salesforce.marketingcloud.access_token" value="token" />
</widget>"#;

        let builder = parse_xml_config(xml.as_bytes(), &drawables(), &StaticSenderId("77".into()));

        assert_eq!(builder.application_id.as_deref(), Some("app-guid"));
        assert!(builder.access_token.is_none());
        assert_eq!(builder.sender_id.as_deref(), Some("77"));
    }

    #[test]
    fn test_sender_id_fallback_failure_is_swallowed() {
        let xml = r#"<widget><preference name="com.salesforce.marketingcloud.app_id" value="a" /></widget>"#;

        let mut provider = MockSenderIdProvider::new();
        provider
            .expect_sender_id()
            .times(1)
            .returning(|| Err(SenderIdError::NotConfigured));

        let builder = parse_xml_config(xml.as_bytes(), &drawables(), &provider);
        assert!(builder.sender_id.is_none());
        assert_eq!(builder.application_id.as_deref(), Some("a"));
    }

    #[test]
    fn test_empty_document() {
        let builder = parse_xml_config("".as_bytes(), &drawables(), &StaticSenderId("1".into()));
        assert_eq!(builder.sender_id.as_deref(), Some("1"));
        assert!(builder.application_id.is_none());
    }
}
