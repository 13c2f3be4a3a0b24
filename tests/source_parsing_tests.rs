//! Property and parsing tests for the JSON and XML sources
//!
//! These tests verify:
//! - Flag parsing accepts only "true" in any ASCII case
//! - Unrecognized XML preferences never affect the builder
//! - JSON scalar coercion for flag values

use mc_sdk_config::config::{CONFIG_PREFIX, parse_json_config, parse_xml_config};
use mc_sdk_config::models::parse_flag;
use mc_sdk_config::services::{DrawableTable, NoSenderId};
use mc_sdk_config::SdkConfigBuilder;
use proptest::prelude::*;
use serde_json::json;

fn xml_with(preferences: &[(String, String)]) -> String {
    let mut xml = String::from("<widget>\n");
    for (name, value) in preferences {
        xml.push_str(&format!(
            "    <preference name=\"{}\" value=\"{}\" />\n",
            name, value
        ));
    }
    xml.push_str("</widget>\n");
    xml
}

proptest! {
    #[test]
    fn flag_is_true_only_for_true(value in "\\PC*") {
        prop_assert_eq!(parse_flag(&value), value.to_ascii_lowercase() == "true");
    }

    #[test]
    fn flag_accepts_any_case_of_true(mask in proptest::collection::vec(any::<bool>(), 4)) {
        let value: String = "true"
            .chars()
            .zip(mask)
            .map(|(c, upper)| if upper { c.to_ascii_uppercase() } else { c })
            .collect();
        prop_assert!(parse_flag(&value));
    }

    #[test]
    fn unrecognized_preferences_are_ignored(
        names in proptest::collection::vec("[a-z_.]{1,24}", 0..8),
        values in proptest::collection::vec("[A-Za-z0-9]{0,12}", 8),
    ) {
        let mut preferences = vec![(
            format!("{}app_id", CONFIG_PREFIX),
            "known-app".to_string(),
        )];
        for (name, value) in names.iter().zip(values.iter()) {
            // Keep generated names outside the recognized namespace
            preferences.push((format!("other.{}", name), value.clone()));
        }

        let builder = parse_xml_config(
            xml_with(&preferences).as_bytes(),
            &DrawableTable::new(),
            &NoSenderId,
        );

        let mut expected = SdkConfigBuilder::default();
        expected.set_application_id("known-app");
        prop_assert_eq!(builder, expected);
    }
}

#[test]
fn test_json_flag_coercion() {
    let config = json!({
        "app_id": 42,
        "access_token": "token",
        "tenant_specific_endpoint": "https://mc.example.com",
        "analytics": true,
        "delay_registration_until_contact_key_is_set": 1,
        "location_enabled": "True",
        "notification_small_icon": "ic_unknown"
    });
    let config = config.as_object().unwrap();

    let builder = parse_json_config(config, &DrawableTable::new(), &NoSenderId);

    assert_eq!(builder.application_id.as_deref(), Some("42"));
    assert!(builder.analytics_enabled);
    assert!(!builder.delay_registration_until_contact_key_is_set);
    assert!(builder.geofencing_enabled);
    assert!(builder.notification_customization_options.is_none());
}

#[test]
fn test_xml_mixed_case_keys() {
    let preferences = vec![
        (
            "Com.Salesforce.MarketingCloud.Access_Token".to_string(),
            "token".to_string(),
        ),
        (
            "COM.SALESFORCE.MARKETINGCLOUD.ANALYTICS".to_string(),
            "tRuE".to_string(),
        ),
    ];

    let builder = parse_xml_config(
        xml_with(&preferences).as_bytes(),
        &DrawableTable::new(),
        &NoSenderId,
    );

    assert_eq!(builder.access_token.as_deref(), Some("token"));
    assert!(builder.analytics_enabled);
}
