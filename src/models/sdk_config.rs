use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use url::Url;

/// Notification appearance options handed to the SDK.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationCustomizationOptions {
    pub small_icon_resource_id: i32,
}

impl NotificationCustomizationOptions {
    /// Options using the given drawable resource id as the small icon.
    pub fn create(small_icon_resource_id: i32) -> Self {
        Self {
            small_icon_resource_id,
        }
    }
}

/// Finalized, immutable SDK initialization settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SdkConfig {
    application_id: String,
    access_token: String,
    sender_id: Option<String>,
    server_url: String,
    analytics_enabled: bool,
    delay_registration_until_contact_key_is_set: bool,
    geofencing_enabled: bool,
    notification_customization_options: Option<NotificationCustomizationOptions>,
}

impl SdkConfig {
    /// Start an empty builder.
    pub fn builder() -> SdkConfigBuilder {
        SdkConfigBuilder::default()
    }

    pub fn application_id(&self) -> &str {
        &self.application_id
    }

    pub fn access_token(&self) -> &str {
        &self.access_token
    }

    pub fn sender_id(&self) -> Option<&str> {
        self.sender_id.as_deref()
    }

    pub fn server_url(&self) -> &str {
        &self.server_url
    }

    pub fn analytics_enabled(&self) -> bool {
        self.analytics_enabled
    }

    pub fn delay_registration_until_contact_key_is_set(&self) -> bool {
        self.delay_registration_until_contact_key_is_set
    }

    pub fn geofencing_enabled(&self) -> bool {
        self.geofencing_enabled
    }

    pub fn notification_customization_options(&self) -> Option<NotificationCustomizationOptions> {
        self.notification_customization_options
    }
}

/// Accumulator for [`SdkConfig`].
///
/// Every setter overwrites the previous value, so when a source mentions a
/// key twice the last occurrence wins. Flags default to `false`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SdkConfigBuilder {
    pub application_id: Option<String>,
    pub access_token: Option<String>,
    pub sender_id: Option<String>,
    pub server_url: Option<String>,
    pub analytics_enabled: bool,
    pub delay_registration_until_contact_key_is_set: bool,
    pub geofencing_enabled: bool,
    pub notification_customization_options: Option<NotificationCustomizationOptions>,
}

impl SdkConfigBuilder {
    pub fn set_application_id(&mut self, value: impl Into<String>) -> &mut Self {
        self.application_id = Some(value.into());
        self
    }

    pub fn set_access_token(&mut self, value: impl Into<String>) -> &mut Self {
        self.access_token = Some(value.into());
        self
    }

    pub fn set_sender_id(&mut self, value: impl Into<String>) -> &mut Self {
        self.sender_id = Some(value.into());
        self
    }

    pub fn set_server_url(&mut self, value: impl Into<String>) -> &mut Self {
        self.server_url = Some(value.into());
        self
    }

    pub fn set_analytics_enabled(&mut self, enabled: bool) -> &mut Self {
        self.analytics_enabled = enabled;
        self
    }

    pub fn set_delay_registration_until_contact_key_is_set(&mut self, delay: bool) -> &mut Self {
        self.delay_registration_until_contact_key_is_set = delay;
        self
    }

    pub fn set_geofencing_enabled(&mut self, enabled: bool) -> &mut Self {
        self.geofencing_enabled = enabled;
        self
    }

    pub fn set_notification_customization_options(
        &mut self,
        options: NotificationCustomizationOptions,
    ) -> &mut Self {
        self.notification_customization_options = Some(options);
        self
    }

    /// Validate the accumulated fields and produce an immutable [`SdkConfig`].
    ///
    /// Application id, access token and server url are required and must not
    /// be blank; they are kept exactly as supplied. The server url must be an
    /// absolute `http` or `https` url. A missing sender id is allowed but push
    /// delivery will not work, which is logged.
    pub fn build(&self) -> Result<SdkConfig, ConfigError> {
        let application_id = required("application_id", &self.application_id)?;
        let access_token = required("access_token", &self.access_token)?;
        let server_url = required("server_url", &self.server_url)?;

        let parsed = Url::parse(&server_url).map_err(|e| ConfigError::InvalidServerUrl {
            url: server_url.clone(),
            reason: e.to_string(),
        })?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(ConfigError::InvalidServerUrl {
                url: server_url,
                reason: format!("unsupported scheme {}", parsed.scheme()),
            });
        }

        if self.sender_id.is_none() {
            tracing::warn!("Building configuration without a sender id, push messages will not be delivered");
        }

        Ok(SdkConfig {
            application_id,
            access_token,
            sender_id: self.sender_id.clone(),
            server_url,
            analytics_enabled: self.analytics_enabled,
            delay_registration_until_contact_key_is_set: self
                .delay_registration_until_contact_key_is_set,
            geofencing_enabled: self.geofencing_enabled,
            notification_customization_options: self.notification_customization_options,
        })
    }
}

fn required(field: &'static str, value: &Option<String>) -> Result<String, ConfigError> {
    match value {
        None => Err(ConfigError::MissingField(field)),
        Some(v) if v.trim().is_empty() => Err(ConfigError::EmptyField(field)),
        Some(v) => Ok(v.clone()),
    }
}

/// Flag parsing shared by every source: only `"true"` (any ASCII case) is true.
pub fn parse_flag(value: &str) -> bool {
    value.eq_ignore_ascii_case("true")
}
