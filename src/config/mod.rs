use crate::error::SourceError;
use crate::models::SdkConfigBuilder;
use crate::services::{DrawableTable, NoSenderId, ResourceResolver, SenderIdProvider};
use camino::{Utf8Path, Utf8PathBuf};
use serde_json::{Map, Value};
use std::fs::{self, File};
use std::io::{self, BufReader};

pub mod json;
pub mod xml;

pub use json::parse_json_config;
pub use xml::{CONFIG_PREFIX, parse_xml_config};

/// File name of the JSON configuration inside the application files directory.
pub const JSON_CONFIG_FILE: &str = "mc_config.json";

/// Location of the preference resource relative to the resources directory.
pub const XML_CONFIG_RESOURCE: &str = "xml/config.xml";

/// Loads SDK initialization settings from the available sources.
///
/// Two sources are tried in order:
/// - `mc_config.json` in the application files directory
/// - `xml/config.xml` in the resources directory
///
/// The first usable one produces the builder. Source failures are logged and
/// never returned to the caller.
pub struct ConfigLoader {
    files_dir: Utf8PathBuf,
    json_config_path: Utf8PathBuf,
    xml_config_path: Utf8PathBuf,
    resources: Box<dyn ResourceResolver>,
    sender_ids: Box<dyn SenderIdProvider>,
}

impl ConfigLoader {
    /// Create a loader for the given files and resources directories.
    ///
    /// No drawables are known and no sender id fallback is available until
    /// [`with_resources`](Self::with_resources) and
    /// [`with_sender_ids`](Self::with_sender_ids) are called.
    pub fn new<P: AsRef<Utf8Path>, R: AsRef<Utf8Path>>(files_dir: P, resources_dir: R) -> Self {
        let files_dir = files_dir.as_ref().to_path_buf();
        Self {
            json_config_path: files_dir.join(JSON_CONFIG_FILE),
            xml_config_path: resources_dir.as_ref().join(XML_CONFIG_RESOURCE),
            files_dir,
            resources: Box::new(DrawableTable::new()),
            sender_ids: Box::new(NoSenderId),
        }
    }

    pub fn with_resources(mut self, resources: impl ResourceResolver + 'static) -> Self {
        self.resources = Box::new(resources);
        self
    }

    pub fn with_sender_ids(mut self, sender_ids: impl SenderIdProvider + 'static) -> Self {
        self.sender_ids = Box::new(sender_ids);
        self
    }

    /// Build a configuration builder from the first available source.
    ///
    /// # Returns
    /// - The JSON-derived builder when `mc_config.json` is non-empty and parses as an object
    /// - Otherwise the XML-derived builder when the preference resource exists
    /// - `None` when neither source exists
    pub fn prepare_config_builder(&self) -> Option<SdkConfigBuilder> {
        let contents = self.read_json_config();
        if !contents.is_empty() {
            match parse_json_object(&contents) {
                Ok(config) => {
                    tracing::info!("Loading SDK configuration from {}", self.json_config_path);
                    return Some(parse_json_config(
                        &config,
                        self.resources.as_ref(),
                        self.sender_ids.as_ref(),
                    ));
                }
                Err(e) => {
                    tracing::error!("Unable to load {}: {}", self.json_config_path, e);
                }
            }
        }

        if !self.xml_config_path.exists() {
            tracing::warn!(
                "No SDK configuration found at {} or {}",
                self.json_config_path,
                self.xml_config_path
            );
            return None;
        }

        tracing::info!("Loading SDK configuration from {}", self.xml_config_path);
        let builder = match File::open(&self.xml_config_path) {
            Ok(file) => parse_xml_config(
                BufReader::new(file),
                self.resources.as_ref(),
                self.sender_ids.as_ref(),
            ),
            Err(e) => {
                let error = SourceError::Io {
                    path: self.xml_config_path.clone(),
                    source: e,
                };
                tracing::error!("Unable to open config.xml: {}", error);
                parse_xml_config(
                    io::empty(),
                    self.resources.as_ref(),
                    self.sender_ids.as_ref(),
                )
            }
        };
        Some(builder)
    }

    /// Contents of `mc_config.json` with line breaks removed, or empty when it
    /// can not be read.
    fn read_json_config(&self) -> String {
        match read_source(&self.json_config_path) {
            Ok(contents) => contents.lines().collect(),
            Err(SourceError::NotFound(path)) => {
                tracing::debug!("File not found: {}", path);
                String::new()
            }
            Err(e) => {
                tracing::error!("{}", e);
                String::new()
            }
        }
    }

    /// Get the application files directory.
    pub fn files_dir(&self) -> &Utf8Path {
        &self.files_dir
    }

    pub fn json_config_path(&self) -> &Utf8Path {
        &self.json_config_path
    }

    pub fn xml_config_path(&self) -> &Utf8Path {
        &self.xml_config_path
    }
}

fn read_source(path: &Utf8Path) -> Result<String, SourceError> {
    fs::read_to_string(path).map_err(|source| {
        if source.kind() == io::ErrorKind::NotFound {
            SourceError::NotFound(path.to_path_buf())
        } else {
            SourceError::Io {
                path: path.to_path_buf(),
                source,
            }
        }
    })
}

fn parse_json_object(contents: &str) -> Result<Map<String, Value>, SourceError> {
    match serde_json::from_str(contents)? {
        Value::Object(config) => Ok(config),
        _ => Err(SourceError::NotAnObject),
    }
}

/// Ask the provider for a sender id; failure leaves the field unset.
pub(crate) fn apply_sender_id_fallback(
    builder: &mut SdkConfigBuilder,
    sender_ids: &dyn SenderIdProvider,
) {
    match sender_ids.sender_id() {
        Ok(sender_id) => {
            tracing::info!("Using sender id from platform defaults");
            builder.set_sender_id(sender_id);
        }
        Err(e) => {
            tracing::error!(
                "Unable to retrieve sender id. Push messages will not work: {}",
                e
            );
        }
    }
}
