//! Settings for the inspection binary.
//!
//! Layered with the `config` crate: built-in defaults, then an optional YAML
//! settings file, then `MCSDK_*` environment variables. Command line flags are
//! applied on top by the caller.

use anyhow::{Context, Result};
use camino::{Utf8Path, Utf8PathBuf};
use ::config::{Config, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};

/// Where the loader looks for its inputs and where logs go.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoaderSettings {
    /// Application files directory holding `mc_config.json`.
    pub files_dir: Utf8PathBuf,

    /// Resources directory holding `xml/config.xml`.
    pub resources_dir: Utf8PathBuf,

    /// `google-services.json` used for the sender id fallback.
    #[serde(default)]
    pub google_services: Option<Utf8PathBuf>,

    /// JSON drawable table used to resolve the notification icon.
    #[serde(default)]
    pub drawables: Option<Utf8PathBuf>,

    pub log_dir: Utf8PathBuf,

    #[serde(default)]
    pub debug: bool,
}

impl Default for LoaderSettings {
    fn default() -> Self {
        Self {
            files_dir: Utf8PathBuf::from("files"),
            resources_dir: Utf8PathBuf::from("res"),
            google_services: None,
            drawables: None,
            log_dir: Utf8PathBuf::from("logs"),
            debug: false,
        }
    }
}

impl LoaderSettings {
    /// Load settings from defaults, an optional YAML file and the environment.
    ///
    /// # Arguments
    /// * `settings_file` - YAML settings file; ignored when it does not exist
    pub fn load(settings_file: Option<&Utf8Path>) -> Result<Self> {
        Self::load_with_env(settings_file, Environment::with_prefix("MCSDK"))
    }

    fn load_with_env(settings_file: Option<&Utf8Path>, env: Environment) -> Result<Self> {
        let defaults = Self::default();

        let mut builder = Config::builder()
            .set_default("files_dir", defaults.files_dir.as_str())?
            .set_default("resources_dir", defaults.resources_dir.as_str())?
            .set_default("log_dir", defaults.log_dir.as_str())?
            .set_default("debug", defaults.debug)?;

        if let Some(path) = settings_file {
            builder = builder.add_source(
                File::new(path.as_str(), FileFormat::Yaml).required(false),
            );
        }

        let settings: LoaderSettings = builder
            .add_source(env.try_parsing(true))
            .build()
            .context("Failed to assemble loader settings")?
            .try_deserialize()
            .context("Failed to parse loader settings")?;

        tracing::debug!("Loader settings: {:?}", settings);
        Ok(settings)
    }
}
