//! mc-sdk-config - inspect the SDK configuration an application would load.
//!
//! # Execution Flow
//!
//! 1. Resolve settings: defaults → YAML settings file → `MCSDK_*` env → flags
//! 2. Initialize logging → `<log_dir>/mc-sdk-config.<date>` plus stderr
//! 3. Load the configuration builder (`mc_config.json`, else `xml/config.xml`)
//! 4. Print the builder state as YAML on stdout
//! 5. Finalize it and report whether the SDK would accept it
//!
//! Exits non-zero when no configuration source exists or finalizing fails.

use anyhow::Result;
use camino::Utf8PathBuf;
use clap::Parser;
use mc_sdk_config::services::{DrawableTable, GoogleServicesSenderId, NoSenderId};
use mc_sdk_config::{APP_NAME, ConfigLoader, LoaderSettings, VERSION};
use std::process::ExitCode;

#[derive(Debug, Parser)]
#[command(name = "mc-sdk-config", version, about = "Load and validate push SDK configuration")]
struct Cli {
    /// Application files directory containing mc_config.json
    #[arg(long)]
    files_dir: Option<Utf8PathBuf>,

    /// Resources directory containing xml/config.xml
    #[arg(long)]
    resources_dir: Option<Utf8PathBuf>,

    /// google-services.json used when no sender id is configured
    #[arg(long)]
    google_services: Option<Utf8PathBuf>,

    /// JSON object mapping drawable names to resource ids
    #[arg(long)]
    drawables: Option<Utf8PathBuf>,

    /// YAML settings file
    #[arg(long, env = "MCSDK_SETTINGS")]
    settings: Option<Utf8PathBuf>,

    /// Enable debug logging
    #[arg(long)]
    debug: bool,
}

impl Cli {
    fn apply(self, settings: &mut LoaderSettings) {
        if let Some(files_dir) = self.files_dir {
            settings.files_dir = files_dir;
        }
        if let Some(resources_dir) = self.resources_dir {
            settings.resources_dir = resources_dir;
        }
        if self.google_services.is_some() {
            settings.google_services = self.google_services;
        }
        if self.drawables.is_some() {
            settings.drawables = self.drawables;
        }
        settings.debug |= self.debug;
    }
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    let mut settings = LoaderSettings::load(cli.settings.as_deref())?;
    cli.apply(&mut settings);

    let _guard = mc_sdk_config::logging::setup_logging_with_console(
        &settings.log_dir,
        APP_NAME,
        settings.debug,
        true,
    )?;

    tracing::info!("Starting {} v{}", APP_NAME, VERSION);

    let resources = match &settings.drawables {
        Some(path) => DrawableTable::from_json_file(path)?,
        None => DrawableTable::new(),
    };

    let loader = ConfigLoader::new(&settings.files_dir, &settings.resources_dir)
        .with_resources(resources);
    let loader = match &settings.google_services {
        Some(path) => loader.with_sender_ids(GoogleServicesSenderId::from_path(path)),
        None => loader.with_sender_ids(NoSenderId),
    };

    let Some(builder) = loader.prepare_config_builder() else {
        tracing::error!(
            "No configuration source found in {} or {}",
            settings.files_dir,
            settings.resources_dir
        );
        return Ok(ExitCode::FAILURE);
    };

    print!("{}", serde_yaml_ng::to_string(&builder)?);

    match builder.build() {
        Ok(config) => {
            tracing::info!(
                "Configuration is valid for application {} at {}",
                config.application_id(),
                config.server_url()
            );
            Ok(ExitCode::SUCCESS)
        }
        Err(e) => {
            tracing::error!("Configuration rejected: {}", e);
            Ok(ExitCode::FAILURE)
        }
    }
}
