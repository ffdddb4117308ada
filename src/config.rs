use std::{collections::HashMap, path::PathBuf};

use config::{Config, ConfigError, Environment};
use serde::Deserialize;

/// Settings picked up from `MODORDER_*` environment variables.
pub struct ModorderConfig {
    pub registry_dir: Option<PathBuf>,
    pub manifest_file: Option<PathBuf>,
}

/// Where the installed modules are read from.
#[derive(Debug, PartialEq, Eq, Clone)]
pub enum RegistrySource {
    Manifest(PathBuf),
    Directory(PathBuf),
    /// Nothing configured, the builder default manifest applies.
    Default,
}

impl ModorderConfig {
    pub fn load() -> anyhow::Result<Self> {
        let raw_config = RawConfig::load(None)?;

        Ok(Self::from_raw(raw_config))
    }

    fn from_raw(raw_config: RawConfig) -> Self {
        Self {
            registry_dir: raw_config.registry.dir,
            manifest_file: raw_config.registry.manifest,
        }
    }

    /// Command line locations win over the environment as a whole: a
    /// `MODORDER_*` variable is only consulted when neither flag was given.
    /// Within one layer the modules directory wins over the manifest.
    pub fn registry_source(
        &self,
        manifest_location: Option<PathBuf>,
        modules_directory: Option<PathBuf>,
    ) -> RegistrySource {
        match (modules_directory, manifest_location) {
            (Some(directory), _) => RegistrySource::Directory(directory),
            (None, Some(manifest)) => RegistrySource::Manifest(manifest),
            (None, None) => match (&self.registry_dir, &self.manifest_file) {
                (Some(directory), _) => RegistrySource::Directory(directory.clone()),
                (None, Some(manifest)) => RegistrySource::Manifest(manifest.clone()),
                (None, None) => RegistrySource::Default,
            },
        }
    }
}

#[derive(Default, Debug, Deserialize, PartialEq, Eq)]
struct RawConfig {
    #[serde(default)]
    registry: RegistryConfig,
}

#[derive(Default, Debug, Deserialize, PartialEq, Eq)]
struct RegistryConfig {
    dir: Option<PathBuf>,
    manifest: Option<PathBuf>,
}

impl RawConfig {
    fn load(env: Option<HashMap<String, String>>) -> Result<Self, ConfigError> {
        Config::builder()
            .add_source(
                Environment::with_prefix("MODORDER")
                    .separator("_")
                    .source(env),
            )
            .build()?
            .try_deserialize()
    }
}
