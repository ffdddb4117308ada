use std::path::PathBuf;

use crate::model::module::{Manifest, ModuleDescriptor};

use super::{ModuleRegistry, RegistryError};

/// Modules listed as tables of a single manifest file.
pub struct ManifestRegistry {
    path: PathBuf,
}

impl ManifestRegistry {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        ManifestRegistry { path: path.into() }
    }
}

impl ModuleRegistry for ManifestRegistry {
    fn modules(&self) -> Result<Vec<ModuleDescriptor>, RegistryError> {
        let manifest = Manifest::from_file(&self.path).map_err(|source| RegistryError::Parse {
            path: self.path.clone(),
            source,
        })?;
        Ok(manifest.modules)
    }
}
