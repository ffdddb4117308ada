use std::{env, error::Error, path::PathBuf};

use crate::{
    registry::{DirectoryRegistry, ManifestRegistry, ModuleRegistry},
    Modorder,
};

#[derive(Default)]
pub struct ModorderBuilder {
    // All other paths are relative to `root`
    root: Option<PathBuf>,
    manifest_file_name: Option<PathBuf>,
    modules_directory: Option<PathBuf>,
    load_order_file_name: Option<PathBuf>,
}

impl ModorderBuilder {
    /// Project root directory.
    ///
    /// Defaults to the current directory.
    pub fn root(mut self, path: impl Into<PathBuf>) -> Self {
        self.root = Some(path.into());
        self
    }

    /// Name of the manifest listing the installed modules.
    ///
    /// Defaults to `modules.toml`.
    pub fn manifest_file_name(mut self, path: impl Into<PathBuf>) -> Self {
        self.manifest_file_name = Some(path.into());
        self
    }

    /// Directory holding one subdirectory with a `module.toml` per module.
    /// When set, modules are read from it instead of the manifest.
    pub fn modules_directory(mut self, path: impl Into<PathBuf>) -> Self {
        self.modules_directory = Some(path.into());
        self
    }

    /// Name of the load order file.
    ///
    /// Defaults to `load-order.toml`.
    pub fn load_order_file_name(mut self, path: impl Into<PathBuf>) -> Self {
        self.load_order_file_name = Some(path.into());
        self
    }

    pub fn try_build(self) -> Result<Modorder, Box<dyn Error>> {
        let Self {
            root,
            manifest_file_name,
            modules_directory,
            load_order_file_name,
        } = self;
        let root = match root {
            Some(root) => root,
            None => env::current_dir()?,
        };

        let manifest_file_name =
            manifest_file_name.unwrap_or_else(|| PathBuf::from("modules.toml"));

        let load_order_file_name =
            load_order_file_name.unwrap_or_else(|| PathBuf::from("load-order.toml"));

        let registry: Box<dyn ModuleRegistry> = match modules_directory {
            Some(directory) => Box::new(DirectoryRegistry::new(root.join(directory))),
            None => Box::new(ManifestRegistry::new(root.join(&manifest_file_name))),
        };

        Ok(Modorder {
            registry,
            root,
            manifest_file_name,
            load_order_file_name,
        })
    }
}
