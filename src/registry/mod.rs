mod directory;
mod manifest;

use std::path::PathBuf;

use thiserror::Error;

use crate::model::{module::ModuleDescriptor, ParseError};

pub use directory::DirectoryRegistry;
pub use manifest::ManifestRegistry;

#[derive(Error, Debug)]
pub enum RegistryError {
    #[error("Error while reading module descriptor {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: ParseError,
    },
    #[error("Error while scanning module directory {path}: {source}")]
    Scan {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Enumerates the installed modules, in a stable order.
pub trait ModuleRegistry {
    fn modules(&self) -> Result<Vec<ModuleDescriptor>, RegistryError>;
}

impl ModuleRegistry for Vec<ModuleDescriptor> {
    fn modules(&self) -> Result<Vec<ModuleDescriptor>, RegistryError> {
        Ok(self.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::command_handlers::do_resolve;

    use pretty_assertions::assert_eq;

    #[test]
    fn in_memory_registry() {
        let registry = vec![
            ModuleDescriptor::new("cms", "2.1.0", ["core"]),
            ModuleDescriptor::new("core", "1.0.0", Vec::<&str>::new()),
        ];
        let order = do_resolve(&registry).unwrap();
        assert_eq!(
            order.iter().map(|m| m.name.as_str()).collect::<Vec<_>>(),
            vec!["core", "cms"]
        );
        assert_eq!(registry.modules().unwrap().len(), 2);
    }
}
