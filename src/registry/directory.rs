use std::path::PathBuf;

use log::debug;

use crate::model::module::ModuleDescriptor;

use super::{ModuleRegistry, RegistryError};

pub const MODULE_FILE_NAME: &str = "module.toml";

/// One module per subdirectory, each described by its own `module.toml`.
///
/// Subdirectories are enumerated by name so that the order does not depend on
/// the file system.
pub struct DirectoryRegistry {
    path: PathBuf,
}

impl DirectoryRegistry {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        DirectoryRegistry { path: path.into() }
    }

    fn module_files(&self) -> Result<Vec<PathBuf>, std::io::Error> {
        let mut directories = Vec::new();
        for entry in self.path.read_dir()? {
            let path = entry?.path();
            if path.is_dir() {
                directories.push(path);
            }
        }
        directories.sort();

        Ok(directories
            .into_iter()
            .filter_map(|directory| {
                let file = directory.join(MODULE_FILE_NAME);
                if file.is_file() {
                    Some(file)
                } else {
                    debug!(
                        "Skipping {}, it has no {}",
                        directory.display(),
                        MODULE_FILE_NAME
                    );
                    None
                }
            })
            .collect())
    }
}

impl ModuleRegistry for DirectoryRegistry {
    fn modules(&self) -> Result<Vec<ModuleDescriptor>, RegistryError> {
        let files = self.module_files().map_err(|source| RegistryError::Scan {
            path: self.path.clone(),
            source,
        })?;
        files
            .into_iter()
            .map(|file| {
                ModuleDescriptor::from_file(&file)
                    .map_err(|source| RegistryError::Parse { path: file, source })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use super::*;

    use pretty_assertions::assert_eq;

    fn write_module(root: &Path, directory: &str, contents: &str) {
        let directory = root.join(directory);
        std::fs::create_dir_all(&directory).unwrap();
        std::fs::write(directory.join(MODULE_FILE_NAME), contents).unwrap();
    }

    #[test]
    fn scans_subdirectories_by_name() {
        let dir = tempfile::tempdir().unwrap();
        write_module(
            dir.path(),
            "b-search",
            r#"
                name = "search"
                version = "1.2.0"
                requires = ["core"]
            "#,
        );
        write_module(
            dir.path(),
            "a-core",
            r#"
                name = "core"
                version = "1.0.0"
            "#,
        );
        std::fs::create_dir_all(dir.path().join("c-empty")).unwrap();
        std::fs::write(dir.path().join("README"), "not a module").unwrap();

        let modules = DirectoryRegistry::new(dir.path()).modules().unwrap();
        assert_eq!(
            modules,
            vec![
                ModuleDescriptor::new("core", "1.0.0", Vec::<&str>::new()),
                ModuleDescriptor::new("search", "1.2.0", ["core"]),
            ]
        );
    }

    #[test]
    fn reports_the_broken_file() {
        let dir = tempfile::tempdir().unwrap();
        write_module(dir.path(), "core", "version = \"1.0.0\"");

        let err = DirectoryRegistry::new(dir.path()).modules().unwrap_err();
        match err {
            RegistryError::Parse { path, .. } => {
                assert_eq!(path, dir.path().join("core").join(MODULE_FILE_NAME))
            }
            other => panic!("unexpected error {other}"),
        }
    }

    #[test]
    fn missing_directory() {
        let dir = tempfile::tempdir().unwrap();
        let err = DirectoryRegistry::new(dir.path().join("nope"))
            .modules()
            .unwrap_err();
        assert!(matches!(err, RegistryError::Scan { .. }));
    }
}
