use std::{error::Error, path::PathBuf};

use crate::{
    cli::command_handlers::{do_dependents, do_graph, do_init, do_order, do_resolve},
    model::{
        load_order::LoadOrder,
        module::{ModuleDescriptor, ModuleName},
    },
    registry::ModuleRegistry,
};

mod builder;

pub use builder::ModorderBuilder;

pub struct Modorder {
    registry: Box<dyn ModuleRegistry>,
    root: PathBuf,
    manifest_file_name: PathBuf,
    load_order_file_name: PathBuf,
}

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum LoadOrderMode {
    /// Verify that the load order file is up to date. This mode should be normally used on CI.
    Locked,
    /// Rewrite the load order file if necessary.
    Update,
}

/// Adjacency of one module, as reported by [`Modorder::graph`].
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct ModuleReport {
    pub name: ModuleName,
    pub version: String,
    pub depends_on: Vec<ModuleName>,
    pub dependents: Vec<ModuleName>,
}

impl Modorder {
    pub fn builder() -> ModorderBuilder {
        ModorderBuilder::default()
    }

    /// Resolves the installed modules into initialization order
    pub fn resolve(&self) -> Result<Vec<ModuleDescriptor>, Box<dyn Error>> {
        do_resolve(self.registry.as_ref())
    }

    /// Writes or verifies the load order file
    pub fn order(&self, mode: LoadOrderMode) -> Result<LoadOrder, Box<dyn Error>> {
        do_order(
            mode,
            self.registry.as_ref(),
            &self.root,
            &self.load_order_file_name,
        )
    }

    /// Direct requirements and direct dependents of every installed module
    pub fn graph(&self) -> Result<Vec<ModuleReport>, Box<dyn Error>> {
        do_graph(self.registry.as_ref())
    }

    /// Modules that would stop resolving if `name` were removed
    pub fn dependents(&self, name: &ModuleName) -> Result<Vec<ModuleName>, Box<dyn Error>> {
        do_dependents(self.registry.as_ref(), name)
    }

    /// Creates a manifest declaring a single module, replacing an existing one only with `force`
    pub fn init(&self, name: Option<String>, force: bool) -> Result<(), Box<dyn Error>> {
        do_init(&self.root, name, &self.manifest_file_name, force)
    }
}
