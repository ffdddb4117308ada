use log::{debug, info};

use crate::{
    api::{LoadOrderMode, ModuleReport},
    model::{
        load_order::LoadOrder,
        module::{Manifest, ModuleDescriptor, ModuleName},
    },
    registry::ModuleRegistry,
    resolver::DependencyResolver,
};
use std::{error::Error, path::Path};

const INITIAL_MODULE_VERSION: &str = "0.1.0";

/// Handler to resolve the installed modules into initialization order
pub fn do_resolve(registry: &dyn ModuleRegistry) -> Result<Vec<ModuleDescriptor>, Box<dyn Error>> {
    let modules = registry.modules()?;
    debug!("Resolving load order of {} modules...", modules.len());
    let ordered = DependencyResolver::new().resolve_order(modules)?;
    Ok(ordered)
}

/// Handler to order command
/// Resolves the installed modules and writes or verifies the load order file
pub fn do_order(
    mode: LoadOrderMode,
    registry: &dyn ModuleRegistry,
    root: &Path,
    load_order_file_name: &Path,
) -> Result<LoadOrder, Box<dyn Error>> {
    let load_order = do_resolve(registry)?.iter().collect::<LoadOrder>();

    let load_order_path = root.join(load_order_file_name);

    match (mode, load_order_path.exists()) {
        (LoadOrderMode::Locked, false) => return Err("Load order file does not exist".into()),

        (LoadOrderMode::Locked, true) => {
            debug!("Verifying load order file...");
            let old_order = LoadOrder::from_file(&load_order_path)?;
            if old_order != load_order {
                return Err(format!(
                    "Load order file {} is out of date",
                    load_order_path.display()
                )
                .into());
            }
            debug!("Load order file is up to date");
        }

        (LoadOrderMode::Update, exists) => {
            let old_order = if exists {
                LoadOrder::from_file(&load_order_path)
                    .map_err(|err| debug!("Ignoring unreadable load order file: {err}"))
                    .ok()
            } else {
                None
            };
            if old_order.is_some_and(|old_order| old_order == load_order) {
                debug!("Load order file is up to date");
            } else {
                std::fs::write(&load_order_path, load_order.to_string()?)?;
                info!("Wrote load order to {}", load_order_path.display());
            }
        }
    }

    Ok(load_order)
}

/// Handler to graph command
pub fn do_graph(registry: &dyn ModuleRegistry) -> Result<Vec<ModuleReport>, Box<dyn Error>> {
    let graph = DependencyResolver::new().build_graph(registry.modules()?)?;
    Ok(graph
        .nodes()
        .map(|(_, node)| ModuleReport {
            name: node.name().clone(),
            version: node.module().version.clone(),
            depends_on: graph.names(node.depends_on()),
            dependents: graph.names(node.dependents()),
        })
        .collect())
}

/// Handler to dependents command
pub fn do_dependents(
    registry: &dyn ModuleRegistry,
    name: &ModuleName,
) -> Result<Vec<ModuleName>, Box<dyn Error>> {
    let graph = DependencyResolver::new().build_graph(registry.modules()?)?;
    graph
        .dependents_closure(name)
        .ok_or_else(|| format!("Module {name} is not installed").into())
}

/// Handler to init command
pub fn do_init(
    root: &Path,
    name: Option<String>,
    manifest_file_name: &Path,
    force: bool,
) -> Result<(), Box<dyn Error>> {
    let name = ModuleName::parse(&build_module_name(name, root)?)?;
    let manifest = Manifest {
        modules: vec![ModuleDescriptor::new(
            name,
            INITIAL_MODULE_VERSION,
            Vec::<ModuleName>::new(),
        )],
    };
    create_manifest(manifest, &root.join(manifest_file_name), force)
}

fn create_manifest(
    manifest: Manifest,
    manifest_path: &Path,
    ow: bool,
) -> Result<(), Box<dyn Error>> {
    if manifest_path.exists() && !ow {
        return Err(format!("File already exists: {}", manifest_path.display()).into());
    }
    std::fs::write(manifest_path, toml::to_string_pretty(&manifest.into_toml())?)?;
    info!("Wrote manifest to {}", manifest_path.display());
    Ok(())
}

/// Name if present otherwise attempt to extract from directory
fn build_module_name(name: Option<String>, path: &Path) -> Result<String, Box<dyn Error>> {
    match name {
        Some(name) => Ok(name),
        None => match path.canonicalize()?.file_name() {
            Some(dir) => Ok(dir.to_string_lossy().to_string()),
            None => {
                Err("Module name not given and could not convert location to directory name".into())
            }
        },
    }
}
