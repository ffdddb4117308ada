use std::{error::Error, path::PathBuf};

use clap::Parser;
use log::warn;
use modorder::{
    cli::args::{CliArgs, Command},
    config::{ModorderConfig, RegistrySource},
    model::module::ModuleName,
    LoadOrderMode, Modorder,
};

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    if let Err(e) = run() {
        log::error!("{}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn Error>> {
    let cli_args: CliArgs = CliArgs::parse();
    let config = ModorderConfig::load()?;

    let mut builder = Modorder::builder().load_order_file_name(&cli_args.load_order_location);
    if let Some(root) = &cli_args.root {
        builder = builder.root(root);
    }
    builder = match config.registry_source(
        cli_args.manifest_location.as_ref().map(PathBuf::from),
        cli_args.modules_directory.as_ref().map(PathBuf::from),
    ) {
        RegistrySource::Directory(directory) => builder.modules_directory(directory),
        RegistrySource::Manifest(manifest) => builder.manifest_file_name(manifest),
        RegistrySource::Default => builder,
    };
    let modorder = builder.try_build()?;

    match cli_args.cmd {
        Command::Order { write } => {
            let modules = if write {
                modorder
                    .order(LoadOrderMode::Update)?
                    .modules
                    .into_iter()
                    .map(|m| (m.name, m.version))
                    .collect::<Vec<_>>()
            } else {
                modorder
                    .resolve()?
                    .into_iter()
                    .map(|m| (m.name, m.version))
                    .collect()
            };
            for (position, (name, version)) in modules.iter().enumerate() {
                println!("{:>3}. {} {}", position + 1, name, version);
            }
        }
        Command::Check => {
            let load_order = modorder.order(LoadOrderMode::Locked)?;
            println!(
                "Load order of {} modules is up to date",
                load_order.modules.len()
            );
        }
        Command::Graph => {
            for module in modorder.graph()? {
                println!("{} {}", module.name, module.version);
                println!("  depends on:  {}", join(&module.depends_on));
                println!("  required by: {}", join(&module.dependents));
            }
        }
        Command::Dependents { module } => {
            let dependents = modorder.dependents(&ModuleName::parse(&module)?)?;
            if dependents.is_empty() {
                warn!("No installed module requires {}", module);
            }
            for dependent in dependents {
                println!("{}", dependent);
            }
        }
        Command::Init { name, force } => modorder.init(name, force)?,
    }

    Ok(())
}

fn join(names: &[ModuleName]) -> String {
    if names.is_empty() {
        "-".to_string()
    } else {
        names
            .iter()
            .map(ModuleName::as_str)
            .collect::<Vec<_>>()
            .join(", ")
    }
}
