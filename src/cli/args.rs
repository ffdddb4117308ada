use clap::{Parser, Subcommand};

/// Resolves the load order of installable modules.
#[derive(Debug, Parser)]
#[clap(version)]
pub struct CliArgs {
    #[clap(subcommand)]
    pub cmd: Command,
    /// Project root directory, defaults to the current directory
    #[clap(short, long)]
    pub root: Option<String>,
    /// Manifest listing the installed modules, relative to the root
    #[clap(short, long)]
    pub manifest_location: Option<String>,
    /// Directory with one `module.toml` per subdirectory; overrides the manifest
    #[clap(short = 'd', long)]
    pub modules_directory: Option<String>,
    #[clap(short, long, default_value = "load-order.toml")]
    pub load_order_location: String,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    ///Prints the initialization order of the installed modules
    Order {
        /// Also update the load order file
        #[clap(short, long)]
        write: bool,
    },
    ///Fails if the load order file is missing or out of date
    Check,
    ///Prints the direct requirements and dependents of every module
    Graph,
    ///Prints every module that requires the given one, directly or transitively
    Dependents { module: String },
    ///Creates a manifest declaring a single module
    Init {
        /// Module name, defaults to the root directory name
        #[clap(short, long)]
        name: Option<String>,
        /// Overwrite an existing manifest
        #[clap(short, long)]
        force: bool,
    },
}
