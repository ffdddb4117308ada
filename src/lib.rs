pub mod cli;
pub mod config;
pub mod graph;
pub mod model;
pub mod registry;
pub mod resolver;

mod api;

pub use api::{LoadOrderMode, Modorder, ModorderBuilder, ModuleReport};
pub use resolver::{resolve_order, DependencyError, DependencyResolver};
