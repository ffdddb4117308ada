use thiserror::Error;

pub mod load_order;
pub mod module;

#[derive(Error, Debug)]
pub enum ParseError {
    #[error("IO error reading module toml: {0}")]
    IO(#[from] std::io::Error),
    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Missing TOML key `{0}` while parsing")]
    MissingKey(String),
    #[error("Invalid module name `{0}`")]
    InvalidModuleName(String),
    #[error("Expected a table for module `{0}`")]
    NotATable(String),
    #[error("Unsupported load order file version {0}")]
    UnsupportedLoadOrderVersion(toml::Value),
    #[error("Load order file is missing its `version` key")]
    MissingLoadOrderVersion,
}
