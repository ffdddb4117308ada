use std::{
    fmt::Display,
    path::Path,
    sync::OnceLock,
};

use log::{debug, error};
use regex_lite::Regex;
use serde::{Deserialize, Serialize};
use toml::{map::Map, Table, Value};

use crate::model::ParseError;

#[derive(Clone, Hash, Deserialize, Serialize, Debug, PartialEq, Eq, Ord, PartialOrd)]
pub struct ModuleName(String);

impl ModuleName {
    pub fn new(s: String) -> Self {
        ModuleName(s)
    }

    /// Builds a name read from a file, rejecting anything a registry could not
    /// have installed under that name.
    pub fn parse(s: &str) -> Result<Self, ParseError> {
        static VALID_NAME: OnceLock<Regex> = OnceLock::new();
        let re = VALID_NAME.get_or_init(|| {
            Regex::new(r"^[A-Za-z0-9][A-Za-z0-9_.\-]*$").expect("module name regex is valid")
        });
        if re.is_match(s) {
            Ok(ModuleName(s.to_string()))
        } else {
            Err(ParseError::InvalidModuleName(s.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for ModuleName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for ModuleName {
    fn from(s: String) -> Self {
        ModuleName(s)
    }
}

impl From<&str> for ModuleName {
    fn from(s: &str) -> Self {
        ModuleName(s.to_string())
    }
}

/// An installable module as enumerated by a registry.
#[derive(PartialEq, Debug, Eq, Clone)]
pub struct ModuleDescriptor {
    pub name: ModuleName,
    pub version: String,
    pub description: Option<String>,
    pub required_modules: Vec<ModuleName>,
}

impl ModuleDescriptor {
    pub fn new(
        name: impl Into<ModuleName>,
        version: impl Into<String>,
        required_modules: impl IntoIterator<Item = impl Into<ModuleName>>,
    ) -> Self {
        ModuleDescriptor {
            name: name.into(),
            version: version.into(),
            description: None,
            required_modules: required_modules.into_iter().map(Into::into).collect(),
        }
    }

    /// The pair two descriptors are compared by.
    pub fn identity(&self) -> (&ModuleName, &str) {
        (&self.name, &self.version)
    }

    /// Reads a single `module.toml`.
    pub fn from_file(path: &Path) -> Result<ModuleDescriptor, ParseError> {
        debug!("Attempting to read module descriptor from {}", path.display());
        let contents = std::fs::read_to_string(path)?;

        let descriptor = ModuleDescriptor::from_toml_str(&contents);
        if let Err(err) = &descriptor {
            error!(
                "Could not build a valid module descriptor from {} due to err {err}",
                path.display()
            )
        }
        descriptor
    }

    pub fn from_toml_str(data: &str) -> Result<ModuleDescriptor, ParseError> {
        let mut table = toml::from_str::<Table>(data)?;

        let name = table
            .remove("name")
            .ok_or_else(|| ParseError::MissingKey("name".to_string()))
            .and_then(|v| v.try_into::<String>().map_err(|e| e.into()))
            .and_then(|name| ModuleName::parse(&name))?;

        parse_module_body(name, table)
    }

    fn into_toml_body(self) -> Map<String, Value> {
        let mut body = Map::new();
        body.insert("version".to_string(), Value::String(self.version));
        if let Some(d) = self.description {
            body.insert("description".to_string(), Value::String(d));
        }
        if !self.required_modules.is_empty() {
            body.insert(
                "requires".to_string(),
                Value::Array(
                    self.required_modules
                        .into_iter()
                        .map(|m| Value::String(m.0))
                        .collect(),
                ),
            );
        }
        body
    }
}

/// The modules listed in a manifest file, in file order.
#[derive(PartialEq, Debug, Eq, Clone, Default)]
pub struct Manifest {
    pub modules: Vec<ModuleDescriptor>,
}

impl Manifest {
    pub fn from_file(path: &Path) -> Result<Manifest, ParseError> {
        debug!("Attempting to read manifest {}", path.display());
        let contents = std::fs::read_to_string(path)?;

        let manifest = Manifest::from_toml_str(&contents);
        if let Err(err) = &manifest {
            error!(
                "Could not build a valid manifest from {} due to err {err}",
                path.display()
            )
        }
        manifest
    }

    pub fn from_toml_str(data: &str) -> Result<Manifest, ParseError> {
        let table = toml::from_str::<Table>(data)?;

        let modules = table
            .into_iter()
            .map(|(k, v)| {
                let name = ModuleName::parse(&k)?;
                match v {
                    Value::Table(body) => parse_module_body(name, body),
                    _ => Err(ParseError::NotATable(k)),
                }
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Manifest { modules })
    }

    pub fn into_toml(self) -> Value {
        let mut manifest = Map::new();
        for module in self.modules {
            let name = module.name.to_string();
            manifest.insert(name, Value::Table(module.into_toml_body()));
        }
        Value::Table(manifest)
    }
}

fn parse_module_body(name: ModuleName, mut body: Table) -> Result<ModuleDescriptor, ParseError> {
    let version = body
        .remove("version")
        .ok_or_else(|| ParseError::MissingKey(format!("{name}.version")))
        .and_then(|v| v.try_into::<String>().map_err(|e| e.into()))?;

    let description = body
        .remove("description")
        .map(|v| v.try_into::<String>())
        .map_or(Ok(None), |v| v.map(Some))?;

    let required_modules = body
        .remove("requires")
        .map(|v| v.try_into::<Vec<String>>())
        .map_or(Ok(None), |v| v.map(Some))?
        .unwrap_or_default()
        .iter()
        .map(|s| ModuleName::parse(s))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(ModuleDescriptor {
        name,
        version,
        description,
        required_modules,
    })
}
