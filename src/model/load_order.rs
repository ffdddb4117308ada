use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::model::ParseError;

use super::module::{ModuleDescriptor, ModuleName};

/// A resolved initialization order, persisted so that changes to it show up in review.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct LoadOrder {
    pub modules: Vec<OrderedModule>,
}

const VERSION: i64 = 1;

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
struct VersionedLoadOrder<'a> {
    pub version: i64,
    #[serde(flatten)]
    pub content: &'a LoadOrder,
}

#[derive(Debug, Clone, Serialize, Deserialize, Eq, PartialEq)]
pub struct OrderedModule {
    pub name: ModuleName,
    pub version: String,
}

impl LoadOrder {
    pub fn from_file(file: &Path) -> Result<LoadOrder, ParseError> {
        LoadOrder::from_str(&std::fs::read_to_string(file)?)
    }

    pub fn from_str(s: &str) -> Result<LoadOrder, ParseError> {
        let mut table = toml::from_str::<toml::Table>(s)?;
        match table.remove("version") {
            Some(toml::Value::Integer(VERSION)) => table.try_into::<LoadOrder>().map_err(Into::into),
            Some(other) => Err(ParseError::UnsupportedLoadOrderVersion(other)),
            None => Err(ParseError::MissingLoadOrderVersion),
        }
    }

    pub fn to_string(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(&VersionedLoadOrder {
            version: VERSION,
            content: self,
        })
    }
}

impl<'a> FromIterator<&'a ModuleDescriptor> for LoadOrder {
    fn from_iter<T: IntoIterator<Item = &'a ModuleDescriptor>>(iter: T) -> Self {
        LoadOrder {
            modules: iter
                .into_iter()
                .map(|module| OrderedModule {
                    name: module.name.clone(),
                    version: module.version.clone(),
                })
                .collect(),
        }
    }
}
