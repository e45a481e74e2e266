//! Markdown output configuration, read from YAML.

use crate::error::{DocgenError, Result};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Top-level heading of the Markdown document.
    pub title: String,
    pub headers: Headers,
    /// Extra or replacement external type links.
    pub links: BTreeMap<String, String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            title: "API Reference".to_string(),
            headers: Headers::default(),
            links: BTreeMap::new(),
        }
    }
}

/// Column labels of the field table.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Headers {
    pub name: String,
    pub doc: String,
    #[serde(rename = "type")]
    pub type_: String,
    pub mandatory: String,
}

impl Default for Headers {
    fn default() -> Self {
        Self {
            name: "Name".to_string(),
            doc: "Description".to_string(),
            type_: "Type".to_string(),
            mandatory: "Required".to_string(),
        }
    }
}

impl Config {
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|source| DocgenError::UnreadableSource {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml(&content).map_err(|source| DocgenError::Config {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn from_yaml(content: &str) -> std::result::Result<Self, serde_yaml::Error> {
        // An empty document deserializes as null
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(content)
    }
}
