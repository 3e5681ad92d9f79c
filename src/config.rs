use std::path::Path;
use anyhow::Context;
use serde::Deserialize;

/// Settings of a [`crate::MapLoader`], usually read from a YAML file.
#[derive(Clone, Eq, PartialEq, Default, Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Directory prepended to every path read through the loader's source.
    pub path_prefix: Option<String>,
    /// Decode layers on the rayon thread pool.
    pub parallel: bool,
}

impl Config {

    pub fn from_yaml(yaml: &str) -> Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(yaml)
    }

    pub fn from_file(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let yaml = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config '{}'", path.display()))?;
        let config = Self::from_yaml(&yaml)
            .with_context(|| format!("Invalid config '{}'", path.display()))?;
        Ok(config)
    }
}
