use std::collections::HashSet;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::foundation::error::{RobohashError, RobohashResult};

/// How a registered set is laid out on disk.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SetKind {
    /// Subdirectories are choice groups.
    Plain,
    /// Subdirectories are color variants, each laid out like a plain set.
    Colored,
}

/// One named set to register at startup.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SetConfig {
    /// Name used in requests and as the directory under `sets_dir`.
    pub name: String,
    /// Directory layout.
    pub kind: SetKind,
}

impl SetConfig {
    /// Plain set named `name`.
    pub fn plain(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: SetKind::Plain,
        }
    }

    /// Color-variant set named `name`.
    pub fn colored(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: SetKind::Colored,
        }
    }
}

/// Startup configuration for [`crate::RobohashBuilder`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BuilderConfig {
    /// Directory holding one subdirectory per set.
    pub sets_dir: PathBuf,
    /// Sets to register.
    pub sets: Vec<SetConfig>,
    /// Set used when a request names none.
    pub default_set: String,
    /// Seed used when a request supplies none. Empty means the public seed.
    pub default_seed: String,
    /// Memoize decoded layers across builds.
    pub cache_layers: bool,
}

impl Default for BuilderConfig {
    fn default() -> Self {
        Self {
            sets_dir: PathBuf::from("sets"),
            sets: vec![
                SetConfig::colored("set1"),
                SetConfig::plain("set2"),
                SetConfig::plain("set3"),
            ],
            default_set: "set1".to_string(),
            default_seed: String::new(),
            cache_layers: true,
        }
    }
}

impl BuilderConfig {
    /// Parse a configuration from a JSON reader. Missing fields take their defaults.
    pub fn from_reader<R: std::io::Read>(r: R) -> RobohashResult<Self> {
        let cfg: Self = serde_json::from_reader(r)
            .map_err(|e| RobohashError::serde(format!("parse builder config JSON: {e}")))?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Parse a configuration from a JSON file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> RobohashResult<Self> {
        let path = path.as_ref();
        let f = File::open(path)
            .with_context(|| format!("open builder config '{}'", path.display()))?;
        Self::from_reader(BufReader::new(f))
    }

    /// Replace the sets directory.
    pub fn with_sets_dir(mut self, sets_dir: impl Into<PathBuf>) -> Self {
        self.sets_dir = sets_dir.into();
        self
    }

    /// Check names are unique and the default set is registered.
    pub fn validate(&self) -> RobohashResult<()> {
        if self.sets.is_empty() {
            return Err(RobohashError::validation("no sets configured"));
        }
        let mut seen = HashSet::new();
        for set in &self.sets {
            if set.name.is_empty() {
                return Err(RobohashError::validation("set names must be non-empty"));
            }
            if !seen.insert(set.name.as_str()) {
                return Err(RobohashError::validation(format!(
                    "set '{}' is configured twice",
                    set.name
                )));
            }
        }
        if !seen.contains(self.default_set.as_str()) {
            return Err(RobohashError::validation(format!(
                "default set '{}' is not configured",
                self.default_set
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/builder/config.rs"]
mod tests;
