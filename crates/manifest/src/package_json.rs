// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The local package manifest.
//!
//! Only the fields the runner consumes are modeled: the package name (used
//! to scope config-variable overwrites) and the ordered `scripts` map. The
//! map's declaration order is contractual — pattern expansion preserves it —
//! so it is an [`IndexMap`].

use std::path::Path;

use indexmap::IndexMap;
use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ManifestError {
    #[error("No package.json found in the current directory ({dir})")]
    Missing { dir: String },
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("failed to parse {path}: {source}")]
    Parse {
        path: String,
        source: serde_json::Error,
    },
}

/// Parsed `package.json`, limited to the script map and package name.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Manifest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub scripts: IndexMap<String, String>,
}

impl Manifest {
    /// Load `package.json` from `dir`.
    pub fn load(dir: &Path) -> Result<Self, ManifestError> {
        let path = dir.join("package.json");
        let content = match std::fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(ManifestError::Missing {
                    dir: dir.display().to_string(),
                })
            }
            Err(e) => {
                return Err(ManifestError::Io {
                    path: path.display().to_string(),
                    source: e,
                })
            }
        };
        serde_json::from_str(&content).map_err(|e| ManifestError::Parse {
            path: path.display().to_string(),
            source: e,
        })
    }

    /// Script names in declaration order.
    pub fn script_names(&self) -> Vec<String> {
        self.scripts.keys().cloned().collect()
    }

    pub fn has_script(&self, name: &str) -> bool {
        self.scripts.contains_key(name)
    }
}

#[cfg(test)]
#[path = "package_json_tests.rs"]
mod tests;
