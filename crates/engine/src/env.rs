// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Config-variable environment for child scripts.
//!
//! Run-time config (`--KEY=VALUE`) is exported as `npm_config_KEY`.
//! Package-scoped overwrites (`--PKG:VAR=VALUE` flags and ambient
//! `<pkg>_config_<VAR>` variables) are exported for the manifest's own
//! package as `npm_package_config_VAR` and `<pkg>_config_<VAR>`.

/// One package-scoped config overwrite.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageConfig {
    pub package: String,
    pub variable: String,
    pub value: String,
}

/// Environment entries added to every child invocation.
///
/// Entries later in the list win, so callers append CLI flags after ambient
/// values to let flags overwrite the environment.
pub fn child_env(
    config: &[(String, String)],
    package_name: Option<&str>,
    package_config: &[PackageConfig],
) -> Vec<(String, String)> {
    let mut env = Vec::new();
    for (key, value) in config {
        env.push((format!("npm_config_{key}"), value.clone()));
    }
    if let Some(pkg) = package_name {
        for pc in package_config.iter().filter(|pc| pc.package == pkg) {
            env.push((format!("npm_package_config_{}", pc.variable), pc.value.clone()));
            env.push((format!("{}_config_{}", pc.package, pc.variable), pc.value.clone()));
        }
    }
    env
}

/// Ambient `<pkg>_config_<VAR>` variables for the manifest's package.
pub fn ambient_package_config(package_name: &str) -> Vec<PackageConfig> {
    let prefix = format!("{package_name}_config_");
    std::env::vars()
        .filter_map(|(key, value)| {
            key.strip_prefix(&prefix).map(|variable| PackageConfig {
                package: package_name.to_string(),
                variable: variable.to_string(),
                value,
            })
        })
        .collect()
}

/// `npm_config_loglevel=silent` in the environment implies silent mode.
pub fn silent_from_env() -> bool {
    std::env::var("npm_config_loglevel")
        .map(|v| v == "silent")
        .unwrap_or(false)
}

#[cfg(test)]
#[path = "env_tests.rs"]
mod tests;
