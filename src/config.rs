// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Runtime configuration.
//!
//! Sources, lowest priority first:
//!
//! 1. `config/default.*`
//! 2. `config/$ENV.*` when `ENV` is set
//! 3. `config/local.*`
//! 4. `BLUEPRINT__*` environment variables (`BLUEPRINT__STORE__TTL_SECONDS=60`)
//!
//! Every file is optional and every key has a default.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::{
    error::{Error, Result},
    generator::FlowchartMode,
    variant::DatabaseVariant
};

/// Environment variable prefix.
pub const ENV_PREFIX: &str = "BLUEPRINT";

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ForgeConfig {
    /// Generation defaults.
    pub generation: GenerationConfig,
    /// Project store limits.
    pub store:      StoreConfig
}

/// Defaults applied while generating.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationConfig {
    /// Package used when the analysis carries a blank one.
    pub base_package:     String,
    /// Root directory for projects written to disk.
    pub output_directory: PathBuf,
    /// Flowchart body style.
    pub flowchart_mode:   FlowchartMode,
    /// Variant used when a request names none.
    pub default_database: DatabaseVariant
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            base_package:     "com.generated".to_string(),
            output_directory: PathBuf::from("generated-projects"),
            flowchart_mode:   FlowchartMode::default(),
            default_database: DatabaseVariant::default()
        }
    }
}

/// Bounds of the in-memory project store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Seconds a project stays available after it was stored.
    pub ttl_seconds:  u64,
    /// Maximum number of stored projects.
    pub max_projects: u64
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            ttl_seconds:  3600,
            max_projects: 256
        }
    }
}

impl ForgeConfig {
    /// Load configuration from the layered sources.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] when a source is malformed or the result
    /// fails [`ForgeConfig::validate`].
    pub fn load() -> Result<Self> {
        let mut builder = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false));

        if let Ok(env) = std::env::var("ENV") {
            builder = builder
                .add_source(config::File::with_name(&format!("config/{env}")).required(false));
        }

        builder = builder
            .add_source(config::File::with_name("config/local").required(false))
            .add_source(config::Environment::with_prefix(ENV_PREFIX).separator("__"));

        let loaded: Self = builder.build()?.try_deserialize()?;
        loaded.validate()?;
        tracing::debug!(?loaded, "configuration loaded");
        Ok(loaded)
    }

    /// Load configuration from a single file, ignoring environment layers.
    ///
    /// # Errors
    ///
    /// Same as [`ForgeConfig::load`]; the file must exist.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let loaded: Self = config::Config::builder()
            .add_source(config::File::from(path.as_ref()))
            .build()?
            .try_deserialize()?;
        loaded.validate()?;
        Ok(loaded)
    }

    /// Reject values the engine cannot work with.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] naming the offending key.
    pub fn validate(&self) -> Result<()> {
        if self.generation.base_package.trim().is_empty() {
            return Err(invalid("generation.base_package must not be empty"));
        }
        if self.store.ttl_seconds == 0 {
            return Err(invalid("store.ttl_seconds must be greater than zero"));
        }
        if self.store.max_projects == 0 {
            return Err(invalid("store.max_projects must be greater than zero"));
        }
        Ok(())
    }
}

fn invalid(message: &str) -> Error {
    Error::Config(config::ConfigError::Message(message.to_string()))
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn defaults() {
        let config = ForgeConfig::default();
        assert_eq!(config.generation.base_package, "com.generated");
        assert_eq!(config.generation.output_directory, PathBuf::from("generated-projects"));
        assert_eq!(config.generation.flowchart_mode, FlowchartMode::Linear);
        assert_eq!(config.generation.default_database, DatabaseVariant::H2);
        assert_eq!(config.store.ttl_seconds, 3600);
        assert_eq!(config.store.max_projects, 256);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn file_overrides_selected_keys() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            "[generation]\nflowchart_mode = \"structured\"\ndefault_database = \"postgres\"\n\n[store]\nmax_projects = 4\n"
        )
        .unwrap();

        let config = ForgeConfig::from_file(file.path()).unwrap();
        assert_eq!(config.generation.flowchart_mode, FlowchartMode::Structured);
        assert_eq!(config.generation.default_database, DatabaseVariant::Postgresql);
        assert_eq!(config.generation.base_package, "com.generated");
        assert_eq!(config.store.max_projects, 4);
        assert_eq!(config.store.ttl_seconds, 3600);
    }

    #[test]
    fn zero_limits_are_rejected() {
        let mut config = ForgeConfig::default();
        config.store.ttl_seconds = 0;
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("store.ttl_seconds"));

        let mut config = ForgeConfig::default();
        config.store.max_projects = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn blank_package_is_rejected() {
        let mut config = ForgeConfig::default();
        config.generation.base_package = "  ".into();
        assert!(config.validate().is_err());
    }
}
