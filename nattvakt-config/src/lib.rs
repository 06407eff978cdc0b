//! # Nattvakt Configuration System
//!
//! Hierarchical configuration for the analyzer: defaults, an optional
//! YAML file, then `NATTVAKT_*` environment variables, validated before
//! use. Detection thresholds and the blacklist itself are fixed
//! constants in the detection crate and deliberately not configurable
//! here; configuration covers the capture device and the dispatch
//! policy only.

#![warn(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use std::path::{Path, PathBuf};

use figment::{
    providers::{Env, Format, Serialized, Yaml},
    Figment,
};
use serde::{Deserialize, Serialize};
use validator::Validate;

mod capture;
mod dispatch;
mod error;
mod validation;

pub use capture::CaptureConfig;
pub use dispatch::{DispatchConfig, DispatchMode};
pub use error::ConfigError;

/// Top-level configuration container.
#[derive(Debug, Serialize, Deserialize, Validate, Default, Clone)]
pub struct NattvaktConfig {
    /// Packet capture parameters.
    #[validate(nested)]
    pub capture: CaptureConfig,

    /// Frame dispatch parameters (worker pool vs. task per frame).
    #[validate(nested)]
    pub dispatch: DispatchConfig,
}

impl NattvaktConfig {
    /// Load configuration from default files and environment.
    ///
    /// Hierarchy:
    /// 1. Default values
    /// 2. `config/nattvakt.yaml` if present
    /// 3. `NATTVAKT_*` environment variables
    pub fn load() -> Result<Self, ConfigError> {
        let mut figment = Figment::from(Serialized::defaults(NattvaktConfig::default()));

        if Path::new("config/nattvakt.yaml").exists() {
            figment = figment.merge(Yaml::file("config/nattvakt.yaml"));
        }

        figment
            .merge(Env::prefixed("NATTVAKT_").split("__"))
            .extract()
            .map_err(ConfigError::from)
            .and_then(|config: Self| {
                config.validate()?;
                Ok(config)
            })
    }

    /// Load configuration from a specific path.
    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(ConfigError::FileNotFound(PathBuf::from(path)));
        }

        Figment::from(Serialized::defaults(NattvaktConfig::default()))
            .merge(Yaml::file(path))
            .merge(Env::prefixed("NATTVAKT_").split("__"))
            .extract()
            .map_err(ConfigError::from)
            .and_then(|config: Self| {
                config.validate()?;
                Ok(config)
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_config_validation() {
        let config = NattvaktConfig::default();
        config.validate().expect("Default config should validate");
    }

    #[test]
    fn missing_file_is_reported() {
        assert!(matches!(
            NattvaktConfig::load_from_path("config/does-not-exist.yaml"),
            Err(ConfigError::FileNotFound(_))
        ));
    }
}
