//! Layered settings: defaults, optional TOML file, environment overrides

use anyhow::{Context, Result};
use codegen::{BuildSystem, TargetPlatform};
use serde::{Deserialize, Serialize};
use std::path::Path;
use window_segmenter::SegmentConfig;

/// Environment variable prefix, e.g. `EDGE_CODEGEN__SEGMENT__WINDOW_SIZE=128`
pub const ENV_PREFIX: &str = "EDGE_CODEGEN";

/// Run settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Library/target name used in build descriptions
    pub project_name: String,

    /// Log level passed to the subscriber (`trace` .. `error`)
    pub log_level: String,

    /// Target microcontroller family
    pub platform: TargetPlatform,

    /// Build description to emit next to the sources
    pub build_system: BuildSystem,

    /// Windowing parameters
    pub segment: SegmentConfig,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            project_name: "edge_model".to_string(),
            log_level: "info".to_string(),
            platform: TargetPlatform::Generic,
            build_system: BuildSystem::Cmake,
            segment: SegmentConfig::default(),
        }
    }
}

impl Settings {
    /// Load settings, layering an optional file and the environment over defaults
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut builder = config::Config::builder();

        if let Some(path) = path {
            builder = builder.add_source(config::File::from(path).required(true));
        }

        let settings = builder
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .context("Failed to read settings")?
            .try_deserialize::<Settings>()
            .context("Invalid settings")?;

        settings.segment.validate().context("Invalid segment settings")?;
        Ok(settings)
    }
}
