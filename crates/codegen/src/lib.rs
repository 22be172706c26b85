//! Embedded Source Emitter
//!
//! Combines translated feature fragments and serialized model parameters into
//! a C99 header/source set that extracts features from a window and scores it
//! with no dynamic allocation.

mod artifacts;
mod build_files;
mod config_header;
mod emitter;
mod features;
mod header;
mod platform;
mod source;

pub use artifacts::{
    GeneratedArtifacts, CONFIG_HEADER_FILE, FEATURE_SOURCE_FILE, HEADER_FILE, MODEL_DATA_RAM_CAP,
    SOURCE_FILE,
};
pub use build_files::{build_description, BuildSystem};
pub use emitter::{emit, emit_from_names, CodeGenerator};
pub use platform::{PlatformConfig, TargetPlatform};

use feature_engine::FeatureError;
use model_snapshot::SnapshotError;
use thiserror::Error;

/// Errors during code generation; no artifacts are returned on error
#[derive(Debug, Clone, Error, PartialEq)]
pub enum CodegenError {
    #[error("No features selected for generation")]
    NoFeatures,
    #[error("Window size must be greater than zero")]
    ZeroWindowSize,
    #[error("Sampling rate {0} must be positive and finite")]
    InvalidSamplingRate(f64),
    #[error("Platform config lists no channels")]
    NoChannels,
    #[error("Channel listed twice in platform config: {0}")]
    DuplicateChannel(String),
    #[error("Feature '{feature}' references channel '{channel}' not in platform config")]
    UnknownChannel { feature: String, channel: String },
    #[error("Invalid model snapshot: {0}")]
    Snapshot(#[from] SnapshotError),
    #[error("Invalid feature: {0}")]
    Feature(#[from] FeatureError),
}
