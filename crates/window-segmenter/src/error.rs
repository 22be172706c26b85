//! Segmentation Error Types

use thiserror::Error;

/// Configuration errors detected before any window is produced
#[derive(Debug, Clone, Error, PartialEq)]
pub enum SegmentError {
    /// Window size of zero
    #[error("Window size must be greater than zero")]
    ZeroWindowSize,

    /// Overlap outside [0, 1)
    #[error("Overlap ratio {0} is outside [0, 1)")]
    InvalidOverlap(f64),

    /// Non-positive or non-finite sampling rate
    #[error("Sampling rate {0} must be positive and finite")]
    InvalidSamplingRate(f64),

    /// No channels requested
    #[error("At least one channel must be requested")]
    NoChannels,

    /// Requested channel absent from the source table
    #[error("Channel not found in source table: {0}")]
    MissingChannel(String),

    /// Requested channel holds text instead of samples
    #[error("Channel '{0}' is not numeric")]
    NonNumericChannel(String),

    /// Configured time column absent
    #[error("Time column not found in source table: {0}")]
    MissingTimeColumn(String),

    /// Configured label column absent
    #[error("Label column not found in source table: {0}")]
    MissingLabelColumn(String),
}
