//! Segmentation configuration

use crate::SegmentError;
use serde::{Deserialize, Serialize};

/// Segmentation configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SegmentConfig {
    /// Window length in samples
    pub window_size: usize,

    /// Fraction of a window shared with the next one, in [0, 1)
    pub overlap_ratio: f64,

    /// Sampling rate recorded in window metadata (Hz)
    pub sampling_rate: f64,

    /// Windows with fewer samples are skipped
    pub min_window_samples: usize,

    /// Optional time column name
    pub time_column: Option<String>,

    /// Optional label column name
    pub label_column: Option<String>,
}

impl Default for SegmentConfig {
    fn default() -> Self {
        Self {
            window_size: 100,
            overlap_ratio: 0.5,
            sampling_rate: 100.0,
            min_window_samples: 10,
            time_column: None,
            label_column: None,
        }
    }
}

impl SegmentConfig {
    /// Create config for a window size and overlap, other fields default
    pub fn new(window_size: usize, overlap_ratio: f64) -> Self {
        Self {
            window_size,
            overlap_ratio,
            ..Default::default()
        }
    }

    /// Set the label column
    pub fn with_label_column(mut self, name: impl Into<String>) -> Self {
        self.label_column = Some(name.into());
        self
    }

    /// Set the time column
    pub fn with_time_column(mut self, name: impl Into<String>) -> Self {
        self.time_column = Some(name.into());
        self
    }

    /// Check the numeric parameters
    pub fn validate(&self) -> Result<(), SegmentError> {
        if self.window_size == 0 {
            return Err(SegmentError::ZeroWindowSize);
        }
        if !self.overlap_ratio.is_finite() || !(0.0..1.0).contains(&self.overlap_ratio) {
            return Err(SegmentError::InvalidOverlap(self.overlap_ratio));
        }
        if !self.sampling_rate.is_finite() || self.sampling_rate <= 0.0 {
            return Err(SegmentError::InvalidSamplingRate(self.sampling_rate));
        }
        Ok(())
    }
}
