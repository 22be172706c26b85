//! Window Type

use ndarray::{Array2, ArrayView1};
use sensor_table::CellValue;
use serde::{Deserialize, Serialize};

/// Metadata carried by every window
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WindowMetadata {
    /// Sampling rate (Hz)
    pub sampling_rate: f64,
    /// Channel names, in sample column order
    pub channel_names: Vec<String>,
    /// Time of the first sample, if a time column was configured
    pub start_time: Option<CellValue>,
    /// Time of the last sample, if a time column was configured
    pub end_time: Option<CellValue>,
}

/// A contiguous, fixed-length slice of the source table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Window {
    /// Sequence index within one segmentation run
    pub window_id: usize,
    /// First source row (inclusive)
    pub start_index: usize,
    /// Last source row (exclusive)
    pub end_index: usize,
    /// Copied samples, shape `(window_size, channels)`
    pub samples: Array2<f64>,
    /// Majority label when the label column is numeric
    pub numeric_label: i64,
    /// Majority label when the label column is textual
    pub class_label: Option<String>,
    /// Sampling rate, channel names and time bounds
    pub metadata: WindowMetadata,
}

impl Window {
    /// Number of samples per channel
    pub fn len(&self) -> usize {
        self.samples.nrows()
    }

    /// Check if the window holds no samples
    pub fn is_empty(&self) -> bool {
        self.samples.nrows() == 0
    }

    /// Number of channels
    pub fn channel_count(&self) -> usize {
        self.samples.ncols()
    }

    /// Column index of a channel by name
    pub fn channel_index(&self, name: &str) -> Option<usize> {
        self.metadata.channel_names.iter().position(|c| c == name)
    }

    /// View one channel's samples by name
    pub fn channel(&self, name: &str) -> Option<ArrayView1<'_, f64>> {
        self.channel_index(name).map(|idx| self.samples.column(idx))
    }

    /// Window duration in seconds, derived from the sampling rate
    pub fn duration_secs(&self) -> f64 {
        self.len() as f64 / self.metadata.sampling_rate
    }

    /// Check whether a class label is set
    pub fn has_class_label(&self) -> bool {
        self.class_label.is_some()
    }
}
