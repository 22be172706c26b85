//! Window Segmentation
//!
//! Slices a multi-channel sensor table into fixed-length, optionally
//! overlapping windows and labels each window by majority vote.

mod config;
mod error;
mod segmenter;
mod vote;
mod window;

pub use config::SegmentConfig;
pub use error::SegmentError;
pub use segmenter::{segment, step_size, window_count, WindowSegmenter};
pub use vote::majority_vote;
pub use window::{Window, WindowMetadata};
