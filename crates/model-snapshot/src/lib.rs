//! Trained Model Snapshots
//!
//! Numeric state needed to reproduce a trained model's scoring without the
//! training library, its serialization into C array literals, and a host-side
//! scorer that follows the generated C.

mod score;
mod serialize;
mod snapshot;

pub use score::Scorer;
pub use serialize::{
    format_float, serialize, SerializedModel, MAX_TRAINING_ROWS, NUM_FEATURES_MACRO,
};
pub use snapshot::{ModelKind, ModelParams, ModelSnapshot, StandardScaler};

use thiserror::Error;

/// Errors detected before any generated text is returned
#[derive(Debug, Clone, Error, PartialEq)]
pub enum SnapshotError {
    #[error("No features selected")]
    NoFeatures,
    #[error("{what} has {actual} entries but {expected} features are selected")]
    FeatureCountMismatch {
        what: &'static str,
        expected: usize,
        actual: usize,
    },
    #[error("Training row {row} has {actual} values but {expected} features are selected")]
    RowWidthMismatch {
        row: usize,
        expected: usize,
        actual: usize,
    },
    #[error("Scaler scale at index {index} is {value}; must be finite and non-zero")]
    InvalidScale { index: usize, value: f64 },
    #[error("Non-finite value {value} in {what}")]
    NonFiniteValue { what: &'static str, value: f64 },
    #[error("KNN model has no training data")]
    EmptyTrainingData,
    #[error("KNN neighbor count {k} must be between 1 and {rows} retained rows")]
    InvalidNeighborCount { k: usize, rows: usize },
}
