//! Model Snapshot Types

use crate::serialize::MAX_TRAINING_ROWS;
use crate::SnapshotError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Per-feature standardization `(x - mean) / scale`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StandardScaler {
    /// Per-feature mean, in feature order
    pub mean: Vec<f64>,
    /// Per-feature scale (standard deviation), in feature order
    pub scale: Vec<f64>,
}

impl StandardScaler {
    /// Scaler that leaves values unchanged
    pub fn identity(features: usize) -> Self {
        Self {
            mean: vec![0.0; features],
            scale: vec![1.0; features],
        }
    }
}

/// Model-specific parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ModelParams {
    /// K-nearest-neighbor detector; training rows are in standardized space
    Knn {
        k: usize,
        training_data: Vec<Vec<f64>>,
    },
    /// Local outlier factor (density)
    Lof,
    /// Isolation forest
    IsolationForest,
    /// Copula-based outlier detector (probabilistic)
    Copod,
    /// Any algorithm without an embedded scorer
    Unsupported { name: String },
}

/// Model family, selecting the embedded scoring function
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModelKind {
    Knn,
    Lof,
    IsolationForest,
    Copod,
    Unsupported,
}

impl ModelKind {
    /// Get string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            ModelKind::Knn => "knn",
            ModelKind::Lof => "lof",
            ModelKind::IsolationForest => "isolation_forest",
            ModelKind::Copod => "copod",
            ModelKind::Unsupported => "unsupported",
        }
    }

    /// Score above which a window is flagged anomalous
    pub fn threshold(&self) -> f64 {
        match self {
            ModelKind::Knn => 1.5,
            ModelKind::Lof => 2.0,
            ModelKind::IsolationForest => 0.5,
            ModelKind::Copod => 2.0,
            ModelKind::Unsupported => 3.0,
        }
    }

    /// Whether the embedded scorer only approximates the trained model
    pub fn is_simplified(&self) -> bool {
        !matches!(self, ModelKind::Knn)
    }
}

impl fmt::Display for ModelKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Everything code generation needs from a trained model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelSnapshot {
    /// Feature scaler; `None` means identity normalization
    #[serde(default)]
    pub scaler: Option<StandardScaler>,
    /// Algorithm-specific parameters
    pub model: ModelParams,
}

impl ModelSnapshot {
    /// Create a snapshot
    pub fn new(scaler: Option<StandardScaler>, model: ModelParams) -> Self {
        Self { scaler, model }
    }

    /// Model family
    pub fn kind(&self) -> ModelKind {
        match &self.model {
            ModelParams::Knn { .. } => ModelKind::Knn,
            ModelParams::Lof => ModelKind::Lof,
            ModelParams::IsolationForest => ModelKind::IsolationForest,
            ModelParams::Copod => ModelKind::Copod,
            ModelParams::Unsupported { .. } => ModelKind::Unsupported,
        }
    }

    /// Algorithm name as it was trained
    pub fn algorithm_name(&self) -> &str {
        match &self.model {
            ModelParams::Unsupported { name } => name,
            _ => self.kind().as_str(),
        }
    }

    /// Training rows that survive the embedded size cap
    pub fn retained_rows(&self) -> &[Vec<f64>] {
        match &self.model {
            ModelParams::Knn { training_data, .. } => {
                &training_data[..training_data.len().min(MAX_TRAINING_ROWS)]
            }
            _ => &[],
        }
    }

    /// Check array shapes and values against the selected feature count
    pub fn validate(&self, feature_count: usize) -> Result<(), SnapshotError> {
        if feature_count == 0 {
            return Err(SnapshotError::NoFeatures);
        }

        if let Some(scaler) = &self.scaler {
            check_len("scaler mean", scaler.mean.len(), feature_count)?;
            check_len("scaler scale", scaler.scale.len(), feature_count)?;
            check_finite("scaler mean", &scaler.mean)?;
            for (index, &value) in scaler.scale.iter().enumerate() {
                if !value.is_finite() || value == 0.0 {
                    return Err(SnapshotError::InvalidScale { index, value });
                }
            }
        }

        if let ModelParams::Knn { k, training_data } = &self.model {
            if training_data.is_empty() {
                return Err(SnapshotError::EmptyTrainingData);
            }
            let retained = self.retained_rows();
            if *k == 0 || *k > retained.len() {
                return Err(SnapshotError::InvalidNeighborCount {
                    k: *k,
                    rows: retained.len(),
                });
            }
            for (row, values) in retained.iter().enumerate() {
                if values.len() != feature_count {
                    return Err(SnapshotError::RowWidthMismatch {
                        row,
                        expected: feature_count,
                        actual: values.len(),
                    });
                }
                check_finite("training data", values)?;
            }
        }

        Ok(())
    }
}

fn check_len(what: &'static str, actual: usize, expected: usize) -> Result<(), SnapshotError> {
    if actual != expected {
        return Err(SnapshotError::FeatureCountMismatch {
            what,
            expected,
            actual,
        });
    }
    Ok(())
}

fn check_finite(what: &'static str, values: &[f64]) -> Result<(), SnapshotError> {
    match values.iter().find(|v| !v.is_finite()) {
        Some(&value) => Err(SnapshotError::NonFiniteValue { what, value }),
        None => Ok(()),
    }
}
