//! Host-Side Reference Scoring
//!
//! Follows the scoring functions emitted for the target, including the KNN
//! row cap and the mean-of-k-largest-distances score.

use crate::snapshot::{ModelKind, ModelParams, ModelSnapshot};
use crate::SnapshotError;

/// Validated snapshot ready to score feature vectors
#[derive(Debug, Clone)]
pub struct Scorer<'a> {
    snapshot: &'a ModelSnapshot,
    feature_count: usize,
}

impl ModelSnapshot {
    /// Validate against a feature count and build a scorer
    pub fn scorer(&self, feature_count: usize) -> Result<Scorer<'_>, SnapshotError> {
        self.validate(feature_count)?;
        Ok(Scorer {
            snapshot: self,
            feature_count,
        })
    }
}

impl<'a> Scorer<'a> {
    /// Model family
    pub fn kind(&self) -> ModelKind {
        self.snapshot.kind()
    }

    /// Threshold compared against [`Scorer::score`]
    pub fn threshold(&self) -> f64 {
        self.kind().threshold()
    }

    /// Standardize one raw feature
    pub fn normalize_feature(&self, value: f64, index: usize) -> f64 {
        match &self.snapshot.scaler {
            Some(scaler) => (value - scaler.mean[index]) / scaler.scale[index],
            None => value,
        }
    }

    /// Standardize a raw feature vector
    pub fn normalize(&self, features: &[f64]) -> Result<Vec<f64>, SnapshotError> {
        if features.len() != self.feature_count {
            return Err(SnapshotError::FeatureCountMismatch {
                what: "feature vector",
                expected: self.feature_count,
                actual: features.len(),
            });
        }
        Ok(features
            .iter()
            .enumerate()
            .map(|(i, &v)| self.normalize_feature(v, i))
            .collect())
    }

    /// Anomaly score for a raw feature vector
    pub fn score(&self, features: &[f64]) -> Result<f64, SnapshotError> {
        let x = self.normalize(features)?;
        let n = x.len() as f64;

        let score = match &self.snapshot.model {
            ModelParams::Knn { k, .. } => knn_largest_mean(&x, self.snapshot.retained_rows(), *k),
            ModelParams::Lof => (x.iter().map(|v| v * v).sum::<f64>() / n).sqrt(),
            ModelParams::IsolationForest => {
                1.0 - x.iter().map(|v| 1.0 / (1.0 + v.abs())).product::<f64>()
            }
            ModelParams::Copod => x.iter().map(|v| v.abs()).sum::<f64>() / n,
            ModelParams::Unsupported { .. } => x.iter().map(|v| v * v).sum::<f64>().sqrt(),
        };

        Ok(score)
    }

    /// Whether a score exceeds the kind's threshold
    pub fn is_anomaly(&self, score: f64) -> bool {
        score > self.threshold()
    }
}

/// Mean of the `k` largest Euclidean distances to the training rows.
///
/// Distances are kept in a descending buffer of size `k` filled by
/// insertion, the same selection the embedded scorer performs.
fn knn_largest_mean(x: &[f64], rows: &[Vec<f64>], k: usize) -> f64 {
    let mut top: Vec<f64> = Vec::with_capacity(k);

    for row in rows {
        let dist = x
            .iter()
            .zip(row)
            .map(|(a, b)| (a - b) * (a - b))
            .sum::<f64>()
            .sqrt();

        if top.len() < k {
            let pos = top.iter().position(|&d| dist > d).unwrap_or(top.len());
            top.insert(pos, dist);
        } else if dist > top[k - 1] {
            let pos = top.iter().position(|&d| dist > d).unwrap_or(k - 1);
            top.insert(pos, dist);
            top.truncate(k);
        }
    }

    if top.is_empty() {
        return 0.0;
    }
    top.iter().sum::<f64>() / top.len() as f64
}
