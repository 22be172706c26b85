//! Generation job read from JSON

use anyhow::{Context, Result};
use feature_engine::FeatureIdentifier;
use model_snapshot::ModelSnapshot;
use sensor_table::SensorTable;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// Recording, channel selection, feature selection and trained model
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Job {
    /// Source recording
    pub table: SensorTable,
    /// Channels to window, in input-buffer column order
    pub channels: Vec<String>,
    /// Selected features, in extraction order
    pub features: Vec<FeatureIdentifier>,
    /// Trained model state
    pub model: ModelSnapshot,
}

impl Job {
    /// Read a job from a JSON file
    pub fn from_path(path: &Path) -> Result<Self> {
        let file = File::open(path)
            .with_context(|| format!("Failed to open job file {}", path.display()))?;
        serde_json::from_reader(BufReader::new(file))
            .with_context(|| format!("Failed to parse job file {}", path.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use model_snapshot::ModelKind;

    #[test]
    fn test_parse_job() {
        let json = r#"{
            "table": {"columns": [
                {"name": "ax", "values": [1.0, 2.0, 3.0]},
                {"name": "label", "values": [0, 1, 1]}
            ]},
            "channels": ["ax"],
            "features": ["ax__mean", "ax__fft_coefficient__coeff_1"],
            "model": {"model": {"kind": "lof"}}
        }"#;
        let job: Job = serde_json::from_str(json).unwrap();

        assert_eq!(job.table.len(), 3);
        assert_eq!(job.features.len(), 2);
        assert_eq!(job.features[1].channel(), "ax");
        assert_eq!(job.model.kind(), ModelKind::Lof);
    }

    #[test]
    fn test_malformed_feature_rejected() {
        let json = r#"{
            "table": {"columns": [{"name": "ax", "values": [1.0]}]},
            "channels": ["ax"],
            "features": ["ax"],
            "model": {"model": {"kind": "copod"}}
        }"#;
        assert!(serde_json::from_str::<Job>(json).is_err());
    }
}
