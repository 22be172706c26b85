//! Generation entry points

use crate::artifacts::{estimate_ram, GeneratedArtifacts};
use crate::config_header::emit_config_header;
use crate::features::{emit_feature_source, FeatureSlot};
use crate::header::emit_header;
use crate::platform::PlatformConfig;
use crate::source::emit_source;
use crate::CodegenError;
use feature_engine::{translate, FeatureIdentifier};
use model_snapshot::{serialize, ModelSnapshot};
use std::collections::HashSet;
use tracing::{info, warn};

/// Generate the four text artifacts.
///
/// Pure: the same snapshot, features and platform always give byte-identical
/// output. Every input check runs before any text is built.
pub fn emit(
    snapshot: &ModelSnapshot,
    features: &[FeatureIdentifier],
    platform: &PlatformConfig,
) -> Result<GeneratedArtifacts, CodegenError> {
    if features.is_empty() {
        return Err(CodegenError::NoFeatures);
    }
    if platform.window_size == 0 {
        return Err(CodegenError::ZeroWindowSize);
    }
    if !platform.sampling_rate_hz.is_finite() || platform.sampling_rate_hz <= 0.0 {
        return Err(CodegenError::InvalidSamplingRate(platform.sampling_rate_hz));
    }
    if platform.channel_names.is_empty() {
        return Err(CodegenError::NoChannels);
    }

    let mut seen = HashSet::new();
    for name in &platform.channel_names {
        if !seen.insert(name.as_str()) {
            return Err(CodegenError::DuplicateChannel(name.clone()));
        }
    }

    let channels = features
        .iter()
        .map(|f| {
            platform
                .channel_index(f.channel())
                .ok_or_else(|| CodegenError::UnknownChannel {
                    feature: f.to_string(),
                    channel: f.channel().to_string(),
                })
        })
        .collect::<Result<Vec<usize>, _>>()?;

    let feature_names: Vec<String> = features.iter().map(|f| f.to_string()).collect();
    let serialized = serialize(snapshot, &feature_names)?;

    let slots: Vec<FeatureSlot> = features
        .iter()
        .zip(channels)
        .map(|(feature, channel)| FeatureSlot {
            channel,
            translated: translate(feature),
        })
        .collect();

    let stub_features: Vec<String> = slots
        .iter()
        .filter(|s| !s.translated.implemented)
        .map(|s| s.translated.feature.clone())
        .collect();

    let header = emit_header(&feature_names);
    let source = emit_source(snapshot, &serialized);
    let feature_source = emit_feature_source(&slots);
    let config_header = emit_config_header(platform, snapshot.kind());

    let estimated_code_size = header.len() + source.len() + feature_source.len() + config_header.len();
    let estimated_ram_usage = estimate_ram(features.len(), platform.window_size, serialized.data_bytes);

    if !stub_features.is_empty() {
        warn!(
            "{} of {} features are zero stubs: {:?}",
            stub_features.len(),
            features.len(),
            stub_features
        );
    }
    if let Some(ram) = platform.platform.ram_bytes() {
        if estimated_ram_usage > ram {
            warn!(
                "Estimated RAM {} bytes exceeds {} budget of {} bytes",
                estimated_ram_usage, platform.platform, ram
            );
        }
    }

    info!(
        "Generated {} code for {} features on {} (~{} chars, ~{} bytes RAM)",
        snapshot.kind(),
        features.len(),
        platform.platform,
        estimated_code_size,
        estimated_ram_usage
    );

    Ok(GeneratedArtifacts {
        header,
        source,
        feature_source,
        config_header,
        feature_count: feature_names.len(),
        feature_names,
        stub_features,
        estimated_code_size,
        estimated_ram_usage,
    })
}

/// Parse raw identifiers, then [`emit`]
pub fn emit_from_names<S: AsRef<str>>(
    snapshot: &ModelSnapshot,
    features: &[S],
    platform: &PlatformConfig,
) -> Result<GeneratedArtifacts, CodegenError> {
    let features = FeatureIdentifier::parse_all(features)?;
    emit(snapshot, &features, platform)
}

/// Code generator bound to one platform
#[derive(Debug, Clone)]
pub struct CodeGenerator {
    platform: PlatformConfig,
}

impl CodeGenerator {
    /// Create a new generator
    pub fn new(platform: PlatformConfig) -> Self {
        Self { platform }
    }

    /// Get the platform configuration
    pub fn platform(&self) -> &PlatformConfig {
        &self.platform
    }

    /// Generate artifacts for a snapshot and feature list
    pub fn generate(
        &self,
        snapshot: &ModelSnapshot,
        features: &[FeatureIdentifier],
    ) -> Result<GeneratedArtifacts, CodegenError> {
        emit(snapshot, features, &self.platform)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use model_snapshot::{ModelParams, SnapshotError, StandardScaler};

    fn platform() -> PlatformConfig {
        PlatformConfig::new(100, 100.0, vec!["ax".into(), "ay".into()])
    }

    fn features(raw: &[&str]) -> Vec<FeatureIdentifier> {
        FeatureIdentifier::parse_all(raw).unwrap()
    }

    #[test]
    fn test_emit_lof() {
        let snapshot = ModelSnapshot::new(None, ModelParams::Lof);
        let out = emit(&snapshot, &features(&["ax__mean", "ay__std"]), &platform()).unwrap();

        assert_eq!(out.feature_count, 2);
        assert_eq!(out.feature_names, vec!["ax__mean", "ay__std"]);
        assert!(out.stub_features.is_empty());
        assert_eq!(
            out.estimated_code_size,
            out.header.len() + out.source.len() + out.feature_source.len() + out.config_header.len()
        );
        // 2 features + 100 samples + two 2-float scaler arrays
        assert_eq!(out.estimated_ram_usage, 8 + 400 + 16);
    }

    #[test]
    fn test_unknown_channel_rejected() {
        let snapshot = ModelSnapshot::new(None, ModelParams::Lof);
        let err = emit(&snapshot, &features(&["az__mean"]), &platform()).unwrap_err();
        assert_eq!(
            err,
            CodegenError::UnknownChannel {
                feature: "az__mean".into(),
                channel: "az".into()
            }
        );
    }

    #[test]
    fn test_scaler_mismatch_rejected() {
        let snapshot = ModelSnapshot::new(Some(StandardScaler::identity(3)), ModelParams::Copod);
        let err = emit(&snapshot, &features(&["ax__mean", "ax__max"]), &platform()).unwrap_err();
        assert!(matches!(
            err,
            CodegenError::Snapshot(SnapshotError::FeatureCountMismatch { expected: 2, actual: 3, .. })
        ));
    }

    #[test]
    fn test_empty_features_rejected() {
        let snapshot = ModelSnapshot::new(None, ModelParams::Lof);
        assert_eq!(emit(&snapshot, &[], &platform()), Err(CodegenError::NoFeatures));
    }

    #[test]
    fn test_duplicate_channel_rejected() {
        let snapshot = ModelSnapshot::new(None, ModelParams::Lof);
        let platform = PlatformConfig::new(10, 1.0, vec!["ax".into(), "ax".into()]);
        assert_eq!(
            emit(&snapshot, &features(&["ax__mean"]), &platform),
            Err(CodegenError::DuplicateChannel("ax".into()))
        );
    }

    #[test]
    fn test_emit_from_names_malformed() {
        let snapshot = ModelSnapshot::new(None, ModelParams::Lof);
        assert!(matches!(
            emit_from_names(&snapshot, &["ax"], &platform()),
            Err(CodegenError::Feature(_))
        ));
    }

    #[test]
    fn test_generator_wrapper() {
        let generator = CodeGenerator::new(platform());
        let snapshot = ModelSnapshot::new(None, ModelParams::IsolationForest);
        let out = generator.generate(&snapshot, &features(&["ay__min"])).unwrap();
        assert!(out.feature_source.contains("copy_channel(window, num_samples, 1);"));
    }
}
