//! Generated Artifact Set

/// Header file declaring the public API
pub const HEADER_FILE: &str = "edge_model.h";

/// Model parameters and scoring
pub const SOURCE_FILE: &str = "edge_model.c";

/// Windowed feature extraction
pub const FEATURE_SOURCE_FILE: &str = "edge_features.c";

/// Platform and window constants
pub const CONFIG_HEADER_FILE: &str = "edge_model_config.h";

/// Model data counted toward the RAM estimate is capped at 10 KB
pub const MODEL_DATA_RAM_CAP: usize = 10 * 1024;

/// Output of one generation run
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratedArtifacts {
    /// `edge_model.h`
    pub header: String,
    /// `edge_model.c`
    pub source: String,
    /// `edge_features.c`
    pub feature_source: String,
    /// `edge_model_config.h`
    pub config_header: String,
    /// Selected feature identifiers, in extraction order
    pub feature_names: Vec<String>,
    /// Length of the feature vector
    pub feature_count: usize,
    /// Features emitted as zero stubs
    pub stub_features: Vec<String>,
    /// Total characters across the four texts.
    ///
    /// A rough proxy only; measure the compiled artifact for real flash use.
    pub estimated_code_size: usize,
    /// Feature vector + input buffer + model data (capped), in bytes
    pub estimated_ram_usage: usize,
}

impl GeneratedArtifacts {
    /// File name and contents for each text artifact
    pub fn files(&self) -> [(&'static str, &str); 4] {
        [
            (HEADER_FILE, self.header.as_str()),
            (SOURCE_FILE, self.source.as_str()),
            (FEATURE_SOURCE_FILE, self.feature_source.as_str()),
            (CONFIG_HEADER_FILE, self.config_header.as_str()),
        ]
    }

    /// Source files a build must compile
    pub fn compile_units() -> [&'static str; 2] {
        [SOURCE_FILE, FEATURE_SOURCE_FILE]
    }
}

/// `4 * features + 4 * window_size + min(model_data, 10 KB)`
pub(crate) fn estimate_ram(feature_count: usize, window_size: usize, model_data_bytes: usize) -> usize {
    4 * feature_count + 4 * window_size + model_data_bytes.min(MODEL_DATA_RAM_CAP)
}
