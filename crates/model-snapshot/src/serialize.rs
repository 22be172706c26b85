//! C Literal Serialization
//!
//! Output is a pure function of the snapshot and feature order: literals use
//! six fixed decimals and an `f` suffix so regeneration is byte-identical.

use crate::snapshot::{ModelParams, ModelSnapshot, StandardScaler};
use crate::SnapshotError;
use std::fmt::Write;
use tracing::{debug, warn};

/// Cap on retained KNN training rows
pub const MAX_TRAINING_ROWS: usize = 500;

/// Macro holding the feature-vector length in generated code
pub const NUM_FEATURES_MACRO: &str = "EDGE_NUM_FEATURES";

const FLOAT_BYTES: usize = 4;

/// Literal declarations for one snapshot
#[derive(Debug, Clone, PartialEq)]
pub struct SerializedModel {
    /// C declarations (`static const float ...`)
    pub declarations: String,
    /// KNN rows emitted (0 for other kinds)
    pub retained_rows: usize,
    /// Whether the training matrix was cut to [`MAX_TRAINING_ROWS`]
    pub truncated: bool,
    /// Bytes occupied by the emitted arrays on target
    pub data_bytes: usize,
}

/// Format a value as a single-precision C literal
pub fn format_float(value: f64) -> String {
    format!("{:.6}f", value)
}

/// Serialize scaler and model parameters into C declarations
pub fn serialize<S: AsRef<str>>(
    snapshot: &ModelSnapshot,
    feature_order: &[S],
) -> Result<SerializedModel, SnapshotError> {
    let feature_count = feature_order.len();
    snapshot.validate(feature_count)?;

    let mut out = String::new();
    let mut floats = 0;

    let identity;
    let scaler = match &snapshot.scaler {
        Some(scaler) => {
            out.push_str("/* Standardizing scaler, one entry per feature in extraction order */\n");
            scaler
        }
        None => {
            out.push_str("/* No scaler in snapshot: identity normalization (mean 0, scale 1) */\n");
            identity = StandardScaler::identity(feature_count);
            &identity
        }
    };

    write_vector(&mut out, "FEATURE_MEAN", &scaler.mean, feature_order);
    out.push('\n');
    write_vector(&mut out, "FEATURE_SCALE", &scaler.scale, feature_order);
    floats += 2 * feature_count;

    let mut retained_rows = 0;
    let mut truncated = false;

    if let ModelParams::Knn { k, training_data } = &snapshot.model {
        let rows = snapshot.retained_rows();
        retained_rows = rows.len();
        truncated = training_data.len() > rows.len();

        out.push('\n');
        if truncated {
            warn!(
                "KNN training data cut from {} to {} rows",
                training_data.len(),
                rows.len()
            );
            let _ = writeln!(
                out,
                "/* KNN training data: first {} of {} rows (subset of training data) */",
                rows.len(),
                training_data.len()
            );
        } else {
            let _ = writeln!(out, "/* KNN training data: all {} rows */", rows.len());
        }
        let _ = writeln!(out, "#define KNN_K {}", k);
        let _ = writeln!(out, "#define KNN_TRAINING_ROWS {}", rows.len());
        let _ = writeln!(
            out,
            "static const float KNN_TRAINING_DATA[KNN_TRAINING_ROWS][{}] = {{",
            NUM_FEATURES_MACRO
        );
        for row in rows {
            let values: Vec<String> = row.iter().map(|&v| format_float(v)).collect();
            let _ = writeln!(out, "    {{{}}},", values.join(", "));
        }
        out.push_str("};\n");
        floats += rows.len() * feature_count;
    }

    debug!(
        "Serialized {} model: {} floats, {} retained rows",
        snapshot.kind(),
        floats,
        retained_rows
    );

    Ok(SerializedModel {
        declarations: out,
        retained_rows,
        truncated,
        data_bytes: floats * FLOAT_BYTES,
    })
}

fn write_vector<S: AsRef<str>>(out: &mut String, name: &str, values: &[f64], labels: &[S]) {
    let _ = writeln!(
        out,
        "static const float {}[{}] = {{",
        name, NUM_FEATURES_MACRO
    );
    for (value, label) in values.iter().zip(labels) {
        let _ = writeln!(
            out,
            "    {}, /* {} */",
            format_float(*value),
            comment_safe(label.as_ref())
        );
    }
    out.push_str("};\n");
}

fn comment_safe(text: &str) -> String {
    text.replace("*/", "* /")
}
