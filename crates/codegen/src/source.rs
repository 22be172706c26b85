//! `edge_model.c` emission: model parameters and scoring

use crate::artifacts::HEADER_FILE;
use model_snapshot::{ModelKind, ModelSnapshot, SerializedModel};
use std::fmt::Write;

pub(crate) fn emit_source(snapshot: &ModelSnapshot, serialized: &SerializedModel) -> String {
    let kind = snapshot.kind();
    let mut out = String::new();

    out.push_str("/* Generated by edge-codegen. Do not edit. */\n");
    out.push_str("#include <math.h>\n");
    let _ = writeln!(out, "#include \"{}\"\n", HEADER_FILE);

    let _ = writeln!(out, "/* Model: {} */", snapshot.algorithm_name().replace("*/", "* /"));
    if kind.is_simplified() {
        out.push_str(
            "/* NOTE: simplified stand-in scorer. Scores are not numerically equivalent\n \
             * to the trained model; validate the threshold on target data. */\n",
        );
    }
    out.push('\n');

    out.push_str(&serialized.declarations);
    out.push('\n');

    out.push_str(scorer(kind));
    out.push('\n');

    out.push_str(
        "void edge_model_init(void)\n\
         {\n\
         }\n\
         \n\
         float edge_normalize_feature(float value, int index)\n\
         {\n    \
             if (index < 0 || index >= EDGE_NUM_FEATURES) {\n        \
                 return value;\n    \
             }\n    \
             return (value - FEATURE_MEAN[index]) / FEATURE_SCALE[index];\n\
         }\n\
         \n\
         void edge_model_infer(const float *features, EdgeModelResult *result)\n\
         {\n    \
             float x[EDGE_NUM_FEATURES];\n    \
             for (int i = 0; i < EDGE_NUM_FEATURES; i++) {\n        \
                 result->features[i] = features[i];\n        \
                 x[i] = edge_normalize_feature(features[i], i);\n    \
             }\n    \
             result->score = edge_score(x);\n    \
             result->is_anomaly = (result->score > EDGE_ANOMALY_THRESHOLD) ? 1u : 0u;\n\
         }\n\
         \n\
         int edge_model_process_window(const float *window, int num_samples, EdgeModelResult *result)\n\
         {\n    \
             float features[EDGE_NUM_FEATURES];\n    \
             if (edge_extract_features(window, num_samples, features) < 0) {\n        \
                 return -1;\n    \
             }\n    \
             edge_model_infer(features, result);\n    \
             return 0;\n\
         }\n",
    );

    out
}

fn scorer(kind: ModelKind) -> &'static str {
    match kind {
        ModelKind::Knn => KNN_SCORER,
        ModelKind::Lof => LOF_SCORER,
        ModelKind::IsolationForest => IFOREST_SCORER,
        ModelKind::Copod => COPOD_SCORER,
        ModelKind::Unsupported => FALLBACK_SCORER,
    }
}

// Mean of the KNN_K *largest* distances, matching the trained threshold.
const KNN_SCORER: &str = "\
/* Anomaly score: mean of the KNN_K largest Euclidean distances to the
 * retained training rows. top[] stays sorted in descending order. */
static float edge_score(const float *x)
{
    float top[KNN_K];
    int filled = 0;

    for (int r = 0; r < KNN_TRAINING_ROWS; r++) {
        float acc = 0.0f;
        for (int j = 0; j < EDGE_NUM_FEATURES; j++) {
            float d = x[j] - KNN_TRAINING_DATA[r][j];
            acc += d * d;
        }
        float dist = sqrtf(acc);

        int pos;
        if (filled < KNN_K) {
            pos = filled;
            filled++;
        } else if (dist > top[KNN_K - 1]) {
            pos = KNN_K - 1;
        } else {
            continue;
        }
        while (pos > 0 && top[pos - 1] < dist) {
            top[pos] = top[pos - 1];
            pos--;
        }
        top[pos] = dist;
    }

    float sum = 0.0f;
    for (int i = 0; i < filled; i++) {
        sum += top[i];
    }
    return (filled > 0) ? sum / (float)filled : 0.0f;
}
";

const LOF_SCORER: &str = "\
/* SIMPLIFIED: RMS distance of the standardized vector to an all-zero
 * centroid. Not the trained local outlier factor. */
static float edge_score(const float *x)
{
    float acc = 0.0f;
    for (int i = 0; i < EDGE_NUM_FEATURES; i++) {
        acc += x[i] * x[i];
    }
    return sqrtf(acc / (float)EDGE_NUM_FEATURES);
}
";

const IFOREST_SCORER: &str = "\
/* SIMPLIFIED: 1 - prod(1 / (1 + |x_i|)). Not the trained isolation forest. */
static float edge_score(const float *x)
{
    float p = 1.0f;
    for (int i = 0; i < EDGE_NUM_FEATURES; i++) {
        p *= 1.0f / (1.0f + fabsf(x[i]));
    }
    return 1.0f - p;
}
";

const COPOD_SCORER: &str = "\
/* SIMPLIFIED: mean absolute standardized deviation. Not the trained COPOD
 * tail-probability score. */
static float edge_score(const float *x)
{
    float acc = 0.0f;
    for (int i = 0; i < EDGE_NUM_FEATURES; i++) {
        acc += fabsf(x[i]);
    }
    return acc / (float)EDGE_NUM_FEATURES;
}
";

const FALLBACK_SCORER: &str = "\
/* FALLBACK: no embedded scorer for this model; Euclidean norm of the
 * standardized feature vector. */
static float edge_score(const float *x)
{
    float acc = 0.0f;
    for (int i = 0; i < EDGE_NUM_FEATURES; i++) {
        acc += x[i] * x[i];
    }
    return sqrtf(acc);
}
";

#[cfg(test)]
mod tests {
    use super::*;
    use model_snapshot::{serialize, ModelParams};

    fn source_for(model: ModelParams) -> String {
        let snapshot = ModelSnapshot::new(None, model);
        let serialized = serialize(&snapshot, &["a__mean", "a__max"]).unwrap();
        emit_source(&snapshot, &serialized)
    }

    #[test]
    fn test_knn_source() {
        let text = source_for(ModelParams::Knn {
            k: 2,
            training_data: vec![vec![0.0, 1.0], vec![1.0, 0.0], vec![2.0, 2.0]],
        });
        assert!(text.contains("#define KNN_K 2"));
        assert!(text.contains("KNN_K largest Euclidean distances"));
        assert!(text.contains("while (pos > 0 && top[pos - 1] < dist)"));
        assert!(!text.contains("SIMPLIFIED"));
        assert!(text.contains("result->is_anomaly = (result->score > EDGE_ANOMALY_THRESHOLD) ? 1u : 0u;"));
    }

    #[test]
    fn test_simplified_kinds_marked() {
        for model in [ModelParams::Lof, ModelParams::IsolationForest, ModelParams::Copod] {
            let text = source_for(model);
            assert!(text.contains("simplified stand-in scorer"));
            assert!(text.contains("/* SIMPLIFIED:"));
        }
    }

    #[test]
    fn test_unknown_kind_falls_back_to_norm() {
        let text = source_for(ModelParams::Unsupported {
            name: "auto_encoder".into(),
        });
        assert!(text.contains("/* Model: auto_encoder */"));
        assert!(text.contains("/* FALLBACK:"));
        assert!(text.contains("return sqrtf(acc);"));
    }

    #[test]
    fn test_every_scorer_defines_edge_score() {
        for kind in [
            ModelKind::Knn,
            ModelKind::Lof,
            ModelKind::IsolationForest,
            ModelKind::Copod,
            ModelKind::Unsupported,
        ] {
            assert!(scorer(kind).contains("static float edge_score(const float *x)"));
        }
    }
}
