//! `edge_model.h` emission

use crate::artifacts::CONFIG_HEADER_FILE;
use model_snapshot::NUM_FEATURES_MACRO;
use std::fmt::Write;

pub(crate) fn emit_header(feature_names: &[String]) -> String {
    let mut out = String::new();

    out.push_str("/* Generated by edge-codegen. Do not edit. */\n");
    out.push_str("#ifndef EDGE_MODEL_H\n#define EDGE_MODEL_H\n\n");
    out.push_str("#include <stdint.h>\n");
    let _ = writeln!(out, "#include \"{}\"\n", CONFIG_HEADER_FILE);
    out.push_str("#ifdef __cplusplus\nextern \"C\" {\n#endif\n\n");

    out.push_str("/* Feature vector, in extraction order:\n");
    for (idx, name) in feature_names.iter().enumerate() {
        let _ = writeln!(out, " *   [{}] {}", idx, name.replace("*/", "* /"));
    }
    out.push_str(" */\n");
    let _ = writeln!(out, "#define {} {}\n", NUM_FEATURES_MACRO, feature_names.len());

    let _ = writeln!(
        out,
        "typedef struct {{\n    float features[{}];\n    float score;\n    uint8_t is_anomaly;\n}} EdgeModelResult;\n",
        NUM_FEATURES_MACRO
    );

    out.push_str(
        "/* No runtime state; kept for API symmetry with stateful models. */\n\
         void edge_model_init(void);\n\n\
         /* Extract features from an interleaved window of num_samples rows.\n \
         * Returns EDGE_NUM_FEATURES, or -1 if num_samples is outside 1..EDGE_WINDOW_SIZE. */\n\
         int edge_extract_features(const float *window, int num_samples, float *features);\n\n\
         /* Standardize one raw feature with the trained scaler. */\n\
         float edge_normalize_feature(float value, int index);\n\n\
         /* Normalize and score a raw feature vector. */\n\
         void edge_model_infer(const float *features, EdgeModelResult *result);\n\n\
         /* Extract, normalize and score in one call. Returns 0 on success, -1 on bad input. */\n\
         int edge_model_process_window(const float *window, int num_samples, EdgeModelResult *result);\n\n",
    );

    out.push_str("#ifdef __cplusplus\n}\n#endif\n\n#endif /* EDGE_MODEL_H */\n");
    out
}
