//! `edge_features.c` emission

use crate::artifacts::HEADER_FILE;
use feature_engine::{TranslatedFeature, BUFFER_IDENT, LENGTH_IDENT};
use std::fmt::Write;

/// One feature with its resolved channel column
pub(crate) struct FeatureSlot {
    pub channel: usize,
    pub translated: TranslatedFeature,
}

pub(crate) fn emit_feature_source(slots: &[FeatureSlot]) -> String {
    let mut out = String::new();

    out.push_str("/* Generated by edge-codegen. Do not edit. */\n");
    out.push_str("#include <math.h>\n#include <stddef.h>\n");
    let _ = writeln!(out, "#include \"{}\"\n", HEADER_FILE);

    out.push_str("/* One channel column of the current window; static, sized at build time */\n");
    out.push_str("static float channel_buf[EDGE_WINDOW_SIZE];\n\n");

    out.push_str(
        "static void copy_channel(const float *window, int num_samples, int channel)\n\
         {\n    \
             for (int i = 0; i < num_samples; i++) {\n        \
                 channel_buf[i] = window[i * EDGE_NUM_CHANNELS + channel];\n    \
             }\n\
         }\n\n",
    );

    out.push_str("int edge_extract_features(const float *window, int num_samples, float *features)\n{\n");
    let _ = writeln!(out, "    const float *{} = channel_buf;", BUFFER_IDENT);
    let _ = writeln!(out, "    const int {} = num_samples;", LENGTH_IDENT);
    let _ = writeln!(out, "    (void){};\n    (void){};\n", BUFFER_IDENT, LENGTH_IDENT);
    out.push_str(
        "    if (window == NULL || features == NULL) {\n        \
             return -1;\n    \
         }\n    \
         if (num_samples <= 0 || num_samples > EDGE_WINDOW_SIZE) {\n        \
             return -1;\n    \
         }\n",
    );

    let mut loaded: Option<usize> = None;
    for (idx, slot) in slots.iter().enumerate() {
        let t = &slot.translated;
        out.push('\n');
        let _ = writeln!(
            out,
            "    /* Feature {}: {}{} */",
            idx,
            t.feature.replace("*/", "* /"),
            if t.implemented { "" } else { " (STUB)" }
        );
        if loaded != Some(slot.channel) {
            let _ = writeln!(out, "    copy_channel(window, num_samples, {});", slot.channel);
            loaded = Some(slot.channel);
        }
        out.push_str("    {\n");
        out.push_str(&indent(&t.code, 8));
        let _ = writeln!(out, "        features[{}] = {};", idx, t.variable);
        out.push_str("    }\n");
    }

    out.push_str("\n    return EDGE_NUM_FEATURES;\n}\n");
    out
}

fn indent(code: &str, spaces: usize) -> String {
    let pad = " ".repeat(spaces);
    code.lines()
        .map(|line| {
            if line.is_empty() {
                "\n".to_string()
            } else {
                format!("{}{}\n", pad, line)
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use feature_engine::translate_str;

    fn slot(channel: usize, raw: &str) -> FeatureSlot {
        FeatureSlot {
            channel,
            translated: translate_str(raw).unwrap(),
        }
    }

    #[test]
    fn test_indent() {
        assert_eq!(indent("a\n\nb\n", 4), "    a\n\n    b\n");
    }

    #[test]
    fn test_features_in_order() {
        let text = emit_feature_source(&[
            slot(0, "ax__mean"),
            slot(0, "ax__max"),
            slot(1, "ay__variance"),
        ]);

        let mean = text.find("features[0] = f_ax__mean;").unwrap();
        let max = text.find("features[1] = f_ax__max;").unwrap();
        let var = text.find("features[2] = f_ay__variance;").unwrap();
        assert!(mean < max && max < var);
    }

    #[test]
    fn test_channel_copied_only_on_change() {
        let text = emit_feature_source(&[
            slot(0, "ax__mean"),
            slot(0, "ax__min"),
            slot(1, "ay__mean"),
        ]);
        assert_eq!(text.matches("copy_channel(window, num_samples, 0);").count(), 1);
        assert_eq!(text.matches("copy_channel(window, num_samples, 1);").count(), 1);
    }

    #[test]
    fn test_stub_feature_marked() {
        let text = emit_feature_source(&[slot(0, "chan__fft_coefficient__coeff_3")]);
        assert!(text.contains("/* Feature 0: chan__fft_coefficient__coeff_3 (STUB) */"));
        assert!(text.contains("UNIMPLEMENTED"));
    }

    #[test]
    fn test_bounds_check_present() {
        let text = emit_feature_source(&[slot(0, "ax__length")]);
        assert!(text.contains("if (num_samples <= 0 || num_samples > EDGE_WINDOW_SIZE)"));
        assert!(text.contains("static float channel_buf[EDGE_WINDOW_SIZE];"));
        assert!(!text.contains("malloc"));
    }
}
