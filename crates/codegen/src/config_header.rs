//! `edge_model_config.h` emission

use crate::artifacts::HEADER_FILE;
use crate::platform::PlatformConfig;
use model_snapshot::{format_float, ModelKind};
use std::fmt::Write;

pub(crate) fn emit_config_header(platform: &PlatformConfig, kind: ModelKind) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "/* Generated by edge-codegen; included by {}. Do not edit. */", HEADER_FILE);
    out.push_str("#ifndef EDGE_MODEL_CONFIG_H\n#define EDGE_MODEL_CONFIG_H\n\n");

    let _ = writeln!(out, "#define {} 1", platform.platform.macro_name());
    let _ = writeln!(out, "#define EDGE_PLATFORM_NAME \"{}\"", platform.platform);
    out.push('\n');

    let _ = writeln!(out, "#define EDGE_WINDOW_SIZE {}", platform.window_size);
    let _ = writeln!(out, "#define EDGE_NUM_CHANNELS {}", platform.channel_names.len());
    let _ = writeln!(
        out,
        "#define EDGE_SAMPLING_RATE_HZ {}",
        format_float(platform.sampling_rate_hz)
    );
    out.push('\n');

    let _ = writeln!(out, "#define EDGE_MODEL_KIND \"{}\"", kind);
    let _ = writeln!(
        out,
        "#define EDGE_ANOMALY_THRESHOLD {}",
        format_float(kind.threshold())
    );
    out.push('\n');

    out.push_str("/* Input window layout: row-major, EDGE_NUM_CHANNELS values per sample */\n");
    for (idx, name) in platform.channel_names.iter().enumerate() {
        let _ = writeln!(out, "/*   column {}: {} */", idx, name.replace("*/", "* /"));
    }

    out.push_str("\n#endif /* EDGE_MODEL_CONFIG_H */\n");
    out
}
