//! Build descriptions wrapping the generated sources

use crate::artifacts::{GeneratedArtifacts, CONFIG_HEADER_FILE, HEADER_FILE};
use serde::{Deserialize, Serialize};
use serde_json::json;

/// Toolchain the build description targets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BuildSystem {
    #[default]
    Cmake,
    Makefile,
    PlatformIo,
}

impl BuildSystem {
    /// File name of the build description
    pub fn file_name(&self) -> &'static str {
        match self {
            BuildSystem::Cmake => "CMakeLists.txt",
            BuildSystem::Makefile => "Makefile",
            BuildSystem::PlatformIo => "library.json",
        }
    }
}

/// Build description for the generated sources as `(file name, contents)`
pub fn build_description(system: BuildSystem, project: &str) -> (&'static str, String) {
    let target = target_name(project);
    let [model_c, features_c] = GeneratedArtifacts::compile_units();

    let text = match system {
        BuildSystem::Cmake => format!(
            "cmake_minimum_required(VERSION 3.13)\n\
             project({target} C)\n\
             \n\
             add_library({target} STATIC {model_c} {features_c})\n\
             target_include_directories({target} PUBLIC ${{CMAKE_CURRENT_SOURCE_DIR}})\n\
             set_target_properties({target} PROPERTIES C_STANDARD 99)\n\
             if(NOT MSVC)\n    \
                 target_link_libraries({target} PUBLIC m)\n\
             endif()\n"
        ),
        BuildSystem::Makefile => {
            let objs = format!(
                "{} {}",
                model_c.replace(".c", ".o"),
                features_c.replace(".c", ".o")
            );
            format!(
                "CC ?= cc\n\
                 AR ?= ar\n\
                 CFLAGS ?= -std=c99 -O2 -Wall\n\
                 \n\
                 OBJS = {objs}\n\
                 \n\
                 lib{target}.a: $(OBJS)\n\
                 \t$(AR) rcs $@ $^\n\
                 \n\
                 %.o: %.c {HEADER_FILE} {CONFIG_HEADER_FILE}\n\
                 \t$(CC) $(CFLAGS) -c $< -o $@\n\
                 \n\
                 clean:\n\
                 \trm -f $(OBJS) lib{target}.a\n\
                 \n\
                 .PHONY: clean\n"
            )
        }
        BuildSystem::PlatformIo => {
            let manifest = json!({
                "name": target,
                "version": env!("CARGO_PKG_VERSION"),
                "frameworks": "*",
                "platforms": "*",
                "build": {
                    "srcFilter": [format!("+<{}>", model_c), format!("+<{}>", features_c)],
                    "flags": "-std=c99",
                },
            });
            let mut text = serde_json::to_string_pretty(&manifest).unwrap_or_default();
            text.push('\n');
            text
        }
    };

    (system.file_name(), text)
}

fn target_name(project: &str) -> String {
    let name: String = project
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '_' { c } else { '_' })
        .collect();
    if name.is_empty() {
        "edge_model".to_string()
    } else {
        name
    }
}
