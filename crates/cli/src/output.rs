//! Writing generated artifacts to disk

use anyhow::{Context, Result};
use codegen::{build_description, BuildSystem, GeneratedArtifacts};
use model_snapshot::ModelKind;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Metadata file written next to the sources
pub const MANIFEST_FILE: &str = "manifest.json";

/// Generation metadata for the packaging layer
#[derive(Debug, Serialize)]
struct Manifest<'a> {
    project: &'a str,
    model_kind: ModelKind,
    feature_names: &'a [String],
    feature_count: usize,
    stub_features: &'a [String],
    estimated_code_size: usize,
    estimated_ram_usage: usize,
}

/// Write the four artifacts, the build description and the manifest
pub fn write_artifacts(
    dir: &Path,
    artifacts: &GeneratedArtifacts,
    model_kind: ModelKind,
    build_system: BuildSystem,
    project: &str,
) -> Result<Vec<PathBuf>> {
    fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create output directory {}", dir.display()))?;

    let (build_file, build_text) = build_description(build_system, project);
    let manifest = serde_json::to_string_pretty(&Manifest {
        project,
        model_kind,
        feature_names: &artifacts.feature_names,
        feature_count: artifacts.feature_count,
        stub_features: &artifacts.stub_features,
        estimated_code_size: artifacts.estimated_code_size,
        estimated_ram_usage: artifacts.estimated_ram_usage,
    })?;

    let mut files: Vec<(&str, &str)> = artifacts.files().to_vec();
    files.push((build_file, build_text.as_str()));
    files.push((MANIFEST_FILE, manifest.as_str()));

    let mut written = Vec::with_capacity(files.len());
    for (name, contents) in files {
        let path = dir.join(name);
        fs::write(&path, contents)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        debug!("Wrote {} ({} bytes)", path.display(), contents.len());
        written.push(path);
    }

    Ok(written)
}
