// src/pipeline.rs

//! Pipeline orchestration
//!
//! Drives the fixed stage order: resolve → fetch → inspect/unpack → sanitize
//! → provide mappings → normalize → remap (×1 or ×2) → decompile. Execution
//! is strictly sequential; every stage finishes (including its blocking
//! process or network call) before the next starts. Failure at any stage
//! aborts the run, with two exceptions decided here rather than inside the
//! stages: the advisory library prefetch and the optional named mapping
//! layer, whose absence is a valid early-terminal state.

use crate::artifact::Side;
use crate::client::HttpClient;
use crate::error::Result;
use crate::mappings::{normalize, MappingStrategy};
use crate::tools::ToolSet;
use crate::workspace::Workspace;
use crate::{bundle, decompile, fetch, manifest, remap, sanitize};
use std::path::PathBuf;
use tracing::info;

/// Everything one run needs, assembled by the CLI and fixed thereafter
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    pub version: String,
    pub side: Side,
    pub strategy: MappingStrategy,
    pub workspace: Workspace,
    pub tools_dir: PathBuf,
    pub manifest_url: String,
}

/// Run the full pipeline, returning the decompiled sources directory
pub fn run(config: &PipelineConfig) -> Result<PathBuf> {
    // Tool presence comes first: a missing tool must abort before any
    // network or filesystem work
    let tools = ToolSet::locate(&config.tools_dir)?;

    config.workspace.ensure()?;
    let client = HttpClient::new()?;

    info!(
        "Pipeline start: version '{}', side {}, {} mappings, workspace {}",
        config.version,
        config.side,
        config.strategy,
        config.workspace.root().display()
    );

    let metadata = manifest::resolve(&client, &config.manifest_url, &config.version)?;

    let primary = fetch::fetch_primary(&client, &config.workspace, &metadata, config.side)?;
    fetch::fetch_libraries(&client, &config.workspace, &metadata);

    let payload = bundle::resolve_payload(primary, &config.workspace, &tools)?;

    let stripped = sanitize::strip_signatures(
        &payload,
        &config.workspace.stripped_artifact(config.side),
    )?;

    let sets = config.strategy.resolve(
        &client,
        &config.workspace,
        &metadata,
        config.side,
        &config.version,
    )?;
    let sets = sets
        .into_iter()
        .map(normalize::normalize_if_needed)
        .collect::<Result<Vec<_>>>()?;

    let mapped = remap::run_passes(&tools, &config.workspace, stripped, &sets)?;

    let sources = decompile::run(&tools, &config.workspace, &mapped)?;

    info!(
        "Pipeline complete: '{}' sources in {}",
        mapped.namespace(),
        sources.display()
    );
    Ok(sources)
}
