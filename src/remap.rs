// src/remap.rs

//! Remap passes
//!
//! Runs the external remapper once per mapping set, in chain order. The loop
//! is strategy-agnostic: one set or two, every pass gets the previous pass's
//! output (or the stripped artifact on the first pass), its own mapping
//! document, the declared namespace labels, and a distinct output path under
//! `build/`.

use crate::artifact::Artifact;
use crate::error::{Error, Result};
use crate::mappings::MappingSet;
use crate::process::ToolCommand;
use crate::tools::ToolSet;
use crate::workspace::Workspace;
use std::fs;
use tracing::info;

/// Run every remap pass of the active strategy, returning the final artifact
pub fn run_passes(
    tools: &ToolSet,
    workspace: &Workspace,
    input: Artifact,
    sets: &[MappingSet],
) -> Result<Artifact> {
    fs::create_dir_all(workspace.build_dir())?;

    let mut current = input;
    for set in sets {
        if set.from != current.namespace() {
            return Err(Error::Remap(format!(
                "mapping set declares from-namespace '{}' but artifact is in '{}'",
                set.from,
                current.namespace()
            )));
        }

        let output_path = workspace.mapped_artifact(set.to);
        info!(
            "Remapping {} ({} -> {})",
            current.path().display(),
            set.from,
            set.to
        );

        let output = ToolCommand::new("remapper", &tools.java)
            .arg("-jar")
            .arg(&tools.remapper)
            .arg(current.path())
            .arg(&output_path)
            .arg(&set.path)
            .arg(set.from.as_str())
            .arg(set.to.as_str())
            .run()?;

        if !output.success() {
            return Err(Error::Remap(format!(
                "remapper exited with {} on pass {} -> {}: {}",
                output.code(),
                set.from,
                set.to,
                output.last_stderr_line()
            )));
        }

        if !output_path.is_file() {
            return Err(Error::Remap(format!(
                "remapper reported success but produced no output at {}",
                output_path.display()
            )));
        }

        current = Artifact::new(output_path, set.to);
    }

    info!(
        "Remapping complete, artifact is in the '{}' namespace",
        current.namespace()
    );
    Ok(current)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::artifact::Namespace;
    use crate::mappings::MappingFormat;
    use std::path::PathBuf;

    #[test]
    fn test_namespace_mismatch_is_rejected_before_invocation() {
        let dir = tempfile::tempdir().unwrap();
        let workspace = Workspace::new(dir.path());
        let tools = ToolSet {
            java: PathBuf::from("/usr/bin/java"),
            remapper: PathBuf::from("/tools/remapper.jar"),
            decompiler: PathBuf::from("/tools/decompiler.jar"),
        };

        let input = Artifact::new(dir.path().join("in.jar"), Namespace::Official);
        let sets = [MappingSet::new(
            dir.path().join("named.tiny"),
            Namespace::Intermediary,
            Namespace::Named,
            MappingFormat::Tiny,
        )];

        let err = run_passes(&tools, &workspace, input, &sets).unwrap_err();
        match err {
            Error::Remap(msg) => {
                assert!(msg.contains("intermediary"));
                assert!(msg.contains("official"));
            }
            other => panic!("expected Remap, got {other:?}"),
        }
    }

    #[test]
    fn test_empty_chain_returns_input_unchanged() {
        let dir = tempfile::tempdir().unwrap();
        let workspace = Workspace::new(dir.path());
        let tools = ToolSet {
            java: PathBuf::from("/usr/bin/java"),
            remapper: PathBuf::from("/tools/remapper.jar"),
            decompiler: PathBuf::from("/tools/decompiler.jar"),
        };

        let input = Artifact::new(dir.path().join("in.jar"), Namespace::Official);
        let result = run_passes(&tools, &workspace, input, &[]).unwrap();
        assert_eq!(result.namespace(), Namespace::Official);
    }
}
