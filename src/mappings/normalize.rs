// src/mappings/normalize.rs

//! Mapping header normalization
//!
//! Tabular mapping documents open with a header line declaring the format
//! version and the namespace labels. Providers are not reliable about it: a
//! document may lack the header entirely, or declare a left-hand namespace
//! other than the one the artifact is actually in. Rather than trusting the
//! source, the normalizer writes a copy whose declared pair always matches
//! the remap pass about to consume it: an empty document becomes just the
//! synthesized header; a non-empty one keeps its first line as an opaque
//! schema marker and gets the synthesized header inserted right after it.

use crate::error::Result;
use crate::mappings::{MappingFormat, MappingSet};
use std::fs;
use std::path::Path;
use tracing::debug;

/// Synthesized header line for a namespace pair
fn header_line(set: &MappingSet) -> String {
    format!("v1\t{}\t{}", set.from, set.to)
}

/// Write a normalized copy of a mapping document
///
/// Returns a new [`MappingSet`] pointing at the copy, with the same
/// namespace pair and format. The original document is never modified.
pub fn normalize(set: &MappingSet, dest: &Path) -> Result<MappingSet> {
    let content = fs::read_to_string(&set.path)?;
    let header = header_line(set);

    let normalized = if content.is_empty() {
        format!("{header}\n")
    } else if let Some(split) = content.find('\n') {
        let (first, rest) = content.split_at(split);
        format!("{first}\n{header}{rest}")
    } else {
        format!("{content}\n{header}\n")
    };

    fs::write(dest, normalized)?;
    debug!(
        "Normalized {} -> {} ({} -> {})",
        set.path.display(),
        dest.display(),
        set.from,
        set.to
    );

    Ok(MappingSet::new(dest, set.from, set.to, set.format))
}

/// Normalize a set when its format carries a namespace header
///
/// Flat renaming tables have no header to repair and pass through untouched.
pub fn normalize_if_needed(set: MappingSet) -> Result<MappingSet> {
    match set.format {
        MappingFormat::Proguard => Ok(set),
        MappingFormat::Tiny => {
            let dest = set.path.with_extension("normalized.tiny");
            normalize(&set, &dest)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::artifact::Namespace;

    fn tiny_set(path: &Path) -> MappingSet {
        MappingSet::new(
            path,
            Namespace::Official,
            Namespace::Intermediary,
            MappingFormat::Tiny,
        )
    }

    #[test]
    fn test_empty_document_becomes_single_header_line() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("empty.tiny");
        let dest = dir.path().join("empty.normalized.tiny");
        fs::write(&source, "").unwrap();

        normalize(&tiny_set(&source), &dest).unwrap();

        let output = fs::read_to_string(&dest).unwrap();
        assert_eq!(output, "v1\tofficial\tintermediary\n");
        assert_eq!(output.lines().count(), 1);
    }

    #[test]
    fn test_header_inserted_as_second_line() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("doc.tiny");
        let dest = dir.path().join("doc.normalized.tiny");
        fs::write(
            &source,
            "tiny\t2\t0\tofficial\tnamed\nCLASS\ta\tFoo\nMETHOD\tb\tbar\n",
        )
        .unwrap();

        normalize(&tiny_set(&source), &dest).unwrap();

        let output = fs::read_to_string(&dest).unwrap();
        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(
            lines,
            vec![
                "tiny\t2\t0\tofficial\tnamed",
                "v1\tofficial\tintermediary",
                "CLASS\ta\tFoo",
                "METHOD\tb\tbar",
            ]
        );
    }

    #[test]
    fn test_single_line_without_trailing_newline() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("doc.tiny");
        let dest = dir.path().join("doc.normalized.tiny");
        fs::write(&source, "schema-marker").unwrap();

        normalize(&tiny_set(&source), &dest).unwrap();

        let output = fs::read_to_string(&dest).unwrap();
        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines, vec!["schema-marker", "v1\tofficial\tintermediary"]);
    }

    #[test]
    fn test_remaining_lines_preserved_in_order() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("doc.tiny");
        let dest = dir.path().join("doc.normalized.tiny");
        let body: Vec<String> = (0..50).map(|i| format!("CLASS\tc{i}\tClass{i}")).collect();
        fs::write(&source, format!("marker\n{}\n", body.join("\n"))).unwrap();

        normalize(&tiny_set(&source), &dest).unwrap();

        let output = fs::read_to_string(&dest).unwrap();
        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines.len(), 52);
        assert_eq!(lines[0], "marker");
        assert_eq!(lines[1], "v1\tofficial\tintermediary");
        for (i, line) in lines[2..].iter().enumerate() {
            assert_eq!(*line, body[i]);
        }
    }

    #[test]
    fn test_proguard_sets_pass_through_untouched() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("mappings.txt");
        fs::write(&source, "com.a.B -> a:\n").unwrap();

        let set = MappingSet::new(
            &source,
            Namespace::Official,
            Namespace::Named,
            MappingFormat::Proguard,
        );
        let result = normalize_if_needed(set).unwrap();

        assert_eq!(result.path, source);
        assert_eq!(fs::read_to_string(&source).unwrap(), "com.a.B -> a:\n");
    }

    #[test]
    fn test_original_document_never_modified() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("doc.tiny");
        let dest = dir.path().join("doc.normalized.tiny");
        fs::write(&source, "marker\nCLASS\ta\tFoo\n").unwrap();

        normalize(&tiny_set(&source), &dest).unwrap();

        assert_eq!(
            fs::read_to_string(&source).unwrap(),
            "marker\nCLASS\ta\tFoo\n"
        );
    }
}
