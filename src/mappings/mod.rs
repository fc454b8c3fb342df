// src/mappings/mod.rs

//! Mapping data: formats, sets, and the provider strategy
//!
//! A [`MappingSet`] is one mapping document plus the namespace pair it
//! rewrites between. The two providers differ only in how many sets they
//! produce and where the documents come from: both resolve to an ordered
//! list, so the remap loop is identical for either strategy and carries no
//! branch of its own.

pub mod chained;
pub mod direct;
pub mod normalize;

use crate::artifact::{Namespace, Side};
use crate::client::HttpClient;
use crate::error::Result;
use crate::manifest::VersionMetadata;
use crate::workspace::Workspace;
use std::fmt;
use std::path::PathBuf;

/// Encoding of a mapping document
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MappingFormat {
    /// Flat renaming table, one source/target pair per line
    Proguard,
    /// Multi-namespace tabular format with a declared header
    Tiny,
}

/// One mapping document with its declared namespace pair
#[derive(Debug, Clone)]
pub struct MappingSet {
    pub path: PathBuf,
    pub from: Namespace,
    pub to: Namespace,
    pub format: MappingFormat,
}

impl MappingSet {
    pub fn new(
        path: impl Into<PathBuf>,
        from: Namespace,
        to: Namespace,
        format: MappingFormat,
    ) -> Self {
        Self {
            path: path.into(),
            from,
            to,
            format,
        }
    }
}

/// Mapping provider selection, fixed for the lifetime of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MappingStrategy {
    /// One flat renaming table straight from the version metadata
    Direct,
    /// Intermediary tiny mappings, then an optional human-named layer
    Chained,
}

impl MappingStrategy {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Direct => "direct",
            Self::Chained => "chained",
        }
    }

    /// Obtain the ordered mapping sets for this run
    ///
    /// Direct always yields one set (official → named); Chained yields one
    /// or two (official → intermediary, then intermediary → named when the
    /// named layer exists for this version).
    pub fn resolve(
        &self,
        client: &HttpClient,
        workspace: &Workspace,
        metadata: &VersionMetadata,
        side: Side,
        version: &str,
    ) -> Result<Vec<MappingSet>> {
        match self {
            Self::Direct => direct::resolve(client, workspace, metadata, side).map(|set| vec![set]),
            Self::Chained => chained::resolve(client, workspace, version),
        }
    }
}

impl fmt::Display for MappingStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strategy_labels() {
        assert_eq!(MappingStrategy::Direct.as_str(), "direct");
        assert_eq!(MappingStrategy::Chained.as_str(), "chained");
    }

    #[test]
    fn test_mapping_set_carries_namespace_pair() {
        let set = MappingSet::new(
            "/w/intermediary.tiny",
            Namespace::Official,
            Namespace::Intermediary,
            MappingFormat::Tiny,
        );
        assert_eq!(set.from, Namespace::Official);
        assert_eq!(set.to, Namespace::Intermediary);
        assert_eq!(set.format, MappingFormat::Tiny);
    }
}
