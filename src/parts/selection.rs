use std::path::{Path, PathBuf};

use sha2::Digest as _;

/// Files chosen for one avatar plus the indices that produced them.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Selection {
    root: PathBuf,
    files: Vec<PathBuf>,
    indices: Vec<usize>,
    variant: Option<usize>,
}

impl Selection {
    pub(crate) fn new(root: impl Into<PathBuf>, files: Vec<PathBuf>, indices: Vec<usize>) -> Self {
        Self {
            root: root.into(),
            files,
            indices,
            variant: None,
        }
    }

    pub(crate) fn with_variant(mut self, variant: usize) -> Self {
        self.variant = Some(variant);
        self
    }

    /// Directory of the part set that made the pick. Ordering keys are read below it.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Chosen files, one per choice group, in group order.
    pub fn files(&self) -> &[PathBuf] {
        &self.files
    }

    /// Consume the selection, keeping only the files.
    pub fn into_files(self) -> Vec<PathBuf> {
        self.files
    }

    /// Candidate index chosen in each group.
    pub fn indices(&self) -> &[usize] {
        &self.indices
    }

    /// Color variant index, for color-variant sets.
    pub fn variant(&self) -> Option<usize> {
        self.variant
    }

    /// Comma-joined chosen indices, prefixed with the variant index when there is one.
    pub fn tag_key(&self) -> String {
        self.variant
            .iter()
            .chain(self.indices.iter())
            .map(|i| i.to_string())
            .collect::<Vec<_>>()
            .join(",")
    }

    /// Hex SHA-256 of `"<set>:<tag_key>"`, usable as a response cache key.
    pub fn fingerprint(&self, set_name: &str) -> String {
        let digest = sha2::Sha256::digest(format!("{set_name}:{}", self.tag_key()).as_bytes());
        let mut out = String::with_capacity(digest.len() * 2);
        for b in digest {
            out.push_str(&format!("{:02x}", b));
        }
        out
    }
}

#[cfg(test)]
#[path = "../../tests/unit/parts/selection.rs"]
mod tests;
