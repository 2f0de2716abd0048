use std::path::{Path, PathBuf};

use crate::{
    foundation::error::{RobohashError, RobohashResult},
    foundation::math::entropy_bits,
    parts::group::{ChoiceGroup, scan_groups},
    parts::selection::Selection,
    prng::stream::RandomStream,
};

/// Minimum combined entropy a part set must offer.
pub const MIN_ENTROPY_BITS: f64 = 12.0;

/// One full appearance template: an ordered list of choice groups.
#[derive(Clone, Debug)]
pub struct PartSet {
    name: String,
    root: PathBuf,
    groups: Vec<ChoiceGroup>,
    entropy_bits: f64,
}

impl PartSet {
    /// Build a set from groups, ordering them by name.
    ///
    /// Fails with [`RobohashError::InsufficientEntropy`] when the groups offer fewer than
    /// [`MIN_ENTROPY_BITS`] bits of combined variety.
    pub fn new(
        name: impl Into<String>,
        root: impl Into<PathBuf>,
        mut groups: Vec<ChoiceGroup>,
    ) -> RobohashResult<Self> {
        let name = name.into();
        groups.sort_by(|a, b| a.name().cmp(b.name()));
        let bits = entropy_bits(groups.iter().map(ChoiceGroup::len));
        if bits < MIN_ENTROPY_BITS {
            return Err(RobohashError::InsufficientEntropy { set: name, bits });
        }
        Ok(Self {
            name,
            root: root.into(),
            groups,
            entropy_bits: bits,
        })
    }

    /// Scan `sets_dir/name` for choice groups and build the set.
    pub fn open(sets_dir: &Path, name: &str) -> RobohashResult<Self> {
        let root = sets_dir.join(name);
        let groups = scan_groups(&root)?;
        let set = Self::new(name, root, groups)?;
        tracing::debug!(
            set = %set.name,
            groups = set.groups.len(),
            bits = set.entropy_bits,
            "loaded part set"
        );
        Ok(set)
    }

    /// Set name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Set directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Choice groups in pick order.
    pub fn groups(&self) -> &[ChoiceGroup] {
        &self.groups
    }

    /// Combined entropy (sum of `log2` candidate counts).
    pub fn entropy_bits(&self) -> f64 {
        self.entropy_bits
    }

    /// Draw one stream value per group and select the matching candidates.
    pub fn pick(&self, stream: &mut RandomStream) -> Selection {
        let mut files = Vec::with_capacity(self.groups.len());
        let mut indices = Vec::with_capacity(self.groups.len());
        for group in &self.groups {
            let (idx, file) = group.choose(stream.next_u64());
            files.push(file);
            indices.push(idx);
        }
        Selection::new(&self.root, files, indices)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/parts/set.rs"]
mod tests;
