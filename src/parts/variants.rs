use std::path::Path;

use anyhow::Context;

use crate::{
    foundation::error::{RobohashError, RobohashResult},
    parts::selection::Selection,
    parts::set::PartSet,
    prng::stream::RandomStream,
};

/// A selector over several [`PartSet`]s, one per color variant.
///
/// Variants are not weighted by their own entropy: every color is equally likely, whatever number
/// of appearances it offers.
#[derive(Clone, Debug)]
pub struct ColorVariantPartSet {
    name: String,
    variants: Vec<PartSet>,
}

impl ColorVariantPartSet {
    /// Build from at least two variants, kept in the given order.
    pub fn new(name: impl Into<String>, variants: Vec<PartSet>) -> RobohashResult<Self> {
        let name = name.into();
        if variants.len() < 2 {
            return Err(RobohashError::InsufficientVariants {
                set: name,
                found: variants.len(),
            });
        }
        Ok(Self { name, variants })
    }

    /// Open every subdirectory of `sets_dir/name` (sorted by name) as a variant.
    pub fn open(sets_dir: &Path, name: &str) -> RobohashResult<Self> {
        let colors_dir = sets_dir.join(name);
        let rd = std::fs::read_dir(&colors_dir)
            .with_context(|| format!("read color directory '{}'", colors_dir.display()))?;

        let mut colors = Vec::new();
        for entry in rd {
            let entry = entry.with_context(|| {
                format!("read color directory entry in '{}'", colors_dir.display())
            })?;
            if !entry.path().is_dir() {
                continue;
            }
            let Some(color) = entry.file_name().to_str().map(str::to_string) else {
                continue;
            };
            colors.push(color);
        }
        colors.sort();

        let variants = colors
            .iter()
            .map(|color| PartSet::open(sets_dir, &format!("{name}/{color}")))
            .collect::<RobohashResult<Vec<_>>>()?;
        Self::new(name, variants)
    }

    /// Set name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Variants in selection order.
    pub fn variants(&self) -> &[PartSet] {
        &self.variants
    }

    /// Draw one value to pick the variant, then let it draw from the same stream.
    pub fn pick(&self, stream: &mut RandomStream) -> Selection {
        let idx = (stream.next_u64() % self.variants.len() as u64) as usize;
        self.variants[idx].pick(stream).with_variant(idx)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/parts/variants.rs"]
mod tests;
