use std::path::{Path, PathBuf};

use anyhow::Context;

use crate::foundation::error::{RobohashError, RobohashResult};

/// A named pool of interchangeable candidate images for one layer slot.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChoiceGroup {
    name: String,
    dir: PathBuf,
    candidates: Vec<String>,
}

impl ChoiceGroup {
    /// Build a group from candidate file names living in `dir`.
    ///
    /// Candidates are sorted and de-duplicated so the index a stream value maps to never depends
    /// on directory iteration order.
    pub fn new(
        name: impl Into<String>,
        dir: impl Into<PathBuf>,
        mut candidates: Vec<String>,
    ) -> RobohashResult<Self> {
        let name = name.into();
        candidates.sort();
        candidates.dedup();
        if candidates.is_empty() {
            return Err(RobohashError::validation(format!(
                "choice group '{name}' has no candidates"
            )));
        }
        Ok(Self {
            name,
            dir: dir.into(),
            candidates,
        })
    }

    /// Group name: its directory path relative to the owning set, `/`-separated.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Directory holding the candidate files.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Sorted candidate file names.
    pub fn candidates(&self) -> &[String] {
        &self.candidates
    }

    /// Number of candidates (always at least one).
    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    /// Always `false`; empty groups are rejected at construction.
    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }

    /// Map one stream value to a candidate: `value mod len`.
    pub fn choose(&self, value: u64) -> (usize, PathBuf) {
        let idx = (value % self.candidates.len() as u64) as usize;
        (idx, self.dir.join(&self.candidates[idx]))
    }
}

/// Walk `set_dir` and return one group per directory that directly contains `.png` files.
pub(crate) fn scan_groups(set_dir: &Path) -> RobohashResult<Vec<ChoiceGroup>> {
    let mut out = Vec::new();
    visit(set_dir, set_dir, &mut out)?;
    Ok(out)
}

fn visit(root: &Path, dir: &Path, out: &mut Vec<ChoiceGroup>) -> RobohashResult<()> {
    let rd = std::fs::read_dir(dir)
        .with_context(|| format!("read part directory '{}'", dir.display()))?;

    let mut images = Vec::new();
    let mut subdirs = Vec::new();
    for entry in rd {
        let entry =
            entry.with_context(|| format!("read part directory entry in '{}'", dir.display()))?;
        let path = entry.path();
        if path.is_dir() {
            subdirs.push(path);
            continue;
        }
        if !is_png(&path) {
            continue;
        }
        let Some(file_name) = path.file_name().and_then(|s| s.to_str()) else {
            continue;
        };
        images.push(file_name.to_string());
    }

    if !images.is_empty() {
        out.push(ChoiceGroup::new(group_name(root, dir), dir, images)?);
    }

    subdirs.sort();
    for sub in subdirs {
        visit(root, &sub, out)?;
    }
    Ok(())
}

fn is_png(path: &Path) -> bool {
    path.extension()
        .and_then(|s| s.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("png"))
}

fn group_name(root: &Path, dir: &Path) -> String {
    let rel = dir.strip_prefix(root).unwrap_or(dir);
    let parts: Vec<String> = rel
        .components()
        .map(|c| c.as_os_str().to_string_lossy().into_owned())
        .collect();
    if parts.is_empty() {
        ".".to_string()
    } else {
        parts.join("/")
    }
}

#[cfg(test)]
#[path = "../../tests/unit/parts/group.rs"]
mod tests;
