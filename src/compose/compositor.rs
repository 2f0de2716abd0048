use std::{
    path::{Path, PathBuf},
    sync::Arc,
};

use image::RgbaImage;

use crate::{
    compose::blend::{over_in_place, unpremultiply_rgba8_in_place},
    compose::layers::{LayerCache, PreparedLayer, decode_layer},
    foundation::error::{RobohashError, RobohashResult},
};

/// Drawing-order key embedded in a layer path.
///
/// The key is the text between the first and second `#` of the path, with `/` separators. For
/// `003#01Body/000#blue_body-10.png` the key is `01Body/000`, so group directories named
/// `<n>#<order><part>` stack by `<order>` whatever the file names are.
pub fn order_key(path: &Path) -> Option<String> {
    let text = path
        .components()
        .map(|c| c.as_os_str().to_string_lossy().into_owned())
        .collect::<Vec<_>>()
        .join("/");
    let (_, tail) = text.split_once('#')?;
    let key = tail.split('#').next().unwrap_or(tail);
    Some(key.to_string())
}

/// Sort layer paths into stacking order (background first), reading keys from the full path.
pub fn stacking_order(files: &[PathBuf]) -> RobohashResult<Vec<PathBuf>> {
    stacking_order_in(Path::new(""), files)
}

/// Sort layer paths into stacking order, reading each key from the path relative to `root`.
///
/// Keying relative to the set directory keeps a `#` in the directories above it from shifting
/// the key. Ties on the key fall back to the full path, so the result never depends on input
/// order.
pub fn stacking_order_in(root: &Path, files: &[PathBuf]) -> RobohashResult<Vec<PathBuf>> {
    let mut keyed = files
        .iter()
        .map(|path| {
            let rel = path.strip_prefix(root).unwrap_or(path);
            order_key(rel)
                .map(|key| (key, path.clone()))
                .ok_or_else(|| RobohashError::MissingOrderKey { path: path.clone() })
        })
        .collect::<RobohashResult<Vec<_>>>()?;
    keyed.sort();
    Ok(keyed.into_iter().map(|(_, path)| path).collect())
}

/// Flattens selected layer files into one image at their native size.
#[derive(Debug, Default)]
pub struct Compositor {
    cache: Option<LayerCache>,
}

impl Compositor {
    /// Compositor that decodes every layer on every call.
    pub fn new() -> Self {
        Self { cache: None }
    }

    /// Compositor that memoizes decoded layers by path.
    pub fn with_cache() -> Self {
        Self {
            cache: Some(LayerCache::new()),
        }
    }

    /// Layer cache, when enabled.
    pub fn cache(&self) -> Option<&LayerCache> {
        self.cache.as_ref()
    }

    /// Alpha-composite `files` in stacking order onto the lowest layer.
    ///
    /// Every layer must share the base layer's size; the output always has that size.
    pub fn compose(&self, files: &[PathBuf]) -> RobohashResult<RgbaImage> {
        self.compose_in(Path::new(""), files)
    }

    /// Like [`Self::compose`], with ordering keys read relative to the set directory `root`.
    pub fn compose_in(&self, root: &Path, files: &[PathBuf]) -> RobohashResult<RgbaImage> {
        let ordered = stacking_order_in(root, files)?;
        let Some((base_path, rest)) = ordered.split_first() else {
            return Err(RobohashError::validation("no layers to composite"));
        };

        let base = self.load(base_path)?;
        let (width, height) = base.size();
        let mut canvas = base.rgba8_premul.clone();

        for path in rest {
            let layer = self.load(path)?;
            if layer.size() != (width, height) {
                return Err(RobohashError::LayerDimensions {
                    path: path.clone(),
                    expected: (width, height),
                    found: layer.size(),
                });
            }
            over_in_place(&mut canvas, &layer.rgba8_premul)?;
        }

        unpremultiply_rgba8_in_place(&mut canvas);
        RgbaImage::from_raw(width, height, canvas)
            .ok_or_else(|| RobohashError::validation("canvas buffer does not match its size"))
    }

    fn load(&self, path: &Path) -> RobohashResult<Arc<PreparedLayer>> {
        match &self.cache {
            Some(cache) => cache.get_or_load(path),
            None => decode_layer(path).map(Arc::new),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/compose/compositor.rs"]
mod tests;
