use std::{
    collections::HashMap,
    path::{Path, PathBuf},
    sync::{Arc, PoisonError, RwLock},
};

use crate::{
    compose::blend::premultiply_rgba8_in_place,
    foundation::error::{RobohashError, RobohashResult},
};

#[derive(Clone, Debug, PartialEq, Eq)]
/// Decoded layer in premultiplied RGBA8 form.
pub struct PreparedLayer {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Pixel bytes in row-major premultiplied RGBA8.
    pub rgba8_premul: Vec<u8>,
}

impl PreparedLayer {
    /// `(width, height)`.
    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }
}

/// Read and decode a layer file into premultiplied RGBA8.
pub fn decode_layer(path: &Path) -> RobohashResult<PreparedLayer> {
    let dyn_img = image::open(path).map_err(|source| RobohashError::AssetLoad {
        path: path.to_path_buf(),
        source,
    })?;
    let rgba = dyn_img.to_rgba8();
    let (width, height) = rgba.dimensions();

    let mut rgba8_premul = rgba.into_raw();
    premultiply_rgba8_in_place(&mut rgba8_premul);

    Ok(PreparedLayer {
        width,
        height,
        rgba8_premul,
    })
}

#[derive(Debug, Default)]
struct CacheState {
    layers: HashMap<PathBuf, Arc<PreparedLayer>>,
    decodes: HashMap<PathBuf, u32>,
}

/// Decoded layers keyed by file path, shared by concurrent builds.
///
/// Entries are insert-only: once a layer is handed out it is never replaced or mutated.
#[derive(Debug, Default)]
pub struct LayerCache {
    state: RwLock<CacheState>,
}

impl LayerCache {
    /// Empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the cached layer for `path`, decoding it on first use.
    pub fn get_or_load(&self, path: &Path) -> RobohashResult<Arc<PreparedLayer>> {
        {
            let state = self.state.read().unwrap_or_else(PoisonError::into_inner);
            if let Some(layer) = state.layers.get(path) {
                return Ok(Arc::clone(layer));
            }
        }

        let decoded = decode_layer(path)?;
        tracing::debug!(
            path = %path.display(),
            width = decoded.width,
            height = decoded.height,
            "decoded layer"
        );

        let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
        *state.decodes.entry(path.to_path_buf()).or_insert(0) += 1;
        let layer = state
            .layers
            .entry(path.to_path_buf())
            .or_insert_with(|| Arc::new(decoded));
        Ok(Arc::clone(layer))
    }

    /// How many times `path` has been decoded by this cache.
    pub fn decode_count(&self, path: &Path) -> u32 {
        let state = self.state.read().unwrap_or_else(PoisonError::into_inner);
        state.decodes.get(path).copied().unwrap_or(0)
    }

    /// Number of cached layers.
    pub fn len(&self) -> usize {
        let state = self.state.read().unwrap_or_else(PoisonError::into_inner);
        state.layers.len()
    }

    /// Whether nothing has been cached yet.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
#[path = "../../tests/unit/compose/layers.rs"]
mod tests;
