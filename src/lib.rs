//! Robohash derives a unique, reproducible avatar image from any identifying input.
//!
//! # Pipeline overview
//!
//! 1. **Stream**: `(input, seed) -> RandomStream`, an HMAC-SHA512 digest chain yielding `u64`s.
//! 2. **Pick**: a registered [`PartSource`] draws one value per choice (color variant first, then
//!    one per choice group) and returns a [`Selection`] of layer files.
//! 3. **Composite**: the [`Compositor`] sorts layers by the `#` ordering key in their paths and
//!    alpha-blends them into one [`image::RgbaImage`] at the set's native size.
//!
//! [`RobohashBuilder::build`] runs all three. Part sets are scanned and validated once at startup
//! ([`RobohashBuilder::from_config`]) and are read-only afterwards, so one builder can serve
//! concurrent requests.
//!
//! Resizing and encoding are left to the caller; [`resize_to`] and [`encode_png`] are provided
//! for the bundled command-line tool.
//!
//! The key design constraints:
//!
//! - **No unsafe**: `unsafe` is forbidden in this crate.
//! - **Deterministic**: identical `(input, seed, set)` triples produce identical pixels.
//! - **Startup validation**: thin sets fail when they are loaded, never per request.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod builder;
mod compose;
mod foundation;
mod output;
mod parts;
mod prng;

#[cfg(test)]
#[path = "../tests/unit/fixtures.rs"]
mod fixtures;

pub use builder::config::{BuilderConfig, SetConfig, SetKind};
pub use builder::registry::RobohashBuilder;
pub use compose::compositor::{Compositor, order_key, stacking_order, stacking_order_in};
pub use compose::layers::{LayerCache, PreparedLayer, decode_layer};
pub use foundation::error::{RobohashError, RobohashResult};
pub use output::size::{OutputSize, encode_png, resize_to};
pub use parts::group::ChoiceGroup;
pub use parts::selection::Selection;
pub use parts::set::{MIN_ENTROPY_BITS, PartSet};
pub use parts::source::PartSource;
pub use parts::variants::ColorVariantPartSet;
pub use prng::stream::{PUBLIC_SEED, RandomStream};
