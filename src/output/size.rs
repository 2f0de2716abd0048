use std::io::Cursor;

use anyhow::Context;
use image::{ImageFormat, RgbaImage, imageops::FilterType};

use crate::foundation::error::{RobohashError, RobohashResult};

/// Requested output size in pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct OutputSize {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Default for OutputSize {
    fn default() -> Self {
        Self {
            width: 200,
            height: 200,
        }
    }
}

impl OutputSize {
    /// Parse `"<w>x<h>"` where each side is 2 or 3 decimal digits and non-zero.
    pub fn parse(s: &str) -> Option<Self> {
        let (w, h) = s.split_once('x')?;
        Some(Self {
            width: parse_side(w)?,
            height: parse_side(h)?,
        })
    }

    /// Like [`Self::parse`], falling back to the default size for anything malformed.
    pub fn parse_or_default(s: &str) -> Self {
        Self::parse(s).unwrap_or_default()
    }
}

fn parse_side(s: &str) -> Option<u32> {
    if !(2..=3).contains(&s.len()) || !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    s.parse().ok().filter(|&n| n > 0)
}

impl std::str::FromStr for OutputSize {
    type Err = RobohashError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| {
            RobohashError::validation(format!(
                "size '{s}' must look like 200x200 (2-3 digits per non-zero side)"
            ))
        })
    }
}

impl std::fmt::Display for OutputSize {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// Resample a native-resolution avatar to `size` with a Lanczos3 filter.
pub fn resize_to(img: &RgbaImage, size: OutputSize) -> RgbaImage {
    if img.dimensions() == (size.width, size.height) {
        return img.clone();
    }
    image::imageops::resize(img, size.width, size.height, FilterType::Lanczos3)
}

/// Encode an image as PNG bytes.
pub fn encode_png(img: &RgbaImage) -> RobohashResult<Vec<u8>> {
    let mut buf = Vec::new();
    img.write_to(&mut Cursor::new(&mut buf), ImageFormat::Png)
        .context("encode png")?;
    Ok(buf)
}

#[cfg(test)]
#[path = "../../tests/unit/output/size.rs"]
mod tests;
