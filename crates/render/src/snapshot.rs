//! PNG output of a rendered pattern.
//!
//! This module is feature-gated behind `png` (default on) so that consumers
//! that only need the pixel buffer don't pull in the `image` crate.

use log::info;
use lowpoly_core::{PatternError, Triangle};
use std::path::Path;

use crate::pixel::rasterize;
use crate::RenderStyle;

/// Rasterizes `triangles` and writes them as a PNG image.
///
/// Returns `PatternError::InvalidDimensions` if either side is zero, or
/// `PatternError::Io` on write failure.
pub fn write_png(
    triangles: &[Triangle],
    width: u32,
    height: u32,
    style: &RenderStyle,
    path: &Path,
) -> Result<(), PatternError> {
    if width == 0 || height == 0 {
        return Err(PatternError::InvalidDimensions {
            width: f64::from(width),
            height: f64::from(height),
        });
    }
    let rgba = rasterize(triangles, width, height, style);
    let img = image::RgbaImage::from_raw(width, height, rgba)
        .ok_or_else(|| PatternError::Io("RGBA buffer size mismatch".into()))?;
    img.save(path).map_err(|e| PatternError::Io(e.to_string()))?;
    info!("wrote {width}x{height} png to {}", path.display());
    Ok(())
}
