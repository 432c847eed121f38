#![deny(unsafe_code)]
//! CPU-side consumer of lowpoly patterns.
//!
//! Paints a generated triangle list into an RGBA8 buffer the way a 2D canvas
//! would: clear to a background color, then fill each triangle in order and
//! stroke its edges with a translucent black line. The PNG writer in
//! [`snapshot`] is feature-gated behind `png` (default on); the buffer
//! conversion in [`pixel`] is always available.

pub mod pixel;

#[cfg(feature = "png")]
pub mod snapshot;

use lowpoly_core::Srgb;

/// Default background, painted before any triangle.
pub const DEFAULT_BACKGROUND: Srgb = Srgb::new(0x27, 0x27, 0x2a);
/// Default opacity of the black edge stroke.
pub const DEFAULT_STROKE_OPACITY: f64 = 0.1;

/// Presentation settings that are not part of the generated mesh.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderStyle {
    /// Color every pixel starts with.
    pub background: Srgb,
    /// Opacity of the one-pixel black stroke around each triangle, in [0, 1].
    /// Zero disables stroking.
    pub stroke_opacity: f64,
}

impl Default for RenderStyle {
    fn default() -> Self {
        Self {
            background: DEFAULT_BACKGROUND,
            stroke_opacity: DEFAULT_STROKE_OPACITY,
        }
    }
}

impl RenderStyle {
    /// Style with no stroke, so every pixel is exactly a palette or
    /// background color.
    pub fn flat(background: Srgb) -> Self {
        Self {
            background,
            stroke_opacity: 0.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_style_matches_component_defaults() {
        let style = RenderStyle::default();
        assert_eq!(style.background.to_hex(), "#27272a");
        assert!((style.stroke_opacity - 0.1).abs() < f64::EPSILON);
    }

    #[test]
    fn flat_style_disables_stroke() {
        let style = RenderStyle::flat(Srgb::WHITE);
        assert_eq!(style.background, Srgb::WHITE);
        assert_eq!(style.stroke_opacity, 0.0);
    }
}
