//! Pure-computation RGBA rasterization of a triangle list.
//!
//! Coverage is sampled at pixel centers. A center lying exactly on an edge
//! shared by two triangles is owned by only one of them (the edge whose
//! direction points down, or left when horizontal), so a mesh without
//! displacement paints every pixel exactly once.

use log::debug;
use lowpoly_core::{GridPoint, Srgb, Triangle};

use crate::RenderStyle;

/// Paints `triangles` in order onto a `width` x `height` RGBA8 buffer.
///
/// The buffer starts as `style.background`. Each triangle is filled with its
/// color and, when `style.stroke_opacity > 0`, immediately outlined in black
/// at that opacity, so later triangles paint over earlier strokes. Pixels
/// outside the buffer are clipped. Alpha is always 255.
pub fn rasterize(triangles: &[Triangle], width: u32, height: u32, style: &RenderStyle) -> Vec<u8> {
    let mut canvas = Canvas::new(width as usize, height as usize, style.background);
    for triangle in triangles {
        canvas.fill(triangle);
        if style.stroke_opacity > 0.0 {
            canvas.stroke(triangle, style.stroke_opacity);
        }
    }
    debug!(
        "rasterized {} triangles onto {width}x{height}",
        triangles.len()
    );
    canvas.into_rgba()
}

/// Row-major pixel grid.
struct Canvas {
    width: usize,
    height: usize,
    pixels: Vec<Srgb>,
}

impl Canvas {
    fn new(width: usize, height: usize, background: Srgb) -> Self {
        Self {
            width,
            height,
            pixels: vec![background; width * height],
        }
    }

    fn fill(&mut self, triangle: &Triangle) {
        let Some((x0, y0, x1, y1)) = self.bounds(&triangle.points) else {
            return;
        };
        for py in y0..y1 {
            for px in x0..x1 {
                let center = GridPoint::new(px as f64 + 0.5, py as f64 + 0.5);
                if covers(triangle, center) {
                    self.pixels[py * self.width + px] = triangle.color;
                }
            }
        }
    }

    fn stroke(&mut self, triangle: &Triangle, opacity: f64) {
        let [a, b, c] = triangle.points;
        for (from, to) in [(a, b), (b, c), (c, a)] {
            self.line(from, to, opacity);
        }
    }

    /// Walks the segment in unit steps, blending black into each pixel it
    /// crosses once.
    fn line(&mut self, from: GridPoint, to: GridPoint, opacity: f64) {
        let dx = to.x - from.x;
        let dy = to.y - from.y;
        let steps = dx.abs().max(dy.abs()).ceil().max(1.0) as usize;
        let mut last = None;
        for k in 0..=steps {
            let t = k as f64 / steps as f64;
            let Some(idx) = self.index_of(from.x + dx * t, from.y + dy * t) else {
                continue;
            };
            if last == Some(idx) {
                continue;
            }
            last = Some(idx);
            self.pixels[idx] = self.pixels[idx].blend(Srgb::BLACK, opacity);
        }
    }

    /// Pixel index for a canvas-space point. Points on the far edge map to
    /// the last row or column.
    fn index_of(&self, x: f64, y: f64) -> Option<usize> {
        if !(x >= 0.0 && y >= 0.0) || self.width == 0 || self.height == 0 {
            return None;
        }
        let px = (x.floor() as usize).min(self.width - 1);
        let py = (y.floor() as usize).min(self.height - 1);
        if x > self.width as f64 || y > self.height as f64 {
            return None;
        }
        Some(py * self.width + px)
    }

    /// Half-open pixel range `[x0, x1) x [y0, y1)` whose centers may fall
    /// inside the points' bounding box, clipped to the canvas.
    fn bounds(&self, points: &[GridPoint; 3]) -> Option<(usize, usize, usize, usize)> {
        let min_x = points.iter().map(|p| p.x).fold(f64::INFINITY, f64::min);
        let max_x = points.iter().map(|p| p.x).fold(f64::NEG_INFINITY, f64::max);
        let min_y = points.iter().map(|p| p.y).fold(f64::INFINITY, f64::min);
        let max_y = points.iter().map(|p| p.y).fold(f64::NEG_INFINITY, f64::max);
        if !(min_x.is_finite() && max_x.is_finite() && min_y.is_finite() && max_y.is_finite()) {
            return None;
        }
        // `as usize` saturates negatives to 0.
        let x0 = (min_x - 0.5).floor().max(0.0) as usize;
        let y0 = (min_y - 0.5).floor().max(0.0) as usize;
        let x1 = ((max_x + 0.5).ceil().max(0.0) as usize).min(self.width);
        let y1 = ((max_y + 0.5).ceil().max(0.0) as usize).min(self.height);
        (x0 < x1 && y0 < y1).then_some((x0, y0, x1, y1))
    }

    fn into_rgba(self) -> Vec<u8> {
        self.pixels.into_iter().flat_map(Srgb::to_rgba8).collect()
    }
}

/// Whether `p` lies inside `triangle`, with the shared-edge tie rule.
///
/// Works for either winding; degenerate (zero-area) triangles cover nothing.
fn covers(triangle: &Triangle, p: GridPoint) -> bool {
    let [a, mut b, mut c] = triangle.points;
    let area = triangle.signed_area();
    if area == 0.0 || area.is_nan() {
        return false;
    }
    if area < 0.0 {
        std::mem::swap(&mut b, &mut c);
    }
    [(a, b), (b, c), (c, a)].into_iter().all(|(from, to)| {
        let e = edge(from, to, p);
        e > 0.0 || (e == 0.0 && owns_edge(from, to))
    })
}

/// Edge function: positive when `p` is on the interior side of `from -> to`
/// for a triangle with positive signed area.
fn edge(from: GridPoint, to: GridPoint, p: GridPoint) -> f64 {
    (to.x - from.x) * (p.y - from.y) - (to.y - from.y) * (p.x - from.x)
}

/// Of the two opposite directions of a shared edge, exactly one returns true.
fn owns_edge(from: GridPoint, to: GridPoint) -> bool {
    let dx = to.x - from.x;
    let dy = to.y - from.y;
    dy > 0.0 || (dy == 0.0 && dx < 0.0)
}
