//! Displaced-grid triangle pattern generator.
//!
//! The canvas is cut into a `grid_size` x `grid_size` grid of cells. Interior
//! lattice points are jittered by a fraction of the cell size, boundary points
//! stay pinned to the canvas edge, and every cell is split into two triangles
//! along a randomly chosen diagonal. The result tiles the canvas exactly.
//!
//! Draw order is part of the output contract. Values are consumed from the
//! [`RandomSource`] in exactly this sequence:
//!
//! 1. lattice points, `i` (column) outer and `j` (row) inner; each strictly
//!    interior point draws `x` then `y`, boundary points draw nothing;
//! 2. cells, `i` outer and `j` inner; each cell draws its diagonal, then one
//!    color per emitted triangle.
//!
//! Reordering any of these changes every seeded pattern.

use log::{debug, trace};
use serde::{Deserialize, Serialize};

use crate::color::Srgb;
use crate::config::{validate_dimensions, validate_displacement, GenerationParameters};
use crate::error::PatternError;
use crate::palette::Palette;
use crate::prng::{random_source, RandomSource};

/// A lattice point in canvas pixel space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GridPoint {
    pub x: f64,
    pub y: f64,
}

impl GridPoint {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// One filled triangle of the pattern.
///
/// `points` is the fill path in order; `color` is the palette entry chosen
/// for it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Triangle {
    pub points: [GridPoint; 3],
    pub color: Srgb,
}

impl Triangle {
    /// Signed area via the shoelace formula. Positive when the points run
    /// clockwise on screen (y pointing down).
    pub fn signed_area(&self) -> f64 {
        let [a, b, c] = self.points;
        ((b.x - a.x) * (c.y - a.y) - (c.x - a.x) * (b.y - a.y)) / 2.0
    }

    /// Unsigned area.
    pub fn area(&self) -> f64 {
        self.signed_area().abs()
    }
}

/// Which diagonal splits a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Diagonal {
    /// Emits `(tl, tr, br)` then `(tl, br, bl)`.
    TopLeftToBottomRight,
    /// Emits `(tl, tr, bl)` then `(tr, br, bl)`.
    TopRightToBottomLeft,
}

impl Diagonal {
    /// Maps a draw in [0, 1) to a diagonal: strictly above one half picks
    /// top-left to bottom-right.
    pub fn from_draw(d: f64) -> Self {
        if d > 0.5 {
            Diagonal::TopLeftToBottomRight
        } else {
            Diagonal::TopRightToBottomLeft
        }
    }

    /// The two fill paths for a cell with the given corners, in emission order.
    pub fn split(
        self,
        top_left: GridPoint,
        top_right: GridPoint,
        bottom_left: GridPoint,
        bottom_right: GridPoint,
    ) -> [[GridPoint; 3]; 2] {
        match self {
            Diagonal::TopLeftToBottomRight => [
                [top_left, top_right, bottom_right],
                [top_left, bottom_right, bottom_left],
            ],
            Diagonal::TopRightToBottomLeft => [
                [top_left, top_right, bottom_left],
                [top_right, bottom_right, bottom_left],
            ],
        }
    }
}

/// Number of cells per axis for an advisory triangle target.
///
/// `ceil(sqrt(count / 2))`, never less than 1: a target of 0 or 1 still
/// produces one cell and two triangles.
pub fn grid_size(count: usize) -> usize {
    let cells = (count as f64 / 2.0).sqrt().ceil() as usize;
    cells.max(1)
}

/// Number of triangles actually emitted for a target: `2 * grid_size²`.
pub fn triangle_count(count: usize) -> usize {
    let g = grid_size(count);
    2 * g * g
}

/// Largest accepted grid: 4096 cells per axis, about 33.5 million triangles.
pub const MAX_GRID_SIZE: usize = 4096;

/// [`grid_size`], rejecting targets whose grid exceeds [`MAX_GRID_SIZE`].
pub fn checked_grid_size(count: usize) -> Result<usize, PatternError> {
    let g = grid_size(count);
    if g > MAX_GRID_SIZE {
        return Err(PatternError::CountTooLarge(count));
    }
    Ok(g)
}

/// The `(grid_size + 1)²` jittered lattice, stored column-major so that
/// `points[i * (grid_size + 1) + j]` is column `i`, row `j`.
#[derive(Debug, Clone, PartialEq)]
pub struct Lattice {
    grid_size: usize,
    points: Vec<GridPoint>,
}

impl Lattice {
    /// Builds the lattice, consuming two draws per strictly interior point.
    ///
    /// Boundary coordinates are assigned after displacement, so the pinned
    /// edge always wins.
    pub fn build(
        width: f64,
        height: f64,
        grid_size: usize,
        displacement: f64,
        random: &mut dyn RandomSource,
    ) -> Self {
        let cell_width = width / grid_size as f64;
        let cell_height = height / grid_size as f64;
        let side = grid_size + 1;
        let mut points = Vec::with_capacity(side * side);

        for i in 0..=grid_size {
            for j in 0..=grid_size {
                let mut x = i as f64 * cell_width;
                let mut y = j as f64 * cell_height;

                if i > 0 && i < grid_size && j > 0 && j < grid_size {
                    x += (random.next_f64() - 0.5) * cell_width * displacement;
                    y += (random.next_f64() - 0.5) * cell_height * displacement;
                }

                if i == 0 {
                    x = 0.0;
                }
                if i == grid_size {
                    x = width;
                }
                if j == 0 {
                    y = 0.0;
                }
                if j == grid_size {
                    y = height;
                }

                points.push(GridPoint { x, y });
            }
        }

        Self { grid_size, points }
    }

    pub fn grid_size(&self) -> usize {
        self.grid_size
    }

    /// Point at column `i`, row `j`.
    ///
    /// # Panics
    ///
    /// Panics if `i` or `j` exceeds `grid_size`.
    pub fn point(&self, i: usize, j: usize) -> GridPoint {
        assert!(
            i <= self.grid_size && j <= self.grid_size,
            "lattice index ({i}, {j}) out of bounds for grid size {}",
            self.grid_size
        );
        self.points[i * (self.grid_size + 1) + j]
    }

    /// All points, column-major.
    pub fn points(&self) -> &[GridPoint] {
        &self.points
    }
}

/// Generates the triangle mesh from explicit arguments and a random source.
///
/// All validation runs before the first draw; on error the source is
/// untouched. `count` below 2 yields the minimal one-cell mesh.
pub fn triangulate(
    width: f64,
    height: f64,
    count: usize,
    palette: &Palette,
    displacement: f64,
    random: &mut dyn RandomSource,
) -> Result<Vec<Triangle>, PatternError> {
    validate_dimensions(width, height)?;
    validate_displacement(displacement)?;
    if palette.is_empty() {
        return Err(PatternError::EmptyPalette);
    }
    let grid_size = checked_grid_size(count)?;

    debug!(
        "triangulating {width}x{height}: target {count}, grid {grid_size}x{grid_size}, {} triangles",
        2 * grid_size * grid_size
    );

    let lattice = Lattice::build(width, height, grid_size, displacement, random);
    let mut triangles = Vec::with_capacity(2 * grid_size * grid_size);

    for i in 0..grid_size {
        for j in 0..grid_size {
            let top_left = lattice.point(i, j);
            let top_right = lattice.point(i + 1, j);
            let bottom_left = lattice.point(i, j + 1);
            let bottom_right = lattice.point(i + 1, j + 1);

            let diagonal = Diagonal::from_draw(random.next_f64());
            trace!("cell ({i}, {j}): {diagonal:?}");

            for points in diagonal.split(top_left, top_right, bottom_left, bottom_right) {
                let color = palette.pick(random.next_f64());
                triangles.push(Triangle { points, color });
            }
        }
    }

    Ok(triangles)
}

/// Generates a pattern with a caller-supplied random source.
pub fn generate_with(
    params: &GenerationParameters,
    random: &mut dyn RandomSource,
) -> Result<Vec<Triangle>, PatternError> {
    triangulate(
        params.width,
        params.height,
        params.triangle_count,
        &params.palette,
        params.displacement,
        random,
    )
}

/// Generates a pattern, seeding [`Mulberry32`](crate::prng::Mulberry32) when
/// `params.seed` is set and falling back to thread-local randomness otherwise.
///
/// Every call is a full recomputation; nothing is cached between calls.
/// Parameters are checked by [`triangulate`] before the first draw, with the
/// same rules as [`GenerationParameters::validate`].
pub fn generate(params: &GenerationParameters) -> Result<Vec<Triangle>, PatternError> {
    let mut random = random_source(params.seed);
    generate_with(params, random.as_mut())
}
