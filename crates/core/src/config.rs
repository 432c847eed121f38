//! Reproducible recipe for a triangle pattern.
//!
//! A [`GenerationParameters`] value captures everything the generator reads:
//! canvas size, triangle target, palette, displacement, and the optional
//! seed. Two equal seeded recipes produce bit-identical meshes.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::PatternError;
use crate::palette::Palette;
use crate::params::{param_count, param_f64, param_seed};
use crate::pattern::checked_grid_size;

/// Default canvas width for recipes that omit it.
pub const DEFAULT_WIDTH: f64 = 800.0;
/// Default canvas height for recipes that omit it.
pub const DEFAULT_HEIGHT: f64 = 600.0;
/// Default advisory triangle target.
pub const DEFAULT_TRIANGLE_COUNT: usize = 80;
/// Default fraction of a cell that interior points may wander.
pub const DEFAULT_DISPLACEMENT: f64 = 0.6;

/// Parameters for one generation call.
///
/// Recipes have a single loading policy: deserializing with serde goes
/// through [`GenerationParameters::from_json`], so a recipe file, a
/// `params` block copied from mesh output, and an embedded JSON value all
/// read the same way. Missing fields take their defaults and an empty
/// palette is rejected at load time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Value")]
pub struct GenerationParameters {
    /// Canvas width in pixels.
    pub width: f64,
    /// Canvas height in pixels.
    pub height: f64,
    /// Advisory triangle target. The mesh holds `2 * ceil(sqrt(n / 2))²`
    /// triangles, which may exceed it.
    pub triangle_count: usize,
    /// Fill colors, picked per triangle.
    pub palette: Palette,
    /// Interior point jitter as a fraction of the cell size. Expected in
    /// [0, 1] but not clamped.
    pub displacement: f64,
    /// Seed for the deterministic source; `None` draws from thread-local
    /// randomness.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<i64>,
}

impl Default for GenerationParameters {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            triangle_count: DEFAULT_TRIANGLE_COUNT,
            palette: Palette::default(),
            displacement: DEFAULT_DISPLACEMENT,
            seed: None,
        }
    }
}

impl GenerationParameters {
    /// Creates parameters for a `width` x `height` canvas with default
    /// count, palette and displacement, and no seed.
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            ..Self::default()
        }
    }

    /// Returns the parameters with the given triangle target.
    pub fn with_triangle_count(mut self, count: usize) -> Self {
        self.triangle_count = count;
        self
    }

    /// Returns the parameters with the given palette.
    pub fn with_palette(mut self, palette: Palette) -> Self {
        self.palette = palette;
        self
    }

    /// Returns the parameters with the given displacement factor.
    pub fn with_displacement(mut self, displacement: f64) -> Self {
        self.displacement = displacement;
        self
    }

    /// Returns the parameters with the given seed.
    pub fn with_seed(mut self, seed: i64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Checks every precondition of generation.
    ///
    /// - width and height must be finite and strictly positive
    /// - displacement must be finite (NaN would poison every interior point)
    /// - the triangle target must yield an addressable lattice
    ///
    /// A target below 2 is not an error; it degrades to a single cell.
    pub fn validate(&self) -> Result<(), PatternError> {
        validate_dimensions(self.width, self.height)?;
        validate_displacement(self.displacement)?;
        checked_grid_size(self.triangle_count)?;
        if self.palette.is_empty() {
            return Err(PatternError::EmptyPalette);
        }
        Ok(())
    }

    /// Builds parameters from a loose JSON object, falling back to defaults
    /// for missing or mistyped numeric keys. Quoted numbers are accepted.
    ///
    /// `palette` may be a built-in name (`"ocean"`) or an array of hex
    /// strings. A palette or seed that is present but unusable is an error
    /// rather than silently replaced.
    pub fn from_json(params: &Value) -> Result<Self, PatternError> {
        let palette = match params.get("palette") {
            None | Some(Value::Null) => Palette::default(),
            Some(Value::String(name)) => Palette::from_name(name)?,
            Some(Value::Array(items)) => {
                let hexes = items
                    .iter()
                    .map(|v| {
                        v.as_str().ok_or_else(|| {
                            PatternError::InvalidColor(format!("expected hex string, got {v}"))
                        })
                    })
                    .collect::<Result<Vec<&str>, _>>()?;
                Palette::from_hex(hexes.as_slice())?
            }
            Some(other) => {
                return Err(PatternError::InvalidParameter {
                    name: "palette".into(),
                    reason: format!("expected a name or a list of colors, got {other}"),
                })
            }
        };
        Ok(Self {
            width: param_f64(params, "width", DEFAULT_WIDTH),
            height: param_f64(params, "height", DEFAULT_HEIGHT),
            triangle_count: param_count(params, "triangle_count", DEFAULT_TRIANGLE_COUNT),
            palette,
            displacement: param_f64(params, "displacement", DEFAULT_DISPLACEMENT),
            seed: param_seed(params, "seed")?,
        })
    }
}

impl TryFrom<Value> for GenerationParameters {
    type Error = PatternError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        Self::from_json(&value)
    }
}

/// Rejects zero, negative, and non-finite canvas sizes.
pub(crate) fn validate_dimensions(width: f64, height: f64) -> Result<(), PatternError> {
    let ok = |v: f64| v.is_finite() && v > 0.0;
    if ok(width) && ok(height) {
        Ok(())
    } else {
        Err(PatternError::InvalidDimensions { width, height })
    }
}

/// Rejects NaN and infinite displacement. Out-of-range finite values pass.
pub(crate) fn validate_displacement(displacement: f64) -> Result<(), PatternError> {
    if displacement.is_finite() {
        Ok(())
    } else {
        Err(PatternError::InvalidParameter {
            name: "displacement".into(),
            reason: format!("must be finite, got {displacement}"),
        })
    }
}
