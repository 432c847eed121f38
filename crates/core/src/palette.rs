//! Ordered, non-empty list of fill colors.
//!
//! Unlike a gradient, a pattern palette is sampled by index: each triangle
//! draws one value `r` in [0, 1) and takes `colors[floor(r * len)]`.

use serde::{Deserialize, Serialize};

use crate::color::Srgb;
use crate::error::PatternError;

/// All built-in palette names, in listing order.
const PALETTE_NAMES: &[&str] = &[
    "zinc",
    "zinc-dark",
    "ocean",
    "neon",
    "earth",
    "monochrome",
    "vapor",
    "fire",
];

/// A non-empty ordered sequence of colors.
///
/// Deserializing an empty list fails, so a `Palette` obtained from any
/// constructor always has at least one color.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Srgb>", into = "Vec<Srgb>")]
pub struct Palette {
    colors: Vec<Srgb>,
}

impl Palette {
    /// Creates a palette from a vector of colors.
    ///
    /// Returns `PatternError::EmptyPalette` if `colors` is empty.
    pub fn new(colors: Vec<Srgb>) -> Result<Self, PatternError> {
        if colors.is_empty() {
            return Err(PatternError::EmptyPalette);
        }
        Ok(Self { colors })
    }

    /// Creates a palette by parsing hex color strings.
    pub fn from_hex<S: AsRef<str>>(hexes: &[S]) -> Result<Self, PatternError> {
        let colors = hexes
            .iter()
            .map(|h| Srgb::from_hex(h.as_ref()))
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(colors)
    }

    /// Parses a comma-separated list such as `"#000,#27272a, #fff"`.
    pub fn parse_list(list: &str) -> Result<Self, PatternError> {
        let hexes: Vec<&str> = list
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .collect();
        Self::from_hex(hexes.as_slice())
    }

    /// Looks up a built-in palette by name.
    pub fn from_name(name: &str) -> Result<Self, PatternError> {
        match name {
            "zinc" => Ok(Self::zinc()),
            "zinc-dark" => Ok(Self::zinc_dark()),
            "ocean" => Ok(Self::ocean()),
            "neon" => Ok(Self::neon()),
            "earth" => Ok(Self::earth()),
            "monochrome" => Ok(Self::monochrome()),
            "vapor" => Ok(Self::vapor()),
            "fire" => Ok(Self::fire()),
            _ => Err(PatternError::UnknownPalette(name.to_string())),
        }
    }

    /// Returns the names accepted by [`Palette::from_name`].
    pub fn list_names() -> &'static [&'static str] {
        PALETTE_NAMES
    }

    /// Returns the number of colors in this palette.
    pub fn len(&self) -> usize {
        self.colors.len()
    }

    /// Always false for a constructed palette.
    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    pub fn colors(&self) -> &[Srgb] {
        &self.colors
    }

    /// Picks the color for a random draw `r` in [0, 1).
    ///
    /// The index is clamped to the last color, so `r` arbitrarily close to 1
    /// (or a foreign source returning exactly 1.0) never indexes past the end.
    /// Negative and NaN draws map to the first color.
    pub fn pick(&self, r: f64) -> Srgb {
        let last = self.colors.len() - 1;
        let idx = (r * self.colors.len() as f64).floor();
        // `as usize` saturates: NaN and negatives become 0.
        self.colors[(idx as usize).min(last)]
    }

    // -- Built-in palettes --

    /// Neutral grays from near-black to near-white.
    pub fn zinc() -> Self {
        Self::from_hex(&[
            "#1f1f23", "#27272a", "#3f3f46", "#52525b", "#71717a", "#a1a1aa", "#d4d4d8",
            "#e4e4e7", "#f4f4f5",
        ])
        .expect("zinc palette hex values are valid")
    }

    /// The darker half of [`Palette::zinc`], for low-contrast backgrounds.
    pub fn zinc_dark() -> Self {
        Self::from_hex(&["#09090b", "#18181b", "#27272a", "#3f3f46", "#52525b"])
            .expect("zinc-dark palette hex values are valid")
    }

    /// Deep blues to cyan.
    pub fn ocean() -> Self {
        Self::from_hex(&["#001f3f", "#003366", "#005f73", "#0a9396", "#94d2bd"])
            .expect("ocean palette hex values are valid")
    }

    /// Vibrant pinks, greens, yellows.
    pub fn neon() -> Self {
        Self::from_hex(&["#ff00ff", "#00ff41", "#ffff00", "#ff0080", "#00ffff"])
            .expect("neon palette hex values are valid")
    }

    /// Browns, greens, golds.
    pub fn earth() -> Self {
        Self::from_hex(&["#5c4033", "#8b6914", "#6b8e23", "#daa520", "#d2b48c"])
            .expect("earth palette hex values are valid")
    }

    /// Black to white via grays.
    pub fn monochrome() -> Self {
        Self::from_hex(&["#000000", "#404040", "#808080", "#c0c0c0", "#ffffff"])
            .expect("monochrome palette hex values are valid")
    }

    /// Pastel purples, pinks, teals.
    pub fn vapor() -> Self {
        Self::from_hex(&["#7b2d8e", "#c77dff", "#ff9ebb", "#80ced6", "#a0e7e5"])
            .expect("vapor palette hex values are valid")
    }

    /// Reds, oranges, yellows.
    pub fn fire() -> Self {
        Self::from_hex(&["#800000", "#cc0000", "#ff4500", "#ff8c00", "#ffd700"])
            .expect("fire palette hex values are valid")
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self::zinc()
    }
}

impl TryFrom<Vec<Srgb>> for Palette {
    type Error = PatternError;

    fn try_from(colors: Vec<Srgb>) -> Result<Self, Self::Error> {
        Self::new(colors)
    }
}

impl From<Palette> for Vec<Srgb> {
    fn from(palette: Palette) -> Self {
        palette.colors
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // -- Construction --

    #[test]
    fn new_with_empty_vec_returns_empty_palette_error() {
        assert!(matches!(Palette::new(vec![]), Err(PatternError::EmptyPalette)));
    }

    #[test]
    fn from_hex_with_empty_slice_returns_error() {
        let empty: [&str; 0] = [];
        assert!(matches!(
            Palette::from_hex(&empty),
            Err(PatternError::EmptyPalette)
        ));
    }

    #[test]
    fn from_hex_with_invalid_hex_returns_error() {
        let result = Palette::from_hex(&["#ff0000", "#zzzzzz"]);
        assert!(matches!(result, Err(PatternError::InvalidColor(_))));
    }

    #[test]
    fn from_hex_accepts_owned_strings() {
        let hexes = vec![String::from("#000000"), String::from("#ffffff")];
        assert_eq!(Palette::from_hex(hexes.as_slice()).unwrap().len(), 2);
    }

    #[test]
    fn parse_list_trims_and_skips_empty_entries() {
        let p = Palette::parse_list(" #000000, #ffffff ,,").unwrap();
        assert_eq!(p.colors(), &[Srgb::BLACK, Srgb::WHITE]);
    }

    #[test]
    fn parse_list_of_nothing_is_empty_palette() {
        assert!(matches!(
            Palette::parse_list(" , "),
            Err(PatternError::EmptyPalette)
        ));
    }

    // -- Picking --

    #[test]
    fn pick_maps_unit_interval_onto_indices() {
        let p = Palette::from_hex(&["#000000", "#808080", "#ffffff"]).unwrap();
        assert_eq!(p.pick(0.0), Srgb::BLACK);
        assert_eq!(p.pick(0.34), Srgb::new(0x80, 0x80, 0x80));
        assert_eq!(p.pick(0.99), Srgb::WHITE);
    }

    #[test]
    fn pick_clamps_at_upper_boundary() {
        let p = Palette::from_hex(&["#000000", "#ffffff"]).unwrap();
        assert_eq!(p.pick(1.0), Srgb::WHITE);
        assert_eq!(p.pick(1.0 - f64::EPSILON / 2.0), Srgb::WHITE);
        assert_eq!(p.pick(7.5), Srgb::WHITE);
    }

    #[test]
    fn pick_maps_negative_and_nan_to_first_color() {
        let p = Palette::from_hex(&["#000000", "#ffffff"]).unwrap();
        assert_eq!(p.pick(-0.3), Srgb::BLACK);
        assert_eq!(p.pick(f64::NAN), Srgb::BLACK);
    }

    #[test]
    fn single_color_palette_always_picks_that_color() {
        let p = Palette::from_hex(&["#3f3f46"]).unwrap();
        for r in [0.0, 0.25, 0.5, 0.999_999] {
            assert_eq!(p.pick(r), Srgb::new(0x3f, 0x3f, 0x46));
        }
    }

    // -- Names --

    #[test]
    fn every_listed_name_resolves() {
        for name in Palette::list_names() {
            let p = Palette::from_name(name)
                .unwrap_or_else(|e| panic!("{name} failed to resolve: {e}"));
            assert!(p.len() >= 2, "{name} has only {} colors", p.len());
        }
    }

    #[test]
    fn unknown_name_is_an_error() {
        assert!(matches!(
            Palette::from_name("sunset"),
            Err(PatternError::UnknownPalette(n)) if n == "sunset"
        ));
    }

    #[test]
    fn default_is_zinc_with_nine_colors() {
        let p = Palette::default();
        assert_eq!(p, Palette::zinc());
        assert_eq!(p.len(), 9);
        assert_eq!(p.colors()[0].to_hex(), "#1f1f23");
    }

    // -- Serialization --

    #[test]
    fn serializes_as_list_of_hex_strings() {
        let p = Palette::from_hex(&["#000000", "#ffffff"]).unwrap();
        assert_eq!(
            serde_json::to_value(&p).unwrap(),
            serde_json::json!(["#000000", "#ffffff"])
        );
    }

    #[test]
    fn deserializing_empty_list_fails() {
        let err = serde_json::from_str::<Palette>("[]").unwrap_err();
        assert!(err.to_string().contains("at least 1 color"), "got: {err}");
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn pick_always_returns_a_palette_member(
                colors in proptest::collection::vec(any::<(u8, u8, u8)>(), 1..16),
                r in -1.0_f64..2.0,
            ) {
                let colors: Vec<Srgb> = colors.into_iter().map(|(r, g, b)| Srgb::new(r, g, b)).collect();
                let p = Palette::new(colors.clone()).unwrap();
                prop_assert!(colors.contains(&p.pick(r)));
            }
        }
    }
}
