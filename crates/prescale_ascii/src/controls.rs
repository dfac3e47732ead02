//! User-facing controls read by the render driver once per frame.

use std::fmt;
use std::ops::RangeInclusive;

use crate::ascii::ramp::RampPreset;
use crate::AsciiError;

/// Sampling stride in pixels, limited to the range the viewer slider exposes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CellSize(u32);

impl CellSize {
    pub const RANGE: RangeInclusive<u32> = 2..=16;
    pub const DEFAULT: CellSize = CellSize(8);

    pub fn new(pixels: u32) -> Result<Self, AsciiError> {
        if Self::RANGE.contains(&pixels) {
            Ok(Self(pixels))
        } else {
            Err(AsciiError::InvalidCellSize(pixels))
        }
    }

    pub fn get(self) -> u32 {
        self.0
    }

    pub fn font_size(self) -> f32 {
        (self.0 as f32 * 0.85).max(4.0)
    }

    pub fn letter_spacing(self) -> f32 {
        self.0 as f32 * 0.15
    }
}

impl Default for CellSize {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl TryFrom<u32> for CellSize {
    type Error = AsciiError;

    fn try_from(pixels: u32) -> Result<Self, Self::Error> {
        Self::new(pixels)
    }
}

/// Opaque identifier of the scene the renderer should draw.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ModelId(String);

impl ModelId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for ModelId {
    fn default() -> Self {
        Self::new(BUILTIN_MODELS[0].0)
    }
}

impl fmt::Display for ModelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Built-in geometry catalog as `(id, display name)`.
pub const BUILTIN_MODELS: [(&str, &str); 5] = [
    ("torus-knot", "Torus Knot"),
    ("icosahedron", "Icosahedron"),
    ("octahedron", "Octahedron"),
    ("dodecahedron", "Dodecahedron"),
    ("sphere", "Sphere"),
];

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RenderControls {
    pub model: ModelId,
    pub preset: RampPreset,
    pub cell_size: CellSize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cell_size_bounds() {
        assert!(matches!(CellSize::new(1), Err(AsciiError::InvalidCellSize(1))));
        assert!(matches!(CellSize::new(17), Err(AsciiError::InvalidCellSize(17))));
        assert_eq!(CellSize::new(2).unwrap().get(), 2);
        assert_eq!(CellSize::new(16).unwrap().get(), 16);
    }

    #[test]
    fn text_style_follows_cell_size() {
        let small = CellSize::new(2).unwrap();
        assert_eq!(small.font_size(), 4.0);
        assert!((small.letter_spacing() - 0.3).abs() < 1e-6);

        let large = CellSize::new(16).unwrap();
        assert!((large.font_size() - 13.6).abs() < 1e-5);
        assert!((large.letter_spacing() - 2.4).abs() < 1e-5);
    }

    #[test]
    fn default_controls_match_viewer() {
        let controls = RenderControls::default();
        assert_eq!(controls.model.as_str(), "torus-knot");
        assert_eq!(controls.preset, RampPreset::Balanced);
        assert_eq!(controls.cell_size.get(), 8);
    }
}
