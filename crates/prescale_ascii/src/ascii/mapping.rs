use crate::image_pipeline::sampler::SampleGrid;

use super::{grid::GlyphGrid, ramp::Ramp};

/// Live-render policy: `floor(brightness * (len - 1))`, no blank override.
pub fn glyph_for_brightness(brightness: f32, ramp: &Ramp) -> char {
    let index = (brightness * ramp.max_index() as f32).floor();
    if index.is_nan() || index < 0.0 {
        return ' ';
    }
    ramp.get(index as usize)
}

/// Authored-density policy: digit `0` (or anything that is not a digit) is a
/// forced blank, `1..=9` rounds onto the ramp.
pub fn glyph_for_density(code: char, ramp: &Ramp) -> char {
    let density = match code.to_digit(10) {
        Some(0) | None => return ' ',
        Some(density) => density,
    };
    let index = (density as f32 / 9.0 * ramp.max_index() as f32).round() as usize;
    ramp.get(index)
}

pub struct GlyphMapper {
    ramp: Ramp,
}

impl GlyphMapper {
    pub fn new(ramp: Ramp) -> Self {
        Self { ramp }
    }

    pub fn map_brightness(&self, samples: &SampleGrid) -> GlyphGrid {
        let cells =
            samples.values.iter().map(|&value| glyph_for_brightness(value, &self.ramp)).collect();
        GlyphGrid::new(samples.columns, samples.rows, cells)
    }

    pub fn map_density_row(&self, row: &str) -> String {
        row.chars().map(|code| glyph_for_density(code, &self.ramp)).collect()
    }
}
