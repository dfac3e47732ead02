use super::buffer::PixelBuffer;
use crate::controls::CellSize;

/// BT.601 luma of an RGB triple, normalized to [0, 1].
///
/// Integer weights keep the extremes exact: white is 1.0 and black is 0.0.
pub fn luma(r: u8, g: u8, b: u8) -> f32 {
    let weighted = 299 * r as u32 + 587 * g as u32 + 114 * b as u32;
    weighted as f32 / 255_000.0
}

#[derive(Clone, Debug, PartialEq)]
pub struct SampleGrid {
    pub columns: u16,
    pub rows: u16,
    /// Row-major brightness, row 0 first in buffer order.
    pub values: Vec<f32>,
}

impl SampleGrid {
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Samples the centre pixel of every `cell_size` square of the buffer.
pub fn sample_brightness(buffer: &PixelBuffer, cell_size: CellSize) -> SampleGrid {
    let cell = cell_size.get();
    let columns = (buffer.width() / cell).min(u16::MAX as u32) as u16;
    let rows = (buffer.height() / cell).min(u16::MAX as u32) as u16;
    let half = cell / 2;

    let mut values = Vec::with_capacity(columns as usize * rows as usize);
    for row in 0..rows as u32 {
        let y = row * cell + half;
        for column in 0..columns as u32 {
            let x = column * cell + half;
            let [r, g, b] = buffer.rgb(x, y);
            values.push(luma(r, g, b));
        }
    }

    SampleGrid { columns, rows, values }
}
