use image::{imageops, RgbaImage};

pub const BYTES_PER_PIXEL: usize = 4;

/// RGBA pixels in readback order: row 0 is the bottom scanline of the scene.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PixelBuffer {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl PixelBuffer {
    /// Wraps a readback. `data` may be shorter than `width * height * 4`; missing
    /// channels read as zero.
    pub fn new(width: u32, height: u32, data: Vec<u8>) -> Self {
        Self { width, height, data }
    }

    pub fn filled(width: u32, height: u32, rgba: [u8; 4]) -> Self {
        let pixels = width as usize * height as usize;
        let mut data = Vec::with_capacity(pixels * BYTES_PER_PIXEL);
        for _ in 0..pixels {
            data.extend_from_slice(&rgba);
        }
        Self { width, height, data }
    }

    /// Converts a decoded image (row 0 on top) into readback order.
    pub fn from_top_down(image: &RgbaImage) -> Self {
        let flipped = imageops::flip_vertical(image);
        let (width, height) = flipped.dimensions();
        Self { width, height, data: flipped.into_raw() }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn channel(&self, x: u32, y: u32, channel: usize) -> u8 {
        let offset = (y as usize * self.width as usize + x as usize) * BYTES_PER_PIXEL + channel;
        self.data.get(offset).copied().unwrap_or(0)
    }

    pub fn rgb(&self, x: u32, y: u32) -> [u8; 3] {
        [self.channel(x, y, 0), self.channel(x, y, 1), self.channel(x, y, 2)]
    }
}

#[cfg(test)]
mod tests {
    use image::Rgba;

    use super::*;

    #[test]
    fn underrun_reads_black() {
        let buffer = PixelBuffer::new(2, 2, vec![10, 20, 30, 255, 40]);
        assert_eq!(buffer.rgb(0, 0), [10, 20, 30]);
        assert_eq!(buffer.rgb(1, 0), [40, 0, 0]);
        assert_eq!(buffer.rgb(1, 1), [0, 0, 0]);
    }

    #[test]
    fn top_down_image_is_flipped() {
        let mut image = RgbaImage::new(1, 2);
        image.put_pixel(0, 0, Rgba([255, 255, 255, 255]));
        image.put_pixel(0, 1, Rgba([0, 0, 0, 255]));

        let buffer = PixelBuffer::from_top_down(&image);
        assert_eq!(buffer.rgb(0, 0), [0, 0, 0]);
        assert_eq!(buffer.rgb(0, 1), [255, 255, 255]);
    }

    #[test]
    fn filled_buffer_has_every_pixel() {
        let buffer = PixelBuffer::filled(3, 2, [1, 2, 3, 4]);
        assert_eq!(buffer.data().len(), 24);
        assert_eq!(buffer.rgb(2, 1), [1, 2, 3]);
    }
}
