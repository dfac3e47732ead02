//! Decoded images standing in for a live 3D scene.

use std::fs::File;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use image::codecs::gif::GifDecoder;
use image::imageops::{self, FilterType};
use image::{AnimationDecoder, RgbaImage};
use log::{debug, warn};
use prescale_ascii::{AsciiError, ModelId, PixelBuffer, SceneRenderer, SurfaceSize};
use walkdir::WalkDir;

/// Plays back a still image, a GIF or a directory of frames, one source frame
/// per render, scaled to the offscreen target.
#[derive(Debug)]
pub struct ImageScene {
    frames: Vec<RgbaImage>,
    cursor: usize,
    canvas_visible: bool,
}

impl ImageScene {
    pub fn new(frames: Vec<RgbaImage>) -> Result<Self> {
        if frames.is_empty() {
            anyhow::bail!("scene has no frames");
        }
        Ok(Self { frames, cursor: 0, canvas_visible: true })
    }

    pub fn open(path: &Path) -> Result<Self> {
        Self::new(load_frames(path)?)
    }

    pub fn frame_count(&self) -> usize {
        self.frames.len()
    }

    pub fn source_dimensions(&self) -> (u32, u32) {
        self.frames.first().map_or((0, 0), RgbaImage::dimensions)
    }

    pub fn canvas_visible(&self) -> bool {
        self.canvas_visible
    }
}

impl SceneRenderer for ImageScene {
    type Target = RgbaImage;

    fn create_target(&mut self, size: SurfaceSize) -> Result<RgbaImage, AsciiError> {
        if size.width == 0 || size.height == 0 {
            return Err(AsciiError::Render(format!(
                "cannot allocate a {}x{} target",
                size.width, size.height
            )));
        }
        Ok(RgbaImage::new(size.width, size.height))
    }

    fn render(&mut self, target: &mut RgbaImage, model: &ModelId) -> Result<(), AsciiError> {
        let frame = self
            .frames
            .get(self.cursor)
            .ok_or_else(|| AsciiError::Render(format!("frame {} is missing", self.cursor)))?;
        debug!("drawing source frame {} for model {model}", self.cursor);

        let (width, height) = target.dimensions();
        *target = if frame.dimensions() == (width, height) {
            frame.clone()
        } else {
            imageops::resize(frame, width, height, FilterType::Triangle)
        };
        self.cursor = (self.cursor + 1) % self.frames.len();
        Ok(())
    }

    fn read_pixels(&mut self, target: &RgbaImage) -> Result<PixelBuffer, AsciiError> {
        Ok(PixelBuffer::from_top_down(target))
    }

    fn release_target(&mut self, target: RgbaImage) {
        debug!("released {}x{} target", target.width(), target.height());
    }

    fn set_canvas_visible(&mut self, visible: bool) {
        self.canvas_visible = visible;
    }
}

pub fn load_frames(path: &Path) -> Result<Vec<RgbaImage>> {
    if path.is_dir() {
        return load_frames_from_directory(path);
    }

    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_ascii_lowercase())
        .unwrap_or_default();
    if extension == "gif" {
        load_frames_from_gif(path)
    } else {
        let image = image::open(path).with_context(|| format!("failed to open image {:?}", path))?;
        Ok(vec![image.into_rgba8()])
    }
}

fn load_frames_from_gif(path: &Path) -> Result<Vec<RgbaImage>> {
    let file = File::open(path).with_context(|| format!("failed to open GIF {:?}", path))?;
    let decoder =
        GifDecoder::new(file).with_context(|| format!("failed to decode GIF {:?}", path))?;
    let frames = decoder
        .into_frames()
        .collect_frames()
        .with_context(|| format!("failed to collect frames from {:?}", path))?;
    Ok(frames.into_iter().map(|frame| frame.into_buffer()).collect())
}

/// Unreadable files are skipped with a warning; the directory must still
/// yield at least one frame.
fn load_frames_from_directory(path: &Path) -> Result<Vec<RgbaImage>> {
    let mut entries: Vec<PathBuf> = WalkDir::new(path)
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_file())
        .map(|entry| entry.path().to_path_buf())
        .collect();
    entries.sort();

    let mut frames = Vec::with_capacity(entries.len());
    for entry in entries {
        match image::open(&entry) {
            Ok(image) => frames.push(image.into_rgba8()),
            Err(err) => warn!("dropping frame {:?}: {err}", entry),
        }
    }

    if frames.is_empty() {
        anyhow::bail!("no image files found in {:?}", path);
    }
    Ok(frames)
}

#[cfg(test)]
mod tests {
    use image::Rgba;
    use prescale_ascii::{render_frame, CellSize, RampPreset};

    use super::*;

    fn solid(width: u32, height: u32, value: u8) -> RgbaImage {
        RgbaImage::from_pixel(width, height, Rgba([value, value, value, 255]))
    }

    #[test]
    fn empty_scene_is_rejected() {
        assert!(ImageScene::new(Vec::new()).is_err());
    }

    #[test]
    fn zero_sized_target_is_a_render_error() {
        let mut scene = ImageScene::new(vec![solid(4, 4, 0)]).unwrap();
        let result = scene.create_target(SurfaceSize::new(0, 10));
        assert!(matches!(result, Err(AsciiError::Render(_))));
    }

    #[test]
    fn frames_advance_and_wrap() {
        let mut scene = ImageScene::new(vec![solid(2, 2, 0), solid(2, 2, 255)]).unwrap();
        let mut target = scene.create_target(SurfaceSize::new(2, 2)).unwrap();
        let model = ModelId::default();

        let mut seen = Vec::new();
        for _ in 0..3 {
            scene.render(&mut target, &model).unwrap();
            seen.push(target.get_pixel(0, 0)[0]);
        }
        assert_eq!(seen, vec![0, 255, 0]);
    }

    #[test]
    fn source_is_scaled_to_target() {
        let mut scene = ImageScene::new(vec![solid(3, 5, 200)]).unwrap();
        let mut target = scene.create_target(SurfaceSize::new(16, 8)).unwrap();
        scene.render(&mut target, &ModelId::default()).unwrap();
        assert_eq!(target.dimensions(), (16, 8));
        assert_eq!(scene.source_dimensions(), (3, 5));
    }

    #[test]
    fn readback_renders_upright() {
        let mut image = solid(8, 8, 0);
        for x in 0..8 {
            for y in 0..4 {
                image.put_pixel(x, y, Rgba([255, 255, 255, 255]));
            }
        }
        let mut scene = ImageScene::new(vec![image]).unwrap();
        let mut target = scene.create_target(SurfaceSize::new(8, 8)).unwrap();
        scene.render(&mut target, &ModelId::default()).unwrap();

        let buffer = scene.read_pixels(&target).unwrap();
        let ramp = RampPreset::Minimal.viewer_ramp();
        let frame = render_frame(&buffer, &ramp, CellSize::new(4).unwrap());
        assert_eq!(frame.text, "@@\n  ");
    }

    #[test]
    fn directory_skips_unreadable_files() {
        let dir = tempfile::tempdir().unwrap();
        solid(4, 4, 10).save(dir.path().join("frame_0001.png")).unwrap();
        solid(4, 4, 20).save(dir.path().join("frame_0000.png")).unwrap();
        std::fs::write(dir.path().join("notes.txt"), "not an image").unwrap();

        let frames = load_frames(dir.path()).unwrap();
        assert_eq!(frames.len(), 2);
        assert_eq!(frames[0].get_pixel(0, 0)[0], 20);
    }

    #[test]
    fn directory_without_images_fails() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("readme.md"), "# nothing").unwrap();
        assert!(load_frames(dir.path()).is_err());
    }
}
