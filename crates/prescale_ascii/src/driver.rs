//! Per-frame ASCII viewer loop.
//!
//! The driver owns one offscreen target and one text surface for as long as it
//! is mounted. Every exit path (`unmount`, model switch, resize, drop) hands the
//! target back to the renderer and detaches the surface.

use log::debug;

use crate::ascii::mapping::GlyphMapper;
use crate::ascii::ramp::{Ramp, RampPreset};
use crate::controls::{CellSize, ModelId, RenderControls};
use crate::image_pipeline::buffer::PixelBuffer;
use crate::image_pipeline::sampler::sample_brightness;
use crate::AsciiError;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SurfaceSize {
    pub width: u32,
    pub height: u32,
}

impl SurfaceSize {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

/// Draws the selected scene into an offscreen target and reads it back.
pub trait SceneRenderer {
    type Target;

    fn create_target(&mut self, size: SurfaceSize) -> Result<Self::Target, AsciiError>;

    fn render(&mut self, target: &mut Self::Target, model: &ModelId) -> Result<(), AsciiError>;

    /// Full RGBA readback of `target`, bottom scanline first.
    fn read_pixels(&mut self, target: &Self::Target) -> Result<PixelBuffer, AsciiError>;

    fn release_target(&mut self, target: Self::Target);

    /// Shows or hides the renderer's own canvas underneath the text overlay.
    fn set_canvas_visible(&mut self, visible: bool);
}

/// Overlay that displays the assembled text.
pub trait TextSurface {
    fn attach(&mut self);
    fn present(&mut self, frame: &AsciiFrame);
    fn detach(&mut self);
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FrameStyle {
    pub font_size: f32,
    pub letter_spacing: f32,
}

impl FrameStyle {
    pub fn for_cell_size(cell_size: CellSize) -> Self {
        Self { font_size: cell_size.font_size(), letter_spacing: cell_size.letter_spacing() }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct AsciiFrame {
    pub text: String,
    pub columns: u16,
    pub rows: u16,
    pub style: FrameStyle,
}

/// Sample, map and assemble one readback.
pub fn render_frame(buffer: &PixelBuffer, ramp: &Ramp, cell_size: CellSize) -> AsciiFrame {
    let samples = sample_brightness(buffer, cell_size);
    let grid = GlyphMapper::new(ramp.clone()).map_brightness(&samples);
    AsciiFrame {
        text: grid.to_frame_text(),
        columns: grid.width,
        rows: grid.height,
        style: FrameStyle::for_cell_size(cell_size),
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SkipReason {
    NotMounted,
    RenderFailed,
    ReadbackFailed,
}

#[derive(Clone, Debug, PartialEq)]
pub enum FrameOutcome {
    Presented(AsciiFrame),
    Skipped(SkipReason),
}

#[derive(Debug)]
struct Mount<T> {
    size: SurfaceSize,
    target: T,
}

pub struct RenderDriver<R: SceneRenderer, S: TextSurface> {
    renderer: R,
    surface: S,
    controls: RenderControls,
    mount: Option<Mount<R::Target>>,
}

impl<R: SceneRenderer, S: TextSurface> RenderDriver<R, S> {
    pub fn new(renderer: R, surface: S, controls: RenderControls) -> Self {
        Self { renderer, surface, controls, mount: None }
    }

    pub fn controls(&self) -> &RenderControls {
        &self.controls
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn is_mounted(&self) -> bool {
        self.mount.is_some()
    }

    pub fn surface_size(&self) -> Option<SurfaceSize> {
        self.mount.as_ref().map(|mount| mount.size)
    }

    pub fn mount(&mut self, size: SurfaceSize) -> Result<(), AsciiError> {
        self.unmount();

        let target = self.renderer.create_target(size)?;
        self.surface.attach();
        self.renderer.set_canvas_visible(false);
        self.mount = Some(Mount { size, target });

        debug!(
            "mounted ascii viewer {}x{} for model {}",
            size.width, size.height, self.controls.model
        );
        Ok(())
    }

    pub fn unmount(&mut self) {
        let Some(mount) = self.mount.take() else {
            return;
        };

        self.renderer.release_target(mount.target);
        self.surface.detach();
        self.renderer.set_canvas_visible(true);
        debug!("unmounted ascii viewer {}x{}", mount.size.width, mount.size.height);
    }

    /// Remounts at `size` when it differs from the mounted size. An unmounted
    /// driver has nothing to resize.
    pub fn resize(&mut self, size: SurfaceSize) -> Result<(), AsciiError> {
        match self.surface_size() {
            Some(current) if current != size => self.mount(size),
            _ => Ok(()),
        }
    }

    /// Switching models always rebuilds the target so no stale dimensions survive.
    pub fn select_model(&mut self, model: ModelId) -> Result<(), AsciiError> {
        if self.controls.model == model {
            return Ok(());
        }

        self.controls.model = model;
        match self.surface_size() {
            Some(size) => self.mount(size),
            None => Ok(()),
        }
    }

    pub fn set_preset(&mut self, preset: RampPreset) {
        self.controls.preset = preset;
    }

    pub fn set_cell_size(&mut self, cell_size: CellSize) {
        self.controls.cell_size = cell_size;
    }

    pub fn tick(&mut self) -> FrameOutcome {
        let Some(mount) = self.mount.as_mut() else {
            return FrameOutcome::Skipped(SkipReason::NotMounted);
        };

        // Controls are read once so a preset swap never lands mid-frame.
        let controls = self.controls.clone();

        if let Err(err) = self.renderer.render(&mut mount.target, &controls.model) {
            debug!("skipping ascii frame, render failed: {err}");
            return FrameOutcome::Skipped(SkipReason::RenderFailed);
        }

        let pixels = match self.renderer.read_pixels(&mount.target) {
            Ok(pixels) => pixels,
            Err(err) => {
                debug!("skipping ascii frame, readback failed: {err}");
                return FrameOutcome::Skipped(SkipReason::ReadbackFailed);
            },
        };

        let frame = render_frame(&pixels, &controls.preset.viewer_ramp(), controls.cell_size);
        self.surface.present(&frame);
        FrameOutcome::Presented(frame)
    }
}

impl<R: SceneRenderer, S: TextSurface> Drop for RenderDriver<R, S> {
    fn drop(&mut self) {
        self.unmount();
    }
}
