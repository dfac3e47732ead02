mod ascii;
mod config;
mod controls;
mod driver;
mod image_pipeline;
mod logo;
mod timer;

pub use ascii::{
    grid::GlyphGrid,
    mapping::{glyph_for_brightness, glyph_for_density, GlyphMapper},
    ramp::{Ramp, RampPreset},
};
pub use config::{Config, ConfigError, LogoConfig, ViewerConfig};
pub use controls::{CellSize, ModelId, RenderControls, BUILTIN_MODELS};
pub use driver::{
    render_frame, AsciiFrame, FrameOutcome, FrameStyle, RenderDriver, SceneRenderer, SkipReason,
    SurfaceSize, TextSurface,
};
pub use image_pipeline::{
    buffer::PixelBuffer,
    sampler::{luma, sample_brightness, SampleGrid},
};
pub use logo::{
    animation::{
        Glitch, GlitchAnimation, LogoAnimator, LogoLine, RevealAnimation, GLITCH_DURATION,
        GLITCH_INTERVAL, GLITCH_OPACITY,
    },
    letters::{density_grid, DensityGrid, LETTERS, LETTER_ROWS, WORDMARK},
    wordmark::{compose_wordmark, LogoSize, Wordmark},
};
pub use timer::{Interval, Timeout};

#[derive(Debug, thiserror::Error)]
pub enum AsciiError {
    #[error("character ramp needs at least two glyphs, got {0}")]
    RampTooShort(usize),
    #[error("unknown ramp preset {0:?} (expected dense, balanced, minimal or blocks)")]
    UnknownPreset(String),
    #[error("cell size {0} is outside 2..=16")]
    InvalidCellSize(u32),
    #[error("no density grid authored for letter {0:?}")]
    UnknownLetter(char),
    #[error("scene render failed: {0}")]
    Render(String),
}
