use std::time::{Duration, Instant};

use rand::Rng;

use super::wordmark::{LogoSize, Wordmark};
use crate::timer::{Interval, Timeout};

pub const REVEAL_COLUMNS_PER_STEP: usize = 2;
pub const REVEAL_BUDGET: Duration = Duration::from_millis(400);
pub const REVEAL_MIN_STEP: Duration = Duration::from_millis(8);

pub const GLITCH_INTERVAL: Duration = Duration::from_secs(4);
pub const GLITCH_DURATION: Duration = Duration::from_millis(80);
pub const GLITCH_OPACITY: f32 = 0.3;

fn reveal_step(total_columns: usize) -> Duration {
    let columns = u32::try_from(total_columns.max(1)).unwrap_or(u32::MAX);
    (REVEAL_BUDGET / columns).max(REVEAL_MIN_STEP)
}

/// Left-to-right column reveal. Runs at most once per instance; any later
/// start or width change shows the full width immediately.
#[derive(Clone, Debug)]
pub struct RevealAnimation {
    total_columns: usize,
    visible: usize,
    animate: bool,
    has_animated: bool,
    step: Interval,
}

impl RevealAnimation {
    pub fn new(total_columns: usize, animate: bool) -> Self {
        Self {
            total_columns,
            visible: if animate { 0 } else { total_columns },
            animate,
            has_animated: false,
            step: Interval::new(reveal_step(total_columns)),
        }
    }

    pub fn start(&mut self, now: Instant) {
        if !self.animate || self.has_animated {
            self.finish();
            return;
        }

        self.has_animated = true;
        self.visible = 0;
        self.step = Interval::new(reveal_step(self.total_columns));
        if self.total_columns == 0 {
            return;
        }
        self.step.start(now);
    }

    pub fn update(&mut self, now: Instant) -> usize {
        let fired = self.step.poll(now) as usize;
        if fired > 0 {
            let step = fired.saturating_mul(REVEAL_COLUMNS_PER_STEP);
            let revealed = self.visible.saturating_add(step);
            self.visible = revealed.min(self.total_columns);
            if self.visible >= self.total_columns {
                self.step.cancel();
            }
        }
        self.visible
    }

    pub fn set_total_columns(&mut self, total_columns: usize) {
        self.total_columns = total_columns;
        if self.has_animated || !self.animate {
            self.finish();
        } else {
            self.visible = self.visible.min(total_columns);
        }
    }

    pub fn visible_columns(&self) -> usize {
        self.visible
    }

    pub fn is_complete(&self) -> bool {
        self.visible >= self.total_columns
    }

    pub fn stop(&mut self) {
        self.step.cancel();
    }

    fn finish(&mut self) {
        self.step.cancel();
        self.visible = self.total_columns;
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Glitch {
    pub row: usize,
    pub offset_px: f32,
}

/// Periodically knocks one row out of place for a few frames.
#[derive(Debug)]
pub struct GlitchAnimation<R> {
    rows: usize,
    size: LogoSize,
    interval: Interval,
    restore: Timeout,
    active: Option<Glitch>,
    rng: R,
}

impl<R: Rng> GlitchAnimation<R> {
    pub fn new(rows: usize, size: LogoSize, rng: R) -> Self {
        Self {
            rows,
            size,
            interval: Interval::new(GLITCH_INTERVAL),
            restore: Timeout::default(),
            active: None,
            rng,
        }
    }

    pub fn start(&mut self, now: Instant) {
        self.interval.start(now);
    }

    pub fn update(&mut self, now: Instant) -> Option<Glitch> {
        if self.restore.poll(now) {
            self.active = None;
        }

        if self.interval.poll(now) > 0 && self.rows > 0 {
            let row = self.rng.gen_range(0..self.rows);
            let size = self.size;
            let offset_px = match size {
                LogoSize::Sm => 1.0,
                _ if self.rng.gen_bool(0.5) => 2.0,
                _ => -2.0,
            };
            self.active = Some(Glitch { row, offset_px });
            self.restore.arm(now, GLITCH_DURATION);
        }

        self.active
    }

    pub fn stop(&mut self) {
        self.interval.cancel();
        self.restore.cancel();
        self.active = None;
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct LogoLine {
    pub text: String,
    pub opacity: f32,
    pub offset_px: f32,
}

/// Owns the wordmark's reveal and glitch timers for one mounted logo.
#[derive(Debug)]
pub struct LogoAnimator<R> {
    wordmark: Wordmark,
    reveal: RevealAnimation,
    glitch: Option<GlitchAnimation<R>>,
}

impl<R: Rng> LogoAnimator<R> {
    pub fn new(wordmark: Wordmark, animate: bool, rng: R, now: Instant) -> Self {
        let mut reveal = RevealAnimation::new(wordmark.total_columns(), animate);
        reveal.start(now);

        let glitch = animate.then(|| {
            let mut glitch = GlitchAnimation::new(wordmark.lines().len(), wordmark.size(), rng);
            glitch.start(now);
            glitch
        });

        Self { wordmark, reveal, glitch }
    }

    pub fn wordmark(&self) -> &Wordmark {
        &self.wordmark
    }

    /// Swaps the artwork (preset or size change) without replaying the reveal.
    pub fn set_wordmark(&mut self, wordmark: Wordmark) {
        self.reveal.set_total_columns(wordmark.total_columns());
        self.wordmark = wordmark;
    }

    pub fn is_revealed(&self) -> bool {
        self.reveal.is_complete()
    }

    pub fn frame(&mut self, now: Instant) -> Vec<LogoLine> {
        let visible = self.reveal.update(now);
        let glitch = self.glitch.as_mut().and_then(|glitch| glitch.update(now));

        self.wordmark
            .lines()
            .iter()
            .enumerate()
            .map(|(row, line)| {
                let text = line.chars().take(visible).collect();
                match glitch {
                    Some(glitch) if glitch.row == row => {
                        LogoLine { text, opacity: GLITCH_OPACITY, offset_px: glitch.offset_px }
                    },
                    _ => LogoLine { text, opacity: 1.0, offset_px: 0.0 },
                }
            })
            .collect()
    }

    pub fn stop(&mut self) {
        self.reveal.stop();
        if let Some(glitch) = self.glitch.as_mut() {
            glitch.stop();
        }
    }
}
