use std::io::Write;

use log::warn;
use prescale_ascii::{AsciiFrame, TextSurface};

const HIDE_CURSOR: &str = "\x1b[?25l";
const SHOW_CURSOR: &str = "\x1b[?25h";
const CLEAR_SCREEN: &str = "\x1b[2J";
const CURSOR_HOME: &str = "\x1b[H";

/// Redraws each presented frame in place on an ANSI terminal.
#[derive(Debug)]
pub struct TerminalSurface<W: Write> {
    out: W,
    attached: bool,
}

impl<W: Write> TerminalSurface<W> {
    pub fn new(out: W) -> Self {
        Self { out, attached: false }
    }

    #[cfg(test)]
    pub fn output(&self) -> &W {
        &self.out
    }

    fn emit(&mut self, text: &str) {
        if let Err(err) = self.out.write_all(text.as_bytes()).and_then(|()| self.out.flush()) {
            warn!("terminal write failed: {err}");
        }
    }
}

impl<W: Write> TextSurface for TerminalSurface<W> {
    fn attach(&mut self) {
        self.attached = true;
        self.emit(&format!("{HIDE_CURSOR}{CLEAR_SCREEN}"));
    }

    fn present(&mut self, frame: &AsciiFrame) {
        if !self.attached {
            return;
        }
        self.emit(&format!("{CURSOR_HOME}{}\n", frame.text));
    }

    fn detach(&mut self) {
        if self.attached {
            self.attached = false;
            self.emit(SHOW_CURSOR);
        }
    }
}

/// Keeps the latest frame for commands that write frames elsewhere.
#[derive(Debug, Default)]
pub struct CaptureSurface {
    last: Option<AsciiFrame>,
}

impl CaptureSurface {
    pub fn last(&self) -> Option<&AsciiFrame> {
        self.last.as_ref()
    }
}

impl TextSurface for CaptureSurface {
    fn attach(&mut self) {}

    fn present(&mut self, frame: &AsciiFrame) {
        self.last = Some(frame.clone());
    }

    fn detach(&mut self) {
        self.last = None;
    }
}
