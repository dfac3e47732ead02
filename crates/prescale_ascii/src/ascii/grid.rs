#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GlyphGrid {
    pub width: u16,
    pub height: u16,
    /// Row-major glyphs in sampling order (row 0 is the bottom of the scene).
    pub cells: Vec<char>,
}

impl GlyphGrid {
    pub fn new(width: u16, height: u16, cells: Vec<char>) -> Self {
        assert_eq!(usize::from(width) * usize::from(height), cells.len());
        Self { width, height, cells }
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn rows(&self) -> impl DoubleEndedIterator<Item = String> + '_ {
        let width = usize::from(self.width).max(1);
        self.cells.chunks(width).map(|row| row.iter().collect::<String>())
    }

    /// Display text: rows reversed so the top of the scene comes first,
    /// newline separated, no trailing newline.
    pub fn to_frame_text(&self) -> String {
        if self.is_empty() {
            return String::new();
        }

        let width = usize::from(self.width);
        let height = usize::from(self.height);
        let mut text = String::with_capacity(height * (width + 1));
        for (index, row) in self.rows().rev().enumerate() {
            if index > 0 {
                text.push('\n');
            }
            text.push_str(&row);
        }
        text
    }
}
