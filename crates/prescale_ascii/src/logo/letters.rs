//! Hand-authored density grids for the wordmark letters.
//!
//! Each digit is a density code: `0` is background, `1..=9` grow denser.

pub const LETTER_ROWS: usize = 7;

pub const WORDMARK: &str = "PreScale";

#[derive(Debug)]
pub struct DensityGrid {
    pub letter: char,
    pub rows: [&'static str; LETTER_ROWS],
}

impl DensityGrid {
    pub fn width(&self) -> usize {
        self.rows[0].len()
    }
}

#[rustfmt::skip]
pub static LETTERS: [DensityGrid; 7] = [
    DensityGrid {
        letter: 'P',
        rows: [
            "99999999000",
            "99000009900",
            "99000009900",
            "99999999000",
            "99000000000",
            "99000000000",
            "99000000000",
        ],
    },
    DensityGrid {
        letter: 'r',
        rows: [
            "00000000",
            "00000000",
            "98009990",
            "99900000",
            "99000000",
            "99000000",
            "99000000",
        ],
    },
    DensityGrid {
        letter: 'e',
        rows: [
            "00000000",
            "00000000",
            "09999900",
            "99000099",
            "99999999",
            "99000000",
            "09999900",
        ],
    },
    DensityGrid {
        letter: 'S',
        rows: [
            "09999990",
            "99000099",
            "99000000",
            "09999900",
            "00000099",
            "99000099",
            "09999900",
        ],
    },
    DensityGrid {
        letter: 'c',
        rows: [
            "00000000",
            "00000000",
            "09999900",
            "99000099",
            "99000000",
            "99000099",
            "09999900",
        ],
    },
    DensityGrid {
        letter: 'a',
        rows: [
            "00000000",
            "00000000",
            "09999900",
            "00000099",
            "09999999",
            "99000099",
            "09999999",
        ],
    },
    DensityGrid {
        letter: 'l',
        rows: [
            "990000",
            "990000",
            "990000",
            "990000",
            "990000",
            "990000",
            "099900",
        ],
    },
];

pub fn density_grid(letter: char) -> Option<&'static DensityGrid> {
    LETTERS.iter().find(|grid| grid.letter == letter)
}
