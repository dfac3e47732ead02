use serde::{Deserialize, Serialize};

use super::letters::{density_grid, LETTER_ROWS};
use crate::ascii::mapping::GlyphMapper;
use crate::ascii::ramp::{Ramp, RampPreset};
use crate::AsciiError;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogoSize {
    Sm,
    #[default]
    Md,
    Lg,
    Hero,
}

impl LogoSize {
    pub fn letter_gap(self) -> usize {
        match self {
            LogoSize::Sm => 1,
            _ => 2,
        }
    }

    pub fn font_size(self) -> f32 {
        match self {
            LogoSize::Sm => 3.4,
            LogoSize::Md => 8.0,
            LogoSize::Lg => 12.0,
            LogoSize::Hero => 16.0,
        }
    }

    pub fn line_height(self) -> f32 {
        match self {
            LogoSize::Sm | LogoSize::Md => 1.15,
            LogoSize::Lg | LogoSize::Hero => 1.2,
        }
    }
}

/// Maps every letter of `word` through the density policy and joins the
/// letters row by row with `gap` blanks between them.
pub fn compose_wordmark(word: &str, ramp: &Ramp, gap: usize) -> Result<Vec<String>, AsciiError> {
    let mapper = GlyphMapper::new(ramp.clone());
    let spacer = " ".repeat(gap);
    let mut lines = vec![String::new(); LETTER_ROWS];

    for (index, letter) in word.chars().enumerate() {
        let grid = density_grid(letter).ok_or(AsciiError::UnknownLetter(letter))?;
        for (line, row) in lines.iter_mut().zip(grid.rows) {
            if index > 0 {
                line.push_str(&spacer);
            }
            line.push_str(&mapper.map_density_row(row));
        }
    }

    Ok(lines)
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Wordmark {
    preset: RampPreset,
    size: LogoSize,
    lines: Vec<String>,
}

impl Wordmark {
    pub fn new(word: &str, preset: RampPreset, size: LogoSize) -> Result<Self, AsciiError> {
        let lines = compose_wordmark(word, &preset.logo_ramp(), size.letter_gap())?;
        Ok(Self { preset, size, lines })
    }

    pub fn preset(&self) -> RampPreset {
        self.preset
    }

    pub fn size(&self) -> LogoSize {
        self.size
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn total_columns(&self) -> usize {
        self.lines.first().map_or(0, |line| line.chars().count())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logo::letters::WORDMARK;

    #[test]
    fn single_letter_maps_densities() {
        let ramp = RampPreset::Minimal.logo_ramp();
        let lines = compose_wordmark("l", &ramp, 2).unwrap();
        assert_eq!(lines[0], "##    ");
        assert_eq!(lines[6], " ###  ");
    }

    #[test]
    fn letters_are_joined_with_gap() {
        let ramp = RampPreset::Dense.logo_ramp();
        let lines = compose_wordmark("ll", &ramp, 3).unwrap();
        assert_eq!(lines[0], "@@       @@    ");
    }

    #[test]
    fn unknown_letter_is_an_error() {
        let ramp = RampPreset::Dense.logo_ramp();
        assert!(matches!(compose_wordmark("Px", &ramp, 1), Err(AsciiError::UnknownLetter('x'))));
    }

    #[test]
    fn wordmark_width_counts_letters_and_gaps() {
        // P=11, r=8, e=8, S=8, c=8, a=8, l=6, e=8 -> 65 glyph columns, 7 gaps.
        let small = Wordmark::new(WORDMARK, RampPreset::Dense, LogoSize::Sm).unwrap();
        assert_eq!(small.total_columns(), 65 + 7);
        let large = Wordmark::new(WORDMARK, RampPreset::Dense, LogoSize::Lg).unwrap();
        assert_eq!(large.total_columns(), 65 + 14);
        assert!(large.lines().iter().all(|line| line.chars().count() == 79));
    }

    #[test]
    fn background_stays_blank_for_every_preset() {
        for preset in RampPreset::ALL {
            let mark = Wordmark::new("P", preset, LogoSize::Md).unwrap();
            // Trailing columns of the P's first row are authored as 0.
            assert!(mark.lines()[0].ends_with("   "), "{preset}");
            assert_eq!(mark.lines()[4].chars().filter(|ch| *ch != ' ').count(), 2);
        }
    }

    #[test]
    fn r_uses_lighter_glyph_for_density_eight() {
        let mark = Wordmark::new("r", RampPreset::Dense, LogoSize::Md).unwrap();
        assert_eq!(mark.lines()[2], "@%  @@@ ");
    }

    #[test]
    fn size_metrics() {
        assert_eq!(LogoSize::Sm.letter_gap(), 1);
        assert_eq!(LogoSize::Hero.letter_gap(), 2);
        assert_eq!(LogoSize::Sm.font_size(), 3.4);
        assert_eq!(LogoSize::Hero.font_size(), 16.0);
        assert_eq!(LogoSize::Md.line_height(), 1.15);
        assert_eq!(LogoSize::Lg.line_height(), 1.2);
    }
}
