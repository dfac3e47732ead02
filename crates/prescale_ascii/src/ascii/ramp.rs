use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::AsciiError;

/// Ordered glyphs, sparsest first.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Ramp {
    chars: Vec<char>,
}

impl Ramp {
    pub fn new(chars: impl Into<String>) -> Result<Self, AsciiError> {
        let chars: Vec<char> = chars.into().chars().collect();
        if chars.len() < 2 {
            return Err(AsciiError::RampTooShort(chars.len()));
        }
        Ok(Self { chars })
    }

    fn from_static(chars: &'static str) -> Self {
        Self { chars: chars.chars().collect() }
    }

    pub fn chars(&self) -> &[char] {
        &self.chars
    }

    pub fn max_index(&self) -> usize {
        self.chars.len() - 1
    }

    /// Glyph at `index`, or a blank when the index is past the end.
    pub fn get(&self, index: usize) -> char {
        self.chars.get(index).copied().unwrap_or(' ')
    }
}

impl fmt::Display for Ramp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for ch in &self.chars {
            write!(f, "{ch}")?;
        }
        Ok(())
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RampPreset {
    Dense,
    #[default]
    Balanced,
    Minimal,
    Blocks,
}

impl RampPreset {
    pub const ALL: [RampPreset; 4] =
        [RampPreset::Dense, RampPreset::Balanced, RampPreset::Minimal, RampPreset::Blocks];

    pub fn name(self) -> &'static str {
        match self {
            RampPreset::Dense => "dense",
            RampPreset::Balanced => "balanced",
            RampPreset::Minimal => "minimal",
            RampPreset::Blocks => "blocks",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            RampPreset::Dense => "Dense",
            RampPreset::Balanced => "Balanced",
            RampPreset::Minimal => "Minimal",
            RampPreset::Blocks => "Blocks",
        }
    }

    /// Ramp used by the live viewer, indexed with the floor policy.
    pub fn viewer_ramp(self) -> Ramp {
        Ramp::from_static(match self {
            RampPreset::Dense => " .:-=+*#%@",
            RampPreset::Balanced => " .,:;+*?%S#@",
            RampPreset::Minimal => " .@",
            RampPreset::Blocks => " ░▒▓█",
        })
    }

    /// Ramp used by the wordmark, indexed with the rounding density policy.
    pub fn logo_ramp(self) -> Ramp {
        Ramp::from_static(match self {
            RampPreset::Dense => " .,:;=+*#%@",
            RampPreset::Balanced => " .-+*#",
            RampPreset::Minimal => " .+#",
            RampPreset::Blocks => " ░▒▓█",
        })
    }
}

impl fmt::Display for RampPreset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for RampPreset {
    type Err = AsciiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        RampPreset::ALL
            .into_iter()
            .find(|preset| preset.name() == s)
            .ok_or_else(|| AsciiError::UnknownPreset(s.to_owned()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_single_glyph_ramp() {
        assert!(matches!(Ramp::new("@"), Err(AsciiError::RampTooShort(1))));
        assert!(matches!(Ramp::new(""), Err(AsciiError::RampTooShort(0))));
        assert_eq!(Ramp::new("01").unwrap().chars().len(), 2);
    }

    #[test]
    fn presets_start_sparse() {
        for preset in RampPreset::ALL {
            assert_eq!(preset.viewer_ramp().chars()[0], ' ', "{preset}");
            assert_eq!(preset.logo_ramp().chars()[0], ' ', "{preset}");
            assert!(preset.viewer_ramp().chars().len() >= 2);
        }
    }

    #[test]
    fn dense_viewer_ramp_is_ten_levels() {
        let ramp = RampPreset::Dense.viewer_ramp();
        assert_eq!(ramp.to_string(), " .:-=+*#%@");
        assert_eq!(ramp.max_index(), 9);
    }

    #[test]
    fn preset_names_parse() {
        for preset in RampPreset::ALL {
            assert_eq!(preset.name().parse::<RampPreset>().unwrap(), preset);
        }
        assert!(matches!(
            "sparkly".parse::<RampPreset>(),
            Err(AsciiError::UnknownPreset(name)) if name == "sparkly"
        ));
    }

    #[test]
    fn out_of_range_index_is_blank() {
        let ramp = RampPreset::Minimal.viewer_ramp();
        assert_eq!(ramp.get(2), '@');
        assert_eq!(ramp.get(3), ' ');
    }
}
