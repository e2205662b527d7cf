//! Colorizing policies and the RGB tables they index into.
//!
//! A colorizer turns an escape count into an 8-bit color index while the
//! render runs; a palette maps indices to RGB triples only when the
//! finished buffer is encoded.  Keeping the two apart means the hot loop
//! never touches a lookup table.

use std::str::FromStr;

use num::clamp;

use error::RenderError;

/// Policy for mapping an escape count onto a color index.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Colorizer {
    /// Two-tone: in-set samples get index 255, escaped samples get 0.
    Mono,
    /// Proportional: the count's fraction of the cap spread over the
    /// index range and boosted eightfold, so the bands near the
    /// boundary stay visible.  Saturates at 255.
    Scaled,
}

impl Colorizer {
    /// Applies the policy.  `value` is an evaluator result in
    /// `[0, max_value]` and `max_value` must be positive; the output is
    /// always a valid color index.
    pub fn colorize(self, value: u32, max_value: u32) -> u8 {
        match self {
            Colorizer::Mono => {
                if value == 0 {
                    255
                } else {
                    0
                }
            }
            Colorizer::Scaled => {
                let boosted = u64::from(value) * 255 / u64::from(max_value) * 8;
                clamp(boosted, 0, 255) as u8
            }
        }
    }
}

impl FromStr for Colorizer {
    type Err = RenderError;

    fn from_str(s: &str) -> Result<Colorizer, RenderError> {
        match s {
            "mono" => Ok(Colorizer::Mono),
            "scaled" => Ok(Colorizer::Scaled),
            other => Err(RenderError::UnknownColorizer(other.to_string())),
        }
    }
}

/// One palette entry.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Rgb {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
}

impl Rgb {
    /// Parses an `RRGGBB` hex triple.  One leading `#` is allowed and
    /// dropped, matching the palette files the usual editors export.
    pub fn from_hex(s: &str) -> Result<Rgb, RenderError> {
        let digits = if s.starts_with('#') { &s[1..] } else { s };
        if digits.len() != 6 || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(RenderError::BadHexColor(s.to_string()));
        }

        let r = u8::from_str_radix(&digits[0..2], 16);
        let g = u8::from_str_radix(&digits[2..4], 16);
        let b = u8::from_str_radix(&digits[4..6], 16);
        match (r, g, b) {
            (Ok(r), Ok(g), Ok(b)) => Ok(Rgb { r, g, b }),
            _ => Err(RenderError::BadHexColor(s.to_string())),
        }
    }
}

/// A 256-entry color table, one RGB triple per possible color index.
///
/// The table is read-only while a render runs; the engine writes
/// indices, and the encoder resolves them through the table afterward.
#[derive(Debug)]
pub struct Palette {
    entries: [Rgb; 256],
}

impl Palette {
    /// The violet ramp the renderer ships with: entry `i` is
    /// `(i, 0, i)`, black through magenta.
    pub fn violet() -> Palette {
        let mut entries = [Rgb { r: 0, g: 0, b: 0 }; 256];
        for (i, entry) in entries.iter_mut().enumerate() {
            entry.r = i as u8;
            entry.b = i as u8;
        }
        Palette { entries }
    }

    /// Plain grayscale: entry `i` is `(i, i, i)`.
    pub fn grayscale() -> Palette {
        let mut entries = [Rgb { r: 0, g: 0, b: 0 }; 256];
        for (i, entry) in entries.iter_mut().enumerate() {
            entry.r = i as u8;
            entry.g = i as u8;
            entry.b = i as u8;
        }
        Palette { entries }
    }

    /// Loads a palette from text: one `#RRGGBB` entry per line, in index
    /// order, exactly one line per index.  Blank lines are skipped, so a
    /// trailing newline is harmless.
    pub fn from_hex_lines(text: &str) -> Result<Palette, RenderError> {
        let lines: Vec<&str> = text
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .collect();
        if lines.len() != 256 {
            return Err(RenderError::BadPaletteSize(lines.len()));
        }

        let mut entries = [Rgb { r: 0, g: 0, b: 0 }; 256];
        for (entry, line) in entries.iter_mut().zip(lines) {
            *entry = Rgb::from_hex(line)?;
        }
        Ok(Palette { entries })
    }

    /// The RGB triple for a color index.
    pub fn get(&self, index: u8) -> Rgb {
        self.entries[index as usize]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mono_is_two_tone() {
        assert_eq!(Colorizer::Mono.colorize(0, 100), 255);
        for value in 1..=100 {
            assert_eq!(Colorizer::Mono.colorize(value, 100), 0);
        }
    }

    #[test]
    fn scaled_keeps_the_in_set_sentinel_dark() {
        assert_eq!(Colorizer::Scaled.colorize(0, 1024), 0);
    }

    #[test]
    fn scaled_saturates_at_the_cap() {
        assert_eq!(Colorizer::Scaled.colorize(10, 10), 255);
        assert_eq!(Colorizer::Scaled.colorize(1024, 1024), 255);
        assert_eq!(Colorizer::Scaled.colorize(4_000_000_000, 4_000_000_000), 255);
    }

    #[test]
    fn scaled_climbs_with_the_count() {
        let max = 37;
        let mut last = Colorizer::Scaled.colorize(1, max);
        for value in 2..=max {
            let shade = Colorizer::Scaled.colorize(value, max);
            assert!(shade >= last);
            last = shade;
        }
    }

    #[test]
    fn scaled_matches_the_integer_pipeline() {
        // (value * 255 / max) * 8, integer division throughout.
        assert_eq!(Colorizer::Scaled.colorize(1, 10), 200);
        assert_eq!(Colorizer::Scaled.colorize(2, 10), 255);
        assert_eq!(Colorizer::Scaled.colorize(1, 1024), 0);
        assert_eq!(Colorizer::Scaled.colorize(5, 1024), 8);
    }

    #[test]
    fn colorizer_names_parse() {
        assert_eq!("mono".parse::<Colorizer>().unwrap(), Colorizer::Mono);
        assert_eq!("scaled".parse::<Colorizer>().unwrap(), Colorizer::Scaled);
        assert!("heatmap".parse::<Colorizer>().is_err());
    }

    #[test]
    fn hex_colors_parse_with_or_without_the_hash() {
        assert_eq!(Rgb::from_hex("#ff00aa").unwrap(), Rgb { r: 255, g: 0, b: 170 });
        assert_eq!(Rgb::from_hex("102030").unwrap(), Rgb { r: 16, g: 32, b: 48 });
        assert_eq!(Rgb::from_hex("#FFFFFF").unwrap(), Rgb { r: 255, g: 255, b: 255 });
    }

    #[test]
    fn bad_hex_colors_are_rejected() {
        assert!(Rgb::from_hex("#ff00").is_err());
        assert!(Rgb::from_hex("zzzzzz").is_err());
        assert!(Rgb::from_hex("#ff00aab").is_err());
        assert!(Rgb::from_hex("##ff00aa").is_err());
        assert!(Rgb::from_hex("").is_err());
    }

    #[test]
    fn builtin_tables_match_their_ramps() {
        let violet = Palette::violet();
        assert_eq!(violet.get(0), Rgb { r: 0, g: 0, b: 0 });
        assert_eq!(violet.get(128), Rgb { r: 128, g: 0, b: 128 });
        assert_eq!(violet.get(255), Rgb { r: 255, g: 0, b: 255 });

        let gray = Palette::grayscale();
        assert_eq!(gray.get(64), Rgb { r: 64, g: 64, b: 64 });
        assert_eq!(gray.get(255), Rgb { r: 255, g: 255, b: 255 });
    }

    #[test]
    fn palette_files_load_in_index_order() {
        let text: String = (0..256)
            .map(|i| format!("#{:02x}00{:02x}\n", i, 255 - i))
            .collect();
        let palette = Palette::from_hex_lines(&text).unwrap();
        assert_eq!(palette.get(0), Rgb { r: 0, g: 0, b: 255 });
        assert_eq!(palette.get(100), Rgb { r: 100, g: 0, b: 155 });
        assert_eq!(palette.get(255), Rgb { r: 255, g: 0, b: 0 });
    }

    #[test]
    fn palette_files_must_have_exactly_one_entry_per_index() {
        match Palette::from_hex_lines("#000000\n#ffffff\n") {
            Err(RenderError::BadPaletteSize(2)) => (),
            other => panic!("short palette accepted: {:?}", other),
        }

        let long: String = (0..257).map(|_| "#123456\n").collect();
        match Palette::from_hex_lines(&long) {
            Err(RenderError::BadPaletteSize(257)) => (),
            other => panic!("long palette accepted: {:?}", other),
        }
    }

    #[test]
    fn palette_files_with_a_bad_entry_fail() {
        let mut text: String = (0..255).map(|_| "#123456\n").collect();
        text.push_str("not-a-color\n");
        assert!(Palette::from_hex_lines(&text).is_err());
    }

    // Failed loads print the whole result, so palettes have to keep a
    // debug format.
    #[test]
    fn palettes_print_their_entries_in_debug_output() {
        let report = format!("{:?}", Palette::violet());
        assert!(report.starts_with("Palette"));
        assert!(report.contains("Rgb { r: 255, g: 0, b: 255 }"));
    }
}
