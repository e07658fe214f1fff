//! Hex color parsing for background fills.

use std::{fmt, str::FromStr};

/// A validated `#rgb`, `#rrggbb` or `#rrggbbaa` color.
///
/// Keeps the caller's original text for embedding in sidecar files next to
/// the parsed RGBA value used when filling pixels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HexColor {
    raw: String,
    rgba: [u8; 4],
}

/// Input did not match `#rgb`, `#rrggbb` or `#rrggbbaa`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid hex color {0:?}, expected #rgb, #rrggbb or #rrggbbaa")]
pub struct InvalidHexColor(pub String);

impl HexColor {
    /// White, used when a maskable icon needs a background and none was given.
    pub fn white() -> Self {
        Self {
            raw: "#ffffff".to_string(),
            rgba: [255, 255, 255, 255],
        }
    }

    /// Text exactly as supplied by the caller.
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Parsed channel values.
    pub fn rgba(&self) -> [u8; 4] {
        self.rgba
    }
}

impl FromStr for HexColor {
    type Err = InvalidHexColor;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || InvalidHexColor(s.to_string());

        let digits = s.strip_prefix('#').ok_or_else(invalid)?;
        if !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(invalid());
        }

        let nibble = |b: u8| -> u8 {
            // Checked as ASCII hex above
            (b as char).to_digit(16).unwrap_or(0) as u8
        };
        let bytes = digits.as_bytes();

        let rgba = match bytes.len() {
            3 => {
                let [r, g, b] = [bytes[0], bytes[1], bytes[2]].map(|c| nibble(c) * 17);
                [r, g, b, 255]
            }
            6 | 8 => {
                let mut out = [255u8; 4];
                for (i, pair) in bytes.chunks(2).enumerate() {
                    out[i] = (nibble(pair[0]) << 4) | nibble(pair[1]);
                }
                out
            }
            _ => return Err(invalid()),
        };

        Ok(Self {
            raw: s.to_string(),
            rgba,
        })
    }
}

impl fmt::Display for HexColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_short_form() {
        let color: HexColor = "#f0a".parse().unwrap();
        assert_eq!(color.rgba(), [255, 0, 170, 255]);
        assert_eq!(color.as_str(), "#f0a");
    }

    #[test]
    fn test_parse_long_forms() {
        let color: HexColor = "#1A2b3C".parse().unwrap();
        assert_eq!(color.rgba(), [0x1a, 0x2b, 0x3c, 255]);

        let color: HexColor = "#00000080".parse().unwrap();
        assert_eq!(color.rgba(), [0, 0, 0, 0x80]);
    }

    #[test]
    fn test_rejects_malformed() {
        for input in ["", "fff", "#ff", "#ffff", "#fffff", "#ggg", "#fffffff", "#ffffffffff", " #fff"] {
            assert!(input.parse::<HexColor>().is_err(), "{input:?} should fail");
        }
    }

    #[test]
    fn test_display_keeps_original_text() {
        let color: HexColor = "#ABCDEF".parse().unwrap();
        assert_eq!(color.to_string(), "#ABCDEF");
    }
}
