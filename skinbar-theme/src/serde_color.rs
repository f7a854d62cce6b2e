//! Custom serialization helpers for vello::peniko::Color

use serde::{Deserialize, Deserializer, Serializer};
use vello::peniko::Color;

use crate::error::{ThemeError, ThemeResult};

/// Serialize a Color as a hex string.
pub fn serialize<S>(color: &Color, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(&to_hex(*color))
}

/// Deserialize a Color from a hex string.
pub fn deserialize<'de, D>(deserializer: D) -> Result<Color, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Error;
    let hex = String::deserialize(deserializer)?;
    parse_hex_color(&hex).map_err(Error::custom)
}

/// Format a color as `#rrggbb`, or `#rrggbbaa` when it is not opaque.
pub fn to_hex(color: Color) -> String {
    let rgba = color.to_rgba8();
    if rgba.a == 255 {
        format!("#{:02x}{:02x}{:02x}", rgba.r, rgba.g, rgba.b)
    } else {
        format!("#{:02x}{:02x}{:02x}{:02x}", rgba.r, rgba.g, rgba.b, rgba.a)
    }
}

/// Parse `#rgb`, `#rrggbb` or `#rrggbbaa`.
pub fn parse_hex_color(hex: &str) -> ThemeResult<Color> {
    let digits = hex.trim().trim_start_matches('#');
    let channel = |range: std::ops::Range<usize>| {
        digits
            .get(range)
            .and_then(|s| u8::from_str_radix(s, 16).ok())
            .ok_or_else(|| ThemeError::invalid_color(hex, "not a hex digit"))
    };

    match digits.len() {
        3 => {
            let expand = |i: usize| channel(i..i + 1).map(|v| v * 17);
            Ok(Color::from_rgb8(expand(0)?, expand(1)?, expand(2)?))
        },
        6 => Ok(Color::from_rgb8(channel(0..2)?, channel(2..4)?, channel(4..6)?)),
        8 => Ok(Color::from_rgba8(
            channel(0..2)?,
            channel(2..4)?,
            channel(4..6)?,
            channel(6..8)?,
        )),
        _ => Err(ThemeError::invalid_color(
            hex,
            "hex color must be 3, 6 or 8 characters",
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_short_and_long_forms() {
        let short = parse_hex_color("#fff").unwrap().to_rgba8();
        assert_eq!((short.r, short.g, short.b, short.a), (255, 255, 255, 255));

        let long = parse_hex_color("1e1e1e").unwrap().to_rgba8();
        assert_eq!((long.r, long.g, long.b), (30, 30, 30));

        let alpha = parse_hex_color("#00000080").unwrap().to_rgba8();
        assert_eq!(alpha.a, 128);
    }

    #[test]
    fn test_rejects_garbage() {
        assert!(parse_hex_color("#12").is_err());
        assert!(parse_hex_color("#gggggg").is_err());
    }

    #[test]
    fn test_to_hex_drops_opaque_alpha() {
        assert_eq!(to_hex(Color::from_rgb8(0x3c, 0x3c, 0x3c)), "#3c3c3c");
        assert_eq!(to_hex(Color::from_rgba8(1, 2, 3, 4)), "#01020304");
    }
}
