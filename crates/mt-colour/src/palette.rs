//! Named input paints.

use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::colour::Frgb;
use crate::{Error, Result};

/// A paint available for mixing.
#[derive(Debug, Clone, PartialEq)]
pub struct Paint {
    pub name: String,
    pub colour: Frgb,
}

#[derive(Debug, Deserialize)]
struct PaletteEntry {
    name: String,
    colour: String,
}

impl Paint {
    /// Parse a `name=#rrggbb` argument.
    pub fn parse(arg: &str) -> Result<Self> {
        let (name, hex) = arg
            .split_once('=')
            .filter(|(name, _)| !name.trim().is_empty())
            .ok_or_else(|| Error::BadPaint(arg.to_string()))?;
        Ok(Self {
            name: name.trim().to_string(),
            colour: Frgb::from_hex(hex)?,
        })
    }
}

/// Parse a JSON palette: `[{"name": "...", "colour": "#rrggbb"}, ...]`.
pub fn parse_palette(json: &str) -> Result<Vec<Paint>> {
    let entries: Vec<PaletteEntry> = serde_json::from_str(json)?;
    entries
        .into_iter()
        .map(|e| {
            Ok(Paint {
                colour: Frgb::from_hex(&e.colour)?,
                name: e.name,
            })
        })
        .collect()
}

/// Load a JSON palette file.
pub fn load_palette<P: AsRef<Path>>(path: P) -> Result<Vec<Paint>> {
    let json = fs::read_to_string(path)?;
    parse_palette(&json)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_paint() {
        let paint = Paint::parse("cadmium red=#e30022").unwrap();
        assert_eq!(paint.name, "cadmium red");
        assert_eq!(paint.colour.to_hex(), "#e30022");

        assert!(matches!(Paint::parse("#e30022"), Err(Error::BadPaint(_))));
        assert!(matches!(Paint::parse("=#e30022"), Err(Error::BadPaint(_))));
        assert!(matches!(Paint::parse("red=#e300"), Err(Error::BadHex(_))));
    }

    #[test]
    fn test_load_palette() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("paints.json");
        fs::write(
            &path,
            r##"[{"name": "white", "colour": "#ffffff"}, {"name": "blue", "colour": "#0000ff"}]"##,
        )
        .unwrap();

        let paints = load_palette(&path).unwrap();
        assert_eq!(paints.len(), 2);
        assert_eq!(paints[1].name, "blue");

        assert!(matches!(parse_palette("{}"), Err(Error::Palette(_))));
        assert!(matches!(
            parse_palette(r#"[{"name": "x", "colour": "red"}]"#),
            Err(Error::BadHex(_))
        ));
    }
}
