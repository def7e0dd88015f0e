//! Color token lookup for color-typed questions
//!
//! Maps answer tokens such as `"Siyah"` to a display color. The table is
//! fixed; tokens outside it render with a neutral gray and are flagged so
//! the UI can mark them.

use serde::Serialize;

/// Display color for one answer token
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Swatch {
    pub hex: &'static str,
    pub rgb: (u8, u8, u8),
    /// False when the token fell back to the neutral color
    pub known: bool,
}

/// Neutral gray used for tokens missing from the table
pub const FALLBACK_SWATCH: Swatch = Swatch {
    hex: "#808080",
    rgb: (128, 128, 128),
    known: false,
};

const SWATCHES: &[(&str, &str, (u8, u8, u8))] = &[
    ("siyah", "#000000", (0, 0, 0)),
    ("bej", "#E8DCC4", (232, 220, 196)),
    ("beyaz", "#FFFFFF", (255, 255, 255)),
    ("mavi", "#0000FF", (0, 0, 255)),
    ("kırmızı", "#FF0000", (255, 0, 0)),
    ("yeşil", "#008000", (0, 128, 0)),
    ("black", "#000000", (0, 0, 0)),
    ("beige", "#E8DCC4", (232, 220, 196)),
    ("white", "#FFFFFF", (255, 255, 255)),
    ("blue", "#0000FF", (0, 0, 255)),
    ("red", "#FF0000", (255, 0, 0)),
    ("green", "#008000", (0, 128, 0)),
];

/// Look up the swatch for `token`, case-insensitively.
pub fn swatch_for(token: &str) -> Swatch {
    let key = token.trim().to_lowercase();
    SWATCHES
        .iter()
        .find(|(name, _, _)| *name == key)
        .map(|&(_, hex, rgb)| Swatch {
            hex,
            rgb,
            known: true,
        })
        .unwrap_or(FALLBACK_SWATCH)
}
