//! Press-sheet catalog
//!
//! Physical sheet sizes the shop loads into its presses. Externally
//! configured admin data; the JSON field names match the stored format.

use crate::units::in_to_pt;

/// Physical press-sheet dimensions
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct SheetSize {
    pub name: String,
    pub long_side_inches: f32,
    pub short_side_inches: f32,
}

impl SheetSize {
    pub fn new(name: impl Into<String>, long_side_inches: f32, short_side_inches: f32) -> Self {
        Self {
            name: name.into(),
            long_side_inches,
            short_side_inches,
        }
    }

    /// Sheet (width, height) in points for the given orientation
    pub fn dimensions_pt(&self, orientation: SheetOrientation) -> (f32, f32) {
        let long = in_to_pt(self.long_side_inches);
        let short = in_to_pt(self.short_side_inches);
        match orientation {
            SheetOrientation::Portrait => (short, long),
            SheetOrientation::Landscape => (long, short),
        }
    }
}

/// Sheet orientation on press
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum SheetOrientation {
    #[default]
    Portrait,
    Landscape,
}

/// The built-in press-sheet list
pub fn builtin_sheet_sizes() -> Vec<SheetSize> {
    vec![
        SheetSize::new("Letter (8.5 x 11 in)", 11.0, 8.5),
        SheetSize::new("Legal (8.5 x 14 in)", 14.0, 8.5),
        SheetSize::new("Tabloid (11 x 17 in)", 17.0, 11.0),
        SheetSize::new("Digital Press (12 x 18 in)", 18.0, 12.0),
        SheetSize::new("Super B (13 x 19 in)", 19.0, 13.0),
        SheetSize::new("A4 (210 x 297 mm)", 11.69, 8.27),
        SheetSize::new("A3 (297 x 420 mm)", 16.54, 11.69),
        SheetSize::new("A2 (420 x 594 mm)", 23.39, 16.54),
    ]
}

/// Load a sheet catalog from a JSON list
#[cfg(feature = "serde")]
pub fn load_sheet_sizes(path: impl AsRef<std::path::Path>) -> crate::error::Result<Vec<SheetSize>> {
    let json = std::fs::read_to_string(path)?;
    let sheets: Vec<SheetSize> = serde_json::from_str(&json)?;
    if sheets.is_empty() {
        return Err(crate::error::GuideError::Config(
            "Sheet catalog contains no sizes".to_string(),
        ));
    }
    Ok(sheets)
}
