//! Dimension spec resolution
//!
//! A document's nominal size arrives in one of three forms: a key into
//! the standard-size catalog, an explicit width/height with a unit, or a
//! legacy free-text `"WxH"` string (inches) kept for compatibility with
//! previously stored projects. The form is decided once at the input
//! boundary; everything downstream sees the tagged variant.

use std::collections::BTreeMap;

use log::warn;

use crate::units::{Unit, in_to_pt, mm_to_pt};

/// A document's nominal size specification
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DimensionSpec {
    /// Key into the standard paper-size catalog (e.g. "A5", "US_Letter")
    Standard(String),
    /// Explicit width/height with a unit
    Custom { width: f32, height: f32, unit: Unit },
    /// Legacy free-text "WxH" in inches (e.g. "5x7")
    Legacy(String),
}

/// One entry in the standard paper-size catalog
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PaperSizeEntry {
    pub name: String,
    pub width_mm: f32,
    pub height_mm: f32,
    pub group: String,
}

/// Catalog of named standard sizes, keyed by a fixed set of string
/// identifiers. Externally configurable (admin data); built-in defaults
/// cover the sizes the shop quotes against.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct PaperCatalog {
    sizes: BTreeMap<String, PaperSizeEntry>,
}

impl PaperCatalog {
    pub fn new() -> Self {
        Self {
            sizes: BTreeMap::new(),
        }
    }

    /// The built-in catalog
    pub fn builtin() -> Self {
        let mut catalog = Self::new();
        let entries: &[(&str, &str, f32, f32, &str)] = &[
            // ISO A series
            ("A0", "A0", 841.0, 1189.0, "ISO A"),
            ("A1", "A1", 594.0, 841.0, "ISO A"),
            ("A2", "A2", 420.0, 594.0, "ISO A"),
            ("A3", "A3", 297.0, 420.0, "ISO A"),
            ("A4", "A4", 210.0, 297.0, "ISO A"),
            ("A5", "A5", 148.0, 210.0, "ISO A"),
            ("A6", "A6", 105.0, 148.0, "ISO A"),
            ("B5", "B5", 182.0, 257.0, "ISO B"),
            // US sizes
            ("US_Letter", "Letter", 215.9, 279.4, "US Standard"),
            ("US_Legal", "Legal", 215.9, 355.6, "US Standard"),
            ("US_Tabloid", "Tabloid / Ledger", 279.4, 431.8, "US Standard"),
            // Book trade sizes (stored in mm for precision)
            ("US_Manga", "US Manga", 127.0, 191.0, "Book"),
            ("Light_Novel", "Light Novel", 130.0, 188.0, "Book"),
            ("US_Comic", "US Comic", 168.0, 260.0, "Book"),
        ];
        for &(key, name, width_mm, height_mm, group) in entries {
            catalog.insert(
                key,
                PaperSizeEntry {
                    name: name.to_string(),
                    width_mm,
                    height_mm,
                    group: group.to_string(),
                },
            );
        }
        catalog
    }

    pub fn insert(&mut self, key: impl Into<String>, entry: PaperSizeEntry) {
        self.sizes.insert(key.into(), entry);
    }

    pub fn get(&self, key: &str) -> Option<&PaperSizeEntry> {
        self.sizes.get(key)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &PaperSizeEntry)> {
        self.sizes.iter()
    }

    pub fn len(&self) -> usize {
        self.sizes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sizes.is_empty()
    }

    /// Load a catalog from a JSON map of key -> entry
    #[cfg(feature = "serde")]
    pub fn from_json(json: &str) -> crate::error::Result<Self> {
        let catalog: Self = serde_json::from_str(json)?;
        if catalog.is_empty() {
            return Err(crate::error::GuideError::Config(
                "Catalog contains no sizes".to_string(),
            ));
        }
        Ok(catalog)
    }

    /// Load a catalog from a JSON file
    #[cfg(feature = "serde")]
    pub fn load(path: impl AsRef<std::path::Path>) -> crate::error::Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }
}

impl Default for PaperCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}

/// Resolved trim dimensions in points
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrimSize {
    pub width: f32,
    pub height: f32,
}

/// Resolve a dimension spec to trim dimensions in points.
///
/// Returns `None` for unknown catalog keys and malformed legacy strings.
/// Callers must treat `None` as "draw nothing"; resolution failure is a
/// diagnostic warning, never fatal.
pub fn resolve_trim_dimensions(spec: &DimensionSpec, catalog: &PaperCatalog) -> Option<TrimSize> {
    match spec {
        DimensionSpec::Standard(key) => match catalog.get(key) {
            Some(entry) => Some(TrimSize {
                width: mm_to_pt(entry.width_mm),
                height: mm_to_pt(entry.height_mm),
            }),
            None => {
                warn!("Unknown standard size key: {key:?}");
                None
            }
        },
        DimensionSpec::Custom {
            width,
            height,
            unit,
        } => {
            let convert = match unit {
                Unit::In => in_to_pt,
                Unit::Mm => mm_to_pt,
            };
            Some(TrimSize {
                width: convert(*width),
                height: convert(*height),
            })
        }
        DimensionSpec::Legacy(text) => match parse_legacy(text) {
            Some(size) => Some(size),
            None => {
                warn!("Could not determine trim dimensions for spec: {text:?}");
                None
            }
        },
    }
}

/// Parse a legacy "WxH" string as decimal inches.
///
/// Both halves must be finite, non-negative numbers; the separator is a
/// case-insensitive literal `x`.
fn parse_legacy(text: &str) -> Option<TrimSize> {
    let lower = text.to_lowercase();
    let (w, h) = lower.split_once('x')?;
    let width: f32 = w.trim().parse().ok()?;
    let height: f32 = h.trim().parse().ok()?;
    if !width.is_finite() || !height.is_finite() || width < 0.0 || height < 0.0 {
        return None;
    }
    Some(TrimSize {
        width: in_to_pt(width),
        height: in_to_pt(height),
    })
}
