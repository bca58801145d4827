//! Unit conversion for print measurements
//!
//! Everything downstream of dimension resolution works in PostScript
//! points. The millimeter constant must stay byte-for-byte compatible
//! with values stored by earlier versions of the system, so it is the
//! rounded literal rather than `72.0 / 25.4`.

/// Points per inch
pub const POINTS_PER_INCH: f32 = 72.0;

/// Points per millimeter (compatibility constant, do not "fix" to 72/25.4)
pub const POINTS_PER_MM: f32 = 2.83465;

/// Convert inches to points
#[inline]
pub fn in_to_pt(inches: f32) -> f32 {
    inches * POINTS_PER_INCH
}

/// Convert millimeters to points
#[inline]
pub fn mm_to_pt(mm: f32) -> f32 {
    mm * POINTS_PER_MM
}

/// Measurement unit for user-supplied lengths
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Unit {
    /// Inches ("in")
    #[default]
    In,
    /// Millimeters ("mm")
    Mm,
}

/// A length with an explicit unit
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Length {
    pub value: f32,
    pub unit: Unit,
}

impl Length {
    pub fn inches(value: f32) -> Self {
        Self {
            value,
            unit: Unit::In,
        }
    }

    pub fn millimeters(value: f32) -> Self {
        Self {
            value,
            unit: Unit::Mm,
        }
    }

    /// Convert to points
    pub fn to_points(self) -> f32 {
        match self.unit {
            Unit::In => in_to_pt(self.value),
            Unit::Mm => mm_to_pt(self.value),
        }
    }
}
