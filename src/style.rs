//! The style store: every tunable distance and toggle consulted by the
//! pagination passes, addressed by a stable [StyleId] key.
//!
//! Values that scale with the staff size are stored as [Spatium] and
//! converted to points through the [StyleId::Spatium] entry when read with
//! [Style::length]. The page size itself is a layout option, see
//! [crate::layout::LayoutOptions::page_size].

use crate::error::{LayoutError, Result};
use crate::units::*;
use std::collections::HashMap;

/// Stable keys for every style value the layout passes read
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum StyleId {
    PagePrintableWidth,
    PageEvenLeftMargin,
    PageOddLeftMargin,
    PageEvenTopMargin,
    PageEvenBottomMargin,
    PageOddTopMargin,
    PageOddBottomMargin,
    PageTwosided,
    Spatium,

    StaffUpperBorder,
    StaffLowerBorder,
    StaffHeaderFooterPadding,
    MinSystemDistance,
    MaxSystemDistance,
    MinVerticalDistance,

    EnableVerticalSpread,
    SpreadSystem,
    SpreadSquareBracket,
    SpreadCurlyBracket,
    MaxSystemSpread,
    MaxStaffSpread,
    MaxBraceDistance,
    MaxPageFillSpread,

    DividerLeft,
    DividerLeftX,
    DividerLeftY,
    DividerRight,
    DividerRightX,
    DividerRightY,
}

/// The kind of value a [StyleId] holds
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum StyleKind {
    Bool,
    Real,
    Length,
}

/// A single style value
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum StyleValue {
    Bool(bool),
    Real(f32),
    Length(Pt),
    Spatium(Spatium),
}

impl StyleValue {
    pub fn kind(&self) -> StyleKind {
        match self {
            StyleValue::Bool(_) => StyleKind::Bool,
            StyleValue::Real(_) => StyleKind::Real,
            StyleValue::Length(_) | StyleValue::Spatium(_) => StyleKind::Length,
        }
    }
}

impl From<bool> for StyleValue {
    fn from(b: bool) -> Self {
        StyleValue::Bool(b)
    }
}

impl From<f32> for StyleValue {
    fn from(r: f32) -> Self {
        StyleValue::Real(r)
    }
}

impl From<Pt> for StyleValue {
    fn from(p: Pt) -> Self {
        StyleValue::Length(p)
    }
}

impl From<Spatium> for StyleValue {
    fn from(s: Spatium) -> Self {
        StyleValue::Spatium(s)
    }
}

impl StyleId {
    /// The built-in value used when the style has not been overridden
    pub fn default_value(self) -> StyleValue {
        match self {
            StyleId::PagePrintableWidth => StyleValue::Length(Mm(180.0).into()),
            StyleId::PageEvenLeftMargin
            | StyleId::PageOddLeftMargin
            | StyleId::PageEvenTopMargin
            | StyleId::PageEvenBottomMargin
            | StyleId::PageOddTopMargin
            | StyleId::PageOddBottomMargin => StyleValue::Length(Mm(15.0).into()),
            StyleId::PageTwosided => StyleValue::Bool(true),
            StyleId::Spatium => StyleValue::Length(Mm(1.75).into()),

            StyleId::StaffUpperBorder => StyleValue::Spatium(Spatium(7.0)),
            StyleId::StaffLowerBorder => StyleValue::Spatium(Spatium(7.0)),
            StyleId::StaffHeaderFooterPadding => StyleValue::Spatium(Spatium(1.0)),
            StyleId::MinSystemDistance => StyleValue::Spatium(Spatium(8.5)),
            StyleId::MaxSystemDistance => StyleValue::Spatium(Spatium(15.0)),
            StyleId::MinVerticalDistance => StyleValue::Spatium(Spatium(0.5)),

            StyleId::EnableVerticalSpread => StyleValue::Bool(false),
            StyleId::SpreadSystem => StyleValue::Real(2.5),
            StyleId::SpreadSquareBracket => StyleValue::Real(1.2),
            StyleId::SpreadCurlyBracket => StyleValue::Real(1.1),
            StyleId::MaxSystemSpread => StyleValue::Spatium(Spatium(32.0)),
            StyleId::MaxStaffSpread => StyleValue::Spatium(Spatium(20.0)),
            StyleId::MaxBraceDistance => StyleValue::Spatium(Spatium(6.5)),
            StyleId::MaxPageFillSpread => StyleValue::Spatium(Spatium(6.0)),

            StyleId::DividerLeft | StyleId::DividerRight => StyleValue::Bool(false),
            StyleId::DividerLeftX
            | StyleId::DividerLeftY
            | StyleId::DividerRightX
            | StyleId::DividerRightY => StyleValue::Spatium(Spatium(0.0)),
        }
    }

    pub fn kind(self) -> StyleKind {
        self.default_value().kind()
    }
}

/// Style values for a document. Anything not explicitly set falls back to
/// [StyleId::default_value].
#[derive(Debug, Default, Clone)]
pub struct Style {
    overrides: HashMap<StyleId, StyleValue>,
}

impl Style {
    pub fn new() -> Style {
        Style::default()
    }

    /// Override a style value. The value must be of the same kind as the
    /// default; lengths may be given either in points or in staff spaces,
    /// except the staff space itself, which must be in points.
    pub fn set<V: Into<StyleValue>>(&mut self, id: StyleId, value: V) -> Result<()> {
        let value = value.into();
        if let (StyleId::Spatium, StyleValue::Spatium(_)) = (id, value) {
            return Err(LayoutError::RelativeSpatium);
        }
        if value.kind() != id.kind() {
            return Err(LayoutError::StyleKind {
                id,
                expected: id.kind(),
                found: value.kind(),
            });
        }
        self.overrides.insert(id, value);
        Ok(())
    }

    /// Builder-style variant of [Style::set]
    pub fn with<V: Into<StyleValue>>(mut self, id: StyleId, value: V) -> Result<Style> {
        self.set(id, value)?;
        Ok(self)
    }

    /// Drop an override, restoring the default value
    pub fn reset(&mut self, id: StyleId) {
        self.overrides.remove(&id);
    }

    pub fn value(&self, id: StyleId) -> StyleValue {
        self.overrides
            .get(&id)
            .copied()
            .unwrap_or_else(|| id.default_value())
    }

    pub fn bool(&self, id: StyleId) -> bool {
        match self.value(id) {
            StyleValue::Bool(b) => b,
            other => {
                log::warn!("style {id:?} holds {other:?}, expected a boolean");
                matches!(id.default_value(), StyleValue::Bool(true))
            }
        }
    }

    pub fn real(&self, id: StyleId) -> f32 {
        match self.value(id) {
            StyleValue::Real(r) => r,
            other => {
                log::warn!("style {id:?} holds {other:?}, expected a number");
                match id.default_value() {
                    StyleValue::Real(r) => r,
                    _ => 0.0,
                }
            }
        }
    }

    /// Read a length in points, converting staff-space values through the
    /// current spatium
    pub fn length(&self, id: StyleId) -> Pt {
        match self.value(id) {
            StyleValue::Length(p) => p,
            StyleValue::Spatium(s) => s.to_pt(self.spatium()),
            other => {
                log::warn!("style {id:?} holds {other:?}, expected a length");
                match id.default_value() {
                    StyleValue::Length(p) => p,
                    StyleValue::Spatium(s) => s.to_pt(self.spatium()),
                    _ => Pt::ZERO,
                }
            }
        }
    }

    /// The size of one staff space
    pub fn spatium(&self) -> Pt {
        match self.value(StyleId::Spatium) {
            StyleValue::Length(p) => p,
            other => {
                log::warn!("style Spatium holds {other:?}, expected a length in points");
                Mm(1.75).into()
            }
        }
    }

    pub fn enable_vertical_spread(&self) -> bool {
        self.bool(StyleId::EnableVerticalSpread)
    }

    pub fn max_system_distance(&self) -> Pt {
        self.length(StyleId::MaxSystemDistance)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_scale_with_spatium() {
        let mut style = Style::new();
        style.set(StyleId::Spatium, Pt(5.0)).unwrap();
        assert_eq!(style.length(StyleId::StaffUpperBorder), Pt(35.0));
        assert_eq!(style.length(StyleId::MaxSystemDistance), Pt(75.0));
    }

    #[test]
    fn rejects_value_of_the_wrong_kind() {
        let mut style = Style::new();
        let err = style.set(StyleId::DividerLeft, Pt(1.0)).unwrap_err();
        assert!(matches!(
            err,
            LayoutError::StyleKind {
                id: StyleId::DividerLeft,
                expected: StyleKind::Bool,
                found: StyleKind::Length,
            }
        ));
        assert!(!style.bool(StyleId::DividerLeft));
    }

    #[test]
    fn lengths_accept_points_or_spatium() {
        let style = Style::new()
            .with(StyleId::Spatium, Pt(4.0))
            .and_then(|s| s.with(StyleId::StaffLowerBorder, Pt(12.0)))
            .and_then(|s| s.with(StyleId::StaffUpperBorder, Spatium(2.0)))
            .unwrap();
        assert_eq!(style.length(StyleId::StaffLowerBorder), Pt(12.0));
        assert_eq!(style.length(StyleId::StaffUpperBorder), Pt(8.0));
    }

    #[test]
    fn spatium_must_be_given_in_points() {
        let mut style = Style::new();
        let err = style.set(StyleId::Spatium, Spatium(2.0)).unwrap_err();
        assert!(matches!(err, LayoutError::RelativeSpatium));
        assert_eq!(style.spatium(), Pt::from(Mm(1.75)));

        style.set(StyleId::Spatium, Pt(3.0)).unwrap();
        assert_eq!(style.spatium(), Pt(3.0));
    }

    #[test]
    fn reset_restores_default() {
        let mut style = Style::new();
        style.set(StyleId::EnableVerticalSpread, true).unwrap();
        assert!(style.enable_vertical_spread());
        style.reset(StyleId::EnableVerticalSpread);
        assert!(!style.enable_vertical_spread());
    }
}
