//! Anchor points: the reference point inside a box that position edits refer to
//!
//! An anchor is a pair of box-relative coordinates `(ax, ay)`, where `(0, 0)` is
//! the lower-left corner and `(1, 1)` the upper-right corner. Values outside
//! `[0, 1]` are allowed; the anchor then sits outside the box and acts as a
//! linear extrapolation reference.

use std::fmt;
use std::str::FromStr;

use super::error::GeometryError;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Anchor {
    #[default]
    LowerLeft,
    UpperLeft,
    UpperRight,
    LowerRight,
    Center,
    /// Explicit box-relative coordinates
    Custom(f64, f64),
}

impl Anchor {
    /// The named presets in the order an editor lists them
    pub const PRESETS: [Anchor; 5] = [
        Anchor::LowerLeft,
        Anchor::UpperLeft,
        Anchor::UpperRight,
        Anchor::LowerRight,
        Anchor::Center,
    ];

    /// Build an explicit anchor, rejecting non-finite coordinates
    pub fn custom(ax: f64, ay: f64) -> Result<Self, GeometryError> {
        if !ax.is_finite() || !ay.is_finite() {
            return Err(GeometryError::invalid_anchor_type(format!("({ax}, {ay})")));
        }
        Ok(Anchor::Custom(ax, ay))
    }

    /// Look up a named preset (case-insensitive)
    ///
    /// Short names (`ll`), long names (`lower-left`) and compass names (`SW`)
    /// are all accepted.
    pub fn from_name(name: &str) -> Result<Self, GeometryError> {
        let anchor = match name.trim().to_ascii_lowercase().as_str() {
            "ll" | "lower-left" | "lower_left" | "sw" => Anchor::LowerLeft,
            "ul" | "upper-left" | "upper_left" | "nw" => Anchor::UpperLeft,
            "ur" | "upper-right" | "upper_right" | "ne" => Anchor::UpperRight,
            "lr" | "lower-right" | "lower_right" | "se" => Anchor::LowerRight,
            "c" | "center" | "centre" => Anchor::Center,
            _ => return Err(GeometryError::invalid_anchor_name(name)),
        };
        Ok(anchor)
    }

    /// Box-relative coordinates `(ax, ay)`
    pub fn coords(&self) -> (f64, f64) {
        match *self {
            Anchor::LowerLeft => (0.0, 0.0),
            Anchor::UpperLeft => (0.0, 1.0),
            Anchor::UpperRight => (1.0, 1.0),
            Anchor::LowerRight => (1.0, 0.0),
            Anchor::Center => (0.5, 0.5),
            Anchor::Custom(ax, ay) => (ax, ay),
        }
    }

    /// Canonical short name, if this is a preset
    pub fn short_name(&self) -> Option<&'static str> {
        match self {
            Anchor::LowerLeft => Some("ll"),
            Anchor::UpperLeft => Some("ul"),
            Anchor::UpperRight => Some("ur"),
            Anchor::LowerRight => Some("lr"),
            Anchor::Center => Some("c"),
            Anchor::Custom(..) => None,
        }
    }
}

impl FromStr for Anchor {
    type Err = GeometryError;

    /// Parse either a preset name or an explicit pair such as `(0.5, 1)` or `0.5,1`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let looks_like_pair = trimmed.starts_with('(') || trimmed.contains(',');
        if !looks_like_pair {
            return Anchor::from_name(trimmed);
        }

        let inner = trimmed
            .strip_prefix('(')
            .and_then(|rest| rest.strip_suffix(')'))
            .unwrap_or(trimmed);
        let parts: Vec<&str> = inner.split(',').map(str::trim).collect();
        if parts.len() != 2 {
            return Err(GeometryError::invalid_anchor_type(s));
        }
        let ax = parts[0]
            .parse::<f64>()
            .map_err(|_| GeometryError::invalid_anchor_type(s))?;
        let ay = parts[1]
            .parse::<f64>()
            .map_err(|_| GeometryError::invalid_anchor_type(s))?;
        Anchor::custom(ax, ay)
    }
}

impl fmt::Display for Anchor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.short_name(), self) {
            (Some(name), _) => f.write_str(name),
            (None, Anchor::Custom(ax, ay)) => write!(f, "({ax}, {ay})"),
            (None, _) => unreachable!("presets always have a short name"),
        }
    }
}

/// Values accepted wherever an anchor is set
///
/// Conversion is fallible so that preset strings and raw pairs are validated at
/// the call that supplies them.
pub trait IntoAnchor {
    fn into_anchor(self) -> Result<Anchor, GeometryError>;
}

impl IntoAnchor for Anchor {
    fn into_anchor(self) -> Result<Anchor, GeometryError> {
        match self {
            Anchor::Custom(ax, ay) => Anchor::custom(ax, ay),
            preset => Ok(preset),
        }
    }
}

impl IntoAnchor for &str {
    fn into_anchor(self) -> Result<Anchor, GeometryError> {
        self.parse()
    }
}

impl IntoAnchor for &String {
    fn into_anchor(self) -> Result<Anchor, GeometryError> {
        self.parse()
    }
}

impl IntoAnchor for String {
    fn into_anchor(self) -> Result<Anchor, GeometryError> {
        self.parse()
    }
}

impl IntoAnchor for (f64, f64) {
    fn into_anchor(self) -> Result<Anchor, GeometryError> {
        Anchor::custom(self.0, self.1)
    }
}

impl IntoAnchor for [f64; 2] {
    fn into_anchor(self) -> Result<Anchor, GeometryError> {
        Anchor::custom(self[0], self[1])
    }
}

/// Slices must hold exactly two numbers
impl IntoAnchor for &[f64] {
    fn into_anchor(self) -> Result<Anchor, GeometryError> {
        match self {
            [ax, ay] => Anchor::custom(*ax, *ay),
            other => Err(GeometryError::invalid_anchor_type(format!("{other:?}"))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preset_coords() {
        assert_eq!(Anchor::LowerLeft.coords(), (0.0, 0.0));
        assert_eq!(Anchor::UpperLeft.coords(), (0.0, 1.0));
        assert_eq!(Anchor::UpperRight.coords(), (1.0, 1.0));
        assert_eq!(Anchor::LowerRight.coords(), (1.0, 0.0));
        assert_eq!(Anchor::Center.coords(), (0.5, 0.5));
    }

    #[test]
    fn test_names_case_insensitive() {
        assert_eq!("C".parse::<Anchor>().unwrap(), Anchor::Center);
        assert_eq!("SW".parse::<Anchor>().unwrap(), Anchor::LowerLeft);
        assert_eq!("NE".parse::<Anchor>().unwrap(), Anchor::UpperRight);
        assert_eq!("upper-left".parse::<Anchor>().unwrap(), Anchor::UpperLeft);
    }

    #[test]
    fn test_unknown_name() {
        let err = "middle".parse::<Anchor>().unwrap_err();
        assert_eq!(err, GeometryError::invalid_anchor_name("middle"));
    }

    #[test]
    fn test_explicit_pair() {
        assert_eq!(
            "(0.25, 0.75)".parse::<Anchor>().unwrap(),
            Anchor::Custom(0.25, 0.75)
        );
        assert_eq!("1.5,-0.5".parse::<Anchor>().unwrap(), Anchor::Custom(1.5, -0.5));
    }

    #[test]
    fn test_malformed_pairs() {
        for bad in ["(0.5)", "(0.5, 0.5, 0.5)", "(a, b)", "0.5,", "(0.5, 0.5"] {
            let err = bad.parse::<Anchor>().unwrap_err();
            assert!(
                matches!(err, GeometryError::InvalidAnchorType { .. }),
                "{bad} gave {err:?}"
            );
        }
    }

    #[test]
    fn test_non_finite_rejected() {
        assert!(matches!(
            (f64::NAN, 0.0).into_anchor(),
            Err(GeometryError::InvalidAnchorType { .. })
        ));
        let three: &[f64] = &[0.0, 1.0, 2.0];
        assert!(matches!(
            three.into_anchor(),
            Err(GeometryError::InvalidAnchorType { .. })
        ));
    }

    #[test]
    fn test_display_round_trips() {
        for anchor in Anchor::PRESETS {
            assert_eq!(anchor.to_string().parse::<Anchor>().unwrap(), anchor);
        }
        let custom = Anchor::Custom(0.25, 2.0);
        assert_eq!(custom.to_string().parse::<Anchor>().unwrap(), custom);
    }
}
