//! Error types for panel geometry

use thiserror::Error;

/// Errors raised by box and layout operations
///
/// Every operation that returns one of these leaves its receiver unchanged.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GeometryError {
    /// Anchor preset string that is not recognized
    #[error("invalid anchor name '{name}' (valid anchors: ll, ul, ur, lr, c)")]
    InvalidAnchorName { name: String },

    /// Anchor value that is not a pair of numbers
    #[error("invalid anchor '{value}': expected a pair of numbers like (0.5, 0.5)")]
    InvalidAnchorType { value: String },

    /// Aspect computation against a zero-sized dimension
    #[error("degenerate box: {reason}")]
    DegenerateBox { reason: String },

    /// Panel name already in use
    #[error("duplicate panel name '{name}'")]
    DuplicateName { name: String },

    /// Reference to a panel that does not exist
    #[error("unknown panel '{name}'")]
    UnknownName { name: String },

    /// Edit targeting a field that panels do not have
    #[error("unknown field '{field}' (valid fields: x, y, w, h, aspect, anchor)")]
    UnknownField { field: String },

    /// Edit value that cannot be interpreted for its field
    #[error("invalid value '{value}' for field '{field}'")]
    InvalidValue { field: String, value: String },

    /// Every automatic panel name is taken
    #[error("no free panel name left")]
    NoFreeName,

    /// Layout parameters that produce no usable panels
    #[error("invalid layout: {reason}")]
    InvalidLayout { reason: String },
}

impl GeometryError {
    pub fn invalid_anchor_name(name: impl Into<String>) -> Self {
        Self::InvalidAnchorName { name: name.into() }
    }

    pub fn invalid_anchor_type(value: impl Into<String>) -> Self {
        Self::InvalidAnchorType {
            value: value.into(),
        }
    }

    pub fn degenerate(reason: impl Into<String>) -> Self {
        Self::DegenerateBox {
            reason: reason.into(),
        }
    }

    pub fn duplicate(name: impl Into<String>) -> Self {
        Self::DuplicateName { name: name.into() }
    }

    pub fn unknown(name: impl Into<String>) -> Self {
        Self::UnknownName { name: name.into() }
    }

    pub fn invalid_value(field: impl Into<String>, value: impl Into<String>) -> Self {
        Self::InvalidValue {
            field: field.into(),
            value: value.into(),
        }
    }

    pub fn invalid_layout(reason: impl Into<String>) -> Self {
        Self::InvalidLayout {
            reason: reason.into(),
        }
    }
}
