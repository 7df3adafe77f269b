#![forbid(unsafe_code)]

//! Error types shared by the layout engine.

use std::fmt;

/// Expected JSON type of a layout item field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldType {
    Integer,
    String,
    Boolean,
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Integer => f.write_str("an integer"),
            Self::String => f.write_str("a string"),
            Self::Boolean => f.write_str("a boolean"),
        }
    }
}

/// A malformed layout, naming the offending item index and field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    NotAnArray,
    NotAnObject {
        index: usize,
    },
    InvalidField {
        index: usize,
        field: &'static str,
        expected: FieldType,
    },
    NonPositiveSize {
        index: usize,
        field: &'static str,
        value: i32,
    },
    InvertedBounds {
        index: usize,
        axis: &'static str,
        min: i32,
        max: i32,
    },
    DuplicateId {
        index: usize,
        id: String,
    },
}

impl ValidationError {
    /// Index of the offending item, if the error is item-scoped.
    #[must_use]
    pub fn index(&self) -> Option<usize> {
        match self {
            Self::NotAnArray => None,
            Self::NotAnObject { index }
            | Self::InvalidField { index, .. }
            | Self::NonPositiveSize { index, .. }
            | Self::InvertedBounds { index, .. }
            | Self::DuplicateId { index, .. } => Some(*index),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotAnArray => write!(f, "layout must be an array"),
            Self::NotAnObject { index } => write!(f, "layout[{index}] must be an object"),
            Self::InvalidField {
                index,
                field,
                expected,
            } => write!(f, "layout[{index}].{field} must be {expected}"),
            Self::NonPositiveSize {
                index,
                field,
                value,
            } => write!(f, "layout[{index}].{field} must be >= 1 (got {value})"),
            Self::InvertedBounds {
                index,
                axis,
                min,
                max,
            } => write!(
                f,
                "layout[{index}] has invalid {axis} bounds: max {max} < min {min}"
            ),
            Self::DuplicateId { index, id } => {
                write!(f, "layout[{index}] reuses id {id:?}")
            }
        }
    }
}

impl std::error::Error for ValidationError {}

/// Errors returned by fallible engine entry points.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LayoutError {
    Validation(ValidationError),
    UnknownItem { id: String },
    InvalidColumns { cols: i32 },
}

impl fmt::Display for LayoutError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "invalid layout: {err}"),
            Self::UnknownItem { id } => write!(f, "no layout item with id {id:?}"),
            Self::InvalidColumns { cols } => {
                write!(f, "grid must have at least one column (got {cols})")
            }
        }
    }
}

impl std::error::Error for LayoutError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::UnknownItem { .. } | Self::InvalidColumns { .. } => None,
        }
    }
}

impl From<ValidationError> for LayoutError {
    fn from(err: ValidationError) -> Self {
        Self::Validation(err)
    }
}
