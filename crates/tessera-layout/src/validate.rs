#![forbid(unsafe_code)]

//! Structural validation of untrusted layouts.
//!
//! [`validate_layout`] checks raw JSON field by field so the first bad field
//! is reported by item index and name, then builds the typed [`Layout`].
//! [`validate_items`] checks the semantic rules that typed items can still
//! break (sizes, bounds, unique ids).

use rustc_hash::FxHashSet;
use serde_json::{Map, Value};
use tessera_core::{FieldType, Layout, LayoutItem, ValidationError};

const POSITION_FIELDS: [&str; 4] = ["x", "y", "w", "h"];
const BOUND_FIELDS: [&str; 4] = ["minW", "minH", "maxW", "maxH"];

fn integer(value: &Value) -> Option<i32> {
    if let Some(v) = value.as_i64() {
        return i32::try_from(v).ok();
    }
    let v = value.as_f64()?;
    if v.fract() == 0.0 && v >= f64::from(i32::MIN) && v <= f64::from(i32::MAX) {
        Some(v as i32)
    } else {
        None
    }
}

/// A present, non-null field.
fn field<'a>(object: &'a Map<String, Value>, name: &str) -> Option<&'a Value> {
    object.get(name).filter(|value| !value.is_null())
}

fn required_integer(
    object: &Map<String, Value>,
    index: usize,
    name: &'static str,
) -> Result<i32, ValidationError> {
    field(object, name)
        .and_then(integer)
        .ok_or(ValidationError::InvalidField {
            index,
            field: name,
            expected: FieldType::Integer,
        })
}

fn optional_integer(
    object: &Map<String, Value>,
    index: usize,
    name: &'static str,
) -> Result<Option<i32>, ValidationError> {
    field(object, name)
        .map(|value| {
            integer(value).ok_or(ValidationError::InvalidField {
                index,
                field: name,
                expected: FieldType::Integer,
            })
        })
        .transpose()
}

fn optional_bool(
    object: &Map<String, Value>,
    index: usize,
    name: &'static str,
) -> Result<Option<bool>, ValidationError> {
    field(object, name)
        .map(|value| {
            value.as_bool().ok_or(ValidationError::InvalidField {
                index,
                field: name,
                expected: FieldType::Boolean,
            })
        })
        .transpose()
}

fn parse_item(index: usize, value: &Value) -> Result<LayoutItem, ValidationError> {
    let object = value
        .as_object()
        .ok_or(ValidationError::NotAnObject { index })?;

    let [x, y, w, h] = {
        let mut out = [0; 4];
        for (slot, name) in out.iter_mut().zip(POSITION_FIELDS) {
            *slot = required_integer(object, index, name)?;
        }
        out
    };
    let id = field(object, "id")
        .and_then(Value::as_str)
        .ok_or(ValidationError::InvalidField {
            index,
            field: "id",
            expected: FieldType::String,
        })?;
    let [min_w, min_h, max_w, max_h] = {
        let mut out = [None; 4];
        for (slot, name) in out.iter_mut().zip(BOUND_FIELDS) {
            *slot = optional_integer(object, index, name)?;
        }
        out
    };

    let mut item = LayoutItem::new(id, x, y, w, h);
    item.min_w = min_w;
    item.min_h = min_h;
    item.max_w = max_w;
    item.max_h = max_h;
    item.is_static = optional_bool(object, index, "static")?.unwrap_or(false);
    item.is_draggable = optional_bool(object, index, "isDraggable")?;
    item.moved = optional_bool(object, index, "moved")?.unwrap_or(false);
    Ok(item)
}

/// Parse and validate an untrusted JSON layout.
///
/// # Errors
///
/// The first problem found, in item order: a non-array input, a non-object
/// item, a missing or mistyped field, or any rule [`validate_items`] checks.
pub fn validate_layout(value: &Value) -> Result<Layout, ValidationError> {
    let entries = value.as_array().ok_or(ValidationError::NotAnArray)?;
    let layout = entries
        .iter()
        .enumerate()
        .map(|(index, entry)| parse_item(index, entry))
        .collect::<Result<Layout, _>>()?;
    validate_items(&layout)?;
    Ok(layout)
}

/// Check sizes, size bounds and id uniqueness of typed items.
///
/// # Errors
///
/// The first offending item: `w` or `h` below 1, a minimum above its
/// maximum, or an id already used by an earlier item.
pub fn validate_items(layout: &[LayoutItem]) -> Result<(), ValidationError> {
    let mut seen = FxHashSet::default();
    for (index, item) in layout.iter().enumerate() {
        for (field, value) in [("w", item.w), ("h", item.h)] {
            if value < 1 {
                return Err(ValidationError::NonPositiveSize {
                    index,
                    field,
                    value,
                });
            }
        }
        for (axis, min, max) in [
            ("width", item.min_w(), item.max_w()),
            ("height", item.min_h(), item.max_h()),
        ] {
            if min > max {
                return Err(ValidationError::InvertedBounds {
                    index,
                    axis,
                    min,
                    max,
                });
            }
        }
        if !seen.insert(item.id.as_str()) {
            return Err(ValidationError::DuplicateId {
                index,
                id: item.id.clone(),
            });
        }
    }
    Ok(())
}
