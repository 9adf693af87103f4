//! Precondition helpers shared by the aggregate entry points.
//!
//! Each aggregate validates its inputs with these helpers before doing
//! any array work, so callers see a precise error instead of a panic
//! from deep inside an ndarray operation.

use crate::core::errors::{StatError, StatResult};
use crate::record::ImageRecord;

/// Validates that an aggregate input slice is non-empty.
///
/// # Arguments
///
/// * `records` - The collection the aggregate was called on
/// * `context` - The operation name, used in the error message
///
/// # Errors
///
/// Returns [`StatError::EmptyInput`] if the slice has no elements.
pub fn validate_non_empty(records: &[ImageRecord], context: &str) -> StatResult<()> {
    if records.is_empty() {
        return Err(StatError::empty_input(context));
    }
    Ok(())
}

/// Validates that every record in the collection shares one shape.
///
/// The first record's shape is the reference; the error names the
/// position of the first record that disagrees with it.
///
/// # Errors
///
/// Returns [`StatError::ShapeMismatch`] on the first differing record.
pub fn validate_uniform_shape<'a, I>(records: I) -> StatResult<()>
where
    I: IntoIterator<Item = &'a ImageRecord>,
{
    let mut records = records.into_iter();
    let Some(first) = records.next() else {
        return Ok(());
    };
    for (index, record) in records.enumerate() {
        if record.shape() != first.shape() {
            return Err(StatError::shape_mismatch(
                format!("image {}", index + 1),
                first.shape(),
                record.shape(),
            ));
        }
    }
    Ok(())
}

/// Validates that two records agree on shape before an elementwise
/// operation.
///
/// # Errors
///
/// Returns [`StatError::ShapeMismatch`] naming the operation.
pub fn validate_same_shape(op: &str, lhs: &ImageRecord, rhs: &ImageRecord) -> StatResult<()> {
    if lhs.shape() != rhs.shape() {
        return Err(StatError::shape_mismatch(op, lhs.shape(), rhs.shape()));
    }
    Ok(())
}
