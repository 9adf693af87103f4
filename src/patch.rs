//! Substring replacement by byte-range splicing.
//!
//! The primitive here is [`replace_range`]: splice replacement text into
//! a byte span of the input. [`find_and_replace`] feeds it the position
//! of the first match, and on a miss lets the not-found sentinel flow
//! straight into the slicing, where it blows up. That unchecked path is
//! kept on purpose as the subject of the `find_replace` debugging
//! exercise; [`find_and_replace_checked`] is the corrected variant that
//! reports the miss instead.

use thiserror::Error;

/// Sentinel for a failed substring search, the unsigned encoding of -1.
pub const NOT_FOUND: usize = usize::MAX;

/// Errors from the checked replacement path.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PatchError {
    /// The pattern does not occur in the input.
    #[error("pattern not found: {pattern:?}")]
    NotFound {
        /// The substring that was searched for.
        pattern: String,
    },
}

/// Replaces the byte range `[start, stop)` of `input` with
/// `replacement`, returning `input[..start] + replacement +
/// input[stop..]`.
///
/// No bounds validation is performed: an out-of-range or
/// non-character-boundary index panics with the standard slice
/// diagnostics.
pub fn replace_range(input: &str, replacement: &str, start: usize, stop: usize) -> String {
    let mut patched = String::with_capacity(input.len() + replacement.len());
    patched.push_str(&input[..start]);
    patched.push_str(replacement);
    patched.push_str(&input[stop..]);
    patched
}

/// Replaces the first occurrence of `old` in `input` with `new`.
///
/// # Panics
///
/// Panics if `old` does not occur in `input`: the search result is used
/// as a splice position without being checked, so the [`NOT_FOUND`]
/// sentinel reaches the range slicing. Use
/// [`find_and_replace_checked`] to get an error instead.
pub fn find_and_replace(input: &str, old: &str, new: &str) -> String {
    let start = input.find(old).unwrap_or(NOT_FOUND);
    replace_range(input, new, start, start + old.len())
}

/// Replaces the first occurrence of `old` in `input` with `new`,
/// reporting a missing pattern as an error.
///
/// # Errors
///
/// Returns [`PatchError::NotFound`] if `old` does not occur in `input`.
pub fn find_and_replace_checked(input: &str, old: &str, new: &str) -> Result<String, PatchError> {
    let start = input.find(old).ok_or_else(|| PatchError::NotFound {
        pattern: old.to_string(),
    })?;
    Ok(replace_range(input, new, start, start + old.len()))
}
