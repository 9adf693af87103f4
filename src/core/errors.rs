//! Error types for image statistics.
//!
//! All aggregate operations validate their inputs synchronously at the
//! start of the call and surface violations through [`StatError`] before
//! any array work happens. Nothing here is retried or recovered
//! internally; callers decide what a precondition failure means.

use thiserror::Error;

/// Convenience alias for results produced by this crate.
pub type StatResult<T> = Result<T, StatError>;

/// Errors raised by record operations and aggregate reductions.
#[derive(Debug, Error)]
pub enum StatError {
    /// An aggregate was called on an empty collection, or a reduction
    /// ran over a record with zero elements.
    #[error("empty input: {context}")]
    EmptyInput {
        /// The operation that received the empty input.
        context: String,
    },

    /// Two records, or members of one collection, disagree on shape.
    #[error("shape mismatch in {context}: expected {expected:?}, got {actual:?}")]
    ShapeMismatch {
        /// The operation or collection position where the mismatch was found.
        context: String,
        /// The shape the operation required.
        expected: Vec<usize>,
        /// The shape it was given.
        actual: Vec<usize>,
    },

    /// A record has a rank the operation cannot display or convert.
    #[error("unsupported record rank {rank}: expected a 2-D or 3-D array")]
    UnsupportedRank {
        /// Number of axes of the offending record.
        rank: usize,
    },

    /// A render surface with zero width or height was supplied.
    #[error("invalid render surface: {width}x{height}")]
    InvalidSurface {
        /// Surface width in pixels.
        width: u32,
        /// Surface height in pixels.
        height: u32,
    },

    /// Error from basic array operations (fallback for ndarray errors).
    #[error("array layout")]
    Shape(#[from] ndarray::ShapeError),
}

impl StatError {
    /// Creates a [`StatError::EmptyInput`] with the given context.
    pub fn empty_input(context: impl Into<String>) -> Self {
        Self::EmptyInput {
            context: context.into(),
        }
    }

    /// Creates a [`StatError::ShapeMismatch`] from a pair of shapes.
    pub fn shape_mismatch(
        context: impl Into<String>,
        expected: &[usize],
        actual: &[usize],
    ) -> Self {
        Self::ShapeMismatch {
            context: context.into(),
            expected: expected.to_vec(),
            actual: actual.to_vec(),
        }
    }
}
