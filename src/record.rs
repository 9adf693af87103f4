//! The labeled image record and its elementwise operations.

use crate::core::errors::{StatError, StatResult};
use crate::core::validation::validate_same_shape;
use ndarray::{ArrayD, Dimension};
use serde::{Deserialize, Serialize};

/// A dense `f32` image (height × width, or height × width × channels)
/// with an optional integer classification label.
///
/// Every operation returns a freshly allocated record; inputs are never
/// mutated. Binary operators discard labels on output, since an
/// arithmetic combination of two labeled images has no meaningful class.
///
/// Elementwise operations require both operands to share one shape and
/// fail with [`StatError::ShapeMismatch`] otherwise; nothing is ever
/// broadcast.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageRecord {
    /// Pixel data, row-major.
    data: ArrayD<f32>,
    /// Optional classification tag, independent of the pixel data.
    label: Option<i64>,
    /// Shape captured at construction time.
    shape: Vec<usize>,
}

impl ImageRecord {
    /// Creates an unlabeled record from a dense array.
    ///
    /// Accepts any concrete dimensionality and stores it dynamically, so
    /// 2-D grayscale and 3-D multi-channel data share one type.
    pub fn new<D: Dimension>(data: ndarray::Array<f32, D>) -> Self {
        let data = data.into_dyn();
        let shape = data.shape().to_vec();
        Self {
            data,
            label: None,
            shape,
        }
    }

    /// Creates a labeled record from a dense array.
    pub fn with_label<D: Dimension>(data: ndarray::Array<f32, D>, label: i64) -> Self {
        let mut record = Self::new(data);
        record.label = Some(label);
        record
    }

    /// Borrows the pixel data.
    pub fn data(&self) -> &ArrayD<f32> {
        &self.data
    }

    /// Returns the classification label, if one was attached.
    pub fn label(&self) -> Option<i64> {
        self.label
    }

    /// Returns the shape captured at construction.
    pub fn shape(&self) -> &[usize] {
        &self.shape
    }

    /// Total number of pixels (elements across all channels).
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns true if the record holds no elements.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Elementwise sum of two records.
    ///
    /// # Errors
    ///
    /// Returns [`StatError::ShapeMismatch`] if the operands disagree on
    /// shape.
    pub fn add(&self, other: &ImageRecord) -> StatResult<ImageRecord> {
        validate_same_shape("add", self, other)?;
        Ok(ImageRecord::new(&self.data + &other.data))
    }

    /// Elementwise difference of two records.
    ///
    /// # Errors
    ///
    /// Returns [`StatError::ShapeMismatch`] if the operands disagree on
    /// shape.
    pub fn subtract(&self, other: &ImageRecord) -> StatResult<ImageRecord> {
        validate_same_shape("subtract", self, other)?;
        Ok(ImageRecord::new(&self.data - &other.data))
    }

    /// Elementwise squared difference, `(a - b)^2` per pixel.
    ///
    /// # Errors
    ///
    /// Returns [`StatError::ShapeMismatch`] if the operands disagree on
    /// shape.
    pub fn squared_difference(&self, other: &ImageRecord) -> StatResult<ImageRecord> {
        validate_same_shape("squared difference", self, other)?;
        let diff = &self.data - &other.data;
        Ok(ImageRecord::new(diff.mapv_into(|d| d * d)))
    }

    /// Mean squared error between two records: the arithmetic mean over
    /// all elements of their squared difference.
    ///
    /// # Errors
    ///
    /// Returns [`StatError::ShapeMismatch`] if the operands disagree on
    /// shape, or [`StatError::EmptyInput`] if the records hold zero
    /// elements.
    pub fn mean_squared_error(&self, other: &ImageRecord) -> StatResult<f32> {
        let squared = self.squared_difference(other)?;
        squared
            .data
            .mean()
            .ok_or_else(|| StatError::empty_input("mean squared error over a zero-element record"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    fn checkerboard() -> ImageRecord {
        ImageRecord::new(array![[0.0, 1.0], [1.0, 0.0]])
    }

    #[test]
    fn test_shape_cached_at_construction() {
        let record = ImageRecord::new(ndarray::Array3::<f32>::zeros((4, 5, 3)));
        assert_eq!(record.shape(), &[4, 5, 3]);
        assert_eq!(record.len(), 60);
        assert!(record.label().is_none());
    }

    #[test]
    fn test_with_label() {
        let record = ImageRecord::with_label(array![[1.0]], 7);
        assert_eq!(record.label(), Some(7));
    }

    #[test]
    fn test_add_sums_elementwise_and_drops_labels() {
        let a = ImageRecord::with_label(array![[1.0, 2.0], [3.0, 4.0]], 1);
        let b = ImageRecord::with_label(array![[10.0, 20.0], [30.0, 40.0]], 2);
        let sum = a.add(&b).unwrap();
        assert_eq!(sum.data(), &array![[11.0, 22.0], [33.0, 44.0]].into_dyn());
        assert!(sum.label().is_none());
    }

    #[test]
    fn test_add_then_subtract_round_trips() {
        let a = ImageRecord::new(array![[1.5, -2.0], [0.25, 4.0]]);
        let b = checkerboard();
        let restored = a.add(&b).unwrap().subtract(&b).unwrap();
        for (x, y) in restored.data().iter().zip(a.data().iter()) {
            assert!((x - y).abs() < 1e-6);
        }
    }

    #[test]
    fn test_add_rejects_shape_mismatch() {
        let a = ImageRecord::new(ndarray::Array2::<f32>::zeros((3, 3)));
        let b = ImageRecord::new(ndarray::Array2::<f32>::zeros((4, 4)));
        let err = a.add(&b).unwrap_err();
        assert!(matches!(err, StatError::ShapeMismatch { .. }));
    }

    #[test]
    fn test_squared_difference_values() {
        let a = ImageRecord::new(array![[3.0, 0.0]]);
        let b = ImageRecord::new(array![[1.0, 2.0]]);
        let sq = a.squared_difference(&b).unwrap();
        assert_eq!(sq.data(), &array![[4.0, 4.0]].into_dyn());
        assert!(sq.label().is_none());
    }

    #[test]
    fn test_mse_reflexive() {
        let a = checkerboard();
        assert_eq!(a.mean_squared_error(&a).unwrap(), 0.0);
    }

    #[test]
    fn test_mse_symmetric() {
        let a = checkerboard();
        let b = ImageRecord::new(array![[0.5, 0.5], [0.5, 0.5]]);
        let ab = a.mean_squared_error(&b).unwrap();
        let ba = b.mean_squared_error(&a).unwrap();
        assert!((ab - ba).abs() < 1e-6);
        assert!((ab - 0.25).abs() < 1e-6);
    }

    #[test]
    fn test_mse_on_zero_element_records() {
        let a = ImageRecord::new(ndarray::Array2::<f32>::zeros((0, 4)));
        let b = ImageRecord::new(ndarray::Array2::<f32>::zeros((0, 4)));
        let err = a.mean_squared_error(&b).unwrap_err();
        assert!(matches!(err, StatError::EmptyInput { .. }));
    }
}
