//! Aggregate reductions over collections of image records.
//!
//! These are free functions rather than methods on a container type:
//! they hold no state beyond their arguments, and each validates its
//! preconditions up front before touching the arrays. Mean and standard
//! deviation stack every record along a new leading axis and reduce
//! along it; the pairwise functions reduce per-pair mean squared errors
//! to a scalar or a flat matrix.

use crate::core::errors::{StatError, StatResult};
use crate::core::validation::{validate_non_empty, validate_uniform_shape};
use crate::record::ImageRecord;
use ndarray::Axis;
use rayon::prelude::*;
use tracing::{debug, warn};

/// Pair-count threshold below which the all-pairs sweep stays
/// sequential. Spawning rayon tasks for a handful of small reductions
/// costs more than the reductions themselves.
const PARALLEL_PAIR_THRESHOLD: usize = 16;

/// Computes the mean image of a collection: the elementwise arithmetic
/// mean across all records.
///
/// The output has the common shape of the inputs and no label.
///
/// # Errors
///
/// Returns [`StatError::EmptyInput`] on an empty slice and
/// [`StatError::ShapeMismatch`] if any record disagrees with the first
/// one on shape.
pub fn mean_across_images(records: &[ImageRecord]) -> StatResult<ImageRecord> {
    validate_non_empty(records, "mean across images")?;
    validate_uniform_shape(records)?;
    debug!(count = records.len(), "computing mean image");

    let views: Vec<_> = records.iter().map(|r| r.data().view()).collect();
    let stacked = ndarray::stack(Axis(0), &views)?;
    let mean = stacked
        .mean_axis(Axis(0))
        .ok_or_else(|| StatError::empty_input("mean across images"))?;
    Ok(ImageRecord::new(mean))
}

/// Computes the standard-deviation image of a collection: the
/// elementwise population standard deviation (ddof = 0) across all
/// records.
///
/// Preconditions and failure modes match [`mean_across_images`].
///
/// # Errors
///
/// Returns [`StatError::EmptyInput`] on an empty slice and
/// [`StatError::ShapeMismatch`] if any record disagrees with the first
/// one on shape.
pub fn std_across_images(records: &[ImageRecord]) -> StatResult<ImageRecord> {
    validate_non_empty(records, "standard deviation across images")?;
    validate_uniform_shape(records)?;
    debug!(count = records.len(), "computing standard-deviation image");

    let views: Vec<_> = records.iter().map(|r| r.data().view()).collect();
    let stacked = ndarray::stack(Axis(0), &views)?;
    Ok(ImageRecord::new(stacked.std_axis(Axis(0), 0.0)))
}

/// Computes the mean of per-pair mean squared errors, pairing records
/// positionally.
///
/// Pairing truncates to the shorter slice; a length mismatch is logged
/// at warn level but is not an error. The mean over zero pairs is
/// `NaN`.
///
/// # Errors
///
/// Returns [`StatError::ShapeMismatch`] if any formed pair disagrees on
/// shape.
pub fn mean_pairwise_mse(lhs: &[ImageRecord], rhs: &[ImageRecord]) -> StatResult<f32> {
    if lhs.len() != rhs.len() {
        warn!(
            lhs = lhs.len(),
            rhs = rhs.len(),
            "pairwise MSE inputs differ in length; truncating to the shorter"
        );
    }

    let mut total = 0.0f32;
    let mut pairs = 0usize;
    for (a, b) in lhs.iter().zip(rhs) {
        total += a.mean_squared_error(b)?;
        pairs += 1;
    }
    if pairs == 0 {
        return Ok(f32::NAN);
    }
    Ok(total / pairs as f32)
}

/// Computes the mean squared error for every ordered pair `(a, b)` with
/// `a` from `lhs` and `b` from `rhs`, in row-major order over `lhs`
/// then `rhs`.
///
/// A pair referring to the *same record object* (pointer identity)
/// yields `NaN` instead of comparing the image to itself. The check is
/// by identity, not value: two distinct records with equal pixel
/// content still get a real MSE. The output always has
/// `lhs.len() * rhs.len()` entries.
///
/// # Errors
///
/// Returns [`StatError::ShapeMismatch`] if the records across both
/// slices do not share one shape.
pub fn all_pairs_mse(lhs: &[ImageRecord], rhs: &[ImageRecord]) -> StatResult<Vec<f32>> {
    validate_uniform_shape(lhs.iter().chain(rhs))?;
    debug!(
        lhs = lhs.len(),
        rhs = rhs.len(),
        "computing all-pairs MSE matrix"
    );

    if lhs.len().saturating_mul(rhs.len()) <= PARALLEL_PAIR_THRESHOLD {
        lhs.iter()
            .flat_map(|a| rhs.iter().map(move |b| mse_or_self(a, b)))
            .collect()
    } else {
        lhs.par_iter()
            .flat_map_iter(|a| rhs.iter().map(move |b| mse_or_self(a, b)))
            .collect()
    }
}

/// Scores one ordered pair, substituting `NaN` when both references
/// point at the same record object.
fn mse_or_self(a: &ImageRecord, b: &ImageRecord) -> StatResult<f32> {
    if std::ptr::eq(a, b) {
        Ok(f32::NAN)
    } else {
        a.mean_squared_error(b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::{Array2, array};

    fn filled(rows: usize, cols: usize, value: f32) -> ImageRecord {
        ImageRecord::new(Array2::from_elem((rows, cols), value))
    }

    #[test]
    fn test_mean_preserves_shape() {
        let records = vec![filled(3, 4, 1.0), filled(3, 4, 3.0)];
        let mean = mean_across_images(&records).unwrap();
        assert_eq!(mean.shape(), records[0].shape());
        for &v in mean.data() {
            assert!((v - 2.0).abs() < 1e-6);
        }
        assert!(mean.label().is_none());
    }

    #[test]
    fn test_mean_of_single_record_is_identity() {
        let records = vec![ImageRecord::new(array![[1.0, 2.0], [3.0, 4.0]])];
        let mean = mean_across_images(&records).unwrap();
        assert_eq!(mean.data(), records[0].data());
    }

    #[test]
    fn test_mean_rejects_empty_collection() {
        let err = mean_across_images(&[]).unwrap_err();
        assert!(matches!(err, StatError::EmptyInput { .. }));
    }

    #[test]
    fn test_mean_rejects_mixed_shapes() {
        let records = vec![filled(3, 3, 0.0), filled(4, 4, 0.0)];
        let err = mean_across_images(&records).unwrap_err();
        assert!(matches!(err, StatError::ShapeMismatch { .. }));
    }

    #[test]
    fn test_std_of_identical_records_is_zero() {
        let records = vec![filled(2, 2, 5.0), filled(2, 2, 5.0), filled(2, 2, 5.0)];
        let std = std_across_images(&records).unwrap();
        for &v in std.data() {
            assert!(v.abs() < 1e-6);
        }
    }

    #[test]
    fn test_std_is_population_std() {
        // Values 1 and 3 per pixel: population std is 1, sample std
        // would be sqrt(2).
        let records = vec![filled(2, 2, 1.0), filled(2, 2, 3.0)];
        let std = std_across_images(&records).unwrap();
        for &v in std.data() {
            assert!((v - 1.0).abs() < 1e-6);
        }
    }

    #[test]
    fn test_std_rejects_empty_collection() {
        let err = std_across_images(&[]).unwrap_err();
        assert!(matches!(err, StatError::EmptyInput { .. }));
    }

    #[test]
    fn test_mean_pairwise_mse_averages_pairs() {
        let lhs = vec![filled(2, 2, 0.0), filled(2, 2, 0.0)];
        let rhs = vec![filled(2, 2, 1.0), filled(2, 2, 3.0)];
        // Per-pair MSEs are 1 and 9.
        let mean = mean_pairwise_mse(&lhs, &rhs).unwrap();
        assert!((mean - 5.0).abs() < 1e-6);
    }

    #[test]
    fn test_mean_pairwise_mse_truncates_to_shorter() {
        let lhs = vec![filled(2, 2, 0.0), filled(2, 2, 0.0), filled(2, 2, 0.0)];
        let rhs = vec![filled(2, 2, 2.0)];
        let truncated = mean_pairwise_mse(&lhs, &rhs).unwrap();
        let prefix = mean_pairwise_mse(&lhs[..1], &rhs).unwrap();
        assert!((truncated - prefix).abs() < 1e-6);
        assert!((truncated - 4.0).abs() < 1e-6);
    }

    #[test]
    fn test_mean_pairwise_mse_of_nothing_is_nan() {
        assert!(mean_pairwise_mse(&[], &[]).unwrap().is_nan());
    }

    #[test]
    fn test_all_pairs_mse_same_object_is_nan() {
        let records = vec![filled(2, 2, 1.0)];
        let matrix = all_pairs_mse(&records, &records).unwrap();
        assert_eq!(matrix.len(), 1);
        assert!(matrix[0].is_nan());
    }

    #[test]
    fn test_all_pairs_mse_equal_valued_copy_scores_zero() {
        let records = vec![filled(2, 2, 1.0)];
        let copies = vec![records[0].clone()];
        let matrix = all_pairs_mse(&records, &copies).unwrap();
        assert_eq!(matrix.len(), 1);
        assert_eq!(matrix[0], 0.0);
    }

    #[test]
    fn test_all_pairs_mse_row_major_order() {
        let lhs = vec![filled(1, 1, 0.0), filled(1, 1, 10.0)];
        let rhs = vec![filled(1, 1, 1.0), filled(1, 1, 2.0)];
        let matrix = all_pairs_mse(&lhs, &rhs).unwrap();
        assert_eq!(matrix.len(), 4);
        assert!((matrix[0] - 1.0).abs() < 1e-6); // lhs[0] vs rhs[0]
        assert!((matrix[1] - 4.0).abs() < 1e-6); // lhs[0] vs rhs[1]
        assert!((matrix[2] - 81.0).abs() < 1e-6); // lhs[1] vs rhs[0]
        assert!((matrix[3] - 64.0).abs() < 1e-6); // lhs[1] vs rhs[1]
    }

    #[test]
    fn test_all_pairs_mse_rejects_mixed_shapes_up_front() {
        let lhs = vec![filled(3, 3, 0.0)];
        let rhs = vec![filled(4, 4, 0.0)];
        let err = all_pairs_mse(&lhs, &rhs).unwrap_err();
        assert!(matches!(err, StatError::ShapeMismatch { .. }));
    }

    #[test]
    fn test_all_pairs_mse_parallel_path_keeps_order_and_diagonal() {
        // 6 x 6 = 36 pairs forces the parallel path.
        let records: Vec<_> = (0..6).map(|i| filled(2, 2, i as f32)).collect();
        let matrix = all_pairs_mse(&records, &records).unwrap();
        assert_eq!(matrix.len(), 36);
        for i in 0..6 {
            for j in 0..6 {
                let value = matrix[i * 6 + j];
                if i == j {
                    assert!(value.is_nan());
                } else {
                    let expected = ((i as f32) - (j as f32)).powi(2);
                    assert!((value - expected).abs() < 1e-6);
                }
            }
        }
    }
}
