//! Conversions between `image` pixel buffers and image records.
//!
//! Records store raw intensities (0..=255 for 8-bit sources), not
//! normalized values; statistics over raw and normalized data differ
//! only by scale, and raw values round-trip exactly.

use crate::core::errors::{StatError, StatResult};
use crate::record::ImageRecord;
use image::{GrayImage, Luma, RgbImage};
use ndarray::{Array2, Array3};

/// Converts an 8-bit grayscale buffer into a height × width record.
pub fn gray_to_record(img: &GrayImage) -> ImageRecord {
    let (width, height) = img.dimensions();
    let data = Array2::from_shape_fn((height as usize, width as usize), |(y, x)| {
        img.get_pixel(x as u32, y as u32)[0] as f32
    });
    ImageRecord::new(data)
}

/// Converts an 8-bit RGB buffer into a height × width × 3 record.
pub fn rgb_to_record(img: &RgbImage) -> ImageRecord {
    let (width, height) = img.dimensions();
    let data = Array3::from_shape_fn((height as usize, width as usize, 3), |(y, x, c)| {
        img.get_pixel(x as u32, y as u32)[c] as f32
    });
    ImageRecord::new(data)
}

/// Converts a rank-2 record back into an 8-bit grayscale buffer.
///
/// Values are clamped to `0..=255` and rounded.
///
/// # Errors
///
/// Returns [`StatError::UnsupportedRank`] if the record is not 2-D.
pub fn record_to_gray(record: &ImageRecord) -> StatResult<GrayImage> {
    let &[rows, cols] = record.shape() else {
        return Err(StatError::UnsupportedRank {
            rank: record.shape().len(),
        });
    };

    let mut img = GrayImage::new(cols as u32, rows as u32);
    for y in 0..rows {
        for x in 0..cols {
            let value = record.data()[[y, x]].clamp(0.0, 255.0).round() as u8;
            img.put_pixel(x as u32, y as u32, Luma([value]));
        }
    }
    Ok(img)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gray_round_trip() {
        let mut img = GrayImage::new(3, 2);
        img.put_pixel(0, 0, Luma([0]));
        img.put_pixel(2, 1, Luma([255]));
        img.put_pixel(1, 0, Luma([42]));

        let record = gray_to_record(&img);
        assert_eq!(record.shape(), &[2, 3]);
        assert_eq!(record.data()[[0, 1]], 42.0);

        let restored = record_to_gray(&record).unwrap();
        assert_eq!(restored, img);
    }

    #[test]
    fn test_rgb_to_record_channel_layout() {
        let mut img = RgbImage::new(2, 1);
        img.put_pixel(0, 0, image::Rgb([10, 20, 30]));
        img.put_pixel(1, 0, image::Rgb([40, 50, 60]));

        let record = rgb_to_record(&img);
        assert_eq!(record.shape(), &[1, 2, 3]);
        assert_eq!(record.data()[[0, 0, 0]], 10.0);
        assert_eq!(record.data()[[0, 0, 2]], 30.0);
        assert_eq!(record.data()[[0, 1, 1]], 50.0);
    }

    #[test]
    fn test_record_to_gray_clamps_out_of_range_values() {
        let record = ImageRecord::new(ndarray::array![[-5.0, 300.0]]);
        let img = record_to_gray(&record).unwrap();
        assert_eq!(img.get_pixel(0, 0)[0], 0);
        assert_eq!(img.get_pixel(1, 0)[0], 255);
    }

    #[test]
    fn test_record_to_gray_rejects_rgb_records() {
        let record = ImageRecord::new(ndarray::Array3::<f32>::zeros((2, 2, 3)));
        let err = record_to_gray(&record).unwrap_err();
        assert!(matches!(err, StatError::UnsupportedRank { rank: 3 }));
    }
}
