//! # imgstat
//!
//! Elementwise image arithmetic and aggregate statistics over
//! collections of labeled images.
//!
//! The central type is [`record::ImageRecord`], a dense `f32` array
//! (height × width, or height × width × channels) carrying an optional
//! integer classification label. Records combine elementwise and reduce
//! across collections:
//!
//! - binary operators: [`record::ImageRecord::add`],
//!   [`record::ImageRecord::subtract`],
//!   [`record::ImageRecord::squared_difference`],
//!   [`record::ImageRecord::mean_squared_error`]
//! - aggregate reductions: [`stats::mean_across_images`],
//!   [`stats::std_across_images`], [`stats::mean_pairwise_mse`],
//!   [`stats::all_pairs_mse`]
//!
//! A separate [`patch`] module provides substring find-and-replace by
//! byte-range splicing. Its unchecked entry point deliberately lets a
//! failed search flow into slicing, which is the basis of the
//! `find_replace` debugging exercise binary; the checked entry point is
//! the corrected variant.
//!
//! ## Modules
//!
//! * [`core`] - Error types and precondition validation helpers
//! * [`record`] - The labeled image record and its elementwise operations
//! * [`stats`] - Aggregate reductions over record collections
//! * [`patch`] - Substring replacement by byte-range splicing
//! * [`utils`] - Pixel-buffer conversions, rendering, and logging setup

pub mod core;
pub mod patch;
pub mod record;
pub mod stats;
pub mod utils;

/// Prelude module for convenient imports.
pub mod prelude {
    // Error handling
    pub use crate::core::{StatError, StatResult};

    // Records and reductions
    pub use crate::record::ImageRecord;
    pub use crate::stats::{
        all_pairs_mse, mean_across_images, mean_pairwise_mse, std_across_images,
    };

    // Text patching
    pub use crate::patch::{PatchError, find_and_replace, find_and_replace_checked, replace_range};

    // Pixel-buffer interop
    pub use crate::utils::{gray_to_record, record_to_gray, rgb_to_record};

    #[cfg(feature = "visualization")]
    pub use crate::utils::{RenderOptions, render};
}
