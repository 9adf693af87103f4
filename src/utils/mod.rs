//! Utility functions: pixel-buffer conversions, rendering, and logging
//! setup.

pub mod image;
#[cfg(feature = "visualization")]
pub mod visualization;

// Re-export pixel-buffer conversions
pub use image::{gray_to_record, record_to_gray, rgb_to_record};

// Re-export rendering entry points
#[cfg(feature = "visualization")]
pub use visualization::{RenderOptions, render};

/// Initializes the global tracing subscriber for binaries and examples.
///
/// Respects `RUST_LOG` when set and falls back to `info` otherwise.
/// Calling it more than once is harmless; later calls are ignored.
pub fn init_tracing() {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}
