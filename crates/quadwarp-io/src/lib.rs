#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]

/// Error types for I/O operations.
///
/// Defines [`IoError`] variants for encoding failures and unsupported image sizes.
pub mod error;

/// In-memory encoding of rasters.
///
/// See [`encode::encode_image_bgra8`] to encode with a runtime selected format.
pub mod encode;

pub use crate::encode::{encode_image_bgra8, EncodeFormat};
pub use crate::error::IoError;
