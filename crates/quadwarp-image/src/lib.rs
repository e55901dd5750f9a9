#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]

/// raster image representation.
pub mod image;

/// Error types for the image module.
pub mod error;

/// real-valued points and sizes used to describe geometry requests.
pub mod geometry;

pub use crate::error::ImageError;
pub use crate::geometry::{Point2, Size2};
pub use crate::image::{Bgra8, Image, ImageSize};
