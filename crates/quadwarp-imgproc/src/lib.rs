#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]

/// image cropping module.
pub mod crop;

/// Error types for the imgproc module.
pub mod error;

/// 3x3 homogeneous transformation matrices.
pub mod matrix;

/// module containing parallization utilities.
pub mod parallel;

/// utility functions for resizing images.
pub mod resize;

/// image geometric transformations module.
pub mod warp;

pub use crate::error::ImgprocError;
pub use crate::matrix::Matrix3;
