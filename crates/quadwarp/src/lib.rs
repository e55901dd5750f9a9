#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]

#[doc(inline)]
pub use quadwarp_image as image;

#[doc(inline)]
pub use quadwarp_imgproc as imgproc;

#[doc(inline)]
pub use quadwarp_io as io;

/// Configuration consumed by the manipulation operations.
pub mod config;

/// Error types for the manipulation operations.
pub mod error;

/// The crop and distort operations.
pub mod manipulation;

/// Clamping of user supplied geometry and identity detection.
pub mod normalize;

/// Notification of a display component with the encoded result.
pub mod sink;

pub use crate::config::ManipulationConfig;
pub use crate::error::ManipulationError;
pub use crate::manipulation::{
    crop, crop_image, distort, distort_image, ManipulationOutput, OutputEncoding,
};
pub use crate::sink::{DisplaySink, ImageSlot, StreamProducer};
