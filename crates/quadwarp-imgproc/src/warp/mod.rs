//! Four-corner perspective warps ("quad warps").
//!
//! A warp is described by two quadrilaterals: where four points sit in the source image and
//! where they should land in the destination. Both are related to the unit square through a
//! [`Matrix3`](crate::Matrix3), and the composition `from * to⁻¹` maps every destination pixel
//! back onto the source, so each destination pixel receives exactly one sample.
//!
//! # Examples
//!
//! ```
//! use quadwarp_image::{Bgra8, ImageSize, Point2};
//! use quadwarp_imgproc::warp::{quad_to_quad_matrix, warp_quad, Quad, SamplingPolicy};
//!
//! let src = Bgra8::from_size_pixel(ImageSize { width: 8, height: 8 }, [0, 0, 255, 255]).unwrap();
//! let mut dst = Bgra8::from_size_val(src.size(), 0).unwrap();
//!
//! let from = Quad::from_size(src.size());
//! let to = Quad::new(
//!     Point2::new(1.0, 0.0),
//!     Point2::new(7.0, 1.0),
//!     Point2::new(0.0, 8.0),
//!     Point2::new(8.0, 7.0),
//! );
//!
//! let m = quad_to_quad_matrix(&from, &to).unwrap();
//! warp_quad(&src, &mut dst, &m, SamplingPolicy::Clamp).unwrap();
//! ```

mod quad;

pub use quad::{quad_to_quad_matrix, warp_quad, Quad, SamplingPolicy};
