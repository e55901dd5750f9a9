//! The clamps here are a loose safety envelope, not a validation: they pull obviously
//! out-of-range values back towards the image and leave everything else (including NaN) for
//! the operations to reject.

use quadwarp_image::{ImageSize, Point2, Size2};
use quadwarp_imgproc::warp::Quad;

fn at_least(v: f64, min: f64) -> f64 {
    if v < min {
        min
    } else {
        v
    }
}

fn at_most(v: f64, max: f64) -> f64 {
    if v > max {
        max
    } else {
        v
    }
}

/// Clamp a crop request against the image it applies to.
///
/// The start is clamped to be non-negative and the size to not exceed the image size. The
/// size is compared with the full image, independently of the start.
///
/// # Example
///
/// ```
/// use quadwarp::normalize::normalize_crop;
/// use quadwarp::image::{ImageSize, Point2, Size2};
///
/// let (start, size) = normalize_crop(
///     ImageSize { width: 4, height: 4 },
///     Point2::new(-1.0, 2.0),
///     Size2::new(10.0, 1.0),
/// );
///
/// assert_eq!(start, Point2::new(0.0, 2.0));
/// assert_eq!(size, Size2::new(4.0, 1.0));
/// ```
pub fn normalize_crop(image: ImageSize, start: Point2, size: Size2) -> (Point2, Size2) {
    let start = Point2::new(at_least(start.x, 0.0), at_least(start.y, 0.0));
    let size = Size2::new(
        at_most(size.width, image.width as f64),
        at_most(size.height, image.height as f64),
    );
    (start, size)
}

/// Whether a normalized crop request covers the whole image.
pub fn is_crop_identity(image: ImageSize, start: Point2, size: Size2) -> bool {
    start.x == 0.0
        && start.y == 0.0
        && size.width == image.width as f64
        && size.height == image.height as f64
}

/// Clamp the corners of a source quad towards the image.
///
/// Each corner is only clamped on the sides of the image it faces: the upper-left corner is
/// kept non-negative, the lower-right corner within the width and height, the upper-right
/// corner non-negative in y and within the width, the lower-left corner non-negative in x and
/// within the height. Corners are not checked against each other.
pub fn normalize_quad(quad: &Quad, image: ImageSize) -> Quad {
    let (w, h) = (image.width as f64, image.height as f64);
    let (ul, ur, ll, lr) = (
        quad.upper_left,
        quad.upper_right,
        quad.lower_left,
        quad.lower_right,
    );

    Quad::new(
        Point2::new(at_least(ul.x, 0.0), at_least(ul.y, 0.0)),
        Point2::new(at_most(ur.x, w), at_least(ur.y, 0.0)),
        Point2::new(at_least(ll.x, 0.0), at_most(ll.y, h)),
        Point2::new(at_most(lr.x, w), at_most(lr.y, h)),
    )
}

/// Whether a distortion leaves the image untouched.
///
/// Known quirk, kept for compatibility with existing callers: the upper-right `y` of `from` is
/// compared with the upper-left `y` of `to`, and the upper-left `y` of `from` is never
/// compared. Quads differing only in the `y` of the source upper-left corner are therefore
/// reported as an identity, while `from == to` with a slanted top edge is not.
pub fn is_distort_identity(from: &Quad, to: &Quad) -> bool {
    from.upper_left.x == to.upper_left.x
        && from.upper_right.y == to.upper_left.y
        && from.upper_right.x == to.upper_right.x
        && from.upper_right.y == to.upper_right.y
        && from.lower_left.x == to.lower_left.x
        && from.lower_left.y == to.lower_left.y
        && from.lower_right.x == to.lower_right.x
        && from.lower_right.y == to.lower_right.y
}
