use quadwarp_image::ImageError;

/// An error type for the imgproc module.
#[derive(thiserror::Error, Debug, PartialEq)]
pub enum ImgprocError {
    /// The quadrilateral has no projective mapping or the matrix is singular.
    #[error("Invalid geometry: {0}")]
    InvalidGeometry(String),

    /// A computed sample coordinate lies outside the source image.
    #[error("Sample ({x}, {y}) is outside the source image ({width}x{height})")]
    OutOfBounds {
        /// Horizontal sample coordinate.
        x: i64,
        /// Vertical sample coordinate.
        y: i64,
        /// Width of the source image.
        width: usize,
        /// Height of the source image.
        height: usize,
    },

    /// The image has no pixels.
    #[error("Image is empty ({0}x{1})")]
    EmptyInput(usize, usize),

    /// The scaling factor is not positive, or the scaled image would not fit in memory.
    #[error("Invalid scaling factor: {0}")]
    InvalidScalingFactor(f64),

    /// The resampling backend rejected the images.
    #[error("Failed to resize the image. {0}")]
    Resize(String),

    /// Error coming from the image container.
    #[error(transparent)]
    Image(#[from] ImageError),
}
