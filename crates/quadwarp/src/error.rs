use quadwarp_imgproc::ImgprocError;
use quadwarp_io::IoError;

/// An error type for the crop and distort operations.
#[derive(thiserror::Error, Debug)]
pub enum ManipulationError {
    /// A quad is degenerate or a region is malformed.
    #[error("Invalid geometry: {0}")]
    InvalidGeometry(String),

    /// A sample lies outside the source image.
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

    /// The source, or the downscaled working copy, has no pixels.
    #[error("Image is empty ({0}x{1})")]
    EmptyInput(usize, usize),

    /// The scaling factor is zero, negative or not finite, or the scaled image would not fit
    /// in memory.
    #[error("Invalid scaling factor: {0}")]
    InvalidScalingFactor(f64),

    /// The encoder quality is above 100.
    #[error("Invalid quality: {0}, expected 0..=100")]
    InvalidQuality(u8),

    /// Error coming from the image processing routines.
    #[error(transparent)]
    Imgproc(ImgprocError),

    /// Error coming from the encoder.
    #[error(transparent)]
    Io(#[from] IoError),

    /// Error parsing the configuration.
    #[error("Failed to parse the configuration. {0}")]
    Config(#[from] serde_json::Error),
}

impl From<ImgprocError> for ManipulationError {
    fn from(e: ImgprocError) -> Self {
        match e {
            ImgprocError::InvalidGeometry(msg) => ManipulationError::InvalidGeometry(msg),
            ImgprocError::OutOfBounds {
                x,
                y,
                width,
                height,
            } => ManipulationError::OutOfBounds {
                x,
                y,
                width,
                height,
            },
            ImgprocError::EmptyInput(w, h) => ManipulationError::EmptyInput(w, h),
            ImgprocError::InvalidScalingFactor(f) => ManipulationError::InvalidScalingFactor(f),
            e => ManipulationError::Imgproc(e),
        }
    }
}

impl From<quadwarp_image::ImageError> for ManipulationError {
    fn from(e: quadwarp_image::ImageError) -> Self {
        ManipulationError::Imgproc(ImgprocError::Image(e))
    }
}
