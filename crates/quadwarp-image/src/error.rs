/// An error type for the image module.
#[derive(thiserror::Error, Debug, PartialEq)]
pub enum ImageError {
    /// Error when channel and shape are not valid.
    #[error("Data length ({0}) does not match the image size ({1})")]
    InvalidChannelShape(usize, usize),

    /// Error when the pixel coordinates are out of bounds.
    #[error("Pixel coordinates ({0}, {1}) are out of bounds ({2}, {3})")]
    PixelIndexOutOfBounds(usize, usize, usize, usize),

    /// Error when the number of values of an image does not fit in memory indices.
    #[error("Image size {0}x{1} with {2} channels overflows")]
    ImageSizeOverflow(usize, usize, usize),

    /// Error when the pixel buffer could not be allocated.
    #[error("Failed to allocate {0} values for the image")]
    AllocationFailed(usize),

    /// Error when two images are expected to share the same size.
    #[error("Image size mismatch: ({0}, {1}) != ({2}, {3})")]
    InvalidImageSize(usize, usize, usize, usize),
}
