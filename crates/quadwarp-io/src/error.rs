/// An error type for the io module.
#[derive(thiserror::Error, Debug)]
pub enum IoError {
    /// Error to encode the JPEG image.
    #[error("Error with Jpeg encoding. {0}")]
    JpegEncodingError(#[from] jpeg_encoder::EncodingError),

    /// Error to encode the PNG image.
    #[error("Failed to encode the png image. {0}")]
    PngEncodingError(String),

    /// Error to encode the WEBP image.
    #[error("Failed to encode the webp image. {0}")]
    WebpEncodingError(String),

    /// Error to create the image.
    #[error("Failed to create image. {0}")]
    ImageCreationError(#[from] quadwarp_image::ImageError),

    /// The image has no pixels.
    #[error("Cannot encode an empty image ({0}x{1})")]
    EmptyImage(usize, usize),

    /// The image exceeds the limits of the target format.
    #[error("Image ({0}x{1}) is too large for the {2} format")]
    ImageTooLarge(usize, usize, &'static str),
}
