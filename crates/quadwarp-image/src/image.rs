use crate::error::ImageError;

/// Image size in pixels
///
/// A struct to represent the size of an image in pixels.
///
/// # Examples
///
/// ```
/// use quadwarp_image::ImageSize;
///
/// let image_size = ImageSize {
///   width: 10,
///   height: 20,
/// };
///
/// assert_eq!(image_size.width, 10);
/// assert_eq!(image_size.height, 20);
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ImageSize {
    /// Width of the image in pixels
    pub width: usize,
    /// Height of the image in pixels
    pub height: usize,
}

impl ImageSize {
    /// Whether the size covers no pixels at all.
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Number of values held by an image of this size with `channels` values per pixel.
    ///
    /// Returns `None` if the count overflows `usize`.
    pub fn checked_len(&self, channels: usize) -> Option<usize> {
        self.width.checked_mul(self.height)?.checked_mul(channels)
    }
}

impl std::fmt::Display for ImageSize {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

impl From<[usize; 2]> for ImageSize {
    fn from(size: [usize; 2]) -> Self {
        ImageSize {
            width: size[0],
            height: size[1],
        }
    }
}

/// Represents an image with pixel data.
///
/// The pixels are stored row-major, `CHANNELS` interleaved values per pixel, so the
/// buffer length is always `width * height * CHANNELS`.
#[derive(Clone, Debug, PartialEq)]
pub struct Image<T, const CHANNELS: usize> {
    size: ImageSize,
    data: Vec<T>,
}

/// An 8-bit image with the channels laid out as blue, green, red, alpha.
pub type Bgra8 = Image<u8, 4>;

impl<T, const CHANNELS: usize> Image<T, CHANNELS> {
    /// Create a new image from pixel data.
    ///
    /// # Arguments
    ///
    /// * `size` - The size of the image in pixels.
    /// * `data` - The pixel data of the image.
    ///
    /// # Errors
    ///
    /// If the length of the pixel data does not match the image size, an error is returned.
    ///
    /// # Examples
    ///
    /// ```
    /// use quadwarp_image::{Image, ImageSize};
    ///
    /// let image = Image::<u8, 4>::new(
    ///     ImageSize {
    ///         width: 10,
    ///         height: 20,
    ///     },
    ///     vec![0u8; 10 * 20 * 4],
    /// ).unwrap();
    ///
    /// assert_eq!(image.size().width, 10);
    /// assert_eq!(image.size().height, 20);
    /// assert_eq!(image.num_channels(), 4);
    /// ```
    pub fn new(size: ImageSize, data: Vec<T>) -> Result<Self, ImageError> {
        let expected = Self::data_len(size)?;
        if data.len() != expected {
            return Err(ImageError::InvalidChannelShape(data.len(), expected));
        }

        Ok(Self { size, data })
    }

    /// Create a new image with the given size and every value set to `val`.
    ///
    /// # Examples
    ///
    /// ```
    /// use quadwarp_image::{Bgra8, ImageSize};
    ///
    /// let image = Bgra8::from_size_val(ImageSize { width: 3, height: 2 }, 0u8).unwrap();
    /// assert_eq!(image.as_slice().len(), 3 * 2 * 4);
    /// ```
    pub fn from_size_val(size: ImageSize, val: T) -> Result<Self, ImageError>
    where
        T: Clone,
    {
        let mut data = Self::alloc(size)?;
        data.resize(Self::data_len(size)?, val);
        Image::new(size, data)
    }

    /// Create an image whose pixels all equal `pixel`.
    pub fn from_size_pixel(size: ImageSize, pixel: [T; CHANNELS]) -> Result<Self, ImageError>
    where
        T: Clone,
    {
        let mut data = Self::alloc(size)?;
        for _ in 0..size.width * size.height {
            data.extend_from_slice(&pixel);
        }
        Image::new(size, data)
    }

    fn data_len(size: ImageSize) -> Result<usize, ImageError> {
        size.checked_len(CHANNELS).ok_or(ImageError::ImageSizeOverflow(
            size.width,
            size.height,
            CHANNELS,
        ))
    }

    // empty buffer with room for exactly the pixels of `size`
    fn alloc(size: ImageSize) -> Result<Vec<T>, ImageError> {
        let len = Self::data_len(size)?;
        let mut data = Vec::new();
        data.try_reserve_exact(len).map_err(|_| ImageError::AllocationFailed(len))?;
        Ok(data)
    }

    /// Get the size of the image in pixels.
    pub fn size(&self) -> ImageSize {
        self.size
    }

    /// Get the number of columns of the image.
    pub fn cols(&self) -> usize {
        self.size.width
    }

    /// Get the number of rows of the image.
    pub fn rows(&self) -> usize {
        self.size.height
    }

    /// Get the width of the image in pixels.
    pub fn width(&self) -> usize {
        self.size.width
    }

    /// Get the height of the image in pixels.
    pub fn height(&self) -> usize {
        self.size.height
    }

    /// Get the number of channels in the image.
    pub fn num_channels(&self) -> usize {
        CHANNELS
    }

    /// The raw pixel data.
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    /// The raw pixel data, mutably.
    pub fn as_slice_mut(&mut self) -> &mut [T] {
        &mut self.data
    }

    /// Consume the image and return its pixel data.
    pub fn into_vec(self) -> Vec<T> {
        self.data
    }

    fn offset(&self, x: usize, y: usize) -> Result<usize, ImageError> {
        if x >= self.size.width || y >= self.size.height {
            return Err(ImageError::PixelIndexOutOfBounds(
                x,
                y,
                self.size.width,
                self.size.height,
            ));
        }
        Ok((y * self.size.width + x) * CHANNELS)
    }

    /// Get the channel values of the pixel at `(x, y)`.
    ///
    /// # Errors
    ///
    /// Returns [`ImageError::PixelIndexOutOfBounds`] if the coordinates fall outside the image.
    pub fn get_pixel(&self, x: usize, y: usize) -> Result<&[T], ImageError> {
        let offset = self.offset(x, y)?;
        Ok(&self.data[offset..offset + CHANNELS])
    }

    /// Overwrite the pixel at `(x, y)`.
    ///
    /// # Errors
    ///
    /// Returns [`ImageError::PixelIndexOutOfBounds`] if the coordinates fall outside the image.
    pub fn set_pixel(&mut self, x: usize, y: usize, pixel: &[T; CHANNELS]) -> Result<(), ImageError>
    where
        T: Copy,
    {
        let offset = self.offset(x, y)?;
        self.data[offset..offset + CHANNELS].copy_from_slice(pixel);
        Ok(())
    }
}
