use std::{borrow::Cow, time::Instant};

use log::{debug, info};
use quadwarp_image::{Bgra8, ImageError, ImageSize, Point2, Size2};
use quadwarp_imgproc::{
    crop::crop_image_inclusive,
    resize::{resize_bgra8, scaled_size},
    warp::{quad_to_quad_matrix, warp_quad, Quad},
};
use quadwarp_io::{encode_image_bgra8, EncodeFormat};

use crate::{
    config::ManipulationConfig,
    error::ManipulationError,
    normalize,
    sink::{self, DisplaySink},
};

/// How the bytes of a [`ManipulationOutput`] are laid out.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputEncoding {
    /// The request was an identity: the source BGRA pixels, not encoded.
    Raw,
    /// The result encoded with the configured format.
    Encoded(EncodeFormat),
}

/// The result of a crop or distortion.
#[derive(Clone, Debug, PartialEq)]
pub struct ManipulationOutput {
    /// The output bytes.
    pub bytes: Vec<u8>,
    /// Layout of `bytes`.
    pub encoding: OutputEncoding,
    /// Size of the image held by `bytes`.
    pub size: ImageSize,
}

impl ManipulationOutput {
    fn raw(src: &Bgra8) -> Self {
        Self {
            bytes: src.as_slice().to_vec(),
            encoding: OutputEncoding::Raw,
            size: src.size(),
        }
    }

    fn encode(image: &Bgra8, config: &ManipulationConfig) -> Result<Self, ManipulationError> {
        let t0 = Instant::now();
        let bytes = encode_image_bgra8(image, config.format, config.quality)?;
        debug!(
            "Encoding ({}, {}): {:?}",
            config.format,
            config.quality,
            t0.elapsed()
        );

        Ok(Self {
            bytes,
            encoding: OutputEncoding::Encoded(config.format),
            size: image.size(),
        })
    }

    /// Whether the bytes are the untouched source pixels.
    pub fn is_raw(&self) -> bool {
        self.encoding == OutputEncoding::Raw
    }
}

fn check_source(src: &Bgra8) -> Result<(), ManipulationError> {
    if src.size().is_empty() {
        return Err(ManipulationError::EmptyInput(src.width(), src.height()));
    }
    Ok(())
}

/// Crop a region of `src` without encoding it.
///
/// The region is clamped with [`normalize::normalize_crop`]. When it covers the whole image the
/// source is returned borrowed; otherwise the result is one pixel wider and taller than the
/// truncated region, see [`crop_image_inclusive`].
pub fn crop_image<'a>(
    src: &'a Bgra8,
    start: Point2,
    size: Size2,
    config: &ManipulationConfig,
) -> Result<Cow<'a, Bgra8>, ManipulationError> {
    config.validate()?;
    check_source(src)?;

    let (start, size) = normalize::normalize_crop(src.size(), start, size);
    if normalize::is_crop_identity(src.size(), start, size) {
        debug!("Crop covers the whole image ({}), skipping", src.size());
        return Ok(Cow::Borrowed(src));
    }

    let t0 = Instant::now();
    let cropped = crop_image_inclusive(src, start, size)?;
    debug!(
        "Cropping {} at ({}, {}) -> {}: {:?}",
        src.size(),
        start.x,
        start.y,
        cropped.size(),
        t0.elapsed()
    );

    Ok(Cow::Owned(cropped))
}

/// Crop a region of `src` and encode it.
///
/// When the clamped region covers the whole image the raw source bytes are returned without
/// encoding, flagged with [`OutputEncoding::Raw`].
///
/// # Errors
///
/// * [`ManipulationError::EmptyInput`] if `src` has no pixels.
/// * [`ManipulationError::InvalidGeometry`] if the region is negative or not finite.
/// * [`ManipulationError::OutOfBounds`] if the region reads outside `src`.
///
/// # Example
///
/// ```
/// use quadwarp::{crop, ManipulationConfig, OutputEncoding};
/// use quadwarp::image::{Bgra8, ImageSize, Point2, Size2};
/// use quadwarp::io::EncodeFormat;
///
/// let src = Bgra8::from_size_pixel(ImageSize { width: 4, height: 4 }, [255, 0, 0, 255]).unwrap();
/// let out = crop(&src, Point2::new(1.0, 1.0), Size2::new(2.0, 2.0), &ManipulationConfig::default()).unwrap();
///
/// assert_eq!(out.encoding, OutputEncoding::Encoded(EncodeFormat::Png));
/// assert_eq!(out.size, ImageSize { width: 3, height: 3 });
/// ```
pub fn crop(
    src: &Bgra8,
    start: Point2,
    size: Size2,
    config: &ManipulationConfig,
) -> Result<ManipulationOutput, ManipulationError> {
    match crop_image(src, start, size, config)? {
        Cow::Borrowed(src) => Ok(ManipulationOutput::raw(src)),
        Cow::Owned(cropped) => ManipulationOutput::encode(&cropped, config),
    }
}

/// Distort `src` so that the `from` quad lands on the `to` quad, without encoding.
///
/// The `from` corners are clamped with [`normalize::normalize_quad`]. Identity requests, as
/// decided by [`normalize::is_distort_identity`], return the source borrowed. With a scaling
/// factor other than one the source is first downscaled, both quads are scaled with it and the
/// `from` corners are clamped again against the smaller image; the result then has the
/// downscaled size.
pub fn distort_image<'a>(
    src: &'a Bgra8,
    from: &Quad,
    to: &Quad,
    config: &ManipulationConfig,
) -> Result<Cow<'a, Bgra8>, ManipulationError> {
    config.validate()?;
    check_source(src)?;

    let from = normalize::normalize_quad(from, src.size());
    if normalize::is_distort_identity(&from, to) {
        debug!("Distortion is an identity, skipping");
        return Ok(Cow::Borrowed(src));
    }

    let factor = config.scaling_factor;
    let (work, from, to) = if factor != 1.0 {
        let t0 = Instant::now();
        let new_size = scaled_size(src.size(), factor)?;
        info!(
            "Scale image (factor: {}): {} -> {}",
            factor,
            src.size(),
            new_size
        );
        if new_size.is_empty() {
            return Err(ManipulationError::EmptyInput(new_size.width, new_size.height));
        }

        let mut scaled = Bgra8::from_size_val(new_size, 0).map_err(|e| match e {
            ImageError::ImageSizeOverflow(..) | ImageError::AllocationFailed(_) => {
                ManipulationError::InvalidScalingFactor(factor)
            }
            e => e.into(),
        })?;
        resize_bgra8(src, &mut scaled)?;

        let from = normalize::normalize_quad(&from.scaled_down(factor), new_size);
        let to = to.scaled_down(factor);
        debug!("Scaling: {:?}", t0.elapsed());

        (Cow::Owned(scaled), from, to)
    } else {
        info!("No scaling applied (factor == 1.0)");
        (Cow::Borrowed(src), from, *to)
    };

    let t0 = Instant::now();
    let m = quad_to_quad_matrix(&from, &to)?;
    debug!("Creating matrices: {:?}", t0.elapsed());

    let t0 = Instant::now();
    let mut dst = Bgra8::from_size_val(work.size(), 0)?;
    warp_quad(&*work, &mut dst, &m, config.sampling)?;
    debug!("Setting the pixels ({}): {:?}", dst.size(), t0.elapsed());

    Ok(Cow::Owned(dst))
}

/// Distort `src` so that the `from` quad lands on the `to` quad and encode the result.
///
/// If a `sink` is given it receives a producer over the encoded bytes; the call does not wait
/// for the sink to read it. Identity requests return the raw source bytes and leave the sink
/// alone.
///
/// # Errors
///
/// * [`ManipulationError::EmptyInput`] if `src`, or its downscaled copy, has no pixels.
/// * [`ManipulationError::InvalidScalingFactor`] if the scaling factor is not positive, or so
///   small that the enlarged working copy cannot be allocated.
/// * [`ManipulationError::InvalidGeometry`] if a quad is degenerate.
/// * [`ManipulationError::OutOfBounds`] with strict sampling when a sample misses the source.
///
/// # Example
///
/// ```
/// use quadwarp::{distort, ImageSlot, ManipulationConfig};
/// use quadwarp::image::{Bgra8, ImageSize, Point2};
/// use quadwarp::imgproc::warp::Quad;
///
/// let src = Bgra8::from_size_pixel(ImageSize { width: 8, height: 8 }, [0, 255, 0, 255]).unwrap();
/// let from = Quad::from_size(src.size());
/// let to = Quad::new(
///     Point2::new(2.0, 0.0),
///     Point2::new(6.0, 0.0),
///     Point2::new(0.0, 8.0),
///     Point2::new(8.0, 8.0),
/// );
///
/// let mut slot = ImageSlot::new();
/// let out = distort(&src, &from, &to, &ManipulationConfig::default(), Some(&mut slot)).unwrap();
///
/// assert_eq!(slot.read_source().unwrap(), Some(out.bytes));
/// ```
pub fn distort(
    src: &Bgra8,
    from: &Quad,
    to: &Quad,
    config: &ManipulationConfig,
    sink: Option<&mut dyn DisplaySink>,
) -> Result<ManipulationOutput, ManipulationError> {
    let distorted = match distort_image(src, from, to, config)? {
        Cow::Borrowed(src) => return Ok(ManipulationOutput::raw(src)),
        Cow::Owned(distorted) => distorted,
    };

    let output = ManipulationOutput::encode(&distorted, config)?;

    if let Some(sink) = sink {
        let t0 = Instant::now();
        sink.set_source(sink::producer_from_bytes(output.bytes.clone()));
        debug!("Setting the image source: {:?}", t0.elapsed());
    }

    Ok(output)
}
