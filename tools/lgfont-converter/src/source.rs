//! Rasters that can be read as per-pixel luminance and packed into a font.

use core::{error, fmt};
use std::path::Path;

use anyhow::{Context, Result};
use image::{GrayImage, ImageReader};
use tracing::debug;

/// A raster whose pixels can each be read as a single luminance value in `0..=255`.
pub trait LuminanceSource {
    /// Returns the `(width, height)` of the raster in pixels.
    fn dimensions(&self) -> (u32, u32);

    /// Returns the luminance of the pixel at `(x, y)`.
    ///
    /// # Errors
    ///
    /// Returns [`SampleError`] if the pixel cannot be read.
    fn luminance(&self, x: u32, y: u32) -> Result<u8, SampleError>;
}

impl LuminanceSource for GrayImage {
    fn dimensions(&self) -> (u32, u32) {
        (self.width(), self.height())
    }

    fn luminance(&self, x: u32, y: u32) -> Result<u8, SampleError> {
        self.get_pixel_checked(x, y)
            .map(|pixel| pixel.0[0])
            .ok_or(SampleError { x, y })
    }
}

/// Row-major luminance samples with a declared geometry.
///
/// The sample slice is not checked against the declared geometry up front: reading a sample past
/// the end of a truncated slice produces a [`SampleError`].
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq)]
pub struct RawRaster<'samples> {
    /// The declared width of the raster.
    width: u32,
    /// The declared height of the raster.
    height: u32,
    /// The luminance samples, one byte per pixel.
    samples: &'samples [u8],
}

impl<'samples> RawRaster<'samples> {
    /// Creates a new [`RawRaster`] of `width` by `height` pixels backed by `samples`.
    pub const fn new(width: u32, height: u32, samples: &'samples [u8]) -> Self {
        Self {
            width,
            height,
            samples,
        }
    }
}

impl LuminanceSource for RawRaster<'_> {
    fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn luminance(&self, x: u32, y: u32) -> Result<u8, SampleError> {
        if x >= self.width || y >= self.height {
            return Err(SampleError { x, y });
        }

        let index = u64::from(y) * u64::from(self.width) + u64::from(x);
        usize::try_from(index)
            .ok()
            .and_then(|index| self.samples.get(index))
            .copied()
            .ok_or(SampleError { x, y })
    }
}

/// Decodes the image at `path` and projects it onto 8-bit luminance.
///
/// The image format is guessed from the file contents.
///
/// # Errors
///
/// Returns an error if `path` cannot be read or does not hold a decodable image.
pub fn load_source(path: &Path) -> Result<GrayImage> {
    let image = ImageReader::open(path)
        .with_context(|| format!("error opening {}", path.display()))?
        .with_guessed_format()
        .with_context(|| format!("error reading {}", path.display()))?
        .decode()
        .with_context(|| format!("error decoding {}", path.display()))?;

    let color = image.color();
    let image = image.into_luma8();
    debug!(
        path = %path.display(),
        width = image.width(),
        height = image.height(),
        ?color,
        "decoded source image"
    );
    Ok(image)
}

/// A pixel could not be read as a luminance sample.
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq)]
pub struct SampleError {
    /// The column of the unreadable pixel.
    pub x: u32,
    /// The row of the unreadable pixel.
    pub y: u32,
}

impl fmt::Display for SampleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "pixel ({}, {}) could not be read", self.x, self.y)
    }
}

impl error::Error for SampleError {}

#[cfg(test)]
mod test {
    use image::{GrayImage, Luma};

    use super::{LuminanceSource, RawRaster, SampleError};

    #[test]
    fn gray_image_reads_samples() {
        let mut image = GrayImage::from_pixel(4, 2, Luma([255]));
        image.put_pixel(3, 1, Luma([17]));

        assert_eq!(LuminanceSource::dimensions(&image), (4, 2));
        assert_eq!(image.luminance(0, 0), Ok(255));
        assert_eq!(image.luminance(3, 1), Ok(17));
        assert_eq!(image.luminance(4, 0), Err(SampleError { x: 4, y: 0 }));
        assert_eq!(image.luminance(0, 2), Err(SampleError { x: 0, y: 2 }));
    }

    #[test]
    fn raw_raster_is_row_major() {
        let samples: [u8; 6] = [0, 1, 2, 3, 4, 5];
        let raster = RawRaster::new(3, 2, &samples);

        assert_eq!(raster.dimensions(), (3, 2));
        assert_eq!(raster.luminance(2, 0), Ok(2));
        assert_eq!(raster.luminance(0, 1), Ok(3));
        assert_eq!(raster.luminance(3, 0), Err(SampleError { x: 3, y: 0 }));
    }

    #[test]
    fn raw_raster_rejects_truncated_samples() {
        let samples: [u8; 4] = [0, 1, 2, 3];
        let raster = RawRaster::new(3, 2, &samples);

        assert_eq!(raster.luminance(0, 1), Ok(3));
        assert_eq!(raster.luminance(1, 1), Err(SampleError { x: 1, y: 1 }));
    }
}
