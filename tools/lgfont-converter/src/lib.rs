//! Tool for converting the large font strip image into the [`PackedFont`] blob loaded by the
//! display code.
//!
//! The strip holds all [`GLYPH_COUNT`] glyphs side by side in a single row of
//! [`GLYPH_WIDTH`] by [`GLYPH_HEIGHT`] pixel cells.

use core::{error, fmt};
use std::path::Path;

use anyhow::{Context, Result};
use lgfont::{
    GLYPH_COUNT, GLYPH_HEIGHT, GLYPH_WIDTH, PACKED_FONT_SIZE,
    glyph::{PackedFont, PackedFontBuf},
};
use tempfile::NamedTempFile;
use tracing::{info, trace};

pub mod source;

pub use source::{LuminanceSource, RawRaster, SampleError, load_source};

/// The required width of the strip image in pixels.
pub const SOURCE_WIDTH: u32 = GLYPH_COUNT as u32 * GLYPH_WIDTH as u32;

/// The required height of the strip image in pixels.
pub const SOURCE_HEIGHT: u32 = GLYPH_HEIGHT as u32;

/// The only luminance treated as background. Every other value is foreground.
pub const BACKGROUND_LUMINANCE: u8 = u8::MAX;

/// Packs the strip `image` into a [`PackedFontBuf`].
///
/// Glyph `c` is read from the cell starting at column `c * 8`. Row `r` of that glyph becomes byte
/// `c * 7 + r` of the result, with the leftmost pixel in the most significant bit.
///
/// # Errors
///
/// - [`ConvertError::Shape`]: Returned if `image` is not [`SOURCE_WIDTH`] by [`SOURCE_HEIGHT`]
///   pixels.
/// - [`ConvertError::Sample`]: Returned if any pixel of `image` cannot be read.
pub fn convert<S: LuminanceSource + ?Sized>(image: &S) -> Result<PackedFontBuf, ConvertError> {
    let (width, height) = image.dimensions();
    if width != SOURCE_WIDTH || height != SOURCE_HEIGHT {
        return Err(ShapeError { width, height }.into());
    }

    let mut buffer = [0; PACKED_FONT_SIZE];
    let glyphs = buffer.chunks_exact_mut(usize::from(GLYPH_HEIGHT));
    for (c, glyph) in (0..GLYPH_COUNT).zip(glyphs) {
        for (row, byte) in (0..GLYPH_HEIGHT).zip(glyph.iter_mut()) {
            *byte = pack_row(image, c, row)?;
        }

        trace!(glyph = c, rows = ?glyph, "packed glyph");
    }

    Ok(PackedFontBuf::new(buffer))
}

/// Returns `true` if a pixel with `luminance` is part of a glyph.
///
/// Only [`BACKGROUND_LUMINANCE`] is background, so grey values are drawn.
pub const fn is_foreground(luminance: u8) -> bool {
    luminance != BACKGROUND_LUMINANCE
}

/// Packs `row` of glyph `c` into a single byte, leftmost pixel first.
fn pack_row<S: LuminanceSource + ?Sized>(image: &S, c: u16, row: u8) -> Result<u8, SampleError> {
    let left = u32::from(c) * u32::from(GLYPH_WIDTH);
    let y = u32::from(row);

    let mut accumulator = 0u8;
    for bit in 0..u32::from(GLYPH_WIDTH) {
        let luminance = image.luminance(left + bit, y)?;
        accumulator = (accumulator << 1) | u8::from(is_foreground(luminance));
    }

    Ok(accumulator)
}

/// Writes `font` to `path`.
///
/// The font is written to a temporary file next to `path` which then replaces `path`, so a
/// failure never leaves a partially written font behind.
///
/// # Errors
///
/// Returns an error if the temporary file cannot be created, written or moved into place.
pub fn write_font(path: &Path, font: PackedFont<'_>) -> Result<()> {
    let directory = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut file = NamedTempFile::new_in(directory)
        .with_context(|| format!("error creating temporary file in {}", directory.display()))?;
    font.dump(&mut file)
        .with_context(|| format!("error writing {}", file.path().display()))?;
    file.as_file()
        .sync_all()
        .with_context(|| format!("error syncing {}", file.path().display()))?;
    file.persist(path)
        .with_context(|| format!("error persisting font to {}", path.display()))?;

    Ok(())
}

/// Converts the strip image at `input` and writes the packed font to `output`.
///
/// `output` is left untouched if `input` cannot be loaded or converted.
///
/// # Errors
///
/// Returns an error if `input` cannot be decoded, fails to convert or `output` cannot be written.
pub fn convert_file(input: &Path, output: &Path) -> Result<PackedFontBuf> {
    let image = load_source(input)?;
    let font = convert(&image).with_context(|| format!("error converting {}", input.display()))?;
    write_font(output, font.as_font())?;

    info!(
        input = %input.display(),
        output = %output.display(),
        "wrote packed font"
    );
    Ok(font)
}

/// Various errors that can occur while packing a strip image.
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq)]
pub enum ConvertError {
    /// The image does not have the dimensions of the strip.
    Shape(ShapeError),
    /// A pixel of the image could not be read.
    Sample(SampleError),
}

impl From<ShapeError> for ConvertError {
    fn from(value: ShapeError) -> Self {
        Self::Shape(value)
    }
}

impl From<SampleError> for ConvertError {
    fn from(value: SampleError) -> Self {
        Self::Sample(value)
    }
}

impl fmt::Display for ConvertError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Shape(error) => write!(f, "invalid image shape: {error}"),
            Self::Sample(error) => write!(f, "invalid image data: {error}"),
        }
    }
}

impl error::Error for ConvertError {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match self {
            Self::Shape(error) => Some(error),
            Self::Sample(error) => Some(error),
        }
    }
}

/// The image handed to [`convert`] is not [`SOURCE_WIDTH`] by [`SOURCE_HEIGHT`] pixels.
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq)]
pub struct ShapeError {
    /// The width of the rejected image.
    pub width: u32,
    /// The height of the rejected image.
    pub height: u32,
}

impl fmt::Display for ShapeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "expected {SOURCE_WIDTH}x{SOURCE_HEIGHT} pixels but got {}x{} pixels",
            self.width, self.height
        )
    }
}

impl error::Error for ShapeError {}
