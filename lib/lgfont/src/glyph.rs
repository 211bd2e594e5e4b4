//! Interface for interacting with the glyphs of a packed font.

use core::{error, fmt, slice};
#[cfg(feature = "std")]
use std::io::{self, Write};

use crate::{GLYPH_COUNT, GLYPH_HEIGHT, GLYPH_WIDTH, PACKED_FONT_SIZE};

/// The number of bytes making up a single [`Glyph`].
const GLYPH_BYTE_COUNT: usize = GLYPH_HEIGHT as usize;

/// A packed font of [`GLYPH_COUNT`] [`Glyph`]s, stored character-major with one byte per row.
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct PackedFont<'buffer> {
    /// The buffer that contains the glyph data.
    buffer: &'buffer [u8; PACKED_FONT_SIZE],
}

impl<'buffer> PackedFont<'buffer> {
    /// Creates a new [`PackedFont`].
    pub const fn new(buffer: &'buffer [u8; PACKED_FONT_SIZE]) -> Self {
        Self { buffer }
    }

    /// Creates a new [`PackedFont`] from a dumped blob.
    ///
    /// # Errors
    ///
    /// Returns [`SizeMismatchError`] if `dump` is not exactly [`PACKED_FONT_SIZE`] bytes long.
    pub fn from_bytes(dump: &'buffer [u8]) -> Result<Self, SizeMismatchError> {
        let buffer = <&[u8; PACKED_FONT_SIZE]>::try_from(dump).map_err(|_| SizeMismatchError {
            actual_size: dump.len(),
        })?;

        Ok(Self { buffer })
    }

    /// Returns the [`Glyph`] drawn for the character `c`.
    pub fn glyph(&self, c: u8) -> Glyph<'buffer> {
        let buffer: &'buffer [u8; PACKED_FONT_SIZE] = self.buffer;
        let start = usize::from(c) * GLYPH_BYTE_COUNT;

        Glyph {
            index: c,
            rows: &buffer[start..start + GLYPH_BYTE_COUNT],
        }
    }

    /// Returns an [`Iterator`] over every [`Glyph`] in character order.
    pub const fn glyphs(&self) -> GlyphIter<'buffer> {
        GlyphIter {
            font: *self,
            index: 0,
        }
    }

    /// Returns the raw bytes of the [`PackedFont`].
    pub const fn as_bytes(&self) -> &'buffer [u8; PACKED_FONT_SIZE] {
        self.buffer
    }

    /// Dumps the [`PackedFont`] into the `writer`.
    ///
    /// The dump carries no header: consumers know the geometry out of band.
    ///
    /// # Errors
    ///
    /// Returns any error produced while writing to `writer`.
    #[cfg(feature = "std")]
    pub fn dump<W: Write>(&self, mut writer: W) -> io::Result<()> {
        writer.write_all(self.buffer)
    }
}

/// An [`Iterator`] over the [`Glyph`]s of a [`PackedFont`].
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct GlyphIter<'buffer> {
    /// The font being iterated over.
    font: PackedFont<'buffer>,
    /// The index of the glyph that will be returned next.
    index: u16,
}

impl<'buffer> Iterator for GlyphIter<'buffer> {
    type Item = Glyph<'buffer>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.index >= GLYPH_COUNT {
            return None;
        }

        let c = u8::try_from(self.index).ok()?;
        self.index += 1;
        Some(self.font.glyph(c))
    }
}

/// Owned storage for a [`PackedFont`].
#[cfg(feature = "std")]
#[derive(Clone, Debug, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct PackedFontBuf {
    /// The buffer that contains the glyph data.
    buffer: Box<[u8; PACKED_FONT_SIZE]>,
}

#[cfg(feature = "std")]
impl PackedFontBuf {
    /// Creates a new [`PackedFontBuf`] taking ownership of `buffer`.
    pub fn new(buffer: [u8; PACKED_FONT_SIZE]) -> Self {
        Self {
            buffer: Box::new(buffer),
        }
    }

    /// Returns a [`PackedFont`] view of the buffer.
    pub fn as_font(&self) -> PackedFont<'_> {
        PackedFont::new(&self.buffer)
    }

    /// Returns the underlying buffer.
    pub fn into_inner(self) -> Box<[u8; PACKED_FONT_SIZE]> {
        self.buffer
    }
}

/// Stores the on/off layout of a specific glyph in a [`PackedFont`].
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct Glyph<'buffer> {
    /// The character the glyph is drawn for.
    index: u8,
    /// The rows of the glyph, top to bottom.
    rows: &'buffer [u8],
}

impl<'buffer> Glyph<'buffer> {
    /// Returns the character the [`Glyph`] is drawn for.
    pub const fn index(&self) -> u8 {
        self.index
    }

    /// Returns the packed rows of the [`Glyph`], top to bottom.
    pub const fn rows(&self) -> &'buffer [u8] {
        self.rows
    }

    /// Returns the [`GlyphRow`] at `row` or `None` if out of bounds.
    pub fn row(&self, row: u8) -> Option<GlyphRow> {
        self.rows.get(usize::from(row)).copied().map(GlyphRow::new)
    }
}

impl<'buffer> IntoIterator for Glyph<'buffer> {
    type IntoIter = GlyphRowsIter<'buffer>;
    type Item = GlyphRow;

    fn into_iter(self) -> Self::IntoIter {
        GlyphRowsIter {
            rows: self.rows.iter(),
        }
    }
}

impl fmt::Display for Glyph<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in *self {
            for pixel in row {
                f.write_str(if pixel { "#" } else { "." })?;
            }
            f.write_str("\n")?;
        }

        Ok(())
    }
}

/// An [`Iterator`] over the rows of a [`Glyph`].
#[derive(Clone, Debug)]
pub struct GlyphRowsIter<'buffer> {
    /// The rows that have not been returned yet.
    rows: slice::Iter<'buffer, u8>,
}

impl Iterator for GlyphRowsIter<'_> {
    type Item = GlyphRow;

    fn next(&mut self) -> Option<Self::Item> {
        self.rows.next().copied().map(GlyphRow::new)
    }
}

/// A row in the [`Glyph`]. The leftmost pixel is stored in the most significant bit.
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct GlyphRow {
    /// The packed pixels of the row.
    bits: u8,
}

impl GlyphRow {
    /// Creates a new [`GlyphRow`] from its packed byte.
    pub const fn new(bits: u8) -> Self {
        Self { bits }
    }

    /// Returns the packed byte of the [`GlyphRow`].
    pub const fn bits(&self) -> u8 {
        self.bits
    }

    /// Returns whether the pixel at `column` is set, or `None` if out of bounds.
    pub const fn pixel(&self, column: u8) -> Option<bool> {
        if column >= GLYPH_WIDTH {
            return None;
        }

        Some((self.bits >> (GLYPH_WIDTH - 1 - column)) & 0b1 == 0b1)
    }
}

impl IntoIterator for GlyphRow {
    type Item = bool;
    type IntoIter = GlyphRowIter;

    fn into_iter(self) -> Self::IntoIter {
        GlyphRowIter {
            row: self,
            index: 0,
        }
    }
}

/// An [`Iterator`] over the pixels in a [`GlyphRow`], left to right.
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct GlyphRowIter {
    /// The row being iterated over.
    row: GlyphRow,
    /// The index of the pixel value to be returned.
    index: u8,
}

impl Iterator for GlyphRowIter {
    type Item = bool;

    fn next(&mut self) -> Option<Self::Item> {
        let pixel = self.row.pixel(self.index)?;
        self.index += 1;
        Some(pixel)
    }
}

/// The blob handed to [`PackedFont::from_bytes`] was not [`PACKED_FONT_SIZE`] bytes long.
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq)]
pub struct SizeMismatchError {
    /// The length of the rejected blob.
    pub actual_size: usize,
}

impl fmt::Display for SizeMismatchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "packed font is {} bytes but expected {PACKED_FONT_SIZE} bytes",
            self.actual_size
        )
    }
}

impl error::Error for SizeMismatchError {}

#[cfg(test)]
mod test {
    extern crate std;

    use std::{string::ToString, vec, vec::Vec};

    use super::{GlyphRow, PackedFont, SizeMismatchError};
    use crate::PACKED_FONT_SIZE;

    /// Builds a blob where every byte holds its own index, truncated to a `u8`.
    fn counting_blob() -> [u8; PACKED_FONT_SIZE] {
        core::array::from_fn(|index| u8::try_from(index % 256).unwrap())
    }

    #[test]
    fn from_bytes_rejects_wrong_sizes() {
        for size in [0, 1, PACKED_FONT_SIZE - 1, PACKED_FONT_SIZE + 1, 2048] {
            let blob = vec![0u8; size];
            assert_eq!(
                PackedFont::from_bytes(&blob),
                Err(SizeMismatchError { actual_size: size })
            );
        }

        let blob = counting_blob();
        let font = PackedFont::from_bytes(&blob).unwrap();
        assert_eq!(font.as_bytes(), &blob);
    }

    #[test]
    fn glyph_rows_are_character_major() {
        let blob = counting_blob();
        let font = PackedFont::new(&blob);

        assert_eq!(font.glyph(0).rows(), &[0, 1, 2, 3, 4, 5, 6]);
        assert_eq!(font.glyph(5).rows(), &[35, 36, 37, 38, 39, 40, 41]);

        // Glyph 255 covers bytes 1785..1792.
        let last = font.glyph(255);
        assert_eq!(last.index(), 255);
        assert_eq!(last.rows(), &blob[1785..]);
        assert_eq!(last.row(6), Some(GlyphRow::new(blob[1791])));
        assert_eq!(last.row(7), None);
    }

    #[test]
    fn glyphs_visits_every_character_in_order() {
        let blob = counting_blob();
        let font = PackedFont::new(&blob);

        let indices = font.glyphs().map(|glyph| glyph.index()).collect::<Vec<_>>();
        assert_eq!(indices.len(), 256);
        assert!(indices.iter().copied().eq(0..=u8::MAX));

        let rows = font
            .glyphs()
            .flat_map(|glyph| glyph.rows().iter().copied())
            .collect::<Vec<_>>();
        assert_eq!(rows, blob);
    }

    #[test]
    fn row_pixels_are_msb_first() {
        let leftmost = GlyphRow::new(0x80).into_iter().collect::<Vec<_>>();
        assert_eq!(
            leftmost,
            [true, false, false, false, false, false, false, false]
        );

        let rightmost = GlyphRow::new(0x01).into_iter().collect::<Vec<_>>();
        assert_eq!(
            rightmost,
            [false, false, false, false, false, false, false, true]
        );

        let row = GlyphRow::new(0b1010_1010);
        assert_eq!(row.pixel(0), Some(true));
        assert_eq!(row.pixel(1), Some(false));
        assert_eq!(row.pixel(7), Some(false));
        assert_eq!(row.pixel(8), None);
    }

    #[test]
    fn glyph_display_draws_rows() {
        let mut blob = [0u8; PACKED_FONT_SIZE];
        blob[7..14].copy_from_slice(&[0xFF, 0x81, 0x00, 0xAA, 0x00, 0x81, 0xFF]);
        let font = PackedFont::new(&blob);

        let expected = "########\n\
                        #......#\n\
                        ........\n\
                        #.#.#.#.\n\
                        ........\n\
                        #......#\n\
                        ########\n";
        assert_eq!(font.glyph(1).to_string(), expected);
    }

    #[cfg(feature = "std")]
    #[test]
    fn dump_writes_raw_bytes() {
        use super::PackedFontBuf;

        let blob = counting_blob();
        let font = PackedFontBuf::new(blob);

        let mut dumped = Vec::new();
        font.as_font().dump(&mut dumped).unwrap();
        assert_eq!(dumped, blob);
        assert_eq!(*font.into_inner(), blob);
    }
}
