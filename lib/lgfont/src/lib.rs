//! Defines the layout of the packed large font blob consumed by the display code.
//!
//! Includes both read-only and writable interfaces.
#![cfg_attr(not(feature = "std"), no_std)]

pub mod glyph;

/// The number of glyphs stored in a packed font.
pub const GLYPH_COUNT: u16 = 256;

/// The width of each glyph in pixels. Each row of a glyph is stored in a single byte.
pub const GLYPH_WIDTH: u8 = 8;

/// The height of each glyph in pixels.
pub const GLYPH_HEIGHT: u8 = 7;

/// The size in bytes of a packed font.
pub const PACKED_FONT_SIZE: usize = GLYPH_COUNT as usize * GLYPH_HEIGHT as usize;
