//! ECMA-10 tape geometry. Each pixel is 0.01".

use std::fmt;

use crate::error::TapeError;

/// Width and height of the square cell allotted to one hole position.
pub const BIT_CELL: usize = 100;
/// Diameter of a data-bit (feed) hole.
pub const FEED_HOLE_DIAMETER: usize = 72;
/// Diameter of the sprocket hole punched in every row.
pub const SPROCKET_HOLE_DIAMETER: usize = 46;
/// Blank tape between the edge and the first cell.
pub const LEFT_MARGIN: usize = 42;
/// The sprocket always sits in the fourth cell from the left edge.
pub const SPROCKET_SLOT: usize = 3;

const RIGHT_MARGIN_5: usize = 45;
const RIGHT_MARGIN_8: usize = 58;

/// The two physical tape formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TapeWidth {
    /// 11/16" Baudot/ITA2 tape.
    Level5,
    /// 1" tape used for ASCII and binary loaders.
    #[default]
    Level8,
}

impl TapeWidth {
    pub fn from_bits(bits: u32) -> Result<Self, TapeError> {
        match bits {
            5 => Ok(TapeWidth::Level5),
            8 => Ok(TapeWidth::Level8),
            other => Err(TapeError::UnsupportedWidth(other)),
        }
    }

    pub const fn data_bits(self) -> usize {
        match self {
            TapeWidth::Level5 => 5,
            TapeWidth::Level8 => 8,
        }
    }

    /// Bits of a row that are actually punched on this tape.
    pub const fn mask(self) -> u8 {
        match self {
            TapeWidth::Level5 => 0x1F,
            TapeWidth::Level8 => 0xFF,
        }
    }

    pub const fn right_margin(self) -> usize {
        match self {
            TapeWidth::Level5 => RIGHT_MARGIN_5,
            TapeWidth::Level8 => RIGHT_MARGIN_8,
        }
    }

    /// Scanlines per tape row.
    pub const fn row_height(self) -> usize {
        BIT_CELL
    }

    /// Number of cells across the tape: every data bit plus the sprocket.
    pub const fn slots(self) -> usize {
        self.data_bits() + 1
    }

    /// Image width in pixels (687 for 5-level, 1000 for 8-level).
    pub const fn width_px(self) -> usize {
        LEFT_MARGIN + BIT_CELL * self.slots() + self.right_margin()
    }

    /// Image height in pixels for `rows` tape rows.
    pub const fn length_px(self, rows: usize) -> usize {
        rows * self.row_height()
    }

    /// Bytes needed for one packed scanline.
    pub const fn packed_row_bytes(self) -> usize {
        self.width_px().div_ceil(8)
    }
}

impl fmt::Display for TapeWidth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-level", self.data_bits())
    }
}

/// Cell slot holding data bit `bit`; bits 0-2 precede the sprocket.
pub const fn slot_for_bit(bit: usize) -> usize {
    if bit < SPROCKET_SLOT { bit } else { bit + 1 }
}

/// Leftmost pixel column of a cell slot.
pub const fn slot_offset(slot: usize) -> usize {
    LEFT_MARGIN + slot * BIT_CELL
}

/// Whether cell-local pixel (x, y) lies inside a hole of `diameter`
/// centred in the cell.
pub fn hole_contains(x: usize, y: usize, diameter: usize) -> bool {
    let center = (BIT_CELL / 2) as i64;
    let radius = (diameter / 2) as i64;
    let dx = x as i64 - center;
    let dy = y as i64 - center;
    dx * dx + dy * dy <= radius * radius
}

/// Precomputed inside/outside table for one hole diameter.
#[derive(Debug, Clone)]
pub struct HoleMask {
    pixels: Vec<bool>,
}

impl HoleMask {
    pub fn new(diameter: usize) -> Self {
        let mut pixels = vec![false; BIT_CELL * BIT_CELL];
        for y in 0..BIT_CELL {
            for x in 0..BIT_CELL {
                pixels[y * BIT_CELL + x] = hole_contains(x, y, diameter);
            }
        }
        Self { pixels }
    }

    pub fn feed() -> Self {
        Self::new(FEED_HOLE_DIAMETER)
    }

    pub fn sprocket() -> Self {
        Self::new(SPROCKET_HOLE_DIAMETER)
    }

    pub fn contains(&self, x: usize, y: usize) -> bool {
        self.pixels[y * BIT_CELL + x]
    }

    /// One scanline of the hole, `BIT_CELL` pixels wide.
    pub fn scanline(&self, y: usize) -> &[bool] {
        &self.pixels[y * BIT_CELL..(y + 1) * BIT_CELL]
    }

    /// OR scanline `y` of the hole into `strip` starting at `offset`.
    pub fn stamp(&self, y: usize, strip: &mut [bool], offset: usize) {
        let cell = &mut strip[offset..offset + BIT_CELL];
        for (dst, &punched) in cell.iter_mut().zip(self.scanline(y)) {
            *dst |= punched;
        }
    }
}
