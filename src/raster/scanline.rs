//! Row rasterizer: turns tape rows into pixel strips, one scanline at a time.

use super::geometry::{HoleMask, SPROCKET_SLOT, TapeWidth, slot_for_bit, slot_offset};

/// Stamps feed and sprocket holes for one tape width.
///
/// The hole masks are computed once and reused for every row and cell.
#[derive(Debug, Clone)]
pub struct Rasterizer {
    width: TapeWidth,
    mirror: bool,
    feed: HoleMask,
    sprocket: HoleMask,
}

impl Rasterizer {
    pub fn new(width: TapeWidth) -> Self {
        Self {
            width,
            mirror: false,
            feed: HoleMask::feed(),
            sprocket: HoleMask::sprocket(),
        }
    }

    /// Render the tape as seen from its other face.
    pub fn mirrored(mut self, mirror: bool) -> Self {
        self.mirror = mirror;
        self
    }

    /// Fill `strip` with scanline `y` of a tape row holding `row`.
    ///
    /// `strip` must be exactly `width_px()` long; bits above the tape's data
    /// width are ignored.
    pub fn rasterize(&self, row: u8, y: usize, strip: &mut [bool]) {
        debug_assert_eq!(strip.len(), self.width.width_px());
        strip.fill(false);

        for bit in 0..self.width.data_bits() {
            if (row >> bit) & 1 == 1 {
                self.feed.stamp(y, strip, slot_offset(slot_for_bit(bit)));
            }
        }
        self.sprocket.stamp(y, strip, slot_offset(SPROCKET_SLOT));

        if self.mirror {
            strip.reverse();
        }
    }

    /// Call `emit` once per scanline, top to bottom, for the whole tape.
    ///
    /// The same strip buffer is handed out every time; callers must consume
    /// it before returning.
    pub fn for_each_scanline<E, F>(&self, rows: &[u8], mut emit: F) -> Result<(), E>
    where
        F: FnMut(&[bool]) -> Result<(), E>,
    {
        let mut strip = vec![false; self.width.width_px()];
        for &row in rows {
            for y in 0..self.width.row_height() {
                self.rasterize(row, y, &mut strip);
                emit(&strip)?;
            }
        }
        Ok(())
    }
}
