//! Punched paper tape toolkit: ITA2 encoding, bit-stream transforms and
//! ECMA-10 tape rendering.

mod baudot;
mod error;
pub mod random;
pub mod raster;
mod tape;
mod title;

pub use baudot::{FIGS, FIGURES, Ita2, Ita2Mapping, LETTERS, LTRS, MASK5, TapeEncoding, lookup};
pub use error::TapeError;
pub use raster::{RenderOptions, TapeWidth};
pub use tape::{DEL, NUL, ROWS_PER_INCH, Tape, TapeSummary};
pub use title::{TitleStyle, glyph_columns, reverse_low_bits, title_rows};

/// Render `rows` as a PBM (P4) image of an ECMA-10 tape.
pub fn render_pbm<W: std::io::Write>(
    out: &mut W,
    rows: &[u8],
    width: TapeWidth,
) -> std::io::Result<()> {
    raster::write_pbm(out, rows, &RenderOptions::new(width))
}
