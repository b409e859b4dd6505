//! Rendering of tape rows as ECMA-10 bitmaps (PBM, PNG) and ASCII art.

mod ascii;
pub mod geometry;
mod pbm;
mod png;
mod scanline;

pub use ascii::render_ascii;
pub use geometry::{HoleMask, TapeWidth};
pub use pbm::{PBM_MAGIC, pack_scanline, write_header, write_pbm};
pub use png::{render_image, write_png};
pub use scanline::Rasterizer;

/// Options shared by every renderer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RenderOptions {
    pub width: TapeWidth,
    /// Show the tape from the face read by Teletype ASR-33 style machines.
    pub mirror: bool,
}

impl RenderOptions {
    pub fn new(width: TapeWidth) -> Self {
        Self {
            width,
            mirror: false,
        }
    }
}
