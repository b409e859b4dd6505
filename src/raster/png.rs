//! PNG export of the tape raster.

use std::convert::Infallible;
use std::io::{Cursor, Write};

use image::{GrayImage, ImageFormat, Luma};

use super::RenderOptions;
use super::scanline::Rasterizer;
use crate::error::TapeError;

const PUNCHED: Luma<u8> = Luma([0x00]);
const TAPE: Luma<u8> = Luma([0xff]);

/// Build a black-on-white bitmap of the tape; punched pixels are black,
/// matching how PBM viewers draw set bits.
pub fn render_image(rows: &[u8], options: &RenderOptions) -> Result<GrayImage, TapeError> {
    if rows.is_empty() {
        return Err(TapeError::EmptyImage);
    }
    let width_px = options.width.width_px();
    let length_px = options.width.length_px(rows.len());
    let mut img = GrayImage::from_pixel(width_px as u32, length_px as u32, TAPE);

    let raster = Rasterizer::new(options.width).mirrored(options.mirror);
    let mut y = 0u32;
    raster.for_each_scanline::<Infallible, _>(rows, |strip| {
        for (x, _) in strip.iter().enumerate().filter(|&(_, &set)| set) {
            img.put_pixel(x as u32, y, PUNCHED);
        }
        y += 1;
        Ok(())
    })
    .unwrap_or_else(|never| match never {});
    Ok(img)
}

/// Encode the tape as PNG into `out`.
pub fn write_png<W: Write>(
    out: &mut W,
    rows: &[u8],
    options: &RenderOptions,
) -> Result<(), TapeError> {
    let img = render_image(rows, options)?;
    let mut buf = Cursor::new(Vec::new());
    img.write_to(&mut buf, ImageFormat::Png)?;
    out.write_all(buf.get_ref())?;
    out.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::raster::TapeWidth;
    use crate::raster::geometry::{SPROCKET_SLOT, slot_offset};

    #[test]
    fn image_matches_tape_dimensions() {
        let options = RenderOptions::new(TapeWidth::Level5);
        let img = render_image(&[0x01, 0x02], &options).unwrap();
        assert_eq!(img.dimensions(), (687, 200));
    }

    #[test]
    fn sprocket_centre_is_black() {
        let options = RenderOptions::default();
        let img = render_image(&[0x00], &options).unwrap();
        let cx = (slot_offset(SPROCKET_SLOT) + 50) as u32;
        assert_eq!(*img.get_pixel(cx, 50), PUNCHED);
        assert_eq!(*img.get_pixel(0, 50), TAPE);
        // bit 0 is not punched
        assert_eq!(*img.get_pixel((slot_offset(0) + 50) as u32, 50), TAPE);
    }

    #[test]
    fn empty_tape_has_no_image() {
        let result = render_image(&[], &RenderOptions::default());
        assert!(matches!(result, Err(TapeError::EmptyImage)));
    }

    #[test]
    fn encodes_png_signature() {
        let mut out = Vec::new();
        write_png(&mut out, &[0x55], &RenderOptions::default()).unwrap();
        assert_eq!(&out[..8], b"\x89PNG\r\n\x1a\n");
    }
}
