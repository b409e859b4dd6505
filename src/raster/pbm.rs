//! Binary PBM (`P4`) output.

use std::io::{self, Write};

use log::debug;

use super::RenderOptions;
use super::scanline::Rasterizer;

/// Magic number of a raw (binary) portable bitmap.
pub const PBM_MAGIC: &str = "P4";

/// Write the PBM header for an image of `width` × `height` pixels.
pub fn write_header<W: Write>(out: &mut W, width: usize, height: usize) -> io::Result<()> {
    writeln!(out, "{PBM_MAGIC}")?;
    writeln!(out, "{width} {height}")
}

/// Pack one scanline MSB-first, a set pixel giving a 1 bit.
///
/// `packed` must hold `ceil(strip.len() / 8)` bytes; unused trailing bits of
/// the last byte are cleared.
pub fn pack_scanline(strip: &[bool], packed: &mut [u8]) {
    debug_assert_eq!(packed.len(), strip.len().div_ceil(8));
    for (byte, pixels) in packed.iter_mut().zip(strip.chunks(8)) {
        *byte = pixels
            .iter()
            .enumerate()
            .filter(|&(_, &set)| set)
            .fold(0u8, |acc, (i, _)| acc | (0x80 >> i));
    }
}

/// Render `rows` as a complete PBM image into `out`.
pub fn write_pbm<W: Write>(out: &mut W, rows: &[u8], options: &RenderOptions) -> io::Result<()> {
    let width = options.width;
    let width_px = width.width_px();
    let length_px = width.length_px(rows.len());
    debug!("rendering {} rows of {} tape as {}x{} PBM", rows.len(), width, width_px, length_px);

    write_header(out, width_px, length_px)?;

    let raster = Rasterizer::new(width).mirrored(options.mirror);
    let mut packed = vec![0u8; width.packed_row_bytes()];
    raster.for_each_scanline(rows, |strip| {
        pack_scanline(strip, &mut packed);
        out.write_all(&packed)
    })?;
    out.flush()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::raster::TapeWidth;

    fn render(rows: &[u8], width: TapeWidth, mirror: bool) -> Vec<u8> {
        let mut out = Vec::new();
        write_pbm(&mut out, rows, &RenderOptions { width, mirror }).unwrap();
        out
    }

    /// Split a rendered image into its header text and pixel bytes.
    fn split(image: &[u8]) -> (String, &[u8]) {
        let mut newlines = 0;
        let end = image
            .iter()
            .position(|&b| {
                if b == b'\n' {
                    newlines += 1;
                }
                newlines == 2
            })
            .unwrap();
        (String::from_utf8(image[..=end].to_vec()).unwrap(), &image[end + 1..])
    }

    #[test]
    fn packs_msb_first() {
        let mut strip = vec![false; 10];
        strip[0] = true;
        strip[7] = true;
        strip[9] = true;
        let mut packed = [0u8; 2];
        pack_scanline(&strip, &mut packed);
        assert_eq!(packed, [0x81, 0x40]);
    }

    #[test]
    fn packing_clears_stale_bytes() {
        let strip = vec![false; 12];
        let mut packed = [0xFFu8; 2];
        pack_scanline(&strip, &mut packed);
        assert_eq!(packed, [0, 0]);
    }

    #[test]
    fn empty_tape_is_header_only() {
        let image = render(&[], TapeWidth::Level8, false);
        assert_eq!(image, b"P4\n1000 0\n");
    }

    #[test]
    fn header_reports_width_and_length() {
        let image = render(&[0x00, 0x1F, 0x04], TapeWidth::Level5, false);
        let (header, pixels) = split(&image);
        assert_eq!(header, "P4\n687 300\n");
        assert_eq!(pixels.len(), 300 * 86);
    }

    #[test]
    fn blank_row_is_sprocket_only() {
        let image = render(&[0x00], TapeWidth::Level8, false);
        let (header, pixels) = split(&image);
        assert_eq!(header, "P4\n1000 100\n");
        assert_eq!(pixels.len(), 100 * 125);

        // scanline 50 crosses the sprocket at x = 342 + 27 ..= 342 + 73
        let line = &pixels[50 * 125..51 * 125];
        let set: Vec<usize> = (0..1000)
            .filter(|x| line[x / 8] & (0x80 >> (x % 8)) != 0)
            .collect();
        assert_eq!(set, (369..=415).collect::<Vec<_>>());

        // top and bottom scanlines miss even the sprocket
        assert!(pixels[..125].iter().all(|&b| b == 0));
        assert!(pixels[99 * 125..].iter().all(|&b| b == 0));
    }

    #[test]
    fn five_level_padding_stays_clear() {
        let image = render(&[0x1F], TapeWidth::Level5, true);
        let (_, pixels) = split(&image);
        // 687 pixels leave one unused bit in the last byte of each scanline
        for line in pixels.chunks(86) {
            assert_eq!(line[85] & 0x01, 0);
        }
    }
}
