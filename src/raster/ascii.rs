//! Text rendering of a tape in the style of bcd(1).

use std::fmt::Write;

use super::RenderOptions;
use super::geometry::SPROCKET_SLOT;

const HOLE: char = 'o';
const BLANK: char = ' ';
const SPROCKET: char = '.';

/// Render `rows` as ASCII art, leading edge at the top.
///
/// Each line shows bit 0 on the left with the sprocket `.` after bit 2;
/// mirrored output flips every line.
pub fn render_ascii(rows: &[u8], options: &RenderOptions) -> String {
    let slots = options.width.slots();
    let edge = format!("+{}+", "-".repeat(slots));

    let mut out = String::with_capacity((rows.len() + 2) * (slots + 3));
    writeln!(&mut out, "{edge}").ok();
    for &row in rows {
        let mut line: Vec<char> = Vec::with_capacity(slots);
        for bit in 0..options.width.data_bits() {
            if bit == SPROCKET_SLOT {
                line.push(SPROCKET);
            }
            line.push(if (row >> bit) & 1 == 1 { HOLE } else { BLANK });
        }
        if options.mirror {
            line.reverse();
        }
        writeln!(&mut out, "|{}|", line.into_iter().collect::<String>()).ok();
    }
    writeln!(&mut out, "{edge}").ok();
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::raster::TapeWidth;
    use pretty_assertions::assert_eq;

    #[test]
    fn renders_eight_level_rows() {
        let out = render_ascii(&[0x00, 0x81, 0x07], &RenderOptions::default());
        let expected = "\
+---------+
|   .     |
|o  .    o|
|ooo.     |
+---------+
";
        assert_eq!(out, expected);
    }

    #[test]
    fn renders_five_level_mirrored() {
        let options = RenderOptions {
            width: TapeWidth::Level5,
            mirror: true,
        };
        let out = render_ascii(&[0x01, 0x18, 0xE0], &options);
        let expected = "\
+------+
|  .  o|
|oo.   |
|  .   |
+------+
";
        assert_eq!(out, expected);
    }

    #[test]
    fn empty_tape_has_edges_only() {
        let options = RenderOptions::new(TapeWidth::Level5);
        assert_eq!(render_ascii(&[], &options), "+------+\n+------+\n");
    }
}
