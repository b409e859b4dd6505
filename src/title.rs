//! Human-readable tape titles punched in a 5x7 dot-matrix font.

/// Glyph width in columns.
pub const GLYPH_WIDTH: usize = 5;
/// Glyph height in rows.
pub const GLYPH_HEIGHT: usize = 7;

/// How a title is laid out across the tape.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TitleStyle {
    /// Turn glyphs a quarter turn so they fit 5-level tape.
    pub rotate: bool,
    /// Read correctly from the opposite tape face.
    pub invert: bool,
}

/// Glyph columns, left to right; bit r is glyph row r counted from the top.
#[rustfmt::skip]
static FONT: &[(u8, [u8; GLYPH_WIDTH])] = &[
    (b'0', [0x3E, 0x51, 0x49, 0x45, 0x3E]),
    (b'1', [0x00, 0x42, 0x7F, 0x40, 0x00]),
    (b'2', [0x62, 0x51, 0x49, 0x49, 0x46]),
    (b'3', [0x41, 0x49, 0x49, 0x49, 0x36]),
    (b'4', [0x18, 0x14, 0x12, 0x7F, 0x10]),
    (b'5', [0x27, 0x45, 0x45, 0x45, 0x39]),
    (b'6', [0x3C, 0x4A, 0x49, 0x49, 0x30]),
    (b'7', [0x01, 0x71, 0x09, 0x05, 0x03]),
    (b'8', [0x36, 0x49, 0x49, 0x49, 0x36]),
    (b'9', [0x06, 0x49, 0x49, 0x29, 0x1E]),
    (b'A', [0x7E, 0x09, 0x09, 0x09, 0x7E]),
    (b'B', [0x7F, 0x49, 0x49, 0x49, 0x36]),
    (b'C', [0x3E, 0x41, 0x41, 0x41, 0x22]),
    (b'D', [0x7F, 0x41, 0x41, 0x41, 0x3E]),
    (b'E', [0x7F, 0x49, 0x49, 0x49, 0x41]),
    (b'F', [0x7F, 0x09, 0x09, 0x09, 0x01]),
    (b'G', [0x3E, 0x41, 0x49, 0x49, 0x3A]),
    (b'H', [0x7F, 0x08, 0x08, 0x08, 0x7F]),
    (b'I', [0x00, 0x41, 0x7F, 0x41, 0x00]),
    (b'J', [0x30, 0x40, 0x41, 0x3F, 0x01]),
    (b'K', [0x7F, 0x08, 0x14, 0x22, 0x41]),
    (b'L', [0x7F, 0x40, 0x40, 0x40, 0x40]),
    (b'M', [0x7F, 0x02, 0x0C, 0x02, 0x7F]),
    (b'N', [0x7F, 0x04, 0x08, 0x10, 0x7F]),
    (b'O', [0x3E, 0x41, 0x41, 0x41, 0x3E]),
    (b'P', [0x7F, 0x09, 0x09, 0x09, 0x06]),
    (b'Q', [0x3E, 0x41, 0x51, 0x21, 0x5E]),
    (b'R', [0x7F, 0x09, 0x19, 0x29, 0x46]),
    (b'S', [0x46, 0x49, 0x49, 0x49, 0x31]),
    (b'T', [0x01, 0x01, 0x7F, 0x01, 0x01]),
    (b'U', [0x3F, 0x40, 0x40, 0x40, 0x3F]),
    (b'V', [0x07, 0x18, 0x60, 0x18, 0x07]),
    (b'W', [0x3F, 0x40, 0x38, 0x40, 0x3F]),
    (b'X', [0x63, 0x14, 0x08, 0x14, 0x63]),
    (b'Y', [0x03, 0x04, 0x78, 0x04, 0x03]),
    (b'Z', [0x61, 0x51, 0x49, 0x45, 0x43]),
    (b'-', [0x08, 0x08, 0x08, 0x08, 0x08]),
    (b'&', [0x36, 0x49, 0x55, 0x22, 0x50]),
    (b'/', [0x30, 0x08, 0x04, 0x02, 0x01]),
    (b':', [0x00, 0x00, 0x12, 0x00, 0x00]),
    (b'#', [0x12, 0x7F, 0x12, 0x7F, 0x12]),
    (b'@', [0x3E, 0x41, 0x5D, 0x55, 0x1E]),
    (b'\'', [0x00, 0x00, 0x03, 0x00, 0x00]),
    (b'=', [0x12, 0x12, 0x12, 0x12, 0x12]),
    (b'"', [0x00, 0x03, 0x00, 0x03, 0x00]),
    (b'.', [0x00, 0x00, 0x60, 0x60, 0x00]),
    (b',', [0x00, 0x40, 0x30, 0x10, 0x00]),
    (b'<', [0x08, 0x14, 0x22, 0x41, 0x00]),
    (b'>', [0x00, 0x41, 0x22, 0x14, 0x08]),
    (b'(', [0x00, 0x1C, 0x22, 0x41, 0x00]),
    (b')', [0x00, 0x41, 0x22, 0x1C, 0x00]),
    (b'+', [0x04, 0x04, 0x1F, 0x04, 0x04]),
    (b'!', [0x00, 0x00, 0x5F, 0x00, 0x00]),
    (b'$', [0x24, 0x2A, 0x7F, 0x2A, 0x12]),
    (b'%', [0x13, 0x0B, 0x34, 0x32, 0x01]),
    (b'_', [0x20, 0x20, 0x20, 0x20, 0x20]),
    (b'|', [0x00, 0x00, 0x7F, 0x00, 0x00]),
    (b';', [0x00, 0x40, 0x32, 0x10, 0x00]),
    (b'*', [0x0A, 0x04, 0x1F, 0x04, 0x0A]),
    (b'?', [0x02, 0x01, 0x59, 0x05, 0x02]),
    (b' ', [0x00, 0x00, 0x00, 0x00, 0x00]),
];

/// Columns of the glyph for `ch`; lower case folds to upper case and
/// anything without a glyph is blank.
pub fn glyph_columns(ch: char) -> [u8; GLYPH_WIDTH] {
    if !ch.is_ascii() {
        return [0; GLYPH_WIDTH];
    }
    let up = ch.to_ascii_uppercase() as u8;
    FONT.iter()
        .find(|(c, _)| *c == up)
        .map(|(_, cols)| *cols)
        .unwrap_or([0; GLYPH_WIDTH])
}

/// Tape rows spelling `text`: a blank row, then each glyph followed by a
/// blank row.
pub fn title_rows(text: &str, style: TitleStyle) -> Vec<u8> {
    let per_glyph = if style.rotate { GLYPH_HEIGHT } else { GLYPH_WIDTH };
    let mut rows = Vec::with_capacity(1 + text.len() * (per_glyph + 1));
    rows.push(0x00);
    for ch in text.chars() {
        let cols = glyph_columns(ch);
        if style.rotate {
            for r in 0..GLYPH_HEIGHT {
                let row = (0..GLYPH_WIDTH)
                    .filter(|&c| (cols[c] >> r) & 1 == 1)
                    .fold(0u8, |acc, c| acc | (1 << c));
                rows.push(orient(row, GLYPH_WIDTH, style.invert));
            }
        } else {
            rows.extend(cols.iter().map(|&col| orient(col, GLYPH_HEIGHT, style.invert)));
        }
        rows.push(0x00);
    }
    rows
}

fn orient(row: u8, bits: usize, invert: bool) -> u8 {
    if invert {
        reverse_low_bits(row, bits)
    } else {
        row
    }
}

/// Reverse the order of the low `bits` bits, dropping the rest.
pub fn reverse_low_bits(value: u8, bits: usize) -> u8 {
    (0..bits)
        .filter(|&i| (value >> i) & 1 == 1)
        .fold(0u8, |acc, i| acc | (1 << (bits - 1 - i)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn upright_title_uses_glyph_columns() {
        let rows = title_rows("I", TitleStyle::default());
        assert_eq!(rows, vec![0x00, 0x00, 0x41, 0x7F, 0x41, 0x00, 0x00]);
    }

    #[test]
    fn lower_case_and_unknown_characters() {
        assert_eq!(glyph_columns('h'), glyph_columns('H'));
        assert_eq!(glyph_columns('~'), [0; GLYPH_WIDTH]);
        assert_eq!(glyph_columns('é'), [0; GLYPH_WIDTH]);
    }

    #[test]
    fn inverted_title_flips_seven_bits() {
        let style = TitleStyle {
            rotate: false,
            invert: true,
        };
        assert_eq!(title_rows("L", style), vec![0x00, 0x7F, 0x01, 0x01, 0x01, 0x01, 0x00]);
    }

    #[test]
    fn rotated_title_fits_five_bits() {
        let style = TitleStyle {
            rotate: true,
            invert: false,
        };
        let rows = title_rows("L", style);
        assert_eq!(rows, vec![0x00, 0x01, 0x01, 0x01, 0x01, 0x01, 0x01, 0x1F, 0x00]);

        let inverted = title_rows("L", TitleStyle { invert: true, ..style });
        assert_eq!(inverted, vec![0x00, 0x10, 0x10, 0x10, 0x10, 0x10, 0x10, 0x1F, 0x00]);
        assert!(title_rows("WXYZ", style).iter().all(|&r| r <= 0x1F));
    }

    #[test]
    fn each_glyph_adds_its_rows() {
        assert_eq!(title_rows("", TitleStyle::default()), vec![0x00]);
        assert_eq!(title_rows("AB C", TitleStyle::default()).len(), 1 + 4 * 6);
    }

    #[test]
    fn reverse_low_bits_drops_high_bits() {
        assert_eq!(reverse_low_bits(0b1000_0001, 5), 0b1_0000);
        assert_eq!(reverse_low_bits(0b0000_0110, 8), 0b0110_0000);
    }
}
