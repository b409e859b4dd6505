//! ITA2 (US Teletype) 5-level code.
//!
//! Each 5-bit code has a letters-shift and a figures-shift meaning; the
//! special codes LTRS and FIGS switch between them.

/// Letters shift character.
pub const LTRS: u8 = 0x1F;
/// Figures shift character.
pub const FIGS: u8 = 0x1B;
/// Bits carried by a 5-level code.
pub const MASK5: u8 = 0x1F;

const NUL: u8 = 0x00;
const BEL: u8 = 0x07;
const LF: u8 = 0x0A;
const CR: u8 = 0x0D;

/// Code → ASCII in letters shift. Shift slots hold NUL and are never looked up.
#[rustfmt::skip]
pub const LETTERS: [u8; 32] = [
    NUL,  b'T', CR,   b'O', b' ', b'H', b'N', b'M',
    LF,   b'L', b'R', b'G', b'I', b'P', b'C', b'V',
    b'E', b'Z', b'D', b'B', b'S', b'Y', b'F', b'X',
    b'A', b'W', b'J', NUL,  b'U', b'Q', b'K', NUL,
];

/// Code → ASCII in figures shift.
#[rustfmt::skip]
pub const FIGURES: [u8; 32] = [
    NUL,  b'5', CR,   b'9', b' ', b'#', b',', b'.',
    LF,   b')', b'4', b'&', b'8', b'0', b':', b';',
    b'3', b'"', b'$', b'?', b'\'', b'6', b'!', b'/',
    b'-', b'2', BEL,  NUL,  b'7', b'1', b'(', NUL,
];

/// Result of looking up one ASCII character.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ita2Mapping {
    /// Needs letters shift.
    Letters(u8),
    /// Needs figures shift.
    Figures(u8),
    /// Same code in both shifts.
    Either(u8),
    /// No ITA2 equivalent.
    Unmapped,
}

impl Ita2Mapping {
    pub fn code(self) -> Option<u8> {
        match self {
            Ita2Mapping::Letters(c) | Ita2Mapping::Figures(c) | Ita2Mapping::Either(c) => Some(c),
            Ita2Mapping::Unmapped => None,
        }
    }

    fn shift(self) -> Option<Shift> {
        match self {
            Ita2Mapping::Letters(_) => Some(Shift::Letters),
            Ita2Mapping::Figures(_) => Some(Shift::Figures),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Shift {
    Letters,
    Figures,
}

impl Shift {
    fn code(self) -> u8 {
        match self {
            Shift::Letters => LTRS,
            Shift::Figures => FIGS,
        }
    }
}

static ASCII_TO_ITA2: [Ita2Mapping; 128] = build_encode_table();

const fn build_encode_table() -> [Ita2Mapping; 128] {
    let mut table = [Ita2Mapping::Unmapped; 128];
    let mut code = 0;
    while code < 32 {
        if code as u8 != LTRS && code as u8 != FIGS {
            let letter = LETTERS[code] as usize;
            let figure = FIGURES[code] as usize;
            if letter == figure {
                table[letter] = Ita2Mapping::Either(code as u8);
            } else {
                table[letter] = Ita2Mapping::Letters(code as u8);
                table[figure] = Ita2Mapping::Figures(code as u8);
            }
        }
        code += 1;
    }
    // lower case punches the same as upper case
    let mut ch = b'a';
    while ch <= b'z' {
        table[ch as usize] = table[(ch - b'a' + b'A') as usize];
        ch += 1;
    }
    table
}

/// Look up the ITA2 code for an ASCII byte; the MSB is ignored.
pub fn lookup(ascii: u8) -> Ita2Mapping {
    ASCII_TO_ITA2[(ascii & 0x7F) as usize]
}

/// A character code that can be punched on tape.
pub trait TapeEncoding {
    fn name(&self) -> &'static str;
    /// Convert text to tape rows, dropping characters the code cannot carry.
    fn encode(&self, text: &[u8]) -> Vec<u8>;
    /// Convert tape rows back to text.
    fn decode(&self, rows: &[u8]) -> Vec<u8>;
    fn is_supported(&self, ch: u8) -> bool;
}

/// ITA2 with US Teletype figures.
#[derive(Debug, Clone, Copy, Default)]
pub struct Ita2;

impl TapeEncoding for Ita2 {
    fn name(&self) -> &'static str {
        "ITA2"
    }

    /// The reader may start in either shift, so a shift character precedes
    /// the first character that is not valid in both.
    fn encode(&self, text: &[u8]) -> Vec<u8> {
        let mut out = Vec::with_capacity(text.len() + text.len() / 4);
        let mut current: Option<Shift> = None;
        for &ch in text {
            let mapping = lookup(ch);
            let Some(code) = mapping.code() else {
                continue;
            };
            if let Some(needed) = mapping.shift() {
                if current != Some(needed) {
                    out.push(needed.code());
                    current = Some(needed);
                }
            }
            out.push(code);
        }
        out
    }

    /// Decoding assumes the tape starts in letters shift.
    fn decode(&self, rows: &[u8]) -> Vec<u8> {
        let mut out = Vec::with_capacity(rows.len());
        let mut shift = Shift::Letters;
        for &row in rows {
            match row & MASK5 {
                LTRS => shift = Shift::Letters,
                FIGS => shift = Shift::Figures,
                code => out.push(match shift {
                    Shift::Letters => LETTERS[code as usize],
                    Shift::Figures => FIGURES[code as usize],
                }),
            }
        }
        out
    }

    fn is_supported(&self, ch: u8) -> bool {
        lookup(ch) != Ita2Mapping::Unmapped
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn either_shift_characters() {
        assert_eq!(lookup(b' '), Ita2Mapping::Either(0x04));
        assert_eq!(lookup(b'\r'), Ita2Mapping::Either(0x02));
        assert_eq!(lookup(b'\n'), Ita2Mapping::Either(0x08));
        assert_eq!(lookup(0x00), Ita2Mapping::Either(0x00));
    }

    #[test]
    fn letters_and_figures_share_codes() {
        assert_eq!(lookup(b'A'), Ita2Mapping::Letters(0x18));
        assert_eq!(lookup(b'-'), Ita2Mapping::Figures(0x18));
        assert_eq!(lookup(b'2'), Ita2Mapping::Figures(0x19));
        assert_eq!(lookup(BEL), Ita2Mapping::Figures(0x1A));
    }

    #[test]
    fn lower_case_and_msb_are_folded() {
        assert_eq!(lookup(b'q'), lookup(b'Q'));
        assert_eq!(lookup(b'Q' | 0x80), lookup(b'Q'));
    }

    #[test]
    fn unmapped_characters() {
        for ch in [b'%', b'*', b'+', b'<', b'=', b'>', b'@', b'`', b'{', 0x7F] {
            assert_eq!(lookup(ch), Ita2Mapping::Unmapped, "{:?}", ch as char);
            assert!(!Ita2.is_supported(ch));
        }
    }

    #[test]
    fn encode_emits_shifts_only_on_change() {
        let encoded = Ita2.encode(b"HELLO 42");
        assert_eq!(
            encoded,
            vec![LTRS, 0x05, 0x10, 0x09, 0x09, 0x03, 0x04, FIGS, 0x0A, 0x19]
        );
    }

    #[test]
    fn leading_either_shift_needs_no_shift() {
        assert_eq!(Ita2.encode(b" \r\n"), vec![0x04, 0x02, 0x08]);
        assert_eq!(Ita2.encode(b"1\n2"), vec![FIGS, 0x1D, 0x08, 0x19]);
    }

    #[test]
    fn encode_skips_unmapped() {
        assert_eq!(Ita2.encode(b"A%B"), Ita2.encode(b"AB"));
    }

    #[test]
    fn decode_restores_upper_case_text() {
        let text = b"THE QUICK BROWN FOX, 1234567890 JUMPS!\r\n";
        assert_eq!(Ita2.decode(&Ita2.encode(text)), text.to_vec());
    }

    #[test]
    fn decode_starts_in_letters_and_masks_high_bits() {
        assert_eq!(Ita2.decode(&[0x01, 0xE1, FIGS, 0x01]), b"TT5".to_vec());
    }
}
