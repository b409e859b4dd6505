use std::fmt::Write as _;
use std::fs::{self, OpenOptions};
use std::io::{Read, Write};
use std::path::Path;

use anyhow::{Context, Result};
use log::debug;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::baudot::{Ita2, TapeEncoding};
use crate::error::TapeError;
use crate::raster::{self, RenderOptions, TapeWidth};
use crate::title::{self, TitleStyle, reverse_low_bits};

pub const NUL: u8 = 0x00;
pub const DEL: u8 = 0x7F;
const CR: u8 = 0x0D;
const LF: u8 = 0x0A;

/// Rows per inch of tape.
pub const ROWS_PER_INCH: usize = 10;

/// Contents of a punched tape, one byte per row in feed order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Tape {
    rows: Vec<u8>,
}

/// Key facts about a tape, as reported by `inspect info`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TapeSummary {
    pub rows: usize,
    pub level: usize,
    pub length_inches: f64,
    pub punched_holes: usize,
    pub sha256: String,
}

impl Tape {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_bytes(rows: Vec<u8>) -> Self {
        Self { rows }
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Discard all rows.
    pub fn clear(&mut self) {
        self.rows.clear();
    }

    pub fn load(path: &Path) -> Result<Self> {
        let mut tape = Self::new();
        tape.append_file(path)?;
        Ok(tape)
    }

    /// Append the contents of a tape image file.
    pub fn append_file(&mut self, path: &Path) -> Result<()> {
        let mut file = OpenOptions::new()
            .read(true)
            .open(path)
            .with_context(|| format!("failed to open tape file {}", path.display()))?;
        let before = self.rows.len();
        file.read_to_end(&mut self.rows)
            .with_context(|| format!("failed to read tape file {}", path.display()))?;
        debug!("read {} rows from {}", self.rows.len() - before, path.display());
        Ok(())
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        fs::write(path, &self.rows)
            .with_context(|| format!("failed to write tape file {}", path.display()))
    }

    /// Hex dump, 16 rows per line, with the 7-bit ASCII reading alongside.
    pub fn hexdump(&self) -> String {
        let mut dump = String::new();
        let mut offset = String::new();
        let mut hex = String::new();
        let mut ascii = String::new();
        let last = self.rows.len().saturating_sub(1);
        for (n, &byte) in self.rows.iter().enumerate() {
            if n % 16 == 0 {
                offset = format!("{n:04X}:");
                hex.clear();
                ascii.clear();
            }
            write!(&mut hex, " {byte:02X}").ok();
            let ch = byte & 0x7F;
            ascii.push(if ch.is_ascii_graphic() { ch as char } else { ' ' });
            if n % 4 == 3 {
                hex.push(' ');
                ascii.push(' ');
            }
            if n % 16 == 15 || n == last {
                writeln!(&mut dump, "{offset:<5} {hex:<52} {ascii:<20}").ok();
            }
        }
        dump
    }

    /// Remove leader and trailer made of `ch`.
    pub fn trim(&mut self, ch: u8) {
        let start = self.rows.iter().position(|&b| b != ch).unwrap_or(self.rows.len());
        let end = self.rows.iter().rposition(|&b| b != ch).map_or(start, |i| i + 1);
        self.rows.truncate(end);
        self.rows.drain(..start);
    }

    /// Remove every occurrence of `ch`.
    pub fn strip(&mut self, ch: u8) {
        self.rows.retain(|&b| b != ch);
    }

    pub fn strip_nul(&mut self) {
        self.strip(NUL);
    }

    pub fn strip_del(&mut self) {
        self.strip(DEL);
    }

    pub fn xor(&mut self, mask: u8) {
        self.rows.iter_mut().for_each(|b| *b ^= mask);
    }

    /// Swap punched and unpunched positions in every row.
    pub fn invert(&mut self) {
        self.xor(0xFF);
    }

    pub fn and(&mut self, mask: u8) {
        self.rows.iter_mut().for_each(|b| *b &= mask);
    }

    pub fn or(&mut self, mask: u8) {
        self.rows.iter_mut().for_each(|b| *b |= mask);
    }

    /// Clear the upper bits of a 5-level tape read on an 8-level reader.
    pub fn mask5(&mut self) {
        self.and(0x1F);
    }

    /// Row-by-row OR of two tapes; the result is as long as the shorter one.
    pub fn or_with(&self, other: &Tape) -> Tape {
        let rows = self
            .rows
            .iter()
            .zip(&other.rows)
            .map(|(a, b)| a | b)
            .collect();
        Tape { rows }
    }

    pub fn set_msb(&mut self) {
        self.or(0x80);
    }

    /// Set the MSB of every row except NUL leader/trailer rows.
    pub fn set_msb_except_nul(&mut self) {
        self.rows
            .iter_mut()
            .filter(|b| **b != NUL)
            .for_each(|b| *b |= 0x80);
    }

    pub fn clear_msb(&mut self) {
        self.and(0x7F);
    }

    pub fn add_leader(&mut self, len: usize, ch: u8) {
        self.rows.splice(0..0, std::iter::repeat_n(ch, len));
    }

    pub fn add_trailer(&mut self, len: usize, ch: u8) {
        self.rows.extend(std::iter::repeat_n(ch, len));
    }

    /// Insert two DEL rows after each CR LF as carriage return delay.
    pub fn pad_crlf(&mut self) {
        let mut padded = Vec::with_capacity(self.rows.len());
        let mut prev = None;
        for &b in &self.rows {
            padded.push(b);
            if b == LF && prev == Some(CR) {
                padded.extend([DEL, DEL]);
            }
            prev = Some(b);
        }
        self.rows = padded;
    }

    /// Prepend a title punched in a dot-matrix font.
    pub fn add_title(&mut self, text: &str, style: TitleStyle) {
        let title = title::title_rows(text, style);
        self.rows.splice(0..0, title);
    }

    /// Reverse the order of the low `bits` bits of each row, discarding the rest.
    pub fn reverse_bits(&mut self, bits: usize) {
        self.rows
            .iter_mut()
            .for_each(|b| *b = reverse_low_bits(*b, bits));
    }

    /// Put even parity in the top data bit of each row.
    pub fn apply_even_parity(&mut self, width: TapeWidth) {
        let parity = 1u8 << (width.data_bits() - 1);
        let data = parity - 1;
        for row in &mut self.rows {
            if (*row & data).count_ones() % 2 == 1 {
                *row |= parity;
            } else {
                *row &= !parity;
            }
        }
    }

    /// Text carried by an ASCII source tape: NUL rows dropped, MSB cleared.
    pub fn to_text(&self) -> Vec<u8> {
        self.rows
            .iter()
            .filter(|&&b| b != NUL)
            .map(|&b| b & 0x7F)
            .collect()
    }

    /// Number of data holes punched on a tape of the given width.
    pub fn punched_holes(&self, width: TapeWidth) -> usize {
        self.rows
            .iter()
            .map(|&b| (b & width.mask()).count_ones() as usize)
            .sum()
    }

    /// Lower-case hex SHA-256 of the tape contents.
    pub fn digest(&self) -> String {
        format!("{:x}", Sha256::digest(&self.rows))
    }

    pub fn summary(&self, width: TapeWidth) -> TapeSummary {
        TapeSummary {
            rows: self.rows.len(),
            level: width.data_bits(),
            length_inches: self.rows.len() as f64 / ROWS_PER_INCH as f64,
            punched_holes: self.punched_holes(width),
            sha256: self.digest(),
        }
    }

    pub fn encode<E: TapeEncoding + ?Sized>(encoder: &E, text: &[u8]) -> Self {
        Self::from_bytes(encoder.encode(text))
    }

    pub fn decode<E: TapeEncoding + ?Sized>(&self, encoder: &E) -> Vec<u8> {
        encoder.decode(&self.rows)
    }

    /// Punch `text` in ITA2, shifting as needed.
    pub fn encode_ita2(text: &[u8]) -> Self {
        Self::encode(&Ita2, text)
    }

    pub fn decode_ita2(&self) -> Vec<u8> {
        self.decode(&Ita2)
    }

    pub fn render_pbm<W: Write>(&self, out: &mut W, options: &RenderOptions) -> std::io::Result<()> {
        raster::write_pbm(out, &self.rows, options)
    }

    pub fn render_png<W: Write>(&self, out: &mut W, options: &RenderOptions) -> Result<(), TapeError> {
        raster::write_png(out, &self.rows, options)
    }

    pub fn render_ascii(&self, options: &RenderOptions) -> String {
        raster::render_ascii(&self.rows, options)
    }
}
