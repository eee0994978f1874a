use std::fmt::{Display, Formatter};

use crate::common::error::{QRError, QRResult};

// Mode
//------------------------------------------------------------------------------

#[derive(Debug, PartialEq, Eq, Copy, Clone, Hash)]
pub enum Mode {
    Numeric = 0b0001,
    Alphanumeric = 0b0010,
    Byte = 0b0100,
    Kanji = 0b1000,
}

// Mode indicator for GS1 data
pub(crate) const FNC1_FIRST: u8 = 0b0101;

// Symbol value written in place of FNC1 in alphanumeric mode
pub(crate) const ALPHANUMERIC_FNC1: u16 = 38;

// Byte value written in place of FNC1 in byte mode
pub(crate) const BYTE_FNC1: u8 = 0x1d;

pub(crate) const PADDING_CODEWORDS: [u8; 2] = [0b11101100, 0b00010001];

impl Mode {
    /// Classifies a single character, before any run-length demotion.
    pub fn of(ch: char, gs1: bool) -> Self {
        match ch {
            '0'..='9' => Self::Numeric,
            '[' if gs1 => Self::Alphanumeric,
            c if Self::alphanumeric_digit(c).is_some() => Self::Alphanumeric,
            c if c as u32 > 0xff => Self::Kanji,
            _ => Self::Byte,
        }
    }

    pub fn alphanumeric_digit(ch: char) -> Option<u16> {
        let digit = match ch {
            '0'..='9' => ch as u16 - '0' as u16,
            'A'..='Z' => ch as u16 - 'A' as u16 + 10,
            ' ' => 36,
            '$' => 37,
            '%' => 38,
            '*' => 39,
            '+' => 40,
            '-' => 41,
            '.' => 42,
            '/' => 43,
            ':' => 44,
            _ => return None,
        };
        Some(digit)
    }

    pub fn tag(self) -> char {
        match self {
            Self::Numeric => 'N',
            Self::Alphanumeric => 'A',
            Self::Byte => 'B',
            Self::Kanji => 'K',
        }
    }
}

impl Display for Mode {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{self:?}")
    }
}

// Segment
//------------------------------------------------------------------------------

#[derive(Debug, PartialEq, Eq, Copy, Clone)]
pub struct Segment {
    pub mode: Mode,
    pub start: usize,
    pub len: usize,
}

impl Segment {
    pub fn new(mode: Mode, start: usize, len: usize) -> Self {
        Self { mode, start, len }
    }

    pub fn end(&self) -> usize {
        self.start + self.len
    }

    pub fn chars<'a>(&self, content: &'a [char]) -> &'a [char] {
        &content[self.start..self.end()]
    }

    // Number of symbols written to the bitstream, counting each escaped GS1 '%' twice
    pub fn unit_count(&self, content: &[char], gs1: bool) -> usize {
        match self.mode {
            Mode::Alphanumeric if gs1 => {
                self.chars(content).iter().map(|&c| if c == '%' { 2 } else { 1 }).sum()
            }
            _ => self.len,
        }
    }

    // Bits needed for the data part of this segment, excluding its header
    pub fn data_bit_len(&self, content: &[char], gs1: bool) -> usize {
        let units = self.unit_count(content, gs1);
        match self.mode {
            Mode::Numeric => units / 3 * 10 + [0, 4, 7][units % 3],
            Mode::Alphanumeric => units / 2 * 11 + (units % 2) * 6,
            Mode::Byte => units * 8,
            Mode::Kanji => units * 13,
        }
    }
}

// Kanji conversion
//------------------------------------------------------------------------------

// Converts a character to its 13 bit kanji value via Shift JIS
pub(crate) fn kanji_value(ch: char) -> QRResult<u16> {
    let mut buf = [0u8; 4];
    let (sjis, _, had_errors) = encoding_rs::SHIFT_JIS.encode(ch.encode_utf8(&mut buf));
    if had_errors || sjis.len() != 2 {
        return Err(QRError::InvalidCharacter(ch));
    }

    let sjw = ((sjis[0] as u16) << 8) | sjis[1] as u16;
    let offset = match sjw {
        0x8140..=0x9ffc => 0x8140,
        0xe040..=0xebbf => 0xc140,
        _ => return Err(QRError::InvalidCharacter(ch)),
    };
    let tmp = sjw - offset;
    let (msb, lsb) = (tmp >> 8, tmp & 0xff);
    if lsb >= 0xc0 {
        return Err(QRError::InvalidCharacter(ch));
    }

    Ok(msb * 0xc0 + lsb)
}
