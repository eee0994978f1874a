use super::types::{
    kanji_value, Mode, Segment, ALPHANUMERIC_FNC1, BYTE_FNC1, FNC1_FIRST, PADDING_CODEWORDS,
};
use crate::common::bit_utils::BitStream;
use crate::common::error::{QRError, QRResult};
use crate::common::metadata::Version;

/// Writes all segments for `ver` and pads the result to exactly `data_codewords`
/// codewords.
pub fn encode_segments(
    segs: &[Segment],
    content: &[char],
    gs1: bool,
    ver: Version,
    data_codewords: usize,
) -> QRResult<Vec<u8>> {
    let bit_capacity = data_codewords << 3;
    let mut bs = BitStream::with_capacity(bit_capacity);
    if gs1 {
        bs.push_bits(FNC1_FIRST, 4);
    }
    for seg in segs {
        push_segment(seg, content, gs1, ver, &mut bs)?;
    }
    if bs.len() > bit_capacity {
        return Err(QRError::InternalOverflow);
    }

    push_terminator(&mut bs, bit_capacity);
    push_padding_bits(&mut bs);
    push_padding_codewords(&mut bs, bit_capacity);
    debug_assert_eq!(bs.len(), bit_capacity);

    Ok(bs.into_codewords())
}

fn push_segment(
    seg: &Segment,
    content: &[char],
    gs1: bool,
    ver: Version,
    out: &mut BitStream,
) -> QRResult<()> {
    // Counts encoded symbols rather than characters, so an escaped GS1 '%' counts twice
    push_header(seg, seg.unit_count(content, gs1), ver, out)?;
    let chars = seg.chars(content);
    match seg.mode {
        Mode::Numeric => push_numeric_data(chars, out),
        Mode::Alphanumeric => push_alphanumeric_data(chars, gs1, out),
        Mode::Byte => push_byte_data(chars, gs1, out),
        Mode::Kanji => push_kanji_data(chars, out),
    }
}

fn push_header(seg: &Segment, char_cnt: usize, ver: Version, out: &mut BitStream) -> QRResult<()> {
    let len_bits = ver.char_cnt_bits(seg.mode);
    if char_cnt >= (1 << len_bits) {
        return Err(QRError::InternalOverflow);
    }
    out.push_bits(seg.mode as u8, ver.mode_bits());
    out.push_bits(char_cnt as u16, len_bits);
    Ok(())
}

fn push_numeric_data(data: &[char], out: &mut BitStream) -> QRResult<()> {
    for chunk in data.chunks(3) {
        let mut num = 0;
        for &c in chunk {
            let digit = c.to_digit(10).ok_or(QRError::InvalidCharacter(c))?;
            num = num * 10 + digit as u16;
        }
        out.push_bits(num, chunk.len() * 3 + 1);
    }
    Ok(())
}

fn push_alphanumeric_data(data: &[char], gs1: bool, out: &mut BitStream) -> QRResult<()> {
    let mut symbols = Vec::with_capacity(data.len());
    for &c in data {
        match c {
            '%' if gs1 => symbols.extend([ALPHANUMERIC_FNC1; 2]),
            '[' if gs1 => symbols.push(ALPHANUMERIC_FNC1),
            _ => symbols.push(Mode::alphanumeric_digit(c).ok_or(QRError::InvalidCharacter(c))?),
        }
    }
    for chunk in symbols.chunks(2) {
        if let [first, second] = *chunk {
            out.push_bits(first * 45 + second, 11);
        } else {
            out.push_bits(chunk[0], 6);
        }
    }
    Ok(())
}

fn push_byte_data(data: &[char], gs1: bool, out: &mut BitStream) -> QRResult<()> {
    for &c in data {
        let byte = match c {
            '[' if gs1 => BYTE_FNC1,
            _ => u8::try_from(c as u32).map_err(|_| QRError::InvalidCharacter(c))?,
        };
        out.push_bits(byte, 8);
    }
    Ok(())
}

fn push_kanji_data(data: &[char], out: &mut BitStream) -> QRResult<()> {
    for &c in data {
        out.push_bits(kanji_value(c)?, 13);
    }
    Ok(())
}

fn push_terminator(out: &mut BitStream, bit_capacity: usize) {
    let bit_len = out.len();
    if bit_len < bit_capacity {
        let term_len = std::cmp::min(4, bit_capacity - bit_len);
        out.push_bits(0, term_len);
    }
}

fn push_padding_bits(out: &mut BitStream) {
    let offset = out.len() & 7;
    if offset > 0 {
        out.push_bits(0, 8 - offset);
    }
}

fn push_padding_codewords(out: &mut BitStream, bit_capacity: usize) {
    debug_assert!(out.len() & 7 == 0, "Bit offset should be zero before padding codewords");

    let remain_byte_capacity = (bit_capacity - out.len()) >> 3;
    PADDING_CODEWORDS.iter().copied().cycle().take(remain_byte_capacity).for_each(|pc| {
        out.push_bits(pc, 8);
    });
}
