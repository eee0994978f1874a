use super::rs::ReedSolomon;
use crate::common::error::{QRError, QRResult};
use crate::common::metadata::{ECLevel, Version};

// Block
//------------------------------------------------------------------------------

#[derive(Debug, PartialEq, Eq, Clone)]
pub struct Block<'a> {
    pub data: &'a [u8],
    // Transmission order, highest order coefficient first
    pub ecc: Vec<u8>,
}

/// Splits data codewords into blocks. When the count doesn't divide evenly, the trailing
/// blocks are one codeword longer.
pub fn blockify(data: &[u8], block_count: usize) -> Vec<&[u8]> {
    debug_assert!(block_count > 0, "Block count must be positive");

    let short_len = data.len() / block_count;
    let long_count = data.len() % block_count;
    let short_count = block_count - long_count;
    let split = short_len * short_count;

    let mut blocks = Vec::with_capacity(block_count);
    if short_len > 0 {
        blocks.extend(data[..split].chunks(short_len));
    }
    blocks.extend(data[split..].chunks(short_len + 1));
    blocks
}

/// Splits data into the blocks of `version` and `ec_level` and computes parity for each.
pub fn ecc(data: &[u8], version: Version, ec_level: ECLevel) -> QRResult<Vec<Block>> {
    if data.len() != version.data_codewords(ec_level) {
        return Err(QRError::InternalOverflow);
    }

    let rs = ReedSolomon::qr(version.ecc_per_block(ec_level))?;
    blockify(data, version.block_count(ec_level))
        .into_iter()
        .map(|b| {
            let mut ecc = rs.encode(b)?;
            ecc.reverse();
            Ok(Block { data: b, ecc })
        })
        .collect()
}

// Takes the i-th element of every sequence in turn, skipping sequences that have run out
pub fn interleave<T: Copy, V: AsRef<[T]>>(seqs: &[V]) -> Vec<T> {
    let max_len = seqs.iter().map(|s| s.as_ref().len()).max().unwrap_or(0);
    let total = seqs.iter().map(|s| s.as_ref().len()).sum();
    let mut res = Vec::with_capacity(total);
    for i in 0..max_len {
        res.extend(seqs.iter().filter_map(|s| s.as_ref().get(i)));
    }
    res
}

/// Full codeword stream in transmission order: interleaved data followed by interleaved
/// parity.
pub fn interleave_blocks(blocks: &[Block]) -> Vec<u8> {
    let data = blocks.iter().map(|b| b.data).collect::<Vec<_>>();
    let ecc = blocks.iter().map(|b| b.ecc.as_slice()).collect::<Vec<_>>();
    let mut res = interleave(&data);
    res.extend(interleave(&ecc));
    res
}
