mod capacity;
mod segment;
mod types;
mod writer;

pub use capacity::*;
pub use segment::*;
pub use types::*;
pub use writer::*;

use crate::common::error::{QRError, QRResult};
use crate::common::metadata::{ECLevel, Version};

// Encoded data
//------------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedData {
    pub segments: Vec<Segment>,
    pub version: Version,
    pub ec_level: ECLevel,
    // Data codewords, padded to the capacity of version and ec level
    pub codewords: Vec<u8>,
}

impl EncodedData {
    pub fn mode_map(&self) -> String {
        segment::mode_map(&self.segments)
    }
}

/// Segments the content, picks version and ec level, and writes the padded data
/// codewords.
pub fn encode(
    content: &[char],
    gs1: bool,
    ecl: ECLevel,
    forced: Option<Version>,
) -> QRResult<EncodedData> {
    if content.is_empty() {
        return Err(QRError::EmptyData);
    }

    let segments = compute_segments(content, gs1);
    let Selection { version, ec_level, .. } = select_version(&segments, content, gs1, ecl, forced)?;
    let codewords =
        encode_segments(&segments, content, gs1, version, version.data_codewords(ec_level))?;

    Ok(EncodedData { segments, version, ec_level, codewords })
}
