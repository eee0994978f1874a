use super::types::Segment;
use crate::common::error::{QRError, QRResult};
use crate::common::metadata::{ECLevel, Version};

/// Worst case bit length of the encoded segments, using the count indicator widths of
/// `ver`'s bracket.
pub fn estimate_bit_len(segs: &[Segment], content: &[char], gs1: bool, ver: Version) -> usize {
    let fnc1 = if gs1 { 4 } else { 0 };
    fnc1 + segs
        .iter()
        .map(|s| ver.mode_bits() + ver.char_cnt_bits(s.mode) + s.data_bit_len(content, gs1))
        .sum::<usize>()
}

#[derive(Debug, PartialEq, Eq, Copy, Clone)]
pub struct Selection {
    pub version: Version,
    pub ec_level: ECLevel,
    // Estimate for the selected version's bracket
    pub bit_len: usize,
}

/// Picks the smallest version holding the content at the requested level, honours a
/// larger forced version, then raises the level as far as the version allows.
pub fn select_version(
    segs: &[Segment],
    content: &[char],
    gs1: bool,
    ecl: ECLevel,
    forced: Option<Version>,
) -> QRResult<Selection> {
    let estimates = Version::BRACKET_STARTS.map(|v| estimate_bit_len(segs, content, gs1, v));

    let max_bits = estimates[Version::MAX.bracket()];
    let capacity = Version::MAX.data_bit_capacity(ecl);
    if max_bits > capacity {
        return Err(QRError::CapacityExceeded { bits: max_bits, capacity });
    }

    let fits = |v: &Version| estimates[v.bracket()] <= v.data_bit_capacity(ecl);
    let min_ver =
        Version::all().find(fits).ok_or(QRError::CapacityExceeded { bits: max_bits, capacity })?;

    let version = match forced {
        Some(f) if f > min_ver => {
            // A wider count indicator bracket can push the data past a larger forced version
            let ver = Version::all()
                .skip_while(|v| *v < f)
                .find(fits)
                .ok_or(QRError::CapacityExceeded { bits: max_bits, capacity })?;
            if ver != f {
                log::debug!("Forced version {f} cannot hold the data, using version {ver}");
            }
            ver
        }
        Some(f) => {
            if f < min_ver {
                log::debug!("Forced version {f} is below minimum version {min_ver}, ignoring");
            }
            min_ver
        }
        None => min_ver,
    };

    let bit_len = estimates[version.bracket()];
    let ec_level = [ECLevel::M, ECLevel::Q, ECLevel::H]
        .into_iter()
        .fold(ecl, |acc, l| if bit_len <= version.data_bit_capacity(l) { l } else { acc });

    Ok(Selection { version, ec_level, bit_len })
}
