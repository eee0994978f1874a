use std::fmt::{Display, Formatter};
use std::ops::{Deref, Not};

use super::codec::Mode;
use super::error::{QRError, QRResult};
use super::mask::MaskPattern;

// Color
//------------------------------------------------------------------------------

#[derive(Debug, PartialEq, Eq, Copy, Clone, Default)]
pub enum Color {
    #[default]
    Light,
    Dark,
}

impl Color {
    pub fn is_dark(self) -> bool {
        self == Self::Dark
    }
}

impl From<bool> for Color {
    fn from(dark: bool) -> Self {
        if dark {
            Self::Dark
        } else {
            Self::Light
        }
    }
}

impl Not for Color {
    type Output = Self;
    fn not(self) -> Self::Output {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }
}

// Error correction level
//------------------------------------------------------------------------------

#[derive(Debug, PartialEq, Eq, Copy, Clone, PartialOrd, Ord, Hash, Default)]
pub enum ECLevel {
    #[default]
    L = 0,
    M = 1,
    Q = 2,
    H = 3,
}

impl ECLevel {
    pub const ALL: [ECLevel; 4] = [Self::L, Self::M, Self::Q, Self::H];

    /// Maps the numeric option 1..=4 onto L, M, Q, H. Anything else falls back to L.
    pub fn from_option(option: u8) -> Self {
        match option {
            2 => Self::M,
            3 => Self::Q,
            4 => Self::H,
            _ => Self::L,
        }
    }

    // 2-bit indicator used in format information
    pub(crate) fn format_bits(self) -> usize {
        match self {
            Self::L => 0b01,
            Self::M => 0b00,
            Self::Q => 0b11,
            Self::H => 0b10,
        }
    }
}

impl Display for ECLevel {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{self:?}")
    }
}

// Version
//------------------------------------------------------------------------------

#[derive(Debug, PartialEq, Eq, Copy, Clone, PartialOrd, Ord, Hash)]
pub struct Version(usize);

impl Deref for Version {
    type Target = usize;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl Display for Version {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Version {
    pub const MIN: Version = Version(1);
    pub const MAX: Version = Version(40);

    // First version of each count indicator bracket
    pub(crate) const BRACKET_STARTS: [Version; 3] = [Version(1), Version(10), Version(27)];

    pub fn new(version: usize) -> QRResult<Self> {
        match version {
            1..=40 => Ok(Self(version)),
            _ => Err(QRError::InvalidVersion),
        }
    }

    pub(crate) fn all() -> impl Iterator<Item = Version> {
        (1..=40).map(Version)
    }

    pub const fn width(self) -> usize {
        self.0 * 4 + 17
    }

    // Count indicator widths change at versions 10 and 27
    pub fn bracket(self) -> usize {
        match self.0 {
            1..=9 => 0,
            10..=26 => 1,
            _ => 2,
        }
    }

    pub fn mode_bits(self) -> usize {
        4
    }

    pub fn char_cnt_bits(self, mode: Mode) -> usize {
        let bracket = self.bracket();
        match mode {
            Mode::Numeric => [10, 12, 14][bracket],
            Mode::Alphanumeric => [9, 11, 13][bracket],
            Mode::Byte => [8, 16, 16][bracket],
            Mode::Kanji => [8, 10, 12][bracket],
        }
    }

    pub fn total_codewords(self) -> usize {
        TOTAL_CODEWORDS[self.0 - 1]
    }

    pub fn data_codewords(self, ecl: ECLevel) -> usize {
        DATA_CODEWORDS[ecl as usize][self.0 - 1]
    }

    pub fn data_bit_capacity(self, ecl: ECLevel) -> usize {
        self.data_codewords(ecl) << 3
    }

    pub fn block_count(self, ecl: ECLevel) -> usize {
        BLOCK_COUNT[ecl as usize][self.0 - 1]
    }

    pub fn ecc_per_block(self, ecl: ECLevel) -> usize {
        let ecc_total = self.total_codewords() - self.data_codewords(ecl);
        let blocks = self.block_count(ecl);
        debug_assert!(
            ecc_total % blocks == 0,
            "Parity codewords {ecc_total} not divisible by block count {blocks}"
        );
        ecc_total / blocks
    }

    pub fn alignment_pattern(self) -> &'static [i16] {
        ALIGNMENT_PATTERN_POSITIONS[self.0 - 1]
    }

    pub fn format_info(ecl: ECLevel, mask: MaskPattern) -> u32 {
        FORMAT_INFO[(ecl.format_bits() << 3) | *mask as usize]
    }

    pub fn version_info(self) -> Option<u32> {
        match self.0 {
            7..=40 => Some(VERSION_INFO[self.0 - 7]),
            _ => None,
        }
    }
}

#[cfg(test)]
mod version_tests {
    use test_case::test_case;

    use super::{ECLevel, Version};
    use crate::common::codec::Mode;
    use crate::common::mask::MaskPattern;

    #[test]
    fn test_new() {
        assert!(Version::new(0).is_err());
        assert!(Version::new(41).is_err());
        assert_eq!(*Version::new(7).unwrap(), 7);
    }

    #[test_case(1, 21)]
    #[test_case(7, 45)]
    #[test_case(40, 177)]
    fn test_width(ver: usize, width: usize) {
        assert_eq!(Version::new(ver).unwrap().width(), width);
    }

    #[test_case(9, Mode::Numeric, 10)]
    #[test_case(10, Mode::Numeric, 12)]
    #[test_case(27, Mode::Numeric, 14)]
    #[test_case(1, Mode::Byte, 8)]
    #[test_case(26, Mode::Byte, 16)]
    #[test_case(26, Mode::Kanji, 10)]
    #[test_case(40, Mode::Alphanumeric, 13)]
    fn test_char_cnt_bits(ver: usize, mode: Mode, bits: usize) {
        assert_eq!(Version::new(ver).unwrap().char_cnt_bits(mode), bits);
    }

    #[test]
    fn test_blocks_divide_parity_evenly() {
        for ver in Version::all() {
            for ecl in ECLevel::ALL {
                let parity = ver.total_codewords() - ver.data_codewords(ecl);
                assert_eq!(parity % ver.block_count(ecl), 0, "Version {ver}, Ec level {ecl}");
            }
        }
    }

    #[test]
    fn test_capacity_decreases_with_ec_level() {
        for ver in Version::all() {
            let caps = ECLevel::ALL.map(|ecl| ver.data_codewords(ecl));
            assert!(caps.windows(2).all(|w| w[0] > w[1]), "Version {ver}: {caps:?}");
        }
    }

    #[test]
    fn test_format_info() {
        assert_eq!(Version::format_info(ECLevel::M, MaskPattern::new(0)), 0x5412);
        assert_eq!(Version::format_info(ECLevel::L, MaskPattern::new(0)), 0x77c4);
        assert_eq!(Version::format_info(ECLevel::H, MaskPattern::new(7)), 0x083b);
        assert_eq!(Version::format_info(ECLevel::Q, MaskPattern::new(7)), 0x2bed);
    }

    #[test]
    fn test_version_info() {
        assert_eq!(Version::new(6).unwrap().version_info(), None);
        assert_eq!(Version::new(7).unwrap().version_info(), Some(0x07c94));
        assert_eq!(Version::new(40).unwrap().version_info(), Some(0x28c69));
    }
}

// Global constants
//------------------------------------------------------------------------------

static TOTAL_CODEWORDS: [usize; 40] = [
    26, 44, 70, 100, 134, 172, 196, 242, 292, 346, 404, 466, 532, 581, 655, 733, 815, 901, 991,
    1085, 1156, 1258, 1364, 1474, 1588, 1706, 1828, 1921, 2051, 2185, 2323, 2465, 2611, 2761, 2876,
    3034, 3196, 3362, 3532, 3706,
];

static DATA_CODEWORDS: [[usize; 40]; 4] = [
    [
        19, 34, 55, 80, 108, 136, 156, 194, 232, 274, 324, 370, 428, 461, 523, 589, 647, 721, 795,
        861, 932, 1006, 1094, 1174, 1276, 1370, 1468, 1531, 1631, 1735, 1843, 1955, 2071, 2191,
        2306, 2434, 2566, 2702, 2812, 2956,
    ],
    [
        16, 28, 44, 64, 86, 108, 124, 154, 182, 216, 254, 290, 334, 365, 415, 453, 507, 563, 627,
        669, 714, 782, 860, 914, 1000, 1062, 1128, 1193, 1267, 1373, 1455, 1541, 1631, 1725, 1812,
        1914, 1992, 2102, 2216, 2334,
    ],
    [
        13, 22, 34, 48, 62, 76, 88, 110, 132, 154, 180, 206, 244, 261, 295, 325, 367, 397, 445,
        485, 512, 568, 614, 664, 718, 754, 808, 871, 911, 985, 1033, 1115, 1171, 1231, 1286, 1354,
        1426, 1502, 1582, 1666,
    ],
    [
        9, 16, 26, 36, 46, 60, 66, 86, 100, 122, 140, 158, 180, 197, 223, 253, 283, 313, 341, 385,
        406, 442, 464, 514, 538, 596, 628, 661, 701, 745, 793, 845, 901, 961, 986, 1054, 1096,
        1142, 1222, 1276,
    ],
];

static BLOCK_COUNT: [[usize; 40]; 4] = [
    [
        1, 1, 1, 1, 1, 2, 2, 2, 2, 4, 4, 4, 4, 4, 6, 6, 6, 6, 7, 8, 8, 9, 9, 10, 12, 12, 12, 13,
        14, 15, 16, 17, 18, 19, 19, 20, 21, 22, 24, 25,
    ],
    [
        1, 1, 1, 2, 2, 4, 4, 4, 5, 5, 5, 8, 9, 9, 10, 10, 11, 13, 14, 16, 17, 17, 18, 20, 21, 23,
        25, 26, 28, 29, 31, 33, 35, 37, 38, 40, 43, 45, 47, 49,
    ],
    [
        1, 1, 2, 2, 4, 4, 6, 6, 8, 8, 8, 10, 12, 16, 12, 17, 16, 18, 21, 20, 23, 23, 25, 27, 29,
        34, 34, 35, 38, 40, 43, 45, 48, 51, 53, 56, 59, 62, 65, 68,
    ],
    [
        1, 1, 2, 4, 4, 4, 5, 6, 8, 8, 11, 11, 16, 16, 18, 16, 19, 21, 25, 25, 25, 34, 30, 32, 35,
        37, 40, 42, 45, 48, 51, 54, 57, 60, 63, 66, 70, 74, 77, 81,
    ],
];

static ALIGNMENT_PATTERN_POSITIONS: [&[i16]; 40] = [
    &[],
    &[6, 18],
    &[6, 22],
    &[6, 26],
    &[6, 30],
    &[6, 34],
    &[6, 22, 38],
    &[6, 24, 42],
    &[6, 26, 46],
    &[6, 28, 50],
    &[6, 30, 54],
    &[6, 32, 58],
    &[6, 34, 62],
    &[6, 26, 46, 66],
    &[6, 26, 48, 70],
    &[6, 26, 50, 74],
    &[6, 30, 54, 78],
    &[6, 30, 56, 82],
    &[6, 30, 58, 86],
    &[6, 34, 62, 90],
    &[6, 28, 50, 72, 94],
    &[6, 26, 50, 74, 98],
    &[6, 30, 54, 78, 102],
    &[6, 28, 54, 80, 106],
    &[6, 32, 58, 84, 110],
    &[6, 30, 58, 86, 114],
    &[6, 34, 62, 90, 118],
    &[6, 26, 50, 74, 98, 122],
    &[6, 30, 54, 78, 102, 126],
    &[6, 26, 52, 78, 104, 130],
    &[6, 30, 56, 82, 108, 134],
    &[6, 34, 60, 86, 112, 138],
    &[6, 30, 58, 86, 114, 142],
    &[6, 34, 62, 90, 118, 146],
    &[6, 30, 54, 78, 102, 126, 150],
    &[6, 24, 50, 76, 102, 128, 154],
    &[6, 28, 54, 80, 106, 132, 158],
    &[6, 32, 58, 84, 110, 136, 162],
    &[6, 26, 54, 82, 110, 138, 166],
    &[6, 30, 58, 86, 114, 142, 170],
];

// BCH(15,5) format sequences, indexed by (ec level indicator << 3) | mask
static FORMAT_INFO: [u32; 32] = [
    0x5412, 0x5125, 0x5e7c, 0x5b4b, 0x45f9, 0x40ce, 0x4f97, 0x4aa0, 0x77c4, 0x72f3, 0x7daa, 0x789d,
    0x662f, 0x6318, 0x6c41, 0x6976, 0x1689, 0x13be, 0x1ce7, 0x19d0, 0x0762, 0x0255, 0x0d0c, 0x083b,
    0x355f, 0x3068, 0x3f31, 0x3a06, 0x24b4, 0x2183, 0x2eda, 0x2bed,
];

// BCH(18,6) version sequences for versions 7..=40
static VERSION_INFO: [u32; 34] = [
    0x07c94, 0x085bc, 0x09a99, 0x0a4d3, 0x0bbf6, 0x0c762, 0x0d847, 0x0e60d, 0x0f928, 0x10b78,
    0x1145d, 0x12a17, 0x13532, 0x149a6, 0x15683, 0x168c9, 0x177ec, 0x18ec4, 0x191e1, 0x1afab,
    0x1b08e, 0x1cc1a, 0x1d33f, 0x1ed75, 0x1f250, 0x209d5, 0x216f0, 0x228ba, 0x2379f, 0x24b0b,
    0x2542e, 0x26a64, 0x27541, 0x28c69,
];
