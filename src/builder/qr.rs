use std::ops::Deref;

use crate::common::bit_utils::BitStream;
use crate::common::error::{QRError, QRResult};
use crate::common::iter::EncRegionIter;
use crate::common::mask::MaskPattern;
use crate::common::metadata::{Color, ECLevel, Version};
use crate::common::symbol::Symbol;

// Module
//------------------------------------------------------------------------------

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum ModuleKind {
    // Finder, separator, timing, alignment and the dark module
    Functional,
    // Format and version information
    Reserved,
    Data,
}

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub struct Module {
    pub kind: ModuleKind,
    pub color: Color,
}

impl Module {
    pub const fn new(kind: ModuleKind, color: Color) -> Self {
        Self { kind, color }
    }

    const fn func(color: Color) -> Self {
        Self::new(ModuleKind::Functional, color)
    }
}

impl Deref for Module {
    type Target = Color;
    fn deref(&self) -> &Self::Target {
        &self.color
    }
}

// Module grid
//------------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QR {
    grid: Vec<Module>,
    w: usize,
    ver: Version,
    ecl: ECLevel,
    mask: Option<MaskPattern>,
}

impl QR {
    pub fn new(ver: Version, ecl: ECLevel) -> Self {
        let w = ver.width();
        let grid = vec![Module::new(ModuleKind::Data, Color::Light); w * w];
        Self { grid, w, ver, ecl, mask: None }
    }

    pub fn grid(&self) -> &[Module] {
        &self.grid
    }

    pub fn version(&self) -> Version {
        self.ver
    }

    pub fn width(&self) -> usize {
        self.w
    }

    pub fn ec_level(&self) -> ECLevel {
        self.ecl
    }

    pub fn mask(&self) -> Option<MaskPattern> {
        self.mask
    }

    pub fn count_dark_modules(&self) -> usize {
        self.grid.iter().filter(|m| m.is_dark()).count()
    }

    pub fn info(&self) -> String {
        let mask = self.mask.map_or_else(|| "None".to_string(), |m| m.to_string());
        format!("Version: {}\nECC Level: {}\nMask Pattern: {}\n", self.ver, self.ecl, mask)
    }

    pub fn to_symbol(&self) -> Symbol {
        let rows = self
            .grid
            .chunks_exact(self.w)
            .map(|row| row.iter().map(|m| m.is_dark()).collect())
            .collect();
        Symbol { rows, row_heights: vec![1; self.w], info: self.info() }
    }

    #[cfg(test)]
    pub fn to_debug_str(&self) -> String {
        let w = self.w as i16;
        let mut res = String::with_capacity(self.w * (self.w + 1) + 1);
        res.push('\n');
        for i in 0..w {
            for j in 0..w {
                let m = self.get(i, j);
                let c = match (m.kind, m.color) {
                    (ModuleKind::Functional, Color::Dark) => 'f',
                    (ModuleKind::Functional, Color::Light) => 'F',
                    (ModuleKind::Reserved, Color::Dark) => 'r',
                    (ModuleKind::Reserved, Color::Light) => 'R',
                    (ModuleKind::Data, Color::Dark) => 'd',
                    (ModuleKind::Data, Color::Light) => '.',
                };
                res.push(c);
            }
            res.push('\n');
        }
        res
    }

    // Negative coordinates count from the bottom or right edge
    fn coord_to_index(&self, r: i16, c: i16) -> usize {
        let w = self.w as i16;
        debug_assert!(-w <= r && r < w, "Row {r} out of bounds for width {w}");
        debug_assert!(-w <= c && c < w, "Column {c} out of bounds for width {w}");

        let r = if r < 0 { r + w } else { r };
        let c = if c < 0 { c + w } else { c };
        (r * w + c) as _
    }

    pub fn get(&self, r: i16, c: i16) -> Module {
        self.grid[self.coord_to_index(r, c)]
    }

    pub fn get_mut(&mut self, r: i16, c: i16) -> &mut Module {
        let index = self.coord_to_index(r, c);
        &mut self.grid[index]
    }

    pub fn set(&mut self, r: i16, c: i16, module: Module) {
        *self.get_mut(r, c) = module;
    }

    fn set_color(&mut self, r: i16, c: i16, color: Color) {
        self.get_mut(r, c).color = color;
    }
}


// Finder pattern
//------------------------------------------------------------------------------

impl QR {
    fn draw_finder_patterns(&mut self) {
        self.draw_finder_pattern_at(3, 3);
        self.draw_finder_pattern_at(3, -4);
        self.draw_finder_pattern_at(-4, 3);
    }

    // Draws the 7x7 pattern centered at (r, c) with its light separator on the inner sides
    fn draw_finder_pattern_at(&mut self, r: i16, c: i16) {
        let (dr_top, dr_bottom) = if r > 0 { (-3, 4) } else { (-4, 3) };
        let (dc_left, dc_right) = if c > 0 { (-3, 4) } else { (-4, 3) };
        for i in dr_top..=dr_bottom {
            for j in dc_left..=dc_right {
                let ring = std::cmp::max(i16::abs(i), i16::abs(j));
                let color = match ring {
                    4 | 2 => Color::Light,
                    _ => Color::Dark,
                };
                self.set(r + i, c + j, Module::func(color));
            }
        }
    }

    // Finder and separator occupy the 8x8 corners
    fn overlaps_finder(&self, r: i16, c: i16) -> bool {
        let w = self.w as i16;
        let near = |x: i16| x < 8;
        let far = |x: i16| x >= w - 8;
        (near(r) && near(c)) || (near(r) && far(c)) || (far(r) && near(c))
    }
}

// Timing pattern
//------------------------------------------------------------------------------

impl QR {
    fn draw_timing_pattern(&mut self) {
        let w = self.w as i16;
        self.draw_line(6, 8, 6, w - 9);
        self.draw_line(8, 6, w - 9, 6);
    }

    // Alternates starting dark on even indices
    fn draw_line(&mut self, r1: i16, c1: i16, r2: i16, c2: i16) {
        debug_assert!(r1 == r2 || c1 == c2, "Line is neither vertical nor horizontal");

        if r1 == r2 {
            for j in c1..=c2 {
                self.set(r1, j, Module::func(Color::from(j & 1 == 0)));
            }
        } else {
            for i in r1..=r2 {
                self.set(i, c1, Module::func(Color::from(i & 1 == 0)));
            }
        }
    }
}

// Alignment pattern
//------------------------------------------------------------------------------

impl QR {
    fn draw_alignment_patterns(&mut self) {
        let poses = self.ver.alignment_pattern();
        for &r in poses {
            for &c in poses {
                if !self.overlaps_finder(r, c) {
                    self.draw_alignment_pattern_at(r, c);
                }
            }
        }
    }

    fn draw_alignment_pattern_at(&mut self, r: i16, c: i16) {
        for i in -2..=2 {
            for j in -2..=2 {
                let color = match (i, j) {
                    (-2 | 2, _) | (_, -2 | 2) | (0, 0) => Color::Dark,
                    _ => Color::Light,
                };
                self.set(r + i, c + j, Module::func(color));
            }
        }
    }
}

// Reserved areas
//------------------------------------------------------------------------------

impl QR {
    fn reserve_format_area(&mut self) {
        let w = self.w as i16;
        for i in 0..=8 {
            self.reserve(8, i);
            self.reserve(i, 8);
        }
        for i in 0..8 {
            self.reserve(8, w - 1 - i);
            self.reserve(w - 1 - i, 8);
        }
        self.set(-8, 8, Module::func(Color::Dark));
    }

    fn reserve_version_area(&mut self) {
        if self.ver.version_info().is_none() {
            return;
        }
        let w = self.w as i16;
        for i in 0..6 {
            for j in w - 11..w - 8 {
                self.reserve(j, i);
                self.reserve(i, j);
            }
        }
    }

    // Timing and separator modules crossing the strips stay functional
    fn reserve(&mut self, r: i16, c: i16) {
        let m = self.get_mut(r, c);
        if m.kind == ModuleKind::Data {
            *m = Module::new(ModuleKind::Reserved, Color::Light);
        }
    }
}

// All function patterns
//------------------------------------------------------------------------------

impl QR {
    pub fn draw_all_function_patterns(&mut self) {
        self.draw_finder_patterns();
        self.draw_timing_pattern();
        self.draw_alignment_patterns();
        self.reserve_format_area();
        self.reserve_version_area();
    }
}


// Encoding region
//------------------------------------------------------------------------------

impl QR {
    /// Places every bit of `payload`, most significant first, into the data modules in
    /// zig-zag order. Leftover data modules keep their light color.
    pub fn draw_encoding_region(&mut self, payload: &[u8]) -> QRResult<()> {
        let bits = BitStream::from(payload);
        let mut coords = EncRegionIter::new(self.ver);
        for bit in bits.iter() {
            let (r, c) = coords
                .by_ref()
                .find(|&(r, c)| self.get(r, c).kind == ModuleKind::Data)
                .ok_or(QRError::InternalOverflow)?;
            self.set_color(r, c, Color::from(bit));
        }
        Ok(())
    }

    pub fn apply_mask(&mut self, mask: MaskPattern) {
        let mask_fn = mask.mask_functions();
        let w = self.w as i16;
        for r in 0..w {
            for c in 0..w {
                let m = self.get_mut(r, c);
                if m.kind == ModuleKind::Data && mask_fn(r, c) {
                    m.color = !m.color;
                }
            }
        }
        self.mask = Some(mask);
    }
}


// Format & version info
//------------------------------------------------------------------------------

impl QR {
    pub fn draw_format_info(&mut self) {
        let Some(mask) = self.mask else {
            return;
        };
        let info = Version::format_info(self.ecl, mask);
        let bit = |i: usize| Color::from((info >> i) & 1 == 1);
        let w = self.w as i16;

        for i in 0..6 {
            self.set_color(i, 8, bit(i as usize));
            self.set_color(8, 5 - i, bit(i as usize + 9));
        }
        for i in 0..8 {
            self.set_color(8, w - 1 - i, bit(i as usize));
        }
        for i in 0..7 {
            self.set_color(w - 7 + i, 8, bit(i as usize + 8));
        }
        self.set_color(7, 8, bit(6));
        self.set_color(8, 8, bit(7));
        self.set_color(8, 7, bit(8));
    }

    pub fn draw_version_info(&mut self) {
        let Some(info) = self.ver.version_info() else {
            return;
        };
        let w = self.w as i16;
        for i in 0..6 {
            for j in 0..3 {
                let color = Color::from((info >> (i * 3 + j)) & 1 == 1);
                self.set_color(w - 11 + j as i16, i as i16, color);
                self.set_color(i as i16, w - 11 + j as i16, color);
            }
        }
    }
}

#[cfg(test)]
mod qr_information_tests {
    use super::QR;
    use crate::common::mask::MaskPattern;
    use crate::common::metadata::{ECLevel, Version};

    fn format_bits(qr: &QR, coords: &[(i16, i16)]) -> u32 {
        coords.iter().fold(0, |acc, &(r, c)| (acc << 1) | qr.get(r, c).is_dark() as u32)
    }

    #[test]
    fn test_format_info_copies_match() {
        let mut qr = QR::new(Version::new(2).unwrap(), ECLevel::M);
        qr.draw_all_function_patterns();
        qr.apply_mask(MaskPattern::new(5));
        qr.draw_format_info();

        let exp = Version::format_info(ECLevel::M, MaskPattern::new(5));
        // Most significant bit first
        let main = [
            (8, 0),
            (8, 1),
            (8, 2),
            (8, 3),
            (8, 4),
            (8, 5),
            (8, 7),
            (8, 8),
            (7, 8),
            (5, 8),
            (4, 8),
            (3, 8),
            (2, 8),
            (1, 8),
            (0, 8),
        ];
        let side = [
            (-1, 8),
            (-2, 8),
            (-3, 8),
            (-4, 8),
            (-5, 8),
            (-6, 8),
            (-7, 8),
            (8, -8),
            (8, -7),
            (8, -6),
            (8, -5),
            (8, -4),
            (8, -3),
            (8, -2),
            (8, -1),
        ];
        assert_eq!(format_bits(&qr, &main), exp);
        assert_eq!(format_bits(&qr, &side), exp);
        assert!(qr.get(-8, 8).is_dark());
    }

    #[test]
    fn test_version_info_7() {
        let mut qr = QR::new(Version::new(7).unwrap(), ECLevel::L);
        qr.draw_all_function_patterns();
        let before = qr.clone();
        qr.draw_version_info();

        let info = 0x07c94;
        for i in 0..6i16 {
            for j in 0..3i16 {
                let exp = (info >> (i * 3 + j)) & 1 == 1;
                assert_eq!(qr.get(45 - 11 + j, i).is_dark(), exp);
                assert_eq!(qr.get(i, 45 - 11 + j).is_dark(), exp);
            }
        }
        assert_ne!(qr, before);
    }

    #[test]
    fn test_version_info_6_untouched() {
        let mut qr = QR::new(Version::new(6).unwrap(), ECLevel::L);
        qr.draw_all_function_patterns();
        let before = qr.clone();
        qr.draw_version_info();
        assert_eq!(qr, before);
    }
}
