use std::fmt::{Display, Formatter};
use std::ops::Deref;

use super::metadata::Color;
use crate::builder::QR;

#[derive(Debug, PartialEq, Eq, Copy, Clone, PartialOrd, Ord, Hash)]
pub struct MaskPattern(u8);

impl MaskPattern {
    pub fn new(pattern: u8) -> Self {
        debug_assert!(pattern < 8, "Invalid masking pattern");
        Self(pattern & 0b111)
    }
}

impl Deref for MaskPattern {
    type Target = u8;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

// Pattern reference in binary without leading zeros, e.g. 101
impl Display for MaskPattern {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:b}", self.0)
    }
}

mod mask_functions {
    pub fn checkerboard(r: i16, c: i16) -> bool {
        (r + c) & 1 == 0
    }

    pub fn horizontal_lines(r: i16, _: i16) -> bool {
        r & 1 == 0
    }

    pub fn vertical_lines(_: i16, c: i16) -> bool {
        c % 3 == 0
    }

    pub fn diagonal_lines(r: i16, c: i16) -> bool {
        (r + c) % 3 == 0
    }

    pub fn large_checkerboard(r: i16, c: i16) -> bool {
        ((r >> 1) + (c / 3)) & 1 == 0
    }

    // Products reach 176 * 176, past i16
    pub fn fields(r: i16, c: i16) -> bool {
        let p = r as i32 * c as i32;
        (p & 1) + (p % 3) == 0
    }

    pub fn diamonds(r: i16, c: i16) -> bool {
        let p = r as i32 * c as i32;
        ((p & 1) + (p % 3)) & 1 == 0
    }

    pub fn meadow(r: i16, c: i16) -> bool {
        let p = r as i32 * c as i32;
        (((r + c) as i32 & 1) + (p % 3)) & 1 == 0
    }
}

impl MaskPattern {
    pub fn mask_functions(self) -> fn(i16, i16) -> bool {
        match *self {
            0b000 => mask_functions::checkerboard,
            0b001 => mask_functions::horizontal_lines,
            0b010 => mask_functions::vertical_lines,
            0b011 => mask_functions::diagonal_lines,
            0b100 => mask_functions::large_checkerboard,
            0b101 => mask_functions::fields,
            0b110 => mask_functions::diamonds,
            _ => mask_functions::meadow,
        }
    }
}

/// Tries all 8 patterns and keeps the first with the lowest penalty.
pub fn apply_best_mask(qr: &mut QR) -> MaskPattern {
    let score = |m: MaskPattern| {
        let mut qr = qr.clone();
        qr.apply_mask(m);
        let pen = compute_total_penalty(&qr);
        log::trace!("Mask {m} penalty {pen}");
        pen
    };
    let first = MaskPattern(0);
    let (best_mask, best_score) = (1..8).map(MaskPattern).fold((first, score(first)), |best, m| {
        let pen = score(m);
        if pen < best.1 {
            (m, pen)
        } else {
            best
        }
    });
    log::trace!("Best mask {best_mask} with penalty {best_score}");

    qr.apply_mask(best_mask);
    best_mask
}

pub fn compute_total_penalty(qr: &QR) -> u32 {
    let run_pen = compute_run_penalty(qr, true) + compute_run_penalty(qr, false);
    let fp_pen = compute_finder_pattern_penalty(qr, true) + compute_finder_pattern_penalty(qr, false);
    let bal_pen = compute_balance_penalty(qr);
    run_pen + fp_pen + bal_pen
}

fn line_color(qr: &QR, i: i16, j: i16, is_hor: bool) -> Color {
    if is_hor {
        *qr.get(i, j)
    } else {
        *qr.get(j, i)
    }
}

// Every maximal run longer than 5 costs 3 + its length
fn compute_run_penalty(qr: &QR, is_hor: bool) -> u32 {
    let run_pen = |len: u32| if len > 5 { 3 + len } else { 0 };
    let w = qr.width() as i16;
    let mut pen = 0;
    for i in 0..w {
        let mut last = line_color(qr, i, 0, is_hor);
        let mut run = 0;
        for j in 0..w {
            let clr = line_color(qr, i, j, is_hor);
            if clr != last {
                pen += run_pen(run);
                last = clr;
                run = 0;
            }
            run += 1;
        }
        pen += run_pen(run);
    }
    pen
}

// Dark-light-dark-dark-dark-light-dark in any 7 module window costs 40
fn compute_finder_pattern_penalty(qr: &QR, is_hor: bool) -> u32 {
    static PATTERN: [Color; 7] = [
        Color::Dark,
        Color::Light,
        Color::Dark,
        Color::Dark,
        Color::Dark,
        Color::Light,
        Color::Dark,
    ];
    let w = qr.width() as i16;
    let mut pen = 0;
    for i in 0..w {
        for j in 0..=w - 7 {
            if (j..j + 7).map(|k| line_color(qr, i, k, is_hor)).eq(PATTERN.iter().copied()) {
                pen += 40;
            }
        }
    }
    pen
}

// The inner division truncates first, so anything short of an all dark symbol reads as 0%
pub(crate) fn dark_percentage(dark: usize, total: usize) -> usize {
    100 * (dark / total)
}

fn compute_balance_penalty(qr: &QR) -> u32 {
    let w = qr.width();
    let pct = dark_percentage(qr.count_dark_modules(), w * w);
    10 * (pct.abs_diff(50) / 5) as u32
}
