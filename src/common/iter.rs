use super::metadata::Version;

// Column of the vertical timing pattern, skipped by data placement
const TIMING_COL: i16 = 6;

// Iterator for placing data in encoding region of QR
//------------------------------------------------------------------------------

/// Visits every module in data placement order: two-column strips from the right edge,
/// alternating upward and downward, right module before left.
pub struct EncRegionIter {
    r: i16,
    // Right column of the current strip
    c: i16,
    width: i16,
    upward: bool,
    // Whether the right module of the current row is done
    on_left: bool,
}

impl EncRegionIter {
    pub const fn new(version: Version) -> Self {
        let w = version.width() as i16;
        Self { r: w - 1, c: w - 1, width: w, upward: true, on_left: false }
    }
}

impl Iterator for EncRegionIter {
    type Item = (i16, i16);
    fn next(&mut self) -> Option<Self::Item> {
        if self.c < 0 {
            return None;
        }
        if !self.on_left {
            self.on_left = true;
            return Some((self.r, self.c));
        }

        let res = (self.r, self.c - 1);
        self.on_left = false;
        match self.upward {
            true if self.r > 0 => self.r -= 1,
            false if self.r < self.width - 1 => self.r += 1,
            _ => {
                self.upward = !self.upward;
                self.c -= 2;
                if self.c == TIMING_COL {
                    self.c -= 1;
                }
            }
        }
        Some(res)
    }
}
