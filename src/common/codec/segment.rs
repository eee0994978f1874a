use super::types::{Mode, Segment};

// Runs shorter than these are folded into the next wider mode
pub(crate) const NUMERIC_RUN_MIN: usize = 6;
pub(crate) const ALPHANUMERIC_RUN_MIN: usize = 6;

/// Splits content into maximal runs of a single mode.
///
/// Every character is classified on its own, then short numeric runs are widened to
/// alphanumeric and short alphanumeric runs to byte, in that order. What remains is
/// merged into segments.
pub fn compute_segments(content: &[char], gs1: bool) -> Vec<Segment> {
    let mut modes = classify(content, gs1);
    demote_short_runs(&mut modes, Mode::Numeric, Mode::Alphanumeric, NUMERIC_RUN_MIN);
    demote_short_runs(&mut modes, Mode::Alphanumeric, Mode::Byte, ALPHANUMERIC_RUN_MIN);
    build_segments(&modes)
}

pub(crate) fn classify(content: &[char], gs1: bool) -> Vec<Mode> {
    content.iter().map(|&c| Mode::of(c, gs1)).collect()
}

pub(crate) fn demote_short_runs(modes: &mut [Mode], from: Mode, to: Mode, min_len: usize) {
    let mut i = 0;
    while i < modes.len() {
        let run = run_len(&modes[i..]);
        if modes[i] == from && run < min_len {
            modes[i..i + run].fill(to);
        }
        i += run;
    }
}

fn run_len(modes: &[Mode]) -> usize {
    match modes.first() {
        Some(&m) => modes.iter().take_while(|&&n| n == m).count(),
        None => 0,
    }
}

pub(crate) fn build_segments(modes: &[Mode]) -> Vec<Segment> {
    let mut segs = Vec::new();
    let mut start = 0;
    while start < modes.len() {
        let len = run_len(&modes[start..]);
        segs.push(Segment::new(modes[start], start, len));
        start += len;
    }
    segs
}

pub(crate) fn mode_map(segs: &[Segment]) -> String {
    segs.iter().flat_map(|s| std::iter::repeat(s.mode.tag()).take(s.len)).collect()
}
