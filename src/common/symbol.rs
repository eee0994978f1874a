use std::fmt::{Display, Formatter};

// Symbol
//------------------------------------------------------------------------------

/// Finished symbol handed to a renderer: one bool per module, `true` for dark.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Symbol {
    pub rows: Vec<Vec<bool>>,
    // Height of each row in modules
    pub row_heights: Vec<usize>,
    pub info: String,
}

impl Symbol {
    pub fn width(&self) -> usize {
        self.rows.first().map_or(0, |r| r.len())
    }

    pub fn height(&self) -> usize {
        self.rows.len()
    }

    pub fn to_bit_strings(&self) -> Vec<String> {
        self.rows
            .iter()
            .map(|r| r.iter().map(|&dark| if dark { '1' } else { '0' }).collect())
            .collect()
    }
}

impl Display for Symbol {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        for row in &self.rows {
            let line = row.iter().map(|&dark| if dark { '#' } else { '.' }).collect::<String>();
            writeln!(f, "{line}")?;
        }
        Ok(())
    }
}
