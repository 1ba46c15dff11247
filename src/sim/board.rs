//! Peg board geometry
//!
//! The board is a widening triangle of pegs on an integer lattice. Row `i`
//! (0-indexed from the apex) holds `i + 1` pegs, each one lattice step (±1)
//! from its diagonal neighbours in the row above, so pegs within a row sit
//! two positions apart. The apex is at `ceil(columns / 2)`. The row below the
//! last peg row holds the bucket positions.
//!
//! A ball starting at the apex and moving ±1 per row always ends on a
//! position with the same parity as `2 * rows`, i.e. an even one, so the
//! bucket it lands in is simply `position / 2`.

use serde::{Deserialize, Serialize};

/// Number of lattice columns spanned by a board with `rows` rows (odd for `rows >= 1`)
#[inline]
pub fn columns_for(rows: u32) -> u32 {
    (2 * rows).saturating_sub(1)
}

/// Center column for a board `columns` wide: `ceil(columns / 2)`
#[inline]
pub fn midpoint(columns: u32) -> i32 {
    columns.div_ceil(2) as i32
}

/// Horizontal positions of every peg row plus the bucket row.
///
/// Returns `rows + 1` rows; row `i` has `i + 1` entries. The last row is the
/// bucket-alignment row. `rows` must be at least 1.
pub fn derive_coordinates(rows: u32) -> Vec<Vec<i32>> {
    let rows = if rows == 0 {
        log::warn!("Board requested with 0 rows, using 1");
        1
    } else {
        rows
    };

    let mut coords: Vec<Vec<i32>> = Vec::with_capacity(rows as usize + 1);
    coords.push(vec![midpoint(columns_for(rows))]);

    for i in 1..=rows as usize {
        let prev = &coords[i - 1];
        let mut next = Vec::with_capacity(i + 1);
        next.push(prev[0] - 1);
        next.extend(prev.iter().map(|x| x + 1));
        coords.push(next);
    }

    coords
}

/// Board coordinates split into peg rows and the bucket row
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardLayout {
    pub rows: u32,
    pub columns: u32,
    /// Center column; the apex peg and every ball start here
    pub mid: i32,
    /// Peg positions, one row per board row
    pub pegs: Vec<Vec<i32>>,
    /// Bucket positions, one per multiplier
    pub buckets: Vec<i32>,
}

impl BoardLayout {
    pub fn new(rows: u32) -> Self {
        let mut pegs = derive_coordinates(rows);
        // derive_coordinates always returns at least two rows
        let buckets = pegs.pop().unwrap_or_default();
        let rows = pegs.len() as u32;
        let columns = columns_for(rows);

        Self {
            rows,
            columns,
            mid: midpoint(columns),
            pegs,
            buckets,
        }
    }

    /// Offset of a lattice position from the board center, in peg gaps
    #[inline]
    pub fn offset(&self, position: i32) -> i32 {
        position - self.mid
    }

    /// Number of buckets under the board
    pub fn bucket_count(&self) -> usize {
        self.buckets.len()
    }
}
