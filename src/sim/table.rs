//! Board sizes and their fixed payout tables

use serde::{Deserialize, Serialize};

use super::board::columns_for;

const MULTIPLIERS_10: [f64; 11] = [10.0, 3.4, 1.8, 0.9, 0.5, 0.2, 0.5, 0.9, 1.8, 3.4, 10.0];
const MULTIPLIERS_12: [f64; 13] = [
    25.0, 8.8, 4.4, 0.9, 0.5, 0.2, 0.1, 0.2, 0.5, 0.9, 4.4, 8.8, 25.0,
];
const MULTIPLIERS_14: [f64; 15] = [
    500.0, 200.0, 50.0, 25.0, 3.6, 0.6, 0.2, 0.1, 0.2, 0.6, 3.6, 25.0, 50.0, 200.0, 500.0,
];

/// Supported board sizes (row counts)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(into = "u32", try_from = "u32")]
pub enum BoardSize {
    #[default]
    Ten,
    Twelve,
    Fourteen,
}

impl BoardSize {
    pub const ALL: [BoardSize; 3] = [BoardSize::Ten, BoardSize::Twelve, BoardSize::Fourteen];

    /// Number of peg rows
    pub fn rows(&self) -> u32 {
        match self {
            BoardSize::Ten => 10,
            BoardSize::Twelve => 12,
            BoardSize::Fourteen => 14,
        }
    }

    pub fn from_rows(rows: u32) -> Option<Self> {
        match rows {
            10 => Some(BoardSize::Ten),
            12 => Some(BoardSize::Twelve),
            14 => Some(BoardSize::Fourteen),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            BoardSize::Ten => "10",
            BoardSize::Twelve => "12",
            BoardSize::Fourteen => "14",
        }
    }

    /// Payout multipliers, one per bucket, left to right
    pub fn multipliers(&self) -> &'static [f64] {
        match self {
            BoardSize::Ten => &MULTIPLIERS_10,
            BoardSize::Twelve => &MULTIPLIERS_12,
            BoardSize::Fourteen => &MULTIPLIERS_14,
        }
    }
}

impl std::str::FromStr for BoardSize {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let rows: u32 = s.trim().parse().map_err(|_| format!("not a row count: {s:?}"))?;
        Self::from_rows(rows).ok_or_else(|| format!("unsupported row count: {rows}"))
    }
}

impl From<BoardSize> for u32 {
    fn from(size: BoardSize) -> Self {
        size.rows()
    }
}

impl TryFrom<u32> for BoardSize {
    type Error = String;

    fn try_from(rows: u32) -> Result<Self, Self::Error> {
        Self::from_rows(rows).ok_or_else(|| format!("unsupported row count: {rows}"))
    }
}

/// Active board configuration. Rows, columns and multipliers always agree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoardConfig {
    size: BoardSize,
    columns: u32,
    multipliers: Vec<f64>,
}

impl BoardConfig {
    pub fn new(size: BoardSize) -> Self {
        Self {
            size,
            columns: columns_for(size.rows()),
            multipliers: size.multipliers().to_vec(),
        }
    }

    pub fn rows(&self) -> u32 {
        self.size.rows()
    }

    pub fn columns(&self) -> u32 {
        self.columns
    }

    pub fn multipliers(&self) -> &[f64] {
        &self.multipliers
    }

    /// Multiplier for a bucket, wrapping out-of-range indices
    pub fn multiplier(&self, bucket: usize) -> f64 {
        self.multipliers[bucket % self.multipliers.len()]
    }
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self::new(BoardSize::default())
    }
}
