//! Ball paths and the biased random walk that generates them

use rand::Rng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::board::{columns_for, midpoint};
use crate::consts::PATH_BIAS_DIVISOR;

/// Identity of a dropped ball. Allocated by the engine, never reused.
pub type BallId = u64;

/// A ball in flight: its identity and the lattice position at each row level
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BallPath {
    pub id: BallId,
    /// Horizontal positions, apex first; `rows + 1` entries
    pub path: Vec<i32>,
}

impl BallPath {
    /// Final (bucket row) position
    pub fn last_position(&self) -> Option<i32> {
        self.path.last().copied()
    }
}

/// Source of uniform random numbers in `[0, 1)`
pub trait UniformSource {
    fn next_unit(&mut self) -> f64;
}

impl UniformSource for Pcg32 {
    fn next_unit(&mut self) -> f64 {
        self.random::<f64>()
    }
}

/// Replays a fixed list of draws, cycling when exhausted.
///
/// Useful for forcing exact paths: `0.0` always steps right and `0.999`
/// (almost) always steps left.
#[derive(Debug, Clone)]
pub struct ScriptedSource {
    draws: Vec<f64>,
    cursor: usize,
}

impl ScriptedSource {
    pub fn new(draws: impl Into<Vec<f64>>) -> Self {
        Self {
            draws: draws.into(),
            cursor: 0,
        }
    }
}

impl UniformSource for ScriptedSource {
    fn next_unit(&mut self) -> f64 {
        if self.draws.is_empty() {
            return 0.5;
        }
        let value = self.draws[self.cursor % self.draws.len()];
        self.cursor += 1;
        value
    }
}

/// Probability of stepping right from `pos`; pulls the walk back toward `mid`
#[inline]
fn right_step_probability(pos: i32, mid: i32, rows: u32) -> f64 {
    0.5 + f64::from(mid - pos) / (f64::from(rows) * PATH_BIAS_DIVISOR)
}

/// Generate a path from the apex down through `rows` rows.
///
/// Each step moves one position left or right. The chance of stepping right
/// grows the further left of center the ball is (and vice versa), which
/// gives a bell-shaped landing distribution.
pub fn generate_path<R: UniformSource + ?Sized>(rows: u32, rng: &mut R) -> Vec<i32> {
    let mid = midpoint(columns_for(rows));
    let mut pos = mid;
    let mut path = Vec::with_capacity(rows as usize + 1);
    path.push(pos);

    for _ in 0..rows {
        let p = right_step_probability(pos, mid, rows);
        if rng.next_unit() < p {
            pos += 1;
        } else {
            pos -= 1;
        }
        path.push(pos);
    }

    path
}

/// Bucket index for a final path position
#[inline]
pub fn landing_bucket(last_position: i32) -> usize {
    (last_position / 2).max(0) as usize
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::BoardSize;
    use proptest::prelude::*;
    use rand::SeedableRng;

    #[test]
    fn test_path_shape_for_all_sizes() {
        let mut rng = Pcg32::seed_from_u64(12345);
        for size in BoardSize::ALL {
            let rows = size.rows();
            for _ in 0..200 {
                let path = generate_path(rows, &mut rng);
                assert_eq!(path.len(), rows as usize + 1);
                assert_eq!(path[0], rows as i32);
                assert!(path.windows(2).all(|w| (w[1] - w[0]).abs() == 1));
            }
        }
    }

    #[test]
    fn test_endpoint_always_lands_in_a_bucket() {
        let mut rng = Pcg32::seed_from_u64(7);
        for size in BoardSize::ALL {
            let buckets = size.multipliers().len();
            for _ in 0..500 {
                let path = generate_path(size.rows(), &mut rng);
                let last = *path.last().unwrap();
                assert_eq!(last % 2, 0);
                assert!(landing_bucket(last) < buckets);
            }
        }
    }

    #[test]
    fn test_scripted_all_right_reaches_edge() {
        let mut rng = ScriptedSource::new(vec![0.0]);
        let path = generate_path(10, &mut rng);
        assert_eq!(path, (10..=20).collect::<Vec<_>>());
        assert_eq!(landing_bucket(20), 10);
    }

    #[test]
    fn test_scripted_zigzag_lands_center() {
        // Right from center (p = 0.5), then left from mid + 1 (p < 0.5)
        let mut rng = ScriptedSource::new(vec![0.1, 0.9]);
        let path = generate_path(10, &mut rng);
        assert_eq!(*path.last().unwrap(), 10);
        assert_eq!(landing_bucket(10), 5);
    }

    #[test]
    fn test_zero_rows_gives_single_point_path() {
        let mut rng = ScriptedSource::new(vec![0.1]);
        assert_eq!(generate_path(0, &mut rng), vec![0]);
        assert_eq!(columns_for(0), 0);
    }

    #[test]
    fn test_bias_pulls_toward_center() {
        let mid = 10;
        assert_eq!(right_step_probability(mid, mid, 10), 0.5);
        assert!(right_step_probability(mid - 3, mid, 10) > 0.5);
        assert!(right_step_probability(mid + 3, mid, 10) < 0.5);
        assert!((right_step_probability(mid - 3, mid, 10) - 0.52).abs() < 1e-12);
    }

    #[test]
    fn test_landing_distribution_peaks_near_center() {
        let mut rng = Pcg32::seed_from_u64(2024);
        let mut counts = [0u32; 11];
        for _ in 0..5000 {
            let path = generate_path(10, &mut rng);
            counts[landing_bucket(*path.last().unwrap())] += 1;
        }
        let center: u32 = counts[4..=6].iter().sum();
        let edges = counts[0] + counts[10];
        assert!(center > edges * 10, "counts: {:?}", counts);
    }

    proptest! {
        #[test]
        fn prop_paths_are_lattice_walks(seed in any::<u64>(), rows in 1u32..32) {
            let mut rng = Pcg32::seed_from_u64(seed);
            let path = generate_path(rows, &mut rng);
            prop_assert_eq!(path.len(), rows as usize + 1);
            prop_assert_eq!(path[0], midpoint(columns_for(rows)));
            for w in path.windows(2) {
                prop_assert_eq!((w[1] - w[0]).abs(), 1);
            }
            let last = *path.last().unwrap();
            prop_assert!(last >= 0 && last <= 2 * rows as i32);
            prop_assert_eq!(last % 2, 0);
        }
    }
}
