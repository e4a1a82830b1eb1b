//! Matching utilities for loop tracking.
//!
//! Rows of every cost matrix are tracked loops, columns are this frame's
//! candidates. Costs are centroid distances in normalized frame units.

use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::tracker::geometry::{Point, distance};

/// How candidates are paired with tracked loops.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchStrategy {
    /// Each candidate, in order, takes the first free loop within radius.
    #[default]
    Greedy,
    /// Minimum total centroid distance over all pairs within radius.
    Optimal,
}

/// Compute the centroid distance matrix between tracked loops and candidates.
pub fn center_distance(track_centers: &[Point], candidate_centers: &[Point]) -> Array2<f32> {
    let mut dists = Array2::zeros((track_centers.len(), candidate_centers.len()));
    for (i, t) in track_centers.iter().enumerate() {
        for (j, c) in candidate_centers.iter().enumerate() {
            dists[[i, j]] = distance(t, c);
        }
    }
    dists
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct AssignmentResult {
    /// `(track, candidate)` pairs.
    pub matches: Vec<(usize, usize)>,
    pub unmatched_tracks: Vec<usize>,
    pub unmatched_candidates: Vec<usize>,
}

impl AssignmentResult {
    /// Matched track for every candidate, indexed by candidate.
    pub fn track_for_candidates(&self, num_candidates: usize) -> Vec<Option<usize>> {
        let mut out = vec![None; num_candidates];
        for &(track, candidate) in &self.matches {
            out[candidate] = Some(track);
        }
        out
    }
}

/// Run `strategy` over a distance matrix, accepting pairs closer than `radius`.
pub fn assign(dists: &Array2<f32>, radius: f32, strategy: MatchStrategy) -> AssignmentResult {
    match strategy {
        MatchStrategy::Greedy => greedy_assignment(dists, radius),
        MatchStrategy::Optimal => linear_assignment(dists, radius),
    }
}

/// For each candidate in column order, take the first still-free track (in
/// row order) closer than `radius`. Not the nearest one.
pub fn greedy_assignment(dists: &Array2<f32>, radius: f32) -> AssignmentResult {
    let (num_rows, num_cols) = dists.dim();
    let mut available = vec![true; num_rows];
    let mut matches = vec![];
    let mut unmatched_candidates = vec![];

    for col in 0..num_cols {
        let hit = (0..num_rows).find(|&row| available[row] && dists[[row, col]] < radius);
        match hit {
            Some(row) => {
                available[row] = false;
                matches.push((row, col));
            }
            None => unmatched_candidates.push(col),
        }
    }

    let unmatched_tracks = available
        .iter()
        .enumerate()
        .filter_map(|(i, &free)| if free { Some(i) } else { None })
        .collect();

    AssignmentResult {
        matches,
        unmatched_tracks,
        unmatched_candidates,
    }
}

/// Globally optimal assignment (Jonker-Volgenant), keeping only pairs with
/// cost below `thresh`.
pub fn linear_assignment(cost_matrix: &Array2<f32>, thresh: f32) -> AssignmentResult {
    let (num_rows, num_cols) = cost_matrix.dim();

    if num_rows == 0 {
        return AssignmentResult {
            matches: vec![],
            unmatched_tracks: vec![],
            unmatched_candidates: (0..num_cols).collect(),
        };
    }

    if num_cols == 0 {
        return AssignmentResult {
            matches: vec![],
            unmatched_tracks: (0..num_rows).collect(),
            unmatched_candidates: vec![],
        };
    }

    // Out-of-radius pairs are priced above any in-radius set of pairs, so the
    // solver never trades a valid match for an invalid one.
    let gate = 1e6;
    let size = num_rows.max(num_cols);
    let mut padded = Array2::<f64>::from_elem((size, size), gate);

    for i in 0..num_rows {
        for j in 0..num_cols {
            let cost = cost_matrix[[i, j]];
            if cost < thresh {
                padded[[i, j]] = cost as f64;
            }
        }
    }

    let result = lapjv::lapjv(&padded);
    let mut matches = vec![];
    let mut unmatched_tracks = vec![];
    let mut unmatched_candidates_mask: Vec<bool> = vec![true; num_cols];

    match result {
        Ok((row_to_col, _)) => {
            for (row_idx, &col_idx) in row_to_col.iter().enumerate() {
                if row_idx >= num_rows {
                    continue;
                }
                if col_idx >= num_cols {
                    unmatched_tracks.push(row_idx);
                } else if cost_matrix[[row_idx, col_idx]] < thresh {
                    matches.push((row_idx, col_idx));
                    unmatched_candidates_mask[col_idx] = false;
                } else {
                    unmatched_tracks.push(row_idx);
                }
            }
        }
        Err(_) => {
            unmatched_tracks = (0..num_rows).collect();
        }
    }

    let unmatched_candidates: Vec<usize> = unmatched_candidates_mask
        .iter()
        .enumerate()
        .filter_map(|(i, &u)| if u { Some(i) } else { None })
        .collect();

    AssignmentResult {
        matches,
        unmatched_tracks,
        unmatched_candidates,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn test_center_distance() {
        let tracks = [Point::new(0.0, 0.0), Point::new(1.0, 1.0)];
        let cands = [Point::new(0.3, 0.4)];
        let d = center_distance(&tracks, &cands);
        assert_eq!(d.dim(), (2, 1));
        assert!((d[[0, 0]] - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_greedy_takes_first_not_nearest() {
        // Candidate 0 is nearer to track 1, but track 0 is within radius
        // and comes first.
        let dists = array![[0.15_f32], [0.01]];
        let result = greedy_assignment(&dists, 0.2);
        assert_eq!(result.matches, vec![(0, 0)]);
        assert_eq!(result.unmatched_tracks, vec![1]);
        assert!(result.unmatched_candidates.is_empty());
    }

    #[test]
    fn test_greedy_consumes_tracks() {
        let dists = array![[0.05_f32, 0.06], [0.5, 0.5]];
        let result = greedy_assignment(&dists, 0.2);
        assert_eq!(result.matches, vec![(0, 0)]);
        assert_eq!(result.unmatched_candidates, vec![1]);
        assert_eq!(result.unmatched_tracks, vec![1]);
    }

    #[test]
    fn test_radius_is_exclusive() {
        let dists = array![[0.2_f32]];
        assert!(greedy_assignment(&dists, 0.2).matches.is_empty());
        assert!(linear_assignment(&dists, 0.2).matches.is_empty());
    }

    #[test]
    fn test_optimal_prefers_total_cost() {
        // Greedy pairs (0,0) and strands candidate 1; optimal matches both.
        let dists = array![[0.05_f32, 0.1], [0.15, 0.5]];
        let greedy = greedy_assignment(&dists, 0.2);
        assert_eq!(greedy.matches, vec![(0, 0)]);

        let mut optimal = linear_assignment(&dists, 0.2).matches;
        optimal.sort();
        assert_eq!(optimal, vec![(0, 1), (1, 0)]);
    }

    #[test]
    fn test_linear_assignment_empty() {
        let no_tracks = Array2::<f32>::zeros((0, 3));
        let r = linear_assignment(&no_tracks, 0.2);
        assert_eq!(r.unmatched_candidates, vec![0, 1, 2]);

        let no_cands = Array2::<f32>::zeros((2, 0));
        let r = linear_assignment(&no_cands, 0.2);
        assert_eq!(r.unmatched_tracks, vec![0, 1]);
    }

    #[test]
    fn test_track_for_candidates() {
        let result = AssignmentResult {
            matches: vec![(2, 0)],
            unmatched_tracks: vec![0, 1],
            unmatched_candidates: vec![1],
        };
        assert_eq!(result.track_for_candidates(2), vec![Some(2), None]);
    }
}
