use crate::config::FilterConfig;
use crate::matching_filter::{dual_candidates, Candidate, Correspondence, MatchingFilter};
use crate::similarity_mapping::SimilarityMapping;
use munkres::{solve_assignment, WeightMatrix};
use std::collections::HashMap;
use std::hash::Hash;

/// Assigns pairs so that the sum of their similarities is maximal
/// (Hungarian method), instead of greedily taking the best pair first.
/// Leaving a vertex unmatched is never worse than matching it with
/// similarity zero.
///
/// Accepts the same candidates as
/// [`OrderedMatchingFilter`](crate::OrderedMatchingFilter), except that the
/// single-mapping mode drops every pair below `min_similarity`. When a pair
/// is a candidate twice, the higher similarity counts.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct OptimalMatchingFilter {
    min_similarity: f64,
    initial_similarity_threshold: f64,
}

impl OptimalMatchingFilter {
    pub fn new(min_similarity: f64, initial_similarity_threshold: f64) -> OptimalMatchingFilter {
        OptimalMatchingFilter {
            min_similarity,
            initial_similarity_threshold,
        }
    }

    pub fn from_config(config: &FilterConfig) -> OptimalMatchingFilter {
        Self::new(config.min_similarity, config.initial_similarity_threshold)
    }
}

impl Default for OptimalMatchingFilter {
    fn default() -> Self {
        Self::from_config(&FilterConfig::default())
    }
}

/// Assigns dense indices to values in order of first appearance.
struct Indexer<'m, T> {
    index: HashMap<&'m T, usize>,
    values: Vec<&'m T>,
}

impl<'m, T: Eq + Hash> Indexer<'m, T> {
    fn new() -> Self {
        Indexer {
            index: HashMap::new(),
            values: Vec::new(),
        }
    }

    fn insert(&mut self, value: &'m T) -> usize {
        let values = &mut self.values;
        *self.index.entry(value).or_insert_with(|| {
            values.push(value);
            values.len() - 1
        })
    }
}

impl<A, B> MatchingFilter<A, B> for OptimalMatchingFilter
where
    A: Eq + Hash + Clone,
    B: Eq + Hash + Clone,
{
    fn filter(
        &self,
        final_mapping: &SimilarityMapping<A, B>,
        initial: Option<&SimilarityMapping<A, B>>,
    ) -> Correspondence<A, B> {
        let candidates = match initial {
            None => final_mapping
                .iter()
                .filter(|&(_, similarity)| similarity >= self.min_similarity)
                .map(|(pair, similarity)| Candidate { pair, similarity })
                .collect(),
            Some(initial) => dual_candidates(
                final_mapping,
                initial,
                self.min_similarity,
                self.initial_similarity_threshold,
            ),
        };

        let mut rows = Indexer::new();
        let mut columns = Indexer::new();
        let mut best: HashMap<(usize, usize), f64> = HashMap::new();
        for Candidate { pair: (a, b), similarity } in candidates {
            // the solver cannot handle infinite weights
            if !similarity.is_finite() {
                continue;
            }
            let cell = (rows.insert(a), columns.insert(b));
            let entry = best.entry(cell).or_insert(similarity);
            *entry = entry.max(similarity);
        }

        let mut correspondence = Correspondence::new();
        let n = rows.values.len().max(columns.values.len());
        if n == 0 {
            return correspondence;
        }

        let max = best.values().cloned().fold(f64::NEG_INFINITY, f64::max);
        let min = best.values().cloned().fold(f64::INFINITY, f64::min);
        // a missing cell counts as similarity zero, or as the worst candidate
        // if that is negative
        let missing = max - min.min(0.0);
        let mut weights = WeightMatrix::from_fn(n, |ij| match best.get(&ij) {
            Some(similarity) => max - similarity,
            None => missing,
        });

        let positions = match solve_assignment(&mut weights) {
            Ok(positions) => positions,
            Err(_) => {
                log::error!("no optimal assignment for {}x{} candidates", n, n);
                return correspondence;
            }
        };

        for position in positions {
            if best.contains_key(&(position.row, position.column)) {
                correspondence.insert(
                    rows.values[position.row].clone(),
                    columns.values[position.column].clone(),
                );
            }
        }
        log::debug!("optimal matching kept {} pairs", correspondence.len());
        correspondence
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::OrderedMatchingFilter;
    use approx::assert_abs_diff_eq;

    fn mapping(entries: &[(u32, char, f64)]) -> SimilarityMapping<u32, char> {
        let mut m = SimilarityMapping::with_default(0.0);
        for &(a, b, s) in entries {
            m.update_similarity(a, b, s);
        }
        m
    }

    #[test]
    fn beats_greedy_on_total_similarity() {
        let m = mapping(&[(1, 'a', 0.9), (1, 'b', 0.8), (2, 'a', 0.8), (2, 'b', 0.1)]);

        let greedy = OrderedMatchingFilter::default().filter(&m, None);
        assert!(greedy.contains(&1, &'a'));

        let optimal = OptimalMatchingFilter::default().filter(&m, None);
        assert_eq!(2, optimal.len());
        assert!(optimal.contains(&1, &'b'));
        assert!(optimal.contains(&2, &'a'));
    }

    fn total(m: &SimilarityMapping<u32, char>, c: &Correspondence<u32, char>) -> f64 {
        c.iter().map(|(a, b)| m.get(a, b).unwrap()).sum()
    }

    #[test]
    fn sparse_candidates_do_not_displace_best_pairs() {
        let m = mapping(&[(1, 'a', 0.9), (1, 'b', 0.0), (2, 'a', 0.0), (3, 'c', 1.0)]);
        let c = OptimalMatchingFilter::default().filter(&m, None);

        assert!(c.contains(&1, &'a'));
        assert!(c.contains(&3, &'c'));
        assert!(!c.contains_left(&2));
        assert_abs_diff_eq!(1.9, total(&m, &c), epsilon = 1e-12);
    }

    #[test]
    fn rectangular_and_sparse() {
        // three rows, one column; only the best row gets it
        let m = mapping(&[(1, 'a', 0.2), (2, 'a', 0.7), (3, 'a', 0.5)]);
        let c = OptimalMatchingFilter::default().filter(&m, None);
        assert_eq!(1, c.len());
        assert!(c.contains(&2, &'a'));
    }

    #[test]
    fn rejects_below_min_similarity() {
        let m = mapping(&[(1, 'a', 0.2), (2, 'b', 0.7)]);
        let c = OptimalMatchingFilter::new(0.5, 0.0).filter(&m, None);
        assert_eq!(1, c.len());
        assert!(c.contains(&2, &'b'));
        assert!(OptimalMatchingFilter::default()
            .filter(&mapping(&[]), None)
            .is_empty());
    }

    #[test]
    fn dual_mapping() {
        let initial = mapping(&[(1, 'a', 0.95), (1, 'b', 0.1), (2, 'a', 0.2), (2, 'b', 0.1)]);
        let final_mapping = mapping(&[(1, 'b', 0.6)]);

        let c = OptimalMatchingFilter::new(0.5, 0.9).filter(&final_mapping, Some(&initial));
        assert_eq!(1, c.len());
        assert!(c.contains(&1, &'b'));
    }
}
