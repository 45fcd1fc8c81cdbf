use crate::config::FilterConfig;
use crate::similarity_mapping::SimilarityMapping;
use std::collections::HashMap;
use std::hash::Hash;

/// A partial one-to-one correspondence between the vertices of two graphs.
/// Iterates in insertion order.
#[derive(Debug, Clone)]
pub struct Correspondence<A, B> {
    left: HashMap<A, B>,
    right: HashMap<B, A>,
    pairs: Vec<(A, B)>,
}

impl<A: Eq + Hash + Clone, B: Eq + Hash + Clone> Correspondence<A, B> {
    pub fn new() -> Self {
        Correspondence {
            left: HashMap::new(),
            right: HashMap::new(),
            pairs: Vec::new(),
        }
    }

    /// Adds `(a, b)` unless `a` or `b` is already part of a pair.
    pub fn insert(&mut self, a: A, b: B) -> bool {
        if self.left.contains_key(&a) || self.right.contains_key(&b) {
            return false;
        }
        self.left.insert(a.clone(), b.clone());
        self.right.insert(b.clone(), a.clone());
        self.pairs.push((a, b));
        true
    }

    pub fn get_by_left(&self, a: &A) -> Option<&B> {
        self.left.get(a)
    }

    pub fn get_by_right(&self, b: &B) -> Option<&A> {
        self.right.get(b)
    }

    pub fn contains_left(&self, a: &A) -> bool {
        self.left.contains_key(a)
    }

    pub fn contains_right(&self, b: &B) -> bool {
        self.right.contains_key(b)
    }

    pub fn contains(&self, a: &A, b: &B) -> bool {
        self.left.get(a) == Some(b)
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &(A, B)> + '_ {
        self.pairs.iter()
    }
}

impl<A: Eq + Hash + Clone, B: Eq + Hash + Clone> Default for Correspondence<A, B> {
    fn default() -> Self {
        Correspondence::new()
    }
}

/// Reduces a similarity mapping to a partial one-to-one correspondence.
pub trait MatchingFilter<A, B> {
    /// Without `initial`, the candidates are the pairs of `final_mapping`.
    /// With `initial`, the candidates are the pairs of `initial`, which is
    /// expected to hold every pair (see
    /// [`SimilarityMapping::prepare_cartesian`]).
    fn filter(
        &self,
        final_mapping: &SimilarityMapping<A, B>,
        initial: Option<&SimilarityMapping<A, B>>,
    ) -> Correspondence<A, B>;
}

#[derive(Debug)]
pub(crate) struct Candidate<'m, A, B> {
    pub(crate) pair: &'m (A, B),
    pub(crate) similarity: f64,
}

/// Candidates of the dual-mapping mode, unsorted. A pair may show up twice:
/// once from the final mapping, offset by one so that it ranks above every
/// initial-only candidate (similarities are in `[0, 1]`), and once from the
/// initial mapping.
pub(crate) fn dual_candidates<'m, A, B>(
    final_mapping: &'m SimilarityMapping<A, B>,
    initial: &'m SimilarityMapping<A, B>,
    min_similarity: f64,
    initial_similarity_threshold: f64,
) -> Vec<Candidate<'m, A, B>>
where
    A: Eq + Hash + Clone,
    B: Eq + Hash + Clone,
{
    let mut candidates = Vec::new();
    for (pair, initial_similarity) in initial.iter() {
        if let Some(similarity) = final_mapping.get_pair(pair) {
            if similarity >= min_similarity {
                candidates.push(Candidate {
                    pair,
                    similarity: similarity + 1.0,
                });
            }
        }
        if initial_similarity >= initial_similarity_threshold {
            candidates.push(Candidate {
                pair,
                similarity: initial_similarity,
            });
        }
    }
    candidates
}

/// Sorts descending by similarity. Stable, so equal candidates keep their order.
fn sort_descending<A, B>(candidates: &mut [Candidate<'_, A, B>]) {
    candidates.sort_by(|left, right| right.similarity.total_cmp(&left.similarity));
}

/// Orders all candidate pairs by similarity and assigns the most similar
/// pairs first. Greedy, not an optimal assignment.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct OrderedMatchingFilter {
    min_similarity: f64,
    initial_similarity_threshold: f64,
}

impl OrderedMatchingFilter {
    pub fn new(min_similarity: f64, initial_similarity_threshold: f64) -> OrderedMatchingFilter {
        OrderedMatchingFilter {
            min_similarity,
            initial_similarity_threshold,
        }
    }

    pub fn from_config(config: &FilterConfig) -> OrderedMatchingFilter {
        Self::new(config.min_similarity, config.initial_similarity_threshold)
    }

    pub fn min_similarity(&self) -> f64 {
        self.min_similarity
    }

    pub fn initial_similarity_threshold(&self) -> f64 {
        self.initial_similarity_threshold
    }

    fn sorted_candidates<'m, A, B>(
        &self,
        final_mapping: &'m SimilarityMapping<A, B>,
        initial: Option<&'m SimilarityMapping<A, B>>,
    ) -> Vec<Candidate<'m, A, B>>
    where
        A: Eq + Hash + Clone,
        B: Eq + Hash + Clone,
    {
        match initial {
            None => {
                let mut candidates: Vec<_> = final_mapping
                    .iter()
                    .map(|(pair, similarity)| Candidate { pair, similarity })
                    .collect();
                sort_descending(&mut candidates);
                // a prefix, not a filter
                candidates
                    .into_iter()
                    .take_while(|c| c.similarity >= self.min_similarity)
                    .collect()
            }
            Some(initial) => {
                let mut candidates = dual_candidates(
                    final_mapping,
                    initial,
                    self.min_similarity,
                    self.initial_similarity_threshold,
                );
                sort_descending(&mut candidates);
                candidates
            }
        }
    }
}

impl Default for OrderedMatchingFilter {
    /// No pair is rejected because of its similarity.
    fn default() -> Self {
        Self::from_config(&FilterConfig::default())
    }
}

impl<A, B> MatchingFilter<A, B> for OrderedMatchingFilter
where
    A: Eq + Hash + Clone,
    B: Eq + Hash + Clone,
{
    fn filter(
        &self,
        final_mapping: &SimilarityMapping<A, B>,
        initial: Option<&SimilarityMapping<A, B>>,
    ) -> Correspondence<A, B> {
        let candidates = self.sorted_candidates(final_mapping, initial);
        let mut correspondence = Correspondence::new();
        for Candidate { pair: (a, b), .. } in candidates {
            if !correspondence.contains_left(a) && !correspondence.contains_right(b) {
                correspondence.insert(a.clone(), b.clone());
            }
        }
        log::debug!(
            "ordered matching kept {} pairs of {} mapped",
            correspondence.len(),
            initial.unwrap_or(final_mapping).len()
        );
        correspondence
    }
}
