use crate::error::{Error, Result};
use ndarray::Array1;
use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;

/// How a [`SimilarityMapping`] resolves pairs that have no value yet.
enum DefaultSimilarity<A, B> {
    Constant(f64),
    /// Called at most once per pair, the result is cached.
    Computed(Box<dyn Fn(&A, &B) -> f64>),
    /// Explicitly initialized mapping, unmapped pairs are an error.
    None,
}

/// Sparse association of vertex pairs `(a, b)` to a similarity score.
///
/// Looking up a pair without a value stores the default for that pair, so
/// it shows up in [`mapped_elements`](Self::mapped_elements) afterwards.
/// Pairs are kept in the order they were first mapped.
pub struct SimilarityMapping<A, B> {
    /// Position in `entries`, nested so that lookups borrow the keys.
    index: HashMap<A, HashMap<B, usize>>,
    entries: Vec<((A, B), f64)>,
    default: DefaultSimilarity<A, B>,
}

impl<A, B> SimilarityMapping<A, B>
where
    A: Eq + Hash + Clone,
    B: Eq + Hash + Clone,
{
    fn with(default: DefaultSimilarity<A, B>) -> Self {
        SimilarityMapping {
            index: HashMap::new(),
            entries: Vec::new(),
            default,
        }
    }

    /// Every unmapped pair has similarity `default`.
    pub fn with_default(default: f64) -> Self {
        Self::with(DefaultSimilarity::Constant(default))
    }

    /// Unmapped pairs are computed by `f` on first lookup.
    pub fn with_default_fn<F>(f: F) -> Self
    where
        F: Fn(&A, &B) -> f64 + 'static,
    {
        Self::with(DefaultSimilarity::Computed(Box::new(f)))
    }

    /// Explicitly initialized from parallel lists. Looking up a pair outside
    /// of `pairs` fails with [`Error::UnmappedPair`].
    pub fn from_pairs(pairs: Vec<(A, B)>, similarities: Vec<f64>) -> Result<Self> {
        if pairs.len() != similarities.len() {
            return Err(Error::LengthMismatch {
                expected: pairs.len(),
                actual: similarities.len(),
            });
        }
        let mut mapping = Self::with(DefaultSimilarity::None);
        for (pair, similarity) in pairs.into_iter().zip(similarities) {
            mapping.update_pair(pair, similarity);
        }
        Ok(mapping)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the similarity of `(a, b)`, computing and caching the default
    /// if the pair is not mapped yet.
    pub fn similarity(&mut self, a: &A, b: &B) -> Result<f64> {
        if let Some(similarity) = self.get(a, b) {
            return Ok(similarity);
        }
        let similarity = match &self.default {
            DefaultSimilarity::Constant(value) => *value,
            DefaultSimilarity::Computed(f) => f(a, b),
            DefaultSimilarity::None => return Err(Error::UnmappedPair),
        };
        self.update_pair((a.clone(), b.clone()), similarity);
        Ok(similarity)
    }

    pub fn pair_similarity(&mut self, pair: &(A, B)) -> Result<f64> {
        self.similarity(&pair.0, &pair.1)
    }

    /// Returns the similarity of `(a, b)` only if it was already mapped.
    pub fn get(&self, a: &A, b: &B) -> Option<f64> {
        self.position(a, b).map(|i| self.entries[i].1)
    }

    pub fn get_pair(&self, pair: &(A, B)) -> Option<f64> {
        self.get(&pair.0, &pair.1)
    }

    pub fn contains(&self, pair: &(A, B)) -> bool {
        self.position(&pair.0, &pair.1).is_some()
    }

    fn position(&self, a: &A, b: &B) -> Option<usize> {
        self.index.get(a).and_then(|row| row.get(b)).copied()
    }

    pub fn update_similarity(&mut self, a: A, b: B, similarity: f64) {
        self.update_pair((a, b), similarity);
    }

    fn update_pair(&mut self, pair: (A, B), similarity: f64) {
        if let Some(i) = self.position(&pair.0, &pair.1) {
            self.entries[i].1 = similarity;
            return;
        }
        let position = self.entries.len();
        match self.index.get_mut(&pair.0) {
            Some(row) => {
                row.insert(pair.1.clone(), position);
            }
            None => {
                let mut row = HashMap::new();
                row.insert(pair.1.clone(), position);
                self.index.insert(pair.0.clone(), row);
            }
        }
        self.entries.push((pair, similarity));
    }

    /// All pairs that have a value, in the order they were first mapped.
    pub fn mapped_elements(&self) -> impl Iterator<Item = &(A, B)> + '_ {
        self.entries.iter().map(|(pair, _)| pair)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&(A, B), f64)> + '_ {
        self.entries.iter().map(|(pair, similarity)| (pair, *similarity))
    }

    /// Projects the mapping onto `pairs`, in that order.
    pub fn mapped_values(&mut self, pairs: &[(A, B)]) -> Result<Array1<f64>> {
        let values = pairs
            .iter()
            .map(|pair| self.pair_similarity(pair))
            .collect::<Result<Vec<f64>>>()?;
        Ok(Array1::from(values))
    }

    /// Computes the similarity of every pair of the cartesian product of
    /// `a` and `b`, so that all of them become mapped elements.
    pub fn prepare_cartesian<'x, IA, IB>(&mut self, a: IA, b: IB) -> Result<()>
    where
        A: 'x,
        B: 'x,
        IA: IntoIterator<Item = &'x A>,
        IB: IntoIterator<Item = &'x B>,
    {
        let b: Vec<&B> = b.into_iter().collect();
        for va in a {
            for &vb in &b {
                self.similarity(va, vb)?;
            }
        }
        Ok(())
    }
}

impl<A: fmt::Debug, B: fmt::Debug> fmt::Debug for SimilarityMapping<A, B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let default = match &self.default {
            DefaultSimilarity::Constant(value) => format!("{}", value),
            DefaultSimilarity::Computed(_) => "<fn>".to_owned(),
            DefaultSimilarity::None => "none".to_owned(),
        };
        f.debug_struct("SimilarityMapping")
            .field("entries", &self.entries)
            .field("default", &default)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    #[test]
    fn constant_default() {
        let mut m: SimilarityMapping<u32, char> = SimilarityMapping::with_default(0.5);
        assert!(m.is_empty());
        assert_eq!(Ok(0.5), m.similarity(&1, &'x'));
        assert_eq!(1, m.len());

        m.update_similarity(1, 'x', 0.25);
        assert_eq!(Some(0.25), m.get(&1, &'x'));
        assert_eq!(None, m.get(&2, &'x'));
    }

    #[test]
    fn default_fn_is_memoized() {
        let calls = Rc::new(Cell::new(0));
        let counter = calls.clone();
        let mut m = SimilarityMapping::with_default_fn(move |a: &u32, b: &u32| {
            counter.set(counter.get() + 1);
            if a == b {
                1.0
            } else {
                0.0
            }
        });

        assert_eq!(Ok(1.0), m.similarity(&3, &3));
        assert_eq!(Ok(1.0), m.similarity(&3, &3));
        assert_eq!(Ok(0.0), m.similarity(&3, &4));
        assert_eq!(2, calls.get());

        let pairs: Vec<_> = m.mapped_elements().cloned().collect();
        assert_eq!(vec![(3, 3), (3, 4)], pairs);
    }

    #[test]
    fn explicit_pairs_reject_unknown() {
        let mut m = SimilarityMapping::from_pairs(vec![(1u8, 2u8), (2, 1)], vec![0.3, 0.7]).unwrap();
        assert_eq!(Ok(0.7), m.similarity(&2, &1));
        assert_eq!(Err(Error::UnmappedPair), m.similarity(&1, &1));
        assert_eq!(2, m.len());
    }

    #[test]
    fn explicit_pairs_length_mismatch() {
        let err = SimilarityMapping::<u8, u8>::from_pairs(vec![(1, 2)], vec![]).unwrap_err();
        assert_eq!(
            Error::LengthMismatch {
                expected: 1,
                actual: 0
            },
            err
        );
    }

    #[test]
    fn mapped_values_follow_given_order() {
        let mut m = SimilarityMapping::with_default(0.0);
        m.update_similarity('a', 'b', 1.0);
        let values = m.mapped_values(&[('x', 'y'), ('a', 'b')]).unwrap();
        assert_eq!(vec![0.0, 1.0], values.to_vec());
        assert!(m.contains(&('x', 'y')));
    }

    #[test]
    fn prepare_cartesian_maps_all_pairs() {
        let mut m = SimilarityMapping::with_default_fn(|a: &u32, b: &u32| (*a * 10 + *b) as f64);
        m.prepare_cartesian(&[1, 2], &[3, 4, 5]).unwrap();
        assert_eq!(6, m.len());
        assert_eq!(Some(25.0), m.get(&2, &5));

        let mut explicit = SimilarityMapping::from_pairs(vec![(1u32, 3u32)], vec![1.0]).unwrap();
        assert_eq!(
            Err(Error::UnmappedPair),
            explicit.prepare_cartesian(&[1], &[3, 4])
        );
    }

    /// Counts its clones; equality and hash only look at `id`.
    #[derive(Debug)]
    struct Vertex {
        id: u32,
        clones: Rc<Cell<usize>>,
    }

    impl PartialEq for Vertex {
        fn eq(&self, other: &Self) -> bool {
            self.id == other.id
        }
    }

    impl Eq for Vertex {}

    impl Hash for Vertex {
        fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
            self.id.hash(state);
        }
    }

    impl Clone for Vertex {
        fn clone(&self) -> Self {
            self.clones.set(self.clones.get() + 1);
            Vertex {
                id: self.id,
                clones: self.clones.clone(),
            }
        }
    }

    #[test]
    fn lookups_do_not_clone_vertices() {
        let clones = Rc::new(Cell::new(0));
        let vertex = |id| Vertex {
            id,
            clones: clones.clone(),
        };
        let mut m = SimilarityMapping::with_default(0.5);
        m.update_similarity(vertex(1), vertex(2), 0.9);
        m.update_similarity(vertex(1), vertex(3), 0.1);
        let after_insert = clones.get();

        let (a, b) = (vertex(1), vertex(2));
        for _ in 0..10 {
            assert_eq!(Some(0.9), m.get(&a, &b));
            assert_eq!(Ok(0.9), m.similarity(&a, &b));
        }
        assert!(m.contains(&(vertex(1), vertex(3))));
        assert_eq!(after_insert, clones.get());

        m.update_similarity(vertex(1), vertex(2), 0.4);
        assert_eq!(Some(0.4), m.get(&a, &b));
        assert_eq!(2, m.len());
    }
}
