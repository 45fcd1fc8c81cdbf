use crate::coefficient::PropagationCoefficient;
use crate::graph_traits::{Edges, Graph};
use ndarray::Array1;
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::EdgeRef;
use petgraph::Direction;
use std::collections::{HashMap, HashSet};
use std::hash::Hash;

#[cfg(feature = "rayon")]
use rayon::prelude::*;

/// Neighbors of one vertex in one direction, grouped by edge label. Groups
/// and their members keep the order in which they were first seen; parallel
/// edges contribute a neighbor only once.
struct LabelGroups<'g, L> {
    index: HashMap<&'g L, usize>,
    groups: Vec<(&'g L, Vec<usize>)>,
}

impl<'g, L: Eq + Hash> LabelGroups<'g, L> {
    fn collect<E: Edges<Label = L>>(edges: &'g E) -> Self {
        let mut index = HashMap::new();
        let mut groups: Vec<(&'g L, Vec<usize>)> = Vec::new();
        // (group, neighbor)
        let mut seen = HashSet::new();
        for n in 0..edges.num_edges() {
            if let (Some(neighbor), Some(label)) = (edges.nth_edge(n), edges.nth_edge_label(n)) {
                let i = *index.entry(label).or_insert_with(|| {
                    groups.push((label, Vec::new()));
                    groups.len() - 1
                });
                if seen.insert((i, neighbor)) {
                    groups[i].1.push(neighbor);
                }
            }
        }
        LabelGroups { index, groups }
    }

    fn get(&self, label: &L) -> &[usize] {
        match self.index.get(label) {
            Some(&i) => &self.groups[i].1,
            None => &[],
        }
    }
}

/// The pairwise label groups of `(a, b)` with a positive coefficient. Labels
/// missing on one side yield an empty set for that side.
fn weighted_groups<'s, L: Eq + Hash>(
    a: &'s LabelGroups<'_, L>,
    b: &'s LabelGroups<'_, L>,
    coefficient: PropagationCoefficient,
    out: &mut Vec<(f64, &'s [usize], &'s [usize])>,
) {
    let labels_a = a.groups.iter().map(|(label, members)| (members.as_slice(), b.get(label)));
    let labels_b_only = b
        .groups
        .iter()
        .filter(|(label, _)| !a.index.contains_key(label))
        .map(|(_, members)| (&[] as &[usize], members.as_slice()));

    for (neighbors_a, neighbors_b) in labels_a.chain(labels_b_only) {
        let weight = coefficient.calculate(neighbors_a, neighbors_b);
        if weight > 0.0 {
            out.push((weight, neighbors_a, neighbors_b));
        }
    }
}

/// Weighted directed multigraph over vertex pairs `(a, b)`. Node `i` of the
/// graph stands for `pairs()[i]`. Built once, never mutated afterwards.
#[derive(Debug)]
pub struct PropagationGraph {
    pairs: Vec<(usize, usize)>,
    graph: DiGraph<(), f64>,
}

impl PropagationGraph {
    /// Only pairs with at least one label group of positive coefficient are
    /// part of the graph. Every such group adds an edge from the pair to each
    /// pair of the cartesian product of the group's neighbor sets, so several
    /// labels between the same pairs yield parallel edges.
    pub fn build<GA, GB, L>(a: &GA, b: &GB, coefficient: PropagationCoefficient) -> PropagationGraph
    where
        GA: Graph,
        GB: Graph,
        GA::EDGE: Edges<Label = L>,
        GB::EDGE: Edges<Label = L>,
        L: Eq + Hash,
    {
        let (na, nb) = (a.num_nodes(), b.num_nodes());
        let in_a: Vec<_> = (0..na).map(|i| LabelGroups::collect(a.in_edges_of(i))).collect();
        let out_a: Vec<_> = (0..na).map(|i| LabelGroups::collect(a.out_edges_of(i))).collect();
        let in_b: Vec<_> = (0..nb).map(|j| LabelGroups::collect(b.in_edges_of(j))).collect();
        let out_b: Vec<_> = (0..nb).map(|j| LabelGroups::collect(b.out_edges_of(j))).collect();

        // position in `pairs` of every retained pair, indexed by i * nb + j
        let mut reindex: Vec<Option<usize>> = vec![None; na * nb];
        let mut pairs = Vec::new();
        let mut pair_groups = Vec::new();

        for i in 0..na {
            for j in 0..nb {
                let mut groups = Vec::new();
                weighted_groups(&in_a[i], &in_b[j], coefficient, &mut groups);
                weighted_groups(&out_a[i], &out_b[j], coefficient, &mut groups);
                if groups.is_empty() {
                    continue;
                }
                reindex[i * nb + j] = Some(pairs.len());
                pairs.push((i, j));
                pair_groups.push(groups);
            }
        }

        let mut graph = DiGraph::with_capacity(pairs.len(), 0);
        for _ in 0..pairs.len() {
            graph.add_node(());
        }
        for (source, groups) in pair_groups.iter().enumerate() {
            for &(weight, neighbors_a, neighbors_b) in groups {
                for &x in neighbors_a {
                    for &y in neighbors_b {
                        if let Some(target) = reindex[x * nb + y] {
                            graph.add_edge(NodeIndex::new(source), NodeIndex::new(target), weight);
                        }
                    }
                }
            }
        }

        PropagationGraph { pairs, graph }
    }

    pub fn num_vertices(&self) -> usize {
        self.pairs.len()
    }

    pub fn num_edges(&self) -> usize {
        self.graph.edge_count()
    }

    /// The `(index in graph A, index in graph B)` pair of every vertex.
    pub fn pairs(&self) -> &[(usize, usize)] {
        &self.pairs
    }

    /// Sums `weight * previous[source]` over the incoming edges of each vertex.
    ///
    /// Edges are always visited in the same order, so the result is
    /// reproducible bit for bit.
    pub fn flood(&self, previous: &Array1<f64>) -> Array1<f64> {
        assert_eq!(previous.len(), self.num_vertices());

        #[cfg(not(feature = "rayon"))]
        let flooded = Array1::from_shape_fn(self.num_vertices(), |v| self.incoming_similarity(v, previous));

        #[cfg(feature = "rayon")]
        let flooded = Array1::from(
            (0..self.num_vertices())
                .into_par_iter()
                .map(|v| self.incoming_similarity(v, previous))
                .collect::<Vec<f64>>(),
        );

        flooded
    }

    fn incoming_similarity(&self, vertex: usize, previous: &Array1<f64>) -> f64 {
        self.graph
            .edges_directed(NodeIndex::new(vertex), Direction::Incoming)
            .fold(0.0, |sum, edge| sum + edge.weight() * previous[edge.source().index()])
    }
}
