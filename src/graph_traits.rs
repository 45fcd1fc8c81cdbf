//! Traits that represent an abstract labeled graph upon which the algorithm operates.

use petgraph::{graph::NodeIndex, Directed, Graph as PetGraph};

/// An edge carrying a label. Neighbors of a vertex are grouped by label, so
/// edges of unrelated relation types never propagate through the same weight.
pub trait LabeledEdge {
    type Label;

    fn label(&self) -> &Self::Label;
}

macro_rules! self_labeled {
    ($($t:ty),*) => {
        $(
            impl LabeledEdge for $t {
                type Label = $t;

                #[inline]
                fn label(&self) -> &$t {
                    self
                }
            }
        )*
    };
}

self_labeled!((), char, String, u8, u16, u32, u64, usize, i8, i16, i32, i64, isize);

impl<'a> LabeledEdge for &'a str {
    type Label = &'a str;

    #[inline]
    fn label(&self) -> &&'a str {
        self
    }
}

/// Abstract representation of the edges of a node in one direction. Used by the algorithm.
pub trait Edges {
    type Label;

    /// The number of edges
    fn num_edges(&self) -> usize;

    /// Returns the node at the other end of the nth-edge
    fn nth_edge(&self, n: usize) -> Option<usize>;

    /// Returns the label of the nth-edge
    fn nth_edge_label(&self, n: usize) -> Option<&Self::Label>;
}

/// Abstract representation of a directed multigraph. Used by the algorithm.
///
/// The node value is the identity under which a vertex shows up in a
/// [`SimilarityMapping`](crate::SimilarityMapping), so node values must be
/// unique within one graph.
pub trait Graph {
    type EDGE: Edges;
    type NODE: Clone;

    fn num_nodes(&self) -> usize;
    fn node_value(&self, node_idx: usize) -> &Self::NODE;
    fn in_edges_of(&self, node_idx: usize) -> &Self::EDGE;
    fn out_edges_of(&self, node_idx: usize) -> &Self::EDGE;

    fn to_petgraph(&self) -> PetGraph<Self::NODE, <Self::EDGE as Edges>::Label, Directed>
    where
        <Self::EDGE as Edges>::Label: Clone,
    {
        let mut graph = PetGraph::new();
        for i in 0..self.num_nodes() {
            let idx = graph.add_node(self.node_value(i).clone());
            assert!(idx.index() == i);
        }
        // Every edge is present once as out-edge of its source.
        for i in 0..self.num_nodes() {
            let out_edges = self.out_edges_of(i);
            for k in 0..out_edges.num_edges() {
                if let (Some(j), Some(label)) = (out_edges.nth_edge(k), out_edges.nth_edge_label(k)) {
                    graph.add_edge(NodeIndex::new(i), NodeIndex::new(j), label.clone());
                }
            }
        }
        graph
    }
}
