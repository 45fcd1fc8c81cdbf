use super::graph_traits::{Edges, Graph, LabeledEdge};
use petgraph::Directed;
use petgraph::Graph as PetGraph;
use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::fmt::Debug;
use std::hash::Hash;

#[derive(Debug, Clone)]
pub struct Edge<L> {
    /// Node index type. Our graphs never exceed 4 billion nodes.
    pointing_node: u32,
    label: L,
}

impl<L> Edge<L> {
    pub fn new(node_idx: usize, label: L) -> Edge<L> {
        assert!(node_idx <= u32::max_value() as usize);
        Edge {
            pointing_node: node_idx as u32,
            label,
        }
    }

    pub fn pointing_node(&self) -> usize {
        self.pointing_node as usize
    }
}

impl<L> LabeledEdge for Edge<L> {
    type Label = L;

    #[inline]
    fn label(&self) -> &L {
        &self.label
    }
}

#[derive(Debug, Clone)]
pub struct EdgeList<L> {
    edges: Vec<Edge<L>>,
}

impl<L> EdgeList<L> {
    pub fn new(edges: Vec<Edge<L>>) -> EdgeList<L> {
        EdgeList { edges }
    }
}

impl<L> Default for EdgeList<L> {
    fn default() -> Self {
        EdgeList::new(Vec::new())
    }
}

impl<L> Edges for EdgeList<L> {
    type Label = L;

    #[inline]
    fn num_edges(&self) -> usize {
        self.edges.len()
    }

    #[inline]
    fn nth_edge(&self, n: usize) -> Option<usize> {
        self.edges.get(n).map(Edge::pointing_node)
    }

    #[inline]
    fn nth_edge_label(&self, n: usize) -> Option<&L> {
        self.edges.get(n).map(|e| e.label())
    }
}

#[derive(Debug, Clone)]
pub struct Node<T, L> {
    in_edges: EdgeList<L>,
    out_edges: EdgeList<L>,
    node_value: T,
}

impl<T, L> Node<T, L> {
    pub fn new(in_edges: EdgeList<L>, out_edges: EdgeList<L>, node_value: T) -> Node<T, L> {
        Node {
            in_edges,
            out_edges,
            node_value,
        }
    }

    pub fn node_value(&self) -> &T {
        &self.node_value
    }

    pub fn add_in_edge(&mut self, edge: Edge<L>) {
        self.in_edges.edges.push(edge);
    }

    pub fn add_out_edge(&mut self, edge: Edge<L>) {
        self.out_edges.edges.push(edge);
    }
}

/// A directed multigraph with labeled edges, stored as adjacency lists.
#[derive(Debug, Clone)]
pub struct OwnedGraph<T, L> {
    nodes: Vec<Node<T, L>>,
}

impl<T: Clone, L: Clone> OwnedGraph<T, L> {
    pub fn new(nodes: Vec<Node<T, L>>) -> OwnedGraph<T, L> {
        OwnedGraph { nodes }
    }

    /// Edges keep the insertion order of `pg`.
    pub fn from_petgraph<E>(pg: &PetGraph<T, E, Directed>) -> OwnedGraph<T, L>
    where
        E: LabeledEdge<Label = L>,
    {
        let mut graph = OwnedGraph {
            nodes: pg
                .node_indices()
                .map(|i| Node::new(EdgeList::default(), EdgeList::default(), pg[i].clone()))
                .collect(),
        };
        for edge in pg.raw_edges() {
            let (source, target) = (edge.source().index(), edge.target().index());
            let label = edge.weight.label();
            graph.nodes[source].add_out_edge(Edge::new(target, label.clone()));
            graph.nodes[target].add_in_edge(Edge::new(source, label.clone()));
        }
        graph
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn push_empty_node(&mut self, node_value: T) -> usize {
        let idx = self.nodes.len();
        self.nodes
            .push(Node::new(EdgeList::default(), EdgeList::default(), node_value));
        idx
    }
}

impl<T: Clone, L> Graph for OwnedGraph<T, L> {
    type EDGE = EdgeList<L>;
    type NODE = T;

    fn num_nodes(&self) -> usize {
        self.nodes.len()
    }

    #[inline]
    fn node_value(&self, node_idx: usize) -> &Self::NODE {
        self.nodes[node_idx].node_value()
    }

    #[inline]
    fn in_edges_of(&self, node_idx: usize) -> &Self::EDGE {
        &self.nodes[node_idx].in_edges
    }

    #[inline]
    fn out_edges_of(&self, node_idx: usize) -> &Self::EDGE {
        &self.nodes[node_idx].out_edges
    }
}

/// Builds an [`OwnedGraph`] where each vertex is identified by its value.
pub struct GraphBuilder<T, L> {
    // maps node value to index in graph.nodes
    node_map: HashMap<T, usize>,
    graph: OwnedGraph<T, L>,
}

impl<T: Debug + Eq + Hash + Clone, L: Clone> GraphBuilder<T, L> {
    pub fn new() -> GraphBuilder<T, L> {
        GraphBuilder {
            node_map: HashMap::new(),
            graph: OwnedGraph::new(Vec::new()),
        }
    }

    pub fn graph(self) -> OwnedGraph<T, L> {
        self.graph
    }

    /// Returns the node index, adding the node if it is not yet present.
    pub fn add_node(&mut self, node_value: T) -> usize {
        match self.node_map.entry(node_value) {
            Entry::Vacant(e) => {
                let next_id = self.graph.push_empty_node(e.key().clone());
                e.insert(next_id);
                next_id
            }
            Entry::Occupied(e) => *e.get(),
        }
    }

    /// Parallel edges, also with equal labels, are kept.
    pub fn add_edge(&mut self, source: T, target: T, label: L) {
        let source_index = self.add_node(source);
        let target_index = self.add_node(target);
        self.graph.nodes[source_index].add_out_edge(Edge::new(target_index, label.clone()));
        self.graph.nodes[target_index].add_in_edge(Edge::new(source_index, label));
    }
}

impl<T: Debug + Eq + Hash + Clone, L: Clone> Default for GraphBuilder<T, L> {
    fn default() -> Self {
        GraphBuilder::new()
    }
}
