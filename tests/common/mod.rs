use similarity_flooding::graph::{GraphBuilder, OwnedGraph};

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Label {
    L1,
    L2,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum VertexA {
    A,
    A1,
    A2,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum VertexB {
    B,
    B1,
    B2,
}

#[allow(dead_code)]
pub fn init_logger() {
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("debug"))
        .is_test(true)
        .try_init();
}

/// Model A of the example in Melnik et al. (2002), Figure 3.
#[allow(dead_code)]
pub fn paper_graph_a() -> OwnedGraph<VertexA, Label> {
    let mut a = GraphBuilder::new();
    a.add_node(VertexA::A);
    a.add_node(VertexA::A1);
    a.add_node(VertexA::A2);
    a.add_edge(VertexA::A, VertexA::A1, Label::L1);
    a.add_edge(VertexA::A, VertexA::A2, Label::L1);
    a.add_edge(VertexA::A1, VertexA::A2, Label::L2);
    a.graph()
}

/// Model B of the same example. `B -> B2` carries a different label and
/// `B2 -> B1` points the other way than `A1 -> A2`.
#[allow(dead_code)]
pub fn paper_graph_b() -> OwnedGraph<VertexB, Label> {
    let mut b = GraphBuilder::new();
    b.add_node(VertexB::B);
    b.add_node(VertexB::B1);
    b.add_node(VertexB::B2);
    b.add_edge(VertexB::B, VertexB::B1, Label::L1);
    b.add_edge(VertexB::B, VertexB::B2, Label::L2);
    b.add_edge(VertexB::B2, VertexB::B1, Label::L2);
    b.graph()
}

/// `0 -> 1 -> ... -> size - 1`
#[allow(dead_code)]
pub fn chain(size: usize) -> OwnedGraph<usize, Label> {
    let mut g = GraphBuilder::new();
    for i in 0..size {
        g.add_node(i);
    }
    for i in 1..size {
        g.add_edge(i - 1, i, Label::L1);
    }
    g.graph()
}
