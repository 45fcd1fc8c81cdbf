//! Graph matching using similarity flooding according to [this paper][1].
//!
//! Given two directed multigraphs with labeled edges and an initial
//! similarity for pairs of their vertices, similarity flooding propagates
//! similarity along corresponding edges until it converges. A
//! [`MatchingFilter`] then reduces the scores to a one-to-one correspondence.
//!
//! The `rayon` feature floods the vertices of the propagation graph in
//! parallel. Results are bit-identical to the sequential build; run
//! `cargo test --features rayon` to cover that path.
//!
//! [1]: https://doi.org/10.1109/ICDE.2002.994702 "2002, S. Melnik, H. Garcia-Molina,
//!      E. Rahm, Similarity Flooding: A Versatile Graph Matching Algorithm and its
//!      Application to Schema Matching"

pub mod graph;
mod coefficient;
mod config;
mod error;
mod fixpoint;
mod graph_traits;
mod matching_filter;
mod optimal_matching;
mod propagation_graph;
mod similarity_flooding;
mod similarity_mapping;

pub use {
    coefficient::*, config::*, error::*, fixpoint::*, graph_traits::*, matching_filter::*,
    optimal_matching::*, propagation_graph::*, similarity_flooding::*, similarity_mapping::*,
};

use std::hash::Hash;

/// Floods `a` and `b` and filters the result against `initial`, with the
/// candidate universe being every pair of the two graphs.
pub fn match_and_filter<GA, GB, L>(
    a: &GA,
    b: &GB,
    initial: &mut SimilarityMapping<GA::NODE, GB::NODE>,
    flooding: &FloodingConfig,
    filter: &FilterConfig,
) -> Result<Correspondence<GA::NODE, GB::NODE>>
where
    GA: Graph,
    GB: Graph,
    GA::EDGE: Edges<Label = L>,
    GB::EDGE: Edges<Label = L>,
    GA::NODE: Eq + Hash,
    GB::NODE: Eq + Hash,
    L: Eq + Hash,
{
    let vertices_a: Vec<GA::NODE> = (0..a.num_nodes()).map(|i| a.node_value(i).clone()).collect();
    let vertices_b: Vec<GB::NODE> = (0..b.num_nodes()).map(|j| b.node_value(j).clone()).collect();
    initial.prepare_cartesian(&vertices_a, &vertices_b)?;

    let mapping = SimilarityFlooding::from_config(flooding)?.match_graphs(a, b, initial)?;
    Ok(OrderedMatchingFilter::from_config(filter).filter(&mapping, Some(initial)))
}
