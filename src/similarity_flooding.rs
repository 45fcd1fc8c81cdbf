//! Similarity flooding as presented in S. Melnik, H. Garcia-Molina, and
//! E. Rahm, "Similarity flooding: a versatile graph matching algorithm and its
//! application to schema matching", ICDE 2002, pp. 117–128.

use crate::coefficient::PropagationCoefficient;
use crate::config::FloodingConfig;
use crate::error::{Error, Result};
use crate::fixpoint::{residuum, FixpointFormula};
use crate::graph_traits::{Edges, Graph};
use crate::propagation_graph::PropagationGraph;
use crate::similarity_mapping::SimilarityMapping;
use std::hash::Hash;

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct SimilarityFlooding {
    epsilon: f64,
    max_iterations: usize,
    coefficient: PropagationCoefficient,
    fixpoint: FixpointFormula,
}

/// Result of one [`SimilarityFlooding::run`].
#[derive(Debug)]
pub struct FloodingOutcome<A, B> {
    /// Final similarities of the propagation graph's vertex pairs.
    pub mapping: SimilarityMapping<A, B>,
    /// Number of fixpoint steps performed.
    pub iterations: usize,
    /// Distance between the last two vectors; infinite if no step was performed.
    pub residuum: f64,
    pub num_vertices: usize,
    pub num_edges: usize,
}

impl SimilarityFlooding {
    /// Fails if `epsilon` is negative or NaN.
    pub fn new(
        epsilon: f64,
        max_iterations: usize,
        coefficient: PropagationCoefficient,
        fixpoint: FixpointFormula,
    ) -> Result<SimilarityFlooding> {
        if !(epsilon >= 0.0) {
            return Err(Error::InvalidParameter {
                name: "epsilon",
                value: epsilon.to_string(),
                reason: "must be a non-negative number",
            });
        }
        Ok(SimilarityFlooding {
            epsilon,
            max_iterations,
            coefficient,
            fixpoint,
        })
    }

    pub fn from_config(config: &FloodingConfig) -> Result<SimilarityFlooding> {
        Self::new(
            config.epsilon,
            config.max_iterations,
            config.coefficient,
            config.fixpoint,
        )
    }

    pub fn epsilon(&self) -> f64 {
        self.epsilon
    }

    pub fn max_iterations(&self) -> usize {
        self.max_iterations
    }

    pub fn coefficient(&self) -> PropagationCoefficient {
        self.coefficient
    }

    pub fn fixpoint(&self) -> FixpointFormula {
        self.fixpoint
    }

    /// Matches the vertices of `a` and `b`.
    ///
    /// The result contains only the pairs of the propagation graph. Pairs
    /// without any corresponding edges are absent, their similarity remains
    /// available from `initial`.
    pub fn match_graphs<GA, GB, L>(
        &self,
        a: &GA,
        b: &GB,
        initial: &mut SimilarityMapping<GA::NODE, GB::NODE>,
    ) -> Result<SimilarityMapping<GA::NODE, GB::NODE>>
    where
        GA: Graph,
        GB: Graph,
        GA::EDGE: Edges<Label = L>,
        GB::EDGE: Edges<Label = L>,
        GA::NODE: Eq + Hash,
        GB::NODE: Eq + Hash,
        L: Eq + Hash,
    {
        self.run(a, b, initial).map(|outcome| outcome.mapping)
    }

    /// Like [`match_graphs`](Self::match_graphs), also reporting convergence
    /// and propagation graph size.
    pub fn run<GA, GB, L>(
        &self,
        a: &GA,
        b: &GB,
        initial: &mut SimilarityMapping<GA::NODE, GB::NODE>,
    ) -> Result<FloodingOutcome<GA::NODE, GB::NODE>>
    where
        GA: Graph,
        GB: Graph,
        GA::EDGE: Edges<Label = L>,
        GB::EDGE: Edges<Label = L>,
        GA::NODE: Eq + Hash,
        GB::NODE: Eq + Hash,
        L: Eq + Hash,
    {
        let propagation = PropagationGraph::build(a, b, self.coefficient);
        log::debug!(
            "propagation graph: {} of {} pairs, {} edges",
            propagation.num_vertices(),
            a.num_nodes() * b.num_nodes(),
            propagation.num_edges()
        );

        let pairs: Vec<(GA::NODE, GB::NODE)> = propagation
            .pairs()
            .iter()
            .map(|&(i, j)| (a.node_value(i).clone(), b.node_value(j).clone()))
            .collect();

        let initial_vector = initial.mapped_values(&pairs)?;
        let mut previous = initial_vector.clone();
        let mut delta = f64::INFINITY;
        let mut iterations = 0;

        while iterations < self.max_iterations && delta > self.epsilon {
            let next = self
                .fixpoint
                .calculate(&initial_vector, &previous, |v| propagation.flood(v));
            delta = residuum(&previous, &next);
            previous = next;
            iterations += 1;
            log::trace!("iteration {}: residuum {}", iterations, delta);
        }

        log::debug!(
            "similarity flooding stopped after {} iterations, residuum {}",
            iterations,
            delta
        );

        Ok(FloodingOutcome {
            mapping: SimilarityMapping::from_pairs(pairs, previous.to_vec())?,
            iterations,
            residuum: delta,
            num_vertices: propagation.num_vertices(),
            num_edges: propagation.num_edges(),
        })
    }
}

impl Default for SimilarityFlooding {
    fn default() -> Self {
        let config = FloodingConfig::default();
        SimilarityFlooding {
            epsilon: config.epsilon,
            max_iterations: config.max_iterations,
            coefficient: config.coefficient,
            fixpoint: config.fixpoint,
        }
    }
}
