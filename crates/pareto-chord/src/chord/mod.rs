//! The chord refinement driver.
//!
//! Purpose
//! - Orchestrate the approximation: obtain anchor points along the objective
//!   axes, probe the interior along the all-ones direction, then repeatedly
//!   query the oracle at the normal of the facet with the largest certified
//!   error bound and split that facet on the returned vertex, until every
//!   bound drops to the requested ratio distance.
//!
//! Why a priority queue
//! - Refining the worst facet first makes the certified global error
//!   monotone; equal bounds are broken by facet age so runs are
//!   deterministic given a deterministic oracle.

mod driver;

pub use driver::{approximate, approximate_with_cfg};

use crate::error::Result;
use crate::pareto::{Facet, NonDominatedSet, PointAndSolution};

/// The weighted-sum oracle the driver refines against.
///
/// Contract: for any weight vector `w` of the ambient dimension with
/// `w_i >= 0` and at least one positive entry, `comb` returns an extreme
/// supported Pareto point minimizing `w . x` over the feasible set, together
/// with the solution attaining it and `w` itself. Repeated queries with the
/// same weights must return a consistent point, and a feasible problem never
/// yields a null point.
pub trait WeightedSumOracle {
    /// Opaque domain solution attached to every oracle answer.
    type Solution: Clone;

    /// Solve the scalarized problem `min w . x`.
    fn comb(&mut self, weights: &[f64]) -> Result<PointAndSolution<Self::Solution>>;
}

/// Driver configuration.
#[derive(Clone, Copy, Debug, Default)]
pub struct ChordCfg {
    /// Optional hard cap on oracle calls. When the budget runs out,
    /// refinement stops and the remaining facets are reported as they are,
    /// bounds above the target included.
    pub max_comb_calls: Option<usize>,
}

/// Result of a chord run: the Pareto points discovered and the facets of the
/// final lower hull. Boundary facets are retained for reporting.
#[derive(Clone, Debug)]
pub struct Approximation<S> {
    pub pareto: NonDominatedSet<PointAndSolution<S>>,
    pub facets: Vec<Facet<S>>,
}

#[cfg(test)]
mod tests;
