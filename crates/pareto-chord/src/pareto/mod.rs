//! Pareto bookkeeping: oracle results, dominance-pruned sets, hull facets.
//!
//! Purpose
//! - Carry the state the chord driver accumulates between oracle calls: the
//!   points discovered so far (`NonDominatedSet`), the solutions behind them
//!   (`PointAndSolution`), and the simplicial lower-hull facets whose error
//!   bounds steer refinement (`Facet`).

mod facet;
mod nondominated;
mod point_and_solution;

pub use facet::Facet;
pub use nondominated::{HasPoint, NonDominatedSet};
pub use point_and_solution::PointAndSolution;
