//! Chord / convex-hull approximation of Pareto frontiers.
//!
//! Given a *weighted-sum oracle*, a routine that for any non-negative
//! weight vector `w` returns an extreme supported Pareto point minimizing
//! `w . x` over the feasible set, the chord driver incrementally builds a
//! polytope whose lower-hull facets under-approximate the true frontier and
//! refines the facet with the largest potential error until every certified
//! bound drops below a caller-chosen ratio distance `eps`.
//!
//! Numeric policy
//! - Predicates such as "point lies on a facet", "hyperplanes are parallel"
//!   and point equality use exact floating-point comparison. Callers that
//!   need tolerance-aware behavior should round their objective values
//!   before handing them to this crate.

pub mod chord;
pub mod error;
pub mod geom;
pub mod pareto;

/// Library version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub use chord::{approximate, approximate_with_cfg, Approximation, ChordCfg, WeightedSumOracle};
pub use error::{Error, Result};

/// Common exports for quick imports in callers.
pub mod prelude {
    pub use crate::chord::{
        approximate, approximate_with_cfg, Approximation, ChordCfg, WeightedSumOracle,
    };
    pub use crate::error::{Error, Result};
    pub use crate::geom::{Hyperplane, Point};
    pub use crate::pareto::{Facet, HasPoint, NonDominatedSet, PointAndSolution};
}
