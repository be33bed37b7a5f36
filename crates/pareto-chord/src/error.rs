//! Error taxonomy shared by the geometry kernel and the chord driver.

use thiserror::Error;

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Everything the geometry kernel and the driver can fail with.
///
/// The driver handles [`Error::BoundaryFacet`] and singular lower-distal
/// systems locally (by flagging the affected facet); every other kind aborts
/// the approximation and is surfaced to the caller.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    /// Operands disagree on the ambient dimension.
    #[error("operands live in different dimensions ({left} vs {right})")]
    DifferentDimensions { left: usize, right: usize },

    /// Out-of-range point coordinate access.
    #[error("coordinate {index} does not exist (point dimension {dimension})")]
    NonExistentCoordinate { index: usize, dimension: usize },

    /// Out-of-range hyperplane coefficient access.
    #[error("coefficient {index} does not exist (space dimension {dimension})")]
    NonExistentCoefficient { index: usize, dimension: usize },

    /// Ratio distance or dominance on a point outside the positive orthant.
    #[error("operation requires points inside the positive orthant")]
    NotStrictlyPositive,

    /// The approximation ratio must be positive.
    #[error("approximation ratio must be positive, got {eps}")]
    NegativeApproxRatio { eps: f64 },

    /// Operation on a null point or an empty oracle result.
    #[error("operation on a null object")]
    NullObject,

    /// Hyperplane construction received duplicate points.
    #[error("hyperplane construction received duplicate points")]
    SamePoints,

    /// A 2-D-only operation was given points of another dimension.
    #[error("operation requires 2-dimensional points")]
    Not2DPoints,

    /// A 2-D-only operation was given hyperplanes of another dimension.
    #[error("operation requires 2-dimensional hyperplanes")]
    Not2DHyperplanes,

    /// Intersection requested on parallel lines.
    #[error("hyperplanes are parallel")]
    ParallelHyperplanes,

    /// `a . p = 0` while `b != 0`: scaling the point keeps it parallel to the
    /// hyperplane, so no finite ratio reaches it.
    #[error("ratio distance is infinite (a . p = 0 while b != 0)")]
    InfiniteRatioDistance,

    /// Boundary facets carry no approximation error bound.
    #[error("boundary facets carry no approximation error bound")]
    BoundaryFacet,

    /// The weighted-sum oracle failed; refinement cannot continue.
    #[error("weighted-sum oracle failed")]
    Oracle(#[source] Box<dyn std::error::Error + Send + Sync>),
}
