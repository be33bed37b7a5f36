//! Oracle results: an objective point paired with the solution behind it.

use crate::error::Result;
use crate::geom::Point;

/// A Pareto point together with the domain solution that attains it and the
/// weight vector the oracle was queried with.
///
/// The solution payload is opaque to the approximation machinery; nothing is
/// required of it beyond cloneability. When the point is non-null its
/// dimension equals the weight count.
#[derive(Clone, Debug)]
pub struct PointAndSolution<S> {
    /// Image of the solution in objective space.
    pub point: Point,
    /// The solution that attains `point`.
    pub solution: S,
    /// Weights of the scalarized query that produced this result.
    pub weights: Vec<f64>,
}

impl<S> PointAndSolution<S> {
    pub fn new(point: Point, solution: S, weights: Vec<f64>) -> Self {
        debug_assert!(
            point.is_null() || weights.is_empty() || point.dimension() == weights.len(),
            "point dimension and weight count disagree"
        );
        Self {
            point,
            solution,
            weights,
        }
    }

    /// Dimension of the objective space.
    #[inline]
    pub fn dimension(&self) -> usize {
        self.point.dimension()
    }

    /// True when this result carries no point.
    #[inline]
    pub fn is_null(&self) -> bool {
        self.point.is_null()
    }

    /// Lexicographic comparison on the objective points.
    pub fn lex_less(&self, other: &Self) -> Result<bool> {
        self.point.lex_less(&other.point)
    }
}

impl<S> PartialEq for PointAndSolution<S> {
    /// Results compare by their objective points only.
    fn eq(&self, other: &Self) -> bool {
        self.point == other.point
    }
}
