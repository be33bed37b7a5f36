//! Immutable points of the objective space.

use std::fmt;

use nalgebra::{DVector, RowDVector};

use crate::error::{Error, Result};

/// A point of the d-dimensional objective space.
///
/// The dimension is fixed at construction; the only sanctioned mutation is
/// [`Point::truncate`]. Dimension zero marks the *null* point, the sentinel
/// for "no solution". Equality is exact on dimension and coordinates.
#[derive(Clone, Debug, PartialEq)]
pub struct Point {
    coordinates: Vec<f64>,
}

impl Point {
    /// Point with the given coordinates.
    pub fn new(coordinates: Vec<f64>) -> Self {
        Self { coordinates }
    }

    /// The null point (dimension zero).
    pub fn null() -> Self {
        Self {
            coordinates: Vec::new(),
        }
    }

    #[inline]
    pub fn dimension(&self) -> usize {
        self.coordinates.len()
    }

    #[inline]
    pub fn is_null(&self) -> bool {
        self.coordinates.is_empty()
    }

    /// Every coordinate strictly positive.
    #[inline]
    pub fn is_strictly_positive(&self) -> bool {
        self.coordinates.iter().all(|&c| c > 0.0)
    }

    /// Every coordinate exactly zero.
    #[inline]
    pub fn is_zero(&self) -> bool {
        self.coordinates.iter().all(|&c| c == 0.0)
    }

    /// Coordinate `index`, or `NonExistentCoordinate` when out of range.
    pub fn coordinate(&self, index: usize) -> Result<f64> {
        self.coordinates
            .get(index)
            .copied()
            .ok_or(Error::NonExistentCoordinate {
                index,
                dimension: self.dimension(),
            })
    }

    /// The raw coordinate slice.
    #[inline]
    pub fn coordinates(&self) -> &[f64] {
        &self.coordinates
    }

    /// Keep only the first `dimension` coordinates; no-op when the point is
    /// already at most that large.
    pub fn truncate(&mut self, dimension: usize) {
        self.coordinates.truncate(dimension);
    }

    /// Strict lexicographic comparison; a total order within one dimension.
    pub fn lex_less(&self, other: &Point) -> Result<bool> {
        if self.dimension() != other.dimension() {
            return Err(Error::DifferentDimensions {
                left: self.dimension(),
                right: other.dimension(),
            });
        }
        for (a, b) in self.coordinates.iter().zip(&other.coordinates) {
            if a < b {
                return Ok(true);
            }
            if a > b {
                return Ok(false);
            }
        }
        Ok(false)
    }

    /// Does `self` eps-cover `q`? True iff `self_i <= (1 + eps) * q_i` for
    /// every coordinate.
    ///
    /// Both points must lie in the closed positive orthant and share a
    /// dimension; `eps` must be non-negative. With `eps = 0` this is plain
    /// Pareto dominance (for minimization).
    pub fn dominates(&self, q: &Point, eps: f64) -> Result<bool> {
        if eps < 0.0 {
            return Err(Error::NegativeApproxRatio { eps });
        }
        if self.is_null() || q.is_null() {
            return Err(Error::NullObject);
        }
        if self.dimension() != q.dimension() {
            return Err(Error::DifferentDimensions {
                left: self.dimension(),
                right: q.dimension(),
            });
        }
        if self.coordinates.iter().any(|&c| c < 0.0) || q.coordinates.iter().any(|&c| c < 0.0) {
            return Err(Error::NotStrictlyPositive);
        }
        Ok(self
            .coordinates
            .iter()
            .zip(&q.coordinates)
            .all(|(&p, &qi)| p <= (1.0 + eps) * qi))
    }

    /// Ratio distance from `self` to `q`: `max(max_i((q_i - p_i) / p_i), 0)`,
    /// the least `eps >= 0` such that `q` eps-covers `self`.
    ///
    /// `self` must be strictly positive (the formula divides by its
    /// coordinates). Zero iff `self` dominates `q`.
    pub fn ratio_distance(&self, q: &Point) -> Result<f64> {
        if self.is_null() || q.is_null() {
            return Err(Error::NullObject);
        }
        if self.dimension() != q.dimension() {
            return Err(Error::DifferentDimensions {
                left: self.dimension(),
                right: q.dimension(),
            });
        }
        if !self.is_strictly_positive() {
            return Err(Error::NotStrictlyPositive);
        }
        let mut worst = 0.0f64;
        for (&p, &qi) in self.coordinates.iter().zip(&q.coordinates) {
            worst = worst.max((qi - p) / p);
        }
        Ok(worst)
    }

    /// Export as an nalgebra column vector.
    pub fn to_vector(&self) -> DVector<f64> {
        DVector::from_column_slice(&self.coordinates)
    }

    /// Export as an nalgebra row vector.
    pub fn to_row_vector(&self) -> RowDVector<f64> {
        RowDVector::from_row_slice(&self.coordinates)
    }
}

impl From<Vec<f64>> for Point {
    fn from(coordinates: Vec<f64>) -> Self {
        Self::new(coordinates)
    }
}

impl From<&[f64]> for Point {
    fn from(coordinates: &[f64]) -> Self {
        Self::new(coordinates.to_vec())
    }
}

impl fmt::Display for Point {
    /// Coordinates inside parentheses, e.g. `(1, 4.27)`; the null point
    /// prints as `()`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(")?;
        for (i, c) in self.coordinates.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{c}")?;
        }
        write!(f, ")")
    }
}
