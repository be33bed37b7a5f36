//! Affine hyperplanes `a1 x1 + ... + an xn = b`.

use std::fmt;

use nalgebra::DMatrix;

use super::point::Point;
use crate::error::{Error, Result};

/// A hyperplane of an n-dimensional space, stored as the coefficients
/// `a1..an` and the right-hand side `b` of its equation.
///
/// Equality and parallelism compare coefficients up to a common scalar,
/// using exact arithmetic.
#[derive(Clone, Debug)]
pub struct Hyperplane {
    coefficients: Vec<f64>,
    b: f64,
}

impl Hyperplane {
    /// Hyperplane from explicit coefficients and offset.
    pub fn new(coefficients: Vec<f64>, b: f64) -> Self {
        Self { coefficients, b }
    }

    /// Hyperplane through `points.len()` points, each of that same dimension.
    ///
    /// The normal comes from the signed minors of the matrix whose rows are
    /// `[point, 1]`. Affinely dependent points (three collinear points in
    /// 3-D, say) have no unique affine hull; that degenerate case yields the
    /// all-zero hyperplane `0 = 0` and is reported via a debug event.
    pub fn from_points(points: &[Point]) -> Result<Self> {
        let n = points.len();
        if n == 0 {
            return Err(Error::NullObject);
        }
        for p in points {
            if p.is_null() {
                return Err(Error::NullObject);
            }
            if p.dimension() != n {
                return Err(Error::DifferentDimensions {
                    left: p.dimension(),
                    right: n,
                });
            }
        }
        for i in 0..n {
            for j in i + 1..n {
                if points[i] == points[j] {
                    return Err(Error::SamePoints);
                }
            }
        }

        let coefficients = normal_through(points);
        if coefficients.iter().all(|&a| a == 0.0) {
            tracing::debug!(
                dimension = n,
                "affinely dependent points: degenerate hyperplane 0 = 0"
            );
            return Ok(Self {
                coefficients,
                b: 0.0,
            });
        }
        let b = dot(&coefficients, points[0].coordinates());
        Ok(Self { coefficients, b })
    }

    /// Line through two 2-D points.
    pub fn from_two_points(p1: &Point, p2: &Point) -> Result<Self> {
        if p1 == p2 {
            return Err(Error::SamePoints);
        }
        if p1.dimension() != 2 || p2.dimension() != 2 {
            return Err(Error::Not2DPoints);
        }
        Self::from_points(&[p1.clone(), p2.clone()])
    }

    /// Coefficient `index`, or `NonExistentCoefficient` when out of range.
    pub fn coefficient(&self, index: usize) -> Result<f64> {
        self.coefficients
            .get(index)
            .copied()
            .ok_or(Error::NonExistentCoefficient {
                index,
                dimension: self.space_dimension(),
            })
    }

    /// The raw coefficient slice.
    #[inline]
    pub fn coefficients(&self) -> &[f64] {
        &self.coefficients
    }

    /// The equation's right-hand side.
    #[inline]
    pub fn b(&self) -> f64 {
        self.b
    }

    /// Dimension of the space the hyperplane lives in.
    #[inline]
    pub fn space_dimension(&self) -> usize {
        self.coefficients.len()
    }

    /// Ratio distance from `p` to the nearest point of the hyperplane:
    /// `max((b - a . p) / (a . p), 0)`.
    ///
    /// Zero when `p` lies on the hyperplane (even at `a . p = 0`); when
    /// `a . p = 0` off the hyperplane, scaling `p` only moves it parallel to
    /// the hyperplane and the distance is infinite.
    pub fn ratio_distance(&self, p: &Point) -> Result<f64> {
        if p.is_null() {
            return Err(Error::NullObject);
        }
        if self.space_dimension() != p.dimension() {
            return Err(Error::DifferentDimensions {
                left: self.space_dimension(),
                right: p.dimension(),
            });
        }
        let image = dot(&self.coefficients, p.coordinates());
        if image == self.b {
            return Ok(0.0);
        }
        if image == 0.0 {
            return Err(Error::InfiniteRatioDistance);
        }
        Ok(((self.b - image) / image).max(0.0))
    }

    /// Parallel hyperplane through `p`: same coefficients, offset `a . p`.
    pub fn parallel_through(&self, p: &Point) -> Result<Self> {
        if self.space_dimension() != p.dimension() {
            return Err(Error::DifferentDimensions {
                left: self.space_dimension(),
                right: p.dimension(),
            });
        }
        Ok(Self {
            coefficients: self.coefficients.clone(),
            b: dot(&self.coefficients, p.coordinates()),
        })
    }

    /// Same orientation up to a scalar multiple of the coefficients.
    pub fn is_parallel(&self, other: &Hyperplane) -> bool {
        if self.space_dimension() != other.space_dimension() {
            return false;
        }
        self.coefficients
            .iter()
            .zip(&other.coefficients)
            .all(|(&a, &oa)| a * other.coefficients[0] == oa * self.coefficients[0])
    }

    /// Intersection point of two lines (2-D only).
    pub fn intersection(&self, other: &Hyperplane) -> Result<Point> {
        if self.space_dimension() != 2 || other.space_dimension() != 2 {
            return Err(Error::Not2DHyperplanes);
        }
        if self.is_parallel(other) {
            return Err(Error::ParallelHyperplanes);
        }
        let (a, oa) = (&self.coefficients, &other.coefficients);
        let x = (a[1] * other.b - self.b * oa[1]) / (a[1] * oa[0] - a[0] * oa[1]);
        let y = if a[1] != 0.0 {
            (self.b - a[0] * x) / a[1]
        } else {
            (other.b - oa[0] * x) / oa[1]
        };
        Ok(Point::new(vec![x, y]))
    }
}

impl PartialEq for Hyperplane {
    /// Equal when the equations agree up to a scalar multiple:
    /// `a_i * other.b == other.a_i * b` for every coefficient.
    fn eq(&self, other: &Self) -> bool {
        if self.space_dimension() != other.space_dimension() {
            return false;
        }
        self.coefficients
            .iter()
            .zip(&other.coefficients)
            .all(|(&a, &oa)| a * other.b == oa * self.b)
    }
}

impl fmt::Display for Hyperplane {
    /// The equation inside parentheses, e.g.
    /// `( 2.2 * x1 + 5.4 * x2 = 9.2 )`; dimension zero prints as `()`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.space_dimension() == 0 {
            return write!(f, "()");
        }
        write!(f, "( {} * x1", self.coefficients[0])?;
        for (i, &a) in self.coefficients.iter().enumerate().skip(1) {
            let sign = if a >= 0.0 { '+' } else { '-' };
            write!(f, " {} {} * x{}", sign, a.abs(), i + 1)?;
        }
        write!(f, " = {} )", self.b)
    }
}

/// Normal of the affine hull of `points`: entry `i` is the determinant of
/// the coordinate matrix with column `i` replaced by the homogeneous ones
/// column. All-zero when the points are affinely dependent.
pub(crate) fn normal_through(points: &[Point]) -> Vec<f64> {
    let n = points.len();
    let mut normal = Vec::with_capacity(n);
    for i in 0..n {
        let minor = DMatrix::from_fn(n, n, |r, c| {
            if c == i {
                1.0
            } else {
                points[r].coordinates()[c]
            }
        });
        normal.push(minor.determinant());
    }
    normal
}

#[inline]
fn dot(coefficients: &[f64], coordinates: &[f64]) -> f64 {
    coefficients
        .iter()
        .zip(coordinates)
        .map(|(a, x)| a * x)
        .sum()
}
