//! Simplicial facets of the lower approximation hull.

use nalgebra::{DMatrix, DVector};

use crate::error::{Error, Result};
use crate::geom::{normal_through, Hyperplane, Point};

use super::point_and_solution::PointAndSolution;

/// A simplicial facet of the current lower hull: exactly d vertices in
/// d-dimensional objective space, an outward normal, and an upper bound on
/// the approximation error the facet can still hide.
///
/// The bound is the ratio distance from the facet's supporting hyperplane to
/// its *Lower Distal Point* (LDP): the unique intersection of the d weight
/// hyperplanes `w_i . x = w_i . v_i` associated with the vertices, i.e. the
/// most distant point the chord step through this facet could still reach.
/// When that system is singular, the intersection leaves the closed positive
/// orthant, or its image under the normal vanishes, no finite bound exists
/// and the facet is flagged as *boundary*.
///
/// A facet is immutable once constructed; refinement replaces it with new
/// facets instead of mutating it.
#[derive(Clone, Debug)]
pub struct Facet<S> {
    space_dimension: usize,
    vertices: Vec<PointAndSolution<S>>,
    normal: Vec<f64>,
    local_error: f64,
    boundary: bool,
}

impl<S> Facet<S> {
    /// Facet through `vertices`, with the normal computed from their affine
    /// hull.
    ///
    /// Of the two opposite normals spanning the hull, the constructor picks
    /// the one induced by the vertex order; with `prefer_positive_normal` an
    /// all-non-positive pick is flipped so it points into the Pareto region.
    ///
    /// # Panics
    ///
    /// When the number of vertices differs from their dimension (facets are
    /// simplicial).
    pub fn new(vertices: Vec<PointAndSolution<S>>, prefer_positive_normal: bool) -> Result<Self> {
        let space_dimension = check_vertices(&vertices)?;
        let points: Vec<Point> = vertices.iter().map(|v| v.point.clone()).collect();
        let mut normal = normal_through(&points);
        if prefer_positive_normal && normal.iter().all(|&a| a <= 0.0) {
            for a in &mut normal {
                *a = -*a;
            }
        }
        Ok(Self::assemble(space_dimension, vertices, normal))
    }

    /// Facet with a caller-supplied normal; the caller warrants that the
    /// normal agrees with the vertices' affine hull.
    pub fn with_normal(vertices: Vec<PointAndSolution<S>>, normal: Vec<f64>) -> Result<Self> {
        let space_dimension = check_vertices(&vertices)?;
        if normal.len() != space_dimension {
            return Err(Error::DifferentDimensions {
                left: normal.len(),
                right: space_dimension,
            });
        }
        Ok(Self::assemble(space_dimension, vertices, normal))
    }

    fn assemble(
        space_dimension: usize,
        vertices: Vec<PointAndSolution<S>>,
        normal: Vec<f64>,
    ) -> Self {
        let mut facet = Self {
            space_dimension,
            vertices,
            normal,
            local_error: 0.0,
            boundary: true,
        };
        facet.classify();
        facet
    }

    /// Compute the LDP-based error bound, or flag the facet as boundary.
    fn classify(&mut self) {
        let Some(ldp) = self.compute_lower_distal_point() else {
            return;
        };
        if ldp.coordinates().iter().any(|&c| c < 0.0) {
            return;
        }
        if let Ok(error) = self.ratio_distance(&ldp) {
            self.local_error = error;
            self.boundary = false;
        }
    }

    /// Dimension of the space the facet lives in.
    #[inline]
    pub fn space_dimension(&self) -> usize {
        self.space_dimension
    }

    /// The facet's vertices, in construction order.
    #[inline]
    pub fn vertices(&self) -> &[PointAndSolution<S>] {
        &self.vertices
    }

    /// The facet's normal vector.
    #[inline]
    pub fn normal(&self) -> &[f64] {
        &self.normal
    }

    /// A boundary facet has no usable error bound and is excluded from
    /// refinement.
    #[inline]
    pub fn is_boundary(&self) -> bool {
        self.boundary
    }

    /// Upper bound on the approximation error hidden below this facet, or
    /// `BoundaryFacet` when none exists.
    pub fn local_approximation_error(&self) -> Result<f64> {
        if self.boundary {
            return Err(Error::BoundaryFacet);
        }
        Ok(self.local_error)
    }

    /// Intersection of the d weight hyperplanes `w_i . x = w_i . v_i`, if
    /// the system has a unique solution.
    pub fn compute_lower_distal_point(&self) -> Option<Point> {
        let d = self.space_dimension;
        let w = DMatrix::from_fn(d, d, |r, c| self.vertices[r].weights[c]);
        let b = DVector::from_fn(d, |r, _| {
            self.vertices[r]
                .weights
                .iter()
                .zip(self.vertices[r].point.coordinates())
                .map(|(wi, vi)| wi * vi)
                .sum::<f64>()
        });
        w.lu()
            .solve(&b)
            .map(|x| Point::new(x.iter().copied().collect()))
    }

    /// Ratio distance from the facet's supporting hyperplane to `p`.
    pub fn ratio_distance(&self, p: &Point) -> Result<f64> {
        self.supporting_hyperplane().ratio_distance(p)
    }

    /// The hyperplane spanned by the facet: its normal, offset through the
    /// first vertex.
    pub fn supporting_hyperplane(&self) -> Hyperplane {
        let b = self
            .normal
            .iter()
            .zip(self.vertices[0].point.coordinates())
            .map(|(a, x)| a * x)
            .sum();
        Hyperplane::new(self.normal.clone(), b)
    }

    /// No normal component points out of the non-negative cone; only such
    /// normals can serve as oracle weight vectors.
    pub fn has_all_normal_elements_non_negative(&self) -> bool {
        self.normal.iter().all(|&a| a >= 0.0)
    }

    /// Every normal component non-positive.
    pub fn has_all_normal_elements_non_positive(&self) -> bool {
        self.normal.iter().all(|&a| a <= 0.0)
    }

    /// Retire the facet: keep it for reporting, drop its claim to a bound.
    pub(crate) fn into_boundary(mut self) -> Self {
        self.boundary = true;
        self
    }
}

/// Shared vertex validation: non-null, equal dimensions, simplicial count.
fn check_vertices<S>(vertices: &[PointAndSolution<S>]) -> Result<usize> {
    let Some(first) = vertices.first() else {
        return Err(Error::NullObject);
    };
    if first.is_null() {
        return Err(Error::NullObject);
    }
    let dimension = first.dimension();
    assert_eq!(
        vertices.len(),
        dimension,
        "facets are simplicial: expected {dimension} vertices"
    );
    for vertex in vertices {
        if vertex.is_null() {
            return Err(Error::NullObject);
        }
        if vertex.dimension() != dimension {
            return Err(Error::DifferentDimensions {
                left: vertex.dimension(),
                right: dimension,
            });
        }
        debug_assert_eq!(vertex.weights.len(), dimension);
    }
    Ok(dimension)
}
