//! Sets of mutually non-dominated elements.

use crate::error::Result;
use crate::geom::Point;

use super::point_and_solution::PointAndSolution;

/// Access to the objective point inside a set element.
pub trait HasPoint {
    fn point(&self) -> &Point;
}

impl HasPoint for Point {
    fn point(&self) -> &Point {
        self
    }
}

impl<S> HasPoint for PointAndSolution<S> {
    fn point(&self) -> &Point {
        &self.point
    }
}

/// A set of elements whose points never dominate one another.
///
/// Insertion is linear in the current size; Pareto sets stay small enough
/// that nothing fancier pays off. Iteration order is stable between
/// mutations (insertion order of the surviving elements).
#[derive(Clone, Debug)]
pub struct NonDominatedSet<T> {
    elements: Vec<T>,
}

impl<T> NonDominatedSet<T> {
    pub fn new() -> Self {
        Self {
            elements: Vec::new(),
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.elements.iter()
    }
}

impl<T: HasPoint> NonDominatedSet<T> {
    /// Insert `candidate` unless an existing element dominates it; every
    /// element the candidate dominates is evicted first. Returns whether the
    /// candidate was kept.
    pub fn insert(&mut self, candidate: T) -> Result<bool> {
        let mut keep = Vec::with_capacity(self.elements.len());
        for element in &self.elements {
            if element.point().dominates(candidate.point(), 0.0)? {
                return Ok(false);
            }
            keep.push(!candidate.point().dominates(element.point(), 0.0)?);
        }
        let mut index = 0;
        self.elements.retain(|_| {
            let kept = keep[index];
            index += 1;
            kept
        });
        self.elements.push(candidate);
        Ok(true)
    }

    /// Exact-equality membership test on points.
    pub fn contains_point(&self, point: &Point) -> bool {
        self.elements.iter().any(|e| e.point() == point)
    }
}

impl<T> Default for NonDominatedSet<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a, T> IntoIterator for &'a NonDominatedSet<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.elements.iter()
    }
}
