//! Refinement loop: query the oracle at the worst facet's normal, split,
//! repeat.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use crate::error::{Error, Result};
use crate::pareto::{Facet, NonDominatedSet, PointAndSolution};

use super::{Approximation, ChordCfg, WeightedSumOracle};

/// Approximate the Pareto frontier to within ratio distance `eps`.
///
/// `space_dimension` is the number of objectives (at least 2); `eps` must be
/// positive. On success, every non-boundary facet of the result carries an
/// error bound of at most `eps`.
pub fn approximate<O: WeightedSumOracle>(
    oracle: &mut O,
    space_dimension: usize,
    eps: f64,
) -> Result<Approximation<O::Solution>> {
    approximate_with_cfg(oracle, space_dimension, eps, ChordCfg::default())
}

/// [`approximate`] with an explicit configuration.
///
/// # Panics
///
/// When `space_dimension < 2`.
pub fn approximate_with_cfg<O: WeightedSumOracle>(
    oracle: &mut O,
    space_dimension: usize,
    eps: f64,
    cfg: ChordCfg,
) -> Result<Approximation<O::Solution>> {
    assert!(space_dimension >= 2, "need at least two objectives");
    if eps <= 0.0 {
        return Err(Error::NegativeApproxRatio { eps });
    }
    ChordRunner::new(oracle, space_dimension, eps, cfg).run()
}

/// Queue entry; the largest error bound is refined first, ties go to the
/// oldest facet.
struct Ranked<S> {
    error: f64,
    seq: usize,
    facet: Facet<S>,
}

impl<S> PartialEq for Ranked<S> {
    fn eq(&self, other: &Self) -> bool {
        self.seq == other.seq
    }
}

impl<S> Eq for Ranked<S> {}

impl<S> PartialOrd for Ranked<S> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<S> Ord for Ranked<S> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.error
            .partial_cmp(&other.error)
            .unwrap_or(Ordering::Equal)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

/// Runner carrying the refinement state.
struct ChordRunner<'a, O: WeightedSumOracle> {
    oracle: &'a mut O,
    dim: usize,
    eps: f64,
    cfg: ChordCfg,
    comb_calls: usize,
    pareto: NonDominatedSet<PointAndSolution<O::Solution>>,
    queue: BinaryHeap<Ranked<O::Solution>>,
    done: Vec<Facet<O::Solution>>,
    seq: usize,
}

impl<'a, O: WeightedSumOracle> ChordRunner<'a, O> {
    fn new(oracle: &'a mut O, dim: usize, eps: f64, cfg: ChordCfg) -> Self {
        Self {
            oracle,
            dim,
            eps,
            cfg,
            comb_calls: 0,
            pareto: NonDominatedSet::new(),
            queue: BinaryHeap::new(),
            done: Vec::new(),
            seq: 0,
        }
    }

    fn run(mut self) -> Result<Approximation<O::Solution>> {
        // Anchor phase: one extreme point per objective axis.
        let mut anchors: Vec<PointAndSolution<O::Solution>> = Vec::with_capacity(self.dim);
        for i in 0..self.dim {
            let mut weights = vec![0.0; self.dim];
            weights[i] = 1.0;
            let pas = self.comb(&weights)?;
            if !anchors.iter().any(|a| a.point == pas.point) {
                anchors.push(pas.clone());
            }
            self.pareto.insert(pas)?;
        }
        if anchors.len() < self.dim {
            tracing::debug!(
                distinct = anchors.len(),
                dimension = self.dim,
                "not enough distinct anchor points to span a facet"
            );
            return Ok(self.finish());
        }

        // Probe the interior along the all-ones direction; a fresh point
        // splits the anchor facet right away.
        let probe = self.comb(&vec![1.0; self.dim])?;
        let fresh = !anchors.iter().any(|a| a.point == probe.point);
        self.pareto.insert(probe.clone())?;
        let anchor_facet = Facet::new(anchors, true)?;
        if fresh {
            self.split(&anchor_facet, &probe)?;
        } else {
            self.admit(anchor_facet);
        }

        // Refinement: always attack the facet with the largest bound.
        while let Some(entry) = self.queue.pop() {
            if self.budget_exhausted() {
                tracing::warn!(
                    comb_calls = self.comb_calls,
                    queued = self.queue.len() + 1,
                    "oracle budget exhausted; reporting remaining facets as-is"
                );
                self.done.push(entry.facet);
                while let Some(rest) = self.queue.pop() {
                    self.done.push(rest.facet);
                }
                break;
            }
            let facet = entry.facet;
            tracing::debug!(bound = entry.error, "refining facet");
            let pas = self.comb(facet.normal())?;
            let tight = match facet.ratio_distance(&pas.point) {
                Ok(distance) => distance == 0.0,
                // The new point is invisible to this normal; it is certainly
                // not on the facet.
                Err(Error::InfiniteRatioDistance) => false,
                Err(e) => return Err(e),
            };
            if tight {
                // Nothing lies below this facet: it sits on the hull of the
                // frontier itself.
                self.done.push(facet.into_boundary());
            } else {
                self.pareto.insert(pas.clone())?;
                self.split(&facet, &pas)?;
            }
        }
        Ok(self.finish())
    }

    /// Replace `facet` by the d facets obtained by swapping each vertex in
    /// turn for the new one.
    fn split(
        &mut self,
        facet: &Facet<O::Solution>,
        vertex: &PointAndSolution<O::Solution>,
    ) -> Result<()> {
        for i in 0..self.dim {
            let mut vertices = facet.vertices().to_vec();
            vertices[i] = vertex.clone();
            let child = Facet::new(vertices, true)?;
            self.admit(child);
        }
        Ok(())
    }

    /// Route a freshly built facet: refinable facets enter the queue, the
    /// rest are retired.
    fn admit(&mut self, facet: Facet<O::Solution>) {
        if facet.is_boundary() {
            self.done.push(facet);
            return;
        }
        if !facet.has_all_normal_elements_non_negative() {
            // The normal cannot serve as a weight vector; the facet faces
            // out of the feasible cone.
            tracing::debug!("retiring facet with mixed-sign normal");
            self.done.push(facet.into_boundary());
            return;
        }
        let Ok(error) = facet.local_approximation_error() else {
            self.done.push(facet);
            return;
        };
        if error <= self.eps {
            self.done.push(facet);
        } else {
            self.seq += 1;
            self.queue.push(Ranked {
                error,
                seq: self.seq,
                facet,
            });
        }
    }

    fn comb(&mut self, weights: &[f64]) -> Result<PointAndSolution<O::Solution>> {
        self.comb_calls += 1;
        let pas = self.oracle.comb(weights)?;
        if pas.point.is_null() {
            return Err(Error::NullObject);
        }
        debug_assert_eq!(pas.point.dimension(), self.dim);
        Ok(pas)
    }

    fn budget_exhausted(&self) -> bool {
        self.cfg
            .max_comb_calls
            .is_some_and(|max| self.comb_calls >= max)
    }

    fn finish(self) -> Approximation<O::Solution> {
        tracing::debug!(
            points = self.pareto.len(),
            facets = self.done.len(),
            comb_calls = self.comb_calls,
            "chord refinement finished"
        );
        Approximation {
            pareto: self.pareto,
            facets: self.done,
        }
    }
}
