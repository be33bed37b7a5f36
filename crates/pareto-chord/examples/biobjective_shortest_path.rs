//! Biobjective shortest path approximated through the chord driver.
//!
//! Purpose
//! - Show the oracle seam on a concrete domain: a random digraph with
//!   (cost, delay) edge weights, where the weighted-sum oracle is a plain
//!   Dijkstra run on the scalarized edge costs.
//! - Print the epsilon-Pareto paths the driver certifies.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use pareto_chord::prelude::*;

const OBJECTIVES: usize = 2;

/// Adjacency list; `edges[u]` holds `(v, [cost, delay])`.
struct Graph {
    edges: Vec<Vec<(usize, [f64; OBJECTIVES])>>,
}

fn random_graph(nodes: usize, out_degree: usize, seed: u64) -> Graph {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut edges = vec![Vec::new(); nodes];
    for u in 0..nodes {
        for _ in 0..out_degree {
            let v = rng.gen_range(0..nodes);
            if v != u {
                edges[u].push((v, [rng.gen_range(1.0..10.0), rng.gen_range(1.0..10.0)]));
            }
        }
        // spine edge keeps the target reachable
        if u + 1 < nodes {
            edges[u].push((u + 1, [rng.gen_range(1.0..10.0), rng.gen_range(1.0..10.0)]));
        }
    }
    Graph { edges }
}

struct ShortestPathOracle<'a> {
    graph: &'a Graph,
    source: usize,
    target: usize,
}

#[derive(PartialEq)]
struct QueueEntry {
    node: usize,
    dist: f64,
}

impl Eq for QueueEntry {}

impl PartialOrd for QueueEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for QueueEntry {
    // reversed: BinaryHeap is a max-heap, Dijkstra wants the closest node
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .dist
            .partial_cmp(&self.dist)
            .unwrap_or(Ordering::Equal)
    }
}

impl WeightedSumOracle for ShortestPathOracle<'_> {
    type Solution = Vec<usize>;

    fn comb(&mut self, weights: &[f64]) -> pareto_chord::Result<PointAndSolution<Vec<usize>>> {
        let n = self.graph.edges.len();
        let mut dist = vec![f64::INFINITY; n];
        let mut prev = vec![usize::MAX; n];
        let mut objectives = vec![[0.0; OBJECTIVES]; n];
        let mut heap = BinaryHeap::new();

        dist[self.source] = 0.0;
        heap.push(QueueEntry {
            node: self.source,
            dist: 0.0,
        });
        while let Some(QueueEntry { node, dist: d }) = heap.pop() {
            if d > dist[node] {
                continue;
            }
            if node == self.target {
                break;
            }
            let reached = objectives[node];
            for &(next, cost) in &self.graph.edges[node] {
                let step: f64 = weights.iter().zip(&cost).map(|(w, c)| w * c).sum();
                let candidate = d + step;
                if candidate < dist[next] {
                    dist[next] = candidate;
                    prev[next] = node;
                    for k in 0..OBJECTIVES {
                        objectives[next][k] = reached[k] + cost[k];
                    }
                    heap.push(QueueEntry {
                        node: next,
                        dist: candidate,
                    });
                }
            }
        }

        let mut path = vec![self.target];
        let mut node = self.target;
        while node != self.source {
            node = prev[node];
            path.push(node);
        }
        path.reverse();

        Ok(PointAndSolution::new(
            Point::new(objectives[self.target].to_vec()),
            path,
            weights.to_vec(),
        ))
    }
}

fn main() {
    let graph = random_graph(60, 3, 7);
    let mut oracle = ShortestPathOracle {
        graph: &graph,
        source: 0,
        target: 59,
    };
    let approximation =
        approximate(&mut oracle, OBJECTIVES, 1e-3).expect("approximation succeeds");

    println!("pareto points: {}", approximation.pareto.len());
    for pas in approximation.pareto.iter() {
        println!("  {}  via {} nodes", pas.point, pas.solution.len());
    }
    let certified = approximation
        .facets
        .iter()
        .filter(|f| !f.is_boundary())
        .count();
    println!(
        "facets: {} total, {} with a certified bound",
        approximation.facets.len(),
        certified
    );
}
