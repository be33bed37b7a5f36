//! Multiobjective shortest-path instances: CSV loading, random generation,
//! and the Dijkstra weighted-sum oracle.
//!
//! Instance files are edge lists with columns `source`, `target` and
//! `cost1..costK` (floating point), one row per directed edge.

use std::cmp::Ordering;
use std::collections::BinaryHeap;
use std::fmt::Write as _;

use anyhow::{bail, Context, Result};
use polars::prelude::*;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use pareto_chord::prelude::{Point, PointAndSolution, WeightedSumOracle};

/// A directed graph with one cost vector per edge.
pub struct Instance {
    pub objectives: usize,
    pub nodes: usize,
    /// Adjacency list; `edges[u]` holds `(v, costs)`.
    pub edges: Vec<Vec<(usize, Vec<f64>)>>,
}

/// Load an edge-list CSV into an [`Instance`].
pub fn read_instance(path: &str, objectives: usize) -> Result<Instance> {
    let df = LazyCsvReader::new(path)
        .with_infer_schema_length(Some(100))
        .finish()
        .with_context(|| format!("opening instance {path}"))?
        .collect()
        .with_context(|| format!("reading instance {path}"))?;

    let source = df.column("source")?.i64()?;
    let target = df.column("target")?.i64()?;
    let mut cost_columns = Vec::with_capacity(objectives);
    for k in 0..objectives {
        let name = format!("cost{}", k + 1);
        cost_columns.push(
            df.column(&name)
                .with_context(|| format!("instance lacks column {name}"))?
                .f64()?,
        );
    }

    let mut nodes = 0usize;
    let mut rows = Vec::with_capacity(df.height());
    for row in 0..df.height() {
        let u = source.get(row).context("null source entry")? as usize;
        let v = target.get(row).context("null target entry")? as usize;
        let mut costs = Vec::with_capacity(objectives);
        for column in &cost_columns {
            let cost = column.get(row).context("null cost entry")?;
            if cost <= 0.0 {
                bail!("edge costs must be strictly positive, got {cost}");
            }
            costs.push(cost);
        }
        nodes = nodes.max(u + 1).max(v + 1);
        rows.push((u, v, costs));
    }

    let mut edges = vec![Vec::new(); nodes];
    for (u, v, costs) in rows {
        edges[u].push((v, costs));
    }
    Ok(Instance {
        objectives,
        nodes,
        edges,
    })
}

/// Random instance as CSV text: a reachability spine `u -> u + 1` plus
/// `out_degree` random edges per node, costs uniform in [1, 10).
pub fn generate_csv(nodes: usize, out_degree: usize, objectives: usize, seed: u64) -> String {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut csv = String::from("source,target");
    for k in 0..objectives {
        let _ = write!(csv, ",cost{}", k + 1);
    }
    csv.push('\n');

    let mut emit = |csv: &mut String, u: usize, v: usize, rng: &mut StdRng| {
        let _ = write!(csv, "{u},{v}");
        for _ in 0..objectives {
            let _ = write!(csv, ",{:.3}", rng.gen_range(1.0..10.0));
        }
        csv.push('\n');
    };

    for u in 0..nodes {
        if u + 1 < nodes {
            emit(&mut csv, u, u + 1, &mut rng);
        }
        for _ in 0..out_degree {
            let v = rng.gen_range(0..nodes);
            if v != u {
                emit(&mut csv, u, v, &mut rng);
            }
        }
    }
    csv
}

/// Weighted-sum oracle: Dijkstra on the scalarized edge costs.
pub struct ShortestPathOracle<'a> {
    instance: &'a Instance,
    source: usize,
    target: usize,
}

impl<'a> ShortestPathOracle<'a> {
    pub fn new(instance: &'a Instance, source: usize, target: usize) -> Self {
        Self {
            instance,
            source,
            target,
        }
    }
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
        let n = self.instance.nodes;
        let mut dist = vec![f64::INFINITY; n];
        let mut prev = vec![usize::MAX; n];
        let mut objectives = vec![vec![0.0; self.instance.objectives]; n];
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
            let reached = objectives[node].clone();
            for (next, costs) in &self.instance.edges[node] {
                let step: f64 = weights.iter().zip(costs).map(|(w, c)| w * c).sum();
                let candidate = d + step;
                if candidate < dist[*next] {
                    dist[*next] = candidate;
                    prev[*next] = node;
                    for (acc, (r, c)) in objectives[*next]
                        .iter_mut()
                        .zip(reached.iter().zip(costs))
                    {
                        *acc = r + c;
                    }
                    heap.push(QueueEntry {
                        node: *next,
                        dist: candidate,
                    });
                }
            }
        }

        if dist[self.target].is_infinite() {
            return Err(pareto_chord::Error::Oracle(
                format!("node {} is unreachable from {}", self.target, self.source).into(),
            ));
        }

        let mut path = vec![self.target];
        let mut node = self.target;
        while node != self.source {
            node = prev[node];
            path.push(node);
        }
        path.reverse();

        Ok(PointAndSolution::new(
            Point::new(objectives[self.target].clone()),
            path,
            weights.to_vec(),
        ))
    }
}
