use super::*;
use crate::error::Error;
use crate::geom::Point;

/// Minimizes `w . x` over a fixed candidate list; the first minimum wins, so
/// runs are deterministic.
struct FixedPointsOracle {
    points: Vec<Vec<f64>>,
}

impl WeightedSumOracle for FixedPointsOracle {
    type Solution = usize;

    fn comb(&mut self, weights: &[f64]) -> crate::error::Result<PointAndSolution<usize>> {
        let mut best = 0;
        let mut best_value = f64::INFINITY;
        for (i, candidate) in self.points.iter().enumerate() {
            let value: f64 = weights.iter().zip(candidate).map(|(w, x)| w * x).sum();
            if value < best_value {
                best = i;
                best_value = value;
            }
        }
        Ok(PointAndSolution::new(
            Point::new(self.points[best].clone()),
            best,
            weights.to_vec(),
        ))
    }
}

#[test]
fn biobjective_segment_resolves_into_two_tight_facets() {
    // Frontier: the segment between (0, 1) and (1, 0), with its midpoint as
    // the only interior extreme point.
    struct SegmentOracle;
    impl WeightedSumOracle for SegmentOracle {
        type Solution = &'static str;

        fn comb(&mut self, weights: &[f64]) -> crate::error::Result<PointAndSolution<&'static str>> {
            let (point, name) = if weights[0] > 0.0 && weights[1] > 0.0 {
                (vec![0.5, 0.5], "mid")
            } else if weights[0] > 0.0 {
                (vec![0.0, 1.0], "west")
            } else {
                (vec![1.0, 0.0], "south")
            };
            Ok(PointAndSolution::new(
                Point::new(point),
                name,
                weights.to_vec(),
            ))
        }
    }

    let approximation = approximate(&mut SegmentOracle, 2, 0.01).unwrap();

    assert_eq!(approximation.pareto.len(), 3);
    for expected in [[0.0, 1.0], [1.0, 0.0], [0.5, 0.5]] {
        assert!(approximation.pareto.contains_point(&Point::new(expected.to_vec())));
    }
    assert_eq!(approximation.facets.len(), 2);
    for facet in &approximation.facets {
        assert!(!facet.is_boundary());
        assert_eq!(facet.local_approximation_error().unwrap(), 0.0);
    }
}

#[test]
fn convex_staircase_is_resolved_exactly() {
    let mut oracle = FixedPointsOracle {
        points: vec![
            vec![1.0, 8.0],
            vec![2.0, 4.0],
            vec![4.0, 2.0],
            vec![8.0, 1.0],
        ],
    };
    let approximation = approximate(&mut oracle, 2, 1e-3).unwrap();

    assert_eq!(approximation.pareto.len(), 4);
    for expected in [[1.0, 8.0], [2.0, 4.0], [4.0, 2.0], [8.0, 1.0]] {
        assert!(approximation.pareto.contains_point(&Point::new(expected.to_vec())));
    }
    assert_eq!(approximation.facets.len(), 3);
    for facet in &approximation.facets {
        if !facet.is_boundary() {
            assert!(facet.local_approximation_error().unwrap() <= 1e-3);
        }
    }
    // the middle facet of the staircase is certified exactly
    let certified = approximation
        .facets
        .iter()
        .filter(|f| !f.is_boundary())
        .count();
    assert_eq!(certified, 1);
}

#[test]
fn triobjective_frontier_meets_the_bound() {
    let mut oracle = FixedPointsOracle {
        points: vec![
            vec![4.0, 1.0, 2.0],
            vec![2.0, 4.0, 1.0],
            vec![1.0, 2.0, 4.0],
            vec![2.0, 2.0, 2.0],
        ],
    };
    let approximation = approximate(&mut oracle, 3, 1e-2).unwrap();

    assert_eq!(approximation.pareto.len(), 4);
    for facet in &approximation.facets {
        assert_eq!(facet.vertices().len(), 3);
        if !facet.is_boundary() {
            assert!(facet.local_approximation_error().unwrap() <= 1e-2);
        }
    }
    // the interior probe splits the anchor facet three ways
    assert_eq!(approximation.facets.len(), 3);
}

#[test]
fn constant_oracle_yields_a_single_point_and_no_facets() {
    struct ConstantOracle;
    impl WeightedSumOracle for ConstantOracle {
        type Solution = ();

        fn comb(&mut self, weights: &[f64]) -> crate::error::Result<PointAndSolution<()>> {
            Ok(PointAndSolution::new(
                Point::new(vec![3.0, 3.0]),
                (),
                weights.to_vec(),
            ))
        }
    }

    let approximation = approximate(&mut ConstantOracle, 2, 0.1).unwrap();
    assert_eq!(approximation.pareto.len(), 1);
    assert!(approximation.pareto.contains_point(&Point::new(vec![3.0, 3.0])));
    assert!(approximation.facets.is_empty());
}

#[test]
fn non_positive_eps_is_rejected() {
    let mut oracle = FixedPointsOracle {
        points: vec![vec![1.0, 2.0], vec![2.0, 1.0]],
    };
    assert!(matches!(
        approximate(&mut oracle, 2, 0.0),
        Err(Error::NegativeApproxRatio { .. })
    ));
    assert!(matches!(
        approximate(&mut oracle, 2, -0.5),
        Err(Error::NegativeApproxRatio { .. })
    ));
}

#[test]
fn oracle_errors_abort_the_run() {
    struct FailingOracle;
    impl WeightedSumOracle for FailingOracle {
        type Solution = ();

        fn comb(&mut self, _weights: &[f64]) -> crate::error::Result<PointAndSolution<()>> {
            Err(Error::Oracle("solver unavailable".into()))
        }
    }

    assert!(matches!(
        approximate(&mut FailingOracle, 2, 0.1),
        Err(Error::Oracle(_))
    ));
}

#[test]
fn call_budget_stops_refinement_early() {
    let mut oracle = FixedPointsOracle {
        points: vec![
            vec![1.0, 8.0],
            vec![2.0, 4.0],
            vec![4.0, 2.0],
            vec![8.0, 1.0],
        ],
    };
    let cfg = ChordCfg {
        max_comb_calls: Some(3),
    };
    let approximation = approximate_with_cfg(&mut oracle, 2, 1e-9, cfg).unwrap();

    // the anchors and the interior probe consume the whole budget; the two
    // facets they span are reported without refinement
    assert_eq!(approximation.pareto.len(), 3);
    assert_eq!(approximation.facets.len(), 2);
}

#[test]
fn certified_facets_are_within_eps_of_the_oracle_optimum() {
    // the certified bound dominates the true gap: querying the oracle at a
    // certified facet's normal never finds a point deeper than eps
    let points: Vec<Vec<f64>> = (1..=16)
        .map(|k| {
            let x = k as f64 / 2.0;
            vec![x, 9.0 / x]
        })
        .collect();
    let eps = 1e-2;
    let mut oracle = FixedPointsOracle {
        points: points.clone(),
    };
    let approximation = approximate(&mut oracle, 2, eps).unwrap();

    let mut check = FixedPointsOracle { points };
    for facet in approximation.facets.iter().filter(|f| !f.is_boundary()) {
        let response = check.comb(facet.normal()).unwrap();
        let gap = facet.ratio_distance(&response.point).unwrap();
        assert!(gap <= eps, "certified facet hides a gap of {gap}");
    }
}

#[test]
fn runs_are_deterministic() {
    let points = vec![
        vec![1.0, 8.0],
        vec![2.0, 4.0],
        vec![4.0, 2.0],
        vec![8.0, 1.0],
    ];
    let first = approximate(
        &mut FixedPointsOracle {
            points: points.clone(),
        },
        2,
        1e-3,
    )
    .unwrap();
    let second = approximate(&mut FixedPointsOracle { points }, 2, 1e-3).unwrap();

    let firsts: Vec<_> = first.pareto.iter().map(|p| p.point.clone()).collect();
    let seconds: Vec<_> = second.pareto.iter().map(|p| p.point.clone()).collect();
    assert_eq!(firsts, seconds);
    assert_eq!(first.facets.len(), second.facets.len());
}

#[test]
fn final_bounds_respect_eps_on_a_dense_frontier() {
    // supported points on the convex curve y = 4 / x
    let points: Vec<Vec<f64>> = (1..=32)
        .map(|k| {
            let x = k as f64 / 4.0;
            vec![x, 4.0 / x]
        })
        .collect();
    let mut oracle = FixedPointsOracle { points };
    let eps = 5e-2;
    let approximation = approximate(&mut oracle, 2, eps).unwrap();

    assert!(approximation.pareto.len() >= 3);
    for facet in &approximation.facets {
        if !facet.is_boundary() {
            assert!(facet.local_approximation_error().unwrap() <= eps);
        }
    }
    for a in approximation.pareto.iter() {
        for b in approximation.pareto.iter() {
            if a.point != b.point {
                assert!(!a.point.dominates(&b.point, 0.0).unwrap());
            }
        }
    }
}
