//! Provenance sidecars for experiment artifacts.
//!
//! Every artifact the runner writes gets a `<stem>.provenance.json` sidecar
//! recording the code revision and the chord parameters that produced it, so
//! an instance or an approximation result can be regenerated from its
//! sidecar alone.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

use anyhow::{Context, Result};
use serde_json::json;

/// What produced an artifact.
pub enum Record {
    /// A generated shortest-path instance.
    Instance {
        nodes: usize,
        out_degree: usize,
        objectives: usize,
        seed: u64,
    },
    /// A chord approximation of an instance, with the driver settings and a
    /// summary of what came out.
    Approximation {
        input: String,
        objectives: usize,
        source: usize,
        target: usize,
        eps: f64,
        points: usize,
        facets: usize,
        certified: usize,
    },
}

impl Record {
    fn details(&self) -> serde_json::Value {
        match self {
            Record::Instance {
                nodes,
                out_degree,
                objectives,
                seed,
            } => json!({
                "kind": "instance",
                "nodes": nodes,
                "out_degree": out_degree,
                "objectives": objectives,
                "seed": seed,
            }),
            Record::Approximation {
                input,
                objectives,
                source,
                target,
                eps,
                points,
                facets,
                certified,
            } => json!({
                "kind": "approximation",
                "input": input,
                "objectives": objectives,
                "source": source,
                "target": target,
                "eps": eps,
                "pareto_points": points,
                "facets": facets,
                "certified_facets": certified,
            }),
        }
    }
}

/// Write `<artifact stem>.provenance.json` next to the artifact.
pub fn write_sidecar<P: AsRef<Path>>(artifact: P, record: Record) -> Result<PathBuf> {
    let artifact = artifact.as_ref();
    let sidecar = sidecar_path(artifact);
    let mut doc = record.details();
    doc["code_rev"] = json!(code_rev());
    doc["oracle"] = json!("dijkstra-weighted-sum");
    doc["outputs"] = json!([artifact.to_string_lossy()]);
    fs::write(&sidecar, serde_json::to_vec_pretty(&doc)?)
        .with_context(|| format!("writing {}", sidecar.display()))?;
    Ok(sidecar)
}

fn sidecar_path(artifact: &Path) -> PathBuf {
    artifact.with_extension("provenance.json")
}

/// Current git revision, overridable through `GIT_COMMIT` for builds made
/// outside a checkout.
pub fn code_rev() -> String {
    let baked = option_env!("GIT_COMMIT").unwrap_or_default();
    if !baked.is_empty() {
        return baked.to_string();
    }
    if let Ok(from_env) = std::env::var("GIT_COMMIT") {
        if !from_env.is_empty() {
            return from_env;
        }
    }
    match Command::new("git").args(["rev-parse", "HEAD"]).output() {
        Ok(output) if output.status.success() => {
            String::from_utf8_lossy(&output.stdout).trim().to_string()
        }
        _ => "unknown".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn sidecar_lands_next_to_the_artifact() {
        assert_eq!(
            sidecar_path(Path::new("/tmp/output/instance.csv")),
            Path::new("/tmp/output/instance.provenance.json")
        );
        assert_eq!(
            sidecar_path(Path::new("result")),
            Path::new("result.provenance.json")
        );
    }

    #[test]
    fn approximation_sidecar_keeps_the_driver_settings() {
        let dir = tempdir().unwrap();
        let artifact = dir.path().join("frontier.json");
        fs::write(&artifact, "{}").unwrap();

        let sidecar = write_sidecar(
            &artifact,
            Record::Approximation {
                input: "instance.csv".to_string(),
                objectives: 3,
                source: 0,
                target: 99,
                eps: 1e-3,
                points: 12,
                facets: 20,
                certified: 17,
            },
        )
        .unwrap();

        let parsed: serde_json::Value =
            serde_json::from_slice(&fs::read(sidecar).unwrap()).unwrap();
        assert_eq!(parsed["kind"], "approximation");
        assert_eq!(parsed["eps"], 1e-3);
        assert_eq!(parsed["pareto_points"], 12);
        assert_eq!(parsed["certified_facets"], 17);
        assert_eq!(parsed["oracle"], "dijkstra-weighted-sum");
        assert_eq!(parsed["outputs"][0], artifact.to_string_lossy().as_ref());
    }

    #[test]
    fn instance_sidecar_records_the_generator_seed() {
        let dir = tempdir().unwrap();
        let artifact = dir.path().join("instance.csv");
        fs::write(&artifact, "source,target,cost1\n").unwrap();

        let sidecar = write_sidecar(
            &artifact,
            Record::Instance {
                nodes: 50,
                out_degree: 4,
                objectives: 2,
                seed: 7,
            },
        )
        .unwrap();

        let parsed: serde_json::Value =
            serde_json::from_slice(&fs::read(sidecar).unwrap()).unwrap();
        assert_eq!(parsed["kind"], "instance");
        assert_eq!(parsed["seed"], 7);
        assert_eq!(parsed["nodes"], 50);
    }
}
