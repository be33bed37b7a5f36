use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::Path;
use tracing_subscriber::fmt::SubscriberBuilder;

mod instance;
mod provenance;

#[derive(Parser)]
#[command(name = "cli")]
#[command(about = "Pareto frontier experiment runner")]
struct Cmd {
    #[command(subcommand)]
    action: Action,
}

#[derive(Subcommand)]
enum Action {
    /// Generate a random multiobjective shortest-path instance CSV
    Gen {
        #[arg(long, default_value_t = 100)]
        nodes: usize,
        #[arg(long, default_value_t = 4)]
        out_degree: usize,
        #[arg(long, default_value_t = 3)]
        objectives: usize,
        #[arg(long, default_value_t = 7)]
        seed: u64,
        #[arg(long)]
        out: String,
    },
    /// Approximate the Pareto frontier of a CSV instance
    Run {
        #[arg(long)]
        input: String,
        #[arg(long, default_value_t = 2)]
        objectives: usize,
        #[arg(long, default_value_t = 0)]
        source: usize,
        /// Defaults to the highest node id in the instance
        #[arg(long)]
        target: Option<usize>,
        #[arg(long, default_value_t = 1e-3)]
        eps: f64,
        #[arg(long)]
        out: String,
    },
    /// Print a small provenance JSON block
    Report,
}

fn main() -> Result<()> {
    SubscriberBuilder::default().with_target(false).init();
    let cmd = Cmd::parse();
    match cmd.action {
        Action::Gen {
            nodes,
            out_degree,
            objectives,
            seed,
            out,
        } => gen(nodes, out_degree, objectives, seed, out),
        Action::Run {
            input,
            objectives,
            source,
            target,
            eps,
            out,
        } => run(input, objectives, source, target, eps, out),
        Action::Report => report(),
    }
}

fn gen(nodes: usize, out_degree: usize, objectives: usize, seed: u64, out: String) -> Result<()> {
    tracing::info!(nodes, out_degree, objectives, seed, out, "gen");
    let csv = instance::generate_csv(nodes, out_degree, objectives, seed);
    write_artifact(&out, csv.as_bytes())?;
    provenance::write_sidecar(
        &out,
        provenance::Record::Instance {
            nodes,
            out_degree,
            objectives,
            seed,
        },
    )?;
    Ok(())
}

fn run(
    input: String,
    objectives: usize,
    source: usize,
    target: Option<usize>,
    eps: f64,
    out: String,
) -> Result<()> {
    tracing::info!(input, objectives, source, eps, "run");
    let inst = instance::read_instance(&input, objectives)?;
    let target = target.unwrap_or(inst.nodes.saturating_sub(1));
    let mut oracle = instance::ShortestPathOracle::new(&inst, source, target);
    let approximation = pareto_chord::approximate(&mut oracle, objectives, eps)?;

    let certified = approximation
        .facets
        .iter()
        .filter(|f| !f.is_boundary())
        .count();
    tracing::info!(
        points = approximation.pareto.len(),
        facets = approximation.facets.len(),
        certified,
        "approximation finished"
    );

    let doc = serde_json::json!({
        "eps": eps,
        "source": source,
        "target": target,
        "pareto": approximation
            .pareto
            .iter()
            .map(|pas| {
                serde_json::json!({
                    "point": pas.point.coordinates(),
                    "weights": pas.weights,
                    "path": pas.solution,
                })
            })
            .collect::<Vec<_>>(),
        "facets": approximation
            .facets
            .iter()
            .map(|f| {
                serde_json::json!({
                    "normal": f.normal(),
                    "boundary": f.is_boundary(),
                    "bound": f.local_approximation_error().ok(),
                })
            })
            .collect::<Vec<_>>(),
    });
    write_artifact(&out, &serde_json::to_vec_pretty(&doc)?)?;
    provenance::write_sidecar(
        &out,
        provenance::Record::Approximation {
            input,
            objectives,
            source,
            target,
            eps,
            points: approximation.pareto.len(),
            facets: approximation.facets.len(),
            certified,
        },
    )?;
    Ok(())
}

fn report() -> Result<()> {
    let doc = serde_json::json!({
        "code_rev": provenance::code_rev(),
        "library": pareto_chord::VERSION,
        "oracle": "dijkstra-weighted-sum",
    });
    println!("{}", serde_json::to_string_pretty(&doc)?);
    Ok(())
}

fn write_artifact(out: &str, bytes: &[u8]) -> Result<()> {
    let path = Path::new(out);
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    std::fs::write(path, bytes)?;
    Ok(())
}
