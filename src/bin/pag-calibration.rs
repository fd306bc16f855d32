//! pag-calibration CLI: ensemble consensus and calibration scoring.
//!
//! Usage:
//!   pag-calibration consensus <candidate.json>... [-o out.json] [--config cfg.yaml] [--sequential]
//!   pag-calibration calibrate --reference r.json --predicted p.json [--edge-type ta] [--groups N]
//!   pag-calibration details --reference r.json --predicted p.json

use clap::{Parser, Subcommand};
use pag_calibration::{
    edge_type_details, ConsensusBuilder, EdgeType, Graph, GraphStatistics, ScoringConfig,
};
use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

#[derive(Parser)]
#[command(
    name = "pag-calibration",
    version,
    about = "Consensus and calibration scoring for ensembles of causal graphs"
)]
struct Cli {
    /// Log progress to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build a consensus graph from candidate graphs
    Consensus {
        /// Candidate graph JSON files
        #[arg(required = true)]
        candidates: Vec<PathBuf>,
        /// Output file (stdout when omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// YAML scoring configuration
        #[arg(long)]
        config: Option<PathBuf>,
        /// Tally pairs on a single thread (overrides the configuration)
        #[arg(long)]
        sequential: bool,
    },
    /// Score a predicted graph against a reference graph
    Calibrate {
        /// Reference (true) graph JSON file
        #[arg(long)]
        reference: PathBuf,
        /// Predicted graph JSON file
        #[arg(long)]
        predicted: PathBuf,
        /// Edge type to score (name or symbol, e.g. `ta` or `-->`)
        #[arg(long)]
        edge_type: Option<EdgeType>,
        /// Number of Hosmer-Lemeshow risk groups
        #[arg(long)]
        groups: Option<usize>,
        /// YAML scoring configuration
        #[arg(long)]
        config: Option<PathBuf>,
        /// Write calibration rows to this CSV file
        #[arg(long)]
        csv: Option<PathBuf>,
        /// Write any-edge rows instead of direct-edge rows to the CSV file
        #[arg(long)]
        any_edge: bool,
    },
    /// Print reference edges next to predicted edge-type distributions
    Details {
        /// Reference (true) graph JSON file
        #[arg(long)]
        reference: PathBuf,
        /// Predicted graph JSON file
        #[arg(long)]
        predicted: PathBuf,
    },
}

fn read_graph(path: &Path) -> Result<Graph, String> {
    let json = std::fs::read_to_string(path)
        .map_err(|e| format!("cannot read '{}': {}", path.display(), e))?;
    serde_json::from_str(&json).map_err(|e| format!("invalid graph '{}': {}", path.display(), e))
}

fn load_config(path: Option<&Path>) -> Result<ScoringConfig, String> {
    match path {
        Some(path) => ScoringConfig::load(path)
            .map_err(|e| format!("cannot load config '{}': {}", path.display(), e)),
        None => Ok(ScoringConfig::default()),
    }
}

fn cmd_consensus(
    candidates: &[PathBuf],
    output: Option<&Path>,
    config: Option<&Path>,
    sequential: bool,
) -> i32 {
    let config = match load_config(config) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            return 1;
        }
    };

    let mut graphs = Vec::with_capacity(candidates.len());
    for path in candidates {
        match read_graph(path) {
            Ok(graph) => graphs.push(graph),
            Err(e) => {
                eprintln!("Error: {}", e);
                return 1;
            }
        }
    }

    let mut builder = ConsensusBuilder::from_config(&config);
    if sequential {
        builder = builder.with_parallel(false);
    }
    let consensus = builder.build(&graphs);
    info!(
        candidates = graphs.len(),
        edges = consensus.edge_count(),
        "built consensus graph"
    );

    let json = match serde_json::to_string_pretty(&consensus) {
        Ok(json) => json,
        Err(e) => {
            eprintln!("Error: {}", e);
            return 1;
        }
    };
    match output {
        Some(path) => match std::fs::write(path, json) {
            Ok(()) => {
                println!("Wrote consensus graph to '{}'", path.display());
                0
            }
            Err(e) => {
                eprintln!("Error: cannot write '{}': {}", path.display(), e);
                1
            }
        },
        None => {
            println!("{}", json);
            0
        }
    }
}

struct CalibrateArgs {
    reference: PathBuf,
    predicted: PathBuf,
    edge_type: Option<EdgeType>,
    groups: Option<usize>,
    config: Option<PathBuf>,
    csv: Option<PathBuf>,
    any_edge: bool,
}

fn cmd_calibrate(args: CalibrateArgs) -> i32 {
    let mut config = match load_config(args.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            return 1;
        }
    };
    if let Some(edge_type) = args.edge_type {
        config = config.with_edge_type(edge_type);
    }
    if let Some(groups) = args.groups {
        config = config.with_risk_groups(groups);
    }

    let (reference, predicted) = match (read_graph(&args.reference), read_graph(&args.predicted)) {
        (Ok(r), Ok(p)) => (r, p),
        (Err(e), _) | (_, Err(e)) => {
            eprintln!("Error: {}", e);
            return 1;
        }
    };

    let stats = match GraphStatistics::compute(&predicted, &reference, &config) {
        Ok(stats) => stats,
        Err(e) => {
            eprintln!("Error: {}", e);
            return 1;
        }
    };
    print!("{}", stats.report());

    if let Some(path) = &args.csv {
        let rows = if args.any_edge {
            stats.any_edges()
        } else {
            stats.direct_edges()
        };
        let written = File::create(path).and_then(|file| rows.write_csv(BufWriter::new(file)));
        if let Err(e) = written {
            eprintln!("Error: cannot write '{}': {}", path.display(), e);
            return 1;
        }
        info!(rows = rows.len(), path = %path.display(), "wrote calibration rows");
    }
    0
}

fn cmd_details(reference: &Path, predicted: &Path) -> i32 {
    match (read_graph(reference), read_graph(predicted)) {
        (Ok(r), Ok(p)) => {
            print!("{}", edge_type_details(&r, &p));
            0
        }
        (Err(e), _) | (_, Err(e)) => {
            eprintln!("Error: {}", e);
            1
        }
    }
}

fn main() {
    let cli = Cli::parse();

    let level = if cli.verbose { Level::DEBUG } else { Level::INFO };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .finish();
    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Warning: logging disabled: {}", e);
    }

    let code = match cli.command {
        Commands::Consensus {
            candidates,
            output,
            config,
            sequential,
        } => cmd_consensus(&candidates, output.as_deref(), config.as_deref(), sequential),
        Commands::Calibrate {
            reference,
            predicted,
            edge_type,
            groups,
            config,
            csv,
            any_edge,
        } => cmd_calibrate(CalibrateArgs {
            reference,
            predicted,
            edge_type,
            groups,
            config,
            csv,
            any_edge,
        }),
        Commands::Details {
            reference,
            predicted,
        } => cmd_details(&reference, &predicted),
    };
    std::process::exit(code);
}
