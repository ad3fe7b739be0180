mod dump;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use dag_grid::{ColumnOrigin, DagGraph, GridLayout, InvalidComponent};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::{debug, error, info};
use tracing_subscriber::{prelude::*, EnvFilter};

use dump::{dump_ron, dump_text};

/// The graphs shown by `dag-grid demo`
const DEMO_GRAPHS: &[&[(u32, u32)]] = &[
    &[(0, 1), (0, 2)],
    &[
        (0, 1),
        (0, 2),
        (1, 3),
        (2, 3),
        (3, 4),
        (3, 5),
        (2, 5),
        (5, 6),
        (5, 7),
        (1, 7),
        (3, 7),
        (8, 9),
        (9, 10),
        (9, 11),
        (9, 12),
        (10, 13),
        (10, 14),
        (11, 15),
        (11, 16),
        (12, 17),
        (12, 18),
    ],
];

#[derive(Parser)]
#[command(author, version, about)]
struct Args {
    #[command(subcommand)]
    command: Command,

    /// Which end of each graph sits at column 0
    #[arg(long, value_enum, default_value_t = Origin::Sinks, global = true)]
    column_origin: Origin,

    /// Stop at the first graph that is not a DAG instead of skipping it
    #[arg(long, global = true)]
    abort_on_invalid: bool,

    #[arg(long, value_enum, default_value_t = Format::Text, global = true)]
    format: Format,
}

#[derive(Subcommand)]
enum Command {
    /// Lay out the edge list stored in a RON file, e.g. `[(0, 1), (0, 2)]`
    Layout { file: PathBuf },
    /// Lay out the built-in sample graphs
    Demo,
}

#[derive(Clone, Copy, ValueEnum)]
enum Origin {
    Sinks,
    Sources,
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Text,
    Ron,
}

impl Args {
    fn layout(&self) -> GridLayout {
        let column_origin = match self.column_origin {
            Origin::Sinks => ColumnOrigin::Sinks,
            Origin::Sources => ColumnOrigin::Sources,
        };
        let on_invalid = if self.abort_on_invalid {
            InvalidComponent::Abort
        } else {
            InvalidComponent::Skip
        };
        GridLayout::new()
            .with_column_origin(column_origin)
            .with_on_invalid(on_invalid)
    }
}

/// Lay out one edge list and print it, returns whether every component was valid
fn run(args: &Args, edges: &[(u32, u32)]) -> Result<bool> {
    let (graph, labels) = DagGraph::from_edges(edges.iter().copied());
    debug!(
        "Graph of {} nodes and {} edges",
        graph.node_count(),
        graph.edge_count()
    );

    let grid = args
        .layout()
        .build_coordinates(&graph, graph.nodes())
        .context("Failed to lay out the graph")?;

    for err in grid.errors() {
        error!("Invalid component: {err}");
    }

    let output = match args.format {
        Format::Text => dump_text(&graph, &labels, grid.coords()),
        Format::Ron => dump_ron(&graph, &labels, grid.coords())?,
    };
    println!("{output}");

    info!("{} rows used", grid.rows());
    Ok(grid.is_complete())
}

fn read_edges(file: &Path) -> Result<Vec<(u32, u32)>> {
    let text = std::fs::read_to_string(file)
        .with_context(|| format!("Failed to read {}", file.display()))?;
    ron::from_str(&text).with_context(|| format!("Failed to parse edge list {}", file.display()))
}

fn main() -> Result<ExitCode> {
    let args = Args::parse();

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::from_default_env())
        .init();

    let complete = match &args.command {
        Command::Layout { file } => {
            let edges = read_edges(file)?;
            run(&args, &edges)?
        }
        Command::Demo => {
            let mut complete = true;
            for edges in DEMO_GRAPHS {
                complete &= run(&args, edges)?;
            }
            complete
        }
    };

    Ok(if complete {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}
