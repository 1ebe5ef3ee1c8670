use std::{
    fs::File,
    io::{self, BufRead, BufReader, BufWriter, Write},
    path::PathBuf,
};

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use itertools::Itertools;
use log::info;
use rand::SeedableRng;
use rand_pcg::Pcg64Mcg;

use dgraphs::{
    algo::*,
    bench::{BenchConfig, profile_dfs, write_csv},
    gens::RandomGraph,
    io::{EdgeListRead, EdgeListWrite},
    prelude::*,
};

/// Depth-first search, strongly connected components and topological ordering of directed graphs
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Increase logging verbosity (repeat for more)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Silence all log output
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Print discovery time, finish time and parent of every node
    Dfs(InputArgs),
    /// Print one strongly connected component per line
    Scc(InputArgs),
    /// Print a topological order or report a cycle
    Topo(InputArgs),
    /// Print the DFS operation profile on random graphs as CSV
    Bench {
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Print a random loop-free graph as an edge list
    Generate {
        nodes: NumNodes,
        edges: NumEdges,
        #[arg(long)]
        seed: Option<u64>,
    },
}

#[derive(Args, Debug)]
struct InputArgs {
    /// Edge list to read (`n m` header, then `u v` per line); stdin if omitted
    input: Option<PathBuf>,
}

impl InputArgs {
    fn read_graph(&self) -> anyhow::Result<AdjArray> {
        match &self.input {
            Some(path) => {
                let file = File::open(path)
                    .with_context(|| format!("cannot open {}", path.display()))?;
                read_graph_from(BufReader::new(file))
                    .with_context(|| format!("cannot read graph from {}", path.display()))
            }
            None => read_graph_from(io::stdin().lock()).context("cannot read graph from stdin"),
        }
    }
}

fn read_graph_from<R: BufRead>(reader: R) -> anyhow::Result<AdjArray> {
    let graph = AdjArray::try_read_edge_list(reader)?;
    info!(
        "read graph with n={} m={}",
        graph.number_of_nodes(),
        graph.number_of_edges()
    );
    Ok(graph)
}

fn seed_or_random(seed: Option<u64>) -> u64 {
    let seed = seed.unwrap_or_else(rand::random);
    info!("using seed {seed}");
    seed
}

fn print_dfs<W: Write>(graph: &AdjArray, out: &mut W) -> io::Result<()> {
    let forest = graph.dfs_forest();

    writeln!(out, "Node\tDiscovery\tFinish\tParent")?;
    for u in graph.vertices() {
        let parent = forest
            .parent_of(u)
            .map_or_else(|| "NIL".to_string(), |p| p.to_string());
        writeln!(
            out,
            "{u}\t{}\t{}\t{parent}",
            forest.discovery_time_of(u),
            forest.finish_time_of(u)
        )?;
    }
    Ok(())
}

fn print_scc<W: Write>(graph: &AdjArray, out: &mut W) -> io::Result<()> {
    for component in graph.strongly_connected_components() {
        writeln!(out, "SCC: {}", component.iter().join(" "))?;
    }
    Ok(())
}

fn print_topo<W: Write>(graph: &AdjArray, out: &mut W) -> io::Result<()> {
    match graph.topological_order() {
        TopologicalOrder::Sorted(order) => writeln!(out, "{}", order.iter().join(" ")),
        TopologicalOrder::CycleDetected { .. } => writeln!(out, "Has cycle"),
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    stderrlog::new()
        .module("dgraphs")
        .quiet(cli.quiet)
        .verbosity(1 + cli.verbose as usize)
        .init()?;

    let mut out = BufWriter::new(io::stdout().lock());

    match &cli.command {
        Commands::Dfs(args) => print_dfs(&args.read_graph()?, &mut out)?,
        Commands::Scc(args) => print_scc(&args.read_graph()?, &mut out)?,
        Commands::Topo(args) => print_topo(&args.read_graph()?, &mut out)?,
        Commands::Bench { seed } => {
            let config = BenchConfig::new().seed(seed_or_random(*seed));
            write_csv(&profile_dfs(&config), &mut out)?;
        }
        Commands::Generate { nodes, edges, seed } => {
            let rng = &mut Pcg64Mcg::seed_from_u64(seed_or_random(*seed));
            AdjArray::gnm(rng, *nodes, *edges).try_write_edge_list(&mut out)?;
        }
    }

    out.flush()?;
    Ok(())
}
