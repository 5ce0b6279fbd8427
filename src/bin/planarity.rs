use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand, ValueEnum};
use rand::SeedableRng;
use rand_pcg::Pcg64;

use planarity::algorithms::planarity::{
    embed, face_count, verify_embed_result, EmbedMode, EmbedOutcome,
};
use planarity::data_generators::random_graph;
use planarity::data_structures::Graph;
use planarity::io::{adjacency_list, adjacency_matrix, edge_list, json};

#[derive(Parser, Debug)]
#[command(about = "Test graphs for planarity or outerplanarity and produce embeddings or obstructions.")]
#[command(next_line_help = true)]
struct Args {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Test a specific graph read from a file.
    Test {
        /// The graph file to read.
        file: PathBuf,

        /// The format of the graph file.
        #[arg(short, long, value_enum, default_value_t = Format::AdjacencyList)]
        format: Format,

        /// Test outerplanarity instead of planarity.
        #[arg(short, long, default_value_t = false)]
        outerplanar: bool,

        /// Write the embedding (in adjacency-list rotation order) or the
        /// obstruction (as edge list) to this file.
        #[arg(short, long)]
        write_result: Option<PathBuf>,
    },
    /// Generate and test batches of seeded random graphs.
    Random {
        /// Number of graphs to generate.
        #[arg(short, long, default_value_t = 100)]
        count: usize,

        /// Number of vertices per graph.
        #[arg(short = 'n', long, default_value_t = 15)]
        size: usize,

        /// Test outerplanarity instead of planarity.
        #[arg(short, long, default_value_t = false)]
        outerplanar: bool,

        /// Seed for the graph generator.
        #[arg(short, long, default_value_t = 0)]
        seed: u64,
    },
}

#[derive(Clone, Copy, ValueEnum, Debug)]
enum Format {
    #[clap(name = "adjlist")]
    AdjacencyList,
    #[clap(name = "matrix")]
    AdjacencyMatrix,
    #[clap(name = "edgelist")]
    EdgeList,
    #[clap(name = "json")]
    Json,
}

fn main() -> ExitCode {
    simple_logger::init_with_level(log::Level::Info).unwrap();

    let cli = Args::parse();
    let result = match cli.command {
        Commands::Test {
            file,
            format,
            outerplanar,
            write_result,
        } => test_specific_graph(&file, format, mode_for(outerplanar), write_result.as_deref()),
        Commands::Random {
            count,
            size,
            outerplanar,
            seed,
        } => test_random_graphs(count, size, mode_for(outerplanar), seed),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(why) => {
            log::error!("{why}");
            ExitCode::FAILURE
        }
    }
}

fn mode_for(outerplanar: bool) -> EmbedMode {
    if outerplanar {
        EmbedMode::Outerplanar
    } else {
        EmbedMode::Planar
    }
}

fn test_specific_graph(
    file: &std::path::Path,
    format: Format,
    mode: EmbedMode,
    write_result: Option<&std::path::Path>,
) -> Result<(), Box<dyn std::error::Error>> {
    let opened = File::open(file)
        .map_err(|why| format!("cannot open {}: {}", file.display(), why))?;
    let mut reader = BufReader::new(opened);
    let mut g = match format {
        Format::AdjacencyList => adjacency_list::read_adjacency_list(&mut reader)?,
        Format::AdjacencyMatrix => adjacency_matrix::read_adjacency_matrix(&mut reader)?,
        Format::EdgeList => edge_list::read_edge_list(&mut reader)?,
        Format::Json => json::read_json(&mut reader)?,
    };
    log::info!(
        "read graph with {} vertices and {} edges",
        g.order(),
        g.edge_count()
    );

    let orig = g.clone();
    let outcome = embed(&mut g, mode)?;
    report(&g, &orig, &outcome, mode);

    if let Some(path) = write_result {
        let out = File::create(path)
            .map_err(|why| format!("cannot create {}: {}", path.display(), why))?;
        let mut writer = BufWriter::new(out);
        match &outcome {
            EmbedOutcome::Embedded => {
                g.sort_vertices()?;
                adjacency_list::write_adjacency_list(&g, &mut writer)?;
            }
            EmbedOutcome::NonEmbeddable(obstruction) => {
                let mut subgraph = Graph::new(orig.order());
                subgraph.add_edges(&obstruction.edges)?;
                edge_list::write_edge_list(&subgraph, &mut writer)?;
            }
        }
        log::info!("result written to {}", path.display());
    }
    Ok(())
}

fn test_random_graphs(
    count: usize,
    size: usize,
    mode: EmbedMode,
    seed: u64,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut rng = Pcg64::seed_from_u64(seed);
    let mut embeddable = 0;
    let mut obstructed = 0;

    for round in 0..count {
        let mut g = random_graph(size, &mut rng)?;
        let orig = g.clone();
        let outcome = embed(&mut g, mode)?;
        verify_embed_result(&g, &orig, &outcome, mode)
            .map_err(|why| format!("round {}: {}", round, why))?;
        match outcome {
            EmbedOutcome::Embedded => embeddable += 1,
            EmbedOutcome::NonEmbeddable(_) => obstructed += 1,
        }
    }

    log::info!(
        "{} graphs on {} vertices: {} embeddable, {} with an isolated obstruction, all verified",
        count,
        size,
        embeddable,
        obstructed
    );
    Ok(())
}

fn report(g: &Graph, orig: &Graph, outcome: &EmbedOutcome, mode: EmbedMode) {
    let surface = match mode {
        EmbedMode::Planar => "planar",
        EmbedMode::Outerplanar => "outerplanar",
    };
    match outcome {
        EmbedOutcome::Embedded => {
            log::info!(
                "graph is {} ({} faces)",
                surface,
                face_count(g).map_or_else(|why| why.to_string(), |f| f.to_string())
            );
        }
        EmbedOutcome::NonEmbeddable(obstruction) => {
            log::info!(
                "graph is not {}: isolated a {:?} subdivision with {} edges",
                surface,
                obstruction.kind,
                obstruction.edges.len()
            );
        }
    }
    match verify_embed_result(g, orig, outcome, mode) {
        Ok(()) => log::info!("result integrity verified"),
        Err(why) => log::warn!("{why}"),
    }
}
