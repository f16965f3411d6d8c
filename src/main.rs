use std::error::Error;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand, ValueEnum};
use pickpath::{layout, tour, Grid, Position, Warehouse};

#[derive(Debug, thiserror::Error)]
#[error("{0}: {1}")]
struct LayoutLoadError(PathBuf, #[source] layout::Error);

/// Built-in reference layouts
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Reference {
    Simple,
    Larger,
    Library,
}

#[derive(Parser)]
struct Cli {
    /// Built-in warehouse layout to plan in
    #[arg(long, value_enum, default_value_t = Reference::Simple, conflicts_with = "layout")]
    warehouse: Reference,

    /// Path to a layout file, used instead of a built-in warehouse
    #[arg(long)]
    layout: Option<PathBuf>,

    /// Format of the layout file
    #[arg(long, value_enum, default_value_t = layout::FileFormat::Unknown)]
    format: layout::FileFormat,

    /// How odd-degree stops are paired up when planning pick paths
    #[arg(long, value_enum, default_value_t = tour::Matching::Greedy)]
    matching: tour::Matching,

    /// How the stop order of pick paths is found
    #[arg(long, value_enum, default_value_t = tour::CircuitSearch::Backtracking)]
    circuit: tour::CircuitSearch,

    /// Max number of node expansions of a single path search
    #[arg(long, default_value_t = pickpath::DEFAULT_STEP_LIMIT)]
    step_limit: usize,

    /// Max number of extensions of the backtracking stop order search
    #[arg(long, default_value_t = tour::DEFAULT_TOUR_STEP_LIMIT)]
    tour_step_limit: usize,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print the dimensions and the navigation graph of the warehouse
    Graph,

    /// Find the shortest path between two cells, given as "row,col"
    Path { from: Position, to: Position },

    /// Plan a round trip from a cell through all stops, given as "row,col"
    Pick {
        from: Position,

        #[arg(required = true)]
        stops: Vec<Position>,
    },
}

pub fn main() -> Result<(), Box<dyn Error>> {
    colog::init();
    let cli = Cli::parse();

    let grid = match &cli.layout {
        Some(path) => load_layout(path, cli.format)?,
        None => match cli.warehouse {
            Reference::Simple => layout::simple_warehouse(),
            Reference::Larger => layout::larger_warehouse(),
            Reference::Library => layout::library_warehouse(),
        },
    };

    let options = pickpath::Options {
        path_step_limit: cli.step_limit,
        tour: tour::Options {
            matching: cli.matching,
            circuit: cli.circuit,
            step_limit: cli.tour_step_limit,
        },
    };
    let warehouse = Warehouse::with_options(grid, options)?;

    match cli.command {
        Command::Graph => print_graph(&warehouse),

        Command::Path { from, to } => {
            let path = warehouse.find_path(from, to)?;
            println!("{{");
            println!("  \"path\": {}", positions_to_json(&path));
            println!("}}");
        }

        Command::Pick { from, stops } => {
            let pick = warehouse.find_pick_path(from, &stops)?;
            log::info!(
                "pick path over {} stops: {} steps",
                stops.len(),
                pick.path.len().saturating_sub(1)
            );
            println!("{{");
            println!("  \"stops\": {},", positions_to_json(&pick.stops));
            println!("  \"path\": {}", positions_to_json(&pick.path));
            println!("}}");
        }
    }

    Ok(())
}

fn print_graph(warehouse: &Warehouse) {
    let (height, width) = warehouse.dimensions();
    let g = warehouse.graph();

    println!("{{");
    println!("  \"dimensions\": [{}, {}],", height, width);

    let nodes: Vec<Position> = g.iter().collect();
    println!("  \"nodes\": {},", positions_to_json(&nodes));

    println!("  \"links\": [");
    let mut edges = g.edges().peekable();
    while let Some((a, b, cost)) = edges.next() {
        let suffix = if edges.peek().is_some() { "," } else { "" };
        println!(
            "    {{\"source\": [{}, {}], \"target\": [{}, {}], \"weight\": {}}}{}",
            a.row, a.col, b.row, b.col, cost, suffix
        );
    }
    println!("  ]");
    println!("}}");
}

fn positions_to_json(positions: &[Position]) -> String {
    let inner: Vec<String> = positions
        .iter()
        .map(|p| format!("[{}, {}]", p.row, p.col))
        .collect();
    format!("[{}]", inner.join(", "))
}

fn load_layout<P: AsRef<Path>>(
    path: P,
    format: layout::FileFormat,
) -> Result<Grid, LayoutLoadError> {
    let options = layout::Options {
        file_format: format,
    };
    match layout::read_from_file(&options, path.as_ref()) {
        Ok(grid) => Ok(grid),
        Err(e) => Err(LayoutLoadError(PathBuf::from(path.as_ref()), e)),
    }
}
