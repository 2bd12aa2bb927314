use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand, ValueEnum};
use synoptic::cache::ParseCache;
use synoptic::chart::{route, status};
use synoptic::comparator::{Selection, closure_groups, compose};
use synoptic::export::{ExportOptions, Grouping, LegendPolicy, export};
use synoptic::scene::Scene;
use synoptic::svg::render_svg;
use synoptic::{DiagramConfig, SynopticError};

#[derive(Parser, Debug)]
#[command(name = "synoptic", about = "Parallel-column alignment diagrams and status charts")]
struct Cli {
    /// JSON diagram configuration; `SYNOPTIC_*` variables override it.
    #[arg(long, env = "SYNOPTIC_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render one table (or part of it) to SVG.
    Render {
        document: PathBuf,
        /// Index among recognized tables.
        #[arg(long, default_value_t = 0)]
        table: usize,
        /// Show only this identifier and everything merged with it.
        #[arg(long, conflicts_with = "select")]
        filter: Option<String>,
        /// Comma-separated identifiers to show, with their merges.
        #[arg(long, value_delimiter = ',')]
        select: Vec<String>,
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Print the closure groups of every table.
    Groups { document: PathBuf },
    /// Render every group (or table) into a directory.
    Export {
        document: PathBuf,
        #[arg(long)]
        out: PathBuf,
        #[arg(long)]
        per_table: bool,
        #[arg(long, value_enum, default_value_t = LegendArg::All)]
        legend: LegendArg,
        /// Diagram names that get a header under `--legend manual`.
        #[arg(long = "with-header")]
        with_header: Vec<String>,
        /// Restrict to these table indices.
        #[arg(long, value_delimiter = ',')]
        tables: Vec<usize>,
    },
    /// Stacked status bars from a JSON period file.
    StatusChart {
        input: PathBuf,
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Route timelines from a JSON route file.
    RouteChart {
        input: PathBuf,
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum LegendArg {
    All,
    FirstPerGroup,
    Manual,
}

fn main() -> ExitCode {
    // Logs go to stderr; stdout may carry the SVG.
    tracing_subscriber::fmt().with_writer(std::io::stderr).init();
    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), SynopticError> {
    let config = DiagramConfig::load(cli.config.as_deref())?;
    match cli.command {
        Command::Render { document, table, filter, select, output } => {
            let selection = match (filter, select.is_empty()) {
                (Some(id), _) => Selection::One(id),
                (None, false) => Selection::Many(select.into_iter().collect()),
                (None, true) => Selection::All,
            };
            run_render(&config, &document, table, &selection, output.as_deref())
        }
        Command::Groups { document } => run_groups(&config, &document),
        Command::Export { document, out, per_table, legend, with_header, tables } => {
            let legend = match legend {
                LegendArg::All => LegendPolicy::All,
                LegendArg::FirstPerGroup => LegendPolicy::FirstPerGroup,
                LegendArg::Manual => LegendPolicy::Manual(with_header.into_iter().collect::<BTreeSet<_>>()),
            };
            let options = ExportOptions {
                grouping: if per_table { Grouping::PerTable } else { Grouping::PerClosure },
                legend,
                tables: (!tables.is_empty()).then_some(tables),
            };
            let parsed = ParseCache::global().load(&document, &config)?;
            let entries = export(&parsed, &config, &options, &out)?;
            eprintln!("exported {} diagrams to {}", entries.len(), out.display());
            Ok(())
        }
        Command::StatusChart { input, output } => {
            let chart: status::StatusChartInput = serde_json::from_slice(&std::fs::read(&input)?)?;
            write_scene(&status::render(&chart), config.pixel_scale(), output.as_deref())
        }
        Command::RouteChart { input, output } => {
            let chart: route::RouteChartInput = serde_json::from_slice(&std::fs::read(&input)?)?;
            write_scene(&route::render(&chart)?, config.pixel_scale(), output.as_deref())
        }
    }
}

fn run_render(
    config: &DiagramConfig,
    document: &Path,
    table: usize,
    selection: &Selection,
    output: Option<&Path>,
) -> Result<(), SynopticError> {
    let parsed = ParseCache::global().load(document, config)?;
    let table = parsed.table(table)?;
    let view = selection.resolve(&table.model)?;
    let scene = compose(&table.model, &view, config, &table.subject);
    write_scene(&scene, config.pixel_scale(), output)
}

fn run_groups(config: &DiagramConfig, document: &Path) -> Result<(), SynopticError> {
    let parsed = ParseCache::global().load(document, config)?;
    for (index, table) in parsed.tables.iter().enumerate() {
        println!("[{index}] {}", table.subject);
        for group in closure_groups(&table.model) {
            println!("    {}", group.join(", "));
        }
    }
    Ok(())
}

fn write_scene(scene: &Scene, scale: f64, output: Option<&Path>) -> Result<(), SynopticError> {
    let svg = render_svg(scene, scale)?;
    match output {
        Some(path) => {
            std::fs::write(path, svg)?;
            tracing::info!(path = %path.display(), "wrote svg");
        }
        None => print!("{svg}"),
    }
    Ok(())
}
