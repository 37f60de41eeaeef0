use std::error::Error;
use std::fs;
use std::path::{Path, PathBuf};
use std::process;

use clap::{Parser, Subcommand, ValueEnum};
use tracing::debug;
use tracing_subscriber::prelude::*;
use tracing_subscriber::EnvFilter;

use chordsheet::{ChartItem, EngineConfig, LiveViewer, Setlist, ViewerSnapshot};

#[derive(Parser)]
#[command(name = "chordsheet")]
#[command(about = "Transpose and paginate chord charts for live performance")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Show debug output on stderr
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Render one chart
    Render {
        /// Chart file (optional YAML front matter, then lyrics and chords)
        file: PathBuf,

        /// Semitones to transpose by
        #[arg(short, long, default_value = "0", allow_negative_numbers = true)]
        transpose: i32,

        /// Page capacity in line units
        #[arg(long)]
        capacity: Option<usize>,

        #[arg(long, value_enum, default_value = "text")]
        format: OutputFormat,

        /// Engine configuration (YAML)
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Transpose a single chord symbol
    Transpose {
        chord: String,

        #[arg(allow_negative_numbers = true)]
        semitones: i32,
    },

    /// Render every chart of a setlist in order
    Setlist {
        /// Setlist file (YAML)
        file: PathBuf,

        #[arg(long, value_enum, default_value = "text")]
        format: OutputFormat,

        /// Engine configuration (YAML)
        #[arg(long)]
        config: Option<PathBuf>,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

/// Log to stderr. `RUST_LOG` wins over `-v` when set.
fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .without_time(),
        )
        .init();
}

fn load_config(path: Option<&Path>) -> Result<EngineConfig, chordsheet::ChartError> {
    match path {
        Some(path) => EngineConfig::load(path),
        None => Ok(EngineConfig::default()),
    }
}

fn print_text(snapshots: &[ViewerSnapshot]) {
    for (i, snapshot) in snapshots.iter().enumerate() {
        if i > 0 {
            println!();
        }
        print!("{}", snapshot);
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn Error>> {
    match cli.command {
        Commands::Render {
            file,
            transpose,
            capacity,
            format,
            config,
        } => {
            let mut config = load_config(config.as_deref())?;
            if let Some(capacity) = capacity {
                config.page_capacity = capacity;
            }
            let engine = config.compile()?;

            let source = fs::read_to_string(&file)
                .map_err(|e| format!("Error reading file '{}': {}", file.display(), e))?;
            let item = ChartItem::from_source(&source)?;

            let mut viewer = LiveViewer::new(vec![item], engine);
            viewer.set_transpose(transpose);
            let snapshots: Vec<ViewerSnapshot> = viewer.snapshot().into_iter().collect();
            match format {
                OutputFormat::Text => print_text(&snapshots),
                OutputFormat::Json => {
                    if let Some(snapshot) = snapshots.first() {
                        println!("{}", serde_json::to_string_pretty(snapshot)?);
                    }
                }
            }
            Ok(())
        }
        Commands::Transpose { chord, semitones } => {
            println!("{}", chordsheet::transpose(&chord, semitones));
            Ok(())
        }
        Commands::Setlist {
            file,
            format,
            config,
        } => {
            let engine = load_config(config.as_deref())?.compile()?;
            let setlist = Setlist::load(&file)?;
            let base_dir = file.parent().unwrap_or_else(|| Path::new("."));
            let items = setlist.chart_items(base_dir)?;
            debug!("Setlist '{}' has {} charts", setlist.name, items.len());

            let mut viewer = LiveViewer::new(items, engine);
            let mut snapshots = Vec::with_capacity(viewer.len());
            for index in 0..viewer.len() {
                viewer.select(index);
                snapshots.extend(viewer.snapshot());
            }
            match format {
                OutputFormat::Text => print_text(&snapshots),
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&snapshots)?),
            }
            Ok(())
        }
    }
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}
