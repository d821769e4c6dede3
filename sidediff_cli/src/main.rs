mod render;

use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;
use sidediff_common::{ensure_config, load_config, Chunk, DiffAlgorithm};
use sidediff_core::{split_lines, DiffOptions, DiffStats, FileComparison, LoadedText, TextDiffEngine};
use std::io::IsTerminal;
use std::path::PathBuf;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "sidediff")]
#[command(author = "SideDiff Contributors")]
#[command(version = "0.1.0")]
#[command(about = "Side-by-side text comparison with inline word highlighting", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compare two text files
    Diff {
        /// Left file path
        left: PathBuf,

        /// Right file path
        right: PathBuf,

        /// Highlight unchanged lines containing this text (case-insensitive)
        #[arg(short, long, default_value = "")]
        search: String,

        /// Line diff algorithm
        #[arg(short, long, value_enum)]
        algorithm: Option<AlgorithmArg>,

        /// Stop searching for a minimal diff after this many milliseconds
        #[arg(long)]
        timeout_ms: Option<u64>,

        /// Keep CR/CRLF line endings instead of normalizing them to LF
        #[arg(long)]
        keep_line_endings: bool,

        /// Show only differences (hide unchanged lines)
        #[arg(short = 'd', long)]
        diff_only: bool,

        /// Output results as JSON
        #[arg(long)]
        json: bool,

        /// Disable ANSI colors in output
        #[arg(long)]
        no_color: bool,

        /// Use columned output (side-by-side panes)
        #[arg(short = 'c', long)]
        columns: bool,

        /// Width of each pane in columned output
        #[arg(short = 'w', long)]
        width: Option<usize>,
    },
    /// Show the configuration file location and values
    Config {
        /// Write the default configuration file if it does not exist
        #[arg(long)]
        init: bool,

        /// Use a config file next to the executable
        #[arg(long)]
        portable: bool,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum AlgorithmArg {
    Myers,
    Patience,
    Lcs,
}

impl From<AlgorithmArg> for DiffAlgorithm {
    fn from(arg: AlgorithmArg) -> Self {
        match arg {
            AlgorithmArg::Myers => DiffAlgorithm::Myers,
            AlgorithmArg::Patience => DiffAlgorithm::Patience,
            AlgorithmArg::Lcs => DiffAlgorithm::Lcs,
        }
    }
}

struct DiffArgs {
    left: PathBuf,
    right: PathBuf,
    search: String,
    algorithm: Option<AlgorithmArg>,
    timeout_ms: Option<u64>,
    keep_line_endings: bool,
    diff_only: bool,
    json: bool,
    no_color: bool,
    columns: bool,
    width: Option<usize>,
}

fn main() {
    // Initialize tracing to stderr (so JSON output can go cleanly to stdout)
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("warn"))
        )
        .init();

    let cli = Cli::parse();

    let outcome = match cli.command {
        Commands::Diff {
            left,
            right,
            search,
            algorithm,
            timeout_ms,
            keep_line_endings,
            diff_only,
            json,
            no_color,
            columns,
            width,
        } => run_diff(DiffArgs {
            left,
            right,
            search,
            algorithm,
            timeout_ms,
            keep_line_endings,
            diff_only,
            json,
            no_color,
            columns,
            width,
        }),
        Commands::Config { init, portable } => run_config(init, portable),
    };

    if let Err(e) = outcome {
        error!("Command failed: {}", e);
        std::process::exit(1);
    }
}

fn run_diff(args: DiffArgs) -> Result<(), Box<dyn std::error::Error>> {
    // Validate paths
    if !args.left.exists() {
        return Err(format!("Left path does not exist: {}", args.left.display()).into());
    }
    if !args.right.exists() {
        return Err(format!("Right path does not exist: {}", args.right.display()).into());
    }

    info!("Comparing:");
    info!("  Left:  {}", args.left.display());
    info!("  Right: {}", args.right.display());

    let loaded = load_config(false)?;
    let mut config = loaded.config;

    if let Some(algorithm) = args.algorithm {
        config.algorithm = algorithm.into();
    }
    if args.timeout_ms.is_some() {
        config.timeout_ms = args.timeout_ms;
    }
    if args.keep_line_endings {
        config.normalize_line_endings = false;
    }
    if let Some(width) = args.width {
        if width == 0 {
            return Err("Column width must be positive".into());
        }
        config.column_width = width;
    }

    let engine = TextDiffEngine::with_options(DiffOptions::from(&config));
    let comparison = engine.compare_files(
        &args.left,
        &args.right,
        &args.search,
        config.normalize_line_endings,
    )?;
    let stats = DiffStats::from_result(&comparison.result);
    info!("Found {} differences", stats.diff_count);

    if args.json {
        let report = build_json_report(
            &comparison,
            &args.search,
            config.algorithm,
            config.timeout_ms,
            args.diff_only,
        );
        let output = serde_json::to_string_pretty(&report)?;
        println!("{output}");
        return Ok(());
    }

    // Display results
    let use_color = !args.no_color && config.color && std::io::stdout().is_terminal();

    let body = if args.columns {
        render::render_columns(&comparison.result, config.column_width, args.diff_only, use_color)
    } else {
        render::render_stacked(&comparison.result, args.diff_only, use_color)
    };
    print!("{body}");
    print!("{}", render::render_summary(&stats, use_color));

    Ok(())
}

fn run_config(init: bool, portable: bool) -> Result<(), Box<dyn std::error::Error>> {
    let loaded = if init {
        ensure_config(portable)?
    } else {
        load_config(portable)?
    };

    println!("Config file: {}", loaded.path.display());
    println!("Exists:      {}", loaded.exists || init);
    println!("Portable:    {}", loaded.portable);
    println!();
    print!("{}", toml::to_string_pretty(&loaded.config)?);
    Ok(())
}

#[derive(Serialize)]
struct JsonReport<'a> {
    left: JsonFileSide,
    right: JsonFileSide,
    search: &'a str,
    algorithm: DiffAlgorithm,
    timeout_ms: Option<u64>,
    summary: DiffStats,
    diff_count: usize,
    chunks: Vec<&'a Chunk>,
}

#[derive(Serialize)]
struct JsonFileSide {
    path: String,
    encoding: String,
    lines: usize,
}

fn build_json_report<'a>(
    comparison: &'a FileComparison,
    search: &'a str,
    algorithm: DiffAlgorithm,
    timeout_ms: Option<u64>,
    diff_only: bool,
) -> JsonReport<'a> {
    let chunks = comparison
        .result
        .chunks
        .iter()
        .filter(|chunk| !diff_only || chunk.kind.is_change())
        .collect();

    JsonReport {
        left: json_side(&comparison.left),
        right: json_side(&comparison.right),
        search,
        algorithm,
        timeout_ms,
        summary: DiffStats::from_result(&comparison.result),
        diff_count: comparison.result.diff_count,
        chunks,
    }
}

fn json_side(text: &LoadedText) -> JsonFileSide {
    JsonFileSide {
        path: text.path.to_string_lossy().to_string(),
        encoding: text.encoding.label(),
        lines: split_lines(&text.content).len(),
    }
}
