use clap::{Args, Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::time::Instant;

use region_risk::lookup::{MatchKind, RiskLookup};
use region_risk::output::{self, OutputFormat};
use region_risk::scoring::{self, Canonicalizer, ScoringParams};
use region_risk::{RiskError, Table};

const EXIT_SUCCESS: i32 = 0;
const EXIT_SCHEMA: i32 = 1;
const EXIT_IO: i32 = 2;
const EXIT_CONFIG: i32 = 4;

const DEFAULT_INPUT: &str = "src/python/CrimesOnWomenData.csv";
const DEFAULT_OUTPUT: &str = "result.csv";

#[derive(Subcommand, Debug)]
enum Commands {
    /// Score regions and write the result file (default if no subcommand)
    Score(ScoreArgs),
    /// Look up a region's contribution in a result file
    Lookup {
        /// Region name (free text; canonicalized before matching)
        region: String,

        /// Result file written by `score`
        #[arg(short, long, default_value = DEFAULT_OUTPUT)]
        results: PathBuf,
    },
}

#[derive(Args, Debug)]
struct ScoreArgs {
    /// Input CSV with a `State` column and the category count columns
    #[arg(default_value = DEFAULT_INPUT)]
    input: PathBuf,

    /// Where to write the result CSV
    #[arg(short, long, default_value = DEFAULT_OUTPUT)]
    output: PathBuf,

    /// How to render results on stdout
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Table)]
    format: OutputFormat,
}

impl Default for ScoreArgs {
    fn default() -> Self {
        Self {
            input: PathBuf::from(DEFAULT_INPUT),
            output: PathBuf::from(DEFAULT_OUTPUT),
            format: OutputFormat::Table,
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "region-risk")]
#[command(about = "Composite per-region risk scores from crime statistics", long_about = None)]
#[command(version)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to config file (defaults to ~/.config/region-risk/config.yaml if present)
    #[arg(short, long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

fn main() {
    let cli = Cli::parse();
    region_risk::logging::init(cli.verbose);

    let command = cli
        .command
        .unwrap_or_else(|| Commands::Score(ScoreArgs::default()));

    // Load config
    let config_path = cli.config.map(PathBuf::from);
    let config = match region_risk::config::load_config(config_path) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Config error: {:#}", e);
            std::process::exit(EXIT_CONFIG);
        }
    };

    // Validate scoring config at startup
    let scoring_config = config.scoring.unwrap_or_default();
    if let Err(errors) = scoring::validate_scoring(&scoring_config) {
        eprintln!("Scoring config errors:");
        for error in errors {
            eprintln!("  - {}", error);
        }
        std::process::exit(EXIT_CONFIG);
    }
    let params = scoring_config.resolve();

    let code = match command {
        Commands::Score(args) => run_score(&args, &params, cli.verbose),
        Commands::Lookup { region, results } => run_lookup(&region, &results, &params),
    };
    std::process::exit(code);
}

fn run_score(args: &ScoreArgs, params: &ScoringParams, verbose: bool) -> i32 {
    let start_time = Instant::now();

    let table = match Table::from_path(&args.input) {
        Ok(t) => t,
        Err(e) => {
            eprintln!("Failed to read {}: {}", args.input.display(), e);
            return EXIT_IO;
        }
    };

    let rows = match scoring::score_regions(&table, params) {
        Ok(rows) => rows,
        Err(e @ RiskError::Schema(_)) => {
            eprintln!("{}", e);
            return EXIT_SCHEMA;
        }
        Err(e) => {
            eprintln!("Scoring failed: {}", e);
            return EXIT_IO;
        }
    };

    if let Err(e) = output::save_results(&args.output, &rows) {
        eprintln!("{:#}", e);
        return EXIT_IO;
    }

    if verbose {
        // Per-category breakdown on stderr; stdout carries only the results
        for row in &rows {
            eprintln!("{}", output::format_region_detail(row, false));
        }
        eprintln!();
    }

    let use_colors = output::should_use_colors();
    match args.format {
        OutputFormat::Table => println!("{}", output::format_results_table(&rows, use_colors)),
        OutputFormat::Tsv => println!("{}", output::format_tsv(&rows)),
        OutputFormat::Json => match output::format_json(&rows) {
            Ok(json) => println!("{}", json),
            Err(e) => {
                eprintln!("Failed to render JSON: {}", e);
                return EXIT_IO;
            }
        },
    }

    tracing::info!(
        regions = rows.len(),
        output = %args.output.display(),
        elapsed = ?start_time.elapsed(),
        "scoring complete"
    );
    EXIT_SUCCESS
}

fn run_lookup(region: &str, results: &Path, params: &ScoringParams) -> i32 {
    let canonicalizer = Canonicalizer::new(params.corrections.clone());
    let lookup = match RiskLookup::from_path(results, canonicalizer) {
        Ok(l) => l,
        Err(e @ RiskError::Schema(_)) => {
            eprintln!("{}: {}", results.display(), e);
            return EXIT_SCHEMA;
        }
        Err(e) => {
            eprintln!("Failed to read {}: {}", results.display(), e);
            return EXIT_IO;
        }
    };

    match lookup.resolve(region) {
        Some(found) => {
            let how = match found.kind {
                MatchKind::Exact => "exact",
                MatchKind::Partial => "partial",
            };
            tracing::debug!(query = region, region = found.region, "{} match", how);
            println!("{}\t{:.2}", found.region, found.contribution);
        }
        None => {
            tracing::warn!(query = region, "no matching region, defaulting to 0");
            println!("{}\t{:.2}", scoring::canonicalize_text(region), 0.0);
        }
    }
    EXIT_SUCCESS
}
