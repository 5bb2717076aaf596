//! Niihau - Main entrypoint.
//!
//! Loads configuration, initializes logging, and then either runs a command
//! script against a fresh trie or bulk-loads a text corpus.

use std::fs::File;
use std::io::{self, BufReader, BufWriter};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

use niihau_lib::config::{self, driver::OutputFormat, LogConfig, NiihauConfig};
use niihau_lib::data_structures::NiihauTrie;
use niihau_lib::driver::{self, CommandExecutor};

/// Command line arguments for the Niihau trie toolkit.
#[derive(Parser, Debug)]
#[clap(name = "niihau", version, author, about)]
struct Args {
    /// Path to configuration file
    #[clap(short, long, value_parser)]
    config: Option<PathBuf>,

    /// Write outcomes as JSON lines regardless of configuration
    #[clap(long)]
    json: bool,

    /// Skip malformed script lines instead of stopping
    #[clap(long)]
    keep_going: bool,

    /// Text encoding label for trie keys, e.g. `latin1`
    #[clap(long)]
    encoding: Option<String>,

    /// Duplicate policy: `set` or `multiset`
    #[clap(long)]
    duplicates: Option<String>,

    /// Command to execute
    #[clap(subcommand)]
    command: Option<Command>,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Command {
    /// Run a command script, one command per line
    Run {
        /// Script file, standard input when omitted
        #[clap(value_parser)]
        script: Option<PathBuf>,
    },

    /// Load every whitespace-separated token of a text file
    Load {
        /// Corpus file
        #[clap(value_parser)]
        input: PathBuf,

        /// Word to probe after loading: count, enumerate, search and remove
        #[clap(short, long)]
        query: Option<String>,

        /// Edit distance bound for the probe's similarity search
        #[clap(short = 'd', long)]
        max_distance: Option<usize>,
    },

    /// Validate the configuration file
    Validate,

    /// Generate a default configuration file
    GenConfig {
        /// Path to output configuration file
        #[clap(short, long, value_parser)]
        output: PathBuf,
    },
}

/// Initialize the logging system.
///
/// `RUST_LOG` takes precedence over the configured level. Logs go to standard
/// error so they never mix with command outcomes.
fn init_logging(log: &LogConfig) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&log.level))
        .context("Invalid log filter")?;

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_file(log.source_location)
        .with_line_number(log.source_location);

    let installed = if log.json {
        builder.json().try_init()
    } else {
        builder.try_init()
    };
    installed.map_err(|e| anyhow::anyhow!("Failed to set global tracing subscriber: {e}"))
}

fn run_script(script: Option<&Path>) -> Result<()> {
    let mut executor = CommandExecutor::from_global_config();
    let stdout = io::stdout();
    let writer = BufWriter::new(stdout.lock());

    let summary = match script {
        Some(path) => {
            let file = File::open(path)
                .with_context(|| format!("Failed to open script {}", path.display()))?;
            executor.run_script(BufReader::new(file), writer)
        }
        None => executor.run_script(io::stdin().lock(), writer),
    }
    .context("Script failed")?;

    info!(
        executed = summary.executed,
        skipped = summary.skipped,
        "Script completed"
    );
    Ok(())
}

fn load_corpus(
    config: &NiihauConfig,
    input: &Path,
    query: Option<&str>,
    max_distance: Option<usize>,
) -> Result<()> {
    let mut trie = NiihauTrie::with_config(config.trie);
    let file =
        File::open(input).with_context(|| format!("Failed to open corpus {}", input.display()))?;
    let stats = driver::load_corpus(&mut trie, BufReader::new(file))
        .with_context(|| format!("Failed to load corpus {}", input.display()))?;

    let json = config.driver.output == OutputFormat::Json;
    if json {
        println!("{}", serde_json::to_string(&stats)?);
    } else {
        println!(
            "loaded {} tokens ({} stored): {} words, {} nodes in {:.3} ms",
            stats.tokens, stats.stored, stats.words, stats.nodes, stats.elapsed_ms
        );
    }

    if let Some(word) = query {
        let max_distance = max_distance.unwrap_or(config.driver.default_max_distance);
        let report = driver::probe(&mut trie, word, max_distance);
        if json {
            println!("{}", serde_json::to_string(&report)?);
        } else {
            println!(
                "count {word}: {} ({:.3} ms)",
                report.count.result, report.count.elapsed_ms
            );
            println!(
                "words {word}: {} ({:.3} ms)",
                report.enumerated.result, report.enumerated.elapsed_ms
            );
            println!(
                "similar {word} {max_distance}: {} ({:.3} ms)",
                report.similar.result, report.similar.elapsed_ms
            );
            println!(
                "remove {word}: {} ({:.3} ms), {} words left",
                report.removed.result, report.removed.elapsed_ms, report.words_after
            );
        }
    }
    Ok(())
}

/// Main entry point for the application.
fn main() -> Result<()> {
    let args = Args::parse();

    let mut config =
        niihau_lib::load_config(args.config.as_deref()).context("Failed to load configuration")?;
    config
        .apply_trie_overrides(args.encoding.as_deref(), args.duplicates.as_deref())
        .context("Invalid trie option")?;
    if args.json {
        config.driver.output = OutputFormat::Json;
    }
    if args.keep_going {
        config.driver.keep_going = true;
    }

    init_logging(&config.log)?;
    niihau_lib::init(config);
    let global = config::get_global_config();
    let config = global.get();

    match args.command.unwrap_or(Command::Run { script: None }) {
        Command::Run { script } => run_script(script.as_deref()),
        Command::Load {
            input,
            query,
            max_distance,
        } => load_corpus(config, &input, query.as_deref(), max_distance),
        Command::Validate => {
            info!(
                encoding = %config.trie.encoding,
                case_sensitive = config.trie.case_sensitive,
                duplicate_policy = %config.trie.duplicate_policy,
                "Configuration validated successfully"
            );
            Ok(())
        }
        Command::GenConfig { output } => {
            info!("Generating default configuration");
            let default_config = NiihauConfig::default();

            if let Some(parent) = output.parent() {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("Failed to create {}", parent.display()))?;
            }

            let toml = toml::to_string_pretty(&default_config)
                .context("Failed to serialize config")?;
            std::fs::write(&output, toml)
                .with_context(|| format!("Failed to write {}", output.display()))?;

            info!("Default configuration written to {:?}", output);
            Ok(())
        }
    }
}
