use std::fs::File;
use std::io::{self, BufRead, BufReader, Write};
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, Subcommand};
use primorph_morph::{BuildConfig, BuildReport, DictionaryBuilder, DictionaryStats, Morpher};
use serde::Serialize;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about = "Inflects template sentences from an OpenCorpora-style dictionary")]
struct Cli {
    /// Plain-text dictionary (number line, lemma line, form lines...)
    #[arg(short, long, value_name = "FILE", required = true)]
    dict: PathBuf,

    /// JSON build settings, e.g. {"malformed_lines": "abort"}
    #[arg(short, long, value_name = "FILE", global = true)]
    config: Option<PathBuf>,

    /// Log filter used when RUST_LOG is unset
    #[arg(long, default_value = "warn", global = true)]
    log_level: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Render each sentence argument, or each stdin line if none are given
    Render { sentences: Vec<String> },
    /// List every stored form of a lemma with its tags
    Inspect { lemma: String },
    /// Print dictionary and build statistics as JSON
    Stats,
    /// List registered tags with their primes, in registration order
    Tags,
}

#[derive(Serialize)]
struct StatsOutput {
    dictionary: DictionaryStats,
    lines: usize,
    groups: usize,
    duplicates: usize,
    skipped_lines: usize,
}

fn init_logging(default_filter: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn load_config(path: Option<&Path>) -> anyhow::Result<BuildConfig> {
    let Some(path) = path else {
        return Ok(BuildConfig::default());
    };
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading config {}", path.display()))?;
    let config = serde_json::from_str(&text)
        .with_context(|| format!("parsing config {}", path.display()))?;
    Ok(config)
}

fn load_dictionary(path: &Path, config: BuildConfig) -> anyhow::Result<(Morpher, BuildReport)> {
    tracing::info!("Reading dictionary from {}", path.display());
    let file = File::open(path).with_context(|| format!("opening {}", path.display()))?;

    let mut builder = DictionaryBuilder::new(config);
    for line in BufReader::new(file).lines() {
        builder.push_line(&line?)?;
    }
    Ok(builder.finish())
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(&cli.log_level);

    let config = load_config(cli.config.as_deref())?;
    let dict_path = cli.dict;
    let (morpher, report) = load_dictionary(&dict_path, config)?;

    let stdout = io::stdout();
    let mut out = stdout.lock();

    match cli.command {
        Command::Render { sentences } if sentences.is_empty() => {
            for line in io::stdin().lock().lines() {
                writeln!(out, "{}", morpher.render(&line?))?;
            }
        }
        Command::Render { sentences } => {
            for sentence in &sentences {
                writeln!(out, "{}", morpher.render(sentence))?;
            }
        }
        Command::Inspect { lemma } => match morpher.forms(&lemma) {
            Some(forms) => {
                for form in forms {
                    let tags: Vec<String> = form.tags.iter().map(|t| t.to_string()).collect();
                    writeln!(out, "{}\t{}\t{}", form.surface, tags.join(","), form.code)?;
                }
            }
            None => anyhow::bail!("'{}' is not a lemma in {}", lemma, dict_path.display()),
        },
        Command::Stats => {
            let output = StatsOutput {
                dictionary: morpher.stats(),
                lines: report.lines,
                groups: report.groups,
                duplicates: report.duplicates,
                skipped_lines: report.issues.len(),
            };
            serde_json::to_writer_pretty(&mut out, &output)?;
            writeln!(out)?;
        }
        Command::Tags => {
            for (tag, prime) in morpher.registry().iter() {
                writeln!(out, "{tag}\t{prime}")?;
            }
        }
    }

    Ok(())
}
