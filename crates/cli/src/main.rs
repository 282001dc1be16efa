use anyhow::{bail, Context, Result};
use astra_similarity::{
    compare_batch, flatten_all, CompareConfig, Language, DEFAULT_BLOCK_WIDTH,
};
use clap::Parser;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

mod flags;
mod report;

use flags::LanguageFlag;

#[derive(Parser)]
#[command(name = "astra")]
#[command(about = "Structural similarity checker for source submissions", long_about = None)]
#[command(version)]
struct Cli {
    /// Submission files forming one batch (at least two)
    #[arg(required = true, num_args = 2..)]
    files: Vec<PathBuf>,

    /// Width of the exact-match block window
    #[arg(long, default_value_t = DEFAULT_BLOCK_WIDTH)]
    block_width: usize,

    /// Override language detection (default: from the first file's extension)
    #[arg(long, value_enum)]
    language: Option<LanguageFlag>,

    /// Emit the full result set as JSON instead of a text report
    #[arg(long)]
    json: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = CompareConfig {
        block_width: cli.block_width,
    };
    config.validate()?;

    let language = match cli.language {
        Some(flag) => flag.as_domain(),
        None => Language::from_path(&cli.files[0]),
    };
    if language == Language::Unknown {
        bail!(
            "could not detect a supported language from {}; pass --language",
            cli.files[0].display()
        );
    }

    let mut sources = BTreeMap::new();
    for path in &cli.files {
        let id = submission_id(path)?;
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;
        if sources.insert(id.clone(), content).is_some() {
            bail!("duplicate submission id {id:?}; file stems must be unique within a batch");
        }
    }

    log::debug!(
        "comparing {} submissions as {}",
        sources.len(),
        language.as_str()
    );

    let sequences = flatten_all(&sources, language)?;
    let mut results = compare_batch(&sequences, &config)?;

    // Most suspicious pairs first
    results.sort_by(|a, b| b.result.score.total_cmp(&a.result.score));

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&results)?);
    } else {
        print!("{}", report::render(&results));
    }

    Ok(())
}

fn submission_id(path: &Path) -> Result<String> {
    path.file_stem()
        .and_then(|stem| stem.to_str())
        .map(str::to_string)
        .with_context(|| format!("cannot derive a submission id from {}", path.display()))
}

fn init_logging(verbose: bool) {
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"));
    if verbose {
        builder.filter_level(log::LevelFilter::Debug);
    }
    builder.target(env_logger::Target::Stderr).init();
}
