use anyhow::Context;
use clap::Parser;
use hjmatch::harness::LineProcessor;
use hjmatch::{MatcherBuilder, WordMetric};
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::PathBuf;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

/// Map free-text phrases onto a controlled vocabulary
#[derive(Parser, Debug)]
#[command(name = "hjmatch")]
#[command(about = "Normalize noisy phrases to canonical labels", long_about = None)]
struct Args {
    /// Input file of phrases, one per line ("-" for stdin)
    #[arg(short, long)]
    input: PathBuf,

    /// Reference file(s) of `label : synonym, ...` lines
    #[arg(short, long = "reference-file")]
    reference_file: Vec<PathBuf>,

    /// Configuration file (JSON)
    #[arg(short, long = "config-file")]
    config_file: Option<PathBuf>,

    /// Configuration section to read
    #[arg(long, default_value = hjmatch_loader::DEFAULT_SECTION)]
    section: String,

    /// Word similarity threshold, overrides the configuration file
    #[arg(long)]
    threshold: Option<f64>,

    /// Word metric (jaro, levenshtein), overrides the configuration file
    #[arg(long, value_parser = parse_metric)]
    method: Option<WordMetric>,

    /// Match only the phrase part of `<id> <<tag>> <phrase>` lines
    #[arg(long)]
    extract: bool,

    /// Lowercase phrases before matching
    #[arg(long)]
    lowercase: bool,

    /// Print one JSON explanation per line instead of `line => label`
    #[arg(long)]
    explain: bool,

    /// Log level
    #[arg(long, default_value = "warn")]
    log_level: String,
}

fn parse_metric(name: &str) -> Result<WordMetric, String> {
    WordMetric::parse(name).ok_or_else(|| format!("unknown metric {name:?} (expected jaro or levenshtein)"))
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let log_level = match args.log_level.as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::WARN,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let mut builder = MatcherBuilder::new().section(args.section.clone());
    for path in &args.reference_file {
        builder = builder.reference_file(path);
    }
    if let Some(path) = &args.config_file {
        builder = builder.config_file(path);
    }
    if let Some(threshold) = args.threshold {
        builder = builder.threshold(threshold);
    }
    if let Some(metric) = args.method {
        builder = builder.metric(metric);
    }
    let mut matcher = builder.build().context("failed to build matcher")?;

    let processor = LineProcessor::new(args.extract, args.lowercase)?;

    let reader: Box<dyn BufRead> = if args.input.as_os_str() == "-" {
        Box::new(BufReader::new(std::io::stdin()))
    } else {
        let file = std::fs::File::open(&args.input)
            .with_context(|| format!("failed to open input {}", args.input.display()))?;
        Box::new(BufReader::new(file))
    };

    let stdout = std::io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    let mut lines = 0usize;
    for line in reader.lines() {
        let line = line.context("failed to read input")?;
        let rendered = if args.explain {
            processor.explain(&matcher, &line)?
        } else {
            processor.process(&mut matcher, &line)
        };
        writeln!(out, "{}", rendered)?;
        lines += 1;
    }
    out.flush()?;

    let stats = matcher.cache_stats();
    info!(
        lines,
        cached = stats.entries,
        hits = stats.hits,
        misses = stats.misses,
        "done"
    );
    Ok(())
}
