//! A binary to lift intervals from one release to another.
//!
//! ```shell
//! cargo run --release --bin=seqdiff-lift --features=binaries -- \
//!     --directory CHROMOSOME_DIFFERENCES 140 150 I:9949430-9949479:+
//! ```
//!
//! Each interval is printed after lifting, preceded by a commented note if
//! lifting changed it.

use std::path::PathBuf;
use std::sync::LazyLock;

use anyhow::bail;
use anyhow::Context;
use anyhow::Result;
use clap::Parser;
use clap_verbosity_flag::Verbosity;
use omics::coordinate::Strand;
use regex::Regex;
use seqdiff::diff::Release;
use seqdiff::feature::Feature;
use seqdiff::feature::COMMENT_PREFIX;
use seqdiff::liftover::chain::Builder;
use seqdiff::mismatch::Position;
use seqdiff::source::Directory;
use seqdiff::source::DEFAULT_ROOT;
use tracing::info;
use tracing::warn;
use tracing_log::AsTrace as _;
use tracing_subscriber::EnvFilter;

////////////////////////////////////////////////////////////////////////////////////////
// Intervals
////////////////////////////////////////////////////////////////////////////////////////

static REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([^:\s]+):(\d+)-(\d+)(?::([+-]))?$").unwrap()
});

/// Parses an interval of the form `chrom:start-end[:strand]`.
fn parse_interval(value: &str) -> Result<Feature> {
    let groups = match REGEX.captures(value) {
        Some(groups) => groups,
        None => bail!("invalid interval: {value}"),
    };

    let start = groups[2]
        .parse::<Position>()
        .with_context(|| format!("parsing start of {value}"))?;
    let end = groups[3]
        .parse::<Position>()
        .with_context(|| format!("parsing end of {value}"))?;

    if end < start {
        bail!("invalid interval: {value}: end is before start");
    }

    let strand = groups.get(4).map(|strand| match strand.as_str() {
        "-" => Strand::Negative,
        _ => Strand::Positive,
    });

    Ok(Feature::new(&groups[1], Some(start), Some(end), strand))
}

////////////////////////////////////////////////////////////////////////////////////////
// Main
////////////////////////////////////////////////////////////////////////////////////////

/// Lifts intervals between assembly releases using sequence difference files.
#[derive(Parser)]
struct Args {
    /// The directory containing the `sequence_differences.WS<release>` files.
    #[arg(short, long, default_value = DEFAULT_ROOT)]
    directory: PathBuf,

    /// The release the intervals are given in.
    start: Release,

    /// The release to lift the intervals to.
    destination: Release,

    /// The intervals to lift (e.g., `I:100-200:+`).
    #[arg(required = true)]
    intervals: Vec<String>,

    #[command(flatten)]
    verbose: Verbosity,
}

fn lift(args: &Args) -> Result<()> {
    let features = args
        .intervals
        .iter()
        .map(|interval| parse_interval(interval))
        .collect::<Result<Vec<_>>>()?;

    let directory = Directory::new(&args.directory);
    let chain = Builder
        .try_build_from(&directory, args.start, args.destination)
        .with_context(|| {
            format!(
                "loading sequence differences from {}",
                directory.root().display()
            )
        })?;

    info!(
        "lifting {} interval(s) from release {} to release {}",
        features.len(),
        chain.start(),
        chain.destination()
    );

    for mut feature in features {
        chain.lift_feature(&mut feature);

        if let Some(annotation) = feature.outcome().annotation() {
            println!("{COMMENT_PREFIX}{annotation}");
        }

        if feature.outcome().is_discarded() {
            warn!("{feature} cannot be placed in release {}", chain.destination());
        }

        println!("{feature}");
    }

    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();

    match std::env::var("RUST_LOG") {
        Ok(_) => tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::from_default_env())
            .init(),
        Err(_) => tracing_subscriber::fmt()
            .with_max_level(args.verbose.log_level_filter().as_trace())
            .init(),
    };

    lift(&args)
}
