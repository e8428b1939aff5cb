use std::io::Write;
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;

use buildcard::{cache, AssetRegistry, BuildRecord, DirCache};

/// Render a build-record JSON file into a status-card image.
#[derive(Parser, Debug)]
#[command(name = "buildcard", version, about)]
struct Args {
    /// Build record JSON file
    input: PathBuf,

    /// Asset manifest JSON file
    #[arg(long, default_value = "assets/manifest.json")]
    assets: PathBuf,

    /// Output/cache directory for rendered cards
    #[arg(long, default_value = "ranking_images")]
    out_dir: PathBuf,

    /// Highlight selector (0=hp, 1=attack, 2=defense, 3=critical,
    /// 4=mastery, 5=elemental); folded into the cache key
    #[arg(long, default_value_t = 0, value_parser = clap::value_parser!(u8).range(0..=5))]
    highlight: u8,

    /// Write maximum-quality JPEG bytes to stdout instead of caching a PNG
    #[arg(long)]
    bytes: bool,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let registry = AssetRegistry::load(&args.assets)
        .with_context(|| format!("loading asset manifest {}", args.assets.display()))?;
    let data = std::fs::read_to_string(&args.input)
        .with_context(|| format!("reading build record {}", args.input.display()))?;
    let record = BuildRecord::from_json(&data).context("parsing build record")?;

    if args.bytes {
        let enriched = record.enrich(&registry)?;
        let card = buildcard::render_card(&enriched, &registry)?;
        let bytes = buildcard::encode_jpeg(&card)?;
        std::io::stdout().write_all(&bytes)?;
        return Ok(());
    }

    let dir_cache = DirCache::open(&args.out_dir)
        .with_context(|| format!("opening cache directory {}", args.out_dir.display()))?;
    let path = cache::render_to_file_cached(&record, args.highlight, &registry, &dir_cache)?;
    println!("{}", path.display());
    Ok(())
}
