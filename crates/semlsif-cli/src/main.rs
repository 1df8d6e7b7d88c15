//! semlsif-cli: CLI entry point for the SemanticDB → LSIF indexer.

use anyhow::Context;
use clap::Parser;
use semlsif_core::IndexStats;
use semlsif_index::Indexer;
use semlsif_protocol::{JsonSink, RecordSink, ToolInfo};
use std::path::PathBuf;
use std::time::Instant;

fn version_string() -> String {
    format!(
        "{}, protocol version {}",
        env!("CARGO_PKG_VERSION"),
        semlsif_protocol::PROTOCOL_VERSION
    )
}

#[derive(Parser)]
#[command(
    name = "semlsif",
    about = "semlsif is an LSIF indexer for SemanticDB.",
    version = version_string()
)]
struct Cli {
    /// Directory containing .semanticdb files (may be repeated).
    #[arg(long = "semanticdbDir", value_name = "DIR", required = true)]
    semanticdb_dir: Vec<PathBuf>,

    /// The output file the dump is saved to.
    #[arg(long, value_name = "FILE", default_value = "dump.lsif")]
    out: PathBuf,

    /// Display verbose information.
    #[arg(short = 'v', long)]
    verbose: bool,

    /// Display debug information.
    #[arg(long)]
    debug: bool,

    /// File contents will not be embedded into the dump. Accepted for
    /// compatibility; contents are never embedded.
    #[arg(long = "noContents")]
    no_contents: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let level = if cli.debug {
        tracing::Level::DEBUG
    } else if cli.verbose {
        tracing::Level::INFO
    } else {
        tracing::Level::WARN
    };
    // Logs go to stderr; stdout is reserved for progress dots and the summary.
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(level)
        .with_target(false)
        .init();

    // Print progress dots if we have no other output.
    let print_progress = !cli.verbose && !cli.debug;

    if cli.no_contents {
        tracing::debug!("--noContents is implied: source text is never embedded");
    }

    let out = std::fs::File::create(&cli.out)
        .with_context(|| format!("create dump file {}", cli.out.display()))?;

    let project_root = std::env::current_dir().context("determine project root")?;
    let tool_info = ToolInfo {
        name: "semlsif".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        args: std::env::args().skip(1).collect(),
    };

    let mut indexer = Indexer::new(project_root, print_progress, tool_info, JsonSink::new(out));

    let start = Instant::now();
    let result = run(&mut indexer, &cli.semanticdb_dir);
    if print_progress {
        // End the progress line before the summary or the error.
        println!();
        println!();
    }
    let stats = result?;

    println!(
        "{} file(s), {} def(s), {} element(s)",
        stats.num_files, stats.num_defs, stats.num_elements
    );
    println!("Processed in {:.2?}", start.elapsed());
    Ok(())
}

fn run<S: RecordSink>(indexer: &mut Indexer<S>, roots: &[PathBuf]) -> anyhow::Result<IndexStats> {
    for root in roots {
        let root = std::path::absolute(root)
            .with_context(|| format!("get abspath of SemanticDB dir {}", root.display()))?;
        indexer.load_root(&root)?;
    }
    Ok(indexer.index()?)
}
