use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use sitemap_graph::{GraphStats, SitemapAssembler, SitemapConfig, SitemapLayout, SitemapSnapshot};
use std::fs::File;
use std::io::{self, BufReader, Write};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "sitemap")]
#[command(about = "Lay out and filter crawled sitemap graphs", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Quiet mode: log only warnings/errors (stdout is reserved for JSON)
    #[arg(long, global = true)]
    quiet: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the positioned graph with filter annotations
    Layout(LayoutArgs),

    /// Print graph shape and data-quality counters
    Stats(InputArgs),
}

#[derive(Args)]
struct InputArgs {
    /// Snapshot JSON ({"pages": [...], "actions": [...]}), `-` for stdin
    #[arg(short, long, default_value = "-")]
    input: String,

    /// TOML config overriding hierarchy/layout defaults
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Pretty-print JSON output
    #[arg(long)]
    pretty: bool,
}

#[derive(Args)]
struct LayoutArgs {
    #[command(flatten)]
    input: InputArgs,

    /// Emphasize the neighborhood of this page id
    #[arg(long, conflicts_with = "query")]
    select: Option<String>,

    /// Highlight pages whose title, URL pattern or product area match
    #[arg(long)]
    query: Option<String>,
}

#[derive(Serialize)]
struct StatsOutput<'a> {
    hubs: &'a [String],
    overflow_depth: Option<usize>,
    #[serde(flatten)]
    stats: GraphStats,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"));
    if cli.quiet {
        builder.filter_level(log::LevelFilter::Warn);
    } else if cli.verbose {
        builder.filter_level(log::LevelFilter::Debug);
    }
    builder.target(env_logger::Target::Stderr).init();

    match cli.command {
        Commands::Layout(args) => run_layout(args),
        Commands::Stats(args) => run_stats(args),
    }
}

fn run_layout(args: LayoutArgs) -> Result<()> {
    let layout = assemble(&args.input)?;
    let mut view = layout.into_view();

    if let Some(id) = &args.select {
        view.select_node(id)
            .with_context(|| format!("Cannot select page '{id}'"))?;
    } else if let Some(query) = &args.query {
        view.set_query(query);
    }

    write_json(&view.render(), args.input.pretty)
}

fn run_stats(args: InputArgs) -> Result<()> {
    let layout = assemble(&args)?;
    let output = StatsOutput {
        hubs: &layout.hubs,
        overflow_depth: layout.overflow_depth,
        stats: layout.stats(),
    };
    write_json(&output, args.pretty)
}

fn assemble(args: &InputArgs) -> Result<SitemapLayout> {
    let config = match &args.config {
        Some(path) => SitemapConfig::load(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => SitemapConfig::default(),
    };

    let snapshot = read_snapshot(&args.input)?;
    log::info!(
        "Loaded snapshot: {} pages, {} actions",
        snapshot.pages.len(),
        snapshot.actions.len()
    );

    let assembler = SitemapAssembler::new(config).context("Invalid config")?;
    Ok(assembler.assemble_snapshot(&snapshot))
}

fn read_snapshot(input: &str) -> Result<SitemapSnapshot> {
    if input == "-" {
        return SitemapSnapshot::from_json_reader(io::stdin().lock())
            .context("Failed to parse snapshot from stdin");
    }

    let path = PathBuf::from(input);
    if !path.is_file() {
        bail!("Snapshot file not found: {}", path.display());
    }
    let file = File::open(&path).with_context(|| format!("Failed to open {}", path.display()))?;
    SitemapSnapshot::from_json_reader(BufReader::new(file))
        .with_context(|| format!("Failed to parse snapshot {}", path.display()))
}

fn write_json<T: Serialize>(value: &T, pretty: bool) -> Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    if pretty {
        serde_json::to_writer_pretty(&mut out, value)?;
    } else {
        serde_json::to_writer(&mut out, value)?;
    }
    writeln!(out)?;
    Ok(())
}
