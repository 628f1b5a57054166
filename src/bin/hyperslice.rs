use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Parser, Subcommand, ValueEnum};

#[derive(Parser, Debug)]
#[command(name = "hyperslice", version)]
struct Cli {
    /// Log pass scheduling and import diagnostics to stderr.
    #[arg(long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Write the built-in sample scene as a session document.
    Sample(SampleArgs),
    /// Load a session document, run a full projection pass and print a summary.
    Inspect(InspectArgs),
    /// Check the document's projection parameters; fails when any is in the danger band.
    Validate(DocArgs),
    /// Print the SHA-256 content digest of the document's data section.
    Digest(DocArgs),
}

#[derive(Parser, Debug)]
struct SampleArgs {
    /// Output JSON path.
    #[arg(long)]
    out: PathBuf,

    /// Projection mode stored in the document.
    #[arg(long, value_enum, default_value_t = ModeChoice::Slice)]
    mode: ModeChoice,

    /// Slice coordinate stored in the document.
    #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
    slice: f64,
}

#[derive(Parser, Debug)]
struct InspectArgs {
    /// Input session JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Override the document's slice coordinate.
    #[arg(long, allow_negative_numbers = true)]
    slice: Option<f64>,

    /// Override the document's projection mode.
    #[arg(long, value_enum)]
    mode: Option<ModeChoice>,

    /// Visibility half-width around the slice.
    #[arg(long, default_value_t = hyperslice::DEFAULT_SLICE_TOLERANCE)]
    tolerance: f64,

    /// Total instance budget over all categories.
    #[arg(long, default_value_t = 20_000)]
    max_instances: usize,

    /// Node count from which passes are batched across ticks.
    #[arg(long, default_value_t = 5_000)]
    sync_threshold: usize,

    /// Nodes scanned per tick by a batched pass.
    #[arg(long, default_value_t = 500)]
    chunk_size: usize,
}

#[derive(Parser, Debug)]
struct DocArgs {
    /// Input session JSON.
    #[arg(long = "in")]
    in_path: PathBuf,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum ModeChoice {
    Slice,
    Perspective,
    Orthogonal,
    Stereographic,
}

impl From<ModeChoice> for hyperslice::ProjectionMode {
    fn from(m: ModeChoice) -> Self {
        match m {
            ModeChoice::Slice => hyperslice::ProjectionMode::Slice,
            ModeChoice::Perspective => hyperslice::ProjectionMode::Perspective,
            ModeChoice::Orthogonal => hyperslice::ProjectionMode::Orthogonal,
            ModeChoice::Stereographic => hyperslice::ProjectionMode::Stereographic,
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    match cli.cmd {
        Command::Sample(args) => cmd_sample(args),
        Command::Inspect(args) => cmd_inspect(args),
        Command::Validate(args) => cmd_validate(args),
        Command::Digest(args) => cmd_digest(args),
    }
}

fn init_tracing(verbose: bool) {
    let level = if verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::WARN
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
}

fn read_text(path: &Path) -> anyhow::Result<String> {
    std::fs::read_to_string(path).with_context(|| format!("read session '{}'", path.display()))
}

fn load_session(
    path: &Path,
    opts: hyperslice::HyperSessionOpts,
) -> anyhow::Result<(hyperslice::HyperSession, hyperslice::ImportSummary)> {
    let text = read_text(path)?;
    let mut sess = hyperslice::HyperSession::new(opts);
    let summary = sess
        .import_document(&text)
        .with_context(|| format!("import session '{}'", path.display()))?;
    Ok((sess, summary))
}

fn cmd_sample(args: SampleArgs) -> anyhow::Result<()> {
    let mut sess = hyperslice::HyperSession::default();
    sess.load_sample();
    sess.set_mode(args.mode.into());
    sess.set_slice(args.slice);
    sess.run_to_completion();

    let json = sess.export_document().to_json_pretty()?;
    if let Some(parent) = args.out.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    std::fs::write(&args.out, json)
        .with_context(|| format!("write session '{}'", args.out.display()))?;

    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_inspect(args: InspectArgs) -> anyhow::Result<()> {
    let opts = hyperslice::HyperSessionOpts {
        scheduler: hyperslice::SchedulerOpts {
            max_instances: args.max_instances,
            sync_threshold: args.sync_threshold,
            chunk_size: args.chunk_size,
            slice_tolerance: args.tolerance,
        },
        ..hyperslice::HyperSessionOpts::default()
    };
    let (mut sess, summary) = load_session(&args.in_path, opts)?;
    let mut ticks = sess.run_to_completion();
    if let Some(mode) = args.mode {
        sess.set_mode(mode.into());
        ticks += sess.run_to_completion();
    }
    if let Some(slice) = args.slice {
        sess.set_slice(slice);
        ticks += sess.run_to_completion();
    }

    let store = sess.store();
    let stats = store.stats();
    println!(
        "nodes: {} (active {}), strokes: {}, skipped: {}",
        stats.total_nodes, stats.active_nodes, stats.stroke_count, summary.skipped
    );
    println!("average kernel coupling: {:.4}", stats.average_kernel_coupling);
    println!(
        "mode: {}, w_slice: {}, in slice at tolerance {}: {}",
        store.mode(),
        store.slice(),
        args.tolerance,
        store.nodes_in_slice(store.slice(), args.tolerance).len()
    );

    let buffers = sess.buffers();
    let visible: Vec<String> = hyperslice::Category::ALL
        .into_iter()
        .map(|c| format!("{c} {}", buffers.count(c)))
        .collect();
    println!("visible ({} per category): {}", buffers.capacity(), visible.join(", "));
    let sched = sess.scheduler().stats();
    println!(
        "ticks: {ticks}, last pass: {} chunk(s), dropped {}",
        sched.last_pass_chunks, sched.last_pass_dropped
    );

    print_report(&sess.validate());
    Ok(())
}

fn cmd_validate(args: DocArgs) -> anyhow::Result<()> {
    let text = read_text(&args.in_path)?;
    let doc = hyperslice::parse_document(&text)
        .with_context(|| format!("parse session '{}'", args.in_path.display()))?;

    // Judge the values as written, before import clamps them into their slider ranges.
    let mut params = hyperslice::ProjectionParams::default();
    for (key, value) in doc.params {
        params.set_value(key, value);
    }
    let report = hyperslice::validate_params(&params);
    print_report(&report);

    if report.has_dangers() {
        anyhow::bail!("{} projection parameter(s) in the danger band", report.dangers.len());
    }
    Ok(())
}

fn cmd_digest(args: DocArgs) -> anyhow::Result<()> {
    let (sess, _) = load_session(&args.in_path, hyperslice::HyperSessionOpts::default())?;
    let digest = sess.export_document().content_digest()?;
    println!("{digest}");
    Ok(())
}

fn print_report(report: &hyperslice::ParamReport) {
    if report.is_clean() {
        println!("parameters: ok");
        return;
    }
    for (key, reason) in &report.dangers {
        println!("danger  {key}: {reason}");
    }
    for (key, reason) in &report.warnings {
        println!("warning {key}: {reason}");
    }
}
