use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use polyfit::{BatchOpts, Evaluator, EvaluatorOpts, Genome, SnapshotOutcome};

#[derive(Parser, Debug)]
#[command(name = "polyfit", version)]
struct Cli {
    /// Evaluator config JSON; explicit flags override its fields.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Score one genome against a reference image.
    Score(ScoreArgs),
    /// Render one genome to a PNG.
    Render(RenderArgs),
    /// Score a JSON array of genomes, one score per output line.
    Batch(BatchArgs),
}

#[derive(Args, Debug)]
struct SizeArgs {
    /// Evaluation width; the reference must have exactly this width.
    #[arg(long)]
    width: Option<u32>,

    /// Evaluation height; the reference must have exactly this height.
    #[arg(long)]
    height: Option<u32>,
}

#[derive(Args, Debug)]
struct ScoreArgs {
    /// Reference image (PNG, JPEG, ...).
    #[arg(long)]
    reference: PathBuf,

    /// Genome JSON.
    #[arg(long)]
    genome: PathBuf,

    #[command(flatten)]
    size: SizeArgs,

    /// Also write the rendered genome to this PNG.
    #[arg(long)]
    out: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct RenderArgs {
    /// Genome JSON.
    #[arg(long)]
    genome: PathBuf,

    // Defaults to the genome's declared size.
    #[command(flatten)]
    size: SizeArgs,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,
}

#[derive(Args, Debug)]
struct BatchArgs {
    /// Reference image.
    #[arg(long)]
    reference: PathBuf,

    /// JSON array of genomes.
    #[arg(long)]
    genomes: PathBuf,

    #[command(flatten)]
    size: SizeArgs,

    /// Override rayon worker threads.
    #[arg(long)]
    threads: Option<usize>,

    /// Score on the calling thread only.
    #[arg(long, default_value_t = false)]
    sequential: bool,

    /// Genomes per parallel round.
    #[arg(long, default_value_t = 64)]
    chunk_size: usize,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let base = match &cli.config {
        Some(path) => EvaluatorOpts::from_path(path)?,
        None => EvaluatorOpts::default(),
    };
    match cli.cmd {
        Command::Score(args) => cmd_score(base, args),
        Command::Render(args) => cmd_render(args),
        Command::Batch(args) => cmd_batch(base, args),
    }
}

fn apply_size(mut opts: EvaluatorOpts, size: &SizeArgs) -> EvaluatorOpts {
    if let Some(w) = size.width {
        opts.width = w;
    }
    if let Some(h) = size.height {
        opts.height = h;
    }
    opts
}

fn cmd_score(base: EvaluatorOpts, args: ScoreArgs) -> anyhow::Result<()> {
    let opts = apply_size(base, &args.size);
    let evaluator = Evaluator::new(&args.reference, opts)
        .with_context(|| format!("load reference '{}'", args.reference.display()))?;
    let genome = Genome::from_path(&args.genome)?;

    let canvas = evaluator.render(&genome);
    let score = evaluator.score(&canvas)?;
    if let SnapshotOutcome::Written(path) = evaluator.snapshot(&canvas, 0) {
        tracing::info!(path = %path.display(), "snapshot written");
    }
    if let Some(out) = &args.out {
        write_png(&canvas, out)?;
    }

    tracing::info!(
        polygons = genome.polygons.len(),
        vertices = genome.vertex_count(),
        "scored genome"
    );
    println!("{score}");
    Ok(())
}

fn cmd_render(args: RenderArgs) -> anyhow::Result<()> {
    let genome = Genome::from_path(&args.genome)?;
    let width = args.size.width.unwrap_or(genome.width);
    let height = args.size.height.unwrap_or(genome.height);
    let canvas = polyfit::render_genome(&genome, width, height)?;
    write_png(&canvas, &args.out)
}

fn cmd_batch(base: EvaluatorOpts, args: BatchArgs) -> anyhow::Result<()> {
    let opts = apply_size(base, &args.size);
    let evaluator = Evaluator::new(&args.reference, opts)
        .with_context(|| format!("load reference '{}'", args.reference.display()))?;
    let population = polyfit::population_from_path(&args.genomes)?;

    let batch = BatchOpts {
        parallel: !args.sequential,
        threads: args.threads,
        chunk_size: args.chunk_size,
    };
    let results = polyfit::evaluate_population(&evaluator, &population, &batch)?;
    for (i, result) in results.into_iter().enumerate() {
        let score = match result {
            Ok(score) => score,
            Err(e) => {
                tracing::warn!(genome = i, error = %e, "genome failed to score");
                evaluator.worst_score()
            }
        };
        println!("{score}");
    }
    Ok(())
}

fn write_png(canvas: &polyfit::Canvas, out: &Path) -> anyhow::Result<()> {
    polyfit::write_canvas_png(canvas, out)?;
    eprintln!("wrote {}", out.display());
    Ok(())
}
