use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use portrait_card::{CardPipeline, PipelineConfig};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "portrait-card", version)]
struct Cli {
    /// Log stage-level detail.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Turn a portrait into a finished card PNG.
    Render(RenderArgs),
    /// Print the template an identifier maps to.
    Select(SelectArgs),
}

#[derive(Parser, Debug)]
struct RenderArgs {
    /// Input portrait (PNG or JPEG).
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,

    /// Identifier used to pick the background template.
    #[arg(long)]
    identifier: Option<String>,

    /// Template directory, overriding the configuration.
    #[arg(long)]
    templates: Option<PathBuf>,

    /// Pipeline configuration JSON.
    #[arg(long)]
    config: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct SelectArgs {
    #[arg(long)]
    identifier: Option<String>,

    /// Pipeline configuration JSON.
    #[arg(long)]
    config: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    match cli.cmd {
        Command::Render(args) => cmd_render(args),
        Command::Select(args) => cmd_select(args),
    }
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load_config(path: Option<&Path>) -> anyhow::Result<PipelineConfig> {
    match path {
        Some(path) => PipelineConfig::from_json_file(path)
            .with_context(|| format!("load config '{}'", path.display())),
        None => Ok(PipelineConfig::default()),
    }
}

fn cmd_render(args: RenderArgs) -> anyhow::Result<()> {
    let mut config = load_config(args.config.as_deref())?;
    if let Some(directory) = args.templates {
        config.templates.directory = directory;
    }
    let pipeline = CardPipeline::new(config)?;

    let input = std::fs::read(&args.in_path)
        .with_context(|| format!("read input '{}'", args.in_path.display()))?;
    let output = pipeline
        .render(&input, args.identifier.as_deref())
        .with_context(|| format!("render '{}'", args.in_path.display()))?;

    if let Some(parent) = args.out.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    std::fs::write(&args.out, &output.png)
        .with_context(|| format!("write png '{}'", args.out.display()))?;

    eprintln!(
        "wrote {} (template {}, subject {}x{} at {},{})",
        args.out.display(),
        output.template_name,
        output.placement.width,
        output.placement.height,
        output.placement.left,
        output.placement.top,
    );
    Ok(())
}

fn cmd_select(args: SelectArgs) -> anyhow::Result<()> {
    let config = load_config(args.config.as_deref())?;
    let pipeline = CardPipeline::new(config)?;
    let (_, name) = pipeline.select_template(args.identifier.as_deref());
    println!("{name}");
    Ok(())
}
