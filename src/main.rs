//! mpl-scipub: render the example gallery.

mod gallery;

use std::path::PathBuf;
use anyhow::{Context, Result};
use clap::Parser;
use gallery::Example;
use mpl_scipub::{Plot, Style};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "mpl-scipub")]
#[command(about = "Draw example scientific plots with Matplotlib", long_about = None)]
struct Args {
    /// Example to draw
    #[arg(value_enum)]
    example: Example,

    /// Save the figure under this name (the format is appended)
    /// instead of displaying it
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// File format of the saved figure
    #[arg(short, long, default_value = "pdf")]
    format: String,

    /// Resolution of the saved figure
    #[arg(long, default_value_t = 400.)]
    dpi: f64,

    /// YAML style sheet applied on top of the example settings
    #[arg(long)]
    style: Option<PathBuf>,

    /// Log filter, e.g. "debug" or "mpl_scipub=trace"
    #[arg(long, default_value = "warn")]
    log: String,
}

fn main() -> Result<()> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_new(&args.log)
                         .with_context(|| format!("bad log filter {:?}", args.log))?)
        .with_writer(std::io::stderr)
        .init();
    tracing::info!(example = ?args.example, "drawing");

    let mut plot = Plot::new();
    gallery::build(&mut plot, args.example)?;
    if let Some(path) = &args.style {
        Style::load(path)
            .with_context(|| format!("cannot read {}", path.display()))?
            .apply(&mut plot)?;
    }
    plot.plot()?;
    match args.output {
        Some(name) => {
            let path = plot.save().format(&args.format).dpi(args.dpi)
                .to_file(name)?;
            println!("{}", path.display());
        }
        None => plot.display()?,
    }
    Ok(())
}
