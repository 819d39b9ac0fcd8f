// Command-line entry point for Passvis.

use clap::Parser;
use passvis::application::ConvertUsecase;
use passvis::config::Config;
use passvis::infrastructure::GraphvizRenderer;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Scheduler trace file (defaults to log.log)
    trace: Option<PathBuf>,

    /// Output directory for edge dumps, DOT documents, and images
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// TOML configuration file; CLI flags take precedence
    #[arg(long)]
    config: Option<PathBuf>,

    /// Render executable (Graphviz-compatible)
    #[arg(long)]
    renderer: Option<String>,

    /// Image format passed to the renderer as -T<format>
    #[arg(long)]
    image_format: Option<String>,

    /// Skip invoking the external renderer
    #[arg(long)]
    no_render: bool,
}

fn main() {
    let cli = Cli::parse();
    if let Err(e) = run(cli) {
        eprintln!("Error: {:?}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let mut config = match &cli.config {
        Some(path) => Config::from_file(path)?,
        None => Config::default(),
    };
    if let Some(trace) = cli.trace {
        config.trace_path = trace;
    }
    if let Some(output_dir) = cli.output_dir {
        config.output_dir = output_dir;
    }
    if let Some(renderer) = cli.renderer {
        config.renderer = renderer;
    }
    if let Some(image_format) = cli.image_format {
        config.image_format = image_format;
    }
    if cli.no_render {
        config.render = false;
    }

    let renderer = GraphvizRenderer::new(&config.renderer, &config.image_format);
    let usecase = ConvertUsecase {
        renderer: &renderer,
    };
    let written = usecase.run(&config)?;

    println!(
        "Conversion completed! {} files written to {}",
        written.len(),
        config.output_dir.display()
    );
    Ok(())
}
