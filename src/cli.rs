use crate::config::{Config, load_config};
use crate::ir::Diagram;
use crate::layout::compute_layout;
use crate::layout_dump::write_layout_dump;
use crate::render::{render_svg, write_output_svg};
use anyhow::Result;
use clap::{Parser, ValueEnum};
use log::{LevelFilter, debug, info};
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::str::FromStr;

#[derive(Parser, Debug)]
#[command(
    name = "archstack",
    version,
    about = "Render layered architecture diagrams to SVG or PNG"
)]
pub struct Args {
    /// Diagram file (JSON or JSON5) or '-' for stdin
    #[arg(short = 'i', long = "input", conflicts_with = "sample")]
    pub input: Option<PathBuf>,

    /// Render the built-in collaborative document platform diagram
    #[arg(long = "sample")]
    pub sample: bool,

    /// Output file (svg/png). Defaults to stdout for SVG if omitted.
    #[arg(short = 'o', long = "output")]
    pub output: Option<PathBuf>,

    /// Output format
    #[arg(short = 'e', long = "outputFormat", value_enum, default_value = "svg")]
    pub output_format: OutputFormat,

    /// Config JSON file (theme, themeVariables, layout, render)
    #[arg(short = 'c', long = "configFile")]
    pub config: Option<PathBuf>,

    /// Canvas width in pixels
    #[arg(short = 'w', long = "width")]
    pub width: Option<f32>,

    /// Canvas height in pixels
    #[arg(short = 'H', long = "height")]
    pub height: Option<f32>,

    /// Also write the computed geometry as JSON
    #[arg(long = "dump-layout")]
    pub dump_layout: Option<PathBuf>,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long = "log-level", default_value = "warn")]
    pub log_level: String,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Svg,
    Png,
}

pub fn run() -> Result<()> {
    let args = Args::parse();
    init_logger(&args.log_level);
    debug!(args:?; "Parsed arguments");
    execute(&args)
}

fn init_logger(level: &str) {
    let log_level = LevelFilter::from_str(level).unwrap_or_else(|_| {
        eprintln!("Invalid log level: {level}. Using 'warn' instead.");
        LevelFilter::Warn
    });
    let _ = env_logger::Builder::from_env(env_logger::Env::default())
        .filter_level(log_level)
        .try_init();
}

pub fn execute(args: &Args) -> Result<()> {
    let mut config = load_config(args.config.as_deref())?;
    if let Some(width) = args.width {
        config.render.width = width;
    }
    if let Some(height) = args.height {
        config.render.height = height;
    }

    let diagram = if args.sample {
        Diagram::sample()
    } else {
        Diagram::parse(&read_input(args.input.as_deref())?)?
    };
    info!(
        layers = diagram.layers.len(),
        connections = diagram.connections.len();
        "Diagram loaded"
    );

    let svg = render_diagram(&diagram, &config, args.dump_layout.as_deref())?;
    match args.output_format {
        OutputFormat::Svg => write_output_svg(&svg, args.output.as_deref())?,
        OutputFormat::Png => {
            let output = ensure_output(&args.output, "png")?;
            write_png(&svg, &output, &config)?;
        }
    }
    if let Some(output) = args.output.as_deref() {
        info!(output:? = output; "Diagram written");
    }
    Ok(())
}

fn render_diagram(diagram: &Diagram, config: &Config, dump: Option<&Path>) -> Result<String> {
    let layout = compute_layout(diagram, &config.layout)?;
    if let Some(path) = dump {
        write_layout_dump(path, &layout)?;
        debug!(path:? = path; "Layout dump written");
    }
    Ok(render_svg(&layout, &config.theme, &config.render))
}

#[cfg(feature = "png")]
fn write_png(svg: &str, output: &Path, config: &Config) -> Result<()> {
    crate::render::write_output_png(svg, output, &config.render, &config.theme)
}

#[cfg(not(feature = "png"))]
fn write_png(_svg: &str, _output: &Path, _config: &Config) -> Result<()> {
    Err(anyhow::anyhow!(
        "PNG output requires the `png` feature"
    ))
}

fn read_input(path: Option<&Path>) -> Result<String> {
    if let Some(path) = path {
        if path != Path::new("-") {
            return Ok(std::fs::read_to_string(path)?);
        }
    }
    let mut buf = String::new();
    io::stdin().read_to_string(&mut buf)?;
    Ok(buf)
}

fn ensure_output(output: &Option<PathBuf>, ext: &str) -> Result<PathBuf> {
    if let Some(path) = output {
        return Ok(path.clone());
    }
    Err(anyhow::anyhow!("Output path required for {} output", ext))
}
