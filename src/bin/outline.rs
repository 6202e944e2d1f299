use clap::{ArgGroup, Parser, ValueEnum};
use std::error::Error;
use std::path::PathBuf;

use outline_marker::marker_io::OutputFormat;
use outline_marker::outline::OutlineConfig;
use outline_marker::pipeline::{Extras, run_with_extras};
use outline_marker::shapes::generate_test_image;

const DEMO_SIZE: u32 = 400;

#[derive(Parser, Debug)]
#[command(
    name = "outline_marker",
    about = "Trace a shape outline image into a normalized counter-clockwise marker polygon",
    version,
    group(
        ArgGroup::new("source")
            .required(true)
            .args(["input", "demo"])
    )
)]
struct Cli {
    /// Input image with a single closed outline
    #[arg(short = 'i', long = "input")]
    input: Option<PathBuf>,

    /// Write a synthetic airplane shape here and trace it
    #[arg(long = "demo")]
    demo: Option<PathBuf>,

    /// Destination for the point list
    #[arg(short = 'o', long = "output", default_value = "marker_verts.txt")]
    output: PathBuf,

    /// JSON file with tracing parameters
    #[arg(short = 'c', long = "config")]
    config: Option<PathBuf>,

    /// Gaussian smoothing scale before edge detection
    #[arg(long = "sigma")]
    sigma: Option<f32>,

    /// Canny low hysteresis threshold, on the 8-bit Sobel gradient magnitude
    #[arg(long = "low")]
    low_threshold: Option<f32>,

    /// Canny high hysteresis threshold, on the 8-bit Sobel gradient magnitude
    #[arg(long = "high")]
    high_threshold: Option<f32>,

    /// Keep every n-th ordered vertex
    #[arg(short = 's', long = "stride")]
    stride: Option<usize>,

    /// Point list format
    #[arg(short = 'f', long = "format", value_enum, default_value = "text")]
    format: FormatArg,

    /// Save a PNG preview of the polygon
    #[arg(long = "plot")]
    plot: Option<PathBuf>,

    /// Save the detected edge mask as PNG
    #[arg(long = "edges")]
    edges: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum FormatArg {
    Text,
    Json,
}

impl From<FormatArg> for OutputFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Text => OutputFormat::Text,
            FormatArg::Json => OutputFormat::Json,
        }
    }
}

fn build_config(cli: &Cli) -> Result<OutlineConfig, Box<dyn Error>> {
    let mut config = match &cli.config {
        Some(path) => OutlineConfig::from_json_file(path)?,
        None => OutlineConfig::default(),
    };
    if let Some(sigma) = cli.sigma {
        config.sigma = sigma;
    }
    if let Some(low) = cli.low_threshold {
        config.low_threshold = low;
    }
    if let Some(high) = cli.high_threshold {
        config.high_threshold = high;
    }
    if let Some(stride) = cli.stride {
        config.stride = stride;
    }
    config.validate()?;
    Ok(config)
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();
    let config = build_config(&cli)?;

    let input = match (&cli.input, &cli.demo) {
        (Some(path), _) => path.clone(),
        (None, Some(path)) => {
            generate_test_image(path, DEMO_SIZE, DEMO_SIZE)?;
            println!("wrote demo shape {}", path.display());
            path.clone()
        }
        (None, None) => return Err("either --input or --demo is required".into()),
    };

    let extras = Extras {
        edges: cli.edges.clone(),
        plot: cli.plot.clone(),
    };
    let report = run_with_extras(&input, &cli.output, &config, cli.format.into(), &extras)
        .map_err(|e| format!("{} failed: {e}", e.stage()))?;

    for path in extras.edges.iter().chain(extras.plot.iter()) {
        println!("wrote {}", path.display());
    }

    println!(
        "{} ({}x{}): {} edge pixels, {} ordered, {} points -> {}",
        input.display(),
        report.width,
        report.height,
        report.edge_pixels,
        report.ordered_vertices,
        report.polygon.len(),
        cli.output.display()
    );
    Ok(())
}
