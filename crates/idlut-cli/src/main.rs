//! idlut command-line front end.
//!
//! ```bash
//! # Print a window LUT as JSON
//! idlut linear --input-min 40 --input-max 200
//!
//! # Byte LUT, failing instead of clamping out-of-range outputs
//! idlut linear --input-min 0 --input-max 255 --output-max 300 --bytes --strict
//!
//! # Check a JSON LUT file for 8-bit range (exit status 1 if not)
//! idlut check lut.json
//!
//! # Window an image, bounds picked from its 1st/99th percentiles
//! idlut apply scan.png out.png --auto 1 99
//! ```
//!
//! Log verbosity follows `RUST_LOG` (default `info`).

use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result, bail};
use clap::{Args, Parser, Subcommand};
use idlut_core::{GrayImage, Lut, NarrowingPolicy, WindowParams, auto_window};

#[derive(Parser, Debug)]
#[command(name = "idlut")]
#[command(about = "Build, check, and apply grayscale lookup tables")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Print a linear window LUT as a JSON array
    Linear {
        #[command(flatten)]
        window: WindowArgs,
        /// Emit the 8-bit form instead of the long-valued table
        #[arg(long)]
        bytes: bool,
    },
    /// Report whether a JSON LUT fits in 8 bits
    Check {
        /// JSON file holding an array of 256 integers
        lut: PathBuf,
    },
    /// Window a grayscale image through a linear LUT
    Apply {
        input: PathBuf,
        output: PathBuf,
        #[command(flatten)]
        window: WindowArgs,
        /// Pick input bounds from the image's LOW/HIGH percentiles
        #[arg(long, num_args = 2, value_names = ["LOW", "HIGH"], conflicts_with_all = ["input_min", "input_max"])]
        auto: Option<Vec<f64>>,
        /// Invert the output (negative image)
        #[arg(long)]
        invert: bool,
    },
}

/// Window bounds. Flags override the config file, which overrides defaults.
#[derive(Args, Debug, Default)]
struct WindowArgs {
    /// JSON file with `WindowParams` fields
    #[arg(long)]
    config: Option<PathBuf>,
    #[arg(long, allow_negative_numbers = true)]
    input_min: Option<i32>,
    #[arg(long, allow_negative_numbers = true)]
    input_max: Option<i32>,
    #[arg(long, allow_negative_numbers = true)]
    output_min: Option<i32>,
    #[arg(long, allow_negative_numbers = true)]
    output_max: Option<i32>,
    /// Reject out-of-range entries instead of clamping them.
    /// Applies to byte output only (`linear --bytes`, `apply`).
    #[arg(long)]
    strict: bool,
}

impl WindowArgs {
    fn resolve(&self) -> Result<WindowParams> {
        let mut params = match &self.config {
            Some(path) => {
                let json = fs::read_to_string(path)
                    .with_context(|| format!("reading config {}", path.display()))?;
                WindowParams::from_json(&json)
                    .with_context(|| format!("parsing config {}", path.display()))?
            }
            None => WindowParams::default(),
        };

        if let Some(v) = self.input_min {
            params.input_min = v;
        }
        if let Some(v) = self.input_max {
            params.input_max = v;
        }
        if let Some(v) = self.output_min {
            params.output_min = v;
        }
        if let Some(v) = self.output_max {
            params.output_max = v;
        }
        if self.strict {
            params.narrowing = NarrowingPolicy::Reject;
        }
        Ok(params)
    }
}

fn main() -> Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Linear { window, bytes } => run_linear(&window, bytes),
        Commands::Check { lut } => run_check(&lut),
        Commands::Apply {
            input,
            output,
            window,
            auto,
            invert,
        } => run_apply(&input, &output, &window, auto.as_deref(), invert),
    }
}

fn run_linear(window: &WindowArgs, bytes: bool) -> Result<ExitCode> {
    if window.strict && !bytes {
        bail!("--strict only applies to byte output; add --bytes");
    }
    let params = window.resolve()?;
    let lut = params.to_lut()?;
    let json = if bytes {
        serde_json::to_string(&lut.narrow(params.narrowing)?)?
    } else {
        serde_json::to_string(&lut)?
    };
    println!("{json}");
    Ok(ExitCode::SUCCESS)
}

fn run_check(path: &Path) -> Result<ExitCode> {
    let json = fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    let lut: Lut =
        serde_json::from_str(&json).with_context(|| format!("parsing LUT {}", path.display()))?;

    let (lo, hi) = lut.range();
    if lut.is_8bit() {
        println!("{}: 8-bit (range {lo}..={hi})", path.display());
        Ok(ExitCode::SUCCESS)
    } else {
        println!("{}: not 8-bit (range {lo}..={hi})", path.display());
        Ok(ExitCode::FAILURE)
    }
}

fn run_apply(
    input: &Path,
    output: &Path,
    window: &WindowArgs,
    auto: Option<&[f64]>,
    invert: bool,
) -> Result<ExitCode> {
    let image =
        GrayImage::load(input).with_context(|| format!("loading {}", input.display()))?;
    let mut params = window.resolve()?;

    if let Some(bounds) = auto {
        let [low, high] = bounds else {
            bail!("--auto takes exactly two percentiles, got {}", bounds.len());
        };
        let (lo, hi) = auto_window(&image, *low, *high)?;
        tracing::info!("auto window {low}%..{high}% -> {lo}..={hi}");
        params.input_min = lo;
        params.input_max = hi;
    }

    let mut lut = params.to_lut()?.narrow(params.narrowing)?;
    if invert {
        lut = lut.invert();
    }

    lut.apply(&image)
        .save(output)
        .with_context(|| format!("saving {}", output.display()))?;
    tracing::info!(
        "windowed {} ({}x{}) -> {}",
        input.display(),
        image.width,
        image.height,
        output.display()
    );
    Ok(ExitCode::SUCCESS)
}
