use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use scribble_rs::area::save_area;
use scribble_rs::bounds::image_size;
use scribble_rs::grayscale::to_grayscale_in_place;
use scribble_rs::recolor::recolor;
use scribble_rs::{DirectorySink, ExportFormat, ExportOptions, Exporter, RasterSurface};
use std::path::{Path, PathBuf};

mod ops;

/// scribble: draw, trim, recolor and export raster annotations
#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct Cli {
    /// Log debug output (overridden by RUST_LOG)
    #[clap(short, long, global = true)]
    verbose: bool,

    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Replay a JSON list of drawing operations onto a blank surface and export it
    Draw {
        /// Path to a JSON file with drawing operations
        #[clap(long)]
        ops: PathBuf,

        /// Surface width in pixels
        #[clap(long)]
        width: u32,

        /// Surface height in pixels
        #[clap(long)]
        height: u32,

        /// Crop the result to the drawn content
        #[clap(long)]
        trim: bool,

        #[clap(flatten)]
        output: OutputArgs,
    },

    /// Print the bounding area of the non-transparent pixels of a PNG as JSON
    Bounds {
        /// Path to input PNG file
        #[clap(short, long)]
        input: PathBuf,
    },

    /// Crop a PNG to its non-transparent content
    Trim {
        /// Path to input PNG file
        #[clap(short, long)]
        input: PathBuf,

        #[clap(flatten)]
        output: OutputArgs,
    },

    /// Remap black and gray pixels of a PNG to a color
    Recolor {
        /// Path to input PNG file
        #[clap(short, long)]
        input: PathBuf,

        /// Target CSS color
        #[clap(short, long)]
        color: String,

        #[clap(flatten)]
        output: OutputArgs,
    },

    /// Convert a PNG to grayscale
    Grayscale {
        /// Path to input PNG file
        #[clap(short, long)]
        input: PathBuf,

        #[clap(flatten)]
        output: OutputArgs,
    },

    /// Re-export a PNG as PNG, SVG or GIF
    Export {
        /// Path to input PNG file
        #[clap(short, long)]
        input: PathBuf,

        #[clap(flatten)]
        output: OutputArgs,
    },
}

#[derive(Args, Debug)]
struct OutputArgs {
    /// Path to output file to be created
    #[clap(short, long)]
    output: PathBuf,

    /// Output format: png, svg or gif. Defaults to the output file's extension
    #[clap(short, long)]
    format: Option<ExportFormat>,

    /// Path to a JSON file with export options
    #[clap(long)]
    config: Option<PathBuf>,

    /// Pixels per inch recorded in PNG metadata
    #[clap(long)]
    ppi: Option<f32>,
}

impl OutputArgs {
    fn format(&self) -> Result<ExportFormat> {
        if let Some(format) = self.format {
            return Ok(format);
        }
        match self.output.extension().and_then(|ext| ext.to_str()) {
            Some(ext) => ext
                .parse()
                .with_context(|| format!("Cannot infer format from {}", self.output.display())),
            None => Ok(ExportFormat::default()),
        }
    }

    fn options(&self) -> Result<ExportOptions> {
        let mut options = match &self.config {
            Some(path) => ExportOptions::from_path(path)?,
            None => ExportOptions::default(),
        };
        if self.ppi.is_some() {
            options.ppi = self.ppi;
        }
        options.validate()?;
        Ok(options)
    }
}

fn load_png(path: &Path) -> Result<RasterSurface> {
    let data =
        std::fs::read(path).with_context(|| format!("Failed to read {}", path.display()))?;
    RasterSurface::from_png(&data)
        .with_context(|| format!("Failed to decode {} as PNG", path.display()))
}

async fn write_output(surface: &RasterSurface, output: &OutputArgs) -> Result<PathBuf> {
    let format = output.format()?;
    let name = output
        .output
        .file_stem()
        .and_then(|stem| stem.to_str())
        .with_context(|| format!("Invalid output path {}", output.output.display()))?;
    let directory = match output.output.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };

    let sink = DirectorySink::new(&directory);
    let exporter = Exporter::new(sink.clone(), output.options()?);
    let download = match format {
        ExportFormat::Gif => match exporter.export_gif(Some(surface), name, None)? {
            Some(export) => Some(export.finish().await?),
            None => None,
        },
        format => exporter.export(format, Some(surface), name)?,
    };

    match download {
        Some(download) => Ok(sink.path_for(&download)),
        None => bail!("Nothing was exported"),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();

    match cli.command {
        Command::Draw {
            ops: ops_path,
            width,
            height,
            trim,
            output,
        } => {
            let json = std::fs::read_to_string(&ops_path)
                .with_context(|| format!("Failed to read {}", ops_path.display()))?;
            let mut surface = RasterSurface::new(width, height)?;
            for op in ops::parse_ops(&json)? {
                ops::apply(&mut surface, &op)?;
            }
            if trim {
                surface = match save_area(Some(&surface), None)? {
                    Some(trimmed) => trimmed,
                    None => bail!("Nothing was drawn, refusing to save an empty image"),
                };
            }
            let path = write_output(&surface, &output).await?;
            log::info!("Wrote {}", path.display());
        }
        Command::Bounds { input } => {
            let surface = load_png(&input)?;
            match image_size(&surface) {
                Some(area) => println!("{}", serde_json::to_string(&area)?),
                None => println!("empty"),
            }
        }
        Command::Trim { input, output } => {
            let surface = load_png(&input)?;
            let Some(trimmed) = save_area(Some(&surface), None)? else {
                bail!("{} is empty, nothing to save", input.display());
            };
            write_output(&trimmed, &output).await?;
        }
        Command::Recolor {
            input,
            color,
            output,
        } => {
            let surface = load_png(&input)?;
            let recolored = recolor(&surface, &color)?;
            write_output(&recolored, &output).await?;
        }
        Command::Grayscale { input, output } => {
            let mut surface = load_png(&input)?;
            to_grayscale_in_place(&mut surface);
            write_output(&surface, &output).await?;
        }
        Command::Export { input, output } => {
            let surface = load_png(&input)?;
            write_output(&surface, &output).await?;
        }
    }
    Ok(())
}
