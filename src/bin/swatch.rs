use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use std::path::PathBuf;
use swatch::config::{DEFAULT_COLORS, DEFAULT_THUMBNAIL};
use swatch::{ColorClusterer, Init, KmeansParams, PixelExtractor};

#[derive(ValueEnum, Clone, Copy, Debug)]
enum InitArg {
    /// First distinct colors in scan order
    First,
    /// Seeded uniform sample
    Random,
    /// Seeded k-means++
    PlusPlus,
}

impl From<InitArg> for Init {
    fn from(arg: InitArg) -> Self {
        match arg {
            InitArg::First => Init::FirstDistinct,
            InitArg::Random => Init::Random,
            InitArg::PlusPlus => Init::PlusPlus,
        }
    }
}

/// Extract the dominant colors of an image with k-means.
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// Input image path
    input: PathBuf,

    /// Number of palette colors
    #[arg(short = 'k', long, default_value_t = DEFAULT_COLORS)]
    n_colors: usize,

    /// Maximum number of k-means iterations
    #[arg(long, default_value_t = KmeansParams::default().max_iter)]
    max_iter: usize,

    /// Seed for centroid initialization
    #[arg(long, default_value_t = KmeansParams::default().seed)]
    seed: u64,

    /// Centroid initialization strategy
    #[arg(long, value_enum, default_value_t = InitArg::PlusPlus)]
    init: InitArg,

    /// Downsize so neither side exceeds this many pixels (0 keeps the original size)
    #[arg(short, long, default_value_t = DEFAULT_THUMBNAIL)]
    thumbnail: u32,

    /// Write the quantized image to this path
    #[arg(short, long)]
    output: Option<PathBuf>,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let img = image::open(&args.input)
        .with_context(|| format!("unable to decode {}", args.input.display()))?;
    let img = if args.thumbnail > 0
        && (img.width() > args.thumbnail || img.height() > args.thumbnail)
    {
        img.thumbnail(args.thumbnail, args.thumbnail)
    } else {
        img
    };
    // Grayscale and palette inputs are promoted so every decodable file has an alpha channel.
    let img = image::DynamicImage::ImageRgba8(img.to_rgba8());
    log::info!(
        "clustering {} ({}x{}) into {} colors",
        args.input.display(),
        img.width(),
        img.height(),
        args.n_colors
    );

    let pixels = PixelExtractor::from_image(&img)?;
    let params = KmeansParams {
        max_iter: args.max_iter,
        seed: args.seed,
        init: args.init.into(),
    };
    let result = ColorClusterer::new(args.n_colors)
        .with_params(params)
        .cluster(&pixels)
        .context("clustering failed")?;

    let mut palette = result.palette();
    palette.sort_by(|a, b| b.population.cmp(&a.population));

    println!("{:<10}{:>10}{:>9}", "color", "pixels", "share");
    for swatch in &palette {
        println!(
            "{:<10}{:>10}{:>8.1}%",
            swatch.hex(),
            swatch.population,
            100.0 * swatch.share(pixels.len())
        );
    }
    log::info!(
        "{:?}, mean squared error {:.2}",
        result.status(),
        result.mean_squared_error()
    );

    if let Some(path) = &args.output {
        result
            .quantized()
            .to_image()?
            .save(path)
            .with_context(|| format!("unable to write {}", path.display()))?;
        println!("Saved -> {}", path.display());
    }

    Ok(())
}
