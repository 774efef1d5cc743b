//! Palette extraction on a synthetic three-band image.

use swatch::{ColorClusterer, PixelExtractor};

fn main() {
    // 12x6 image: a red band, a green band, and a blue band, each with a little noise.
    let (width, height) = (12u32, 6u32);
    let mut raw = Vec::with_capacity((width * height * 3) as usize);
    for y in 0..height {
        for x in 0..width {
            let jitter = ((x * 7 + y * 13) % 9) as u8;
            let px = match y / 2 {
                0 => [200 + jitter, 20, 30],
                1 => [25, 180 + jitter, 40],
                _ => [10, 30, 210 + jitter],
            };
            raw.extend_from_slice(&px);
        }
    }

    let pixels = PixelExtractor::extract(&raw, width, height, 3).unwrap();
    println!(
        "{} pixels, {} distinct colors",
        pixels.len(),
        pixels.count_distinct()
    );

    let result = ColorClusterer::new(3).with_seed(42).cluster(&pixels).unwrap();

    let mut palette = result.palette();
    palette.sort_by(|a, b| b.population.cmp(&a.population));

    println!("=== k-means palette (k=3) ===");
    for swatch in &palette {
        println!(
            "  {} {:>4} px ({:5.1}%)",
            swatch.hex(),
            swatch.population,
            100.0 * swatch.share(pixels.len())
        );
    }
    println!(
        "{:?}, mean squared error {:.2}",
        result.status(),
        result.mean_squared_error()
    );
}
