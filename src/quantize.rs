//! Color quantization: cluster a [`PixelBuffer`] and repaint it with its palette.

use crate::cluster::{Kmeans, Status};
use crate::config::{Init, KmeansParams};
use crate::error::{Error, Result};
use crate::pixels::PixelBuffer;
use std::fmt::Write;

/// Reduces an image to `k` representative colors.
#[derive(Debug, Clone)]
pub struct ColorClusterer {
    k: usize,
    params: KmeansParams,
}

/// A palette entry: a centroid color and how many pixels it represents.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Swatch {
    /// Centroid components, rounded and clamped to `0..=255`.
    pub color: Vec<u8>,
    /// Number of pixels assigned to this color.
    pub population: usize,
}

impl Swatch {
    /// `#rrggbb` form of the color. Alpha, if present, is not included.
    pub fn hex(&self) -> String {
        let mut out = String::with_capacity(7);
        out.push('#');
        for c in self.color.iter().take(3) {
            let _ = write!(out, "{c:02x}");
        }
        out
    }

    /// Fraction of `total` pixels this color covers.
    pub fn share(&self, total: usize) -> f64 {
        if total == 0 {
            0.0
        } else {
            self.population as f64 / total as f64
        }
    }
}

/// Output of [`ColorClusterer::cluster`].
#[derive(Clone, Debug)]
pub struct ClusteringResult {
    quantized: PixelBuffer,
    centroids: Vec<Vec<f32>>,
    colors: Vec<Vec<u8>>,
    labels: Vec<usize>,
    populations: Vec<usize>,
    inertia: f64,
    mse: f64,
    status: Status,
}

impl ClusteringResult {
    /// The input image with every pixel replaced by its cluster's color.
    pub fn quantized(&self) -> &PixelBuffer {
        &self.quantized
    }

    /// Take ownership of the quantized image.
    pub fn into_quantized(self) -> PixelBuffer {
        self.quantized
    }

    /// Exact centroids (component means), indexed by cluster id.
    pub fn centroids(&self) -> &[Vec<f32>] {
        &self.centroids
    }

    /// Centroids rounded to the nearest integer and clamped to `0..=255`.
    pub fn colors(&self) -> &[Vec<u8>] {
        &self.colors
    }

    /// Cluster id of each pixel, in raster order.
    pub fn labels(&self) -> &[usize] {
        &self.labels
    }

    /// Pixels per cluster id. Sums to the pixel count.
    pub fn populations(&self) -> &[usize] {
        &self.populations
    }

    /// Colors paired with their populations, in cluster-id order.
    ///
    /// Sorting (e.g. by descending population) is left to the caller.
    pub fn palette(&self) -> Vec<Swatch> {
        self.colors
            .iter()
            .zip(&self.populations)
            .map(|(color, &population)| Swatch {
                color: color.clone(),
                population,
            })
            .collect()
    }

    /// How the clustering run ended.
    pub fn status(&self) -> Status {
        self.status
    }

    /// Sum of squared distances from each pixel to its (unrounded) centroid.
    pub fn inertia(&self) -> f64 {
        self.inertia
    }

    /// Mean squared error of the quantized image against the input, per pixel.
    ///
    /// Measured on the rounded colors actually written to [`Self::quantized`], summing
    /// squared channel differences within a pixel.
    pub fn mean_squared_error(&self) -> f64 {
        self.mse
    }
}

impl ColorClusterer {
    /// Create a clusterer producing `k` colors, with default [`KmeansParams`].
    pub fn new(k: usize) -> Self {
        Self {
            k,
            params: KmeansParams::default(),
        }
    }

    /// Set the maximum number of update steps.
    pub fn with_max_iter(mut self, max_iter: usize) -> Self {
        self.params.max_iter = max_iter;
        self
    }

    /// Set the initialization seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.params.seed = seed;
        self
    }

    /// Set the initialization strategy.
    pub fn with_init(mut self, init: Init) -> Self {
        self.params.init = init;
        self
    }

    /// Replace all run parameters at once.
    pub fn with_params(mut self, params: KmeansParams) -> Self {
        self.params = params;
        self
    }

    /// Requested palette size.
    pub fn k(&self) -> usize {
        self.k
    }

    /// Cluster `pixels` into `k` colors and build the quantized image.
    ///
    /// Fails with [`Error::EmptyInput`] on a buffer with no pixels, and with
    /// [`Error::InvalidClusterCount`] unless `2 <= k <= pixels.len()`.
    pub fn cluster(&self, pixels: &PixelBuffer) -> Result<ClusteringResult> {
        let n = pixels.len();
        if n == 0 {
            return Err(Error::EmptyInput);
        }
        if self.k < 2 || self.k > n {
            return Err(Error::InvalidClusterCount {
                requested: self.k,
                n_items: n,
            });
        }

        let fit = Kmeans::new(self.k)
            .with_params(self.params.clone())
            .fit(&pixels.to_points())?;

        let colors: Vec<Vec<u8>> = fit
            .centroids
            .iter()
            .map(|c| c.iter().map(|&v| to_channel(v)).collect())
            .collect();
        let data: Vec<u8> = fit
            .labels
            .iter()
            .flat_map(|&label| colors[label].iter().copied())
            .collect();
        let quantized = pixels.with_data(data)?;
        let mse = squared_error(pixels.as_raw(), quantized.as_raw()) as f64 / n as f64;

        Ok(ClusteringResult {
            quantized,
            centroids: fit.centroids,
            colors,
            labels: fit.labels,
            populations: fit.populations,
            inertia: fit.inertia,
            mse,
            status: fit.status,
        })
    }
}

fn squared_error(a: &[u8], b: &[u8]) -> u64 {
    a.iter()
        .zip(b)
        .map(|(&x, &y)| {
            let d = u64::from(x.abs_diff(y));
            d * d
        })
        .sum()
}

#[inline]
fn to_channel(v: f32) -> u8 {
    v.round().clamp(0.0, 255.0) as u8
}
