//! Dominant colors and color quantization.
//!
//! `swatch` reduces an image to a small palette with k-means over its pixel
//! vectors, then reports how many pixels each palette color represents.
//!
//! - [`pixels`]: validate and flatten RGB/RGBA data into a [`PixelBuffer`]
//! - [`cluster`]: k-means over dense vectors, with an explicit, seeded loop
//! - [`quantize`]: palette extraction and image repainting ([`ColorClusterer`])
//!
//! ```rust
//! use swatch::{ColorClusterer, Init, PixelExtractor};
//!
//! let raw = [0, 0, 0, 0, 0, 0, 255, 255, 255, 255, 255, 255];
//! let pixels = PixelExtractor::extract(&raw, 2, 2, 3).unwrap();
//!
//! let result = ColorClusterer::new(2)
//!     .with_init(Init::FirstDistinct)
//!     .cluster(&pixels)
//!     .unwrap();
//!
//! assert_eq!(result.populations(), &[2, 2]);
//! assert_eq!(result.quantized(), &pixels);
//! ```

#![forbid(unsafe_code)]

pub mod cluster;
pub mod config;
pub mod error;
pub mod pixels;
pub mod quantize;

pub use cluster::{Clustering, Kmeans, KmeansFit, Status};
pub use config::{Init, KmeansParams};
pub use error::{Error, Result};
pub use pixels::{Channels, PixelBuffer, PixelExtractor};
pub use quantize::{ClusteringResult, ColorClusterer, Swatch};
