//! Clustering of dense color vectors.
//!
//! ## K-means
//!
//! Assign each point to the nearest centroid, then move each centroid to the mean
//! of its points. Repeat until nothing moves.
//!
//! **Objective**: minimize the within-cluster sum of squares:
//!
//! ```text
//! J = Σ_k Σ_{x ∈ C_k} ||x - μ_k||²
//! ```
//!
//! For palette extraction the points are RGB or RGBA pixels, `k` is the palette
//! size, and the centroids are the palette colors. Clusters in color space are
//! rarely spherical, but the objective is exactly "lowest squared error when every
//! pixel is repainted with its cluster's color", which is what quantization wants.
//!
//! The loop is owned here rather than delegated, so that tie-breaks (lowest index
//! wins), the empty-cluster policy (keep the previous centroid), and the iteration
//! bound are all explicit. See [`Kmeans`] for details.
//!
//! ## Usage
//!
//! ```rust
//! use swatch::cluster::{Clustering, Kmeans};
//!
//! let data = vec![
//!     vec![0.0, 0.0, 0.0],
//!     vec![4.0, 2.0, 0.0],
//!     vec![250.0, 250.0, 255.0],
//!     vec![255.0, 255.0, 255.0],
//! ];
//!
//! let labels = Kmeans::new(2).with_seed(42).fit_predict(&data).unwrap();
//! assert_eq!(labels[0], labels[1]);
//! assert_ne!(labels[0], labels[2]);
//! ```

mod kmeans;
mod traits;
mod util;

pub use kmeans::{Kmeans, KmeansFit, Status};
pub use traits::Clustering;
