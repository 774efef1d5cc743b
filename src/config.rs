//! Run parameters and their defaults.
//!
//! The clustering routines never invent a default on their own: everything a
//! run needs besides `k` lives in [`KmeansParams`], and callers either take
//! [`KmeansParams::default`] or override fields explicitly.

/// Palette size used when the caller does not pick one.
pub const DEFAULT_COLORS: usize = 5;

/// Longest image side (in pixels) the command-line tool downsizes to before clustering.
pub const DEFAULT_THUMBNAIL: u32 = 400;

/// Strategy for choosing the starting centroids.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Init {
    /// The first `k` distinct points in input order.
    ///
    /// Ignores the seed. If fewer than `k` distinct points exist, the remaining
    /// centroids repeat the first point.
    FirstDistinct,
    /// A seeded uniform sample, preferring points with distinct values.
    Random,
    /// Seeded k-means++ (Arthur & Vassilvitskii, 2007).
    #[default]
    PlusPlus,
}

/// Parameters for one k-means run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct KmeansParams {
    /// Upper bound on Lloyd iterations. Must be at least 1.
    pub max_iter: usize,

    /// Seed for the initialization RNG. Identical inputs and seed give identical results.
    pub seed: u64,

    /// Initialization strategy.
    pub init: Init,
}

impl Default for KmeansParams {
    fn default() -> Self {
        Self {
            max_iter: 300,
            seed: 0,
            init: Init::PlusPlus,
        }
    }
}
