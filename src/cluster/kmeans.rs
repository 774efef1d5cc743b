//! K-means with an explicit Lloyd loop.
//!
//! # The Algorithm (Lloyd, 1982)
//!
//! 1. **Initialize**: pick `k` starting centroids (see [`Init`]).
//! 2. **Assign**: every point goes to the centroid at minimum squared Euclidean
//!    distance. Equidistant centroids resolve to the lowest index.
//! 3. **Update**: every non-empty cluster moves to the component-wise mean of its
//!    points. An empty cluster keeps its previous centroid.
//! 4. **Stop** when an assignment step moves no point, or after `max_iter` updates.
//!
//! A run is a small state machine, `Initialized -> Iterating -> Converged |
//! IterationLimitReached`. Both terminals are successful; once input validation has
//! passed, a fit always yields centroids, labels, and populations.
//!
//! ## Determinism
//!
//! All randomness comes from a `StdRng` seeded with [`KmeansParams::seed`]. With the
//! `parallel` feature, assignment is embarrassingly parallel and the centroid sums
//! are reduced from per-thread partial accumulators in `f64`, which is exact for
//! integer-valued inputs such as pixels.
//!
//! ## Complexity
//!
//! - **Time**: O(n · k · d) per iteration.
//! - **Space**: O(n + k · d) beyond the input.
//!
//! ## Duplicate centroids
//!
//! Two centroids may end up at the same point. They are not merged: the higher-index
//! one simply loses every tie and reports whatever population it holds.

use super::traits::Clustering;
use super::util::{self, Accumulator};
use crate::config::{Init, KmeansParams};
use crate::error::{Error, Result};
use rand::prelude::*;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// K-means clustering algorithm.
#[derive(Debug, Clone)]
pub struct Kmeans {
    k: usize,
    params: KmeansParams,
}

/// How a run ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Status {
    /// An assignment step moved no point.
    Converged {
        /// Update steps performed.
        iterations: usize,
    },
    /// `max_iter` update steps ran and points were still moving.
    IterationLimitReached {
        /// Update steps performed (equal to `max_iter`).
        iterations: usize,
    },
}

impl Status {
    /// Update steps performed.
    pub fn iterations(&self) -> usize {
        match *self {
            Self::Converged { iterations } | Self::IterationLimitReached { iterations } => {
                iterations
            }
        }
    }

    /// Whether the run reached a fixed point.
    pub fn converged(&self) -> bool {
        matches!(self, Self::Converged { .. })
    }
}

/// Output of [`Kmeans::fit`].
#[derive(Clone, Debug)]
pub struct KmeansFit {
    /// Final centroids, indexed by cluster id.
    pub centroids: Vec<Vec<f32>>,
    /// Cluster id of each input point.
    pub labels: Vec<usize>,
    /// Number of points per cluster id. Sums to the number of points.
    pub populations: Vec<usize>,
    /// Sum of squared distances from each point to its centroid.
    pub inertia: f64,
    /// Terminal state of the run.
    pub status: Status,
}

impl KmeansFit {
    /// Cluster id of the closest centroid to `point`.
    pub fn predict(&self, point: &[f32]) -> usize {
        util::nearest(point, &self.centroids).0
    }
}

impl Kmeans {
    /// Create a k-means clusterer with default [`KmeansParams`].
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

    /// Current run parameters.
    pub fn params(&self) -> &KmeansParams {
        &self.params
    }

    /// Run k-means to a terminal state.
    pub fn fit(&self, data: &[Vec<f32>]) -> Result<KmeansFit> {
        let dim = self.validate(data)?;
        let (n, k) = (data.len(), self.k);

        let mut centroids = self.initialize(data);
        let mut labels = vec![usize::MAX; n];
        let (_, mut inertia) = assign(data, &centroids, &mut labels);
        let mut acc = accumulate(data, &labels, k, dim);

        let mut status = Status::IterationLimitReached {
            iterations: self.params.max_iter,
        };
        for iteration in 1..=self.params.max_iter {
            acc.write_means(&mut centroids);
            let (changed, next_inertia) = assign(data, &centroids, &mut labels);
            inertia = next_inertia;
            acc = accumulate(data, &labels, k, dim);

            log::debug!("kmeans iteration {iteration}: {changed} reassigned, inertia {inertia:.3}");
            if changed == 0 {
                status = Status::Converged {
                    iterations: iteration,
                };
                break;
            }
        }

        match status {
            Status::Converged { iterations } => {
                log::info!("kmeans k={k} n={n} converged after {iterations} iterations")
            }
            Status::IterationLimitReached { iterations } => {
                log::warn!("kmeans k={k} n={n} stopped at iteration limit {iterations}")
            }
        }

        Ok(KmeansFit {
            centroids,
            labels,
            populations: acc.counts().to_vec(),
            inertia,
            status,
        })
    }

    /// Check inputs and return the shared dimensionality.
    fn validate(&self, data: &[Vec<f32>]) -> Result<usize> {
        let n = data.len();
        if n == 0 {
            return Err(Error::EmptyInput);
        }

        if self.k == 0 || self.k > n {
            return Err(Error::InvalidClusterCount {
                requested: self.k,
                n_items: n,
            });
        }

        if self.params.max_iter == 0 {
            return Err(Error::InvalidParameter {
                name: "max_iter",
                message: "must be at least 1",
            });
        }

        let d = data[0].len();
        if d == 0 {
            return Err(Error::InvalidParameter {
                name: "dimension",
                message: "must be at least 1",
            });
        }
        if let Some(bad) = data.iter().find(|p| p.len() != d) {
            return Err(Error::DimensionMismatch {
                expected: d,
                found: bad.len(),
            });
        }

        Ok(d)
    }

    fn initialize(&self, data: &[Vec<f32>]) -> Vec<Vec<f32>> {
        let mut rng = StdRng::seed_from_u64(self.params.seed);
        match self.params.init {
            Init::FirstDistinct => distinct_in_order(data, 0..data.len(), self.k),
            Init::Random => {
                let mut order: Vec<usize> = (0..data.len()).collect();
                order.shuffle(&mut rng);
                distinct_in_order(data, order, self.k)
            }
            Init::PlusPlus => plus_plus(data, self.k, &mut rng),
        }
    }
}

impl Clustering for Kmeans {
    fn fit_predict(&self, data: &[Vec<f32>]) -> Result<Vec<usize>> {
        self.fit(data).map(|fit| fit.labels)
    }

    fn n_clusters(&self) -> usize {
        self.k
    }
}

/// Take the first `k` distinct points visited by `order`, padding with the first visited point.
fn distinct_in_order(
    data: &[Vec<f32>],
    order: impl IntoIterator<Item = usize>,
    k: usize,
) -> Vec<Vec<f32>> {
    let mut chosen: Vec<Vec<f32>> = Vec::with_capacity(k);
    for i in order {
        if chosen.len() == k {
            break;
        }
        if !chosen.iter().any(|c| c == &data[i]) {
            chosen.push(data[i].clone());
        }
    }
    while chosen.len() < k {
        chosen.push(chosen[0].clone());
    }
    chosen
}

/// k-means++ seeding: each new centroid is drawn with probability proportional to its
/// squared distance from the closest centroid chosen so far.
///
/// Once every point coincides with a chosen centroid, the remainder repeats the first one.
fn plus_plus(data: &[Vec<f32>], k: usize, rng: &mut StdRng) -> Vec<Vec<f32>> {
    let first = rng.random_range(0..data.len());
    let mut chosen = vec![data[first].clone()];
    let mut dists: Vec<f64> = data
        .iter()
        .map(|p| f64::from(util::squared_euclidean(p, &chosen[0])))
        .collect();

    while chosen.len() < k {
        let total: f64 = dists.iter().sum();
        if total <= 0.0 {
            break;
        }

        let target = rng.random::<f64>() * total;
        let mut cumulative = 0.0;
        let mut pick = None;
        for (i, &d) in dists.iter().enumerate() {
            if d <= 0.0 {
                continue;
            }
            // Rounding can leave `target` just past the final sum; keep the last candidate.
            pick = Some(i);
            cumulative += d;
            if cumulative > target {
                break;
            }
        }
        let Some(pick) = pick else { break };

        let centroid = data[pick].clone();
        for (d, p) in dists.iter_mut().zip(data) {
            *d = d.min(f64::from(util::squared_euclidean(p, &centroid)));
        }
        chosen.push(centroid);
    }

    while chosen.len() < k {
        chosen.push(chosen[0].clone());
    }
    chosen
}

/// Assignment step. Returns how many labels changed and the resulting inertia.
#[cfg(feature = "parallel")]
fn assign(data: &[Vec<f32>], centroids: &[Vec<f32>], labels: &mut [usize]) -> (usize, f64) {
    labels
        .par_iter_mut()
        .zip(data.par_iter())
        .map(|(label, point)| {
            let (j, d) = util::nearest(point, centroids);
            let changed = usize::from(*label != j);
            *label = j;
            (changed, f64::from(d))
        })
        .reduce(|| (0, 0.0), |a, b| (a.0 + b.0, a.1 + b.1))
}

#[cfg(not(feature = "parallel"))]
fn assign(data: &[Vec<f32>], centroids: &[Vec<f32>], labels: &mut [usize]) -> (usize, f64) {
    labels
        .iter_mut()
        .zip(data)
        .fold((0, 0.0), |(changed, inertia), (label, point)| {
            let (j, d) = util::nearest(point, centroids);
            let moved = usize::from(*label != j);
            *label = j;
            (changed + moved, inertia + f64::from(d))
        })
}

/// Per-cluster sums and counts for the current labels.
#[cfg(feature = "parallel")]
fn accumulate(data: &[Vec<f32>], labels: &[usize], k: usize, dim: usize) -> Accumulator {
    data.par_iter()
        .zip(labels.par_iter())
        .fold(
            || Accumulator::new(k, dim),
            |mut acc, (point, &label)| {
                acc.add(label, point);
                acc
            },
        )
        .reduce(|| Accumulator::new(k, dim), Accumulator::merge)
}

#[cfg(not(feature = "parallel"))]
fn accumulate(data: &[Vec<f32>], labels: &[usize], k: usize, dim: usize) -> Accumulator {
    data.iter()
        .zip(labels)
        .fold(Accumulator::new(k, dim), |mut acc, (point, &label)| {
            acc.add(label, point);
            acc
        })
}
