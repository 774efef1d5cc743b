/// Squared Euclidean distance between two points of equal dimension.
#[inline]
pub(crate) fn squared_euclidean(a: &[f32], b: &[f32]) -> f32 {
    debug_assert_eq!(a.len(), b.len());
    a.iter()
        .zip(b.iter())
        .map(|(x, y)| {
            let d = x - y;
            d * d
        })
        .sum()
}

/// Index of and squared distance to the closest centroid.
///
/// Ties go to the lowest index: a later centroid only wins on a strictly smaller distance.
#[inline]
pub(crate) fn nearest(point: &[f32], centroids: &[Vec<f32>]) -> (usize, f32) {
    let mut best = 0;
    let mut best_dist = f32::INFINITY;
    for (j, c) in centroids.iter().enumerate() {
        let d = squared_euclidean(point, c);
        if d < best_dist {
            best = j;
            best_dist = d;
        }
    }
    (best, best_dist)
}

/// Per-cluster running sums for the centroid update.
///
/// Sums are kept in `f64`. For integer-valued inputs (pixel components) they are exact,
/// so partial sums can be merged in any order without changing the result.
#[derive(Clone, Debug)]
pub(crate) struct Accumulator {
    dim: usize,
    sums: Vec<f64>,
    counts: Vec<usize>,
}

impl Accumulator {
    pub(crate) fn new(k: usize, dim: usize) -> Self {
        Self {
            dim,
            sums: vec![0.0; k * dim],
            counts: vec![0; k],
        }
    }

    #[inline]
    pub(crate) fn add(&mut self, cluster: usize, point: &[f32]) {
        let row = &mut self.sums[cluster * self.dim..(cluster + 1) * self.dim];
        for (s, &x) in row.iter_mut().zip(point) {
            *s += f64::from(x);
        }
        self.counts[cluster] += 1;
    }

    #[cfg_attr(not(feature = "parallel"), allow(dead_code))]
    pub(crate) fn merge(mut self, other: Self) -> Self {
        for (a, b) in self.sums.iter_mut().zip(other.sums) {
            *a += b;
        }
        for (a, b) in self.counts.iter_mut().zip(other.counts) {
            *a += b;
        }
        self
    }

    pub(crate) fn counts(&self) -> &[usize] {
        &self.counts
    }

    /// Write the mean of every non-empty cluster into `centroids`.
    ///
    /// Empty clusters keep their previous centroid.
    pub(crate) fn write_means(&self, centroids: &mut [Vec<f32>]) {
        for (j, centroid) in centroids.iter_mut().enumerate() {
            let n = self.counts[j];
            if n == 0 {
                continue;
            }
            let row = &self.sums[j * self.dim..(j + 1) * self.dim];
            for (c, &s) in centroid.iter_mut().zip(row) {
                *c = (s / n as f64) as f32;
            }
        }
    }
}
