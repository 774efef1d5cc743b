use crate::error::Result;

/// Hard clustering over dense `f32` vectors: every point gets exactly one cluster id.
pub trait Clustering {
    /// Fit the model and return the cluster id of each input point, in input order.
    fn fit_predict(&self, data: &[Vec<f32>]) -> Result<Vec<usize>>;

    /// The configured number of clusters.
    fn n_clusters(&self) -> usize;
}
