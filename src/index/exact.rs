use crate::Distance;

/// brute-force nearest neighbor over row-major flat storage.
/// ties break on insertion order so queries are fully deterministic.
#[derive(Debug, Clone, PartialEq)]
pub struct Exact {
    pub(crate) dimension: usize,
    pub(crate) data: Vec<f32>,
}

impl Exact {
    pub fn build(dimension: usize, vectors: &[Vec<f32>]) -> Self {
        let data = vectors.iter().flatten().copied().collect();
        Self { dimension, data }
    }
    pub fn count(&self) -> usize {
        self.data.len() / self.dimension
    }
    pub(crate) fn row(&self, i: usize) -> &[f32] {
        &self.data[i * self.dimension..(i + 1) * self.dimension]
    }
    pub fn search(&self, query: &[f32], k: usize) -> Vec<(Distance, usize)> {
        let mut hits = (0..self.count())
            .map(|i| (squared(self.row(i), query), i))
            .collect::<Vec<_>>();
        hits.sort_by(|a, b| a.0.total_cmp(&b.0).then(a.1.cmp(&b.1)));
        hits.truncate(k);
        hits
    }
}

/// squared euclidean distance, the metric shared by every index kind
pub fn squared(a: &[f32], b: &[f32]) -> Distance {
    a.iter().zip(b).map(|(x, y)| (x - y) * (x - y)).sum()
}
