use super::exact::squared;
use crate::Distance;
use crate::Error;
use crate::Result;
use rand::rngs::SmallRng;
use rand::seq::index::sample;
use rand::SeedableRng;

const SEED: u64 = 0x5EED_CE11;
const ROUNDS: usize = 12;
const MAX_CENTROIDS: usize = 256;

/// inverted-file index. vectors are partitioned into voronoi cells
/// around k-means centroids; a query scans only the `probes` cells
/// whose centroids lie nearest. training is deterministic via a
/// fixed-seed rng.
#[derive(Debug, Clone, PartialEq)]
pub struct Ivf {
    pub(crate) dimension: usize,
    pub(crate) probes: usize,
    pub(crate) data: Vec<f32>,
    pub(crate) centroids: Vec<Vec<f32>>,
    pub(crate) lists: Vec<Vec<u32>>,
}

impl Ivf {
    /// default cell count scales with the square root of the corpus,
    /// capped at 256. an explicit override must not exceed the corpus.
    pub fn centroids_for(n: usize, requested: Option<usize>) -> Result<usize> {
        let k = match requested {
            Some(k) => k,
            None => ((n as f64).sqrt().round() as usize).clamp(1, MAX_CENTROIDS),
        };
        if k == 0 || k > n {
            Err(Error::TrainingInfeasible {
                centroids: k,
                vectors: n,
            })
        } else {
            Ok(k)
        }
    }

    pub fn build(
        dimension: usize,
        requested: Option<usize>,
        probes: usize,
        vectors: &[Vec<f32>],
    ) -> Result<Self> {
        let k = Self::centroids_for(vectors.len(), requested)?;
        let centroids = Self::train(dimension, k, vectors);
        let mut lists = vec![Vec::new(); k];
        let mut data = Vec::with_capacity(vectors.len() * dimension);
        for (i, vector) in vectors.iter().enumerate() {
            lists[Self::nearest(&centroids, vector)].push(i as u32);
            data.extend_from_slice(vector);
        }
        Ok(Self {
            dimension,
            probes,
            data,
            centroids,
            lists,
        })
    }

    pub fn count(&self) -> usize {
        self.data.len() / self.dimension
    }
    fn row(&self, i: u32) -> &[f32] {
        let i = i as usize;
        &self.data[i * self.dimension..(i + 1) * self.dimension]
    }

    /// lloyd's iterations from a sampled seeding. a cell that empties
    /// keeps its previous centroid rather than being respawned.
    fn train(dimension: usize, k: usize, vectors: &[Vec<f32>]) -> Vec<Vec<f32>> {
        let mut rng = SmallRng::seed_from_u64(SEED);
        let mut centroids = sample(&mut rng, vectors.len(), k)
            .into_iter()
            .map(|i| vectors[i].clone())
            .collect::<Vec<_>>();
        for _ in 0..ROUNDS {
            let mut sums = vec![vec![0f64; dimension]; k];
            let mut counts = vec![0usize; k];
            for vector in vectors {
                let cell = Self::nearest(&centroids, vector);
                counts[cell] += 1;
                for (s, x) in sums[cell].iter_mut().zip(vector.iter()) {
                    *s += *x as f64;
                }
            }
            for ((centroid, sum), count) in centroids.iter_mut().zip(sums).zip(counts) {
                if count > 0 {
                    for (c, s) in centroid.iter_mut().zip(sum) {
                        *c = (s / count as f64) as f32;
                    }
                }
            }
        }
        centroids
    }

    fn nearest(centroids: &[Vec<f32>], vector: &[f32]) -> usize {
        centroids
            .iter()
            .enumerate()
            .map(|(i, c)| (squared(c, vector), i))
            .min_by(|a, b| a.0.total_cmp(&b.0).then(a.1.cmp(&b.1)))
            .map(|(_, i)| i)
            .expect("at least one centroid")
    }

    pub fn search(&self, query: &[f32], k: usize) -> Vec<(Distance, usize)> {
        let mut cells = self
            .centroids
            .iter()
            .enumerate()
            .map(|(i, c)| (squared(c, query), i))
            .collect::<Vec<_>>();
        cells.sort_by(|a, b| a.0.total_cmp(&b.0).then(a.1.cmp(&b.1)));
        cells.truncate(self.probes.max(1));
        let mut hits = cells
            .into_iter()
            .flat_map(|(_, cell)| self.lists[cell].iter())
            .map(|i| (squared(self.row(*i), query), *i as usize))
            .collect::<Vec<_>>();
        hits.sort_by(|a, b| a.0.total_cmp(&b.0).then(a.1.cmp(&b.1)));
        hits.truncate(k);
        hits
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn clusters() -> Vec<Vec<f32>> {
        let mut vectors = Vec::new();
        for center in [0.0f32, 100.0, 200.0] {
            for i in 0..20 {
                vectors.push(vec![center + (i % 5) as f32, center + (i / 5) as f32]);
            }
        }
        vectors
    }

    #[test]
    fn default_centroid_count_is_sqrt() {
        assert_eq!(Ivf::centroids_for(60, None).unwrap(), 8);
        assert_eq!(Ivf::centroids_for(100_000, None).unwrap(), 256);
        assert_eq!(Ivf::centroids_for(1, None).unwrap(), 1);
    }

    #[test]
    fn oversized_request_is_rejected() {
        let err = Ivf::centroids_for(5, Some(10)).unwrap_err();
        assert!(matches!(
            err,
            Error::TrainingInfeasible {
                centroids: 10,
                vectors: 5
            }
        ));
    }

    #[test]
    fn every_vector_lands_in_one_list() {
        let vectors = clusters();
        let ivf = Ivf::build(2, Some(3), 1, &vectors).unwrap();
        let assigned = ivf.lists.iter().map(|l| l.len()).sum::<usize>();
        assert_eq!(assigned, vectors.len());
    }

    #[test]
    fn probed_search_finds_cluster_members() {
        let vectors = clusters();
        let ivf = Ivf::build(2, Some(3), 1, &vectors).unwrap();
        let hits = ivf.search(&[100.0, 100.0], 5);
        assert_eq!(hits.len(), 5);
        // the middle cluster owns everything near (100, 100)
        assert!(hits.iter().all(|(_, i)| (20..40).contains(i)));
    }

    #[test]
    fn training_is_deterministic() {
        let vectors = clusters();
        let a = Ivf::build(2, Some(3), 2, &vectors).unwrap();
        let b = Ivf::build(2, Some(3), 2, &vectors).unwrap();
        assert_eq!(a, b);
    }
}
