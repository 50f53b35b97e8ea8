use super::exact::Exact;
use super::ivf::Ivf;
use super::kind::IndexKind;
use super::nsw::Nsw;
use crate::Distance;
use crate::Result;

/// the built search structure behind a partition. closed dispatch over
/// the three supported kinds keeps search monomorphic and the on-disk
/// format enumerable.
#[derive(Debug, Clone, PartialEq)]
pub enum Structure {
    Exact(Exact),
    Nsw(Nsw),
    Ivf(Ivf),
}

impl Structure {
    pub fn build(kind: &IndexKind, dimension: usize, vectors: &[Vec<f32>]) -> Result<Self> {
        match kind {
            IndexKind::Exact => Ok(Self::Exact(Exact::build(dimension, vectors))),
            IndexKind::Nsw { degree, breadth } => {
                Ok(Self::Nsw(Nsw::build(dimension, *degree, *breadth, vectors)))
            }
            IndexKind::Ivf { centroids, probes } => {
                Ok(Self::Ivf(Ivf::build(dimension, *centroids, *probes, vectors)?))
            }
        }
    }

    pub fn kind(&self) -> IndexKind {
        match self {
            Self::Exact(_) => IndexKind::Exact,
            Self::Nsw(n) => IndexKind::Nsw {
                degree: n.degree,
                breadth: n.breadth,
            },
            Self::Ivf(i) => IndexKind::Ivf {
                centroids: Some(i.centroids.len()),
                probes: i.probes,
            },
        }
    }

    pub fn count(&self) -> usize {
        match self {
            Self::Exact(e) => e.count(),
            Self::Nsw(n) => n.count(),
            Self::Ivf(i) => i.count(),
        }
    }

    pub fn search(&self, query: &[f32], k: usize) -> Vec<(Distance, usize)> {
        match self {
            Self::Exact(e) => e.search(query, k),
            Self::Nsw(n) => n.search(query, k),
            Self::Ivf(i) => i.search(query, k),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_round_trips_through_build() {
        let vectors = (0..16).map(|i| vec![i as f32, 0.0]).collect::<Vec<_>>();
        let kind = IndexKind::Nsw {
            degree: 4,
            breadth: 8,
        };
        let built = Structure::build(&kind, 2, &vectors).unwrap();
        assert_eq!(built.kind(), kind);
        assert_eq!(built.count(), 16);
    }

    #[test]
    fn ivf_reports_trained_centroid_count() {
        let vectors = (0..16).map(|i| vec![i as f32]).collect::<Vec<_>>();
        let built = Structure::build(
            &IndexKind::Ivf {
                centroids: None,
                probes: 2,
            },
            1,
            &vectors,
        )
        .unwrap();
        assert_eq!(
            built.kind(),
            IndexKind::Ivf {
                centroids: Some(4),
                probes: 2
            }
        );
    }
}
