use super::metadata::Metadata;
use super::structure::Structure;
use crate::Distance;
use crate::Error;
use crate::Result;

/// an immutable, published per-villain index snapshot. readers clone
/// the arc and search it freely; a rebuild produces a whole new
/// partition and swaps the handle.
#[derive(Debug, Clone, PartialEq)]
pub struct Partition {
    pub metadata: Metadata,
    pub ids: Vec<String>,
    pub structure: Structure,
}

impl Partition {
    /// assembles a snapshot, rejecting any id/vector miscount up front
    /// so a torn artifact never becomes searchable.
    pub fn new(metadata: Metadata, ids: Vec<String>, structure: Structure) -> Result<Self> {
        if ids.len() != structure.count() || metadata.total_vectors != structure.count() {
            return Err(Error::IndexCorruption {
                key: metadata.villain.clone(),
                ids: ids.len(),
                vectors: structure.count(),
            });
        }
        Ok(Self {
            metadata,
            ids,
            structure,
        })
    }

    pub fn count(&self) -> usize {
        self.ids.len()
    }

    /// nearest decision ids with squared-l2 distances, ascending. k is
    /// clamped to the partition size.
    pub fn search(&self, query: &[f32], k: usize) -> Result<Vec<(String, Distance)>> {
        if query.len() != self.metadata.dimension {
            return Err(Error::DimensionMismatch {
                expected: self.metadata.dimension,
                found: query.len(),
            });
        }
        Ok(self
            .structure
            .search(query, k.min(self.count()))
            .into_iter()
            .map(|(dist, i)| (self.ids[i].clone(), dist))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::index::kind::IndexKind;

    fn partition() -> Partition {
        let vectors = vec![vec![0.0, 0.0], vec![1.0, 0.0], vec![5.0, 5.0]];
        let metadata = Metadata::new("fish", 2, IndexKind::Exact, &vectors);
        let structure = Structure::build(&IndexKind::Exact, 2, &vectors).unwrap();
        let ids = vec!["h1_0".into(), "h1_3".into(), "h2_1".into()];
        Partition::new(metadata, ids, structure).unwrap()
    }

    #[test]
    fn search_returns_ids_by_distance() {
        let hits = partition().search(&[0.9, 0.0], 2).unwrap();
        assert_eq!(hits[0].0, "h1_3");
        assert_eq!(hits[1].0, "h1_0");
    }

    #[test]
    fn k_is_clamped_to_size() {
        let hits = partition().search(&[0.0, 0.0], 10).unwrap();
        assert_eq!(hits.len(), 3);
    }

    #[test]
    fn wrong_dimension_is_rejected() {
        let err = partition().search(&[0.0; 3], 1).unwrap_err();
        assert!(matches!(
            err,
            Error::DimensionMismatch {
                expected: 2,
                found: 3
            }
        ));
    }

    #[test]
    fn miscounted_ids_are_corruption() {
        let vectors = vec![vec![0.0, 0.0], vec![1.0, 0.0]];
        let metadata = Metadata::new("fish", 2, IndexKind::Exact, &vectors);
        let structure = Structure::build(&IndexKind::Exact, 2, &vectors).unwrap();
        let err = Partition::new(metadata, vec!["h1_0".into()], structure).unwrap_err();
        assert!(matches!(err, Error::IndexCorruption { .. }));
    }
}
