use super::kind::IndexKind;
use super::metadata::Metadata;
use super::partition::Partition;
use super::structure::Structure;
use crate::encode::Encoder;
use crate::extract::DecisionPoint;
use crate::save::Disk;
use crate::Cancel;
use crate::Distance;
use crate::Error;
use crate::Result;
use rayon::prelude::*;
use std::collections::BTreeMap;
use std::collections::HashMap;
use std::sync::Arc;
use std::sync::Mutex;
use std::sync::RwLock;

/// owns the lifecycle of every villain partition: build, persist,
/// lazy load, search, evict. the registry maps a sanitized villain key
/// to an immutable snapshot behind an arc; a build constructs a whole
/// new partition off to the side, persists it, then swaps the arc, so
/// concurrent readers always see a complete index.
pub struct Manager {
    disk: Disk,
    dimension: usize,
    partitions: RwLock<HashMap<String, Arc<Partition>>>,
    builders: Mutex<HashMap<String, Arc<Mutex<()>>>>,
}

impl Manager {
    pub fn new(dir: impl Into<std::path::PathBuf>, dimension: usize) -> Self {
        Self {
            disk: Disk::new(dir),
            dimension,
            partitions: RwLock::new(HashMap::new()),
            builders: Mutex::new(HashMap::new()),
        }
    }

    /// filesystem-safe partition key for a villain name
    pub fn key(villain: &str) -> String {
        villain
            .chars()
            .map(|c| if c.is_ascii_alphanumeric() { c.to_ascii_lowercase() } else { '_' })
            .collect()
    }

    /// one build at a time per key; distinct keys build in parallel
    fn builder(&self, key: &str) -> Arc<Mutex<()>> {
        self.builders
            .lock()
            .expect("builder table lock")
            .entry(key.to_string())
            .or_default()
            .clone()
    }

    /// builds, persists, and publishes a fresh partition for one
    /// villain. ids and vectors are parallel arrays; vectors must all
    /// carry the configured dimension.
    pub fn build(
        &self,
        villain: &str,
        vectors: &[Vec<f32>],
        ids: Vec<String>,
        kind: IndexKind,
    ) -> Result<Arc<Partition>> {
        if vectors.is_empty() {
            return Err(Error::Encoding(format!("empty vector batch for {}", villain)));
        }
        if let Some(bad) = vectors.iter().find(|v| v.len() != self.dimension) {
            return Err(Error::DimensionMismatch {
                expected: self.dimension,
                found: bad.len(),
            });
        }
        if ids.len() != vectors.len() {
            return Err(Error::IndexCorruption {
                key: Self::key(villain),
                ids: ids.len(),
                vectors: vectors.len(),
            });
        }
        let key = Self::key(villain);
        let lock = self.builder(&key);
        let _guard = lock.lock().expect("partition build lock");
        let structure = Structure::build(&kind, self.dimension, vectors)?;
        let metadata = Metadata::new(villain, self.dimension, structure.kind(), vectors);
        let partition = Arc::new(Partition::new(metadata, ids, structure)?);
        self.disk.save(&key, &partition)?;
        self.publish(&key, partition.clone());
        log::info!(
            "{:<32}{:<32}",
            format!("built partition {}", key),
            format!("{} vectors ({})", vectors.len(), kind)
        );
        Ok(partition)
    }

    fn publish(&self, key: &str, partition: Arc<Partition>) {
        self.partitions
            .write()
            .expect("partition registry write lock")
            .insert(key.to_string(), partition);
    }

    fn published(&self, key: &str) -> Option<Arc<Partition>> {
        self.partitions
            .read()
            .expect("partition registry read lock")
            .get(key)
            .cloned()
    }

    /// registry hit, or a disk load published into the registry.
    /// idempotent; a second load of the same key is a cheap arc clone.
    pub fn load(&self, villain: &str) -> Result<Arc<Partition>> {
        let key = Self::key(villain);
        if let Some(partition) = self.published(&key) {
            return Ok(partition);
        }
        let partition = Arc::new(self.disk.load(&key)?);
        self.publish(&key, partition.clone());
        Ok(partition)
    }

    /// nearest decision ids for a query vector, ascending by squared-l2
    /// distance. loads the partition lazily if it is on disk but not
    /// yet in memory.
    pub fn search(&self, villain: &str, query: &[f32], k: usize) -> Result<Vec<(String, Distance)>> {
        self.load(villain)?.search(query, k)
    }

    /// drops the in-memory snapshot. artifacts stay on disk, so a later
    /// search reloads instead of failing.
    pub fn evict(&self, villain: &str) {
        self.partitions
            .write()
            .expect("partition registry write lock")
            .remove(&Self::key(villain));
    }

    /// groups decision points by villain, encodes, and rebuilds every
    /// partition in parallel. one villain failing never aborts the
    /// others; cancellation is honored between partitions.
    pub fn rebuild_all(
        &self,
        points: &[DecisionPoint],
        encoder: &Encoder,
        kind: IndexKind,
        cancel: &Cancel,
    ) -> RebuildReport {
        let mut groups: BTreeMap<&str, Vec<&DecisionPoint>> = BTreeMap::new();
        for dp in points {
            groups.entry(dp.villain.as_str()).or_default().push(dp);
        }
        let outcomes = groups
            .into_iter()
            .par_bridge()
            .map(|(villain, group)| {
                if cancel.cancelled() {
                    return (villain.to_string(), None);
                }
                let ids = group.iter().map(|dp| dp.decision_id.clone()).collect();
                let vectors = group.iter().map(|dp| encoder.encode(dp)).collect::<Vec<_>>();
                let outcome = self
                    .build(villain, &vectors, ids, kind)
                    .map(|_| ())
                    .map_err(|e| e.to_string());
                (villain.to_string(), Some(outcome))
            })
            .collect::<Vec<_>>();
        let mut report = RebuildReport::default();
        for (villain, outcome) in outcomes {
            match outcome {
                None => report.cancelled += 1,
                Some(Ok(())) => report.built += 1,
                Some(Err(reason)) => {
                    log::warn!("{:<32}{:<32}", format!("rebuild failed {}", villain), reason);
                    report.errors.push((villain, reason));
                }
            }
        }
        log::info!(
            "{:<32}{:<32}",
            "rebuild complete",
            format!(
                "{} built, {} failed, {} cancelled",
                report.built,
                report.errors.len(),
                report.cancelled
            )
        );
        report
    }

    /// per-partition metadata straight from the json sidecars. never
    /// touches an index blob, so it is cheap even over a large corpus.
    pub fn summary(&self) -> Result<Summary> {
        let mut partitions = Vec::new();
        for key in self.disk.keys()? {
            partitions.push(self.disk.metadata(&key)?);
        }
        Ok(Summary {
            total_vectors: partitions.iter().map(|m| m.total_vectors).sum(),
            partitions,
        })
    }
}

/// outcome counts of a `rebuild_all` pass
#[derive(Debug, Default)]
pub struct RebuildReport {
    pub built: usize,
    pub cancelled: usize,
    pub errors: Vec<(String, String)>,
}

/// fleet-wide view assembled from metadata artifacts only
#[derive(Debug)]
pub struct Summary {
    pub total_vectors: usize,
    pub partitions: Vec<Metadata>,
}
