/// the nearest-neighbor structures a partition can be built over.
/// a closed set: adding a kind is a compile-time change, never a
/// silently-ignored string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum IndexKind {
    /// brute-force squared euclidean scan. O(n) per query and always
    /// right; the correctness baseline for the approximate kinds.
    Exact,
    /// navigable-small-world graph. degree bounds per-node connectivity
    /// at construction, breadth is the search candidate list; both trade
    /// memory and latency for recall, which is not guaranteed 100%.
    Nsw { degree: usize, breadth: usize },
    /// inverted file over kmeans centroids. centroids defaults to
    /// min(round(sqrt(n)), 256) when None; an explicit count larger than
    /// the vector population fails the build instead of degrading.
    /// probes is clamped to the trained centroid count at query time.
    Ivf {
        centroids: Option<usize>,
        probes: usize,
    },
}

impl Default for IndexKind {
    fn default() -> Self {
        Self::Nsw {
            degree: 32,
            breadth: 64,
        }
    }
}

impl IndexKind {
    /// stable tag used by the on-disk artifact header
    pub const fn tag(&self) -> u8 {
        match self {
            Self::Exact => 0,
            Self::Nsw { .. } => 1,
            Self::Ivf { .. } => 2,
        }
    }
}

impl std::fmt::Display for IndexKind {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Self::Exact => write!(f, "exact"),
            Self::Nsw { degree, breadth } => write!(f, "nsw(degree={}, breadth={})", degree, breadth),
            Self::Ivf { centroids, probes } => match centroids {
                Some(k) => write!(f, "ivf(centroids={}, probes={})", k, probes),
                None => write!(f, "ivf(centroids=auto, probes={})", probes),
            },
        }
    }
}
