use super::kind::IndexKind;
use chrono::DateTime;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

/// sidecar description of a built partition. serialized as json next to
/// the binary artifacts so a partition can be inspected without loading
/// its vectors.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Metadata {
    pub villain: String,
    pub total_vectors: usize,
    pub dimension: usize,
    #[serde(flatten)]
    pub index_kind: IndexKind,
    pub created_at: DateTime<Utc>,
    pub stats: NormStats,
}

/// l2-norm distribution of the indexed vectors, mostly a drift canary
/// for encoder changes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NormStats {
    pub min_norm: f32,
    pub max_norm: f32,
    pub mean_norm: f32,
    pub std_norm: f32,
}

impl NormStats {
    pub fn of(vectors: &[Vec<f32>]) -> Self {
        let norms = vectors
            .iter()
            .map(|v| v.iter().map(|x| x * x).sum::<f32>().sqrt())
            .collect::<Vec<_>>();
        if norms.is_empty() {
            return Self {
                min_norm: 0.0,
                max_norm: 0.0,
                mean_norm: 0.0,
                std_norm: 0.0,
            };
        }
        let n = norms.len() as f32;
        let mean = norms.iter().sum::<f32>() / n;
        let var = norms.iter().map(|x| (x - mean) * (x - mean)).sum::<f32>() / n;
        Self {
            min_norm: norms.iter().copied().fold(f32::INFINITY, f32::min),
            max_norm: norms.iter().copied().fold(f32::NEG_INFINITY, f32::max),
            mean_norm: mean,
            std_norm: var.sqrt(),
        }
    }
}

impl Metadata {
    pub fn new(villain: &str, dimension: usize, kind: IndexKind, vectors: &[Vec<f32>]) -> Self {
        Self {
            villain: villain.to_string(),
            total_vectors: vectors.len(),
            dimension,
            index_kind: kind,
            created_at: Utc::now(),
            stats: NormStats::of(vectors),
        }
    }
}
