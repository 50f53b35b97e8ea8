/// everything that can go wrong between a raw hand record and a search
/// result. batch operations (extraction, rebuild) recover per item and
/// report; single-item operations fail fast with one of these.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// malformed hand record: missing player, zero big blind, bad card string
    #[error("invalid hand record: {0}")]
    Input(String),

    /// a decision point is missing a field a category encoder requires,
    /// or an empty vector batch was handed to a build
    #[error("encoding failure: {0}")]
    Encoding(String),

    /// vector length disagrees with the configured total dimensionality
    #[error("dimension mismatch: expected {expected}, found {found}")]
    DimensionMismatch { expected: usize, found: usize },

    /// search or load before any build published the partition's artifacts
    #[error("no partition for villain {0}")]
    PartitionNotFound(String),

    /// a saved blob fails its magic, version, or layout checks on load
    #[error("unreadable artifact: {0}")]
    Artifact(String),

    /// id list and index structure disagree on the vector count
    #[error("corrupt partition {key}: {ids} ids against {vectors} vectors")]
    IndexCorruption {
        key: String,
        ids: usize,
        vectors: usize,
    },

    /// inverted-file training asked for more centroids than vectors
    #[error("cannot train {centroids} centroids from {vectors} vectors")]
    TrainingInfeasible { centroids: usize, vectors: usize },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}
