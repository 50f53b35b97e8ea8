pub mod exact;
pub mod ivf;
pub mod kind;
pub mod manager;
pub mod metadata;
pub mod nsw;
pub mod partition;
pub mod structure;

pub use kind::IndexKind;
pub use manager::Manager;
pub use manager::RebuildReport;
pub use manager::Summary;
pub use metadata::Metadata;
pub use partition::Partition;
pub use structure::Structure;
