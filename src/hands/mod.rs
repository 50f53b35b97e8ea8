pub mod action;
pub mod format;
pub mod record;
pub mod store;

pub use action::ActionKind;
pub use format::HandFormat;
pub use record::HandRecord;
