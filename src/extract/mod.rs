pub mod decision;
pub mod extractor;
pub mod texture;

pub use decision::Actor;
pub use decision::Aggressor;
pub use decision::DecisionPoint;
pub use decision::Position;
pub use decision::SeqToken;
pub use extractor::ExtractReport;
pub use extractor::Extractor;
pub use texture::Texture;
