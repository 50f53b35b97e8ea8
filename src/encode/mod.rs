pub mod category;
pub mod encoder;

pub use category::Category;
pub use encoder::Encoder;
pub use encoder::TOTAL_DIMENSIONS;
