pub mod card;
pub mod draws;
pub mod hand;
pub mod rank;
pub mod ranking;
pub mod street;
pub mod suit;

pub use card::Card;
pub use draws::Draws;
pub use hand::Hand;
pub use rank::Rank;
pub use ranking::Ranking;
pub use street::Street;
pub use suit::Suit;
