use crate::Weight;

/// the fixed category layout of a feature vector. order is load-bearing:
/// offsets are prefix sums over this order, and the total is the index
/// dimensionality contract. it must never change once vectors are indexed.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq)]
pub enum Category {
    Street,
    Position,
    BoardTexture,
    Spr,
    ActionSequence,
    Aggressor,
    PotSize,
    StackSize,
    Draws,
    BoardCards,
    HandStrength,
    PreviousHeroAction,
    BetSizing,
    ActionCount,
}

const ALL: [Category; 14] = [
    Category::Street,
    Category::Position,
    Category::BoardTexture,
    Category::Spr,
    Category::ActionSequence,
    Category::Aggressor,
    Category::PotSize,
    Category::StackSize,
    Category::Draws,
    Category::BoardCards,
    Category::HandStrength,
    Category::PreviousHeroAction,
    Category::BetSizing,
    Category::ActionCount,
];

impl Category {
    pub const fn all() -> &'static [Self; 14] {
        &ALL
    }
    pub const fn width(&self) -> usize {
        match self {
            Self::Street => 4,
            Self::Position => 4,
            Self::BoardTexture => 10,
            Self::Spr => 5,
            Self::ActionSequence => 30,
            Self::Aggressor => 3,
            Self::PotSize => 1,
            Self::StackSize => 1,
            Self::Draws => 4,
            Self::BoardCards => 12,
            Self::HandStrength => 9,
            Self::PreviousHeroAction => 8,
            Self::BetSizing => 6,
            Self::ActionCount => 2,
        }
    }
    /// relative importance in the weighted similarity score
    pub const fn weight(&self) -> Weight {
        match self {
            Self::Street => 10.0,
            Self::Position => 5.0,
            Self::BoardTexture => 8.0,
            Self::Spr => 6.0,
            Self::ActionSequence => 7.0,
            Self::Aggressor => 5.0,
            Self::PotSize => 3.0,
            Self::StackSize => 3.0,
            Self::Draws => 6.0,
            Self::BoardCards => 4.0,
            Self::HandStrength => 7.0,
            Self::PreviousHeroAction => 4.0,
            Self::BetSizing => 5.0,
            Self::ActionCount => 2.0,
        }
    }
    /// starting index of this category's contiguous segment
    pub const fn offset(&self) -> usize {
        let mut i = 0;
        let mut offset = 0;
        while i < ALL.len() {
            if ALL[i] as usize == *self as usize {
                return offset;
            }
            offset += ALL[i].width();
            i += 1;
        }
        offset
    }
    pub const fn total() -> usize {
        let mut i = 0;
        let mut total = 0;
        while i < ALL.len() {
            total += ALL[i].width();
            i += 1;
        }
        total
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Self::Street => write!(f, "street"),
            Self::Position => write!(f, "position"),
            Self::BoardTexture => write!(f, "board_texture"),
            Self::Spr => write!(f, "spr"),
            Self::ActionSequence => write!(f, "action_sequence"),
            Self::Aggressor => write!(f, "aggressor"),
            Self::PotSize => write!(f, "pot_size"),
            Self::StackSize => write!(f, "stack_size"),
            Self::Draws => write!(f, "draws"),
            Self::BoardCards => write!(f, "board_cards"),
            Self::HandStrength => write!(f, "hand_strength"),
            Self::PreviousHeroAction => write!(f, "previous_hero_action"),
            Self::BetSizing => write!(f, "bet_sizing"),
            Self::ActionCount => write!(f, "action_count"),
        }
    }
}
