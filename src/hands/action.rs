/// every action kind a canonical hand record can carry.
/// blinds and antes are forced bets and never produce decision points.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionKind {
    Check,
    Call,
    Bet,
    Raise,
    Fold,
    AllIn,
    Blind,
    Ante,
}

impl ActionKind {
    /// the six kinds that represent a genuine choice
    pub const fn is_decision(&self) -> bool {
        !matches!(self, Self::Blind | Self::Ante)
    }
    pub const fn is_aggressive(&self) -> bool {
        matches!(self, Self::Bet | Self::Raise)
    }
    /// fixed slot among the six decision kinds, used by the
    /// lossy action-sequence hash and the sequence one-hots
    pub const fn index(&self) -> usize {
        match self {
            Self::Check => 0,
            Self::Call => 1,
            Self::Bet => 2,
            Self::Raise => 3,
            Self::Fold => 4,
            Self::AllIn => 5,
            Self::Blind | Self::Ante => panic!("forced bets are never encoded"),
        }
    }
    /// position in the 12-entry sequence-hash table. slots 5..=10 once
    /// held sized bet/raise labels that the canonical kinds collapsed;
    /// the gaps stay so hashed vectors keep their historical collision
    /// pattern, which puts all-in at 11 rather than 5.
    pub const fn slot(&self) -> usize {
        match self {
            Self::AllIn => 11,
            _ => self.index(),
        }
    }
}

impl std::fmt::Display for ActionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Self::Check => write!(f, "check"),
            Self::Call => write!(f, "call"),
            Self::Bet => write!(f, "bet"),
            Self::Raise => write!(f, "raise"),
            Self::Fold => write!(f, "fold"),
            Self::AllIn => write!(f, "all_in"),
            Self::Blind => write!(f, "blind"),
            Self::Ante => write!(f, "ante"),
        }
    }
}
