use super::texture::Texture;
use crate::Bb;
use crate::cards::Card;
use crate::cards::Draws;
use crate::cards::Ranking;
use crate::cards::Street;
use crate::hands::ActionKind;

/// seat labels relative to the button. preflop positions are the blinds
/// themselves; postflop they collapse to in/out of position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum Position {
    #[serde(rename = "IP")]
    Ip,
    #[serde(rename = "OOP")]
    Oop,
    #[serde(rename = "BTN")]
    Btn,
    #[serde(rename = "BB")]
    Bb,
}

impl Position {
    /// heads-up position from the button flag
    pub const fn of(street: Street, is_button: bool) -> Self {
        match (street, is_button) {
            (Street::Pref, true) => Self::Btn,
            (Street::Pref, false) => Self::Bb,
            (_, true) => Self::Ip,
            (_, false) => Self::Oop,
        }
    }
    pub const fn index(&self) -> usize {
        match self {
            Self::Ip => 0,
            Self::Oop => 1,
            Self::Btn => 2,
            Self::Bb => 3,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Actor {
    Hero,
    Villain,
    Other,
}

/// who fired the last bet or raise in a scope of actions
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Aggressor {
    Hero,
    Villain,
    #[default]
    #[serde(rename = "none")]
    Nobody,
}

impl Aggressor {
    pub const fn index(&self) -> usize {
        match self {
            Self::Hero => 0,
            Self::Villain => 1,
            Self::Nobody => 2,
        }
    }
}

/// one action as it appears in a history sequence: who, what, and for
/// bets and raises a rounded big-blind magnitude.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct SeqToken {
    pub actor: Actor,
    pub kind: ActionKind,
    pub amount_bb: Option<u32>,
}

impl std::fmt::Display for SeqToken {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let actor = match self.actor {
            Actor::Hero => "HERO",
            Actor::Villain => "VILLAIN",
            Actor::Other => "OTHER",
        };
        match self.amount_bb {
            Some(amount) => write!(f, "{}_{}_{}", actor, self.kind, amount),
            None => write!(f, "{}_{}", actor, self.kind),
        }
    }
}

/// one moment where the villain faced a genuine choice, with the full
/// situational context as it stood *before* the choice was made.
///
/// immutable once created: downstream stages attach derived vectors
/// alongside a point, never rewrite its fields. sequences exclude the
/// action that produced the record itself.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct DecisionPoint {
    /// globally unique: hand_id + global step index of the action
    pub decision_id: String,
    pub hand_id: String,
    pub villain: String,

    pub street: Street,
    /// index among the villain's decisions within this street
    pub action_index_in_street: usize,

    pub pot_bb: Bb,
    pub eff_stack_bb: Bb,
    /// stack-to-pot ratio; None when the pot is still empty
    pub spr: Option<f32>,

    pub villain_position: Position,
    pub hero_position: Position,

    pub preflop_sequence: Vec<SeqToken>,
    pub current_sequence: Vec<SeqToken>,
    pub preflop_aggressor: Aggressor,
    pub current_aggressor: Aggressor,

    pub board: Vec<Card>,
    pub texture: Texture,

    /// known only when the hand reached showdown with cards revealed
    pub villain_hole: Option<Vec<Card>>,
    pub villain_strength: Option<Ranking>,
    pub villain_draws: Option<Draws>,

    /// the action this record exists to capture
    pub villain_action: ActionKind,
    /// defined only when the action carried a positive amount
    pub bet_size_bb: Option<Bb>,
    /// defined only when the amount and the pot are both positive
    pub bet_size_pot_pct: Option<f32>,

    pub reached_showdown: bool,
    /// defined only if reached_showdown
    pub villain_won: Option<bool>,
}
