use super::action::ActionKind;
use super::format::HandFormat;
use crate::cards::Card;
use crate::cards::Street;

/// one canonical hand as produced by an upstream format converter.
/// amounts are in chips; blinds give the conversion to big blinds.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct HandRecord {
    pub hand_id: String,
    /// provenance: which raw format the upstream converter translated
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<HandFormat>,
    pub hero: String,
    pub villain: String,
    pub sb: f32,
    pub bb: f32,
    #[serde(default)]
    pub ante: f32,
    pub players: Vec<PlayerEntry>,
    #[serde(default)]
    pub board: Vec<Card>,
    pub actions: Vec<ActionEntry>,
    #[serde(default)]
    pub showdown: Showdown,
}

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct PlayerEntry {
    pub name: String,
    pub seat: usize,
    pub stack: f32,
    #[serde(default)]
    pub is_button: bool,
}

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct ActionEntry {
    pub player: String,
    pub kind: ActionKind,
    #[serde(default)]
    pub amount: f32,
    /// converters that cannot segment betting rounds omit this;
    /// untagged actions are treated as preflop
    #[serde(default)]
    pub street: Option<Street>,
}

#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
pub struct Showdown {
    #[serde(default)]
    pub winners: Vec<String>,
    #[serde(default)]
    pub revealed: Vec<RevealedHand>,
}

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct RevealedHand {
    pub player: String,
    pub cards: Vec<Card>,
}

impl HandRecord {
    pub fn player(&self, name: &str) -> Option<&PlayerEntry> {
        self.players.iter().find(|p| p.name == name)
    }
    /// board cards visible on a given street
    pub fn board_at(&self, street: Street) -> &[Card] {
        let n = street.n_observed().min(self.board.len());
        &self.board[..n]
    }
    /// the street an action belongs to, defaulting untagged actions to preflop
    pub fn street_of(&self, action: &ActionEntry) -> Street {
        action.street.unwrap_or(Street::Pref)
    }
    pub fn revealed_cards(&self, name: &str) -> Option<&[Card]> {
        self.showdown
            .revealed
            .iter()
            .find(|r| r.player == name)
            .map(|r| r.cards.as_slice())
    }
}
