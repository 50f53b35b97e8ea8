use super::category::Category;
use crate::extract::Actor;
use crate::extract::DecisionPoint;
use crate::extract::SeqToken;

/// the index dimensionality contract (99). every vector ever added to a
/// partition has exactly this length.
pub const TOTAL_DIMENSIONS: usize = Category::total();

/// deterministic context-to-vector encoding. every category rule uses
/// fixed constants, so encoding is a pure function of the decision point.
#[derive(Debug, Clone, Copy, Default)]
pub struct Encoder;

impl Encoder {
    pub const fn dimensions(&self) -> usize {
        TOTAL_DIMENSIONS
    }

    /// no-op hook for data-dependent normalization. none of the category
    /// rules learn anything from data today; the hook stays so a fitted
    /// scaler can slot in without changing the pipeline shape. idempotent
    /// and side-effect-free on the encoder's output.
    pub fn fit(&mut self, _points: &[DecisionPoint]) {}

    /// pure: writes each category's slice independently at its fixed offset
    pub fn encode(&self, dp: &DecisionPoint) -> Vec<f32> {
        let mut v = vec![0.0f32; TOTAL_DIMENSIONS];
        self.write_street(&mut v, dp);
        self.write_position(&mut v, dp);
        self.write_texture(&mut v, dp);
        self.write_spr(&mut v, dp);
        self.write_action_sequence(&mut v, dp);
        self.write_aggressor(&mut v, dp);
        self.write_pot_size(&mut v, dp);
        self.write_stack_size(&mut v, dp);
        self.write_draws(&mut v, dp);
        self.write_board_cards(&mut v, dp);
        self.write_hand_strength(&mut v, dp);
        self.write_previous_hero_action(&mut v, dp);
        self.write_bet_sizing(&mut v, dp);
        self.write_action_count(&mut v, dp);
        v
    }

    /// item-wise encode, input order preserved
    pub fn encode_batch(&self, points: &[DecisionPoint]) -> Vec<Vec<f32>> {
        points.iter().map(|dp| self.encode(dp)).collect()
    }

    fn write_street(&self, v: &mut [f32], dp: &DecisionPoint) {
        v[Category::Street.offset() + dp.street.index()] = 1.0;
    }
    fn write_position(&self, v: &mut [f32], dp: &DecisionPoint) {
        v[Category::Position.offset() + dp.villain_position.index()] = 1.0;
    }
    fn write_texture(&self, v: &mut [f32], dp: &DecisionPoint) {
        let offset = Category::BoardTexture.offset();
        for (i, flag) in dp.texture.flags().iter().enumerate() {
            if *flag {
                v[offset + i] = 1.0;
            }
        }
    }
    fn write_spr(&self, v: &mut [f32], dp: &DecisionPoint) {
        let bucket = match dp.spr {
            None => 0,
            Some(spr) if spr < 2.0 => 1,
            Some(spr) if spr < 5.0 => 2,
            Some(spr) if spr < 10.0 => 3,
            Some(_) => 4,
        };
        v[Category::Spr.offset() + bucket] = 1.0;
    }
    /// lossy by design: the last 5 tokens hash into 30 slots and distinct
    /// sequences may collide. downstream similarity depends on this exact
    /// collision behavior, so the formula and the `slot` table (with its
    /// all-in-at-11 legacy position) are frozen.
    fn write_action_sequence(&self, v: &mut [f32], dp: &DecisionPoint) {
        let offset = Category::ActionSequence.offset();
        let start = dp.current_sequence.len().saturating_sub(5);
        for (i, token) in dp.current_sequence[start..].iter().enumerate() {
            if token.kind.is_decision() {
                let slot = (i * 6 + token.kind.slot()) % 30;
                v[offset + slot] = 1.0;
            }
        }
    }
    fn write_aggressor(&self, v: &mut [f32], dp: &DecisionPoint) {
        v[Category::Aggressor.offset() + dp.current_aggressor.index()] = 1.0;
    }
    fn write_pot_size(&self, v: &mut [f32], dp: &DecisionPoint) {
        v[Category::PotSize.offset()] = dp.pot_bb.ln_1p() / 10.0;
    }
    fn write_stack_size(&self, v: &mut [f32], dp: &DecisionPoint) {
        v[Category::StackSize.offset()] = dp.eff_stack_bb / 100.0;
    }
    fn write_draws(&self, v: &mut [f32], dp: &DecisionPoint) {
        let offset = Category::Draws.offset();
        if let Some(draws) = dp.villain_draws {
            for (i, flag) in [draws.flush_draw, draws.oesd, draws.gutshot, draws.combo_draw]
                .iter()
                .enumerate()
            {
                if *flag {
                    v[offset + i] = 1.0;
                }
            }
        }
    }
    /// first 3 board cards; rank as a normalized pip value, suit as 3
    /// binary indicators with the 4th suit implied by all-zero
    fn write_board_cards(&self, v: &mut [f32], dp: &DecisionPoint) {
        let offset = Category::BoardCards.offset();
        for (i, card) in dp.board.iter().take(3).enumerate() {
            v[offset + i * 4] = card.rank().value() as f32 / 14.0;
            let suit = u8::from(card.suit()) as usize;
            if suit < 3 {
                v[offset + i * 4 + 1 + suit] = 1.0;
            }
        }
    }
    /// unknown strength is all-zero; there is no explicit unknown slot,
    /// unlike the spr buckets
    fn write_hand_strength(&self, v: &mut [f32], dp: &DecisionPoint) {
        if let Some(ranking) = dp.villain_strength {
            v[Category::HandStrength.offset() + ranking.index()] = 1.0;
        }
    }
    fn write_previous_hero_action(&self, v: &mut [f32], dp: &DecisionPoint) {
        let hero = dp
            .current_sequence
            .iter()
            .rev()
            .find(|t| matches!(t.actor, Actor::Hero));
        if let Some(SeqToken { kind, .. }) = hero {
            if kind.is_decision() {
                v[Category::PreviousHeroAction.offset() + kind.index()] = 1.0;
            }
        }
    }
    fn write_bet_sizing(&self, v: &mut [f32], dp: &DecisionPoint) {
        let bucket = match dp.bet_size_pot_pct {
            None => 0,
            Some(pct) if pct <= 33.0 => 1,
            Some(pct) if pct <= 50.0 => 2,
            Some(pct) if pct <= 75.0 => 3,
            Some(pct) if pct <= 100.0 => 4,
            Some(_) => 5,
        };
        v[Category::BetSizing.offset() + bucket] = 1.0;
    }
    fn write_action_count(&self, v: &mut [f32], dp: &DecisionPoint) {
        let offset = Category::ActionCount.offset();
        v[offset] = dp.current_sequence.len() as f32 / 10.0;
        v[offset + 1] = dp.action_index_in_street as f32 / 20.0;
    }

    /// weighted multi-category similarity: per-category cosine, with a
    /// category contributing nothing (numerator and denominator) whenever
    /// either side of it has zero norm. bitwise-equal segments score 1.0
    /// before any arithmetic, which keeps self-similarity exactly 1.0.
    pub fn similarity(&self, a: &[f32], b: &[f32]) -> crate::Result<f32> {
        for v in [a, b] {
            if v.len() != TOTAL_DIMENSIONS {
                return Err(crate::Error::DimensionMismatch {
                    expected: TOTAL_DIMENSIONS,
                    found: v.len(),
                });
            }
        }
        let mut score = 0.0f32;
        let mut weights = 0.0f32;
        for category in Category::all() {
            let lo = category.offset();
            let hi = lo + category.width();
            let (sub_a, sub_b) = (&a[lo..hi], &b[lo..hi]);
            let norm_a = sub_a.iter().map(|x| x * x).sum::<f32>().sqrt();
            let norm_b = sub_b.iter().map(|x| x * x).sum::<f32>().sqrt();
            if norm_a > 0.0 && norm_b > 0.0 {
                let cosine = if sub_a == sub_b {
                    1.0
                } else {
                    sub_a.iter().zip(sub_b).map(|(x, y)| x * y).sum::<f32>() / (norm_a * norm_b)
                };
                score += cosine * category.weight();
                weights += category.weight();
            }
        }
        if weights > 0.0 {
            Ok(score / weights)
        } else {
            Ok(0.0)
        }
    }
}
