use super::decision::Actor;
use super::decision::Aggressor;
use super::decision::DecisionPoint;
use super::decision::Position;
use super::decision::SeqToken;
use super::texture::Texture;
use crate::Cancel;
use crate::cards::Card;
use crate::cards::Draws;
use crate::cards::Hand;
use crate::cards::Ranking;
use crate::cards::Street;
use crate::hands::record::ActionEntry;
use crate::hands::record::HandRecord;

/// what happened to a batch: hands in, points out, hands dropped, and why.
/// extraction never aborts a batch on a single bad hand.
#[derive(Debug, Default)]
pub struct ExtractReport {
    pub hands: usize,
    pub succeeded: usize,
    pub skipped: usize,
    pub errors: Vec<String>,
    pub by_street: [usize; 4],
}

/// turns canonical hand records into the villain's decision points.
/// output order is deterministic: by hand, by street, by action index.
#[derive(Debug, Default)]
pub struct Extractor;

impl Extractor {
    pub fn extract_all(
        &self,
        records: &[HandRecord],
        cancel: &Cancel,
    ) -> (Vec<DecisionPoint>, ExtractReport) {
        let mut report = ExtractReport::default();
        let mut points = Vec::new();
        for record in records {
            if cancel.cancelled() {
                log::warn!("{:<32}{:<32}", "extraction cancelled at", record.hand_id);
                break;
            }
            report.hands += 1;
            match self.extract_hand(record) {
                Ok(mut extracted) => {
                    for point in extracted.iter() {
                        report.by_street[point.street.index()] += 1;
                    }
                    report.succeeded += extracted.len();
                    points.append(&mut extracted);
                }
                Err(e) => {
                    report.skipped += 1;
                    report.errors.push(format!("{}: {}", record.hand_id, e));
                }
            }
        }
        log::info!("{:<32}{:<32}", "hands processed", report.hands);
        log::info!("{:<32}{:<32}", "decision points", report.succeeded);
        log::info!("{:<32}{:<32}", "hands skipped", report.skipped);
        for street in Street::all() {
            log::debug!(
                "{:<32}{:<32}",
                format!("decisions on {}", street),
                report.by_street[street.index()]
            );
        }
        (points, report)
    }

    /// every genuine villain decision in one hand, in street order.
    /// fails on malformed records: the caller counts and moves on.
    pub fn extract_hand(&self, record: &HandRecord) -> crate::Result<Vec<DecisionPoint>> {
        if record.bb <= 0.0 {
            return Err(crate::Error::Input("non-positive big blind".to_string()));
        }
        if record.players.len() != 2 {
            return Err(crate::Error::Input(format!(
                "expected 2 players, found {}",
                record.players.len()
            )));
        }
        let hero = record
            .player(&record.hero)
            .ok_or_else(|| crate::Error::Input(format!("hero {} not seated", record.hero)))?;
        let villain = record
            .player(&record.villain)
            .ok_or_else(|| crate::Error::Input(format!("villain {} not seated", record.villain)))?;
        let eff_stack_bb = hero.stack.min(villain.stack) / record.bb;
        let hero_btn = hero.is_button;
        let villain_btn = villain.is_button;
        let reached_showdown = !record.showdown.revealed.is_empty();
        let villain_won = reached_showdown
            .then(|| record.showdown.winners.iter().any(|w| *w == record.villain));
        let villain_hole = record
            .revealed_cards(&record.villain)
            .filter(|_| reached_showdown)
            .map(|cards| cards.to_vec());

        let mut points = Vec::new();
        for street in Street::all().iter().copied() {
            let mut decision_idx = 0;
            for (step, action) in record
                .actions
                .iter()
                .enumerate()
                .filter(|(_, a)| record.street_of(a) == street)
            {
                if action.player != record.villain || !action.kind.is_decision() {
                    continue;
                }
                points.push(self.decision(
                    record,
                    street,
                    step,
                    decision_idx,
                    action,
                    eff_stack_bb,
                    hero_btn,
                    villain_btn,
                    reached_showdown,
                    villain_won,
                    villain_hole.as_deref(),
                )?);
                decision_idx += 1;
            }
        }
        Ok(points)
    }

    #[allow(clippy::too_many_arguments)]
    fn decision(
        &self,
        record: &HandRecord,
        street: Street,
        step: usize,
        decision_idx: usize,
        action: &ActionEntry,
        eff_stack_bb: f32,
        hero_btn: bool,
        villain_btn: bool,
        reached_showdown: bool,
        villain_won: Option<bool>,
        villain_hole: Option<&[Card]>,
    ) -> crate::Result<DecisionPoint> {
        let bb = record.bb;
        let prior = &record.actions[..step];
        // everything contributed before this action, forced bets included
        let pot_bb = prior.iter().map(|a| a.amount).sum::<f32>() / bb;
        let spr = (pot_bb > 0.0).then(|| eff_stack_bb / pot_bb);
        let preflop_sequence = self.sequence(record, prior, Street::Pref);
        let current_sequence = self.sequence(record, prior, street);
        let board = record.board_at(street).to_vec();
        let texture = Texture::from(board.as_slice());
        let villain_strength = villain_hole.map(|hole| {
            Ranking::from(hole.iter().chain(board.iter()).copied().collect::<Hand>())
        });
        let villain_draws = villain_hole.map(|hole| match street {
            Street::Flop | Street::Turn => Draws::detect(hole, &board),
            Street::Pref | Street::Rive => Draws::default(),
        });
        let amount_bb = action.amount / bb;
        Ok(DecisionPoint {
            decision_id: format!("{}_{}", record.hand_id, step),
            hand_id: record.hand_id.clone(),
            villain: record.villain.clone(),
            street,
            action_index_in_street: decision_idx,
            pot_bb,
            eff_stack_bb,
            spr,
            villain_position: Position::of(street, villain_btn),
            hero_position: Position::of(street, hero_btn),
            preflop_aggressor: self.aggressor(&preflop_sequence),
            current_aggressor: self.aggressor(&current_sequence),
            preflop_sequence,
            current_sequence,
            board,
            texture,
            villain_hole: villain_hole.map(|c| c.to_vec()),
            villain_strength,
            villain_draws,
            villain_action: action.kind,
            bet_size_bb: (amount_bb > 0.0).then_some(amount_bb),
            bet_size_pot_pct: (amount_bb > 0.0 && pot_bb > 0.0)
                .then(|| amount_bb / pot_bb * 100.0),
            reached_showdown,
            villain_won,
        })
    }

    /// the given street's slice of history, tokenized
    fn sequence(&self, record: &HandRecord, prior: &[ActionEntry], street: Street) -> Vec<SeqToken> {
        prior
            .iter()
            .filter(|a| record.street_of(a) == street)
            .map(|a| SeqToken {
                actor: if a.player == record.hero {
                    Actor::Hero
                } else if a.player == record.villain {
                    Actor::Villain
                } else {
                    Actor::Other
                },
                kind: a.kind,
                amount_bb: (a.kind.is_aggressive() && a.amount > 0.0)
                    .then(|| (a.amount / record.bb).round() as u32),
            })
            .collect()
    }

    fn aggressor(&self, sequence: &[SeqToken]) -> Aggressor {
        sequence
            .iter()
            .filter(|t| t.kind.is_aggressive())
            .filter_map(|t| match t.actor {
                Actor::Hero => Some(Aggressor::Hero),
                Actor::Villain => Some(Aggressor::Villain),
                Actor::Other => None,
            })
            .next_back()
            .unwrap_or(Aggressor::Nobody)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hands::ActionKind;
    use crate::hands::record::PlayerEntry;
    use crate::hands::record::RevealedHand;
    use crate::hands::record::Showdown;

    fn entry(player: &str, kind: ActionKind, amount: f32, street: Street) -> ActionEntry {
        ActionEntry {
            player: player.to_string(),
            kind,
            amount,
            street: Some(street),
        }
    }

    pub fn fixture() -> HandRecord {
        HandRecord {
            hand_id: "h42".to_string(),
            source: Some(crate::hands::HandFormat::TxtPokerstars),
            hero: "hero".to_string(),
            villain: "fish".to_string(),
            sb: 10.0,
            bb: 20.0,
            ante: 0.0,
            players: vec![
                PlayerEntry {
                    name: "hero".to_string(),
                    seat: 0,
                    stack: 500.0,
                    is_button: true,
                },
                PlayerEntry {
                    name: "fish".to_string(),
                    seat: 1,
                    stack: 480.0,
                    is_button: false,
                },
            ],
            board: ["Kh", "9h", "4c", "2d", "7s"]
                .iter()
                .map(|s| Card::try_from(*s).unwrap())
                .collect(),
            actions: vec![
                entry("hero", ActionKind::Blind, 10.0, Street::Pref),
                entry("fish", ActionKind::Blind, 20.0, Street::Pref),
                entry("hero", ActionKind::Raise, 50.0, Street::Pref),
                entry("fish", ActionKind::Call, 40.0, Street::Pref),
                entry("fish", ActionKind::Check, 0.0, Street::Flop),
                entry("hero", ActionKind::Bet, 60.0, Street::Flop),
                entry("fish", ActionKind::Call, 60.0, Street::Flop),
                entry("fish", ActionKind::Check, 0.0, Street::Turn),
                entry("hero", ActionKind::Check, 0.0, Street::Turn),
                entry("fish", ActionKind::Bet, 120.0, Street::Rive),
                entry("hero", ActionKind::Fold, 0.0, Street::Rive),
            ],
            showdown: Showdown::default(),
        }
    }

    #[test]
    fn one_point_per_villain_decision() {
        let points = Extractor.extract_hand(&fixture()).unwrap();
        assert_eq!(points.len(), 5);
        let ids = points.iter().map(|p| p.decision_id.as_str()).collect::<Vec<_>>();
        assert_eq!(ids, vec!["h42_3", "h42_4", "h42_6", "h42_7", "h42_9"]);
    }

    #[test]
    fn pot_is_strictly_before_the_action() {
        let points = Extractor.extract_hand(&fixture()).unwrap();
        // preflop call: blinds + raise = 80 chips = 4bb
        assert_eq!(points[0].pot_bb, 4.0);
        // flop check: + the call = 120 chips = 6bb
        assert_eq!(points[1].pot_bb, 6.0);
        // river bet: + flop bet and call = 240 chips = 12bb
        assert_eq!(points[4].pot_bb, 12.0);
    }

    #[test]
    fn sequences_exclude_the_decision_itself() {
        let points = Extractor.extract_hand(&fixture()).unwrap();
        let flop_check = &points[1];
        assert_eq!(flop_check.current_sequence.len(), 0);
        assert_eq!(flop_check.preflop_sequence.len(), 4);
        let flop_call = &points[2];
        assert_eq!(flop_call.current_sequence.len(), 2);
        assert_eq!(
            flop_call.current_sequence[1].to_string(),
            "HERO_bet_3".to_string()
        );
    }

    #[test]
    fn positions_follow_the_button_across_streets() {
        let points = Extractor.extract_hand(&fixture()).unwrap();
        assert_eq!(points[0].villain_position, Position::Bb);
        assert_eq!(points[0].hero_position, Position::Btn);
        assert_eq!(points[1].villain_position, Position::Oop);
        assert_eq!(points[1].hero_position, Position::Ip);
    }

    #[test]
    fn aggressor_tracks_the_last_bet_or_raise() {
        let points = Extractor.extract_hand(&fixture()).unwrap();
        assert_eq!(points[0].current_aggressor, Aggressor::Hero);
        assert_eq!(points[1].current_aggressor, Aggressor::Nobody);
        assert_eq!(points[2].current_aggressor, Aggressor::Hero);
        assert_eq!(points[2].preflop_aggressor, Aggressor::Hero);
    }

    #[test]
    fn bet_sizing_defined_only_with_amount_and_pot() {
        let points = Extractor.extract_hand(&fixture()).unwrap();
        let river_bet = &points[4];
        assert_eq!(river_bet.bet_size_bb, Some(6.0));
        assert_eq!(river_bet.bet_size_pot_pct, Some(50.0));
        let flop_check = &points[1];
        assert_eq!(flop_check.bet_size_bb, None);
        assert_eq!(flop_check.bet_size_pot_pct, None);
    }

    #[test]
    fn effective_stack_and_spr() {
        let points = Extractor.extract_hand(&fixture()).unwrap();
        assert_eq!(points[0].eff_stack_bb, 24.0);
        assert_eq!(points[0].spr, Some(6.0));
    }

    #[test]
    fn no_showdown_means_no_villain_cards() {
        let points = Extractor.extract_hand(&fixture()).unwrap();
        assert!(points.iter().all(|p| p.villain_hole.is_none()));
        assert!(points.iter().all(|p| p.villain_strength.is_none()));
        assert!(points.iter().all(|p| p.villain_won.is_none()));
        assert!(!points[0].reached_showdown);
    }

    #[test]
    fn showdown_reveals_strength_and_draws() {
        let mut record = fixture();
        record.showdown = Showdown {
            winners: vec!["fish".to_string()],
            revealed: vec![RevealedHand {
                player: "fish".to_string(),
                cards: ["Ah", "Qh"]
                    .iter()
                    .map(|s| Card::try_from(*s).unwrap())
                    .collect(),
            }],
        };
        let points = Extractor.extract_hand(&record).unwrap();
        let flop = &points[1];
        assert_eq!(flop.villain_strength, Some(Ranking::HighCard));
        assert!(flop.villain_draws.unwrap().flush_draw);
        assert_eq!(flop.villain_won, Some(true));
        assert!(flop.reached_showdown);
    }

    #[test]
    fn bad_hands_are_skipped_and_counted() {
        let mut broken = fixture();
        broken.bb = 0.0;
        broken.hand_id = "busted".to_string();
        let records = vec![fixture(), broken, fixture()];
        let (points, report) = Extractor.extract_all(&records, &Cancel::new());
        assert_eq!(report.hands, 3);
        assert_eq!(report.skipped, 1);
        assert_eq!(report.succeeded, 10);
        assert_eq!(points.len(), 10);
        assert!(report.errors[0].starts_with("busted"));
    }

    #[test]
    fn cancellation_stops_between_hands() {
        let cancel = Cancel::new();
        cancel.cancel();
        let (points, report) = Extractor.extract_all(&[fixture()], &cancel);
        assert_eq!(points.len(), 0);
        assert_eq!(report.hands, 0);
    }
}
