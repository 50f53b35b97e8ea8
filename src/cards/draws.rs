use super::card::Card;
use super::hand::Hand;
use super::suit::Suit;

/// the draw flags a villain can hold when their cards are known at showdown.
/// all false when no draw is present; the whole struct is absent upstream
/// when the villain's cards never became visible.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Draws {
    pub flush_draw: bool,
    pub oesd: bool,
    pub gutshot: bool,
    pub combo_draw: bool,
}

impl Draws {
    /// detect draws for a known two-card holding against a visible board.
    /// a draw must use at least one hole card; made hands still count as
    /// holding the draw (the encoder treats strength separately).
    pub fn detect(hole: &[Card], board: &[Card]) -> Self {
        let hole_hand = hole.iter().copied().collect::<Hand>();
        let full = hole.iter().chain(board.iter()).copied().collect::<Hand>();
        let flush_draw = Suit::all()
            .iter()
            .any(|s| full.of(s).size() == 4 && hole_hand.of(s).size() >= 1);
        let outs = straight_outs(full.ranks(), hole_hand.ranks());
        let oesd = outs >= 2;
        let gutshot = outs == 1;
        let combo_draw = flush_draw && (oesd || gutshot);
        Self {
            flush_draw,
            oesd,
            gutshot,
            combo_draw,
        }
    }
}

/// count distinct absent ranks whose arrival completes a five-high run
/// that uses at least one hole rank. two or more completing ranks is the
/// open-ender; exactly one is the gutshot.
fn straight_outs(ranks: u16, hole: u16) -> usize {
    // ace plays low: mirror bit 12 below bit 0 by working in 14-bit space
    let wide = |r: u16| ((r as u32) << 1) | ((r as u32) >> 12 & 1);
    let present = wide(ranks);
    let wanted = wide(hole);
    (0..14u32)
        .filter(|out| present & (1 << out) == 0)
        .filter(|out| {
            let filled = present | (1 << out);
            (0..10u32).any(|lo| {
                let window = 0b11111u32 << lo;
                filled & window == window
                    && window & (1 << out) != 0
                    && window & wanted != 0
            })
        })
        .count()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cards(strs: &[&str]) -> Vec<Card> {
        strs.iter().map(|s| Card::try_from(*s).unwrap()).collect()
    }

    #[test]
    fn flush_draw_needs_a_hole_card() {
        let d = Draws::detect(&cards(&["Ah", "Qh"]), &cards(&["Kh", "9h", "4c"]));
        assert!(d.flush_draw);
        let d = Draws::detect(&cards(&["As", "Qd"]), &cards(&["Kh", "9h", "4h"]));
        assert!(!d.flush_draw);
    }

    #[test]
    fn open_ended() {
        let d = Draws::detect(&cards(&["9s", "8d"]), &cards(&["7h", "6c", "2h"]));
        assert!(d.oesd);
        assert!(!d.gutshot);
    }

    #[test]
    fn gutshot() {
        let d = Draws::detect(&cards(&["9s", "8d"]), &cards(&["6h", "5c", "Kh"]));
        assert!(d.gutshot);
        assert!(!d.oesd);
    }

    #[test]
    fn combo() {
        let d = Draws::detect(&cards(&["9h", "8h"]), &cards(&["7h", "6c", "2h"]));
        assert!(d.flush_draw && d.oesd && d.combo_draw);
    }

    #[test]
    fn dry() {
        let d = Draws::detect(&cards(&["Ah", "Kd"]), &cards(&["9s", "5c", "2h"]));
        assert_eq!(d, Draws::default());
    }
}
