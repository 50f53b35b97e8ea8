use super::hand::Hand;
use super::rank::Rank;
use super::suit::Suit;

const WHEEL: u16 = 0b_1000000001111;

/// the nine canonical hand-rank categories, low to high.
/// kickers are irrelevant here: downstream encodings one-hot the category.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Ranking {
    HighCard = 0,
    OnePair = 1,
    TwoPair = 2,
    ThreeOfAKind = 3,
    Straight = 4,
    Flush = 5,
    FullHouse = 6,
    FourOfAKind = 7,
    StraightFlush = 8,
}

impl Ranking {
    pub const fn index(&self) -> usize {
        *self as usize
    }
}

/// category-only evaluation over a 5..=7 card Hand,
/// searching from the top of the ladder down.
impl From<Hand> for Ranking {
    fn from(hand: Hand) -> Self {
        None.or_else(|| find_straight_flush(hand))
            .or_else(|| find_4_oak(hand))
            .or_else(|| find_3_oak_2_oak(hand))
            .or_else(|| find_flush(hand))
            .or_else(|| find_straight(hand))
            .or_else(|| find_3_oak(hand))
            .or_else(|| find_2_oak_2_oak(hand))
            .or_else(|| find_2_oak(hand))
            .unwrap_or(Ranking::HighCard)
    }
}

fn find_straight_flush(hand: Hand) -> Option<Ranking> {
    Suit::all()
        .iter()
        .map(|s| hand.of(s).ranks())
        .any(|ranks| has_straight(ranks))
        .then_some(Ranking::StraightFlush)
}
fn find_4_oak(hand: Hand) -> Option<Ranking> {
    (n_of_count(hand, 4) >= 1).then_some(Ranking::FourOfAKind)
}
fn find_3_oak_2_oak(hand: Hand) -> Option<Ranking> {
    let trips = n_of_count(hand, 3);
    let pairs = n_of_count(hand, 2);
    (trips >= 2 || (trips >= 1 && pairs >= 1)).then_some(Ranking::FullHouse)
}
fn find_flush(hand: Hand) -> Option<Ranking> {
    Suit::all()
        .iter()
        .any(|s| hand.of(s).size() >= 5)
        .then_some(Ranking::Flush)
}
fn find_straight(hand: Hand) -> Option<Ranking> {
    has_straight(hand.ranks()).then_some(Ranking::Straight)
}
fn find_3_oak(hand: Hand) -> Option<Ranking> {
    (n_of_count(hand, 3) >= 1).then_some(Ranking::ThreeOfAKind)
}
fn find_2_oak_2_oak(hand: Hand) -> Option<Ranking> {
    (n_of_count(hand, 2) >= 2).then_some(Ranking::TwoPair)
}
fn find_2_oak(hand: Hand) -> Option<Ranking> {
    (n_of_count(hand, 2) >= 1).then_some(Ranking::OnePair)
}

/// how many distinct ranks appear exactly n times
fn n_of_count(hand: Hand, n: usize) -> usize {
    (0..13u8)
        .map(Rank::from)
        .filter(|r| hand.n_of(*r) == n)
        .count()
}

/// five consecutive rank bits, the wheel included
fn has_straight(ranks: u16) -> bool {
    if ranks & WHEEL == WHEEL {
        return true;
    }
    let mut bits = ranks;
    bits &= bits << 1;
    bits &= bits << 1;
    bits &= bits << 1;
    bits &= bits << 1;
    bits != 0
}

#[cfg(test)]
mod tests {
    use super::*;
    use super::super::card::Card;

    fn hand(cards: &[&str]) -> Hand {
        cards.iter().map(|s| Card::try_from(*s).unwrap()).collect()
    }

    #[test]
    fn ladder() {
        assert_eq!(
            Ranking::from(hand(&["Ah", "Kd", "9c", "5s", "2h"])),
            Ranking::HighCard
        );
        assert_eq!(
            Ranking::from(hand(&["Ah", "Ad", "9c", "5s", "2h"])),
            Ranking::OnePair
        );
        assert_eq!(
            Ranking::from(hand(&["Ah", "Ad", "9c", "9s", "2h"])),
            Ranking::TwoPair
        );
        assert_eq!(
            Ranking::from(hand(&["Ah", "Ad", "Ac", "9s", "2h"])),
            Ranking::ThreeOfAKind
        );
        assert_eq!(
            Ranking::from(hand(&["6h", "5d", "4c", "3s", "2h"])),
            Ranking::Straight
        );
        assert_eq!(
            Ranking::from(hand(&["Ah", "Jh", "9h", "5h", "2h"])),
            Ranking::Flush
        );
        assert_eq!(
            Ranking::from(hand(&["Ah", "Ad", "Ac", "9s", "9h"])),
            Ranking::FullHouse
        );
        assert_eq!(
            Ranking::from(hand(&["Ah", "Ad", "Ac", "As", "9h"])),
            Ranking::FourOfAKind
        );
        assert_eq!(
            Ranking::from(hand(&["6h", "5h", "4h", "3h", "2h"])),
            Ranking::StraightFlush
        );
    }

    #[test]
    fn wheel_counts() {
        assert_eq!(
            Ranking::from(hand(&["Ah", "2d", "3c", "4s", "5h"])),
            Ranking::Straight
        );
    }

    #[test]
    fn seven_card_board() {
        // pair on board plus flush in hand
        assert_eq!(
            Ranking::from(hand(&["Ah", "Jh", "9h", "5h", "2h", "2d", "Kc"])),
            Ranking::Flush
        );
    }
}
