use super::card::Card;
use super::rank::Rank;
use super::suit::Suit;

/// an unordered set of Cards stored as a u64 bitset.
/// only the 52 LSBs are in play; each bit is one unique card.
#[derive(Debug, Default, Clone, Copy, Hash, PartialEq, Eq)]
pub struct Hand(u64);

impl Hand {
    pub fn empty() -> Self {
        Self(0)
    }
    pub fn size(&self) -> usize {
        self.0.count_ones() as usize
    }
    pub fn contains(&self, card: Card) -> bool {
        self.0 & (1u64 << u8::from(card)) != 0
    }
    pub fn insert(&mut self, card: Card) {
        self.0 |= 1u64 << u8::from(card);
    }
    /// the subset of this hand with the given suit.
    /// card bit index is suit + rank * 4, so a suit occupies every 4th bit.
    pub fn of(&self, suit: &Suit) -> Self {
        let mask = 0x1111111111111u64 << u8::from(*suit);
        Self(self.0 & mask)
    }
    /// 13-bit rank occupancy, bit i set iff some card of Rank::from(i) is present
    pub fn ranks(&self) -> u16 {
        (0..52u8)
            .filter(|i| self.0 & (1u64 << i) != 0)
            .fold(0u16, |m, i| m | (1u16 << (i / 4)))
    }
    /// how many cards of the given rank are present. not named `count`:
    /// the Iterator impl below would shadow that on a by-value receiver.
    pub fn n_of(&self, rank: Rank) -> usize {
        (0..4u8)
            .filter(|s| self.contains(Card::from((rank, Suit::from(*s)))))
            .count()
    }
}

impl FromIterator<Card> for Hand {
    fn from_iter<T: IntoIterator<Item = Card>>(iter: T) -> Self {
        iter.into_iter().fold(Self::empty(), |mut h, c| {
            h.insert(c);
            h
        })
    }
}

/// drain from low card to high card
impl Iterator for Hand {
    type Item = Card;
    fn next(&mut self) -> Option<Self::Item> {
        if self.0 == 0 {
            None
        } else {
            let card = self.0.trailing_zeros() as u8;
            self.0 &= self.0 - 1;
            Some(Card::from(card))
        }
    }
}

impl std::fmt::Display for Hand {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        for card in *self {
            write!(f, "{}", card)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hand(cards: &[&str]) -> Hand {
        cards.iter().map(|s| Card::try_from(*s).unwrap()).collect()
    }

    #[test]
    fn suit_filter() {
        let h = hand(&["Kh", "9h", "4c", "Ah"]);
        assert_eq!(h.of(&Suit::Heart).size(), 3);
        assert_eq!(h.of(&Suit::Club).size(), 1);
        assert_eq!(h.of(&Suit::Spade).size(), 0);
    }

    #[test]
    fn rank_occupancy() {
        let h = hand(&["Kh", "Kc", "2d"]);
        assert_eq!(h.ranks().count_ones(), 2);
        assert_eq!(h.n_of(Rank::King), 2);
        assert_eq!(h.n_of(Rank::Two), 1);
        assert_eq!(h.n_of(Rank::Ace), 0);
    }

    /// Iterator::count must stay reachable alongside the rank counter
    #[test]
    fn drains_low_to_high() {
        let h = hand(&["Kh", "2d", "9c"]);
        assert_eq!(h.count(), 3);
        let first = hand(&["Kh", "2d", "9c"]).next().unwrap();
        assert_eq!(first.rank(), Rank::Two);
    }
}
