use crate::cards::Card;

/// strategic descriptors of the visible board. a closed set of named
/// predicates: flops with no board default every flag to false.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Texture {
    pub monotone: bool,
    pub two_tone: bool,
    pub rainbow: bool,
    pub paired: bool,
    pub trips: bool,
    pub connected: bool,
    pub disconnected: bool,
    pub high_broadway: bool,
    pub low: bool,
    pub wet: bool,
}

impl Texture {
    /// fixed flag order backing the 10-wide multi-hot segment
    pub fn flags(&self) -> [bool; 10] {
        [
            self.monotone,
            self.two_tone,
            self.rainbow,
            self.paired,
            self.trips,
            self.connected,
            self.disconnected,
            self.high_broadway,
            self.low,
            self.wet,
        ]
    }
}

impl From<&[Card]> for Texture {
    fn from(board: &[Card]) -> Self {
        if board.len() < 3 {
            return Self::default();
        }
        let suits = board
            .iter()
            .map(|c| c.suit())
            .collect::<std::collections::BTreeSet<_>>()
            .len();
        let mut values = board.iter().map(|c| c.rank().value()).collect::<Vec<_>>();
        values.sort_unstable();
        let distinct = {
            let mut v = values.clone();
            v.dedup();
            v
        };
        let monotone = suits == 1;
        let two_tone = suits == 2;
        let rainbow = suits == board.len();
        let paired = distinct.len() < values.len();
        let trips = distinct
            .iter()
            .any(|r| values.iter().filter(|v| *v == r).count() >= 3);
        // within two pips of a neighbor keeps straights live;
        // four or more everywhere kills them
        let connected = distinct.windows(2).any(|w| w[1] - w[0] <= 2);
        let disconnected = distinct.len() >= 2 && distinct.windows(2).all(|w| w[1] - w[0] >= 4);
        let high_broadway = values.iter().filter(|v| **v >= 10).count() >= 2;
        let low = values.iter().all(|v| *v <= 9);
        let wet = monotone || (two_tone && connected);
        Self {
            monotone,
            two_tone,
            rainbow,
            paired,
            trips,
            connected,
            disconnected,
            high_broadway,
            low,
            wet,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board(strs: &[&str]) -> Vec<Card> {
        strs.iter().map(|s| Card::try_from(*s).unwrap()).collect()
    }

    #[test]
    fn preflop_board_is_all_false() {
        assert_eq!(Texture::from(&board(&[])[..]), Texture::default());
    }

    #[test]
    fn monotone_flop() {
        let t = Texture::from(&board(&["Kh", "9h", "4h"])[..]);
        assert!(t.monotone && t.wet);
        assert!(!t.two_tone && !t.rainbow);
    }

    #[test]
    fn rainbow_dry() {
        let t = Texture::from(&board(&["Kh", "8c", "2d"])[..]);
        assert!(t.rainbow);
        assert!(!t.connected);
        assert!(!t.wet);
    }

    #[test]
    fn paired_and_trips() {
        assert!(Texture::from(&board(&["Kh", "Kc", "2d"])[..]).paired);
        let t = Texture::from(&board(&["Kh", "Kc", "Kd"])[..]);
        assert!(t.paired && t.trips);
    }

    #[test]
    fn connected_two_tone_is_wet() {
        let t = Texture::from(&board(&["9h", "8h", "2c"])[..]);
        assert!(t.two_tone && t.connected && t.wet);
    }

    #[test]
    fn broadway_versus_low() {
        assert!(Texture::from(&board(&["Ah", "Kc", "2d"])[..]).high_broadway);
        assert!(Texture::from(&board(&["9h", "5c", "2d"])[..]).low);
    }
}
