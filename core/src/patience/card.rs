use alloc::format;
use alloc::string::String;
use serde::{Deserialize, Serialize};

/// Card rank, `ACE` (1) through `KING` (13).
pub type Rank = u8;

pub const ACE: Rank = 1;
pub const KING: Rank = 13;

#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Suit {
    Spades,
    Hearts,
    Diamonds,
    Clubs,
}

impl Suit {
    pub const ALL: [Suit; 4] = [Suit::Spades, Suit::Hearts, Suit::Diamonds, Suit::Clubs];

    pub const fn index(self) -> usize {
        match self {
            Self::Spades => 0,
            Self::Hearts => 1,
            Self::Diamonds => 2,
            Self::Clubs => 3,
        }
    }

    pub const fn symbol(self) -> char {
        match self {
            Self::Spades => '♠',
            Self::Hearts => '♥',
            Self::Diamonds => '♦',
            Self::Clubs => '♣',
        }
    }
}

/// Stable identity of a physical card. The two merged decks repeat every
/// suit and rank, so cards are told apart by id, never by face value.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CardId(pub u16);

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    pub id: CardId,
    pub suit: Suit,
    pub rank: Rank,
    pub face_up: bool,
}

impl Card {
    pub const fn new(id: CardId, suit: Suit, rank: Rank, face_up: bool) -> Self {
        Self {
            id,
            suit,
            rank,
            face_up,
        }
    }

    /// Whether `self` may sit directly on `below` inside a run.
    pub fn continues_run(self, below: Card) -> bool {
        self.face_up && below.face_up && self.suit == below.suit && self.rank + 1 == below.rank
    }

    pub fn label(&self) -> String {
        let rank = match self.rank {
            ACE => "A",
            11 => "J",
            12 => "Q",
            KING => "K",
            _ => return format!("{}{}", self.rank, self.suit.symbol()),
        };
        format!("{rank}{}", self.suit.symbol())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_use_court_letters() {
        let card = |rank| Card::new(CardId(0), Suit::Hearts, rank, true);

        assert_eq!(card(ACE).label(), "A♥");
        assert_eq!(card(7).label(), "7♥");
        assert_eq!(card(10).label(), "10♥");
        assert_eq!(card(12).label(), "Q♥");
        assert_eq!(card(KING).label(), "K♥");
    }

    #[test]
    fn run_continuation_needs_same_suit_one_lower() {
        let nine = Card::new(CardId(0), Suit::Spades, 9, true);
        let eight = Card::new(CardId(1), Suit::Spades, 8, true);
        let red_eight = Card::new(CardId(2), Suit::Hearts, 8, true);
        let hidden_eight = Card::new(CardId(3), Suit::Spades, 8, false);

        assert!(eight.continues_run(nine));
        assert!(!red_eight.continues_run(nine));
        assert!(!nine.continues_run(eight));
        assert!(!hidden_eight.continues_run(nine));
    }

    #[test]
    fn suit_indices_match_all_order() {
        for (index, suit) in Suit::ALL.into_iter().enumerate() {
            assert_eq!(suit.index(), index);
        }
    }
}
