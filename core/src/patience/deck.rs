use alloc::vec::Vec;
use rand::Rng;
use rand::seq::SliceRandom;

use crate::*;

/// Builds `decks` standard decks back to back, all face down with fresh ids, then
/// shuffles them with Fisher-Yates.
pub fn new_deck<R: Rng + ?Sized>(decks: u8, rng: &mut R) -> Vec<Card> {
    let mut deck = Vec::with_capacity(usize::from(decks) * DECK_SIZE);
    let mut next_id = 0;

    for _ in 0..decks {
        for suit in Suit::ALL {
            for rank in ACE..=KING {
                deck.push(Card::new(CardId(next_id), suit, rank, false));
                next_id += 1;
            }
        }
    }

    deck.shuffle(rng);
    deck
}

/// Deals `deck` in order into columns of the given heights, turning the last card of
/// each column face up. Returns the columns and the undealt remainder as stock.
pub fn deal(deck: Vec<Card>, column_heights: &[usize]) -> (Vec<Vec<Card>>, Vec<Card>) {
    let mut draw = deck.into_iter();

    let columns = column_heights
        .iter()
        .map(|&height| {
            let mut column: Vec<Card> = draw.by_ref().take(height).collect();
            if let Some(top) = column.last_mut() {
                top.face_up = true;
            }
            column
        })
        .collect();

    let stock = draw
        .map(|mut card| {
            card.face_up = false;
            card
        })
        .collect();

    (columns, stock)
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::collections::{BTreeMap, BTreeSet};
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    #[test]
    fn deck_holds_two_of_every_card() {
        let mut rng = SmallRng::seed_from_u64(9);
        let deck = new_deck(DECK_COUNT, &mut rng);

        assert_eq!(deck.len(), 104);

        let mut copies = BTreeMap::new();
        for card in &deck {
            *copies.entry((card.suit, card.rank)).or_insert(0) += 1;
            assert!(!card.face_up);
        }
        assert_eq!(copies.len(), 52);
        assert!(copies.values().all(|&count| count == 2));

        let ids: BTreeSet<_> = deck.iter().map(|card| card.id).collect();
        assert_eq!(ids.len(), 104);
    }

    #[test]
    fn shuffle_permutes_the_deck() {
        let mut rng = SmallRng::seed_from_u64(1);
        let deck = new_deck(DECK_COUNT, &mut rng);

        let in_order = deck
            .iter()
            .enumerate()
            .all(|(index, card)| usize::from(card.id.0) == index);
        assert!(!in_order);

        let mut ids: Vec<_> = deck.iter().map(|card| card.id.0).collect();
        ids.sort_unstable();
        assert!(ids.into_iter().eq(0..104));
    }

    #[test]
    fn same_seed_same_order() {
        let first = new_deck(DECK_COUNT, &mut SmallRng::seed_from_u64(5));
        let second = new_deck(DECK_COUNT, &mut SmallRng::seed_from_u64(5));
        let other = new_deck(DECK_COUNT, &mut SmallRng::seed_from_u64(6));

        assert_eq!(first, second);
        assert_ne!(first, other);
    }

    #[test]
    fn deal_follows_column_heights() {
        let deck = new_deck(DECK_COUNT, &mut SmallRng::seed_from_u64(3));
        let expected_first = deck[0];

        let (columns, stock) = deal(deck, &SPIDER_DEAL);

        let heights: Vec<_> = columns.iter().map(Vec::len).collect();
        assert_eq!(heights, SPIDER_DEAL);
        assert_eq!(columns[0][0].id, expected_first.id);
        assert_eq!(stock.len(), 50);

        for column in &columns {
            let (top, rest) = column.split_last().unwrap();
            assert!(top.face_up);
            assert!(rest.iter().all(|card| !card.face_up));
        }
        assert!(stock.iter().all(|card| !card.face_up));
    }
}
