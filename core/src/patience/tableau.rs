use alloc::collections::BTreeSet;
use alloc::vec::Vec;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::*;

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum PatienceState {
    #[default]
    Playing,
    Won,
}

/// Completed runs retired so far, per suit.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Foundations {
    counts: [u8; 4],
}

impl Foundations {
    pub fn get(&self, suit: Suit) -> u8 {
        self.counts[suit.index()]
    }

    pub fn total(&self) -> usize {
        self.counts.iter().map(|&count| usize::from(count)).sum()
    }

    pub fn all_reached(&self, target: u8) -> bool {
        self.counts.iter().all(|&count| count == target)
    }

    fn increment(&mut self, suit: Suit) {
        self.counts[suit.index()] += 1;
    }
}

/// Length of the run starting at `start`: face-up cards, each the same suit and one
/// rank below the card before it. Zero when `start` is off the column or face down.
pub fn run_at(column: &[Card], start: usize) -> usize {
    let Some(first) = column.get(start) else {
        return 0;
    };
    if !first.face_up {
        return 0;
    }

    1 + column[start..]
        .windows(2)
        .take_while(|pair| pair[1].continues_run(pair[0]))
        .count()
}

/// Whether `card` may be placed on a column whose top card is `top`.
pub fn can_stack(top: Option<Card>, card: Card) -> bool {
    match top {
        None => true,
        Some(top) => top.face_up && top.suit == card.suit && card.rank + 1 == top.rank,
    }
}

/// Suit of the King-to-Ace run sitting on top of `column`, if there is one.
pub fn completed_run_suit(column: &[Card]) -> Option<Suit> {
    let start = column.len().checked_sub(RUN_LENGTH)?;
    let first = column[start];

    (first.rank == KING && run_at(column, start) == RUN_LENGTH).then_some(first.suit)
}

/// Spider tableau: the dealt columns, the undealt stock and the foundation counters.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tableau {
    columns: Vec<Vec<Card>>,
    stock: Vec<Card>,
    foundations: Foundations,
    runs_per_suit: u8,
    state: PatienceState,
}

impl Tableau {
    pub fn new(config: &PatienceConfig, seed: u64) -> Self {
        let mut rng = SmallRng::seed_from_u64(seed);
        Self::deal_with_rng(config, &mut rng)
    }

    pub fn deal_with_rng<R: Rng + ?Sized>(config: &PatienceConfig, rng: &mut R) -> Self {
        let deck = new_deck(config.decks(), rng);
        let (columns, stock) = deal(deck, config.column_heights());
        log::debug!(
            "Dealt {} columns, {} cards left in stock",
            columns.len(),
            stock.len()
        );

        Self {
            columns,
            stock,
            foundations: Foundations::default(),
            runs_per_suit: config.decks(),
            state: PatienceState::default(),
        }
    }

    /// Builds a tableau from hand-placed columns with an empty stock. Each column must
    /// keep its face-down cards below its face-up ones, and card ids must be unique.
    pub fn from_columns(columns: Vec<Vec<Card>>, runs_per_suit: u8) -> Result<Self> {
        if columns.is_empty() {
            return Err(GameError::InvalidColumn);
        }
        if runs_per_suit == 0 {
            return Err(GameError::InvalidTableau);
        }

        let mut ids = BTreeSet::new();
        for column in &columns {
            let face_down_after_face_up = column
                .windows(2)
                .any(|pair| pair[0].face_up && !pair[1].face_up);
            if face_down_after_face_up {
                return Err(GameError::InvalidTableau);
            }
            for card in column {
                if !(ACE..=KING).contains(&card.rank) || !ids.insert(card.id) {
                    return Err(GameError::InvalidTableau);
                }
            }
        }

        Ok(Self {
            columns,
            stock: Vec::new(),
            foundations: Foundations::default(),
            runs_per_suit,
            state: PatienceState::default(),
        })
    }

    pub fn state(&self) -> PatienceState {
        self.state
    }

    pub fn is_won(&self) -> bool {
        self.state == PatienceState::Won
    }

    pub fn columns(&self) -> &[Vec<Card>] {
        &self.columns
    }

    pub fn column(&self, column: usize) -> Option<&[Card]> {
        self.columns.get(column).map(Vec::as_slice)
    }

    pub fn card(&self, column: usize, index: usize) -> Option<Card> {
        self.columns.get(column)?.get(index).copied()
    }

    pub fn top_card(&self, column: usize) -> Option<Card> {
        self.columns.get(column)?.last().copied()
    }

    pub fn stock_len(&self) -> usize {
        self.stock.len()
    }

    pub fn foundations(&self) -> Foundations {
        self.foundations
    }

    pub fn runs_per_suit(&self) -> u8 {
        self.runs_per_suit
    }

    /// Cards still in play plus those retired to the foundations.
    pub fn card_count(&self) -> usize {
        let in_columns: usize = self.columns.iter().map(Vec::len).sum();
        in_columns + self.stock.len() + self.foundations.total() * RUN_LENGTH
    }

    /// Moves the run starting at `start` in column `from` onto column `to`.
    ///
    /// The range must reach the top of `from` as one run and its bottom card must stack
    /// on the top of `to`. The card uncovered in `from` turns face up, and a completed
    /// King-to-Ace run on `to` is retired to its foundation.
    pub fn move_run(&mut self, from: usize, to: usize, start: usize) -> MoveOutcome {
        if self.is_won() || from == to || to >= self.columns.len() {
            return MoveOutcome::NoChange;
        }
        let Some(source) = self.columns.get(from) else {
            return MoveOutcome::NoChange;
        };

        let run_len = run_at(source, start);
        if run_len == 0 || start + run_len != source.len() {
            return MoveOutcome::NoChange;
        }
        if !can_stack(self.top_card(to), source[start]) {
            return MoveOutcome::NoChange;
        }

        let moved = self.columns[from].split_off(start);
        log::trace!(
            "move {} cards from column {} to column {}",
            moved.len(),
            from,
            to
        );
        self.columns[to].extend(moved);
        self.flip_top(from);

        MoveOutcome::Moved | self.retire_completed_run(to)
    }

    pub fn can_deal_from_stock(&self) -> bool {
        !self.is_won()
            && self.stock.len() >= self.columns.len()
            && self.columns.iter().all(|column| !column.is_empty())
    }

    /// Deals one face-up card from the stock onto every column.
    pub fn deal_from_stock(&mut self) -> MoveOutcome {
        if !self.can_deal_from_stock() {
            return MoveOutcome::NoChange;
        }

        for column in &mut self.columns {
            if let Some(mut card) = self.stock.pop() {
                card.face_up = true;
                column.push(card);
            }
        }
        log::trace!("dealt from stock, {} cards left", self.stock.len());

        (0..self.columns.len())
            .map(|column| self.retire_completed_run(column))
            .fold(MoveOutcome::Moved, |outcome, next| outcome | next)
    }

    fn flip_top(&mut self, column: usize) {
        if let Some(card) = self.columns[column].last_mut() {
            card.face_up = true;
        }
    }

    fn retire_completed_run(&mut self, column: usize) -> MoveOutcome {
        let Some(suit) = completed_run_suit(&self.columns[column]) else {
            return MoveOutcome::NoChange;
        };

        let remaining = self.columns[column].len() - RUN_LENGTH;
        self.columns[column].truncate(remaining);
        self.flip_top(column);
        self.foundations.increment(suit);
        log::debug!(
            "Retired {:?} run from column {}, foundation now {}",
            suit,
            column,
            self.foundations.get(suit)
        );

        if self.foundations.all_reached(self.runs_per_suit) {
            self.state = PatienceState::Won;
            log::debug!("Patience game won");
            MoveOutcome::Won
        } else {
            MoveOutcome::CompletedRun(suit)
        }
    }
}
