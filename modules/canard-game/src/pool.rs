use rand::seq::SliceRandom;

use canard_common::Fact;

/// True facts shown per round.
pub const TRUE_PER_ROUND: usize = 2;
/// False facts shown per round.
pub const FALSE_PER_ROUND: usize = 1;
/// Rounds in a full game.
pub const TOTAL_ROUNDS: u32 = 10;
/// Initial pool composition required so no round starves.
pub const REQUIRED_TRUE: usize = TRUE_PER_ROUND * TOTAL_ROUNDS as usize;
pub const REQUIRED_FALSE: usize = FALSE_PER_ROUND * TOTAL_ROUNDS as usize;

/// The working set of undrawn facts for one game session.
///
/// Pool order is fetch-response order and is preserved until facts are
/// drawn. Draws are order-based, not sampled: which facts appear together
/// in a round is a function of response order, only the display order of
/// each drawn triple is randomized.
#[derive(Debug, Clone)]
pub struct FactPool {
    facts: Vec<Fact>,
}

impl FactPool {
    pub fn new(facts: Vec<Fact>) -> Self {
        Self { facts }
    }

    pub fn len(&self) -> usize {
        self.facts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.facts.is_empty()
    }

    pub fn true_count(&self) -> usize {
        self.facts.iter().filter(|f| f.is_true).count()
    }

    pub fn false_count(&self) -> usize {
        self.facts.iter().filter(|f| !f.is_true).count()
    }

    /// Draw the next round: the first two true facts and the first false
    /// fact in pool order, removed from the pool and returned in shuffled
    /// display order.
    ///
    /// Returns `None` when the remaining composition cannot fill a round,
    /// the exhaustion boundary rather than an error.
    pub fn draw_round(&mut self) -> Option<Vec<Fact>> {
        if self.true_count() < TRUE_PER_ROUND || self.false_count() < FALSE_PER_ROUND {
            return None;
        }

        let mut indices: Vec<usize> = self
            .facts
            .iter()
            .enumerate()
            .filter(|(_, f)| f.is_true)
            .map(|(i, _)| i)
            .take(TRUE_PER_ROUND)
            .collect();
        indices.extend(
            self.facts
                .iter()
                .enumerate()
                .filter(|(_, f)| !f.is_true)
                .map(|(i, _)| i)
                .take(FALSE_PER_ROUND),
        );

        // Remove back-to-front so earlier indices stay valid.
        indices.sort_unstable();
        let mut round: Vec<Fact> = indices
            .iter()
            .rev()
            .map(|&i| self.facts.remove(i))
            .collect();

        round.shuffle(&mut rand::rng());
        Some(round)
    }
}
