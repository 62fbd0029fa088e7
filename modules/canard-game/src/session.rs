use tracing::{info, warn};
use uuid::Uuid;

use canard_common::Fact;

use crate::pool::{FactPool, TOTAL_ROUNDS};

/// Score delta for correctly spotting the false fact.
pub const CORRECT_GUESS_DELTA: i32 = 3;
/// Score delta for picking a true fact.
pub const WRONG_GUESS_DELTA: i32 = -1;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameState {
    AwaitingFacts,
    Playing { round: u32 },
    GameOver { outcome: GameOutcome },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameOutcome {
    /// All rounds were played to the end.
    Completed,
    /// The pool could no longer fill a round; the game ended early.
    PoolExhausted,
}

/// One play-through: pool, round counter, and score.
///
/// Rounds are driven by the caller: `next_round` draws the facts to
/// display, `resolve_round` applies the guess and advances the state.
pub struct GameSession {
    id: Uuid,
    state: GameState,
    score: i32,
    total_rounds: u32,
    pool: FactPool,
}

impl GameSession {
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4(),
            state: GameState::AwaitingFacts,
            score: 0,
            total_rounds: TOTAL_ROUNDS,
            pool: FactPool::new(Vec::new()),
        }
    }

    /// AwaitingFacts → Playing(1). Called with the pool from a successful
    /// acquisition.
    pub fn start(&mut self, pool: FactPool) {
        info!(session = %self.id, pool_size = pool.len(), "Game starting");
        self.pool = pool;
        self.state = GameState::Playing { round: 1 };
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn score(&self) -> i32 {
        self.score
    }

    /// The round currently being played, if any.
    pub fn current_round(&self) -> Option<u32> {
        match self.state {
            GameState::Playing { round } => Some(round),
            _ => None,
        }
    }

    pub fn is_over(&self) -> bool {
        matches!(self.state, GameState::GameOver { .. })
    }

    /// Draw the facts for the current round.
    ///
    /// Returns `None` once the session is over, including the transition
    /// to `PoolExhausted` when the pool cannot fill another round, which is
    /// terminal but distinct from a full completion.
    pub fn next_round(&mut self) -> Option<Vec<Fact>> {
        let round = match self.state {
            GameState::Playing { round } => round,
            _ => return None,
        };

        match self.pool.draw_round() {
            Some(facts) => {
                info!(session = %self.id, round, "Round drawn");
                Some(facts)
            }
            None => {
                warn!(
                    session = %self.id,
                    round,
                    true_left = self.pool.true_count(),
                    false_left = self.pool.false_count(),
                    "Pool exhausted before the final round, ending game early"
                );
                self.state = GameState::GameOver {
                    outcome: GameOutcome::PoolExhausted,
                };
                None
            }
        }
    }

    /// Apply the player's guess and advance: +3 when the canard was
    /// spotted, -1 when a true fact was picked. After the last round the
    /// session transitions to `GameOver { Completed }`.
    ///
    /// Returns the applied delta so the presenter can show feedback.
    pub fn resolve_round(&mut self, chosen: &Fact) -> i32 {
        let round = match self.state {
            GameState::Playing { round } => round,
            _ => return 0,
        };

        let delta = if chosen.is_true {
            WRONG_GUESS_DELTA
        } else {
            CORRECT_GUESS_DELTA
        };
        self.score += delta;

        if round < self.total_rounds {
            self.state = GameState::Playing { round: round + 1 };
        } else {
            info!(session = %self.id, score = self.score, "All rounds played");
            self.state = GameState::GameOver {
                outcome: GameOutcome::Completed,
            };
        }

        delta
    }
}

impl Default for GameSession {
    fn default() -> Self {
        Self::new()
    }
}
