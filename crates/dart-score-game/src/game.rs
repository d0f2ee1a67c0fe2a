use log::{debug, info};
use serde::{Deserialize, Serialize};

use dart_score_core::Hit;

use crate::error::GameError;
use crate::types::{
    FinishMode, GameConfig, GameSnapshot, GameState, Player, STARTING_SCORES,
};

const DARTS_PER_TURN: u8 = 3;

/// Result of applying one throw to the active player.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub enum ThrowOutcome {
    /// The hit counted; the turn may have rotated if it was the third dart.
    Scored { scored: u16, remaining: u16 },
    /// The turn busted: the score reverted to its value at the start of the
    /// turn and the turn passed to the next player.
    Bust { reverted_to: u16 },
    /// The leg is over; the game is now terminal.
    Won { winner: usize },
}

/// One x01 leg: per-player running totals, turn rotation, bust handling.
///
/// A `Game` is an explicit value owned by whichever component drives the
/// loop; there is no process-wide state. All transitions are synchronous
/// and terminating, and a failed transition mutates nothing.
#[derive(Clone, Debug)]
pub struct Game {
    players: Vec<Player>,
    starting_score: u16,
    mode: FinishMode,
    active: usize,
    darts_thrown: u8,
    /// Active player's total at the start of the turn, for bust rollback.
    turn_start: u16,
    state: GameState,
}

impl Game {
    pub fn new(config: GameConfig) -> Result<Self, GameError> {
        if !STARTING_SCORES.contains(&config.starting_score) {
            return Err(GameError::InvalidStartingScore(config.starting_score));
        }
        if !(1..=2).contains(&config.players) {
            return Err(GameError::InvalidPlayerCount(config.players));
        }

        let players = (0..config.players)
            .map(|id| Player {
                id,
                name: config
                    .player_names
                    .get(id)
                    .cloned()
                    .unwrap_or_else(|| format!("Player {}", id + 1)),
                remaining: config.starting_score,
            })
            .collect();

        Ok(Self {
            players,
            starting_score: config.starting_score,
            mode: config.mode,
            active: 0,
            darts_thrown: 0,
            turn_start: config.starting_score,
            state: GameState::InProgress,
        })
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn active_index(&self) -> usize {
        self.active
    }

    pub fn active_player(&self) -> &Player {
        &self.players[self.active]
    }

    pub fn darts_thrown(&self) -> u8 {
        self.darts_thrown
    }

    pub fn starting_score(&self) -> u16 {
        self.starting_score
    }

    pub fn mode(&self) -> FinishMode {
        self.mode
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    /// Apply one validated hit to the active player.
    ///
    /// Bust rules: the subtraction may not pass zero, and under
    /// [`FinishMode::DoubleOut`] may not land on 1 or land on 0 without a
    /// finishing double. A bust reverts the whole turn and rotates.
    pub fn apply_throw(&mut self, hit: Hit) -> Result<ThrowOutcome, GameError> {
        if matches!(self.state, GameState::Won { .. }) {
            return Err(GameError::GameFinished);
        }

        let value = hit.value();
        let player = self.active;
        let remaining = self.players[player].remaining;
        if value > remaining {
            return Ok(self.bust());
        }

        let after = remaining - value;
        match after {
            0 => {
                if self.mode == FinishMode::SingleOut || hit.is_double() {
                    self.players[player].remaining = 0;
                    self.state = GameState::Won { player };
                    info!("{} checks out with {hit}", self.players[player].name);
                    Ok(ThrowOutcome::Won { winner: player })
                } else {
                    Ok(self.bust())
                }
            }
            1 if self.mode == FinishMode::DoubleOut => Ok(self.bust()),
            _ => {
                self.players[player].remaining = after;
                self.darts_thrown += 1;
                debug!(
                    "{} hits {hit} for {value} ({after} left)",
                    self.players[player].name
                );
                if self.darts_thrown == DARTS_PER_TURN {
                    self.rotate();
                }
                Ok(ThrowOutcome::Scored {
                    scored: value,
                    remaining: after,
                })
            }
        }
    }

    /// Explicit turn rotation, usable at any dart count (operator override
    /// or detection uncertainty). A no-op once the game is won.
    pub fn end_turn(&mut self) {
        if matches!(self.state, GameState::Won { .. }) {
            return;
        }
        self.rotate();
    }

    /// Back to the stored starting score: all totals reinitialized, player
    /// 0 to throw, any terminal state cleared. Idempotent.
    pub fn reset(&mut self) {
        for player in &mut self.players {
            player.remaining = self.starting_score;
        }
        self.active = 0;
        self.darts_thrown = 0;
        self.turn_start = self.starting_score;
        self.state = GameState::InProgress;
        info!("game reset to {}", self.starting_score);
    }

    /// Reset with a different starting score.
    pub fn reset_to(&mut self, starting_score: u16) -> Result<(), GameError> {
        if !STARTING_SCORES.contains(&starting_score) {
            return Err(GameError::InvalidStartingScore(starting_score));
        }
        self.starting_score = starting_score;
        self.reset();
        Ok(())
    }

    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot {
            players: self.players.clone(),
            active_player: self.active,
            darts_thrown: self.darts_thrown,
            starting_score: self.starting_score,
            mode: self.mode,
            state: self.state,
        }
    }

    fn bust(&mut self) -> ThrowOutcome {
        let reverted_to = self.turn_start;
        self.players[self.active].remaining = reverted_to;
        info!(
            "{} busts; back to {reverted_to}",
            self.players[self.active].name
        );
        self.rotate();
        ThrowOutcome::Bust { reverted_to }
    }

    fn rotate(&mut self) {
        self.active = (self.active + 1) % self.players.len();
        self.darts_thrown = 0;
        self.turn_start = self.players[self.active].remaining;
        debug!("{} to throw", self.players[self.active].name);
    }
}
