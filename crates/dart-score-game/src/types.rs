use serde::{Deserialize, Serialize};

/// Starting totals supported by the engine.
pub const STARTING_SCORES: [u16; 3] = [301, 501, 701];

/// Out-rule: how a leg may be finished.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub enum FinishMode {
    /// Any hit landing exactly on zero wins.
    SingleOut,
    /// The winning dart must be a double (or the inner bull); landing on 1
    /// is a bust because no single dart can finish from there.
    #[default]
    DoubleOut,
}

/// Validated at [`crate::Game::new`]; invalid combinations never produce a
/// game.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GameConfig {
    /// One of [`STARTING_SCORES`].
    pub starting_score: u16,
    /// 1 or 2.
    pub players: usize,
    #[serde(default)]
    pub mode: FinishMode,
    /// Optional display names; missing entries default to "Player N".
    #[serde(default)]
    pub player_names: Vec<String>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            starting_score: 501,
            players: 2,
            mode: FinishMode::DoubleOut,
            player_names: Vec::new(),
        }
    }
}

/// Identity is positional: `id` is the player's index in the game.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub id: usize,
    pub name: String,
    pub remaining: u16,
}

/// Terminal state marker. `remaining == 0` occurs only inside `Won`.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub enum GameState {
    InProgress,
    Won { player: usize },
}

/// Read-only view of a game for any front end, taken atomically.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameSnapshot {
    pub players: Vec<Player>,
    pub active_player: usize,
    pub darts_thrown: u8,
    pub starting_score: u16,
    pub mode: FinishMode,
    pub state: GameState,
}
