//! Turn-based x01 dart game engine.
//!
//! Pure state transitions over one in-memory [`Game`]: apply a validated
//! hit, rotate turns, detect busts and double-out finishes, and look up
//! three-dart checkout suggestions. No I/O, no camera, no presentation;
//! those collaborate through the facade crate.
//!
//! ## Quickstart
//!
//! ```
//! use dart_score_core::Hit;
//! use dart_score_game::{Game, GameConfig, suggest_checkout};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut game = Game::new(GameConfig::default())?;
//! game.apply_throw(Hit::triple(20)?)?;
//! println!("remaining: {}", game.players()[0].remaining);
//! println!("170 checkout: {}", suggest_checkout(170).unwrap());
//! # Ok(())
//! # }
//! ```

mod checkout;
mod error;
mod game;
mod types;

pub use checkout::{suggest_checkout, Checkout, MAX_CHECKOUT};
pub use error::GameError;
pub use game::{Game, ThrowOutcome};
pub use types::{FinishMode, GameConfig, GameSnapshot, GameState, Player, STARTING_SCORES};
