use std::sync::{Mutex, MutexGuard};

use log::debug;
use nalgebra::Point2;
use serde::{Deserialize, Serialize};

#[cfg(feature = "tracing")]
use tracing::instrument;

use dart_score_board::{BoardCalibration, BoardMapper, CalibrationError, MapError};
use dart_score_game::{Checkout, Game, GameConfig, GameError, GameSnapshot, ThrowOutcome};

/// Errors surfaced by the controller, one variant per collaborator.
#[derive(thiserror::Error, Debug)]
pub enum ControllerError {
    #[error(transparent)]
    Game(#[from] GameError),
    #[error(transparent)]
    Map(#[from] MapError),
    #[error(transparent)]
    Calibration(#[from] CalibrationError),
}

/// What one registered detection did to the game.
///
/// A miss mutates nothing and does not consume one of the turn's darts:
/// not every detected blob is a scoring dart, and the operator can always
/// end the turn explicitly.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub enum ThrowReport {
    Miss,
    Scored { scored: u16, remaining: u16 },
    Bust { reverted_to: u16 },
    Won { winner: usize },
}

impl From<ThrowOutcome> for ThrowReport {
    fn from(outcome: ThrowOutcome) -> Self {
        match outcome {
            ThrowOutcome::Scored { scored, remaining } => ThrowReport::Scored { scored, remaining },
            ThrowOutcome::Bust { reverted_to } => ThrowReport::Bust { reverted_to },
            ThrowOutcome::Won { winner } => ThrowReport::Won { winner },
        }
    }
}

struct Inner {
    game: Game,
    mapper: BoardMapper,
}

/// The single mutation path between collaborators and one running match.
///
/// One mutex serializes every state transition, and snapshots are taken
/// under the same lock, so a reader never observes a game mid-transition
/// (score decremented but turn not yet rotated). Capture loops, request
/// handlers and GUI threads can share one controller behind an `Arc`.
pub struct MatchController {
    inner: Mutex<Inner>,
}

impl MatchController {
    pub fn new(
        config: GameConfig,
        calibration: BoardCalibration,
    ) -> Result<Self, ControllerError> {
        let game = Game::new(config)?;
        let mapper = BoardMapper::new(calibration)?;
        Ok(Self {
            inner: Mutex::new(Inner { game, mapper }),
        })
    }

    /// Replace the running game with a freshly configured one.
    pub fn start_game(&self, config: GameConfig) -> Result<GameSnapshot, ControllerError> {
        let game = Game::new(config)?;
        let mut inner = self.lock();
        inner.game = game;
        Ok(inner.game.snapshot())
    }

    /// Register one detected dart tip.
    #[cfg_attr(
        feature = "tracing",
        instrument(level = "debug", skip(self), fields(x = point.x, y = point.y))
    )]
    pub fn register_throw(&self, point: Point2<f64>) -> Result<ThrowReport, ControllerError> {
        let mut inner = self.lock();
        Self::apply_point(&mut inner, point)
    }

    /// Register every detection from one processed frame, in order.
    ///
    /// Stops early once the game is won; later detections in the same frame
    /// are echoes of darts already on the board.
    pub fn register_detections(
        &self,
        points: &[Point2<f64>],
    ) -> Result<Vec<ThrowReport>, ControllerError> {
        let mut inner = self.lock();
        let mut reports = Vec::with_capacity(points.len());
        for &point in points {
            let report = Self::apply_point(&mut inner, point)?;
            let done = matches!(report, ThrowReport::Won { .. });
            reports.push(report);
            if done {
                break;
            }
        }
        Ok(reports)
    }

    /// Explicit turn rotation (operator override or detection uncertainty).
    pub fn end_turn(&self) -> GameSnapshot {
        let mut inner = self.lock();
        inner.game.end_turn();
        inner.game.snapshot()
    }

    /// Back to the stored starting score.
    pub fn reset(&self) -> GameSnapshot {
        let mut inner = self.lock();
        inner.game.reset();
        inner.game.snapshot()
    }

    /// Reset with a different starting score.
    pub fn reset_to(&self, starting_score: u16) -> Result<GameSnapshot, ControllerError> {
        let mut inner = self.lock();
        inner.game.reset_to(starting_score)?;
        Ok(inner.game.snapshot())
    }

    /// Swap in a new calibration; the game state is untouched.
    pub fn recalibrate(&self, calibration: BoardCalibration) -> Result<(), ControllerError> {
        let mapper = BoardMapper::new(calibration)?;
        self.lock().mapper = mapper;
        Ok(())
    }

    /// Atomic read-only view for any front end.
    pub fn snapshot(&self) -> GameSnapshot {
        self.lock().game.snapshot()
    }

    /// Suggested finish for the active player, when one exists.
    pub fn checkout_hint(&self) -> Option<Checkout> {
        let inner = self.lock();
        dart_score_game::suggest_checkout(inner.game.active_player().remaining)
    }

    fn apply_point(inner: &mut Inner, point: Point2<f64>) -> Result<ThrowReport, ControllerError> {
        match inner.mapper.map_point(point)? {
            None => {
                debug!("detection at ({:.1}, {:.1}) missed the board", point.x, point.y);
                Ok(ThrowReport::Miss)
            }
            Some(throw) => Ok(inner.game.apply_throw(throw.hit)?.into()),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        // a poisoning panic can only happen between transitions, so the
        // state behind the lock is still consistent
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dart_score_board::Ring;
    use dart_score_game::GameState;

    fn controller() -> MatchController {
        let calibration = BoardCalibration::new(Point2::new(320.0, 240.0), 200.0).unwrap();
        MatchController::new(GameConfig::default(), calibration).unwrap()
    }

    fn point_for(c: &MatchController, ring: Ring, wedge: u8) -> Point2<f64> {
        let inner = c.inner.lock().unwrap();
        inner.mapper.point_at(ring, wedge).unwrap()
    }

    #[test]
    fn a_miss_changes_nothing() {
        let c = controller();
        let before = c.snapshot();
        let report = c.register_throw(Point2::new(1.0, 1.0)).unwrap();
        assert_eq!(report, ThrowReport::Miss);
        assert_eq!(c.snapshot(), before);
    }

    #[test]
    fn a_triple_twenty_scores_sixty() {
        let c = controller();
        let p = point_for(&c, Ring::Triple, 20);
        let report = c.register_throw(p).unwrap();
        assert_eq!(
            report,
            ThrowReport::Scored {
                scored: 60,
                remaining: 441
            }
        );
    }

    #[test]
    fn frame_batches_stop_after_a_win() {
        let calibration = BoardCalibration::new(Point2::new(320.0, 240.0), 200.0).unwrap();
        let config = GameConfig {
            starting_score: 301,
            players: 1,
            mode: dart_score_game::FinishMode::SingleOut,
            player_names: Vec::new(),
        };
        let c = MatchController::new(config, calibration).unwrap();

        // 5 x 60 = 300, then a single 1 finishes under single-out
        let t20 = point_for(&c, Ring::Triple, 20);
        let s1 = point_for(&c, Ring::OuterSingle, 1);
        let points = vec![t20, t20, t20, t20, t20, s1, t20, t20];
        let reports = c.register_detections(&points).unwrap();
        // the trailing two detections are never applied
        assert_eq!(reports.len(), 6);
        assert_eq!(reports[5], ThrowReport::Won { winner: 0 });
        assert_eq!(c.snapshot().state, GameState::Won { player: 0 });
    }

    #[test]
    fn recalibration_keeps_the_game() {
        let c = controller();
        c.register_throw(point_for(&c, Ring::Triple, 20)).unwrap();

        let moved = BoardCalibration::new(Point2::new(640.0, 360.0), 150.0).unwrap();
        c.recalibrate(moved).unwrap();
        assert_eq!(c.snapshot().players[0].remaining, 441);

        // the old board center is now a plain miss on the moved board
        let report = c.register_throw(Point2::new(320.0, 240.0)).unwrap();
        assert_eq!(report, ThrowReport::Miss);
    }

    #[test]
    fn checkout_hint_follows_the_active_player() {
        let c = controller();
        assert!(c.checkout_hint().is_none()); // 501 is not finishable
        c.reset_to(301).unwrap();
        let t20 = point_for(&c, Ring::Triple, 20);
        c.register_detections(&[t20, t20, t20]).unwrap(); // player 0 -> 121
        assert!(c.checkout_hint().is_none()); // player 1 is still on 301
        c.register_detections(&[t20, t20, t20]).unwrap(); // player 1 -> 121
        let hint = c.checkout_hint().unwrap();
        assert_eq!(hint.total(), 121);
    }

    #[test]
    fn start_game_rejects_bad_configs_without_clobbering_state() {
        let c = controller();
        c.register_throw(point_for(&c, Ring::Triple, 19)).unwrap();
        let bad = GameConfig {
            starting_score: 666,
            ..GameConfig::default()
        };
        assert!(matches!(
            c.start_game(bad),
            Err(ControllerError::Game(GameError::InvalidStartingScore(666)))
        ));
        assert_eq!(c.snapshot().players[0].remaining, 501 - 57);
    }
}
