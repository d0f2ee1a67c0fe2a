//! Replay a recorded detection stream through a match.
//!
//! ```text
//! dart-score --calibration board.json --throws throws.json --start 501
//! ```
//!
//! The calibration file is a serialized `BoardCalibration`; the throws file
//! is a JSON array of `[x, y]` pixel coordinates, one per detected dart
//! tip, in frame order. The final game snapshot is printed as JSON on
//! stdout.

use std::path::PathBuf;

use clap::Parser;
use log::{info, warn, LevelFilter};
use nalgebra::Point2;

use dart_score::{
    BoardCalibration, FinishMode, GameConfig, MatchController, ThrowReport,
};

#[derive(Parser, Debug)]
#[command(name = "dart-score", about = "Replay recorded dart detections")]
struct Args {
    /// Board calibration JSON.
    #[arg(long)]
    calibration: PathBuf,

    /// JSON array of [x, y] detection coordinates.
    #[arg(long)]
    throws: PathBuf,

    /// Starting total: 301, 501 or 701.
    #[arg(long, default_value_t = 501)]
    start: u16,

    /// Number of players (1 or 2).
    #[arg(long, default_value_t = 2)]
    players: usize,

    /// Finish on any hit instead of requiring a double.
    #[arg(long)]
    single_out: bool,

    /// Log every transition instead of just the summary.
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let level = if args.verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    dart_score::core::init_with_level(level)?;

    let calibration: BoardCalibration =
        serde_json::from_str(&std::fs::read_to_string(&args.calibration)?)?;
    let detections: Vec<[f64; 2]> = serde_json::from_str(&std::fs::read_to_string(&args.throws)?)?;

    let config = GameConfig {
        starting_score: args.start,
        players: args.players,
        mode: if args.single_out {
            FinishMode::SingleOut
        } else {
            FinishMode::DoubleOut
        },
        player_names: Vec::new(),
    };
    let controller = MatchController::new(config, calibration)?;

    info!("replaying {} detections", detections.len());
    for [x, y] in detections {
        let report = controller.register_throw(Point2::new(x, y))?;
        match report {
            ThrowReport::Miss => info!("({x:.1}, {y:.1}): miss"),
            ThrowReport::Scored { scored, remaining } => {
                info!("({x:.1}, {y:.1}): {scored} scored, {remaining} left");
                if let Some(hint) = controller.checkout_hint() {
                    info!("  checkout: {hint}");
                }
            }
            ThrowReport::Bust { reverted_to } => {
                warn!("({x:.1}, {y:.1}): bust, back to {reverted_to}")
            }
            ThrowReport::Won { winner } => {
                let snapshot = controller.snapshot();
                info!("{} wins", snapshot.players[winner].name);
                break;
            }
        }
    }

    println!("{}", serde_json::to_string_pretty(&controller.snapshot())?);
    Ok(())
}
