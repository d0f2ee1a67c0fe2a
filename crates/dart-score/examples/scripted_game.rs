//! A short scripted match, driven the way a capture loop would drive it.
//!
//! Run with `cargo run --example scripted_game`.

use dart_score::{BoardCalibration, GameConfig, MatchController, Ring};
use nalgebra::Point2;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    dart_score::core::init_with_level(log::LevelFilter::Debug)?;

    let calibration = BoardCalibration::new(Point2::new(320.0, 240.0), 200.0)?;
    let controller = MatchController::new(
        GameConfig {
            starting_score: 301,
            players: 2,
            player_names: vec!["Ann".into(), "Ben".into()],
            ..GameConfig::default()
        },
        calibration,
    )?;

    // synthesize detections at known board patches, plus one stray blob
    let mapper_probe = |ring, wedge| -> Point2<f64> {
        // same geometry the controller uses
        let cal = BoardCalibration::new(Point2::new(320.0, 240.0), 200.0).unwrap();
        dart_score::BoardMapper::new(cal)
            .unwrap()
            .point_at(ring, wedge)
            .unwrap()
    };

    // Ann: 60 + 57 + 60 leaves 124; Ben opens with D12
    let frames: Vec<Vec<Point2<f64>>> = vec![
        vec![mapper_probe(Ring::Triple, 20), Point2::new(5.0, 5.0)],
        vec![mapper_probe(Ring::Triple, 19), mapper_probe(Ring::Triple, 20)],
        vec![mapper_probe(Ring::Double, 12)],
    ];

    for frame in &frames {
        for report in controller.register_detections(frame)? {
            println!("-> {report:?}");
        }
    }

    controller.end_turn();
    if let Some(hint) = controller.checkout_hint() {
        println!("suggested finish: {hint}");
    }
    println!(
        "{}",
        serde_json::to_string_pretty(&controller.snapshot())?
    );
    Ok(())
}
