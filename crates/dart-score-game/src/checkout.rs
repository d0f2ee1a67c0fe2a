//! Three-dart checkout suggestions.
//!
//! One deterministic table replaces the prototype-era brute-force triple
//! loop: suggestions are precomputed once for every finishable score and
//! looked up afterwards. Tie-break, in order:
//!
//! 1. fewest darts,
//! 2. highest-value first dart, then highest-value second dart,
//! 3. equal values prefer the higher multiplier, then the higher wedge.
//!
//! The final dart is always a double (D1..D20) or the inner bull, per the
//! standard finishing rule. Scores 159..=170 other than 160, 161, 164, 167
//! and 170 have no three-dart finish; neither do 0, 1, or anything above
//! [`MAX_CHECKOUT`].

use std::fmt;
use std::sync::OnceLock;

use serde::{Deserialize, Serialize};

use dart_score_core::{Hit, Multiplier, Segment};

/// Highest score with a three-dart finish.
pub const MAX_CHECKOUT: u16 = 170;

/// An ordered finishing combination: 1..=3 hits summing to the score, the
/// last of them a double.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Checkout(Vec<Hit>);

impl Checkout {
    pub fn hits(&self) -> &[Hit] {
        &self.0
    }

    pub fn total(&self) -> u16 {
        self.0.iter().map(Hit::value).sum()
    }
}

impl fmt::Display for Checkout {
    /// The conventional comma-separated notation, e.g. `"T20, T20, Bull"`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, hit) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{hit}")?;
        }
        Ok(())
    }
}

/// Best finishing combination for a remaining score, or `None` when no
/// three-dart finish exists. Not an error: unreachable scores are a normal
/// part of play.
pub fn suggest_checkout(remaining: u16) -> Option<Checkout> {
    table()
        .get(usize::from(remaining))
        .and_then(|entry| entry.clone())
}

fn table() -> &'static Vec<Option<Checkout>> {
    static TABLE: OnceLock<Vec<Option<Checkout>>> = OnceLock::new();
    TABLE.get_or_init(build_table)
}

fn build_table() -> Vec<Option<Checkout>> {
    let candidates = scoring_hits();
    let finishers = finishing_hits();

    (0..=MAX_CHECKOUT)
        .map(|score| {
            (1..=3u8).find_map(|darts| {
                solve(score, darts, &candidates, &finishers).map(Checkout)
            })
        })
        .collect()
}

/// Find the best combination of exactly `darts` hits finishing `score`.
///
/// Candidates are pre-sorted best-first, so the first feasible branch is
/// the documented tie-break winner.
fn solve(score: u16, darts: u8, candidates: &[Hit], finishers: &[Hit]) -> Option<Vec<Hit>> {
    if darts == 1 {
        return finishers
            .iter()
            .find(|hit| hit.value() == score)
            .map(|&hit| vec![hit]);
    }
    for &first in candidates {
        if first.value() >= score {
            continue;
        }
        if let Some(mut rest) = solve(score - first.value(), darts - 1, candidates, finishers) {
            rest.insert(0, first);
            return Some(rest);
        }
    }
    None
}

/// Every scoring hit, sorted by descending value, then multiplier, then
/// wedge number.
fn scoring_hits() -> Vec<Hit> {
    let mut hits = vec![Hit::OUTER_BULL, Hit::INNER_BULL];
    for wedge in 1..=20 {
        for multiplier in [Multiplier::Single, Multiplier::Double, Multiplier::Triple] {
            hits.push(
                Hit::new(Segment::Wedge(wedge), multiplier)
                    .expect("wedges 1..=20 are always valid"),
            );
        }
    }
    hits.sort_by(sort_best_first);
    hits
}

/// The legal final darts: the twenty doubles and the inner bull.
fn finishing_hits() -> Vec<Hit> {
    let mut hits = vec![Hit::INNER_BULL];
    for wedge in 1..=20 {
        hits.push(Hit::double(wedge).expect("wedges 1..=20 are always valid"));
    }
    hits.sort_by(sort_best_first);
    hits
}

fn sort_best_first(a: &Hit, b: &Hit) -> std::cmp::Ordering {
    let rank = |hit: &Hit| {
        let wedge = match hit.segment() {
            Segment::Wedge(n) => u16::from(n),
            Segment::Bull => 25,
        };
        (hit.value(), hit.multiplier().factor(), wedge)
    };
    rank(b).cmp(&rank(a))
}

#[cfg(test)]
mod tests {
    use super::*;

    /// The standard set of scores in 2..=170 with no three-dart finish.
    const UNREACHABLE: [u16; 7] = [159, 162, 163, 165, 166, 168, 169];

    #[test]
    fn the_big_fish() {
        // scenario: 170 is T20, T20, Bull exactly
        let checkout = suggest_checkout(170).unwrap();
        assert_eq!(
            checkout.hits(),
            [
                Hit::triple(20).unwrap(),
                Hit::triple(20).unwrap(),
                Hit::INNER_BULL
            ]
        );
        assert_eq!(checkout.to_string(), "T20, T20, Bull");
    }

    #[test]
    fn classic_finishes_match_convention() {
        assert_eq!(suggest_checkout(167).unwrap().to_string(), "T20, T19, Bull");
        assert_eq!(suggest_checkout(164).unwrap().to_string(), "T20, T18, Bull");
        assert_eq!(suggest_checkout(161).unwrap().to_string(), "T20, T17, Bull");
        assert_eq!(suggest_checkout(160).unwrap().to_string(), "T20, T20, D20");
        assert_eq!(suggest_checkout(100).unwrap().to_string(), "T20, D20");
        assert_eq!(suggest_checkout(40).unwrap().to_string(), "D20");
        assert_eq!(suggest_checkout(50).unwrap().to_string(), "Bull");
        assert_eq!(suggest_checkout(2).unwrap().to_string(), "D1");
    }

    #[test]
    fn unreachable_scores_have_no_checkout() {
        for score in UNREACHABLE {
            assert_eq!(suggest_checkout(score), None, "score {score}");
        }
        assert_eq!(suggest_checkout(0), None);
        assert_eq!(suggest_checkout(1), None);
        assert_eq!(suggest_checkout(171), None);
        assert_eq!(suggest_checkout(501), None);
    }

    #[test]
    fn every_reachable_score_gets_a_valid_finish() {
        for score in 2..=MAX_CHECKOUT {
            if UNREACHABLE.contains(&score) {
                continue;
            }
            let checkout = suggest_checkout(score)
                .unwrap_or_else(|| panic!("score {score} should be finishable"));
            assert!(!checkout.hits().is_empty());
            assert!(checkout.hits().len() <= 3);
            assert_eq!(checkout.total(), score, "score {score}");
            assert!(
                checkout.hits().last().unwrap().is_double(),
                "score {score} must finish on a double"
            );
        }
    }

    #[test]
    fn prefers_the_fewest_darts() {
        // every even score up to 40, and 50, is a one-dart finish
        for score in (2..=40u16).step_by(2) {
            assert_eq!(suggest_checkout(score).unwrap().hits().len(), 1);
        }
        assert_eq!(suggest_checkout(50).unwrap().hits().len(), 1);
    }

    #[test]
    fn prefers_the_highest_first_dart() {
        // 99 has no two-dart finish; the greedy first dart is T20
        let checkout = suggest_checkout(99).unwrap();
        assert_eq!(checkout.hits().len(), 3);
        assert_eq!(checkout.hits()[0], Hit::triple(20).unwrap());
    }

    #[test]
    fn lookup_is_stable() {
        assert_eq!(suggest_checkout(137), suggest_checkout(137));
    }
}
