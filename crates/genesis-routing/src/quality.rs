//! Heuristic quality score for a single generation.
//!
//! The score is a cheap proxy for how substantive a reply looks: it rewards
//! moderate length, fenced code and explanatory wording. It does not judge
//! correctness.

use genesis_core::GenerationResult;

/// Scores at or above this value are accepted without further fallback.
pub const QUALITY_THRESHOLD: f64 = 0.7;

/// Scores are counted in tenths.
const BASE_POINTS: u8 = 5;
const LENGTH_POINTS: u8 = 2;
const CODE_BLOCK_POINTS: u8 = 2;
const EXPLANATION_POINTS: u8 = 1;
const MAX_POINTS: u8 = 10;

/// Inclusive bounds, in characters, for the length bonus.
const MIN_REASONABLE_CHARS: usize = 100;
const MAX_REASONABLE_CHARS: usize = 2000;

const EXPLANATION_MARKERS: &[&str] = &["explain", "because", "reason", "here's"];

/// Scores a generation result in `[0.0, 1.0]`.
///
/// Failed calls always score `0.0`.
pub fn score(result: &GenerationResult) -> f64 {
    let Some(content) = result.content() else {
        return 0.0;
    };

    let mut points = BASE_POINTS;

    let length = content.chars().count();
    if (MIN_REASONABLE_CHARS..=MAX_REASONABLE_CHARS).contains(&length) {
        points += LENGTH_POINTS;
    }

    if content.contains("```") {
        points += CODE_BLOCK_POINTS;
    }

    let content_lower = content.to_lowercase();
    if EXPLANATION_MARKERS
        .iter()
        .any(|marker| content_lower.contains(marker))
    {
        points += EXPLANATION_POINTS;
    }

    f64::from(points.min(MAX_POINTS)) / f64::from(MAX_POINTS)
}

/// Whether `score` clears [`QUALITY_THRESHOLD`].
pub fn is_acceptable(score: f64) -> bool {
    score >= QUALITY_THRESHOLD
}
