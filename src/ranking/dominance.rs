//! Dominance transform for head-to-head score ratios.
//!
//! Maps a normalized score share `x ∈ [0, 1]` to a bounded dominance value.
//! The square-root shape pushes decisive results towards 0 or 1 and keeps
//! narrow ones close to 0.5.

use super::head_to_head::PairRecord;

/// `h(x) = 0.5 + 0.5 * sign(x - 0.5) * sqrt(|2x - 1|)`.
///
/// Monotonically increasing on `[0, 1]`, `h(0.5) = 0.5` and
/// `h(x) + h(1 - x) = 1`.
pub fn dominance(x: f64) -> f64 {
    let centered = x - 0.5;
    let sign = if centered > 0.0 {
        1.0
    } else if centered < 0.0 {
        -1.0
    } else {
        0.0
    };

    0.5 + 0.5 * sign * (2.0 * x - 1.0).abs().sqrt()
}

/// Dominance of the row player over the column player.
///
/// A pair that never met has no evidence either way and contributes 0, not
/// the 0.5 of a dead-even record.
pub fn pair_dominance(record: PairRecord) -> f64 {
    match record {
        PairRecord::NeverPlayed => 0.0,
        PairRecord::Played { scored, conceded } => {
            let scored = scored as f64;
            let conceded = conceded as f64;
            dominance((scored + 1.0) / (scored + conceded + 2.0))
        }
    }
}
