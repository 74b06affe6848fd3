//! Catch progress integration

use serde::{Deserialize, Serialize};

use crate::consts::PROGRESS_GOAL;

/// Reel-in progress; the fish is landed at `PROGRESS_GOAL`
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ProgressState {
    pub value: f32,
}

/// Whether the fish sits inside the bar's band (edges inclusive)
#[inline]
pub fn is_captured(target_pos: f32, zone_pos: f32, half_width: f32) -> bool {
    zone_pos - half_width <= target_pos && target_pos <= zone_pos + half_width
}

/// Apply one tick of gain or decay.
///
/// Returns the new progress and whether this tick reached the goal. The
/// value is floored at 0 but not capped, so the winning tick may report
/// more than 100.
pub fn update(
    progress: ProgressState,
    target_pos: f32,
    zone_pos: f32,
    half_width: f32,
    gain_rate: f32,
    decay_rate: f32,
) -> (ProgressState, bool) {
    let value = if is_captured(target_pos, zone_pos, half_width) {
        progress.value + gain_rate
    } else {
        (progress.value - decay_rate).max(0.0)
    };
    (ProgressState { value }, value >= PROGRESS_GOAL)
}
