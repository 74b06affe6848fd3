//! Simple bot that decides when to hold the reel control
//!
//! Used by the headless runner and for soak tests. It chases the fish with
//! a dead band so it does not chatter on every tick.

use super::zone::ZoneState;

/// Fraction of the bar half-width the fish may drift before the bot reacts
const DEAD_BAND: f32 = 0.25;

/// Whether to hold the control this tick
pub fn hold_input(fish_position: f32, zone: &ZoneState, half_width: f32) -> bool {
    let margin = half_width * DEAD_BAND;
    if fish_position < zone.position - margin {
        // Fish below the bar: steer down, re-pressing if a wall flipped us
        !(zone.held && zone.direction > 0.0)
    } else if fish_position > zone.position + margin {
        false
    } else {
        zone.held
    }
}
