//! Catch bar (the player's capture zone)
//!
//! The bar sweeps on its own and flips at the field edges. Holding the
//! reel control steers it toward 0; releasing steers it back toward 1.
//! Input only changes the sign on press/release edges, so the next wall
//! contact still wins.

use serde::{Deserialize, Serialize};

/// Catch bar state
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ZoneState {
    /// Normalized position in [0, 1]
    pub position: f32,
    /// Direction of travel, -1.0 or +1.0
    pub direction: f32,
    /// Control state seen on the previous advance
    pub held: bool,
}

impl ZoneState {
    pub fn new(position: f32) -> Self {
        Self {
            position: position.clamp(0.0, 1.0),
            direction: 1.0,
            held: false,
        }
    }
}

impl Default for ZoneState {
    fn default() -> Self {
        Self::new(0.5)
    }
}

/// Advance the bar by `dt` seconds at `speed` units/second
pub fn advance(zone: ZoneState, holding: bool, speed: f32, dt: f32) -> ZoneState {
    let mut zone = zone;

    if holding != zone.held {
        zone.direction = if holding { -1.0 } else { 1.0 };
        zone.held = holding;
    }

    zone.position += zone.direction * speed * dt;
    if zone.position >= 1.0 {
        zone.position = 1.0;
        zone.direction = -1.0;
    } else if zone.position <= 0.0 {
        zone.position = 0.0;
        zone.direction = 1.0;
    }

    zone
}
