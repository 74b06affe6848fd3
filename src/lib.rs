//! Reel Chase - fish reeling minigame simulation core
//!
//! Core modules:
//! - `sim`: Deterministic simulation (fish motion, patterns, catch bar, progress)
//! - `session`: Session lifecycle, fixed-step loop and host message dispatch
//! - `protocol`: Inbound/outbound boundary messages
//! - `config`: Session tuning and difficulty presets
//! - `platform`: Browser bridge (wasm32 only)

pub mod config;
pub mod error;
pub mod platform;
pub mod protocol;
pub mod session;
pub mod sim;

pub use config::{ControllerOptions, Difficulty, SimulationConfig};
pub use error::{ConfigError, SimulationFault};
pub use protocol::{HostMessage, SessionEvent, SessionOutcome, TickSnapshot};
pub use session::{SessionController, SessionPhase, SessionSummary, StopReason};

/// Simulation constants
pub mod consts {
    /// Reference tick interval in seconds (~60 Hz)
    pub const DEFAULT_TICK_INTERVAL: f32 = 0.016;
    /// Maximum frame delta fed to the accumulator (prevents spiral of death)
    pub const MAX_FRAME_DT: f32 = 0.1;
    /// Default maximum ticks per `advance` call
    pub const DEFAULT_MAX_SUBSTEPS: u32 = 8;

    /// Progress needed to land the fish
    pub const PROGRESS_GOAL: f32 = 100.0;

    /// Velocity magnitude cap for any pattern (per tick)
    pub const MAX_TARGET_SPEED: f32 = 0.5;
}

/// Flip a velocity so it points back into [lo, hi] when the position left it.
///
/// Returns the clamped position and the (possibly reflected) velocity.
#[inline]
pub fn reflect_at_bounds(position: f32, velocity: f32, lo: f32, hi: f32) -> (f32, f32) {
    if position >= hi {
        (hi, -velocity.abs())
    } else if position <= lo {
        (lo, velocity.abs())
    } else {
        (position, velocity)
    }
}
