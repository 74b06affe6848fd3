//! Deterministic simulation module
//!
//! All minigame logic lives here. This module must be pure:
//! - Fixed timestep only
//! - Seeded RNG only
//! - No host, transport or rendering dependencies

pub mod autopilot;
pub mod motion;
pub mod pattern;
pub mod progress;
pub mod selector;
pub mod tick;
pub mod zone;

pub use motion::{Edge, Motion, TargetState};
pub use pattern::Pattern;
pub use progress::ProgressState;
pub use selector::{BounceCounters, PatternSelector};
pub use tick::{SimState, TickInput, TickResult, tick};
pub use zone::ZoneState;
