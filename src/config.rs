//! Session tuning and difficulty presets
//!
//! A `SimulationConfig` is fixed for the lifetime of a session. Hosts either
//! build one from a `Difficulty` preset or load it as JSON.

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::ConfigError;
use crate::sim::pattern::Pattern;
use crate::sim::selector::DEFAULT_BOUNCE_THRESHOLD;

/// Difficulty preset levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub enum Difficulty {
    Easy,
    #[default]
    Normal,
    Hard,
}

impl Difficulty {
    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Normal => "normal",
            Difficulty::Hard => "hard",
        }
    }

    pub fn from_name(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "easy" => Some(Difficulty::Easy),
            "normal" | "medium" => Some(Difficulty::Normal),
            "hard" => Some(Difficulty::Hard),
            _ => None,
        }
    }

    /// Half-width of the catch bar
    pub fn capture_half_width(&self) -> f32 {
        match self {
            Difficulty::Easy => 0.15,
            Difficulty::Normal => 0.1,
            Difficulty::Hard => 0.07,
        }
    }

    /// Opening pattern for the fish
    pub fn pattern(&self) -> Pattern {
        match self {
            Difficulty::Easy => Pattern::Default,
            Difficulty::Normal => Pattern::SineWave,
            Difficulty::Hard => Pattern::Pulse,
        }
    }

    /// Build a full config for this preset
    pub fn config(&self) -> SimulationConfig {
        let base = SimulationConfig::default();
        match self {
            Difficulty::Easy => SimulationConfig {
                capture_half_width: self.capture_half_width(),
                gain_rate: 0.6,
                decay_rate: 0.2,
                initial_velocity: 0.008,
                pattern: self.pattern(),
                bounce_threshold: 10,
                ..base
            },
            Difficulty::Normal => SimulationConfig {
                capture_half_width: self.capture_half_width(),
                pattern: self.pattern(),
                ..base
            },
            Difficulty::Hard => SimulationConfig {
                capture_half_width: self.capture_half_width(),
                gain_rate: 0.4,
                decay_rate: 0.4,
                zone_speed: 0.75,
                initial_velocity: 0.015,
                pattern: self.pattern(),
                bounce_threshold: 4,
                ..base
            },
        }
    }
}

/// Tuning for one reeling session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SimulationConfig {
    /// Seconds per simulation tick
    pub tick_interval: f32,
    /// Half-width of the catch bar band
    pub capture_half_width: f32,
    /// Progress gained per tick while the fish is inside the bar
    pub gain_rate: f32,
    /// Progress lost per tick while the fish is outside the bar
    pub decay_rate: f32,
    /// Bar travel speed (units per second)
    pub zone_speed: f32,
    /// Fish speed at session start (units per tick, magnitude)
    pub initial_velocity: f32,
    /// Fish position at session start
    pub initial_position: f32,
    /// Bar position at session start
    pub initial_zone_position: f32,
    /// Fish pattern when the start message names none
    pub pattern: Pattern,
    /// Edge bounces before the dynamic pattern takes over
    pub bounce_threshold: u32,
    /// Forces the dynamic pattern instead of deriving it
    pub dynamic_pattern: Option<Pattern>,
    /// Maximum ticks run per `advance` call
    pub max_substeps: u32,
    /// RNG seed for erratic patterns (random when absent)
    pub seed: Option<u64>,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            tick_interval: DEFAULT_TICK_INTERVAL,
            capture_half_width: 0.1,
            gain_rate: 0.5,
            decay_rate: 0.3,
            zone_speed: 0.6,
            initial_velocity: 0.01,
            initial_position: 0.5,
            initial_zone_position: 0.5,
            pattern: Pattern::Default,
            bounce_threshold: DEFAULT_BOUNCE_THRESHOLD,
            dynamic_pattern: None,
            max_substeps: DEFAULT_MAX_SUBSTEPS,
            seed: None,
        }
    }
}

impl SimulationConfig {
    /// Parse a JSON config; missing fields take defaults
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Check every numeric field, returning the first violation
    pub fn validate(&self) -> Result<(), ConfigError> {
        ConfigError::check_positive("tickInterval", self.tick_interval, 0.0, 1.0)?;
        ConfigError::check_positive("captureHalfWidth", self.capture_half_width, 0.0, 0.5)?;
        ConfigError::check_positive("gainRate", self.gain_rate, 0.0, PROGRESS_GOAL)?;
        ConfigError::check_range("decayRate", self.decay_rate, 0.0, PROGRESS_GOAL)?;
        ConfigError::check_range("zoneSpeed", self.zone_speed, 0.0, 10.0)?;
        ConfigError::check_range("initialVelocity", self.initial_velocity, 0.0, MAX_TARGET_SPEED)?;
        ConfigError::check_range("initialPosition", self.initial_position, 0.0, 1.0)?;
        ConfigError::check_range("initialZonePosition", self.initial_zone_position, 0.0, 1.0)?;
        check_count("bounceThreshold", self.bounce_threshold, 1, 1000)?;
        check_count("maxSubsteps", self.max_substeps, 1, 64)?;
        Ok(())
    }
}

fn check_count(field: &'static str, value: u32, min: u32, max: u32) -> Result<(), ConfigError> {
    if value < min || value > max {
        return Err(ConfigError::CountOutOfRange {
            field,
            min,
            max,
            value,
        });
    }
    Ok(())
}

/// Controller-wide switches that are not per-session tuning
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ControllerOptions {
    /// Run the fish motion locally. When false the fish position comes from
    /// the host authority through target sync messages.
    pub local_motion: bool,
}

impl Default for ControllerOptions {
    fn default() -> Self {
        Self { local_motion: true }
    }
}
