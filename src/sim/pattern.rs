//! Fish motion patterns and their tuning constants
//!
//! Each pattern maps (position, velocity, elapsed time) to the next
//! (position, velocity). Constants are part of the game design, not
//! session parameters.

use serde::{Deserialize, Serialize};

/// Bounds used by linear patterns unless a pattern states otherwise
pub const EDGE_MIN: f32 = 0.05;
pub const EDGE_MAX: f32 = 0.95;

/// Bounds for the randomized patterns
pub const ERRATIC_MIN: f32 = 0.1;
pub const ERRATIC_MAX: f32 = 0.9;

/// SineWave: angular frequency (rad/s) and amplitude around 0.5
pub const SINE_FREQUENCY: f32 = 2.0;
pub const SINE_AMPLITUDE: f32 = 0.4;

/// Erratic: chance per tick of reversing direction
pub const ERRATIC_FLIP_CHANCE: f64 = 0.02;

/// SineErratic: baseline sine and how much of the drift term survives
pub const SINE_ERRATIC_FREQUENCY: f32 = 1.5;
pub const SINE_ERRATIC_AMPLITUDE: f32 = 0.3;
pub const SINE_ERRATIC_DRIFT_WEIGHT: f32 = 0.3;
/// SineErratic: chance per tick of rescaling or reversing velocity
pub const SINE_ERRATIC_CHANGE_CHANCE: f64 = 0.05;

/// Pulse: fast/slow angular frequencies alternate every period (seconds)
pub const PULSE_FAST_FREQUENCY: f32 = 4.0;
pub const PULSE_SLOW_FREQUENCY: f32 = 1.0;
pub const PULSE_PERIOD: f32 = 2.0;
pub const PULSE_AMPLITUDE: f32 = 0.4;

/// Accelerating: multiplier grows by this much per second, up to the cap
pub const ACCEL_RATE: f32 = 0.25;
pub const ACCEL_MAX_MULTIPLIER: f32 = 3.0;

/// ZigZag: ticks between forced direction changes
pub const ZIGZAG_INTERVAL_TICKS: u32 = 30;

/// Burst: cycle length (seconds), speed multiplier during the first third
pub const BURST_PERIOD: f32 = 1.5;
pub const BURST_MULTIPLIER: f32 = 2.5;

/// Driving sine magnitude above which an edge bounce is detected
pub const BOUNCE_SINE_THRESHOLD: f32 = 0.9;
/// Position thresholds classifying a bounce as left or right
pub const BOUNCE_LEFT_EDGE: f32 = 0.2;
pub const BOUNCE_RIGHT_EDGE: f32 = 0.8;

/// Fish motion pattern
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Pattern {
    #[default]
    Default,
    SineWave,
    Erratic,
    SineErratic,
    Pulse,
    Accelerating,
    ZigZag,
    Burst,
}

impl Pattern {
    /// Every pattern, in declaration order
    pub const ALL: [Pattern; 8] = [
        Pattern::Default,
        Pattern::SineWave,
        Pattern::Erratic,
        Pattern::SineErratic,
        Pattern::Pulse,
        Pattern::Accelerating,
        Pattern::ZigZag,
        Pattern::Burst,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Pattern::Default => "default",
            Pattern::SineWave => "sineWave",
            Pattern::Erratic => "erratic",
            Pattern::SineErratic => "sineErratic",
            Pattern::Pulse => "pulse",
            Pattern::Accelerating => "accelerating",
            Pattern::ZigZag => "zigZag",
            Pattern::Burst => "burst",
        }
    }

    /// Parse a pattern name, ignoring case and `_`/`-` separators
    pub fn from_name(s: &str) -> Option<Self> {
        let key: String = s
            .chars()
            .filter(|c| *c != '_' && *c != '-')
            .flat_map(char::to_lowercase)
            .collect();
        match key.as_str() {
            "default" | "linear" => Some(Pattern::Default),
            "sinewave" | "sine" => Some(Pattern::SineWave),
            "erratic" => Some(Pattern::Erratic),
            "sineerratic" => Some(Pattern::SineErratic),
            "pulse" => Some(Pattern::Pulse),
            "accelerating" => Some(Pattern::Accelerating),
            "zigzag" => Some(Pattern::ZigZag),
            "burst" => Some(Pattern::Burst),
            _ => None,
        }
    }

    /// Operating range the fish is clamped to under this pattern
    pub fn bounds(&self) -> (f32, f32) {
        match self {
            Pattern::SineWave => (0.5 - SINE_AMPLITUDE, 0.5 + SINE_AMPLITUDE),
            Pattern::Pulse => (0.5 - PULSE_AMPLITUDE, 0.5 + PULSE_AMPLITUDE),
            Pattern::Erratic | Pattern::SineErratic => (ERRATIC_MIN, ERRATIC_MAX),
            Pattern::Default | Pattern::Accelerating | Pattern::ZigZag | Pattern::Burst => {
                (EDGE_MIN, EDGE_MAX)
            }
        }
    }

    /// Whether this pattern reports edge bounces
    pub fn detects_bounces(&self) -> bool {
        matches!(self, Pattern::SineWave | Pattern::Pulse)
    }

    /// Harder pattern substituted once the bounce threshold is reached
    pub fn dynamic_successor(&self) -> Pattern {
        match self {
            Pattern::SineWave => Pattern::SineErratic,
            Pattern::Pulse => Pattern::Burst,
            Pattern::Default => Pattern::Accelerating,
            Pattern::Erratic => Pattern::SineErratic,
            Pattern::ZigZag => Pattern::Burst,
            // Already the hardest variants of their family
            Pattern::SineErratic | Pattern::Accelerating | Pattern::Burst => *self,
        }
    }
}

impl std::fmt::Display for Pattern {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
