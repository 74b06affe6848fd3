//! Fish motion model
//!
//! Pure per-tick integration of the fish position under its active pattern.
//! Velocities are expressed in normalized units per tick; time-driven
//! patterns read the session's elapsed seconds.

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::pattern::*;
use crate::consts::MAX_TARGET_SPEED;
use crate::reflect_at_bounds;

/// Side of the play field where a bounce was detected
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Edge {
    Left,
    Right,
}

/// The fish being reeled in
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TargetState {
    /// Normalized position in [0, 1]
    pub position: f32,
    /// Signed velocity (units per tick)
    pub velocity: f32,
    /// Active motion pattern
    pub pattern: Pattern,
    /// Session time (seconds) when the active pattern took over
    pub pattern_since: f32,
    /// Ticks spent in the active pattern
    pub pattern_ticks: u32,
}

impl TargetState {
    pub fn new(position: f32, velocity: f32, pattern: Pattern) -> Self {
        Self {
            position,
            velocity,
            pattern,
            pattern_since: 0.0,
            pattern_ticks: 0,
        }
    }

    /// Swap the active pattern, restarting its local counters
    pub fn switch_pattern(&mut self, pattern: Pattern, elapsed: f32) {
        self.pattern = pattern;
        self.pattern_since = elapsed;
        self.pattern_ticks = 0;
    }
}

/// Result of advancing the fish by one tick
#[derive(Debug, Clone)]
pub struct Motion {
    pub target: TargetState,
    /// Edge bounce observed this tick (sine-driven patterns only)
    pub bounce: Option<Edge>,
}

/// Advance the fish one tick.
///
/// `elapsed` is the session time in seconds at the end of this tick. Only
/// `Erratic` and `SineErratic` draw from `rng`.
pub fn advance<R: Rng + ?Sized>(target: &TargetState, elapsed: f32, rng: &mut R) -> Motion {
    let (lo, hi) = target.pattern.bounds();
    let local_time = (elapsed - target.pattern_since).max(0.0);
    let pattern_ticks = target.pattern_ticks.saturating_add(1);
    // Driving sine value, for patterns that have one
    let mut wave = None;

    let (position, velocity) = match target.pattern {
        Pattern::Default => {
            reflect_at_bounds(target.position + target.velocity, target.velocity, lo, hi)
        }

        Pattern::SineWave => {
            let sine = (elapsed * SINE_FREQUENCY).sin();
            wave = Some(sine);
            ((0.5 + sine * SINE_AMPLITUDE).clamp(lo, hi), target.velocity)
        }

        Pattern::Erratic => {
            let mut velocity = target.velocity;
            if rng.random_bool(ERRATIC_FLIP_CHANCE) {
                velocity = -velocity;
            }
            reflect_at_bounds(target.position + velocity, velocity, lo, hi)
        }

        Pattern::SineErratic => {
            let mut velocity = target.velocity;
            if rng.random_bool(SINE_ERRATIC_CHANGE_CHANCE) {
                if rng.random_bool(0.5) {
                    velocity = -velocity;
                } else {
                    velocity *= rng.random_range(0.5..1.5);
                }
                velocity = velocity.clamp(-MAX_TARGET_SPEED, MAX_TARGET_SPEED);
            }
            let baseline = 0.5 + (elapsed * SINE_ERRATIC_FREQUENCY).sin() * SINE_ERRATIC_AMPLITUDE;
            let drift = target.position + velocity * rng.random_range(0.5..1.5);
            let blended =
                baseline * (1.0 - SINE_ERRATIC_DRIFT_WEIGHT) + drift * SINE_ERRATIC_DRIFT_WEIGHT;
            reflect_at_bounds(blended, velocity, lo, hi)
        }

        Pattern::Pulse => {
            let frequency = pulse_frequency(elapsed);
            let sine = (elapsed * frequency).sin();
            wave = Some(sine);
            ((0.5 + sine * PULSE_AMPLITUDE).clamp(lo, hi), target.velocity)
        }

        Pattern::Accelerating => {
            let step = target.velocity * acceleration_multiplier(local_time);
            reflect_at_bounds(target.position + step, target.velocity, lo, hi)
        }

        Pattern::ZigZag => {
            let velocity = if pattern_ticks % ZIGZAG_INTERVAL_TICKS == 0 {
                -target.velocity
            } else {
                target.velocity
            };
            reflect_at_bounds(target.position + velocity, velocity, lo, hi)
        }

        Pattern::Burst => {
            let step = if burst_active(local_time) {
                target.velocity * BURST_MULTIPLIER
            } else {
                target.velocity
            };
            reflect_at_bounds(target.position + step, target.velocity, lo, hi)
        }
    };

    let bounce = wave
        .filter(|_| target.pattern.detects_bounces())
        .and_then(|sine| classify_bounce(sine, position));

    Motion {
        target: TargetState {
            position,
            velocity,
            pattern: target.pattern,
            pattern_since: target.pattern_since,
            pattern_ticks,
        },
        bounce,
    }
}

/// Pulse alternates fast and slow frequencies every `PULSE_PERIOD` seconds
pub fn pulse_frequency(elapsed: f32) -> f32 {
    if (elapsed / PULSE_PERIOD).floor() as u64 % 2 == 0 {
        PULSE_FAST_FREQUENCY
    } else {
        PULSE_SLOW_FREQUENCY
    }
}

/// Accelerating speed multiplier after `local_time` seconds in the pattern
pub fn acceleration_multiplier(local_time: f32) -> f32 {
    (1.0 + local_time * ACCEL_RATE).min(ACCEL_MAX_MULTIPLIER)
}

/// Burst is on for the first third of each cycle
pub fn burst_active(local_time: f32) -> bool {
    local_time.rem_euclid(BURST_PERIOD) < BURST_PERIOD / 3.0
}

fn classify_bounce(wave: f32, position: f32) -> Option<Edge> {
    if wave.abs() <= BOUNCE_SINE_THRESHOLD {
        return None;
    }
    if position > BOUNCE_RIGHT_EDGE {
        Some(Edge::Right)
    } else if position < BOUNCE_LEFT_EDGE {
        Some(Edge::Left)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn rng() -> Pcg32 {
        Pcg32::seed_from_u64(7)
    }

    #[test]
    fn test_default_bounces_off_right_edge() {
        let target = TargetState::new(0.95, 0.05, Pattern::Default);
        let motion = advance(&target, 0.016, &mut rng());
        assert!(motion.target.position <= 0.95);
        assert!(motion.target.velocity < 0.0);
        assert_eq!(motion.bounce, None);
    }

    #[test]
    fn test_default_bounces_off_left_edge() {
        let target = TargetState::new(0.06, -0.03, Pattern::Default);
        let motion = advance(&target, 0.016, &mut rng());
        assert!((motion.target.position - EDGE_MIN).abs() < 1e-6);
        assert!(motion.target.velocity > 0.0);
    }

    #[test]
    fn test_default_zero_velocity_stays_put() {
        let target = TargetState::new(0.5, 0.0, Pattern::Default);
        let motion = advance(&target, 1.0, &mut rng());
        assert_eq!(motion.target.position, 0.5);
    }

    #[test]
    fn test_sine_wave_follows_phase() {
        let target = TargetState::new(0.5, 0.01, Pattern::SineWave);
        let elapsed = 0.3;
        let motion = advance(&target, elapsed, &mut rng());
        let expected = 0.5 + (elapsed * SINE_FREQUENCY).sin() * SINE_AMPLITUDE;
        assert!((motion.target.position - expected).abs() < 1e-6);
        assert_eq!(motion.target.velocity, 0.01);
    }

    #[test]
    fn test_sine_wave_reports_bounces_near_peaks() {
        let target = TargetState::new(0.5, 0.0, Pattern::SineWave);
        // sin(2t) = 1 at t = pi/4
        let right = advance(&target, std::f32::consts::FRAC_PI_4, &mut rng());
        assert_eq!(right.bounce, Some(Edge::Right));
        // sin(2t) = -1 at t = 3pi/4
        let left = advance(&target, 3.0 * std::f32::consts::FRAC_PI_4, &mut rng());
        assert_eq!(left.bounce, Some(Edge::Left));
        // Mid-swing: no bounce
        let mid = advance(&target, 0.0, &mut rng());
        assert_eq!(mid.bounce, None);
    }

    #[test]
    fn test_pulse_reports_bounces_near_peaks() {
        let target = TargetState::new(0.5, 0.0, Pattern::Pulse);
        // Fast phase: sin(4t) = 1 at t = pi/8, -1 at t = 3pi/8
        let right = advance(&target, std::f32::consts::FRAC_PI_8, &mut rng());
        assert_eq!(right.bounce, Some(Edge::Right));
        let left = advance(&target, 3.0 * std::f32::consts::FRAC_PI_8, &mut rng());
        assert_eq!(left.bounce, Some(Edge::Left));
        let mid = advance(&target, 0.0, &mut rng());
        assert_eq!(mid.bounce, None);
    }

    #[test]
    fn test_accelerating_bounces_off_right_edge() {
        let target = TargetState::new(0.94, 0.05, Pattern::Accelerating);
        let motion = advance(&target, 0.016, &mut rng());
        assert!(motion.target.position <= EDGE_MAX);
        assert!(motion.target.velocity < 0.0);
    }

    #[test]
    fn test_accelerating_bounces_off_left_edge() {
        let target = TargetState::new(0.06, -0.05, Pattern::Accelerating);
        let motion = advance(&target, 0.016, &mut rng());
        assert!(motion.target.position >= EDGE_MIN);
        assert!(motion.target.velocity > 0.0);
    }

    #[test]
    fn test_burst_bounces_off_edges() {
        // Inside the burst window: the step is multiplied but the flip still happens
        let target = TargetState::new(0.94, 0.05, Pattern::Burst);
        let motion = advance(&target, 0.1, &mut rng());
        assert!(motion.target.position <= EDGE_MAX);
        assert!(motion.target.velocity < 0.0);

        let target = TargetState::new(0.06, -0.05, Pattern::Burst);
        let motion = advance(&target, 0.1, &mut rng());
        assert!(motion.target.position >= EDGE_MIN);
        assert!(motion.target.velocity > 0.0);
    }

    #[test]
    fn test_accepts_dyn_rng() {
        let mut boxed: Box<dyn rand::RngCore> = Box::new(Pcg32::seed_from_u64(11));
        let target = TargetState::new(0.5, 0.02, Pattern::Erratic);
        let motion = advance(&target, 0.016, &mut *boxed);
        assert!(motion.target.position >= ERRATIC_MIN && motion.target.position <= ERRATIC_MAX);
    }

    #[test]
    fn test_linear_patterns_never_report_bounces() {
        for pattern in [Pattern::Default, Pattern::Erratic, Pattern::ZigZag, Pattern::Burst] {
            let mut target = TargetState::new(0.9, 0.2, pattern);
            let mut rng = rng();
            for i in 1..200 {
                let motion = advance(&target, i as f32 * 0.016, &mut rng);
                assert_eq!(motion.bounce, None);
                target = motion.target;
            }
        }
    }

    #[test]
    fn test_pulse_alternates_frequency() {
        assert_eq!(pulse_frequency(0.5), PULSE_FAST_FREQUENCY);
        assert_eq!(pulse_frequency(PULSE_PERIOD + 0.5), PULSE_SLOW_FREQUENCY);
        assert_eq!(pulse_frequency(2.0 * PULSE_PERIOD + 0.5), PULSE_FAST_FREQUENCY);
    }

    #[test]
    fn test_acceleration_grows_then_caps() {
        assert_eq!(acceleration_multiplier(0.0), 1.0);
        assert!(acceleration_multiplier(2.0) > acceleration_multiplier(1.0));
        assert_eq!(acceleration_multiplier(1000.0), ACCEL_MAX_MULTIPLIER);
    }

    #[test]
    fn test_accelerating_uses_pattern_local_time() {
        let mut target = TargetState::new(0.3, 0.01, Pattern::Default);
        target.switch_pattern(Pattern::Accelerating, 100.0);
        let motion = advance(&target, 100.0, &mut rng());
        // Fresh pattern: multiplier is 1 even though the session is old
        assert!((motion.target.position - 0.31).abs() < 1e-6);
    }

    #[test]
    fn test_zigzag_flips_on_interval() {
        let mut target = TargetState::new(0.5, 0.001, Pattern::ZigZag);
        let mut rng = rng();
        for i in 1..ZIGZAG_INTERVAL_TICKS {
            target = advance(&target, i as f32 * 0.016, &mut rng).target;
            assert!(target.velocity > 0.0);
        }
        target = advance(&target, 1.0, &mut rng).target;
        assert!(target.velocity < 0.0);
        assert_eq!(target.pattern_ticks, ZIGZAG_INTERVAL_TICKS);
    }

    #[test]
    fn test_burst_duty_cycle() {
        assert!(burst_active(0.0));
        assert!(burst_active(BURST_PERIOD / 3.0 - 0.01));
        assert!(!burst_active(BURST_PERIOD / 2.0));
        assert!(burst_active(BURST_PERIOD + 0.1));

        let target = TargetState::new(0.5, 0.01, Pattern::Burst);
        let motion = advance(&target, 0.1, &mut rng());
        assert!((motion.target.position - (0.5 + 0.01 * BURST_MULTIPLIER)).abs() < 1e-6);
        // Multiplier scales the step, not the stored velocity
        assert_eq!(motion.target.velocity, 0.01);
    }

    #[test]
    fn test_erratic_is_reproducible_with_same_seed() {
        let start = TargetState::new(0.5, 0.02, Pattern::SineErratic);
        let mut a = start.clone();
        let mut b = start;
        let mut rng_a = Pcg32::seed_from_u64(42);
        let mut rng_b = Pcg32::seed_from_u64(42);
        for i in 1..500 {
            let t = i as f32 * 0.016;
            a = advance(&a, t, &mut rng_a).target;
            b = advance(&b, t, &mut rng_b).target;
            assert_eq!(a.position, b.position);
            assert_eq!(a.velocity, b.velocity);
        }
    }

    #[test]
    fn test_erratic_stays_in_bounds() {
        for pattern in [Pattern::Erratic, Pattern::SineErratic] {
            let mut target = TargetState::new(0.5, 0.04, pattern);
            let mut rng = Pcg32::seed_from_u64(3);
            for i in 1..2000 {
                target = advance(&target, i as f32 * 0.016, &mut rng).target;
                assert!(target.position >= ERRATIC_MIN && target.position <= ERRATIC_MAX);
                assert!(target.velocity.abs() <= MAX_TARGET_SPEED);
            }
        }
    }
}
