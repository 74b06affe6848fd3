//! Fixed timestep simulation tick
//!
//! Composes fish motion, pattern escalation, the catch bar and progress in
//! that order. A tick computes every new value first and only commits once
//! all of them are finite, so a faulted tick never leaks into state.

use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::motion::{self, TargetState};
use super::progress::{self, ProgressState};
use super::selector::{BounceCounters, PatternSelector};
use super::zone::{self, ZoneState};
use crate::config::SimulationConfig;
use crate::error::SimulationFault;
use crate::protocol::TickSnapshot;

/// Input for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Reel control currently held
    pub holding: bool,
    /// Authoritative fish position; replaces local motion when set
    pub target_sync: Option<f32>,
}

/// What a tick produced
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TickResult {
    Running(TickSnapshot),
    /// Progress reached the goal on this tick
    Won(TickSnapshot),
    Fault(SimulationFault),
}

/// Everything one session mutates
#[derive(Debug, Clone)]
pub struct SimState {
    /// Seed the RNG was built from (for replay)
    pub seed: u64,
    rng: Pcg32,
    /// Ticks run so far
    pub time_ticks: u64,
    /// Session time in seconds
    pub elapsed: f32,
    pub target: TargetState,
    pub zone: ZoneState,
    pub progress: ProgressState,
    pub selector: PatternSelector,
    /// Ticks with the fish inside the bar
    pub captured_ticks: u64,
}

impl SimState {
    pub fn new(config: &SimulationConfig, target: TargetState, seed: u64) -> Self {
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            time_ticks: 0,
            elapsed: 0.0,
            target,
            zone: ZoneState::new(config.initial_zone_position),
            progress: ProgressState::default(),
            selector: PatternSelector::new(config.bounce_threshold, config.dynamic_pattern),
            captured_ticks: 0,
        }
    }

    pub fn counters(&self) -> &BounceCounters {
        &self.selector.counters
    }

    /// Current values as published to the host
    pub fn snapshot(&self) -> TickSnapshot {
        TickSnapshot {
            fish_position: self.target.position.clamp(0.0, 1.0),
            bar_position: self.zone.position.clamp(0.0, 1.0),
            progress: self.progress.value,
        }
    }
}

/// Advance the session by one fixed timestep
pub fn tick(state: &mut SimState, config: &SimulationConfig, input: &TickInput) -> TickResult {
    let time_ticks = state.time_ticks + 1;
    let elapsed = time_ticks as f32 * config.tick_interval;

    // Fish
    let mut target = state.target.clone();
    let mut selector = state.selector.clone();
    match input.target_sync {
        Some(position) => {
            target.position = position.clamp(0.0, 1.0);
            target.pattern_ticks = target.pattern_ticks.saturating_add(1);
        }
        None => {
            let motion = motion::advance(&target, elapsed, &mut state.rng);
            target = motion.target;
            if let Some(next) = selector.observe(motion.bounce, target.pattern) {
                target.switch_pattern(next, elapsed);
            }
        }
    }

    // Catch bar
    let zone = zone::advance(state.zone, input.holding, config.zone_speed, config.tick_interval);

    // Progress
    let captured = progress::is_captured(target.position, zone.position, config.capture_half_width);
    let (progress, won) = progress::update(
        state.progress,
        target.position,
        zone.position,
        config.capture_half_width,
        config.gain_rate,
        config.decay_rate,
    );

    if let Some(fault) = check_finite(&target, &zone, &progress) {
        return TickResult::Fault(fault);
    }

    state.time_ticks = time_ticks;
    state.elapsed = elapsed;
    state.target = target;
    state.selector = selector;
    state.zone = zone;
    state.progress = progress;
    if captured {
        state.captured_ticks += 1;
    }

    let snapshot = state.snapshot();
    if won {
        TickResult::Won(snapshot)
    } else {
        TickResult::Running(snapshot)
    }
}

fn check_finite(
    target: &TargetState,
    zone: &ZoneState,
    progress: &ProgressState,
) -> Option<SimulationFault> {
    if !target.position.is_finite() {
        Some(SimulationFault::TargetPosition(target.position))
    } else if !target.velocity.is_finite() {
        Some(SimulationFault::TargetVelocity(target.velocity))
    } else if !zone.position.is_finite() {
        Some(SimulationFault::ZonePosition(zone.position))
    } else if !progress.value.is_finite() {
        Some(SimulationFault::Progress(progress.value))
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::pattern::Pattern;

    fn still_config() -> SimulationConfig {
        SimulationConfig {
            zone_speed: 0.0,
            ..Default::default()
        }
    }

    #[test]
    fn test_tick_advances_clock() {
        let config = still_config();
        let mut state = SimState::new(&config, TargetState::new(0.5, 0.0, Pattern::Default), 1);
        tick(&mut state, &config, &TickInput::default());
        tick(&mut state, &config, &TickInput::default());
        assert_eq!(state.time_ticks, 2);
        assert!((state.elapsed - 2.0 * config.tick_interval).abs() < 1e-6);
    }

    #[test]
    fn test_captured_tick_gains() {
        let config = still_config();
        let mut state = SimState::new(&config, TargetState::new(0.5, 0.0, Pattern::Default), 1);
        let result = tick(&mut state, &config, &TickInput::default());
        assert!(matches!(result, TickResult::Running(s) if s.progress == config.gain_rate));
        assert_eq!(state.captured_ticks, 1);
    }

    #[test]
    fn test_target_sync_replaces_motion() {
        let config = still_config();
        let mut state = SimState::new(&config, TargetState::new(0.5, 0.2, Pattern::Default), 1);
        let input = TickInput {
            target_sync: Some(1.7),
            ..Default::default()
        };
        let TickResult::Running(snapshot) = tick(&mut state, &config, &input) else {
            panic!("expected a running tick");
        };
        assert_eq!(snapshot.fish_position, 1.0);
        // Velocity untouched: motion did not run
        assert_eq!(state.target.velocity, 0.2);
    }

    #[test]
    fn test_fault_leaves_state_untouched() {
        let config = still_config();
        let start = TargetState::new(0.5, f32::INFINITY, Pattern::Default);
        let mut state = SimState::new(&config, start, 1);
        let result = tick(&mut state, &config, &TickInput::default());
        assert!(matches!(result, TickResult::Fault(SimulationFault::TargetVelocity(_))));
        assert_eq!(state.time_ticks, 0);
        assert_eq!(state.target.position, 0.5);
    }

    #[test]
    fn test_determinism() {
        // Same seed, same inputs: identical sessions even with random patterns
        let config = SimulationConfig {
            pattern: Pattern::SineErratic,
            ..Default::default()
        };
        let start = TargetState::new(0.4, 0.02, Pattern::SineErratic);
        let mut state1 = SimState::new(&config, start.clone(), 99999);
        let mut state2 = SimState::new(&config, start, 99999);

        for i in 0..300 {
            let input = TickInput {
                holding: i % 40 < 20,
                ..Default::default()
            };
            tick(&mut state1, &config, &input);
            tick(&mut state2, &config, &input);
        }

        assert_eq!(state1.time_ticks, state2.time_ticks);
        assert_eq!(state1.target.position, state2.target.position);
        assert_eq!(state1.zone.position, state2.zone.position);
        assert_eq!(state1.progress.value, state2.progress.value);
    }

    #[test]
    fn test_sine_session_escalates_once() {
        let config = SimulationConfig {
            pattern: Pattern::SineWave,
            bounce_threshold: 2,
            ..Default::default()
        };
        let mut state = SimState::new(&config, TargetState::new(0.5, 0.01, Pattern::SineWave), 5);
        // ~16 seconds: many sine peaks
        for _ in 0..1000 {
            tick(&mut state, &config, &TickInput::default());
        }
        let counters = state.counters();
        assert!(counters.has_transitioned);
        assert_eq!(state.target.pattern, Pattern::SineErratic);
        // SineErratic reports no bounces, so counting stopped at the switch
        assert_eq!(counters.total_bounces, 2);
    }

    #[test]
    fn test_pulse_session_escalates_once() {
        let config = SimulationConfig {
            pattern: Pattern::Pulse,
            bounce_threshold: 2,
            ..Default::default()
        };
        let mut state = SimState::new(&config, TargetState::new(0.5, 0.01, Pattern::Pulse), 5);
        for _ in 0..2000 {
            tick(&mut state, &config, &TickInput::default());
        }
        let counters = state.counters();
        assert!(counters.has_transitioned);
        assert_eq!(state.target.pattern, Pattern::Burst);
        assert_eq!(counters.total_bounces, 2);
        assert_eq!(counters.left_bounces, 1);
        assert_eq!(counters.right_bounces, 1);
    }
}
