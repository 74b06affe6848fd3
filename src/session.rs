//! Session lifecycle
//!
//! `SessionController` is the only public way to drive the simulation:
//! start, stop, control input, authoritative fish sync, and time. It owns
//! every piece of session state and queues outbound events for the host.
//!
//! Lifecycle: Idle -> Active -> {Completed(success) | Completed(failure) |
//! Aborted} -> Idle. The terminal state is reported once through a
//! `SessionOutcome` event and kept in `last_summary`.

use serde::{Deserialize, Serialize};

use crate::config::{ControllerOptions, SimulationConfig};
use crate::consts::{MAX_FRAME_DT, MAX_TARGET_SPEED};
use crate::error::{ConfigError, SimulationFault};
use crate::protocol::{HostMessage, SessionEvent, SessionOutcome, SessionStart, TickSnapshot};
use crate::sim::{
    BounceCounters, Pattern, SimState, TargetState, TickInput, TickResult, ZoneState, tick,
};

/// Whether a session is running
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionPhase {
    Idle,
    Active,
}

/// How a session ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum StopReason {
    /// Fish landed
    Success,
    /// Fish escaped or the simulation faulted
    Failure,
    /// Host cancelled
    Abort,
}

impl StopReason {
    pub fn is_success(&self) -> bool {
        *self == StopReason::Success
    }
}

/// Record of the last finished session
#[derive(Debug, Clone)]
pub struct SessionSummary {
    pub reason: StopReason,
    pub outcome: SessionOutcome,
    pub seed: u64,
    pub ticks: u64,
    pub captured_ticks: u64,
    pub bounces: BounceCounters,
    pub final_pattern: Pattern,
    pub fault: Option<SimulationFault>,
}

impl SessionSummary {
    /// Share of ticks the fish spent inside the bar (0-1)
    pub fn capture_ratio(&self) -> f32 {
        if self.ticks == 0 {
            0.0
        } else {
            self.captured_ticks as f32 / self.ticks as f32
        }
    }
}

#[derive(Debug)]
struct ActiveSession {
    config: SimulationConfig,
    sim: SimState,
}

/// Drives one minigame instance; at most one session at a time
#[derive(Debug)]
pub struct SessionController {
    defaults: SimulationConfig,
    options: ControllerOptions,
    session: Option<ActiveSession>,
    holding: bool,
    pending_sync: Option<f32>,
    accumulator: f32,
    events: Vec<SessionEvent>,
    last_summary: Option<SessionSummary>,
}

impl SessionController {
    /// `defaults` is used for sessions started through `handle_message`
    pub fn new(defaults: SimulationConfig, options: ControllerOptions) -> Self {
        Self {
            defaults,
            options,
            session: None,
            holding: false,
            pending_sync: None,
            accumulator: 0.0,
            events: Vec::new(),
            last_summary: None,
        }
    }

    pub fn phase(&self) -> SessionPhase {
        if self.session.is_some() {
            SessionPhase::Active
        } else {
            SessionPhase::Idle
        }
    }

    pub fn is_active(&self) -> bool {
        self.session.is_some()
    }

    /// Config of the running session
    pub fn config(&self) -> Option<&SimulationConfig> {
        self.session.as_ref().map(|s| &s.config)
    }

    pub fn target(&self) -> Option<&TargetState> {
        self.session.as_ref().map(|s| &s.sim.target)
    }

    pub fn zone(&self) -> Option<&ZoneState> {
        self.session.as_ref().map(|s| &s.sim.zone)
    }

    pub fn counters(&self) -> Option<&BounceCounters> {
        self.session.as_ref().map(|s| s.sim.counters())
    }

    /// Current published values (None while idle)
    pub fn snapshot(&self) -> Option<TickSnapshot> {
        self.session.as_ref().map(|s| s.sim.snapshot())
    }

    pub fn last_summary(&self) -> Option<&SessionSummary> {
        self.last_summary.as_ref()
    }

    /// Take every queued outbound event
    pub fn drain_events(&mut self) -> Vec<SessionEvent> {
        std::mem::take(&mut self.events)
    }

    /// Start a session.
    ///
    /// Rejected without touching any state if a session is active, the
    /// config is invalid, or an override is out of range.
    pub fn start(
        &mut self,
        config: SimulationConfig,
        start: SessionStart,
    ) -> Result<(), ConfigError> {
        if self.session.is_some() {
            log::warn!("Rejected session start: a session is already active");
            return Err(ConfigError::SessionActive);
        }
        if let Err(err) = config.validate() {
            log::warn!("Rejected session start: {}", err);
            return Err(err);
        }
        let target = match resolve_target(&config, &start) {
            Ok(target) => target,
            Err(err) => {
                log::warn!("Rejected session start: {}", err);
                return Err(err);
            }
        };

        let seed = start
            .seed
            .or(config.seed)
            .unwrap_or_else(rand::random::<u64>);
        log::info!(
            "Session start: pattern={} pos={:.3} vel={:.4} seed={} half_width={} tick={}s",
            target.pattern,
            target.position,
            target.velocity,
            seed,
            config.capture_half_width,
            config.tick_interval
        );

        self.holding = false;
        self.pending_sync = None;
        self.accumulator = 0.0;
        let sim = SimState::new(&config, target, seed);
        self.session = Some(ActiveSession { config, sim });
        Ok(())
    }

    /// Start with the controller's default config
    pub fn start_default(&mut self, start: SessionStart) -> Result<(), ConfigError> {
        self.start(self.defaults.clone(), start)
    }

    /// End the active session and emit its outcome. No-op while idle.
    pub fn stop(&mut self, reason: StopReason) {
        self.finish(reason, None);
    }

    pub fn on_control_pressed(&mut self) {
        if self.is_active() {
            self.holding = true;
        }
    }

    pub fn on_control_released(&mut self) {
        if self.is_active() {
            self.holding = false;
        }
    }

    /// Authoritative fish position for the next tick (remote motion mode)
    pub fn sync_target(&mut self, fish_position: f32) {
        if !self.is_active() {
            return;
        }
        if self.options.local_motion {
            log::debug!("Ignoring target sync: fish motion is local");
            return;
        }
        if !fish_position.is_finite() {
            log::warn!("Ignoring non-finite target sync ({})", fish_position);
            return;
        }
        self.pending_sync = Some(fish_position);
    }

    /// Dispatch an inbound host message
    pub fn handle_message(&mut self, message: HostMessage) -> Result<(), ConfigError> {
        match message {
            HostMessage::SessionStart(start) => self.start_default(start)?,
            HostMessage::SessionStop => self.stop(StopReason::Abort),
            HostMessage::ControlInput { pressed: true } => self.on_control_pressed(),
            HostMessage::ControlInput { pressed: false } => self.on_control_released(),
            HostMessage::TargetSync { fish_position } => self.sync_target(fish_position),
        }
        Ok(())
    }

    /// Run exactly one tick. Returns false while idle.
    pub fn tick(&mut self) -> bool {
        let Some(session) = self.session.as_mut() else {
            return false;
        };

        let target_sync = if self.options.local_motion {
            None
        } else {
            // Without a fresh sync the fish holds its last known position
            Some(
                self.pending_sync
                    .take()
                    .unwrap_or(session.sim.target.position),
            )
        };
        let input = TickInput {
            holding: self.holding,
            target_sync,
        };

        match tick(&mut session.sim, &session.config, &input) {
            TickResult::Running(snapshot) => {
                self.events.push(SessionEvent::Snapshot(snapshot));
            }
            TickResult::Won(snapshot) => {
                self.events.push(SessionEvent::Snapshot(snapshot));
                self.finish(StopReason::Success, None);
            }
            TickResult::Fault(fault) => {
                log::error!("Simulation fault, failing session: {}", fault);
                self.finish(StopReason::Failure, Some(fault));
            }
        }
        true
    }

    /// Feed host frame time; runs as many fixed ticks as fit.
    ///
    /// Frame time is clamped to `MAX_FRAME_DT` and at most `max_substeps`
    /// ticks run per call. Returns the number of ticks run.
    pub fn advance(&mut self, frame_dt: f32) -> u32 {
        let Some(session) = self.session.as_ref() else {
            return 0;
        };
        let step = session.config.tick_interval;
        let max_substeps = session.config.max_substeps;

        let dt = if frame_dt.is_finite() {
            frame_dt.clamp(0.0, MAX_FRAME_DT)
        } else {
            log::warn!("Ignoring non-finite frame dt ({})", frame_dt);
            0.0
        };
        self.accumulator = (self.accumulator + dt).min(step * max_substeps as f32);

        let mut substeps = 0;
        while self.accumulator >= step && substeps < max_substeps {
            self.accumulator -= step;
            substeps += 1;
            self.tick();
            if !self.is_active() {
                break;
            }
        }
        substeps
    }

    fn finish(&mut self, reason: StopReason, fault: Option<SimulationFault>) {
        let Some(session) = self.session.take() else {
            return;
        };
        let sim = session.sim;

        let outcome = SessionOutcome {
            success: reason.is_success(),
            final_progress: sim.progress.value,
            elapsed_time_seconds: sim.elapsed,
        };
        log::info!(
            "Session end: {:?} progress={:.1} elapsed={:.2}s ticks={} bounces={}",
            reason,
            outcome.final_progress,
            outcome.elapsed_time_seconds,
            sim.time_ticks,
            sim.selector.counters.total_bounces
        );

        self.events.push(SessionEvent::Outcome(outcome));
        self.last_summary = Some(SessionSummary {
            reason,
            outcome,
            seed: sim.seed,
            ticks: sim.time_ticks,
            captured_ticks: sim.captured_ticks,
            bounces: sim.selector.counters.clone(),
            final_pattern: sim.target.pattern,
            fault,
        });
        self.holding = false;
        self.pending_sync = None;
        self.accumulator = 0.0;
    }
}

impl Default for SessionController {
    fn default() -> Self {
        Self::new(SimulationConfig::default(), ControllerOptions::default())
    }
}

/// Apply start overrides on top of the config defaults
fn resolve_target(
    config: &SimulationConfig,
    start: &SessionStart,
) -> Result<TargetState, ConfigError> {
    let pattern = match start.pattern.as_deref() {
        Some(name) => {
            Pattern::from_name(name).ok_or_else(|| ConfigError::UnknownPattern(name.to_string()))?
        }
        None => config.pattern,
    };

    let position = start.initial_position.unwrap_or(config.initial_position);
    ConfigError::check_range("initialPosition", position, 0.0, 1.0)?;

    let velocity = start.initial_velocity.unwrap_or(config.initial_velocity);
    ConfigError::check_range("initialVelocity", velocity, -MAX_TARGET_SPEED, MAX_TARGET_SPEED)?;

    Ok(TargetState::new(position, velocity, pattern))
}
