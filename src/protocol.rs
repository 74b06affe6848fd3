//! Boundary messages exchanged with the host
//!
//! Inbound messages come from the presentation and authority layers;
//! outbound events are queued by the controller and drained by the host.
//! All payloads are camelCase JSON objects tagged by `type`.

use serde::{Deserialize, Serialize};

/// Parameters for starting a session; missing fields take config defaults
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SessionStart {
    pub initial_position: Option<f32>,
    pub initial_velocity: Option<f32>,
    /// Pattern name (see `Pattern::from_name`)
    pub pattern: Option<String>,
    /// Replay seed for the erratic patterns
    pub seed: Option<u64>,
}

/// Messages the host sends into the simulation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum HostMessage {
    SessionStart(SessionStart),
    /// Host-initiated early termination (e.g. the line broke)
    SessionStop,
    /// Press/release edge of the reel control
    ControlInput { pressed: bool },
    /// Authoritative fish position (remote motion mode)
    TargetSync {
        #[serde(rename = "fishPosition")]
        fish_position: f32,
    },
}

impl HostMessage {
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }
}

/// Published once per tick while a session is active
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TickSnapshot {
    pub fish_position: f32,
    pub bar_position: f32,
    pub progress: f32,
}

/// Published exactly once per session
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionOutcome {
    pub success: bool,
    pub final_progress: f32,
    pub elapsed_time_seconds: f32,
}

/// Outbound event queue entry
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum SessionEvent {
    Snapshot(TickSnapshot),
    Outcome(SessionOutcome),
}

impl SessionEvent {
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}
