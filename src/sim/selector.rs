//! Bounce tracking and the one-shot dynamic pattern switch

use serde::{Deserialize, Serialize};

use super::motion::Edge;
use super::pattern::Pattern;

/// Default number of edge bounces before the fish switches pattern
pub const DEFAULT_BOUNCE_THRESHOLD: u32 = 6;

/// Edge bounce statistics for the current session
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BounceCounters {
    pub total_bounces: u32,
    pub left_bounces: u32,
    pub right_bounces: u32,
    /// Latch: set once the dynamic pattern has taken over
    pub has_transitioned: bool,
    /// Edge reported on the previous tick (a held peak counts once)
    #[serde(skip)]
    last_edge: Option<Edge>,
}

/// Decides when the fish escalates to its dynamic pattern
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PatternSelector {
    pub counters: BounceCounters,
    /// Bounces needed to fire the transition
    pub threshold: u32,
    /// Forced dynamic pattern (otherwise derived from the active one)
    pub dynamic_override: Option<Pattern>,
}

impl PatternSelector {
    pub fn new(threshold: u32, dynamic_override: Option<Pattern>) -> Self {
        Self {
            counters: BounceCounters::default(),
            threshold: threshold.max(1),
            dynamic_override,
        }
    }

    /// Feed this tick's bounce observation.
    ///
    /// Returns the pattern to switch to when the threshold is first reached;
    /// `None` on every other call, including all calls after the latch fired.
    pub fn observe(&mut self, bounce: Option<Edge>, active: Pattern) -> Option<Pattern> {
        let previous = self.counters.last_edge;
        self.counters.last_edge = bounce;

        let edge = bounce?;
        if previous == Some(edge) {
            return None;
        }

        self.counters.total_bounces += 1;
        match edge {
            Edge::Left => self.counters.left_bounces += 1,
            Edge::Right => self.counters.right_bounces += 1,
        }
        log::debug!(
            "Bounce {:?} (total {}, left {}, right {})",
            edge,
            self.counters.total_bounces,
            self.counters.left_bounces,
            self.counters.right_bounces
        );

        if self.counters.has_transitioned || self.counters.total_bounces < self.threshold {
            return None;
        }

        self.counters.has_transitioned = true;
        let next = self
            .dynamic_override
            .unwrap_or_else(|| active.dynamic_successor());
        log::info!(
            "Fish escalates after {} bounces: {} -> {}",
            self.counters.total_bounces,
            active,
            next
        );
        Some(next)
    }
}
