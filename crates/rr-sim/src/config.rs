//! Swarm-wide configuration.

use rr_comm::{CommConfig, MalformedPolicy, MAX_RELAY_COUNT};
use rr_core::{time::DEFAULT_TIME_STEP_MS, PeerId, Tick};
use rr_radio::MediumConfig;

/// Top-level swarm configuration.
///
/// Typically loaded from a JSON file by the application crate and passed to
/// [`SwarmBuilder`][crate::SwarmBuilder].  The communication fields are
/// copied into every robot's [`CommConfig`].
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SwarmConfig {
    /// Rounds to simulate with [`Swarm::run`][crate::Swarm::run].
    pub total_ticks: u64,

    /// Master seed.  Robot RNGs derive from it; the medium has its own seed.
    pub seed: u64,

    /// Duration of one controller step.
    pub time_step_ms: u32,

    pub max_relay_count: u32,

    pub malformed_policy: MalformedPolicy,

    pub hop_limit_broadcasts: bool,

    pub medium: MediumConfig,
}

impl Default for SwarmConfig {
    fn default() -> Self {
        Self {
            total_ticks:          100,
            seed:                 0,
            time_step_ms:         DEFAULT_TIME_STEP_MS,
            max_relay_count:      MAX_RELAY_COUNT,
            malformed_policy:     MalformedPolicy::Abort,
            hop_limit_broadcasts: false,
            medium:               MediumConfig::default(),
        }
    }
}

impl SwarmConfig {
    /// The tick at which [`Swarm::run`][crate::Swarm::run] stops (exclusive).
    #[inline]
    pub fn end_tick(&self) -> Tick {
        Tick(self.total_ticks)
    }

    /// Communication settings for the robot named `id`.
    pub fn comm_config_for(&self, id: &PeerId) -> CommConfig {
        CommConfig {
            self_id:              id.clone(),
            max_relay_count:      self.max_relay_count,
            time_step_ms:         self.time_step_ms,
            malformed_policy:     self.malformed_policy,
            hop_limit_broadcasts: self.hop_limit_broadcasts,
        }
    }
}
