//! Communication manager configuration.

use rr_core::PeerId;

use crate::{CommError, CommResult};

/// Default hop bound for addressed messages.
pub const MAX_RELAY_COUNT: u32 = 5;

/// What `receive_message` does with a frame it cannot decode.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum MalformedPolicy {
    /// Return `MalformedFrame` at once.  Frames after the bad one stay on the
    /// receiver and are read by the next call.
    #[default]
    Abort,
    /// Log and count the bad frame, keep draining the snapshot.
    Skip,
}

/// Per-robot communication settings.
///
/// Typically built by the host when a robot starts, or deserialized from
/// the scenario file with the `serde` feature.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct CommConfig {
    /// This robot's own name, matched against addressed recipients.
    pub self_id: PeerId,

    /// Addressed messages with `relay_count >= max_relay_count` are dropped.
    pub max_relay_count: u32,

    /// Duration of the tick that every send and receive costs.
    pub time_step_ms: u32,

    pub malformed_policy: MalformedPolicy,

    /// Also apply `max_relay_count` to broadcasts.  Off by default: broadcasts
    /// are accepted at any relay count.
    pub hop_limit_broadcasts: bool,
}

impl Default for CommConfig {
    fn default() -> Self {
        Self {
            self_id:              PeerId::default(),
            max_relay_count:      MAX_RELAY_COUNT,
            time_step_ms:         rr_core::time::DEFAULT_TIME_STEP_MS,
            malformed_policy:     MalformedPolicy::Abort,
            hop_limit_broadcasts: false,
        }
    }
}

impl CommConfig {
    /// Default settings for the robot named `self_id`.
    pub fn for_peer(self_id: impl Into<PeerId>) -> Self {
        Self { self_id: self_id.into(), ..Self::default() }
    }

    pub fn validate(&self) -> CommResult<()> {
        if self.self_id.is_empty() {
            return Err(CommError::Config(
                "self_id must not be empty (the empty recipient means broadcast)".into(),
            ));
        }
        if self.time_step_ms == 0 {
            return Err(CommError::Config("time_step_ms must be positive".into()));
        }
        Ok(())
    }
}
