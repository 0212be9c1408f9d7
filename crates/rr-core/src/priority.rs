//! Message priority levels shared by every crate that orders or compares
//! messages.
//!
//! Each level carries an explicit numeric [`rank`](Priority::rank); a higher
//! rank is more urgent.  `Ord` follows the rank, so priorities can be used
//! directly as `BTreeMap` keys.  The wire label is a separate, stable
//! lowercase string ([`Priority::as_str`]).

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use crate::CoreError;

/// Urgency of a message, or of the activity an agent is currently doing.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Priority {
    /// No current activity.  Every real message outranks it.
    #[default]
    None,
    /// Status reports, position updates.
    Information,
    /// Negotiation between robots (who takes which task).
    Coordination,
    /// A task assignment.
    Task,
    /// A request for help from another robot.
    Assistance,
    /// Stop everything.
    Emergency,
}

impl Priority {
    /// Every level in ascending rank order.
    pub const ALL: [Priority; 6] = [
        Priority::None,
        Priority::Information,
        Priority::Coordination,
        Priority::Task,
        Priority::Assistance,
        Priority::Emergency,
    ];

    /// Numeric urgency.  Higher is more urgent.
    #[inline]
    pub fn rank(self) -> u8 {
        match self {
            Priority::None         => 0,
            Priority::Information  => 1,
            Priority::Coordination => 2,
            Priority::Task         => 3,
            Priority::Assistance   => 4,
            Priority::Emergency    => 5,
        }
    }

    /// Wire label.  [`FromStr`] accepts exactly these strings.
    pub fn as_str(self) -> &'static str {
        match self {
            Priority::None         => "none",
            Priority::Information  => "information",
            Priority::Coordination => "coordination",
            Priority::Task         => "task",
            Priority::Assistance   => "assistance",
            Priority::Emergency    => "emergency",
        }
    }
}

impl Ord for Priority {
    fn cmp(&self, other: &Self) -> Ordering {
        self.rank().cmp(&other.rank())
    }
}

impl PartialOrd for Priority {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl FromStr for Priority {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Priority::ALL
            .into_iter()
            .find(|p| p.as_str() == s)
            .ok_or_else(|| CoreError::Parse(format!("unknown priority {s:?}")))
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}
