//! Peer identifiers and message addressing.
//!
//! Robots are named by the host simulator (e.g. `"robot_3"`, `"remote"`), so
//! `PeerId` wraps an owned `String` rather than an integer index.  Equality
//! is exact and case-sensitive.

use std::borrow::Borrow;
use std::fmt;

// ── PeerId ────────────────────────────────────────────────────────────────────

/// Name of one agent on the shared medium.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct PeerId(String);

impl PeerId {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for PeerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(&self.0)
    }
}

impl From<&str> for PeerId {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

impl From<String> for PeerId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl Borrow<str> for PeerId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl PartialEq<str> for PeerId {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for PeerId {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

// ── Recipient ─────────────────────────────────────────────────────────────────

/// Who a message is addressed to.
///
/// On the wire `Broadcast` is the empty string; any non-empty string names a
/// single peer.
#[derive(Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Recipient {
    /// Every peer in range.
    #[default]
    Broadcast,
    /// One named peer.
    Peer(PeerId),
}

impl Recipient {
    /// Map a wire field to a recipient.  `""` is broadcast.
    pub fn from_wire(field: &str) -> Self {
        if field.is_empty() {
            Recipient::Broadcast
        } else {
            Recipient::Peer(PeerId::from(field))
        }
    }

    /// The wire rendering: `""` for broadcast, the peer name otherwise.
    pub fn as_wire(&self) -> &str {
        match self {
            Recipient::Broadcast => "",
            Recipient::Peer(id)  => id.as_str(),
        }
    }

    #[inline]
    pub fn is_broadcast(&self) -> bool {
        matches!(self, Recipient::Broadcast)
    }

    /// `true` if this is addressed to exactly `id` (broadcast is not).
    #[inline]
    pub fn is_peer(&self, id: &PeerId) -> bool {
        matches!(self, Recipient::Peer(p) if p == id)
    }
}

impl From<PeerId> for Recipient {
    /// An empty id collapses to [`Recipient::Broadcast`], mirroring the wire.
    fn from(id: PeerId) -> Self {
        if id.is_empty() {
            Recipient::Broadcast
        } else {
            Recipient::Peer(id)
        }
    }
}

impl fmt::Display for Recipient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Recipient::Broadcast => f.write_str("*"),
            Recipient::Peer(id)  => write!(f, "{id}"),
        }
    }
}
