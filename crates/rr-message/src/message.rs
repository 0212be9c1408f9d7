//! The message value exchanged between robots.

use rr_core::{PeerId, Priority, Recipient};

use crate::DELIMITER;

/// One message as behavior logic sees it.
///
/// `relay_count` is the number of times this message has already been put on
/// the medium.  Transmitting never mutates a `Message`; the sender encodes
/// [`Message::relayed`] instead, so the counter a receiver sees is always one
/// higher than the one the sender held.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Message {
    pub sender_id:   PeerId,
    pub priority:    Priority,
    pub relay_count: u32,
    pub payload:     String,
    pub recipient:   Recipient,
}

impl Message {
    pub fn new(
        sender_id:   impl Into<PeerId>,
        priority:    Priority,
        relay_count: u32,
        payload:     impl Into<String>,
        recipient:   Recipient,
    ) -> Self {
        Self {
            sender_id: sender_id.into(),
            priority,
            relay_count,
            payload: payload.into(),
            recipient,
        }
    }

    /// A message for every peer in range.
    pub fn broadcast(
        sender_id: impl Into<PeerId>,
        priority:  Priority,
        payload:   impl Into<String>,
    ) -> Self {
        Self::new(sender_id, priority, 0, payload, Recipient::Broadcast)
    }

    /// A message for one named peer.
    pub fn to_peer(
        sender_id: impl Into<PeerId>,
        priority:  Priority,
        payload:   impl Into<String>,
        recipient: impl Into<PeerId>,
    ) -> Self {
        Self::new(sender_id, priority, 0, payload, Recipient::from(recipient.into()))
    }

    /// A copy with `relay_count` advanced by one hop (saturating).
    pub fn relayed(&self) -> Self {
        Self {
            relay_count: self.relay_count.saturating_add(1),
            ..self.clone()
        }
    }

    /// `false` if any string field contains the wire delimiter, i.e. the
    /// encoded frame would not decode back.
    pub fn is_wire_safe(&self) -> bool {
        ![
            self.sender_id.as_str(),
            self.payload.as_str(),
            self.recipient.as_wire(),
        ]
        .iter()
        .any(|field| field.contains(DELIMITER))
    }
}
