//! The `CommManager`: one per robot.

use log::{debug, info, trace, warn};

use rr_core::{PeerId, Priority, Recipient};
use rr_message::{decode_frame, encode_frame, Inbox, Message};
use rr_radio::Device;

use crate::{CommConfig, CommError, CommResult, MalformedPolicy};

/// What one `receive_message` call did with the frames it drained.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct ReceiveSummary {
    /// Appended to the inbox.
    pub accepted:  usize,
    /// Decoded but addressed elsewhere or over the hop limit.
    pub rejected:  usize,
    /// Empty frames.
    pub empty:     usize,
    /// Undecodable frames skipped under [`MalformedPolicy::Skip`].
    pub malformed: usize,
}

impl ReceiveSummary {
    /// Frames consumed from the receiver.
    pub fn drained(&self) -> usize {
        self.accepted + self.rejected + self.empty + self.malformed
    }
}

/// Encodes, transmits, receives and filters messages for one robot.
///
/// The manager owns the robot's [`Device`] and its [`CommConfig`].  The
/// inbox and the known-peer list belong to the robot and are passed in per
/// call.
///
/// Every radio operation costs exactly one tick: `send_message` emits and
/// then steps, `receive_message` steps and then drains.  The step on its own
/// is [`advance`][Self::advance].
pub struct CommManager<D: Device> {
    config: CommConfig,
    device: D,
}

impl<D: Device> CommManager<D> {
    /// Validate `config` and take ownership of `device`.
    pub fn new(config: CommConfig, device: D) -> CommResult<Self> {
        config.validate()?;
        Ok(Self { config, device })
    }

    pub fn config(&self) -> &CommConfig {
        &self.config
    }

    pub fn self_id(&self) -> &PeerId {
        &self.config.self_id
    }

    pub fn device(&self) -> &D {
        &self.device
    }

    pub fn device_mut(&mut self) -> &mut D {
        &mut self.device
    }

    // ── Time ──────────────────────────────────────────────────────────────

    /// Advance the host by one tick.
    #[inline]
    pub fn advance(&mut self) {
        self.device.step(self.config.time_step_ms);
    }

    // ── Sending ───────────────────────────────────────────────────────────

    /// Transmit `msg` with its relay count advanced by one, then advance one
    /// tick.  `msg` itself is left unchanged.
    pub fn send_message(&mut self, msg: &Message) {
        let outgoing = msg.relayed();
        let frame = encode_frame(&outgoing);
        if !outgoing.is_wire_safe() {
            warn!("{} : frame will not decode, a field contains the delimiter: {}", self.config.self_id, frame);
        }
        debug!("{} : Send : {}", self.config.self_id, frame);
        self.device.send(&frame);
        self.advance();
    }

    /// Forward a message this robot received.  Same as
    /// [`send_message`][Self::send_message]: the hop count goes up by one.
    pub fn relay_message(&mut self, msg: &Message) {
        self.send_message(msg);
    }

    /// Send one copy of a message to each peer in `known_peers`, in order.
    ///
    /// Exactly `known_peers.len()` frames are emitted.  That says nothing
    /// about receipt: peers out of range never see their copy and the
    /// sender is not told.
    pub fn send_message_all(
        &mut self,
        known_peers: &[PeerId],
        sender_id:   &PeerId,
        priority:    Priority,
        relay_count: u32,
        payload:     &str,
    ) {
        for peer in known_peers {
            let msg = Message::new(
                sender_id.clone(),
                priority,
                relay_count,
                payload,
                Recipient::from(peer.clone()),
            );
            self.send_message(&msg);
        }
    }

    // ── Receiving ─────────────────────────────────────────────────────────

    /// Advance one tick, then decode and filter every frame queued at that
    /// moment, appending accepted messages to `inbox`.
    ///
    /// The queue length is read once; frames arriving while this runs wait
    /// for the next call.  Under [`MalformedPolicy::Abort`] the first
    /// undecodable frame ends the call with [`CommError::MalformedFrame`] and
    /// the frames behind it stay queued.
    pub fn receive_message<I: Inbox + ?Sized>(&mut self, inbox: &mut I) -> CommResult<ReceiveSummary> {
        self.advance();

        let mut summary = ReceiveSummary::default();
        let pending = self.device.queue_length();

        for _ in 0..pending {
            let Some(frame) = self.device.next_frame() else {
                break;
            };
            if frame.is_empty() {
                summary.empty += 1;
                continue;
            }

            let msg = match decode_frame(&frame) {
                Ok(msg) => msg,
                Err(source) => match self.config.malformed_policy {
                    MalformedPolicy::Abort => {
                        return Err(CommError::MalformedFrame { frame, source });
                    }
                    MalformedPolicy::Skip => {
                        warn!("{} : skipping malformed frame {:?}: {}", self.config.self_id, frame, source);
                        summary.malformed += 1;
                        continue;
                    }
                },
            };

            if self.accepts(&msg) {
                debug!(
                    "{} : Receive : {} ; {} ; {} ; {} ; {}",
                    self.config.self_id,
                    msg.sender_id,
                    msg.priority,
                    msg.relay_count,
                    msg.payload,
                    msg.recipient.as_wire(),
                );
                inbox.append(msg);
                summary.accepted += 1;
            } else {
                trace!("{} : ignored : {}", self.config.self_id, frame);
                summary.rejected += 1;
            }
        }

        Ok(summary)
    }

    /// The acceptance rule: broadcast, or addressed to this robot within the
    /// hop bound.
    pub fn accepts(&self, msg: &Message) -> bool {
        let within_hops = msg.relay_count < self.config.max_relay_count;
        match &msg.recipient {
            Recipient::Broadcast => !self.config.hop_limit_broadcasts || within_hops,
            Recipient::Peer(id) => *id == self.config.self_id && within_hops,
        }
    }

    // ── Reset ─────────────────────────────────────────────────────────────

    /// Discard every queued frame unread and empty `inbox`.
    pub fn clear_messages<I: Inbox + ?Sized>(&mut self, inbox: &mut I) {
        let mut discarded = 0usize;
        while self.device.queue_length() > 0 {
            self.device.advance_to_next_frame();
            discarded += 1;
        }
        inbox.clear();
        info!("{} : All messages cleared ({discarded} queued frames discarded)", self.config.self_id);
    }
}

// ── Priority ──────────────────────────────────────────────────────────────────

/// `true` if `msg` is strictly more urgent than `current_priority`.
#[inline]
pub fn is_prioritary(msg: &Message, current_priority: Priority) -> bool {
    msg.priority.rank() > current_priority.rank()
}
