//! One robot as the swarm hosts it.

use std::collections::HashMap;

use rr_comm::{is_prioritary, CommManager, ReceiveSummary};
use rr_core::{AgentRng, PeerId, Priority, Recipient, Tick};
use rr_message::{Message, PriorityInbox};
use rr_radio::RadioDevice;

use crate::SimResult;

/// Identity of a message for relay bookkeeping: who said what, how urgently.
pub type MessageKey = (PeerId, Priority, String);

/// A robot: its radio (behind a communication manager), its inbox, the peers
/// it knows about, and what it is currently busy with.
///
/// All fields are `pub` so behaviors can reach them directly; the helper
/// methods cover the common send/receive patterns.
pub struct Robot {
    pub id: PeerId,

    /// Owns this robot's radio.
    pub comm: CommManager<RadioDevice>,

    /// Accepted messages, most urgent first.
    pub inbox: PriorityInbox,

    /// Statically known peers, used for fan-out sends.  Never modified by
    /// the communication manager.
    pub known_peers: Vec<PeerId>,

    /// Priority of the current activity.  `Priority::None` when idle.
    pub current_priority: Priority,

    /// Messages this robot has relayed, with the round it relayed them in.
    pub relayed: HashMap<MessageKey, Tick>,

    pub rng: AgentRng,
}

impl Robot {
    pub fn new(
        comm:        CommManager<RadioDevice>,
        known_peers: Vec<PeerId>,
        rng:         AgentRng,
    ) -> Self {
        Self {
            id: comm.self_id().clone(),
            comm,
            inbox: PriorityInbox::new(),
            known_peers,
            current_priority: Priority::None,
            relayed: HashMap::new(),
            rng,
        }
    }

    /// Broadcast a fresh message to every robot in range.
    pub fn broadcast(&mut self, priority: Priority, payload: &str) {
        let msg = Message::new(self.id.clone(), priority, 0, payload, Recipient::Broadcast);
        self.comm.send_message(&msg);
    }

    /// Send a fresh message addressed to `peer`.
    pub fn send_to(&mut self, peer: &PeerId, priority: Priority, payload: &str) {
        let msg = Message::new(self.id.clone(), priority, 0, payload, Recipient::from(peer.clone()));
        self.comm.send_message(&msg);
    }

    /// Send one addressed copy to each known peer.
    pub fn send_to_all(&mut self, priority: Priority, payload: &str) {
        self.comm.send_message_all(&self.known_peers, &self.id, priority, 0, payload);
    }

    /// Drain the radio into the inbox.
    pub fn receive(&mut self) -> SimResult<ReceiveSummary> {
        Ok(self.comm.receive_message(&mut self.inbox)?)
    }

    /// Drop all queued frames, inbox contents and relay memory, and go idle.
    pub fn reset(&mut self) {
        self.comm.clear_messages(&mut self.inbox);
        self.relayed.clear();
        self.current_priority = Priority::None;
    }

    /// If the most urgent inbox message outranks the current activity, take
    /// it out of the inbox and make its priority the current one.
    pub fn take_preempting(&mut self) -> Option<Message> {
        let head = self.inbox.peek()?;
        if !is_prioritary(head, self.current_priority) {
            return None;
        }
        let msg = self.inbox.pop()?;
        self.current_priority = msg.priority;
        Some(msg)
    }

    /// Finish the current activity.
    pub fn finish_activity(&mut self) {
        self.current_priority = Priority::None;
    }
}
