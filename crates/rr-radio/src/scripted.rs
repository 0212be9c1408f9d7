//! A test double device.

use std::collections::VecDeque;

use rr_core::SimClock;

use crate::{Emitter, Receiver, Stepper};

/// A [`Device`][crate::Device] with no medium behind it.
///
/// Sent frames are recorded in order, inbound frames are whatever the test
/// queued with [`push_inbound`][Self::push_inbound], and each step advances a
/// local clock.  Useful for exercising a communication manager without a
/// swarm.
#[derive(Default, Debug)]
pub struct ScriptedDevice {
    /// Every frame passed to `send`, oldest first.
    pub sent:    Vec<String>,
    /// Frames waiting to be received.
    pub inbound: VecDeque<String>,
    /// Clock advanced by `step`.
    pub clock:   SimClock,
}

impl ScriptedDevice {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a frame as if it had arrived on the medium.
    pub fn push_inbound(&mut self, frame: impl Into<String>) {
        self.inbound.push_back(frame.into());
    }

    /// Number of `step` calls so far.
    pub fn steps(&self) -> u64 {
        self.clock.current_tick.0
    }
}

impl Emitter for ScriptedDevice {
    fn send(&mut self, frame: &str) {
        self.sent.push(frame.to_owned());
    }
}

impl Receiver for ScriptedDevice {
    fn queue_length(&self) -> usize {
        self.inbound.len()
    }

    fn next_frame(&mut self) -> Option<String> {
        self.inbound.pop_front()
    }

    fn advance_to_next_frame(&mut self) {
        self.inbound.pop_front();
    }
}

impl Stepper for ScriptedDevice {
    fn step(&mut self, time_step_ms: u32) {
        self.clock.step(time_step_ms);
    }
}
