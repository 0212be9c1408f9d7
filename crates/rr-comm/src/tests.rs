//! Unit tests for rr-comm.

use rr_core::{PeerId, Priority, Recipient};
use rr_message::{decode_frame, Message, PriorityInbox};
use rr_radio::ScriptedDevice;

use crate::{CommConfig, CommError, CommManager, MalformedPolicy};

// ── Helpers ───────────────────────────────────────────────────────────────────

fn manager(self_id: &str) -> CommManager<ScriptedDevice> {
    CommManager::new(CommConfig::for_peer(self_id), ScriptedDevice::new()).unwrap()
}

fn manager_with(config: CommConfig) -> CommManager<ScriptedDevice> {
    CommManager::new(config, ScriptedDevice::new()).unwrap()
}

fn frame(sender: &str, priority: Priority, count: u32, payload: &str, recipient: &str) -> String {
    format!("{sender};{priority};{count};{payload};{recipient}")
}

fn peers(names: &[&str]) -> Vec<PeerId> {
    names.iter().map(|n| PeerId::from(*n)).collect()
}

// ── Configuration ─────────────────────────────────────────────────────────────

#[cfg(test)]
mod config_tests {
    use super::*;

    #[test]
    fn defaults() {
        let cfg = CommConfig::for_peer("r1");
        assert_eq!(cfg.self_id, "r1");
        assert_eq!(cfg.max_relay_count, 5);
        assert_eq!(cfg.time_step_ms, 32);
        assert_eq!(cfg.malformed_policy, MalformedPolicy::Abort);
        assert!(!cfg.hop_limit_broadcasts);
    }

    #[test]
    fn empty_self_id_rejected() {
        let result = CommManager::new(CommConfig::default(), ScriptedDevice::new());
        assert!(matches!(result, Err(CommError::Config(_))));
    }

    #[test]
    fn zero_time_step_rejected() {
        let cfg = CommConfig { time_step_ms: 0, ..CommConfig::for_peer("r1") };
        assert!(cfg.validate().is_err());
    }
}

// ── Sending ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod send_tests {
    use super::*;

    #[test]
    fn send_increments_counter_on_the_wire_only() {
        let mut comm = manager("r1");
        let msg = Message::new("r1", Priority::Task, 2, "pick", Recipient::from_wire("r2"));

        comm.send_message(&msg);

        assert_eq!(comm.device().sent, ["r1;task;3;pick;r2"]);
        assert_eq!(msg.relay_count, 2);
    }

    #[test]
    fn each_send_costs_one_tick() {
        let mut comm = manager("r1");
        let msg = Message::broadcast("r1", Priority::Information, "hi");
        comm.send_message(&msg);
        comm.send_message(&msg);
        assert_eq!(comm.device().steps(), 2);
        assert_eq!(comm.device().clock.elapsed_ms, 64);
    }

    #[test]
    fn resending_the_same_message_sends_the_same_count() {
        let mut comm = manager("r1");
        let msg = Message::broadcast("r1", Priority::Information, "hi");
        comm.send_message(&msg);
        comm.send_message(&msg);
        assert_eq!(comm.device().sent[0], comm.device().sent[1]);
    }

    #[test]
    fn relay_adds_a_hop() {
        let mut comm = manager("r2");
        let received = decode_frame("r1;assistance;3;help;").unwrap();
        comm.relay_message(&received);
        assert_eq!(comm.device().sent, ["r1;assistance;4;help;"]);
    }

    #[test]
    fn round_trip_yields_counter_plus_one() {
        let cases = [
            (Message::new("r1", Priority::Task, 0, "go to 3,4", Recipient::from_wire("r2")), 0),
            (Message::new("remote", Priority::Emergency, 41, "", Recipient::Broadcast), 41),
            (Message::new("r9", Priority::None, 7, "x", Recipient::from_wire("r1")), 7),
        ];
        for (msg, c) in cases {
            let mut comm = manager("sender");
            comm.send_message(&msg);
            let decoded = decode_frame(&comm.device().sent[0]).unwrap();
            assert_eq!(decoded.relay_count, c + 1);
            assert_eq!(decoded.sender_id, msg.sender_id);
            assert_eq!(decoded.priority, msg.priority);
            assert_eq!(decoded.payload, msg.payload);
            assert_eq!(decoded.recipient, msg.recipient);
        }
    }

    #[test]
    fn fan_out_emits_one_frame_per_peer() {
        let mut comm = manager("r1");
        let known = peers(&["r2", "r3", "remote"]);

        comm.send_message_all(&known, &PeerId::from("r1"), Priority::Coordination, 0, "who has box 7");

        let sent = &comm.device().sent;
        assert_eq!(sent.len(), 3);
        assert_eq!(comm.device().steps(), 3);
        let decoded: Vec<Message> = sent.iter().map(|f| decode_frame(f).unwrap()).collect();
        for (msg, peer) in decoded.iter().zip(&known) {
            assert_eq!(msg.recipient, Recipient::Peer(peer.clone()));
            assert_eq!(msg.sender_id, "r1");
            assert_eq!(msg.priority, Priority::Coordination);
            assert_eq!(msg.payload, "who has box 7");
            assert_eq!(msg.relay_count, 1);
        }
    }

    #[test]
    fn fan_out_to_nobody_sends_nothing() {
        let mut comm = manager("r1");
        comm.send_message_all(&[], &PeerId::from("r1"), Priority::Task, 0, "x");
        assert!(comm.device().sent.is_empty());
        assert_eq!(comm.device().steps(), 0);
    }

    #[test]
    fn unsafe_payload_is_still_sent() {
        let mut comm = manager("r1");
        comm.send_message(&Message::broadcast("r1", Priority::Task, "a;b"));
        assert_eq!(comm.device().sent.len(), 1);
        assert!(decode_frame(&comm.device().sent[0]).is_err());
    }
}

// ── Receiving ─────────────────────────────────────────────────────────────────

#[cfg(test)]
mod receive_tests {
    use super::*;

    #[test]
    fn receive_costs_one_tick_even_when_idle() {
        let mut comm = manager("r1");
        let mut inbox = PriorityInbox::new();
        let summary = comm.receive_message(&mut inbox).unwrap();
        assert_eq!(summary.drained(), 0);
        assert_eq!(comm.device().steps(), 1);
    }

    #[test]
    fn targeted_hop_limit() {
        let mut comm = manager("R");
        let mut inbox = PriorityInbox::new();
        comm.device_mut().push_inbound(frame("S", Priority::Task, 5, "five", "R"));
        comm.device_mut().push_inbound(frame("S", Priority::Task, 4, "four", "R"));

        let summary = comm.receive_message(&mut inbox).unwrap();

        assert_eq!(summary.accepted, 1);
        assert_eq!(summary.rejected, 1);
        assert_eq!(inbox.len(), 1);
        assert_eq!(inbox.peek().unwrap().payload, "four");
        assert_eq!(inbox.peek().unwrap().relay_count, 4);
    }

    #[test]
    fn broadcast_bypasses_hop_limit() {
        let mut inbox = PriorityInbox::new();
        for me in ["a", "b", "c"] {
            let mut comm = manager(me);
            comm.device_mut().push_inbound(frame("S", Priority::Information, 1000, "flood", ""));
            let summary = comm.receive_message(&mut inbox).unwrap();
            assert_eq!(summary.accepted, 1, "agent {me}");
        }
        assert_eq!(inbox.len(), 3);
        assert!(inbox.iter().all(|m| m.relay_count == 1000));
    }

    #[test]
    fn broadcast_hop_limit_is_opt_in() {
        let cfg = CommConfig { hop_limit_broadcasts: true, ..CommConfig::for_peer("a") };
        let mut comm = manager_with(cfg);
        let mut inbox = PriorityInbox::new();
        comm.device_mut().push_inbound(frame("S", Priority::Information, 1000, "flood", ""));
        comm.device_mut().push_inbound(frame("S", Priority::Information, 4, "fresh", ""));

        let summary = comm.receive_message(&mut inbox).unwrap();

        assert_eq!(summary.accepted, 1);
        assert_eq!(inbox.peek().unwrap().payload, "fresh");
    }

    #[test]
    fn recipient_filtering() {
        let f = frame("S", Priority::Task, 0, "for x", "X");

        let mut y = manager("Y");
        let mut y_inbox = PriorityInbox::new();
        y.device_mut().push_inbound(f.clone());
        assert_eq!(y.receive_message(&mut y_inbox).unwrap().rejected, 1);
        assert!(y_inbox.is_empty());

        let mut x = manager("X");
        let mut x_inbox = PriorityInbox::new();
        x.device_mut().push_inbound(f);
        assert_eq!(x.receive_message(&mut x_inbox).unwrap().accepted, 1);
        assert_eq!(x_inbox.len(), 1);
    }

    #[test]
    fn custom_hop_bound() {
        let cfg = CommConfig { max_relay_count: 2, ..CommConfig::for_peer("R") };
        let comm = manager_with(cfg);
        let at = |n| Message::new("S", Priority::Task, n, "", Recipient::from_wire("R"));
        assert!(comm.accepts(&at(1)));
        assert!(!comm.accepts(&at(2)));
    }

    #[test]
    fn accepted_message_is_unchanged() {
        let mut comm = manager("R");
        let mut inbox: Vec<Message> = Vec::new();
        comm.device_mut().push_inbound("S;emergency;3;stop now;R");
        comm.receive_message(&mut inbox).unwrap();
        assert_eq!(
            inbox,
            [Message::new("S", Priority::Emergency, 3, "stop now", Recipient::from_wire("R"))],
        );
    }

    #[test]
    fn empty_frames_are_skipped_silently() {
        let mut comm = manager("R");
        let mut inbox = PriorityInbox::new();
        comm.device_mut().push_inbound("");
        comm.device_mut().push_inbound(frame("S", Priority::Task, 0, "x", ""));
        let summary = comm.receive_message(&mut inbox).unwrap();
        assert_eq!(summary.empty, 1);
        assert_eq!(summary.accepted, 1);
        assert_eq!(comm.device().inbound.len(), 0);
    }

    #[test]
    fn accepted_messages_land_in_priority_order() {
        let mut comm = manager("R");
        let mut inbox = PriorityInbox::new();
        comm.device_mut().push_inbound(frame("S", Priority::Information, 0, "info", ""));
        comm.device_mut().push_inbound(frame("S", Priority::Emergency, 0, "stop", "R"));
        comm.device_mut().push_inbound(frame("S", Priority::Task, 0, "task", ""));
        comm.receive_message(&mut inbox).unwrap();
        let order: Vec<String> = inbox.drain().into_iter().map(|m| m.payload).collect();
        assert_eq!(order, ["stop", "task", "info"]);
    }

    #[test]
    fn three_fields_is_malformed_and_names_the_frame() {
        let mut comm = manager("R");
        let mut inbox = PriorityInbox::new();
        comm.device_mut().push_inbound("a;b;c");

        let err = comm.receive_message(&mut inbox).unwrap_err();

        match &err {
            CommError::MalformedFrame { frame, .. } => assert_eq!(frame, "a;b;c"),
            other => panic!("unexpected error {other:?}"),
        }
        assert!(err.to_string().contains("a;b;c"));
    }

    #[test]
    fn non_numeric_count_is_malformed() {
        let mut comm = manager("R");
        let mut inbox = PriorityInbox::new();
        comm.device_mut().push_inbound("a;b;notanumber;d;e");
        let err = comm.receive_message(&mut inbox).unwrap_err();
        assert!(
            matches!(err, CommError::MalformedFrame { ref frame, .. } if frame == "a;b;notanumber;d;e"),
        );
    }

    #[test]
    fn abort_leaves_later_frames_queued() {
        let mut comm = manager("R");
        let mut inbox = PriorityInbox::new();
        comm.device_mut().push_inbound(frame("S", Priority::Task, 0, "before", ""));
        comm.device_mut().push_inbound("garbage");
        comm.device_mut().push_inbound(frame("S", Priority::Task, 0, "after", ""));

        assert!(comm.receive_message(&mut inbox).is_err());
        assert_eq!(inbox.len(), 1);
        assert_eq!(comm.device().inbound.len(), 1);

        let summary = comm.receive_message(&mut inbox).unwrap();
        assert_eq!(summary.accepted, 1);
        assert_eq!(inbox.len(), 2);
    }

    #[test]
    fn skip_policy_drains_the_whole_snapshot() {
        let cfg = CommConfig { malformed_policy: MalformedPolicy::Skip, ..CommConfig::for_peer("R") };
        let mut comm = manager_with(cfg);
        let mut inbox = PriorityInbox::new();
        comm.device_mut().push_inbound("garbage");
        comm.device_mut().push_inbound(frame("S", Priority::Task, 0, "ok", ""));
        comm.device_mut().push_inbound("S;urgent;0;p;");

        let summary = comm.receive_message(&mut inbox).unwrap();

        assert_eq!(summary.malformed, 2);
        assert_eq!(summary.accepted, 1);
        assert_eq!(summary.drained(), 3);
    }
}

// ── Snapshot semantics ────────────────────────────────────────────────────────

#[cfg(test)]
mod snapshot_tests {
    use std::collections::VecDeque;

    use rr_radio::{Emitter, Receiver, Stepper};

    use super::*;

    /// A receiver that gets a new frame every time one is read.
    #[derive(Default)]
    struct ChattyDevice {
        queue: VecDeque<String>,
        reads: usize,
    }

    impl Emitter for ChattyDevice {
        fn send(&mut self, _frame: &str) {}
    }

    impl Receiver for ChattyDevice {
        fn queue_length(&self) -> usize {
            self.queue.len()
        }

        fn next_frame(&mut self) -> Option<String> {
            self.reads += 1;
            self.queue.push_back(format!("S;information;0;late {};", self.reads));
            self.queue.pop_front()
        }

        fn advance_to_next_frame(&mut self) {
            self.queue.pop_front();
        }
    }

    impl Stepper for ChattyDevice {
        fn step(&mut self, _time_step_ms: u32) {}
    }

    #[test]
    fn frames_arriving_mid_call_wait_for_next_call() {
        let mut device = ChattyDevice::default();
        device.queue.push_back("S;information;0;early 1;".into());
        device.queue.push_back("S;information;0;early 2;".into());
        let mut comm = CommManager::new(CommConfig::for_peer("R"), device).unwrap();
        let mut inbox: Vec<Message> = Vec::new();

        let summary = comm.receive_message(&mut inbox).unwrap();

        assert_eq!(summary.accepted, 2);
        assert_eq!(comm.device().reads, 2);
        assert_eq!(comm.device().queue.len(), 2);
        let payloads: Vec<&str> = inbox.iter().map(|m| m.payload.as_str()).collect();
        assert_eq!(payloads, ["early 1", "early 2"]);
    }
}

// ── Priority comparator ───────────────────────────────────────────────────────

#[cfg(test)]
mod priority_tests {
    use super::*;
    use crate::is_prioritary;

    fn at(p: Priority) -> Message {
        Message::broadcast("S", p, "")
    }

    #[test]
    fn strictly_greater_only() {
        assert!(is_prioritary(&at(Priority::Emergency), Priority::Task));
        assert!(!is_prioritary(&at(Priority::Task), Priority::Emergency));
        assert!(!is_prioritary(&at(Priority::Task), Priority::Task));
    }

    #[test]
    fn everything_preempts_idle() {
        for p in Priority::ALL.into_iter().skip(1) {
            assert!(is_prioritary(&at(p), Priority::None));
        }
        assert!(!is_prioritary(&at(Priority::None), Priority::None));
    }
}

// ── Queue reset ───────────────────────────────────────────────────────────────

#[cfg(test)]
mod clear_tests {
    use super::*;

    #[test]
    fn clear_empties_inbox_and_discards_queued_frames() {
        let mut comm = manager("R");
        let mut inbox = PriorityInbox::new();
        comm.device_mut().push_inbound(frame("S", Priority::Task, 0, "old 1", ""));
        comm.receive_message(&mut inbox).unwrap();
        comm.device_mut().push_inbound(frame("S", Priority::Task, 0, "old 2", ""));
        comm.device_mut().push_inbound("not even a frame");

        comm.clear_messages(&mut inbox);

        assert!(inbox.is_empty());
        let summary = comm.receive_message(&mut inbox).unwrap();
        assert_eq!(summary.drained(), 0);
        assert!(inbox.is_empty());
    }

    #[test]
    fn clear_does_not_step() {
        let mut comm = manager("R");
        let mut inbox = PriorityInbox::new();
        comm.device_mut().push_inbound("x");
        comm.clear_messages(&mut inbox);
        assert_eq!(comm.device().steps(), 0);
    }
}
