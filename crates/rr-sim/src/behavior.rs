//! The `Behavior` trait: the main extension point for user code.

use log::warn;

use rr_comm::{CommError, MAX_RELAY_COUNT};
use rr_core::{Priority, Tick};
use rr_message::{Message, PriorityInbox};

use crate::robot::MessageKey;
use crate::{Robot, SimError, SimResult};

/// Read-only facts about the current round.
#[derive(Copy, Clone, Debug)]
pub struct TickContext {
    /// Swarm round number.
    pub tick: Tick,

    /// Duration of one controller step.
    pub time_step_ms: u32,
}

/// Pluggable robot behavior.
///
/// Called once per robot per round, in roster order.  All per-robot state
/// lives on the [`Robot`]; the behavior itself is shared by every robot and
/// only borrowed immutably.
///
/// Returning an error stops the swarm.  A behavior that prefers to survive
/// malformed traffic should handle [`CommError::MalformedFrame`] itself, as
/// [`RelayBehavior`] does.
///
/// # Example
///
/// ```rust,ignore
/// struct Beacon;
///
/// impl Behavior for Beacon {
///     fn on_tick(&self, robot: &mut Robot, ctx: &TickContext) -> SimResult<()> {
///         if ctx.tick.0 % 10 == 0 {
///             robot.broadcast(Priority::Information, "alive");
///         }
///         robot.receive().map(|_| ())
///     }
/// }
/// ```
pub trait Behavior {
    fn on_tick(&self, robot: &mut Robot, ctx: &TickContext) -> SimResult<()>;
}

// ── NoopBehavior ──────────────────────────────────────────────────────────────

/// A [`Behavior`] that does nothing: no sends, no receives, no clock steps.
///
/// Useful as a placeholder in tests or for robots that only occupy space on
/// the medium.
pub struct NoopBehavior;

impl Behavior for NoopBehavior {
    fn on_tick(&self, _robot: &mut Robot, _ctx: &TickContext) -> SimResult<()> {
        Ok(())
    }
}

// ── RelayBehavior ─────────────────────────────────────────────────────────────

/// Rounds a robot remembers a relayed message by default.  Covers the echo
/// of its own relay coming back from a neighbour on the next round.
pub const RELAY_MEMORY_TICKS: u64 = 2;

/// Store-and-forward flooding.
///
/// Each round the robot drains its radio, re-broadcasts every broadcast that
/// arrived this round whose `relay_count` is below `max_relay_count` and that
/// it has not relayed within the last `memory_ticks` rounds, then lets the
/// most urgent message preempt its current activity.
///
/// The receive-side filter never hop-limits broadcasts, so this behavior is
/// what keeps a flood finite: it refuses to forward past `max_relay_count`
/// and ignores echoes of what it just forwarded.  A sender repeating the same
/// broadcast later is relayed again once the memory has expired.
///
/// Malformed frames are logged and the round continues.
pub struct RelayBehavior {
    pub max_relay_count: u32,
    pub memory_ticks:    u64,
}

impl Default for RelayBehavior {
    fn default() -> Self {
        Self {
            max_relay_count: MAX_RELAY_COUNT,
            memory_ticks:    RELAY_MEMORY_TICKS,
        }
    }
}

impl RelayBehavior {
    fn should_relay(&self, robot: &Robot, msg: &Message) -> bool {
        msg.recipient.is_broadcast()
            && msg.sender_id != robot.id
            && msg.relay_count < self.max_relay_count
            && !robot.relayed.contains_key(&key_of(msg))
    }
}

impl Behavior for RelayBehavior {
    fn on_tick(&self, robot: &mut Robot, ctx: &TickContext) -> SimResult<()> {
        robot.relayed.retain(|_, at| ctx.tick.since(*at) < self.memory_ticks);

        let before = inbox_counts(&robot.inbox);
        match robot.receive() {
            Ok(_) => {}
            Err(SimError::Comm(err @ CommError::MalformedFrame { .. })) => {
                warn!("{} : {}", robot.id, err);
            }
            Err(other) => return Err(other),
        }

        let this: &Robot = robot;
        let to_relay: Vec<Message> = arrivals(&this.inbox, before)
            .filter(|m| self.should_relay(this, m))
            .cloned()
            .collect();

        for msg in to_relay {
            // Two copies of one message can land in the same batch.
            if robot.relayed.insert(key_of(&msg), ctx.tick).is_none() {
                robot.comm.relay_message(&msg);
            }
        }

        robot.take_preempting();
        Ok(())
    }
}

fn key_of(msg: &Message) -> MessageKey {
    (msg.sender_id.clone(), msg.priority, msg.payload.clone())
}

type PriorityCounts = [usize; Priority::ALL.len()];

fn inbox_counts(inbox: &PriorityInbox) -> PriorityCounts {
    Priority::ALL.map(|p| inbox.count_at(p))
}

/// Messages appended to `inbox` after `before` was taken.  Each priority
/// level is FIFO, so new arrivals sit behind the first `before[rank]`.
fn arrivals(inbox: &PriorityInbox, before: PriorityCounts) -> impl Iterator<Item = &Message> {
    let mut seen: PriorityCounts = [0; Priority::ALL.len()];
    inbox.iter().filter(move |m| {
        let rank = usize::from(m.priority.rank());
        seen[rank] += 1;
        seen[rank] > before[rank]
    })
}
