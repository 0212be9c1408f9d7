//! Inbox: where accepted messages wait for behavior logic.
//!
//! The communication manager only needs two operations from an inbox:
//! append an accepted message and wipe everything.  Ordering is the inbox's
//! business, so the manager is written against the [`Inbox`] trait and
//! [`PriorityInbox`] supplies the ordering robots actually use: most urgent
//! first, arrival order among equals.
//!
//! # Performance note
//!
//! `BTreeMap<Reverse<Priority>, VecDeque<_>>` gives O(log P) append and pop
//! where P is the number of distinct priorities currently held (at most six),
//! so both are effectively O(1).

use std::cmp::Reverse;
use std::collections::{BTreeMap, VecDeque};

use rr_core::Priority;

use crate::Message;

/// Sink for accepted messages.
pub trait Inbox {
    /// Store one accepted message.
    fn append(&mut self, msg: Message);

    /// Drop every stored message.
    fn clear(&mut self);
}

/// Plain arrival-order inbox for callers that sort elsewhere.
impl Inbox for Vec<Message> {
    fn append(&mut self, msg: Message) {
        self.push(msg);
    }

    fn clear(&mut self) {
        Vec::clear(self);
    }
}

/// Messages ordered by descending priority, FIFO within a priority.
#[derive(Default, Debug, Clone)]
pub struct PriorityInbox {
    inner: BTreeMap<Reverse<Priority>, VecDeque<Message>>,
    /// Cached total message count for O(1) `len()`.
    total: usize,
}

impl PriorityInbox {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert `msg` behind every message of equal or higher priority.
    pub fn push(&mut self, msg: Message) {
        self.inner.entry(Reverse(msg.priority)).or_default().push_back(msg);
        self.total += 1;
    }

    /// Remove and return the most urgent message.
    pub fn pop(&mut self) -> Option<Message> {
        let mut entry = self.inner.first_entry()?;
        let msg = entry.get_mut().pop_front();
        if entry.get().is_empty() {
            entry.remove();
        }
        if msg.is_some() {
            self.total -= 1;
        }
        msg
    }

    /// The message `pop` would return next.
    pub fn peek(&self) -> Option<&Message> {
        self.inner.values().next().and_then(VecDeque::front)
    }

    /// Priority of the most urgent held message.
    pub fn top_priority(&self) -> Option<Priority> {
        self.inner.keys().next().map(|Reverse(p)| *p)
    }

    /// All held messages in pop order.
    pub fn iter(&self) -> impl Iterator<Item = &Message> + '_ {
        self.inner.values().flatten()
    }

    /// Remove and return every message in pop order.
    pub fn drain(&mut self) -> Vec<Message> {
        let out: Vec<Message> = std::mem::take(&mut self.inner)
            .into_values()
            .flatten()
            .collect();
        self.total = 0;
        out
    }

    pub fn len(&self) -> usize {
        self.total
    }

    pub fn is_empty(&self) -> bool {
        self.total == 0
    }

    /// Number of messages held at exactly `priority`.
    pub fn count_at(&self, priority: Priority) -> usize {
        self.inner.get(&Reverse(priority)).map_or(0, VecDeque::len)
    }
}

impl Inbox for PriorityInbox {
    fn append(&mut self, msg: Message) {
        self.push(msg);
    }

    fn clear(&mut self) {
        self.inner.clear();
        self.total = 0;
    }
}
