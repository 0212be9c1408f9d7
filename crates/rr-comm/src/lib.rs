//! `rr-comm`: the communication manager.
//!
//! # Crate layout
//!
//! | Module      | Contents                                                    |
//! |-------------|-------------------------------------------------------------|
//! | [`config`]  | `CommConfig`, `MalformedPolicy`, `MAX_RELAY_COUNT`          |
//! | [`manager`] | `CommManager<D>`, `ReceiveSummary`, `is_prioritary`         |
//! | [`error`]   | `CommError`, `CommResult<T>`                                |
//!
//! # Operations
//!
//! ```text
//! send_message(msg)        encode with relay_count + 1 → emit → step
//! send_message_all(..)     send_message once per known peer
//! receive_message(inbox)   step → snapshot queue length → decode, filter, append
//! is_prioritary(msg, cur)  msg.priority.rank() > cur.rank()
//! clear_messages(inbox)    discard queued frames unread → inbox.clear()
//! ```
//!
//! # Acceptance rule
//!
//! A decoded frame is accepted when its recipient is broadcast, **or** it is
//! addressed to this robot **and** `relay_count < max_relay_count`.  The hop
//! bound therefore applies only to addressed messages; broadcasts are
//! accepted at any count unless [`CommConfig::hop_limit_broadcasts`] is set.
//!
//! # Delivery
//!
//! Best effort.  A peer that is out of range, or that does not exist, simply
//! never receives the frame; the sender cannot tell the two apart and no
//! error is raised for either.

pub mod config;
pub mod error;
pub mod manager;

#[cfg(test)]
mod tests;

pub use config::{CommConfig, MalformedPolicy, MAX_RELAY_COUNT};
pub use error::{CommError, CommResult};
pub use manager::{is_prioritary, CommManager, ReceiveSummary};
