//! `rr-core`: foundational types for the `robot_relay` framework.
//!
//! This crate is a dependency of every other `rr-*` crate.  It has no `rr-*`
//! dependencies and minimal external ones (only `rand` and `thiserror`, plus
//! optional `serde`).
//!
//! # What lives here
//!
//! | Module          | Contents                                              |
//! |-----------------|-------------------------------------------------------|
//! | [`ids`]         | `PeerId`, `Recipient`                                 |
//! | [`priority`]    | `Priority` enum with explicit ranks                   |
//! | [`time`]        | `Tick`, `SimClock`                                    |
//! | [`geo`]         | `Position` (planar, metres)                           |
//! | [`rng`]         | `AgentRng` (per-robot), `SimRng` (global)             |
//! | [`error`]       | `CoreError`                                           |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.        |

pub mod error;
pub mod geo;
pub mod ids;
pub mod priority;
pub mod rng;
pub mod time;

#[cfg(test)]
mod tests;

// ── Re-exports ────────────────────────────────────────────────────────────────

pub use error::CoreError;
pub use geo::Position;
pub use ids::{PeerId, Recipient};
pub use priority::Priority;
pub use rng::{AgentRng, SimRng};
pub use time::{SimClock, Tick};
