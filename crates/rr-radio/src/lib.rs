//! `rr-radio`: the device seam between the communication manager and
//! whatever actually moves frames.
//!
//! # Crate layout
//!
//! | Module       | Contents                                                     |
//! |--------------|--------------------------------------------------------------|
//! | [`device`]   | `Emitter`, `Receiver`, `Stepper` traits; `Device` blanket    |
//! | [`medium`]   | `BroadcastMedium`, `MediumConfig`, `RadioDevice`             |
//! | [`scripted`] | `ScriptedDevice`: records sends, replays queued frames      |
//! | [`error`]    | `RadioError`, `RadioResult<T>`                               |
//!
//! # Design notes
//!
//! The three device traits mirror what a robot controller exposes: a
//! fire-and-forget emitter, a packet queue, and a blocking time step.  The
//! communication manager couples them (send then step, step then drain) but
//! never reaches past these traits, so a host simulator, a real radio, or a
//! test double can sit underneath.

pub mod device;
pub mod error;
pub mod medium;
pub mod scripted;


pub use device::{Device, Emitter, Receiver, Stepper};
pub use error::{RadioError, RadioResult};
pub use medium::{BroadcastMedium, MediumConfig, RadioDevice};
pub use scripted::ScriptedDevice;
