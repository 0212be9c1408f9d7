//! `rr-message`: the message value, its wire encoding, and the inbox it is
//! delivered into.
//!
//! # Crate layout
//!
//! | Module       | Contents                                                 |
//! |--------------|----------------------------------------------------------|
//! | [`message`]  | `Message`                                                |
//! | [`wire`]     | `encode_frame`, `decode_frame`, `DELIMITER`, `FIELD_COUNT` |
//! | [`inbox`]    | `Inbox` trait, `PriorityInbox`                           |
//! | [`error`]    | `FrameError`, `FrameResult<T>`                           |
//!
//! # Wire format
//!
//! ```text
//! {sender_id};{priority};{relay_count};{payload};{recipient}
//! ```
//!
//! Five fields, `;`-delimited, no framing, no checksum.  An empty recipient
//! means broadcast.  Fields must not contain `;` themselves; a frame that
//! does will fail to decode with [`FrameError::FieldCount`].

pub mod error;
pub mod inbox;
pub mod message;
pub mod wire;


pub use error::{FrameError, FrameResult};
pub use inbox::{Inbox, PriorityInbox};
pub use message::Message;
pub use wire::{decode_frame, encode_frame, DELIMITER, FIELD_COUNT};
