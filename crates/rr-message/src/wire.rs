//! Semicolon-delimited wire codec.
//!
//! `encode_frame` renders a message exactly as given; the hop increment is
//! the sender's job (see `rr-comm`).  `decode_frame` is strict: exactly five
//! fields, a base-10 `u32` relay count, and a known priority label.

use rr_core::{PeerId, Priority, Recipient};

use crate::{FrameError, FrameResult, Message};

/// Field separator.
pub const DELIMITER: char = ';';

/// Number of fields in every frame.
pub const FIELD_COUNT: usize = 5;

/// Render `msg` as a wire frame.
pub fn encode_frame(msg: &Message) -> String {
    format!(
        "{sender}{d}{priority}{d}{count}{d}{payload}{d}{recipient}",
        sender    = msg.sender_id,
        priority  = msg.priority.as_str(),
        count     = msg.relay_count,
        payload   = msg.payload,
        recipient = msg.recipient.as_wire(),
        d         = DELIMITER,
    )
}

/// Parse one wire frame.
///
/// Callers skip empty frames before calling this; an empty string decodes as
/// a one-field frame and fails with [`FrameError::FieldCount`].
pub fn decode_frame(frame: &str) -> FrameResult<Message> {
    let fields: Vec<&str> = frame.split(DELIMITER).collect();
    let &[sender, priority, count, payload, recipient] = fields.as_slice() else {
        return Err(FrameError::FieldCount { found: fields.len() });
    };

    let relay_count: u32 = count.parse()?;
    let priority: Priority = priority
        .parse()
        .map_err(|_| FrameError::UnknownPriority(priority.to_owned()))?;

    Ok(Message {
        sender_id: PeerId::from(sender),
        priority,
        relay_count,
        payload: payload.to_owned(),
        recipient: Recipient::from_wire(recipient),
    })
}
