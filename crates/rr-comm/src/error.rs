use rr_message::FrameError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CommError {
    /// A dequeued frame could not be decoded.  `frame` is the raw text.
    #[error("invalid message format: {frame:?} ({source})")]
    MalformedFrame {
        frame:  String,
        #[source]
        source: FrameError,
    },

    #[error("communication configuration error: {0}")]
    Config(String),
}

pub type CommResult<T> = Result<T, CommError>;
