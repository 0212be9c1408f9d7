use rr_core::PeerId;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RadioError {
    #[error("medium configuration error: {0}")]
    Config(String),

    #[error("radio {0} is already attached to the medium")]
    DuplicateRadio(PeerId),

    #[error("radio {0} is not attached to the medium")]
    UnknownRadio(PeerId),
}

pub type RadioResult<T> = Result<T, RadioError>;
