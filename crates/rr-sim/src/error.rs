use rr_comm::CommError;
use rr_radio::RadioError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SimError {
    #[error("swarm configuration error: {0}")]
    Config(String),

    #[error("roster error: {0}")]
    Roster(String),

    #[error("communication error: {0}")]
    Comm(#[from] CommError),

    #[error("radio error: {0}")]
    Radio(#[from] RadioError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type SimResult<T> = Result<T, SimError>;
