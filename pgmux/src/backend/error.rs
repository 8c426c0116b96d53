//! Backend errors.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("net: {0}")]
    Net(#[from] crate::net::Error),

    #[error("protocol out of sync: expected {expected}, got '{got}'")]
    ProtocolOutOfSync { expected: &'static str, got: char },
}

impl Error {
    /// The server connection can't be trusted anymore
    /// because our bookkeeping is wrong.
    pub fn out_of_sync(&self) -> bool {
        matches!(self, Error::ProtocolOutOfSync { .. })
    }
}
