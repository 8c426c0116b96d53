//! Frontend errors.

use thiserror::Error;

/// Frontend error.
#[derive(Debug, Error)]
pub enum Error {
    #[error("net: {0}")]
    Net(#[from] crate::net::Error),

    #[error("{0}")]
    Backend(#[from] crate::backend::Error),

    #[error("prepared statement \"{0}\" is missing")]
    MissingPreparedStatement(String),

    #[error("prepared statement \"{name}\" is not prepared on the server [{query}]")]
    ServerStatementMissing { name: String, query: String },

    #[error("prepared statement \"{0}\" already exists")]
    DuplicateName(String),
}

/// What went wrong, broadly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Client sent something invalid. It gets disconnected.
    ClientProtocol,
    /// Reading or writing a socket failed. The connection is gone.
    Transport,
    /// Our own bookkeeping is wrong.
    Invariant,
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Net(_) => ErrorKind::Transport,
            Error::Backend(err) => {
                if err.out_of_sync() {
                    ErrorKind::Invariant
                } else {
                    ErrorKind::Transport
                }
            }
            Error::MissingPreparedStatement(_) | Error::DuplicateName(_) => {
                ErrorKind::ClientProtocol
            }
            Error::ServerStatementMissing { .. } => ErrorKind::Invariant,
        }
    }
}
