//! Frontend/backend protocol errors.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("{0}")]
    Io(#[from] std::io::Error),

    #[error("unexpected EOF")]
    UnexpectedEof,

    #[error("expected message '{expected}', got '{got}'")]
    UnexpectedPayload { expected: char, got: char },

    #[error("message is truncated")]
    Truncated,

    #[error("unknown describe or close target '{0}'")]
    UnknownTarget(char),

    #[error("{0}")]
    Utf8(#[from] std::str::Utf8Error),

    #[error("{0}")]
    TryFromInt(#[from] std::num::TryFromIntError),
}
