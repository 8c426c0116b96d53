//! PostgreSQL protocol messages.

pub mod bind;
pub mod close;
pub mod close_complete;
pub mod command_complete;
pub mod describe;
pub mod error_response;
pub mod parse;
pub mod parse_complete;
pub mod prelude;
pub mod rfq;
pub mod sync;

pub use bind::Bind;
pub use close::Close;
pub use close_complete::CloseComplete;
pub use command_complete::CommandComplete;
pub use describe::Describe;
pub use error_response::ErrorResponse;
pub use parse::Parse;
pub use parse_complete::ParseComplete;
pub use rfq::ReadyForQuery;
pub use sync::{Flush, Sync};

use std::fmt::Debug;
use std::ops::{Deref, DerefMut};

use bytes::{BufMut, Bytes, BytesMut};

use super::Error;

/// Convert a message into its wire representation.
pub trait ToBytes {
    fn to_bytes(&self) -> Result<Bytes, Error>;
}

/// Decode a message from its wire representation,
/// code and length included.
pub trait FromBytes: Sized {
    fn from_bytes(bytes: Bytes) -> Result<Self, Error>;
}

/// Any message that can be sent over the wire.
pub trait Protocol: ToBytes + Debug {
    /// Message code, e.g. 'P' for Parse.
    fn code(&self) -> char;
}

/// Check the message code and skip past it.
macro_rules! code {
    ($bytes:expr, $code:expr) => {
        if !::bytes::Buf::has_remaining(&$bytes) {
            return Err(crate::net::Error::Truncated);
        }
        let code = ::bytes::Buf::get_u8(&mut $bytes) as char;
        if code != $code {
            return Err(crate::net::Error::UnexpectedPayload {
                expected: $code,
                got: code,
            });
        }
    };
}

pub(crate) use code;

/// Make sure the buffer has at least `len` bytes left.
pub(crate) fn ensure(bytes: &Bytes, len: usize) -> Result<(), Error> {
    if bytes.len() < len {
        Err(Error::Truncated)
    } else {
        Ok(())
    }
}

/// A complete protocol message, as read from the wire.
#[derive(Clone, PartialEq, Eq)]
pub struct Message {
    payload: Bytes,
}

impl Debug for Message {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Message")
            .field("code", &self.code())
            .field("len", &self.len())
            .finish()
    }
}

impl Message {
    /// Wrap a framed message: code, length, body.
    pub fn new(payload: Bytes) -> Self {
        Self { payload }
    }

    /// Length of the message on the wire, code included.
    pub fn len(&self) -> usize {
        self.payload.len()
    }

    pub fn is_empty(&self) -> bool {
        self.payload.is_empty()
    }

    /// Message bytes.
    pub fn payload(&self) -> Bytes {
        self.payload.clone()
    }
}

impl ToBytes for Message {
    fn to_bytes(&self) -> Result<Bytes, Error> {
        Ok(self.payload.clone())
    }
}

impl Protocol for Message {
    fn code(&self) -> char {
        self.payload.first().map(|code| *code as char).unwrap_or('\0')
    }
}

/// Message under construction. The length is written
/// when the message is frozen.
#[derive(Debug, Clone)]
pub struct Payload {
    bytes: BytesMut,
}

impl Payload {
    /// Start a message with the given code.
    pub fn named(code: char) -> Self {
        let mut bytes = BytesMut::new();
        bytes.put_u8(code as u8);
        bytes.put_i32(0);

        Self { bytes }
    }

    /// Write a NUL-terminated string.
    pub fn put_string(&mut self, string: &str) {
        self.bytes.put_slice(string.as_bytes());
        self.bytes.put_u8(0);
    }

    /// Finish the message.
    pub fn freeze(mut self) -> Bytes {
        let len = (self.bytes.len() - 1) as i32;
        self.bytes[1..5].copy_from_slice(&len.to_be_bytes());
        self.bytes.freeze()
    }
}

impl Deref for Payload {
    type Target = BytesMut;

    fn deref(&self) -> &Self::Target {
        &self.bytes
    }
}

impl DerefMut for Payload {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.bytes
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_payload_length() {
        let mut payload = Payload::named('C');
        payload.put_u8(b'S');
        payload.put_string("B_1");
        let bytes = payload.freeze();

        assert_eq!(bytes[0], b'C');
        assert_eq!(&bytes[1..5], &9_i32.to_be_bytes());
        assert_eq!(&bytes[5..], b"SB_1\0");
    }

    #[test]
    fn test_message_code() {
        let message = Message::new(ParseComplete.to_bytes().unwrap());
        assert_eq!(message.code(), '1');
        assert_eq!(message.len(), 5);
    }
}
