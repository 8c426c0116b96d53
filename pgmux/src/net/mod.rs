//! Wire protocol: messages and the buffered stream they travel over.

pub mod error;
pub mod messages;
pub mod stream;

use bytes::{Buf, Bytes};

pub use error::Error;
pub use messages::*;
pub use stream::Stream;

/// Read a NUL-terminated string, advancing the buffer past the terminator.
pub fn c_string_buf(bytes: &mut Bytes) -> Result<String, Error> {
    let nul = memchr::memchr(0, bytes).ok_or(Error::Truncated)?;
    let string = std::str::from_utf8(&bytes[..nul])?.to_owned();
    bytes.advance(nul + 1);

    Ok(string)
}
