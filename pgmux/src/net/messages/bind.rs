//! Bind (F) message.
//!
//! Only the portal and statement names are decoded. Everything after
//! the statement name (parameter formats, values, result formats) is kept
//! as raw bytes and written back unchanged when the statement is renamed.

use super::code;
use super::prelude::*;

/// Bind (F) message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bind {
    portal: String,
    statement: String,
    tail: Bytes,
}

impl Bind {
    /// Bind to a statement without parameters.
    pub fn new_statement(name: &str) -> Self {
        Self {
            portal: String::new(),
            statement: name.to_owned(),
            // No parameter formats, no parameters, no result formats.
            tail: Bytes::from_static(&[0; 6]),
        }
    }

    /// Bind to a statement with text parameters. `None` is NULL.
    pub fn new_params(name: &str, params: &[Option<&[u8]>]) -> Result<Self, Error> {
        let mut tail = bytes::BytesMut::new();
        tail.put_i16(0); // All parameters are text.
        tail.put_i16(i16::try_from(params.len())?);

        for param in params {
            match param {
                Some(value) => {
                    tail.put_i32(i32::try_from(value.len())?);
                    tail.put_slice(value);
                }
                None => tail.put_i32(-1),
            }
        }

        tail.put_i16(0); // All results are text.

        Ok(Self {
            portal: String::new(),
            statement: name.to_owned(),
            tail: tail.freeze(),
        })
    }

    /// Portal name.
    pub fn portal(&self) -> &str {
        &self.portal
    }

    /// Prepared statement name.
    pub fn statement(&self) -> &str {
        &self.statement
    }

    /// Bytes after the statement name.
    pub fn tail(&self) -> &Bytes {
        &self.tail
    }

    /// Value of the length field on the wire.
    pub fn wire_len(&self) -> usize {
        4 + self.portal.len() + 1 + self.statement.len() + 1 + self.tail.len()
    }

    /// Same Bind, pointing to a different statement.
    pub fn rename(&self, name: &str) -> Bind {
        Bind {
            portal: self.portal.clone(),
            statement: name.to_owned(),
            tail: self.tail.clone(),
        }
    }
}

impl FromBytes for Bind {
    fn from_bytes(mut bytes: Bytes) -> Result<Self, Error> {
        code!(bytes, 'B');
        ensure(&bytes, 4)?;
        let _len = bytes.get_i32();
        let portal = c_string_buf(&mut bytes)?;
        let statement = c_string_buf(&mut bytes)?;

        Ok(Self {
            portal,
            statement,
            tail: bytes,
        })
    }
}

impl ToBytes for Bind {
    fn to_bytes(&self) -> Result<Bytes, Error> {
        let mut payload = Payload::named(self.code());
        payload.reserve(self.wire_len());
        payload.put_string(&self.portal);
        payload.put_string(&self.statement);
        payload.put_slice(&self.tail);

        Ok(payload.freeze())
    }
}

impl Protocol for Bind {
    fn code(&self) -> char {
        'B'
    }
}
