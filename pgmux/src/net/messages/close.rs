//! Close (F) message.

use super::code;
use super::prelude::*;

/// Close (F) message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Close {
    kind: char,
    name: String,
}

impl Close {
    /// Close a prepared statement.
    pub fn named(name: &str) -> Self {
        Self {
            kind: 'S',
            name: name.to_owned(),
        }
    }

    /// Close a portal.
    pub fn portal(name: &str) -> Self {
        Self {
            kind: 'P',
            name: name.to_owned(),
        }
    }

    /// 'S' for statement, 'P' for portal.
    pub fn kind(&self) -> char {
        self.kind
    }

    pub fn is_statement(&self) -> bool {
        self.kind == 'S'
    }

    /// Statement or portal name.
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl FromBytes for Close {
    fn from_bytes(mut bytes: Bytes) -> Result<Self, Error> {
        code!(bytes, 'C');
        ensure(&bytes, 5)?;
        let _len = bytes.get_i32();
        let kind = bytes.get_u8() as char;
        if !matches!(kind, 'S' | 'P') {
            return Err(Error::UnknownTarget(kind));
        }
        let name = c_string_buf(&mut bytes)?;

        Ok(Self { kind, name })
    }
}

impl ToBytes for Close {
    fn to_bytes(&self) -> Result<Bytes, Error> {
        let mut payload = Payload::named(self.code());
        payload.put_u8(self.kind as u8);
        payload.put_string(&self.name);

        Ok(payload.freeze())
    }
}

impl Protocol for Close {
    fn code(&self) -> char {
        'C'
    }
}
