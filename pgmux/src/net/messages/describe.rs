//! Describe (F) message.

use super::code;
use super::prelude::*;

/// Describe (F) message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Describe {
    kind: char,
    name: String,
}

impl Describe {
    /// Describe a prepared statement.
    pub fn new_statement(name: &str) -> Self {
        Self {
            kind: 'S',
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

    /// Same Describe, different name.
    pub fn rename(&self, name: &str) -> Describe {
        Describe {
            kind: self.kind,
            name: name.to_owned(),
        }
    }
}

impl FromBytes for Describe {
    fn from_bytes(mut bytes: Bytes) -> Result<Self, Error> {
        code!(bytes, 'D');
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

impl ToBytes for Describe {
    fn to_bytes(&self) -> Result<Bytes, Error> {
        let mut payload = Payload::named(self.code());
        payload.put_u8(self.kind as u8);
        payload.put_string(&self.name);

        Ok(payload.freeze())
    }
}

impl Protocol for Describe {
    fn code(&self) -> char {
        'D'
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_describe() {
        let describe = Describe::new_statement("__sqlx_1");
        let bytes = describe.rename("B_3").to_bytes().unwrap();
        assert_eq!(&bytes[..], b"D\x00\x00\x00\x09SB_3\x00");

        let decoded = Describe::from_bytes(bytes).unwrap();
        assert!(decoded.is_statement());
        assert_eq!(decoded.name(), "B_3");
    }

    #[test]
    fn test_unknown_target() {
        let bytes = Bytes::from_static(b"D\x00\x00\x00\x06X\x00");
        assert!(matches!(
            Describe::from_bytes(bytes),
            Err(Error::UnknownTarget('X'))
        ));
    }
}
