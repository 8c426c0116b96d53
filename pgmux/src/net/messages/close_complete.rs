//! CloseComplete (B) message.
use super::code;
use super::prelude::*;

#[derive(Debug, Clone)]
pub struct CloseComplete;

impl FromBytes for CloseComplete {
    fn from_bytes(mut bytes: Bytes) -> Result<Self, Error> {
        code!(bytes, '3');
        Ok(Self)
    }
}

impl ToBytes for CloseComplete {
    fn to_bytes(&self) -> Result<Bytes, Error> {
        let payload = Payload::named(self.code());
        Ok(payload.freeze())
    }
}

impl Protocol for CloseComplete {
    fn code(&self) -> char {
        '3'
    }
}
