use super::code;
use super::prelude::*;

/// Sync (F) message.
#[derive(Debug, Clone)]
pub struct Sync;

impl FromBytes for Sync {
    fn from_bytes(mut bytes: Bytes) -> Result<Self, Error> {
        code!(bytes, 'S');
        Ok(Sync)
    }
}

impl Protocol for Sync {
    fn code(&self) -> char {
        'S'
    }
}

impl ToBytes for Sync {
    fn to_bytes(&self) -> Result<Bytes, Error> {
        let payload = Payload::named(self.code());
        Ok(payload.freeze())
    }
}

/// Flush (F) message.
#[derive(Debug, Clone)]
pub struct Flush;

impl FromBytes for Flush {
    fn from_bytes(mut bytes: Bytes) -> Result<Self, Error> {
        code!(bytes, 'H');
        Ok(Flush)
    }
}

impl Protocol for Flush {
    fn code(&self) -> char {
        'H'
    }
}

impl ToBytes for Flush {
    fn to_bytes(&self) -> Result<Bytes, Error> {
        let payload = Payload::named(self.code());
        Ok(payload.freeze())
    }
}
