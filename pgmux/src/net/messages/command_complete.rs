//! CommandComplete (B) message.

use super::code;
use super::prelude::*;

#[derive(Debug, Clone)]
pub struct CommandComplete {
    command: String,
}

impl CommandComplete {
    pub fn new(command: impl ToString) -> Self {
        Self {
            command: command.to_string(),
        }
    }

    /// Command tag, e.g. "DEALLOCATE ALL".
    pub fn command(&self) -> &str {
        &self.command
    }
}

impl FromBytes for CommandComplete {
    fn from_bytes(mut bytes: Bytes) -> Result<Self, Error> {
        code!(bytes, 'C');
        ensure(&bytes, 4)?;
        let _len = bytes.get_i32();
        let command = c_string_buf(&mut bytes)?;

        Ok(Self { command })
    }
}

impl ToBytes for CommandComplete {
    fn to_bytes(&self) -> Result<Bytes, Error> {
        let mut payload = Payload::named(self.code());
        payload.put_string(&self.command);

        Ok(payload.freeze())
    }
}

impl Protocol for CommandComplete {
    fn code(&self) -> char {
        'C'
    }
}
