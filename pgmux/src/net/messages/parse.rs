//! Parse (F) message.

use super::code;
use super::prelude::*;

/// Parse (F) message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Parse {
    /// Prepared statement name.
    name: String,
    /// Prepared statement query.
    query: String,
    /// Parameter data types.
    data_types: Vec<i32>,
}

impl Parse {
    /// New named prepared statement.
    pub fn named(name: impl ToString, query: impl ToString) -> Self {
        Self {
            name: name.to_string(),
            query: query.to_string(),
            data_types: vec![],
        }
    }

    /// Set parameter data types.
    pub fn with_data_types(mut self, data_types: Vec<i32>) -> Self {
        self.data_types = data_types;
        self
    }

    /// Prepared statement name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Prepared statement query.
    pub fn query(&self) -> &str {
        &self.query
    }

    /// Parameter data types.
    pub fn data_types(&self) -> &[i32] {
        &self.data_types
    }

    /// Is this the unnamed statement?
    pub fn anonymous(&self) -> bool {
        self.name.is_empty()
    }

    /// Same statement, different name.
    pub fn rename(&self, name: &str) -> Parse {
        Parse {
            name: name.to_owned(),
            query: self.query.clone(),
            data_types: self.data_types.clone(),
        }
    }
}

impl FromBytes for Parse {
    fn from_bytes(mut bytes: Bytes) -> Result<Self, Error> {
        code!(bytes, 'P');
        ensure(&bytes, 4)?;
        let _len = bytes.get_i32();
        let name = c_string_buf(&mut bytes)?;
        let query = c_string_buf(&mut bytes)?;

        ensure(&bytes, 2)?;
        let params = bytes.get_i16().max(0) as usize;
        ensure(&bytes, params * 4)?;
        let data_types = (0..params).map(|_| bytes.get_i32()).collect();

        Ok(Self {
            name,
            query,
            data_types,
        })
    }
}

impl ToBytes for Parse {
    fn to_bytes(&self) -> Result<Bytes, Error> {
        let mut payload = Payload::named(self.code());
        payload.put_string(&self.name);
        payload.put_string(&self.query);
        payload.put_i16(self.data_types.len() as i16);

        for data_type in &self.data_types {
            payload.put_i32(*data_type);
        }

        Ok(payload.freeze())
    }
}

impl Protocol for Parse {
    fn code(&self) -> char {
        'P'
    }
}
