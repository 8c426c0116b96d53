//! Prepared statements of one client, by the name the client gave them.

use fnv::FnvHashMap as HashMap;

use super::Error;
use crate::net::Parse;

#[derive(Debug, Default, Clone)]
pub struct ClientStatements {
    statements: HashMap<String, Parse>,
}

impl ClientStatements {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a statement, refusing to replace one with the same name.
    pub fn register(&mut self, parse: Parse) -> Result<(), Error> {
        if self.statements.contains_key(parse.name()) {
            return Err(Error::DuplicateName(parse.name().to_owned()));
        }

        self.insert(parse);
        Ok(())
    }

    /// Add a statement. A statement with the same name is replaced
    /// and returned.
    pub fn insert(&mut self, parse: Parse) -> Option<Parse> {
        self.statements.insert(parse.name().to_owned(), parse)
    }

    pub fn lookup(&self, name: &str) -> Option<&Parse> {
        self.statements.get(name)
    }

    pub fn remove(&mut self, name: &str) -> Option<Parse> {
        self.statements.remove(name)
    }

    /// Drop all statements.
    pub fn clear(&mut self) -> usize {
        let len = self.len();
        self.statements.clear();
        len
    }

    pub fn len(&self) -> usize {
        self.statements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
