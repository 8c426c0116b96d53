//! Statements prepared on one server connection.
//!
//! Keyed by query text, so every client statement with the same query
//! maps onto one server statement. When the cache is full, the least
//! recently used statement has to be closed on the server to make room.

use std::num::NonZeroUsize;

use lru::LruCache;

// Name of the statement on the server connection.
fn server_name(counter: usize) -> String {
    format!("B_{}", counter)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CachedStatement {
    /// Name on the server connection, e.g. `B_1`.
    pub name: String,
    /// Query text.
    pub query: String,
    /// Number of Binds that used this statement.
    pub binds: usize,
}

#[derive(Debug)]
pub struct ServerStatements {
    statements: LruCache<String, CachedStatement>,
    counter: usize,
}

impl ServerStatements {
    /// Create a cache holding at most `capacity` statements.
    ///
    /// Minimum capacity is 1.
    pub fn new(capacity: usize) -> Self {
        let capacity = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN);

        Self {
            statements: LruCache::new(capacity),
            counter: 0,
        }
    }

    /// Find the statement prepared for this query.
    /// Doesn't change its position in the LRU.
    pub fn find(&self, query: &str) -> Option<&CachedStatement> {
        self.statements.peek(query)
    }

    /// Server-side name of the statement prepared for this query.
    pub fn name(&self, query: &str) -> Option<&str> {
        self.find(query).map(|statement| statement.name.as_str())
    }

    /// Mark the statement as most recently used.
    pub fn touch(&mut self, query: &str) {
        self.statements.promote(query);
    }

    /// Statement is used by a Bind.
    pub(crate) fn bound(&mut self, query: &str) -> Option<&CachedStatement> {
        let statement = self.statements.get_mut(query)?;
        statement.binds += 1;
        Some(statement)
    }

    /// Generate a name for the next statement. Names are never
    /// reused for the lifetime of the connection.
    pub fn next_name(&mut self) -> String {
        let name = server_name(self.counter);
        self.counter += 1;
        name
    }

    /// Inserting another statement requires evicting one first.
    pub fn full(&self) -> bool {
        self.len() >= self.capacity()
    }

    /// Remove the least recently used statement.
    pub fn evict_lru(&mut self) -> Option<CachedStatement> {
        self.statements.pop_lru().map(|(_, statement)| statement)
    }

    /// Add a statement. Returns the statement it pushed out, either the least
    /// recently used one or an older statement for the same query. The caller
    /// must close it on the server.
    #[must_use]
    pub fn insert(&mut self, query: &str, name: &str) -> Option<CachedStatement> {
        let statement = CachedStatement {
            name: name.to_owned(),
            query: query.to_owned(),
            binds: 0,
        };

        self.statements
            .push(query.to_owned(), statement)
            .map(|(_, statement)| statement)
            .filter(|statement| statement.name != name)
    }

    /// Remove a statement by its server-side name.
    pub fn remove_by_name(&mut self, name: &str) -> Option<CachedStatement> {
        let query = self
            .statements
            .iter()
            .find(|(_, statement)| statement.name == name)
            .map(|(query, _)| query.clone())?;

        self.statements.pop(&query)
    }

    /// Forget all statements. No Close is sent, the server
    /// already dropped them or the connection is gone.
    pub fn clear(&mut self) -> usize {
        let len = self.len();
        self.statements.clear();
        len
    }

    pub fn len(&self) -> usize {
        self.statements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.statements.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.statements.cap().get()
    }

    /// Statements, least recently used first.
    pub fn iter(&self) -> impl Iterator<Item = &CachedStatement> + '_ {
        self.statements.iter().rev().map(|(_, statement)| statement)
    }
}
