use serde::{Deserialize, Serialize};
use std::ops::Add;

/// Prepared statements stats, aggregated across
/// all clients and servers of a pool.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Counts {
    /// Parse messages received from clients.
    pub client_parse: usize,
    /// Parse messages sent to servers.
    pub server_parse: usize,
    /// Bind messages received from clients.
    pub bind: usize,
    /// Statement Describe messages received from clients.
    pub describe: usize,
    /// Statement Close messages received from clients.
    pub close: usize,
    /// Statement found in the server cache.
    pub cache_hits: usize,
    /// Statement had to be prepared on the server.
    pub cache_misses: usize,
    /// Statements closed on the server to make room.
    pub evictions: usize,
    /// Server acknowledgements hidden from the client.
    pub ignored_acks: usize,
}

impl Add for Counts {
    type Output = Counts;

    fn add(self, rhs: Self) -> Self::Output {
        Counts {
            client_parse: self.client_parse.saturating_add(rhs.client_parse),
            server_parse: self.server_parse.saturating_add(rhs.server_parse),
            bind: self.bind.saturating_add(rhs.bind),
            describe: self.describe.saturating_add(rhs.describe),
            close: self.close.saturating_add(rhs.close),
            cache_hits: self.cache_hits.saturating_add(rhs.cache_hits),
            cache_misses: self.cache_misses.saturating_add(rhs.cache_misses),
            evictions: self.evictions.saturating_add(rhs.evictions),
            ignored_acks: self.ignored_acks.saturating_add(rhs.ignored_acks),
        }
    }
}
