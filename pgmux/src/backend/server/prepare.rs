//! Preparing statements on the server connection.

use tokio::io::{AsyncRead, AsyncWrite};
use tracing::trace;

use super::Server;
use crate::backend::{CachedStatement, Error};
use crate::net::{Close, Parse};

impl<S: AsyncRead + AsyncWrite + Unpin> Server<S> {
    /// Make sure the statement is prepared on this connection and
    /// return its server-side name.
    ///
    /// If the query is cached already, nothing is sent. Otherwise, when the cache
    /// is full, the least recently used statement is closed first. The Close is
    /// flushed right away and has to succeed. The Parse is only queued and goes
    /// out with whatever the client sends next.
    ///
    /// Set `ignore` if the client didn't ask for this Parse and
    /// shouldn't see its ParseComplete.
    pub async fn prepare(&mut self, parse: &Parse, ignore: bool) -> Result<String, Error> {
        if let Some(statement) = self.prepared_statements.find(parse.query()) {
            return Ok(statement.name.clone());
        }

        if self.prepared_statements.full() {
            if let Some(evicted) = self.prepared_statements.evict_lru() {
                self.close(evicted).await?;
                self.stats.update(|counts| counts.evictions += 1);
            }
        }

        let name = self.prepared_statements.next_name();
        self.stream.send(&parse.rename(&name)).await?;
        self.state.add_parse(&name, ignore);
        self.stats.update(|counts| counts.server_parse += 1);
        trace!("prepared \"{}\" [{}]", name, parse.query());

        if let Some(pushed_out) = self.prepared_statements.insert(parse.query(), &name) {
            self.close(pushed_out).await?;
        }

        Ok(name)
    }

    // Close a statement that is no longer in the cache. The client never sees
    // the CloseComplete.
    async fn close(&mut self, statement: CachedStatement) -> Result<(), Error> {
        self.stream.send_flush(&Close::named(&statement.name)).await?;
        self.state.add_close(true);
        trace!("closed \"{}\" [{}]", statement.name, statement.query);

        Ok(())
    }
}
