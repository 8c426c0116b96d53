//! Parse from the client.

use tokio::io::{AsyncRead, AsyncWrite};
use tracing::debug;

use super::Client;
use crate::backend::Server;
use crate::frontend::Error;
use crate::net::{Parse, ParseComplete};

impl<S: AsyncRead + AsyncWrite + Unpin> Client<S> {
    /// Prepare a statement. If the linked server already has a statement
    /// for this query, answer the client ourselves and send nothing.
    pub(super) async fn parse<T>(
        &mut self,
        server: &mut Server<T>,
        parse: Parse,
    ) -> Result<(), Error>
    where
        T: AsyncRead + AsyncWrite + Unpin,
    {
        self.stats.update(|counts| counts.client_parse += 1);

        if let Some(name) = server.prepared_statements().name(parse.query()) {
            debug!(
                "mapping statement \"{}\" to \"{}\" [{}]",
                parse.name(),
                name,
                parse.query()
            );
            self.stats.update(|counts| counts.cache_hits += 1);
            self.stream.send_flush(&ParseComplete).await?;
        } else {
            self.stats.update(|counts| counts.cache_misses += 1);
            let name = server.prepare(&parse, false).await?;
            debug!(
                "creating mapping for statement \"{}\" to \"{}\" [{}]",
                parse.name(),
                name,
                parse.query()
            );
        }

        if let Some(old) = self.prepared_statements.insert(parse) {
            debug!("statement \"{}\" redefined [{}]", old.name(), old.query());
        }

        Ok(())
    }
}
