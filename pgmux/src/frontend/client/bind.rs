//! Bind from the client.

use tokio::io::{AsyncRead, AsyncWrite};
use tracing::debug;

use super::Client;
use crate::backend::Server;
use crate::frontend::Error;
use crate::net::Bind;

impl<S: AsyncRead + AsyncWrite + Unpin> Client<S> {
    /// Point the Bind at the server-side statement, preparing
    /// it first if the server doesn't have it.
    pub(super) async fn bind<T>(
        &mut self,
        server: &mut Server<T>,
        bind: Bind,
    ) -> Result<(), Error>
    where
        T: AsyncRead + AsyncWrite + Unpin,
    {
        self.stats.update(|counts| counts.bind += 1);

        let parse = match self.prepared_statements.lookup(bind.statement()) {
            Some(parse) => parse,
            None => return Err(self.missing(bind.statement()).await),
        };

        if server.prepared_statements().find(parse.query()).is_some() {
            self.stats.update(|counts| counts.cache_hits += 1);
        } else {
            self.stats.update(|counts| counts.cache_misses += 1);
            debug!(
                "statement \"{}\" not prepared on server, preparing before bind [{}]",
                parse.name(),
                parse.query()
            );
            server.prepare(parse, true).await?;
        }

        let rewritten = match server.prepared_statements_mut().bound(parse.query()) {
            Some(statement) => {
                debug!(
                    "mapped statement \"{}\" to \"{}\" [{}]",
                    parse.name(),
                    statement.name,
                    parse.query()
                );
                bind.rename(&statement.name)
            }
            None => {
                return Err(Error::ServerStatementMissing {
                    name: parse.name().to_owned(),
                    query: parse.query().to_owned(),
                })
            }
        };

        server.send(&rewritten).await?;

        Ok(())
    }
}
