//! Describe (statement) from the client.

use tokio::io::{AsyncRead, AsyncWrite};
use tracing::{debug, error};

use super::Client;
use crate::backend::Server;
use crate::frontend::Error;
use crate::net::Describe;

impl<S: AsyncRead + AsyncWrite + Unpin> Client<S> {
    pub(super) async fn describe<T>(
        &mut self,
        server: &mut Server<T>,
        describe: Describe,
    ) -> Result<(), Error>
    where
        T: AsyncRead + AsyncWrite + Unpin,
    {
        self.stats.update(|counts| counts.describe += 1);

        let parse = match self.prepared_statements.lookup(describe.name()) {
            Some(parse) => parse,
            None => return Err(self.missing(describe.name()).await),
        };

        // Statement must have been prepared by a Parse or a Bind on this server.
        let rewritten = match server.prepared_statements().name(parse.query()) {
            Some(name) => {
                debug!(
                    "mapped statement \"{}\" to \"{}\" [{}]",
                    parse.name(),
                    name,
                    parse.query()
                );
                describe.rename(name)
            }
            None => {
                error!(
                    "statement \"{}\" is not prepared on the server [{}]",
                    parse.name(),
                    parse.query()
                );
                return Err(Error::ServerStatementMissing {
                    name: parse.name().to_owned(),
                    query: parse.query().to_owned(),
                });
            }
        };

        server.send_flush(&rewritten).await?;

        Ok(())
    }
}
