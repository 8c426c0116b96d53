//! Close (statement) from the client.

use tokio::io::{AsyncRead, AsyncWrite};
use tracing::{debug, trace};

use super::Client;
use crate::frontend::Error;
use crate::net::{Close, CloseComplete};

impl<S: AsyncRead + AsyncWrite + Unpin> Client<S> {
    /// Forget the statement. The server keeps its copy,
    /// other clients may still use it.
    pub(super) async fn close(&mut self, close: Close) -> Result<(), Error> {
        self.stats.update(|counts| counts.close += 1);

        match self.prepared_statements.remove(close.name()) {
            Some(_) => trace!(
                "removed \"{}\", {} statements remaining",
                close.name(),
                self.prepared_statements.len()
            ),
            None => debug!("closing unknown statement \"{}\"", close.name()),
        }

        self.stream.send_flush(&CloseComplete).await?;

        Ok(())
    }
}
