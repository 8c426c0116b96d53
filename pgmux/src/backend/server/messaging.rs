//! Server message I/O.

use tokio::io::{AsyncRead, AsyncWrite};
use tracing::{debug, error, trace};

use super::Server;
use crate::backend::{Action, Error};
use crate::net::{CommandComplete, FromBytes, Message, Protocol};

impl<S: AsyncRead + AsyncWrite + Unpin> Server<S> {
    /// Queue a message. It goes out with the next flush.
    pub async fn send(&mut self, message: &impl Protocol) -> Result<(), Error> {
        self.stream.send(message).await?;
        Ok(())
    }

    /// Send a message to the server immediately.
    pub async fn send_flush(&mut self, message: &impl Protocol) -> Result<(), Error> {
        self.stream.send_flush(message).await?;
        Ok(())
    }

    /// Flush all pending messages making sure they are sent to the server immediately.
    pub async fn flush(&mut self) -> Result<(), Error> {
        self.stream.flush().await?;
        Ok(())
    }

    /// Read a single message from the server, skipping
    /// acknowledgements the client didn't ask for.
    pub async fn read(&mut self) -> Result<Message, Error> {
        loop {
            let message = self.stream.read().await?;

            match self.action(&message) {
                Ok(Action::Forward) => return Ok(message),
                Ok(Action::Ignore) => {
                    trace!("ignoring {:?}", message);
                    self.stats.update(|counts| counts.ignored_acks += 1);
                }
                Err(err) => {
                    error!(
                        "{} got: {}, outstanding: {:?}",
                        err,
                        message.code(),
                        self.state,
                    );
                    return Err(err);
                }
            }
        }
    }

    /// Update our bookkeeping for a message received from the server
    /// and decide if the client should see it.
    pub fn action(&mut self, message: &Message) -> Result<Action, Error> {
        match message.code() {
            'E' => {
                for name in self.state.error() {
                    if let Some(statement) = self.prepared_statements.remove_by_name(&name) {
                        debug!(
                            "statement \"{}\" was not prepared [{}]",
                            statement.name, statement.query
                        );
                    }
                }
                Ok(Action::Forward)
            }

            'C' => {
                let command_complete = CommandComplete::from_bytes(message.payload())?;
                if matches!(command_complete.command(), "DEALLOCATE ALL" | "DISCARD ALL") {
                    let cleared = self.prepared_statements.clear();
                    debug!(
                        "{}, forgot {} prepared statements",
                        command_complete.command(),
                        cleared
                    );
                }
                Ok(Action::Forward)
            }

            code => self.state.action(code),
        }
    }
}
