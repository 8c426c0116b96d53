//! Server connection, as seen by the prepared statements layer.

use tokio::io::{AsyncRead, AsyncWrite};
use tracing::debug;

use super::{ProtocolState, Released, ServerStatements};
use crate::config::config;
use crate::net::Stream;
use crate::stats::Stats;

pub mod messaging;
pub mod prepare;

/// One connection to the database server. It serves
/// one client at a time.
#[derive(Debug)]
pub struct Server<S> {
    stream: Stream<S>,
    prepared_statements: ServerStatements,
    state: ProtocolState,
    stats: Stats,
}

impl<S: AsyncRead + AsyncWrite + Unpin> Server<S> {
    /// Wrap a connected socket. Cache capacity comes from the configuration.
    pub fn new(stream: S, stats: Stats) -> Self {
        let capacity = config().general.prepared_statements_limit;
        Self::with_capacity(stream, capacity, stats)
    }

    /// Wrap a connected socket, caching at most `capacity` statements.
    pub fn with_capacity(stream: S, capacity: usize, stats: Stats) -> Self {
        Self {
            stream: Stream::new(stream),
            prepared_statements: ServerStatements::new(capacity),
            state: ProtocolState::default(),
            stats,
        }
    }

    /// Statements prepared on this connection.
    pub fn prepared_statements(&self) -> &ServerStatements {
        &self.prepared_statements
    }

    pub(crate) fn prepared_statements_mut(&mut self) -> &mut ServerStatements {
        &mut self.prepared_statements
    }

    /// Commands waiting for the server to acknowledge them.
    pub fn state(&self) -> &ProtocolState {
        &self.state
    }

    pub(crate) fn state_mut(&mut self) -> &mut ProtocolState {
        &mut self.state
    }

    pub fn stats(&self) -> &Stats {
        &self.stats
    }

    /// Connection is gone. Drop everything we know about it
    /// without talking to the server again.
    pub fn teardown(mut self) -> Released {
        let released = Released {
            statements: self.prepared_statements.clear(),
            outstanding: self.state.clear(),
        };

        debug!(
            "server connection closed, dropped {} statements and {} outstanding acks",
            released.statements, released.outstanding
        );

        released
    }
}
