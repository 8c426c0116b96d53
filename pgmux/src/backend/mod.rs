//! Server side of the pooler: statements prepared on a server
//! connection and the acknowledgements we are still waiting for.

pub mod error;
pub mod prepared_statements;
pub mod protocol;
pub mod server;

pub use error::Error;
pub use prepared_statements::{CachedStatement, ServerStatements};
pub use protocol::{Action, ProtocolState};
pub use server::Server;

/// What a connection held when it was torn down.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Released {
    /// Prepared statements dropped.
    pub statements: usize,
    /// Acknowledgements we were still waiting for.
    pub outstanding: usize,
}
