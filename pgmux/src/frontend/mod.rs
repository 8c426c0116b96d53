//! Client side of the pooler: statements clients prepared
//! and the handlers that map them onto server statements.

pub mod client;
pub mod error;
pub mod prepared_statements;

pub use client::Client;
pub use error::{Error, ErrorKind};
pub use prepared_statements::ClientStatements;
