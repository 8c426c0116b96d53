//! Prepared statements multiplexing for a PostgreSQL pooler.
//!
//! Clients name their prepared statements however they like. Server connections
//! are shared between many clients, so every statement a client references is
//! mapped, by query text, onto a statement the pooler prepared on the server
//! connection the client is currently linked to.

pub mod backend;
pub mod config;
pub mod frontend;
pub mod logger;
pub mod net;
pub mod stats;

pub use backend::{Released, Server};
pub use frontend::Client;
