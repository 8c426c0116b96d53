pub mod state;

pub use state::{Action, ExecutionItem, ProtocolState};
