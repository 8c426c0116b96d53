pub mod prepared;

pub use prepared::Counts;
