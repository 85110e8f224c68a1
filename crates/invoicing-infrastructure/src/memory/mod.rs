//! In-memory repository implementations, used when no database URL is
//! configured and by the HTTP tests.

mod store;

pub use store::InMemoryStore;
