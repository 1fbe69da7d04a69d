//! Persistence layer

pub mod memory;
pub mod store;
pub mod traits;

pub use memory::InMemoryEntityStore;
pub use store::{PgEntity, PostgresEntityStore};
pub use traits::{EntityStore, StoreTransaction};
