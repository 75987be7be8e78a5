pub mod connection;
pub mod memory;
pub mod properties;
pub mod seed;
pub mod store;

pub use memory::MemoryStore;
pub use properties::SqliteStore;
pub use store::{PropertyStore, StoreError};
