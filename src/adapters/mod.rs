// Adapters layer: concrete key-value stores behind the domain port.

pub mod local_storage;
pub mod memory_storage;

pub use local_storage::LocalStorage;
pub use memory_storage::MemoryStorage;
