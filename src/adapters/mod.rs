// Adapters layer: concrete ProjectStore implementations.

pub mod http_store;
pub mod memory_store;

pub use http_store::HttpProjectStore;
pub use memory_store::InMemoryProjectStore;
