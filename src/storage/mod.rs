//! Storage implementations for the registry

pub mod in_memory;
pub mod seed;

pub use in_memory::InMemoryRegistryStore;
pub use seed::seed_demo_data;
