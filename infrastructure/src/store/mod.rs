//! Canonical record store adapters

mod memory;

pub use memory::InMemoryCanonicalStore;
