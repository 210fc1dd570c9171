// Test doubles for the storage ports.

pub mod in_memory_stores;

pub use in_memory_stores::{InMemoryFileStore, InMemorySheetStore};
