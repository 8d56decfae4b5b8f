//! Adapters layer
//!
//! Implementations of port traits for external systems.

pub mod memory;

pub use memory::InMemoryTodoRepository;
