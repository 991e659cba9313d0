//! Test doubles for the repository traits: mockall mocks for
//! expectation-style tests and an in-memory store for stateful scenarios.

pub mod memory;
pub mod repositories;

pub use memory::InMemoryStore;
pub use repositories::MockStore;
