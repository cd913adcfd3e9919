//! User store interface and in-memory implementation.

mod memory;
mod r#trait;

pub use memory::InMemoryUserRepository;
pub use r#trait::UserRepository;
