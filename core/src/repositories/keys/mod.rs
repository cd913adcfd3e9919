//! Key material persistence interface and in-memory implementation.

mod memory;
mod r#trait;

pub use memory::InMemoryKeyMaterialRepository;
pub use r#trait::KeyMaterialRepository;
