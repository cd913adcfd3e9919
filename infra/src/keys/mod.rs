//! Durable key material storage.

mod file_repository;

pub use file_repository::FileKeyMaterialRepository;
