//! Refresh token ledger interface and in-memory implementation.

mod memory;
mod r#trait;


pub use memory::InMemoryRefreshTokenRepository;
pub use r#trait::RefreshTokenRepository;
