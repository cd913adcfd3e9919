//! Account registration and credential management.

mod service;


pub use service::AccountService;
