//! Business services orchestrating the domain.

pub mod account;
pub mod auth;
pub mod email;
pub mod token;

pub use account::AccountService;
pub use auth::{AccessPolicy, AuthGuard, CredentialPair, IdentityResolver, Resolution};
pub use email::{EmailSender, RecordingEmailSender};
pub use token::{KeyStore, TokenConfig, TokenService};
