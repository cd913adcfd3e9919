//! Request and response bodies.

pub mod auth;

pub use auth::{
    AccessTokenResponse, ChangePasswordRequest, LoginRequest, MessageResponse, RegisterRequest,
    SessionResponse, TokensResponse,
};
