//! Signing and verification of self-contained tokens.
//!
//! Pure computation over key material supplied by the caller; the codec
//! never touches storage and never consults the ledger. Asymmetric signing
//! means any holder of the public key can verify, while only the issuing
//! path needs the private key.

use chrono::{DateTime, Utc};
use jsonwebtoken::{
    decode, encode, errors::ErrorKind, Algorithm, DecodingKey, EncodingKey, Header, Validation,
};
use uuid::Uuid;

use crate::domain::entities::token::{Claims, TokenClass};
use crate::errors::{DomainError, TokenError};

fn validation() -> Validation {
    let mut validation = Validation::new(Algorithm::ES256);
    // Expiry comparison is exact; the default 60s leeway would keep tokens
    // alive past their stated expiry.
    validation.leeway = 0;
    validation
}

/// Signs a token carrying the subject, class, and expiry.
pub fn encode_token(
    user_id: Uuid,
    token_class: TokenClass,
    expires_at: DateTime<Utc>,
    key: &EncodingKey,
) -> Result<String, DomainError> {
    let claims = Claims::new(user_id, token_class, expires_at);
    let header = Header::new(Algorithm::ES256);
    encode(&header, &claims, key)
        .map_err(|e| DomainError::internal(format!("failed to sign {} token: {}", token_class, e)))
}

/// Verifies a token against a single public key.
///
/// Fails with `TokenExpired` when the signature is good but the expiry has
/// passed, and `TokenInvalid` for any signature or format mismatch.
pub fn decode_token(token: &str, key: &DecodingKey) -> Result<Claims, DomainError> {
    let token_data = decode::<Claims>(token, key, &validation()).map_err(|e| match e.kind() {
        ErrorKind::ExpiredSignature => TokenError::TokenExpired,
        _ => TokenError::TokenInvalid,
    })?;
    Ok(token_data.claims)
}

/// Verifies a token against an ordered list of candidate public keys.
///
/// Candidates are tried in priority order and the first successful
/// verification wins. This is what keeps tokens signed with a just-rotated
/// key verifiable until the previous slot is itself rotated away. A token
/// whose signature verifies but has expired fails immediately with
/// `TokenExpired`; `TokenInvalid` is returned only after every candidate
/// has rejected the signature.
pub fn decode_with_candidates(
    token: &str,
    keys: &[DecodingKey],
) -> Result<Claims, DomainError> {
    for key in keys {
        match decode_token(token, key) {
            Ok(claims) => return Ok(claims),
            Err(DomainError::Token(TokenError::TokenExpired)) => {
                return Err(TokenError::TokenExpired.into())
            }
            Err(_) => continue,
        }
    }
    Err(TokenError::TokenInvalid.into())
}
