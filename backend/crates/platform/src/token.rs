//! Opaque Session Tokens
//!
//! Tokens handed to clients have the form `<session-uuid>.<tag>` where `tag`
//! is the URL-safe base64 HMAC-SHA256 of the UUID text under the server
//! secret. The token is only a signed pointer: whether the session is still
//! active is decided by the session store.

use axum::http::{HeaderMap, header};
use thiserror::Error;
use uuid::Uuid;

use crate::crypto::{from_base64_url, hmac_sha256, hmac_sha256_verify, to_base64_url};

/// Token extraction / verification failures
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TokenError {
    #[error("Missing bearer credential")]
    Missing,

    #[error("Malformed credential")]
    Malformed,

    #[error("Credential signature mismatch")]
    BadSignature,
}

/// Sign a session ID into an opaque token
pub fn sign_session_token(session_id: &Uuid, secret: &[u8]) -> String {
    let id = session_id.to_string();
    let tag = hmac_sha256(secret, id.as_bytes());
    format!("{}.{}", id, to_base64_url(&tag))
}

/// Verify a token and return the session ID it points to
pub fn verify_session_token(token: &str, secret: &[u8]) -> Result<Uuid, TokenError> {
    let (id, tag_b64) = token.split_once('.').ok_or(TokenError::Malformed)?;
    let tag = from_base64_url(tag_b64).map_err(|_| TokenError::Malformed)?;

    if !hmac_sha256_verify(secret, id.as_bytes(), &tag) {
        return Err(TokenError::BadSignature);
    }

    id.parse().map_err(|_| TokenError::Malformed)
}

/// Extract the credential from `Authorization: Bearer <token>`
pub fn extract_bearer(headers: &HeaderMap) -> Result<String, TokenError> {
    let value = headers
        .get(header::AUTHORIZATION)
        .ok_or(TokenError::Missing)?
        .to_str()
        .map_err(|_| TokenError::Malformed)?;

    let (scheme, token) = value.trim().split_once(' ').ok_or(TokenError::Malformed)?;
    if !scheme.eq_ignore_ascii_case("bearer") {
        return Err(TokenError::Malformed);
    }

    let token = token.trim();
    if token.is_empty() {
        return Err(TokenError::Missing);
    }

    Ok(token.to_string())
}
