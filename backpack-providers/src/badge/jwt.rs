//! Structural decoding of the compact JWS carried by signed badges.
//!
//! Signatures are not checked here; this only establishes that the token is a
//! well-formed `header.payload.signature` triple and exposes the embedded assertion.

use ct_codecs::{Base64UrlSafeNoPadding, Decoder};
use serde::Deserialize;
use serde_json::Value;

use super::error::JwtError;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct JwtHeader {
    #[serde(rename = "alg")]
    pub algorithm: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DecomposedJwt {
    pub header: JwtHeader,
    pub payload: Value,
    pub signature: Vec<u8>,
}

pub fn decompose(token: &str) -> Result<DecomposedJwt, JwtError> {
    let mut parts = token.split('.');

    let (Some(header), Some(payload), Some(signature), None) =
        (parts.next(), parts.next(), parts.next(), parts.next())
    else {
        return Err(JwtError::MissingPart);
    };

    if header.is_empty() || payload.is_empty() || signature.is_empty() {
        return Err(JwtError::MissingPart);
    }

    let header: JwtHeader = serde_json::from_slice(&decode(header)?)
        .map_err(|e| JwtError::JsonMapping(e.to_string()))?;
    let payload: Value = serde_json::from_slice(&decode(payload)?)
        .map_err(|e| JwtError::JsonMapping(e.to_string()))?;

    Ok(DecomposedJwt {
        header,
        payload,
        signature: decode(signature)?,
    })
}

/// Assertion embedded in a signed badge, without signature verification.
pub fn decode_payload(token: &str) -> Result<Value, JwtError> {
    decompose(token).map(|jwt| jwt.payload)
}

pub fn is_compact_jws(token: &str) -> bool {
    decompose(token).is_ok()
}

fn decode(part: &str) -> Result<Vec<u8>, JwtError> {
    Base64UrlSafeNoPadding::decode_to_vec(part, None).map_err(|e| JwtError::Decoding(e.to_string()))
}
