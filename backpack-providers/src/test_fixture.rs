//! Document and record builders shared by tests.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};

use backpack_crypto::{imp::hasher::sha256::SHA256, Hasher};
use ct_codecs::{Base64UrlSafeNoPadding, Encoder};
use serde_json::{json, Map, Value};

use crate::badge::BadgeData;
use crate::common_models::badge::BadgeType;

static COUNTER: AtomicU64 = AtomicU64::new(0);

/// Lowercase hex digest that differs on every call.
pub fn unique_sha256_hex() -> String {
    let seed = COUNTER.fetch_add(1, Ordering::Relaxed);
    SHA256 {}
        .hash_hex(&seed.to_be_bytes())
        .unwrap_or_else(|_| "0".repeat(64))
}

/// A fully valid assertion document.
pub fn valid_assertion() -> Value {
    json!({
        "recipient": "brian@awesome.com",
        "salt": "coolsalt",
        "evidence": "/bad/evidence",
        "expires": "2040-08-13",
        "issued_on": "2011-06-01",
        "badge": {
            "version": "v0.5",
            "name": "Open Source Contributor",
            "description": "For rocking in the free world",
            "image": "/img/gold-star.png",
            "criteria": "http://example.com/criteria.html",
            "issuer": {
                "origin": "http://p2pu.org",
                "name": "p2pu",
                "contact": "admin@p2pu.org"
            }
        }
    })
}

/// A valid assertion with `changes` applied.
///
/// Keys may be dotted paths (`badge.version`); a `null` value removes the field.
pub fn assertion(changes: HashMap<&str, Value>) -> Value {
    let mut document = valid_assertion();
    for (path, value) in changes {
        if let Value::Object(root) = &mut document {
            apply(root, path, value);
        }
    }
    document
}

fn apply(object: &mut Map<String, Value>, path: &str, value: Value) {
    match path.split_once('.') {
        Some((head, rest)) => {
            if let Some(Value::Object(inner)) = object.get_mut(head) {
                apply(inner, rest, value);
            }
        }
        None if value.is_null() => {
            object.remove(path);
        }
        None => {
            object.insert(path.to_owned(), value);
        }
    }
}

/// Raw data of a valid hosted badge.
pub fn hosted_badge_data() -> BadgeData {
    BadgeData {
        badge_type: Some(BadgeType::Hosted.to_string()),
        endpoint: Some("http://example.com/awesomebadge.json".to_owned()),
        image_path: Some("/dev/null".to_owned()),
        body: Some(valid_assertion()),
        body_hash: Some(format!("sha256${}", unique_sha256_hex())),
        jwt: None,
    }
}

/// Compact JWS carrying `payload`, with a placeholder signature.
pub fn signed_token(payload: &Value) -> String {
    let header = json!({ "alg": "RS256", "typ": "JWT" });

    format!(
        "{}.{}.{}",
        encode(header.to_string().as_bytes()),
        encode(payload.to_string().as_bytes()),
        encode(unique_sha256_hex().as_bytes()),
    )
}

fn encode(input: &[u8]) -> String {
    Base64UrlSafeNoPadding::encode_to_string(input).unwrap_or_default()
}

/// Raw data of a valid signed badge.
pub fn signed_badge_data() -> BadgeData {
    BadgeData {
        badge_type: Some(BadgeType::Signed.to_string()),
        endpoint: None,
        image_path: Some("/dev/null".to_owned()),
        body: None,
        body_hash: None,
        jwt: Some(signed_token(&valid_assertion())),
    }
}
