//! Predicates for the primitive field types found in badge assertions.
//!
//! Every predicate only answers whether a value has the expected shape. Composing
//! messages for the caller is left to the [assertion validator](crate::assertion), so
//! that all reported errors read the same way.

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;
use strum::{Display, EnumString};
use time::{macros::format_description, Date};
use url::Url;


/// Longest run of digits accepted as an epoch timestamp.
pub const MAX_EPOCH_DIGITS: usize = 10;

const MAX_EPOCH_SECONDS: u64 = 9_999_999_999;

static EMAIL_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(concat!(
        r"^[\p{L}\p{N}!#$%&'*+/=?^_`{|}~-]+(?:\.[\p{L}\p{N}!#$%&'*+/=?^_`{|}~-]+)*",
        r"@(?:[\p{L}\p{N}](?:[\p{L}\p{N}-]*[\p{L}\p{N}])?\.)+",
        r"(?:\p{L}{2,}|xn--[a-z0-9-]+)$",
    ))
    .expect("should compile")
});

static VERSION_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^v\d{1,2}(?:\.\d{1,2})?$").expect("should compile"));

static CALENDAR_DATE_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d{4}-\d{2}-\d{2}$").expect("should compile"));

/// Digest algorithms accepted in `<algorithm>$<hex>` values.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Display, EnumString)]
#[strum(serialize_all = "lowercase")]
pub enum HashAlgorithm {
    Md5,
    Sha1,
    Sha256,
    Sha512,
}

impl HashAlgorithm {
    /// Length of the hex encoded digest.
    pub fn hex_len(&self) -> usize {
        match self {
            HashAlgorithm::Md5 => 32,
            HashAlgorithm::Sha1 => 40,
            HashAlgorithm::Sha256 => 64,
            HashAlgorithm::Sha512 => 128,
        }
    }
}

/// Accepts `local@domain.tld` addresses (Unicode letters, the RFC 5322 local-part
/// symbols and punycode TLDs allowed) and hashed identities in the
/// `<algorithm>$<hexdigest>` form.
pub fn is_email_like(value: &str) -> bool {
    EMAIL_REGEX.is_match(value) || is_hash_digest(value)
}

/// Accepts absolute `http`/`https` URLs and `/`-rooted paths.
pub fn is_url_or_path(value: &str) -> bool {
    if value.starts_with('/') {
        is_root_path(value)
    } else {
        is_http_url(value)
    }
}

/// Accepts absolute `http`/`https` URLs with a host.
pub fn is_http_url(value: &str) -> bool {
    if contains_blank(value) {
        return false;
    }

    Url::parse(value).is_ok_and(|url| {
        matches!(url.scheme(), "http" | "https") && url.host_str().is_some_and(|h| !h.is_empty())
    })
}

fn is_root_path(value: &str) -> bool {
    !value.starts_with("//") && !contains_blank(value)
}

fn contains_blank(value: &str) -> bool {
    value.chars().any(|c| c.is_whitespace() || c.is_control())
}

/// Accepts epoch seconds (a JSON number or a string of digits) of plausible magnitude,
/// or a calendar date written as `YYYY-MM-DD`.
pub fn is_date(value: &Value) -> bool {
    match value {
        Value::Number(number) => match number.as_u64() {
            Some(seconds) => seconds <= MAX_EPOCH_SECONDS,
            None => number
                .as_f64()
                .is_some_and(|f| f.is_finite() && f >= 0.0 && f <= MAX_EPOCH_SECONDS as f64),
        },
        Value::String(text) => is_epoch_string(text) || is_calendar_date(text),
        _ => false,
    }
}

fn is_epoch_string(value: &str) -> bool {
    !value.is_empty()
        && value.len() <= MAX_EPOCH_DIGITS
        && value.bytes().all(|b| b.is_ascii_digit())
}

fn is_calendar_date(value: &str) -> bool {
    CALENDAR_DATE_REGEX.is_match(value)
        && Date::parse(value, format_description!("[year]-[month]-[day]")).is_ok()
}

/// Accepts `v<major>` and `v<major>.<minor>` with one or two digits per part.
pub fn is_version(value: &str) -> bool {
    VERSION_REGEX.is_match(value)
}

/// Accepts `<algorithm>$<hex>` where the hex length matches the algorithm's digest.
pub fn is_hash_digest(value: &str) -> bool {
    let Some((algorithm, digest)) = value.split_once('$') else {
        return false;
    };

    let Ok(algorithm) = algorithm.parse::<HashAlgorithm>() else {
        return false;
    };

    digest.len() == algorithm.hex_len()
        && digest
            .bytes()
            .all(|b| b.is_ascii_digit() || (b'a'..=b'f').contains(&b))
}
