//! Validation of badge assertion documents.
//!
//! An assertion is untrusted JSON describing a recipient earning a badge. Validation
//! never stops at the first problem: every offending field is reported at once through
//! a [`ValidationError`], and malformed shapes (a string where an object is expected)
//! are reported like any other invalid field.

use serde_json::{Map, Value};

use crate::field_validator::{is_date, is_email_like, is_http_url, is_url_or_path, is_version};

pub use context::{Field, Presence, ValidationContext};
pub use error::ValidationError;

pub mod context;
pub mod error;


/// Key reported when the document itself is not an object.
pub const DOCUMENT: &str = "document";

pub const RECIPIENT: &str = "recipient";
pub const SALT: &str = "salt";
pub const BADGE: &str = "badge";
pub const BADGE_VERSION: &str = "badge.version";
pub const BADGE_NAME: &str = "badge.name";
pub const BADGE_DESCRIPTION: &str = "badge.description";
pub const BADGE_IMAGE: &str = "badge.image";
pub const BADGE_CRITERIA: &str = "badge.criteria";
pub const BADGE_ISSUER: &str = "badge.issuer";
pub const BADGE_ISSUER_ORIGIN: &str = "badge.issuer.origin";
pub const BADGE_ISSUER_NAME: &str = "badge.issuer.name";
pub const BADGE_ISSUER_CONTACT: &str = "badge.issuer.contact";
pub const EVIDENCE: &str = "evidence";
pub const EXPIRES: &str = "expires";
pub const ISSUED_ON: &str = "issued_on";

/// Validates an assertion document.
///
/// Returns `Ok(())` for a valid document, otherwise an error listing every offending
/// field. Calling it twice on the same document yields the same result.
pub fn validate_body(document: &Value) -> Result<(), ValidationError> {
    let mut context = ValidationContext::new();
    check_assertion(document, &mut context);
    context.finish()
}

/// Runs the assertion checks against an existing context.
pub fn check_assertion(document: &Value, context: &mut ValidationContext) {
    let Value::Object(assertion) = document else {
        context.invalid(DOCUMENT);
        return;
    };

    context.check_text(
        RECIPIENT,
        Field::lookup(assertion, "recipient"),
        Presence::Required,
        is_email_like,
    );
    context.check_text(SALT, Field::lookup(assertion, "salt"), Presence::Optional, |_| true);

    if let Some(badge) =
        context.check_object(BADGE, Field::lookup(assertion, "badge"), Presence::Required)
    {
        check_badge(badge, context);
    }

    context.check_text(
        EVIDENCE,
        Field::lookup(assertion, "evidence"),
        Presence::Optional,
        is_url_or_path,
    );
    context.check_value(
        EXPIRES,
        Field::lookup(assertion, "expires"),
        Presence::Optional,
        is_date,
    );
    context.check_value(
        ISSUED_ON,
        Field::lookup(assertion, "issued_on"),
        Presence::Optional,
        is_date,
    );
}

fn check_badge(badge: &Map<String, Value>, context: &mut ValidationContext) {
    context.check_text(
        BADGE_VERSION,
        Field::lookup(badge, "version"),
        Presence::Required,
        is_version,
    );
    context.check_text(BADGE_NAME, Field::lookup(badge, "name"), Presence::Optional, |_| true);
    context.check_text(
        BADGE_DESCRIPTION,
        Field::lookup(badge, "description"),
        Presence::Optional,
        |_| true,
    );
    context.check_text(
        BADGE_IMAGE,
        Field::lookup(badge, "image"),
        Presence::Optional,
        is_url_or_path,
    );
    context.check_text(
        BADGE_CRITERIA,
        Field::lookup(badge, "criteria"),
        Presence::Optional,
        is_url_or_path,
    );

    if let Some(issuer) =
        context.check_object(BADGE_ISSUER, Field::lookup(badge, "issuer"), Presence::Optional)
    {
        context.check_text(
            BADGE_ISSUER_ORIGIN,
            Field::lookup(issuer, "origin"),
            Presence::Optional,
            is_http_url,
        );
        context.check_text(
            BADGE_ISSUER_NAME,
            Field::lookup(issuer, "name"),
            Presence::Optional,
            |_| true,
        );
        context.check_text(
            BADGE_ISSUER_CONTACT,
            Field::lookup(issuer, "contact"),
            Presence::Optional,
            is_email_like,
        );
    }
}
