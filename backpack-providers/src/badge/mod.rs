//! Badge records: one credential with its delivery type, assertion body and identity.
//!
//! A [`Badge`] wraps raw, possibly incomplete [`BadgeData`]. Saving resolves the data
//! once into a [`ValidatedBadge`] whose payload depends on the declared type, then hands
//! the resulting row to a [`BadgeStorage`] which assigns the identity.

use itertools::Itertools;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use time::OffsetDateTime;

use self::error::{BadgeError, SaveError};
use crate::assertion::{check_assertion, Field, Presence, ValidationContext, ValidationError};
use crate::badge_storage::{BadgeRow, BadgeStorage};
use crate::common_models::badge::{BadgeId, BadgeType};
use crate::field_validator::{is_hash_digest, is_http_url};

pub mod error;
pub mod hash;
pub mod jwt;

#[cfg(test)]
mod test;

pub const TYPE: &str = "type";
pub const ENDPOINT: &str = "endpoint";
pub const IMAGE_PATH: &str = "image_path";
pub const BODY: &str = "body";
pub const BODY_HASH: &str = "body_hash";
pub const JWT: &str = "jwt";

/// Raw badge fields as received from the caller.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct BadgeData {
    #[serde(rename = "type", default)]
    pub badge_type: Option<String>,
    #[serde(default)]
    pub endpoint: Option<String>,
    #[serde(default)]
    pub image_path: Option<String>,
    #[serde(default)]
    pub body: Option<Value>,
    #[serde(default)]
    pub body_hash: Option<String>,
    #[serde(default)]
    pub jwt: Option<String>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ValidatedBadge {
    pub image_path: String,
    pub kind: ValidatedBadgeKind,
}

#[derive(Clone, Debug, PartialEq)]
pub enum ValidatedBadgeKind {
    Hosted {
        endpoint: String,
        body: Value,
        body_hash: String,
    },
    Signed {
        jwt: String,
        endpoint: Option<String>,
        body: Option<Value>,
        body_hash: Option<String>,
    },
}

impl ValidatedBadge {
    pub fn badge_type(&self) -> BadgeType {
        match self.kind {
            ValidatedBadgeKind::Hosted { .. } => BadgeType::Hosted,
            ValidatedBadgeKind::Signed { .. } => BadgeType::Signed,
        }
    }

    pub fn into_row(self, created_date: OffsetDateTime) -> Result<BadgeRow, BadgeError> {
        let badge_type = self.badge_type();
        let (endpoint, jwt, body, body_hash) = match self.kind {
            ValidatedBadgeKind::Hosted {
                endpoint,
                body,
                body_hash,
            } => (Some(endpoint), None, Some(body), Some(body_hash)),
            ValidatedBadgeKind::Signed {
                jwt,
                endpoint,
                body,
                body_hash,
            } => (endpoint, Some(jwt), body, body_hash),
        };

        let body = body
            .map(|body| serde_json::to_string(&body))
            .transpose()
            .map_err(|e| BadgeError::Serialization(e.to_string()))?;

        Ok(BadgeRow {
            badge_type,
            endpoint,
            image_path: self.image_path,
            jwt,
            body,
            body_hash,
            created_date,
        })
    }
}

impl BadgeData {
    /// Applies the required-field policy of the declared type, reporting every
    /// offending field at once.
    pub fn validate(&self) -> Result<ValidatedBadge, ValidationError> {
        let mut context = ValidationContext::new();

        match (self.check(&mut context), context.has_errors()) {
            (Some(badge), false) => Ok(badge),
            _ => Err(context.into_error()),
        }
    }

    fn check(&self, context: &mut ValidationContext) -> Option<ValidatedBadge> {
        let raw_type = context.check_str(
            TYPE,
            self.badge_type.as_deref().into(),
            Presence::Required,
            |_| true,
        )?;

        // the required-field set of an unknown type is undefined, nothing else is checked
        let Ok(badge_type) = raw_type.parse::<BadgeType>() else {
            context.invalid_because(TYPE, format!("unknown type `{raw_type}`"));
            return None;
        };

        match badge_type {
            BadgeType::Hosted => self.check_hosted(context),
            BadgeType::Signed => self.check_signed(context),
        }
    }

    fn check_hosted(&self, context: &mut ValidationContext) -> Option<ValidatedBadge> {
        if self.endpoint.is_none() {
            context.invalid_because(TYPE, "hosted badges require an endpoint");
        }

        let endpoint = context.check_str(
            ENDPOINT,
            self.endpoint.as_deref().into(),
            Presence::Required,
            is_http_url,
        );
        let image_path = self.check_image_path(context);
        let body = check_document(
            context,
            BODY,
            Field::from_json(self.body.as_ref()),
            Presence::Required,
        );
        let body_hash = context.check_str(
            BODY_HASH,
            self.body_hash.as_deref().into(),
            Presence::Required,
            is_hash_digest,
        );

        Some(ValidatedBadge {
            image_path: image_path?.to_owned(),
            kind: ValidatedBadgeKind::Hosted {
                endpoint: endpoint?.to_owned(),
                body: body?.to_owned(),
                body_hash: body_hash?.to_owned(),
            },
        })
    }

    fn check_signed(&self, context: &mut ValidationContext) -> Option<ValidatedBadge> {
        if self.jwt.is_none() {
            context.invalid_because(TYPE, "signed badges require a jwt");
        }

        let endpoint = context.check_str(
            ENDPOINT,
            self.endpoint.as_deref().into(),
            Presence::Optional,
            is_http_url,
        );
        let image_path = self.check_image_path(context);
        let jwt = context.check_str(
            JWT,
            self.jwt.as_deref().into(),
            Presence::Required,
            jwt::is_compact_jws,
        );
        let body = check_document(
            context,
            BODY,
            Field::from_json(self.body.as_ref()),
            Presence::Optional,
        );
        let body_hash = context.check_str(
            BODY_HASH,
            self.body_hash.as_deref().into(),
            Presence::Optional,
            is_hash_digest,
        );

        Some(ValidatedBadge {
            image_path: image_path?.to_owned(),
            kind: ValidatedBadgeKind::Signed {
                jwt: jwt?.to_owned(),
                endpoint: endpoint.map(str::to_owned),
                body: body.cloned(),
                body_hash: body_hash.map(str::to_owned),
            },
        })
    }

    fn check_image_path<'a>(&'a self, context: &mut ValidationContext) -> Option<&'a str> {
        context.check_str(
            IMAGE_PATH,
            self.image_path.as_deref().into(),
            Presence::Required,
            |path| !path.trim().is_empty(),
        )
    }
}

/// A scalar is reported on `field` alone; nested assertion failures collapse into a
/// single `field` entry listing the offending keys.
fn check_document<'a>(
    context: &mut ValidationContext,
    field: &str,
    value: Field<&'a Value>,
    presence: Presence,
) -> Option<&'a Value> {
    let document = context.check_value(field, value, presence, Value::is_object)?;

    let mut nested = ValidationContext::new();
    check_assertion(document, &mut nested);
    if nested.has_errors() {
        context.invalid_because(field, nested.field_names().join(", "));
        return None;
    }

    Some(document)
}

/// One credential. `id` is set exactly once, by the first successful [`Badge::save`].
#[derive(Clone, Debug, PartialEq)]
pub struct Badge {
    id: Option<BadgeId>,
    data: BadgeData,
}

impl Badge {
    pub fn new(data: BadgeData) -> Self {
        Self { id: None, data }
    }

    pub fn hosted(endpoint: String, image_path: String, body: Value, body_hash: String) -> Self {
        Self::new(BadgeData {
            badge_type: Some(BadgeType::Hosted.to_string()),
            endpoint: Some(endpoint),
            image_path: Some(image_path),
            body: Some(body),
            body_hash: Some(body_hash),
            jwt: None,
        })
    }

    pub fn signed(image_path: String, jwt: String) -> Self {
        Self::new(BadgeData {
            badge_type: Some(BadgeType::Signed.to_string()),
            endpoint: None,
            image_path: Some(image_path),
            body: None,
            body_hash: None,
            jwt: Some(jwt),
        })
    }

    pub fn id(&self) -> Option<BadgeId> {
        self.id
    }

    pub fn data(&self) -> &BadgeData {
        &self.data
    }

    /// Fields may only change before the badge is saved.
    pub fn data_mut(&mut self) -> Result<&mut BadgeData, BadgeError> {
        match self.id {
            Some(id) => Err(BadgeError::AlreadySaved(id)),
            None => Ok(&mut self.data),
        }
    }

    pub fn validate(&self) -> Result<ValidatedBadge, ValidationError> {
        self.data.validate()
    }

    /// Validates and persists the badge, then records the store-generated identity.
    ///
    /// Validation failures leave both the store and the badge untouched. Store errors
    /// are passed through unchanged.
    pub async fn save(&mut self, storage: &dyn BadgeStorage) -> Result<BadgeId, SaveError> {
        if let Some(id) = self.id {
            return Err(SaveError::AlreadySaved(id));
        }

        let validated = self.data.validate().inspect_err(|error| {
            tracing::debug!(%error, "badge rejected by validation");
        })?;
        let badge_type = validated.badge_type();

        let row = validated
            .into_row(OffsetDateTime::now_utc())
            .map_err(|e| SaveError::Serialization(e.to_string()))?;

        let id = storage.insert(row).await.inspect_err(|error| {
            tracing::warn!(%error, %badge_type, "badge storage rejected insert");
        })?;

        tracing::debug!(%id, %badge_type, "badge saved");
        self.id = Some(id);

        Ok(id)
    }
}
