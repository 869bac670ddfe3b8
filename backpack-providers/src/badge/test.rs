use std::collections::HashMap;
use std::sync::Arc;

use backpack_crypto::{imp::hasher::sha256::SHA256, imp::CryptoProviderImpl, CryptoProvider};
use serde_json::{json, Value};

use super::{
    error::{BadgeError, JwtError, SaveError},
    hash::{compute_body_hash, verify_body_hash},
    jwt, Badge, BadgeData, ValidatedBadgeKind,
};
use crate::badge_storage::{
    error::BadgeStorageError, in_memory::InMemoryBadgeStorage, BadgeStorage, MockBadgeStorage,
};
use crate::common_models::badge::{BadgeId, BadgeType};
use crate::field_validator::{is_hash_digest, HashAlgorithm};
use crate::test_fixture::{hosted_badge_data, signed_badge_data, signed_token, valid_assertion};

fn crypto() -> CryptoProviderImpl {
    CryptoProviderImpl::new(HashMap::from_iter(vec![(
        "sha256".to_string(),
        Arc::new(SHA256 {}) as _,
    )]))
}

fn badge_with(changes: impl FnOnce(&mut BadgeData)) -> Badge {
    let mut data = hosted_badge_data();
    changes(&mut data);
    Badge::new(data)
}

async fn save_errors(mut badge: Badge) -> Vec<String> {
    let storage = MockBadgeStorage::default();

    match badge.save(&storage).await {
        Err(SaveError::Validation(error)) => {
            for (field, message) in error.fields() {
                assert!(message.contains(field.as_str()), "`{message}` should name `{field}`");
                assert!(message.contains("missing") || message.contains("invalid"));
            }
            assert_eq!(badge.id(), None);
            error.field_names().into_iter().map(str::to_owned).collect()
        }
        other => panic!("expected validation error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_save_valid_hosted_badge_assigns_id() {
    let storage = InMemoryBadgeStorage::new();
    let mut badge = Badge::new(hosted_badge_data());

    let id = badge.save(&storage).await.unwrap();

    assert!(id.as_u64() > 0);
    assert_eq!(badge.id(), Some(id));
    let stored = storage.get(id).await.unwrap().unwrap();
    assert_eq!(stored.row.badge_type, BadgeType::Hosted);
    assert_eq!(stored.row.body_hash, badge.data().body_hash);
}

#[tokio::test]
async fn test_save_valid_signed_badge() {
    let storage = InMemoryBadgeStorage::new();
    let mut badge = Badge::new(signed_badge_data());

    let id = badge.save(&storage).await.unwrap();

    let stored = storage.get(id).await.unwrap().unwrap();
    assert_eq!(stored.row.badge_type, BadgeType::Signed);
    assert_eq!(stored.row.jwt, badge.data().jwt);
    assert_eq!(stored.row.body, None);
}

#[tokio::test]
async fn test_hosted_without_endpoint() {
    let errors = save_errors(badge_with(|data| data.endpoint = None)).await;

    assert_eq!(errors, vec!["type", "endpoint"]);
}

#[tokio::test]
async fn test_signed_without_jwt() {
    let errors = save_errors(badge_with(|data| {
        data.badge_type = Some("signed".to_owned());
        data.jwt = None;
    }))
    .await;

    assert_eq!(errors, vec!["type", "jwt"]);
}

#[tokio::test]
async fn test_unknown_type() {
    let errors = save_errors(badge_with(|data| {
        data.badge_type = Some("glurble".to_owned());
        data.endpoint = None;
    }))
    .await;

    assert_eq!(errors, vec!["type"]);
}

#[tokio::test]
async fn test_missing_type() {
    let errors = save_errors(badge_with(|data| data.badge_type = None)).await;

    assert_eq!(errors, vec!["type"]);
}

#[tokio::test]
async fn test_without_image_path() {
    let errors = save_errors(badge_with(|data| data.image_path = None)).await;

    assert_eq!(errors, vec!["image_path"]);
}

#[tokio::test]
async fn test_without_body() {
    let errors = save_errors(badge_with(|data| data.body = None)).await;

    assert_eq!(errors, vec!["body"]);
}

#[tokio::test]
async fn test_null_body_is_missing() {
    let mut badge = badge_with(|data| data.body = Some(Value::Null));

    let error = badge.validate().unwrap_err();
    assert_eq!(error.field("body"), Some("body is missing"));
    assert!(matches!(
        badge.save(&MockBadgeStorage::default()).await,
        Err(SaveError::Validation(_))
    ));
}

#[tokio::test]
async fn test_with_unexpected_body_type() {
    let errors = save_errors(badge_with(|data| {
        data.body = Some(json!("I just don't understand skrillex"));
    }))
    .await;

    assert_eq!(errors, vec!["body"]);
}

#[tokio::test]
async fn test_with_invalid_assertion_body() {
    let mut body = valid_assertion();
    body["recipient"] = json!("lkajd");
    body["badge"]["version"] = json!("v100");
    let badge = badge_with(|data| data.body = Some(body));

    let error = badge.validate().unwrap_err();

    assert_eq!(error.field_names(), vec!["body"]);
    assert_eq!(
        error.field("body"),
        Some("body is invalid: recipient, badge.version")
    );
}

#[tokio::test]
async fn test_with_malformed_body_hash() {
    let errors = save_errors(badge_with(|data| {
        data.body_hash = Some("sha256$not-a-digest".to_owned());
    }))
    .await;

    assert_eq!(errors, vec!["body_hash"]);
}

#[tokio::test]
async fn test_signed_with_malformed_jwt() {
    let errors = save_errors(Badge::signed("/dev/null".to_owned(), "not.a.token".to_owned())).await;

    assert_eq!(errors, vec!["jwt"]);
}

#[tokio::test]
async fn test_reports_all_fields_at_once() {
    let errors = save_errors(badge_with(|data| {
        data.endpoint = None;
        data.image_path = None;
        data.body = Some(json!(12));
        data.body_hash = None;
    }))
    .await;

    assert_eq!(
        errors,
        vec!["type", "endpoint", "image_path", "body", "body_hash"]
    );
}

#[tokio::test]
async fn test_validation_failure_does_not_touch_storage() {
    let mut storage = MockBadgeStorage::default();
    storage.expect_insert().never();
    let mut badge = badge_with(|data| data.endpoint = None);

    assert!(badge.save(&storage).await.is_err());
}

#[tokio::test]
async fn test_storage_error_is_passed_through() {
    let mut storage = MockBadgeStorage::default();
    storage.expect_insert().times(1).return_once(|_| {
        Err(BadgeStorageError::Connection("connection reset".to_owned()))
    });
    let mut badge = Badge::new(hosted_badge_data());

    let result = badge.save(&storage).await;

    assert!(matches!(
        result,
        Err(SaveError::Persistence(BadgeStorageError::Connection(message))) if message == "connection reset"
    ));
    assert_eq!(badge.id(), None);
}

#[tokio::test]
async fn test_insert_receives_serialized_fields() {
    let mut storage = MockBadgeStorage::default();
    storage
        .expect_insert()
        .withf(|row| {
            row.badge_type == BadgeType::Hosted
                && row.endpoint.as_deref() == Some("http://example.com/awesomebadge.json")
                && row.jwt.is_none()
                && row
                    .body
                    .as_deref()
                    .and_then(|body| serde_json::from_str::<Value>(body).ok())
                    == Some(valid_assertion())
        })
        .times(1)
        .return_once(|_| Ok(BadgeId::from(42)));
    let mut badge = Badge::new(hosted_badge_data());

    assert_eq!(badge.save(&storage).await.unwrap(), BadgeId::from(42));
}

#[tokio::test]
async fn test_second_save_is_rejected() {
    let storage = InMemoryBadgeStorage::new();
    let mut badge = Badge::new(hosted_badge_data());
    let id = badge.save(&storage).await.unwrap();

    let result = badge.save(&storage).await;

    assert!(matches!(result, Err(SaveError::AlreadySaved(saved)) if saved == id));
    assert_eq!(storage.len().await, 1);
}

#[tokio::test]
async fn test_duplicate_body_hash_surfaces_constraint_violation() {
    let storage = InMemoryBadgeStorage::new();
    let data = hosted_badge_data();
    Badge::new(data.clone()).save(&storage).await.unwrap();

    let result = Badge::new(data).save(&storage).await;

    assert!(matches!(
        result,
        Err(SaveError::Persistence(BadgeStorageError::ConstraintViolation(_)))
    ));
}

#[tokio::test]
async fn test_data_is_frozen_after_save() {
    let storage = InMemoryBadgeStorage::new();
    let mut badge = Badge::new(hosted_badge_data());
    assert!(badge.data_mut().is_ok());

    let id = badge.save(&storage).await.unwrap();

    assert_eq!(badge.data_mut().unwrap_err(), BadgeError::AlreadySaved(id));
}

#[test]
fn test_validated_badge_is_tagged_by_type() {
    let hosted = Badge::new(hosted_badge_data()).validate().unwrap();
    let signed = Badge::new(signed_badge_data()).validate().unwrap();

    assert!(matches!(hosted.kind, ValidatedBadgeKind::Hosted { .. }));
    assert!(matches!(signed.kind, ValidatedBadgeKind::Signed { .. }));
    assert_eq!(signed.badge_type(), BadgeType::Signed);
}

#[test]
fn test_badge_data_from_json() {
    let data: BadgeData = serde_json::from_value(json!({
        "type": "hosted",
        "endpoint": "http://example.com/awesomebadge.json",
        "image_path": "/dev/null",
        "body": valid_assertion(),
        "body_hash": format!("sha256${}", "0".repeat(64)),
    }))
    .unwrap();

    assert_eq!(data.badge_type.as_deref(), Some("hosted"));
    assert!(data.jwt.is_none());
    assert!(data.validate().is_ok());
}

#[test]
fn test_decode_signed_payload() {
    let token = signed_token(&valid_assertion());

    let decomposed = jwt::decompose(&token).unwrap();

    assert_eq!(decomposed.header.algorithm, "RS256");
    assert_eq!(jwt::decode_payload(&token).unwrap(), valid_assertion());
}

#[test]
fn test_decompose_rejects_malformed_tokens() {
    assert_eq!(jwt::decompose("a.b").unwrap_err(), JwtError::MissingPart);
    assert_eq!(jwt::decompose("a.b.c.d").unwrap_err(), JwtError::MissingPart);
    assert_eq!(jwt::decompose("..").unwrap_err(), JwtError::MissingPart);
    assert!(matches!(
        jwt::decompose("!!.??.##"),
        Err(JwtError::Decoding(_))
    ));
    assert!(!jwt::is_compact_jws("not.a.token"));
}

#[test]
fn test_compute_and_verify_body_hash() {
    let raw = serde_json::to_vec(&valid_assertion()).unwrap();

    let body_hash = compute_body_hash(&raw, HashAlgorithm::Sha256, &crypto()).unwrap();

    assert!(body_hash.starts_with("sha256$"));
    assert!(is_hash_digest(&body_hash));
    assert!(verify_body_hash(&raw, &body_hash, &crypto()).unwrap());
    assert!(!verify_body_hash(b"tampered", &body_hash, &crypto()).unwrap());
}

#[test]
fn test_verify_rejects_malformed_body_hash() {
    let result = verify_body_hash(b"{}", "sha256$xyz", &crypto());

    assert_eq!(
        result,
        Err(BadgeError::MalformedBodyHash("sha256$xyz".to_owned()))
    );
}

#[test]
fn test_compute_with_unavailable_hasher() {
    let provider = crypto();
    assert!(provider.get_hasher("md5").is_err());

    let result = compute_body_hash(b"{}", HashAlgorithm::Md5, &provider);

    assert!(matches!(result, Err(BadgeError::CryptoProviderError(_))));
}
