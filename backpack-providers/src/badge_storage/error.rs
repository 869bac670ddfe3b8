use thiserror::Error;

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum BadgeStorageError {
    #[error("Constraint violation: `{0}`")]
    ConstraintViolation(String),
    #[error("Connection error: `{0}`")]
    Connection(String),
    #[error("Get: `{0}`")]
    Get(String),
}
