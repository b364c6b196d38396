// src/domain/errors.rs
use crate::domain::article::ArticleStatus;
use thiserror::Error;

pub type DomainResult<T> = Result<T, DomainError>;

#[derive(Debug, Error)]
pub enum DomainError {
    #[error("validation error: {0}")]
    Validation(String),
    #[error("conflict: {0}")]
    Conflict(String),
    #[error("not found: {0}")]
    NotFound(String),
    #[error("persistence error: {0}")]
    Persistence(String),

    #[error("illegal status transition from '{from}' to '{to}'")]
    IllegalTransition {
        from: ArticleStatus,
        to: ArticleStatus,
    },
    #[error("article has no versions yet")]
    NoVersionsYet,
    #[error("article is not validated")]
    NotValidated,
    #[error("version number already taken for this article")]
    DuplicateVersionNumber,
}
