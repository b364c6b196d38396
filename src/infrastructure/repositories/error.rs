// src/infrastructure/repositories/error.rs
use crate::domain::errors::DomainError;

const CNT_VERSION_NUMBER: &str = "article_versions_article_id_version_number_key";
const CNT_MODULE_SLUG: &str = "modules_slug_key";
const CNT_USER_EMAIL: &str = "users_email_key";
const CNT_ARTICLE_MODULE_MODULE: &str = "article_modules_module_id_fkey";
const CNT_ARTICLE_MODULE_ARTICLE: &str = "article_modules_article_id_fkey";
const CNT_VERSION_ARTICLE: &str = "article_versions_article_id_fkey";

pub fn map_sqlx(err: sqlx::Error) -> DomainError {
    match &err {
        sqlx::Error::Database(db_err) => {
            if let Some(constraint) = db_err.constraint() {
                return match constraint {
                    CNT_VERSION_NUMBER => DomainError::DuplicateVersionNumber,
                    CNT_MODULE_SLUG => DomainError::Conflict("slug already exists".into()),
                    CNT_USER_EMAIL => DomainError::Conflict("email already registered".into()),
                    CNT_ARTICLE_MODULE_MODULE => DomainError::NotFound("module not found".into()),
                    CNT_ARTICLE_MODULE_ARTICLE | CNT_VERSION_ARTICLE => {
                        DomainError::NotFound("article not found".into())
                    }
                    other => {
                        DomainError::Persistence(format!("database constraint violation: {other}"))
                    }
                };
            }

            if let Some(code) = db_err.code() {
                match code.as_ref() {
                    "23505" => {
                        return DomainError::Conflict("unique constraint violated".into());
                    }
                    "23503" => {
                        return DomainError::NotFound("referenced record not found".into());
                    }
                    "23514" => {
                        return DomainError::Validation("check constraint violated".into());
                    }
                    _ => {}
                }
            }

            DomainError::Persistence(db_err.message().to_string())
        }
        _ => DomainError::Persistence(err.to_string()),
    }
}
