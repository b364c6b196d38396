// src/infrastructure/repositories/mod.rs
mod error;
mod postgres_article;
mod postgres_module;
mod postgres_user;
mod postgres_version;

pub use postgres_article::{PostgresArticleReadRepository, PostgresArticleWriteRepository};
pub use postgres_module::PostgresModuleRepository;
pub use postgres_user::PostgresUserRepository;
pub use postgres_version::PostgresArticleVersionRepository;
