// src/application/ports/webhook.rs
use crate::application::ApplicationResult;
use crate::domain::{article::Article, module::Module};
use async_trait::async_trait;
use serde::Serialize;

/// Snapshot of an article handed to the external writing service. Built at
/// the HTTP boundary right after the status change commits; delivery is
/// best-effort and never affects the committed state.
#[derive(Debug, Clone, Serialize)]
pub struct WritingRequest {
    pub article_id: i64,
    pub source_url: String,
    pub original_title: String,
    pub original_description: String,
    pub modules: Vec<WritingRequestModule>,
}

#[derive(Debug, Clone, Serialize)]
pub struct WritingRequestModule {
    pub id: i64,
    pub name: String,
    pub slug: String,
}

impl WritingRequest {
    pub fn from_parts(article: &Article, modules: &[Module]) -> Self {
        Self {
            article_id: article.id.into(),
            source_url: article.source_url.as_str().to_owned(),
            original_title: article.original_title.as_str().to_owned(),
            original_description: article.original_description.as_str().to_owned(),
            modules: modules
                .iter()
                .map(|module| WritingRequestModule {
                    id: module.id.into(),
                    name: module.name.as_str().to_owned(),
                    slug: module.slug.as_str().to_owned(),
                })
                .collect(),
        }
    }
}

#[async_trait]
pub trait WritingGateway: Send + Sync {
    async fn send_for_writing(&self, request: &WritingRequest) -> ApplicationResult<()>;
}
