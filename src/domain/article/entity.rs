// src/domain/article/entity.rs
use crate::domain::article::status::ArticleStatus;
use crate::domain::article::value_objects::{
    ArticleDescription, ArticleId, ArticleTitle, SourceUrl,
};
use chrono::{DateTime, Utc};

#[derive(Debug, Clone)]
pub struct Article {
    pub id: ArticleId,
    pub source_url: SourceUrl,
    pub original_title: ArticleTitle,
    pub original_description: ArticleDescription,
    pub suggested_title: Option<String>,
    pub suggested_description: Option<String>,
    pub score: Option<i32>,
    pub status: ArticleStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Article {
    pub fn set_status(&mut self, status: ArticleStatus, now: DateTime<Utc>) {
        self.status = status;
        self.updated_at = now;
    }

    /// Apply the writing-service suggestions. Fields the service did not
    /// send keep their previous value.
    pub fn apply_suggestions(&mut self, patch: &WrittenContentPatch, now: DateTime<Utc>) {
        if let Some(title) = &patch.suggested_title {
            self.suggested_title = Some(title.clone());
        }
        if let Some(description) = &patch.suggested_description {
            self.suggested_description = Some(description.clone());
        }
        if let Some(score) = patch.score {
            self.score = Some(score);
        }
        self.updated_at = now;
    }
}

/// Suggestions reported by the external writing service alongside a new
/// content version. `None` means "not sent, leave unchanged".
#[derive(Debug, Clone, Default)]
pub struct WrittenContentPatch {
    pub suggested_title: Option<String>,
    pub suggested_description: Option<String>,
    pub score: Option<i32>,
}

#[derive(Debug, Clone)]
pub struct NewArticle {
    pub source_url: SourceUrl,
    pub original_title: ArticleTitle,
    pub original_description: ArticleDescription,
    pub status: ArticleStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl NewArticle {
    /// Articles always enter the pipeline as proposals with no versions.
    pub fn proposed(
        source_url: SourceUrl,
        original_title: ArticleTitle,
        original_description: ArticleDescription,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            source_url,
            original_title,
            original_description,
            status: ArticleStatus::Proposed,
            created_at: now,
            updated_at: now,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ArticleUpdate {
    pub id: ArticleId,
    pub suggested_title: Option<String>,
    pub suggested_description: Option<String>,
    pub score: Option<i32>,
    pub status: Option<ArticleStatus>,
    pub updated_at: DateTime<Utc>,
}

impl ArticleUpdate {
    pub fn new(id: ArticleId, updated_at: DateTime<Utc>) -> Self {
        Self {
            id,
            suggested_title: None,
            suggested_description: None,
            score: None,
            status: None,
            updated_at,
        }
    }

    pub fn with_status(mut self, status: ArticleStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn with_suggestions(mut self, patch: &WrittenContentPatch) -> Self {
        self.suggested_title = patch.suggested_title.clone();
        self.suggested_description = patch.suggested_description.clone();
        self.score = patch.score;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn sample_article() -> Article {
        let now = Utc::now();
        Article {
            id: ArticleId::new(1).unwrap(),
            source_url: SourceUrl::new("https://example.com/post").unwrap(),
            original_title: ArticleTitle::new("original").unwrap(),
            original_description: ArticleDescription::new("a description").unwrap(),
            suggested_title: None,
            suggested_description: None,
            score: Some(40),
            status: ArticleStatus::Proposed,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn set_status_refreshes_updated_at() {
        let mut article = sample_article();
        let later = article.updated_at + chrono::Duration::seconds(10);
        article.set_status(ArticleStatus::Writing, later);
        assert_eq!(article.status, ArticleStatus::Writing);
        assert_eq!(article.updated_at, later);
    }

    #[test]
    fn apply_suggestions_skips_absent_fields() {
        let mut article = sample_article();
        let now = Utc::now();
        let patch = WrittenContentPatch {
            suggested_title: Some("better title".into()),
            suggested_description: None,
            score: None,
        };
        article.apply_suggestions(&patch, now);
        assert_eq!(article.suggested_title.as_deref(), Some("better title"));
        assert!(article.suggested_description.is_none());
        assert_eq!(article.score, Some(40));
    }

    #[test]
    fn apply_suggestions_overwrites_present_fields() {
        let mut article = sample_article();
        let now = Utc::now();
        let patch = WrittenContentPatch {
            suggested_title: None,
            suggested_description: Some("fresh".into()),
            score: Some(90),
        };
        article.apply_suggestions(&patch, now);
        assert!(article.suggested_title.is_none());
        assert_eq!(article.suggested_description.as_deref(), Some("fresh"));
        assert_eq!(article.score, Some(90));
    }
}
