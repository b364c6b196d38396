// src/domain/article/status.rs
use crate::domain::errors::DomainError;
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

/// Lifecycle stage of an article, from external proposal to publication.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ArticleStatus {
    Proposed,
    Writing,
    Written,
    Validated,
    Published,
}

impl ArticleStatus {
    pub const ALL: [ArticleStatus; 5] = [
        ArticleStatus::Proposed,
        ArticleStatus::Writing,
        ArticleStatus::Written,
        ArticleStatus::Validated,
        ArticleStatus::Published,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ArticleStatus::Proposed => "proposed",
            ArticleStatus::Writing => "writing",
            ArticleStatus::Written => "written",
            ArticleStatus::Validated => "validated",
            ArticleStatus::Published => "published",
        }
    }

    /// The status transition table. Every legal edge of the lifecycle graph
    /// is listed here and nowhere else; callers must not hardcode edges.
    ///
    /// Self-transitions are not listed and are therefore illegal.
    pub fn can_transition_to(self, requested: ArticleStatus) -> bool {
        use ArticleStatus::*;
        let allowed: &[ArticleStatus] = match self {
            Proposed => &[Writing],
            Writing => &[Written, Proposed],
            Written => &[Validated, Writing],
            Validated => &[Published, Writing],
            Published => &[Writing],
        };
        allowed.contains(&requested)
    }
}

impl fmt::Display for ArticleStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ArticleStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "proposed" => Ok(ArticleStatus::Proposed),
            "writing" => Ok(ArticleStatus::Writing),
            "written" => Ok(ArticleStatus::Written),
            "validated" => Ok(ArticleStatus::Validated),
            "published" => Ok(ArticleStatus::Published),
            other => Err(DomainError::Validation(format!(
                "unknown article status '{other}'"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn writing_is_reachable_from_every_status() {
        for status in ArticleStatus::ALL {
            assert!(
                status.can_transition_to(ArticleStatus::Writing),
                "{status} -> writing should be legal"
            );
        }
    }

    #[test]
    fn forward_edges_are_legal() {
        assert!(ArticleStatus::Proposed.can_transition_to(ArticleStatus::Writing));
        assert!(ArticleStatus::Writing.can_transition_to(ArticleStatus::Written));
        assert!(ArticleStatus::Written.can_transition_to(ArticleStatus::Validated));
        assert!(ArticleStatus::Validated.can_transition_to(ArticleStatus::Published));
    }

    #[test]
    fn retry_edges_are_legal() {
        assert!(ArticleStatus::Writing.can_transition_to(ArticleStatus::Proposed));
        assert!(ArticleStatus::Written.can_transition_to(ArticleStatus::Writing));
        assert!(ArticleStatus::Validated.can_transition_to(ArticleStatus::Writing));
        assert!(ArticleStatus::Published.can_transition_to(ArticleStatus::Writing));
    }

    #[test]
    fn self_transitions_are_illegal() {
        for status in ArticleStatus::ALL {
            assert!(
                !status.can_transition_to(status),
                "{status} -> {status} should be illegal"
            );
        }
    }

    #[test]
    fn published_is_only_reachable_from_validated() {
        for status in ArticleStatus::ALL {
            let expected = status == ArticleStatus::Validated;
            assert_eq!(
                status.can_transition_to(ArticleStatus::Published),
                expected,
                "{status} -> published"
            );
        }
    }

    #[test]
    fn round_trips_through_str() {
        for status in ArticleStatus::ALL {
            assert_eq!(status.as_str().parse::<ArticleStatus>().unwrap(), status);
        }
        assert!("draft".parse::<ArticleStatus>().is_err());
    }
}
