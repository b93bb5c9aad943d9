//! Repository traits describing the content-store seam.

use async_trait::async_trait;
use thiserror::Error;
use time::OffsetDateTime;
use url::Url;

pub type PostId = i64;

#[derive(Debug, Error)]
pub enum RepoError {
    #[error("persistence error: {0}")]
    Persistence(String),
    #[error("invalid input: {message}")]
    InvalidInput { message: String },
    #[error("integrity error: {message}")]
    Integrity { message: String },
    #[error("database timeout")]
    Timeout,
}

impl RepoError {
    pub fn from_persistence(err: impl std::fmt::Display) -> Self {
        Self::Persistence(err.to_string())
    }

    pub fn integrity(message: impl Into<String>) -> Self {
        Self::Integrity {
            message: message.into(),
        }
    }

    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput {
            message: message.into(),
        }
    }
}

/// How a candidate search term is interpreted: an integer selects by ID,
/// anything else matches title substrings, an empty term matches all.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum CandidateTerm {
    #[default]
    Any,
    Id(PostId),
    Title(String),
}

impl CandidateTerm {
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Self::Any;
        }
        match trimmed.parse::<PostId>() {
            Ok(id) => Self::Id(id),
            Err(_) => Self::Title(trimmed.to_string()),
        }
    }
}

/// Filter shared by the candidate page fetch and its parallel count query.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CandidateFilter {
    pub term: CandidateTerm,
    pub exclude: Vec<PostId>,
}

/// Offset pagination request; `page` is 1-based to match the editor pager.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: u32,
    pub per_page: u32,
}

impl PageRequest {
    pub fn new(page: u32, per_page: u32) -> Self {
        Self { page, per_page }
    }

    pub fn offset(&self) -> u64 {
        u64::from(self.page.max(1) - 1) * u64::from(self.per_page)
    }

    /// Repos reject a zero page size up front instead of issuing a
    /// `LIMIT 0` query that silently returns nothing.
    pub fn validate(&self) -> Result<(), RepoError> {
        if self.per_page == 0 {
            return Err(RepoError::invalid_input("page size must be at least 1"));
        }
        Ok(())
    }
}

/// A selectable post as surfaced to the editor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostSummary {
    pub id: PostId,
    pub title: String,
    pub permalink: Url,
    pub published_at: OffsetDateTime,
}

#[async_trait]
pub trait PostsRepo: Send + Sync {
    /// IDs of published posts whose content contains `term`, published
    /// within the inclusive bounds. Returns the full match set; no
    /// pagination.
    async fn search_published_ids(
        &self,
        term: &str,
        lower_bound: OffsetDateTime,
        upper_bound: OffsetDateTime,
    ) -> Result<Vec<PostId>, RepoError>;

    /// One page of selectable posts, date descending.
    async fn list_candidates(
        &self,
        filter: &CandidateFilter,
        page: PageRequest,
    ) -> Result<Vec<PostSummary>, RepoError>;

    /// Total matches for the same filter, for deriving the page count.
    async fn count_candidates(&self, filter: &CandidateFilter) -> Result<u64, RepoError>;
}
