//! In-memory stand-in for the content store used across integration tests.

#![allow(dead_code)]

use async_trait::async_trait;
use readmore::application::repos::{
    CandidateFilter, CandidateTerm, PageRequest, PostId, PostSummary, PostsRepo, RepoError,
};
use time::OffsetDateTime;
use url::Url;

#[derive(Debug, Clone)]
pub struct FakePost {
    pub id: PostId,
    pub title: String,
    pub content: String,
    pub published_at: OffsetDateTime,
    pub published: bool,
}

impl FakePost {
    pub fn published(
        id: PostId,
        title: &str,
        content: &str,
        published_at: OffsetDateTime,
    ) -> Self {
        Self {
            id,
            title: title.to_string(),
            content: content.to_string(),
            published_at,
            published: true,
        }
    }

    pub fn draft(id: PostId, title: &str, content: &str, published_at: OffsetDateTime) -> Self {
        Self {
            published: false,
            ..Self::published(id, title, content, published_at)
        }
    }

    fn permalink(&self) -> Url {
        Url::parse(&format!("https://example.com/posts/{}", self.id)).expect("valid url")
    }

    fn summary(&self) -> PostSummary {
        PostSummary {
            id: self.id,
            title: self.title.clone(),
            permalink: self.permalink(),
            published_at: self.published_at,
        }
    }
}

pub struct FakePostsRepo {
    posts: Vec<FakePost>,
}

impl FakePostsRepo {
    pub fn new(posts: Vec<FakePost>) -> Self {
        Self { posts }
    }

    fn candidates(&self, filter: &CandidateFilter) -> Vec<&FakePost> {
        let mut matches: Vec<&FakePost> = self
            .posts
            .iter()
            .filter(|post| post.published)
            .filter(|post| match &filter.term {
                CandidateTerm::Any => true,
                CandidateTerm::Id(id) => post.id == *id,
                CandidateTerm::Title(term) => {
                    post.title.to_lowercase().contains(&term.to_lowercase())
                }
            })
            .filter(|post| !filter.exclude.contains(&post.id))
            .collect();
        matches.sort_by(|a, b| b.published_at.cmp(&a.published_at).then(b.id.cmp(&a.id)));
        matches
    }
}

#[async_trait]
impl PostsRepo for FakePostsRepo {
    async fn search_published_ids(
        &self,
        term: &str,
        lower_bound: OffsetDateTime,
        upper_bound: OffsetDateTime,
    ) -> Result<Vec<PostId>, RepoError> {
        let mut matches: Vec<&FakePost> = self
            .posts
            .iter()
            .filter(|post| post.published)
            .filter(|post| post.content.contains(term))
            .filter(|post| post.published_at >= lower_bound && post.published_at <= upper_bound)
            .collect();
        matches.sort_by(|a, b| b.published_at.cmp(&a.published_at).then(b.id.cmp(&a.id)));
        Ok(matches.into_iter().map(|post| post.id).collect())
    }

    async fn list_candidates(
        &self,
        filter: &CandidateFilter,
        page: PageRequest,
    ) -> Result<Vec<PostSummary>, RepoError> {
        page.validate()?;
        Ok(self
            .candidates(filter)
            .into_iter()
            .skip(page.offset() as usize)
            .take(page.per_page as usize)
            .map(FakePost::summary)
            .collect())
    }

    async fn count_candidates(&self, filter: &CandidateFilter) -> Result<u64, RepoError> {
        Ok(self.candidates(filter).len() as u64)
    }
}
