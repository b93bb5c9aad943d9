//! The audit query: which published posts embed the block?

use tracing::info;

use crate::application::repos::{PostId, PostsRepo, RepoError};
use crate::domain::dates::DateWindow;

/// Runs the single block-usage query for the CLI. The query executes once
/// per invocation and fetches the full match set for the window.
pub struct BlockSearchService<R> {
    repo: R,
    block_name: String,
}

/// Outcome of one audit run. An empty `post_ids` is an informational
/// result, not an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockSearchReport {
    pub block_name: String,
    pub window: DateWindow,
    pub post_ids: Vec<PostId>,
}

impl<R: PostsRepo> BlockSearchService<R> {
    pub fn new(repo: R, block_name: impl Into<String>) -> Self {
        Self {
            repo,
            block_name: block_name.into(),
        }
    }

    pub async fn run(&self, window: DateWindow) -> Result<BlockSearchReport, RepoError> {
        info!(
            block = %self.block_name,
            after = %window.after(),
            before = %window.before(),
            "searching published posts for block usage"
        );

        let post_ids = self
            .repo
            .search_published_ids(&self.block_name, window.lower_bound(), window.upper_bound())
            .await?;

        Ok(BlockSearchReport {
            block_name: self.block_name.clone(),
            window,
            post_ids,
        })
    }
}
