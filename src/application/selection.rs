//! Post-selection engine backing the block editor panel.
//!
//! The editor surface itself is host-owned; this module models its state
//! explicitly so the component is a deterministic function of local state
//! and the last-observed repo response.

use tokio::try_join;

use crate::application::repos::{
    CandidateFilter, CandidateTerm, PageRequest, PostId, PostSummary, PostsRepo, RepoError,
};
use crate::domain::featured::{BlockAttributes, FeaturedLink};

/// Fixed page size of the candidate list.
pub const CANDIDATE_PAGE_SIZE: u32 = 5;

/// One observed page of selectable posts plus the derived pager extent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateWindow {
    pub posts: Vec<PostSummary>,
    pub total_pages: u32,
}

/// Local editor state: search term, pager position, the visually selected
/// post, and whether a fetch is in flight.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionState {
    search_term: String,
    current_page: u32,
    selected: Option<PostId>,
    loading: bool,
}

impl Default for SelectionState {
    fn default() -> Self {
        Self::new()
    }
}

impl SelectionState {
    pub fn new() -> Self {
        Self {
            search_term: String::new(),
            current_page: 1,
            selected: None,
            loading: false,
        }
    }

    pub fn search_term(&self) -> &str {
        &self.search_term
    }

    pub fn current_page(&self) -> u32 {
        self.current_page
    }

    pub fn selected(&self) -> Option<PostId> {
        self.selected
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Changing the term always rewinds the pager to page 1.
    pub fn set_search_term(&mut self, term: impl Into<String>) {
        self.search_term = term.into();
        self.current_page = 1;
    }

    pub fn set_page(&mut self, page: u32) {
        self.current_page = page.max(1);
    }

    pub fn begin_fetch(&mut self) {
        self.loading = true;
    }

    pub fn finish_fetch(&mut self) {
        self.loading = false;
    }

    /// Filter for both the page fetch and the count query. The post being
    /// edited never appears among candidates.
    pub fn filter(&self, editing_post: Option<PostId>) -> CandidateFilter {
        CandidateFilter {
            term: CandidateTerm::parse(&self.search_term),
            exclude: editing_post.into_iter().collect(),
        }
    }

    pub fn page_request(&self) -> PageRequest {
        PageRequest::new(self.current_page, CANDIDATE_PAGE_SIZE)
    }

    /// Bind `post` into the block attributes and mark it selected.
    pub fn select(&mut self, post: &PostSummary, attributes: &mut BlockAttributes) {
        attributes.select(&FeaturedLink {
            post_id: post.id,
            title: post.title.clone(),
            permalink: post.permalink.clone(),
        });
        self.selected = Some(post.id);
    }

    /// Re-validate the selected visual state against the current window.
    /// Clears only presentation state; the stored attributes are untouched.
    pub fn reconcile(&mut self, window: &[PostSummary], attributes: &BlockAttributes) {
        self.selected = match attributes.post_id {
            Some(id) if window.iter().any(|post| post.id == id) => Some(id),
            _ => None,
        };
    }

    /// Pager controls render only with more than one page and no fetch in
    /// flight.
    pub fn pagination_visible(&self, total_pages: u32) -> bool {
        !self.loading && total_pages > 1
    }
}

/// Drives the repo on behalf of a [`SelectionState`]. Responses are applied
/// in arrival order; in-flight fetches are not cancelled when the term
/// changes, so a stale response may be observed before a newer one lands.
pub struct SelectionController<R> {
    repo: R,
    editing_post: Option<PostId>,
    state: SelectionState,
}

impl<R: PostsRepo> SelectionController<R> {
    pub fn new(repo: R, editing_post: Option<PostId>) -> Self {
        Self {
            repo,
            editing_post,
            state: SelectionState::new(),
        }
    }

    pub fn state(&self) -> &SelectionState {
        &self.state
    }

    pub fn search(&mut self, term: impl Into<String>) {
        self.state.set_search_term(term);
    }

    pub fn go_to_page(&mut self, page: u32) {
        self.state.set_page(page);
    }

    pub fn select(&mut self, post: &PostSummary, attributes: &mut BlockAttributes) {
        self.state.select(post, attributes);
    }

    pub fn pagination_visible(&self, window: &CandidateWindow) -> bool {
        self.state.pagination_visible(window.total_pages)
    }

    /// Fetch the current page and total count with identical filters, then
    /// reconcile the selected visual state against the observed window.
    pub async fn refresh(
        &mut self,
        attributes: &BlockAttributes,
    ) -> Result<CandidateWindow, RepoError> {
        let filter = self.state.filter(self.editing_post);
        let page = self.state.page_request();

        self.state.begin_fetch();
        let result = try_join!(
            self.repo.list_candidates(&filter, page),
            self.repo.count_candidates(&filter),
        );
        self.state.finish_fetch();

        let (posts, total) = result?;
        let total_pages =
            u32::try_from(total.div_ceil(u64::from(CANDIDATE_PAGE_SIZE))).unwrap_or(u32::MAX);

        self.state.reconcile(&posts, attributes);
        Ok(CandidateWindow { posts, total_pages })
    }
}
