//! Persisted configuration of a featured read-more block instance.

use serde::{Deserialize, Serialize};
use url::Url;

use crate::domain::error::DomainError;

/// Marker serialized into stored content wherever the block is embedded;
/// also the free-text term the audit command searches for.
pub const DEFAULT_BLOCK_NAME: &str = "readmore/featured-link";

/// A complete binding to a featured post. The three fields always travel
/// together; partial bindings never exist at this level.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeaturedLink {
    pub post_id: i64,
    pub title: String,
    pub permalink: Url,
}

/// Attribute set persisted per block instance as part of the hosting page's
/// structured content. All three attributes are written atomically on
/// selection and cleared together; `validate` rejects partial sets that a
/// hand-edited document could carry.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct BlockAttributes {
    pub post_id: Option<i64>,
    pub post_title: Option<String>,
    pub post_link: Option<Url>,
}

impl BlockAttributes {
    /// Bind a featured post, writing all three attributes at once. This is
    /// the sole mutation path for block state.
    pub fn select(&mut self, link: &FeaturedLink) {
        self.post_id = Some(link.post_id);
        self.post_title = Some(link.title.clone());
        self.post_link = Some(link.permalink.clone());
    }

    pub fn clear(&mut self) {
        self.post_id = None;
        self.post_title = None;
        self.post_link = None;
    }

    pub fn is_empty(&self) -> bool {
        self.post_id.is_none() && self.post_title.is_none() && self.post_link.is_none()
    }

    /// The complete binding, if one is present.
    pub fn featured(&self) -> Option<FeaturedLink> {
        match (&self.post_id, &self.post_title, &self.post_link) {
            (Some(post_id), Some(title), Some(permalink)) => Some(FeaturedLink {
                post_id: *post_id,
                title: title.clone(),
                permalink: permalink.clone(),
            }),
            _ => None,
        }
    }

    /// All three attributes present together or all absent.
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.is_empty() || self.featured().is_some() {
            return Ok(());
        }
        Err(DomainError::invariant(
            "featured link attributes must be set or cleared atomically",
        ))
    }
}
