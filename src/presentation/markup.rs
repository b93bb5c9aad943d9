//! Static "Read More" fragment emitted at publish time.

use askama::Template;
use thiserror::Error;

use crate::domain::featured::BlockAttributes;

#[derive(Template)]
#[template(path = "read_more.html")]
struct ReadMoreTemplate<'a> {
    title: &'a str,
    permalink: &'a str,
}

#[derive(Debug, Error)]
#[error("failed to render read-more fragment")]
pub struct MarkupError {
    #[source]
    source: askama::Error,
}

/// Pure function of the block attributes: no link, no output; otherwise the
/// fixed fragment with the title escaped.
pub fn render(attributes: &BlockAttributes) -> Result<Option<String>, MarkupError> {
    let Some(link) = attributes.post_link.as_ref() else {
        return Ok(None);
    };
    let title = attributes.post_title.as_deref().unwrap_or_default();

    ReadMoreTemplate {
        title,
        permalink: link.as_str(),
    }
    .render()
    .map(Some)
    .map_err(|source| MarkupError { source })
}
