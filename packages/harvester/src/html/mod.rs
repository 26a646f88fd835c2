//! HTML document loading and navigation.

pub mod locator;
pub mod text;

use scraper::Html;

use crate::error::Result;
use crate::http::Fetch;

pub use locator::{describe, find_all, find_tag, AttrMatch, Attrs};
pub use text::{element_text, single_line};

/// Fetch `url` through `session` and parse it into a searchable document.
///
/// Request errors propagate unchanged. Parsing never fails: malformed markup
/// is repaired by the parser, and missing elements are reported later by
/// [`find_tag`].
pub fn load_document<S: Fetch + ?Sized>(session: &S, url: &str) -> Result<Html> {
    let response = session.fetch(url)?;
    Ok(Html::parse_document(&response.text))
}
