//! Mandatory element lookup.
//!
//! [`find_tag`] treats a missing element as a page-structure violation. It
//! must not be used for optional lookups; use [`find_all`] for those.

use std::fmt;

use regex::Regex;
use scraper::ElementRef;

use crate::error::{HarvesterError, Result};

/// Constraint on a single attribute value.
#[derive(Debug, Clone)]
pub enum AttrMatch {
    /// Attribute equals the value. For `class`, any one class token may match.
    Exact(String),
    /// Attribute equals one of the values (same `class` rule as `Exact`).
    AnyOf(Vec<String>),
    /// Attribute value matches the regex.
    Pattern(Regex),
    /// Attribute is present with any value.
    Present,
}

impl AttrMatch {
    fn accepts(&self, name: &str, value: &str) -> bool {
        let equals = |expected: &str| {
            value == expected
                || (name == "class" && value.split_whitespace().any(|token| token == expected))
        };
        match self {
            Self::Exact(expected) => equals(expected),
            Self::AnyOf(options) => options.iter().any(|o| equals(o)),
            Self::Pattern(pattern) => pattern.is_match(value),
            Self::Present => true,
        }
    }
}

/// Attribute filter for [`find_tag`] and [`find_all`]. All constraints must hold.
///
/// # Examples
/// ```
/// use pydocs_harvester::html::Attrs;
///
/// let filter = Attrs::new().id("pep-content").class("field-list");
/// assert_eq!(filter.to_string(), " [id=pep-content][class~=field-list]");
/// ```
#[derive(Debug, Clone, Default)]
pub struct Attrs {
    constraints: Vec<(String, AttrMatch)>,
}

impl Attrs {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with(mut self, name: &str, matcher: AttrMatch) -> Self {
        self.constraints.push((name.to_string(), matcher));
        self
    }

    #[must_use]
    pub fn id(self, value: &str) -> Self {
        self.with("id", AttrMatch::Exact(value.to_string()))
    }

    #[must_use]
    pub fn class(self, value: &str) -> Self {
        self.with("class", AttrMatch::Exact(value.to_string()))
    }

    #[must_use]
    pub fn attr(self, name: &str, value: &str) -> Self {
        self.with(name, AttrMatch::Exact(value.to_string()))
    }

    #[must_use]
    pub fn any_of(self, name: &str, values: &[&str]) -> Self {
        let values = values.iter().map(|v| (*v).to_string()).collect();
        self.with(name, AttrMatch::AnyOf(values))
    }

    #[must_use]
    pub fn matching(self, name: &str, pattern: Regex) -> Self {
        self.with(name, AttrMatch::Pattern(pattern))
    }

    #[must_use]
    pub fn present(self, name: &str) -> Self {
        self.with(name, AttrMatch::Present)
    }

    /// Check every constraint against `element`.
    pub fn matches(&self, element: ElementRef<'_>) -> bool {
        self.constraints.iter().all(|(name, matcher)| {
            element
                .value()
                .attr(name)
                .is_some_and(|value| matcher.accepts(name, value))
        })
    }
}

impl fmt::Display for Attrs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.constraints.is_empty() {
            f.write_str(" ")?;
        }
        for (name, matcher) in &self.constraints {
            match matcher {
                AttrMatch::Exact(v) if name == "class" => write!(f, "[{name}~={v}]")?,
                AttrMatch::Exact(v) => write!(f, "[{name}={v}]")?,
                AttrMatch::AnyOf(vs) => write!(f, "[{name} in {}]", vs.join("|"))?,
                AttrMatch::Pattern(p) => write!(f, "[{name}~/{}/]", p.as_str())?,
                AttrMatch::Present => write!(f, "[{name}]")?,
            }
        }
        Ok(())
    }
}

/// All descendants of `scope` (not `scope` itself) named `tag` that satisfy `attrs`.
pub fn find_all<'a, 'f>(
    scope: ElementRef<'a>,
    tag: &'f str,
    attrs: &'f Attrs,
) -> impl Iterator<Item = ElementRef<'a>> + 'f
where
    'a: 'f,
{
    let scope_id = scope.id();
    scope
        .descendants()
        .filter_map(ElementRef::wrap)
        .filter(move |el| el.id() != scope_id)
        .filter(move |el| el.value().name() == tag && attrs.matches(*el))
}

/// First descendant of `scope` named `tag` that satisfies `attrs`.
///
/// # Errors
/// [`HarvesterError::MissingTag`] if nothing matches.
///
/// # Examples
/// ```
/// use scraper::Html;
/// use pydocs_harvester::html::{find_tag, Attrs};
///
/// let doc = Html::parse_document(r#"<div class="a b"><p id="x">hi</p></div>"#);
/// let div = find_tag(doc.root_element(), "div", &Attrs::new().class("b")).unwrap();
/// assert!(find_tag(div, "p", &Attrs::new().id("x")).is_ok());
/// assert!(find_tag(div, "p", &Attrs::new().id("y")).is_err());
/// ```
pub fn find_tag<'a>(scope: ElementRef<'a>, tag: &str, attrs: &Attrs) -> Result<ElementRef<'a>> {
    let found = find_all(scope, tag, attrs).next();
    found.ok_or_else(|| {
        let err = HarvesterError::MissingTag {
            tag: tag.to_string(),
            filter: attrs.to_string(),
            context: describe(scope),
        };
        tracing::debug!(error = %err, "Required element missing");
        err
    })
}

/// Short CSS-like description of an element for error messages.
pub fn describe(element: ElementRef<'_>) -> String {
    let value = element.value();
    let mut out = format!("<{}", value.name());
    if let Some(id) = value.id() {
        out.push('#');
        out.push_str(id);
    }
    for class in value.attr("class").unwrap_or_default().split_whitespace() {
        out.push('.');
        out.push_str(class);
    }
    out.push('>');
    out
}
