//! Parsed HTML documents
//!
//! The rest of the crate only needs a handful of tree queries: find elements
//! by tag, find elements whose `href` carries a marker, test whether any text
//! node contains a string, and render an element's text. [`Document`] exposes
//! exactly those on top of `scraper`.

mod sanitize;

pub use sanitize::{unwrap_presentation_tags, PRESENTATION_TAGS};

use scraper::{ElementRef, Html, Selector};
use std::sync::LazyLock;

static HREF: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("[href]").expect("hardcoded selector is valid"));

/// A parsed page
pub struct Document {
    html: Html,
}

impl Document {
    /// Parses a full HTML document
    pub fn parse(body: &str) -> Self {
        Self {
            html: Html::parse_document(body),
        }
    }

    /// Parses a document and strips presentation markup in one step
    pub fn parse_sanitized(body: &str) -> Self {
        let mut document = Self::parse(body);
        document.sanitize();
        document
    }

    /// Replaces bold/italic/underline/no-wrap/font wrappers with their children
    pub fn sanitize(&mut self) -> usize {
        unwrap_presentation_tags(&mut self.html)
    }

    /// Elements of the given tag name, in document order
    pub fn elements(&self, tag: &str) -> Vec<ElementRef<'_>> {
        match Selector::parse(tag) {
            Ok(selector) => self.html.select(&selector).collect(),
            Err(_) => Vec::new(),
        }
    }

    /// Elements whose `href` attribute contains `marker`, in document order
    pub fn links_containing(&self, marker: &str) -> Vec<ElementRef<'_>> {
        self.html
            .select(&HREF)
            .filter(|el| el.value().attr("href").is_some_and(|h| h.contains(marker)))
            .collect()
    }

    /// Whether any single text node contains `needle`
    pub fn contains_text(&self, needle: &str) -> bool {
        self.html.root_element().text().any(|t| t.contains(needle))
    }
}

/// Concatenated text of an element with whitespace runs collapsed
pub fn render_text(element: ElementRef<'_>) -> String {
    let raw: String = element.text().collect();
    raw.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Nearest enclosing element with the given tag name
pub fn enclosing<'a>(element: ElementRef<'a>, tag: &str) -> Option<ElementRef<'a>> {
    element
        .ancestors()
        .filter_map(ElementRef::wrap)
        .find(|el| el.value().name() == tag)
}

/// First descendant of `element` whose `href` contains `marker`
pub fn find_link<'a>(element: ElementRef<'a>, marker: &str) -> Option<ElementRef<'a>> {
    element
        .select(&HREF)
        .find(|el| el.value().attr("href").is_some_and(|h| h.contains(marker)))
}
