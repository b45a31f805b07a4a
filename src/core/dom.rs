// src/core/dom.rs
//! Value locator primitives over a parsed snapshot.
//!
//! Every lookup returns an empty result when nothing matches. Absence is an
//! ordinary outcome here and the decoders turn it into an empty cell.

use regex::Regex;
use scraper::{ElementRef, Html};

use super::sanitize::{is_blank, normalize_ws};

/// One parsed snapshot. Read-only once built.
pub struct Document {
    html: Html,
}

/// A node that may hold a value: an element, or a bare text run between elements.
#[derive(Clone, Copy, Debug)]
pub enum Located<'a> {
    Element(ElementRef<'a>),
    Text(&'a str),
}

/// How to step from a label to the node holding its value.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SiblingStep {
    /// First following sibling that is an element or non-blank text.
    Next,
    /// The one after that (a caption between label and value).
    AfterNext,
    /// First `<img>` below the label itself.
    DescendantImage,
}

/// The order schema variants have needed so far.
pub const SIBLING_CHAIN: [SiblingStep; 3] =
    [SiblingStep::Next, SiblingStep::AfterNext, SiblingStep::DescendantImage];

// NodeRef -> Located, text runs included.
macro_rules! located {
    ($node:expr) => {{
        let node = $node;
        match ElementRef::wrap(node) {
            Some(el) => Some(Located::Element(el)),
            None => node.value().as_text().map(|t| Located::Text(&**t)),
        }
    }};
}

impl Document {
    pub fn parse(markup: &str) -> Self {
        Self { html: Html::parse_document(markup) }
    }

    fn elements(&self) -> impl Iterator<Item = ElementRef<'_>> {
        self.html.root_element().descendants().filter_map(ElementRef::wrap)
    }

    /// Parents of every text run whose trimmed content equals `literal`, in document order.
    pub fn by_text(&self, literal: &str) -> Vec<ElementRef<'_>> {
        self.html
            .root_element()
            .descendants()
            .filter(|n| n.value().as_text().is_some_and(|t| t.trim() == literal))
            .filter_map(|n| n.parent().and_then(ElementRef::wrap))
            .collect()
    }

    /// `by_text` for the first phrasing that matches anything.
    pub fn by_any_text(&self, phrasings: &[&str]) -> Vec<ElementRef<'_>> {
        phrasings
            .iter()
            .map(|p| self.by_text(p))
            .find(|hits| !hits.is_empty())
            .unwrap_or_default()
    }

    pub fn by_class(&self, class: &str) -> Vec<ElementRef<'_>> {
        self.elements()
            .filter(|e| e.value().classes().any(|c| c == class))
            .collect()
    }

    pub fn first_by_class(&self, class: &str) -> Option<ElementRef<'_>> {
        self.elements().find(|e| e.value().classes().any(|c| c == class))
    }

    /// Elements carrying at least one class token the pattern matches.
    pub fn by_class_pattern(&self, pattern: &Regex) -> Vec<ElementRef<'_>> {
        self.elements()
            .filter(|e| e.value().classes().any(|c| pattern.is_match(c)))
            .collect()
    }

    pub fn by_id(&self, id: &str) -> Option<ElementRef<'_>> {
        self.elements().find(|e| e.value().id() == Some(id))
    }
}

impl<'a> Located<'a> {
    /// Raw text content (concatenated for elements).
    pub fn raw_text(&self) -> String {
        match self {
            Located::Element(el) => el.text().collect(),
            Located::Text(t) => t.to_string(),
        }
    }

    /// Whitespace-normalized text content.
    pub fn text(&self) -> String {
        normalize_ws(&self.raw_text())
    }

    /// `src` of this node if it is an image, else of its first descendant image.
    pub fn image_src(&self) -> Option<&'a str> {
        match *self {
            Located::Element(el) if el.value().name() == "img" => el.value().attr("src"),
            Located::Element(el) => first_image(el).and_then(|img| img.value().attr("src")),
            Located::Text(_) => None,
        }
    }

    fn is_filled(&self) -> bool {
        match self {
            Located::Element(_) => true,
            Located::Text(t) => !is_blank(t),
        }
    }
}

/// The node holding the value for `label`: the first step in `chain` whose
/// node passes `accept`. A step that finds a node `accept` rejects falls
/// through to the next step.
pub fn sibling_value<'a>(
    label: ElementRef<'a>,
    chain: &[SiblingStep],
    accept: impl Fn(&Located<'a>) -> bool,
) -> Option<Located<'a>> {
    chain.iter().find_map(|step| {
        let found = match step {
            SiblingStep::Next => filled_siblings(label).next(),
            SiblingStep::AfterNext => filled_siblings(label).nth(1),
            SiblingStep::DescendantImage => first_image(label).map(Located::Element),
        };
        found.filter(|node| accept(node))
    })
}

// Following siblings, blank text runs and comments skipped.
fn filled_siblings<'a>(el: ElementRef<'a>) -> impl Iterator<Item = Located<'a>> {
    el.next_siblings()
        .filter_map(|n| located!(n))
        .filter(Located::is_filled)
}

/// Walk to `el`'s parent, then `steps` raw previous siblings (text runs count).
pub fn parent_preceding<'a>(el: ElementRef<'a>, steps: usize) -> Option<Located<'a>> {
    let mut node = el.parent()?;
    for _ in 0..steps {
        node = node.prev_sibling()?;
    }
    located!(node)
}

pub fn first_image(el: ElementRef<'_>) -> Option<ElementRef<'_>> {
    el.descendants()
        .skip(1)
        .filter_map(ElementRef::wrap)
        .find(|e| e.value().name() == "img")
}
