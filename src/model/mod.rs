//! Typed model of JMdict elements.
//!
//! Each element type has a builder (`from_node`) tied to exactly one tag. The
//! builder checks the node's tag before reading anything and fails with
//! [`JmdictError::TagMismatch`](crate::JmdictError::TagMismatch) otherwise.
//! Repeated child tags are collected in document order; required children
//! (`keb`, `reb`) fail with `NotFound` when absent.
//!
//! [`Element`] is the closed set of element kinds, and [`build_element`]
//! dispatches a node to the matching builder.

pub mod entry;
pub mod kanji;
pub mod reading;
pub mod sense;

pub use entry::Entry;
pub use kanji::KanjiForm;
pub use reading::ReadingForm;
pub use sense::{Gloss, LanguageSource, Sense};

use std::fmt;

use serde::Serialize;

use crate::dictionary::Dictionary;
use crate::markup::NodeRef;
use crate::{JmdictError, Result};

/// Detailed, human-readable rendering of an element.
pub trait Render {
    fn as_text(&self) -> String;
}

/// Any element the builders can produce.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", content = "element")]
pub enum Element {
    Dictionary(Dictionary),
    Entry(Entry),
    Kanji(KanjiForm),
    Reading(ReadingForm),
    Sense(Sense),
    LanguageSource(LanguageSource),
    Gloss(Gloss),
}

/// Builds the element matching the node's tag.
///
/// # Examples
///
/// ```
/// use jmdict::config::LoaderConfig;
/// use jmdict::markup::parse_str;
/// use jmdict::model::{build_element, Element};
///
/// # fn main() -> jmdict::Result<()> {
/// let tree = parse_str("<JMdict><entry><k_ele><keb>猫</keb></k_ele></entry></JMdict>", &LoaderConfig::default())?;
/// let k_ele = tree.find_all("k_ele").next().unwrap();
/// match build_element(k_ele)? {
///     Element::Kanji(kanji) => assert_eq!(kanji.value, "猫"),
///     other => panic!("unexpected element {:?}", other),
/// }
/// # Ok(())
/// # }
/// ```
pub fn build_element(node: NodeRef<'_>) -> Result<Element> {
    let element = match node.tag() {
        Entry::TAG => Element::Entry(Entry::from_node(node)?),
        KanjiForm::TAG => Element::Kanji(KanjiForm::from_node(node)?),
        ReadingForm::TAG => Element::Reading(ReadingForm::from_node(node)?),
        Sense::TAG => Element::Sense(Sense::from_node(node)?),
        LanguageSource::TAG => Element::LanguageSource(LanguageSource::from_node(node)?),
        Gloss::TAG => Element::Gloss(Gloss::from_node(node)?),
        tag if tag.eq_ignore_ascii_case(Dictionary::TAG) => Element::Dictionary(Dictionary::from_node(node)?),
        tag => {
            return Err(JmdictError::tag_mismatch(
                "one of JMdict, entry, k_ele, r_ele, sense, lsource, gloss",
                tag,
            ))
        }
    };
    Ok(element)
}

impl Render for Element {
    fn as_text(&self) -> String {
        match self {
            Element::Dictionary(e) => Render::as_text(e),
            Element::Entry(e) => e.as_text(),
            Element::Kanji(e) => e.as_text(),
            Element::Reading(e) => e.as_text(),
            Element::Sense(e) => e.as_text(),
            Element::LanguageSource(e) => e.as_text(),
            Element::Gloss(e) => e.as_text(),
        }
    }
}

impl fmt::Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Element::Dictionary(e) => fmt::Display::fmt(e, f),
            Element::Entry(e) => fmt::Display::fmt(e, f),
            Element::Kanji(e) => fmt::Display::fmt(e, f),
            Element::Reading(e) => fmt::Display::fmt(e, f),
            Element::Sense(e) => fmt::Display::fmt(e, f),
            Element::LanguageSource(e) => fmt::Display::fmt(e, f),
            Element::Gloss(e) => fmt::Display::fmt(e, f),
        }
    }
}

/// Fails with `TagMismatch` unless `node` carries `expected`.
pub(crate) fn expect_tag(node: NodeRef<'_>, expected: &str) -> Result<()> {
    if node.tag() != expected {
        return Err(JmdictError::tag_mismatch(expected, node.tag()));
    }
    Ok(())
}

/// Text of the first `tag` child, failing with `NotFound` when there is none.
pub(crate) fn required_text(node: NodeRef<'_>, tag: &str) -> Result<String> {
    node.child(tag)
        .map(|child| child.text().to_string())
        .ok_or_else(|| JmdictError::not_found(tag, format!("<{}>", node.tag())))
}

/// Texts of all `tag` children in document order.
pub(crate) fn child_texts(node: NodeRef<'_>, tag: &str) -> Vec<String> {
    node.children()
        .filter(|child| child.tag() == tag)
        .map(|child| child.text().to_string())
        .collect()
}

/// Optional attribute rendered for text output.
pub(crate) fn attr_or_dash(value: &Option<String>) -> &str {
    value.as_deref().unwrap_or("-")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::sample_tree;

    #[test]
    fn test_build_element_dispatch() {
        let tree = sample_tree();
        let cases = [("entry", "Entry"), ("k_ele", "Kanji"), ("r_ele", "Reading"), ("sense", "Sense"), ("lsource", "LanguageSource"), ("gloss", "Gloss")];
        for (tag, kind) in cases {
            let node = tree.find_all(tag).next().unwrap();
            let element = build_element(node).unwrap();
            let name = match element {
                Element::Dictionary(_) => "Dictionary",
                Element::Entry(_) => "Entry",
                Element::Kanji(_) => "Kanji",
                Element::Reading(_) => "Reading",
                Element::Sense(_) => "Sense",
                Element::LanguageSource(_) => "LanguageSource",
                Element::Gloss(_) => "Gloss",
            };
            assert_eq!(name, kind, "building <{}>", tag);
        }
    }

    #[test]
    fn test_build_element_root() {
        let tree = sample_tree();
        match build_element(tree.root().unwrap()).unwrap() {
            Element::Dictionary(dictionary) => assert_eq!(dictionary.count(), 3),
            other => panic!("unexpected element {:?}", other),
        }
    }

    #[test]
    fn test_build_element_unknown_tag() {
        let tree = sample_tree();
        let node = tree.find_all("keb").next().unwrap();
        assert!(build_element(node).unwrap_err().is_tag_mismatch());
    }

    #[test]
    fn test_element_render_and_display() {
        let tree = sample_tree();
        let gloss = build_element(tree.find_all("gloss").next().unwrap()).unwrap();
        assert_eq!(gloss.to_string(), "to eat");
        assert!(gloss.as_text().starts_with("to eat ("));
    }
}
