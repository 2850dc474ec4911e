//! Senses and their translated content.
//!
//! Attribute keys follow the JMdict file itself: `xml:lang`, `ls_type` and
//! `ls_wasei` on `<lsource>`, `xml:lang`, `g_type` and `g_gend` on `<gloss>`.
//! An attribute missing from the source stays `None`; JMdict's implied
//! defaults (such as `eng` for `xml:lang`) are not filled in.

use std::fmt;

use indexmap::IndexMap;
use serde::Serialize;

use super::{attr_or_dash, child_texts, expect_tag, Render};
use crate::markup::NodeRef;
use crate::matcher::{MatchOptions, TextValue};
use crate::Result;

pub const ATTR_LANG: &str = "xml:lang";
pub const ATTR_LS_TYPE: &str = "ls_type";
pub const ATTR_LS_WASEI: &str = "ls_wasei";
pub const ATTR_G_TYPE: &str = "g_type";
pub const ATTR_G_GEND: &str = "g_gend";

fn attr_string(node: NodeRef<'_>, key: &str) -> Option<String> {
    node.attr(key).map(str::to_string)
}

/// Foreign-language origin of a loanword (`<lsource>`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LanguageSource {
    /// Source word; empty when only the language is known
    pub value: String,
    pub language: Option<String>,
    /// "full" or "part"
    pub source_type: Option<String>,
    /// "y" for wasei-eigo style constructions
    pub wasei: Option<String>,
}

impl LanguageSource {
    pub const TAG: &'static str = "lsource";

    pub fn from_node(node: NodeRef<'_>) -> Result<Self> {
        expect_tag(node, Self::TAG)?;
        Ok(Self {
            value: node.text().to_string(),
            language: attr_string(node, ATTR_LANG),
            source_type: attr_string(node, ATTR_LS_TYPE),
            wasei: attr_string(node, ATTR_LS_WASEI),
        })
    }

    /// Attribute map under the JMdict key names, every key present.
    pub fn attrs(&self) -> IndexMap<&'static str, Option<&str>> {
        IndexMap::from([
            (ATTR_LANG, self.language.as_deref()),
            (ATTR_LS_TYPE, self.source_type.as_deref()),
            (ATTR_LS_WASEI, self.wasei.as_deref()),
        ])
    }

    pub fn is_wasei(&self) -> bool {
        self.wasei.as_deref() == Some("y")
    }
}

impl TextValue for LanguageSource {
    fn value(&self) -> &str {
        &self.value
    }
}

impl Render for LanguageSource {
    fn as_text(&self) -> String {
        format!(
            "{} ({}: {}, {}: {}, {}: {})",
            self.value,
            ATTR_LANG,
            attr_or_dash(&self.language),
            ATTR_LS_TYPE,
            attr_or_dash(&self.source_type),
            ATTR_LS_WASEI,
            attr_or_dash(&self.wasei)
        )
    }
}

impl fmt::Display for LanguageSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.value)
    }
}

/// One translated meaning (`<gloss>`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Gloss {
    pub value: String,
    pub language: Option<String>,
    /// e.g. "lit", "fig", "expl"
    pub gloss_type: Option<String>,
    pub gender: Option<String>,
}

impl Gloss {
    pub const TAG: &'static str = "gloss";

    pub fn from_node(node: NodeRef<'_>) -> Result<Self> {
        expect_tag(node, Self::TAG)?;
        Ok(Self {
            value: node.text().to_string(),
            language: attr_string(node, ATTR_LANG),
            gloss_type: attr_string(node, ATTR_G_TYPE),
            gender: attr_string(node, ATTR_G_GEND),
        })
    }

    /// Attribute map under the JMdict key names, every key present.
    pub fn attrs(&self) -> IndexMap<&'static str, Option<&str>> {
        IndexMap::from([
            (ATTR_LANG, self.language.as_deref()),
            (ATTR_G_TYPE, self.gloss_type.as_deref()),
            (ATTR_G_GEND, self.gender.as_deref()),
        ])
    }
}

impl TextValue for Gloss {
    fn value(&self) -> &str {
        &self.value
    }
}

impl Render for Gloss {
    fn as_text(&self) -> String {
        format!(
            "{} ({}: {}, {}: {}, {}: {})",
            self.value,
            ATTR_LANG,
            attr_or_dash(&self.language),
            ATTR_G_TYPE,
            attr_or_dash(&self.gloss_type),
            ATTR_G_GEND,
            attr_or_dash(&self.gender)
        )
    }
}

impl fmt::Display for Gloss {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.value)
    }
}

/// One meaning of an entry (`<sense>`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Sense {
    /// `<stagk>`: kanji forms this sense is limited to
    pub kanji: Vec<String>,
    /// `<stagr>`: readings this sense is limited to
    pub reading: Vec<String>,
    pub xref: Vec<String>,
    /// `<ant>`
    pub antonym: Vec<String>,
    /// `<pos>`
    pub part_of_speech: Vec<String>,
    pub field: Vec<String>,
    pub misc: Vec<String>,
    /// `<s_inf>`
    pub info: Vec<String>,
    /// `<dial>`
    pub dialect: Vec<String>,
    pub language_src: Vec<LanguageSource>,
    pub glossary: Vec<Gloss>,
}

impl Sense {
    pub const TAG: &'static str = "sense";

    pub fn from_node(node: NodeRef<'_>) -> Result<Self> {
        expect_tag(node, Self::TAG)?;
        Ok(Self {
            kanji: child_texts(node, "stagk"),
            reading: child_texts(node, "stagr"),
            xref: child_texts(node, "xref"),
            antonym: child_texts(node, "ant"),
            part_of_speech: child_texts(node, "pos"),
            field: child_texts(node, "field"),
            misc: child_texts(node, "misc"),
            info: child_texts(node, "s_inf"),
            dialect: child_texts(node, "dial"),
            language_src: node
                .children_named(LanguageSource::TAG)
                .map(LanguageSource::from_node)
                .collect::<Result<_>>()?,
            glossary: node
                .children_named(Gloss::TAG)
                .map(Gloss::from_node)
                .collect::<Result<_>>()?,
        })
    }

    /// True if any gloss of this sense matches.
    pub fn match_glossary(&self, query: &str, options: MatchOptions) -> bool {
        self.glossary.iter().any(|gloss| gloss.match_value(query, options))
    }

    /// Writes the sense as labelled lists, one line per item, indented with tabs.
    pub fn write_text(&self, out: &mut String, indent: usize) {
        let label_indent = "\t".repeat(indent);
        let item_indent = "\t".repeat(indent + 1);
        let mut section = |name: &str, items: &[String]| {
            out.push_str(&format!("{}.{}:\n", label_indent, name));
            for item in items {
                out.push_str(&format!("{}- {}\n", item_indent, item));
            }
        };
        section("kanji", &self.kanji);
        section("reading", &self.reading);
        section("xref", &self.xref);
        section("antonym", &self.antonym);
        section("part_of_speech", &self.part_of_speech);
        section("field", &self.field);
        section("misc", &self.misc);
        section("info", &self.info);
        section("dialect", &self.dialect);
        let language_src: Vec<String> = self.language_src.iter().map(Render::as_text).collect();
        section("language_src", &language_src);
        let glossary: Vec<String> = self.glossary.iter().map(Render::as_text).collect();
        section("glossary", &glossary);
    }
}

impl Render for Sense {
    fn as_text(&self) -> String {
        let mut out = String::new();
        self.write_text(&mut out, 0);
        out
    }
}

impl fmt::Display for Sense {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let glosses: Vec<&str> = self.glossary.iter().map(|g| g.value.as_str()).collect();
        f.write_str(&glosses.join("; "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::sample_tree;

    fn sample_senses() -> Vec<Sense> {
        let tree = sample_tree();
        tree.find_all(Sense::TAG).map(|n| Sense::from_node(n).unwrap()).collect()
    }

    #[test]
    fn test_from_node() {
        let senses = sample_senses();
        assert_eq!(senses.len(), 4);
        assert_eq!(senses[0].part_of_speech, vec!["Ichidan verb", "transitive verb"]);
        assert_eq!(senses[1].kanji, vec!["食べる"]);
        assert_eq!(senses[1].xref, vec!["食う・1"]);
        assert_eq!(senses[1].info, vec!["used figuratively"]);
        let glosses: Vec<_> = senses[1].glossary.iter().map(|g| g.value.as_str()).collect();
        assert_eq!(glosses, vec!["to live on (e.g. a salary)", "essen"]);
        assert_eq!(senses[3].field, vec!["geography"]);
        assert_eq!(senses[3].dialect, vec!["Kansai-ben"]);
        assert_eq!(senses[3].antonym, vec!["京都"]);
    }

    #[test]
    fn test_gloss_attrs() {
        let senses = sample_senses();
        let plain = &senses[0].glossary[0];
        assert_eq!(plain.attrs(), IndexMap::from([(ATTR_LANG, None::<&str>), (ATTR_G_TYPE, None), (ATTR_G_GEND, None)]));
        let fig = &senses[1].glossary[0];
        assert_eq!(fig.language.as_deref(), Some("eng"));
        assert_eq!(fig.gloss_type.as_deref(), Some("fig"));
        assert_eq!(senses[3].glossary[0].gender.as_deref(), Some("neut"));
    }

    #[test]
    fn test_language_source() {
        let senses = sample_senses();
        let source = &senses[2].language_src[0];
        assert_eq!(source.value, "Arbeit");
        assert!(source.is_wasei());
        assert_eq!(source.attrs().get(ATTR_LS_TYPE), Some(&Some("part")));
        assert_eq!(
            source.as_text(),
            "Arbeit (xml:lang: ger, ls_type: part, ls_wasei: y)"
        );
    }

    #[test]
    fn test_match_glossary() {
        let senses = sample_senses();
        assert!(senses[0].match_glossary("EAT", MatchOptions::CONTAINS_IGNORE_CASE));
        assert!(!senses[0].match_glossary("EAT", MatchOptions::EXACT));
        assert!(senses[0].match_glossary("to eat", MatchOptions::EXACT));
    }

    #[test]
    fn test_tag_mismatch() {
        let tree = sample_tree();
        let gloss = tree.find_all(Gloss::TAG).next().unwrap();
        assert!(Sense::from_node(gloss).unwrap_err().is_tag_mismatch());
        assert!(LanguageSource::from_node(gloss).unwrap_err().is_tag_mismatch());
    }

    #[test]
    fn test_render() {
        let senses = sample_senses();
        let text = senses[0].as_text();
        assert!(text.starts_with(".kanji:\n.reading:\n"));
        assert!(text.contains(".part_of_speech:\n\t- Ichidan verb\n\t- transitive verb\n"));
        assert!(text.ends_with(".glossary:\n\t- to eat (xml:lang: -, g_type: -, g_gend: -)\n"));
        assert_eq!(senses[1].to_string(), "to live on (e.g. a salary); essen");
    }

    #[test]
    fn test_write_text_indented() {
        let senses = sample_senses();
        let mut out = String::new();
        senses[3].write_text(&mut out, 2);
        assert!(out.starts_with("\t\t.kanji:\n\t\t.reading:\n\t\t.xref:\n\t\t.antonym:\n\t\t\t- 京都\n"));
        assert!(out.contains("\t\t.field:\n\t\t\t- geography\n\t\t.misc:\n"));
        assert!(out.ends_with("\t\t.glossary:\n\t\t\t- Tokyo (capital of Japan) (xml:lang: -, g_type: -, g_gend: neut)\n"));
        assert_eq!(out.lines().filter(|line| line.starts_with("\t\t.")).count(), 11);
    }
}
