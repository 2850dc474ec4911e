use std::fmt;

use serde::Serialize;

use super::{expect_tag, KanjiForm, ReadingForm, Render, Sense};
use crate::markup::NodeRef;
use crate::matcher::{MatchOptions, TextValue};
use crate::{JmdictError, Result};

/// One headword record (`<entry>`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Entry {
    /// `<ent_seq>`; `None` when the element is absent
    pub sequence: Option<u64>,
    pub kanji: Vec<KanjiForm>,
    pub reading: Vec<ReadingForm>,
    pub sense: Vec<Sense>,
}

impl Entry {
    pub const TAG: &'static str = "entry";
    pub const SEQUENCE_TAG: &'static str = "ent_seq";

    pub fn from_node(node: NodeRef<'_>) -> Result<Self> {
        expect_tag(node, Self::TAG)?;
        let sequence = match node.child(Self::SEQUENCE_TAG) {
            Some(seq) => Some(seq.text().trim().parse::<u64>()?),
            None => None,
        };
        Ok(Self {
            sequence,
            kanji: node
                .children_named(KanjiForm::TAG)
                .map(KanjiForm::from_node)
                .collect::<Result<_>>()?,
            reading: node
                .children_named(ReadingForm::TAG)
                .map(ReadingForm::from_node)
                .collect::<Result<_>>()?,
            sense: node
                .children_named(Sense::TAG)
                .map(Sense::from_node)
                .collect::<Result<_>>()?,
        })
    }

    pub fn match_kanji(&self, query: &str, options: MatchOptions) -> bool {
        self.kanji.iter().any(|kanji| kanji.match_value(query, options))
    }

    pub fn match_reading(&self, query: &str, options: MatchOptions) -> bool {
        self.reading.iter().any(|reading| reading.match_value(query, options))
    }

    pub fn match_glossary(&self, query: &str, options: MatchOptions) -> bool {
        self.sense.iter().any(|sense| sense.match_glossary(query, options))
    }

    /// True if any given criterion matches (substring, case-insensitive).
    /// Empty strings count as not given.
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` when no criterion is given.
    pub fn matches(&self, kanji: Option<&str>, reading: Option<&str>, glossary: Option<&str>) -> Result<bool> {
        let kanji = kanji.filter(|q| !q.is_empty());
        let reading = reading.filter(|q| !q.is_empty());
        let glossary = glossary.filter(|q| !q.is_empty());
        if kanji.is_none() && reading.is_none() && glossary.is_none() {
            return Err(JmdictError::invalid_parameter("Query input required."));
        }
        let options = MatchOptions::CONTAINS_IGNORE_CASE;
        Ok(kanji.is_some_and(|q| self.match_kanji(q, options))
            || reading.is_some_and(|q| self.match_reading(q, options))
            || glossary.is_some_and(|q| self.match_glossary(q, options)))
    }
}

impl Render for Entry {
    fn as_text(&self) -> String {
        let mut out = String::new();
        out.push_str(&format!("Entry ({}):\n", self));
        out.push_str("\t> Kanji(s):\n");
        for kanji in &self.kanji {
            out.push_str(&format!("\t\t- {}\n", kanji.as_text()));
        }
        out.push('\n');

        out.push_str("\t> Reading(s):\n");
        for reading in &self.reading {
            out.push_str(&format!("\t\t- {}\n", reading.as_text()));
        }
        out.push('\n');

        out.push_str("\t> Sense(s):\n");
        for (i, sense) in self.sense.iter().enumerate() {
            out.push_str(&format!("\t--- {} ---\n", i + 1));
            sense.write_text(&mut out, 2);
        }
        out
    }
}

/// The sequence number, or "unknown" for entries without one.
impl fmt::Display for Entry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.sequence {
            Some(sequence) => write!(f, "{}", sequence),
            None => f.write_str("unknown"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LoaderConfig;
    use crate::markup::parse_str;
    use crate::test_support::sample_tree;

    fn sample_entries() -> Vec<Entry> {
        let tree = sample_tree();
        tree.find_all(Entry::TAG).map(|n| Entry::from_node(n).unwrap()).collect()
    }

    fn entry_from(xml: &str) -> Result<Entry> {
        let tree = parse_str(xml, &LoaderConfig::default())?;
        Entry::from_node(tree.find_all(Entry::TAG).next().unwrap())
    }

    #[test]
    fn test_values_in_source_order() {
        let entries = sample_entries();
        let first = &entries[0];
        assert_eq!(first.sequence, Some(1358280));
        let kanji: Vec<_> = first.kanji.iter().map(|k| k.value.as_str()).collect();
        assert_eq!(kanji, vec!["食べる", "喰べる"]);
        let reading: Vec<_> = first.reading.iter().map(|r| r.value.as_str()).collect();
        assert_eq!(reading, vec!["たべる"]);
        let glosses: Vec<_> = first.sense.iter().flat_map(|s| s.glossary.iter().map(|g| g.value.as_str())).collect();
        assert_eq!(glosses, vec!["to eat", "to live on (e.g. a salary)", "essen"]);
        assert!(entries[1].kanji.is_empty());
    }

    #[test]
    fn test_duplicates_kept() {
        let entry = entry_from(
            "<JMdict><entry><ent_seq>5</ent_seq><sense><gloss>cat</gloss><gloss>cat</gloss></sense></entry></JMdict>",
        )
        .unwrap();
        assert_eq!(entry.sense[0].glossary.len(), 2);
    }

    #[test]
    fn test_missing_sequence() {
        let entry = entry_from("<JMdict><entry><r_ele><reb>ねこ</reb></r_ele></entry></JMdict>").unwrap();
        assert_eq!(entry.sequence, None);
        assert_eq!(entry.to_string(), "unknown");
    }

    #[test]
    fn test_invalid_sequence() {
        let err = entry_from("<JMdict><entry><ent_seq>12a</ent_seq></entry></JMdict>").unwrap_err();
        assert!(err.is_parse_error());
    }

    #[test]
    fn test_nested_failure_propagates() {
        let err = entry_from("<JMdict><entry><k_ele><ke_pri>ichi1</ke_pri></k_ele></entry></JMdict>").unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_matches() {
        let entries = sample_entries();
        let tokyo = &entries[2];
        assert!(tokyo.matches(Some("東京"), None, None).unwrap());
        assert!(tokyo.matches(None, Some("きょう"), None).unwrap());
        assert!(tokyo.matches(None, None, Some("CAPITAL")).unwrap());
        assert!(tokyo.matches(Some("食"), None, Some("capital")).unwrap());
        assert!(!tokyo.matches(Some("食"), Some("たべ"), Some("eat")).unwrap());
        assert!(tokyo.matches(None, None, None).unwrap_err().is_invalid_parameter());
        assert!(tokyo.matches(Some(""), None, None).unwrap_err().is_invalid_parameter());
    }

    #[test]
    fn test_render() {
        let entries = sample_entries();
        let text = entries[2].as_text();
        assert!(text.starts_with("Entry (1440380):\n\t> Kanji(s):\n\t\t- 東京 (info: [], priority: [])\n\n"));
        assert!(text.contains("\t> Reading(s):\n\t\t- とうきょう "));
        assert!(text.contains("\t> Sense(s):\n\t--- 1 ---\n\t\t.kanji:\n"));
        assert!(text.contains("\t\t.dialect:\n\t\t\t- Kansai-ben\n"));
    }
}
