//! The entry container and its filter/render operations.
//!
//! A [`Dictionary`] is both the fully loaded document and every result set
//! derived from it, so filters chain:
//!
//! ```
//! use jmdict::{Dictionary, EntryFilter};
//! # use jmdict::{config::LoaderConfig, markup::parse_str};
//!
//! # fn main() -> jmdict::Result<()> {
//! # let xml = "<JMdict><entry><ent_seq>1</ent_seq><r_ele><reb>ねこ</reb></r_ele>\
//! #            <sense><gloss>cat</gloss></sense></entry></JMdict>";
//! # let tree = parse_str(xml, &LoaderConfig::default())?;
//! let dictionary = Dictionary::from_tree(&tree)?;
//! let cats = dictionary
//!     .filter(&EntryFilter::new().glossary("cat"))?
//!     .filter(&EntryFilter::new().reading("ね").limit(10))?;
//! assert_eq!(cats.count(), 1);
//! # Ok(())
//! # }
//! ```

use std::fmt;
use std::path::Path;

use log::info;
use serde::Serialize;

use crate::config::LoaderConfig;
use crate::markup::{self, MarkupTree, NodeRef};
use crate::model::{Entry, Render};
use crate::utils::progress_report::{ProgressReportFn, ProgressState};
use crate::{JmdictError, Result};

/// Ordered, read-only collection of entries.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Dictionary {
    entries: Vec<Entry>,
}

/// Criteria for [`Dictionary::filter`].
///
/// An entry passes when any given criterion matches (substring,
/// case-insensitive). Empty strings count as not given.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EntryFilter {
    pub kanji: Option<String>,
    pub reading: Option<String>,
    pub glossary: Option<String>,
    /// Negative or `None` is unlimited; otherwise at most `limit + 1` entries are kept.
    pub limit: Option<i64>,
}

impl EntryFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn kanji<S: Into<String>>(mut self, kanji: S) -> Self {
        self.kanji = Some(kanji.into());
        self
    }

    pub fn reading<S: Into<String>>(mut self, reading: S) -> Self {
        self.reading = Some(reading.into());
        self
    }

    pub fn glossary<S: Into<String>>(mut self, glossary: S) -> Self {
        self.glossary = Some(glossary.into());
        self
    }

    pub fn limit(mut self, limit: i64) -> Self {
        self.limit = Some(limit);
        self
    }

    fn max_results(&self) -> Option<usize> {
        match self.limit {
            Some(limit) if limit >= 0 => Some(limit as usize + 1),
            _ => None,
        }
    }
}

impl Dictionary {
    pub const TAG: &'static str = "JMdict";

    pub fn new(entries: Vec<Entry>) -> Self {
        Self { entries }
    }

    /// Builds the dictionary from its root node. The tag check ignores ASCII case.
    pub fn from_node(node: NodeRef<'_>) -> Result<Self> {
        Self::from_node_with_progress(node, None, 0)
    }

    fn from_node_with_progress(
        node: NodeRef<'_>,
        reporter: Option<ProgressReportFn>,
        report_interval_percent: u64,
    ) -> Result<Self> {
        if !node.tag().eq_ignore_ascii_case(Self::TAG) {
            return Err(JmdictError::tag_mismatch(Self::TAG, node.tag()));
        }
        let nodes: Vec<NodeRef<'_>> = node.children_named(Entry::TAG).collect();
        let mut progress = ProgressState::new("building", nodes.len() as u64, report_interval_percent, reporter);
        let mut entries = Vec::with_capacity(nodes.len());
        for (i, entry_node) in nodes.into_iter().enumerate() {
            entries.push(Entry::from_node(entry_node)?);
            if progress.report(i as u64) {
                return Err(JmdictError::user_interrupted());
            }
        }
        Ok(Self::new(entries))
    }

    pub fn from_tree(tree: &MarkupTree) -> Result<Self> {
        Self::from_tree_with_progress(tree, None, 0)
    }

    /// Builds the dictionary, calling `reporter` every `report_interval_percent`
    /// of the entries. A reporter returning `true` aborts with `UserInterrupted`.
    pub fn from_tree_with_progress(
        tree: &MarkupTree,
        reporter: Option<ProgressReportFn>,
        report_interval_percent: u64,
    ) -> Result<Self> {
        let root = tree
            .root()
            .ok_or_else(|| JmdictError::not_found(Self::TAG, "document"))?;
        let dictionary = Self::from_node_with_progress(root, reporter, report_interval_percent)?;
        info!("Built dictionary with {} entries", dictionary.count());
        Ok(dictionary)
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::from_path_with_config(path, &LoaderConfig::default())
    }

    pub fn from_path_with_config<P: AsRef<Path>>(path: P, config: &LoaderConfig) -> Result<Self> {
        let tree = markup::load_path(path, config)?;
        Self::from_tree_with_progress(&tree, None, config.report_interval_percent)
    }

    /// All entries in document order.
    pub fn all(&self) -> &[Entry] {
        &self.entries
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Entry> {
        self.entries.iter()
    }

    pub fn get(&self, index: usize) -> Option<&Entry> {
        self.entries.get(index)
    }

    pub fn count(&self) -> usize {
        self.entries.len()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries matching any of the filter's criteria, in order.
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` when kanji, reading and glossary are all omitted.
    pub fn filter(&self, filter: &EntryFilter) -> Result<Dictionary> {
        let kanji = filter.kanji.as_deref().filter(|q| !q.is_empty());
        let reading = filter.reading.as_deref().filter(|q| !q.is_empty());
        let glossary = filter.glossary.as_deref().filter(|q| !q.is_empty());
        if kanji.is_none() && reading.is_none() && glossary.is_none() {
            return Err(JmdictError::invalid_parameter(
                "At least one of kanji, reading or glossary is required",
            ));
        }

        let max_results = filter.max_results();
        let mut results = Vec::new();
        for entry in &self.entries {
            if max_results.is_some_and(|max| results.len() >= max) {
                break;
            }
            if entry.matches(kanji, reading, glossary)? {
                results.push(entry.clone());
            }
        }
        Ok(Dictionary::new(results))
    }

    /// Renders entries `start..end` (end exclusive), all of them by default.
    ///
    /// # Errors
    ///
    /// Returns `IndexOutOfRange` when `start >= count()` or `end > count()`.
    pub fn as_text(&self, start: Option<usize>, end: Option<usize>) -> Result<String> {
        let len = self.entries.len();
        if start.is_some_and(|s| s >= len) || end.is_some_and(|e| e > len) {
            return Err(JmdictError::index_out_of_range(start, end, len));
        }
        let start = start.unwrap_or(0);
        let end = end.unwrap_or(len);
        if start >= end {
            return Ok(String::new());
        }
        Ok(self.entries[start..end].iter().map(Render::as_text).collect())
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(&self.entries)?)
    }
}

impl Render for Dictionary {
    fn as_text(&self) -> String {
        self.entries.iter().map(Render::as_text).collect()
    }
}

impl fmt::Display for Dictionary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Dictionary ({} entries)", self.entries.len())
    }
}

impl<'a> IntoIterator for &'a Dictionary {
    type Item = &'a Entry;
    type IntoIter = std::slice::Iter<'a, Entry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

impl From<Vec<Entry>> for Dictionary {
    fn from(entries: Vec<Entry>) -> Self {
        Self::new(entries)
    }
}
