//! Loaded JMdict document with leaf-level searches.
//!
//! [`JmdictEngine`] keeps the parsed markup tree next to the built
//! [`Dictionary`]. Searches run a regular expression against the raw text of
//! one kind of leaf (`ent_seq`, `keb`, `reb`, `gloss`), climb from every hit to
//! its owning `<entry>`, and return those entries as a new [`Dictionary`].
//!
//! # Examples
//!
//! ```no_run
//! use jmdict::{EntryFilter, JmdictEngine};
//!
//! # fn main() -> jmdict::Result<()> {
//! let engine = JmdictEngine::from_path("JMdict_e.xml")?;
//! let eat = engine.search_glossary("^to eat$")?;
//! let common = eat.filter(&EntryFilter::new().kanji("食"))?;
//! print!("{}", common.as_text(None, None)?);
//! # Ok(())
//! # }
//! ```

use std::collections::{HashMap, HashSet};
use std::fmt;
use std::path::Path;

use log::debug;
use regex::Regex;
use url::Url;

use crate::config::LoaderConfig;
use crate::dictionary::{Dictionary, EntryFilter};
use crate::markup::{self, MarkupTree, NodeId};
use crate::model::Entry;
use crate::utils::progress_report::ProgressReportFn;
use crate::utils::url_utils;
use crate::{JmdictError, Result};

const SEQUENCE_LEAF: &str = Entry::SEQUENCE_TAG;
const KANJI_LEAF: &str = "keb";
const READING_LEAF: &str = "reb";
const GLOSS_LEAF: &str = "gloss";

pub struct JmdictEngine {
    /// Where the document came from: a path, a URL, or "<memory>"
    pub source: String,
    tree: MarkupTree,
    dictionary: Dictionary,
    /// `<entry>` node id to its position in `dictionary`
    entry_index: HashMap<NodeId, usize>,
}

impl JmdictEngine {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::from_path_with_config(path, &LoaderConfig::default())
    }

    pub fn from_path_with_config<P: AsRef<Path>>(path: P, config: &LoaderConfig) -> Result<Self> {
        Self::with_progress(path, config, None)
    }

    /// Loads the document at `path`, reporting progress while entries are built.
    ///
    /// # Errors
    ///
    /// Returns `UserInterrupted` if `reporter` cancels the load.
    pub fn with_progress<P: AsRef<Path>>(
        path: P,
        config: &LoaderConfig,
        reporter: Option<ProgressReportFn>,
    ) -> Result<Self> {
        let path = path.as_ref();
        let tree = markup::load_path(path, config)?;
        Self::from_tree(path.display().to_string(), tree, config, reporter)
    }

    /// Loads the document behind a `file://` URL.
    pub fn from_url(url: &Url, config: &LoaderConfig) -> Result<Self> {
        let tree = markup::load_url(url, config)?;
        let source = url_utils::get_decoded_path_str(url)?;
        Self::from_tree(source, tree, config, None)
    }

    pub fn from_xml_str(xml: &str) -> Result<Self> {
        Self::from_xml_str_with_config(xml, &LoaderConfig::default())
    }

    pub fn from_xml_str_with_config(xml: &str, config: &LoaderConfig) -> Result<Self> {
        let tree = markup::parse_str(xml, config)?;
        Self::from_tree("<memory>".to_string(), tree, config, None)
    }

    fn from_tree(
        source: String,
        tree: MarkupTree,
        config: &LoaderConfig,
        reporter: Option<ProgressReportFn>,
    ) -> Result<Self> {
        let dictionary = Dictionary::from_tree_with_progress(&tree, reporter, config.report_interval_percent)?;
        let entry_index = match tree.root() {
            Some(root) => root
                .children_named(Entry::TAG)
                .enumerate()
                .map(|(i, node)| (node.id(), i))
                .collect(),
            None => HashMap::new(),
        };
        Ok(Self {
            source,
            tree,
            dictionary,
            entry_index,
        })
    }

    /// Every entry of the document.
    pub fn all(&self) -> &Dictionary {
        &self.dictionary
    }

    pub fn count(&self) -> usize {
        self.dictionary.count()
    }

    pub fn tree(&self) -> &MarkupTree {
        &self.tree
    }

    /// Entries whose sequence number contains `sequence` as a substring of its
    /// decimal form, so `77` also finds `1077140`.
    pub fn search_sequence(&self, sequence: u64) -> Result<Dictionary> {
        let pattern = regex::escape(&sequence.to_string());
        self.search_leaves(SEQUENCE_LEAF, &pattern)
    }

    /// Entries with a `<keb>` matching the regular expression `pattern`.
    pub fn search_kanji(&self, pattern: &str) -> Result<Dictionary> {
        self.search_leaves(KANJI_LEAF, pattern)
    }

    /// Entries with a `<reb>` matching the regular expression `pattern`.
    pub fn search_reading(&self, pattern: &str) -> Result<Dictionary> {
        self.search_leaves(READING_LEAF, pattern)
    }

    /// Entries with a `<gloss>` matching the regular expression `pattern`.
    pub fn search_glossary(&self, pattern: &str) -> Result<Dictionary> {
        self.search_leaves(GLOSS_LEAF, pattern)
    }

    pub fn filter(&self, filter: &EntryFilter) -> Result<Dictionary> {
        self.dictionary.filter(filter)
    }

    pub fn as_text(&self, start: Option<usize>, end: Option<usize>) -> Result<String> {
        self.dictionary.as_text(start, end)
    }

    fn search_leaves(&self, leaf: &str, pattern: &str) -> Result<Dictionary> {
        let re = Regex::new(pattern)?;
        let mut seen = HashSet::new();
        let mut hits = 0usize;
        let mut entries = Vec::new();
        for node in self.tree.find_all(leaf).filter(|node| re.is_match(node.text())) {
            hits += 1;
            let Some(owner) = node.find_parent(Entry::TAG) else {
                continue;
            };
            let Some(&index) = self.entry_index.get(&owner.id()) else {
                continue;
            };
            if seen.insert(index) {
                let entry = self
                    .dictionary
                    .get(index)
                    .ok_or_else(|| JmdictError::not_found(Entry::TAG, format!("dictionary index {}", index)))?;
                entries.push(entry.clone());
            }
        }
        debug!("Search <{}> /{}/: {} leaf hits, {} entries", leaf, pattern, hits, entries.len());
        Ok(Dictionary::new(entries))
    }
}

impl fmt::Display for JmdictEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "JmdictEngine (source: {})", self.source)
    }
}

impl fmt::Debug for JmdictEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JmdictEngine")
            .field("source", &self.source)
            .field("entries", &self.dictionary.count())
            .field("nodes", &self.tree.len())
            .finish()
    }
}
