//! Reads a JMdict document into a [`MarkupTree`].
//!
//! The document is decoded to UTF-8 first (see [`crate::utils::io_utils`]), then
//! walked once with the quick-xml event reader. DOCTYPE entity declarations are
//! collected before the first element and used to expand `&name;` references in
//! text and attribute values.
//!
//! # Examples
//!
//! ```
//! use jmdict::config::LoaderConfig;
//! use jmdict::markup::parse_str;
//!
//! # fn main() -> jmdict::Result<()> {
//! let xml = "<JMdict><entry><ent_seq>1000</ent_seq></entry></JMdict>";
//! let tree = parse_str(xml, &LoaderConfig::default())?;
//! let seq = tree.find_all("ent_seq").next().unwrap();
//! assert_eq!(seq.text(), "1000");
//! assert_eq!(seq.find_parent("entry").unwrap().tag(), "entry");
//! # Ok(())
//! # }
//! ```

use std::path::Path;

use indexmap::IndexMap;
use log::*;
use quick_xml::events::{BytesStart, Event};
use url::Url;

use super::entities::EntityTable;
use super::tree::{MarkupTree, NodeId};
use crate::config::LoaderConfig;
use crate::utils::io_utils::{bytes_from_file, bytes_from_file_url, decode_document};
use crate::{JmdictError, Result};

struct TreeBuilder<'c> {
    tree: MarkupTree,
    stack: Vec<NodeId>,
    entities: EntityTable,
    config: &'c LoaderConfig,
}

impl<'c> TreeBuilder<'c> {
    fn new(config: &'c LoaderConfig) -> Self {
        Self {
            tree: MarkupTree::new(),
            stack: Vec::new(),
            entities: EntityTable::new(),
            config,
        }
    }

    fn open(&mut self, e: &BytesStart) -> Result<NodeId> {
        if self.stack.is_empty() && self.tree.root().is_some() {
            return Err(JmdictError::invalid_data_format("More than one root element in XML"));
        }
        let tag = std::str::from_utf8(e.name().as_ref())?.to_string();
        let mut attrs = IndexMap::new();
        for attr_result in e.attributes() {
            let attr = attr_result
                .map_err(|e| JmdictError::invalid_data_format(format!("Failed to parse XML attributes: {}", e)))?;
            let key = std::str::from_utf8(attr.key.as_ref())?.to_string();
            let raw_value = std::str::from_utf8(attr.value.as_ref())?;
            let value = self.expand(raw_value)?;
            attrs.insert(key, value);
        }
        let id = self.tree.push_node(tag, attrs, self.stack.last().copied());
        self.stack.push(id);
        Ok(id)
    }

    fn close(&mut self, name: &[u8]) -> Result<()> {
        let id = self.stack.pop().ok_or_else(|| {
            JmdictError::invalid_data_format(format!("Unexpected end tag </{}>", String::from_utf8_lossy(name)))
        })?;
        let open_tag = self.tree.node(id).map(|node| node.tag()).unwrap_or_default();
        if open_tag.as_bytes() != name {
            return Err(JmdictError::invalid_data_format(format!(
                "End tag mismatch: expected </{}>, found </{}>",
                open_tag,
                String::from_utf8_lossy(name)
            )));
        }
        Ok(())
    }

    fn text(&mut self, text: &str) {
        // Text outside the document element is whitespace or junk
        if let Some(&id) = self.stack.last() {
            self.tree.push_text(id, text);
        }
    }

    fn reference(&mut self, name: &str) -> Result<()> {
        match self.entities.resolve(name, self.config.expand_entities) {
            Some(text) => {
                self.text(&text);
                Ok(())
            }
            None => {
                self.unknown_entity(name)?;
                self.text(&format!("&{};", name));
                Ok(())
            }
        }
    }

    fn expand(&self, raw: &str) -> Result<String> {
        if !raw.contains('&') {
            return Ok(raw.to_string());
        }
        let mut unknown = Vec::new();
        let value = self.entities.expand_refs(raw, self.config.expand_entities, |name| unknown.push(name.to_string()));
        for name in &unknown {
            self.unknown_entity(name)?;
        }
        Ok(value)
    }

    fn unknown_entity(&self, name: &str) -> Result<()> {
        if self.entities.get(name).is_some() {
            // Declared but left unexpanded on purpose
            return Ok(());
        }
        if self.config.strict_entities {
            return Err(JmdictError::invalid_data_format(format!("Undefined entity reference &{};", name)));
        }
        warn!("Undefined entity reference &{}; kept verbatim", name);
        Ok(())
    }

    fn finish(self) -> Result<MarkupTree> {
        if let Some(&open) = self.stack.last() {
            let tag = self.tree.node(open).map(|node| node.tag()).unwrap_or_default();
            return Err(JmdictError::invalid_data_format(format!("Unclosed element <{}> at end of document", tag)));
        }
        let root_tag = &self.config.root_tag;
        match self.tree.root() {
            Some(root) if root.tag().eq_ignore_ascii_case(root_tag) => {}
            Some(root) => {
                return Err(JmdictError::not_found(root_tag.as_str(), format!("document (root element is <{}>)", root.tag())));
            }
            None => return Err(JmdictError::not_found(root_tag.as_str(), "empty document")),
        }
        Ok(self.tree)
    }
}

/// Parses an XML document held in memory.
///
/// # Errors
///
/// - [`JmdictError::NotFound`] if the document element is missing or is not `config.root_tag`
/// - [`JmdictError::ParserError`] / [`JmdictError::InvalidDataFormat`] for malformed markup
pub fn parse_str(xml: &str, config: &LoaderConfig) -> Result<MarkupTree> {
    let mut builder = TreeBuilder::new(config);
    let mut reader = quick_xml::Reader::from_str(xml);

    loop {
        let event = reader.read_event()?;
        match event {
            Event::DocType(e) => {
                let doctype = std::str::from_utf8(&e)?;
                builder.entities = EntityTable::from_doctype(doctype);
                debug!("Collected {} entity declarations from DOCTYPE", builder.entities.len());
            }
            Event::Start(e) => {
                builder.open(&e)?;
            }
            Event::Empty(e) => {
                builder.open(&e)?;
                builder.close(e.name().as_ref())?;
            }
            Event::End(e) => {
                builder.close(e.name().as_ref())?;
            }
            Event::Text(e) => {
                let raw = std::str::from_utf8(&e)?;
                let text = builder.expand(raw)?;
                builder.text(&text);
            }
            Event::CData(e) => {
                let text = std::str::from_utf8(&e)?;
                builder.text(text);
            }
            Event::GeneralRef(e) => {
                let name = std::str::from_utf8(&e)?;
                builder.reference(name)?;
            }
            Event::Eof => break,
            _ => continue,
        }
    }
    builder.finish()
}

/// Decodes raw document bytes and parses them.
pub fn parse_bytes(bytes: &[u8], config: &LoaderConfig) -> Result<MarkupTree> {
    let xml = decode_document(bytes, &config.encoding_label)?;
    parse_str(&xml, config)
}

/// Reads and parses the document at `path`.
pub fn load_path<P: AsRef<Path>>(path: P, config: &LoaderConfig) -> Result<MarkupTree> {
    let path = path.as_ref();
    info!("Opening JMdict document: {}", path.display());
    let bytes = bytes_from_file(path)?;
    parse_bytes(&bytes, config)
}

/// Reads and parses the document behind a `file://` URL.
pub fn load_url(url: &Url, config: &LoaderConfig) -> Result<MarkupTree> {
    info!("Opening JMdict document: {}", url);
    let bytes = bytes_from_file_url(url)?;
    parse_bytes(&bytes, config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::SAMPLE_JMDICT;

    fn parse(xml: &str) -> Result<MarkupTree> {
        parse_str(xml, &LoaderConfig::default())
    }

    #[test]
    fn test_parse_sample() {
        let tree = parse(SAMPLE_JMDICT).unwrap();
        assert_eq!(tree.root().unwrap().tag(), "JMdict");
        assert_eq!(tree.find_all("entry").count(), 3);
        let kebs: Vec<_> = tree.find_all("keb").map(|n| n.text()).collect();
        assert_eq!(kebs, vec!["食べる", "喰べる", "東京"]);
    }

    #[test]
    fn test_entities_expanded() {
        let tree = parse(SAMPLE_JMDICT).unwrap();
        let pos = tree.find_all("pos").next().unwrap();
        assert_eq!(pos.text(), "Ichidan verb");
        let gloss = tree.find_all("gloss").find(|g| g.text().starts_with("side job")).unwrap();
        assert_eq!(gloss.text(), "side job & \"baito\"");
    }

    #[test]
    fn test_entities_kept_when_disabled() {
        let config = LoaderConfig { expand_entities: false, ..LoaderConfig::default() };
        let tree = parse_str(SAMPLE_JMDICT, &config).unwrap();
        let pos = tree.find_all("pos").next().unwrap();
        assert_eq!(pos.text(), "&v1;");
    }

    #[test]
    fn test_undefined_entity() {
        let xml = "<JMdict><entry><sense><pos>&nope;</pos></sense></entry></JMdict>";
        let tree = parse(xml).unwrap();
        assert_eq!(tree.find_all("pos").next().unwrap().text(), "&nope;");

        let strict = LoaderConfig { strict_entities: true, ..LoaderConfig::default() };
        assert!(parse_str(xml, &strict).unwrap_err().is_parse_error());
    }

    #[test]
    fn test_attributes_and_empty_elements() {
        let tree = parse(SAMPLE_JMDICT).unwrap();
        let lsource = tree.find_all("lsource").next().unwrap();
        assert_eq!(lsource.attr("xml:lang"), Some("ger"));
        assert_eq!(lsource.attr("ls_wasei"), Some("y"));
        let nokanji = tree.find_all("re_nokanji").next().unwrap();
        assert_eq!(nokanji.text(), "");
        assert!(nokanji.children().next().is_none());
    }

    #[test]
    fn test_missing_root() {
        let err = parse("<dictionary><entry/></dictionary>").unwrap_err();
        assert!(err.is_not_found());
        let err = parse("   ").unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_root_tag_case_insensitive() {
        let tree = parse("<jmdict><entry/></jmdict>").unwrap();
        assert_eq!(tree.find_all("entry").count(), 1);
    }

    #[test]
    fn test_malformed_markup() {
        assert!(parse("<JMdict><entry></sense></JMdict>").unwrap_err().is_parse_error());
        assert!(parse("<JMdict><entry>").unwrap_err().is_parse_error());
    }

    #[test]
    fn test_load_path() {
        let path = std::env::temp_dir().join(format!("jmdict-loader-{}.xml", std::process::id()));
        std::fs::write(&path, SAMPLE_JMDICT).unwrap();
        let tree = load_path(&path, &LoaderConfig::default());
        std::fs::remove_file(&path).unwrap();
        assert_eq!(tree.unwrap().find_all("entry").count(), 3);

        let err = load_path("/nonexistent/JMdict_e.xml", &LoaderConfig::default()).unwrap_err();
        assert!(err.is_io());
    }
}
