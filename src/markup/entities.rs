//! Entity declarations from the document's internal DTD subset.
//!
//! JMdict declares its annotation vocabulary as general entities, e.g.
//! `<!ENTITY n "noun (common) (futsuumeishi)">`, and the body refers to them as
//! `<pos>&n;</pos>`. [`EntityTable`] collects those declarations and resolves
//! references together with the predefined XML entities and character references.

use std::collections::HashMap;

use once_cell::sync::Lazy;
use regex::Regex;

static ENTITY_DECL: Lazy<Option<Regex>> = Lazy::new(|| {
    Regex::new(r#"<!ENTITY\s+([^\s%"']+)\s+(?:"([^"]*)"|'([^']*)')\s*>"#).ok()
});

/// Name to replacement text mapping for general entities.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EntityTable {
    entities: HashMap<String, String>,
}

impl EntityTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Collects every `<!ENTITY name "value">` declaration in a DOCTYPE body.
    /// Parameter entities (`<!ENTITY % ...>`) are skipped. The first declaration
    /// of a name wins.
    ///
    /// # Examples
    ///
    /// ```
    /// use jmdict::markup::EntityTable;
    ///
    /// let table = EntityTable::from_doctype(r#"JMdict [ <!ENTITY n "noun (common) (futsuumeishi)"> ]"#);
    /// assert_eq!(table.get("n"), Some("noun (common) (futsuumeishi)"));
    /// ```
    pub fn from_doctype(doctype: &str) -> Self {
        let mut table = Self::new();
        if let Some(pattern) = ENTITY_DECL.as_ref() {
            for caps in pattern.captures_iter(doctype) {
                let value = caps.get(2).or_else(|| caps.get(3)).map_or("", |m| m.as_str());
                table.insert(&caps[1], value);
            }
        }
        table
    }

    pub fn insert(&mut self, name: &str, value: &str) {
        self.entities.entry(name.to_string()).or_insert_with(|| value.to_string());
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.entities.get(name).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// Resolves the reference `&name;` (given without `&` and `;`).
    ///
    /// Character references and predefined entities are always resolved;
    /// declared entities only when `expand_declared` is set.
    pub fn resolve(&self, name: &str, expand_declared: bool) -> Option<String> {
        if let Some(code) = name.strip_prefix('#') {
            return resolve_char_ref(code).map(String::from);
        }
        if let Some(predefined) = resolve_predefined_entity(name) {
            return Some(predefined.to_string());
        }
        if expand_declared {
            return self.get(name).map(str::to_string);
        }
        None
    }

    /// Replaces every resolvable reference in `raw`. Unresolvable references are
    /// kept verbatim and reported through `on_unknown`.
    pub fn expand_refs<F>(&self, raw: &str, expand_declared: bool, mut on_unknown: F) -> String
    where
        F: FnMut(&str),
    {
        let mut result = String::with_capacity(raw.len());
        let mut rest = raw;
        while let Some(amp) = rest.find('&') {
            result.push_str(&rest[..amp]);
            let after = &rest[amp + 1..];
            match after.find(';') {
                Some(semi) => {
                    let name = &after[..semi];
                    match self.resolve(name, expand_declared) {
                        Some(text) => result.push_str(&text),
                        None => {
                            on_unknown(name);
                            result.push('&');
                            result.push_str(name);
                            result.push(';');
                        }
                    }
                    rest = &after[semi + 1..];
                }
                None => {
                    result.push('&');
                    rest = after;
                }
            }
        }
        result.push_str(rest);
        result
    }
}

fn resolve_predefined_entity(name: &str) -> Option<&'static str> {
    match name {
        "lt" => Some("<"),
        "gt" => Some(">"),
        "amp" => Some("&"),
        "apos" => Some("'"),
        "quot" => Some("\""),
        _ => None,
    }
}

fn resolve_char_ref(code: &str) -> Option<char> {
    let value = match code.strip_prefix('x').or_else(|| code.strip_prefix('X')) {
        Some(hex) => u32::from_str_radix(hex, 16).ok()?,
        None => code.parse::<u32>().ok()?,
    };
    char::from_u32(value)
}
