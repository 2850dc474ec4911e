//! # jmdict - JMdict XML Reader
//!
//! This crate reads the JMdict Japanese-multilingual dictionary, distributed as
//! one large XML document, into a typed in-memory model and offers simple
//! lookups over it.
//!
//! ## Features
//!
//! - **Loading**: parse a JMdict file, including the entity declarations of its DOCTYPE
//! - **Typed model**: entries, kanji and reading forms, senses, glosses and loanword sources
//! - **Searches**: by sequence number, kanji, reading or gloss, with regular expressions
//! - **Filtering**: chainable case-insensitive filters with an optional limit
//! - **Rendering**: detailed text reports and JSON export
//!
//! ## Quick Start
//!
//! ```no_run
//! use jmdict::{EntryFilter, JmdictEngine};
//!
//! # fn main() -> jmdict::Result<()> {
//! let engine = JmdictEngine::from_path("JMdict_e.xml")?;
//! println!("{} entries", engine.count());
//!
//! let results = engine.search_reading("^たべる$")?;
//! let verbs = results.filter(&EntryFilter::new().glossary("eat").limit(4))?;
//! print!("{}", verbs.as_text(None, None)?);
//! # Ok(())
//! # }
//! ```
//!
//! ## Architecture
//!
//! - [`markup`]: XML document to generic node tree
//! - [`model`]: typed JMdict elements built from tree nodes
//! - [`dictionary`]: the entry container with filtering and rendering
//! - [`engine`]: a loaded document with leaf searches
//! - [`matcher`]: the text match predicate shared by filters
//! - [`config`], [`utils`]: loader configuration, file and URL helpers, progress reporting
//!
//! ## Error Handling
//!
//! All fallible operations return a [`Result<T>`] type, where errors are represented by
//! [`JmdictError`]. The crate uses the `snafu` library for error handling with
//! context and backtraces.
//!
//! ```
//! use jmdict::{Dictionary, EntryFilter};
//!
//! let err = Dictionary::default().filter(&EntryFilter::new()).unwrap_err();
//! assert!(err.is_invalid_parameter());
//! ```

pub mod config;
pub mod dictionary;
pub mod engine;
pub mod error;
pub mod markup;
pub mod matcher;
pub mod model;
pub mod utils;

#[cfg(test)]
mod test_support;

pub use config::LoaderConfig;
pub use dictionary::{Dictionary, EntryFilter};
pub use engine::JmdictEngine;
pub use matcher::{match_value, MatchOptions, TextValue};
pub use model::{build_element, Element, Entry, Gloss, KanjiForm, LanguageSource, ReadingForm, Render, Sense};

// Re-export error types for convenience
pub use error::{snafu, JmdictError, Result};
