//! File URL helpers for locating dictionary documents.
//!
//! Dictionaries may be addressed by `file://` URLs (e.g. when handed over from a
//! desktop shell). These helpers turn such URLs into local paths,
//! decoding percent-encoded characters.
//!
//! # Examples
//!
//! ```
//! use jmdict::utils::url_utils;
//! use url::Url;
//!
//! let url = Url::parse("file:///dict/JMdict%20e.xml")?;
//! assert_eq!(url_utils::get_decoded_path_str(&url)?, "/dict/JMdict e.xml");
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use std::path::PathBuf;

use percent_encoding::percent_decode_str;
use url::Url;

use crate::utils::io_utils::fix_windows_path;
use crate::Result;

pub fn get_decoded_path(url: &Url) -> Result<PathBuf> {
    let path_str = get_decoded_path_str(url)?;
    Ok(PathBuf::from(path_str))
}

pub fn get_decoded_path_str(url: &Url) -> Result<String> {
    let path = fix_windows_path(url.path());
    let decoded_path = percent_decode_str(&path).decode_utf8()?;
    Ok(decoded_path.to_string())
}
