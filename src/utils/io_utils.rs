//! File reading and text decoding helpers.
//!
//! JMdict releases are UTF-8, but copies re-saved by other tools may carry a
//! UTF-16 byte order mark. [`decode_document`] sniffs the BOM (or honours an
//! explicit encoding label) and hands back UTF-8 text for the XML reader.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use encoding_rs::Encoding;
use log::debug;
use url::Url;

use crate::utils::url_utils;
use crate::{JmdictError, Result};

/// Fixes Windows file paths by removing the leading slash.
///
/// Under Windows, file URLs look like "file:///C:/Users/test/JMdict_e.xml",
/// so the leading "/" has to go to get a valid Windows path.
pub fn fix_windows_path(path: &str) -> String {
    #[cfg(target_os = "windows")]
    {
        let chars: Vec<char> = path.chars().take(3).collect();
        if chars.len() == 3 && chars[0] == '/' && chars[1].is_alphabetic() && chars[2] == ':' {
            return path[1..].to_string();
        }
    }
    path.to_string()
}

/// Reads all bytes from a file path.
pub fn bytes_from_file<P: AsRef<Path>>(path: P) -> Result<Vec<u8>> {
    let file = File::open(path)?;
    let mut reader = BufReader::new(file);
    let mut buffer = Vec::new();
    reader.read_to_end(&mut buffer)?;
    Ok(buffer)
}

/// Reads all bytes behind a `file://` URL.
///
/// # Errors
///
/// Returns an error if the URL scheme is not "file" or the file cannot be read.
pub fn bytes_from_file_url(url: &Url) -> Result<Vec<u8>> {
    if url.scheme() != "file" {
        return Err(JmdictError::invalid_parameter(format!(
            "Unsupported scheme: {}",
            url.scheme()
        )));
    }
    bytes_from_file(url_utils::get_decoded_path(url)?)
}

/// Gets an encoding object by its label string.
///
/// # Errors
///
/// Returns an error if the encoding label is not recognized.
pub fn get_encoding_object_by_label(label: &str) -> Result<&'static Encoding> {
    let encoding = label.to_lowercase();
    let label = match encoding.as_str() {
        "utf-16" => "utf-16le",
        _ => encoding.as_str(),
    };
    Encoding::for_label(label.as_bytes())
        .ok_or_else(|| JmdictError::invalid_parameter(format!("Invalid encoding: {}", encoding)))
}

/// Decodes a whole document to UTF-8.
///
/// A byte order mark always wins; otherwise `encoding_label` is used, and an
/// empty label means UTF-8.
///
/// # Errors
///
/// Malformed input is never replaced: invalid UTF-8 is a `ParserError`, and
/// malformed text in any other encoding is `InvalidDataFormat`.
///
/// # Examples
///
/// ```
/// use jmdict::utils::io_utils::decode_document;
///
/// let utf16: Vec<u8> = [0xFF, 0xFE].into_iter()
///     .chain("<JMdict/>".encode_utf16().flat_map(|c| c.to_le_bytes()))
///     .collect();
/// assert_eq!(decode_document(&utf16, "").unwrap(), "<JMdict/>");
/// ```
pub fn decode_document(bytes: &[u8], encoding_label: &str) -> Result<String> {
    let (encoding_obj, body) = match Encoding::for_bom(bytes) {
        Some((encoding_obj, bom_len)) => (encoding_obj, &bytes[bom_len..]),
        None if encoding_label.is_empty() => (encoding_rs::UTF_8, bytes),
        None => (get_encoding_object_by_label(encoding_label)?, bytes),
    };
    if encoding_obj == encoding_rs::UTF_8 {
        return Ok(std::str::from_utf8(body)?.to_string());
    }
    debug!("Decoding document as {}", encoding_obj.name());
    let (decoded, had_errors) = encoding_obj.decode_without_bom_handling(body);
    if had_errors {
        return Err(JmdictError::invalid_data_format(format!("Malformed {} text", encoding_obj.name())));
    }
    Ok(decoded.into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_utf8() {
        let bom: Vec<u8> = [0xEF, 0xBB, 0xBF].into_iter().chain("<JMdict>食</JMdict>".bytes()).collect();
        assert_eq!(decode_document(&bom, "").unwrap(), "<JMdict>食</JMdict>");
        assert_eq!(decode_document("たべる".as_bytes(), "").unwrap(), "たべる");
    }

    #[test]
    fn test_decode_invalid_utf8() {
        let err = decode_document(&[0x3C, 0xFF, 0xFE, 0xFD], "").unwrap_err();
        assert!(err.is_parse_error());
    }

    #[test]
    fn test_decode_with_label() {
        let bytes: Vec<u8> = "<a/>".encode_utf16().flat_map(|c| c.to_le_bytes()).collect();
        assert_eq!(decode_document(&bytes, "utf-16").unwrap(), "<a/>");
        assert!(decode_document(b"<a/>", "no-such-encoding").unwrap_err().is_invalid_parameter());
    }

    #[test]
    fn test_decode_malformed_utf16() {
        let units: Vec<u16> = "<JMdict>"
            .encode_utf16()
            .chain([0xD800])
            .chain("</JMdict>".encode_utf16())
            .collect();
        let bytes: Vec<u8> = [0xFF, 0xFE].into_iter().chain(units.iter().flat_map(|c| c.to_le_bytes())).collect();
        let err = decode_document(&bytes, "").unwrap_err();
        assert!(err.is_parse_error());
        let without_bom = &bytes[2..];
        assert!(decode_document(without_bom, "utf-16le").unwrap_err().is_parse_error());
    }

    #[test]
    fn test_file_url_scheme() {
        let url = Url::parse("https://example.com/JMdict_e.xml").unwrap();
        assert!(bytes_from_file_url(&url).unwrap_err().is_invalid_parameter());
    }
}
