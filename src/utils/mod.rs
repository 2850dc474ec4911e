// Utility functions and helpers
//
// This module provides file and URL reading, text decoding and progress
// reporting used by the loaders.

pub mod io_utils;
pub mod progress_report;
pub mod url_utils;

pub use io_utils::{bytes_from_file, bytes_from_file_url, decode_document, get_encoding_object_by_label};
pub use progress_report::{ProgressState, ProgressReportFn};
