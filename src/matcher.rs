//! Text matching used by the filter layer.
//!
//! [`match_value`] compares a query against a stored value either exactly or by
//! substring containment, optionally folding case on both sides first. Any model
//! type exposing a text value gets the same behavior through [`TextValue`].

/// How a query is compared against a value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchOptions {
    pub exact: bool,
    pub case_sensitive: bool,
}

impl MatchOptions {
    /// Exact, case-sensitive comparison.
    pub const EXACT: MatchOptions = MatchOptions { exact: true, case_sensitive: true };
    /// Substring, case-insensitive comparison used by `Dictionary::filter`.
    pub const CONTAINS_IGNORE_CASE: MatchOptions = MatchOptions { exact: false, case_sensitive: false };
}

impl Default for MatchOptions {
    fn default() -> Self {
        Self::EXACT
    }
}

/// Compares `query` against `value`.
///
/// # Examples
///
/// ```
/// use jmdict::matcher::{match_value, MatchOptions};
///
/// let loose = MatchOptions { exact: false, case_sensitive: false };
/// assert!(match_value("Tokyo", "tokyo station", loose));
/// assert!(!match_value("Tokyo", "tokyo station", MatchOptions { exact: true, ..loose }));
/// ```
pub fn match_value(query: &str, value: &str, options: MatchOptions) -> bool {
    if options.case_sensitive {
        compare(query, value, options.exact)
    } else {
        compare(&query.to_lowercase(), &value.to_lowercase(), options.exact)
    }
}

fn compare(query: &str, value: &str, exact: bool) -> bool {
    if exact {
        query == value
    } else {
        value.contains(query)
    }
}

/// A model element carrying one text value.
pub trait TextValue {
    fn value(&self) -> &str;

    fn match_value(&self, query: &str, options: MatchOptions) -> bool {
        match_value(query, self.value(), options)
    }
}
