//! Load progress callbacks.
//!
//! Building the model of a full JMdict release (about 200k entries) takes a
//! noticeable moment. [`Dictionary::from_tree_with_progress`] and
//! [`JmdictEngine::with_progress`] accept a plain function that is called every
//! few percent of the entries and may cancel the build.
//!
//! [`Dictionary::from_tree_with_progress`]: crate::Dictionary::from_tree_with_progress
//! [`JmdictEngine::with_progress`]: crate::JmdictEngine::with_progress
//!
//! ```
//! use jmdict::utils::progress_report::ProgressState;
//!
//! fn print_entries(state: &mut ProgressState) -> bool {
//!     println!("{}: entry {} of {}", state.state_id, state.current + 1, state.total);
//!     false
//! }
//!
//! let mut progress = ProgressState::new("building", 40, 25, Some(print_entries));
//! let cancelled = (0..40).any(|entry| progress.report(entry));
//! assert!(!cancelled);
//! ```

/// Called with the current state; returning `true` cancels the operation.
pub type ProgressReportFn = fn(&mut ProgressState) -> bool;

pub struct ProgressState {
    /// Name of the running stage, e.g. "building"
    pub state_id: String,
    pub total: u64,
    /// Index of the item last passed to the reporter
    pub current: u64,
    /// Index at the previous report
    pub last: u64,
    /// Minimum distance, in items, between two reports
    pub report_interval: u64,
    pub reporter: Option<ProgressReportFn>,
}

impl ProgressState {
    /// Reports every `report_interval_percent` of `total` (clamped to 100).
    pub fn new(state_id: &str, total: u64, report_interval_percent: u64, reporter: Option<ProgressReportFn>) -> Self {
        Self {
            state_id: state_id.to_string(),
            total,
            current: 0,
            last: 0,
            report_interval: total * report_interval_percent.min(100) / 100,
            reporter,
        }
    }

    /// Passes item `index` to the reporter when more than `report_interval`
    /// items went by since the previous call, and always for the last item.
    ///
    /// Returns `true` if the reporter asked to cancel.
    pub fn report(&mut self, index: u64) -> bool {
        let Some(reporter) = self.reporter else {
            return false;
        };
        let is_last = index + 1 >= self.total;
        if !is_last && index.saturating_sub(self.last) <= self.report_interval {
            return false;
        }
        self.current = index;
        let cancelled = reporter(self);
        self.last = index;
        cancelled
    }
}
