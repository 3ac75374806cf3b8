//! One-shot guard over authorization codes

use std::collections::HashSet;

use parking_lot::Mutex;

/// Process-scoped set of authorization codes already handed to the exchange
///
/// Codes are only ever added; the set is dropped with the process.
#[derive(Debug, Default)]
pub struct ProcessedCodes {
    codes: Mutex<HashSet<String>>,
}

impl ProcessedCodes {
    /// Empty set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark `code` as processed.
    ///
    /// Returns `true` if this call claimed the code and `false` if it had
    /// already been claimed. Check and insert happen under one lock.
    pub fn try_claim(&self, code: &str) -> bool {
        self.codes.lock().insert(code.to_string())
    }

    /// Whether `code` has been claimed.
    #[must_use]
    pub fn contains(&self, code: &str) -> bool {
        self.codes.lock().contains(code)
    }

    /// Number of claimed codes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.codes.lock().len()
    }

    /// True before the first claim.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.codes.lock().is_empty()
    }
}
