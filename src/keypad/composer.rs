//! Pending-query composition state.
//!
//! Holds the current query text and the two partial selections. Merging
//! appends the composed unit and clears the selections; a miss leaves
//! everything exactly as it was.

use super::KeyMap;

/// Ephemeral input state: pending query plus outer/inner selections.
#[derive(Debug, Clone, Default)]
pub struct Composer {
    pending: String,
    outer: Option<String>,
    inner: Option<String>,
}

impl Composer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Select an outer key, replacing any previous outer selection.
    pub fn select_outer(&mut self, key: &str) {
        self.outer = Some(key.to_string());
    }

    /// Select an inner key, replacing any previous inner selection.
    pub fn select_inner(&mut self, key: &str) {
        self.inner = Some(key.to_string());
    }

    /// Compose the selected pair against the table.
    ///
    /// Requires both selections and a loaded table. On a hit the composed
    /// unit is appended to the pending query, both selections clear, and
    /// the unit is returned. On any miss (absent table, missing selection,
    /// triple not in the table) nothing changes and `None` comes back.
    pub fn merge(&mut self, table: Option<&KeyMap>) -> Option<String> {
        let table = table?;
        let outer = self.outer.as_deref()?;
        let inner = self.inner.as_deref()?;
        let unit = table.lookup(outer, inner)?.to_string();
        self.pending.push_str(&unit);
        self.outer = None;
        self.inner = None;
        Some(unit)
    }

    /// Append raw text to the pending query, bypassing composition.
    pub fn append_text(&mut self, text: &str) {
        self.pending.push_str(text);
    }

    /// Delete the last character of the pending query (charwise).
    pub fn delete_last(&mut self) {
        self.pending.pop();
    }

    /// Reset the pending query and selections (explicit user action).
    pub fn clear(&mut self) {
        self.pending.clear();
        self.outer = None;
        self.inner = None;
    }

    /// Current pending query text.
    pub fn pending(&self) -> &str {
        &self.pending
    }

    /// Current selections, for display.
    pub fn selections(&self) -> (Option<&str>, Option<&str>) {
        (self.outer.as_deref(), self.inner.as_deref())
    }

    /// Submission is possible iff the pending query is non-empty.
    pub fn can_submit(&self) -> bool {
        !self.pending.is_empty()
    }
}
