//! The window of records currently shown.

use std::collections::VecDeque;

use crate::trade::OptionsFlow;

/// Rows per page, and the live window size.
pub const PAGE_SIZE: usize = 100;

/// Ordered, bounded sequence of displayed records (newest first for live
/// inserts).
///
/// Two write paths: wholesale replacement from a page fetch, and
/// prepend-and-truncate from an admitted live record.
#[derive(Debug, Clone)]
pub struct DisplayBuffer {
    rows: VecDeque<OptionsFlow>,
    capacity: usize,
}

impl Default for DisplayBuffer {
    fn default() -> Self {
        Self::with_capacity(PAGE_SIZE)
    }
}

impl DisplayBuffer {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            rows: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&OptionsFlow> {
        self.rows.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &OptionsFlow> {
        self.rows.iter()
    }

    /// Replace the contents with a fetched page.
    pub fn replace(&mut self, rows: Vec<OptionsFlow>) {
        self.rows = rows.into_iter().take(self.capacity).collect();
    }

    /// Prepend a live record, dropping the oldest row when full.
    pub fn push_live(&mut self, record: OptionsFlow) {
        self.rows.push_front(record);
        self.rows.truncate(self.capacity);
    }

    pub fn clear(&mut self) {
        self.rows.clear();
    }
}
