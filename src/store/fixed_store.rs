use std::io;
use std::sync::Arc;

use multimap::MultiMap;

use super::{RecordStore, StoreEntry};

/// Record store backed by a table built once at startup
#[derive(Clone, Debug)]
pub struct FixedRecordStore {
    by_apex: MultiMap<String, StoreEntry>,
}

impl FixedRecordStore {
    /// Builds the store from `(apex, entry)` pairs
    pub fn new<I, A>(entries: I) -> Arc<Self>
    where
        I: IntoIterator<Item = (A, StoreEntry)>,
        A: AsRef<str>,
    {
        let by_apex = entries
            .into_iter()
            .map(|(apex, entry)| (apex.as_ref().to_ascii_lowercase(), entry))
            .collect();
        Arc::new(Self { by_apex })
    }
}

impl RecordStore for FixedRecordStore {
    fn lookup(&self, apex: &str) -> io::Result<Vec<StoreEntry>> {
        let entries = match self.by_apex.get_vec(&apex.to_ascii_lowercase()) {
            Some(entries) => entries,
            None => return Ok(Vec::new()),
        };
        Ok(entries.iter().filter(|e| !e.excluded).cloned().collect())
    }
}
