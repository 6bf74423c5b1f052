//! In-memory hierarchical property store.
//!
//! [`MemoryStore`] keeps entries in a path-keyed map behind an `RwLock`, hands out copies of
//! its entries on lookup and counts how many of them were released again. It is the reference
//! store for hosts that assemble metadata in memory, and the instrumented store used to verify
//! that every lookup is released exactly once.

use std::{
    collections::HashMap,
    sync::{
        atomic::{AtomicUsize, Ordering},
        RwLock,
    },
};

use crate::{store::PropertyStore, variant::TaggedValue, Error, Result};

/// A thread-safe, in-memory [`PropertyStore`] with lease accounting.
///
/// # Examples
///
/// ```rust
/// use metavariant::{MemoryStore, MetadataAccessor};
///
/// let store = MemoryStore::new();
/// let meta = MetadataAccessor::new(&store);
///
/// meta.set("/imgdesc/Width", 320u16)?;
/// assert_eq!(meta.get::<u16>("/imgdesc/Width"), Some(320));
/// assert_eq!(store.outstanding(), 0);
/// # Ok::<(), metavariant::Error>(())
/// ```
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RwLock<HashMap<String, TaggedValue>>,
    failing_prefixes: Vec<String>,
    max_string_len: Option<usize>,
    leased: AtomicUsize,
    released: AtomicUsize,
}

impl MemoryStore {
    /// Create an empty store
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare a maximum string length, reported through [`PropertyStore::max_string_len`]
    #[must_use]
    pub fn with_max_string_len(mut self, max: usize) -> Self {
        self.max_string_len = Some(max);
        self
    }

    /// Reject every write to a path starting with `prefix`
    ///
    /// Lookups are unaffected, and [`MemoryStore::insert`] bypasses the check.
    #[must_use]
    pub fn with_failing_writes(mut self, prefix: impl Into<String>) -> Self {
        self.failing_prefixes.push(prefix.into());
        self
    }

    /// Store `value` at `path` directly, replacing any previous entry
    ///
    /// # Errors
    /// Returns [`Error::LockError`] if the entry table is poisoned.
    pub fn insert(&self, path: impl Into<String>, value: TaggedValue) -> Result<()> {
        write_lock!(self.entries)?.insert(path.into(), value);
        Ok(())
    }

    /// Remove and return the entry at `path`
    ///
    /// # Errors
    /// Returns [`Error::LockError`] if the entry table is poisoned.
    pub fn remove(&self, path: &str) -> Result<Option<TaggedValue>> {
        Ok(write_lock!(self.entries)?.remove(path))
    }

    /// Number of entries held
    ///
    /// # Errors
    /// Returns [`Error::LockError`] if the entry table is poisoned.
    pub fn len(&self) -> Result<usize> {
        Ok(read_lock!(self.entries)?.len())
    }

    /// Whether the store holds no entries
    ///
    /// # Errors
    /// Returns [`Error::LockError`] if the entry table is poisoned.
    pub fn is_empty(&self) -> Result<bool> {
        Ok(read_lock!(self.entries)?.is_empty())
    }

    /// Number of values handed out by successful lookups
    #[must_use]
    pub fn leased(&self) -> usize {
        self.leased.load(Ordering::Acquire)
    }

    /// Number of values given back through [`PropertyStore::release`]
    #[must_use]
    pub fn released(&self) -> usize {
        self.released.load(Ordering::Acquire)
    }

    /// Values looked up but not yet released
    #[must_use]
    pub fn outstanding(&self) -> usize {
        self.leased().saturating_sub(self.released())
    }
}

impl PropertyStore for MemoryStore {
    fn lookup(&self, path: &str) -> Result<TaggedValue> {
        let entries = read_lock!(self.entries)?;
        let Some(value) = entries.get(path) else {
            log::trace!("lookup miss: {path}");
            return Err(Error::NotFound {
                path: path.to_string(),
            });
        };

        self.leased.fetch_add(1, Ordering::AcqRel);
        log::trace!("lookup hit: {path} -> {}", value.tag());
        Ok(value.clone())
    }

    fn write(&self, path: &str, value: &TaggedValue) -> Result<()> {
        if let Some(prefix) = self
            .failing_prefixes
            .iter()
            .find(|prefix| path.starts_with(prefix.as_str()))
        {
            return Err(store_error!(
                path,
                "writes under '{}' are rejected",
                prefix
            ));
        }

        write_lock!(self.entries)?.insert(path.to_string(), value.clone());
        log::trace!("write: {path} <- {}", value.tag());
        Ok(())
    }

    fn release(&self, value: TaggedValue) {
        self.released.fetch_add(1, Ordering::AcqRel);
        log::trace!("release: {} ({} units)", value.tag(), value.buffer_len());
    }

    fn max_string_len(&self) -> Option<usize> {
        self.max_string_len
    }
}

#[cfg(test)]
mod tests {
    use std::{sync::Arc, thread};

    use super::*;
    use crate::store::Lease;

    #[test]
    fn lookup_returns_copy() {
        let store = MemoryStore::new();
        store.insert("/appext/data", TaggedValue::blob(vec![3, 1, 0, 0])).unwrap();

        let value = store.lookup("/appext/data").unwrap();
        assert_eq!(value, TaggedValue::blob(vec![3, 1, 0, 0]));
        store.release(value);

        assert_eq!(store.len().unwrap(), 1);
        assert_eq!(store.leased(), 1);
        assert_eq!(store.released(), 1);
    }

    #[test]
    fn miss_is_not_found() {
        let store = MemoryStore::new();
        let err = store.lookup("/nonexistent").unwrap_err();
        assert!(err.is_not_found());
        assert_eq!(store.leased(), 0);
    }

    #[test]
    fn write_replaces() {
        let store = MemoryStore::new();
        store.write("/x", &TaggedValue::u1(1)).unwrap();
        store.write("/x", &TaggedValue::u2(2)).unwrap();

        let lease = Lease::acquire(&store, "/x").unwrap();
        assert_eq!(*lease, TaggedValue::u2(2));
    }

    #[test]
    fn failing_writes() {
        let store = MemoryStore::new().with_failing_writes("/ifd");

        let err = store.write("/ifd/{ushort=274}", &TaggedValue::u2(1)).unwrap_err();
        assert!(matches!(err, Error::Store { ref path, .. } if path == "/ifd/{ushort=274}"));
        assert!(store.is_empty().unwrap());

        store.write("/app1/ifd/{ushort=274}", &TaggedValue::u2(1)).unwrap();
        store.insert("/ifd/{ushort=274}", TaggedValue::u2(1)).unwrap();
        assert_eq!(store.len().unwrap(), 2);
    }

    #[test]
    fn remove_entry() {
        let store = MemoryStore::new();
        store.insert("/x", TaggedValue::u1(1)).unwrap();
        assert_eq!(store.remove("/x").unwrap(), Some(TaggedValue::u1(1)));
        assert_eq!(store.remove("/x").unwrap(), None);
    }

    #[test]
    fn max_string_len() {
        assert_eq!(MemoryStore::new().max_string_len(), None);
        assert_eq!(
            MemoryStore::new().with_max_string_len(255).max_string_len(),
            Some(255)
        );
    }

    #[test]
    fn concurrent_leases_balance() {
        let store = Arc::new(MemoryStore::new());
        store.insert("/logscrdesc/Width", TaggedValue::u2(640)).unwrap();

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let store = Arc::clone(&store);
                thread::spawn(move || {
                    for _ in 0..100 {
                        let lease = Lease::acquire(store.as_ref(), "/logscrdesc/Width").unwrap();
                        assert_eq!(*lease, TaggedValue::u2(640));
                    }
                })
            })
            .collect();

        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(store.leased(), 800);
        assert_eq!(store.released(), 800);
    }
}
