//! The property store seam.
//!
//! The codec never owns metadata storage. It talks to a store through [`PropertyStore`], which
//! exposes lookup and write by path plus the store's release operation for looked-up values.
//! [`Lease`] ties those together: a successful lookup yields a lease, and dropping the lease
//! hands the value back to the store. Every exit path of a read (success, tag mismatch, early
//! return, panic unwinding) therefore releases exactly once, and nothing that was never looked
//! up is ever released.
//!
//! Two in-memory implementations are provided:
//! - [`MemoryStore`] - hierarchical metadata store with lease accounting
//! - [`MemoryBag`] - flat encoder option bag for [`PropertyBag`]

mod bag;
mod memory;

use std::ops::Deref;

pub use bag::{options, write_option, MemoryBag, PropertyBag};
pub use memory::MemoryStore;

use crate::{variant::TaggedValue, Result};

/// Capabilities the codec requires from a hierarchical property store.
///
/// Paths are opaque to the codec. Stores are expected to be callable from several threads at
/// once if they are shared; all methods take `&self` and any synchronization is the store's.
pub trait PropertyStore {
    /// Look up the entry at `path`
    ///
    /// # Errors
    /// Returns [`crate::Error::NotFound`] if there is no entry (or the path is not understood),
    /// and any other error for a failed lookup, such as a malformed entry.
    fn lookup(&self, path: &str) -> Result<TaggedValue>;

    /// Persist `value` at `path`
    ///
    /// # Errors
    /// Returns an error if the store rejects the write.
    fn write(&self, path: &str, value: &TaggedValue) -> Result<()>;

    /// Give a looked-up value back to the store
    ///
    /// Called exactly once for every value returned by a successful [`PropertyStore::lookup`]
    /// and never for anything else.
    fn release(&self, value: TaggedValue);

    /// The longest string, in units, this store will ever hand out, if it guarantees one
    fn max_string_len(&self) -> Option<usize> {
        None
    }
}

/// A looked-up value that is released back to its store on drop.
///
/// The value can only be read through the lease, so it cannot be observed after release, and
/// `Drop` runs once, so it cannot be released twice.
///
/// # Examples
///
/// ```rust
/// use metavariant::{Lease, MemoryStore, PropertyStore, TaggedValue};
///
/// let store = MemoryStore::new();
/// store.write("/grctlext/Delay", &TaggedValue::u2(10))?;
///
/// {
///     let lease = Lease::acquire(&store, "/grctlext/Delay")?;
///     assert_eq!(*lease, TaggedValue::u2(10));
/// }
/// assert_eq!(store.released(), 1);
/// # Ok::<(), metavariant::Error>(())
/// ```
#[derive(Debug)]
pub struct Lease<'s, S: PropertyStore + ?Sized> {
    store: &'s S,
    value: TaggedValue,
}

impl<'s, S: PropertyStore + ?Sized> Lease<'s, S> {
    /// Look up `path` in `store` and hold the result until drop
    ///
    /// ## Arguments
    /// * `store` - The store to look up in and release to
    /// * `path`  - The store-defined path of the entry
    ///
    /// # Errors
    /// Propagates the store's lookup error; nothing is held (or released) in that case.
    pub fn acquire(store: &'s S, path: &str) -> Result<Self> {
        let value = store.lookup(path)?;
        Ok(Lease { store, value })
    }
}

impl<S: PropertyStore + ?Sized> Deref for Lease<'_, S> {
    type Target = TaggedValue;

    fn deref(&self) -> &Self::Target {
        &self.value
    }
}

impl<S: PropertyStore + ?Sized> Drop for Lease<'_, S> {
    fn drop(&mut self) {
        self.store.release(std::mem::take(&mut self.value));
    }
}
