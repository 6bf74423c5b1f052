//! Typed metadata access on top of a property store.
//!
//! [`MetadataAccessor`] is the public face of the codec. Every read follows the same path:
//!
//! ```text
//! lookup(path) ─┬─ NotFound ──────────────────────────────► absent
//!               ├─ other failure ─────────────────────────► absent (get) / Err (try_get)
//!               └─ Lease ─► coerce / extract ─► drop ─► release ─► result
//! ```
//!
//! The looked-up value never leaves the accessor. It is read through a [`Lease`] and handed
//! back to the store before the result is returned, whichever branch produced that result.
//!
//! # Examples
//!
//! ```rust
//! use metavariant::{MemoryStore, MetadataAccessor, TaggedValue};
//!
//! let store = MemoryStore::new();
//! store.insert("/appext/application", TaggedValue::narrow_string("NETSCAPE2.0"))?;
//!
//! let meta = MetadataAccessor::new(&store);
//! meta.set("/grctlext/Delay", 10u16)?;
//!
//! assert_eq!(meta.get::<u16>("/grctlext/Delay"), Some(10));
//! assert_eq!(meta.get::<f32>("/grctlext/Delay"), None);
//!
//! let mut app = [0u8; 11];
//! assert_eq!(meta.get_bytes("/appext/application", &mut app), b"NETSCAPE2.0");
//! # Ok::<(), metavariant::Error>(())
//! ```

use crate::{
    codec::{scalar, ArrayElement, CodecConfig, Scalar},
    store::{Lease, PropertyStore},
    variant::{TaggedValue, VariantType},
    Error, Result,
};

/// Reads and writes typed metadata through a borrowed [`PropertyStore`].
///
/// The accessor holds no state besides its configuration, so it is `Send` and `Sync` whenever
/// the store is and can be copied freely.
pub struct MetadataAccessor<'s, S: PropertyStore + ?Sized> {
    store: &'s S,
    config: CodecConfig,
}

impl<S: PropertyStore + ?Sized> Clone for MetadataAccessor<'_, S> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<S: PropertyStore + ?Sized> Copy for MetadataAccessor<'_, S> {}

impl<S: PropertyStore + ?Sized> std::fmt::Debug for MetadataAccessor<'_, S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MetadataAccessor")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl<'s, S: PropertyStore + ?Sized> MetadataAccessor<'s, S> {
    /// Create an accessor with the default [`CodecConfig`]
    #[must_use]
    pub fn new(store: &'s S) -> Self {
        Self::with_config(store, CodecConfig::default())
    }

    /// Create an accessor with an explicit configuration
    #[must_use]
    pub fn with_config(store: &'s S, config: CodecConfig) -> Self {
        MetadataAccessor { store, config }
    }

    /// The active configuration
    #[must_use]
    pub fn config(&self) -> &CodecConfig {
        &self.config
    }

    /// The underlying store
    #[must_use]
    pub fn store(&self) -> &'s S {
        self.store
    }

    fn scan_limit(&self) -> usize {
        self.config.scan_limit(self.store.max_string_len())
    }

    /// Look up `path`, mapping a miss to `None`
    fn lease(&self, path: &str) -> Result<Option<Lease<'s, S>>> {
        match Lease::acquire(self.store, path) {
            Ok(lease) => Ok(Some(lease)),
            Err(Error::NotFound { .. }) => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// Like [`Self::lease`], but a store failure is logged and treated as a miss
    fn lease_or_absent(&self, path: &str) -> Option<Lease<'s, S>> {
        match self.lease(path) {
            Ok(lease) => lease,
            Err(e) => {
                log::warn!("metadata lookup failed, treating as absent: {e}");
                None
            }
        }
    }

    /// Read a scalar, propagating store failures
    ///
    /// ## Arguments
    /// * `path` - The store-defined path of the entry
    ///
    /// Returns `Ok(None)` if there is no entry or it is not tagged `T::TAG`.
    ///
    /// # Errors
    /// Returns the store's error if the lookup failed for a reason other than
    /// [`Error::NotFound`].
    pub fn try_get<T: Scalar>(&self, path: &str) -> Result<Option<T>> {
        let Some(lease) = self.lease(path)? else {
            return Ok(None);
        };
        Ok(scalar::read::<T>(&lease, self.config.trace_mismatches))
    }

    /// Read a scalar
    ///
    /// Returns `None` if there is no entry, if it is not tagged `T::TAG`, or if the store
    /// failed the lookup (logged at `warn`).
    ///
    /// # Examples
    ///
    /// ```rust
    /// use metavariant::{MemoryStore, MetadataAccessor, TaggedValue};
    ///
    /// let store = MemoryStore::new();
    /// store.insert("/logscrdesc/PixelAspectRatio", TaggedValue::u1(49))?;
    ///
    /// let meta = MetadataAccessor::new(&store);
    /// assert_eq!(meta.get::<u8>("/logscrdesc/PixelAspectRatio"), Some(49));
    /// assert_eq!(meta.get::<u8>("/nonexistent"), None);
    /// # Ok::<(), metavariant::Error>(())
    /// ```
    #[must_use]
    pub fn get<T: Scalar>(&self, path: &str) -> Option<T> {
        let lease = self.lease_or_absent(path)?;
        scalar::read::<T>(&lease, self.config.trace_mismatches)
    }

    /// Read a scalar, falling back to `T::default()` when it is absent
    #[must_use]
    pub fn get_or_default<T: Scalar + Default>(&self, path: &str) -> T {
        self.get(path).unwrap_or_default()
    }

    /// Copy a variable-length entry into `dest`, propagating store failures
    ///
    /// # Errors
    /// Returns the store's error if the lookup failed for a reason other than
    /// [`Error::NotFound`].
    pub fn try_get_array<'d, T: ArrayElement>(
        &self,
        path: &str,
        dest: &'d mut [T],
    ) -> Result<&'d [T]> {
        let len = match self.lease(path)? {
            Some(lease) => T::copy_from(&lease, dest, self.scan_limit()),
            None => 0,
        };
        Ok(&dest[..len])
    }

    /// Copy a variable-length entry into `dest` and return the written prefix
    ///
    /// The result is empty if there is no entry, if its shape cannot be copied into `T`, or if
    /// the store failed the lookup. See [`crate::codec::array`] for the accepted shapes.
    ///
    /// ## Arguments
    /// * `path` - The store-defined path of the entry
    /// * `dest` - Destination buffer; its length is the capacity
    pub fn get_array<'d, T: ArrayElement>(&self, path: &str, dest: &'d mut [T]) -> &'d [T] {
        let len = match self.lease_or_absent(path) {
            Some(lease) => T::copy_from(&lease, dest, self.scan_limit()),
            None => 0,
        };
        &dest[..len]
    }

    /// Copy a blob, byte vector or narrow string into `dest`
    pub fn get_bytes<'d>(&self, path: &str, dest: &'d mut [u8]) -> &'d [u8] {
        self.get_array(path, dest)
    }

    /// Copy a wide or narrow string into `dest` as UTF-16 units
    pub fn get_chars<'d>(&self, path: &str, dest: &'d mut [u16]) -> &'d [u16] {
        self.get_array(path, dest)
    }

    /// Write a scalar under its canonical tag
    ///
    /// # Errors
    /// Propagates the store's write failure unchanged.
    pub fn set<T: Scalar>(&self, path: &str, value: T) -> Result<()> {
        self.store.write(path, &scalar::write(value))
    }

    /// Read a scalar whose type is only known at runtime
    ///
    /// ## Arguments
    /// * `path` - The store-defined path of the entry
    /// * `kind` - The tag the entry is expected to carry
    ///
    /// Returns `Ok(None)` if there is no entry or it carries a different tag.
    ///
    /// # Errors
    /// Returns [`Error::UnsupportedType`] if `kind` is not a scalar tag, before the store is
    /// consulted, and the store's error for lookup failures other than [`Error::NotFound`].
    pub fn get_kind(&self, path: &str, kind: VariantType) -> Result<Option<TaggedValue>> {
        if !kind.is_scalar() {
            return Err(Error::UnsupportedType { requested: kind });
        }

        let Some(lease) = self.lease(path)? else {
            return Ok(None);
        };
        if lease.tag() == kind {
            return Ok(Some((*lease).clone()));
        }

        if self.config.trace_mismatches {
            log::debug!("VT: {} unexpected for type: {}", lease.tag(), kind);
        }
        Ok(None)
    }

    /// Write a runtime-typed scalar value
    ///
    /// # Errors
    /// Returns [`Error::UnsupportedType`] if `value` is not a scalar, without writing, and
    /// propagates the store's write failure otherwise.
    pub fn set_kind(&self, path: &str, value: &TaggedValue) -> Result<()> {
        let kind = value.tag();
        if !kind.is_scalar() {
            return Err(Error::UnsupportedType { requested: kind });
        }
        self.store.write(path, value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        store::MemoryStore,
        test::{gif_store, FailingLookupStore},
    };

    #[test]
    fn u16_boundaries_round_trip() {
        let store = MemoryStore::new();
        let meta = MetadataAccessor::new(&store);
        for v in [0u16, 1, u16::MAX] {
            meta.set("/imgdesc/Width", v).unwrap();
            assert_eq!(meta.get::<u16>("/imgdesc/Width"), Some(v));
        }
        assert_eq!(store.outstanding(), 0);
    }

    #[test]
    fn bool_round_trip() {
        let store = MemoryStore::new();
        let meta = MetadataAccessor::new(&store);
        for v in [true, false] {
            meta.set("/grctlext/TransparencyFlag", v).unwrap();
            assert_eq!(meta.get::<bool>("/grctlext/TransparencyFlag"), Some(v));
        }
    }

    #[test]
    fn f32_round_trip_bit_exact() {
        let store = MemoryStore::new();
        let meta = MetadataAccessor::new(&store);
        for v in [0.0f32, -0.0, f32::MIN_POSITIVE, f32::MAX, f32::MIN] {
            meta.set("/quality", v).unwrap();
            let read = meta.get::<f32>("/quality").unwrap();
            assert_eq!(read.to_bits(), v.to_bits());
        }
    }

    #[test]
    fn mismatch_is_absent_and_released() {
        let store = MemoryStore::new();
        store.insert("/r4", TaggedValue::r4(1.5)).unwrap();

        let meta = MetadataAccessor::with_config(&store, CodecConfig::quiet());
        assert_eq!(meta.get::<u16>("/r4"), None);
        assert_eq!(meta.try_get::<u8>("/r4").unwrap(), None);
        assert_eq!(store.leased(), 2);
        assert_eq!(store.released(), 2);
    }

    #[test]
    fn missing_path_releases_nothing() {
        let store = MemoryStore::new();
        let meta = MetadataAccessor::new(&store);
        assert_eq!(meta.get::<u8>("/nonexistent"), None);
        assert_eq!(meta.try_get::<u8>("/nonexistent").unwrap(), None);
        assert_eq!(meta.get_or_default::<u16>("/nonexistent"), 0);
        assert_eq!(store.released(), 0);
    }

    #[test]
    fn blob_into_small_buffer() {
        let store = MemoryStore::new();
        store
            .insert("/appext/data", TaggedValue::blob((0..100u8).collect::<Vec<_>>()))
            .unwrap();

        let meta = MetadataAccessor::new(&store);
        let mut dest = [0u8; 10];
        let out = meta.get_bytes("/appext/data", &mut dest);
        assert_eq!(out.len(), 10);
        assert_eq!(out, &[0, 1, 2, 3, 4, 5, 6, 7, 8, 9]);
        assert_eq!(store.outstanding(), 0);
    }

    #[test]
    fn narrow_string_with_embedded_nul() {
        let store = MemoryStore::new();
        store.insert("/s", TaggedValue::LpStr(b"AB\0CD".to_vec())).unwrap();

        let meta = MetadataAccessor::new(&store);
        let mut dest = [0u8; 5];
        assert_eq!(meta.get_bytes("/s", &mut dest), b"AB");
    }

    #[test]
    fn narrow_string_as_chars() {
        let store = MemoryStore::new();
        store.insert("/s", TaggedValue::narrow_string("Hi")).unwrap();

        let meta = MetadataAccessor::new(&store);
        let mut dest = [0u16; 8];
        let expected: Vec<u16> = "Hi".encode_utf16().collect();
        assert_eq!(meta.get_chars("/s", &mut dest), &expected[..]);
    }

    #[test]
    fn store_declared_scan_limit() {
        let store = MemoryStore::new().with_max_string_len(3);
        store.insert("/s", TaggedValue::wide_string("ABCDEF")).unwrap();

        let meta = MetadataAccessor::new(&store);
        let mut dest = [0u16; 8];
        assert_eq!(meta.get_chars("/s", &mut dest).len(), 3);
    }

    #[test]
    fn array_shape_mismatch_is_empty() {
        let store = gif_store();
        let meta = MetadataAccessor::new(&store);

        let mut dest = [0u8; 4];
        assert!(meta.get_bytes("/logscrdesc/Width", &mut dest).is_empty());
        assert!(meta.get_bytes("/nonexistent", &mut dest).is_empty());
        assert_eq!(store.outstanding(), 0);
    }

    #[test]
    fn lookup_failure() {
        let store = FailingLookupStore;
        let meta = MetadataAccessor::new(&store);

        assert_eq!(meta.get::<u16>("/broken"), None);
        assert!(matches!(
            meta.try_get::<u16>("/broken"),
            Err(Error::Store { .. })
        ));

        let mut dest = [0u8; 4];
        assert!(meta.get_bytes("/broken", &mut dest).is_empty());
        assert!(meta.try_get_array("/broken", &mut dest).is_err());
    }

    #[test]
    fn write_failure_propagates() {
        let store = MemoryStore::new().with_failing_writes("/ifd");
        let meta = MetadataAccessor::new(&store);

        let err = meta.set("/ifd/{ushort=274}", 6u16).unwrap_err();
        assert!(matches!(err, Error::Store { .. }));
        assert_eq!(meta.get::<u16>("/ifd/{ushort=274}"), None);
    }

    #[test]
    fn runtime_typed() {
        let store = gif_store();
        let meta = MetadataAccessor::new(&store);

        assert_eq!(
            meta.get_kind("/logscrdesc/Width", VariantType::Ui2).unwrap(),
            Some(TaggedValue::u2(320))
        );
        assert_eq!(meta.get_kind("/logscrdesc/Width", VariantType::R4).unwrap(), None);
        assert_eq!(meta.get_kind("/nonexistent", VariantType::Bool).unwrap(), None);

        meta.set_kind("/imgdesc/Left", &TaggedValue::u2(4)).unwrap();
        assert_eq!(meta.get::<u16>("/imgdesc/Left"), Some(4));
        assert_eq!(store.outstanding(), 0);
    }

    #[test]
    fn runtime_unsupported_type() {
        let store = gif_store();
        let meta = MetadataAccessor::new(&store);
        let leased = store.leased();
        let entries = store.len().unwrap();

        let err = meta
            .get_kind("/appext/application", VariantType::LpStr)
            .unwrap_err();
        assert!(matches!(
            err,
            Error::UnsupportedType {
                requested: VariantType::LpStr
            }
        ));

        let err = meta
            .set_kind("/custom/blob", &TaggedValue::blob(vec![1]))
            .unwrap_err();
        assert!(matches!(
            err,
            Error::UnsupportedType {
                requested: VariantType::Blob
            }
        ));

        // Rejected before the store was consulted
        assert_eq!(store.leased(), leased);
        assert_eq!(store.len().unwrap(), entries);
    }

    #[test]
    fn accessor_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<MetadataAccessor<'static, MemoryStore>>();
    }
}
