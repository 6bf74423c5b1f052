//! Flat encoder option bags.
//!
//! Encoders take their options as a named property bag rather than a hierarchical store. Only
//! three option types are ever written: booleans, bytes and single-precision floats.

use std::{collections::HashMap, sync::RwLock};

use crate::{
    codec::Scalar,
    variant::{TaggedValue, VariantType},
    Error, Result,
};

/// Well-known encoder option names
pub mod options {
    /// JPEG/JPEG-XR quality, `f32` in `0.0..=1.0`
    pub const IMAGE_QUALITY: &str = "ImageQuality";
    /// PNG/GIF interlacing, `bool`
    pub const INTERLACE_OPTION: &str = "InterlaceOption";
    /// JPEG chroma subsampling mode, `u8`
    pub const JPEG_YCRCB_SUBSAMPLING: &str = "JpegYCrCbSubsampling";
    /// PNG filter selection, `u8`
    pub const FILTER_OPTION: &str = "FilterOption";
    /// TIFF/WebP compression quality, `f32` in `0.0..=1.0`
    pub const COMPRESSION_QUALITY: &str = "CompressionQuality";
    /// WebP lossless switch, `bool`
    pub const LOSSLESS: &str = "Lossless";
}

/// A named option bag accepting tagged values.
pub trait PropertyBag {
    /// Store `value` under `name`
    ///
    /// # Errors
    /// Returns an error if the bag rejects the option.
    fn write(&self, name: &str, value: &TaggedValue) -> Result<()>;
}

/// Write a scalar encoder option into `bag`
///
/// Only `bool`, `u8` and `f32` options exist; any other scalar is rejected before the bag is
/// touched.
///
/// ## Arguments
/// * `bag`   - The option bag to write into
/// * `name`  - Option name, see [`options`]
/// * `value` - Option value
///
/// # Errors
/// Returns [`Error::UnsupportedType`] for scalars other than `bool`, `u8` and `f32`, and
/// propagates the bag's own failure otherwise.
///
/// # Examples
///
/// ```rust
/// use metavariant::{store::options, write_option, MemoryBag, TaggedValue};
///
/// let bag = MemoryBag::new();
/// write_option(&bag, options::IMAGE_QUALITY, 0.9f32)?;
/// assert_eq!(bag.get(options::IMAGE_QUALITY)?, Some(TaggedValue::r4(0.9)));
///
/// assert!(write_option(&bag, "Width", 1u16).is_err());
/// # Ok::<(), metavariant::Error>(())
/// ```
pub fn write_option<B: PropertyBag + ?Sized, T: Scalar>(
    bag: &B,
    name: &str,
    value: T,
) -> Result<()> {
    match T::TAG {
        VariantType::Bool | VariantType::Ui1 | VariantType::R4 => {
            bag.write(name, &value.into_tagged())
        }
        requested => Err(Error::UnsupportedType { requested }),
    }
}

/// An in-memory [`PropertyBag`].
#[derive(Debug, Default)]
pub struct MemoryBag {
    options: RwLock<HashMap<String, TaggedValue>>,
}

impl MemoryBag {
    /// Create an empty bag
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The option stored under `name`, if any
    ///
    /// # Errors
    /// Returns [`Error::LockError`] if the option table is poisoned.
    pub fn get(&self, name: &str) -> Result<Option<TaggedValue>> {
        Ok(read_lock!(self.options)?.get(name).cloned())
    }

    /// Number of options held
    ///
    /// # Errors
    /// Returns [`Error::LockError`] if the option table is poisoned.
    pub fn len(&self) -> Result<usize> {
        Ok(read_lock!(self.options)?.len())
    }

    /// Whether no option has been written
    ///
    /// # Errors
    /// Returns [`Error::LockError`] if the option table is poisoned.
    pub fn is_empty(&self) -> Result<bool> {
        Ok(read_lock!(self.options)?.is_empty())
    }
}

impl PropertyBag for MemoryBag {
    fn write(&self, name: &str, value: &TaggedValue) -> Result<()> {
        write_lock!(self.options)?.insert(name.to_string(), value.clone());
        Ok(())
    }
}
