use thiserror::Error;

use crate::variant::VariantType;

macro_rules! store_error {
    // Single string version
    ($path:expr, $msg:expr) => {
        crate::Error::Store {
            path: $path.to_string(),
            message: $msg.to_string(),
        }
    };

    // Format string with arguments version
    ($path:expr, $fmt:expr, $($arg:tt)*) => {
        crate::Error::Store {
            path: $path.to_string(),
            message: format!($fmt, $($arg)*),
        }
    };
}

/// The generic Error type, which provides coverage for all errors this library can potentially
/// return.
///
/// Reads treat a missing entry or a mismatched tag as a normal outcome and report it as
/// `None`, so most of these variants only ever reach callers from write paths or from the
/// fallible `try_*` / `*_kind` accessors.
///
/// # Error Categories
///
/// ## Lookup
/// - [`Error::NotFound`] - The store holds no entry for the requested path
///
/// ## Programming errors
/// - [`Error::UnsupportedType`] - A runtime-typed request named a type the codec does not handle
/// - [`Error::UnknownVariantType`] - A raw tag value that is not part of [`VariantType`]
///
/// ## Store failures
/// - [`Error::Store`] - The store rejected a write or failed a lookup for another reason
/// - [`Error::LockError`] - A store lock was poisoned
///
/// ## Decoding
/// - [`Error::OutOfBounds`] - A payload was too short for the value being decoded
///
/// # Examples
///
/// ```rust
/// use metavariant::{Error, MemoryStore, MetadataAccessor};
///
/// let store = MemoryStore::new().with_failing_writes("/ifd");
///
/// let meta = MetadataAccessor::new(&store);
/// match meta.set("/ifd/{ushort=274}", 6u16) {
///     Ok(()) => println!("orientation written"),
///     Err(Error::Store { path, message }) => eprintln!("{path}: {message}"),
///     Err(e) => eprintln!("other error: {e}"),
/// }
/// ```
#[derive(Error, Debug)]
pub enum Error {
    /// The store holds no entry at the requested path.
    ///
    /// This is the routine outcome for optional metadata and is turned into `None` by every
    /// read accessor. Stores return it from [`crate::PropertyStore::lookup`] for a miss and for
    /// paths they cannot parse.
    #[error("No metadata entry at '{path}'")]
    NotFound {
        /// The path that was looked up
        path: String,
    },

    /// The requested value type is not handled by the codec.
    ///
    /// Raised by runtime-typed requests (for example [`crate::MetadataAccessor::get_kind`] or
    /// [`crate::write_option`]) whose tag lies outside the supported set. This indicates the
    /// codec has to be extended, so it is never silently defaulted.
    #[error("Marshaling not implemented for type: {requested}")]
    UnsupportedType {
        /// The tag that was requested
        requested: VariantType,
    },

    /// The property store failed.
    ///
    /// Covers rejected writes and lookups that failed for a reason other than "not found",
    /// such as a malformed entry. Propagated unchanged; the codec never retries.
    #[error("Store failure at '{path}': {message}")]
    Store {
        /// The path the failing operation addressed
        path: String,
        /// The store's description of the failure
        message: String,
    },

    /// A raw tag value does not name a known [`VariantType`].
    #[error("Unknown variant type - {0:#06x}")]
    UnknownVariantType(u16),

    /// An out of bound access was attempted while decoding a payload.
    #[error("Out of Bound read would have occurred!")]
    OutOfBounds,

    /// Failed to lock target.
    ///
    /// Returned by stores whose internal lock was poisoned by a panicking writer.
    #[error("Failed to lock target")]
    LockError,
}

impl Error {
    /// Returns `true` if this error reports a lookup miss.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::NotFound { .. })
    }
}
