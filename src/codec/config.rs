//! Codec configuration
//!
//! Controls how far the codec is willing to scan store-owned string buffers for a terminator
//! and whether tag mismatches are traced.

/// Default upper bound, in string units, for terminator scans
pub const DEFAULT_MAX_STRING_SCAN: usize = 64 * 1024;

/// Configuration for a [`crate::MetadataAccessor`]
///
/// The effective scan bound for a lookup is the smaller of [`CodecConfig::max_string_scan`]
/// and the store's own [`crate::PropertyStore::max_string_len`], if it declares one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CodecConfig {
    /// Maximum number of units searched for a NUL terminator in narrow and wide strings.
    /// A string without a terminator inside the bound ends at the bound.
    pub max_string_scan: usize,

    /// Emit a `debug` trace when a read finds a tag other than the requested one
    pub trace_mismatches: bool,
}

impl Default for CodecConfig {
    fn default() -> Self {
        Self {
            max_string_scan: DEFAULT_MAX_STRING_SCAN,
            trace_mismatches: true,
        }
    }
}

impl CodecConfig {
    /// Creates a configuration with a tight scan bound, suitable for untrusted stores
    ///
    /// Image metadata strings (application identifiers, software tags, comments) are short;
    /// 4096 units covers every well-formed entry.
    #[must_use]
    pub fn strict() -> Self {
        Self {
            max_string_scan: 4096,
            trace_mismatches: true,
        }
    }

    /// Creates the default configuration with mismatch tracing disabled
    #[must_use]
    pub fn quiet() -> Self {
        Self {
            trace_mismatches: false,
            ..Self::default()
        }
    }

    /// The scan bound to use against a store that declares `store_limit`
    #[must_use]
    pub fn scan_limit(&self, store_limit: Option<usize>) -> usize {
        match store_limit {
            Some(limit) => limit.min(self.max_string_scan),
            None => self.max_string_scan,
        }
    }
}
