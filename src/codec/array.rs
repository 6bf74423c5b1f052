//! Bounded extraction of variable-length payloads into caller buffers.
//!
//! Strings, blobs and byte vectors are copied into a destination slice the caller owns. The
//! copy length is always the smaller of the source length and the destination capacity, and
//! string sources additionally stop at their first NUL unit. Terminator scans never go beyond
//! the buffer the store handed out, nor beyond the configured scan limit.
//!
//! Accepted combinations:
//!
//! | Element    | Sources                                                    |
//! |------------|------------------------------------------------------------|
//! | `u8`, `i8` | `VT_BLOB`, `VT_UI1\|VT_VECTOR`, `VT_I1\|VT_VECTOR`, `VT_LPSTR` |
//! | `u16`      | `VT_LPWSTR`, `VT_LPSTR` (each narrow unit widened)          |
//!
//! Anything else copies nothing. Missing or differently shaped metadata is routine for
//! optional image fields, so this is not an error.

use std::ffi::CStr;

use widestring::U16CStr;

use crate::variant::TaggedValue;

/// An element type that variable-length payloads can be copied into.
pub trait ArrayElement: Copy + Sized {
    /// Copy from `value` into the front of `dest` and return the number of elements written
    ///
    /// ## Arguments
    /// * `value`      - The looked-up value
    /// * `dest`       - Destination buffer; never written past its length
    /// * `scan_limit` - Maximum number of string units searched for a terminator
    fn copy_from(value: &TaggedValue, dest: &mut [Self], scan_limit: usize) -> usize;
}

/// Narrow string units up to (excluding) the first NUL within `scan_limit`
///
/// If no terminator is found inside the bound the string ends at the bound.
#[must_use]
pub fn narrow_terminated(units: &[u8], scan_limit: usize) -> &[u8] {
    let bounded = &units[..units.len().min(scan_limit)];
    match CStr::from_bytes_until_nul(bounded) {
        Ok(s) => s.to_bytes(),
        Err(_) => bounded,
    }
}

/// UTF-16 units up to (excluding) the first NUL within `scan_limit`
///
/// If no terminator is found inside the bound the string ends at the bound.
#[must_use]
pub fn wide_terminated(units: &[u16], scan_limit: usize) -> &[u16] {
    let bounded = &units[..units.len().min(scan_limit)];
    match U16CStr::from_slice_truncate(bounded) {
        Ok(s) => s.as_slice(),
        Err(_) => bounded,
    }
}

fn copy_mapped<S: Copy, D>(src: &[S], dest: &mut [D], map: impl Fn(S) -> D) -> usize {
    let len = src.len().min(dest.len());
    for (d, s) in dest.iter_mut().zip(&src[..len]) {
        *d = map(*s);
    }
    len
}

fn copy_prefix<T: Copy>(src: &[T], dest: &mut [T]) -> usize {
    let len = src.len().min(dest.len());
    dest[..len].copy_from_slice(&src[..len]);
    len
}

fn unsupported_source<T>(value: &TaggedValue) -> usize {
    log::debug!(
        "VT: {} cannot be extracted as [{}]",
        value.tag(),
        std::any::type_name::<T>()
    );
    0
}

impl ArrayElement for u8 {
    fn copy_from(value: &TaggedValue, dest: &mut [Self], scan_limit: usize) -> usize {
        match value {
            TaggedValue::Blob(bytes) | TaggedValue::Ui1Vector(bytes) => copy_prefix(bytes, dest),
            TaggedValue::I1Vector(values) => {
                copy_mapped(values, dest, |v| u8::from_ne_bytes(v.to_ne_bytes()))
            }
            TaggedValue::LpStr(units) => copy_prefix(narrow_terminated(units, scan_limit), dest),
            other => unsupported_source::<u8>(other),
        }
    }
}

impl ArrayElement for i8 {
    fn copy_from(value: &TaggedValue, dest: &mut [Self], scan_limit: usize) -> usize {
        let as_signed = |v: u8| i8::from_ne_bytes(v.to_ne_bytes());
        match value {
            TaggedValue::I1Vector(values) => copy_prefix(values, dest),
            TaggedValue::Blob(bytes) | TaggedValue::Ui1Vector(bytes) => {
                copy_mapped(bytes, dest, as_signed)
            }
            TaggedValue::LpStr(units) => {
                copy_mapped(narrow_terminated(units, scan_limit), dest, as_signed)
            }
            other => unsupported_source::<i8>(other),
        }
    }
}

impl ArrayElement for u16 {
    fn copy_from(value: &TaggedValue, dest: &mut [Self], scan_limit: usize) -> usize {
        match value {
            TaggedValue::LpWStr(units) => copy_prefix(wide_terminated(units, scan_limit), dest),
            TaggedValue::LpStr(units) => {
                copy_mapped(narrow_terminated(units, scan_limit), dest, u16::from)
            }
            other => unsupported_source::<u16>(other),
        }
    }
}

/// Copy `value` into `dest` and return the written prefix of `dest`
///
/// ## Arguments
/// * `value`      - The looked-up value
/// * `dest`       - Destination buffer
/// * `scan_limit` - Maximum number of string units searched for a terminator
///
/// # Examples
///
/// ```rust
/// use metavariant::{codec::extract, TaggedValue};
///
/// let value = TaggedValue::LpStr(b"AB\0CD".to_vec());
/// let mut dest = [0u8; 5];
/// assert_eq!(extract(&value, &mut dest, usize::MAX), b"AB");
/// ```
pub fn extract<'d, T: ArrayElement>(
    value: &TaggedValue,
    dest: &'d mut [T],
    scan_limit: usize,
) -> &'d [T] {
    let len = T::copy_from(value, dest, scan_limit);
    &dest[..len]
}
