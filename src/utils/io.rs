//! Bounds-checked little-endian readers for raw variant payloads.
//!
//! Stores that hand out serialized payloads (and GIF application-extension blobs) carry their
//! scalars in little-endian order. The helpers here decode them without ever indexing past the
//! end of the buffer; a short buffer is reported as [`crate::Error::OutOfBounds`].
//!
//! ```rust,ignore
//! use metavariant::utils::io::{read_le, read_le_at};
//!
//! let data = [0x03, 0x01, 0x05, 0x00];
//! let mut offset = 2;
//! let loops: u16 = read_le_at(&data, &mut offset)?;
//! assert_eq!(loops, 5);
//! assert_eq!(offset, 4);
//! # Ok::<(), metavariant::Error>(())
//! ```

use crate::{Error::OutOfBounds, Result};

/// Trait for types that can be decoded from a fixed-size little-endian byte array.
///
/// Each implementation names the byte array it is decoded from (e.g. `[u8; 2]` for `u16`);
/// [`read_le_at`] slices exactly that many bytes and converts them.
pub trait LeIO: Sized {
    /// Byte array type for this numeric type
    type Bytes: Sized + for<'a> TryFrom<&'a [u8]>;

    /// Read T from a byte buffer in little-endian
    fn from_le_bytes(bytes: Self::Bytes) -> Self;
}

impl LeIO for u8 {
    type Bytes = [u8; 1];

    fn from_le_bytes(bytes: Self::Bytes) -> Self {
        u8::from_le_bytes(bytes)
    }
}

impl LeIO for i8 {
    type Bytes = [u8; 1];

    fn from_le_bytes(bytes: Self::Bytes) -> Self {
        i8::from_le_bytes(bytes)
    }
}

impl LeIO for u16 {
    type Bytes = [u8; 2];

    fn from_le_bytes(bytes: Self::Bytes) -> Self {
        u16::from_le_bytes(bytes)
    }
}

impl LeIO for i16 {
    type Bytes = [u8; 2];

    fn from_le_bytes(bytes: Self::Bytes) -> Self {
        i16::from_le_bytes(bytes)
    }
}

impl LeIO for f32 {
    type Bytes = [u8; 4];

    fn from_le_bytes(bytes: Self::Bytes) -> Self {
        f32::from_le_bytes(bytes)
    }
}

/// Safely reads a value of type `T` in little-endian byte order from the start of a buffer.
///
/// # Errors
/// Returns [`crate::Error::OutOfBounds`] if the buffer is shorter than `T`.
pub fn read_le<T: LeIO>(data: &[u8]) -> Result<T> {
    let mut offset = 0_usize;
    read_le_at(data, &mut offset)
}

/// Safely reads a value of type `T` in little-endian byte order at `offset`, advancing the
/// offset past the value on success.
///
/// # Errors
/// Returns [`crate::Error::OutOfBounds`] if fewer than `size_of::<T>()` bytes remain after
/// `offset`. The offset is left untouched in that case.
pub fn read_le_at<T: LeIO>(data: &[u8], offset: &mut usize) -> Result<T> {
    let type_len = std::mem::size_of::<T>();
    let Some(end) = offset.checked_add(type_len) else {
        return Err(OutOfBounds);
    };
    if end > data.len() {
        return Err(OutOfBounds);
    }

    let Ok(read) = data[*offset..end].try_into() else {
        return Err(OutOfBounds);
    };

    *offset = end;

    Ok(T::from_le_bytes(read))
}
