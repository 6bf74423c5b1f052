//! Tagged values as exchanged with a property store.
//!
//! A [`TaggedValue`] is one store entry: a [`VariantType`] tag plus exactly one payload shape.
//! Scalars are held inline; strings, blobs and vectors hold the buffer the store handed out.
//! Because the type is a closed enum, code can only ever look at the payload arm that matches
//! the tag.
//!
//! # Ownership
//!
//! Buffers inside a looked-up value belong to the store. The codec reads them through a
//! [`crate::Lease`], which gives the value back to [`crate::PropertyStore::release`] exactly
//! once when it goes out of scope.
//!
//! # Examples
//!
//! ```rust
//! use metavariant::{TaggedValue, VariantType};
//!
//! let delay = TaggedValue::u2(10);
//! assert_eq!(delay.tag(), VariantType::Ui2);
//!
//! let name = TaggedValue::narrow_string("NETSCAPE2.0");
//! assert_eq!(name.tag(), VariantType::LpStr);
//! assert_eq!(name.narrow_units().map(|units| units.len()), Some(12));
//! ```

mod types;

use std::fmt;

use widestring::U16CString;

pub use types::{VariantType, VARIANT_FALSE, VARIANT_TRUE, VT};

use crate::{utils::io::read_le, Error::OutOfBounds, Result};

/// One property-store entry: a tag and the payload selected by it.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum TaggedValue {
    /// No value
    #[default]
    Empty,
    /// `VARIANT_BOOL`: [`VARIANT_TRUE`] or [`VARIANT_FALSE`], any non-zero value reads as true
    Bool(i16),
    /// Signed 8-bit integer
    I1(i8),
    /// Unsigned 8-bit integer
    Ui1(u8),
    /// Unsigned 16-bit integer
    Ui2(u16),
    /// 32-bit floating point
    R4(f32),
    /// Narrow string units, normally including the terminating NUL
    LpStr(Vec<u8>),
    /// UTF-16 string units, normally including the terminating NUL
    LpWStr(Vec<u16>),
    /// Binary blob, no terminator
    Blob(Vec<u8>),
    /// Counted signed byte array
    I1Vector(Vec<i8>),
    /// Counted unsigned byte array
    Ui1Vector(Vec<u8>),
}

impl TaggedValue {
    /// Create a boolean value using the `VARIANT_BOOL` convention
    ///
    /// ## Arguments
    /// * `value` - The value to encode; `true` becomes all-ones
    #[must_use]
    pub fn boolean(value: bool) -> Self {
        TaggedValue::Bool(if value { VARIANT_TRUE } else { VARIANT_FALSE })
    }

    /// Create a signed 8-bit value
    #[must_use]
    pub fn i1(value: i8) -> Self {
        TaggedValue::I1(value)
    }

    /// Create an unsigned 8-bit value
    #[must_use]
    pub fn u1(value: u8) -> Self {
        TaggedValue::Ui1(value)
    }

    /// Create an unsigned 16-bit value
    #[must_use]
    pub fn u2(value: u16) -> Self {
        TaggedValue::Ui2(value)
    }

    /// Create a 32-bit float value
    #[must_use]
    pub fn r4(value: f32) -> Self {
        TaggedValue::R4(value)
    }

    /// Create a NUL-terminated narrow string from UTF-8 text
    ///
    /// The text is stored byte for byte; anything after an embedded NUL stays in the buffer but
    /// is never seen by extraction.
    #[must_use]
    pub fn narrow_string(value: &str) -> Self {
        let mut units = Vec::with_capacity(value.len() + 1);
        units.extend_from_slice(value.as_bytes());
        units.push(0);
        TaggedValue::LpStr(units)
    }

    /// Create a NUL-terminated UTF-16 string
    ///
    /// The string is truncated at the first embedded NUL.
    #[must_use]
    pub fn wide_string(value: &str) -> Self {
        TaggedValue::LpWStr(U16CString::from_str_truncate(value).into_vec_with_nul())
    }

    /// Create a binary blob
    #[must_use]
    pub fn blob(value: impl Into<Vec<u8>>) -> Self {
        TaggedValue::Blob(value.into())
    }

    /// Decode a value from a raw tag and its little-endian payload bytes
    ///
    /// ## Arguments
    /// * `raw_tag` - The `VT_*` value of the entry
    /// * `data`    - The payload, as serialized by the store
    ///
    /// # Errors
    /// Returns [`crate::Error::UnknownVariantType`] for unsupported tags, and [`OutOfBounds`]
    /// if a scalar payload is too short or a wide string has an odd byte length.
    pub fn from_raw_parts(raw_tag: u16, data: &[u8]) -> Result<Self> {
        Ok(match VariantType::from_raw(raw_tag)? {
            VariantType::Empty => TaggedValue::Empty,
            VariantType::Bool => TaggedValue::Bool(read_le::<i16>(data)?),
            VariantType::I1 => TaggedValue::I1(read_le::<i8>(data)?),
            VariantType::Ui1 => TaggedValue::Ui1(read_le::<u8>(data)?),
            VariantType::Ui2 => TaggedValue::Ui2(read_le::<u16>(data)?),
            VariantType::R4 => TaggedValue::R4(read_le::<f32>(data)?),
            VariantType::LpStr => TaggedValue::LpStr(data.to_vec()),
            VariantType::LpWStr => {
                if data.len() % 2 != 0 {
                    return Err(OutOfBounds);
                }
                TaggedValue::LpWStr(
                    data.chunks_exact(2)
                        .map(|chunk| u16::from_le_bytes([chunk[0], chunk[1]]))
                        .collect(),
                )
            }
            VariantType::Blob => TaggedValue::Blob(data.to_vec()),
            VariantType::I1Vector => {
                TaggedValue::I1Vector(data.iter().map(|b| i8::from_le_bytes([*b])).collect())
            }
            VariantType::Ui1Vector => TaggedValue::Ui1Vector(data.to_vec()),
        })
    }

    /// The tag selecting the payload shape
    #[must_use]
    pub fn tag(&self) -> VariantType {
        match self {
            TaggedValue::Empty => VariantType::Empty,
            TaggedValue::Bool(_) => VariantType::Bool,
            TaggedValue::I1(_) => VariantType::I1,
            TaggedValue::Ui1(_) => VariantType::Ui1,
            TaggedValue::Ui2(_) => VariantType::Ui2,
            TaggedValue::R4(_) => VariantType::R4,
            TaggedValue::LpStr(_) => VariantType::LpStr,
            TaggedValue::LpWStr(_) => VariantType::LpWStr,
            TaggedValue::Blob(_) => VariantType::Blob,
            TaggedValue::I1Vector(_) => VariantType::I1Vector,
            TaggedValue::Ui1Vector(_) => VariantType::Ui1Vector,
        }
    }

    /// The raw narrow string units, if this is a narrow string
    #[must_use]
    pub fn narrow_units(&self) -> Option<&[u8]> {
        match self {
            TaggedValue::LpStr(units) => Some(units),
            _ => None,
        }
    }

    /// The raw UTF-16 units, if this is a wide string
    #[must_use]
    pub fn wide_units(&self) -> Option<&[u16]> {
        match self {
            TaggedValue::LpWStr(units) => Some(units),
            _ => None,
        }
    }

    /// The bytes of a blob or unsigned byte vector
    #[must_use]
    pub fn bytes(&self) -> Option<&[u8]> {
        match self {
            TaggedValue::Blob(bytes) | TaggedValue::Ui1Vector(bytes) => Some(bytes),
            _ => None,
        }
    }

    /// Number of payload units held in a buffer-bearing value (0 for scalars)
    #[must_use]
    pub fn buffer_len(&self) -> usize {
        match self {
            TaggedValue::LpStr(units)
            | TaggedValue::Blob(units)
            | TaggedValue::Ui1Vector(units) => units.len(),
            TaggedValue::LpWStr(units) => units.len(),
            TaggedValue::I1Vector(units) => units.len(),
            TaggedValue::Empty
            | TaggedValue::Bool(_)
            | TaggedValue::I1(_)
            | TaggedValue::Ui1(_)
            | TaggedValue::Ui2(_)
            | TaggedValue::R4(_) => 0,
        }
    }
}

impl fmt::Display for TaggedValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TaggedValue::Empty => write!(f, "{}", self.tag()),
            TaggedValue::Bool(value) => write!(f, "{}", *value != 0),
            TaggedValue::I1(value) => write!(f, "{}", value),
            TaggedValue::Ui1(value) => write!(f, "{}", value),
            TaggedValue::Ui2(value) => write!(f, "{}", value),
            TaggedValue::R4(value) => write!(f, "{}", value),
            TaggedValue::LpStr(units) => {
                let end = units.iter().position(|u| *u == 0).unwrap_or(units.len());
                write!(f, "\"{}\"", String::from_utf8_lossy(&units[..end]))
            }
            TaggedValue::LpWStr(units) => {
                let end = units.iter().position(|u| *u == 0).unwrap_or(units.len());
                write!(f, "L\"{}\"", String::from_utf16_lossy(&units[..end]))
            }
            TaggedValue::Blob(bytes) | TaggedValue::Ui1Vector(bytes) => {
                write!(f, "Bytes[")?;
                for (i, byte) in bytes.iter().enumerate().take(8) {
                    if i > 0 {
                        write!(f, " ")?;
                    }
                    write!(f, "{:02X}", byte)?;
                }
                if bytes.len() > 8 {
                    write!(f, "...")?;
                }
                write!(f, "]")
            }
            TaggedValue::I1Vector(values) => write!(f, "I1[{} items]", values.len()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;

    #[test]
    fn constructors_set_tag() {
        assert_eq!(TaggedValue::boolean(true).tag(), VariantType::Bool);
        assert_eq!(TaggedValue::i1(-1).tag(), VariantType::I1);
        assert_eq!(TaggedValue::u1(1).tag(), VariantType::Ui1);
        assert_eq!(TaggedValue::u2(1).tag(), VariantType::Ui2);
        assert_eq!(TaggedValue::r4(1.0).tag(), VariantType::R4);
        assert_eq!(TaggedValue::narrow_string("a").tag(), VariantType::LpStr);
        assert_eq!(TaggedValue::wide_string("a").tag(), VariantType::LpWStr);
        assert_eq!(TaggedValue::blob(vec![1, 2]).tag(), VariantType::Blob);
        assert_eq!(TaggedValue::default().tag(), VariantType::Empty);
    }

    #[test]
    fn boolean_encoding() {
        assert_eq!(TaggedValue::boolean(true), TaggedValue::Bool(-1));
        assert_eq!(TaggedValue::boolean(false), TaggedValue::Bool(0));
    }

    #[test]
    fn strings_are_terminated() {
        assert_eq!(
            TaggedValue::narrow_string("Hi").narrow_units(),
            Some(&b"Hi\0"[..])
        );
        assert_eq!(
            TaggedValue::wide_string("Hi").wide_units(),
            Some(&[u16::from(b'H'), u16::from(b'i'), 0][..])
        );
        assert_eq!(
            TaggedValue::wide_string("A\0B").wide_units(),
            Some(&[u16::from(b'A'), 0][..])
        );
    }

    #[test]
    fn shape_accessors() {
        let blob = TaggedValue::blob(vec![1, 2, 3]);
        assert_eq!(blob.bytes(), Some(&[1u8, 2, 3][..]));
        assert_eq!(blob.narrow_units(), None);
        assert_eq!(blob.buffer_len(), 3);

        let vector = TaggedValue::Ui1Vector(vec![9]);
        assert_eq!(vector.bytes(), Some(&[9u8][..]));

        assert_eq!(TaggedValue::u2(7).bytes(), None);
        assert_eq!(TaggedValue::u2(7).buffer_len(), 0);
        assert_eq!(TaggedValue::I1Vector(vec![1, 2]).buffer_len(), 2);
    }

    #[test]
    fn from_raw_parts_scalars() {
        assert_eq!(
            TaggedValue::from_raw_parts(VT::BOOL, &[0xFF, 0xFF]).unwrap(),
            TaggedValue::Bool(VARIANT_TRUE)
        );
        assert_eq!(
            TaggedValue::from_raw_parts(VT::UI2, &[0x2C, 0x01]).unwrap(),
            TaggedValue::Ui2(300)
        );
        assert_eq!(
            TaggedValue::from_raw_parts(VT::R4, &0.5f32.to_le_bytes()).unwrap(),
            TaggedValue::R4(0.5)
        );
        assert_eq!(
            TaggedValue::from_raw_parts(VT::EMPTY, &[]).unwrap(),
            TaggedValue::Empty
        );
    }

    #[test]
    fn from_raw_parts_buffers() {
        assert_eq!(
            TaggedValue::from_raw_parts(VT::LPWSTR, &[0x48, 0x00, 0x00, 0x00]).unwrap(),
            TaggedValue::LpWStr(vec![0x48, 0])
        );
        assert_eq!(
            TaggedValue::from_raw_parts(VT::I1 | VT::VECTOR, &[0xFF, 0x01]).unwrap(),
            TaggedValue::I1Vector(vec![-1, 1])
        );
        assert_eq!(
            TaggedValue::from_raw_parts(VT::BLOB, &[]).unwrap(),
            TaggedValue::Blob(Vec::new())
        );
    }

    #[test]
    fn from_raw_parts_errors() {
        assert!(matches!(
            TaggedValue::from_raw_parts(VT::UI2, &[0x01]),
            Err(Error::OutOfBounds)
        ));
        assert!(matches!(
            TaggedValue::from_raw_parts(VT::LPWSTR, &[0x48, 0x00, 0x00]),
            Err(Error::OutOfBounds)
        ));
        assert!(matches!(
            TaggedValue::from_raw_parts(0x0003, &[0, 0, 0, 0]),
            Err(Error::UnknownVariantType(3))
        ));
    }

    #[test]
    fn display() {
        assert_eq!(TaggedValue::boolean(true).to_string(), "true");
        assert_eq!(TaggedValue::narrow_string("AB").to_string(), "\"AB\"");
        assert_eq!(TaggedValue::wide_string("AB").to_string(), "L\"AB\"");
        assert_eq!(
            TaggedValue::blob(vec![0u8; 10]).to_string(),
            "Bytes[00 00 00 00 00 00 00 00...]"
        );
        assert_eq!(TaggedValue::Empty.to_string(), "VT_EMPTY");
    }
}
