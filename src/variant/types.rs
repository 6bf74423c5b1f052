//! Variant type tags.
//!
//! The numbering follows the platform variant convention (`VT_*`), so raw tags coming out of a
//! native store can be mapped without translation tables. Only the shapes used by image
//! metadata round-tripping are modelled; everything else is rejected by
//! [`VariantType::from_raw`].

use strum::{Display, EnumCount, EnumIter};

use crate::{Error::UnknownVariantType, Result};

#[allow(non_snake_case, missing_docs)]
/// Raw `VT_*` tag values and the vector modifier flag
pub mod VT {
    pub const EMPTY: u16 = 0;
    pub const R4: u16 = 4;
    pub const BOOL: u16 = 11;
    pub const I1: u16 = 16;
    pub const UI1: u16 = 17;
    pub const UI2: u16 = 18;
    pub const LPSTR: u16 = 30;
    pub const LPWSTR: u16 = 31;
    pub const BLOB: u16 = 65;
    // Counted array of the base type
    pub const VECTOR: u16 = 0x1000;
}

/// `VARIANT_BOOL` encoding of `true`: all sixteen bits set.
pub const VARIANT_TRUE: i16 = -1;
/// `VARIANT_BOOL` encoding of `false`.
pub const VARIANT_FALSE: i16 = 0;

/// The discriminant of a [`crate::TaggedValue`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter, EnumCount)]
pub enum VariantType {
    /// No value
    #[strum(serialize = "VT_EMPTY")]
    Empty,
    /// 16-bit `VARIANT_BOOL`
    #[strum(serialize = "VT_BOOL")]
    Bool,
    /// Signed 8-bit integer
    #[strum(serialize = "VT_I1")]
    I1,
    /// Unsigned 8-bit integer
    #[strum(serialize = "VT_UI1")]
    Ui1,
    /// Unsigned 16-bit integer
    #[strum(serialize = "VT_UI2")]
    Ui2,
    /// 32-bit IEEE float
    #[strum(serialize = "VT_R4")]
    R4,
    /// Null-terminated narrow string
    #[strum(serialize = "VT_LPSTR")]
    LpStr,
    /// Null-terminated UTF-16 string
    #[strum(serialize = "VT_LPWSTR")]
    LpWStr,
    /// Counted binary blob
    #[strum(serialize = "VT_BLOB")]
    Blob,
    /// Counted array of signed bytes
    #[strum(serialize = "VT_I1|VT_VECTOR")]
    I1Vector,
    /// Counted array of unsigned bytes
    #[strum(serialize = "VT_UI1|VT_VECTOR")]
    Ui1Vector,
}

impl VariantType {
    /// Get the raw `VT_*` value of this tag
    #[must_use]
    pub fn as_raw(self) -> u16 {
        match self {
            VariantType::Empty => VT::EMPTY,
            VariantType::Bool => VT::BOOL,
            VariantType::I1 => VT::I1,
            VariantType::Ui1 => VT::UI1,
            VariantType::Ui2 => VT::UI2,
            VariantType::R4 => VT::R4,
            VariantType::LpStr => VT::LPSTR,
            VariantType::LpWStr => VT::LPWSTR,
            VariantType::Blob => VT::BLOB,
            VariantType::I1Vector => VT::I1 | VT::VECTOR,
            VariantType::Ui1Vector => VT::UI1 | VT::VECTOR,
        }
    }

    /// Parse a raw `VT_*` value
    ///
    /// ## Arguments
    /// * `raw` - The tag value as reported by the store
    ///
    /// # Errors
    /// Returns [`UnknownVariantType`] if the value is not one of the supported tags.
    pub fn from_raw(raw: u16) -> Result<Self> {
        match raw {
            VT::EMPTY => Ok(VariantType::Empty),
            VT::BOOL => Ok(VariantType::Bool),
            VT::I1 => Ok(VariantType::I1),
            VT::UI1 => Ok(VariantType::Ui1),
            VT::UI2 => Ok(VariantType::Ui2),
            VT::R4 => Ok(VariantType::R4),
            VT::LPSTR => Ok(VariantType::LpStr),
            VT::LPWSTR => Ok(VariantType::LpWStr),
            VT::BLOB => Ok(VariantType::Blob),
            raw if raw == VT::I1 | VT::VECTOR => Ok(VariantType::I1Vector),
            raw if raw == VT::UI1 | VT::VECTOR => Ok(VariantType::Ui1Vector),
            _ => Err(UnknownVariantType(raw)),
        }
    }

    /// Is this one of the scalar tags the codec coerces (`bool`, `u8`, `u16`, `f32`)
    #[must_use]
    pub fn is_scalar(self) -> bool {
        matches!(
            self,
            VariantType::Bool | VariantType::Ui1 | VariantType::Ui2 | VariantType::R4
        )
    }

    /// Does a value with this tag carry a store-owned buffer
    #[must_use]
    pub fn is_buffer(self) -> bool {
        matches!(
            self,
            VariantType::LpStr
                | VariantType::LpWStr
                | VariantType::Blob
                | VariantType::I1Vector
                | VariantType::Ui1Vector
        )
    }
}
