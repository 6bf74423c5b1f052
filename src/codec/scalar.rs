//! Scalar coercion between Rust types and tagged values.
//!
//! Every supported scalar type has exactly one canonical tag. Reading succeeds only when the
//! stored tag is that tag; a `u16` request never accepts a float or a byte, so unrelated bit
//! patterns are never reinterpreted. No numeric transformation happens in either direction.
//!
//! | Rust type | Tag       |
//! |-----------|-----------|
//! | `bool`    | `VT_BOOL` |
//! | `u8`      | `VT_UI1`  |
//! | `u16`     | `VT_UI2`  |
//! | `f32`     | `VT_R4`   |
//!
//! Types outside this table have no [`Scalar`] implementation, so asking for one is rejected at
//! compile time. Runtime-typed requests use [`crate::VariantType::is_scalar`] and fail with
//! [`crate::Error::UnsupportedType`].

use crate::variant::{TaggedValue, VariantType, VARIANT_FALSE, VARIANT_TRUE};

/// A scalar type with a canonical variant tag.
///
/// Implementations must accept exactly one payload arm in [`Scalar::from_tagged`] and produce
/// that same arm in [`Scalar::into_tagged`].
pub trait Scalar: Copy + Sized {
    /// The tag values of this type are stored under
    const TAG: VariantType;

    /// Extract the scalar if `value` carries [`Scalar::TAG`]
    fn from_tagged(value: &TaggedValue) -> Option<Self>;

    /// Wrap the scalar in its canonical tagged form
    fn into_tagged(self) -> TaggedValue;
}

impl Scalar for bool {
    const TAG: VariantType = VariantType::Bool;

    fn from_tagged(value: &TaggedValue) -> Option<Self> {
        match value {
            TaggedValue::Bool(raw) => Some(*raw != VARIANT_FALSE),
            _ => None,
        }
    }

    fn into_tagged(self) -> TaggedValue {
        TaggedValue::Bool(if self { VARIANT_TRUE } else { VARIANT_FALSE })
    }
}

impl Scalar for u8 {
    const TAG: VariantType = VariantType::Ui1;

    fn from_tagged(value: &TaggedValue) -> Option<Self> {
        match value {
            TaggedValue::Ui1(raw) => Some(*raw),
            _ => None,
        }
    }

    fn into_tagged(self) -> TaggedValue {
        TaggedValue::Ui1(self)
    }
}

impl Scalar for u16 {
    const TAG: VariantType = VariantType::Ui2;

    fn from_tagged(value: &TaggedValue) -> Option<Self> {
        match value {
            TaggedValue::Ui2(raw) => Some(*raw),
            _ => None,
        }
    }

    fn into_tagged(self) -> TaggedValue {
        TaggedValue::Ui2(self)
    }
}

impl Scalar for f32 {
    const TAG: VariantType = VariantType::R4;

    fn from_tagged(value: &TaggedValue) -> Option<Self> {
        match value {
            TaggedValue::R4(raw) => Some(*raw),
            _ => None,
        }
    }

    fn into_tagged(self) -> TaggedValue {
        TaggedValue::R4(self)
    }
}

/// Read a `T` from `value`, tracing the actual tag when it is not `T::TAG`
///
/// ## Arguments
/// * `value` - The looked-up value
/// * `trace` - Emit a `debug` record on mismatch
#[must_use]
pub fn read<T: Scalar>(value: &TaggedValue, trace: bool) -> Option<T> {
    let read = T::from_tagged(value);
    if read.is_none() && trace {
        log::debug!(
            "VT: {} unexpected for type: {} (expected {})",
            value.tag(),
            std::any::type_name::<T>(),
            T::TAG
        );
    }
    read
}

/// Produce the canonical tagged form of `value`
#[must_use]
pub fn write<T: Scalar>(value: T) -> TaggedValue {
    value.into_tagged()
}
