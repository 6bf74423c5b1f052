//! EXIF orientation and the pixel transform that undoes it.
//!
//! Orientation is stored as a `u16` under tag 274. Where it lives depends on the container,
//! see [`Container`]. Values outside `1..=8` occur in the wild and are read as
//! [`Orientation::Normal`].

use bitflags::bitflags;
use strum::{EnumCount, EnumIter};

use crate::{accessor::MetadataAccessor, image::paths, store::PropertyStore, Result};

/// Image container, selecting where orientation metadata is stored
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Container {
    /// JPEG; EXIF lives in the `APP1` segment
    Jpeg,
    /// TIFF and TIFF-based raw formats; the IFD is the root
    Tiff,
    /// Anything else; uses the container-independent property path
    Other,
}

impl Container {
    /// The orientation path for this container
    #[must_use]
    pub fn orientation_path(self) -> &'static str {
        match self {
            Container::Jpeg => paths::ORIENTATION_JPEG,
            Container::Tiff => paths::ORIENTATION_EXIF,
            Container::Other => paths::ORIENTATION_POLICY,
        }
    }
}

/// EXIF orientation, describing how the stored pixels must be transformed for display
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, EnumIter, EnumCount)]
#[repr(u16)]
pub enum Orientation {
    /// Stored upright
    #[default]
    Normal = 1,
    /// Mirrored left to right
    FlipHorizontal = 2,
    /// Upside down
    Rotate180 = 3,
    /// Mirrored top to bottom
    FlipVertical = 4,
    /// Mirrored along the top-left diagonal
    Transpose = 5,
    /// Needs a clockwise quarter turn
    Rotate90 = 6,
    /// Mirrored along the top-right diagonal
    Transverse = 7,
    /// Needs a counter-clockwise quarter turn
    Rotate270 = 8,
}

impl Orientation {
    /// Map a raw tag value, normalizing anything outside `1..=8` to [`Orientation::Normal`]
    #[must_use]
    pub fn from_exif(raw: u16) -> Self {
        match raw {
            2 => Orientation::FlipHorizontal,
            3 => Orientation::Rotate180,
            4 => Orientation::FlipVertical,
            5 => Orientation::Transpose,
            6 => Orientation::Rotate90,
            7 => Orientation::Transverse,
            8 => Orientation::Rotate270,
            _ => Orientation::Normal,
        }
    }

    /// The raw tag value
    #[must_use]
    pub fn to_exif(self) -> u16 {
        self as u16
    }

    /// Whether displaying the image swaps its width and height
    #[must_use]
    pub fn swaps_dimensions(self) -> bool {
        self.to_exif() > 4
    }

    /// The rotate/flip transform that brings the stored pixels upright
    #[must_use]
    pub fn to_transform(self) -> TransformOptions {
        let rotation = match self {
            Orientation::Rotate180 | Orientation::FlipVertical => TransformOptions::ROTATE_180,
            Orientation::Rotate90 | Orientation::Transverse => TransformOptions::ROTATE_90,
            Orientation::Transpose | Orientation::Rotate270 => TransformOptions::ROTATE_270,
            Orientation::Normal | Orientation::FlipHorizontal => TransformOptions::ROTATE_0,
        };

        match self {
            Orientation::FlipHorizontal
            | Orientation::FlipVertical
            | Orientation::Transpose
            | Orientation::Transverse => rotation | TransformOptions::FLIP_HORIZONTAL,
            _ => rotation,
        }
    }

    /// Read the orientation stored for `container`
    ///
    /// A missing or differently typed entry reads as [`Orientation::Normal`].
    #[must_use]
    pub fn read<S: PropertyStore + ?Sized>(
        meta: &MetadataAccessor<'_, S>,
        container: Container,
    ) -> Self {
        meta.get::<u16>(container.orientation_path())
            .map_or(Orientation::Normal, Orientation::from_exif)
    }

    /// Store the orientation for `container`
    ///
    /// # Errors
    /// Propagates the store's write failure.
    pub fn write<S: PropertyStore + ?Sized>(
        self,
        meta: &MetadataAccessor<'_, S>,
        container: Container,
    ) -> Result<()> {
        meta.set(container.orientation_path(), self.to_exif())
    }
}

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    /// Rotate and flip operations applied to decoded pixels
    ///
    /// The rotation occupies the low two bits; flips are independent flags.
    pub struct TransformOptions: u32 {
        /// No rotation
        const ROTATE_0 = 0x0000;
        /// Clockwise quarter turn
        const ROTATE_90 = 0x0001;
        /// Half turn
        const ROTATE_180 = 0x0002;
        /// Counter-clockwise quarter turn
        const ROTATE_270 = 0x0003;
        /// Mirror left to right
        const FLIP_HORIZONTAL = 0x0008;
        /// Mirror top to bottom
        const FLIP_VERTICAL = 0x0010;
    }
}

/// Bitmask for the rotation part of [`TransformOptions`]
pub const TRANSFORM_ROTATION_MASK: u32 = 0x0003;

impl TransformOptions {
    /// The rotation part alone
    #[must_use]
    pub fn rotation(self) -> Self {
        Self::from_bits_truncate(self.bits() & TRANSFORM_ROTATION_MASK)
    }

    /// Whether the transform needs the whole frame buffered before output
    ///
    /// Only the identity and a plain horizontal flip can be applied one line at a time.
    #[must_use]
    pub fn requires_cache(self) -> bool {
        self != TransformOptions::ROTATE_0 && self != TransformOptions::FLIP_HORIZONTAL
    }
}

#[cfg(test)]
mod tests {
    use strum::IntoEnumIterator;

    use super::*;
    use crate::{store::MemoryStore, test::exif_store};

    #[test]
    fn exif_round_trip() {
        assert_eq!(Orientation::iter().count(), Orientation::COUNT);
        for orientation in Orientation::iter() {
            assert_eq!(Orientation::from_exif(orientation.to_exif()), orientation);
        }
    }

    #[test]
    fn out_of_range_is_normal() {
        for raw in [0u16, 9, 274, u16::MAX] {
            assert_eq!(Orientation::from_exif(raw), Orientation::Normal);
        }
    }

    #[test]
    fn transforms() {
        use TransformOptions as T;

        let expected = [
            (Orientation::Normal, T::ROTATE_0),
            (Orientation::FlipHorizontal, T::FLIP_HORIZONTAL),
            (Orientation::Rotate180, T::ROTATE_180),
            (Orientation::FlipVertical, T::ROTATE_180 | T::FLIP_HORIZONTAL),
            (Orientation::Transpose, T::ROTATE_270 | T::FLIP_HORIZONTAL),
            (Orientation::Rotate90, T::ROTATE_90),
            (Orientation::Transverse, T::ROTATE_90 | T::FLIP_HORIZONTAL),
            (Orientation::Rotate270, T::ROTATE_270),
        ];
        for (orientation, transform) in expected {
            assert_eq!(orientation.to_transform(), transform, "{orientation:?}");
        }
    }

    #[test]
    fn rotation_part() {
        let t = TransformOptions::ROTATE_270 | TransformOptions::FLIP_HORIZONTAL;
        assert_eq!(t.rotation(), TransformOptions::ROTATE_270);
        assert_eq!(TransformOptions::FLIP_VERTICAL.rotation(), TransformOptions::ROTATE_0);
    }

    #[test]
    fn requires_cache() {
        assert!(!Orientation::Normal.to_transform().requires_cache());
        assert!(!Orientation::FlipHorizontal.to_transform().requires_cache());
        for orientation in Orientation::iter().skip(2) {
            assert!(orientation.to_transform().requires_cache(), "{orientation:?}");
        }
    }

    #[test]
    fn swaps_dimensions() {
        let swapped: Vec<_> = Orientation::iter().filter(|o| o.swaps_dimensions()).collect();
        assert_eq!(
            swapped,
            [
                Orientation::Transpose,
                Orientation::Rotate90,
                Orientation::Transverse,
                Orientation::Rotate270
            ]
        );
    }

    #[test]
    fn read_per_container() {
        let store = exif_store();
        let meta = MetadataAccessor::new(&store);

        assert_eq!(Orientation::read(&meta, Container::Jpeg), Orientation::Rotate90);
        assert_eq!(Orientation::read(&meta, Container::Tiff), Orientation::FlipVertical);
        assert_eq!(Orientation::read(&meta, Container::Other), Orientation::Normal);
        assert_eq!(store.outstanding(), 0);
    }

    #[test]
    fn read_wrong_type_is_normal() {
        let store = MemoryStore::new();
        store
            .insert(paths::ORIENTATION_EXIF, crate::TaggedValue::u1(6))
            .unwrap();
        let meta = MetadataAccessor::new(&store);
        assert_eq!(Orientation::read(&meta, Container::Tiff), Orientation::Normal);
    }

    #[test]
    fn write_then_read() {
        let store = MemoryStore::new();
        let meta = MetadataAccessor::new(&store);

        Orientation::Transverse.write(&meta, Container::Jpeg).unwrap();
        assert_eq!(meta.get::<u16>(paths::ORIENTATION_JPEG), Some(7));
        assert_eq!(Orientation::read(&meta, Container::Jpeg), Orientation::Transverse);
    }
}
