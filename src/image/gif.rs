//! GIF container metadata.
//!
//! Reads and writes the logical screen descriptor, per-frame image descriptor and graphic
//! control extension, and the looping application extension, all through a
//! [`MetadataAccessor`]. Optional fields that are missing read as zero / `false`, the same
//! defaults a decoder applies to a file without the corresponding block.

use crate::{
    accessor::MetadataAccessor,
    image::paths::gif as path,
    store::PropertyStore,
    utils::io::read_le_at,
    variant::TaggedValue,
    Result,
};

/// Application identifier plus authentication code of the Netscape looping extension
pub const NETSCAPE_APPLICATION: &[u8; 11] = b"NETSCAPE2.0";
/// Identifier used by some encoders for the same looping extension
pub const ANIMEXTS_APPLICATION: &[u8; 11] = b"ANIMEXTS1.0";

/// Sub-block id of the loop count inside the looping extension
const LOOP_SUB_BLOCK_ID: u8 = 1;

/// The logical screen descriptor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScreenDescriptor {
    /// Canvas width in pixels
    pub width: u16,
    /// Canvas height in pixels
    pub height: u16,
    /// Raw aspect ratio byte; `0` means square pixels
    pub pixel_aspect_ratio: u8,
    /// Whether a global color table follows
    pub global_palette: bool,
    /// Background color index into the global color table
    pub background_color_index: u8,
}

impl ScreenDescriptor {
    /// Read the descriptor, or `None` if the canvas size is not present
    #[must_use]
    pub fn read<S: PropertyStore + ?Sized>(meta: &MetadataAccessor<'_, S>) -> Option<Self> {
        Some(ScreenDescriptor {
            width: meta.get(path::LOGICAL_SCREEN_WIDTH)?,
            height: meta.get(path::LOGICAL_SCREEN_HEIGHT)?,
            pixel_aspect_ratio: meta.get_or_default(path::PIXEL_ASPECT_RATIO),
            global_palette: meta.get_or_default(path::GLOBAL_PALETTE_FLAG),
            background_color_index: meta.get_or_default(path::BACKGROUND_COLOR_INDEX),
        })
    }

    /// Write every field
    ///
    /// # Errors
    /// Propagates the first store write failure.
    pub fn write<S: PropertyStore + ?Sized>(&self, meta: &MetadataAccessor<'_, S>) -> Result<()> {
        meta.set(path::LOGICAL_SCREEN_WIDTH, self.width)?;
        meta.set(path::LOGICAL_SCREEN_HEIGHT, self.height)?;
        meta.set(path::PIXEL_ASPECT_RATIO, self.pixel_aspect_ratio)?;
        meta.set(path::GLOBAL_PALETTE_FLAG, self.global_palette)?;
        meta.set(path::BACKGROUND_COLOR_INDEX, self.background_color_index)
    }
}

/// What happens to a frame's area before the next frame is drawn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(u8)]
pub enum Disposal {
    /// No disposal specified; treated like [`Disposal::DoNotDispose`]
    #[default]
    Unspecified = 0,
    /// Leave the frame in place
    DoNotDispose = 1,
    /// Clear the frame area to the background
    RestoreBackground = 2,
    /// Restore the area to what it was before the frame was drawn
    RestorePrevious = 3,
}

impl From<u8> for Disposal {
    fn from(raw: u8) -> Self {
        match raw {
            1 => Disposal::DoNotDispose,
            2 => Disposal::RestoreBackground,
            3 => Disposal::RestorePrevious,
            _ => Disposal::Unspecified,
        }
    }
}

/// Image descriptor and graphic control extension of one frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FrameDescriptor {
    /// Left offset on the canvas
    pub left: u16,
    /// Top offset on the canvas
    pub top: u16,
    /// Frame width in pixels
    pub width: u16,
    /// Frame height in pixels
    pub height: u16,
    /// Whether a local color table follows
    pub local_palette: bool,
    /// Display time in hundredths of a second
    pub delay: u16,
    /// Disposal method
    pub disposal: Disposal,
    /// Whether [`FrameDescriptor::transparent_color_index`] is valid
    pub transparency: bool,
    /// Palette index treated as transparent
    pub transparent_color_index: u8,
}

impl FrameDescriptor {
    /// Read the frame metadata, or `None` if the frame size is not present
    #[must_use]
    pub fn read<S: PropertyStore + ?Sized>(meta: &MetadataAccessor<'_, S>) -> Option<Self> {
        Some(FrameDescriptor {
            left: meta.get_or_default(path::FRAME_LEFT),
            top: meta.get_or_default(path::FRAME_TOP),
            width: meta.get(path::FRAME_WIDTH)?,
            height: meta.get(path::FRAME_HEIGHT)?,
            local_palette: meta.get_or_default(path::FRAME_PALETTE_FLAG),
            delay: meta.get_or_default(path::FRAME_DELAY),
            disposal: Disposal::from(meta.get_or_default::<u8>(path::FRAME_DISPOSAL)),
            transparency: meta.get_or_default(path::TRANSPARENCY_FLAG),
            transparent_color_index: meta.get_or_default(path::TRANSPARENT_COLOR_INDEX),
        })
    }

    /// Write every field
    ///
    /// # Errors
    /// Propagates the first store write failure.
    pub fn write<S: PropertyStore + ?Sized>(&self, meta: &MetadataAccessor<'_, S>) -> Result<()> {
        meta.set(path::FRAME_LEFT, self.left)?;
        meta.set(path::FRAME_TOP, self.top)?;
        meta.set(path::FRAME_WIDTH, self.width)?;
        meta.set(path::FRAME_HEIGHT, self.height)?;
        meta.set(path::FRAME_PALETTE_FLAG, self.local_palette)?;
        meta.set(path::FRAME_DELAY, self.delay)?;
        meta.set(path::FRAME_DISPOSAL, self.disposal as u8)?;
        meta.set(path::TRANSPARENCY_FLAG, self.transparency)?;
        meta.set(path::TRANSPARENT_COLOR_INDEX, self.transparent_color_index)
    }
}

/// The looping application extension
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AnimationExtension {
    /// Number of times to repeat the animation; `0` loops forever
    pub loop_count: u16,
}

impl AnimationExtension {
    /// Read the looping extension, or `None` if the file has none
    ///
    /// Application extensions with another identifier, and looping extensions whose data does
    /// not hold a loop count sub-block, are ignored.
    #[must_use]
    pub fn read<S: PropertyStore + ?Sized>(meta: &MetadataAccessor<'_, S>) -> Option<Self> {
        let mut application = [0u8; 11];
        let application = meta.get_bytes(path::APP_EXTENSION, &mut application);
        if application != NETSCAPE_APPLICATION && application != ANIMEXTS_APPLICATION {
            return None;
        }

        let mut data = [0u8; 16];
        let data = meta.get_bytes(path::APP_EXTENSION_DATA, &mut data);
        match Self::decode(data) {
            Ok(ext) => ext,
            Err(e) => {
                log::debug!("malformed looping extension data ({} bytes): {e}", data.len());
                None
            }
        }
    }

    /// Decode the extension from its data sub-blocks
    ///
    /// # Errors
    /// Returns [`crate::Error::OutOfBounds`] if a sub-block is truncated.
    pub fn decode(data: &[u8]) -> Result<Option<Self>> {
        let mut offset = 0;
        let size = read_le_at::<u8>(data, &mut offset)?;
        let id = read_le_at::<u8>(data, &mut offset)?;
        if size < 3 || id != LOOP_SUB_BLOCK_ID {
            return Ok(None);
        }

        let loop_count = read_le_at::<u16>(data, &mut offset)?;
        Ok(Some(AnimationExtension { loop_count }))
    }

    /// The data sub-blocks for this extension, including the block terminator
    #[must_use]
    pub fn encode(&self) -> [u8; 5] {
        let [lo, hi] = self.loop_count.to_le_bytes();
        [3, LOOP_SUB_BLOCK_ID, lo, hi, 0]
    }

    /// Write the identifier and data blocks
    ///
    /// Both are byte arrays rather than scalars, so they go to the store directly.
    ///
    /// # Errors
    /// Propagates the first store write failure.
    pub fn write<S: PropertyStore + ?Sized>(&self, meta: &MetadataAccessor<'_, S>) -> Result<()> {
        let store = meta.store();
        store.write(
            path::APP_EXTENSION,
            &TaggedValue::Ui1Vector(NETSCAPE_APPLICATION.to_vec()),
        )?;
        store.write(path::APP_EXTENSION_DATA, &TaggedValue::blob(self.encode()))
    }
}
