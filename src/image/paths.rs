//! Well-known metadata query paths.
//!
//! Paths follow the metadata query language of the hosting codec: a slash-separated walk
//! through blocks, with `{type=id}` selecting a numbered tag inside an IFD. Paths written for
//! a raw EXIF/TIFF container gain an `/app1` prefix inside a JPEG.

/// EXIF interoperability index inside a TIFF container
pub const INTEROP_INDEX_EXIF: &str = "/ifd/exif/interop/{ushort=1}";
/// EXIF interoperability index inside a JPEG `APP1` segment
pub const INTEROP_INDEX_JPEG: &str = "/app1/ifd/exif/interop/{ushort=1}";

/// Orientation through the container-independent property system
pub const ORIENTATION_POLICY: &str = "System.Photo.Orientation";
/// Orientation tag (274) inside a TIFF container
pub const ORIENTATION_EXIF: &str = "/ifd/{ushort=274}";
/// Orientation tag (274) inside a JPEG `APP1` segment
pub const ORIENTATION_JPEG: &str = "/app1/ifd/{ushort=274}";

/// GIF block paths
pub mod gif {
    /// Logical screen width, `u16`
    pub const LOGICAL_SCREEN_WIDTH: &str = "/logscrdesc/Width";
    /// Logical screen height, `u16`
    pub const LOGICAL_SCREEN_HEIGHT: &str = "/logscrdesc/Height";
    /// Pixel aspect ratio byte, `u8`
    pub const PIXEL_ASPECT_RATIO: &str = "/logscrdesc/PixelAspectRatio";
    /// Global color table present, `bool`
    pub const GLOBAL_PALETTE_FLAG: &str = "/logscrdesc/GlobalColorTableFlag";
    /// Background color index into the global table, `u8`
    pub const BACKGROUND_COLOR_INDEX: &str = "/logscrdesc/BackgroundColorIndex";

    /// Application extension identifier and authentication code, narrow string or bytes
    pub const APP_EXTENSION: &str = "/appext/application";
    /// Application extension sub-blocks, blob
    pub const APP_EXTENSION_DATA: &str = "/appext/data";

    /// Frame left offset, `u16`
    pub const FRAME_LEFT: &str = "/imgdesc/Left";
    /// Frame top offset, `u16`
    pub const FRAME_TOP: &str = "/imgdesc/Top";
    /// Frame width, `u16`
    pub const FRAME_WIDTH: &str = "/imgdesc/Width";
    /// Frame height, `u16`
    pub const FRAME_HEIGHT: &str = "/imgdesc/Height";
    /// Local color table present, `bool`
    pub const FRAME_PALETTE_FLAG: &str = "/imgdesc/LocalColorTableFlag";

    /// Frame delay in hundredths of a second, `u16`
    pub const FRAME_DELAY: &str = "/grctlext/Delay";
    /// Frame disposal method, `u8`
    pub const FRAME_DISPOSAL: &str = "/grctlext/Disposal";
    /// Transparent color index is valid, `bool`
    pub const TRANSPARENCY_FLAG: &str = "/grctlext/TransparencyFlag";
    /// Transparent color index, `u8`
    pub const TRANSPARENT_COLOR_INDEX: &str = "/grctlext/TransparentColorIndex";
}
