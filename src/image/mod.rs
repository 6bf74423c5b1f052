//! Image metadata built on the codec.
//!
//! - [`paths`] - well-known metadata query paths
//! - [`orientation`] - EXIF orientation and the matching rotate/flip transform
//! - [`gif`] - GIF screen, frame and looping metadata

pub mod gif;
pub mod orientation;
pub mod paths;

pub use orientation::{Container, Orientation, TransformOptions};
