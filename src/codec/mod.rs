//! Conversion between Rust values and tagged values.
//!
//! - [`scalar`] - `bool`, `u8`, `u16` and `f32` against their canonical tags, both directions
//! - [`array`] - bounded copies of strings, blobs and byte vectors into caller buffers
//! - [`config`] - scan bounds and tracing switches shared by both
//!
//! Neither half touches the store: looking values up and releasing them is the job of
//! [`crate::MetadataAccessor`].

pub mod array;
pub mod config;
pub mod scalar;

pub use array::{extract, ArrayElement};
pub use config::CodecConfig;
pub use scalar::Scalar;
