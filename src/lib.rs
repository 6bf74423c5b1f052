// Copyright 2025 Johann Kempter
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.
//
// SPDX-License-Identifier: Apache-2.0

#![doc(html_no_source)]
#![deny(missing_docs)]
#![allow(dead_code)]

//! # metavariant
//!
//! A codec between strongly typed Rust values and the tagged-variant entries of an image
//! metadata property store.
//!
//! Image containers expose their metadata (EXIF orientation, GIF frame timing, encoder options)
//! through a hierarchical store addressed by path strings. Each entry is a tag naming the
//! payload type plus the payload itself. `metavariant` reads such entries as `bool`, `u8`,
//! `u16` and `f32` values, copies strings and byte arrays into caller-owned buffers, and writes
//! typed values back, without ever reinterpreting a payload under the wrong tag and without
//! leaking or double-releasing the values the store hands out.
//!
//! ## Features
//!
//! - **Tag-checked scalars** - a read succeeds only if the entry carries the type's canonical tag
//! - **Bounded extraction** - copies are clamped to the destination, string scans are bounded
//! - **Scoped release** - every looked-up value is given back to the store exactly once
//! - **Pluggable stores** - anything implementing [`PropertyStore`]; [`MemoryStore`] included
//! - **Image helpers** - EXIF orientation, GIF descriptors and encoder options on top
//!
//! ## Quick Start
//!
//! ```rust
//! use metavariant::prelude::*;
//!
//! let store = MemoryStore::new();
//! let meta = MetadataAccessor::new(&store);
//!
//! meta.set(paths::ORIENTATION_JPEG, 6u16)?;
//!
//! let orientation = Orientation::read(&meta, Container::Jpeg);
//! assert_eq!(orientation, Orientation::Rotate90);
//! assert!(orientation.to_transform().requires_cache());
//! # Ok::<(), metavariant::Error>(())
//! ```
//!
//! ## Architecture
//!
//! - [`variant`] - [`TaggedValue`] and the [`VariantType`] tag set
//! - [`codec`] - scalar coercion, array extraction and [`CodecConfig`]
//! - [`store`] - the [`PropertyStore`] and [`PropertyBag`] seams, [`Lease`], in-memory stores
//! - [`accessor`] - [`MetadataAccessor`], tying lookup, conversion and release together
//! - [`image`] - metadata paths, orientation and GIF descriptors
//!
//! ### Failure model
//!
//! A missing entry or an entry with a different tag is routine for optional metadata and reads
//! as `None` (or an empty slice). Store write failures, and runtime-typed requests for types
//! the codec does not handle, are reported as [`Error`].
//!
//! ## Logging
//!
//! The crate logs through the [`log`](https://docs.rs/log) facade and never installs a logger.
//! Tag mismatches are traced at `debug`, swallowed store failures at `warn`, and the
//! in-memory store traces lookups and releases at `trace`.
#[macro_use]
pub(crate) mod macros;

#[macro_use]
pub(crate) mod error;
pub(crate) mod utils;

/// Shared functionality which is used in unit- and integration-tests
#[cfg(test)]
pub(crate) mod test;

/// Convenient re-exports of the most commonly used types and traits.
///
/// # Example
///
/// ```rust
/// use metavariant::prelude::*;
///
/// let store = MemoryStore::new();
/// let meta = MetadataAccessor::new(&store);
/// assert_eq!(meta.get::<u16>(gif::FRAME_DELAY), None);
/// ```
pub mod prelude;

pub mod accessor;
pub mod codec;
pub mod image;
pub mod store;
pub mod variant;

/// A type alias for [`std::result::Result<T, Error>`] where the error type is always [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

/// `metavariant` Error type
///
/// # Examples
///
/// ```rust
/// use metavariant::{Error, MemoryBag, write_option};
///
/// match write_option(&MemoryBag::new(), "Width", 16u16) {
///     Err(Error::UnsupportedType { requested }) => println!("cannot write {requested}"),
///     Err(e) => println!("Error: {}", e),
///     Ok(()) => println!("written"),
/// }
/// ```
pub use error::Error;

pub use accessor::MetadataAccessor;
pub use codec::{ArrayElement, CodecConfig, Scalar};
pub use store::{write_option, Lease, MemoryBag, MemoryStore, PropertyBag, PropertyStore};
pub use variant::{TaggedValue, VariantType};
