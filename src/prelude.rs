//! # metavariant Prelude
//!
//! This module provides a convenient prelude for the most commonly used types and traits
//! from the metavariant library. Import this module to get quick access to the essential
//! types for reading and writing image metadata.

// ================================================================================================
// Core Types and Error Handling
// ================================================================================================

/// The main error type for all metavariant operations
pub use crate::Error;

/// The result type used throughout metavariant
pub use crate::Result;

/// Scan bounds and tracing switches
pub use crate::CodecConfig;

// ================================================================================================
// Values and Conversion
// ================================================================================================

/// A tagged store entry and its tag
pub use crate::variant::{TaggedValue, VariantType};

/// Scalar and array conversion traits
pub use crate::codec::{ArrayElement, Scalar};

// ================================================================================================
// Stores and Access
// ================================================================================================

/// Typed access to a property store
pub use crate::MetadataAccessor;

/// Store seams and scoped release
pub use crate::store::{Lease, PropertyBag, PropertyStore};

/// In-memory stores
pub use crate::store::{MemoryBag, MemoryStore};

/// Encoder option helpers
pub use crate::store::{options, write_option};

// ================================================================================================
// Image Metadata
// ================================================================================================

/// Well-known metadata paths
pub use crate::image::paths::{self, gif};

/// Orientation handling
pub use crate::image::{Container, Orientation, TransformOptions};

/// GIF descriptors
pub use crate::image::gif::{AnimationExtension, Disposal, FrameDescriptor, ScreenDescriptor};
