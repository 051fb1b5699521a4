//! Foundation types for shapediff.
//!
//! Every other shapediff crate depends on `shapediff-types`. Values
//! themselves are plain [`serde_json::Value`]s; this crate adds the
//! vocabulary used to address and classify them.
//!
//! # Key Types
//!
//! - [`Shape`] — Structural category of a value (scalar, list, record)
//! - [`PathSegment`] — One step into a record (key) or list (index)
//! - [`ValuePath`] — Ordered path from a root value to a nested value
//! - [`TypeError`] — Parse failures for the types above

pub mod error;
pub mod path;
pub mod shape;

pub use error::TypeError;
pub use path::{PathSegment, ValuePath};
pub use shape::Shape;
