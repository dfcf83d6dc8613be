//! A `serde` view of beans.
//!
//! [`BeanSerialize`] serializes any bean through its kind view:
//!
//! - conventional and dynamic beans, maps: a map of property name to value.
//! - lists and arrays: a sequence.
//! - optional values: an option; [`Null`](crate::Null) is `none`.
//! - scalars: their own [`Serialize`](serde_core::Serialize) implementation,
//!   see [`Bean::as_serialize`](crate::Bean::as_serialize).
//!
//! Only readable properties are serialized. There is no deserialization,
//! values are stored through the entry points instead.

// -----------------------------------------------------------------------------
// Modules

mod driver;
mod serializers;

// -----------------------------------------------------------------------------
// Exports

pub use driver::BeanSerialize;
