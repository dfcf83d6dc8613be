//! Shared caches of type level information.
//!
//! ## Menu
//!
//! - [`IntrospectionCache`]: memoized [`BeanInfo`] per type.
//! - [`ConvertRegistry`]: text conversion of scalar values.
//! - [`BeanContext`]: one cache and one registry, shared by the entry points
//!   of an isolated environment.
//!
//! ## auto_register
//!
//! See [`ConvertRegistry::auto_register`].
//!
//! Converters declared with [`register_converter!`](crate::register_converter)
//! are collected through the [`inventory`] crate. Not every platform supports
//! it; there `auto_register` returns `false` and nothing else happens.
//!
//! [`BeanInfo`]: crate::info::BeanInfo
//! [`inventory`]: https://docs.rs/inventory

// -----------------------------------------------------------------------------
// Modules

mod context;
mod convert;
mod introspection;

// -----------------------------------------------------------------------------
// Exports

pub use context::BeanContext;
pub use convert::{ConversionError, ConvertRegistry, Converter};
pub use introspection::IntrospectionCache;

#[doc(hidden)]
pub use convert::ConverterRegistration;
