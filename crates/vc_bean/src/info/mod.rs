//! Type information of beans.
//!
//! - [`TypeInfo`]: what the resolver needs to know about a type, its
//!   [`BeanKind`], element type and default constructor.
//! - [`Typed`]: static access to a type's [`TypeInfo`].
//! - [`PropertyDescriptor`] and [`BeanInfo`]: the accessor descriptors of a
//!   conventional bean, memoized by the
//!   [`IntrospectionCache`](crate::registry::IntrospectionCache).

// -----------------------------------------------------------------------------
// Modules

mod bean_info;
mod descriptor;
mod kind;
mod type_info;

// -----------------------------------------------------------------------------
// Exports

pub use bean_info::{BeanInfo, DescriptorIter};
pub use descriptor::{PropertyDescriptor, PropertyShape};
pub use kind::BeanKind;
pub use type_info::{TypeInfo, Typed};
