//! Capability traits of beans and the dynamic containers.
//!
//! ## Menu
//!
//! The following subtraits of [`Bean`] give the path resolver access to
//! the parts of a value:
//!
//! - [`Properties`]: conventional objects with named properties (e.g. `#[derive(Bean)] struct A { .. }`).
//! - [`List`]: growable sequences (e.g. `Vec<T>`).
//! - [`Array`]: fixed size sequences (e.g. `[T; 4]`).
//! - [`PropertyMap`]: string keyed mappings (e.g. `BTreeMap<String, T>`).
//! - [`Optional`]: values that may be absent (`Option<T>`).
//!
//! [`DynamicList`] and [`DynamicMap`] are type-erased containers whose element
//! type is fixed by the first value they store.
//!
//! [`Bean`]: crate::Bean

// -----------------------------------------------------------------------------
// Modules

mod array;
mod dynamic_list;
mod dynamic_map;
mod kind;
mod list;
mod map;
mod optional;
mod properties;

// -----------------------------------------------------------------------------
// Exports

pub use array::{Array, ArrayIter};
pub use dynamic_list::DynamicList;
pub use dynamic_map::DynamicMap;
pub use kind::{BeanMut, BeanRef};
pub use list::{List, ListIter};
pub use map::{MapIter, PropertyMap};
pub use optional::Optional;
pub use properties::Properties;

/// Returns `true` when `value` may be stored in a slot of type `element`.
///
/// An unknown element type accepts everything.
#[inline]
pub(crate) fn accepts(element: Option<&crate::info::TypeInfo>, value: &dyn crate::Bean) -> bool {
    element.is_none_or(|info| info.type_id() == value.ty_id())
}
