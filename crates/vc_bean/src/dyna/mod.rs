//! Dynamic property containers.
//!
//! ## Menu
//!
//! - [`DynaClass`] / [`DynaProperty`]: the declared properties.
//! - [`DynaBean`]: the access protocol of dynamic beans.
//! - [`BasicDynaBean`]: a fixed property set, declared up front.
//! - [`LazyDynaBean`]: a property set that grows on first write.
//! - [`WrapDynaBean`]: the dynamic view of a conventional bean.

// -----------------------------------------------------------------------------
// Modules

mod basic;
mod class;
mod lazy;
mod wrap;

// -----------------------------------------------------------------------------
// Exports

pub use basic::BasicDynaBean;
pub use class::{DynaClass, DynaProperty};
pub use lazy::LazyDynaBean;
pub use wrap::WrapDynaBean;

use alloc::boxed::Box;
use alloc::string::ToString;

use crate::access::{Selector, select, select_mut, store, unwrap_optional, unwrap_optional_mut};
use crate::info::TypeInfo;
use crate::ops::{BeanMut, BeanRef, DynamicList, DynamicMap};
use crate::{Bean, PropertyError};

// -----------------------------------------------------------------------------
// DynaBean

/// A bean whose properties are described at runtime by a [`DynaClass`].
///
/// Reads return `Ok(None)` for a property without a value. Indexed and
/// keyed access address into a list or map stored in the named property.
pub trait DynaBean: Bean {
    /// The property declarations.
    fn dyna_class(&self) -> &DynaClass;

    /// Returns `true` if undeclared names are valid, as for a
    /// [`LazyDynaBean`].
    #[inline]
    fn accepts_undeclared(&self) -> bool {
        false
    }

    /// Returns `true` if the map in `name` holds `key`.
    fn contains(&self, name: &str, key: &str) -> Result<bool, PropertyError>;

    /// The value of `name`.
    fn get(&self, name: &str) -> Result<Option<&dyn Bean>, PropertyError>;

    fn get_mut(&mut self, name: &str) -> Result<Option<&mut dyn Bean>, PropertyError>;

    /// The element `index` of the list in `name`.
    fn get_indexed(&self, name: &str, index: usize) -> Result<Option<&dyn Bean>, PropertyError>;

    fn get_indexed_mut(
        &mut self,
        name: &str,
        index: usize,
    ) -> Result<Option<&mut dyn Bean>, PropertyError>;

    /// The entry `key` of the map in `name`.
    fn get_mapped(&self, name: &str, key: &str) -> Result<Option<&dyn Bean>, PropertyError>;

    fn get_mapped_mut(
        &mut self,
        name: &str,
        key: &str,
    ) -> Result<Option<&mut dyn Bean>, PropertyError>;

    /// Replaces the value of `name`. [`Null`](crate::Null) clears it.
    fn set_simple(&mut self, name: &str, value: Box<dyn Bean>) -> Result<(), PropertyError>;

    fn set_indexed(
        &mut self,
        name: &str,
        index: usize,
        value: Box<dyn Bean>,
    ) -> Result<(), PropertyError>;

    fn set_mapped(&mut self, name: &str, key: &str, value: Box<dyn Bean>)
    -> Result<(), PropertyError>;

    /// Removes `key` from the map in `name`.
    fn remove(&mut self, name: &str, key: &str) -> Result<Option<Box<dyn Bean>>, PropertyError>;
}

// -----------------------------------------------------------------------------
// Slot helpers

#[inline]
fn as_slot_mut(slot: &mut Option<Box<dyn Bean>>) -> Option<&mut dyn Bean> {
    match slot {
        Some(value) => Some(&mut **value),
        None => None,
    }
}

/// The container stored in a slot, null is an error.
#[inline]
fn container<'a>(slot: Option<&'a dyn Bean>, name: &str) -> Result<&'a dyn Bean, PropertyError> {
    slot.and_then(unwrap_optional)
        .ok_or_else(|| PropertyError::NestedNull {
            path: name.to_string(),
        })
}

#[inline]
fn container_mut<'a>(
    slot: Option<&'a mut dyn Bean>,
    name: &str,
) -> Result<&'a mut dyn Bean, PropertyError> {
    slot.and_then(unwrap_optional_mut)
        .ok_or_else(|| PropertyError::NestedNull {
            path: name.to_string(),
        })
}

/// Stores `value` in a slot declared as `declared`.
///
/// [`Null`](crate::Null) empties the slot. An empty typed slot is filled
/// with the type's default first so that `Option<T>` slots accept `T`.
fn put(
    slot: &mut Option<Box<dyn Bean>>,
    declared: Option<TypeInfo>,
    name: &str,
    value: Box<dyn Bean>,
) -> Result<(), PropertyError> {
    if value.is_null() {
        *slot = None;
        return Ok(());
    }
    let Some(declared) = declared else {
        *slot = Some(value);
        return Ok(());
    };
    if declared.type_id() == value.ty_id() {
        *slot = Some(value);
        return Ok(());
    }
    match slot {
        Some(current) => store(&mut **current, name, value),
        None => match declared.create_default() {
            Some(mut fresh) => {
                store(&mut *fresh, name, value)?;
                *slot = Some(fresh);
                Ok(())
            }
            None => Err(PropertyError::mismatch(
                name,
                declared.type_path(),
                value.type_path(),
            )),
        },
    }
}

/// Empty value of an undeclared indexed or keyed property, or of a declared
/// one without default.
#[inline]
fn create_container(declared: Option<TypeInfo>, mapped: bool) -> Box<dyn Bean> {
    match declared.and_then(|info| info.create_default()) {
        Some(value) => value,
        None if mapped => Box::new(DynamicMap::new()),
        None => Box::new(DynamicList::new()),
    }
}

/// Keyed read into a slot value.
fn slot_mapped<'a>(
    slot: Option<&'a dyn Bean>,
    name: &str,
    key: &str,
) -> Result<Option<&'a dyn Bean>, PropertyError> {
    select(
        container(slot, name)?,
        name,
        &Selector::Key(key.into()),
    )
}

fn slot_mapped_mut<'a>(
    slot: Option<&'a mut dyn Bean>,
    name: &str,
    key: &str,
) -> Result<Option<&'a mut dyn Bean>, PropertyError> {
    select_mut(
        container_mut(slot, name)?,
        name,
        &Selector::Key(key.into()),
    )
}

fn slot_indexed<'a>(
    slot: Option<&'a dyn Bean>,
    name: &str,
    index: usize,
) -> Result<Option<&'a dyn Bean>, PropertyError> {
    select(
        container(slot, name)?,
        name,
        &Selector::Index(index),
    )
}

fn slot_indexed_mut<'a>(
    slot: Option<&'a mut dyn Bean>,
    name: &str,
    index: usize,
) -> Result<Option<&'a mut dyn Bean>, PropertyError> {
    select_mut(
        container_mut(slot, name)?,
        name,
        &Selector::Index(index),
    )
}

/// Removes `key` from the map stored in a slot.
fn slot_remove(
    slot: Option<&mut dyn Bean>,
    name: &str,
    key: &str,
) -> Result<Option<Box<dyn Bean>>, PropertyError> {
    let map = container_mut(slot, name)?;
    let type_path = map.type_path();
    match map.bean_mut() {
        BeanMut::Map(map) => Ok(map.remove(key)),
        _ => Err(PropertyError::incompatible(name, type_path, "mapped")),
    }
}

/// Returns `true` if the map stored in a slot holds `key`.
fn slot_contains(slot: Option<&dyn Bean>, name: &str, key: &str) -> Result<bool, PropertyError> {
    let map = container(slot, name)?;
    match map.bean_ref() {
        BeanRef::Map(map) => Ok(map.contains_key(key)),
        _ => Err(PropertyError::incompatible(name, map.type_path(), "mapped")),
    }
}
