use core::fmt;

use crate::Bean;
use crate::dyna::DynaBean;
use crate::ops::{Array, BeanRef, List, Optional, Properties, PropertyMap};

// -----------------------------------------------------------------------------
// Debug

/// Formats an optional bean, an absent value prints as `null`.
struct Nullable<'a>(Option<&'a dyn Bean>);

impl fmt::Debug for Nullable<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(value) => value.bean_debug(f),
            None => f.write_str("null"),
        }
    }
}

/// Prints the readable properties of a conventional bean.
#[inline(never)]
pub fn struct_debug(x: &dyn Properties, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let path = x.type_path();
    let name = path.rsplit("::").next().unwrap_or(path);
    let info = x.bean_info();

    let mut debug = f.debug_struct(name);
    for descriptor in info.iter().filter(|d| d.is_readable() && !d.is_dedicated()) {
        debug.field(descriptor.name(), &Nullable(x.property(descriptor.name())));
    }
    debug.finish()
}

#[inline(never)]
pub fn dyna_debug(x: &dyn DynaBean, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let class = x.dyna_class();
    let mut debug = f.debug_map();
    for property in class.iter() {
        let value = x.get(property.name()).ok().flatten();
        debug.entry(&property.name(), &Nullable(value));
    }
    debug.finish()
}

#[inline(never)]
pub fn map_debug(x: &dyn PropertyMap, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_map()
        .entries(x.iter().map(|(key, value)| (key, Nullable(Some(value)))))
        .finish()
}

#[inline(never)]
pub fn list_debug(x: &dyn List, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_list().entries(x.iter().map(Nullable)).finish()
}

#[inline(never)]
pub fn array_debug(x: &dyn Array, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_list()
        .entries(x.iter().map(|value| Nullable(Some(value))))
        .finish()
}

#[inline(never)]
pub fn optional_debug(x: &dyn Optional, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match x.value() {
        Some(value) => f.debug_tuple("Some").field(&Nullable(Some(value))).finish(),
        None => f.write_str("None"),
    }
}

// -----------------------------------------------------------------------------
// Partial Eq

#[inline]
fn nullable_eq(x: Option<&dyn Bean>, y: Option<&dyn Bean>) -> bool {
    match (x, y) {
        (None, None) => true,
        (Some(x), Some(y)) => x.bean_partial_eq(y) == Some(true),
        _ => false,
    }
}

/// Compares two conventional beans of the same type property by property.
///
/// Returns `Some(false)` for values of another type.
#[inline(never)]
pub fn struct_partial_eq(x: &dyn Properties, y: &dyn Bean) -> Option<bool> {
    let BeanRef::Struct(y) = y.bean_ref() else {
        return Some(false);
    };
    if x.ty_id() != y.ty_id() {
        return Some(false);
    }

    let info = x.bean_info();
    let equal = info
        .iter()
        .filter(|d| !d.is_dedicated())
        .all(|d| nullable_eq(x.property(d.name()), y.property(d.name())));
    Some(equal)
}

/// Compares two dynamic beans by their declared properties.
#[inline(never)]
pub fn dyna_partial_eq(x: &dyn DynaBean, y: &dyn Bean) -> Option<bool> {
    let BeanRef::Dynamic(y) = y.bean_ref() else {
        return Some(false);
    };
    let (x_class, y_class) = (x.dyna_class(), y.dyna_class());
    if x_class.len() != y_class.len() {
        return Some(false);
    }
    Some(x_class.iter().all(|property| {
        let name = property.name();
        y_class.contains(name) && nullable_eq(x.get(name).ok().flatten(), y.get(name).ok().flatten())
    }))
}

#[inline(never)]
pub fn list_partial_eq(x: &dyn List, y: &dyn Bean) -> Option<bool> {
    let BeanRef::List(y) = y.bean_ref() else {
        return Some(false);
    };
    if x.len() != y.len() {
        return Some(false);
    }
    Some(x.iter().zip(y.iter()).all(|(x, y)| nullable_eq(x, y)))
}

#[inline(never)]
pub fn array_partial_eq(x: &dyn Array, y: &dyn Bean) -> Option<bool> {
    let BeanRef::Array(y) = y.bean_ref() else {
        return Some(false);
    };
    if x.len() != y.len() {
        return Some(false);
    }
    Some(
        x.iter()
            .zip(y.iter())
            .all(|(x, y)| x.bean_partial_eq(y) == Some(true)),
    )
}

#[inline(never)]
pub fn map_partial_eq(x: &dyn PropertyMap, y: &dyn Bean) -> Option<bool> {
    let BeanRef::Map(y) = y.bean_ref() else {
        return Some(false);
    };
    if x.len() != y.len() {
        return Some(false);
    }
    Some(
        x.iter()
            .all(|(key, value)| nullable_eq(Some(value), y.get(key))),
    )
}

#[inline(never)]
pub fn optional_partial_eq(x: &dyn Optional, y: &dyn Bean) -> Option<bool> {
    let BeanRef::Optional(y) = y.bean_ref() else {
        return Some(false);
    };
    Some(nullable_eq(x.value(), y.value()))
}
