//! Public entry points of property path access.
//!
//! ## Menu
//!
//! - [`PropertyUtils`]: typed, strict access. Values are stored as given.
//! - [`BeanUtils`]: access with type conversion, plus the lenient bulk
//!   operations [`populate`](BeanUtils::populate) and [`copy`](BeanUtils::copy).
//! - [`BeanConfig`]: strictness options of [`BeanUtils`].
//!
//! Both entry points are cheap handles over a [`BeanContext`] and may be
//! created on demand.
//!
//! [`BeanContext`]: crate::BeanContext

// -----------------------------------------------------------------------------
// Modules

mod bean_utils;
mod config;
mod property_utils;

// -----------------------------------------------------------------------------
// Exports

pub use bean_utils::BeanUtils;
pub use config::BeanConfig;
pub use property_utils::PropertyUtils;

use alloc::string::String;
use alloc::vec::Vec;

use crate::access::PathAccessor;
use crate::access::{AccessStep, unwrap_optional};
use crate::info::PropertyDescriptor;
use crate::ops::BeanRef;
use crate::registry::IntrospectionCache;
use crate::{Bean, PropertyError};

/// The names of the properties of `bean` that may be listed by
/// `describe` and `copy`, in declaration order.
///
/// Dedicated indexed and keyed properties have no whole value and are left
/// out, so are write-only properties of conventional beans.
fn property_names(cache: &IntrospectionCache, bean: &dyn Bean) -> Result<Vec<String>, PropertyError> {
    let Some(bean) = unwrap_optional(bean) else {
        return Ok(Vec::new());
    };
    match bean.bean_ref() {
        BeanRef::Struct(data) => Ok(cache
            .bean_info(data)
            .iter()
            .filter(|desc| desc.is_readable() && !desc.is_dedicated())
            .map(PropertyDescriptor::name)
            .map(String::from)
            .collect()),
        BeanRef::Dynamic(data) => Ok(data.dyna_class().names().map(String::from).collect()),
        BeanRef::Map(data) => Ok(data.keys().into_iter().map(String::from).collect()),
        _ => Err(PropertyError::unsupported("describe", bean.type_path())),
    }
}

/// A single step path naming the property `name` verbatim.
///
/// Map keys may contain path delimiters, so they are never parsed.
#[inline]
fn simple_path(name: &str) -> PathAccessor {
    PathAccessor::from_iter([AccessStep::simple(String::from(name))])
}
