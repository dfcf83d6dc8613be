#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![no_std]

// -----------------------------------------------------------------------------
// Extern Self

// Library code uses `crate`, doc tests and derived code use `vc_bean`.
// `vc_macro_utils::Manifest` can only choose one, so `vc_bean` must also be
// usable as an alias for `crate`.
extern crate self as vc_bean;

// -----------------------------------------------------------------------------
// no_std support

extern crate alloc;

// Locks for the shared caches and registries.
extern crate std;

// -----------------------------------------------------------------------------
// Modules

mod bean;
mod error;
mod hash;

pub mod access;
pub mod adapters;
pub mod dyna;
pub mod impls;
pub mod info;
pub mod ops;
pub mod registry;
pub mod serde;
pub mod utils;

// -----------------------------------------------------------------------------
// Top-Level exports

pub mod __macro_exports;

pub use bean::{Bean, BeanMut, BeanRef, Null};
pub use error::{ErrorKind, PropertyError};
pub use hash::{FixedHashState, HashMap, TypeIdMap};
pub use vc_bean_derive as derive;

pub use registry::{BeanContext, ConvertRegistry, IntrospectionCache};
pub use utils::{BeanConfig, BeanUtils, PropertyUtils};

/// The most commonly used items.
pub mod prelude {
    pub use crate::access::{AccessPath, PathAccessor};
    pub use crate::derive::Bean;
    pub use crate::dyna::{BasicDynaBean, DynaBean, DynaClass, LazyDynaBean, WrapDynaBean};
    pub use crate::info::Typed;
    pub use crate::ops::{Array, List, Optional, Properties, PropertyMap};
    pub use crate::{Bean, BeanContext, BeanUtils, Null, PropertyError, PropertyUtils};
}
