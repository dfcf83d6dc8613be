//! Items referenced by generated code. Not a public API.

pub use alloc::boxed::Box;
pub use core::default::Default;
pub use core::fmt;
pub use core::option::Option::{self, None, Some};
pub use core::result::Result::{self, Err, Ok};

#[cfg(feature = "auto_register")]
pub use inventory;

use crate::Bean;

/// Clones one field through [`Bean::bean_clone`].
#[inline]
pub fn clone_field<T: Bean>(value: &T) -> Option<T> {
    value.bean_clone()?.take::<T>().ok()
}
