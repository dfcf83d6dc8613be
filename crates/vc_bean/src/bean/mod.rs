// -----------------------------------------------------------------------------
// Modules

mod bean;
mod null;

// -----------------------------------------------------------------------------
// Exports

pub use bean::Bean;
pub use null::Null;

pub use crate::ops::{BeanMut, BeanRef};

/// Implements the kind casting methods of [`Bean`] for a type.
///
/// ```ignore
/// impl Bean for Foo {
///     impl_bean_cast_fn!(List);
///     // ...
/// }
/// ```
macro_rules! impl_bean_cast_fn {
    ($kind:ident) => {
        #[inline]
        fn bean_kind(&self) -> $crate::info::BeanKind {
            $crate::info::BeanKind::$kind
        }

        #[inline]
        fn bean_ref(&self) -> $crate::ops::BeanRef<'_> {
            $crate::ops::BeanRef::$kind(self)
        }

        #[inline]
        fn bean_mut(&mut self) -> $crate::ops::BeanMut<'_> {
            $crate::ops::BeanMut::$kind(self)
        }
    };
}

pub(crate) use impl_bean_cast_fn;
