use alloc::boxed::Box;
use alloc::string::String;
use core::cmp::Ordering;
use core::fmt;

use crate::Bean;
use crate::bean::impl_bean_cast_fn;
use crate::info::{BeanKind, TypeInfo, Typed};

/// The absence of a value, as an assignable bean.
///
/// Storing `Null` into an `Option<T>` slot sets it to `None`; a dynamic
/// bean clears the slot. Every other slot rejects it.
///
/// # Examples
///
/// ```
/// use vc_bean::{Bean, Null};
///
/// let mut nickname = Some(String::from("Bo"));
/// nickname.set(Box::new(Null)).unwrap();
/// assert_eq!(nickname, None);
/// ```
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Null;

impl Typed for Null {
    fn type_info() -> TypeInfo {
        TypeInfo::new::<Self>(BeanKind::Scalar).with_default(|| Box::new(Null))
    }
}

impl Bean for Null {
    impl_bean_cast_fn!(Scalar);

    #[inline]
    fn bean_type_info(&self) -> TypeInfo {
        <Self as Typed>::type_info()
    }

    fn set(&mut self, value: Box<dyn Bean>) -> Result<(), Box<dyn Bean>> {
        value.take::<Self>().map(|_| ())
    }

    #[inline]
    fn bean_clone(&self) -> Option<Box<dyn Bean>> {
        Some(Box::new(Null))
    }

    #[inline]
    fn bean_partial_eq(&self, other: &dyn Bean) -> Option<bool> {
        Some(other.is::<Self>())
    }

    #[inline]
    fn bean_partial_cmp(&self, other: &dyn Bean) -> Option<Ordering> {
        other.is::<Self>().then_some(Ordering::Equal)
    }

    fn bean_debug(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Null")
    }

    #[inline]
    fn to_text(&self) -> Option<String> {
        None
    }
}
