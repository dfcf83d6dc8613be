use alloc::boxed::Box;
use alloc::string::String;
use core::cmp::Ordering;

use crate::Bean;
use crate::bean::impl_bean_cast_fn;
use crate::impls::optional_partial_eq;
use crate::info::{BeanKind, TypeInfo, Typed};
use crate::ops::Optional;

impl<T: Bean + Typed> Typed for Option<T> {
    fn type_info() -> TypeInfo {
        TypeInfo::new::<Self>(BeanKind::Optional)
            .with_element(T::type_info)
            .with_default(|| Box::new(None::<T>))
    }
}

/// Unboxes a value stored into a container slot of type `T`.
///
/// An optional `T` also takes its inner value or [`Null`](crate::Null),
/// like [`Bean::set`] on `Option`.
pub(super) fn take_slot<T: Bean + Typed>(value: Box<dyn Bean>) -> Result<T, Box<dyn Bean>> {
    let info = T::type_info();
    if value.is::<T>() || info.kind() != BeanKind::Optional {
        return value.take::<T>();
    }
    let Some(mut slot) = info.create_default() else {
        return Err(value);
    };
    slot.set(value)?;
    slot.take::<T>()
}

impl<T: Bean + Typed> Optional for Option<T> {
    #[inline]
    fn value(&self) -> Option<&dyn Bean> {
        self.as_ref().map(|value| value as &dyn Bean)
    }

    #[inline]
    fn value_mut(&mut self) -> Option<&mut dyn Bean> {
        self.as_mut().map(|value| value as &mut dyn Bean)
    }

    #[inline]
    fn inner_info(&self) -> TypeInfo {
        T::type_info()
    }

    fn replace(&mut self, value: Option<Box<dyn Bean>>) -> Result<(), Box<dyn Bean>> {
        *self = match value {
            Some(value) if !value.is_null() => Some(value.take::<T>()?),
            _ => None,
        };
        Ok(())
    }

    fn get_or_insert_default(&mut self) -> Option<&mut dyn Bean> {
        if self.is_none() {
            let value = T::type_info().create_default()?.take::<T>().ok()?;
            *self = Some(value);
        }
        self.as_mut().map(|value| value as &mut dyn Bean)
    }
}

impl<T: Bean + Typed> Bean for Option<T> {
    impl_bean_cast_fn!(Optional);

    #[inline]
    fn bean_type_info(&self) -> TypeInfo {
        <Self as Typed>::type_info()
    }

    /// Accepts `Option<T>`, `T` or [`Null`](crate::Null).
    fn set(&mut self, value: Box<dyn Bean>) -> Result<(), Box<dyn Bean>> {
        if value.is::<Self>() {
            *self = value.take::<Self>()?;
            return Ok(());
        }
        Optional::replace(self, Some(value))
    }

    fn bean_clone(&self) -> Option<Box<dyn Bean>> {
        let cloned = match self {
            Some(value) => Some(value.bean_clone()?.take::<T>().ok()?),
            None => None,
        };
        Some(Box::new(cloned))
    }

    #[inline]
    fn bean_partial_eq(&self, other: &dyn Bean) -> Option<bool> {
        optional_partial_eq(self, other)
    }

    fn bean_partial_cmp(&self, other: &dyn Bean) -> Option<Ordering> {
        let other = other.downcast_ref::<Self>()?;
        match (self, other) {
            (Some(x), Some(y)) => x.bean_partial_cmp(y),
            (x, y) => Some(x.is_some().cmp(&y.is_some())),
        }
    }

    #[inline]
    fn to_text(&self) -> Option<String> {
        self.as_ref().and_then(Bean::to_text)
    }
}

#[cfg(test)]
mod tests {
    use crate::info::{BeanKind, Typed};
    use crate::ops::Optional;
    use crate::{Bean, Null};
    use alloc::boxed::Box;
    use alloc::string::String;

    #[test]
    fn set_accepts_inner_and_null() {
        let mut nick: Option<String> = None;
        nick.set(Box::new(String::from("Bo"))).unwrap();
        assert_eq!(nick.as_deref(), Some("Bo"));

        nick.set(Box::new(Some(String::from("Al")))).unwrap();
        assert_eq!(nick.as_deref(), Some("Al"));

        nick.set(Box::new(Null)).unwrap();
        assert_eq!(nick, None);

        assert!(nick.set(Box::new(1_u8)).is_err());
    }

    #[test]
    fn default_fill() {
        let mut count: Option<u32> = None;
        assert!(!Optional::has_value(&count));
        let value = Optional::get_or_insert_default(&mut count).unwrap();
        assert!(value.is::<u32>());
        assert_eq!(count, Some(0));
        assert_eq!(<Option<u32> as Typed>::type_info().unwrap_optional().kind(), BeanKind::Scalar);
    }
}
