use alloc::boxed::Box;
use alloc::collections::VecDeque;
use alloc::vec::Vec;

use crate::Bean;
use crate::bean::impl_bean_cast_fn;
use crate::impls::list_partial_eq;
use crate::impls::option::take_slot;
use crate::info::{BeanKind, TypeInfo, Typed};
use crate::ops::{List, ListIter};

macro_rules! impl_list_bean {
    ($ty:ident, $push:ident, $iter:expr) => {
        impl<T: Bean + Typed> Typed for $ty<T> {
            fn type_info() -> TypeInfo {
                TypeInfo::new::<Self>(BeanKind::List)
                    .with_element(T::type_info)
                    .with_default(|| Box::new($ty::<T>::new()))
            }
        }

        impl<T: Bean + Typed> Bean for $ty<T> {
            impl_bean_cast_fn!(List);

            #[inline]
            fn bean_type_info(&self) -> TypeInfo {
                <Self as Typed>::type_info()
            }

            #[inline]
            fn set(&mut self, value: Box<dyn Bean>) -> Result<(), Box<dyn Bean>> {
                *self = value.take::<Self>()?;
                Ok(())
            }

            fn bean_clone(&self) -> Option<Box<dyn Bean>> {
                let mut cloned = $ty::<T>::with_capacity($ty::len(self));
                for value in $iter(self) {
                    $ty::$push(&mut cloned, value.bean_clone()?.take::<T>().ok()?);
                }
                Some(Box::new(cloned))
            }

            #[inline]
            fn bean_partial_eq(&self, other: &dyn Bean) -> Option<bool> {
                list_partial_eq(self, other)
            }
        }
    };
}

impl_list_bean!(Vec, push, <[T]>::iter);
impl_list_bean!(VecDeque, push_back, VecDeque::iter);

/// Default element of `T`, if it has a default constructor.
#[inline]
fn default_element<T: Bean + Typed>() -> Option<T> {
    T::type_info().create_default()?.take::<T>().ok()
}

impl<T: Bean + Typed> List for Vec<T> {
    #[inline]
    fn get(&self, index: usize) -> Option<&dyn Bean> {
        <[T]>::get(self, index).map(|value| value as &dyn Bean)
    }

    #[inline]
    fn get_mut(&mut self, index: usize) -> Option<&mut dyn Bean> {
        <[T]>::get_mut(self, index).map(|value| value as &mut dyn Bean)
    }

    #[inline]
    fn len(&self) -> usize {
        Vec::len(self)
    }

    #[inline]
    fn element_info(&self) -> Option<TypeInfo> {
        Some(T::type_info())
    }

    fn push(&mut self, value: Box<dyn Bean>) -> Result<(), Box<dyn Bean>> {
        Vec::push(self, take_slot::<T>(value)?);
        Ok(())
    }

    fn push_default(&mut self) -> bool {
        default_element::<T>().map(|value| Vec::push(self, value)).is_some()
    }

    #[inline]
    fn pop(&mut self) -> Option<Box<dyn Bean>> {
        Vec::pop(self).map(|value| Box::new(value) as Box<dyn Bean>)
    }

    #[inline]
    fn clear(&mut self) {
        Vec::clear(self);
    }

    #[inline]
    fn iter(&self) -> ListIter<'_> {
        ListIter::new(self)
    }
}

impl<T: Bean + Typed> List for VecDeque<T> {
    #[inline]
    fn get(&self, index: usize) -> Option<&dyn Bean> {
        VecDeque::get(self, index).map(|value| value as &dyn Bean)
    }

    #[inline]
    fn get_mut(&mut self, index: usize) -> Option<&mut dyn Bean> {
        VecDeque::get_mut(self, index).map(|value| value as &mut dyn Bean)
    }

    #[inline]
    fn len(&self) -> usize {
        VecDeque::len(self)
    }

    #[inline]
    fn element_info(&self) -> Option<TypeInfo> {
        Some(T::type_info())
    }

    fn push(&mut self, value: Box<dyn Bean>) -> Result<(), Box<dyn Bean>> {
        VecDeque::push_back(self, take_slot::<T>(value)?);
        Ok(())
    }

    fn push_default(&mut self) -> bool {
        default_element::<T>()
            .map(|value| VecDeque::push_back(self, value))
            .is_some()
    }

    #[inline]
    fn pop(&mut self) -> Option<Box<dyn Bean>> {
        VecDeque::pop_back(self).map(|value| Box::new(value) as Box<dyn Bean>)
    }

    #[inline]
    fn clear(&mut self) {
        VecDeque::clear(self);
    }

    #[inline]
    fn iter(&self) -> ListIter<'_> {
        ListIter::new(self)
    }
}
