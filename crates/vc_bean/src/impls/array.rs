use alloc::boxed::Box;
use alloc::vec::Vec;

use crate::Bean;
use crate::bean::impl_bean_cast_fn;
use crate::impls::array_partial_eq;
use crate::info::{BeanKind, TypeInfo, Typed};
use crate::ops::{Array, ArrayIter};

impl<T: Bean + Typed, const N: usize> Typed for [T; N] {
    fn type_info() -> TypeInfo {
        TypeInfo::new::<Self>(BeanKind::Array)
            .with_element(T::type_info)
            .with_length(N)
    }
}

impl<T: Bean + Typed, const N: usize> Array for [T; N] {
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
        N
    }

    #[inline]
    fn element_info(&self) -> Option<TypeInfo> {
        Some(T::type_info())
    }

    #[inline]
    fn iter(&self) -> ArrayIter<'_> {
        ArrayIter::new(self)
    }
}

impl<T: Bean + Typed, const N: usize> Bean for [T; N] {
    impl_bean_cast_fn!(Array);

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
        let mut cloned = Vec::with_capacity(N);
        for value in <[T]>::iter(self) {
            cloned.push(value.bean_clone()?.take::<T>().ok()?);
        }
        let array: [T; N] = cloned.try_into().ok()?;
        Some(Box::new(array))
    }

    #[inline]
    fn bean_partial_eq(&self, other: &dyn Bean) -> Option<bool> {
        array_partial_eq(self, other)
    }
}

#[cfg(test)]
mod tests {
    use crate::Bean;
    use crate::info::Typed;
    use crate::ops::Array;
    use alloc::boxed::Box;

    #[test]
    fn fixed_length() {
        let mut grid = [1_i32, 2, 3];
        assert_eq!(<[i32; 3] as Typed>::type_info().length(), Some(3));
        assert!(Array::set_at(&mut grid, 2, Box::new(9_i32)).is_ok());
        assert!(Array::set_at(&mut grid, 3, Box::new(9_i32)).is_err());
        assert_eq!(grid, [1, 2, 9]);

        let cloned = grid.bean_clone().unwrap();
        assert_eq!(cloned.downcast_ref::<[i32; 3]>(), Some(&[1, 2, 9]));
    }
}
