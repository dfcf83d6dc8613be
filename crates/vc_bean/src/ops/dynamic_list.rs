use alloc::boxed::Box;
use alloc::vec::Vec;
use core::fmt;

use crate::bean::impl_bean_cast_fn;
use crate::impls;
use crate::info::{TypeInfo, Typed};
use crate::ops::{List, ListIter, accepts};
use crate::Bean;

/// A type-erased list, the indexed slot of a
/// [`LazyDynaBean`](crate::dyna::LazyDynaBean).
///
/// The element type is either given up front or fixed by the first value
/// stored; later values of another type are rejected. Positions may be
/// empty, which reads as no value.
///
/// # Examples
///
/// ```
/// use vc_bean::ops::{DynamicList, List};
///
/// let mut list = DynamicList::new();
/// list.push(Box::new(1_i32)).unwrap();
/// assert!(list.push(Box::new(1.5_f32)).is_err());
///
/// list.push_default();
/// assert_eq!(list.len(), 2);
/// assert_eq!(list.get(1).unwrap().downcast_ref::<i32>(), Some(&0));
/// ```
#[derive(Default)]
pub struct DynamicList {
    element: Option<TypeInfo>,
    values: Vec<Option<Box<dyn Bean>>>,
}

impl DynamicList {
    /// Creates an empty list of unknown element type.
    #[inline]
    pub const fn new() -> Self {
        Self {
            element: None,
            values: Vec::new(),
        }
    }

    /// Creates an empty list of elements of type `element`.
    #[inline]
    pub const fn with_element(element: TypeInfo) -> Self {
        Self {
            element: Some(element),
            values: Vec::new(),
        }
    }

    /// Appends an empty position.
    #[inline]
    pub fn push_empty(&mut self) {
        self.values.push(None);
    }

    fn check(&mut self, value: &dyn Bean) -> bool {
        if self.element.is_none() && !value.is_null() {
            self.element = Some(value.bean_type_info());
        }
        value.is_null() || accepts(self.element.as_ref(), value)
    }
}

impl Typed for DynamicList {
    fn type_info() -> TypeInfo {
        TypeInfo::new::<Self>(crate::info::BeanKind::List).with_default(|| Box::new(Self::new()))
    }
}

impl List for DynamicList {
    #[inline]
    fn get(&self, index: usize) -> Option<&dyn Bean> {
        self.values.get(index)?.as_deref()
    }

    #[inline]
    fn get_mut(&mut self, index: usize) -> Option<&mut dyn Bean> {
        match self.values.get_mut(index) {
            Some(Some(value)) => Some(value.as_mut()),
            _ => None,
        }
    }

    #[inline]
    fn len(&self) -> usize {
        self.values.len()
    }

    #[inline]
    fn element_info(&self) -> Option<TypeInfo> {
        self.element
    }

    fn push(&mut self, value: Box<dyn Bean>) -> Result<(), Box<dyn Bean>> {
        if !self.check(&*value) {
            return Err(value);
        }
        self.values.push((!value.is_null()).then_some(value));
        Ok(())
    }

    /// Appends the element type's default, or an empty position when
    /// there is none.
    fn push_default(&mut self) -> bool {
        let value = self.element.and_then(|info| info.create_default());
        self.values.push(value);
        true
    }

    fn set_at(&mut self, index: usize, value: Box<dyn Bean>) -> Result<(), Box<dyn Bean>> {
        if index >= self.values.len() || !self.check(&*value) {
            return Err(value);
        }
        self.values[index] = (!value.is_null()).then_some(value);
        Ok(())
    }

    #[inline]
    fn pop(&mut self) -> Option<Box<dyn Bean>> {
        self.values.pop().flatten()
    }

    #[inline]
    fn clear(&mut self) {
        self.values.clear();
    }

    #[inline]
    fn iter(&self) -> ListIter<'_> {
        ListIter::new(self)
    }
}

impl Bean for DynamicList {
    impl_bean_cast_fn!(List);

    #[inline]
    fn bean_type_info(&self) -> TypeInfo {
        <Self as Typed>::type_info()
    }

    fn set(&mut self, value: Box<dyn Bean>) -> Result<(), Box<dyn Bean>> {
        *self = value.take::<Self>()?;
        Ok(())
    }

    fn bean_clone(&self) -> Option<Box<dyn Bean>> {
        let mut values = Vec::with_capacity(self.values.len());
        for value in &self.values {
            values.push(match value {
                Some(value) => Some(value.bean_clone()?),
                None => None,
            });
        }
        Some(Box::new(Self {
            element: self.element,
            values,
        }))
    }

    #[inline]
    fn bean_partial_eq(&self, other: &dyn Bean) -> Option<bool> {
        impls::list_partial_eq(self, other)
    }

    #[inline]
    fn bean_debug(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        impls::list_debug(self, f)
    }
}

impl fmt::Debug for DynamicList {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        impls::list_debug(self, f)
    }
}

#[cfg(test)]
mod tests {
    use super::DynamicList;
    use crate::Null;
    use crate::ops::List;
    use alloc::boxed::Box;
    use alloc::string::String;

    #[test]
    fn element_type_fixed_by_first_value() {
        let mut list = DynamicList::new();
        assert!(list.element_info().is_none());

        list.push(Box::new(String::from("a"))).unwrap();
        assert!(list.element_info().unwrap().is::<String>());
        assert!(list.push(Box::new(3_u8)).is_err());
        assert!(list.set_at(0, Box::new(3_u8)).is_err());
        assert_eq!(list.len(), 1);
    }

    #[test]
    fn empty_positions() {
        let mut list = DynamicList::new();
        list.push_default();
        list.push(Box::new(Null)).unwrap();
        assert_eq!(list.len(), 2);
        assert!(list.get(0).is_none());
        assert!(list.iter().all(|value| value.is_none()));

        list.set_at(1, Box::new(9_i64)).unwrap();
        assert_eq!(list.get(1).unwrap().downcast_ref::<i64>(), Some(&9));
        assert!(list.set_at(2, Box::new(1_i64)).is_err());
    }
}
