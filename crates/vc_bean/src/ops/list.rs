use alloc::boxed::Box;

use crate::Bean;
use crate::info::TypeInfo;

/// A growable sequence of beans.
///
/// Positions may hold no value (see [`DynamicList`](crate::ops::DynamicList)),
/// so reads return `Option` both for an empty position and for an index
/// past the end; compare with [`len`](List::len) to tell them apart.
///
/// # Examples
///
/// ```
/// use vc_bean::ops::List;
///
/// let mut list: Vec<u8> = vec![1, 2];
/// List::push(&mut list, Box::new(3_u8)).unwrap();
/// assert!(List::push(&mut list, Box::new("4")).is_err());
///
/// assert_eq!(List::len(&list), 3);
/// assert_eq!(List::get(&list, 2).unwrap().downcast_ref::<u8>(), Some(&3));
/// ```
pub trait List: Bean {
    fn get(&self, index: usize) -> Option<&dyn Bean>;

    fn get_mut(&mut self, index: usize) -> Option<&mut dyn Bean>;

    fn len(&self) -> usize;

    #[inline]
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The element type, when known.
    fn element_info(&self) -> Option<TypeInfo>;

    /// Appends a value, handing it back on type mismatch.
    fn push(&mut self, value: Box<dyn Bean>) -> Result<(), Box<dyn Bean>>;

    /// Appends the default element.
    ///
    /// Returns `false` if the list cannot grow this way.
    fn push_default(&mut self) -> bool;

    /// Replaces the element at `index`, handing the value back on type
    /// mismatch or when `index` is out of range.
    #[inline]
    fn set_at(&mut self, index: usize, value: Box<dyn Bean>) -> Result<(), Box<dyn Bean>> {
        match self.get_mut(index) {
            Some(slot) => slot.set(value),
            None => Err(value),
        }
    }

    fn pop(&mut self) -> Option<Box<dyn Bean>>;

    fn clear(&mut self);

    fn iter(&self) -> ListIter<'_>;
}

/// Iterator over the positions of a [`List`].
pub struct ListIter<'a> {
    list: &'a dyn List,
    index: usize,
}

impl<'a> ListIter<'a> {
    #[inline(always)]
    pub const fn new(list: &'a dyn List) -> Self {
        Self { list, index: 0 }
    }
}

impl<'a> Iterator for ListIter<'a> {
    type Item = Option<&'a dyn Bean>;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        if self.index >= self.list.len() {
            return None;
        }
        let value = self.list.get(self.index);
        self.index += 1;
        Some(value)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let rest = self.list.len().saturating_sub(self.index);
        (rest, Some(rest))
    }
}

impl ExactSizeIterator for ListIter<'_> {}
