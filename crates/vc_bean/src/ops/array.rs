use alloc::boxed::Box;

use crate::Bean;
use crate::info::TypeInfo;

/// A fixed size sequence of beans.
pub trait Array: Bean {
    fn get(&self, index: usize) -> Option<&dyn Bean>;

    fn get_mut(&mut self, index: usize) -> Option<&mut dyn Bean>;

    fn len(&self) -> usize;

    #[inline]
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The element type, when known.
    fn element_info(&self) -> Option<TypeInfo>;

    /// Replaces the element at `index`, handing the value back on type
    /// mismatch or when `index` is out of range.
    #[inline]
    fn set_at(&mut self, index: usize, value: Box<dyn Bean>) -> Result<(), Box<dyn Bean>> {
        match self.get_mut(index) {
            Some(slot) => slot.set(value),
            None => Err(value),
        }
    }

    fn iter(&self) -> ArrayIter<'_>;
}

/// Iterator over the elements of an [`Array`].
pub struct ArrayIter<'a> {
    array: &'a dyn Array,
    index: usize,
}

impl<'a> ArrayIter<'a> {
    #[inline(always)]
    pub const fn new(array: &'a dyn Array) -> Self {
        Self { array, index: 0 }
    }
}

impl<'a> Iterator for ArrayIter<'a> {
    type Item = &'a dyn Bean;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        let value = self.array.get(self.index)?;
        self.index += 1;
        Some(value)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let rest = self.array.len().saturating_sub(self.index);
        (rest, Some(rest))
    }
}

impl ExactSizeIterator for ArrayIter<'_> {}
