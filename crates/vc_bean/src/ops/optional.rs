use alloc::boxed::Box;

use crate::Bean;
use crate::info::TypeInfo;

/// A bean that may hold no value, the bean rendering of *null*.
///
/// Leaf reads look through it: `Some(v)` reads as `v`, `None` as no value.
pub trait Optional: Bean {
    fn value(&self) -> Option<&dyn Bean>;

    fn value_mut(&mut self) -> Option<&mut dyn Bean>;

    /// The type of the wrapped value.
    fn inner_info(&self) -> TypeInfo;

    /// Replaces the content; `None` clears it.
    ///
    /// The value is handed back on type mismatch.
    fn replace(&mut self, value: Option<Box<dyn Bean>>) -> Result<(), Box<dyn Bean>>;

    /// Fills an empty value with the inner type's default and returns it.
    ///
    /// `None` if the inner type has no default constructor.
    fn get_or_insert_default(&mut self) -> Option<&mut dyn Bean>;

    #[inline]
    fn has_value(&self) -> bool {
        self.value().is_some()
    }
}
