use alloc::boxed::Box;
use alloc::vec::Vec;

use crate::Bean;
use crate::info::TypeInfo;

/// Iterator over the entries of a [`PropertyMap`].
pub type MapIter<'a> = Box<dyn Iterator<Item = (&'a str, &'a dyn Bean)> + 'a>;

/// A string keyed mapping of beans.
///
/// On a map, a plain path step `name` addresses the entry `name`.
///
/// # Examples
///
/// ```
/// use std::collections::BTreeMap;
/// use vc_bean::ops::PropertyMap;
///
/// let mut map: BTreeMap<String, i32> = BTreeMap::new();
/// PropertyMap::insert(&mut map, "a", Box::new(1_i32)).unwrap();
///
/// assert!(PropertyMap::contains_key(&map, "a"));
/// assert_eq!(PropertyMap::keys(&map), ["a"]);
/// ```
pub trait PropertyMap: Bean {
    fn get(&self, key: &str) -> Option<&dyn Bean>;

    fn get_mut(&mut self, key: &str) -> Option<&mut dyn Bean>;

    /// Stores `value` under `key` and returns the previous value.
    ///
    /// The value is handed back on type mismatch.
    fn insert(
        &mut self,
        key: &str,
        value: Box<dyn Bean>,
    ) -> Result<Option<Box<dyn Bean>>, Box<dyn Bean>>;

    fn remove(&mut self, key: &str) -> Option<Box<dyn Bean>>;

    #[inline]
    fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    fn len(&self) -> usize;

    #[inline]
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The value type, when known.
    fn value_info(&self) -> Option<TypeInfo>;

    fn iter(&self) -> MapIter<'_>;

    #[inline]
    fn keys(&self) -> Vec<&str> {
        self.iter().map(|(key, _)| key).collect()
    }
}
