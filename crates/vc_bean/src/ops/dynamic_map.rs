use alloc::boxed::Box;
use alloc::collections::BTreeMap;
use alloc::string::String;
use core::fmt;

use crate::Bean;
use crate::bean::impl_bean_cast_fn;
use crate::impls;
use crate::info::{BeanKind, TypeInfo, Typed};
use crate::ops::{MapIter, PropertyMap, accepts};

/// A type-erased string keyed map, the mapped slot of a
/// [`LazyDynaBean`](crate::dyna::LazyDynaBean).
///
/// The value type is either given up front or fixed by the first value
/// stored. Entries iterate in key order.
///
/// # Examples
///
/// ```
/// use vc_bean::ops::{DynamicMap, PropertyMap};
///
/// let mut map = DynamicMap::new();
/// map.insert("home", Box::new(String::from("Main St"))).unwrap();
/// assert!(map.insert("work", Box::new(12_u8)).is_err());
///
/// assert_eq!(map.keys(), ["home"]);
/// ```
#[derive(Default)]
pub struct DynamicMap {
    value: Option<TypeInfo>,
    entries: BTreeMap<String, Box<dyn Bean>>,
}

impl DynamicMap {
    /// Creates an empty map of unknown value type.
    #[inline]
    pub const fn new() -> Self {
        Self {
            value: None,
            entries: BTreeMap::new(),
        }
    }

    /// Creates an empty map with values of type `value`.
    #[inline]
    pub const fn with_value(value: TypeInfo) -> Self {
        Self {
            value: Some(value),
            entries: BTreeMap::new(),
        }
    }
}

impl Typed for DynamicMap {
    fn type_info() -> TypeInfo {
        TypeInfo::new::<Self>(BeanKind::Map).with_default(|| Box::new(Self::new()))
    }
}

impl PropertyMap for DynamicMap {
    #[inline]
    fn get(&self, key: &str) -> Option<&dyn Bean> {
        self.entries.get(key).map(|value| &**value)
    }

    #[inline]
    fn get_mut(&mut self, key: &str) -> Option<&mut dyn Bean> {
        match self.entries.get_mut(key) {
            Some(value) => Some(value.as_mut()),
            None => None,
        }
    }

    fn insert(
        &mut self,
        key: &str,
        value: Box<dyn Bean>,
    ) -> Result<Option<Box<dyn Bean>>, Box<dyn Bean>> {
        if value.is_null() {
            return Ok(self.entries.remove(key));
        }
        if self.value.is_none() {
            self.value = Some(value.bean_type_info());
        }
        if !accepts(self.value.as_ref(), &*value) {
            return Err(value);
        }
        Ok(self.entries.insert(key.into(), value))
    }

    #[inline]
    fn remove(&mut self, key: &str) -> Option<Box<dyn Bean>> {
        self.entries.remove(key)
    }

    #[inline]
    fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    #[inline]
    fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    fn value_info(&self) -> Option<TypeInfo> {
        self.value
    }

    fn iter(&self) -> MapIter<'_> {
        Box::new(
            self.entries
                .iter()
                .map(|(key, value)| (key.as_str(), &**value as &dyn Bean)),
        )
    }
}

impl Bean for DynamicMap {
    impl_bean_cast_fn!(Map);

    #[inline]
    fn bean_type_info(&self) -> TypeInfo {
        <Self as Typed>::type_info()
    }

    fn set(&mut self, value: Box<dyn Bean>) -> Result<(), Box<dyn Bean>> {
        *self = value.take::<Self>()?;
        Ok(())
    }

    fn bean_clone(&self) -> Option<Box<dyn Bean>> {
        let mut entries = BTreeMap::new();
        for (key, value) in &self.entries {
            entries.insert(key.clone(), value.bean_clone()?);
        }
        Some(Box::new(Self {
            value: self.value,
            entries,
        }))
    }

    #[inline]
    fn bean_partial_eq(&self, other: &dyn Bean) -> Option<bool> {
        impls::map_partial_eq(self, other)
    }

    #[inline]
    fn bean_debug(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        impls::map_debug(self, f)
    }
}

impl fmt::Debug for DynamicMap {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        impls::map_debug(self, f)
    }
}
