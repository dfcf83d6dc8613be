use alloc::borrow::Cow;
use alloc::vec::Vec;
use core::slice;

use crate::PropertyError;
use crate::hash::{HashMap, new_map};
use crate::info::{TypeInfo, Typed};

// -----------------------------------------------------------------------------
// DynaProperty

/// A declared property of a [`DynaClass`].
///
/// The type is optional; an untyped property accepts any value.
#[derive(Debug, Clone, PartialEq)]
pub struct DynaProperty {
    name: Cow<'static, str>,
    type_info: Option<TypeInfo>,
}

impl DynaProperty {
    /// An untyped property.
    #[inline]
    pub fn new(name: impl Into<Cow<'static, str>>) -> Self {
        Self {
            name: name.into(),
            type_info: None,
        }
    }

    /// A property of type `T`.
    #[inline]
    pub fn of<T: Typed>(name: impl Into<Cow<'static, str>>) -> Self {
        Self::with_type(name, T::type_info())
    }

    #[inline]
    pub fn with_type(name: impl Into<Cow<'static, str>>, type_info: TypeInfo) -> Self {
        Self {
            name: name.into(),
            type_info: Some(type_info),
        }
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn type_info(&self) -> Option<TypeInfo> {
        self.type_info
    }

    /// Returns `true` if the declared type is a list or an array.
    #[inline]
    pub fn is_indexed(&self) -> bool {
        self.type_info
            .is_some_and(|info| info.unwrap_optional().kind().is_sequence())
    }

    /// Returns `true` if the declared type is a map.
    #[inline]
    pub fn is_mapped(&self) -> bool {
        self.type_info
            .is_some_and(|info| info.unwrap_optional().kind() == crate::info::BeanKind::Map)
    }

    /// The element type of an indexed property, the value type of a mapped one.
    #[inline]
    pub fn content_type(&self) -> Option<TypeInfo> {
        self.type_info.and_then(|info| info.unwrap_optional().element())
    }
}

// -----------------------------------------------------------------------------
// DynaClass

/// The ordered property declarations of dynamic beans.
///
/// A restricted class rejects [`add`](Self::add) and [`remove`](Self::remove).
///
/// # Examples
///
/// ```
/// use vc_bean::dyna::{DynaClass, DynaProperty};
///
/// let mut class = DynaClass::new("employee");
/// class.add(DynaProperty::of::<String>("name")).unwrap();
/// class.add(DynaProperty::of::<Vec<String>>("phones")).unwrap();
///
/// assert_eq!(class.names().collect::<Vec<_>>(), ["name", "phones"]);
/// assert!(class.get("phones").unwrap().is_indexed());
///
/// class.set_restricted(true);
/// assert!(class.add(DynaProperty::new("age")).is_err());
/// ```
#[derive(Debug, Clone)]
pub struct DynaClass {
    name: Cow<'static, str>,
    properties: Vec<DynaProperty>,
    indices: HashMap<Cow<'static, str>, usize>,
    restricted: bool,
}

impl DynaClass {
    /// An empty, unrestricted class.
    #[inline]
    pub fn new(name: impl Into<Cow<'static, str>>) -> Self {
        Self {
            name: name.into(),
            properties: Vec::new(),
            indices: new_map(),
            restricted: false,
        }
    }

    /// A class with the given properties, a later duplicate replaces an
    /// earlier one.
    pub fn with_properties(
        name: impl Into<Cow<'static, str>>,
        properties: impl IntoIterator<Item = DynaProperty>,
    ) -> Self {
        let mut class = Self::new(name);
        for property in properties {
            class.insert(property);
        }
        class
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn is_restricted(&self) -> bool {
        self.restricted
    }

    /// Freezes or unfreezes the property set.
    #[inline]
    pub fn set_restricted(&mut self, restricted: bool) {
        self.restricted = restricted;
    }

    #[inline]
    pub fn get(&self, name: &str) -> Option<&DynaProperty> {
        self.indices.get(name).map(|&index| &self.properties[index])
    }

    #[inline]
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.indices.get(name).copied()
    }

    #[inline]
    pub fn contains(&self, name: &str) -> bool {
        self.indices.contains_key(name)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.properties.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }

    /// The declared properties, in declaration order.
    #[inline]
    pub fn iter(&self) -> slice::Iter<'_, DynaProperty> {
        self.properties.iter()
    }

    #[inline]
    pub fn names(&self) -> impl ExactSizeIterator<Item = &str> {
        self.properties.iter().map(DynaProperty::name)
    }

    fn insert(&mut self, property: DynaProperty) -> usize {
        match self.indices.get(property.name()) {
            Some(&index) => {
                self.properties[index] = property;
                index
            }
            None => {
                let index = self.properties.len();
                self.indices.insert(property.name.clone(), index);
                self.properties.push(property);
                index
            }
        }
    }

    /// Declares `property`, replacing a declaration of the same name.
    ///
    /// Returns the index of the declaration.
    pub fn add(&mut self, property: DynaProperty) -> Result<usize, PropertyError> {
        if self.restricted {
            return Err(PropertyError::unsupported(
                "adding a property",
                "restricted DynaClass",
            ));
        }
        Ok(self.insert(property))
    }

    /// Removes the declaration of `name`.
    pub fn remove(&mut self, name: &str) -> Result<Option<DynaProperty>, PropertyError> {
        if self.restricted {
            return Err(PropertyError::unsupported(
                "removing a property",
                "restricted DynaClass",
            ));
        }
        let Some(index) = self.indices.remove(name) else {
            return Ok(None);
        };
        let property = self.properties.remove(index);
        for slot in self.indices.values_mut() {
            if *slot > index {
                *slot -= 1;
            }
        }
        Ok(Some(property))
    }
}

impl<'a> IntoIterator for &'a DynaClass {
    type Item = &'a DynaProperty;
    type IntoIter = slice::Iter<'a, DynaProperty>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec::Vec;

    use super::{DynaClass, DynaProperty};
    use crate::ErrorKind;

    #[test]
    fn declaration_order_and_replacement() {
        let mut class = DynaClass::with_properties(
            "sample",
            [
                DynaProperty::new("a"),
                DynaProperty::of::<u8>("b"),
                DynaProperty::new("c"),
            ],
        );
        assert_eq!(class.add(DynaProperty::of::<u16>("b")), Ok(1));
        assert!(class.get("b").unwrap().type_info().unwrap().is::<u16>());
        assert_eq!(class.names().collect::<Vec<_>>(), ["a", "b", "c"]);
    }

    #[test]
    fn remove_reindexes() {
        let mut class = DynaClass::with_properties(
            "sample",
            [DynaProperty::new("a"), DynaProperty::new("b"), DynaProperty::new("c")],
        );
        assert!(class.remove("a").unwrap().is_some());
        assert_eq!(class.index_of("c"), Some(1));
        assert_eq!(class.get("b").map(DynaProperty::name), Some("b"));
        assert_eq!(class.remove("zzz"), Ok(None));
    }

    #[test]
    fn restricted() {
        let mut class = DynaClass::new("sample");
        class.set_restricted(true);
        let err = class.remove("a").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnsupportedOperation);
    }
}
