use alloc::boxed::Box;
use alloc::string::{String, ToString};
use core::fmt;

use crate::access::{Selector, select, select_mut, store_select, unwrap_optional};
use crate::bean::impl_bean_cast_fn;
use crate::dyna::{
    DynaBean, DynaClass, DynaProperty, container_mut, create_container, put, slot_contains,
    slot_mapped, slot_remove,
};
use crate::hash::{HashMap, new_map};
use crate::impls;
use crate::info::{BeanKind, TypeInfo, Typed};
use crate::ops::{BeanMut, BeanRef};
use crate::{Bean, PropertyError};

/// A dynamic bean that declares properties on first write.
///
/// - A simple write to an undeclared name declares it with the type of the
///   written value.
/// - An indexed or keyed write to an undeclared name declares a
///   [`DynamicList`](crate::ops::DynamicList) or
///   [`DynamicMap`](crate::ops::DynamicMap).
/// - Indexed writes grow lists, padding with element defaults, or empty
///   positions when the element type has no default.
/// - Reading an undeclared name, or past the end of a list, yields no value.
///
/// A restricted bean rejects undeclared names like a [`BasicDynaBean`].
///
/// [`BasicDynaBean`]: crate::dyna::BasicDynaBean
///
/// # Examples
///
/// ```
/// use vc_bean::dyna::{DynaBean, LazyDynaBean};
///
/// let mut bean = LazyDynaBean::new();
/// assert!(bean.get("name").unwrap().is_none());
///
/// bean.set_simple("name", Box::new(String::from("Ada"))).unwrap();
/// bean.set_indexed("scores", 2, Box::new(7_u8)).unwrap();
/// bean.set_mapped("tags", "lang", Box::new("en")).unwrap();
///
/// assert_eq!(bean.dyna_class().len(), 3);
/// assert!(bean.get_indexed("scores", 0).unwrap().is_none());
/// assert_eq!(bean.get_indexed("scores", 2).unwrap().unwrap().downcast_ref::<u8>(), Some(&7));
/// assert!(bean.contains("tags", "lang").unwrap());
///
/// bean.set_restricted(true);
/// assert!(bean.set_simple("other", Box::new(1_u8)).is_err());
/// ```
pub struct LazyDynaBean {
    class: DynaClass,
    values: HashMap<String, Box<dyn Bean>>,
}

impl Default for LazyDynaBean {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl LazyDynaBean {
    /// An empty, unrestricted bean.
    #[inline]
    pub fn new() -> Self {
        Self::with_class(DynaClass::new("LazyDynaBean"))
    }

    /// A bean starting with the declarations of `class`.
    #[inline]
    pub fn with_class(class: DynaClass) -> Self {
        Self {
            class,
            values: new_map(),
        }
    }

    #[inline]
    pub fn class_mut(&mut self) -> &mut DynaClass {
        &mut self.class
    }

    /// Freezes or unfreezes the declared properties.
    #[inline]
    pub fn set_restricted(&mut self, restricted: bool) {
        self.class.set_restricted(restricted);
    }

    /// Number of elements of a list, or of entries of a map, stored in
    /// `name`. `0` without a value.
    pub fn size(&self, name: &str) -> usize {
        let Some(value) = self.values.get(name).and_then(|v| unwrap_optional(&**v)) else {
            return 0;
        };
        match value.bean_ref() {
            BeanRef::List(list) => list.len(),
            BeanRef::Array(array) => array.len(),
            BeanRef::Map(map) => map.len(),
            _ => 0,
        }
    }

    #[inline]
    fn declared(&self, name: &str) -> Option<TypeInfo> {
        self.class.get(name).and_then(DynaProperty::type_info)
    }

    fn declare(&mut self, name: &str, type_info: Option<TypeInfo>) -> Result<(), PropertyError> {
        if self.class.contains(name) {
            return Ok(());
        }
        if self.class.is_restricted() {
            return Err(PropertyError::unknown(name, self.type_path()));
        }
        let property = match type_info {
            Some(type_info) => DynaProperty::with_type(name.to_string(), type_info),
            None => DynaProperty::new(name.to_string()),
        };
        log::trace!("declared lazy property `{}`", property.name());
        self.class.add(property)?;
        Ok(())
    }

    /// The list or map stored in `name`, created on demand.
    fn container_entry(&mut self, name: &str, mapped: bool) -> Result<&mut dyn Bean, PropertyError> {
        if !self.class.contains(name) {
            let container = create_container(None, mapped);
            self.declare(name, Some(container.bean_type_info()))?;
            self.values.insert(name.to_string(), container);
        }

        let declared = self.declared(name);
        let slot = self
            .values
            .entry_ref(name)
            .or_insert_with(|| create_container(declared, mapped));
        if let BeanMut::Optional(optional) = slot.bean_mut() {
            optional.get_or_insert_default();
        }
        container_mut(Some(&mut **slot), name)
    }
}

/// Extends the list in `value` until `index` is a valid position.
fn grow(value: &mut dyn Bean, name: &str, index: usize) -> Result<(), PropertyError> {
    let type_path = value.type_path();
    match value.bean_mut() {
        BeanMut::List(list) => {
            while list.len() <= index {
                if !list.push_default() {
                    return Err(PropertyError::index_out_of_range(name, index, list.len()));
                }
            }
            Ok(())
        }
        // Fixed length, range checked by the caller.
        BeanMut::Array(_) => Ok(()),
        _ => Err(PropertyError::incompatible(name, type_path, "indexed")),
    }
}

impl DynaBean for LazyDynaBean {
    #[inline]
    fn dyna_class(&self) -> &DynaClass {
        &self.class
    }

    #[inline]
    fn accepts_undeclared(&self) -> bool {
        !self.class.is_restricted()
    }

    fn contains(&self, name: &str, key: &str) -> Result<bool, PropertyError> {
        match self.values.get(name) {
            Some(value) => slot_contains(Some(&**value), name, key),
            None => Ok(false),
        }
    }

    #[inline]
    fn get(&self, name: &str) -> Result<Option<&dyn Bean>, PropertyError> {
        Ok(self.values.get(name).map(|value| &**value))
    }

    fn get_mut(&mut self, name: &str) -> Result<Option<&mut dyn Bean>, PropertyError> {
        if !self.values.contains_key(name) {
            match self.declared(name).and_then(|info| info.create_default()) {
                Some(value) => {
                    self.values.insert(name.to_string(), value);
                }
                None => return Ok(None),
            }
        }
        match self.values.get_mut(name) {
            Some(value) => Ok(Some(&mut **value)),
            None => Ok(None),
        }
    }

    fn get_indexed(&self, name: &str, index: usize) -> Result<Option<&dyn Bean>, PropertyError> {
        let Some(list) = self.values.get(name).and_then(|v| unwrap_optional(&**v)) else {
            return Ok(None);
        };
        match select(list, name, &Selector::Index(index)) {
            Err(PropertyError::IndexOutOfRange { .. }) if list.bean_kind() == BeanKind::List => {
                Ok(None)
            }
            other => other,
        }
    }

    fn get_indexed_mut(
        &mut self,
        name: &str,
        index: usize,
    ) -> Result<Option<&mut dyn Bean>, PropertyError> {
        let list = self.container_entry(name, false)?;
        grow(list, name, index)?;
        select_mut(list, name, &Selector::Index(index))
    }

    fn get_mapped(&self, name: &str, key: &str) -> Result<Option<&dyn Bean>, PropertyError> {
        match self.values.get(name) {
            Some(value) => slot_mapped(Some(&**value), name, key),
            None => Ok(None),
        }
    }

    fn get_mapped_mut(
        &mut self,
        name: &str,
        key: &str,
    ) -> Result<Option<&mut dyn Bean>, PropertyError> {
        let map = self.container_entry(name, true)?;
        select_mut(map, name, &Selector::Key(key.into()))
    }

    fn set_simple(&mut self, name: &str, value: Box<dyn Bean>) -> Result<(), PropertyError> {
        if !self.class.contains(name) {
            let type_info = (!value.is_null()).then(|| value.bean_type_info());
            self.declare(name, type_info)?;
        }

        let declared = self.declared(name);
        let mut slot = self.values.remove(name);
        let res = put(&mut slot, declared, name, value);
        if let Some(value) = slot {
            self.values.insert(name.to_string(), value);
        }
        res
    }

    fn set_indexed(
        &mut self,
        name: &str,
        index: usize,
        value: Box<dyn Bean>,
    ) -> Result<(), PropertyError> {
        let list = self.container_entry(name, false)?;
        grow(list, name, index)?;
        store_select(list, name, &Selector::Index(index), value)
    }

    fn set_mapped(
        &mut self,
        name: &str,
        key: &str,
        value: Box<dyn Bean>,
    ) -> Result<(), PropertyError> {
        let map = self.container_entry(name, true)?;
        store_select(map, name, &Selector::Key(key.into()), value)
    }

    fn remove(&mut self, name: &str, key: &str) -> Result<Option<Box<dyn Bean>>, PropertyError> {
        match self.values.get_mut(name) {
            Some(value) => slot_remove(Some(&mut **value), name, key),
            None => Ok(None),
        }
    }
}

impl Typed for LazyDynaBean {
    fn type_info() -> TypeInfo {
        TypeInfo::new::<Self>(BeanKind::Dynamic).with_default(|| Box::new(Self::new()))
    }
}

impl Bean for LazyDynaBean {
    impl_bean_cast_fn!(Dynamic);

    #[inline]
    fn bean_type_info(&self) -> TypeInfo {
        <Self as Typed>::type_info()
    }

    fn set(&mut self, value: Box<dyn Bean>) -> Result<(), Box<dyn Bean>> {
        *self = value.take::<Self>()?;
        Ok(())
    }

    fn bean_clone(&self) -> Option<Box<dyn Bean>> {
        let mut values = new_map();
        for (name, value) in &self.values {
            values.insert(name.clone(), value.bean_clone()?);
        }
        Some(Box::new(Self {
            class: self.class.clone(),
            values,
        }))
    }

    #[inline]
    fn bean_partial_eq(&self, other: &dyn Bean) -> Option<bool> {
        impls::dyna_partial_eq(self, other)
    }
}

impl fmt::Debug for LazyDynaBean {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        impls::dyna_debug(self, f)
    }
}

#[cfg(test)]
mod tests {
    use alloc::boxed::Box;
    use alloc::string::String;
    use alloc::vec::Vec;

    use super::LazyDynaBean;
    use crate::dyna::{DynaBean, DynaClass, DynaProperty};
    use crate::ops::DynamicList;
    use crate::{ErrorKind, Null};

    #[test]
    fn declares_on_write() {
        let mut bean = LazyDynaBean::new();
        bean.set_simple("count", Box::new(3_u32)).unwrap();
        let property = bean.dyna_class().get("count").unwrap();
        assert!(property.type_info().unwrap().is::<u32>());

        // The first value fixed the type.
        let err = bean.set_simple("count", Box::new("x")).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ConversionFailure);

        bean.set_simple("empty", Box::new(Null)).unwrap();
        assert!(bean.dyna_class().get("empty").unwrap().type_info().is_none());
        assert!(bean.get("empty").unwrap().is_none());
    }

    #[test]
    fn grows_typed_lists() {
        let mut class = DynaClass::new("sample");
        class.add(DynaProperty::of::<Vec<u16>>("values")).unwrap();
        let mut bean = LazyDynaBean::with_class(class);

        bean.set_indexed("values", 2, Box::new(9_u16)).unwrap();
        assert_eq!(bean.size("values"), 3);
        let values = bean.get("values").unwrap().unwrap();
        assert_eq!(values.downcast_ref::<Vec<u16>>(), Some(&alloc::vec![0, 0, 9]));

        let slot = bean.get_indexed_mut("values", 4).unwrap().unwrap();
        assert!(slot.is::<u16>());
        assert_eq!(bean.size("values"), 5);
    }

    #[test]
    fn undeclared_containers() {
        let mut bean = LazyDynaBean::new();
        bean.set_indexed("names", 1, Box::new(String::from("b"))).unwrap();
        let names = bean.get("names").unwrap().unwrap();
        let names = names.downcast_ref::<DynamicList>().unwrap();
        assert!(crate::ops::List::get(names, 0).is_none());

        assert!(bean.get_indexed("names", 7).unwrap().is_none());
        assert!(bean.get_mapped("missing", "k").unwrap().is_none());
        assert!(!bean.contains("missing", "k").unwrap());

        bean.set_mapped("attrs", "k", Box::new(1_i8)).unwrap();
        assert!(bean.remove("attrs", "k").unwrap().is_some());
        assert_eq!(bean.size("attrs"), 0);
    }

    #[test]
    fn restricted() {
        let mut bean = LazyDynaBean::new();
        bean.set_simple("a", Box::new(1_u8)).unwrap();
        bean.set_restricted(true);
        assert!(!bean.accepts_undeclared());

        bean.set_simple("a", Box::new(2_u8)).unwrap();
        let err = bean.set_indexed("b", 0, Box::new(1_u8)).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnknownProperty);
        assert!(bean.get("b").unwrap().is_none());
    }
}
