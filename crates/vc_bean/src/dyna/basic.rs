use alloc::boxed::Box;
use alloc::sync::Arc;
use alloc::vec::Vec;
use core::fmt;

use crate::access::{Selector, store_select};
use crate::bean::impl_bean_cast_fn;
use crate::dyna::{
    DynaBean, DynaClass, DynaProperty, as_slot_mut, container_mut, put, slot_contains,
    slot_indexed, slot_indexed_mut, slot_mapped, slot_mapped_mut, slot_remove,
};
use crate::impls;
use crate::info::{BeanKind, TypeInfo, Typed};
use crate::{Bean, PropertyError};

/// A dynamic bean over a fixed [`DynaClass`].
///
/// Every slot starts empty. Undeclared names fail with
/// [`UnknownProperty`](crate::ErrorKind::UnknownProperty) and values are
/// type checked against the declaration.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use vc_bean::dyna::{BasicDynaBean, DynaBean, DynaClass, DynaProperty};
///
/// let class = Arc::new(DynaClass::with_properties("point", [
///     DynaProperty::of::<i32>("x"),
///     DynaProperty::of::<i32>("y"),
/// ]));
///
/// let mut point = BasicDynaBean::new(class);
/// assert!(point.get("x").unwrap().is_none());
///
/// point.set_simple("x", Box::new(3_i32)).unwrap();
/// assert_eq!(point.get("x").unwrap().unwrap().downcast_ref::<i32>(), Some(&3));
///
/// assert!(point.set_simple("x", Box::new("three")).is_err());
/// assert!(point.set_simple("z", Box::new(1_i32)).is_err());
/// ```
pub struct BasicDynaBean {
    class: Arc<DynaClass>,
    values: Vec<Option<Box<dyn Bean>>>,
}

impl BasicDynaBean {
    /// An instance of `class` with every slot empty.
    pub fn new(class: impl Into<Arc<DynaClass>>) -> Self {
        let class = class.into();
        let values = class.iter().map(|_| None).collect();
        Self { class, values }
    }

    #[inline]
    pub fn class(&self) -> &Arc<DynaClass> {
        &self.class
    }

    #[inline]
    fn index_of(&self, name: &str) -> Result<usize, PropertyError> {
        self.class
            .index_of(name)
            .ok_or_else(|| PropertyError::unknown(name, self.type_path()))
    }

    #[inline]
    fn slot(&self, name: &str) -> Result<Option<&dyn Bean>, PropertyError> {
        let index = self.index_of(name)?;
        Ok(self.values[index].as_deref())
    }
}

impl DynaBean for BasicDynaBean {
    #[inline]
    fn dyna_class(&self) -> &DynaClass {
        &self.class
    }

    fn contains(&self, name: &str, key: &str) -> Result<bool, PropertyError> {
        slot_contains(self.slot(name)?, name, key)
    }

    #[inline]
    fn get(&self, name: &str) -> Result<Option<&dyn Bean>, PropertyError> {
        self.slot(name)
    }

    fn get_mut(&mut self, name: &str) -> Result<Option<&mut dyn Bean>, PropertyError> {
        let index = self.index_of(name)?;
        Ok(as_slot_mut(&mut self.values[index]))
    }

    fn get_indexed(&self, name: &str, index: usize) -> Result<Option<&dyn Bean>, PropertyError> {
        slot_indexed(self.slot(name)?, name, index)
    }

    fn get_indexed_mut(
        &mut self,
        name: &str,
        index: usize,
    ) -> Result<Option<&mut dyn Bean>, PropertyError> {
        let slot = self.get_mut(name)?;
        slot_indexed_mut(slot, name, index)
    }

    fn get_mapped(&self, name: &str, key: &str) -> Result<Option<&dyn Bean>, PropertyError> {
        slot_mapped(self.slot(name)?, name, key)
    }

    fn get_mapped_mut(
        &mut self,
        name: &str,
        key: &str,
    ) -> Result<Option<&mut dyn Bean>, PropertyError> {
        let slot = self.get_mut(name)?;
        slot_mapped_mut(slot, name, key)
    }

    fn set_simple(&mut self, name: &str, value: Box<dyn Bean>) -> Result<(), PropertyError> {
        let index = self.index_of(name)?;
        let declared = self.class.get(name).and_then(DynaProperty::type_info);
        put(&mut self.values[index], declared, name, value)
    }

    fn set_indexed(
        &mut self,
        name: &str,
        index: usize,
        value: Box<dyn Bean>,
    ) -> Result<(), PropertyError> {
        let list = container_mut(self.get_mut(name)?, name)?;
        store_select(list, name, &Selector::Index(index), value)
    }

    fn set_mapped(
        &mut self,
        name: &str,
        key: &str,
        value: Box<dyn Bean>,
    ) -> Result<(), PropertyError> {
        let map = container_mut(self.get_mut(name)?, name)?;
        store_select(map, name, &Selector::Key(key.into()), value)
    }

    fn remove(&mut self, name: &str, key: &str) -> Result<Option<Box<dyn Bean>>, PropertyError> {
        slot_remove(self.get_mut(name)?, name, key)
    }
}

impl Typed for BasicDynaBean {
    fn type_info() -> TypeInfo {
        TypeInfo::new::<Self>(BeanKind::Dynamic)
    }
}

impl Bean for BasicDynaBean {
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
        let mut values = Vec::with_capacity(self.values.len());
        for value in &self.values {
            values.push(match value {
                Some(value) => Some(value.bean_clone()?),
                None => None,
            });
        }
        Some(Box::new(Self {
            class: Arc::clone(&self.class),
            values,
        }))
    }

    #[inline]
    fn bean_partial_eq(&self, other: &dyn Bean) -> Option<bool> {
        impls::dyna_partial_eq(self, other)
    }
}

impl fmt::Debug for BasicDynaBean {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        impls::dyna_debug(self, f)
    }
}

#[cfg(test)]
mod tests {
    use alloc::boxed::Box;
    use alloc::collections::BTreeMap;
    use alloc::string::String;
    use alloc::vec;
    use alloc::vec::Vec;

    use super::BasicDynaBean;
    use crate::dyna::{DynaBean, DynaClass, DynaProperty};
    use crate::{Bean, ErrorKind, Null};

    fn employee() -> BasicDynaBean {
        BasicDynaBean::new(DynaClass::with_properties(
            "employee",
            [
                DynaProperty::of::<String>("name"),
                DynaProperty::of::<Option<u32>>("age"),
                DynaProperty::of::<Vec<String>>("phones"),
                DynaProperty::of::<BTreeMap<String, String>>("addresses"),
                DynaProperty::new("note"),
            ],
        ))
    }

    #[test]
    fn typed_slots() {
        let mut bean = employee();
        bean.set_simple("age", Box::new(41_u32)).unwrap();
        let age = bean.get("age").unwrap().unwrap();
        assert_eq!(age.downcast_ref::<Option<u32>>(), Some(&Some(41)));

        bean.set_simple("age", Box::new(Null)).unwrap();
        assert!(bean.get("age").unwrap().is_none());

        let err = bean.set_simple("name", Box::new(3_u8)).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ConversionFailure);

        bean.set_simple("note", Box::new(3_u8)).unwrap();
        bean.set_simple("note", Box::new("any")).unwrap();
    }

    #[test]
    fn indexed_and_mapped() {
        let mut bean = employee();
        let err = bean.get_indexed("phones", 0).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NestedNull);

        bean.set_simple("phones", Box::new(vec![String::from("555")])).unwrap();
        bean.set_indexed("phones", 0, Box::new(String::from("556"))).unwrap();
        let err = bean.set_indexed("phones", 1, Box::new(String::new())).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::IndexOutOfRange);

        bean.set_simple("addresses", Box::new(BTreeMap::<String, String>::new())).unwrap();
        bean.set_mapped("addresses", "home", Box::new(String::from("Elm St"))).unwrap();
        assert!(bean.contains("addresses", "home").unwrap());
        assert!(bean.get_mapped("addresses", "work").unwrap().is_none());
        assert!(bean.remove("addresses", "home").unwrap().is_some());
        assert!(!bean.contains("addresses", "home").unwrap());

        let err = bean.get_mapped("phones", "x").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnknownProperty);
    }

    #[test]
    fn clone_and_eq() {
        let mut bean = employee();
        bean.set_simple("name", Box::new(String::from("Ada"))).unwrap();
        let copy = bean.bean_clone().unwrap();
        assert_eq!(bean.bean_partial_eq(&*copy), Some(true));

        bean.set_simple("name", Box::new(String::from("Bob"))).unwrap();
        assert_eq!(bean.bean_partial_eq(&*copy), Some(false));
    }
}
