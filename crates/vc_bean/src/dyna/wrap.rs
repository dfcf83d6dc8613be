use alloc::boxed::Box;
use alloc::string::String;
use alloc::sync::Arc;
use core::fmt;

use crate::access::{Selector, readable, store, store_select, writeable};
use crate::bean::impl_bean_cast_fn;
use crate::dyna::{
    DynaBean, DynaClass, DynaProperty, container_mut, slot_indexed, slot_indexed_mut, slot_mapped,
    slot_mapped_mut,
};
use crate::impls;
use crate::info::{BeanInfo, BeanKind, TypeInfo, Typed};
use crate::ops::{BeanMut, BeanRef, Properties};
use crate::registry::IntrospectionCache;
use crate::{Bean, PropertyError};

/// The [`DynaBean`] view of a conventional bean.
///
/// Every operation is forwarded to the wrapped bean and checked against its
/// descriptors. The class is restricted to the wrapped type's properties.
/// [`contains`](DynaBean::contains) and [`remove`](DynaBean::remove) are
/// not supported.
///
/// # Examples
///
/// ```
/// use vc_bean::derive::Bean;
/// use vc_bean::dyna::{DynaBean, WrapDynaBean};
///
/// #[derive(Bean, Clone, Default)]
/// struct User { name: String, #[bean(read_only)] id: u64 }
///
/// let mut bean = WrapDynaBean::new(User::default());
/// bean.set_simple("name", Box::new(String::from("Ada"))).unwrap();
/// assert!(bean.set_simple("id", Box::new(7_u64)).is_err());
///
/// let user = bean.instance().downcast_ref::<User>().unwrap();
/// assert_eq!(user.name, "Ada");
/// ```
pub struct WrapDynaBean {
    instance: Box<dyn Bean>,
    info: Arc<BeanInfo>,
    class: DynaClass,
}

impl WrapDynaBean {
    /// Wraps `instance`, computing its descriptors.
    pub fn new(instance: impl Properties) -> Self {
        let info = Arc::new(instance.bean_info());
        Self::from_parts(Box::new(instance), info)
    }

    /// Wraps `instance`, with descriptors from `cache`.
    pub fn with_cache(instance: impl Properties, cache: &IntrospectionCache) -> Self {
        let info = cache.bean_info(&instance);
        Self::from_parts(Box::new(instance), info)
    }

    /// Wraps a boxed conventional bean, returning any other bean unchanged.
    pub fn from_boxed(instance: Box<dyn Bean>) -> Result<Self, Box<dyn Bean>> {
        let info = match instance.bean_ref() {
            BeanRef::Struct(bean) => Some(Arc::new(bean.bean_info())),
            _ => None,
        };
        match info {
            Some(info) => Ok(Self::from_parts(instance, info)),
            None => Err(instance),
        }
    }

    fn from_parts(instance: Box<dyn Bean>, info: Arc<BeanInfo>) -> Self {
        let properties = info
            .iter()
            .map(|desc| DynaProperty::with_type(String::from(desc.name()), desc.type_info()));
        let mut class = DynaClass::with_properties(instance.type_path(), properties);
        class.set_restricted(true);
        Self {
            instance,
            info,
            class,
        }
    }

    /// The wrapped bean.
    #[inline]
    pub fn instance(&self) -> &dyn Bean {
        &*self.instance
    }

    #[inline]
    pub fn instance_mut(&mut self) -> &mut dyn Bean {
        &mut *self.instance
    }

    #[inline]
    pub fn into_inner(self) -> Box<dyn Bean> {
        self.instance
    }

    fn properties(&self) -> Result<&dyn Properties, PropertyError> {
        match self.instance.bean_ref() {
            BeanRef::Struct(bean) => Ok(bean),
            _ => Err(PropertyError::unsupported(
                "property access",
                self.instance.type_path(),
            )),
        }
    }

    fn properties_mut(&mut self) -> Result<&mut dyn Properties, PropertyError> {
        let type_path = self.instance.type_path();
        match self.instance.bean_mut() {
            BeanMut::Struct(bean) => Ok(bean),
            _ => Err(PropertyError::unsupported("property access", type_path)),
        }
    }

    #[inline]
    fn type_path_of_instance(&self) -> &'static str {
        self.instance.type_path()
    }
}

impl DynaBean for WrapDynaBean {
    #[inline]
    fn dyna_class(&self) -> &DynaClass {
        &self.class
    }

    fn contains(&self, _: &str, _: &str) -> Result<bool, PropertyError> {
        Err(PropertyError::unsupported("contains", self.type_path()))
    }

    fn get(&self, name: &str) -> Result<Option<&dyn Bean>, PropertyError> {
        let type_path = self.type_path_of_instance();
        let desc = readable(&self.info, name, type_path)?;
        if desc.is_dedicated() {
            return Err(PropertyError::incompatible(name, type_path, "a simple property"));
        }
        Ok(self.properties()?.property(name))
    }

    fn get_mut(&mut self, name: &str) -> Result<Option<&mut dyn Bean>, PropertyError> {
        let type_path = self.type_path_of_instance();
        let desc = readable(&self.info, name, type_path)?;
        if desc.is_dedicated() {
            return Err(PropertyError::incompatible(name, type_path, "a simple property"));
        }
        Ok(self.properties_mut()?.property_mut(name))
    }

    fn get_indexed(&self, name: &str, index: usize) -> Result<Option<&dyn Bean>, PropertyError> {
        let desc = readable(&self.info, name, self.type_path_of_instance())?;
        let bean = self.properties()?;
        if desc.is_dedicated() {
            bean.indexed_property(name, index)
        } else {
            slot_indexed(bean.property(name), name, index)
        }
    }

    fn get_indexed_mut(
        &mut self,
        name: &str,
        index: usize,
    ) -> Result<Option<&mut dyn Bean>, PropertyError> {
        let dedicated = readable(&self.info, name, self.type_path_of_instance())?.is_dedicated();
        let bean = self.properties_mut()?;
        if dedicated {
            bean.indexed_property_mut(name, index)
        } else {
            slot_indexed_mut(bean.property_mut(name), name, index)
        }
    }

    fn get_mapped(&self, name: &str, key: &str) -> Result<Option<&dyn Bean>, PropertyError> {
        let desc = readable(&self.info, name, self.type_path_of_instance())?;
        let bean = self.properties()?;
        if desc.is_dedicated() {
            bean.mapped_property(name, key)
        } else {
            slot_mapped(bean.property(name), name, key)
        }
    }

    fn get_mapped_mut(
        &mut self,
        name: &str,
        key: &str,
    ) -> Result<Option<&mut dyn Bean>, PropertyError> {
        let dedicated = readable(&self.info, name, self.type_path_of_instance())?.is_dedicated();
        let bean = self.properties_mut()?;
        if dedicated {
            bean.mapped_property_mut(name, key)
        } else {
            slot_mapped_mut(bean.property_mut(name), name, key)
        }
    }

    fn set_simple(&mut self, name: &str, value: Box<dyn Bean>) -> Result<(), PropertyError> {
        let type_path = self.type_path_of_instance();
        if writeable(&self.info, name, type_path)?.is_dedicated() {
            return Err(PropertyError::incompatible(name, type_path, "a simple property"));
        }
        let slot = self
            .properties_mut()?
            .property_mut(name)
            .ok_or_else(|| PropertyError::unknown(name, type_path))?;
        store(slot, name, value)
    }

    fn set_indexed(
        &mut self,
        name: &str,
        index: usize,
        value: Box<dyn Bean>,
    ) -> Result<(), PropertyError> {
        let type_path = self.type_path_of_instance();
        let dedicated = self.info.get(name).is_some_and(|desc| desc.is_dedicated());
        if dedicated {
            writeable(&self.info, name, type_path)?;
            return self.properties_mut()?.set_indexed_property(name, index, value);
        }
        readable(&self.info, name, type_path)?;
        let list = container_mut(self.properties_mut()?.property_mut(name), name)?;
        store_select(list, name, &Selector::Index(index), value)
    }

    fn set_mapped(
        &mut self,
        name: &str,
        key: &str,
        value: Box<dyn Bean>,
    ) -> Result<(), PropertyError> {
        let type_path = self.type_path_of_instance();
        let dedicated = self.info.get(name).is_some_and(|desc| desc.is_dedicated());
        if dedicated {
            writeable(&self.info, name, type_path)?;
            return self.properties_mut()?.set_mapped_property(name, key, value);
        }
        readable(&self.info, name, type_path)?;
        let map = container_mut(self.properties_mut()?.property_mut(name), name)?;
        store_select(map, name, &Selector::Key(key.into()), value)
    }

    fn remove(&mut self, _: &str, _: &str) -> Result<Option<Box<dyn Bean>>, PropertyError> {
        Err(PropertyError::unsupported("remove", self.type_path()))
    }
}

impl Typed for WrapDynaBean {
    fn type_info() -> TypeInfo {
        TypeInfo::new::<Self>(BeanKind::Dynamic)
    }
}

impl Bean for WrapDynaBean {
    impl_bean_cast_fn!(Dynamic);

    #[inline]
    fn bean_type_info(&self) -> TypeInfo {
        <Self as Typed>::type_info()
    }

    /// Accepts another wrapper, or a value of the wrapped type.
    fn set(&mut self, value: Box<dyn Bean>) -> Result<(), Box<dyn Bean>> {
        match value.take::<Self>() {
            Ok(other) => {
                *self = other;
                Ok(())
            }
            Err(value) => self.instance.set(value),
        }
    }

    fn bean_clone(&self) -> Option<Box<dyn Bean>> {
        Some(Box::new(Self {
            instance: self.instance.bean_clone()?,
            info: Arc::clone(&self.info),
            class: self.class.clone(),
        }))
    }

    #[inline]
    fn bean_partial_eq(&self, other: &dyn Bean) -> Option<bool> {
        impls::dyna_partial_eq(self, other)
    }
}

impl fmt::Debug for WrapDynaBean {
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

    use super::WrapDynaBean;
    use crate::derive::Bean;
    use crate::dyna::DynaBean;
    use crate::ErrorKind;

    #[derive(Bean, Clone, Default)]
    struct Person {
        name: String,
        phones: Vec<String>,
        addresses: BTreeMap<String, String>,
        #[bean(write_only)]
        secret: String,
    }

    #[test]
    fn forwards_to_the_instance() {
        let person = Person {
            phones: vec![String::from("1")],
            ..Default::default()
        };
        let mut bean = WrapDynaBean::new(person);

        bean.set_indexed("phones", 0, Box::new(String::from("2"))).unwrap();
        bean.set_mapped("addresses", "home", Box::new(String::from("Elm"))).unwrap();
        bean.set_simple("secret", Box::new(String::from("s"))).unwrap();

        let phone = bean.get_indexed("phones", 0).unwrap().unwrap();
        assert_eq!(phone.downcast_ref::<String>().map(String::as_str), Some("2"));
        assert!(bean.get_mapped("addresses", "home").unwrap().is_some());

        let err = bean.get("secret").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnknownProperty);
        let err = bean.get_indexed("phones", 3).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::IndexOutOfRange);
    }

    #[test]
    fn unsupported_operations() {
        let mut bean = WrapDynaBean::new(Person::default());
        assert_eq!(
            bean.contains("addresses", "home").unwrap_err().kind(),
            ErrorKind::UnsupportedOperation
        );
        assert_eq!(
            bean.remove("addresses", "home").unwrap_err().kind(),
            ErrorKind::UnsupportedOperation
        );
        assert!(bean.dyna_class().is_restricted());
        assert!(!bean.accepts_undeclared());
    }

    #[test]
    fn from_boxed() {
        assert!(WrapDynaBean::from_boxed(Box::new(3_u8)).is_err());
        let bean = WrapDynaBean::from_boxed(Box::new(Person::default())).unwrap();
        assert_eq!(bean.dyna_class().len(), 4);
    }
}
