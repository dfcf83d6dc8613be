use alloc::boxed::Box;

use crate::info::BeanInfo;
use crate::{Bean, PropertyError};

/// A conventional bean: an object with named, typed properties.
///
/// Usually implemented by [`#[derive(Bean)]`](crate::derive::Bean).
///
/// [`property`](Properties::property) and
/// [`property_mut`](Properties::property_mut) expose every declared property
/// regardless of its readable / writeable flags; the flags of
/// [`bean_info`](Properties::bean_info) are enforced by the path resolver.
///
/// # Dedicated accessors
///
/// A property described with [`PropertyDescriptor::indexed`] or
/// [`PropertyDescriptor::mapped`] has no whole-value accessor. The resolver
/// serves it through the `*indexed_property*` / `*mapped_property*` methods
/// instead, which must then be overridden.
///
/// ```
/// use vc_bean::{Bean, BeanMut, BeanRef, PropertyError, PropertyUtils};
/// use vc_bean::info::{BeanInfo, BeanKind, PropertyDescriptor, TypeInfo, Typed};
/// use vc_bean::ops::Properties;
///
/// /// Four registers, only reachable one at a time.
/// struct Registers([u32; 4]);
///
/// impl Typed for Registers {
///     fn type_info() -> TypeInfo { TypeInfo::new::<Self>(BeanKind::Struct) }
/// }
///
/// impl Bean for Registers {
///     fn bean_type_info(&self) -> TypeInfo { Self::type_info() }
///     fn bean_kind(&self) -> BeanKind { BeanKind::Struct }
///     fn bean_ref(&self) -> BeanRef<'_> { BeanRef::Struct(self) }
///     fn bean_mut(&mut self) -> BeanMut<'_> { BeanMut::Struct(self) }
///     fn set(&mut self, value: Box<dyn Bean>) -> Result<(), Box<dyn Bean>> {
///         *self = value.take::<Self>()?;
///         Ok(())
///     }
///     fn bean_clone(&self) -> Option<Box<dyn Bean>> { Some(Box::new(Registers(self.0))) }
/// }
///
/// impl Properties for Registers {
///     fn bean_info(&self) -> BeanInfo {
///         BeanInfo::new::<Self>([PropertyDescriptor::indexed::<u32>("reg")])
///     }
///     fn property(&self, _: &str) -> Option<&dyn Bean> { None }
///     fn property_mut(&mut self, _: &str) -> Option<&mut dyn Bean> { None }
///
///     fn indexed_property(&self, name: &str, index: usize) -> Result<Option<&dyn Bean>, PropertyError> {
///         match self.0.get(index) {
///             Some(value) => Ok(Some(value)),
///             None => Err(PropertyError::index_out_of_range(name, index, 4)),
///         }
///     }
///
///     fn indexed_property_mut(&mut self, name: &str, index: usize) -> Result<Option<&mut dyn Bean>, PropertyError> {
///         match self.0.get_mut(index) {
///             Some(value) => Ok(Some(value)),
///             None => Err(PropertyError::index_out_of_range(name, index, 4)),
///         }
///     }
/// }
///
/// let utils = PropertyUtils::default();
/// let mut regs = Registers([0; 4]);
///
/// utils.set_property(&mut regs, "reg[2]", Box::new(7_u32)).unwrap();
/// assert_eq!(regs.0, [0, 0, 7, 0]);
/// assert!(utils.get_property(&regs, "reg[4]").is_err());
/// ```
///
/// [`PropertyDescriptor::indexed`]: crate::info::PropertyDescriptor::indexed
/// [`PropertyDescriptor::mapped`]: crate::info::PropertyDescriptor::mapped
pub trait Properties: Bean {
    /// Computes the accessor descriptors of this type.
    ///
    /// Called once per type and memoized by the
    /// [`IntrospectionCache`](crate::registry::IntrospectionCache).
    fn bean_info(&self) -> BeanInfo;

    /// The current value of the property `name`.
    fn property(&self, name: &str) -> Option<&dyn Bean>;

    /// Mutable access to the property `name`.
    fn property_mut(&mut self, name: &str) -> Option<&mut dyn Bean>;

    /// Replaces the value of the property `name`, type checked.
    #[inline]
    fn set_property(&mut self, name: &str, value: Box<dyn Bean>) -> Result<(), Box<dyn Bean>> {
        match self.property_mut(name) {
            Some(slot) => slot.set(value),
            None => Err(value),
        }
    }

    /// Dedicated indexed read.
    fn indexed_property(&self, name: &str, index: usize) -> Result<Option<&dyn Bean>, PropertyError> {
        let _ = (name, index);
        Err(PropertyError::unsupported("indexed read", self.type_path()))
    }

    /// Dedicated indexed mutable access.
    fn indexed_property_mut(
        &mut self,
        name: &str,
        index: usize,
    ) -> Result<Option<&mut dyn Bean>, PropertyError> {
        let _ = (name, index);
        Err(PropertyError::unsupported("indexed write", self.type_path()))
    }

    /// Dedicated indexed write.
    ///
    /// The default stores through
    /// [`indexed_property_mut`](Properties::indexed_property_mut).
    fn set_indexed_property(
        &mut self,
        name: &str,
        index: usize,
        value: Box<dyn Bean>,
    ) -> Result<(), PropertyError> {
        let type_path = self.type_path();
        match self.indexed_property_mut(name, index)? {
            Some(slot) => {
                let expected = slot.type_path();
                slot.set(value)
                    .map_err(|value| PropertyError::mismatch(name, expected, value.type_path()))
            }
            None => Err(PropertyError::unsupported("indexed write", type_path)),
        }
    }

    /// Dedicated keyed read. `Ok(None)` for an absent key.
    fn mapped_property(&self, name: &str, key: &str) -> Result<Option<&dyn Bean>, PropertyError> {
        let _ = (name, key);
        Err(PropertyError::unsupported("mapped read", self.type_path()))
    }

    /// Dedicated keyed mutable access.
    fn mapped_property_mut(
        &mut self,
        name: &str,
        key: &str,
    ) -> Result<Option<&mut dyn Bean>, PropertyError> {
        let _ = (name, key);
        Err(PropertyError::unsupported("mapped write", self.type_path()))
    }

    /// Dedicated keyed write.
    fn set_mapped_property(
        &mut self,
        name: &str,
        key: &str,
        value: Box<dyn Bean>,
    ) -> Result<(), PropertyError> {
        let _ = (name, key, value);
        Err(PropertyError::unsupported("mapped write", self.type_path()))
    }
}
