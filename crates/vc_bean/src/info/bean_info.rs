use alloc::borrow::Cow;
use alloc::boxed::Box;
use alloc::vec::Vec;

use crate::hash::{HashMap, new_map};
use crate::info::{PropertyDescriptor, TypeInfo, Typed};

/// Iterator over the descriptors of a [`BeanInfo`], in declaration order.
pub type DescriptorIter<'a> = core::slice::Iter<'a, PropertyDescriptor>;

/// The ordered accessor descriptors of a conventional bean type.
///
/// # Examples
///
/// ```
/// use vc_bean::info::{BeanInfo, PropertyDescriptor};
///
/// struct Point;
///
/// let info = BeanInfo::from_info(
///     vc_bean::info::TypeInfo::new::<Point>(vc_bean::info::BeanKind::Struct),
///     [
///         PropertyDescriptor::new::<i32>("x"),
///         PropertyDescriptor::new::<i32>("y"),
///     ],
/// );
///
/// assert_eq!(info.len(), 2);
/// assert_eq!(info.index_of("y"), Some(1));
/// assert!(info.get("z").is_none());
/// ```
#[derive(Debug, Clone)]
pub struct BeanInfo {
    type_info: TypeInfo,
    descriptors: Box<[PropertyDescriptor]>,
    indices: HashMap<Cow<'static, str>, usize>,
}

impl BeanInfo {
    /// Descriptors of bean type `T`.
    #[inline]
    pub fn new<T: Typed>(descriptors: impl IntoIterator<Item = PropertyDescriptor>) -> Self {
        Self::from_info(T::type_info(), descriptors)
    }

    /// Descriptors of the type described by `type_info`.
    ///
    /// A later descriptor with an already used name replaces the earlier one.
    pub fn from_info(
        type_info: TypeInfo,
        descriptors: impl IntoIterator<Item = PropertyDescriptor>,
    ) -> Self {
        let mut list: Vec<PropertyDescriptor> = Vec::new();
        let mut indices = new_map();

        for descriptor in descriptors {
            let name: Cow<'static, str> = Cow::Owned(descriptor.name().into());
            match indices.get(&name) {
                Some(&index) => list[index] = descriptor,
                None => {
                    indices.insert(name, list.len());
                    list.push(descriptor);
                }
            }
        }

        Self {
            type_info,
            descriptors: list.into_boxed_slice(),
            indices,
        }
    }

    /// The bean type these descriptors belong to.
    #[inline]
    pub fn type_info(&self) -> TypeInfo {
        self.type_info
    }

    #[inline]
    pub fn get(&self, name: &str) -> Option<&PropertyDescriptor> {
        self.indices.get(name).map(|&index| &self.descriptors[index])
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
    pub fn iter(&self) -> DescriptorIter<'_> {
        self.descriptors.iter()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.descriptors.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.descriptors.is_empty()
    }
}

impl<'a> IntoIterator for &'a BeanInfo {
    type Item = &'a PropertyDescriptor;
    type IntoIter = DescriptorIter<'a>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.descriptors.iter()
    }
}
