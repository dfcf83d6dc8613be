use alloc::borrow::Cow;

use crate::info::{BeanKind, TypeInfo, Typed};

/// How a property is addressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PropertyShape {
    /// Read and written as a whole.
    Simple,
    /// Also addressable by position, `name[i]`.
    Indexed { element: Option<TypeInfo> },
    /// Also addressable by string key, `name(key)`.
    Mapped { value: Option<TypeInfo> },
}

/// The accessor descriptor of one property of a conventional bean.
///
/// # Examples
///
/// ```
/// use vc_bean::info::{PropertyDescriptor, PropertyShape};
///
/// let phones = PropertyDescriptor::new::<Vec<String>>("phones");
/// assert!(matches!(phones.shape(), PropertyShape::Indexed { .. }));
/// assert!(phones.element_type().unwrap().is::<String>());
///
/// let id = PropertyDescriptor::new::<u64>("id").read_only();
/// assert!(id.is_readable() && !id.is_writeable());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct PropertyDescriptor {
    name: Cow<'static, str>,
    type_info: TypeInfo,
    shape: PropertyShape,
    readable: bool,
    writeable: bool,
    dedicated: bool,
}

impl PropertyDescriptor {
    /// A readable and writeable property of declared type `T`.
    ///
    /// The shape follows the declared type, looking through `Option`:
    /// lists and arrays are indexed, maps are mapped.
    #[inline]
    pub fn new<T: Typed>(name: impl Into<Cow<'static, str>>) -> Self {
        Self::from_info(name, T::type_info())
    }

    /// Like [`new`](Self::new), from a runtime [`TypeInfo`].
    pub fn from_info(name: impl Into<Cow<'static, str>>, type_info: TypeInfo) -> Self {
        let inner = type_info.unwrap_optional();
        let shape = match inner.kind() {
            BeanKind::List | BeanKind::Array => PropertyShape::Indexed {
                element: inner.element(),
            },
            BeanKind::Map => PropertyShape::Mapped {
                value: inner.element(),
            },
            _ => PropertyShape::Simple,
        };
        Self {
            name: name.into(),
            type_info,
            shape,
            readable: true,
            writeable: true,
            dedicated: false,
        }
    }

    /// A property served by the dedicated indexed accessors of
    /// [`Properties`](crate::ops::Properties), with elements of type `E`.
    pub fn indexed<E: Typed>(name: impl Into<Cow<'static, str>>) -> Self {
        let element = E::type_info();
        Self {
            name: name.into(),
            type_info: element,
            shape: PropertyShape::Indexed {
                element: Some(element),
            },
            readable: true,
            writeable: true,
            dedicated: true,
        }
    }

    /// A property served by the dedicated keyed accessors of
    /// [`Properties`](crate::ops::Properties), with values of type `V`.
    pub fn mapped<V: Typed>(name: impl Into<Cow<'static, str>>) -> Self {
        let value = V::type_info();
        Self {
            name: name.into(),
            type_info: value,
            shape: PropertyShape::Mapped { value: Some(value) },
            readable: true,
            writeable: true,
            dedicated: true,
        }
    }

    #[inline]
    pub fn read_only(mut self) -> Self {
        self.writeable = false;
        self
    }

    #[inline]
    pub fn write_only(mut self) -> Self {
        self.readable = false;
        self
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The declared type.
    #[inline]
    pub fn type_info(&self) -> TypeInfo {
        self.type_info
    }

    #[inline]
    pub fn shape(&self) -> PropertyShape {
        self.shape
    }

    #[inline]
    pub fn is_readable(&self) -> bool {
        self.readable
    }

    #[inline]
    pub fn is_writeable(&self) -> bool {
        self.writeable
    }

    /// Returns `true` if the property is only reachable through the
    /// dedicated indexed or keyed accessors.
    #[inline]
    pub fn is_dedicated(&self) -> bool {
        self.dedicated
    }

    /// The element type of an indexed property or the value type of a
    /// mapped one.
    #[inline]
    pub fn element_type(&self) -> Option<TypeInfo> {
        match self.shape {
            PropertyShape::Simple => None,
            PropertyShape::Indexed { element } => element,
            PropertyShape::Mapped { value } => value,
        }
    }
}
