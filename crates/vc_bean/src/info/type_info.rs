use alloc::boxed::Box;
use core::any::{Any, TypeId};
use core::fmt;

use crate::Bean;
use crate::info::BeanKind;

// -----------------------------------------------------------------------------
// TypeInfo

/// Compile-time information about a bean type.
///
/// Cheap to copy. Nested information (the element of a list, the value of a
/// map, the inner type of an option) is produced on demand through a function
/// pointer, so recursive types are fine.
///
/// # Examples
///
/// ```
/// use vc_bean::info::{BeanKind, Typed};
///
/// let info = <Vec<u32> as Typed>::type_info();
/// assert_eq!(info.kind(), BeanKind::List);
/// assert!(info.element().unwrap().is::<u32>());
///
/// let created = info.create_default().unwrap();
/// assert!(created.is::<Vec<u32>>());
/// ```
#[derive(Clone, Copy)]
pub struct TypeInfo {
    type_id: TypeId,
    type_path: &'static str,
    kind: BeanKind,
    element: Option<fn() -> TypeInfo>,
    length: Option<usize>,
    default: Option<fn() -> Box<dyn Bean>>,
}

impl TypeInfo {
    /// Information about `T` with the given kind and nothing else.
    #[inline]
    pub fn new<T: Any>(kind: BeanKind) -> Self {
        Self {
            type_id: TypeId::of::<T>(),
            type_path: core::any::type_name::<T>(),
            kind,
            element: None,
            length: None,
            default: None,
        }
    }

    /// Sets the element (list, array), value (map) or inner (optional) type.
    #[inline]
    pub const fn with_element(mut self, element: fn() -> TypeInfo) -> Self {
        self.element = Some(element);
        self
    }

    /// Sets the fixed length of an array type.
    #[inline]
    pub const fn with_length(mut self, length: usize) -> Self {
        self.length = Some(length);
        self
    }

    /// Sets the default constructor.
    #[inline]
    pub const fn with_default(mut self, default: fn() -> Box<dyn Bean>) -> Self {
        self.default = Some(default);
        self
    }

    #[inline]
    pub const fn type_id(&self) -> TypeId {
        self.type_id
    }

    #[inline]
    pub const fn type_path(&self) -> &'static str {
        self.type_path
    }

    #[inline]
    pub const fn kind(&self) -> BeanKind {
        self.kind
    }

    /// The element, value or inner type, if any.
    #[inline]
    pub fn element(&self) -> Option<TypeInfo> {
        self.element.map(|f| f())
    }

    /// The fixed length of an array type.
    #[inline]
    pub const fn length(&self) -> Option<usize> {
        self.length
    }

    /// Returns `true` if the type is `T`.
    #[inline]
    pub fn is<T: Any>(&self) -> bool {
        self.type_id == TypeId::of::<T>()
    }

    /// Returns `true` if a default constructor is available.
    #[inline]
    pub const fn has_default(&self) -> bool {
        self.default.is_some()
    }

    /// Creates a default value, if the type has a default constructor.
    #[inline]
    pub fn create_default(&self) -> Option<Box<dyn Bean>> {
        self.default.map(|f| f())
    }

    /// Looks through any number of `Option` layers.
    ///
    /// ```
    /// use vc_bean::info::Typed;
    ///
    /// let info = <Option<Option<String>> as Typed>::type_info();
    /// assert!(info.unwrap_optional().is::<String>());
    /// ```
    pub fn unwrap_optional(&self) -> TypeInfo {
        let mut info = *self;
        while info.kind == BeanKind::Optional {
            match info.element() {
                Some(inner) => info = inner,
                None => break,
            }
        }
        info
    }
}

impl PartialEq for TypeInfo {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.type_id == other.type_id
    }
}

impl Eq for TypeInfo {}

impl fmt::Debug for TypeInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypeInfo")
            .field("type_path", &self.type_path)
            .field("kind", &self.kind)
            .field("length", &self.length)
            .finish_non_exhaustive()
    }
}

// -----------------------------------------------------------------------------
// Typed

/// Static access to the [`TypeInfo`] of a type.
///
/// Implemented for every bean type; `#[derive(Bean)]` implements it too.
pub trait Typed: 'static {
    fn type_info() -> TypeInfo;
}
