use alloc::boxed::Box;
use alloc::string::String;
use core::any::{Any, TypeId};
use core::cmp::Ordering;
use core::fmt;

use crate::impls;
use crate::info::{BeanKind, TypeInfo};
use crate::ops::{BeanMut, BeanRef};

// -----------------------------------------------------------------------------
// Bean

/// A value that takes part in property path access.
///
/// Every bean exposes its *kind* through [`bean_ref`] and [`bean_mut`]: a
/// conventional object with named properties ([`Properties`]), a dynamic
/// property container ([`DynaBean`]), a string keyed mapping
/// ([`PropertyMap`]), a growable or fixed sequence ([`List`], [`Array`]), an
/// optional value ([`Optional`]) or a plain scalar.
///
/// The path resolver only ever pattern-matches on these views, so a type
/// opts into a capability simply by returning the matching variant.
///
/// # Implementing
///
/// Structs with named fields should use [`#[derive(Bean)]`](crate::derive::Bean).
/// Manual implementations follow this shape:
///
/// ```
/// use vc_bean::{Bean, BeanMut, BeanRef};
/// use vc_bean::info::{BeanKind, TypeInfo, Typed};
///
/// #[derive(Clone, PartialEq, Debug)]
/// struct Celsius(f64);
///
/// impl Typed for Celsius {
///     fn type_info() -> TypeInfo {
///         TypeInfo::new::<Self>(BeanKind::Scalar)
///     }
/// }
///
/// impl Bean for Celsius {
///     fn bean_type_info(&self) -> TypeInfo { Self::type_info() }
///     fn bean_kind(&self) -> BeanKind { BeanKind::Scalar }
///     fn bean_ref(&self) -> BeanRef<'_> { BeanRef::Scalar(self) }
///     fn bean_mut(&mut self) -> BeanMut<'_> { BeanMut::Scalar(self) }
///
///     fn set(&mut self, value: Box<dyn Bean>) -> Result<(), Box<dyn Bean>> {
///         *self = value.take::<Self>()?;
///         Ok(())
///     }
///
///     fn bean_clone(&self) -> Option<Box<dyn Bean>> {
///         Some(Box::new(self.clone()))
///     }
/// }
///
/// let mut t = Celsius(1.5);
/// t.set(Box::new(Celsius(20.0))).unwrap();
/// assert_eq!(t, Celsius(20.0));
/// ```
///
/// # Type Identification
///
/// [`Any::type_id`] on a `Box<dyn Bean>` returns the id of the box. Use
/// [`Bean::ty_id`] instead.
///
/// [`bean_ref`]: Bean::bean_ref
/// [`bean_mut`]: Bean::bean_mut
/// [`Properties`]: crate::ops::Properties
/// [`DynaBean`]: crate::dyna::DynaBean
/// [`PropertyMap`]: crate::ops::PropertyMap
/// [`List`]: crate::ops::List
/// [`Array`]: crate::ops::Array
/// [`Optional`]: crate::ops::Optional
pub trait Bean: Any + Send + Sync {
    /// Casts this value to `&dyn Bean`.
    #[inline(always)]
    fn as_bean(&self) -> &dyn Bean
    where
        Self: Sized,
    {
        self
    }

    /// Casts this value to `&mut dyn Bean`.
    #[inline(always)]
    fn as_bean_mut(&mut self) -> &mut dyn Bean
    where
        Self: Sized,
    {
        self
    }

    /// Boxes this value as `Box<dyn Bean>`.
    ///
    /// ```
    /// use vc_bean::Bean;
    ///
    /// let value = 7_u32.into_boxed_bean();
    /// assert!(value.is::<u32>());
    /// ```
    #[inline(always)]
    fn into_boxed_bean(self) -> Box<dyn Bean>
    where
        Self: Sized,
    {
        Box::new(self)
    }

    /// Returns the [`TypeId`] of the underlying type.
    ///
    /// ```
    /// use vc_bean::Bean;
    /// use core::any::{Any, TypeId};
    ///
    /// let x: Box<dyn Bean> = Box::new(32_i32);
    ///
    /// assert!(x.type_id() != TypeId::of::<i32>()); // the box
    /// assert!(x.ty_id() == TypeId::of::<i32>());
    /// ```
    #[inline]
    fn ty_id(&self) -> TypeId {
        TypeId::of::<Self>()
    }

    /// Returns the [`TypeInfo`] of the concrete type.
    fn bean_type_info(&self) -> TypeInfo;

    /// Returns the full type path of the concrete type.
    #[inline]
    fn type_path(&self) -> &'static str {
        self.bean_type_info().type_path()
    }

    /// Returns the capability kind of this value.
    fn bean_kind(&self) -> BeanKind;

    /// Returns an immutable kind view.
    ///
    /// ```
    /// use vc_bean::{Bean, BeanRef};
    ///
    /// let names = vec![String::from("a"), String::from("b")];
    /// let BeanRef::List(list) = names.bean_ref() else { unreachable!() };
    /// assert_eq!(list.len(), 2);
    /// ```
    fn bean_ref(&self) -> BeanRef<'_>;

    /// Returns a mutable kind view.
    fn bean_mut(&mut self) -> BeanMut<'_>;

    /// Replaces this value with `value` when the types match.
    ///
    /// On mismatch the untouched value is handed back.
    ///
    /// ```
    /// use vc_bean::Bean;
    ///
    /// let mut age = 3_u32;
    /// assert!(age.set(Box::new(4_u32)).is_ok());
    /// assert!(age.set(Box::new("four")).is_err());
    /// assert_eq!(age, 4);
    /// ```
    fn set(&mut self, value: Box<dyn Bean>) -> Result<(), Box<dyn Bean>>;

    /// Clones the value through the bean model.
    ///
    /// Returns `None` when the type cannot be cloned this way.
    fn bean_clone(&self) -> Option<Box<dyn Bean>>;

    /// Partial equality through the bean model.
    ///
    /// `None` when the type does not support the comparison.
    #[inline]
    fn bean_partial_eq(&self, _other: &dyn Bean) -> Option<bool> {
        None
    }

    /// Partial ordering through the bean model.
    ///
    /// `None` when the values are not comparable.
    #[inline]
    fn bean_partial_cmp(&self, _other: &dyn Bean) -> Option<Ordering> {
        None
    }

    /// Debug formatter for the value.
    ///
    /// The default walks the kind view; scalars print their type path.
    fn bean_debug(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.bean_ref() {
            BeanRef::Struct(data) => impls::struct_debug(data, f),
            BeanRef::Dynamic(data) => impls::dyna_debug(data, f),
            BeanRef::Map(data) => impls::map_debug(data, f),
            BeanRef::List(data) => impls::list_debug(data, f),
            BeanRef::Array(data) => impls::array_debug(data, f),
            BeanRef::Optional(data) => impls::optional_debug(data, f),
            BeanRef::Scalar(_) => write!(f, "Scalar({})", self.type_path()),
        }
    }

    /// The external string form of a scalar value.
    ///
    /// `None` for composite values.
    #[inline]
    fn to_text(&self) -> Option<String> {
        None
    }

    /// The `serde` view of a scalar value.
    ///
    /// Composite values are serialized through their kind view instead,
    /// see [`BeanSerialize`](crate::serde::BeanSerialize).
    #[inline]
    fn as_serialize(&self) -> Option<&dyn erased_serde::Serialize> {
        None
    }
}

// -----------------------------------------------------------------------------
// dyn Bean

impl dyn Bean {
    /// Returns `true` if the underlying value is of type `T`.
    #[inline(always)]
    pub fn is<T: Any>(&self) -> bool {
        self.ty_id() == TypeId::of::<T>()
    }

    /// Downcasts the value to type `T` by reference.
    ///
    /// ```
    /// use vc_bean::Bean;
    ///
    /// let x: Box<dyn Bean> = Box::new(10_i64);
    /// assert_eq!(x.downcast_ref::<i64>(), Some(&10));
    /// assert_eq!(x.downcast_ref::<i32>(), None);
    /// ```
    #[inline]
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        <dyn Any>::downcast_ref(self)
    }

    /// Downcasts the value to type `T` by mutable reference.
    #[inline]
    pub fn downcast_mut<T: Any>(&mut self) -> Option<&mut T> {
        <dyn Any>::downcast_mut(self)
    }

    /// Downcasts the value to type `T`, consuming the trait object.
    ///
    /// If the underlying value is not of type `T`, returns `Err(self)`.
    pub fn downcast<T: Any>(self: Box<dyn Bean>) -> Result<Box<T>, Box<dyn Bean>> {
        if !self.is::<T>() {
            return Err(self);
        }
        let any: Box<dyn Any> = self;
        Ok(any
            .downcast::<T>()
            .unwrap_or_else(|_| unreachable!("type is already checked")))
    }

    /// Downcasts the value to type `T`, unboxing and consuming the trait object.
    ///
    /// ```
    /// use vc_bean::Bean;
    ///
    /// let x: Box<dyn Bean> = Box::new(String::from("Ada"));
    /// assert_eq!(x.take::<String>().unwrap(), "Ada");
    /// ```
    #[inline]
    pub fn take<T: Any>(self: Box<dyn Bean>) -> Result<T, Box<dyn Bean>> {
        self.downcast::<T>().map(|value| *value)
    }

    /// Returns `true` for the [`Null`](crate::Null) marker.
    #[inline]
    pub fn is_null(&self) -> bool {
        self.is::<crate::Null>()
    }
}

impl fmt::Debug for dyn Bean {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.bean_debug(f)
    }
}
