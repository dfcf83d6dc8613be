use alloc::boxed::Box;
use alloc::string::{String, ToString};
use alloc::vec::Vec;
use core::any::{TypeId, type_name};
use core::fmt;
use core::str::FromStr;
use std::sync::{PoisonError, RwLock};

use thiserror::Error;

use crate::access::unwrap_optional;
use crate::hash::{TypeIdMap, new_type_id_map};
use crate::info::{TypeInfo, Typed};
use crate::ops::{BeanMut, BeanRef};
use crate::Bean;

// -----------------------------------------------------------------------------
// Error

/// A text that could not be converted to the requested type.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("cannot convert `{value}` to `{target}`: {reason}")]
pub struct ConversionError {
    /// The rejected input.
    pub value: String,
    /// Type path of the requested type.
    pub target: &'static str,
    pub reason: String,
}

impl ConversionError {
    #[inline]
    pub fn new(value: impl Into<String>, target: &'static str, reason: impl fmt::Display) -> Self {
        Self {
            value: value.into(),
            target,
            reason: reason.to_string(),
        }
    }
}

// -----------------------------------------------------------------------------
// Converter

/// Text conversion functions of one scalar type.
#[derive(Clone, Copy)]
pub struct Converter {
    type_info: TypeInfo,
    from_text: fn(&str) -> Result<Box<dyn Bean>, ConversionError>,
    to_text: fn(&dyn Bean) -> Option<String>,
}

fn parse_text<T>(text: &str) -> Result<Box<dyn Bean>, ConversionError>
where
    T: FromStr + Bean,
    T::Err: fmt::Display,
{
    match text.trim().parse::<T>() {
        Ok(value) => Ok(Box::new(value)),
        Err(err) => Err(ConversionError::new(text, type_name::<T>(), err)),
    }
}

fn format_text<T: fmt::Display + Bean>(value: &dyn Bean) -> Option<String> {
    value.downcast_ref::<T>().map(ToString::to_string)
}

fn parse_bool(text: &str) -> Result<Box<dyn Bean>, ConversionError> {
    match text.trim().to_ascii_lowercase().as_str() {
        "true" | "yes" | "y" | "on" | "1" => Ok(Box::new(true)),
        "false" | "no" | "n" | "off" | "0" => Ok(Box::new(false)),
        _ => Err(ConversionError::new(text, "bool", "not a boolean")),
    }
}

fn parse_string(text: &str) -> Result<Box<dyn Bean>, ConversionError> {
    Ok(Box::new(String::from(text)))
}

impl Converter {
    #[inline]
    pub const fn new(
        type_info: TypeInfo,
        from_text: fn(&str) -> Result<Box<dyn Bean>, ConversionError>,
        to_text: fn(&dyn Bean) -> Option<String>,
    ) -> Self {
        Self {
            type_info,
            from_text,
            to_text,
        }
    }

    /// A converter built on `T`'s [`FromStr`] and [`Display`](fmt::Display).
    ///
    /// Surrounding whitespace is trimmed before parsing.
    #[inline]
    pub fn of<T>() -> Self
    where
        T: FromStr + fmt::Display + Bean + Typed,
        T::Err: fmt::Display,
    {
        Self::new(T::type_info(), parse_text::<T>, format_text::<T>)
    }

    #[inline]
    pub fn type_info(&self) -> TypeInfo {
        self.type_info
    }

    #[inline]
    pub fn from_text(&self, text: &str) -> Result<Box<dyn Bean>, ConversionError> {
        (self.from_text)(text)
    }

    /// `None` if `value` is not of this converter's type.
    #[inline]
    pub fn to_text(&self, value: &dyn Bean) -> Option<String> {
        (self.to_text)(value)
    }
}

impl fmt::Debug for Converter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Converter")
            .field(&self.type_info.type_path())
            .finish()
    }
}

/// The text of a `String` or `&'static str` value.
#[inline]
pub(crate) fn text_of(value: &dyn Bean) -> Option<&str> {
    match value.downcast_ref::<String>() {
        Some(text) => Some(text.as_str()),
        None => value.downcast_ref::<&'static str>().copied(),
    }
}

// -----------------------------------------------------------------------------
// Registration

/// A converter submitted by [`register_converter!`](crate::register_converter).
#[doc(hidden)]
pub struct ConverterRegistration {
    pub register: fn(&ConvertRegistry),
}

#[cfg(feature = "auto_register")]
inventory::collect!(ConverterRegistration);

/// Submits a converter for [`ConvertRegistry::auto_register`].
///
/// The single type form registers [`Converter::of`]; the `=>` form registers
/// the given [`Converter`]. Does nothing without the `auto_register` feature.
///
/// ```
/// use core::{fmt, str::FromStr};
/// use vc_bean::{Bean, BeanMut, BeanRef, ConvertRegistry, register_converter};
/// use vc_bean::info::{BeanKind, TypeInfo, Typed};
///
/// #[derive(Debug, Clone, Copy, PartialEq)]
/// struct Percent(u8);
///
/// impl FromStr for Percent {
///     type Err = &'static str;
///     fn from_str(s: &str) -> Result<Self, Self::Err> {
///         let n = s.strip_suffix('%').ok_or("missing `%`")?;
///         n.parse().map(Percent).map_err(|_| "not a number")
///     }
/// }
///
/// impl fmt::Display for Percent {
///     fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { write!(f, "{}%", self.0) }
/// }
///
/// impl Typed for Percent {
///     fn type_info() -> TypeInfo { TypeInfo::new::<Self>(BeanKind::Scalar) }
/// }
///
/// impl Bean for Percent {
///     fn bean_type_info(&self) -> TypeInfo { Self::type_info() }
///     fn bean_kind(&self) -> BeanKind { BeanKind::Scalar }
///     fn bean_ref(&self) -> BeanRef<'_> { BeanRef::Scalar(self) }
///     fn bean_mut(&mut self) -> BeanMut<'_> { BeanMut::Scalar(self) }
///     fn set(&mut self, value: Box<dyn Bean>) -> Result<(), Box<dyn Bean>> {
///         *self = value.take::<Self>()?;
///         Ok(())
///     }
///     fn bean_clone(&self) -> Option<Box<dyn Bean>> { Some(Box::new(*self)) }
/// }
///
/// register_converter!(Percent);
///
/// fn main() {
///     let registry = ConvertRegistry::new();
///     assert!(registry.auto_register());
///
///     let value = registry.convert("40%", Percent::type_info()).unwrap();
///     assert_eq!(value.downcast_ref::<Percent>(), Some(&Percent(40)));
/// }
/// ```
#[cfg(feature = "auto_register")]
#[macro_export]
macro_rules! register_converter {
    ($ty:ty) => {
        $crate::__macro_exports::inventory::submit! {
            $crate::registry::ConverterRegistration {
                register: |registry| {
                    registry.register::<$ty>();
                },
            }
        }
    };
    ($ty:ty => $converter:expr) => {
        $crate::__macro_exports::inventory::submit! {
            $crate::registry::ConverterRegistration {
                register: |registry| {
                    registry.register_converter($converter);
                },
            }
        }
    };
}

/// Submits a converter for [`ConvertRegistry::auto_register`].
///
/// Does nothing without the `auto_register` feature.
#[cfg(not(feature = "auto_register"))]
#[macro_export]
macro_rules! register_converter {
    ($($tt:tt)*) => {};
}

// -----------------------------------------------------------------------------
// ConvertRegistry

/// Text conversion of scalar values, keyed by the target type.
///
/// [`ConvertRegistry::new`] knows `bool`, `char`, every integer and float
/// primitive, and `String`. Booleans also accept `yes`/`no`, `on`/`off`,
/// `y`/`n` and `1`/`0`, case-insensitively.
///
/// # Examples
///
/// ```
/// use vc_bean::ConvertRegistry;
/// use vc_bean::info::Typed;
///
/// let registry = ConvertRegistry::new();
///
/// let value = registry.convert(" 42 ", u16::type_info()).unwrap();
/// assert_eq!(value.downcast_ref::<u16>(), Some(&42));
///
/// let value = registry.convert("Off", bool::type_info()).unwrap();
/// assert_eq!(value.downcast_ref::<bool>(), Some(&false));
///
/// assert!(registry.convert("4x", u16::type_info()).is_err());
/// assert_eq!(registry.convert_to_string(&2.5_f32).as_deref(), Some("2.5"));
/// ```
pub struct ConvertRegistry {
    converters: RwLock<TypeIdMap<Converter>>,
}

impl Default for ConvertRegistry {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl ConvertRegistry {
    /// A registry without any converter.
    #[inline]
    pub fn empty() -> Self {
        Self {
            converters: RwLock::new(new_type_id_map()),
        }
    }

    /// A registry with the default converters.
    pub fn new() -> Self {
        let registry = Self::empty();
        {
            let mut converters = registry.write();
            let mut insert = |converter: Converter| {
                converters.insert(converter.type_info().type_id(), converter);
            };

            insert(Converter::new(bool::type_info(), parse_bool, format_text::<bool>));
            insert(Converter::new(
                String::type_info(),
                parse_string,
                format_text::<String>,
            ));

            macro_rules! insert_primitives {
                ($($ty:ty),*) => { $( insert(Converter::of::<$ty>()); )* };
            }
            insert_primitives!(
                char, u8, u16, u32, u64, u128, usize, i8, i16, i32, i64, i128, isize, f32, f64
            );
        }
        registry
    }

    #[inline]
    fn read(&self) -> std::sync::RwLockReadGuard<'_, TypeIdMap<Converter>> {
        self.converters.read().unwrap_or_else(PoisonError::into_inner)
    }

    #[inline]
    fn write(&self) -> std::sync::RwLockWriteGuard<'_, TypeIdMap<Converter>> {
        self.converters.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Registers [`Converter::of::<T>`](Converter::of), returning the
    /// replaced converter.
    #[inline]
    pub fn register<T>(&self) -> Option<Converter>
    where
        T: FromStr + fmt::Display + Bean + Typed,
        T::Err: fmt::Display,
    {
        self.register_converter(Converter::of::<T>())
    }

    /// Registers `converter` for its type, returning the replaced one.
    pub fn register_converter(&self, converter: Converter) -> Option<Converter> {
        let type_info = converter.type_info();
        let replaced = self.write().insert(type_info.type_id(), converter);
        if replaced.is_some() {
            log::warn!("replaced the converter for `{}`", type_info.type_path());
        }
        replaced
    }

    /// Removes the converter for the type `type_id`.
    #[inline]
    pub fn deregister(&self, type_id: TypeId) -> Option<Converter> {
        self.write().remove(&type_id)
    }

    #[inline]
    pub fn lookup(&self, type_id: TypeId) -> Option<Converter> {
        self.read().get(&type_id).copied()
    }

    #[inline]
    pub fn contains(&self, type_id: TypeId) -> bool {
        self.read().contains_key(&type_id)
    }

    /// Number of registered converters.
    #[inline]
    pub fn len(&self) -> usize {
        self.read().len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Registers every converter submitted with
    /// [`register_converter!`](crate::register_converter).
    ///
    /// Returns `false` without the `auto_register` feature.
    #[cfg_attr(not(feature = "auto_register"), inline(always))]
    pub fn auto_register(&self) -> bool {
        #[cfg(feature = "auto_register")]
        {
            let mut count = 0_usize;
            for registration in inventory::iter::<ConverterRegistration> {
                (registration.register)(self);
                count += 1;
            }
            log::debug!("auto registered {count} converters");
            true
        }
        #[cfg(not(feature = "auto_register"))]
        {
            false
        }
    }

    /// Converts `text` to the type `target`.
    ///
    /// For an `Option<T>` target the result is a `T`.
    pub fn convert(&self, text: &str, target: TypeInfo) -> Result<Box<dyn Bean>, ConversionError> {
        let target = target.unwrap_optional();
        match self.lookup(target.type_id()) {
            Some(converter) => converter.from_text(text),
            None => Err(ConversionError::new(
                text,
                target.type_path(),
                "no converter registered",
            )),
        }
    }

    /// The text form of `value`.
    ///
    /// `None` and null values have no text. A sequence is represented by
    /// its first element.
    pub fn convert_to_string(&self, value: &dyn Bean) -> Option<String> {
        let value = unwrap_optional(value)?;
        match value.bean_ref() {
            BeanRef::List(list) => return list.get(0).and_then(|v| self.convert_to_string(v)),
            BeanRef::Array(array) => {
                return array.get(0).and_then(|v| self.convert_to_string(v));
            }
            _ => {}
        }
        self.lookup(value.ty_id())
            .and_then(|converter| converter.to_text(value))
            .or_else(|| value.to_text())
    }

    /// Adapts a value about to be stored in a slot of type `target`.
    ///
    /// - Text becomes the target type through its converter. A list target
    ///   without a converter receives a one-element list. Otherwise the text
    ///   is returned unchanged.
    /// - Anything with a text form becomes a `String` for a `String` target.
    /// - A sequence of texts becomes a list of the target's element type.
    ///
    /// Every other value, and every value already of the target type, is
    /// returned unchanged for the slot to type check.
    pub fn coerce(
        &self,
        value: Box<dyn Bean>,
        target: TypeInfo,
    ) -> Result<Box<dyn Bean>, ConversionError> {
        let inner = target.unwrap_optional();
        let type_id = value.ty_id();
        if type_id == target.type_id() || type_id == inner.type_id() || value.is_null() {
            return Ok(value);
        }

        if let Some(text) = text_of(&*value) {
            if let Some(converter) = self.lookup(inner.type_id()) {
                return converter.from_text(text);
            }
            return match self.texts_to_list(&[text], inner)? {
                Some(list) => Ok(list),
                None => Ok(value),
            };
        }

        if inner.is::<String>() {
            return Ok(match self.convert_to_string(&*value) {
                Some(text) => Box::new(text),
                None => value,
            });
        }

        match self.coerce_elements(&*value, inner)? {
            Some(list) => Ok(list),
            None => Ok(value),
        }
    }

    fn coerce_elements(
        &self,
        value: &dyn Bean,
        target: TypeInfo,
    ) -> Result<Option<Box<dyn Bean>>, ConversionError> {
        let texts: Option<Vec<&str>> = match value.bean_ref() {
            BeanRef::List(list) => list.iter().map(|item| item.and_then(text_of)).collect(),
            BeanRef::Array(array) => array.iter().map(text_of).collect(),
            _ => None,
        };
        match texts {
            Some(texts) => self.texts_to_list(&texts, target),
            None => Ok(None),
        }
    }

    fn texts_to_list(
        &self,
        texts: &[&str],
        target: TypeInfo,
    ) -> Result<Option<Box<dyn Bean>>, ConversionError> {
        let (Some(element), Some(mut result)) = (target.element(), target.create_default())
        else {
            return Ok(None);
        };

        let BeanMut::List(list) = result.bean_mut() else {
            return Ok(None);
        };
        for &text in texts {
            if list.push(self.convert(text, element)?).is_err() {
                return Ok(None);
            }
        }
        Ok(Some(result))
    }
}

impl fmt::Debug for ConvertRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.read().values()).finish()
    }
}

#[cfg(test)]
mod tests {
    use alloc::boxed::Box;
    use alloc::string::String;
    use alloc::vec;
    use alloc::vec::Vec;

    use super::{ConvertRegistry, Converter};
    use crate::info::Typed;
    use crate::{Bean, Null};

    #[test]
    fn default_converters() {
        let registry = ConvertRegistry::new();
        for (text, expected) in [("TRUE", true), ("on", true), ("1", true), ("No", false), ("off", false)] {
            let value = registry.convert(text, bool::type_info()).unwrap();
            assert_eq!(value.downcast_ref::<bool>(), Some(&expected));
        }
        assert!(registry.convert("maybe", bool::type_info()).is_err());

        let value = registry.convert(" -7 ", i64::type_info()).unwrap();
        assert_eq!(value.downcast_ref::<i64>(), Some(&-7));

        let value = registry.convert(" x ", String::type_info()).unwrap();
        assert_eq!(value.downcast_ref::<String>().map(String::as_str), Some(" x "));

        let err = registry.convert("300", u8::type_info()).unwrap_err();
        assert_eq!(err.target, "u8");
        assert_eq!(err.value, "300");
    }

    #[test]
    fn optional_target() {
        let registry = ConvertRegistry::new();
        let value = registry.convert("5", Option::<u32>::type_info()).unwrap();
        assert_eq!(value.downcast_ref::<u32>(), Some(&5));
    }

    #[test]
    fn register_and_deregister() {
        let registry = ConvertRegistry::empty();
        assert!(registry.is_empty());
        assert!(registry.convert("1", u8::type_info()).is_err());

        assert!(registry.register::<u8>().is_none());
        assert!(registry.register_converter(Converter::of::<u8>()).is_some());
        assert_eq!(registry.len(), 1);

        assert!(registry.deregister(u8::type_info().type_id()).is_some());
        assert!(!registry.contains(u8::type_info().type_id()));
    }

    #[test]
    fn to_string() {
        let registry = ConvertRegistry::new();
        assert_eq!(registry.convert_to_string(&Some(3_u8)).as_deref(), Some("3"));
        assert_eq!(registry.convert_to_string(&None::<u8>), None);
        assert_eq!(registry.convert_to_string(&Null), None);
        assert_eq!(registry.convert_to_string(&vec![4_u8, 5]).as_deref(), Some("4"));
        assert_eq!(registry.convert_to_string(&Vec::<u8>::new()), None);
    }

    #[test]
    fn coerce_values() {
        let registry = ConvertRegistry::new();

        let value = registry.coerce(Box::new("12"), u32::type_info()).unwrap();
        assert_eq!(value.downcast_ref::<u32>(), Some(&12));

        let value = registry
            .coerce(Box::new(String::from("12")), Option::<u32>::type_info())
            .unwrap();
        assert_eq!(value.downcast_ref::<u32>(), Some(&12));

        let value = registry.coerce(Box::new(12_u32), String::type_info()).unwrap();
        assert_eq!(value.downcast_ref::<String>().map(String::as_str), Some("12"));

        let texts: Vec<String> = vec!["1".into(), "2".into()];
        let value = registry.coerce(Box::new(texts), Vec::<u16>::type_info()).unwrap();
        assert_eq!(value.downcast_ref::<Vec<u16>>(), Some(&vec![1, 2]));

        // Already of the target type, or nothing applies.
        let value = registry.coerce(Box::new(3_u8), u8::type_info()).unwrap();
        assert!(value.is::<u8>());
        let value = registry.coerce(Box::new(3_u8), u32::type_info()).unwrap();
        assert!(value.is::<u8>());

        assert!(registry.coerce(Box::new("x"), u32::type_info()).is_err());
    }

    #[test]
    fn coerce_into_lists() {
        let registry = ConvertRegistry::new();

        let value = registry.coerce(Box::new("a"), Vec::<String>::type_info()).unwrap();
        assert_eq!(value.downcast_ref::<Vec<String>>(), Some(&vec![String::from("a")]));

        let value = registry.coerce(Box::new("7"), Vec::<u8>::type_info()).unwrap();
        assert_eq!(value.downcast_ref::<Vec<u8>>(), Some(&vec![7]));

        let texts: Vec<&str> = vec!["1", "2"];
        let value = registry
            .coerce(Box::new(texts), Vec::<Option<u16>>::type_info())
            .unwrap();
        assert_eq!(value.downcast_ref::<Vec<Option<u16>>>(), Some(&vec![Some(1), Some(2)]));

        assert!(registry.coerce(Box::new("x"), Vec::<u8>::type_info()).is_err());
    }
}
