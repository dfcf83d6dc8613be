use alloc::format;
use core::fmt::Display;

use serde_core::ser::Error;
use serde_core::{Serialize, Serializer};

use super::serializers::{
    ArraySerializer, DynaSerializer, ListSerializer, MapSerializer, StructSerializer,
};
use crate::Bean;
use crate::ops::BeanRef;
use crate::registry::IntrospectionCache;

#[inline]
pub(super) fn make_custom_error<E: Error>(msg: impl Display) -> E {
    E::custom(msg)
}

// -----------------------------------------------------------------------------
// BeanSerialize

/// Serializes a bean through its kind view.
///
/// # Examples
///
/// ```
/// use vc_bean::derive::Bean;
/// use vc_bean::serde::BeanSerialize;
///
/// #[derive(Bean, Clone)]
/// struct Point { x: i32, y: i32, tag: Option<String> }
///
/// let point = Point { x: 1, y: -2, tag: None };
/// let json = serde_json::to_string(&BeanSerialize::new(&point)).unwrap();
/// assert_eq!(json, r#"{"x":1,"y":-2,"tag":null}"#);
/// ```
#[derive(Clone, Copy)]
pub struct BeanSerialize<'a> {
    value: &'a dyn Bean,
    pub(super) cache: Option<&'a IntrospectionCache>,
}

impl<'a> BeanSerialize<'a> {
    /// Serializes `value`, computing the descriptors of conventional beans
    /// on the fly.
    #[inline]
    pub const fn new(value: &'a dyn Bean) -> Self {
        Self { value, cache: None }
    }

    /// Serializes `value` with descriptors from `cache`.
    #[inline]
    pub const fn with_cache(value: &'a dyn Bean, cache: &'a IntrospectionCache) -> Self {
        Self {
            value,
            cache: Some(cache),
        }
    }

    #[inline]
    pub(super) const fn nested(&self, value: &'a dyn Bean) -> Self {
        Self {
            value,
            cache: self.cache,
        }
    }
}

impl Serialize for BeanSerialize<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self.value.bean_ref() {
            BeanRef::Struct(bean) => StructSerializer {
                bean,
                driver: *self,
            }
            .serialize(serializer),
            BeanRef::Dynamic(bean) => DynaSerializer {
                bean,
                driver: *self,
            }
            .serialize(serializer),
            BeanRef::Map(map) => MapSerializer {
                map,
                driver: *self,
            }
            .serialize(serializer),
            BeanRef::List(list) => ListSerializer {
                list,
                driver: *self,
            }
            .serialize(serializer),
            BeanRef::Array(array) => ArraySerializer {
                array,
                driver: *self,
            }
            .serialize(serializer),
            BeanRef::Optional(optional) => match optional.value() {
                Some(value) => serializer.serialize_some(&self.nested(value)),
                None => serializer.serialize_none(),
            },
            BeanRef::Scalar(value) if value.is_null() => serializer.serialize_none(),
            BeanRef::Scalar(value) => match value.as_serialize() {
                Some(inner) => inner.serialize(serializer),
                None => Err(make_custom_error(format!(
                    "`{}` has no serialize implementation",
                    value.type_path()
                ))),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use alloc::boxed::Box;
    use alloc::collections::BTreeMap;
    use alloc::string::String;

    use super::BeanSerialize;
    use crate::dyna::{DynaBean, LazyDynaBean};
    use crate::registry::IntrospectionCache;

    #[test]
    fn composites() {
        let mut bean = LazyDynaBean::new();
        bean.set_simple("name", Box::new(String::from("Ada"))).unwrap();
        bean.set_indexed("scores", 1, Box::new(3_u8)).unwrap();
        let json = serde_json::to_string(&BeanSerialize::new(&bean)).unwrap();
        assert_eq!(json, r#"{"name":"Ada","scores":[null,3]}"#);

        let map = BTreeMap::from([(String::from("a"), [1_i32, 2])]);
        let cache = IntrospectionCache::new();
        let json = serde_json::to_string(&BeanSerialize::with_cache(&map, &cache)).unwrap();
        assert_eq!(json, r#"{"a":[1,2]}"#);
    }
}
