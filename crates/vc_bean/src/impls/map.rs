use alloc::boxed::Box;
use alloc::collections::BTreeMap;
use alloc::string::String;
use core::hash::BuildHasher;

use crate::Bean;
use crate::bean::impl_bean_cast_fn;
use crate::impls::map_partial_eq;
use crate::impls::option::take_slot;
use crate::info::{BeanKind, TypeInfo, Typed};
use crate::ops::{MapIter, PropertyMap};

macro_rules! impl_map_bean {
    ($ty:ty, [$($generics:tt)*]) => {
        impl<$($generics)*> Typed for $ty {
            fn type_info() -> TypeInfo {
                TypeInfo::new::<Self>(BeanKind::Map)
                    .with_element(V::type_info)
                    .with_default(|| Box::new(<$ty as Default>::default()))
            }
        }

        impl<$($generics)*> PropertyMap for $ty {
            #[inline]
            fn get(&self, key: &str) -> Option<&dyn Bean> {
                <$ty>::get(self, key).map(|value| value as &dyn Bean)
            }

            #[inline]
            fn get_mut(&mut self, key: &str) -> Option<&mut dyn Bean> {
                <$ty>::get_mut(self, key).map(|value| value as &mut dyn Bean)
            }

            fn insert(
                &mut self,
                key: &str,
                value: Box<dyn Bean>,
            ) -> Result<Option<Box<dyn Bean>>, Box<dyn Bean>> {
                let value = take_slot::<V>(value)?;
                Ok(<$ty>::insert(self, String::from(key), value)
                    .map(|old| Box::new(old) as Box<dyn Bean>))
            }

            #[inline]
            fn remove(&mut self, key: &str) -> Option<Box<dyn Bean>> {
                <$ty>::remove(self, key).map(|old| Box::new(old) as Box<dyn Bean>)
            }

            #[inline]
            fn contains_key(&self, key: &str) -> bool {
                <$ty>::contains_key(self, key)
            }

            #[inline]
            fn len(&self) -> usize {
                <$ty>::len(self)
            }

            #[inline]
            fn value_info(&self) -> Option<TypeInfo> {
                Some(V::type_info())
            }

            fn iter(&self) -> MapIter<'_> {
                Box::new(
                    <$ty>::iter(self).map(|(key, value)| (key.as_str(), value as &dyn Bean)),
                )
            }
        }

        impl<$($generics)*> Bean for $ty {
            impl_bean_cast_fn!(Map);

            #[inline]
            fn bean_type_info(&self) -> TypeInfo {
                <Self as Typed>::type_info()
            }

            #[inline]
            fn set(&mut self, value: Box<dyn Bean>) -> Result<(), Box<dyn Bean>> {
                *self = value.take::<Self>()?;
                Ok(())
            }

            fn bean_clone(&self) -> Option<Box<dyn Bean>> {
                let mut cloned = <$ty as Default>::default();
                for (key, value) in <$ty>::iter(self) {
                    <$ty>::insert(&mut cloned, key.clone(), value.bean_clone()?.take::<V>().ok()?);
                }
                Some(Box::new(cloned))
            }

            #[inline]
            fn bean_partial_eq(&self, other: &dyn Bean) -> Option<bool> {
                map_partial_eq(self, other)
            }
        }
    };
}

impl_map_bean!(BTreeMap<String, V>, [V: Bean + Typed]);

impl_map_bean!(
    std::collections::HashMap<String, V, S>,
    [V: Bean + Typed, S: BuildHasher + Default + Send + Sync + 'static]
);

impl_map_bean!(
    hashbrown::HashMap<String, V, S>,
    [V: Bean + Typed, S: BuildHasher + Default + Send + Sync + 'static]
);

#[cfg(test)]
mod tests {
    use crate::Bean;
    use crate::info::{BeanKind, Typed};
    use crate::ops::PropertyMap;
    use alloc::boxed::Box;
    use alloc::collections::BTreeMap;
    use alloc::string::String;

    #[test]
    fn insert_is_type_checked() {
        let mut map: BTreeMap<String, u32> = BTreeMap::new();
        assert!(PropertyMap::insert(&mut map, "a", Box::new(1_u32)).unwrap().is_none());
        let old = PropertyMap::insert(&mut map, "a", Box::new(2_u32)).unwrap().unwrap();
        assert_eq!(old.downcast_ref::<u32>(), Some(&1));
        assert!(PropertyMap::insert(&mut map, "b", Box::new("x")).is_err());
        assert_eq!(map.len(), 1);
    }

    #[test]
    fn optional_values_take_inner_or_null() {
        let mut map: std::collections::HashMap<String, Option<u32>> = Default::default();
        assert!(PropertyMap::insert(&mut map, "a", Box::new(5_u32)).unwrap().is_none());
        assert!(PropertyMap::insert(&mut map, "b", Box::new(Some(6_u32))).is_ok());
        assert!(PropertyMap::insert(&mut map, "c", Box::new(crate::Null)).is_ok());
        assert!(PropertyMap::insert(&mut map, "d", Box::new("x")).is_err());

        assert_eq!(map.get("a"), Some(&Some(5)));
        assert_eq!(map.get("b"), Some(&Some(6)));
        assert_eq!(map.get("c"), Some(&None));
        assert_eq!(map.len(), 3);
    }

    #[test]
    fn std_and_hashbrown() {
        let mut std_map: std::collections::HashMap<String, bool> = Default::default();
        std_map.insert("on".into(), true);
        let mut brown: crate::HashMap<String, bool> = Default::default();
        brown.insert("on".into(), true);

        assert_eq!(std_map.bean_partial_eq(&brown), Some(true));
        assert_eq!(<crate::HashMap<String, bool> as Typed>::type_info().kind(), BeanKind::Map);
        assert!(PropertyMap::get(&brown, "off").is_none());
    }
}
