use alloc::format;
use alloc::sync::Arc;

use serde_core::ser::{SerializeMap, SerializeSeq};
use serde_core::{Serialize, Serializer};

use super::BeanSerialize;
use super::driver::make_custom_error;
use crate::dyna::DynaBean;
use crate::info::BeanInfo;
use crate::ops::{Array, List, Properties, PropertyMap};
use crate::{ErrorKind, Null};

/// A serializer for [`Properties`] values.
pub(super) struct StructSerializer<'a> {
    pub bean: &'a dyn Properties,
    pub driver: BeanSerialize<'a>,
}

impl Serialize for StructSerializer<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let info: Arc<BeanInfo> = match self.driver.cache {
            Some(cache) => cache.bean_info(self.bean),
            None => Arc::new(self.bean.bean_info()),
        };
        let names = info
            .iter()
            .filter(|desc| desc.is_readable() && !desc.is_dedicated())
            .map(|desc| desc.name());

        let mut state = serializer.serialize_map(None)?;
        for name in names {
            match self.bean.property(name) {
                Some(value) => state.serialize_entry(name, &self.driver.nested(value))?,
                None => {
                    return Err(make_custom_error(format!(
                        "property `{name}` was missing while serializing `{}`",
                        self.bean.type_path()
                    )));
                }
            }
        }
        state.end()
    }
}

/// A serializer for [`DynaBean`] values.
pub(super) struct DynaSerializer<'a> {
    pub bean: &'a dyn DynaBean,
    pub driver: BeanSerialize<'a>,
}

impl Serialize for DynaSerializer<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let class = self.bean.dyna_class();
        let mut state = serializer.serialize_map(Some(class.len()))?;
        for name in class.names() {
            match self.bean.get(name) {
                Ok(Some(value)) => state.serialize_entry(name, &self.driver.nested(value))?,
                Ok(None) => state.serialize_entry(name, &self.driver.nested(&Null))?,
                Err(e) if e.kind() == ErrorKind::UnknownProperty => {}
                Err(e) => return Err(make_custom_error(e)),
            }
        }
        state.end()
    }
}

/// A serializer for [`PropertyMap`] values.
pub(super) struct MapSerializer<'a> {
    pub map: &'a dyn PropertyMap,
    pub driver: BeanSerialize<'a>,
}

impl Serialize for MapSerializer<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_map(Some(self.map.len()))?;
        for (key, value) in self.map.iter() {
            state.serialize_entry(key, &self.driver.nested(value))?;
        }
        state.end()
    }
}

/// A serializer for [`List`] values.
pub(super) struct ListSerializer<'a> {
    pub list: &'a dyn List,
    pub driver: BeanSerialize<'a>,
}

impl Serialize for ListSerializer<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_seq(Some(self.list.len()))?;
        for value in self.list.iter() {
            state.serialize_element(&value.map(|value| self.driver.nested(value)))?;
        }
        state.end()
    }
}

/// A serializer for [`Array`] values.
pub(super) struct ArraySerializer<'a> {
    pub array: &'a dyn Array,
    pub driver: BeanSerialize<'a>,
}

impl Serialize for ArraySerializer<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_seq(Some(self.array.len()))?;
        for value in self.array.iter() {
            state.serialize_element(&self.driver.nested(value))?;
        }
        state.end()
    }
}
