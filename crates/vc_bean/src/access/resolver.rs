//! Step resolution over the bean kinds.
//!
//! Every step is dispatched on the [`BeanRef`] / [`BeanMut`] view of its
//! target: conventional beans go through their [`BeanInfo`], dynamic beans
//! through [`DynaBean`], maps take the step name as a key, and nameless steps
//! select directly into the target.
//!
//! [`DynaBean`]: crate::dyna::DynaBean

use alloc::boxed::Box;
use alloc::string::{String, ToString};

use crate::access::accessor::steps_text;
use crate::access::{AccessStep, OffsetStep, PathAccessor, Selector};
use crate::dyna::DynaProperty;
use crate::info::{BeanInfo, PropertyDescriptor, TypeInfo};
use crate::ops::{BeanMut, BeanRef};
use crate::registry::{ConvertRegistry, IntrospectionCache};
use crate::{Bean, PropertyError};

// -----------------------------------------------------------------------------
// Helpers

/// Position of a step inside of its path, for error reporting.
#[derive(Clone, Copy)]
struct Trail<'p> {
    steps: &'p [OffsetStep<'static>],
    index: usize,
}

impl Trail<'_> {
    /// The steps before this one produced null.
    fn null_before(self) -> PropertyError {
        PropertyError::NestedNull {
            path: steps_text(&self.steps[..self.index]),
        }
    }

    /// The name part of this step produced null.
    fn null_at(self) -> PropertyError {
        let mut path = steps_text(&self.steps[..self.index]);
        if let Some(name) = self.steps.get(self.index).and_then(|s| s.step.name()) {
            if !path.is_empty() {
                path.push('.');
            }
            path.push_str(name);
        }
        PropertyError::NestedNull { path }
    }
}

/// Looks through any number of `Some` layers. `None` yields null.
pub(crate) fn unwrap_optional(value: &dyn Bean) -> Option<&dyn Bean> {
    match value.bean_ref() {
        BeanRef::Optional(optional) => unwrap_optional(optional.value()?),
        _ => Some(value),
    }
}

/// Mutable version of [`unwrap_optional`].
pub(crate) fn unwrap_optional_mut(value: &mut dyn Bean) -> Option<&mut dyn Bean> {
    match value.bean_mut() {
        BeanMut::Optional(optional) => unwrap_optional_mut(optional.value_mut()?),
        other => Some(other.as_bean()),
    }
}

#[inline]
fn in_range(name: &str, index: usize, len: usize) -> Result<(), PropertyError> {
    if index < len {
        Ok(())
    } else {
        Err(PropertyError::index_out_of_range(name, index, len))
    }
}

#[inline]
pub(crate) fn readable<'i>(
    info: &'i BeanInfo,
    name: &str,
    type_path: &'static str,
) -> Result<&'i PropertyDescriptor, PropertyError> {
    match info.get(name) {
        Some(desc) if desc.is_readable() => Ok(desc),
        Some(_) => Err(PropertyError::not_readable(name, type_path)),
        None => Err(PropertyError::unknown(name, type_path)),
    }
}

#[inline]
pub(crate) fn writeable<'i>(
    info: &'i BeanInfo,
    name: &str,
    type_path: &'static str,
) -> Result<&'i PropertyDescriptor, PropertyError> {
    match info.get(name) {
        Some(desc) if desc.is_writeable() => Ok(desc),
        Some(_) => Err(PropertyError::not_writeable(name, type_path)),
        None => Err(PropertyError::unknown(name, type_path)),
    }
}

/// Replaces `slot` with `value`, type checked.
pub(crate) fn store(
    slot: &mut dyn Bean,
    name: &str,
    value: Box<dyn Bean>,
) -> Result<(), PropertyError> {
    let expected = slot.type_path();
    slot.set(value)
        .map_err(|value| PropertyError::mismatch(name, expected, value.type_path()))
}

/// Applies `selector` to a container value.
pub(crate) fn select<'r>(
    value: &'r dyn Bean,
    name: &str,
    selector: &Selector<'_>,
) -> Result<Option<&'r dyn Bean>, PropertyError> {
    let type_path = value.type_path();
    match (selector, value.bean_ref()) {
        (Selector::None, _) => Ok(Some(value)),
        (&Selector::Index(index), BeanRef::List(list)) => {
            in_range(name, index, list.len())?;
            Ok(list.get(index))
        }
        (&Selector::Index(index), BeanRef::Array(array)) => {
            in_range(name, index, array.len())?;
            Ok(array.get(index))
        }
        (Selector::Index(_), _) => Err(PropertyError::incompatible(name, type_path, "indexed")),
        (Selector::Key(key), BeanRef::Map(map)) => Ok(map.get(key)),
        (Selector::Key(_), _) => Err(PropertyError::incompatible(name, type_path, "mapped")),
    }
}

/// Mutable version of [`select`].
pub(crate) fn select_mut<'r>(
    value: &'r mut dyn Bean,
    name: &str,
    selector: &Selector<'_>,
) -> Result<Option<&'r mut dyn Bean>, PropertyError> {
    let type_path = value.type_path();
    match selector {
        Selector::None => Ok(Some(value)),
        &Selector::Index(index) => match value.bean_mut() {
            BeanMut::List(list) => {
                in_range(name, index, list.len())?;
                Ok(list.get_mut(index))
            }
            BeanMut::Array(array) => {
                in_range(name, index, array.len())?;
                Ok(array.get_mut(index))
            }
            _ => Err(PropertyError::incompatible(name, type_path, "indexed")),
        },
        Selector::Key(key) => match value.bean_mut() {
            BeanMut::Map(map) => Ok(map.get_mut(key)),
            _ => Err(PropertyError::incompatible(name, type_path, "mapped")),
        },
    }
}

/// Stores `value` through `selector` into a container value.
pub(crate) fn store_select(
    container: &mut dyn Bean,
    name: &str,
    selector: &Selector<'_>,
    value: Box<dyn Bean>,
) -> Result<(), PropertyError> {
    let type_path = container.type_path();
    match selector {
        Selector::None => store(container, name, value),
        &Selector::Index(index) => match container.bean_mut() {
            BeanMut::List(list) => {
                in_range(name, index, list.len())?;
                let expected = list.element_info().map_or(type_path, |info| info.type_path());
                list.set_at(index, value)
                    .map_err(|value| PropertyError::mismatch(name, expected, value.type_path()))
            }
            BeanMut::Array(array) => {
                in_range(name, index, array.len())?;
                let expected = array.element_info().map_or(type_path, |info| info.type_path());
                array
                    .set_at(index, value)
                    .map_err(|value| PropertyError::mismatch(name, expected, value.type_path()))
            }
            _ => Err(PropertyError::incompatible(name, type_path, "indexed")),
        },
        Selector::Key(key) => match container.bean_mut() {
            BeanMut::Map(map) => {
                let expected = map.value_info().map_or(type_path, |info| info.type_path());
                map.insert(key, value)
                    .map(drop)
                    .map_err(|value| PropertyError::mismatch(name, expected, value.type_path()))
            }
            _ => Err(PropertyError::incompatible(name, type_path, "mapped")),
        },
    }
}

// -----------------------------------------------------------------------------
// Resolver

/// Resolves parsed paths against beans.
///
/// Holds the introspection cache and, for the converting entry points, the
/// converter registry applied to written values.
#[derive(Clone, Copy)]
pub(crate) struct Resolver<'c> {
    cache: &'c IntrospectionCache,
    converters: Option<&'c ConvertRegistry>,
}

impl<'c> Resolver<'c> {
    #[inline]
    pub(crate) const fn new(
        cache: &'c IntrospectionCache,
        converters: Option<&'c ConvertRegistry>,
    ) -> Self {
        Self { cache, converters }
    }

    #[inline]
    fn convert(
        &self,
        value: Box<dyn Bean>,
        declared: Option<TypeInfo>,
    ) -> Result<Box<dyn Bean>, PropertyError> {
        match (self.converters, declared) {
            (Some(converters), Some(declared)) => Ok(converters.coerce(value, declared)?),
            _ => Ok(value),
        }
    }

    // -------------------------------------------------------------------------
    // Single step

    fn read_step<'r>(
        &self,
        target: &'r dyn Bean,
        step: &AccessStep<'_>,
        trail: Trail<'_>,
    ) -> Result<Option<&'r dyn Bean>, PropertyError> {
        let Some(name) = step.name() else {
            return select(target, &step.to_string(), &step.selector);
        };

        match target.bean_ref() {
            BeanRef::Struct(bean) => {
                let type_path = bean.type_path();
                let info = self.cache.bean_info(bean);
                let desc = readable(&info, name, type_path)?;
                match (&step.selector, desc.is_dedicated()) {
                    (&Selector::Index(index), true) => bean.indexed_property(name, index),
                    (Selector::Key(key), true) => bean.mapped_property(name, key),
                    (Selector::None, true) => {
                        Err(PropertyError::incompatible(name, type_path, "a simple property"))
                    }
                    (Selector::None, false) => Ok(bean.property(name)),
                    (selector, false) => {
                        let value = bean
                            .property(name)
                            .and_then(unwrap_optional)
                            .ok_or_else(|| trail.null_at())?;
                        select(value, name, selector)
                    }
                }
            }
            BeanRef::Dynamic(bean) => match &step.selector {
                Selector::None => bean.get(name),
                &Selector::Index(index) => bean.get_indexed(name, index),
                Selector::Key(key) => bean.get_mapped(name, key),
            },
            BeanRef::Map(map) => match &step.selector {
                Selector::None => Ok(map.get(name)),
                selector => {
                    let value = map
                        .get(name)
                        .and_then(unwrap_optional)
                        .ok_or_else(|| trail.null_at())?;
                    select(value, name, selector)
                }
            },
            _ => Err(PropertyError::unknown(name, target.type_path())),
        }
    }

    fn read_step_mut<'r>(
        &self,
        target: &'r mut dyn Bean,
        step: &AccessStep<'_>,
        trail: Trail<'_>,
    ) -> Result<Option<&'r mut dyn Bean>, PropertyError> {
        let Some(name) = step.name() else {
            return select_mut(target, &step.to_string(), &step.selector);
        };

        let type_path = target.type_path();
        match target.bean_mut() {
            BeanMut::Struct(bean) => {
                let info = self.cache.bean_info(&*bean);
                let desc = readable(&info, name, type_path)?;
                match (&step.selector, desc.is_dedicated()) {
                    (&Selector::Index(index), true) => bean.indexed_property_mut(name, index),
                    (Selector::Key(key), true) => bean.mapped_property_mut(name, key),
                    (Selector::None, true) => {
                        Err(PropertyError::incompatible(name, type_path, "a simple property"))
                    }
                    (Selector::None, false) => Ok(bean.property_mut(name)),
                    (selector, false) => {
                        let value = bean
                            .property_mut(name)
                            .and_then(unwrap_optional_mut)
                            .ok_or_else(|| trail.null_at())?;
                        select_mut(value, name, selector)
                    }
                }
            }
            BeanMut::Dynamic(bean) => match &step.selector {
                Selector::None => bean.get_mut(name),
                &Selector::Index(index) => bean.get_indexed_mut(name, index),
                Selector::Key(key) => bean.get_mapped_mut(name, key),
            },
            BeanMut::Map(map) => match &step.selector {
                Selector::None => Ok(map.get_mut(name)),
                selector => {
                    let value = map
                        .get_mut(name)
                        .and_then(unwrap_optional_mut)
                        .ok_or_else(|| trail.null_at())?;
                    select_mut(value, name, selector)
                }
            },
            _ => Err(PropertyError::unknown(name, type_path)),
        }
    }

    fn write_step(
        &self,
        target: &mut dyn Bean,
        step: &AccessStep<'_>,
        value: Box<dyn Bean>,
        trail: Trail<'_>,
    ) -> Result<(), PropertyError> {
        let Some(name) = step.name() else {
            return self.write_select(target, &step.to_string(), &step.selector, value);
        };

        let type_path = target.type_path();
        match target.bean_mut() {
            BeanMut::Struct(bean) => {
                let info = self.cache.bean_info(&*bean);
                match (&step.selector, info.get(name).is_some_and(|d| d.is_dedicated())) {
                    (Selector::None, true) => {
                        Err(PropertyError::incompatible(name, type_path, "a simple property"))
                    }
                    (Selector::None, false) => {
                        let desc = writeable(&info, name, type_path)?;
                        let value = self.convert(value, Some(desc.type_info()))?;
                        let slot = bean
                            .property_mut(name)
                            .ok_or_else(|| PropertyError::unknown(name, type_path))?;
                        store(slot, name, value)
                    }
                    (&Selector::Index(index), true) => {
                        let desc = writeable(&info, name, type_path)?;
                        let value = self.convert(value, desc.element_type())?;
                        bean.set_indexed_property(name, index, value)
                    }
                    (Selector::Key(key), true) => {
                        writeable(&info, name, type_path)?;
                        bean.set_mapped_property(name, key, value)
                    }
                    // Element writes go through the container, which only
                    // has to be readable.
                    (selector, false) => {
                        readable(&info, name, type_path)?;
                        let container = bean
                            .property_mut(name)
                            .and_then(unwrap_optional_mut)
                            .ok_or_else(|| trail.null_at())?;
                        self.write_select(container, name, selector, value)
                    }
                }
            }
            BeanMut::Dynamic(bean) => {
                let declared = bean.dyna_class().get(name).and_then(DynaProperty::type_info);
                match &step.selector {
                    Selector::None => {
                        let value = self.convert(value, declared)?;
                        bean.set_simple(name, value)
                    }
                    &Selector::Index(index) => {
                        let value = self.convert(value, declared.and_then(|t| t.element()))?;
                        bean.set_indexed(name, index, value)
                    }
                    Selector::Key(key) => bean.set_mapped(name, key, value),
                }
            }
            BeanMut::Map(map) => match &step.selector {
                Selector::None => {
                    let declared = map.value_info();
                    let value = self.convert(value, declared)?;
                    let expected = declared.map_or(type_path, |info| info.type_path());
                    map.insert(name, value)
                        .map(drop)
                        .map_err(|value| PropertyError::mismatch(name, expected, value.type_path()))
                }
                selector => {
                    let container = map
                        .get_mut(name)
                        .and_then(unwrap_optional_mut)
                        .ok_or_else(|| trail.null_at())?;
                    self.write_select(container, name, selector, value)
                }
            },
            _ => Err(PropertyError::unknown(name, type_path)),
        }
    }

    /// Converts `value` for, then stores it through `selector` into, a
    /// container value.
    fn write_select(
        &self,
        container: &mut dyn Bean,
        name: &str,
        selector: &Selector<'_>,
        value: Box<dyn Bean>,
    ) -> Result<(), PropertyError> {
        let declared = match (selector, container.bean_ref()) {
            (Selector::None, _) => Some(container.bean_type_info()),
            (Selector::Index(_), BeanRef::List(list)) => list.element_info(),
            (Selector::Index(_), BeanRef::Array(array)) => array.element_info(),
            _ => None,
        };
        let value = self.convert(value, declared)?;
        store_select(container, name, selector, value)
    }

    // -------------------------------------------------------------------------
    // Whole paths

    /// Reads the value at `path`. `Ok(None)` is a null leaf.
    pub(crate) fn read<'r>(
        &self,
        root: &'r dyn Bean,
        path: &PathAccessor,
    ) -> Result<Option<&'r dyn Bean>, PropertyError> {
        #[cfg(all(debug_assertions, feature = "debug"))]
        log::trace!("read `{path}` of `{}`", root.type_path());

        let steps = path.steps();
        let mut current = root;
        for (index, step) in steps.iter().enumerate() {
            let trail = Trail { steps, index };
            let target = unwrap_optional(current).ok_or_else(|| trail.null_before())?;
            match self.read_step(target, &step.step, trail)? {
                Some(next) => current = next,
                None if index + 1 == steps.len() => return Ok(None),
                None => return Err(Trail { steps, index: index + 1 }.null_before()),
            }
        }
        Ok(unwrap_optional(current))
    }

    /// Mutable access to the value at `path`.
    ///
    /// Unlike [`read`](Self::read), a `None` leaf is returned as is so that
    /// callers can fill it.
    pub(crate) fn read_mut<'r>(
        &self,
        root: &'r mut dyn Bean,
        path: &PathAccessor,
    ) -> Result<Option<&'r mut dyn Bean>, PropertyError> {
        #[cfg(all(debug_assertions, feature = "debug"))]
        log::trace!("read_mut `{path}` of `{}`", root.type_path());

        let steps = path.steps();
        let mut current = root;
        for (index, step) in steps.iter().enumerate() {
            let trail = Trail { steps, index };
            let target = unwrap_optional_mut(current).ok_or_else(|| trail.null_before())?;
            match self.read_step_mut(target, &step.step, trail)? {
                Some(next) => current = next,
                None if index + 1 == steps.len() => return Ok(None),
                None => return Err(Trail { steps, index: index + 1 }.null_before()),
            }
        }
        Ok(Some(current))
    }

    /// Stores `value` at `path`.
    pub(crate) fn write(
        &self,
        root: &mut dyn Bean,
        path: &PathAccessor,
        value: Box<dyn Bean>,
    ) -> Result<(), PropertyError> {
        #[cfg(all(debug_assertions, feature = "debug"))]
        log::trace!("write `{path}` of `{}`", root.type_path());

        let steps = path.steps();
        let Some((last, parents)) = steps.split_last() else {
            return store(root, "", value);
        };

        let mut current = root;
        for (index, step) in parents.iter().enumerate() {
            let trail = Trail { steps, index };
            let target = unwrap_optional_mut(current).ok_or_else(|| trail.null_before())?;
            current = self
                .read_step_mut(target, &step.step, trail)?
                .ok_or_else(|| Trail { steps, index: index + 1 }.null_before())?;
        }

        let trail = Trail {
            steps,
            index: parents.len(),
        };
        let target = unwrap_optional_mut(current).ok_or_else(|| trail.null_before())?;
        self.write_step(target, &last.step, value, trail)
    }

    /// Resolves every step but the last, returning the target of the last
    /// step along with that step.
    pub(crate) fn leaf<'r, 'p>(
        &self,
        root: &'r dyn Bean,
        path: &'p PathAccessor,
    ) -> Result<(&'r dyn Bean, &'p AccessStep<'static>), PropertyError> {
        let steps = path.steps();
        let Some((last, parents)) = steps.split_last() else {
            return Err(PropertyError::NestedNull {
                path: String::new(),
            });
        };

        let mut current = root;
        for (index, step) in parents.iter().enumerate() {
            let trail = Trail { steps, index };
            let target = unwrap_optional(current).ok_or_else(|| trail.null_before())?;
            current = self
                .read_step(target, &step.step, trail)?
                .ok_or_else(|| Trail { steps, index: index + 1 }.null_before())?;
        }

        let trail = Trail {
            steps,
            index: parents.len(),
        };
        let target = unwrap_optional(current).ok_or_else(|| trail.null_before())?;
        Ok((target, &last.step))
    }

    // -------------------------------------------------------------------------
    // Queries

    /// Returns `true` if the last step of `path` can be read.
    pub(crate) fn is_readable(&self, root: &dyn Bean, path: &PathAccessor) -> bool {
        let Ok((target, step)) = self.leaf(root, path) else {
            return false;
        };
        let Some(name) = step.name() else {
            return target.bean_kind().is_container();
        };
        match target.bean_ref() {
            BeanRef::Struct(bean) => self
                .cache
                .bean_info(bean)
                .get(name)
                .is_some_and(PropertyDescriptor::is_readable),
            BeanRef::Dynamic(bean) => {
                bean.dyna_class().contains(name) || bean.accepts_undeclared()
            }
            BeanRef::Map(_) => true,
            _ => false,
        }
    }

    /// Returns `true` if the last step of `path` can be written.
    pub(crate) fn is_writeable(&self, root: &dyn Bean, path: &PathAccessor) -> bool {
        let Ok((target, step)) = self.leaf(root, path) else {
            return false;
        };
        let Some(name) = step.name() else {
            return target.bean_kind().is_container();
        };
        match target.bean_ref() {
            BeanRef::Struct(bean) => {
                let info = self.cache.bean_info(bean);
                match (&step.selector, info.get(name)) {
                    (_, None) => false,
                    (Selector::None, Some(desc)) => desc.is_writeable() && !desc.is_dedicated(),
                    (_, Some(desc)) if desc.is_dedicated() => desc.is_writeable(),
                    (_, Some(desc)) => desc.is_readable(),
                }
            }
            BeanRef::Dynamic(bean) => {
                bean.dyna_class().contains(name) || bean.accepts_undeclared()
            }
            BeanRef::Map(_) => true,
            _ => false,
        }
    }

    /// The declared type of the last step of `path`, if known.
    pub(crate) fn property_type(
        &self,
        root: &dyn Bean,
        path: &PathAccessor,
    ) -> Result<Option<TypeInfo>, PropertyError> {
        let (target, step) = self.leaf(root, path)?;
        let selected = |info: Option<TypeInfo>| match step.selector {
            Selector::None => info,
            _ => info.and_then(|info| info.unwrap_optional().element()),
        };

        let Some(name) = step.name() else {
            return Ok(target.bean_type_info().element());
        };
        match target.bean_ref() {
            BeanRef::Struct(bean) => {
                let info = self.cache.bean_info(bean);
                let desc = info
                    .get(name)
                    .ok_or_else(|| PropertyError::unknown(name, bean.type_path()))?;
                Ok(match step.selector {
                    Selector::None => Some(desc.type_info()),
                    _ => desc.element_type(),
                })
            }
            BeanRef::Dynamic(bean) => match bean.dyna_class().get(name) {
                Some(property) => Ok(selected(property.type_info())),
                None if bean.accepts_undeclared() => Ok(None),
                None => Err(PropertyError::unknown(name, bean.type_path())),
            },
            BeanRef::Map(map) => Ok(selected(map.value_info())),
            _ => Err(PropertyError::unknown(name, target.type_path())),
        }
    }
}
