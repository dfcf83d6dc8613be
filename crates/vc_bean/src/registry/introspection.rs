use alloc::sync::Arc;
use core::any::TypeId;
use core::fmt;
use std::sync::{PoisonError, RwLock};

use crate::hash::{TypeIdMap, new_type_id_map};
use crate::info::BeanInfo;
use crate::ops::Properties;

/// Memoized [`BeanInfo`] per conventional bean type.
///
/// Descriptors are computed once per type, on first use, and shared by
/// every later lookup. A poisoned lock is recovered, the cached data is
/// never left half written.
///
/// # Examples
///
/// ```
/// use vc_bean::IntrospectionCache;
/// use vc_bean::derive::Bean;
/// use vc_bean::info::Typed;
///
/// #[derive(Bean, Clone, Default)]
/// struct Point { x: i32, y: i32 }
///
/// let cache = IntrospectionCache::new();
/// assert!(cache.is_empty());
///
/// let info = cache.bean_info(&Point::default());
/// assert_eq!(info.len(), 2);
/// assert!(cache.contains(Point::type_info().type_id()));
///
/// cache.clear();
/// assert!(cache.is_empty());
/// ```
pub struct IntrospectionCache {
    infos: RwLock<TypeIdMap<Arc<BeanInfo>>>,
}

impl Default for IntrospectionCache {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl IntrospectionCache {
    /// Creates an empty cache.
    #[inline]
    pub fn new() -> Self {
        Self {
            infos: RwLock::new(new_type_id_map()),
        }
    }

    /// Returns the descriptors of `bean`'s type, computing them on first use.
    pub fn bean_info(&self, bean: &dyn Properties) -> Arc<BeanInfo> {
        let type_id = bean.ty_id();
        if let Some(info) = self.get(type_id) {
            return info;
        }

        let info = Arc::new(bean.bean_info());
        log::trace!(
            "introspected `{}`: {} properties",
            bean.type_path(),
            info.len()
        );

        let mut infos = self.infos.write().unwrap_or_else(PoisonError::into_inner);
        // Another thread may have won the race, keep its entry.
        Arc::clone(infos.entry(type_id).or_insert(info))
    }

    /// Returns the cached descriptors of the type `type_id`.
    #[inline]
    pub fn get(&self, type_id: TypeId) -> Option<Arc<BeanInfo>> {
        self.infos
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&type_id)
            .cloned()
    }

    #[inline]
    pub fn contains(&self, type_id: TypeId) -> bool {
        self.infos
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .contains_key(&type_id)
    }

    /// Number of cached types.
    #[inline]
    pub fn len(&self) -> usize {
        self.infos.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drops every cached entry.
    pub fn clear(&self) {
        let mut infos = self.infos.write().unwrap_or_else(PoisonError::into_inner);
        log::debug!("clearing {} cached bean infos", infos.len());
        infos.clear();
    }
}

impl fmt::Debug for IntrospectionCache {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let infos = self.infos.read().unwrap_or_else(PoisonError::into_inner);
        f.debug_list()
            .entries(infos.values().map(|info| info.type_info().type_path()))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use alloc::sync::Arc;

    use super::IntrospectionCache;
    use crate::derive::Bean;
    use crate::info::Typed;

    #[derive(Bean, Clone, Default)]
    struct Sample {
        name: alloc::string::String,
        #[bean(read_only)]
        id: u32,
    }

    #[test]
    fn computed_once() {
        let cache = IntrospectionCache::new();
        let first = cache.bean_info(&Sample::default());
        let second = cache.bean_info(&Sample::default());
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(cache.len(), 1);
        assert!(!first.get("id").unwrap().is_writeable());
    }

    #[test]
    fn clear_recomputes() {
        let cache = IntrospectionCache::new();
        let first = cache.bean_info(&Sample::default());
        cache.clear();
        assert!(!cache.contains(Sample::type_info().type_id()));
        let second = cache.bean_info(&Sample::default());
        assert!(!Arc::ptr_eq(&first, &second));
        assert_eq!(first.len(), second.len());
    }
}
