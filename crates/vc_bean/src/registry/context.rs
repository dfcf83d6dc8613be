use alloc::sync::Arc;

use crate::registry::{ConvertRegistry, IntrospectionCache};
use crate::utils::{BeanConfig, BeanUtils, PropertyUtils};

/// The shared state of one isolated environment.
///
/// Created once at startup and handed to the entry points. Clones share the
/// same cache and registry; separately created contexts share nothing.
///
/// # Examples
///
/// ```
/// use vc_bean::BeanContext;
/// use vc_bean::derive::Bean;
///
/// #[derive(Bean, Clone, Default)]
/// struct Config { port: u16 }
///
/// let context = BeanContext::new();
/// let utils = context.bean_utils();
///
/// let mut config = Config::default();
/// utils.assign(&mut config, "port", Box::new("8080")).unwrap();
/// assert_eq!(config.port, 8080);
/// assert_eq!(context.introspection().len(), 1);
/// ```
#[derive(Clone, Debug, Default)]
pub struct BeanContext {
    introspection: Arc<IntrospectionCache>,
    converters: Arc<ConvertRegistry>,
}

impl BeanContext {
    /// A context with the default converters plus every auto registered one.
    pub fn new() -> Self {
        let context = Self::default();
        context.converters.auto_register();
        context
    }

    /// A context built from existing parts.
    #[inline]
    pub fn from_parts(
        introspection: Arc<IntrospectionCache>,
        converters: Arc<ConvertRegistry>,
    ) -> Self {
        Self {
            introspection,
            converters,
        }
    }

    #[inline]
    pub fn introspection(&self) -> &Arc<IntrospectionCache> {
        &self.introspection
    }

    #[inline]
    pub fn converters(&self) -> &Arc<ConvertRegistry> {
        &self.converters
    }

    /// Non-converting entry points over this context.
    #[inline]
    pub fn property_utils(&self) -> PropertyUtils {
        PropertyUtils::new(self)
    }

    /// Converting entry points over this context.
    #[inline]
    pub fn bean_utils(&self) -> BeanUtils {
        BeanUtils::new(self)
    }

    /// Converting entry points with a custom configuration.
    #[inline]
    pub fn bean_utils_with(&self, config: BeanConfig) -> BeanUtils {
        BeanUtils::with_config(self, config)
    }

    /// Drops the cached introspection data.
    #[inline]
    pub fn clear_caches(&self) {
        self.introspection.clear();
    }
}

#[cfg(test)]
mod tests {
    use alloc::boxed::Box;
    use alloc::sync::Arc;
    use alloc::vec::Vec;

    use super::BeanContext;
    use crate::derive::Bean;
    use crate::info::Typed;

    #[derive(Bean, Clone, Default)]
    struct Gauge {
        level: u8,
    }

    #[test]
    fn isolated_contexts() {
        let a = BeanContext::new();
        let b = BeanContext::new();
        a.converters().deregister(u8::type_info().type_id());
        assert!(!a.converters().contains(u8::type_info().type_id()));
        assert!(b.converters().contains(u8::type_info().type_id()));

        let shared = a.clone();
        assert!(!shared.converters().contains(u8::type_info().type_id()));
    }

    #[test]
    fn shared_across_threads() {
        let context = BeanContext::new();
        let converters = context.converters().len();

        let infos: Vec<_> = std::thread::scope(|scope| {
            let workers: Vec<_> = (0..8_u8)
                .map(|i| {
                    let context = &context;
                    scope.spawn(move || {
                        context.converters().register::<u8>();
                        let value = context.converters().convert("7", u8::type_info()).unwrap();
                        assert_eq!(value.downcast_ref::<u8>(), Some(&7));

                        let mut gauge = Gauge::default();
                        let text = Box::new(alloc::format!("{i}"));
                        context.bean_utils().assign(&mut gauge, "level", text).unwrap();
                        assert_eq!(gauge.level, i);
                        context.introspection().bean_info(&gauge)
                    })
                })
                .collect();
            workers.into_iter().map(|w| w.join().unwrap()).collect()
        });

        assert!(infos.windows(2).all(|w| Arc::ptr_eq(&w[0], &w[1])));
        assert_eq!(context.introspection().len(), 1);
        assert_eq!(context.converters().len(), converters);
    }
}
