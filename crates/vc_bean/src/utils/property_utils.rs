use alloc::boxed::Box;
use alloc::collections::BTreeMap;
use alloc::string::String;
use alloc::sync::Arc;

use crate::access::{AccessPath, AccessStep, PathAccessor, Resolver, Selector};
use crate::dyna::DynaProperty;
use crate::info::{BeanInfo, BeanKind, PropertyDescriptor, TypeInfo, Typed};
use crate::ops::BeanRef;
use crate::registry::IntrospectionCache;
use crate::utils::{property_names, simple_path};
use crate::{Bean, BeanContext, ErrorKind, Null, PropertyError};

/// Typed property path access.
///
/// Values are read and stored as they are: no conversion takes place and a
/// value of the wrong type fails with [`PropertyError::TypeMismatch`]. Every
/// failure is reported, unknown properties included.
///
/// # Examples
///
/// ```
/// use vc_bean::PropertyUtils;
/// use vc_bean::derive::Bean;
///
/// #[derive(Bean, Clone, Default)]
/// struct Address { city: String }
///
/// #[derive(Bean, Clone, Default)]
/// struct Person { name: String, address: Option<Address>, phones: Vec<String> }
///
/// let utils = PropertyUtils::default();
/// let mut person = Person::default();
///
/// utils.set_property(&mut person, "address", Box::new(Address::default())).unwrap();
/// utils.set_property(&mut person, "address.city", Box::new(String::from("Oslo"))).unwrap();
///
/// let city = utils.get_property(&person, "address.city").unwrap().unwrap();
/// assert_eq!(city.downcast_ref::<String>().unwrap(), "Oslo");
///
/// // No conversion: a `&str` is not a `String`.
/// assert!(utils.set_property(&mut person, "name", Box::new("Ada")).is_err());
/// // Bean backed sequences never grow.
/// assert!(utils.get_property(&person, "phones[0]").is_err());
/// ```
#[derive(Clone, Debug, Default)]
pub struct PropertyUtils {
    cache: Arc<IntrospectionCache>,
}

impl PropertyUtils {
    /// Entry points over the cache of `context`.
    #[inline]
    pub fn new(context: &BeanContext) -> Self {
        Self::with_cache(context.introspection().clone())
    }

    #[inline]
    pub fn with_cache(cache: Arc<IntrospectionCache>) -> Self {
        Self { cache }
    }

    #[inline]
    pub fn cache(&self) -> &Arc<IntrospectionCache> {
        &self.cache
    }

    #[inline]
    fn resolver(&self) -> Resolver<'_> {
        Resolver::new(&self.cache, None)
    }

    // -------------------------------------------------------------------------
    // Paths

    /// The value at `path`. `Ok(None)` is a null leaf.
    pub fn get_property<'r, 'a>(
        &self,
        bean: &'r dyn Bean,
        path: impl AccessPath<'a>,
    ) -> Result<Option<&'r dyn Bean>, PropertyError> {
        let path = PathAccessor::parse(path)?;
        self.resolver().read(bean, &path)
    }

    /// Mutable access to the value at `path`.
    ///
    /// An `Option` leaf is returned as is, so that `None` can be filled.
    pub fn get_property_mut<'r, 'a>(
        &self,
        bean: &'r mut dyn Bean,
        path: impl AccessPath<'a>,
    ) -> Result<Option<&'r mut dyn Bean>, PropertyError> {
        let path = PathAccessor::parse(path)?;
        self.resolver().read_mut(bean, &path)
    }

    /// Stores `value` at `path`.
    pub fn set_property<'a>(
        &self,
        bean: &mut dyn Bean,
        path: impl AccessPath<'a>,
        value: Box<dyn Bean>,
    ) -> Result<(), PropertyError> {
        let path = PathAccessor::parse(path)?;
        self.resolver().write(bean, &path, value)
    }

    // -------------------------------------------------------------------------
    // Single steps

    /// The value of the property `name` of `bean` itself.
    ///
    /// `name` must be a plain property name, not a nested, indexed or
    /// mapped path.
    pub fn get_simple_property<'r>(
        &self,
        bean: &'r dyn Bean,
        name: &str,
    ) -> Result<Option<&'r dyn Bean>, PropertyError> {
        let path = simple_name(bean, name)?;
        self.resolver().read(bean, &path)
    }

    /// The element `index` of the indexed property `name`.
    pub fn get_indexed_property<'r>(
        &self,
        bean: &'r dyn Bean,
        name: &str,
        index: usize,
    ) -> Result<Option<&'r dyn Bean>, PropertyError> {
        let path = PathAccessor::from_iter([AccessStep::indexed(String::from(name), index)]);
        self.resolver().read(bean, &path)
    }

    /// The entry `key` of the mapped property `name`.
    pub fn get_mapped_property<'r>(
        &self,
        bean: &'r dyn Bean,
        name: &str,
        key: &str,
    ) -> Result<Option<&'r dyn Bean>, PropertyError> {
        let path =
            PathAccessor::from_iter([AccessStep::mapped(String::from(name), String::from(key))]);
        self.resolver().read(bean, &path)
    }

    /// Stores `value` in the property `name` of `bean` itself.
    pub fn set_simple_property(
        &self,
        bean: &mut dyn Bean,
        name: &str,
        value: Box<dyn Bean>,
    ) -> Result<(), PropertyError> {
        let path = simple_name(bean, name)?;
        self.resolver().write(bean, &path, value)
    }

    /// Stores `value` as the element `index` of the indexed property `name`.
    pub fn set_indexed_property(
        &self,
        bean: &mut dyn Bean,
        name: &str,
        index: usize,
        value: Box<dyn Bean>,
    ) -> Result<(), PropertyError> {
        let path = PathAccessor::from_iter([AccessStep::indexed(String::from(name), index)]);
        self.resolver().write(bean, &path, value)
    }

    /// Stores `value` as the entry `key` of the mapped property `name`.
    pub fn set_mapped_property(
        &self,
        bean: &mut dyn Bean,
        name: &str,
        key: &str,
        value: Box<dyn Bean>,
    ) -> Result<(), PropertyError> {
        let path =
            PathAccessor::from_iter([AccessStep::mapped(String::from(name), String::from(key))]);
        self.resolver().write(bean, &path, value)
    }

    // -------------------------------------------------------------------------
    // Queries

    /// Returns `true` if `path` can be read.
    ///
    /// Malformed paths and broken chains are not readable.
    pub fn is_readable<'a>(&self, bean: &dyn Bean, path: impl AccessPath<'a>) -> bool {
        PathAccessor::parse(path).is_ok_and(|path| self.resolver().is_readable(bean, &path))
    }

    /// Returns `true` if `path` can be written.
    pub fn is_writeable<'a>(&self, bean: &dyn Bean, path: impl AccessPath<'a>) -> bool {
        PathAccessor::parse(path).is_ok_and(|path| self.resolver().is_writeable(bean, &path))
    }

    /// The declared type at `path`.
    ///
    /// `Ok(None)` when the type is not known up front, as for the untyped
    /// properties of dynamic beans.
    pub fn property_type<'a>(
        &self,
        bean: &dyn Bean,
        path: impl AccessPath<'a>,
    ) -> Result<Option<TypeInfo>, PropertyError> {
        let path = PathAccessor::parse(path)?;
        self.resolver().property_type(bean, &path)
    }

    /// The accessor descriptors of `bean`.
    ///
    /// Conventional beans answer from the cache. For dynamic beans the
    /// descriptors are built from the class, untyped properties are
    /// described as [`Null`].
    pub fn property_descriptors(&self, bean: &dyn Bean) -> Result<Arc<BeanInfo>, PropertyError> {
        match bean.bean_ref() {
            BeanRef::Struct(data) => Ok(self.cache.bean_info(data)),
            BeanRef::Dynamic(data) => {
                let descriptors = data.dyna_class().iter().map(|property: &DynaProperty| {
                    let type_info = property.type_info().unwrap_or_else(Null::type_info);
                    PropertyDescriptor::from_info(String::from(property.name()), type_info)
                });
                Ok(Arc::new(BeanInfo::from_info(bean.bean_type_info(), descriptors)))
            }
            _ => Err(PropertyError::unsupported("property descriptors", bean.type_path())),
        }
    }

    // -------------------------------------------------------------------------
    // Bulk

    /// The readable properties of `bean` and their values.
    ///
    /// Works on conventional beans, dynamic beans and maps.
    pub fn describe<'r>(
        &self,
        bean: &'r dyn Bean,
    ) -> Result<BTreeMap<String, Option<&'r dyn Bean>>, PropertyError> {
        let mut result = BTreeMap::new();
        for name in property_names(&self.cache, bean)? {
            match self.resolver().read(bean, &simple_path(&name)) {
                Ok(value) => {
                    result.insert(name, value);
                }
                Err(e) if e.kind() == ErrorKind::UnknownProperty => {}
                Err(e) => return Err(e),
            }
        }
        Ok(result)
    }

    /// Copies every readable property of `source` to the writeable property
    /// of the same name on `dest`, without conversion.
    ///
    /// Properties missing on either side are skipped. A null value is only
    /// copied into a slot that can hold it.
    pub fn copy_properties(
        &self,
        dest: &mut dyn Bean,
        source: &dyn Bean,
    ) -> Result<(), PropertyError> {
        let resolver = self.resolver();
        for name in property_names(&self.cache, source)? {
            let path = simple_path(&name);
            if !resolver.is_writeable(dest, &path) {
                continue;
            }
            let value: Box<dyn Bean> = match resolver.read(source, &path) {
                Ok(Some(value)) => value
                    .bean_clone()
                    .ok_or_else(|| PropertyError::unsupported("clone", value.type_path()))?,
                Ok(None) => Box::new(Null),
                Err(e) if e.kind() == ErrorKind::UnknownProperty => continue,
                Err(e) => return Err(e),
            };
            if value.is_null() && !accepts_null(resolver.property_type(dest, &path)?) {
                continue;
            }
            resolver.write(dest, &path, value)?;
        }
        Ok(())
    }
}

/// Returns `true` if a slot of the declared type can hold a null.
#[inline]
pub(crate) fn accepts_null(declared: Option<TypeInfo>) -> bool {
    declared.is_none_or(|info| info.kind() == BeanKind::Optional)
}

/// Parses `name` as a single simple step.
fn simple_name(bean: &dyn Bean, name: &str) -> Result<PathAccessor, PropertyError> {
    let path = PathAccessor::parse(name)?;
    let simple = path.len() == 1
        && path
            .first()
            .is_some_and(|step| step.name().is_some() && step.selector == Selector::None);
    if simple {
        Ok(path)
    } else {
        Err(PropertyError::incompatible(name, bean.type_path(), "a simple property"))
    }
}

#[cfg(test)]
mod tests {
    use alloc::boxed::Box;
    use alloc::collections::BTreeMap;
    use alloc::string::{String, ToString};
    use alloc::vec;
    use alloc::vec::Vec;

    use super::PropertyUtils;
    use crate::derive::Bean;
    use crate::dyna::{DynaBean, LazyDynaBean};
    use crate::{ErrorKind, Null};

    #[derive(Bean, Clone, Default, Debug, PartialEq)]
    struct Address {
        city: String,
        zip: Option<String>,
    }

    #[derive(Bean, Clone, Default, Debug, PartialEq)]
    struct Employee {
        name: String,
        age: u32,
        address: Option<Address>,
        phones: Vec<String>,
        grid: [[u8; 2]; 2],
        labels: BTreeMap<String, String>,
        #[bean(read_only)]
        id: u64,
    }

    fn employee() -> Employee {
        Employee {
            name: "Ada".into(),
            age: 36,
            address: Some(Address {
                city: "London".into(),
                zip: None,
            }),
            phones: vec!["111".into(), "222".into()],
            grid: [[1, 2], [3, 4]],
            labels: BTreeMap::from([("team".to_string(), "core".to_string())]),
            id: 7,
        }
    }

    #[test]
    fn nested_indexed_mapped() {
        let utils = PropertyUtils::default();
        let bean = employee();

        let value = utils.get_property(&bean, "address.city").unwrap().unwrap();
        assert_eq!(value.downcast_ref::<String>().unwrap(), "London");

        let value = utils.get_property(&bean, "phones[1]").unwrap().unwrap();
        assert_eq!(value.downcast_ref::<String>().unwrap(), "222");

        let value = utils.get_property(&bean, "grid[1][0]").unwrap().unwrap();
        assert_eq!(value.downcast_ref::<u8>(), Some(&3));

        let value = utils.get_property(&bean, "labels(team)").unwrap().unwrap();
        assert_eq!(value.downcast_ref::<String>().unwrap(), "core");

        assert!(utils.get_property(&bean, "labels(missing)").unwrap().is_none());
        assert!(utils.get_property(&bean, "address.zip").unwrap().is_none());
    }

    #[test]
    fn failures() {
        let utils = PropertyUtils::default();
        let mut bean = employee();

        let err = utils.get_property(&bean, "phones[2]").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::IndexOutOfRange);

        let err = utils.get_property(&bean, "salary").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnknownProperty);

        let err = utils.get_property(&bean, "phones[x]").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MalformedExpression);

        let err = utils.set_property(&mut bean, "id", Box::new(1_u64)).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnknownProperty);

        let err = utils.set_property(&mut bean, "age", Box::new(1_i64)).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ConversionFailure);

        bean.address = None;
        let err = utils.get_property(&bean, "address.city").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NestedNull);
        assert_eq!(err.to_string(), "null value in nested property path `address`");
        let err = utils.set_property(&mut bean, "address.city", Box::new(String::new())).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NestedNull);
    }

    #[test]
    fn single_steps() {
        let utils = PropertyUtils::default();
        let mut bean = employee();

        utils.set_indexed_property(&mut bean, "phones", 0, Box::new(String::from("000"))).unwrap();
        utils.set_mapped_property(&mut bean, "labels", "a.b", Box::new(String::from("dot"))).unwrap();
        utils.set_simple_property(&mut bean, "age", Box::new(40_u32)).unwrap();

        assert_eq!(bean.phones[0], "000");
        assert_eq!(bean.labels["a.b"], "dot");
        assert_eq!(bean.age, 40);

        let value = utils.get_mapped_property(&bean, "labels", "a.b").unwrap().unwrap();
        assert_eq!(value.downcast_ref::<String>().unwrap(), "dot");
        let value = utils.get_indexed_property(&bean, "phones", 1).unwrap().unwrap();
        assert_eq!(value.downcast_ref::<String>().unwrap(), "222");

        let err = utils.get_simple_property(&bean, "address.city").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnknownProperty);
        assert!(utils.get_simple_property(&bean, "name").unwrap().is_some());
    }

    #[test]
    fn queries() {
        let utils = PropertyUtils::default();
        let bean = employee();

        assert!(utils.is_readable(&bean, "id"));
        assert!(!utils.is_writeable(&bean, "id"));
        assert!(utils.is_writeable(&bean, "phones[0]"));
        assert!(!utils.is_readable(&bean, "address.street"));
        assert!(!utils.is_readable(&bean, "a[1"));

        let info = utils.property_type(&bean, "phones[0]").unwrap().unwrap();
        assert!(info.is::<String>());
        let info = utils.property_type(&bean, "address").unwrap().unwrap();
        assert!(info.is::<Option<Address>>());

        let descriptors = utils.property_descriptors(&bean).unwrap();
        assert_eq!(descriptors.len(), 7);
        assert!(!descriptors.get("id").unwrap().is_writeable());
    }

    #[test]
    fn describe_and_copy() {
        let utils = PropertyUtils::default();
        let source = employee();

        let described = utils.describe(&source).unwrap();
        assert_eq!(described.len(), 7);
        assert!(described["address"].is_some());

        let mut dest = Employee::default();
        utils.copy_properties(&mut dest, &source).unwrap();
        assert_eq!(dest.name, "Ada");
        assert_eq!(dest.address, source.address);
        assert_eq!(dest.id, 0);

        let mut lazy = LazyDynaBean::new();
        lazy.set_simple("name", Box::new(String::from("Bob"))).unwrap();
        lazy.set_simple("missing", Box::new(Null)).unwrap();
        utils.copy_properties(&mut dest, &lazy).unwrap();
        assert_eq!(dest.name, "Bob");
    }

    #[test]
    fn dynamic_descriptors() {
        let utils = PropertyUtils::default();
        let mut lazy = LazyDynaBean::new();
        lazy.set_simple("count", Box::new(3_i32)).unwrap();
        lazy.set_simple("nothing", Box::new(Null)).unwrap();

        let descriptors = utils.property_descriptors(&lazy).unwrap();
        assert!(descriptors.get("count").unwrap().type_info().is::<i32>());
        assert!(descriptors.get("nothing").unwrap().type_info().is::<Null>());
        assert_eq!(lazy.get("count").unwrap().unwrap().downcast_ref::<i32>(), Some(&3));
    }
}
