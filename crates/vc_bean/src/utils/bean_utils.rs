use alloc::boxed::Box;
use alloc::collections::BTreeMap;
use alloc::format;
use alloc::string::String;
use alloc::sync::Arc;
use alloc::vec::Vec;

use crate::access::{AccessPath, PathAccessor, Resolver};
use crate::ops::BeanRef;
use crate::registry::{ConvertRegistry, IntrospectionCache};
use crate::utils::property_utils::accepts_null;
use crate::utils::{BeanConfig, PropertyUtils, property_names, simple_path};
use crate::{Bean, BeanContext, ErrorKind, Null, PropertyError};

/// Property path access with type conversion.
///
/// Written values are adapted to the declared type of their destination by
/// the [`ConvertRegistry`], so external text can be stored in typed
/// properties. Reads to text go through the same registry.
///
/// Two kinds of writes exist:
///
/// - [`assign`](Self::assign) is strict and reports every failure.
/// - [`copy_property`](Self::copy_property), [`populate`](Self::populate)
///   and [`copy`](Self::copy) skip destinations that do not exist or are
///   not writeable, so that over-specified input does not abort a bulk
///   update. Broken paths are still reported.
///
/// # Examples
///
/// ```
/// use vc_bean::{Bean, BeanContext};
/// use vc_bean::derive::Bean;
///
/// #[derive(Bean, Clone, Default)]
/// struct Server { host: String, port: u16, tags: Vec<String> }
///
/// let utils = BeanContext::new().bean_utils();
/// let mut server = Server::default();
///
/// let input: Vec<(&str, Box<dyn Bean>)> = vec![
///     ("host", Box::new("localhost")),
///     ("port", Box::new("8080")),
///     ("color", Box::new("blue")),
/// ];
/// utils.populate(&mut server, input).unwrap();
///
/// assert_eq!(server.host, "localhost");
/// assert_eq!(server.port, 8080);
/// assert_eq!(utils.get_property(&server, "port").unwrap().as_deref(), Some("8080"));
///
/// // The direct entry point reports unknown properties.
/// assert!(utils.assign(&mut server, "color", Box::new("blue")).is_err());
/// ```
#[derive(Clone, Debug, Default)]
pub struct BeanUtils {
    cache: Arc<IntrospectionCache>,
    converters: Arc<ConvertRegistry>,
    config: BeanConfig,
}

impl BeanUtils {
    /// Entry points over the cache and converters of `context`.
    #[inline]
    pub fn new(context: &BeanContext) -> Self {
        Self::with_config(context, BeanConfig::new())
    }

    #[inline]
    pub fn with_config(context: &BeanContext, config: BeanConfig) -> Self {
        Self {
            cache: context.introspection().clone(),
            converters: context.converters().clone(),
            config,
        }
    }

    #[inline]
    pub fn config(&self) -> BeanConfig {
        self.config
    }

    #[inline]
    pub fn converters(&self) -> &Arc<ConvertRegistry> {
        &self.converters
    }

    /// The non-converting entry points sharing this cache.
    #[inline]
    pub fn property_utils(&self) -> PropertyUtils {
        PropertyUtils::with_cache(self.cache.clone())
    }

    #[inline]
    fn resolver(&self) -> Resolver<'_> {
        Resolver::new(&self.cache, Some(&*self.converters))
    }

    /// Returns `true` if a failed lenient write may be skipped.
    fn skippable(&self, error: &PropertyError) -> bool {
        match error.kind() {
            ErrorKind::UnknownProperty => true,
            ErrorKind::ConversionFailure => self.config.is_lenient_conversion(),
            _ => false,
        }
    }

    // -------------------------------------------------------------------------
    // Reads

    /// The value at `path`. `Ok(None)` is a null leaf.
    pub fn resolve<'r, 'a>(
        &self,
        bean: &'r dyn Bean,
        path: impl AccessPath<'a>,
    ) -> Result<Option<&'r dyn Bean>, PropertyError> {
        let path = PathAccessor::parse(path)?;
        self.resolver().read(bean, &path)
    }

    /// The text form of the value at `path`.
    ///
    /// A sequence is represented by its first element, see
    /// [`ConvertRegistry::convert_to_string`].
    pub fn get_property<'a>(
        &self,
        bean: &dyn Bean,
        path: impl AccessPath<'a>,
    ) -> Result<Option<String>, PropertyError> {
        let value = self.resolve(bean, path)?;
        Ok(value.and_then(|value| self.converters.convert_to_string(value)))
    }

    /// The text forms of every element of the sequence at `path`.
    ///
    /// A single value yields a one element vector.
    ///
    /// ```
    /// use vc_bean::BeanUtils;
    /// use vc_bean::derive::Bean;
    ///
    /// #[derive(Bean, Clone, Default)]
    /// struct Sample { codes: Vec<u16>, name: Option<String> }
    ///
    /// let utils = BeanUtils::default();
    /// let sample = Sample { codes: vec![200, 404], name: None };
    ///
    /// let codes = utils.get_array_property(&sample, "codes").unwrap().unwrap();
    /// assert_eq!(codes, ["200", "404"]);
    /// assert_eq!(utils.get_array_property(&sample, "name").unwrap(), None);
    /// ```
    pub fn get_array_property<'a>(
        &self,
        bean: &dyn Bean,
        path: impl AccessPath<'a>,
    ) -> Result<Option<Vec<String>>, PropertyError> {
        let Some(value) = self.resolve(bean, path)? else {
            return Ok(None);
        };
        let text = |item: Option<&dyn Bean>| {
            item.and_then(|item| self.converters.convert_to_string(item))
                .unwrap_or_default()
        };
        Ok(Some(match value.bean_ref() {
            BeanRef::List(list) => list.iter().map(text).collect(),
            BeanRef::Array(array) => array.iter().map(|item| text(Some(item))).collect(),
            _ => Vec::from([text(Some(value))]),
        }))
    }

    // -------------------------------------------------------------------------
    // Writes

    /// Converts and stores `value` at `path`, reporting every failure.
    pub fn assign<'a>(
        &self,
        bean: &mut dyn Bean,
        path: impl AccessPath<'a>,
        value: Box<dyn Bean>,
    ) -> Result<(), PropertyError> {
        let path = PathAccessor::parse(path)?;
        self.resolver().write(bean, &path, value)
    }

    /// Converts and stores `value` at `path`, skipping a destination that
    /// does not exist or is not writeable.
    ///
    /// With [`BeanConfig::lenient_conversion`] a value that cannot be
    /// converted is skipped too.
    pub fn copy_property<'a>(
        &self,
        bean: &mut dyn Bean,
        path: impl AccessPath<'a>,
        value: Box<dyn Bean>,
    ) -> Result<(), PropertyError> {
        let path = PathAccessor::parse(path)?;
        self.copy_at(bean, &path, value)
    }

    fn copy_at(
        &self,
        bean: &mut dyn Bean,
        path: &PathAccessor,
        value: Box<dyn Bean>,
    ) -> Result<(), PropertyError> {
        match self.resolver().write(bean, path, value) {
            Err(e) if self.skippable(&e) => {
                log::debug!("skipped `{path}` of `{}`: {e}", bean.type_path());
                Ok(())
            }
            res => res,
        }
    }

    /// Leniently stores every `(path, value)` pair, see
    /// [`copy_property`](Self::copy_property).
    ///
    /// Stops at the first failure that is not skipped; earlier entries stay
    /// stored.
    pub fn populate<K, I>(&self, bean: &mut dyn Bean, properties: I) -> Result<(), PropertyError>
    where
        K: AsRef<str>,
        I: IntoIterator<Item = (K, Box<dyn Bean>)>,
    {
        for (path, value) in properties {
            self.copy_property(bean, path.as_ref(), value)?;
        }
        Ok(())
    }

    /// Copies every readable property of `source` to the property of the
    /// same name on `dest`, converting as needed.
    ///
    /// Conventional beans, dynamic beans and maps work on either side. Source
    /// properties without a writeable counterpart are skipped, so is a null
    /// value for a destination that cannot hold it.
    ///
    /// ```
    /// use vc_bean::BeanUtils;
    /// use vc_bean::derive::Bean;
    ///
    /// #[derive(Bean, Clone, Default)]
    /// struct Form { name: String, age: String }
    ///
    /// #[derive(Bean, Clone, Default)]
    /// struct Record { name: String, age: u8, id: u64 }
    ///
    /// let utils = BeanUtils::default();
    /// let form = Form { name: "Ada".into(), age: "36".into() };
    /// let mut record = Record { id: 9, ..Default::default() };
    ///
    /// utils.copy(&mut record, &form).unwrap();
    /// assert_eq!((record.name.as_str(), record.age, record.id), ("Ada", 36, 9));
    /// ```
    pub fn copy(&self, dest: &mut dyn Bean, source: &dyn Bean) -> Result<(), PropertyError> {
        let resolver = self.resolver();
        for name in property_names(&self.cache, source)? {
            let path = simple_path(&name);
            if !resolver.is_writeable(dest, &path) {
                log::debug!("skipped `{name}`, not writeable on `{}`", dest.type_path());
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
            self.copy_at(dest, &path, value)?;
        }
        Ok(())
    }

    // -------------------------------------------------------------------------
    // Whole beans

    /// The text forms of every readable property of `bean`.
    ///
    /// Values without a text form are described by their debug output.
    pub fn describe(&self, bean: &dyn Bean) -> Result<BTreeMap<String, Option<String>>, PropertyError> {
        let mut result = BTreeMap::new();
        for name in property_names(&self.cache, bean)? {
            let value = match self.resolver().read(bean, &simple_path(&name)) {
                Ok(value) => value,
                Err(e) if e.kind() == ErrorKind::UnknownProperty => continue,
                Err(e) => return Err(e),
            };
            let text = value.map(|value| {
                self.converters
                    .convert_to_string(value)
                    .unwrap_or_else(|| format!("{value:?}"))
            });
            result.insert(name, text);
        }
        Ok(result)
    }

    /// A copy of `bean`.
    ///
    /// Beans that cannot clone themselves are recreated from the default
    /// of their type and filled through [`copy`](Self::copy).
    pub fn clone_bean(&self, bean: &dyn Bean) -> Result<Box<dyn Bean>, PropertyError> {
        if let Some(clone) = bean.bean_clone() {
            return Ok(clone);
        }
        let mut clone = bean
            .bean_type_info()
            .create_default()
            .ok_or_else(|| PropertyError::unsupported("clone", bean.type_path()))?;
        self.copy(&mut *clone, bean)?;
        Ok(clone)
    }
}

#[cfg(test)]
mod tests {
    use alloc::boxed::Box;
    use alloc::collections::BTreeMap;
    use alloc::string::{String, ToString};
    use alloc::vec;
    use alloc::vec::Vec;

    use super::BeanUtils;
    use crate::derive::Bean;
    use crate::dyna::{DynaBean, LazyDynaBean};
    use crate::{Bean, BeanConfig, BeanContext, ErrorKind};

    #[derive(Bean, Clone, Default, Debug, PartialEq)]
    struct Address {
        city: String,
    }

    #[derive(Bean, Clone, Default, Debug, PartialEq)]
    struct Person {
        name: String,
        age: u8,
        active: bool,
        nickname: Option<String>,
        address: Option<Address>,
        scores: Vec<i32>,
        #[bean(read_only)]
        id: u64,
    }

    fn entries(pairs: &[(&str, &'static str)]) -> Vec<(String, Box<dyn Bean>)> {
        pairs
            .iter()
            .map(|&(k, v)| (k.to_string(), Box::new(v) as Box<dyn Bean>))
            .collect()
    }

    #[test]
    fn assign_converts() {
        let utils = BeanUtils::default();
        let mut person = Person::default();

        utils.assign(&mut person, "age", Box::new("42")).unwrap();
        utils.assign(&mut person, "active", Box::new("yes")).unwrap();
        utils.assign(&mut person, "nickname", Box::new("Al")).unwrap();
        utils.assign(&mut person, "name", Box::new(7_u32)).unwrap();
        assert_eq!(person.age, 42);
        assert!(person.active);
        assert_eq!(person.nickname.as_deref(), Some("Al"));
        assert_eq!(person.name, "7");

        let texts: Vec<String> = vec!["1".into(), "-2".into()];
        utils.assign(&mut person, "scores", Box::new(texts)).unwrap();
        assert_eq!(person.scores, [1, -2]);
        utils.assign(&mut person, "scores[1]", Box::new("5")).unwrap();
        assert_eq!(person.scores, [1, 5]);

        let err = utils.assign(&mut person, "age", Box::new("old")).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ConversionFailure);
        let err = utils.assign(&mut person, "id", Box::new("1")).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnknownProperty);
    }

    #[test]
    fn populate_is_lenient() {
        let utils = BeanUtils::default();
        let mut person = Person::default();

        utils
            .populate(&mut person, entries(&[("unknown", "v"), ("name", "Eve"), ("id", "3")]))
            .unwrap();
        assert_eq!(person.name, "Eve");
        assert_eq!(person.id, 0);

        let err = utils.populate(&mut person, entries(&[("address.city", "Rome")])).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NestedNull);

        let err = utils.populate(&mut person, entries(&[("scores[3]", "1")])).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::IndexOutOfRange);

        let err = utils.populate(&mut person, entries(&[("age", "x")])).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ConversionFailure);

        let lenient = BeanContext::new().bean_utils_with(BeanConfig::new().lenient_conversion(true));
        lenient.populate(&mut person, entries(&[("age", "x"), ("active", "on")])).unwrap();
        assert!(person.active);
    }

    #[test]
    fn reads_as_text() {
        let utils = BeanUtils::default();
        let person = Person {
            age: 3,
            scores: vec![9, 8],
            address: Some(Address { city: "Rome".into() }),
            ..Default::default()
        };

        assert_eq!(utils.get_property(&person, "age").unwrap().as_deref(), Some("3"));
        assert_eq!(utils.get_property(&person, "scores").unwrap().as_deref(), Some("9"));
        assert_eq!(utils.get_property(&person, "nickname").unwrap(), None);
        assert_eq!(utils.get_property(&person, "address.city").unwrap().as_deref(), Some("Rome"));

        let described = utils.describe(&person).unwrap();
        assert_eq!(described.len(), 7);
        assert_eq!(described["active"].as_deref(), Some("false"));
        assert_eq!(described["nickname"], None);
        assert!(described["address"].as_deref().unwrap().contains("Rome"));
    }

    #[test]
    fn copy_between_kinds() {
        let utils = BeanUtils::default();
        let mut lazy = LazyDynaBean::new();
        lazy.set_simple("name", Box::new(String::from("Zed"))).unwrap();
        lazy.set_simple("age", Box::new("51")).unwrap();
        lazy.set_simple("height", Box::new(1.8_f64)).unwrap();

        let mut person = Person::default();
        utils.copy(&mut person, &lazy).unwrap();
        assert_eq!(person.name, "Zed");
        assert_eq!(person.age, 51);

        // `scores` has no text form.
        let mut map: BTreeMap<String, String> = BTreeMap::new();
        assert!(utils.copy(&mut map, &person).is_err());
        let lenient = BeanContext::new().bean_utils_with(BeanConfig::new().lenient_conversion(true));
        lenient.copy(&mut map, &person).unwrap();
        assert_eq!(map["age"], "51");
        assert_eq!(map["name"], "Zed");
        assert!(!map.contains_key("nickname"));

        let mut back = LazyDynaBean::new();
        utils.copy(&mut back, &person).unwrap();
        assert_eq!(back.get("age").unwrap().unwrap().downcast_ref::<u8>(), Some(&51));
    }

    #[test]
    fn clone_bean() {
        let utils = BeanUtils::default();
        let person = Person {
            name: "Kim".into(),
            ..Default::default()
        };
        let clone = utils.clone_bean(&person).unwrap();
        assert_eq!(clone.downcast_ref::<Person>(), Some(&person));
    }
}
