use alloc::string::String;
use alloc::vec::Vec;

use crate::access::{AccessPath, ParseError, PathAccessor};
use crate::{Bean, BeanUtils, ErrorKind, PropertyError};

/// Maps beans to the text form of the value at a property path.
///
/// # Examples
///
/// ```
/// use vc_bean::adapters::PropertyTransformer;
/// use vc_bean::derive::Bean;
///
/// #[derive(Bean, Clone)]
/// struct Order { id: u32, total: f32 }
///
/// let orders = [Order { id: 1, total: 9.5 }, Order { id: 2, total: 12.0 }];
/// let ids = PropertyTransformer::new("id").unwrap().transform_all(&orders).unwrap();
/// assert_eq!(ids, [Some("1".to_string()), Some("2".to_string())]);
/// ```
#[derive(Clone, Debug)]
pub struct PropertyTransformer {
    utils: BeanUtils,
    path: PathAccessor,
    ignore_null: bool,
}

impl PropertyTransformer {
    pub fn new<'a>(path: impl AccessPath<'a>) -> Result<Self, ParseError> {
        Ok(Self::with_utils(BeanUtils::default(), PathAccessor::parse(path)?))
    }

    #[inline]
    pub fn with_utils(utils: BeanUtils, path: PathAccessor) -> Self {
        Self {
            utils,
            path,
            ignore_null: false,
        }
    }

    /// When set, a path that breaks on a null yields `None` instead of
    /// failing.
    #[inline]
    pub fn ignore_null(mut self, ignore: bool) -> Self {
        self.ignore_null = ignore;
        self
    }

    #[inline]
    pub fn path(&self) -> &PathAccessor {
        &self.path
    }

    pub fn transform(&self, bean: &dyn Bean) -> Result<Option<String>, PropertyError> {
        match self.utils.get_property(bean, &self.path) {
            Err(e) if self.ignore_null && e.kind() == ErrorKind::NestedNull => Ok(None),
            res => res,
        }
    }

    pub fn transform_all<T: Bean>(&self, beans: &[T]) -> Result<Vec<Option<String>>, PropertyError> {
        beans.iter().map(|bean| self.transform(bean)).collect()
    }
}

#[cfg(test)]
mod tests {
    use alloc::string::String;
    use alloc::vec;

    use super::PropertyTransformer;
    use crate::ErrorKind;
    use crate::derive::Bean;

    #[derive(Bean, Clone)]
    struct Owner {
        name: String,
    }

    #[derive(Bean, Clone)]
    struct Pet {
        owner: Option<Owner>,
    }

    #[test]
    fn nested_nulls() {
        let pets = vec![
            Pet {
                owner: Some(Owner { name: "Sam".into() }),
            },
            Pet { owner: None },
        ];

        let strict = PropertyTransformer::new("owner.name").unwrap();
        let err = strict.transform_all(&pets).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NestedNull);

        let names = strict.ignore_null(true).transform_all(&pets).unwrap();
        assert_eq!(names, [Some(String::from("Sam")), None]);
    }
}
