use alloc::boxed::Box;
use alloc::vec::Vec;
use core::fmt;

use crate::access::{AccessPath, ParseError, PathAccessor};
use crate::{Bean, ErrorKind, Null, PropertyError, PropertyUtils};

/// Tests whether the value at a property path equals an expected value.
///
/// Equality is [`Bean::bean_partial_eq`]; an expected [`Null`] matches a
/// null value. With [`ignore_null`](Self::ignore_null), a path that breaks
/// on a null evaluates to `false` instead of failing.
///
/// # Examples
///
/// ```
/// use vc_bean::adapters::PropertyValueEquals;
/// use vc_bean::derive::Bean;
///
/// #[derive(Bean, Clone)]
/// struct Team { name: String }
///
/// #[derive(Bean, Clone)]
/// struct Player { team: Option<Team> }
///
/// let players = [
///     Player { team: Some(Team { name: "red".into() }) },
///     Player { team: None },
///     Player { team: Some(Team { name: "blue".into() }) },
/// ];
///
/// let is_red = PropertyValueEquals::new("team.name", Box::new(String::from("red"))).unwrap();
/// assert!(is_red.filter(&players).is_err());
///
/// let is_red = is_red.ignore_null(true);
/// assert_eq!(is_red.filter(&players).unwrap().len(), 1);
/// ```
pub struct PropertyValueEquals {
    utils: PropertyUtils,
    path: PathAccessor,
    expected: Box<dyn Bean>,
    ignore_null: bool,
}

impl PropertyValueEquals {
    pub fn new<'a>(path: impl AccessPath<'a>, expected: Box<dyn Bean>) -> Result<Self, ParseError> {
        Ok(Self::with_utils(PropertyUtils::default(), PathAccessor::parse(path)?, expected))
    }

    #[inline]
    pub fn with_utils(utils: PropertyUtils, path: PathAccessor, expected: Box<dyn Bean>) -> Self {
        Self {
            utils,
            path,
            expected,
            ignore_null: false,
        }
    }

    #[inline]
    pub fn ignore_null(mut self, ignore: bool) -> Self {
        self.ignore_null = ignore;
        self
    }

    #[inline]
    pub fn path(&self) -> &PathAccessor {
        &self.path
    }

    #[inline]
    pub fn expected(&self) -> &dyn Bean {
        &*self.expected
    }

    /// Evaluates the predicate on `bean`.
    pub fn test(&self, bean: &dyn Bean) -> Result<bool, PropertyError> {
        let actual = match self.utils.get_property(bean, &self.path) {
            Ok(actual) => actual,
            Err(e) if self.ignore_null && e.kind() == ErrorKind::NestedNull => return Ok(false),
            Err(e) => return Err(e),
        };
        Ok(match actual {
            None => self.expected.is::<Null>(),
            Some(actual) => self.expected.bean_partial_eq(actual).unwrap_or(false),
        })
    }

    /// The beans of `beans` for which the predicate holds.
    pub fn filter<'b, T: Bean>(&self, beans: &'b [T]) -> Result<Vec<&'b T>, PropertyError> {
        let mut result = Vec::new();
        for bean in beans {
            if self.test(bean)? {
                result.push(bean);
            }
        }
        Ok(result)
    }
}

impl fmt::Debug for PropertyValueEquals {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PropertyValueEquals")
            .field("path", &self.path)
            .field("expected", &self.expected)
            .field("ignore_null", &self.ignore_null)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use alloc::boxed::Box;
    use alloc::string::String;

    use super::PropertyValueEquals;
    use crate::Null;
    use crate::derive::Bean;

    #[derive(Bean, Clone)]
    struct Item {
        sku: String,
        note: Option<String>,
    }

    #[test]
    fn matches_values_and_nulls() {
        let item = Item {
            sku: "A-1".into(),
            note: None,
        };

        let by_sku = PropertyValueEquals::new("sku", Box::new(String::from("A-1"))).unwrap();
        assert!(by_sku.test(&item).unwrap());

        let other_type = PropertyValueEquals::new("sku", Box::new("A-1")).unwrap();
        assert!(!other_type.test(&item).unwrap());

        let no_note = PropertyValueEquals::new("note", Box::new(Null)).unwrap();
        assert!(no_note.test(&item).unwrap());
        assert!(PropertyValueEquals::new("missing", Box::new(Null)).unwrap().test(&item).is_err());
    }
}
