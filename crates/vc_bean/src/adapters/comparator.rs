use core::cmp::Ordering;

use crate::access::{AccessPath, ParseError, PathAccessor};
use crate::{Bean, PropertyError, PropertyUtils};

/// Orders beans by the value at a property path.
///
/// Values are compared with [`Bean::bean_partial_cmp`]. A null value sorts
/// before every other value, also in [reversed](Self::reversed) order.
///
/// # Examples
///
/// ```
/// use vc_bean::adapters::BeanComparator;
/// use vc_bean::derive::Bean;
///
/// #[derive(Bean, Clone, Debug)]
/// struct Task { title: String, priority: Option<u8> }
///
/// let task = |title: &str, priority| Task { title: title.into(), priority };
/// let mut tasks = vec![task("b", Some(2)), task("a", None), task("c", Some(1))];
///
/// BeanComparator::new("priority").unwrap().sort(&mut tasks).unwrap();
/// let titles: Vec<_> = tasks.iter().map(|t| t.title.as_str()).collect();
/// assert_eq!(titles, ["a", "c", "b"]);
///
/// BeanComparator::new("priority").unwrap().reversed().sort(&mut tasks).unwrap();
/// let titles: Vec<_> = tasks.iter().map(|t| t.title.as_str()).collect();
/// assert_eq!(titles, ["a", "b", "c"]);
/// ```
#[derive(Clone, Debug)]
pub struct BeanComparator {
    utils: PropertyUtils,
    path: PathAccessor,
    reversed: bool,
}

impl BeanComparator {
    /// Ascending order of the value at `path`.
    pub fn new<'a>(path: impl AccessPath<'a>) -> Result<Self, ParseError> {
        Ok(Self::with_utils(PropertyUtils::default(), PathAccessor::parse(path)?))
    }

    #[inline]
    pub fn with_utils(utils: PropertyUtils, path: PathAccessor) -> Self {
        Self {
            utils,
            path,
            reversed: false,
        }
    }

    /// Flips the order of non-null values.
    #[inline]
    pub fn reversed(mut self) -> Self {
        self.reversed = !self.reversed;
        self
    }

    #[inline]
    pub fn path(&self) -> &PathAccessor {
        &self.path
    }

    /// Compares the values at the path of `a` and `b`.
    ///
    /// Fails when a path cannot be resolved or the values are not
    /// comparable.
    pub fn compare(&self, a: &dyn Bean, b: &dyn Bean) -> Result<Ordering, PropertyError> {
        let x = self.utils.get_property(a, &self.path)?;
        let y = self.utils.get_property(b, &self.path)?;
        Ok(match (x, y) {
            (None, None) => Ordering::Equal,
            (None, Some(_)) => Ordering::Less,
            (Some(_), None) => Ordering::Greater,
            (Some(x), Some(y)) => {
                let ordering = x
                    .bean_partial_cmp(y)
                    .ok_or_else(|| PropertyError::unsupported("comparison", x.type_path()))?;
                if self.reversed {
                    ordering.reverse()
                } else {
                    ordering
                }
            }
        })
    }

    /// Stable sort of `beans`.
    ///
    /// On failure the slice is left in an unspecified order and the first
    /// error is returned.
    pub fn sort<T: Bean>(&self, beans: &mut [T]) -> Result<(), PropertyError> {
        let mut error = None;
        beans.sort_by(|a, b| match self.compare(a, b) {
            Ok(ordering) => ordering,
            Err(e) => {
                error.get_or_insert(e);
                Ordering::Equal
            }
        });
        error.map_or(Ok(()), Err)
    }
}

#[cfg(test)]
mod tests {
    use alloc::string::String;
    use alloc::vec;
    use alloc::vec::Vec;
    use core::cmp::Ordering;

    use super::BeanComparator;
    use crate::ErrorKind;
    use crate::derive::Bean;

    #[derive(Bean, Clone, Debug)]
    struct Point {
        x: f64,
        label: Option<String>,
    }

    #[test]
    fn compare_values() {
        let a = Point { x: 1.0, label: None };
        let b = Point {
            x: 2.0,
            label: Some("b".into()),
        };

        let by_x = BeanComparator::new("x").unwrap();
        assert_eq!(by_x.compare(&a, &b).unwrap(), Ordering::Less);
        assert_eq!(by_x.clone().reversed().compare(&a, &b).unwrap(), Ordering::Greater);

        let by_label = BeanComparator::new("label").unwrap();
        assert_eq!(by_label.compare(&a, &b).unwrap(), Ordering::Less);
        assert_eq!(by_label.compare(&a, &a).unwrap(), Ordering::Equal);
    }

    #[test]
    fn nulls_first_when_reversed() {
        let point = |x, label: Option<&str>| Point {
            x,
            label: label.map(String::from),
        };
        let mut points = vec![point(1.0, Some("a")), point(2.0, None), point(3.0, Some("c"))];

        let by_label = BeanComparator::new("label").unwrap().reversed();
        assert_eq!(by_label.compare(&points[1], &points[0]).unwrap(), Ordering::Less);
        assert_eq!(by_label.compare(&points[1], &points[1]).unwrap(), Ordering::Equal);

        by_label.sort(&mut points).unwrap();
        let xs: Vec<f64> = points.iter().map(|p| p.x).collect();
        assert_eq!(xs, [2.0, 3.0, 1.0]);
    }

    #[test]
    fn incomparable() {
        let nan = Point {
            x: f64::NAN,
            label: None,
        };
        let by_x = BeanComparator::new("x").unwrap();
        let err = by_x.compare(&nan, &nan).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnsupportedOperation);

        let mut points = vec![nan.clone(), nan];
        assert!(by_x.sort(&mut points).is_err());

        let err = BeanComparator::new("y").unwrap().compare(&points[0], &points[1]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnknownProperty);
    }
}
