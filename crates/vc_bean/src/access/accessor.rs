//! Reusable, eagerly parsed paths.

use alloc::boxed::Box;
use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;

use crate::access::{AccessPath, AccessStep, OffsetStep, ParseError, Selector};

/// A parsed property path, a thin wrapper over `Box<[OffsetStep]>`.
///
/// Every entry point parses the complete path before touching its target,
/// so a malformed tail never leaves a target half-traversed. Parse once and
/// reuse the accessor when the same path is resolved repeatedly.
///
/// # Examples
///
/// ```
/// use vc_bean::access::PathAccessor;
///
/// let path = PathAccessor::parse("employees[2].address(home).city").unwrap();
/// assert_eq!(path.len(), 3);
/// assert!(path.has_nested());
/// assert_eq!(path.property_name(), Some("employees"));
/// assert_eq!(path.rest().to_string(), "address(home).city");
///
/// assert!(PathAccessor::parse("a[1").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PathAccessor(Box<[OffsetStep<'static>]>);

impl From<Box<[OffsetStep<'static>]>> for PathAccessor {
    #[inline]
    fn from(value: Box<[OffsetStep<'static>]>) -> Self {
        Self(value)
    }
}

impl FromIterator<AccessStep<'static>> for PathAccessor {
    fn from_iter<I: IntoIterator<Item = AccessStep<'static>>>(iter: I) -> Self {
        Self(iter.into_iter().map(OffsetStep::from).collect())
    }
}

impl<'a> AccessPath<'a> for &'a PathAccessor {
    #[inline]
    fn parse_steps(&self) -> impl Iterator<Item = Result<OffsetStep<'a>, ParseError>> {
        let this: &'a PathAccessor = self;
        this.0
            .iter()
            .map(|step| -> Result<OffsetStep<'a>, ParseError> { Ok(step.clone()) })
    }
}

impl PathAccessor {
    /// Parses the complete path.
    pub fn parse<'a>(path: impl AccessPath<'a>) -> Result<Self, ParseError> {
        let mut steps: Vec<OffsetStep<'static>> = Vec::new();
        for res in path.parse_steps() {
            steps.push(res?.into_owned());
        }
        Ok(Self(steps.into_boxed_slice()))
    }

    /// Number of steps, nameless ones included.
    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[inline]
    pub fn steps(&self) -> &[OffsetStep<'static>] {
        &self.0
    }

    /// The first step.
    #[inline]
    pub fn first(&self) -> Option<&AccessStep<'static>> {
        self.0.first().map(|s| &s.step)
    }

    /// Everything after the first step.
    #[inline]
    pub fn rest(&self) -> PathAccessor {
        Self(self.0.iter().skip(1).cloned().collect())
    }

    /// Returns `true` when the path has more than one step.
    #[inline]
    pub fn has_nested(&self) -> bool {
        self.0.len() > 1
    }

    /// Returns `true` when the first step is indexed, e.g. `a[1].b`.
    #[inline]
    pub fn is_indexed(&self) -> bool {
        self.first().is_some_and(AccessStep::is_indexed)
    }

    /// Returns `true` when the first step is mapped, e.g. `a(k).b`.
    #[inline]
    pub fn is_mapped(&self) -> bool {
        self.first().is_some_and(AccessStep::is_mapped)
    }

    /// The name of the first step.
    #[inline]
    pub fn property_name(&self) -> Option<&str> {
        self.first().and_then(AccessStep::name)
    }

    /// The index of the first step.
    #[inline]
    pub fn index(&self) -> Option<usize> {
        match self.first()?.selector {
            Selector::Index(index) => Some(index),
            _ => None,
        }
    }

    /// The key of the first step.
    #[inline]
    pub fn key(&self) -> Option<&str> {
        match &self.first()?.selector {
            Selector::Key(key) => Some(key),
            _ => None,
        }
    }

    /// Appends the steps of `other`.
    pub fn concat(&self, other: &PathAccessor) -> PathAccessor {
        Self(self.0.iter().chain(other.0.iter()).cloned().collect())
    }
}

/// Writes steps in canonical form, `.` only before named steps.
pub(crate) fn write_steps(f: &mut impl fmt::Write, steps: &[OffsetStep<'_>]) -> fmt::Result {
    for (index, step) in steps.iter().enumerate() {
        if index > 0 && step.step.name.is_some() {
            f.write_char('.')?;
        }
        write!(f, "{}", step.step)?;
    }
    Ok(())
}

/// The canonical text of `steps`.
pub(crate) fn steps_text(steps: &[OffsetStep<'_>]) -> String {
    let mut text = String::new();
    // Writing into a `String` cannot fail.
    let _ = write_steps(&mut text, steps);
    text
}

impl fmt::Display for PathAccessor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_steps(f, &self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::PathAccessor;
    use crate::access::{AccessStep, Selector};
    use alloc::string::ToString;

    #[test]
    fn canonical_text() {
        for text in ["a", "a.b", "a(b.c)[2].d", "grid[1][2]", "[0].name", "m()"] {
            assert_eq!(PathAccessor::parse(text).unwrap().to_string(), text);
        }
    }

    #[test]
    fn queries() {
        let path = PathAccessor::parse("phones[3].number").unwrap();
        assert!(path.is_indexed());
        assert!(!path.is_mapped());
        assert_eq!(path.index(), Some(3));
        assert_eq!(path.key(), None);

        let rest = path.rest();
        assert!(!rest.has_nested());
        assert_eq!(rest.first(), Some(&AccessStep::simple("number")));
        assert_eq!(path.rest().rest().len(), 0);
    }

    #[test]
    fn build_and_concat() {
        let head: PathAccessor = [AccessStep::mapped("addr", "home")].into_iter().collect();
        let tail: PathAccessor = [
            AccessStep::nameless(Selector::Index(0)),
            AccessStep::simple("city"),
        ]
        .into_iter()
        .collect();
        assert_eq!(head.concat(&tail).to_string(), "addr(home)[0].city");
    }
}
