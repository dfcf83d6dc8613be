//! Single step of a property path.

use alloc::borrow::Cow;
use core::fmt;

// -----------------------------------------------------------------------------
// Selector

/// The optional discriminator that follows a step's name.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Selector<'a> {
    /// No discriminator, e.g. `name`.
    None,
    /// An element position, e.g. the `2` of `phones[2]`.
    Index(usize),
    /// A string key, e.g. the `home` of `addresses(home)`.
    Key(Cow<'a, str>),
}

impl Selector<'_> {
    /// Converts this into an "owned" value.
    #[inline]
    pub fn into_owned(self) -> Selector<'static> {
        match self {
            Self::None => Selector::None,
            Self::Index(index) => Selector::Index(index),
            Self::Key(key) => Selector::Key(Cow::Owned(key.into_owned())),
        }
    }
}

impl fmt::Display for Selector<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::None => Ok(()),
            Self::Index(index) => write!(f, "[{index}]"),
            Self::Key(key) => write!(f, "({key})"),
        }
    }
}

// -----------------------------------------------------------------------------
// AccessStep

/// One step of a property path: an optional name plus a [`Selector`].
///
/// A step without a name operates directly on the value produced by the
/// previous step. It appears when a segment carries more than one suffix,
/// e.g. `matrix[1][2]` parses into `matrix[1]` followed by the nameless `[2]`.
///
/// # Examples
///
/// ```
/// use vc_bean::access::{AccessStep, Selector};
///
/// let step = AccessStep::indexed("phones", 2);
/// assert_eq!(step.to_string(), "phones[2]");
/// assert_eq!(step.selector, Selector::Index(2));
///
/// let step = AccessStep::nameless(Selector::Key("home".into()));
/// assert_eq!(step.to_string(), "(home)");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct AccessStep<'a> {
    pub name: Option<Cow<'a, str>>,
    pub selector: Selector<'a>,
}

impl<'a> AccessStep<'a> {
    /// A plain `name` step.
    #[inline]
    pub fn simple(name: impl Into<Cow<'a, str>>) -> Self {
        Self {
            name: Some(name.into()),
            selector: Selector::None,
        }
    }

    /// A `name[index]` step.
    #[inline]
    pub fn indexed(name: impl Into<Cow<'a, str>>, index: usize) -> Self {
        Self {
            name: Some(name.into()),
            selector: Selector::Index(index),
        }
    }

    /// A `name(key)` step.
    #[inline]
    pub fn mapped(name: impl Into<Cow<'a, str>>, key: impl Into<Cow<'a, str>>) -> Self {
        Self {
            name: Some(name.into()),
            selector: Selector::Key(key.into()),
        }
    }

    /// A step applying `selector` to the previous value.
    #[inline]
    pub const fn nameless(selector: Selector<'a>) -> Self {
        Self {
            name: None,
            selector,
        }
    }

    #[inline]
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    #[inline]
    pub fn is_indexed(&self) -> bool {
        matches!(self.selector, Selector::Index(_))
    }

    #[inline]
    pub fn is_mapped(&self) -> bool {
        matches!(self.selector, Selector::Key(_))
    }

    /// Converts this into an "owned" value.
    #[inline]
    pub fn into_owned(self) -> AccessStep<'static> {
        AccessStep {
            name: self.name.map(|name| Cow::Owned(name.into_owned())),
            selector: self.selector.into_owned(),
        }
    }
}

impl fmt::Display for AccessStep<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(name) = &self.name {
            f.write_str(name)?;
        }
        fmt::Display::fmt(&self.selector, f)
    }
}

// -----------------------------------------------------------------------------
// OffsetStep

/// An [`AccessStep`] together with its byte offset in the path text.
///
/// The offset only serves error messages.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct OffsetStep<'a> {
    pub step: AccessStep<'a>,
    pub offset: usize,
}

impl<'a> From<AccessStep<'a>> for OffsetStep<'a> {
    #[inline]
    fn from(step: AccessStep<'a>) -> Self {
        Self { step, offset: 0 }
    }
}

impl OffsetStep<'_> {
    /// Converts this into an "owned" value.
    #[inline]
    pub fn into_owned(self) -> OffsetStep<'static> {
        OffsetStep {
            step: self.step.into_owned(),
            offset: self.offset,
        }
    }
}
