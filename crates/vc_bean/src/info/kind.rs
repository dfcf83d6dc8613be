use core::fmt;

/// The capability a bean exposes to the path resolver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BeanKind {
    /// A conventional object with named, typed properties.
    Struct,
    /// A dynamic property container.
    Dynamic,
    /// A string keyed mapping.
    Map,
    /// A growable sequence.
    List,
    /// A fixed size sequence.
    Array,
    /// A value that may be absent.
    Optional,
    /// A leaf value.
    Scalar,
}

impl BeanKind {
    /// Returns `true` for [`List`](Self::List) and [`Array`](Self::Array).
    #[inline]
    pub const fn is_sequence(self) -> bool {
        matches!(self, Self::List | Self::Array)
    }

    /// Returns `true` for kinds a nameless step can select into.
    #[inline]
    pub const fn is_container(self) -> bool {
        matches!(self, Self::List | Self::Array | Self::Map)
    }
}

impl fmt::Display for BeanKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Struct => "struct",
            Self::Dynamic => "dynamic bean",
            Self::Map => "map",
            Self::List => "list",
            Self::Array => "array",
            Self::Optional => "optional",
            Self::Scalar => "scalar",
        })
    }
}
