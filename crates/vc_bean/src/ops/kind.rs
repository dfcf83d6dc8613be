use crate::Bean;
use crate::dyna::DynaBean;
use crate::info::BeanKind;
use crate::ops::{Array, List, Optional, Properties, PropertyMap};

/// An immutable view of a bean, by capability.
pub enum BeanRef<'a> {
    Struct(&'a dyn Properties),
    Dynamic(&'a dyn DynaBean),
    Map(&'a dyn PropertyMap),
    List(&'a dyn List),
    Array(&'a dyn Array),
    Optional(&'a dyn Optional),
    Scalar(&'a dyn Bean),
}

/// A mutable view of a bean, by capability.
pub enum BeanMut<'a> {
    Struct(&'a mut dyn Properties),
    Dynamic(&'a mut dyn DynaBean),
    Map(&'a mut dyn PropertyMap),
    List(&'a mut dyn List),
    Array(&'a mut dyn Array),
    Optional(&'a mut dyn Optional),
    Scalar(&'a mut dyn Bean),
}

impl<'a> BeanRef<'a> {
    #[inline]
    pub fn kind(&self) -> BeanKind {
        match self {
            Self::Struct(_) => BeanKind::Struct,
            Self::Dynamic(_) => BeanKind::Dynamic,
            Self::Map(_) => BeanKind::Map,
            Self::List(_) => BeanKind::List,
            Self::Array(_) => BeanKind::Array,
            Self::Optional(_) => BeanKind::Optional,
            Self::Scalar(_) => BeanKind::Scalar,
        }
    }

    /// Returns the view as a plain `&dyn Bean`.
    #[inline]
    pub fn as_bean(self) -> &'a dyn Bean {
        match self {
            Self::Struct(v) => v,
            Self::Dynamic(v) => v,
            Self::Map(v) => v,
            Self::List(v) => v,
            Self::Array(v) => v,
            Self::Optional(v) => v,
            Self::Scalar(v) => v,
        }
    }
}

impl<'a> BeanMut<'a> {
    #[inline]
    pub fn kind(&self) -> BeanKind {
        match self {
            Self::Struct(_) => BeanKind::Struct,
            Self::Dynamic(_) => BeanKind::Dynamic,
            Self::Map(_) => BeanKind::Map,
            Self::List(_) => BeanKind::List,
            Self::Array(_) => BeanKind::Array,
            Self::Optional(_) => BeanKind::Optional,
            Self::Scalar(_) => BeanKind::Scalar,
        }
    }

    /// Returns the view as a plain `&mut dyn Bean`.
    #[inline]
    pub fn as_bean(self) -> &'a mut dyn Bean {
        match self {
            Self::Struct(v) => v,
            Self::Dynamic(v) => v,
            Self::Map(v) => v,
            Self::List(v) => v,
            Self::Array(v) => v,
            Self::Optional(v) => v,
            Self::Scalar(v) => v,
        }
    }
}
