use alloc::boxed::Box;
use alloc::string::{String, ToString};
use core::cmp::Ordering;
use core::fmt;

use crate::Bean;
use crate::bean::impl_bean_cast_fn;
use crate::info::{BeanKind, TypeInfo, Typed};

macro_rules! impl_scalar_bean {
    ($($ty:ty),* $(,)?) => {$(
        impl Typed for $ty {
            fn type_info() -> TypeInfo {
                TypeInfo::new::<Self>(BeanKind::Scalar)
                    .with_default(|| Box::new(<$ty as Default>::default()))
            }
        }

        impl Bean for $ty {
            impl_bean_cast_fn!(Scalar);

            #[inline]
            fn bean_type_info(&self) -> TypeInfo {
                <Self as Typed>::type_info()
            }

            #[inline]
            fn set(&mut self, value: Box<dyn Bean>) -> Result<(), Box<dyn Bean>> {
                *self = value.take::<Self>()?;
                Ok(())
            }

            #[inline]
            fn bean_clone(&self) -> Option<Box<dyn Bean>> {
                Some(Box::new(Clone::clone(self)))
            }

            #[inline]
            fn bean_partial_eq(&self, other: &dyn Bean) -> Option<bool> {
                Some(other.downcast_ref::<Self>().is_some_and(|other| PartialEq::eq(self, other)))
            }

            #[inline]
            fn bean_partial_cmp(&self, other: &dyn Bean) -> Option<Ordering> {
                PartialOrd::partial_cmp(self, other.downcast_ref::<Self>()?)
            }

            #[inline]
            fn bean_debug(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                fmt::Debug::fmt(self, f)
            }

            #[inline]
            fn to_text(&self) -> Option<String> {
                Some(ToString::to_string(self))
            }

            #[inline]
            fn as_serialize(&self) -> Option<&dyn erased_serde::Serialize> {
                Some(self)
            }
        }
    )*};
}

impl_scalar_bean!(
    bool, char,
    u8, u16, u32, u64, u128, usize,
    i8, i16, i32, i64, i128, isize,
    f32, f64,
    String, &'static str,
);

#[cfg(test)]
mod tests {
    use crate::Bean;
    use crate::info::{BeanKind, Typed};
    use alloc::boxed::Box;
    use alloc::string::String;
    use core::cmp::Ordering;

    #[test]
    fn set_is_type_checked() {
        let mut name = String::from("a");
        assert!(name.set(Box::new(String::from("b"))).is_ok());
        let back = name.set(Box::new(1_u8)).unwrap_err();
        assert!(back.is::<u8>());
        assert_eq!(name, "b");
    }

    #[test]
    fn compare_and_text() {
        let x: &dyn Bean = &3_i32;
        assert_eq!(x.bean_partial_eq(&3_i32), Some(true));
        assert_eq!(x.bean_partial_eq(&3_i64), Some(false));
        assert_eq!(x.bean_partial_cmp(&4_i32), Some(Ordering::Less));
        assert_eq!(x.bean_partial_cmp(&4_i64), None);
        assert_eq!(x.to_text().as_deref(), Some("3"));
        assert_eq!(2.5_f64.to_text().as_deref(), Some("2.5"));
    }

    #[test]
    fn defaults() {
        let info = <u16 as Typed>::type_info();
        assert_eq!(info.kind(), BeanKind::Scalar);
        let value = info.create_default().unwrap();
        assert_eq!(value.downcast_ref::<u16>(), Some(&0));
    }
}
