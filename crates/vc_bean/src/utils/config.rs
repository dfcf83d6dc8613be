/// Options of a [`BeanUtils`](crate::BeanUtils).
///
/// # Examples
///
/// ```
/// use vc_bean::{Bean, BeanConfig, BeanContext};
/// use vc_bean::derive::Bean;
///
/// #[derive(Bean, Clone, Default)]
/// struct Limits { retries: u8, timeout: u32 }
///
/// fn input() -> Vec<(&'static str, Box<dyn Bean>)> {
///     vec![
///         ("retries", Box::new("many") as Box<dyn Bean>),
///         ("timeout", Box::new("30") as Box<dyn Bean>),
///     ]
/// }
///
/// let context = BeanContext::new();
/// let strict = context.bean_utils();
/// let lenient = context.bean_utils_with(BeanConfig::new().lenient_conversion(true));
///
/// let mut limits = Limits::default();
/// assert!(strict.populate(&mut limits, input()).is_err());
///
/// let mut limits = Limits::default();
/// lenient.populate(&mut limits, input()).unwrap();
/// assert_eq!((limits.retries, limits.timeout), (0, 30));
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct BeanConfig {
    lenient_conversion: bool,
}

impl BeanConfig {
    /// The strict configuration.
    #[inline]
    pub const fn new() -> Self {
        Self {
            lenient_conversion: false,
        }
    }

    /// When set, the bulk operations skip entries whose value cannot be
    /// converted instead of failing.
    #[inline]
    pub const fn lenient_conversion(mut self, lenient: bool) -> Self {
        self.lenient_conversion = lenient;
        self
    }

    #[inline]
    pub const fn is_lenient_conversion(&self) -> bool {
        self.lenient_conversion
    }
}
