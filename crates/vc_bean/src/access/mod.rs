//! Property path parsing and resolution.
//!
//! A path is a `.` separated list of steps, each step a name with an optional
//! index (`phones[2]`) or key (`addresses(home)`) suffix:
//!
//! ```
//! use vc_bean::access::{AccessPath, PathAccessor};
//!
//! let path = PathAccessor::parse("employees[0].addresses(home).city").unwrap();
//! assert_eq!(path.len(), 3);
//!
//! assert!("employees[x]".parse_steps().any(|res| res.is_err()));
//! ```
//!
//! Resolution is driven by [`PropertyUtils`](crate::PropertyUtils) and
//! [`BeanUtils`](crate::BeanUtils).

// -----------------------------------------------------------------------------
// Modules

mod accessor;
mod path;
mod resolver;
mod step;

// -----------------------------------------------------------------------------
// Exports

pub use accessor::PathAccessor;
pub use path::{AccessPath, ParseError};
pub use step::{AccessStep, OffsetStep, Selector};

pub(crate) use resolver::{
    Resolver, readable, select, select_mut, store, store_select, unwrap_optional,
    unwrap_optional_mut, writeable,
};
