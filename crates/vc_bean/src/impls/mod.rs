//! Bean implementations of common types, and helpers for implementing
//! [`Bean`](crate::Bean) by hand.
//!
//! ## Implemented Menu
//!
//! - scalars: `bool`, `char`, `i8`-`i128`, `u8`-`u128`, `isize`, `usize`,
//!   `f32`, `f64`, `String`, `&'static str`, [`Null`](crate::Null)
//! - lists: `Vec<T>`, `VecDeque<T>`
//! - arrays: `[T; N]`
//! - maps: `BTreeMap<String, V>`, `std::collections::HashMap<String, V, S>`,
//!   `hashbrown::HashMap<String, V, S>`
//! - `Option<T>`
//!
//! The `xxx_debug` and `xxx_partial_eq` functions implement
//! [`Bean::bean_debug`](crate::Bean::bean_debug) and
//! [`Bean::bean_partial_eq`](crate::Bean::bean_partial_eq) through the kind
//! views.

// -----------------------------------------------------------------------------
// Modules

mod array;
mod list;
mod map;
mod option;
mod scalar;
mod utils;

// -----------------------------------------------------------------------------
// Exports

pub use utils::*;
