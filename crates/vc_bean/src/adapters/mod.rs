//! Small functional adapters over property paths.
//!
//! ## Menu
//!
//! - [`BeanComparator`]: orders beans by the value at a path.
//! - [`PropertyValueEquals`]: tests the value at a path against a value.
//! - [`PropertyTransformer`]: maps beans to the text at a path.

// -----------------------------------------------------------------------------
// Modules

mod comparator;
mod predicate;
mod transformer;

// -----------------------------------------------------------------------------
// Exports

pub use comparator::BeanComparator;
pub use predicate::PropertyValueEquals;
pub use transformer::PropertyTransformer;
