//! See [`Bean`].
#![cfg_attr(docsrs, feature(doc_cfg))]
#![allow(clippy::std_instead_of_core, reason = "proc-macro lib")]
#![allow(clippy::std_instead_of_alloc, reason = "proc-macro lib")]

use proc_macro::TokenStream;
use syn::{DeriveInput, parse_macro_input};

static BEAN_ATTRIBUTE_NAME: &str = "bean";

// -----------------------------------------------------------------------------
// Modules

mod derive_data;
mod impls;
mod path;

// -----------------------------------------------------------------------------
// Macros

/// # Conventional Bean Derivation
///
/// `#[derive(Bean)]` turns a struct with named fields into a conventional
/// bean, implementing:
///
/// - `Typed`
/// - `Bean`
/// - `Properties`
///
/// Every field becomes a readable and writeable property of the same name.
/// Field types must implement `Bean` and `Typed`; type parameters receive
/// these bounds automatically.
///
/// ## Field Attributes
///
/// ```rust, ignore
/// #[derive(Bean)]
/// struct User {
///     #[bean(rename = "userName")]
///     name: String,
///     #[bean(read_only)]
///     id: u64,
///     #[bean(write_only)]
///     password: String,
///     #[bean(skip)]
///     session: Session, // no `Bean` bound required
/// }
/// ```
///
/// - `rename = "..."`: the property name.
/// - `read_only` / `write_only`: access direction checked by the path
///   resolver. The fields stay reachable through `Properties` itself.
/// - `skip`: the field is not a property.
///
/// ## Type Attributes
///
/// The macro cannot detect standard trait implementations. Declare them so
/// that the generated code can use them:
///
/// ```rust, ignore
/// #[derive(Bean, Clone, Default, PartialEq, Debug)]
/// #[bean(clone, default, partial_eq, debug)]
/// struct Point { x: i32, y: i32 }
/// ```
///
/// - `clone`: `bean_clone` uses `Clone`. Otherwise properties are cloned one
///   by one, which needs `default` when fields are skipped.
/// - `default`: the type info carries a default constructor, so that
///   missing values can be created, e.g. inside a `LazyDynaBean` list.
/// - `partial_eq`: `bean_partial_eq` uses `PartialEq`. Otherwise properties
///   are compared one by one.
/// - `debug`: `bean_debug` uses `Debug`. Otherwise properties are listed.
///
/// Only structs with named fields are supported.
#[proc_macro_derive(Bean, attributes(bean))]
pub fn derive_bean(input: TokenStream) -> TokenStream {
    let ast = parse_macro_input!(input as DeriveInput);

    match derive_data::BeanStruct::from_ast(&ast) {
        Ok(info) => impls::impl_bean(&info).into(),
        Err(err) => err.into_compile_error().into(),
    }
}
