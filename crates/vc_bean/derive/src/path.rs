//! Paths of the items referenced by generated code.
//!
//! The only special feature is the path of `vc_bean` itself,
//! see [`vc_bean`].

use proc_macro2::TokenStream;
use quote::quote;

/// Get the correct access path to the `vc_bean` crate.
///
/// Crates may depend on `vc_bean` directly or only on the `vc_beans`
/// facade, so the builder's `Cargo.toml` is scanned.
pub(crate) fn vc_bean() -> syn::Path {
    vc_macro_utils::Manifest::shared(|manifest| manifest.get_crate_path("vc_bean"))
}

#[inline(always)]
pub(crate) fn macro_exports_(vc_bean_path: &syn::Path) -> TokenStream {
    quote! { #vc_bean_path::__macro_exports }
}

#[inline(always)]
pub(crate) fn bean_(vc_bean_path: &syn::Path) -> TokenStream {
    quote! { #vc_bean_path::Bean }
}

#[inline(always)]
pub(crate) fn bean_ref_(vc_bean_path: &syn::Path) -> TokenStream {
    quote! { #vc_bean_path::BeanRef }
}

#[inline(always)]
pub(crate) fn bean_mut_(vc_bean_path: &syn::Path) -> TokenStream {
    quote! { #vc_bean_path::BeanMut }
}

#[inline(always)]
pub(crate) fn typed_(vc_bean_path: &syn::Path) -> TokenStream {
    quote! { #vc_bean_path::info::Typed }
}

#[inline(always)]
pub(crate) fn type_info_(vc_bean_path: &syn::Path) -> TokenStream {
    quote! { #vc_bean_path::info::TypeInfo }
}

#[inline(always)]
pub(crate) fn bean_kind_(vc_bean_path: &syn::Path) -> TokenStream {
    quote! { #vc_bean_path::info::BeanKind }
}

#[inline(always)]
pub(crate) fn bean_info_(vc_bean_path: &syn::Path) -> TokenStream {
    quote! { #vc_bean_path::info::BeanInfo }
}

#[inline(always)]
pub(crate) fn property_descriptor_(vc_bean_path: &syn::Path) -> TokenStream {
    quote! { #vc_bean_path::info::PropertyDescriptor }
}

#[inline(always)]
pub(crate) fn properties_(vc_bean_path: &syn::Path) -> TokenStream {
    quote! { #vc_bean_path::ops::Properties }
}

#[inline(always)]
pub(crate) fn impls_(vc_bean_path: &syn::Path) -> TokenStream {
    quote! { #vc_bean_path::impls }
}
