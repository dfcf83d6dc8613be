use proc_macro2::TokenStream;
use quote::{quote, quote_spanned};

use crate::derive_data::BeanStruct;

/// Generate implementation code for `Bean` trait.
pub(crate) fn impl_trait_bean(info: &BeanStruct) -> TokenStream {
    let vc_bean_path = info.vc_bean_path();

    let bean_ = crate::path::bean_(vc_bean_path);
    let typed_ = crate::path::typed_(vc_bean_path);
    let type_info_ = crate::path::type_info_(vc_bean_path);
    let bean_kind_ = crate::path::bean_kind_(vc_bean_path);
    let bean_ref_ = crate::path::bean_ref_(vc_bean_path);
    let bean_mut_ = crate::path::bean_mut_(vc_bean_path);
    let macro_exports_ = crate::path::macro_exports_(vc_bean_path);

    let clone_tokens = impl_bean_clone(info);
    let eq_tokens = impl_bean_partial_eq(info);
    let debug_tokens = impl_bean_debug(info);

    let ident = info.ident;
    let (impl_generics, ty_generics, _) = info.generics.split_for_impl();
    let where_clause = info.where_clause();

    quote! {
        impl #impl_generics #bean_ for #ident #ty_generics #where_clause {
            #[inline]
            fn bean_type_info(&self) -> #type_info_ {
                <Self as #typed_>::type_info()
            }

            #[inline]
            fn bean_kind(&self) -> #bean_kind_ {
                #bean_kind_::Struct
            }

            #[inline]
            fn bean_ref(&self) -> #bean_ref_<'_> {
                #bean_ref_::Struct(self)
            }

            #[inline]
            fn bean_mut(&mut self) -> #bean_mut_<'_> {
                #bean_mut_::Struct(self)
            }

            fn set(
                &mut self,
                value: #macro_exports_::Box<dyn #bean_>,
            ) -> #macro_exports_::Result<(), #macro_exports_::Box<dyn #bean_>> {
                *self = value.take::<Self>()?;
                #macro_exports_::Ok(())
            }

            #clone_tokens

            #eq_tokens

            #debug_tokens
        }
    }
}

fn impl_bean_clone(info: &BeanStruct) -> TokenStream {
    let vc_bean_path = info.vc_bean_path();
    let bean_ = crate::path::bean_(vc_bean_path);
    let macro_exports_ = crate::path::macro_exports_(vc_bean_path);

    let body = if let Some(span) = info.flags.clone {
        quote_spanned! { span =>
            #macro_exports_::Some(#macro_exports_::Box::new(<Self as ::core::clone::Clone>::clone(self)))
        }
    } else if !info.has_skipped() {
        let idents = info.fields.iter().map(|f| f.ident);
        quote! {
            #macro_exports_::Some(#macro_exports_::Box::new(Self {
                #(#idents: #macro_exports_::clone_field(&self.#idents)?,)*
            }))
        }
    } else if let Some(span) = info.flags.default {
        let idents = info.properties().map(|f| f.ident);
        let init = quote_spanned! { span =>
            <Self as #macro_exports_::Default>::default()
        };
        quote! {
            let mut value: Self = #init;
            #(value.#idents = #macro_exports_::clone_field(&self.#idents)?;)*
            #macro_exports_::Some(#macro_exports_::Box::new(value))
        }
    } else {
        quote! { #macro_exports_::None }
    };

    quote! {
        fn bean_clone(&self) -> #macro_exports_::Option<#macro_exports_::Box<dyn #bean_>> {
            #body
        }
    }
}

fn impl_bean_partial_eq(info: &BeanStruct) -> TokenStream {
    let vc_bean_path = info.vc_bean_path();
    let bean_ = crate::path::bean_(vc_bean_path);
    let impls_ = crate::path::impls_(vc_bean_path);
    let macro_exports_ = crate::path::macro_exports_(vc_bean_path);

    let body = match info.flags.partial_eq {
        Some(span) => quote_spanned! { span =>
            #macro_exports_::Some(
                other
                    .downcast_ref::<Self>()
                    .is_some_and(|other| <Self as ::core::cmp::PartialEq>::eq(self, other)),
            )
        },
        None => quote! { #impls_::struct_partial_eq(self, other) },
    };

    quote! {
        fn bean_partial_eq(&self, other: &dyn #bean_) -> #macro_exports_::Option<bool> {
            #body
        }
    }
}

fn impl_bean_debug(info: &BeanStruct) -> TokenStream {
    let vc_bean_path = info.vc_bean_path();
    let impls_ = crate::path::impls_(vc_bean_path);
    let macro_exports_ = crate::path::macro_exports_(vc_bean_path);

    let body = match info.flags.debug {
        Some(span) => quote_spanned! { span =>
            <Self as #macro_exports_::fmt::Debug>::fmt(self, f)
        },
        None => quote! { #impls_::struct_debug(self, f) },
    };

    quote! {
        fn bean_debug(&self, f: &mut #macro_exports_::fmt::Formatter<'_>) -> #macro_exports_::fmt::Result {
            #body
        }
    }
}
