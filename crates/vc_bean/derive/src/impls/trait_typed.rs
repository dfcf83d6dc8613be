use proc_macro2::TokenStream;
use quote::{quote, quote_spanned};

use crate::derive_data::BeanStruct;

/// Generate implementation code for `Typed` trait.
pub(crate) fn impl_trait_typed(info: &BeanStruct) -> TokenStream {
    let vc_bean_path = info.vc_bean_path();

    let typed_ = crate::path::typed_(vc_bean_path);
    let type_info_ = crate::path::type_info_(vc_bean_path);
    let bean_kind_ = crate::path::bean_kind_(vc_bean_path);
    let macro_exports_ = crate::path::macro_exports_(vc_bean_path);

    let with_default = match info.flags.default {
        Some(span) => quote_spanned! { span =>
            .with_default(|| #macro_exports_::Box::new(<Self as #macro_exports_::Default>::default()))
        },
        None => TokenStream::new(),
    };

    let ident = info.ident;
    let (impl_generics, ty_generics, _) = info.generics.split_for_impl();
    let where_clause = info.where_clause();

    quote! {
        impl #impl_generics #typed_ for #ident #ty_generics #where_clause {
            fn type_info() -> #type_info_ {
                #type_info_::new::<Self>(#bean_kind_::Struct) #with_default
            }
        }
    }
}
