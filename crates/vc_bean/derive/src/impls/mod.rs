// -----------------------------------------------------------------------------
// Modules

mod trait_bean;
mod trait_properties;
mod trait_typed;

// -----------------------------------------------------------------------------
// Entry

use proc_macro2::TokenStream;
use quote::quote;

use crate::derive_data::BeanStruct;

/// Generates `Typed`, `Bean` and `Properties` for a conventional bean.
pub(crate) fn impl_bean(info: &BeanStruct) -> TokenStream {
    let typed_tokens = trait_typed::impl_trait_typed(info);
    let bean_tokens = trait_bean::impl_trait_bean(info);
    let properties_tokens = trait_properties::impl_trait_properties(info);

    quote! {
        const _: () = {
            #typed_tokens

            #bean_tokens

            #properties_tokens
        };
    }
}
