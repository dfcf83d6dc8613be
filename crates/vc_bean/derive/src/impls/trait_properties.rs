use proc_macro2::TokenStream;
use quote::quote;

use crate::derive_data::BeanStruct;

/// Generate implementation code for `Properties` trait.
pub(crate) fn impl_trait_properties(info: &BeanStruct) -> TokenStream {
    let vc_bean_path = info.vc_bean_path();

    let bean_ = crate::path::bean_(vc_bean_path);
    let properties_ = crate::path::properties_(vc_bean_path);
    let bean_info_ = crate::path::bean_info_(vc_bean_path);
    let descriptor_ = crate::path::property_descriptor_(vc_bean_path);
    let macro_exports_ = crate::path::macro_exports_(vc_bean_path);

    let descriptors = info.properties().map(|field| {
        let ty = field.ty;
        let name = &field.name;
        let read_only = field.read_only.then(|| quote! { .read_only() });
        let write_only = field.write_only.then(|| quote! { .write_only() });
        quote! { #descriptor_::new::<#ty>(#name) #read_only #write_only }
    });
    let len = info.properties().count();

    let names: Vec<_> = info.properties().map(|f| &f.name).collect();
    let idents: Vec<_> = info.properties().map(|f| f.ident).collect();

    let ident = info.ident;
    let (impl_generics, ty_generics, _) = info.generics.split_for_impl();
    let where_clause = info.where_clause();

    quote! {
        impl #impl_generics #properties_ for #ident #ty_generics #where_clause {
            fn bean_info(&self) -> #bean_info_ {
                let descriptors: [#descriptor_; #len] = [#(#descriptors,)*];
                #bean_info_::new::<Self>(descriptors)
            }

            fn property(&self, name: &str) -> #macro_exports_::Option<&dyn #bean_> {
                match name {
                    #(#names => #macro_exports_::Some(&self.#idents as &dyn #bean_),)*
                    _ => #macro_exports_::None,
                }
            }

            fn property_mut(&mut self, name: &str) -> #macro_exports_::Option<&mut dyn #bean_> {
                match name {
                    #(#names => #macro_exports_::Some(&mut self.#idents as &mut dyn #bean_),)*
                    _ => #macro_exports_::None,
                }
            }
        }
    }
}
