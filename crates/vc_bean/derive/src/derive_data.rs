use proc_macro2::{Span, TokenStream};
use quote::{ToTokens, quote};
use syn::{Data, DeriveInput, Fields, Generics, Ident, LitStr, Type};

use crate::BEAN_ATTRIBUTE_NAME;

// -----------------------------------------------------------------------------
// Type attributes

/// The standard traits declared through `#[bean(...)]` on the type.
///
/// The span is kept so that generated code points at the declaration.
#[derive(Default, Debug)]
pub(crate) struct TraitAvailableFlags {
    pub clone: Option<Span>,
    pub default: Option<Span>,
    pub partial_eq: Option<Span>,
    pub debug: Option<Span>,
}

impl TraitAvailableFlags {
    fn parse(attrs: &[syn::Attribute]) -> syn::Result<Self> {
        let mut flags = Self::default();

        for attr in attrs.iter().filter(|a| a.path().is_ident(BEAN_ATTRIBUTE_NAME)) {
            attr.parse_nested_meta(|meta| {
                let span = Some(meta.path.require_ident()?.span());
                let slot = if meta.path.is_ident("clone") {
                    &mut flags.clone
                } else if meta.path.is_ident("default") {
                    &mut flags.default
                } else if meta.path.is_ident("partial_eq") {
                    &mut flags.partial_eq
                } else if meta.path.is_ident("debug") {
                    &mut flags.debug
                } else {
                    return Err(meta.error(
                        "unknown type attribute, expected `clone`, `default`, `partial_eq` or `debug`",
                    ));
                };
                if slot.is_some() {
                    return Err(meta.error("duplicate type attribute"));
                }
                *slot = span;
                Ok(())
            })?;
        }

        Ok(flags)
    }
}

// -----------------------------------------------------------------------------
// Field attributes

#[derive(Default)]
struct FieldAttributes {
    skip: bool,
    rename: Option<LitStr>,
    read_only: bool,
    write_only: bool,
}

impl FieldAttributes {
    fn parse(attrs: &[syn::Attribute]) -> syn::Result<Self> {
        let mut this = Self::default();

        for attr in attrs.iter().filter(|a| a.path().is_ident(BEAN_ATTRIBUTE_NAME)) {
            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("skip") {
                    this.skip = true;
                } else if meta.path.is_ident("read_only") {
                    this.read_only = true;
                } else if meta.path.is_ident("write_only") {
                    this.write_only = true;
                } else if meta.path.is_ident("rename") {
                    let name: LitStr = meta.value()?.parse()?;
                    if name.value().is_empty() {
                        return Err(syn::Error::new(name.span(), "property name cannot be empty"));
                    }
                    this.rename = Some(name);
                } else {
                    return Err(meta.error(
                        "unknown field attribute, expected `skip`, `rename`, `read_only` or `write_only`",
                    ));
                }
                Ok(())
            })?;
        }

        if this.read_only && this.write_only {
            return Err(syn::Error::new(
                Span::call_site(),
                "a property cannot be both `read_only` and `write_only`",
            ));
        }

        Ok(this)
    }
}

// -----------------------------------------------------------------------------
// BeanStruct

/// One field of the derived struct.
pub(crate) struct BeanField<'a> {
    pub ident: &'a Ident,
    pub ty: &'a Type,
    /// `None` for skipped fields.
    pub name: Option<LitStr>,
    pub read_only: bool,
    pub write_only: bool,
}

impl BeanField<'_> {
    #[inline]
    pub fn is_property(&self) -> bool {
        self.name.is_some()
    }
}

/// The parsed input of `#[derive(Bean)]`.
pub(crate) struct BeanStruct<'a> {
    pub ident: &'a Ident,
    pub generics: &'a Generics,
    pub flags: TraitAvailableFlags,
    pub fields: Vec<BeanField<'a>>,
    vc_bean_path: syn::Path,
}

impl<'a> BeanStruct<'a> {
    pub fn from_ast(ast: &'a DeriveInput) -> syn::Result<Self> {
        let named = match &ast.data {
            Data::Struct(data) => match &data.fields {
                Fields::Named(named) => named,
                _ => {
                    return Err(syn::Error::new_spanned(
                        &ast.ident,
                        "`Bean` can only be derived for structs with named fields",
                    ));
                }
            },
            _ => {
                return Err(syn::Error::new_spanned(
                    &ast.ident,
                    "`Bean` can only be derived for structs",
                ));
            }
        };

        let flags = TraitAvailableFlags::parse(&ast.attrs)?;

        let mut fields = Vec::with_capacity(named.named.len());
        for field in &named.named {
            let attrs = FieldAttributes::parse(&field.attrs)?;
            // Named fields always carry an identifier.
            let Some(ident) = field.ident.as_ref() else {
                continue;
            };
            let name = if attrs.skip {
                None
            } else {
                let name = attrs.rename.unwrap_or_else(|| {
                    let raw = ident.to_string();
                    let raw = raw.strip_prefix("r#").unwrap_or(&raw).to_owned();
                    LitStr::new(&raw, ident.span())
                });
                Some(name)
            };
            fields.push(BeanField {
                ident,
                ty: &field.ty,
                name,
                read_only: attrs.read_only,
                write_only: attrs.write_only,
            });
        }

        let mut names: Vec<String> = Vec::new();
        for field in &fields {
            if let Some(name) = &field.name {
                if names.contains(&name.value()) {
                    return Err(syn::Error::new(name.span(), "duplicate property name"));
                }
                names.push(name.value());
            }
        }

        Ok(Self {
            ident: &ast.ident,
            generics: &ast.generics,
            flags,
            fields,
            vc_bean_path: crate::path::vc_bean(),
        })
    }

    #[inline]
    pub fn vc_bean_path(&self) -> &syn::Path {
        &self.vc_bean_path
    }

    /// Fields exposed as properties.
    #[inline]
    pub fn properties(&self) -> impl Iterator<Item = &BeanField<'a>> {
        self.fields.iter().filter(|f| f.is_property())
    }

    #[inline]
    pub fn has_skipped(&self) -> bool {
        self.fields.iter().any(|f| !f.is_property())
    }

    /// The where clause shared by all generated impls.
    ///
    /// With type parameters, `Self` must be `'static + Send + Sync`, and every
    /// property type mentioning a parameter must be a typed bean.
    pub fn where_clause(&self) -> TokenStream {
        let mut clause = quote! { where };

        let params: Vec<Ident> = self.generics.type_params().map(|p| p.ident.clone()).collect();
        if !params.is_empty() {
            clause.extend(quote! {
                Self: ::core::any::Any + ::core::marker::Send + ::core::marker::Sync,
            });
        } else if self.generics.lifetimes().next().is_some() {
            clause.extend(quote! { Self: 'static, });
        }

        if let Some(existing) = &self.generics.where_clause {
            let predicates = existing.predicates.iter();
            clause.extend(quote! { #(#predicates,)* });
        }

        if !params.is_empty() {
            let bean_ = crate::path::bean_(&self.vc_bean_path);
            let typed_ = crate::path::typed_(&self.vc_bean_path);
            for field in self.properties() {
                if mentions_any(&params, field.ty.to_token_stream()) {
                    let ty = field.ty;
                    clause.extend(quote! { #ty: #bean_ + #typed_, });
                }
            }
        }

        clause
    }
}

fn mentions_any(idents: &[Ident], tokens: TokenStream) -> bool {
    tokens.into_iter().any(|tree| match tree {
        proc_macro2::TokenTree::Ident(ident) => idents.contains(&ident),
        proc_macro2::TokenTree::Group(group) => mentions_any(idents, group.stream()),
        _ => false,
    })
}
