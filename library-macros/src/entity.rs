use crate::utils::{apply_derives, duplicate_key, parse_bool, prepend_generated_fields};
use proc_macro::TokenStream;
use quote::quote;
use syn::punctuated::Punctuated;
use syn::spanned::Spanned;
use syn::{Item, Result, Token, Type, parse::Parse, parse::ParseStream, parse_macro_input};

/// #[entity] 宏实现
/// - 在字段最前追加 `id: IdType` 与 `version: Version`（不允许用户自行声明）
/// - 合并派生：Debug（可关闭）, Clone, Serialize；实体不派生 Default/Deserialize，
///   只能经由校验构造函数创建
/// - 实现 `::library_domain::entity::Entity`（TYPE/id/version）
/// - 生成 crate 内可见的乐观锁辅助方法：
///   - `guard_version(expected)`：期望版本与当前版本不一致时返回 `StaleState`
///   - `advance_version()`：版本号加一
///
/// 参数：`#[entity(id = IdType, debug = true|false)]`，`id` 必填。
pub(crate) fn expand(attr: TokenStream, item: TokenStream) -> TokenStream {
    let cfg = parse_macro_input!(attr as EntityAttrConfig);
    let input = parse_macro_input!(item as Item);

    let mut st = match input {
        Item::Struct(s) => s,
        other => {
            return syn::Error::new(other.span(), "#[entity] only on struct")
                .to_compile_error()
                .into();
        }
    };

    let Some(id_type) = cfg.id_ty else {
        return syn::Error::new(st.span(), "#[entity] requires `id = Type`")
            .to_compile_error()
            .into();
    };

    let fields_named = match &mut st.fields {
        syn::Fields::Named(f) => f,
        _ => {
            return syn::Error::new(st.span(), "only supports named-field struct")
                .to_compile_error()
                .into();
        }
    };

    let version_ty: Type = syn::parse_quote! { ::library_domain::value_object::Version };
    if let Err(err) =
        prepend_generated_fields(fields_named, &[("id", &id_type), ("version", &version_ty)])
    {
        return err.to_compile_error().into();
    }

    let mut required: Vec<syn::Path> =
        vec![syn::parse_quote!(Clone), syn::parse_quote!(serde::Serialize)];
    if cfg.derive_debug.unwrap_or(true) {
        required.insert(0, syn::parse_quote!(Debug));
    }
    apply_derives(&mut st.attrs, required);

    let ident = &st.ident;
    let type_name = ident.to_string();
    let (impl_generics, ty_generics, where_clause) = st.generics.split_for_impl();

    let expanded = quote! {
        #st

        impl #impl_generics ::library_domain::entity::Entity for #ident #ty_generics #where_clause {
            type Id = #id_type;

            const TYPE: &'static str = #type_name;

            fn id(&self) -> &Self::Id { &self.id }

            fn version(&self) -> ::library_domain::value_object::Version { self.version }
        }

        impl #impl_generics #ident #ty_generics #where_clause {
            #[allow(dead_code)]
            pub(crate) fn guard_version(
                &self,
                expected: ::library_domain::value_object::Version,
            ) -> ::library_domain::error::DomainResult<()> {
                ::library_domain::concurrency::check_version(#type_name, self.version, expected)
            }

            #[allow(dead_code)]
            pub(crate) fn advance_version(&mut self) {
                self.version = self.version.next();
            }
        }
    };

    TokenStream::from(expanded)
}

// -------- parsing --------

struct EntityAttrConfig {
    id_ty: Option<Type>,
    derive_debug: Option<bool>,
}

impl Parse for EntityAttrConfig {
    fn parse(input: ParseStream) -> Result<Self> {
        let mut id_ty: Option<Type> = None;
        let mut derive_debug: Option<bool> = None;

        let elems: Punctuated<EntityAttrElem, Token![,]> =
            Punctuated::<EntityAttrElem, Token![,]>::parse_terminated(input)?;

        for elem in elems {
            match elem {
                EntityAttrElem::Id(ty) => {
                    let span = ty.span();
                    if id_ty.replace(*ty).is_some() {
                        return Err(duplicate_key(span, "id"));
                    }
                }
                EntityAttrElem::Debug(span, b) => {
                    if derive_debug.replace(b).is_some() {
                        return Err(duplicate_key(span, "debug"));
                    }
                }
            }
        }

        Ok(Self {
            id_ty,
            derive_debug,
        })
    }
}

enum EntityAttrElem {
    Id(Box<Type>),
    Debug(proc_macro2::Span, bool),
}

impl Parse for EntityAttrElem {
    fn parse(input: ParseStream) -> Result<Self> {
        let key: syn::Ident = input.parse()?;
        let _eq: Token![=] = input.parse()?;
        if key == "id" {
            Ok(EntityAttrElem::Id(Box::new(input.parse()?)))
        } else if key == "debug" {
            Ok(EntityAttrElem::Debug(key.span(), parse_bool(input.parse()?, "debug")?))
        } else {
            Err(syn::Error::new(
                key.span(),
                "unknown key in attribute; expected 'id' or 'debug'",
            ))
        }
    }
}
