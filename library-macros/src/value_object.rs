use crate::utils::{apply_derives, duplicate_key, parse_bool};
use proc_macro::TokenStream;
use quote::quote;
use syn::punctuated::Punctuated;
use syn::spanned::Spanned;
use syn::{Item, Result, Token, Type, parse::Parse, parse::ParseStream, parse_macro_input};

/// #[value_object] 宏实现
/// - 合并/追加派生：Debug（可关闭）, Clone, PartialEq, Eq, Hash, Serialize, Deserialize
/// - 反序列化经由构造函数校验：`#[serde(try_from = "Via", into = "Via")]`
/// - 生成 `TryFrom<Via>`（调用 `Self::ctor(value)`，错误类型为 `DomainError`）
/// - 单字段 tuple struct 额外生成 `From<Self> for Inner`、`AsRef<Inner>` 与（可关闭的）`Display`
///
/// 参数：
/// - `debug = bool`：是否派生 Debug，默认 true
/// - `display = bool`：单字段时是否委托内部值实现 Display，默认 true
/// - `via = Type`：序列化中间类型，单字段时默认为内部类型，其余情况必填
/// - `ctor = ident`：校验构造函数名，默认 `new`
///
/// 非单字段的值对象需要自行实现 `From<Self> for Via`。
pub(crate) fn expand(attr: TokenStream, item: TokenStream) -> TokenStream {
    let cfg = parse_macro_input!(attr as ValueObjectAttrConfig);
    let input = parse_macro_input!(item as Item);

    let mut st = match input {
        Item::Struct(s) => s,
        other => {
            return syn::Error::new(other.span(), "#[value_object] only supports struct")
                .to_compile_error()
                .into();
        }
    };

    let newtype_inner: Option<Type> = match &st.fields {
        syn::Fields::Unnamed(f) if f.unnamed.len() == 1 => f.unnamed.first().map(|f| f.ty.clone()),
        _ => None,
    };

    let via: Type = match (cfg.via, &newtype_inner) {
        (Some(ty), _) => ty,
        (None, Some(inner)) => inner.clone(),
        (None, None) => {
            return syn::Error::new(
                st.span(),
                "#[value_object] on a multi-field struct requires `via = Type`",
            )
            .to_compile_error()
            .into();
        }
    };
    let ctor = cfg
        .ctor
        .unwrap_or_else(|| syn::Ident::new("new", proc_macro2::Span::call_site()));

    let mut required: Vec<syn::Path> = vec![
        syn::parse_quote!(Clone),
        syn::parse_quote!(PartialEq),
        syn::parse_quote!(Eq),
        syn::parse_quote!(Hash),
        syn::parse_quote!(serde::Serialize),
        syn::parse_quote!(serde::Deserialize),
    ];
    if cfg.derive_debug.unwrap_or(true) {
        required.insert(0, syn::parse_quote!(Debug));
    }
    apply_derives(&mut st.attrs, required);

    let via_str = quote!(#via).to_string();
    st.attrs
        .push(syn::parse_quote!(#[serde(try_from = #via_str, into = #via_str)]));

    let ident = &st.ident;
    let (impl_generics, ty_generics, where_clause) = st.generics.split_for_impl();

    let conversions = quote! {
        impl #impl_generics ::core::convert::TryFrom<#via> for #ident #ty_generics #where_clause {
            type Error = ::library_domain::error::DomainError;

            fn try_from(value: #via) -> ::core::result::Result<Self, Self::Error> {
                Self::#ctor(value)
            }
        }
    };

    let newtype_impls = match &newtype_inner {
        Some(inner) => {
            let display = if cfg.display.unwrap_or(true) {
                quote! {
                    impl #impl_generics ::std::fmt::Display for #ident #ty_generics #where_clause {
                        fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                            ::std::fmt::Display::fmt(&self.0, f)
                        }
                    }
                }
            } else {
                quote! {}
            };

            quote! {
                impl #impl_generics ::core::convert::From<#ident #ty_generics> for #inner #where_clause {
                    fn from(value: #ident #ty_generics) -> Self { value.0 }
                }

                impl #impl_generics ::core::convert::AsRef<#inner> for #ident #ty_generics #where_clause {
                    fn as_ref(&self) -> &#inner { &self.0 }
                }

                #display
            }
        }
        None => quote! {},
    };

    TokenStream::from(quote! {
        #st

        #conversions

        #newtype_impls
    })
}

// -------- parsing --------

#[derive(Default)]
struct ValueObjectAttrConfig {
    derive_debug: Option<bool>,
    display: Option<bool>,
    via: Option<Type>,
    ctor: Option<syn::Ident>,
}

impl Parse for ValueObjectAttrConfig {
    fn parse(input: ParseStream) -> Result<Self> {
        let mut cfg = Self::default();
        if input.is_empty() {
            return Ok(cfg);
        }

        let elems: Punctuated<ValueObjectAttrElem, Token![,]> =
            Punctuated::parse_terminated(input)?;

        for elem in elems {
            match elem {
                ValueObjectAttrElem::Debug(span, b) => {
                    if cfg.derive_debug.replace(b).is_some() {
                        return Err(duplicate_key(span, "debug"));
                    }
                }
                ValueObjectAttrElem::Display(span, b) => {
                    if cfg.display.replace(b).is_some() {
                        return Err(duplicate_key(span, "display"));
                    }
                }
                ValueObjectAttrElem::Via(span, ty) => {
                    if cfg.via.replace(*ty).is_some() {
                        return Err(duplicate_key(span, "via"));
                    }
                }
                ValueObjectAttrElem::Ctor(span, ident) => {
                    if cfg.ctor.replace(ident).is_some() {
                        return Err(duplicate_key(span, "ctor"));
                    }
                }
            }
        }
        Ok(cfg)
    }
}

enum ValueObjectAttrElem {
    Debug(proc_macro2::Span, bool),
    Display(proc_macro2::Span, bool),
    Via(proc_macro2::Span, Box<Type>),
    Ctor(proc_macro2::Span, syn::Ident),
}

impl Parse for ValueObjectAttrElem {
    fn parse(input: ParseStream) -> Result<Self> {
        let key: syn::Ident = input.parse()?;
        let span = key.span();
        let _eq: Token![=] = input.parse()?;

        if key == "debug" {
            Ok(Self::Debug(span, parse_bool(input.parse()?, "debug")?))
        } else if key == "display" {
            Ok(Self::Display(span, parse_bool(input.parse()?, "display")?))
        } else if key == "via" {
            Ok(Self::Via(span, Box::new(input.parse()?)))
        } else if key == "ctor" {
            Ok(Self::Ctor(span, input.parse()?))
        } else {
            Err(syn::Error::new(
                span,
                "unknown key in attribute; expected 'debug', 'display', 'via' or 'ctor'",
            ))
        }
    }
}
