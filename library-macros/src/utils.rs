use quote::ToTokens;
use syn::punctuated::Punctuated;
use syn::{Attribute, Field, FieldsNamed, Token, Type};

/// 将 derive 路径归一化为比较用的 key（`serde::Serialize` 与 `Serialize` 视为同一项）
fn derive_key(path: &syn::Path) -> String {
    match path.segments.last() {
        Some(last) => last.ident.to_string(),
        None => path.to_token_stream().to_string(),
    }
}

/// 合并派生：宏要求的派生在前，用户已有的派生在后，按 key 去重；
/// 其余属性（含 `#[serde(...)]`、文档注释）原样保留在 derive 之后。
pub(crate) fn apply_derives(attrs: &mut Vec<Attribute>, required: Vec<syn::Path>) {
    let mut others = Vec::with_capacity(attrs.len());
    let mut user_derives: Vec<syn::Path> = Vec::new();

    for attr in attrs.drain(..) {
        if !attr.path().is_ident("derive") {
            others.push(attr);
            continue;
        }
        match attr.parse_args_with(Punctuated::<syn::Path, Token![,]>::parse_terminated) {
            Ok(list) => user_derives.extend(list),
            Err(_) => others.push(attr),
        }
    }

    let mut seen = std::collections::HashSet::new();
    let merged: Vec<syn::Path> = required
        .into_iter()
        .chain(user_derives)
        .filter(|p| seen.insert(derive_key(p)))
        .collect();

    attrs.push(syn::parse_quote!(#[derive(#(#merged),*)]));
    attrs.extend(others);
}

/// 在具名字段最前插入宏生成的字段；若用户已自行声明同名字段则报错。
pub(crate) fn prepend_generated_fields(
    fields: &mut FieldsNamed,
    generated: &[(&str, &Type)],
) -> syn::Result<()> {
    for field in fields.named.iter() {
        if let Some(ident) = &field.ident {
            if generated.iter().any(|(name, _)| ident == name) {
                return Err(syn::Error::new(
                    ident.span(),
                    format!("field `{ident}` is generated by the attribute and must not be declared"),
                ));
            }
        }
    }

    let mut named: Punctuated<Field, Token![,]> = Punctuated::new();
    for (name, ty) in generated {
        let ident = syn::Ident::new(name, proc_macro2::Span::call_site());
        named.push(syn::parse_quote! { #ident: #ty });
    }
    named.extend(fields.named.clone());
    fields.named = named;

    Ok(())
}

/// 解析 `key = true|false`
pub(crate) fn parse_bool(expr: syn::Expr, key: &str) -> syn::Result<bool> {
    match expr {
        syn::Expr::Lit(syn::ExprLit {
            lit: syn::Lit::Bool(b),
            ..
        }) => Ok(b.value()),
        other => Err(syn::Error::new_spanned(
            other,
            format!("expected boolean literal for '{key}'"),
        )),
    }
}

pub(crate) fn duplicate_key(span: proc_macro2::Span, key: &str) -> syn::Error {
    syn::Error::new(span, format!("duplicate key '{key}' in attribute"))
}
