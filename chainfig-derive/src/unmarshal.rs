//! `#[derive(Unmarshal)]` implementation.
//!
//! Generates `impl chainfig::Unmarshal` whose `fields()` returns one
//! `FieldSpec` per bindable field, in declaration order. Each spec carries the
//! parsed `#[fig(...)]` metadata plus a non-capturing setter closure cast to a
//! function pointer.

use proc_macro2::TokenStream;
use quote::quote;
use syn::{
    Attribute, Data, DeriveInput, Expr, ExprLit, ExprUnary, Field, Fields, GenericArgument, Lit,
    PathArguments, Type, UnOp, Visibility, spanned::Spanned,
};

// ============================================================================
// Attribute structures
// ============================================================================

/// Parsed `#[fig(...)]` entries for one field.
#[derive(Default)]
struct FigAttrs {
    key: Option<String>,
    required: bool,
    default: Option<String>,
    seen: bool,
}

/// How a field's declared type maps onto the binder's coercion rules.
enum FieldShape<'a> {
    Direct(&'a Type),
    Optional(&'a Type),
    Unsupported,
}

const SCALARS: &[&str] = &["String", "i32", "i64", "bool", "f64"];

// ============================================================================
// Entry point
// ============================================================================

pub fn derive_unmarshal(input: &DeriveInput) -> syn::Result<TokenStream> {
    let fields = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(named) => &named.named,
            Fields::Unnamed(_) | Fields::Unit => {
                return Err(syn::Error::new(
                    input.span(),
                    "invalid destination: Unmarshal requires a struct with named fields",
                ));
            }
        },
        Data::Enum(_) => {
            return Err(syn::Error::new(
                input.span(),
                "invalid destination: Unmarshal cannot be derived for enums",
            ));
        }
        Data::Union(_) => {
            return Err(syn::Error::new(
                input.span(),
                "invalid destination: Unmarshal cannot be derived for unions",
            ));
        }
    };

    let mut specs = Vec::new();
    for field in fields {
        let attrs = parse_field_attrs(&field.attrs)?;
        if !attrs.seen {
            continue;
        }
        let Some(key) = attrs.key.clone() else {
            return Err(syn::Error::new(
                field.span(),
                "#[fig(...)] requires `key = \"...\"`",
            ));
        };
        if matches!(field.vis, Visibility::Inherited) {
            continue;
        }
        specs.push(generate_spec(field, &key, &attrs));
    }

    let name = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    Ok(quote! {
        impl #impl_generics ::chainfig::Unmarshal for #name #ty_generics #where_clause {
            fn fields() -> ::std::vec::Vec<::chainfig::FieldSpec<Self>> {
                ::std::vec![#(#specs),*]
            }
        }
    })
}

// ============================================================================
// Attribute parsing
// ============================================================================

fn parse_field_attrs(attrs: &[Attribute]) -> syn::Result<FigAttrs> {
    let mut result = FigAttrs::default();

    for attr in attrs {
        if !attr.path().is_ident("fig") {
            continue;
        }
        result.seen = true;
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("key") {
                result.key = Some(meta.value()?.parse::<syn::LitStr>()?.value());
            } else if meta.path.is_ident("required") {
                result.required = if meta.input.peek(syn::Token![=]) {
                    match meta.value()?.parse::<Lit>()? {
                        Lit::Str(s) => s.value().eq_ignore_ascii_case("true"),
                        Lit::Bool(b) => b.value,
                        other => {
                            return Err(syn::Error::new(
                                other.span(),
                                "`required` expects \"true\"/\"false\" or a bool",
                            ));
                        }
                    }
                } else {
                    true
                };
            } else if meta.path.is_ident("default") {
                let expr: Expr = meta.value()?.parse()?;
                result.default = Some(default_literal(&expr)?);
            } else {
                return Err(meta.error("unknown fig attribute; expected key, required or default"));
            }
            Ok(())
        })?;
    }

    Ok(result)
}

/// The raw text of a `default = ...` value. Negative numbers arrive as a
/// unary minus applied to a literal.
fn default_literal(expr: &Expr) -> syn::Result<String> {
    match expr {
        Expr::Lit(ExprLit { lit, .. }) => match lit {
            Lit::Str(s) => Ok(s.value()),
            Lit::Int(i) => Ok(i.base10_digits().to_string()),
            Lit::Float(f) => Ok(f.base10_digits().to_string()),
            Lit::Bool(b) => Ok(b.value.to_string()),
            other => Err(syn::Error::new(
                other.span(),
                "`default` expects a string, number or bool literal",
            )),
        },
        Expr::Unary(ExprUnary {
            op: UnOp::Neg(_),
            expr: inner,
            ..
        }) => match &**inner {
            Expr::Lit(ExprLit {
                lit: Lit::Int(i), ..
            }) => Ok(format!("-{}", i.base10_digits())),
            Expr::Lit(ExprLit {
                lit: Lit::Float(f), ..
            }) => Ok(format!("-{}", f.base10_digits())),
            other => Err(syn::Error::new(
                other.span(),
                "`default` can only negate a number literal",
            )),
        },
        other => Err(syn::Error::new(
            other.span(),
            "`default` expects a string, number or bool literal",
        )),
    }
}

// ============================================================================
// Type classification
// ============================================================================

fn last_segment_ident(ty: &Type) -> Option<&syn::PathSegment> {
    match ty {
        Type::Path(tp) if tp.qself.is_none() => tp.path.segments.last(),
        _ => None,
    }
}

fn is_scalar(ty: &Type) -> bool {
    last_segment_ident(ty).is_some_and(|seg| {
        matches!(seg.arguments, PathArguments::None)
            && SCALARS.iter().any(|s| seg.ident == s)
    })
}

fn classify(ty: &Type) -> FieldShape<'_> {
    if is_scalar(ty) {
        return FieldShape::Direct(ty);
    }
    if let Some(seg) = last_segment_ident(ty)
        && seg.ident == "Option"
        && let PathArguments::AngleBracketed(args) = &seg.arguments
        && args.args.len() == 1
        && let Some(GenericArgument::Type(inner)) = args.args.first()
        && is_scalar(inner)
    {
        return FieldShape::Optional(inner);
    }
    FieldShape::Unsupported
}

/// Render a type the way it was written, without the token-stream spacing.
fn type_display(ty: &Type) -> String {
    quote!(#ty)
        .to_string()
        .replace(" :: ", "::")
        .replace(":: ", "::")
        .replace(" < ", "<")
        .replace("< ", "<")
        .replace(" <", "<")
        .replace(" >", ">")
        .replace(" ,", ",")
        .replace("& ", "&")
}

// ============================================================================
// Code generation
// ============================================================================

fn generate_spec(field: &Field, key: &str, attrs: &FigAttrs) -> TokenStream {
    // Named fields always carry an ident.
    let ident = field.ident.as_ref().expect("named field");
    let field_name = ident.to_string();
    let type_name = type_display(&field.ty);
    let required = attrs.required;
    let default = match &attrs.default {
        Some(d) => quote!(::std::option::Option::Some(#d)),
        None => quote!(::std::option::Option::None),
    };

    let (kind, assign) = match classify(&field.ty) {
        FieldShape::Direct(inner) => (
            quote! {
                ::chainfig::FieldKind::Scalar {
                    kind: <#inner as ::chainfig::Scalar>::KIND,
                    optional: false,
                }
            },
            quote! {
                ::std::option::Option::Some(
                    (|dest: &mut Self, value: ::chainfig::Value| {
                        if let ::std::option::Option::Some(v) =
                            <#inner as ::chainfig::Scalar>::from_value(value)
                        {
                            dest.#ident = v;
                        }
                    }) as fn(&mut Self, ::chainfig::Value),
                )
            },
        ),
        FieldShape::Optional(inner) => (
            quote! {
                ::chainfig::FieldKind::Scalar {
                    kind: <#inner as ::chainfig::Scalar>::KIND,
                    optional: true,
                }
            },
            quote! {
                ::std::option::Option::Some(
                    (|dest: &mut Self, value: ::chainfig::Value| {
                        if let ::std::option::Option::Some(v) =
                            <#inner as ::chainfig::Scalar>::from_value(value)
                        {
                            dest.#ident = ::std::option::Option::Some(v);
                        }
                    }) as fn(&mut Self, ::chainfig::Value),
                )
            },
        ),
        FieldShape::Unsupported => (
            quote!(::chainfig::FieldKind::Unsupported),
            quote!(::std::option::Option::None),
        ),
    };

    quote! {
        ::chainfig::FieldSpec {
            field: #field_name,
            key: #key,
            required: #required,
            default: #default,
            kind: #kind,
            type_name: #type_name,
            assign: #assign,
        }
    }
}
