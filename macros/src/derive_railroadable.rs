use proc_macro2::{Span, TokenStream, TokenTree};
use quote::{ToTokens, format_ident, quote};
use syn::{
    Attribute, Data, DeriveInput, Fields, Ident, LitStr, Member, Type, parse_quote,
    spanned::Spanned,
};

/// How a struct or variant turns its fields into a diagram.
enum Shape {
    /// `Then` of the fields.
    Sequence,
    /// `Or` of the fields.
    Choice,
    /// A single token; fields are ignored.
    Token { kind: Ident, text: LitStr },
}

fn token_kind(key: &str) -> Option<&'static str> {
    match key {
        "production" => Some("Production"),
        "text" => Some("Text"),
        "anycase" => Some("AnyCase"),
        "description" => Some("Description"),
        _ => None,
    }
}

fn parse_shape(attrs: &[Attribute]) -> syn::Result<Shape> {
    let mut shape: Option<(Shape, Span)> = None;

    for attr in attrs.iter().filter(|a| a.path().is_ident("railroad")) {
        attr.parse_nested_meta(|meta| {
            let key = meta
                .path
                .get_ident()
                .map(ToString::to_string)
                .unwrap_or_default();

            let next = if key == "choice" {
                Shape::Choice
            } else if let Some(kind) = token_kind(&key) {
                let text: LitStr = meta.value()?.parse()?;
                Shape::Token {
                    kind: Ident::new(kind, Span::call_site()),
                    text,
                }
            } else if key == "skip" {
                return Err(meta.error("`skip` applies to fields, not to structs or variants"));
            } else {
                return Err(meta.error(format!("unknown railroad attribute `{}`", key)));
            };

            if let Some((_, first)) = &shape {
                let mut err = meta.error("conflicting railroad attributes");
                err.combine(syn::Error::new(*first, "first declared here"));
                return Err(err);
            }
            shape = Some((next, meta.path.span()));
            Ok(())
        })?;
    }

    Ok(shape.map(|(s, _)| s).unwrap_or(Shape::Sequence))
}

fn is_skipped(attrs: &[Attribute]) -> syn::Result<bool> {
    let mut skip = false;
    for attr in attrs.iter().filter(|a| a.path().is_ident("railroad")) {
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("skip") {
                skip = true;
                Ok(())
            } else {
                Err(meta.error("only `skip` is allowed on fields"))
            }
        })?;
    }
    Ok(skip)
}

/// A field that takes part in the diagram, with the expression that reaches it.
struct Part {
    access: TokenStream,
    ty: Type,
}

/// Field types drawn by `shape`; token shapes draw none.
fn drawn_types(shape: &Shape, parts: Vec<Part>) -> Vec<Type> {
    match shape {
        Shape::Token { .. } => Vec::new(),
        _ => parts.into_iter().map(|part| part.ty).collect(),
    }
}

fn mentions(tokens: TokenStream, params: &[Ident]) -> bool {
    tokens.into_iter().any(|tree| match tree {
        TokenTree::Ident(ident) => params.contains(&ident),
        TokenTree::Group(group) => mentions(group.stream(), params),
        _ => false,
    })
}

fn combine(shape: &Shape, parts: &[Part]) -> TokenStream {
    if let Shape::Token { kind, text } = shape {
        return quote! {
            ::railkit::Component::token(::railkit::TokenKind::#kind, #text)
        };
    }

    let rendered: Vec<TokenStream> = parts
        .iter()
        .map(|part| {
            let access = &part.access;
            quote! { ::railkit::Railroadable::create_railroad(#access, options) }
        })
        .collect();

    match (shape, rendered.as_slice()) {
        (_, []) => quote! { ::railkit::Component::Nothing },
        (_, [single]) => single.clone(),
        (Shape::Choice, many) => quote! { ::railkit::Component::or([#(#many),*]) },
        (_, many) => quote! { ::railkit::Component::then([#(#many),*]) },
    }
}

/// Body for a struct: fields are reached through `self`.
fn struct_body(fields: &Fields, shape: &Shape) -> syn::Result<(TokenStream, Vec<Type>)> {
    let mut parts = Vec::new();
    for (idx, field) in fields.iter().enumerate() {
        if is_skipped(&field.attrs)? {
            continue;
        }
        let member = match &field.ident {
            Some(ident) => Member::Named(ident.clone()),
            None => Member::Unnamed(idx.into()),
        };
        parts.push(Part {
            access: quote! { &self.#member },
            ty: field.ty.clone(),
        });
    }
    let body = combine(shape, &parts);
    Ok((body, drawn_types(shape, parts)))
}

/// Match arm for an enum variant: fields are bound by the pattern.
fn variant_arm(variant: &syn::Variant) -> syn::Result<(TokenStream, Vec<Type>)> {
    let shape = parse_shape(&variant.attrs)?;
    let name = &variant.ident;
    let mut parts = Vec::new();

    let pattern = match &variant.fields {
        Fields::Named(named) => {
            let mut bindings = Vec::new();
            for field in &named.named {
                if is_skipped(&field.attrs)? {
                    continue;
                }
                let ident = field.ident.clone().ok_or_else(|| {
                    syn::Error::new_spanned(field, "named field without an identifier")
                })?;
                parts.push(Part {
                    access: quote! { #ident },
                    ty: field.ty.clone(),
                });
                bindings.push(ident);
            }
            quote! { Self::#name { #(#bindings,)* .. } }
        }
        Fields::Unnamed(unnamed) => {
            let mut bindings = Vec::new();
            for (idx, field) in unnamed.unnamed.iter().enumerate() {
                if is_skipped(&field.attrs)? {
                    bindings.push(quote! { _ });
                    continue;
                }
                let binding = format_ident!("__field{}", idx);
                parts.push(Part {
                    access: quote! { #binding },
                    ty: field.ty.clone(),
                });
                bindings.push(quote! { #binding });
            }
            quote! { Self::#name(#(#bindings),*) }
        }
        Fields::Unit => quote! { Self::#name },
    };

    // Token-shaped variants ignore their fields.
    let pattern = if matches!(shape, Shape::Token { .. }) {
        match &variant.fields {
            Fields::Named(_) => quote! { Self::#name { .. } },
            Fields::Unnamed(_) => quote! { Self::#name(..) },
            Fields::Unit => quote! { Self::#name },
        }
    } else {
        pattern
    };

    let body = combine(&shape, &parts);
    Ok((quote! { #pattern => #body, }, drawn_types(&shape, parts)))
}

pub fn expand(mut input: DeriveInput) -> syn::Result<TokenStream> {
    let name = &input.ident;

    let (body, drawn) = match &input.data {
        Data::Struct(data) => {
            let shape = parse_shape(&input.attrs)?;
            struct_body(&data.fields, &shape)?
        }
        Data::Enum(data) => {
            if let Some(attr) = input.attrs.iter().find(|a| a.path().is_ident("railroad")) {
                return Err(syn::Error::new_spanned(
                    attr,
                    "railroad attributes belong on enum variants, not on the enum",
                ));
            }
            if data.variants.is_empty() {
                (quote! { match *self {} }, Vec::new())
            } else {
                let mut arms = Vec::new();
                let mut drawn = Vec::new();
                for variant in &data.variants {
                    let (arm, types) = variant_arm(variant)?;
                    arms.push(arm);
                    drawn.extend(types);
                }
                let body = quote! {
                    match self {
                        #(#arms)*
                    }
                };
                (body, drawn)
            }
        }
        Data::Union(data) => {
            return Err(syn::Error::new_spanned(
                data.union_token,
                "Railroadable cannot be derived for unions",
            ));
        }
    };

    // Only drawn field types that involve a type parameter are bounded.
    let params: Vec<Ident> = input
        .generics
        .type_params()
        .map(|param| param.ident.clone())
        .collect();
    if !params.is_empty() {
        let mut seen: Vec<String> = Vec::new();
        let where_clause = input.generics.make_where_clause();
        for ty in drawn {
            let key = ty.to_token_stream().to_string();
            if seen.contains(&key) || !mentions(ty.to_token_stream(), &params) {
                continue;
            }
            seen.push(key);
            where_clause
                .predicates
                .push(parse_quote!(#ty: ::railkit::Railroadable));
        }
    }
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    Ok(quote! {
        impl #impl_generics ::railkit::Railroadable for #name #ty_generics #where_clause {
            #[allow(unused_variables)]
            fn create_railroad(&self, options: &::railkit::Options) -> ::railkit::Component {
                #body
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn error_message(input: DeriveInput) -> String {
        expand(input).err().map(|err| err.to_string()).unwrap_or_default()
    }

    /// Types bounded by the generated `where` clause, as token strings.
    fn bounded_types(input: DeriveInput) -> Vec<String> {
        let Some(item) = expand(input)
            .ok()
            .and_then(|tokens| syn::parse2::<syn::ItemImpl>(tokens).ok())
        else {
            return vec!["<expansion failed>".to_owned()];
        };
        item.generics
            .where_clause
            .map(|clause| {
                clause
                    .predicates
                    .into_iter()
                    .filter_map(|predicate| match predicate {
                        syn::WherePredicate::Type(pt) => {
                            Some(pt.bounded_ty.to_token_stream().to_string())
                        }
                        _ => None,
                    })
                    .collect()
            })
            .unwrap_or_default()
    }

    fn ty(tokens: TokenStream) -> String {
        tokens.to_string()
    }

    #[test]
    fn test_unknown_key_is_rejected() {
        let message = error_message(parse_quote! {
            #[railroad(keyword = "select")]
            struct Select;
        });
        assert_eq!(message, "unknown railroad attribute `keyword`");
    }

    #[test]
    fn test_conflicting_shapes_are_rejected() {
        let message = error_message(parse_quote! {
            #[railroad(choice, text = "x")]
            struct Both(A, B);
        });
        assert_eq!(message, "conflicting railroad attributes");

        let message = error_message(parse_quote! {
            #[railroad(text = "x")]
            #[railroad(production = "y")]
            struct Split;
        });
        assert_eq!(message, "conflicting railroad attributes");
    }

    #[test]
    fn test_skip_on_container_is_rejected() {
        let message = error_message(parse_quote! {
            #[railroad(skip)]
            struct Hidden(A);
        });
        assert!(message.contains("`skip` applies to fields"));

        let message = error_message(parse_quote! {
            enum Statement {
                #[railroad(skip)]
                Empty,
            }
        });
        assert!(message.contains("`skip` applies to fields"));
    }

    #[test]
    fn test_field_keys_other_than_skip_are_rejected() {
        let message = error_message(parse_quote! {
            struct Greeting {
                #[railroad(text = "Hello")]
                hello: Hello,
            }
        });
        assert_eq!(message, "only `skip` is allowed on fields");

        let message = error_message(parse_quote! {
            enum Statement {
                Query(#[railroad(choice)] Select),
            }
        });
        assert_eq!(message, "only `skip` is allowed on fields");
    }

    #[test]
    fn test_attribute_on_enum_is_rejected() {
        let message = error_message(parse_quote! {
            #[railroad(choice)]
            enum Target {
                World,
            }
        });
        assert_eq!(
            message,
            "railroad attributes belong on enum variants, not on the enum"
        );
    }

    #[test]
    fn test_union_is_rejected() {
        let message = error_message(parse_quote! {
            union Bits {
                int: u32,
                float: f32,
            }
        });
        assert_eq!(message, "Railroadable cannot be derived for unions");
    }

    #[test]
    fn test_text_value_must_be_a_string() {
        let message = error_message(parse_quote! {
            #[railroad(text = 3)]
            struct Three;
        });
        assert!(!message.is_empty());
    }

    #[test]
    fn test_valid_inputs_expand() {
        let inputs: Vec<DeriveInput> = vec![
            parse_quote! { struct Empty; },
            parse_quote! { enum Never {} },
            parse_quote! {
                #[railroad(choice)]
                struct AnyTarget(Target, Target);
            },
            parse_quote! {
                enum Statement {
                    #[railroad(production = "block")]
                    Block(Vec<u8>),
                    Note {
                        text: AnyChar,
                        #[railroad(skip)]
                        line: u32,
                    },
                }
            },
        ];
        for input in inputs {
            assert!(expand(input).is_ok());
        }
    }

    #[test]
    fn test_bounds_follow_drawn_fields() {
        let bounded = bounded_types(parse_quote! {
            struct List<T> {
                items: Vec<T>,
                head: T,
                label: Hello,
            }
        });
        assert_eq!(bounded, vec![ty(quote!(Vec<T>)), ty(quote!(T))]);
    }

    #[test]
    fn test_skipped_fields_are_not_bounded() {
        let bounded = bounded_types(parse_quote! {
            struct Tagged<T> {
                label: Hello,
                #[railroad(skip)]
                marker: PhantomData<T>,
            }
        });
        assert!(bounded.is_empty());

        let bounded = bounded_types(parse_quote! {
            enum Cell<T, U> {
                Value(T, #[railroad(skip)] U),
            }
        });
        assert_eq!(bounded, vec![ty(quote!(T))]);
    }

    #[test]
    fn test_token_shapes_are_not_bounded() {
        let bounded = bounded_types(parse_quote! {
            #[railroad(production = "cell")]
            struct Cell<T>(T);
        });
        assert!(bounded.is_empty());

        let bounded = bounded_types(parse_quote! {
            enum Literal<T> {
                #[railroad(description = "number")]
                Number(T),
                Nested(Box<T>),
            }
        });
        assert_eq!(bounded, vec![ty(quote!(Box<T>))]);
    }

    #[test]
    fn test_repeated_field_types_are_bounded_once() {
        let bounded = bounded_types(parse_quote! {
            #[railroad(choice)]
            struct Either<T>(T, T);
        });
        assert_eq!(bounded, vec![ty(quote!(T))]);
    }
}
