#![deny(
    unsafe_code,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    clippy::todo,
    clippy::unimplemented,
    clippy::dbg_macro
)]

//! Procedural macros for the railkit diagram toolkit.
//!
//! Use through the `railkit` facade; generated code refers to `::railkit`.
use proc_macro::TokenStream;
use syn::{DeriveInput, parse_macro_input};

mod derive_railroadable;

/// Derives `Railroadable` from the shape of a struct or enum.
///
/// Every field that takes part in the diagram must itself implement
/// `Railroadable`.
///
/// # Shapes
///
/// | Input | Diagram |
/// |-------|---------|
/// | no fields | `Nothing` |
/// | one field | that field's diagram |
/// | several fields | `Then` of the fields, in declaration order |
/// | `#[railroad(choice)]` | `Or` of the fields instead of `Then` |
/// | `#[railroad(production = "name")]` | a `Production` token |
/// | `#[railroad(text = "...")]` | a `Text` token |
/// | `#[railroad(anycase = "...")]` | an `AnyCase` token |
/// | `#[railroad(description = "...")]` | a `Description` token |
///
/// On enums the shape attributes go on each variant and the diagram is that
/// of the variant the value holds. Fields marked `#[railroad(skip)]` are
/// left out.
///
/// # Example
///
/// ```ignore
/// use railkit::{Options, Railroadable, Token};
///
/// #[derive(Railroadable)]
/// #[railroad(text = "Hello, ")]
/// struct Hello;
///
/// #[derive(Railroadable)]
/// enum Target {
///     #[railroad(text = "world")]
///     World,
///     #[railroad(text = "all you people")]
///     Everyone,
/// }
///
/// #[derive(Railroadable)]
/// struct Greeting {
///     hello: Hello,
///     target: Target,
///     #[railroad(skip)]
///     uses: usize,
/// }
/// ```
#[proc_macro_derive(Railroadable, attributes(railroad))]
pub fn derive_railroadable(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    derive_railroadable::expand(input)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}
