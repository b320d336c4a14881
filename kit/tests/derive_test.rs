//! Tests for `#[derive(Railroadable)]`.

use std::marker::PhantomData;

use railkit::{Component, Options, Railroadable, Token, TokenKind, create_railroad};

#[derive(Railroadable)]
#[railroad(text = "Hello, ")]
struct Hello;

#[derive(Railroadable)]
enum Target {
    #[railroad(text = "world")]
    World,
    #[railroad(text = "all you people")]
    Everyone,
}

#[derive(Railroadable)]
struct Greeting {
    hello: Hello,
    target: Target,
    #[railroad(skip)]
    #[allow(dead_code)]
    uses: usize,
}

#[derive(Railroadable)]
#[railroad(choice)]
struct AnyTarget(Target, Target);

#[derive(Railroadable)]
#[railroad(production = "expr")]
struct ExprRef;

#[derive(Railroadable)]
#[railroad(anycase = "select")]
struct Select;

#[derive(Railroadable)]
#[railroad(description = "any character")]
struct AnyChar;

#[derive(Railroadable)]
struct Empty;

#[derive(Railroadable)]
struct Wrapper(ExprRef);

#[derive(Railroadable)]
struct List<T> {
    items: Vec<T>,
}

#[derive(Railroadable)]
struct Tagged<T> {
    label: Hello,
    #[railroad(skip)]
    _marker: PhantomData<T>,
}

#[derive(Railroadable)]
#[railroad(production = "cell")]
struct Cell<T>(#[allow(dead_code)] T);

#[derive(Railroadable)]
enum Slot<T, U> {
    Filled(T, #[railroad(skip)] #[allow(dead_code)] U),
    #[railroad(text = "empty")]
    Empty(#[allow(dead_code)] U),
}

#[derive(Railroadable)]
enum Statement {
    Query(Select, ExprRef),
    Note {
        text: AnyChar,
        #[railroad(skip)]
        #[allow(dead_code)]
        line: u32,
    },
    #[railroad(production = "block")]
    Block(#[allow(dead_code)] Vec<u8>),
    Skip,
}

fn text(s: &str) -> Component {
    Component::Token(Token::literal(s))
}

#[test]
fn test_unit_struct_token() {
    assert_eq!(create_railroad(&Hello, &Options::new()), text("Hello, "));
}

#[test]
fn test_enum_picks_held_variant() {
    assert_eq!(create_railroad(&Target::World, &Options::new()), text("world"));
    assert_eq!(
        create_railroad(&Target::Everyone, &Options::new()),
        text("all you people")
    );
}

#[test]
fn test_struct_fields_in_sequence() {
    let greeting = Greeting {
        hello: Hello,
        target: Target::Everyone,
        uses: 3,
    };
    assert_eq!(
        create_railroad(&greeting, &Options::new()),
        Component::then([text("Hello, "), text("all you people")])
    );
}

#[test]
fn test_choice_struct() {
    let target = AnyTarget(Target::World, Target::Everyone);
    assert_eq!(
        create_railroad(&target, &Options::new()),
        Component::or([text("world"), text("all you people")])
    );
}

#[test]
fn test_token_kinds() {
    let options = Options::new();
    assert_eq!(
        create_railroad(&ExprRef, &options),
        Component::token(TokenKind::Production, "expr")
    );
    assert_eq!(
        create_railroad(&Select, &options),
        Component::token(TokenKind::AnyCase, "select")
    );
    assert_eq!(
        create_railroad(&AnyChar, &options),
        Component::token(TokenKind::Description, "any character")
    );
}

#[test]
fn test_no_fields_is_nothing() {
    assert_eq!(create_railroad(&Empty, &Options::new()), Component::Nothing);
    assert_eq!(
        create_railroad(&Statement::Skip, &Options::new()),
        Component::Nothing
    );
}

#[test]
fn test_single_field_is_unwrapped() {
    assert_eq!(
        create_railroad(&Wrapper(ExprRef), &Options::new()),
        Component::token(TokenKind::Production, "expr")
    );
}

#[test]
fn test_generic_struct() {
    let list = List {
        items: vec![Hello, Hello],
    };
    assert_eq!(
        create_railroad(&list, &Options::new()),
        Component::then([text("Hello, "), text("Hello, ")])
    );
}

#[test]
fn test_enum_variant_shapes() {
    let options = Options::new();
    assert_eq!(
        create_railroad(&Statement::Query(Select, ExprRef), &options),
        Component::then([
            Component::token(TokenKind::AnyCase, "select"),
            Component::token(TokenKind::Production, "expr"),
        ])
    );
    assert_eq!(
        create_railroad(
            &Statement::Note {
                text: AnyChar,
                line: 7
            },
            &options
        ),
        Component::token(TokenKind::Description, "any character")
    );
    assert_eq!(
        create_railroad(&Statement::Block(vec![1, 2]), &options),
        Component::token(TokenKind::Production, "block")
    );
}

#[test]
fn test_derived_values_nest_in_hand_written_trees() {
    let options = Options::new();
    let tree = Component::optional(Hello.create_railroad(&options));
    assert_eq!(tree, Component::or([Component::Nothing, text("Hello, ")]));
}

#[test]
fn test_skipped_generic_needs_no_capability() {
    let tagged: Tagged<u32> = Tagged {
        label: Hello,
        _marker: PhantomData,
    };
    assert_eq!(create_railroad(&tagged, &Options::new()), text("Hello, "));
}

#[test]
fn test_token_shaped_generic_needs_no_capability() {
    let cell = Cell(String::from("ignored"));
    assert_eq!(
        create_railroad(&cell, &Options::new()),
        Component::token(TokenKind::Production, "cell")
    );

    let options = Options::new();
    let filled: Slot<Hello, u32> = Slot::Filled(Hello, 7);
    let empty: Slot<Hello, u32> = Slot::Empty(7);
    assert_eq!(create_railroad(&filled, &options), text("Hello, "));
    assert_eq!(create_railroad(&empty, &options), text("empty"));
}
