#![no_main]

use libfuzzer_sys::fuzz_target;
use std::any::Any;

use railkit::{
    Component, Error, Options, Productions, Railroadable, Registry, Token, TokenKind,
    create_railroad,
};

/// Hands out whatever tree it was built with.
struct Fixed(Component);

impl Railroadable for Fixed {
    fn create_railroad(&self, _options: &Options) -> Component {
        self.0.clone()
    }
}

#[derive(Debug, arbitrary::Arbitrary)]
struct Input {
    tree: Component,
    code: i64,
    text: String,
}

fuzz_target!(|input: Input| {
    let Input { tree, code, text } = input;

    // Dispatch returns the producer's tree unchanged; bare trees are refused
    let options = Options::new();
    let registry = Registry::new().with::<Fixed>();
    let fixed = Fixed(tree.clone());
    assert_eq!(create_railroad(&fixed, &options), tree);
    assert_eq!(registry.create_railroad(&fixed as &dyn Any, &options).as_ref(), Ok(&tree));
    assert_eq!(
        registry.create_railroad_of(&tree, &options),
        Err(Error::invalid_capability::<Component>())
    );

    let count = tree.node_count();
    assert!(tree.depth() <= count);
    assert_eq!(1 + tree.children().map(Component::node_count).sum::<usize>(), count);

    let productions = Productions::collect(&tree);
    assert!(productions.len() <= count);

    // Raw codes are accepted exactly when they name a kind
    match Token::from_code(code, text.clone()) {
        Ok(token) => {
            assert!(TokenKind::ALL.contains(&token.kind()));
            assert_eq!(i64::from(token.code()), code);
            assert_eq!(token.text(), text);
        }
        Err(_) => assert!(!(1..=4).contains(&code)),
    }
});
