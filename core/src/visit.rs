//! Read-only traversal of a [`Component`] tree.

use crate::component::{Component, Loop, Or, Then};
use crate::token::{Token, TokenKind};

/// Visitor trait for traversing railroad diagram trees.
///
/// Implement the `visit_*` methods you care about. Default implementations
/// call the corresponding `walk_*` methods to traverse children, in drawing
/// order.
pub trait Visitor {
    fn visit_component(&mut self, component: &Component) {
        self.walk_component(component);
    }

    fn visit_nothing(&mut self) {}

    fn visit_then(&mut self, then: &Then) {
        self.walk_then(then);
    }

    fn visit_or(&mut self, or: &Or) {
        self.walk_or(or);
    }

    fn visit_token(&mut self, token: &Token) {
        let _ = token; // leaf node
    }

    fn visit_loop(&mut self, node: &Loop) {
        self.walk_loop(node);
    }

    // Walk methods traverse child nodes

    fn walk_component(&mut self, component: &Component) {
        match component {
            Component::Nothing => self.visit_nothing(),
            Component::Then(then) => self.visit_then(then),
            Component::Or(or) => self.visit_or(or),
            Component::Token(token) => self.visit_token(token),
            Component::Loop(node) => self.visit_loop(node),
        }
    }

    fn walk_then(&mut self, then: &Then) {
        for child in then {
            self.visit_component(child);
        }
    }

    fn walk_or(&mut self, or: &Or) {
        for child in or {
            self.visit_component(child);
        }
    }

    fn walk_loop(&mut self, node: &Loop) {
        self.visit_component(node.component());
        self.visit_component(node.delimiter());
    }
}

/// Collects the names of referenced productions.
///
/// Names are kept once each, in the order they are first drawn. Renderers
/// use this to link production boxes to the diagrams of the rules they name.
#[derive(Debug, Default)]
pub struct Productions {
    names: Vec<String>,
}

impl Productions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Names collected so far, in first-seen order.
    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn into_names(self) -> Vec<String> {
        self.names
    }

    /// Collects the productions referenced anywhere in `component`.
    pub fn collect(component: &Component) -> Vec<String> {
        let mut collector = Self::new();
        collector.visit_component(component);
        collector.into_names()
    }
}

impl Visitor for Productions {
    fn visit_token(&mut self, token: &Token) {
        if token.kind() == TokenKind::Production && !self.names.iter().any(|n| n == token.text()) {
            self.names.push(token.text().to_owned());
        }
    }
}
