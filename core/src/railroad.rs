use std::rc::Rc;
use std::sync::Arc;

use crate::component::Component;
use crate::options::Options;

/// Trait for values that can describe themselves as a railroad diagram.
///
/// Grammar objects (parsers, rule definitions, AST descriptors) implement
/// this to produce a [`Component`] tree that a renderer can lay out.
/// Implementations are free to recurse into sub-objects, forwarding
/// `options` unchanged or adjusted, but must not mutate trees they have
/// already handed out.
///
/// # Example
///
/// ```ignore
/// use railkit::{Component, Options, Railroadable, Token};
///
/// struct Literal(&'static str);
///
/// impl Railroadable for Literal {
///     fn create_railroad(&self, _options: &Options) -> Component {
///         Token::literal(self.0).into()
///     }
/// }
///
/// struct First(Vec<Literal>);
///
/// impl Railroadable for First {
///     fn create_railroad(&self, options: &Options) -> Component {
///         Component::or(self.0.iter().map(|l| l.create_railroad(options)))
///     }
/// }
/// ```
///
/// # Blanket Implementations
///
/// - `&T`, `Box<T>`, `Rc<T>`, `Arc<T>`: delegate to the inner value
/// - `Option<T>`: `Nothing` for `None`, delegates for `Some`
/// - `[T]`, `Vec<T>`: a `Then` of each element, in order
///
/// Tree nodes themselves ([`Component`], [`Token`](crate::Token)) are not
/// railroadable: they are what a grammar object produces, not grammar
/// objects. Wrap them in a producer to hand them to the dispatcher.
pub trait Railroadable {
    /// Build the diagram for this value.
    fn create_railroad(&self, options: &Options) -> Component;
}

/// Builds the railroad diagram for `value`.
///
/// The result of `value.create_railroad(options)` is returned as-is.
/// Values without the [`Railroadable`] capability are rejected at compile
/// time; see [`Registry`](crate::Registry) for type-erased values.
#[inline]
pub fn create_railroad<R>(value: &R, options: &Options) -> Component
where
    R: Railroadable + ?Sized,
{
    value.create_railroad(options)
}

impl<T: Railroadable + ?Sized> Railroadable for &T {
    fn create_railroad(&self, options: &Options) -> Component {
        (**self).create_railroad(options)
    }
}

impl<T: Railroadable + ?Sized> Railroadable for Box<T> {
    fn create_railroad(&self, options: &Options) -> Component {
        self.as_ref().create_railroad(options)
    }
}

impl<T: Railroadable + ?Sized> Railroadable for Rc<T> {
    fn create_railroad(&self, options: &Options) -> Component {
        self.as_ref().create_railroad(options)
    }
}

impl<T: Railroadable + ?Sized> Railroadable for Arc<T> {
    fn create_railroad(&self, options: &Options) -> Component {
        self.as_ref().create_railroad(options)
    }
}

impl<T: Railroadable> Railroadable for Option<T> {
    fn create_railroad(&self, options: &Options) -> Component {
        match self {
            Some(value) => value.create_railroad(options),
            None => Component::Nothing,
        }
    }
}

impl<T: Railroadable> Railroadable for [T] {
    fn create_railroad(&self, options: &Options) -> Component {
        Component::then(self.iter().map(|item| item.create_railroad(options)))
    }
}

impl<T: Railroadable> Railroadable for Vec<T> {
    fn create_railroad(&self, options: &Options) -> Component {
        self.as_slice().create_railroad(options)
    }
}
