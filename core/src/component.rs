//! The closed set of railroad diagram nodes.
//!
//! A diagram is a tree of [`Component`]s. Parents own their children, so a
//! tree can never contain a cycle or share a node between two parents.
//! Nothing here mutates a node once it has been built; renderers receive the
//! finished tree by reference.
//!
//! ```text
//! Component
//!     ├── Nothing
//!     ├── Then  [Component, ...]     left to right
//!     ├── Or    [Component, ...]     alternatives, declaration order
//!     ├── Token (TokenKind, text)
//!     └── Loop  component / delimiter
//! ```

use crate::token::{Token, TokenKind};

/// Internal macro to generate the ordered-children node types.
///
/// `Then` and `Or` share storage and accessors and differ only in meaning.
macro_rules! impl_sequence_node {
    (
        $(#[$attr:meta])*
        $name:ident
    ) => {
        $(#[$attr])*
        #[cfg_attr(feature = "fuzz", derive(arbitrary::Arbitrary))]
        #[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
        pub struct $name {
            children: Vec<Component>,
        }

        impl $name {
            /// Builds the node, keeping `children` in the order given.
            #[inline]
            pub fn new<I>(children: I) -> Self
            where
                I: IntoIterator<Item = Component>,
            {
                Self {
                    children: children.into_iter().collect(),
                }
            }

            #[inline]
            pub fn children(&self) -> &[Component] {
                &self.children
            }

            #[inline]
            pub fn len(&self) -> usize {
                self.children.len()
            }

            #[inline]
            pub fn is_empty(&self) -> bool {
                self.children.is_empty()
            }

            #[inline]
            pub fn iter(&self) -> std::slice::Iter<'_, Component> {
                self.children.iter()
            }

            #[inline]
            pub fn into_children(self) -> Vec<Component> {
                self.children
            }
        }

        impl FromIterator<Component> for $name {
            fn from_iter<I: IntoIterator<Item = Component>>(iter: I) -> Self {
                Self::new(iter)
            }
        }

        impl IntoIterator for $name {
            type Item = Component;
            type IntoIter = std::vec::IntoIter<Component>;

            fn into_iter(self) -> Self::IntoIter {
                self.children.into_iter()
            }
        }

        impl<'a> IntoIterator for &'a $name {
            type Item = &'a Component;
            type IntoIter = std::slice::Iter<'a, Component>;

            fn into_iter(self) -> Self::IntoIter {
                self.children.iter()
            }
        }

        impl AsRef<[Component]> for $name {
            #[inline]
            fn as_ref(&self) -> &[Component] {
                &self.children
            }
        }

        impl From<$name> for Component {
            #[inline]
            fn from(node: $name) -> Self {
                Component::$name(node)
            }
        }
    };
}

impl_sequence_node!(
    /// Left-to-right concatenation of zero or more components.
    Then
);

impl_sequence_node!(
    /// A set of alternative branches.
    ///
    /// Branches keep declaration order. The order carries no priority unless
    /// a renderer chooses to give it one.
    Or
);

/// A repeated unit with a separator drawn between repetitions.
///
/// Both children are boxed and moved in as-is: the box handed to
/// [`Loop::new`] is the box returned by [`Loop::component`].
#[cfg_attr(feature = "fuzz", derive(arbitrary::Arbitrary))]
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Loop {
    component: Box<Component>,
    delimiter: Box<Component>,
}

impl Loop {
    #[inline]
    pub fn new(component: impl Into<Box<Component>>, delimiter: impl Into<Box<Component>>) -> Self {
        Self {
            component: component.into(),
            delimiter: delimiter.into(),
        }
    }

    /// The repeated body.
    #[inline]
    pub fn component(&self) -> &Component {
        &self.component
    }

    /// The separator between repetitions.
    #[inline]
    pub fn delimiter(&self) -> &Component {
        &self.delimiter
    }

    /// Consumes the loop, returning `(component, delimiter)`.
    #[inline]
    pub fn into_parts(self) -> (Box<Component>, Box<Component>) {
        (self.component, self.delimiter)
    }
}

impl From<Loop> for Component {
    #[inline]
    fn from(node: Loop) -> Self {
        Component::Loop(node)
    }
}

impl From<Token> for Component {
    #[inline]
    fn from(token: Token) -> Self {
        Component::Token(token)
    }
}

/// Discriminant of a [`Component`], for code that only needs the node kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ComponentKind {
    Nothing,
    Then,
    Or,
    Token,
    Loop,
}

/// A railroad diagram node.
///
/// The set of variants is closed, so renderers can match exhaustively.
#[cfg_attr(feature = "fuzz", derive(arbitrary::Arbitrary))]
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub enum Component {
    /// An empty segment: a straight line with nothing on it.
    #[default]
    Nothing,
    Then(Then),
    Or(Or),
    Token(Token),
    Loop(Loop),
}

impl Component {
    #[inline]
    pub const fn nothing() -> Self {
        Component::Nothing
    }

    #[inline]
    pub fn then<I>(children: I) -> Self
    where
        I: IntoIterator<Item = Component>,
    {
        Component::Then(Then::new(children))
    }

    #[inline]
    pub fn or<I>(children: I) -> Self
    where
        I: IntoIterator<Item = Component>,
    {
        Component::Or(Or::new(children))
    }

    #[inline]
    pub fn token(kind: TokenKind, text: impl Into<String>) -> Self {
        Component::Token(Token::new(kind, text))
    }

    /// `component` repeated one or more times with `delimiter` in between.
    #[inline]
    pub fn repeat(component: impl Into<Box<Component>>, delimiter: impl Into<Box<Component>>) -> Self {
        Component::Loop(Loop::new(component, delimiter))
    }

    /// An optional segment: `Or[Nothing, component]`.
    pub fn optional(component: Component) -> Self {
        Self::or([Component::Nothing, component])
    }

    /// One or more repetitions with no separator: `Loop(component, Nothing)`.
    pub fn one_or_more(component: Component) -> Self {
        Self::repeat(component, Component::Nothing)
    }

    /// Zero or more repetitions: `Or[Nothing, Loop(component, Nothing)]`.
    pub fn zero_or_more(component: Component) -> Self {
        Self::optional(Self::one_or_more(component))
    }

    /// One or more repetitions separated by `delimiter`.
    pub fn separated(component: Component, delimiter: Component) -> Self {
        Self::repeat(component, delimiter)
    }

    pub fn kind(&self) -> ComponentKind {
        match self {
            Component::Nothing => ComponentKind::Nothing,
            Component::Then(_) => ComponentKind::Then,
            Component::Or(_) => ComponentKind::Or,
            Component::Token(_) => ComponentKind::Token,
            Component::Loop(_) => ComponentKind::Loop,
        }
    }

    #[inline]
    pub fn is_nothing(&self) -> bool {
        matches!(self, Component::Nothing)
    }

    #[inline]
    pub fn as_token(&self) -> Option<&Token> {
        match self {
            Component::Token(token) => Some(token),
            _ => None,
        }
    }

    #[inline]
    pub fn as_then(&self) -> Option<&Then> {
        match self {
            Component::Then(then) => Some(then),
            _ => None,
        }
    }

    #[inline]
    pub fn as_or(&self) -> Option<&Or> {
        match self {
            Component::Or(or) => Some(or),
            _ => None,
        }
    }

    #[inline]
    pub fn as_loop(&self) -> Option<&Loop> {
        match self {
            Component::Loop(node) => Some(node),
            _ => None,
        }
    }

    /// Direct children in drawing order.
    ///
    /// For a [`Loop`] this yields the component, then the delimiter.
    pub fn children(&self) -> impl Iterator<Item = &Component> {
        let none: &[Component] = &[];
        let (seq, pair) = match self {
            Component::Then(then) => (then.children(), [None, None]),
            Component::Or(or) => (or.children(), [None, None]),
            Component::Loop(node) => (none, [Some(node.component()), Some(node.delimiter())]),
            Component::Nothing | Component::Token(_) => (none, [None, None]),
        };
        seq.iter().chain(pair.into_iter().flatten())
    }

    /// Height of the tree rooted here; a leaf has depth 1.
    pub fn depth(&self) -> usize {
        1 + self.children().map(Component::depth).max().unwrap_or(0)
    }

    /// Number of nodes in the tree rooted here, including this one.
    pub fn node_count(&self) -> usize {
        1 + self.children().map(Component::node_count).sum::<usize>()
    }
}
