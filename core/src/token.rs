use crate::Error;

/// Raw code of [`TokenKind::Production`].
pub const PRODUCTION: u8 = 1;
/// Raw code of [`TokenKind::Text`].
pub const TEXT: u8 = 2;
/// Raw code of [`TokenKind::AnyCase`].
pub const ANYCASE: u8 = 3;
/// Raw code of [`TokenKind::Description`].
pub const DESCRIPTION: u8 = 4;

/// Classifies the text carried by a terminal [`Token`].
///
/// The numeric codes (`1..=4`) are part of the tree boundary; renderers that
/// only see raw codes can map them back with [`TokenKind::from_code`].
#[cfg_attr(feature = "fuzz", derive(arbitrary::Arbitrary))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum TokenKind {
    /// A reference to a named grammar rule, usually drawn as a box.
    Production = PRODUCTION,
    /// Literal text matched exactly.
    Text = TEXT,
    /// Literal text matched case-insensitively.
    AnyCase = ANYCASE,
    /// Free-form descriptive text, not matched literally.
    Description = DESCRIPTION,
}

impl TokenKind {
    /// Every kind, in code order.
    pub const ALL: [TokenKind; 4] = [
        TokenKind::Production,
        TokenKind::Text,
        TokenKind::AnyCase,
        TokenKind::Description,
    ];

    /// Numeric code of this kind.
    #[inline]
    pub const fn code(self) -> u8 {
        self as u8
    }

    /// Looks up the kind for a raw code.
    ///
    /// Returns [`Error::InvalidTokenType`] for anything outside `1..=4`.
    pub fn from_code(code: i64) -> Result<Self, Error> {
        match code {
            1 => Ok(TokenKind::Production),
            2 => Ok(TokenKind::Text),
            3 => Ok(TokenKind::AnyCase),
            4 => Ok(TokenKind::Description),
            _ => Err(Error::InvalidTokenType { code }),
        }
    }
}

impl TryFrom<i64> for TokenKind {
    type Error = Error;

    #[inline]
    fn try_from(code: i64) -> Result<Self, Self::Error> {
        Self::from_code(code)
    }
}

impl TryFrom<u8> for TokenKind {
    type Error = Error;

    #[inline]
    fn try_from(code: u8) -> Result<Self, Self::Error> {
        Self::from_code(i64::from(code))
    }
}

impl From<TokenKind> for u8 {
    #[inline]
    fn from(kind: TokenKind) -> Self {
        kind.code()
    }
}

/// A terminal diagram element.
///
/// Fields are private so a token cannot change after construction. Use
/// [`Token::new`] when the kind is known statically and
/// [`Token::from_code`] when it arrives as a raw number.
#[cfg_attr(feature = "fuzz", derive(arbitrary::Arbitrary))]
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Token {
    kind: TokenKind,
    text: String,
}

impl Token {
    #[inline]
    pub fn new(kind: TokenKind, text: impl Into<String>) -> Self {
        Self {
            kind,
            text: text.into(),
        }
    }

    /// Builds a token from a raw kind code, validating it first.
    ///
    /// # Example
    ///
    /// ```ignore
    /// let hello = Token::from_code(2, "Hello")?;
    /// assert_eq!(hello.kind(), TokenKind::Text);
    ///
    /// assert!(Token::from_code(0, "Hello").is_err());
    /// ```
    pub fn from_code(code: i64, text: impl Into<String>) -> Result<Self, Error> {
        let kind = TokenKind::from_code(code)?;
        Ok(Self::new(kind, text))
    }

    #[inline]
    pub fn production(name: impl Into<String>) -> Self {
        Self::new(TokenKind::Production, name)
    }

    /// A [`TokenKind::Text`] token.
    #[inline]
    pub fn literal(text: impl Into<String>) -> Self {
        Self::new(TokenKind::Text, text)
    }

    #[inline]
    pub fn anycase(text: impl Into<String>) -> Self {
        Self::new(TokenKind::AnyCase, text)
    }

    #[inline]
    pub fn description(text: impl Into<String>) -> Self {
        Self::new(TokenKind::Description, text)
    }

    #[inline]
    pub fn kind(&self) -> TokenKind {
        self.kind
    }

    /// Raw numeric code of [`Token::kind`].
    #[inline]
    pub fn code(&self) -> u8 {
        self.kind.code()
    }

    #[inline]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Consumes the token, returning its kind and text.
    #[inline]
    pub fn into_parts(self) -> (TokenKind, String) {
        (self.kind, self.text)
    }
}
