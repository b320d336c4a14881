//! Core error types for railkit.
//!
//! Both variants describe caller programming errors. Neither is recovered
//! from inside the crate: a failed construction yields no node and a failed
//! dispatch yields no tree.

use thiserror::Error;

/// Core railkit error type.
///
/// # Example
///
/// ```ignore
/// use railkit::{Error, Token};
///
/// let err = Token::from_code(7, "oops").unwrap_err();
/// assert_eq!(err, Error::InvalidTokenType { code: 7 });
/// ```
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// A token kind code outside the closed range `1..=4`.
    ///
    /// Returned by [`Token::from_code`](crate::Token::from_code) and
    /// [`TokenKind::from_code`](crate::TokenKind::from_code).
    #[error("invalid token type {code}: expected one of 1 (production), 2 (text), 3 (anycase), 4 (description)")]
    InvalidTokenType {
        /// The rejected code.
        code: i64,
    },

    /// A value was handed to the dynamic dispatcher but its type does not
    /// implement [`Railroadable`](crate::Railroadable), or was never
    /// registered with the [`Registry`](crate::Registry).
    #[error("cannot create a railroad diagram for a value of type `{type_name}`: it is not railroadable")]
    InvalidCapability {
        /// Name of the offending value's type.
        type_name: String,
    },
}

impl Error {
    /// Builds an [`Error::InvalidCapability`] for `T`.
    pub fn invalid_capability<T: ?Sized>() -> Self {
        Error::InvalidCapability {
            type_name: std::any::type_name::<T>().to_owned(),
        }
    }

    /// Builds an [`Error::InvalidCapability`] for a type-erased value.
    ///
    /// `dyn Any` only exposes a [`TypeId`](std::any::TypeId), so the name
    /// says so and points at the typed entry point.
    pub fn unregistered_type_id(type_id: std::any::TypeId) -> Self {
        Error::InvalidCapability {
            type_name: format!(
                "unregistered type id {type_id:?} (call Registry::create_railroad_of to see the type name)"
            ),
        }
    }
}
