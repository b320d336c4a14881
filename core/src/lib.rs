//! Core data model for railroad (syntax) diagrams.
//!
//! A grammar object implements [`Railroadable`] to describe itself as a
//! [`Component`] tree; a renderer takes the finished tree and lays it out.
//! Layout and drawing live outside this crate.
//!
//! ```text
//! grammar object ──create_railroad(options)──▶ Component tree ──▶ renderer
//! ```

mod component;
mod error;
pub mod options;
mod railroad;
pub mod registry;
mod token;
pub mod visit;

pub use component::{Component, ComponentKind, Loop, Or, Then};
pub use error::Error;
pub use options::{OptionValue, Options};
pub use railroad::{Railroadable, create_railroad};
pub use registry::Registry;
pub use token::{ANYCASE, DESCRIPTION, PRODUCTION, TEXT, Token, TokenKind};
pub use visit::{Productions, Visitor};
