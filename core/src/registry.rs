//! Runtime capability check for type-erased values.
//!
//! Statically typed callers use [`create_railroad`](crate::create_railroad)
//! and get the capability check from the compiler. Code that only holds a
//! `&dyn Any` (plugin hosts, scripting bridges, heterogeneous grammar
//! tables) cannot name the trait bound, so it registers the railroadable
//! types it knows about and dispatches through a [`Registry`].
//!
//! # Example
//!
//! ```ignore
//! use std::any::Any;
//! use railkit::{Options, Registry};
//!
//! let registry = Registry::new().with::<Greeting>();
//!
//! let value: &dyn Any = &Greeting;
//! let tree = registry.create_railroad(value, &Options::new())?;
//!
//! let bogus: &dyn Any = &42u32;
//! assert!(registry.create_railroad(bogus, &Options::new()).is_err());
//! ```

use std::any::{Any, TypeId};
use std::collections::HashMap;

use crate::component::Component;
use crate::options::Options;
use crate::railroad::Railroadable;
use crate::Error;

type Describe = fn(&dyn Any, &Options) -> Option<Component>;

#[derive(Clone, Copy)]
struct Entry {
    type_name: &'static str,
    describe: Describe,
}

fn describe<T: Railroadable + Any>(value: &dyn Any, options: &Options) -> Option<Component> {
    value
        .downcast_ref::<T>()
        .map(|value| value.create_railroad(options))
}

/// Maps concrete types to their [`Railroadable`] implementation.
///
/// A new registry knows no types. Tree nodes ([`Component`] and
/// [`Token`](crate::Token)) are not railroadable, so they can never be
/// registered and are always rejected.
#[derive(Clone)]
pub struct Registry {
    entries: HashMap<TypeId, Entry>,
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Registry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut names: Vec<&str> = self.entries.values().map(|e| e.type_name).collect();
        names.sort_unstable();
        f.debug_struct("Registry").field("types", &names).finish()
    }
}

impl Registry {
    /// A registry that accepts nothing until types are registered.
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    /// Registers `T`. Registering the same type twice is a no-op.
    pub fn register<T: Railroadable + Any>(&mut self) -> &mut Self {
        let type_name = std::any::type_name::<T>();
        tracing::trace!(type_name, "registering railroadable type");
        self.entries.insert(
            TypeId::of::<T>(),
            Entry {
                type_name,
                describe: describe::<T>,
            },
        );
        self
    }

    /// Registers `T`, returning the registry for chaining.
    #[inline]
    pub fn with<T: Railroadable + Any>(mut self) -> Self {
        self.register::<T>();
        self
    }

    #[inline]
    pub fn contains<T: Any>(&self) -> bool {
        self.entries.contains_key(&TypeId::of::<T>())
    }

    /// Whether the concrete type behind `value` has been registered.
    #[inline]
    pub fn supports(&self, value: &dyn Any) -> bool {
        self.entries.contains_key(&value.type_id())
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Builds the diagram for a type-erased value.
    ///
    /// Fails with [`Error::InvalidCapability`] when the value's type is not
    /// registered. `dyn Any` carries no type name, so the error reports the
    /// [`TypeId`] (see [`Error::unregistered_type_id`]); use
    /// [`Registry::create_railroad_of`] when the type is known statically.
    pub fn create_railroad(&self, value: &dyn Any, options: &Options) -> Result<Component, Error> {
        let type_id = value.type_id();
        let Some(entry) = self.entries.get(&type_id) else {
            tracing::debug!(?type_id, "rejected value without railroad capability");
            return Err(Error::unregistered_type_id(type_id));
        };
        Self::delegate(entry, value, options)
    }

    /// Like [`Registry::create_railroad`], with the type name of `T` in the
    /// error when `T` is not registered.
    pub fn create_railroad_of<T: Any>(&self, value: &T, options: &Options) -> Result<Component, Error> {
        let Some(entry) = self.entries.get(&TypeId::of::<T>()) else {
            let err = Error::invalid_capability::<T>();
            tracing::debug!(type_name = std::any::type_name::<T>(), "rejected value without railroad capability");
            return Err(err);
        };
        Self::delegate(entry, value, options)
    }

    fn delegate(entry: &Entry, value: &dyn Any, options: &Options) -> Result<Component, Error> {
        tracing::trace!(type_name = entry.type_name, "delegating create_railroad");
        // The entry is keyed by the value's TypeId, so the downcast only
        // fails if the map is corrupted; report it as a missing capability.
        (entry.describe)(value, options).ok_or_else(|| Error::InvalidCapability {
            type_name: entry.type_name.to_owned(),
        })
    }
}
