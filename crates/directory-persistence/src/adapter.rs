//! The storage contract the engine depends on.

use std::fmt;

use crate::error::Result;

/// Lifetime of a stored value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Scope {
    /// Survives a full restart.
    Durable,
    /// Cleared when the session ends.
    Session,
}

impl Scope {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Durable => "durable",
            Self::Session => "session",
        }
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Scoped string key/value storage.
///
/// Values are opaque strings; callers encode structured data as JSON with
/// [`crate::save_json`] and decode it with [`crate::load_json`].
pub trait Persistence {
    /// Read a value. `Ok(None)` means the key is absent.
    fn get(&self, scope: Scope, key: &str) -> Result<Option<String>>;

    /// Write a value, replacing any previous one.
    fn set(&mut self, scope: Scope, key: &str, value: &str) -> Result<()>;

    fn get_durable(&self, key: &str) -> Result<Option<String>> {
        self.get(Scope::Durable, key)
    }

    fn set_durable(&mut self, key: &str, value: &str) -> Result<()> {
        self.set(Scope::Durable, key, value)
    }

    fn get_session(&self, key: &str) -> Result<Option<String>> {
        self.get(Scope::Session, key)
    }

    fn set_session(&mut self, key: &str, value: &str) -> Result<()> {
        self.set(Scope::Session, key, value)
    }
}

impl<P: Persistence + ?Sized> Persistence for Box<P> {
    fn get(&self, scope: Scope, key: &str) -> Result<Option<String>> {
        (**self).get(scope, key)
    }

    fn set(&mut self, scope: Scope, key: &str, value: &str) -> Result<()> {
        (**self).set(scope, key, value)
    }
}

impl<P: Persistence + ?Sized> Persistence for &mut P {
    fn get(&self, scope: Scope, key: &str) -> Result<Option<String>> {
        (**self).get(scope, key)
    }

    fn set(&mut self, scope: Scope, key: &str, value: &str) -> Result<()> {
        (**self).set(scope, key, value)
    }
}
