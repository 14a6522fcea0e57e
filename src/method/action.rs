//! Action suffixes recognized on `<method><Action>` names.

use std::fmt;

use crate::error::{CacheError, Result};

/// Length in bytes of every action suffix.
pub const ACTION_SUFFIX_LEN: usize = 5;

// == Action ==
/// What a suffixed call does with the cache.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    /// Serve from cache, computing and storing on a miss
    Cache,
    /// Delete the entry for one argument list
    Clear,
    /// Delete every entry of the method
    Flush,
}

impl Action {
    /// Exact, case-sensitive suffix lookup.
    pub fn from_suffix(suffix: &str) -> Option<Self> {
        match suffix {
            "Cache" => Some(Action::Cache),
            "Clear" => Some(Action::Clear),
            "Flush" => Some(Action::Flush),
            _ => None,
        }
    }

    pub fn suffix(self) -> &'static str {
        match self {
            Action::Cache => "Cache",
            Action::Clear => "Clear",
            Action::Flush => "Flush",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.suffix())
    }
}

// == Method Call ==
/// A `<method><Action>` name split into base method and action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MethodCall<'a> {
    pub method: &'a str,
    pub action: Action,
}

impl<'a> MethodCall<'a> {
    /// Splits `name` into its base method and trailing action.
    ///
    /// `class` only feeds the error message.
    pub fn parse(class: &str, name: &'a str) -> Result<Self> {
        if name.len() < ACTION_SUFFIX_LEN {
            return Err(CacheError::no_such_method(class, name));
        }

        let split = name.len() - ACTION_SUFFIX_LEN;
        if !name.is_char_boundary(split) {
            return Err(CacheError::no_such_method(class, name));
        }

        let (method, suffix) = name.split_at(split);
        let action =
            Action::from_suffix(suffix).ok_or_else(|| CacheError::no_such_method(class, method))?;

        Ok(Self { method, action })
    }
}
