//! Method Cache Module
//!
//! Memoizes method results in a key-value store.
//!
//! A call is addressed by class, method and arguments; the cache key is
//! `<prefix><class>:<method>:<md5 of JSON arguments>`, lowercased. Results
//! are stored as JSON text with a TTL chosen by whether the result is empty.

mod action;
mod backend;
mod cache;
mod key;
mod target;
mod value;


pub use action::{Action, MethodCall, ACTION_SUFFIX_LEN};
pub use backend::KeyValueStore;
#[cfg(any(feature = "redis", feature = "http-store"))]
pub(crate) use backend::ttl_secs;
pub use cache::{MethodCache, Outcome};
pub use key::{build_key, escape_glob, normalize_class_name, ArgumentDigest, WILDCARD};
pub use target::CacheTarget;
pub use value::{decode_cached, is_empty_result};
