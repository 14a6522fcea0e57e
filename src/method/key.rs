//! Cache key construction.
//!
//! Keys have the shape `<prefix><class>:<method>:<digest>`, lowercased as a
//! whole. The digest is the hex MD5 of the JSON-encoded argument list, or `*`
//! when matching every argument list of a method.

use std::fmt;

use md5::{Digest, Md5};
use serde::Serialize;

use crate::error::Result;

/// Digest placeholder matching any argument list.
pub const WILDCARD: &str = "*";

// == Argument Digest ==
/// The trailing segment of a cache key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArgumentDigest {
    /// Hex MD5 of the JSON-encoded arguments
    Hash(String),
    /// Matches every argument list
    Wildcard,
}

impl ArgumentDigest {
    /// Digests the arguments in call order.
    ///
    /// Pass a slice or tuple so the arguments encode as a JSON array; the same
    /// values in a different order produce a different digest.
    pub fn of<A: Serialize + ?Sized>(args: &A) -> Result<Self> {
        let json = serde_json::to_string(args)?;
        Ok(ArgumentDigest::Hash(md5_hex(&json)))
    }
}

impl fmt::Display for ArgumentDigest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgumentDigest::Hash(hash) => f.write_str(hash),
            ArgumentDigest::Wildcard => f.write_str(WILDCARD),
        }
    }
}

/// Replaces namespace separators (`\` and `::`) with underscores.
pub fn normalize_class_name(class: &str) -> String {
    class.replace("::", "_").replace('\\', "_")
}

/// Builds the full, lowercased cache key.
///
/// With [`ArgumentDigest::Wildcard`] the result is a glob: glob metacharacters
/// in the prefix, class and method are escaped so only the digest segment
/// varies.
pub fn build_key(prefix: &str, class: &str, method: &str, digest: &ArgumentDigest) -> String {
    let head = format!("{}{}:{}:", prefix, normalize_class_name(class), method).to_lowercase();
    match digest {
        ArgumentDigest::Hash(hash) => head + hash,
        ArgumentDigest::Wildcard => escape_glob(&head) + WILDCARD,
    }
}

/// Escapes `*`, `?`, `[`, `]` and `\` so the text matches only itself.
pub fn escape_glob(literal: &str) -> String {
    let mut escaped = String::with_capacity(literal.len());
    for c in literal.chars() {
        if matches!(c, '*' | '?' | '[' | ']' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

fn md5_hex(input: &str) -> String {
    let mut hasher = Md5::new();
    hasher.update(input.as_bytes());
    hex::encode(hasher.finalize())
}
