//! Keys under which children are stored.

use core::fmt;

/// Key of a child inside its parent. Integer keys are either assigned implicitly when appending
/// or chosen by the caller; names are always chosen by the caller.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum NodeKey {
    Index(i64),
    Name(String),
}

impl NodeKey {
    pub fn as_index(&self) -> Option<i64> {
        match self {
            NodeKey::Index(index) => Some(*index),
            NodeKey::Name(_) => None,
        }
    }

    pub fn as_name(&self) -> Option<&str> {
        match self {
            NodeKey::Index(_) => None,
            NodeKey::Name(name) => Some(name),
        }
    }

    /// Turns a name spelling a canonical integer into the equivalent index, so that
    /// `Name("7")` and `Index(7)` address the same child.
    pub fn normalize(self) -> Self {
        match self {
            NodeKey::Name(name) => NodeKey::from(name),
            index => index,
        }
    }
}

/// Only canonical decimal integers count as indices: `"7"` and `"-7"` do, `"07"`, `"+7"` and
/// `"-0"` do not.
fn parse_canonical_index(key: &str) -> Option<i64> {
    let digits = key.strip_prefix('-').unwrap_or(key);
    let canonical = match digits.as_bytes() {
        [] => false,
        [b'0'] => digits.len() == key.len(),
        [first, rest @ ..] => {
            (b'1'..=b'9').contains(first) && rest.iter().all(u8::is_ascii_digit)
        }
    };
    if canonical {
        key.parse().ok()
    } else {
        None
    }
}

impl From<i64> for NodeKey {
    fn from(index: i64) -> Self {
        NodeKey::Index(index)
    }
}

impl From<i32> for NodeKey {
    fn from(index: i32) -> Self {
        NodeKey::Index(index.into())
    }
}

impl From<usize> for NodeKey {
    fn from(index: usize) -> Self {
        // Indices beyond i64::MAX cannot be addressed by an ordered map anyway
        NodeKey::Index(i64::try_from(index).unwrap_or(i64::MAX))
    }
}

impl From<&str> for NodeKey {
    fn from(key: &str) -> Self {
        match parse_canonical_index(key) {
            Some(index) => NodeKey::Index(index),
            None => NodeKey::Name(key.to_string()),
        }
    }
}

impl From<String> for NodeKey {
    fn from(key: String) -> Self {
        match parse_canonical_index(&key) {
            Some(index) => NodeKey::Index(index),
            None => NodeKey::Name(key),
        }
    }
}

impl From<&NodeKey> for NodeKey {
    fn from(key: &NodeKey) -> Self {
        key.clone()
    }
}

impl fmt::Display for NodeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NodeKey::Index(index) => write!(f, "{index}"),
            NodeKey::Name(name) => write!(f, "{name}"),
        }
    }
}

#[cfg(feature = "json")]
impl serde::Serialize for NodeKey {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[cfg(feature = "json")]
impl<'de> serde::Deserialize<'de> for NodeKey {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        String::deserialize(deserializer).map(NodeKey::from)
    }
}
