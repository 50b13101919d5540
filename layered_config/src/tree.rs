//! Source-agnostic tree representation of parsed documents.
//!
//! Documents are parsed into a [`Node`] before the schema walk begins, so the
//! merge engine never depends on a particular parser. Scalars keep their
//! textual form; conversion to typed values happens later, against the
//! declared field kind.
//!
//! YAML sources build their trees from the parser's event stream, so plain
//! scalars arrive exactly as written. The [`Deserialize`] impl serves other
//! self-describing formats, whose numbers are already parsed and are
//! rendered back to text.

use std::fmt;

use serde::de::{self, Deserialize, Deserializer, MapAccess, SeqAccess, Visitor};

/// Parsed document node.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum Node {
    /// Explicit null or an empty document.
    #[default]
    Null,
    /// Any scalar, kept as text.
    Scalar(String),
    /// Ordered list of nodes.
    Sequence(Vec<Node>),
    /// Ordered key/value pairs.
    Mapping(Vec<(String, Node)>),
}

/// Variant tag of a [`Node`], used in diagnostics.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NodeKind {
    /// [`Node::Null`].
    Null,
    /// [`Node::Scalar`].
    Scalar,
    /// [`Node::Sequence`].
    Sequence,
    /// [`Node::Mapping`].
    Map,
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Null => "Null",
            Self::Scalar => "Scalar",
            Self::Sequence => "Sequence",
            Self::Map => "Map",
        };
        f.write_str(name)
    }
}

impl Node {
    /// Shorthand for building a scalar node.
    ///
    /// # Examples
    ///
    /// ```
    /// use layered_config::tree::Node;
    /// assert_eq!(Node::scalar("42"), Node::Scalar(String::from("42")));
    /// ```
    #[must_use]
    pub fn scalar(text: impl Into<String>) -> Self {
        Self::Scalar(text.into())
    }

    /// Returns the variant tag.
    #[must_use]
    pub const fn kind(&self) -> NodeKind {
        match self {
            Self::Null => NodeKind::Null,
            Self::Scalar(_) => NodeKind::Scalar,
            Self::Sequence(_) => NodeKind::Sequence,
            Self::Mapping(_) => NodeKind::Map,
        }
    }

    /// Looks up `key` when this node is a mapping.
    ///
    /// Returns `None` for missing keys and for non-mapping nodes.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Self> {
        match self {
            Self::Mapping(entries) => entries
                .iter()
                .find_map(|(k, v)| (k == key).then_some(v)),
            Self::Null | Self::Scalar(_) | Self::Sequence(_) => None,
        }
    }

    /// Returns the scalar text, if any.
    #[must_use]
    pub fn as_scalar(&self) -> Option<&str> {
        match self {
            Self::Scalar(text) => Some(text),
            Self::Null | Self::Sequence(_) | Self::Mapping(_) => None,
        }
    }

    /// Returns the mapping entries, if any.
    #[must_use]
    pub fn as_mapping(&self) -> Option<&[(String, Self)]> {
        match self {
            Self::Mapping(entries) => Some(entries),
            Self::Null | Self::Scalar(_) | Self::Sequence(_) => None,
        }
    }
}

struct NodeVisitor;

impl<'de> Visitor<'de> for NodeVisitor {
    type Value = Node;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a scalar, sequence, mapping or null")
    }

    fn visit_bool<E: de::Error>(self, v: bool) -> Result<Node, E> {
        Ok(Node::Scalar(v.to_string()))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Node, E> {
        Ok(Node::Scalar(v.to_string()))
    }

    fn visit_i128<E: de::Error>(self, v: i128) -> Result<Node, E> {
        Ok(Node::Scalar(v.to_string()))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Node, E> {
        Ok(Node::Scalar(v.to_string()))
    }

    fn visit_u128<E: de::Error>(self, v: u128) -> Result<Node, E> {
        Ok(Node::Scalar(v.to_string()))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<Node, E> {
        Ok(Node::Scalar(v.to_string()))
    }

    fn visit_char<E: de::Error>(self, v: char) -> Result<Node, E> {
        Ok(Node::Scalar(v.to_string()))
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Node, E> {
        Ok(Node::Scalar(v.to_owned()))
    }

    fn visit_string<E: de::Error>(self, v: String) -> Result<Node, E> {
        Ok(Node::Scalar(v))
    }

    fn visit_unit<E: de::Error>(self) -> Result<Node, E> {
        Ok(Node::Null)
    }

    fn visit_none<E: de::Error>(self) -> Result<Node, E> {
        Ok(Node::Null)
    }

    fn visit_some<D: Deserializer<'de>>(self, deserializer: D) -> Result<Node, D::Error> {
        Node::deserialize(deserializer)
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Node, A::Error> {
        let mut items = Vec::with_capacity(seq.size_hint().unwrap_or(0));
        while let Some(item) = seq.next_element::<Node>()? {
            items.push(item);
        }
        Ok(Node::Sequence(items))
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Node, A::Error> {
        let mut entries = Vec::with_capacity(map.size_hint().unwrap_or(0));
        while let Some(key) = map.next_key::<Node>()? {
            let Node::Scalar(key_text) = key else {
                return Err(de::Error::custom(format!(
                    "mapping keys must be scalars, found {}",
                    key.kind()
                )));
            };
            let value = map.next_value::<Node>()?;
            entries.push((key_text, value));
        }
        Ok(Node::Mapping(entries))
    }
}

impl<'de> Deserialize<'de> for Node {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(NodeVisitor)
    }
}
