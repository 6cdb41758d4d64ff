//! JSON encoding of node records (feature `json`).
//!
//! Records are encoded as `{"value": .., "children": {"<key>": <record>, ..}}`. Children form an
//! ordered JSON object whose member order is the child order. Object keys are strings, integer
//! keys are restored on import because canonical integer strings convert to [NodeKey::Index].
//! A JSON array is accepted for `children` as well and keyed `0..n`.

use super::NodeRecord;
use crate::{Node, NodeKey, TreeError, TreeResult};
use core::fmt;
use serde::{
    de::{self, DeserializeOwned, MapAccess},
    ser::SerializeStruct,
    Deserialize, Deserializer, Serialize, Serializer,
};
use serde_json::{Map, Value};
use std::marker::PhantomData;
use tracing::debug;
use tracing_attributes::instrument;

const FIELDS: &[&str] = &["value", "children"];

/// Serializes ordered `(key, item)` pairs as a map.
struct OrderedMap<'a, K, V>(&'a [(K, V)]);

impl<K: Serialize, V: Serialize> Serialize for OrderedMap<'_, K, V> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.0.iter().map(|(key, item)| (key, item)))
    }
}

impl<V: Serialize> Serialize for NodeRecord<V> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut record = serializer.serialize_struct("NodeRecord", 2)?;
        record.serialize_field("value", &self.value)?;
        record.serialize_field("children", &OrderedMap(&self.children))?;
        record.end()
    }
}

/// Serializes the live tree without cloning values.
impl<T: Serialize> Serialize for Node<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let children = self.children();
        let mut record = serializer.serialize_struct("Node", 2)?;
        record.serialize_field("value", &*self.value())?;
        record.serialize_field("children", &OrderedMap(&children))?;
        record.end()
    }
}

/// Collects map entries in their encoded order.
struct OrderedChildren<V>(Vec<(NodeKey, NodeRecord<V>)>);

impl<'de, V: Deserialize<'de>> Deserialize<'de> for OrderedChildren<V> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct ChildrenVisitor<V>(PhantomData<V>);

        impl<'de, V: Deserialize<'de>> de::Visitor<'de> for ChildrenVisitor<V> {
            type Value = OrderedChildren<V>;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of child records")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
                let mut children = Vec::with_capacity(map.size_hint().unwrap_or(0));
                while let Some((key, child)) = map.next_entry::<NodeKey, NodeRecord<V>>()? {
                    children.push((key, child));
                }
                Ok(OrderedChildren(children))
            }

            fn visit_seq<A: de::SeqAccess<'de>>(self, mut seq: A) -> Result<Self::Value, A::Error> {
                let mut children = vec![];
                while let Some(child) = seq.next_element::<NodeRecord<V>>()? {
                    children.push((NodeKey::from(children.len()), child));
                }
                Ok(OrderedChildren(children))
            }
        }

        deserializer.deserialize_any(ChildrenVisitor(PhantomData))
    }
}

impl<'de, V: Deserialize<'de>> Deserialize<'de> for NodeRecord<V> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct RecordVisitor<V>(PhantomData<V>);

        impl<'de, V: Deserialize<'de>> de::Visitor<'de> for RecordVisitor<V> {
            type Value = NodeRecord<V>;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a node record with `value` and `children`")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
                let mut value = None;
                let mut children = None;
                while let Some(field) = map.next_key::<String>()? {
                    match field.as_str() {
                        "value" if value.is_some() => return Err(de::Error::duplicate_field("value")),
                        "value" => value = Some(map.next_value::<V>()?),
                        "children" if children.is_some() => {
                            return Err(de::Error::duplicate_field("children"))
                        }
                        "children" => children = Some(map.next_value::<OrderedChildren<V>>()?.0),
                        _ => {
                            map.next_value::<de::IgnoredAny>()?;
                        }
                    }
                }
                let value = value.ok_or_else(|| <A::Error as de::Error>::missing_field("value"))?;
                let children =
                    children.ok_or_else(|| <A::Error as de::Error>::missing_field("children"))?;
                Ok(NodeRecord { value, children })
            }
        }

        deserializer.deserialize_struct("NodeRecord", FIELDS, RecordVisitor(PhantomData))
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for Node<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        NodeRecord::<T>::deserialize(deserializer).map(Node::from_array)
    }
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

impl NodeRecord<Value> {
    /// Checks that `value` is shaped like a node record, recursively, and converts it. Values
    /// stay untouched. Nothing is returned unless the whole input is well formed.
    pub fn from_value(value: Value) -> TreeResult<Self> {
        Self::parse(value, "$")
    }

    fn parse(value: Value, path: &str) -> TreeResult<Self> {
        let mut fields = match value {
            Value::Object(fields) => fields,
            other => {
                return Err(TreeError::malformed(
                    path,
                    format!("expected an object, found {}", kind(&other)),
                ))
            }
        };
        let value = fields
            .remove("value")
            .ok_or_else(|| TreeError::malformed(path, "missing field `value`"))?;
        let children = match fields.remove("children") {
            Some(Value::Object(children)) => Self::parse_children(children, path)?,
            Some(Value::Array(children)) => {
                let keyed = children
                    .into_iter()
                    .enumerate()
                    .map(|(index, child)| (index.to_string(), child))
                    .collect::<Map<String, Value>>();
                Self::parse_children(keyed, path)?
            }
            Some(other) => {
                return Err(TreeError::malformed(
                    path,
                    format!("`children` must be an object, found {}", kind(&other)),
                ))
            }
            None => return Err(TreeError::malformed(path, "missing field `children`")),
        };
        Ok(NodeRecord { value, children })
    }

    fn parse_children(children: Map<String, Value>, path: &str) -> TreeResult<Vec<(NodeKey, Self)>> {
        children
            .into_iter()
            .map(|(key, child)| {
                let child = Self::parse(child, &format!("{path}.children.{key}"))?;
                Ok::<_, TreeError>((NodeKey::from(key), child))
            })
            .collect()
    }
}

impl TryFrom<Value> for NodeRecord<Value> {
    type Error = TreeError;

    fn try_from(value: Value) -> TreeResult<Self> {
        NodeRecord::<Value>::from_value(value)
    }
}

impl<T> Node<T> {
    /// The JSON encoding of [Node::to_array].
    pub fn to_json(&self) -> TreeResult<String>
    where
        T: Serialize,
    {
        Ok(serde_json::to_string(self)?)
    }

    pub fn to_json_pretty(&self) -> TreeResult<String>
    where
        T: Serialize,
    {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Encodes the tree with every value passed through `serializer` first.
    pub fn to_json_with<F>(&self, serializer: F) -> TreeResult<String>
    where
        F: FnMut(&T) -> Value,
    {
        Ok(serde_json::to_string(&self.to_array_with(serializer))?)
    }

    /// Rebuilds a tree from JSON text, deserializing every value into `T`.
    pub fn from_json(text: &str) -> TreeResult<Self>
    where
        T: DeserializeOwned,
    {
        Self::from_value(serde_json::from_str(text)?)
    }

    /// Rebuilds a tree from JSON text, passing every raw value through `unserializer`.
    pub fn from_json_with<F>(text: &str, unserializer: F) -> TreeResult<Self>
    where
        F: FnMut(Value) -> T,
    {
        Self::from_value_with(serde_json::from_str(text)?, unserializer)
    }

    /// Rebuilds a tree from an already parsed JSON value. The shape is validated and every value
    /// deserialized before the first node is built.
    #[instrument(level = "debug", skip_all)]
    pub fn from_value(value: Value) -> TreeResult<Self>
    where
        T: DeserializeOwned,
    {
        let record = NodeRecord::<Value>::from_value(value)?.try_map(serde_json::from_value::<T>)?;
        debug!(size = record.size(), "validated node record");
        Ok(Node::from_array(record))
    }

    #[instrument(level = "debug", skip_all)]
    pub fn from_value_with<F>(value: Value, unserializer: F) -> TreeResult<Self>
    where
        F: FnMut(Value) -> T,
    {
        let record = NodeRecord::<Value>::from_value(value)?;
        debug!(size = record.size(), "validated node record");
        Ok(Node::from_array_with(record, unserializer))
    }
}
