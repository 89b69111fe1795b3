//! Node records from JSON or JSON5 datasets.
//!
//! A dataset is an array of objects. `id` is required (string or integer);
//! `number` must be a JSON string so its digits survive verbatim;
//! `proves`/`provenBy` arrays fill the relation lists as given; every other
//! scalar field lands in the property bag as a string.

use crate::error::{Error, Result};
use crate::ir::{NUMBER_KEY, Node, NodeStore, Properties};
use serde_json::Value;
use std::path::Path;

const ID_KEY: &str = "id";
const PROVES_KEY: &str = "proves";
const PROVEN_BY_KEY: &str = "provenBy";

pub fn load_dataset(path: &Path) -> anyhow::Result<NodeStore> {
    let contents = std::fs::read_to_string(path)?;
    let store = parse_dataset(&contents)?;
    tracing::info!(path = %path.display(), nodes = store.len(), "loaded dataset");
    Ok(store)
}

pub fn parse_dataset(input: &str) -> Result<NodeStore> {
    let value = match serde_json::from_str::<Value>(input) {
        Ok(value) => value,
        Err(_) => json5::from_str::<Value>(input).map_err(|err| Error::Dataset(err.to_string()))?,
    };
    let Value::Array(records) = value else {
        return Err(Error::Dataset("expected an array of node records".to_string()));
    };

    let mut store = NodeStore::new();
    for (idx, record) in records.into_iter().enumerate() {
        store.insert(record_to_node(idx, record)?)?;
    }
    Ok(store)
}

fn record_to_node(idx: usize, record: Value) -> Result<Node> {
    let Value::Object(fields) = record else {
        return Err(Error::Dataset(format!("record {idx} is not an object")));
    };

    let mut id = None;
    let mut properties = Properties::new();
    let mut proves = Vec::new();
    let mut proven_by = Vec::new();
    for (key, value) in fields {
        match key.as_str() {
            ID_KEY => id = scalar_text(&value),
            PROVES_KEY => proves = id_list(idx, &key, value)?,
            PROVEN_BY_KEY => proven_by = id_list(idx, &key, value)?,
            NUMBER_KEY => match value {
                Value::String(text) => {
                    properties.insert(key, text);
                }
                other => {
                    return Err(Error::Dataset(format!(
                        "record {idx}: `number` must be a string, got {other}"
                    )));
                }
            },
            _ => {
                if let Some(text) = scalar_text(&value) {
                    properties.insert(key, text);
                } else if !value.is_null() {
                    tracing::warn!(record = idx, field = %key, "skipping non-scalar property");
                }
            }
        }
    }

    let id = id.ok_or_else(|| Error::Dataset(format!("record {idx} has no usable `id`")))?;
    let mut node = Node::new(id, properties);
    node.proves = proves;
    node.proven_by = proven_by;
    Ok(node)
}

fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(text) => Some(text.clone()),
        Value::Number(number) => Some(number.to_string()),
        Value::Bool(flag) => Some(flag.to_string()),
        _ => None,
    }
}

fn id_list(idx: usize, key: &str, value: Value) -> Result<Vec<String>> {
    let Value::Array(items) = value else {
        return Err(Error::Dataset(format!(
            "record {idx}: `{key}` must be an array of ids"
        )));
    };
    items
        .iter()
        .map(|item| {
            scalar_text(item)
                .ok_or_else(|| Error::Dataset(format!("record {idx}: bad id in `{key}`")))
        })
        .collect()
}
