// Copyright 2025-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

//! Typed view of the agent self-description.
//!
//! Decoding walks every required field before failing so that a single error
//! tells the operator everything that is wrong with the response.

use std::collections::{HashMap, HashSet};

use serde_json::{Map, Value};

use crate::client::AgentSelfResponse;
use crate::error::FieldError;

const CONFIG_SECTION: &str = "Config";
const META_SECTION: &str = "Meta";

const NODE_NAME_FIELD: &str = "NodeName";
const DATACENTER_FIELD: &str = "Datacenter";
const NODE_ID_FIELD: &str = "NodeID";

/// The parts of the agent self-description metadata is built from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AgentSelf {
    pub node_name: String,
    pub datacenter: String,
    pub node_id: String,
    /// Node meta restricted to the allowed labels. `None` when the agent
    /// reported no `Meta` section.
    pub labels: Option<HashMap<String, String>>,
    /// Number of upstream labels left out by the allow-list.
    pub dropped_labels: usize,
}

impl AgentSelf {
    /// Decodes `response`, keeping only the node meta keys in
    /// `allowed_labels`.
    pub fn decode(
        response: &AgentSelfResponse,
        allowed_labels: &HashSet<String>,
    ) -> Result<Self, Vec<FieldError>> {
        let Some(config) = response.get(CONFIG_SECTION) else {
            return Err(vec![FieldError::missing(CONFIG_SECTION)]);
        };

        let mut errors = Vec::new();
        let node_name = required_string(config, NODE_NAME_FIELD, &mut errors);
        let datacenter = required_string(config, DATACENTER_FIELD, &mut errors);
        let node_id = required_string(config, NODE_ID_FIELD, &mut errors);

        let (labels, dropped_labels) = match response.get(META_SECTION) {
            Some(meta) => {
                let (labels, dropped) = filter_labels(meta, allowed_labels, &mut errors);
                (Some(labels), dropped)
            }
            None => (None, 0),
        };

        match (node_name, datacenter, node_id) {
            (Some(node_name), Some(datacenter), Some(node_id)) if errors.is_empty() => Ok(Self {
                node_name,
                datacenter,
                node_id,
                labels,
                dropped_labels,
            }),
            _ => Err(errors),
        }
    }
}

fn required_string(
    section: &Map<String, Value>,
    field: &str,
    errors: &mut Vec<FieldError>,
) -> Option<String> {
    let path = format!("{CONFIG_SECTION}.{field}");
    match section.get(field) {
        None | Some(Value::Null) => {
            errors.push(FieldError::missing(path));
            None
        }
        Some(Value::String(value)) => Some(value.clone()),
        Some(other) => {
            errors.push(FieldError::not_a_string(path, json_type(other)));
            None
        }
    }
}

fn filter_labels(
    meta: &Map<String, Value>,
    allowed_labels: &HashSet<String>,
    errors: &mut Vec<FieldError>,
) -> (HashMap<String, String>, usize) {
    let mut labels = HashMap::new();
    let mut dropped = 0;
    for (key, value) in meta {
        if !allowed_labels.contains(key) {
            dropped += 1;
            continue;
        }
        match value {
            Value::String(value) => {
                labels.insert(key.clone(), value.clone());
            }
            other => errors.push(FieldError::not_a_string(
                format!("{META_SECTION}.{key}"),
                json_type(other),
            )),
        }
    }
    (labels, dropped)
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
