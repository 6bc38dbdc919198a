// Copyright 2025-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

//! Log batches handed to an exporter.
//!
//! Only the resource level carries anything tenant resolution reads; records
//! are opaque bodies.

use std::collections::HashMap;
use std::fmt;

/// A resource attribute value.
#[derive(Debug, Clone, PartialEq)]
pub enum AttributeValue {
    String(String),
    Bool(bool),
    Int(i64),
    Double(f64),
}

impl fmt::Display for AttributeValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttributeValue::String(s) => f.write_str(s),
            AttributeValue::Bool(b) => write!(f, "{b}"),
            AttributeValue::Int(i) => write!(f, "{i}"),
            AttributeValue::Double(d) => write!(f, "{d}"),
        }
    }
}

impl From<&str> for AttributeValue {
    fn from(value: &str) -> Self {
        AttributeValue::String(value.to_string())
    }
}

impl From<String> for AttributeValue {
    fn from(value: String) -> Self {
        AttributeValue::String(value)
    }
}

impl From<bool> for AttributeValue {
    fn from(value: bool) -> Self {
        AttributeValue::Bool(value)
    }
}

impl From<i64> for AttributeValue {
    fn from(value: i64) -> Self {
        AttributeValue::Int(value)
    }
}

impl From<f64> for AttributeValue {
    fn from(value: f64) -> Self {
        AttributeValue::Double(value)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LogRecord {
    pub body: String,
}

/// Logs emitted by a single resource (service instance, host, ...).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResourceLogs {
    pub attributes: HashMap<String, AttributeValue>,
    pub records: Vec<LogRecord>,
}

impl ResourceLogs {
    #[must_use]
    pub fn with_attribute(mut self, key: &str, value: impl Into<AttributeValue>) -> Self {
        self.attributes.insert(key.to_string(), value.into());
        self
    }

    #[must_use]
    pub fn with_record(mut self, body: &str) -> Self {
        self.records.push(LogRecord {
            body: body.to_string(),
        });
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct LogBatch {
    pub resource_logs: Vec<ResourceLogs>,
}

impl LogBatch {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_resource(mut self, resource: ResourceLogs) -> Self {
        self.resource_logs.push(resource);
        self
    }

    #[must_use]
    pub fn record_count(&self) -> usize {
        self.resource_logs.iter().map(|rl| rl.records.len()).sum()
    }
}
