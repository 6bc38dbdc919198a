// Copyright 2025-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

use std::fmt;

use thiserror::Error;

/// Failure of the agent query itself.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("invalid agent client configuration: {0}")]
    InvalidConfig(String),
    /// Transport-level issue (DNS, TLS, socket, timeout, etc.).
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),
    /// The agent answered with a non-success status (ACL denied, agent not ready, ...).
    #[error("unexpected status from agent: {0}")]
    Status(u16),
    #[error("failed to decode agent response: {0}")]
    Decode(#[from] serde_json::Error),
    /// Error raised by a client implementation outside this crate.
    #[error("{0}")]
    Other(Box<dyn std::error::Error + Send + Sync>),
}

/// What is wrong with a field of the agent response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldProblem {
    Missing,
    /// Present, but not a JSON string. Carries the JSON type found instead.
    NotAString(&'static str),
}

/// A single invalid field of the agent response, e.g. `Config.NodeName`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: String,
    pub problem: FieldProblem,
}

impl FieldError {
    #[must_use]
    pub fn missing(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            problem: FieldProblem::Missing,
        }
    }

    #[must_use]
    pub fn not_a_string(field: impl Into<String>, found: &'static str) -> Self {
        Self {
            field: field.into(),
            problem: FieldProblem::NotAString(found),
        }
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.problem {
            FieldProblem::Missing => write!(f, "'{}' is missing", self.field),
            FieldProblem::NotAString(found) => {
                write!(f, "'{}' is {found}, expected a string", self.field)
            }
        }
    }
}

/// Errors returned by a metadata provider.
#[derive(Debug, Error)]
pub enum MetadataError {
    /// The agent query failed. The cause is available through `source()`.
    #[error("failed to get local agent information")]
    Client(#[from] ClientError),

    /// The agent answered, but without the identity a provider needs. Lists
    /// every offending field, not only the first one.
    #[error("malformed agent response: {}", join_fields(.0))]
    Malformed(Vec<FieldError>),
}

impl MetadataError {
    /// Offending fields of a malformed response, empty for client failures.
    #[must_use]
    pub fn fields(&self) -> &[FieldError] {
        match self {
            MetadataError::Malformed(fields) => fields,
            MetadataError::Client(_) => &[],
        }
    }
}

fn join_fields(fields: &[FieldError]) -> String {
    fields
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}
