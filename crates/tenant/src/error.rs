// Copyright 2025-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

/// Errors returned while resolving the tenant for a batch
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TenantError {
    /// The tenant key carried more than one value, so the batch cannot be
    /// routed to a single tenant.
    #[error("multiple values found for tenant key '{key}' ({count} values)")]
    MultipleValues { key: String, count: usize },

    #[error("Invalid tenant configuration: {0}")]
    InvalidConfig(String),
}
