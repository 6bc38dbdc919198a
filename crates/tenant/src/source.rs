// Copyright 2025-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

//! Tenant sources.
//!
//! A multi-tenant log backend (Loki, for instance) expects every push request
//! to name its tenant, usually through the `X-Scope-OrgID` header. The
//! exporter asks its configured [`TenantSource`] for the tenant of each batch
//! right before sending it.

use tracing::debug;

use crate::batch::LogBatch;
use crate::context::ClientContext;
use crate::error::TenantError;

/// Where the tenant of a batch comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TenantSource {
    /// A fixed tenant for every batch.
    Static { value: String },
    /// The value of a metadata key of the incoming request, such as a header
    /// forwarded by the receiver.
    Context { key: String },
    /// A resource attribute of the batch. Batches are expected to be grouped
    /// per tenant upstream, so only the first resource is consulted.
    Attributes { attribute: String },
}

impl TenantSource {
    /// Resolves the tenant for `batch`.
    ///
    /// An absent tenant resolves to an empty string and is not an error. A
    /// context key carrying more than one value is ambiguous and fails with
    /// [`TenantError::MultipleValues`]; the caller decides whether to drop
    /// the batch or fall back to a default tenant.
    pub fn get_tenant(&self, ctx: &ClientContext, batch: &LogBatch) -> Result<String, TenantError> {
        match self {
            TenantSource::Static { value } => Ok(value.clone()),
            TenantSource::Context { key } => tenant_from_context(key, ctx),
            TenantSource::Attributes { attribute } => Ok(tenant_from_attributes(attribute, batch)),
        }
    }

    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            TenantSource::Static { .. } => "static",
            TenantSource::Context { .. } => "context",
            TenantSource::Attributes { .. } => "attributes",
        }
    }
}

fn tenant_from_context(key: &str, ctx: &ClientContext) -> Result<String, TenantError> {
    match ctx.metadata().get(key) {
        [] => {
            debug!(key, "tenant key not present in client metadata");
            Ok(String::new())
        }
        [tenant] => Ok(tenant.clone()),
        values => Err(TenantError::MultipleValues {
            key: key.to_string(),
            count: values.len(),
        }),
    }
}

fn tenant_from_attributes(attribute: &str, batch: &LogBatch) -> String {
    batch
        .resource_logs
        .first()
        .and_then(|rl| rl.attributes.get(attribute))
        .map(ToString::to_string)
        .unwrap_or_default()
}
