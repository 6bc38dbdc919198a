// Copyright 2025-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

use serde::Deserialize;

use crate::error::TenantError;
use crate::source::TenantSource;

/// Which kind of [`TenantSource`] to build.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TenantSourceKind {
    Static,
    Context,
    Attributes,
}

/// Tenant section of an exporter configuration, e.g.
///
/// ```yaml
/// tenant:
///   source: context
///   value: X-Scope-OrgID
/// ```
///
/// `value` is the tenant itself for `static`, the metadata key for `context`
/// and the resource attribute name for `attributes`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TenantConfig {
    pub source: TenantSourceKind,
    pub value: String,
}

impl TenantConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<(), TenantError> {
        if self.value.trim().is_empty() {
            return Err(TenantError::InvalidConfig(format!(
                "value cannot be empty for the '{}' tenant source",
                self.source.as_str()
            )));
        }
        Ok(())
    }

    /// Validates the configuration and builds the matching tenant source.
    pub fn build(&self) -> Result<TenantSource, TenantError> {
        self.validate()?;
        let value = self.value.trim().to_string();
        Ok(match self.source {
            TenantSourceKind::Static => TenantSource::Static { value },
            TenantSourceKind::Context => TenantSource::Context { key: value },
            TenantSourceKind::Attributes => TenantSource::Attributes { attribute: value },
        })
    }
}

impl TenantSourceKind {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            TenantSourceKind::Static => "static",
            TenantSourceKind::Context => "context",
            TenantSourceKind::Attributes => "attributes",
        }
    }
}
