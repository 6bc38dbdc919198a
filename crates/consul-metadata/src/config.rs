// Copyright 2025-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

use std::collections::HashSet;
use std::time::Duration;

use serde::Deserialize;
use tracing::warn;

use crate::error::ClientError;

const DEFAULT_AGENT_ADDRESS: &str = "http://127.0.0.1:8500";
const DEFAULT_TIMEOUT_MS: u64 = 5000;

/// Configuration of the Consul metadata provider
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ConsulMetadataConfig {
    /// Node meta keys forwarded downstream. Everything else is dropped.
    pub allowed_labels: Vec<String>,
}

impl ConsulMetadataConfig {
    /// Allow-list as a set, trimmed, with blank and duplicate entries removed.
    #[must_use]
    pub fn allowed_label_set(&self) -> HashSet<String> {
        let mut labels = HashSet::with_capacity(self.allowed_labels.len());
        for label in &self.allowed_labels {
            let trimmed = label.trim();
            if trimmed.is_empty() {
                warn!("Ignoring blank entry in allowed_labels");
                continue;
            }
            if !labels.insert(trimmed.to_string()) {
                warn!("Ignoring duplicate entry '{}' in allowed_labels", trimmed);
            }
        }
        labels
    }
}

/// Configuration of the HTTP agent client
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct HttpAgentClientConfig {
    /// Agent base URL (scheme + host + port)
    pub address: String,
    /// ACL token sent as `X-Consul-Token`
    pub token: Option<String>,
    /// Request timeout, in milliseconds
    pub timeout_ms: u64,
}

impl Default for HttpAgentClientConfig {
    fn default() -> Self {
        Self {
            address: DEFAULT_AGENT_ADDRESS.to_string(),
            token: None,
            timeout_ms: DEFAULT_TIMEOUT_MS,
        }
    }
}

impl HttpAgentClientConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ClientError> {
        let address = self.address.trim();
        if address.is_empty() {
            return Err(ClientError::InvalidConfig(
                "agent address cannot be empty".to_string(),
            ));
        }

        if !address.starts_with("http://") && !address.starts_with("https://") {
            return Err(ClientError::InvalidConfig(format!(
                "agent address '{address}' must start with http:// or https://"
            )));
        }

        if self.timeout_ms == 0 {
            return Err(ClientError::InvalidConfig(
                "timeout_ms must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }

    #[must_use]
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}
