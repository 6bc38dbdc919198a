// Copyright 2025-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::{Map, Value};

use crate::error::ClientError;

/// Raw agent self-description: top-level sections (`Config`, `Meta`,
/// `Member`, ...) each holding an untyped object.
pub type AgentSelfResponse = HashMap<String, Map<String, Value>>;

/// Access to the local cluster agent.
///
/// Implementations own transport, authentication and timeouts. Callers share
/// one client between tasks, hence `Send + Sync`.
#[async_trait]
pub trait AgentClient: Send + Sync {
    /// Queries the agent's description of itself. One round trip, no retries.
    async fn agent_self(&self) -> Result<AgentSelfResponse, ClientError>;
}

#[async_trait]
impl<T: AgentClient + ?Sized> AgentClient for Arc<T> {
    async fn agent_self(&self) -> Result<AgentSelfResponse, ClientError> {
        (**self).agent_self().await
    }
}
