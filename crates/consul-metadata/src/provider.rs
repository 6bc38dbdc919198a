// Copyright 2025-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

//! Node metadata from the local Consul agent.
//!
//! Downstream processors key host dashboards and alerts by node identity, so
//! a response that does not establish `NodeName`, `Datacenter` and `NodeID`
//! is an error. Node meta is optional and filtered through an operator
//! allow-list before it leaves this crate.

use std::collections::{HashMap, HashSet};

use async_trait::async_trait;
use tracing::debug;

use crate::client::AgentClient;
use crate::error::MetadataError;
use crate::response::AgentSelf;

/// Identity and labels of the node the agent runs on.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Metadata {
    pub node_id: String,
    pub hostname: String,
    pub datacenter: String,
    /// Allowed node meta. `None` when the agent reported no meta at all.
    pub host_metadata: Option<HashMap<String, String>>,
}

impl From<AgentSelf> for Metadata {
    fn from(agent: AgentSelf) -> Self {
        Self {
            node_id: agent.node_id,
            hostname: agent.node_name,
            datacenter: agent.datacenter,
            host_metadata: agent.labels,
        }
    }
}

#[async_trait]
pub trait MetadataProvider: Send + Sync {
    /// Fetches fresh metadata. Nothing is cached between calls.
    async fn metadata(&self) -> Result<Metadata, MetadataError>;
}

#[derive(Debug, Clone)]
pub struct ConsulMetadataProvider<C> {
    client: C,
    allowed_labels: HashSet<String>,
}

impl<C: AgentClient> ConsulMetadataProvider<C> {
    pub fn new(client: C, allowed_labels: HashSet<String>) -> Self {
        Self {
            client,
            allowed_labels,
        }
    }
}

#[async_trait]
impl<C: AgentClient> MetadataProvider for ConsulMetadataProvider<C> {
    async fn metadata(&self) -> Result<Metadata, MetadataError> {
        debug!("Querying local agent for node metadata");
        let response = self.client.agent_self().await?;

        let agent =
            AgentSelf::decode(&response, &self.allowed_labels).map_err(MetadataError::Malformed)?;
        debug!(
            node = %agent.node_name,
            datacenter = %agent.datacenter,
            kept_labels = agent.labels.as_ref().map_or(0, HashMap::len),
            dropped_labels = agent.dropped_labels,
            "Resolved node metadata"
        );

        Ok(agent.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::AgentSelfResponse;
    use crate::error::{ClientError, FieldError};
    use proptest::prelude::*;
    use serde_json::{json, Value};
    use std::error::Error as _;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use tracing_test::traced_test;

    /// Agent client returning a canned response and counting queries.
    struct MockAgentClient {
        response: Option<Value>,
        calls: AtomicUsize,
    }

    impl MockAgentClient {
        fn responding(response: Value) -> Self {
            Self {
                response: Some(response),
                calls: AtomicUsize::new(0),
            }
        }

        fn failing() -> Self {
            Self {
                response: None,
                calls: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl AgentClient for MockAgentClient {
        async fn agent_self(&self) -> Result<AgentSelfResponse, ClientError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            match &self.response {
                Some(response) => Ok(serde_json::from_value(response.clone())?),
                None => Err(ClientError::Other("connection refused".into())),
            }
        }
    }

    fn node_config() -> Value {
        json!({"NodeName": "node-1", "Datacenter": "dc1", "NodeID": "abc-123"})
    }

    fn allowed(keys: &[&str]) -> HashSet<String> {
        keys.iter().map(ToString::to_string).collect()
    }

    #[tokio::test]
    async fn test_metadata_filters_labels() {
        let client = MockAgentClient::responding(json!({
            "Config": node_config(),
            "Meta": {"rack": "12", "zone": "us-east"},
        }));
        let provider = ConsulMetadataProvider::new(client, allowed(&["rack"]));

        let metadata = provider.metadata().await.expect("metadata failed");

        assert_eq!(
            metadata,
            Metadata {
                node_id: "abc-123".to_string(),
                hostname: "node-1".to_string(),
                datacenter: "dc1".to_string(),
                host_metadata: Some(HashMap::from([("rack".to_string(), "12".to_string())])),
            }
        );
    }

    #[tokio::test]
    async fn test_metadata_without_meta_section() {
        let client = MockAgentClient::responding(json!({"Config": node_config()}));
        let provider = ConsulMetadataProvider::new(client, allowed(&["rack"]));

        let metadata = provider.metadata().await.expect("metadata failed");

        assert_eq!(metadata.hostname, "node-1");
        assert_eq!(metadata.host_metadata, None);
    }

    #[tokio::test]
    async fn test_metadata_missing_config() {
        let client = MockAgentClient::responding(json!({"Meta": {"rack": "12"}}));
        let provider = ConsulMetadataProvider::new(client, allowed(&["rack"]));

        let error = provider.metadata().await.expect_err("metadata succeeded");

        assert!(matches!(error, MetadataError::Malformed(_)));
        assert_eq!(error.fields(), [FieldError::missing("Config")]);
    }

    #[tokio::test]
    async fn test_metadata_missing_identity_fields() {
        let client = MockAgentClient::responding(json!({
            "Config": {"NodeName": "node-1"},
        }));
        let provider = ConsulMetadataProvider::new(client, HashSet::new());

        let error = provider.metadata().await.expect_err("metadata succeeded");

        assert_eq!(
            error.fields(),
            [
                FieldError::missing("Config.Datacenter"),
                FieldError::missing("Config.NodeID"),
            ]
        );
    }

    #[tokio::test]
    async fn test_metadata_client_failure() {
        let provider = ConsulMetadataProvider::new(MockAgentClient::failing(), allowed(&["rack"]));

        let error = provider.metadata().await.expect_err("metadata succeeded");

        assert!(matches!(error, MetadataError::Client(ClientError::Other(_))));
        assert_eq!(error.to_string(), "failed to get local agent information");
        assert_eq!(
            error.source().map(ToString::to_string).as_deref(),
            Some("connection refused")
        );
    }

    #[tokio::test]
    async fn test_metadata_queries_once_per_call() {
        let client = Arc::new(MockAgentClient::responding(json!({"Config": node_config()})));
        let provider = ConsulMetadataProvider::new(Arc::clone(&client), HashSet::new());

        provider.metadata().await.expect("metadata failed");
        assert_eq!(client.calls.load(Ordering::SeqCst), 1);

        provider.metadata().await.expect("metadata failed");
        assert_eq!(client.calls.load(Ordering::SeqCst), 2);

        // A failing call is not retried.
        let failing = Arc::new(MockAgentClient::failing());
        let provider = ConsulMetadataProvider::new(Arc::clone(&failing), HashSet::new());
        assert!(provider.metadata().await.is_err());
        assert_eq!(failing.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    #[traced_test]
    async fn test_metadata_logs_label_counts() {
        let client = MockAgentClient::responding(json!({
            "Config": node_config(),
            "Meta": {"rack": "12", "zone": "us-east", "os": "linux"},
        }));
        let provider = ConsulMetadataProvider::new(client, allowed(&["rack"]));

        provider.metadata().await.expect("metadata failed");

        assert!(logs_contain("kept_labels=1"));
        assert!(logs_contain("dropped_labels=2"));
    }

    #[tokio::test]
    async fn test_provider_behind_trait_object() {
        let provider: Box<dyn MetadataProvider> = Box::new(ConsulMetadataProvider::new(
            MockAgentClient::responding(json!({"Config": node_config(), "Meta": {}})),
            allowed(&["rack"]),
        ));

        let metadata = provider.metadata().await.expect("metadata failed");

        assert_eq!(metadata.host_metadata, Some(HashMap::new()));
    }

    fn block_on<F: std::future::Future>(future: F) -> F::Output {
        tokio::runtime::Builder::new_current_thread()
            .build()
            .expect("failed to build runtime")
            .block_on(future)
    }

    proptest! {
        #[test]
        fn prop_host_metadata_is_allowed_intersection(
            raw in prop::collection::hash_map("[a-e]{1,3}", "[a-z0-9]{0,8}", 0..12),
            allow in prop::collection::hash_set("[a-e]{1,3}", 0..12),
        ) {
            let client = MockAgentClient::responding(json!({
                "Config": node_config(),
                "Meta": raw,
            }));
            let provider = ConsulMetadataProvider::new(client, allow.clone());

            let metadata = block_on(provider.metadata()).expect("metadata failed");

            let expected: HashMap<String, String> = raw
                .iter()
                .filter(|(key, _)| allow.contains(*key))
                .map(|(key, value)| (key.clone(), value.clone()))
                .collect();
            prop_assert_eq!(metadata.host_metadata, Some(expected));
        }
    }
}
