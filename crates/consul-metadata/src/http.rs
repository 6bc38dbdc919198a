// Copyright 2025-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

//! HTTP implementation of [`AgentClient`] against the Consul agent API.
//!
//! Only `GET /v1/agent/self` is implemented.

use std::collections::HashMap;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue};
use reqwest::Client;
use serde_json::{Map, Value};
use tracing::debug;

use crate::client::{AgentClient, AgentSelfResponse};
use crate::config::HttpAgentClientConfig;
use crate::error::ClientError;

const AGENT_SELF_ENDPOINT: &str = "/v1/agent/self";
const TOKEN_HEADER: &str = "X-Consul-Token";

#[derive(Debug, Clone)]
pub struct HttpAgentClient {
    client: Client,
    agent_self_url: String,
}

impl HttpAgentClient {
    pub fn new(config: &HttpAgentClientConfig) -> Result<Self, ClientError> {
        config.validate()?;

        let mut headers = HeaderMap::new();
        if let Some(token) = &config.token {
            let value = HeaderValue::from_str(token).map_err(|_| {
                ClientError::InvalidConfig("token contains invalid header characters".to_string())
            })?;
            headers.insert(TOKEN_HEADER, value);
        }

        let client = Client::builder()
            .default_headers(headers)
            .timeout(config.timeout())
            .build()?;

        Ok(Self {
            client,
            agent_self_url: format!(
                "{}{AGENT_SELF_ENDPOINT}",
                config.address.trim().trim_end_matches('/')
            ),
        })
    }
}

#[async_trait]
impl AgentClient for HttpAgentClient {
    async fn agent_self(&self) -> Result<AgentSelfResponse, ClientError> {
        debug!("GET {}", self.agent_self_url);
        let response = self.client.get(&self.agent_self_url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ClientError::Status(status.as_u16()));
        }

        let body = response.bytes().await?;
        // Sections such as `Coord` may be null and are skipped. Any other
        // non-object section fails decoding.
        let sections: HashMap<String, Option<Map<String, Value>>> =
            serde_json::from_slice(&body)?;

        Ok(sections
            .into_iter()
            .filter_map(|(name, section)| section.map(|map| (name, map)))
            .collect())
    }
}
