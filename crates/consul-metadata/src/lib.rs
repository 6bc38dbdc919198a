// Copyright 2025-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

//! Node metadata from the local Consul agent.
//!
//! [`ConsulMetadataProvider`] asks an [`AgentClient`] for the agent's
//! self-description once per call and turns it into [`Metadata`]: node
//! identity plus the node meta keys the operator allowed. The provider keeps
//! no state between calls and never retries; errors go back to the caller
//! untouched.
//!
//! ```rust,ignore
//! use consul_metadata::{ConsulMetadataProvider, HttpAgentClient, HttpAgentClientConfig, MetadataProvider};
//!
//! let client = HttpAgentClient::new(&HttpAgentClientConfig::default())?;
//! let provider = ConsulMetadataProvider::new(client, ["rack".to_string()].into());
//! let metadata = provider.metadata().await?;
//! ```

#![deny(clippy::all)]
#![deny(clippy::unwrap_used)]
#![deny(unused_extern_crates)]
#![deny(unreachable_pub)]

pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod provider;
pub mod response;

pub use client::{AgentClient, AgentSelfResponse};
pub use config::{ConsulMetadataConfig, HttpAgentClientConfig};
pub use error::{ClientError, FieldError, FieldProblem, MetadataError};
pub use http::HttpAgentClient;
pub use provider::{ConsulMetadataProvider, Metadata, MetadataProvider};
