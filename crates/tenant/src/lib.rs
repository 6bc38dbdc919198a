// Copyright 2025-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

//! Tenant resolution for multi-tenant log export.
//!
//! An exporter configured with a [`TenantSource`] calls
//! [`TenantSource::get_tenant`] once per batch with the request's
//! [`ClientContext`] and attaches the result to the outbound request.
//! Resolution is a pure in-memory lookup: it never suspends, never mutates its
//! inputs and never retries.

#![deny(clippy::all)]
#![deny(clippy::unwrap_used)]
#![deny(unused_extern_crates)]
#![deny(unreachable_pub)]

pub mod batch;
pub mod config;
pub mod context;
pub mod error;
pub mod source;

pub use batch::{AttributeValue, LogBatch, LogRecord, ResourceLogs};
pub use config::{TenantConfig, TenantSourceKind};
pub use context::{ClientContext, ClientMetadata};
pub use error::TenantError;
pub use source::TenantSource;
