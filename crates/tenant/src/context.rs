// Copyright 2025-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

//! Request-scoped client information.
//!
//! A receiver attaches the transport metadata of the incoming request (HTTP
//! headers or gRPC metadata) to a [`ClientContext`], which travels with the
//! batch through the pipeline until an exporter asks for it.
//!
//! # Case Insensitivity
//!
//! Keys are normalized to lowercase on insert and on lookup, so
//! `X-Scope-OrgID` and `x-scope-orgid` name the same entry. This mirrors how
//! HTTP/2 and gRPC deliver header names.

use std::collections::HashMap;

/// Multi-valued, case-insensitive transport metadata.
///
/// Keys differing only in case are merged into one entry, so
/// `X-Scope-OrgID: acme` and `x-scope-orgid: globex` on the same request
/// yield two values. Picking the exact-case match instead would route the
/// batch by header spelling; merging makes such a request ambiguous.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClientMetadata {
    entries: HashMap<String, Vec<String>>,
}

impl ClientMetadata {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `value` to the values already stored under `key`.
    pub fn append(&mut self, key: &str, value: impl Into<String>) {
        self.entries
            .entry(key.to_lowercase())
            .or_default()
            .push(value.into());
    }

    /// Returns every value stored under `key` in insertion order. An absent
    /// key yields an empty slice.
    #[must_use]
    pub fn get(&self, key: &str) -> &[String] {
        self.entries
            .get(&key.to_lowercase())
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K, V> FromIterator<(K, Vec<V>)> for ClientMetadata
where
    K: AsRef<str>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, Vec<V>)>>(iter: I) -> Self {
        let mut metadata = ClientMetadata::new();
        for (key, values) in iter {
            for value in values {
                metadata.append(key.as_ref(), value);
            }
        }
        metadata
    }
}

impl<K, V> From<HashMap<K, Vec<V>>> for ClientMetadata
where
    K: AsRef<str>,
    V: Into<String>,
{
    fn from(map: HashMap<K, Vec<V>>) -> Self {
        map.into_iter().collect()
    }
}

/// Client information attached to a request.
#[derive(Debug, Clone, Default)]
pub struct ClientContext {
    metadata: ClientMetadata,
}

impl ClientContext {
    #[must_use]
    pub fn new(metadata: ClientMetadata) -> Self {
        Self { metadata }
    }

    #[must_use]
    pub fn metadata(&self) -> &ClientMetadata {
        &self.metadata
    }
}
