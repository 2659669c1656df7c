//! Header mapping.
//!
//! Uploaded spreadsheets name their columns however they like ("Client ID",
//! "client_name", "Priority"). A [`HeaderMapping`] renames raw headers to
//! canonical ones before normalization. Where the mapping comes from is
//! pluggable through [`HeaderMapper`]: a hand-written table, the built-in
//! [`LookupHeaderMapper`], or an external suggestion service.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::error::Result;
use crate::models::{EntityKind, RawRow};

/// Raw header → canonical header.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HeaderMapping {
    map: HashMap<String, String>,
}

impl HeaderMapping {
    /// The mapping that leaves every header unchanged.
    pub fn identity() -> Self {
        Self::default()
    }

    /// Maps `raw` to `canonical`.
    pub fn with(mut self, raw: impl Into<String>, canonical: impl Into<String>) -> Self {
        self.map.insert(raw.into(), canonical.into());
        self
    }

    /// The canonical header for `raw`, or `raw` itself when unmapped.
    pub fn resolve<'a>(&'a self, raw: &'a str) -> &'a str {
        self.map.get(raw).map(String::as_str).unwrap_or(raw)
    }

    /// Renames the keys of one row.
    ///
    /// Unmapped headers pass through. A renamed header never overwrites a
    /// header that already carries the target name and is not itself
    /// renamed. Among several renamed headers with the same target, the
    /// alphabetically last raw header wins.
    pub fn apply(&self, row: &RawRow) -> RawRow {
        let mut out = RawRow::new();
        for (raw, value) in row {
            let key = self.resolve(raw);
            if key != raw.as_str() && row.contains_key(key) && !self.map.contains_key(key) {
                tracing::debug!(raw = %raw, canonical = %key, "Header already present, mapping skipped");
                continue;
            }
            out.insert(key.to_string(), value.clone());
        }
        out
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for HeaderMapping {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            map: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

/// A source of header mappings.
///
/// Implementations backed by a remote service may fail; callers should go
/// through [`map_or_identity`] so a failure degrades to the raw headers.
pub trait HeaderMapper {
    /// Suggests canonical headers for `raw_headers` of an entity kind.
    ///
    /// Headers the mapper cannot place are left out of the mapping.
    fn map_headers(&self, raw_headers: &[String], kind: EntityKind) -> Result<HeaderMapping>;
}

/// Deterministic mapper that matches headers by their alphanumeric content,
/// ignoring case, whitespace, underscores, and hyphens.
///
/// `"Client ID"`, `"client_id"`, and `"CLIENT-ID"` all map to `ClientID`.
#[derive(Debug, Clone, Copy, Default)]
pub struct LookupHeaderMapper;

fn fold(header: &str) -> String {
    header
        .chars()
        .filter(|c| c.is_alphanumeric())
        .flat_map(char::to_lowercase)
        .collect()
}

impl HeaderMapper for LookupHeaderMapper {
    fn map_headers(&self, raw_headers: &[String], kind: EntityKind) -> Result<HeaderMapping> {
        let canonical: HashMap<String, &str> = kind
            .canonical_headers()
            .iter()
            .map(|h| (fold(h), *h))
            .collect();

        Ok(raw_headers
            .iter()
            .filter_map(|raw| {
                canonical
                    .get(&fold(raw))
                    .filter(|c| **c != raw.as_str())
                    .map(|c| (raw.clone(), c.to_string()))
            })
            .collect())
    }
}

/// Asks `mapper` for a mapping, falling back to the identity mapping when
/// it fails.
pub fn map_or_identity(
    mapper: &dyn HeaderMapper,
    raw_headers: &[String],
    kind: EntityKind,
) -> HeaderMapping {
    match mapper.map_headers(raw_headers, kind) {
        Ok(mapping) => mapping,
        Err(e) => {
            tracing::warn!(%kind, error = %e, "Header mapping failed, using raw headers");
            HeaderMapping::identity()
        }
    }
}

/// Collects the headers of an upload in first-seen order.
pub fn raw_headers(rows: &[RawRow]) -> Vec<String> {
    let mut headers: Vec<String> = Vec::new();
    for row in rows {
        for key in row.keys() {
            if !headers.contains(key) {
                headers.push(key.clone());
            }
        }
    }
    headers
}
