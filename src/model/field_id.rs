// Copyright 2025 the Pagefields Authors
// SPDX-License-Identifier: Apache-2.0

//! Unique identifiers for placed fields.
//!
//! A `FieldId` is persisted alongside the field, so it must stay unique
//! across editing sessions, not only within one. New ids combine the
//! creation time in milliseconds with a process-wide counter, which keeps
//! them distinct from ids loaded from disk and from each other even when
//! several fields are created within the same millisecond.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

/// Opaque identifier for a field, stable for the field's lifetime
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldId(String);

static FIELD_COUNTER: AtomicU64 = AtomicU64::new(1);

impl FieldId {
    /// Create a new unique field ID
    pub fn next() -> Self {
        let millis = chrono::Utc::now().timestamp_millis();
        let seq = FIELD_COUNTER.fetch_add(1, Ordering::Relaxed);
        Self(format!("field_{millis}_{seq}"))
    }
}

impl From<&str> for FieldId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl fmt::Display for FieldId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn ids_are_unique_within_a_burst() {
        let ids: HashSet<FieldId> = (0..1000).map(|_| FieldId::next()).collect();
        assert_eq!(ids.len(), 1000);
    }

    #[test]
    fn serializes_as_plain_string() {
        let id = FieldId::from("field_1");
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"field_1\"");
    }
}
