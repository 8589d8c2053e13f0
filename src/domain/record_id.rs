use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

const RECORD_ID_PREFIX: &str = "PSC";

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(String);

impl RecordId {
    pub fn generate(now: DateTime<Utc>) -> Self {
        Self(format!("{}-{}", RECORD_ID_PREFIX, now.timestamp_millis()))
    }

    pub fn from_raw(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
