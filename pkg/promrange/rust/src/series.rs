// Unless explicitly stated otherwise all files in this repository are licensed
// under the Apache License Version 2.0.
// This product includes software developed at Datadog (https://www.datadoghq.com/).
// Copyright 2026-present Datadog, Inc.

use std::collections::BTreeMap;

use crate::metric_name::{LabelSet, canonical_name};

/// Unix timestamp in whole seconds.
pub type Timestamp = i64;

/// One time series of a query result.
///
/// Values are kept exactly as the server encoded them. Two series may share
/// a name; they are never merged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Series {
    name: String,
    samples: BTreeMap<Timestamp, String>,
}

impl Series {
    pub fn new(name: impl Into<String>, samples: BTreeMap<Timestamp, String>) -> Self {
        Self {
            name: name.into(),
            samples,
        }
    }

    /// Builds a series named after its label set.
    pub fn from_labels(labels: &LabelSet, samples: BTreeMap<Timestamp, String>) -> Self {
        Self::new(canonical_name(labels), samples)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn samples(&self) -> &BTreeMap<Timestamp, String> {
        &self.samples
    }

    pub fn get(&self, timestamp: Timestamp) -> Option<&str> {
        self.samples.get(&timestamp).map(String::as_str)
    }
}
