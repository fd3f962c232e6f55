// Unless explicitly stated otherwise all files in this repository are licensed
// under the Apache License Version 2.0.
// This product includes software developed at Datadog (https://www.datadoghq.com/).
// Copyright 2026-present Datadog, Inc.

use std::collections::HashMap;

/// Label name Prometheus uses to carry the metric name.
pub const METRIC_NAME_LABEL: &str = "__name__";

/// Label name to label value, as returned in the `metric` object of a result.
pub type LabelSet = HashMap<String, String>;

/// Builds the display name of a series from its labels, e.g.
/// `up{instance="h1",job="api"}`.
///
/// The result only depends on the label contents, never on the iteration
/// order of the map. Label values are inserted as-is: an embedded `"` is not
/// escaped.
pub fn canonical_name(labels: &LabelSet) -> String {
    if labels.is_empty() {
        return "{}".to_string();
    }

    let mut base = "";
    let mut inner: Vec<String> = Vec::with_capacity(labels.len());
    for (key, value) in labels {
        if key == METRIC_NAME_LABEL {
            base = value;
            continue;
        }
        inner.push(format!(r#"{key}="{value}""#));
    }

    if inner.is_empty() {
        return base.to_string();
    }

    inner.sort_unstable();
    format!("{base}{{{}}}", inner.join(","))
}
