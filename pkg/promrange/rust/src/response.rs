// Unless explicitly stated otherwise all files in this repository are licensed
// under the Apache License Version 2.0.
// This product includes software developed at Datadog (https://www.datadoghq.com/).
// Copyright 2026-present Datadog, Inc.

//! Wire schema of the `query_range` response body.

use std::collections::BTreeMap;

use log::{debug, warn};
use serde::Deserialize;

use crate::errors::{Error, Result};
use crate::metric_name::LabelSet;
use crate::series::{Series, Timestamp};

const MATRIX: &str = "matrix";

#[derive(Debug, Deserialize)]
struct QueryRangeResponse {
    status: String,
    data: QueryRangeData,
    #[serde(default)]
    warnings: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct QueryRangeData {
    #[serde(rename = "resultType")]
    result_type: String,
    // Shape depends on result_type, decoded once it is known to be a matrix.
    result: serde_json::Value,
}

#[derive(Debug, Deserialize)]
struct MatrixResult {
    #[serde(default)]
    metric: LabelSet,
    #[serde(default)]
    values: Vec<(f64, String)>,
}

impl MatrixResult {
    fn into_series(self) -> Series {
        let samples: BTreeMap<Timestamp, String> = self
            .values
            .into_iter()
            .map(|(timestamp, value)| (round_timestamp(timestamp), value))
            .collect();
        Series::from_labels(&self.metric, samples)
    }
}

// Half-second ties go to the even second.
fn round_timestamp(timestamp: f64) -> Timestamp {
    timestamp.round_ties_even() as Timestamp
}

/// Decodes a `query_range` body into one [`Series`] per result, in response
/// order.
pub fn decode_matrix(body: &str) -> Result<Vec<Series>> {
    let response: QueryRangeResponse = serde_json::from_str(body)?;
    debug!(
        "query_range status={} resultType={}",
        response.status, response.data.result_type
    );
    for warning in &response.warnings {
        warn!("server warning: {warning}");
    }

    if response.data.result_type != MATRIX {
        return Err(Error::UnsupportedResultType(response.data.result_type));
    }

    let results: Vec<MatrixResult> = serde_json::from_value(response.data.result)?;
    if results.is_empty() {
        return Err(Error::EmptyResult);
    }

    Ok(results.into_iter().map(MatrixResult::into_series).collect())
}
