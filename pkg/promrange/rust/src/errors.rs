// Unless explicitly stated otherwise all files in this repository are licensed
// under the Apache License Version 2.0.
// This product includes software developed at Datadog (https://www.datadoghq.com/).
// Copyright 2026-present Datadog, Inc.

use std::path::PathBuf;

use chrono::{DateTime, Utc};
use reqwest::StatusCode;
use thiserror::Error;

/// Everything that can go wrong while running a single range query.
///
/// None of these are retried. A query either yields a full series set or
/// exactly one of these values.
#[derive(Error, Debug)]
pub enum Error {
    #[error("invalid host URL: {0}")]
    UrlParse(#[from] url::ParseError),

    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("didn't return 200 OK but {status}: {url}")]
    RequestFailed { status: StatusCode, url: String },

    #[error("could not decode query_range response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("result type isn't of type matrix: {0}")]
    UnsupportedResultType(String),

    #[error("no timeseries found")]
    EmptyResult,

    #[error("could not read CA bundle {}", path.display())]
    TrustStore {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("could not parse CA bundle {}", path.display())]
    InvalidCertificate {
        path: PathBuf,
        #[source]
        source: reqwest::Error,
    },

    #[error("CA bundle {} holds no certificates", path.display())]
    EmptyTrustStore { path: PathBuf },

    #[error("query window end {end} is not after start {start}")]
    InvalidWindow {
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    },
}

impl Error {
    /// Whether the query succeeded but matched no series.
    pub fn is_empty_result(&self) -> bool {
        matches!(self, Error::EmptyResult)
    }
}

pub type Result<T> = std::result::Result<T, Error>;
