// Unless explicitly stated otherwise all files in this repository are licensed
// under the Apache License Version 2.0.
// This product includes software developed at Datadog (https://www.datadoghq.com/).
// Copyright 2026-present Datadog, Inc.

use std::path::{Path, PathBuf};
use std::time::Duration;

use log::debug;
use reqwest::blocking::Client;
use reqwest::header::AUTHORIZATION;
use reqwest::{Certificate, StatusCode};
use url::Url;

use crate::errors::{Error, Result};
use crate::resolution::TimeWindow;
use crate::response::decode_matrix;
use crate::series::Series;

const QUERY_RANGE_PATH: &str = "api/v1/query_range";
/// Path under which a gateway serves the Prometheus API.
pub const GATEWAY_PATH_PREFIX: &str = "prometheus";

/// Query parameters owned by the client; same-named parameters on the host
/// URL are replaced.
const QUERY_PARAMS: [&str; 4] = ["query", "start", "end", "step"];

/// Request shape of a deployment: the path prefix in front of
/// `api/v1/query_range` and the `Authorization` header value, if any.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Endpoint {
    path_prefix: String,
    authorization: Option<String>,
}

impl Endpoint {
    pub fn new(path_prefix: impl Into<String>, authorization: Option<String>) -> Self {
        Self {
            path_prefix: path_prefix.into(),
            authorization,
        }
    }

    /// A Prometheus server queried directly, without authentication.
    pub fn prometheus() -> Self {
        Self::default()
    }

    /// A gateway serving Prometheus under `/prometheus`. The token is sent
    /// verbatim as the `Authorization` header.
    pub fn gateway(token: impl Into<String>) -> Self {
        Self::new(GATEWAY_PATH_PREFIX, Some(token.into()))
    }

    pub fn path_prefix(&self) -> &str {
        &self.path_prefix
    }

    pub fn authorization(&self) -> Option<&str> {
        self.authorization.as_deref()
    }

    fn query_range_path(&self) -> String {
        match self.path_prefix.trim_matches('/') {
            "" => format!("/{QUERY_RANGE_PATH}"),
            prefix => format!("/{prefix}/{QUERY_RANGE_PATH}"),
        }
    }
}

/// Everything needed to build a [`RangeQueryClient`].
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the server. Only scheme, authority and query parameters
    /// are kept, the path is replaced.
    pub host: String,
    pub endpoint: Endpoint,
    /// PEM bundle used as the only TLS trust anchors. Built-in roots are used
    /// when absent.
    pub ca_bundle: Option<PathBuf>,
    pub timeout: Option<Duration>,
}

impl ClientConfig {
    pub fn new(host: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            endpoint: Endpoint::prometheus(),
            ca_bundle: None,
            timeout: None,
        }
    }
}

/// A PromQL expression evaluated over a window.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RangeQuery {
    pub expr: String,
    pub window: TimeWindow,
}

impl RangeQuery {
    pub fn new(expr: impl Into<String>, window: TimeWindow) -> Self {
        Self {
            expr: expr.into(),
            window,
        }
    }
}

/// Runs range queries against one server. Each query is a single GET with
/// no retries.
#[derive(Debug)]
pub struct RangeQueryClient {
    base_url: Url,
    endpoint: Endpoint,
    http: Client,
}

impl RangeQueryClient {
    pub fn new(config: ClientConfig) -> Result<Self> {
        let base_url = Url::parse(&config.host)?;
        if base_url.cannot_be_a_base() {
            return Err(Error::UrlParse(url::ParseError::RelativeUrlWithoutBase));
        }

        let mut builder =
            Client::builder().user_agent(concat!("promrange/", env!("CARGO_PKG_VERSION")));
        if let Some(path) = &config.ca_bundle {
            builder = builder.tls_built_in_root_certs(false);
            for cert in load_ca_bundle(path)? {
                builder = builder.add_root_certificate(cert);
            }
        }
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            base_url,
            endpoint: config.endpoint,
            http: builder.build()?,
        })
    }

    /// The full URL a query is sent to.
    pub fn request_url(&self, query: &RangeQuery) -> Url {
        let mut url = self.base_url.clone();
        url.set_path(&self.endpoint.query_range_path());

        let kept: Vec<(String, String)> = url
            .query_pairs()
            .filter(|(key, _)| !QUERY_PARAMS.contains(&key.as_ref()))
            .map(|(key, value)| (key.into_owned(), value.into_owned()))
            .collect();

        let window = &query.window;
        url.query_pairs_mut()
            .clear()
            .extend_pairs(kept)
            .append_pair("query", &query.expr)
            .append_pair("start", &window.start().timestamp().to_string())
            .append_pair("end", &window.end().timestamp().to_string())
            .append_pair("step", &window.resolved_step().to_string());
        url
    }

    pub fn query_range(&self, query: &RangeQuery) -> Result<Vec<Series>> {
        let url = self.request_url(query);
        debug!("GET {url}");

        let mut request = self.http.get(url.clone());
        if let Some(token) = self.endpoint.authorization() {
            request = request.header(AUTHORIZATION, token);
        }

        let response = request.send()?;
        let status = response.status();
        if status != StatusCode::OK {
            return Err(Error::RequestFailed {
                status,
                url: url.to_string(),
            });
        }

        let body = response.text()?;
        let series = decode_matrix(&body)?;
        debug!("{} returned {} series", query.expr, series.len());
        Ok(series)
    }
}

fn load_ca_bundle(path: &Path) -> Result<Vec<Certificate>> {
    let pem = std::fs::read(path).map_err(|source| Error::TrustStore {
        path: path.to_path_buf(),
        source,
    })?;
    let certs = Certificate::from_pem_bundle(&pem).map_err(|source| Error::InvalidCertificate {
        path: path.to_path_buf(),
        source,
    })?;
    if certs.is_empty() {
        return Err(Error::EmptyTrustStore {
            path: path.to_path_buf(),
        });
    }
    debug!("loaded {} CA certificate(s) from {}", certs.len(), path.display());
    Ok(certs)
}
