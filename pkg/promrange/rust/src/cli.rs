// Unless explicitly stated otherwise all files in this repository are licensed
// under the Apache License Version 2.0.
// This product includes software developed at Datadog (https://www.datadoghq.com/).
// Copyright 2026-present Datadog, Inc.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result, anyhow, bail};
use chrono::{DateTime, TimeDelta, TimeZone, Utc};
use clap::Parser;
use log::warn;

use crate::client::{ClientConfig, Endpoint, GATEWAY_PATH_PREFIX};
use crate::config::FileConfig;
use crate::render::{OutputFormat, RenderOptions, TimestampFormat};
use crate::resolution::TimeWindow;

const DEFAULT_SINCE: Duration = Duration::from_secs(3600);

#[derive(Parser, Debug)]
#[command(name = "promrange", version)]
#[command(about = "Run Prometheus range queries and print the series as CSV or matplotlib data", long_about = None)]
pub struct Args {
    /// Base URL of the Prometheus server or gateway
    #[arg(long, env = "PROMRANGE_HOST")]
    pub host: Option<String>,

    /// Query through a gateway serving Prometheus under /prometheus
    #[arg(long)]
    pub gateway: bool,

    /// Path prefix in front of api/v1/query_range (overrides --gateway)
    #[arg(long)]
    pub path_prefix: Option<String>,

    /// Value of the Authorization header
    #[arg(long, env = "PROMRANGE_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// PEM bundle of the CAs trusted to sign the server certificate
    #[arg(long, env = "PROMRANGE_CA_CERT")]
    pub ca_cert: Option<PathBuf>,

    /// HTTP request timeout, e.g. 30s
    #[arg(long, value_parser = humantime::parse_duration)]
    pub timeout: Option<Duration>,

    /// PromQL expression, may be repeated
    #[arg(short, long = "query", required = true)]
    pub queries: Vec<String>,

    /// Window start, RFC 3339 or Unix seconds
    #[arg(long, value_parser = parse_time, conflicts_with = "since")]
    pub start: Option<DateTime<Utc>>,

    /// Window end, RFC 3339 or Unix seconds [default: now]
    #[arg(long, value_parser = parse_time)]
    pub end: Option<DateTime<Utc>>,

    /// Window length back from the end, e.g. 30m [default: 1h]
    #[arg(long, value_parser = humantime::parse_duration)]
    pub since: Option<Duration>,

    /// Resolution in seconds, 0 picks one from the window length
    #[arg(long)]
    pub step: Option<u64>,

    #[arg(long, value_enum, default_value_t)]
    pub format: OutputFormat,

    /// Skip the CSV header or matplotlib legend
    #[arg(long)]
    pub no_header: bool,

    /// Time column of CSV output [default: local]
    #[arg(long, value_enum)]
    pub time_format: Option<TimestampFormat>,

    /// Write to this file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// YAML config file
    #[arg(long, env = "PROMRANGE_CONFIG")]
    pub config: Option<PathBuf>,

    #[arg(long, env = "PROMRANGE_LOG_LEVEL")]
    pub log_level: Option<String>,
}

impl Args {
    pub fn window(&self, now: DateTime<Utc>) -> Result<TimeWindow> {
        let end = self.end.unwrap_or(now);
        let start = match self.start {
            Some(start) => start,
            None => {
                let since = self.since.unwrap_or(DEFAULT_SINCE);
                TimeDelta::from_std(since)
                    .ok()
                    .and_then(|since| end.checked_sub_signed(since))
                    .ok_or_else(|| anyhow!("--since {} is out of range", humantime::format_duration(since)))?
            }
        };
        Ok(TimeWindow::new(start, end, self.step)?)
    }

    pub fn client_config(&self, file: &FileConfig) -> Result<ClientConfig> {
        let Some(host) = self.host.clone().or_else(|| file.host.clone()) else {
            bail!("no host given: use --host, PROMRANGE_HOST or `host` in the config file");
        };

        let gateway = self.gateway || file.gateway;
        let path_prefix = self
            .path_prefix
            .clone()
            .or_else(|| file.path_prefix.clone())
            .unwrap_or_else(|| {
                if gateway {
                    GATEWAY_PATH_PREFIX.to_string()
                } else {
                    String::new()
                }
            });
        let token = self.token.clone().or_else(|| file.token.clone());
        if gateway && token.is_none() {
            warn!("gateway mode without a token, requests are sent unauthenticated");
        }

        let timeout = match self.timeout {
            Some(timeout) => Some(timeout),
            None => file.timeout()?,
        };

        Ok(ClientConfig {
            host,
            endpoint: Endpoint::new(path_prefix, token),
            ca_bundle: self.ca_cert.clone().or_else(|| file.ca_cert.clone()),
            timeout,
        })
    }

    pub fn render_options(&self, file: &FileConfig) -> RenderOptions {
        RenderOptions {
            format: self.format,
            header: !self.no_header,
            time_format: self
                .time_format
                .or(file.time_format)
                .unwrap_or_default(),
        }
    }
}

/// Accepts Unix seconds or an RFC 3339 timestamp.
fn parse_time(value: &str) -> Result<DateTime<Utc>> {
    if let Ok(seconds) = value.parse::<i64>() {
        return Utc
            .timestamp_opt(seconds, 0)
            .single()
            .ok_or_else(|| anyhow!("timestamp {seconds} is out of range"));
    }
    DateTime::parse_from_rfc3339(value)
        .map(|t| t.with_timezone(&Utc))
        .with_context(|| format!("{value:?} is neither Unix seconds nor RFC 3339"))
}
