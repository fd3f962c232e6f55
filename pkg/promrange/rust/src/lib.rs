// Unless explicitly stated otherwise all files in this repository are licensed
// under the Apache License Version 2.0.
// This product includes software developed at Datadog (https://www.datadoghq.com/).
// Copyright 2026-present Datadog, Inc.

//! Range queries against a Prometheus-compatible HTTP API, merged onto one
//! time axis and rendered as CSV or matplotlib data.
//!
//! - `client` builds and sends the `query_range` request and decodes the
//!   matrix it returns into [`Series`].
//! - `resolution` picks the query step from the window length.
//! - `metric_name` turns a label set into a stable display name.
//! - `grid` aligns any number of sparse series on their union of timestamps.
//! - `render` writes the aligned series out.

// Correctness
#![deny(clippy::indexing_slicing)]
#![deny(clippy::string_slice)]
#![deny(clippy::cast_possible_wrap)]
// Panicking code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![deny(clippy::unimplemented)]
#![deny(clippy::todo)]
// Debug code that shouldn't be in production
#![deny(clippy::dbg_macro)]
#![deny(clippy::print_stdout)]
#![deny(clippy::print_stderr)]

pub mod cli;
pub mod client;
pub mod config;
mod errors;
pub mod grid;
pub mod metric_name;
pub mod render;
pub mod resolution;
mod response;
pub mod series;

// Re-export the public API
pub use client::{ClientConfig, Endpoint, RangeQuery, RangeQueryClient};
pub use errors::{Error, Result};
pub use grid::AlignedGrid;
pub use metric_name::{LabelSet, canonical_name};
pub use render::{OutputFormat, RenderOptions, TimestampFormat, render};
pub use resolution::{TimeWindow, resolve_step};
pub use series::{Series, Timestamp};
