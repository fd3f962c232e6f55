// Unless explicitly stated otherwise all files in this repository are licensed
// under the Apache License Version 2.0.
// This product includes software developed at Datadog (https://www.datadoghq.com/).
// Copyright 2026-present Datadog, Inc.

//! Text renderings of a series set.
//!
//! Every writer lays the series out on an [`AlignedGrid`] first and writes
//! nothing at all when there are no series.

use std::io::{self, Write};

use chrono::{Local, TimeZone, Utc};
use clap::ValueEnum;
use serde::Deserialize;

use crate::grid::AlignedGrid;
use crate::series::{Series, Timestamp};

const CSV_TIME_COLUMN: &str = "Time";
const PYTHON_NONE: &str = "None";
const DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S %z";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Csv,
    Matplotlib,
}

/// How the time column of the CSV body is written.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum TimestampFormat {
    /// `2024-01-02 15:04:05 +0100` in the local time zone.
    #[default]
    Local,
    /// `2024-01-02 14:04:05 +0000`.
    Utc,
    /// Seconds since the epoch.
    Unix,
}

impl TimestampFormat {
    pub fn format(self, timestamp: Timestamp) -> String {
        let formatted = match self {
            TimestampFormat::Local => Local
                .timestamp_opt(timestamp, 0)
                .single()
                .map(|t| t.format(DATE_FORMAT).to_string()),
            TimestampFormat::Utc => Utc
                .timestamp_opt(timestamp, 0)
                .single()
                .map(|t| t.format(DATE_FORMAT).to_string()),
            TimestampFormat::Unix => None,
        };
        formatted.unwrap_or_else(|| timestamp.to_string())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RenderOptions {
    pub format: OutputFormat,
    /// Write the CSV header or the matplotlib legend.
    pub header: bool,
    pub time_format: TimestampFormat,
}

/// Writes one query's series in the selected format: header then rows for
/// CSV, data then legend for matplotlib.
pub fn render<W: Write>(out: &mut W, series: &[Series], options: &RenderOptions) -> io::Result<()> {
    match options.format {
        OutputFormat::Csv => {
            if options.header {
                write_csv_header(out, series)?;
            }
            write_csv(out, series, options.time_format)
        }
        OutputFormat::Matplotlib => {
            write_matplotlib(out, series)?;
            if options.header {
                write_matplotlib_legend(out, series)?;
            }
            Ok(())
        }
    }
}

/// `Time,<name1>,<name2>,...`
pub fn write_csv_header<W: Write>(out: &mut W, series: &[Series]) -> io::Result<()> {
    if series.is_empty() {
        return Ok(());
    }
    let mut header = vec![CSV_TIME_COLUMN];
    header.extend(series.iter().map(Series::name));
    writeln!(out, "{}", header.join(","))
}

/// One row per axis timestamp; a series without a sample there leaves its
/// field empty.
pub fn write_csv<W: Write>(
    out: &mut W,
    series: &[Series],
    time_format: TimestampFormat,
) -> io::Result<()> {
    let grid = AlignedGrid::new(series);
    if grid.is_empty() {
        return Ok(());
    }
    for row in grid.rows() {
        write!(out, "{}", time_format.format(row.timestamp))?;
        for value in row.values {
            write!(out, ",{}", value.unwrap_or_default())?;
        }
        writeln!(out)?;
    }
    Ok(())
}

/// Python list literals for the axis (`t`) and each series (`s0`, `s1`, ...),
/// each series followed by its `plot.plot` call.
pub fn write_matplotlib<W: Write>(out: &mut W, series: &[Series]) -> io::Result<()> {
    let grid = AlignedGrid::new(series);
    if grid.is_empty() {
        return Ok(());
    }

    let axis: Vec<String> = grid.timestamps().iter().map(|ts| ts.to_string()).collect();
    writeln!(out, "t = [{}]", axis.join(", "))?;

    for (i, s) in grid.series().iter().enumerate() {
        let values: Vec<&str> = grid
            .column(s)
            .map(|value| value.unwrap_or(PYTHON_NONE))
            .collect();
        writeln!(out, "s{i} = [{}]", values.join(", "))?;
        writeln!(out, "plot.plot(t, s{i})")?;
    }
    Ok(())
}

/// `plot.legend(['<name1>', ...], loc='upper left')`
pub fn write_matplotlib_legend<W: Write>(out: &mut W, series: &[Series]) -> io::Result<()> {
    if series.is_empty() {
        return Ok(());
    }
    let labels: Vec<String> = series.iter().map(|s| format!("'{}'", s.name())).collect();
    writeln!(out, "plot.legend([{}], loc='upper left')", labels.join(", "))
}
