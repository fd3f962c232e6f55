// Unless explicitly stated otherwise all files in this repository are licensed
// under the Apache License Version 2.0.
// This product includes software developed at Datadog (https://www.datadoghq.com/).
// Copyright 2026-present Datadog, Inc.

use std::collections::BTreeSet;

use crate::series::{Series, Timestamp};

/// A set of series laid out against one shared time axis.
///
/// The axis is the sorted, deduplicated union of every sample timestamp. A
/// series with no sample at some axis timestamp reads as `None` there.
#[derive(Debug)]
pub struct AlignedGrid<'a> {
    timestamps: Vec<Timestamp>,
    series: &'a [Series],
}

/// One axis timestamp and the value of each series at it, in series order.
#[derive(Debug, PartialEq, Eq)]
pub struct Row<'a> {
    pub timestamp: Timestamp,
    pub values: Vec<Option<&'a str>>,
}

impl<'a> AlignedGrid<'a> {
    pub fn new(series: &'a [Series]) -> Self {
        let axis: BTreeSet<Timestamp> = series
            .iter()
            .flat_map(|s| s.samples().keys().copied())
            .collect();
        Self {
            timestamps: axis.into_iter().collect(),
            series,
        }
    }

    pub fn timestamps(&self) -> &[Timestamp] {
        &self.timestamps
    }

    pub fn series(&self) -> &'a [Series] {
        self.series
    }

    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }

    /// Values of one series along the whole axis.
    pub fn column(&self, series: &'a Series) -> impl Iterator<Item = Option<&'a str>> + '_ {
        self.timestamps.iter().map(move |ts| series.get(*ts))
    }

    pub fn rows(&self) -> impl Iterator<Item = Row<'a>> + '_ {
        self.timestamps.iter().map(move |ts| Row {
            timestamp: *ts,
            values: self.series.iter().map(|s| s.get(*ts)).collect(),
        })
    }
}
