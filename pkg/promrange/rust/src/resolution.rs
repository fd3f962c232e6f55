// Unless explicitly stated otherwise all files in this repository are licensed
// under the Apache License Version 2.0.
// This product includes software developed at Datadog (https://www.datadoghq.com/).
// Copyright 2026-present Datadog, Inc.

use std::time::Duration;

use chrono::{DateTime, SubsecRound, Utc};

use crate::errors::{Error, Result};

const FINE_WINDOW: Duration = Duration::from_secs(15 * 60);
const MEDIUM_WINDOW: Duration = Duration::from_secs(30 * 60);

/// Minutes of window per second of step for long windows.
const STEP_DIVISOR: f64 = 4.2;

/// Picks the query resolution, in seconds, for a window.
///
/// An explicit step wins when it is positive. Otherwise windows under 15
/// minutes get 1s, under 30 minutes get 3s, and anything longer gets
/// `floor(minutes / 4.2)`, never less than 1.
pub fn resolve_step(explicit: Option<u64>, window: Duration) -> u64 {
    if let Some(step) = explicit.filter(|step| *step > 0) {
        return step;
    }
    if window < FINE_WINDOW {
        return 1;
    }
    if window < MEDIUM_WINDOW {
        return 3;
    }
    let minutes = window.as_secs_f64() / 60.0;
    ((minutes / STEP_DIVISOR).floor() as u64).max(1)
}

/// The `[start, end]` interval of a range query and its optional explicit step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeWindow {
    start: DateTime<Utc>,
    end: DateTime<Utc>,
    step: Option<u64>,
}

impl TimeWindow {
    /// Both bounds are truncated to whole seconds, the precision they are
    /// sent with. Fails with [`Error::InvalidWindow`] unless `end` is then
    /// after `start`.
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>, step: Option<u64>) -> Result<Self> {
        let start = start.trunc_subsecs(0);
        let end = end.trunc_subsecs(0);
        if end <= start {
            return Err(Error::InvalidWindow { start, end });
        }
        Ok(Self { start, end, step })
    }

    pub fn start(&self) -> DateTime<Utc> {
        self.start
    }

    pub fn end(&self) -> DateTime<Utc> {
        self.end
    }

    pub fn duration(&self) -> Duration {
        (self.end - self.start).to_std().unwrap_or(Duration::ZERO)
    }

    /// The step sent to the server, see [`resolve_step`].
    pub fn resolved_step(&self) -> u64 {
        resolve_step(self.step, self.duration())
    }
}
