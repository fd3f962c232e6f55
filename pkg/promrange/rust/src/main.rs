// Unless explicitly stated otherwise all files in this repository are licensed
// under the Apache License Version 2.0.
// This product includes software developed at Datadog (https://www.datadoghq.com/).
// Copyright 2026-present Datadog, Inc.

// Panicking code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
// Debug code that shouldn't be in production
#![deny(clippy::dbg_macro)]
#![deny(clippy::print_stdout)]
#![deny(clippy::print_stderr)]

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::process::ExitCode;

use anyhow::{Context, Result, bail};
use chrono::Utc;
use clap::Parser;
use log::{error, info, warn};
use promrange::cli::Args;
use promrange::config::{self, FileConfig};
use promrange::{RangeQuery, RangeQueryClient, render};
use simple_logger::SimpleLogger;

fn open_output(args: &Args) -> Result<Box<dyn Write>> {
    match &args.output {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("creating output file {}", path.display()))?;
            Ok(Box::new(file))
        }
        None => Ok(Box::new(io::stdout().lock())),
    }
}

fn run(args: &Args, file: &FileConfig) -> Result<()> {
    let client = RangeQueryClient::new(args.client_config(file)?)?;
    let window = args.window(Utc::now())?;
    let options = args.render_options(file);
    let mut out = BufWriter::new(open_output(args)?);

    let mut with_data = 0;
    for expr in &args.queries {
        let query = RangeQuery::new(expr.as_str(), window);
        info!(
            "querying {expr:?} from {} to {} every {}s",
            window.start(),
            window.end(),
            window.resolved_step()
        );

        match client.query_range(&query) {
            Ok(series) => {
                info!("{expr:?}: {} series", series.len());
                render(&mut out, &series, &options).context("writing output")?;
                with_data += 1;
            }
            Err(e) if e.is_empty_result() => warn!("{expr:?}: {e}"),
            Err(e) => return Err(e).with_context(|| format!("query {expr:?} failed")),
        }
    }
    out.flush().context("writing output")?;

    if with_data == 0 {
        bail!("no timeseries found for any query");
    }
    Ok(())
}

fn main() -> ExitCode {
    let args = Args::parse();

    let file = config::load_config(args.config.as_deref());
    let level = config::resolve_log_level(args.log_level.as_deref(), &file);
    if SimpleLogger::new()
        .with_level(level)
        .with_utc_timestamps()
        .init()
        .is_err()
    {
        return ExitCode::FAILURE;
    }

    match file.and_then(|file| run(&args, &file)) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e:#}");
            ExitCode::FAILURE
        }
    }
}
