use std::fmt;
use std::path::PathBuf;

use crate::app::App;
use crate::calculation::date_range::DateRange;
use crate::calculation::flatten::flatten;
use crate::error::Error;
use crate::io::azure_client::{BillingApi, CostQuery};
use crate::io::report::write_report;
use crate::prelude::*;

/// How far a run got. Only ever moves forward, one step at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Start,
    TokenAcquired,
    DataFetched,
    DataFlattened,
    DataSaved,
    Done,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Start => "start",
            Stage::TokenAcquired => "token-acquired",
            Stage::DataFetched => "data-fetched",
            Stage::DataFlattened => "data-flattened",
            Stage::DataSaved => "data-saved",
            Stage::Done => "done",
        };

        f.write_str(name)
    }
}

/// What a successful run did.
#[derive(Debug, Clone, PartialEq)]
pub struct RunSummary {
    pub range: DateRange,
    pub records: usize,
    pub bytes: usize,
    pub output: PathBuf,
}

/// Token, query, flatten, save. In that order, once.
///
/// The first failure stops the run. It is logged here, once, preferring whatever
/// the API said about it. The caller only has to exit.
pub fn run<A: BillingApi>(app: &mut App, api: &A, range: DateRange) -> AppResult<RunSummary> {
    let mut stage = Stage::Start;

    let result = advance(app, api, range, &mut stage);

    if let Err(report) = &result {
        // Get the spinner out of the way before the error line.
        app.display.stop_with_message("");
        log_failure(stage, report);
    }

    result
}

// private

fn advance<A: BillingApi>(
    app: &mut App,
    api: &A,
    range: DateRange,
    stage: &mut Stage,
) -> AppResult<RunSummary> {
    info!("Obtaining token...");
    app.display.update_text("Obtaining token");
    let token = api.acquire_token(&app.credentials)?;
    *stage = Stage::TokenAcquired;

    info!(from = %range.from, to = %range.to, "Fetching cost data...");
    app.display.update_text("Fetching cost data");
    let query = CostQuery::daily_usage(range);
    let response = api.query_costs(&token, &app.credentials.subscription_id, &query)?;
    *stage = Stage::DataFetched;

    // Following it is out of scope, but nobody should be surprised by a short report.
    if response.next_link.is_some() {
        warn!("The service returned a partial result, the report may be missing rows.");
    }

    let records = flatten(response)?;
    *stage = Stage::DataFlattened;
    debug!(records = records.len(), "Flattened cost rows");

    info!(path = %app.output.display(), "Saving data...");
    app.display.update_text("Saving data");
    let bytes = write_report(&app.output, &records, app.unformatted)?;
    *stage = Stage::DataSaved;

    let summary = RunSummary {
        range,
        records: records.len(),
        bytes,
        output: app.output.to_owned(),
    };

    info!(records = summary.records, bytes = summary.bytes, "Report saved.");
    app.display.stop_with_message(&format!(
        "Saved {} cost records for {} to {}",
        summary.records,
        summary.range.from,
        summary.output.display()
    ));
    *stage = Stage::Done;

    Ok(summary)
}

fn log_failure(stage: Stage, report: &miette::Report) {
    let api_body = report.downcast_ref::<Error>().and_then(Error::api_body);

    match api_body {
        Some(body) => error!(reached = %stage, cause = %report, "Error: {}", body),
        None => error!(reached = %stage, "Error: {}", describe(report)),
    }
}

/// The message plus its causes, on one line.
fn describe(report: &miette::Report) -> String {
    report
        .chain()
        .map(|cause| cause.to_string())
        .collect::<Vec<_>>()
        .join(": ")
}
