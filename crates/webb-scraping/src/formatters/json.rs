//! JSON output formatting.

use chrono::Utc;
use serde_json::{Value, json};

use crate::error::ScrapeError;
use crate::models::Target;
use crate::scrape::ScrapeSummary;

/// Full JSON report for a target, stamped with the time it was produced.
///
/// A run that stopped early still reports what it collected, plus `failed_stage`
/// (`null` outside `scrape_all`) and `error`.
pub fn target_report(
    target: &Target,
    summary: Option<&ScrapeSummary>,
    failure: Option<&ScrapeError>,
) -> serde_json::Result<Value> {
    let mut report = json!({
        "generated_at": Utc::now().to_rfc3339(),
        "target": serde_json::to_value(target)?,
    });

    if let Some(summary) = summary {
        report["summary"] = serde_json::to_value(summary)?;
    }

    if let Some(err) = failure {
        report["failed_stage"] = serde_json::to_value(err.stage())?;
        report["error"] = Value::String(err.to_string());
    }

    Ok(report)
}

/// Approval flags only, `null` while a lookup has not run.
#[must_use]
pub fn approval_flags(target: &Target) -> Value {
    json!({
        "name": target.input_name,
        "jwst": target.webb_approved.as_bool(),
        "hst": target.hst_approved.as_bool(),
    })
}
