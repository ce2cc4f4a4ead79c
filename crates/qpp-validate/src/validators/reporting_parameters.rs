//! Performance period rules.

use std::sync::LazyLock;

use chrono::NaiveDate;
use qpp_decode::decoders::{PERFORMANCE_END, PERFORMANCE_START};
use qpp_model::{Node, TemplateId};
use regex::Regex;

use crate::context::ValidationContext;
use crate::registry::NodeValidator;

pub const PERFORMANCE_START_MISSING: &str =
    "Reporting parameters must have a performance period start";
pub const PERFORMANCE_END_MISSING: &str =
    "Reporting parameters must have a performance period end";
pub const INVALID_PERFORMANCE_DATE: &str =
    "Reporting parameters performance dates must be valid YYYYMMDD dates";
pub const PERFORMANCE_PERIOD_REVERSED: &str =
    "Reporting parameters performance start must not be after the performance end";

/// HL7 `TS` values: `YYYYMMDD`, optionally followed by a time of day and a
/// zone offset.
static HL7_TIMESTAMP_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\d{8})(\d{2}(\d{2}(\d{2}(\.\d+)?)?)?)?([+-]\d{4})?$")
        .expect("Invalid HL7 timestamp regex")
});

/// Parse an HL7 `TS` value down to its date. Time and zone are ignored.
pub fn parse_performance_date(value: &str) -> Option<NaiveDate> {
    let captures = HL7_TIMESTAMP_REGEX.captures(value.trim())?;
    NaiveDate::parse_from_str(captures.get(1)?.as_str(), "%Y%m%d").ok()
}

pub struct ReportingParametersValidator;

impl NodeValidator for ReportingParametersValidator {
    fn template(&self) -> TemplateId {
        TemplateId::ReportingParametersAct
    }

    fn validate_node(&self, node: &Node, context: &mut ValidationContext<'_>) {
        let missing = context
            .thoroughly_check(node)
            .value(PERFORMANCE_START_MISSING, PERFORMANCE_START)
            .value(PERFORMANCE_END_MISSING, PERFORMANCE_END)
            .has_failed();
        if missing {
            return;
        }

        let start = node.value(PERFORMANCE_START).and_then(parse_performance_date);
        let end = node.value(PERFORMANCE_END).and_then(parse_performance_date);
        match (start, end) {
            (Some(start), Some(end)) if start > end => {
                context.add_error(PERFORMANCE_PERIOD_REVERSED, node.path());
            }
            (Some(_), Some(_)) => {}
            _ => context.add_error(INVALID_PERFORMANCE_DATE, node.path()),
        }
    }
}
