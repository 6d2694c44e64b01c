//! Campaign creation form: raw field values in, a validated draft out.

use campaign_core::{CampaignError, CampaignResult};
use chrono::{DateTime, NaiveDate, Utc};
use serde::Deserialize;
use tracing::debug;

use crate::models::*;

/// Statuses offered by the creation form.
pub const CREATABLE_STATUSES: [CampaignStatus; 3] =
    [CampaignStatus::Draft, CampaignStatus::Active, CampaignStatus::Paused];

/// Raw form input, as typed by the user.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CampaignForm {
    pub name: String,
    pub description: String,
    pub status: String,
    pub budget: String,
    pub start_date: String,
    pub end_date: String,
    /// One entry per input line; blank lines are dropped.
    pub locations: Vec<String>,
    pub interests: Vec<String>,
    pub gender: String,
    pub income: String,
    pub education: String,
    pub age_range: Option<(u8, u8)>,
}

/// Validate and normalize `form` into a draft stamped with `created_by`.
///
/// Fields are checked in form order and the first failure is returned, so
/// the caller can highlight a single offending field.
pub fn build_campaign(form: &CampaignForm, created_by: &str) -> CampaignResult<CampaignDraft> {
    let name = form.name.trim();
    if name.is_empty() {
        return Err(CampaignError::validation("name", "campaign name is required"));
    }

    let budget = parse_budget(&form.budget)?;
    let start_date = parse_date("start_date", &form.start_date)?;
    let end_date = parse_date("end_date", &form.end_date)?;
    if end_date < start_date {
        return Err(CampaignError::validation(
            "end_date",
            format!("end date {end_date} is before start date {start_date}"),
        ));
    }

    let status = parse_status(&form.status)?;
    let demographics = Demographics {
        gender: form.gender.parse()?,
        income: form.income.parse()?,
        education: form.education.parse()?,
    };

    let age_range = form.age_range.unwrap_or(DEFAULT_AGE_RANGE);
    if age_range.0 > age_range.1 {
        return Err(CampaignError::validation(
            "age_range",
            format!("minimum age {} exceeds maximum {}", age_range.0, age_range.1),
        ));
    }

    let description = Some(form.description.trim())
        .filter(|d| !d.is_empty())
        .map(str::to_string);

    let draft = CampaignDraft {
        name: name.to_string(),
        description,
        status,
        budget,
        spent: 0.0,
        start_date,
        end_date,
        target_audience: TargetAudience {
            age_range: Some(age_range),
            locations: non_blank(&form.locations),
            interests: non_blank(&form.interests),
            demographics,
            custom_audiences: Vec::new(),
        },
        ad_groups: Vec::new(),
        metrics: CampaignMetrics::default(),
        created_by: created_by.to_string(),
    };
    debug!(name = %draft.name, budget = draft.budget, "Campaign form validated");
    Ok(draft)
}

fn parse_budget(raw: &str) -> CampaignResult<f64> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(CampaignError::validation("budget", "budget is required"));
    }
    let budget: f64 = raw
        .parse()
        .map_err(|_| CampaignError::validation("budget", format!("'{raw}' is not a number")))?;
    if !budget.is_finite() {
        return Err(CampaignError::validation("budget", "budget must be a finite amount"));
    }
    if budget < 0.0 {
        return Err(CampaignError::validation("budget", "budget must not be negative"));
    }
    Ok(budget)
}

/// Accepts `YYYY-MM-DD`, or an RFC 3339 timestamp truncated to its UTC date.
fn parse_date(field: &'static str, raw: &str) -> CampaignResult<NaiveDate> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(CampaignError::validation(field, "date is required"));
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .or_else(|_| DateTime::parse_from_rfc3339(raw).map(|dt| dt.with_timezone(&Utc).date_naive()))
        .map_err(|_| CampaignError::validation(field, format!("'{raw}' is not a valid date")))
}

fn parse_status(raw: &str) -> CampaignResult<CampaignStatus> {
    if raw.trim().is_empty() {
        return Ok(CampaignStatus::Draft);
    }
    let status: CampaignStatus = raw.parse()?;
    if !CREATABLE_STATUSES.contains(&status) {
        return Err(CampaignError::validation(
            "status",
            format!("new campaigns cannot start as {status}"),
        ));
    }
    Ok(status)
}

fn non_blank(lines: &[String]) -> Vec<String> {
    lines
        .iter()
        .map(|line| line.trim())
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}
