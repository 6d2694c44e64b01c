//! Dashboard domain types — campaigns, audiences, metrics, users.

use std::fmt;
use std::str::FromStr;

use campaign_core::CampaignError;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

// ─── Campaign ──────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Campaign {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub status: CampaignStatus,
    pub budget: f64,
    pub spent: f64,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub target_audience: TargetAudience,
    /// Ad groups are carried through untouched.
    #[serde(default)]
    pub ad_groups: Vec<serde_json::Value>,
    #[serde(default)]
    pub metrics: CampaignMetrics,
    pub created_by: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Campaign {
    /// Materialize a draft with system-assigned fields.
    pub fn from_draft(id: String, draft: CampaignDraft, now: DateTime<Utc>) -> Self {
        Self {
            id,
            name: draft.name,
            description: draft.description,
            status: draft.status,
            budget: draft.budget,
            spent: draft.spent,
            start_date: draft.start_date,
            end_date: draft.end_date,
            target_audience: draft.target_audience,
            ad_groups: draft.ad_groups,
            metrics: draft.metrics,
            created_by: draft.created_by,
            created_at: now,
            updated_at: now,
        }
    }

    /// Spent as a percentage of budget, capped at 100.
    pub fn budget_utilization(&self) -> f64 {
        if self.budget > 0.0 {
            (self.spent / self.budget * 100.0).min(100.0)
        } else {
            0.0
        }
    }

    /// Check the entity invariants that the type system does not carry.
    pub fn check_invariants(&self) -> Result<(), CampaignError> {
        if self.name.trim().is_empty() {
            return Err(CampaignError::validation("name", "campaign name is required"));
        }
        if !self.budget.is_finite() || self.budget < 0.0 {
            return Err(CampaignError::validation("budget", "budget must be a non-negative number"));
        }
        if !self.spent.is_finite() || self.spent < 0.0 {
            return Err(CampaignError::validation("spent", "spent must be a non-negative number"));
        }
        if self.end_date < self.start_date {
            return Err(CampaignError::validation("end_date", "end date is before start date"));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum CampaignStatus {
    Draft,
    Active,
    Paused,
    Completed,
    Archived,
}

impl CampaignStatus {
    pub const ALL: [CampaignStatus; 5] = [
        CampaignStatus::Draft,
        CampaignStatus::Active,
        CampaignStatus::Paused,
        CampaignStatus::Completed,
        CampaignStatus::Archived,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            CampaignStatus::Draft => "draft",
            CampaignStatus::Active => "active",
            CampaignStatus::Paused => "paused",
            CampaignStatus::Completed => "completed",
            CampaignStatus::Archived => "archived",
        }
    }
}

impl Default for CampaignStatus {
    fn default() -> Self {
        CampaignStatus::Draft
    }
}

impl fmt::Display for CampaignStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CampaignStatus {
    type Err = CampaignError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CampaignStatus::ALL
            .into_iter()
            .find(|status| status.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| CampaignError::validation("status", format!("unknown campaign status '{s}'")))
    }
}

// ─── Targeting ─────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TargetAudience {
    #[serde(default)]
    pub age_range: Option<(u8, u8)>,
    #[serde(default)]
    pub locations: Vec<String>,
    #[serde(default)]
    pub interests: Vec<String>,
    #[serde(default)]
    pub demographics: Demographics,
    #[serde(default)]
    pub custom_audiences: Vec<String>,
}

pub const DEFAULT_AGE_RANGE: (u8, u8) = (18, 65);

impl Default for TargetAudience {
    fn default() -> Self {
        Self {
            age_range: Some(DEFAULT_AGE_RANGE),
            locations: Vec::new(),
            interests: Vec::new(),
            demographics: Demographics::default(),
            custom_audiences: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Demographics {
    #[serde(default)]
    pub gender: Gender,
    #[serde(default)]
    pub income: IncomeBracket,
    #[serde(default)]
    pub education: EducationLevel,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Gender {
    Male,
    Female,
    #[default]
    All,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum IncomeBracket {
    Low,
    Medium,
    High,
    #[default]
    All,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum EducationLevel {
    HighSchool,
    College,
    Graduate,
    #[default]
    All,
}

impl FromStr for Gender {
    type Err = CampaignError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "" | "all" => Ok(Gender::All),
            "male" => Ok(Gender::Male),
            "female" => Ok(Gender::Female),
            other => Err(CampaignError::validation("gender", format!("unknown gender '{other}'"))),
        }
    }
}

impl FromStr for IncomeBracket {
    type Err = CampaignError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "" | "all" => Ok(IncomeBracket::All),
            "low" => Ok(IncomeBracket::Low),
            "medium" => Ok(IncomeBracket::Medium),
            "high" => Ok(IncomeBracket::High),
            other => Err(CampaignError::validation("income", format!("unknown income bracket '{other}'"))),
        }
    }
}

impl FromStr for EducationLevel {
    type Err = CampaignError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "" | "all" => Ok(EducationLevel::All),
            "high_school" => Ok(EducationLevel::HighSchool),
            "college" => Ok(EducationLevel::College),
            "graduate" => Ok(EducationLevel::Graduate),
            other => Err(CampaignError::validation("education", format!("unknown education level '{other}'"))),
        }
    }
}

// ─── Metrics ───────────────────────────────────────────────────────────────

/// Stored performance snapshot. Rates are never recomputed from counts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct CampaignMetrics {
    pub impressions: u64,
    pub clicks: u64,
    pub ctr: f64,
    pub cpc: f64,
    pub cpm: f64,
    pub conversions: u64,
    pub conversion_rate: f64,
    pub cost_per_conversion: f64,
    pub revenue: f64,
    pub roas: f64,
}

// ─── Users ─────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub email: String,
    pub name: String,
    pub role: UserRole,
    #[serde(default)]
    pub avatar: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Carried on the user record; no operation checks it.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    Admin,
    Manager,
    Analyst,
    Viewer,
}

// ─── Write-side types ──────────────────────────────────────────────────────

/// A campaign without the fields the store assigns (id and timestamps).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CampaignDraft {
    pub name: String,
    pub description: Option<String>,
    pub status: CampaignStatus,
    pub budget: f64,
    pub spent: f64,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub target_audience: TargetAudience,
    #[serde(default)]
    pub ad_groups: Vec<serde_json::Value>,
    #[serde(default)]
    pub metrics: CampaignMetrics,
    pub created_by: String,
}

impl From<Campaign> for CampaignDraft {
    fn from(c: Campaign) -> Self {
        Self {
            name: c.name,
            description: c.description,
            status: c.status,
            budget: c.budget,
            spent: c.spent,
            start_date: c.start_date,
            end_date: c.end_date,
            target_audience: c.target_audience,
            ad_groups: c.ad_groups,
            metrics: c.metrics,
            created_by: c.created_by,
        }
    }
}

/// Partial update. `None` leaves the stored field unchanged; `description`
/// uses a nested option so it can be cleared.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CampaignUpdate {
    pub name: Option<String>,
    pub description: Option<Option<String>>,
    pub status: Option<CampaignStatus>,
    pub budget: Option<f64>,
    pub spent: Option<f64>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub target_audience: Option<TargetAudience>,
    pub metrics: Option<CampaignMetrics>,
}

impl CampaignUpdate {
    pub fn status(status: CampaignStatus) -> Self {
        Self {
            status: Some(status),
            ..Self::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.description.is_none()
            && self.status.is_none()
            && self.budget.is_none()
            && self.spent.is_none()
            && self.start_date.is_none()
            && self.end_date.is_none()
            && self.target_audience.is_none()
            && self.metrics.is_none()
    }

    /// Merge into `campaign`. Timestamps are left to the caller.
    pub fn apply_to(self, campaign: &mut Campaign) {
        if let Some(name) = self.name { campaign.name = name; }
        if let Some(description) = self.description { campaign.description = description; }
        if let Some(status) = self.status { campaign.status = status; }
        if let Some(budget) = self.budget { campaign.budget = budget; }
        if let Some(spent) = self.spent { campaign.spent = spent; }
        if let Some(start) = self.start_date { campaign.start_date = start; }
        if let Some(end) = self.end_date { campaign.end_date = end; }
        if let Some(audience) = self.target_audience { campaign.target_audience = audience; }
        if let Some(metrics) = self.metrics { campaign.metrics = metrics; }
    }
}
