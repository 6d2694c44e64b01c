//! Dashboard summary statistics over a set of campaigns.

use serde::{Deserialize, Serialize};

use crate::models::{Campaign, CampaignStatus};

/// Number of campaigns shown in the "recent" panel.
pub const RECENT_LIMIT: usize = 5;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusCounts {
    pub draft: usize,
    pub active: usize,
    pub paused: usize,
    pub completed: usize,
    pub archived: usize,
}

impl StatusCounts {
    pub fn record(&mut self, status: CampaignStatus) {
        match status {
            CampaignStatus::Draft => self.draft += 1,
            CampaignStatus::Active => self.active += 1,
            CampaignStatus::Paused => self.paused += 1,
            CampaignStatus::Completed => self.completed += 1,
            CampaignStatus::Archived => self.archived += 1,
        }
    }

    pub fn get(&self, status: CampaignStatus) -> usize {
        match status {
            CampaignStatus::Draft => self.draft,
            CampaignStatus::Active => self.active,
            CampaignStatus::Paused => self.paused,
            CampaignStatus::Completed => self.completed,
            CampaignStatus::Archived => self.archived,
        }
    }

    pub fn total(&self) -> usize {
        self.draft + self.active + self.paused + self.completed + self.archived
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DashboardSummary {
    pub total_campaigns: usize,
    pub total_budget: f64,
    pub total_spent: f64,
    pub total_impressions: u64,
    pub total_clicks: u64,
    pub total_conversions: u64,
    pub total_revenue: f64,
    pub status_counts: StatusCounts,
    /// Most recently updated first.
    pub recent_campaigns: Vec<Campaign>,
}

impl DashboardSummary {
    /// Percentage of the combined budget already spent.
    pub fn budget_utilization(&self) -> f64 {
        percent(self.total_spent, self.total_budget)
    }

    pub fn click_through_rate(&self) -> f64 {
        percent(self.total_clicks as f64, self.total_impressions as f64)
    }

    pub fn conversion_rate(&self) -> f64 {
        percent(self.total_conversions as f64, self.total_clicks as f64)
    }

    /// Revenue per unit of spend.
    pub fn roas(&self) -> f64 {
        if self.total_spent > 0.0 {
            self.total_revenue / self.total_spent
        } else {
            0.0
        }
    }
}

fn percent(part: f64, whole: f64) -> f64 {
    if whole > 0.0 {
        part / whole * 100.0
    } else {
        0.0
    }
}

pub fn aggregate(campaigns: &[Campaign]) -> DashboardSummary {
    let mut summary = DashboardSummary {
        total_campaigns: campaigns.len(),
        ..DashboardSummary::default()
    };

    for c in campaigns {
        summary.total_budget += c.budget;
        summary.total_spent += c.spent;
        summary.total_impressions += c.metrics.impressions;
        summary.total_clicks += c.metrics.clicks;
        summary.total_conversions += c.metrics.conversions;
        summary.total_revenue += c.metrics.revenue;
        summary.status_counts.record(c.status);
    }

    // sort_by is stable: equal timestamps keep input order.
    let mut recent: Vec<&Campaign> = campaigns.iter().collect();
    recent.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
    summary.recent_campaigns = recent.into_iter().take(RECENT_LIMIT).cloned().collect();

    summary
}
