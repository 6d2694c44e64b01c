//! Campaign list search and status filtering.

use std::fmt;
use std::str::FromStr;

use campaign_core::CampaignError;
use serde::{Deserialize, Serialize};

use crate::models::{Campaign, CampaignStatus};

/// Status dropdown value; `All` is the `"all"` sentinel.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusFilter {
    #[default]
    All,
    Only(CampaignStatus),
}

impl StatusFilter {
    pub fn admits(&self, status: CampaignStatus) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Only(wanted) => *wanted == status,
        }
    }
}

impl From<CampaignStatus> for StatusFilter {
    fn from(status: CampaignStatus) -> Self {
        StatusFilter::Only(status)
    }
}

impl FromStr for StatusFilter {
    type Err = CampaignError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("all") {
            Ok(StatusFilter::All)
        } else {
            s.parse().map(StatusFilter::Only)
        }
    }
}

impl fmt::Display for StatusFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StatusFilter::All => f.write_str("all"),
            StatusFilter::Only(status) => fmt::Display::fmt(status, f),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CampaignFilter {
    #[serde(default)]
    pub search: String,
    #[serde(default)]
    pub status: StatusFilter,
}

impl CampaignFilter {
    pub fn new(search: impl Into<String>, status: StatusFilter) -> Self {
        Self {
            search: search.into(),
            status,
        }
    }

    pub fn matches(&self, campaign: &Campaign) -> bool {
        self.status.admits(campaign.status) && matches_search(campaign, &self.search.to_lowercase())
    }

    pub fn apply(&self, campaigns: &[Campaign]) -> Vec<Campaign> {
        filter(campaigns, &self.search, self.status)
    }
}

/// `needle` must already be lowercased. An empty needle matches everything.
fn matches_search(campaign: &Campaign, needle: &str) -> bool {
    if needle.is_empty() {
        return true;
    }
    campaign.name.to_lowercase().contains(needle)
        || campaign
            .description
            .as_deref()
            .is_some_and(|d| d.to_lowercase().contains(needle))
}

/// Keep campaigns whose name or description contains `search_term`
/// (case-insensitive) and whose status passes `status`. Input order is kept.
pub fn filter(campaigns: &[Campaign], search_term: &str, status: StatusFilter) -> Vec<Campaign> {
    let needle = search_term.to_lowercase();
    campaigns
        .iter()
        .filter(|c| status.admits(c.status) && matches_search(c, &needle))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seed::demo_campaigns;

    fn names(campaigns: &[Campaign]) -> Vec<&str> {
        campaigns.iter().map(|c| c.name.as_str()).collect()
    }

    #[test]
    fn test_empty_search_and_all_is_identity() {
        let campaigns = demo_campaigns();
        assert_eq!(filter(&campaigns, "", StatusFilter::All), campaigns);
    }

    #[test]
    fn test_search_is_case_insensitive() {
        let campaigns = demo_campaigns();
        assert_eq!(names(&filter(&campaigns, "SALE", StatusFilter::All)), vec!["Summer Sale Campaign"]);
        assert_eq!(names(&filter(&campaigns, "mobile", StatusFilter::All)), vec!["Mobile App Launch"]);
    }

    #[test]
    fn test_search_matches_description() {
        let campaigns = demo_campaigns();
        // Only the holiday campaign's description mentions "end of year".
        assert_eq!(
            names(&filter(&campaigns, "end of YEAR", StatusFilter::All)),
            vec!["Holiday Season Promotion"]
        );
    }

    #[test]
    fn test_missing_description_only_matches_on_name() {
        let mut campaigns = demo_campaigns();
        campaigns[1].description = None;
        assert!(filter(&campaigns, "holiday shopping", StatusFilter::All).is_empty());
        assert_eq!(filter(&campaigns, "holiday", StatusFilter::All).len(), 1);
    }

    #[test]
    fn test_status_filter_and_search_combine() {
        let campaigns = demo_campaigns();
        let paused = StatusFilter::Only(CampaignStatus::Paused);
        assert_eq!(names(&filter(&campaigns, "", paused)), vec!["Mobile App Launch"]);
        assert!(filter(&campaigns, "sale", paused).is_empty());
        // "promot" appears in all three descriptions or names.
        assert_eq!(filter(&campaigns, "promot", StatusFilter::All).len(), 3);
        assert_eq!(
            names(&filter(&campaigns, "promot", CampaignStatus::Draft.into())),
            vec!["Holiday Season Promotion"]
        );
    }

    #[test]
    fn test_filter_is_idempotent_and_order_preserving() {
        let campaigns = demo_campaigns();
        let cases: [(&str, StatusFilter, &[&str]); 7] = [
            ("a", StatusFilter::All, &["1", "2", "3"]),
            ("PROMOT", StatusFilter::All, &["1", "2", "3"]),
            ("PROMOT", StatusFilter::Only(CampaignStatus::Paused), &["3"]),
            ("discounts", StatusFilter::All, &["1"]),
            ("", StatusFilter::Only(CampaignStatus::Draft), &["2"]),
            ("HoLiDaY", StatusFilter::Only(CampaignStatus::Active), &[]),
            ("", StatusFilter::Only(CampaignStatus::Archived), &[]),
        ];

        for (term, status, expected) in cases {
            let once = filter(&campaigns, term, status);
            let ids: Vec<&str> = once.iter().map(|c| c.id.as_str()).collect();
            assert_eq!(ids, expected, "({term:?}, {status})");
            assert_eq!(filter(&once, term, status), once, "({term:?}, {status})");

            let positions: Vec<usize> = once
                .iter()
                .filter_map(|hit| campaigns.iter().position(|c| c.id == hit.id))
                .collect();
            assert_eq!(positions.len(), once.len());
            assert!(positions.windows(2).all(|w| w[0] < w[1]), "({term:?}, {status})");
        }
    }

    #[test]
    fn test_status_filter_parse() {
        assert_eq!("all".parse::<StatusFilter>().unwrap(), StatusFilter::All);
        assert_eq!("ALL".parse::<StatusFilter>().unwrap(), StatusFilter::All);
        assert_eq!(
            "archived".parse::<StatusFilter>().unwrap(),
            StatusFilter::Only(CampaignStatus::Archived)
        );
        assert!("everything".parse::<StatusFilter>().is_err());
        assert_eq!(StatusFilter::Only(CampaignStatus::Active).to_string(), "active");
    }

    #[test]
    fn test_campaign_filter_value() {
        let campaigns = demo_campaigns();
        let f = CampaignFilter::new("Launch", StatusFilter::All);
        assert!(f.matches(&campaigns[2]));
        assert!(!f.matches(&campaigns[0]));
        assert_eq!(f.apply(&campaigns).len(), 1);
        assert_eq!(CampaignFilter::default().apply(&campaigns).len(), 3);
    }
}
