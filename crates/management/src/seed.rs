//! Demo users and campaigns the dashboard ships with.

use chrono::{DateTime, NaiveDate, Utc};

use crate::models::*;

fn day(year: i32, month: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, d).unwrap_or_default()
}

fn midnight(year: i32, month: u32, d: u32) -> DateTime<Utc> {
    day(year, month, d).and_hms_opt(0, 0, 0).unwrap_or_default().and_utc()
}

pub fn demo_users() -> Vec<User> {
    let since = midnight(2024, 1, 1);
    [
        ("1", "admin@adagency.com", "Admin User", UserRole::Admin, "admin"),
        ("2", "manager@adagency.com", "Campaign Manager", UserRole::Manager, "manager"),
        ("3", "analyst@adagency.com", "Data Analyst", UserRole::Analyst, "analyst"),
    ]
    .into_iter()
    .map(|(id, email, name, role, avatar)| User {
        id: id.to_string(),
        email: email.to_string(),
        name: name.to_string(),
        role,
        avatar: Some(format!("/api/avatars/{avatar}.jpg")),
        is_active: true,
        created_at: since,
        updated_at: since,
    })
    .collect()
}

pub fn demo_campaigns() -> Vec<Campaign> {
    vec![
        Campaign {
            id: "1".into(),
            name: "Summer Sale Campaign".into(),
            description: Some("Promote summer products with special discounts".into()),
            status: CampaignStatus::Active,
            budget: 50_000.0,
            spent: 12_500.0,
            start_date: day(2024, 6, 1),
            end_date: day(2024, 8, 31),
            target_audience: TargetAudience {
                age_range: Some((25, 45)),
                locations: vec!["United States".into(), "Canada".into()],
                interests: vec!["shopping".into(), "fashion".into(), "lifestyle".into()],
                demographics: Demographics {
                    gender: Gender::All,
                    income: IncomeBracket::Medium,
                    education: EducationLevel::College,
                },
                custom_audiences: Vec::new(),
            },
            ad_groups: Vec::new(),
            metrics: CampaignMetrics {
                impressions: 1_250_000,
                clicks: 25_000,
                ctr: 2.0,
                cpc: 0.50,
                cpm: 10.0,
                conversions: 1_250,
                conversion_rate: 5.0,
                cost_per_conversion: 10.0,
                revenue: 62_500.0,
                roas: 5.0,
            },
            created_by: "2".into(),
            created_at: midnight(2024, 5, 15),
            updated_at: midnight(2024, 6, 15),
        },
        Campaign {
            id: "2".into(),
            name: "Holiday Season Promotion".into(),
            description: Some("End of year holiday shopping campaign".into()),
            status: CampaignStatus::Draft,
            budget: 75_000.0,
            spent: 0.0,
            start_date: day(2024, 11, 1),
            end_date: day(2024, 12, 31),
            target_audience: TargetAudience {
                age_range: Some((18, 65)),
                locations: vec!["United States".into(), "United Kingdom".into(), "Germany".into()],
                interests: vec!["shopping".into(), "gifts".into(), "holidays".into()],
                demographics: Demographics::default(),
                custom_audiences: Vec::new(),
            },
            ad_groups: Vec::new(),
            metrics: CampaignMetrics::default(),
            created_by: "2".into(),
            created_at: midnight(2024, 6, 1),
            updated_at: midnight(2024, 6, 1),
        },
        Campaign {
            id: "3".into(),
            name: "Mobile App Launch".into(),
            description: Some("Promote new mobile application".into()),
            status: CampaignStatus::Paused,
            budget: 30_000.0,
            spent: 15_000.0,
            start_date: day(2024, 5, 1),
            end_date: day(2024, 7, 31),
            target_audience: TargetAudience {
                age_range: Some((18, 35)),
                locations: vec!["United States".into()],
                interests: vec!["technology".into(), "mobile".into(), "apps".into()],
                demographics: Demographics {
                    gender: Gender::All,
                    income: IncomeBracket::Medium,
                    education: EducationLevel::College,
                },
                custom_audiences: Vec::new(),
            },
            ad_groups: Vec::new(),
            metrics: CampaignMetrics {
                impressions: 800_000,
                clicks: 12_000,
                ctr: 1.5,
                cpc: 1.25,
                cpm: 18.75,
                conversions: 600,
                conversion_rate: 5.0,
                cost_per_conversion: 25.0,
                revenue: 30_000.0,
                roas: 2.0,
            },
            created_by: "1".into(),
            created_at: midnight(2024, 4, 15),
            updated_at: midnight(2024, 6, 10),
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_demo_campaigns_satisfy_invariants() {
        let campaigns = demo_campaigns();
        assert_eq!(campaigns.len(), 3);
        for c in &campaigns {
            c.check_invariants().unwrap();
        }
        assert_eq!(campaigns[2].start_date, NaiveDate::from_ymd_opt(2024, 5, 1).unwrap());
    }

    #[test]
    fn test_demo_users_have_distinct_emails() {
        let users = demo_users();
        assert_eq!(users.len(), 3);
        assert_eq!(users[0].role, UserRole::Admin);
        assert!(users.iter().all(|u| u.email.ends_with("@adagency.com")));
    }
}
