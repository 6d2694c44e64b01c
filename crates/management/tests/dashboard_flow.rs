//! End-to-end flows: store reads feeding the summary and list views, and the
//! creation form writing through the store.

use campaign_core::config::AuthConfig;
use campaign_management::auth::DEMO_PASSWORD;
use campaign_management::seed::demo_campaigns;
use campaign_management::{
    aggregate, build_campaign, filter, AuthDirectory, CampaignForm, CampaignStatus, CampaignStore,
    InMemoryCampaignStore, SimulatedLatency, StatusFilter,
};

fn seeded_store() -> InMemoryCampaignStore {
    InMemoryCampaignStore::with_campaigns(demo_campaigns(), SimulatedLatency::none()).unwrap()
}

#[tokio::test]
async fn dashboard_summary_from_seeded_store() -> anyhow::Result<()> {
    let store = seeded_store();
    let summary = aggregate(&store.list().await?);

    assert!((summary.total_budget - 155_000.0).abs() < f64::EPSILON);
    assert!((summary.total_spent - 27_500.0).abs() < f64::EPSILON);
    assert_eq!(summary.status_counts.active, 1);
    assert_eq!(summary.status_counts.draft, 1);
    assert_eq!(summary.status_counts.paused, 1);
    assert_eq!(summary.recent_campaigns.len(), 3);
    Ok(())
}

#[tokio::test]
async fn campaign_list_search() -> anyhow::Result<()> {
    let store = seeded_store();
    let campaigns = store.list().await?;

    let hits = filter(&campaigns, "Mobile", StatusFilter::All);
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].name, "Mobile App Launch");

    assert_eq!(filter(&campaigns, "", "all".parse()?), campaigns);
    Ok(())
}

#[tokio::test]
async fn form_submission_creates_campaign_for_logged_in_user() -> anyhow::Result<()> {
    let auth = AuthDirectory::with_demo_users(&AuthConfig::default())?.without_delay();
    let session = auth.login("analyst@adagency.com", DEMO_PASSWORD).await?;
    let store = seeded_store();

    let form = CampaignForm {
        name: "Winter Warmers".into(),
        description: "Coats and scarves sale".into(),
        status: "active".into(),
        budget: "20000".into(),
        start_date: "2024-12-01".into(),
        end_date: "2025-02-28".into(),
        locations: vec!["Canada".into(), " ".into()],
        ..CampaignForm::default()
    };
    let draft = build_campaign(&form, &auth.current_user(&session.token)?.id)?;
    let created = store.create(draft).await?;

    assert_eq!(created.created_by, "3");
    assert_eq!(store.get(&created.id).await?, created);
    assert_eq!(created.target_audience.locations, vec!["Canada"]);

    let campaigns = store.list().await?;
    assert_eq!(campaigns.len(), 4);
    assert_eq!(campaigns.last().map(|c| c.id.as_str()), Some(created.id.as_str()));

    let summary = aggregate(&campaigns);
    assert_eq!(summary.status_counts.active, 2);
    assert_eq!(summary.recent_campaigns[0].id, created.id);

    let sales = filter(&campaigns, "sale", StatusFilter::Only(CampaignStatus::Active));
    assert_eq!(sales.len(), 2);
    Ok(())
}

#[tokio::test]
async fn invalid_form_never_reaches_store() {
    let store = seeded_store();
    let form = CampaignForm {
        name: "".into(),
        budget: "100".into(),
        start_date: "2024-01-01".into(),
        end_date: "2024-01-31".into(),
        ..CampaignForm::default()
    };

    let err = build_campaign(&form, "1").unwrap_err();
    assert_eq!(err.field(), Some("name"));
    assert_eq!(store.len(), 3);
}

#[tokio::test]
async fn missing_campaign_paths() -> anyhow::Result<()> {
    let store = seeded_store();
    assert!(!store.delete("404").await?);
    assert!(store.set_status("404", CampaignStatus::Paused).await.unwrap_err().is_not_found());
    assert!(store.get("404").await.unwrap_err().is_not_found());

    assert!(store.delete("1").await?);
    let summary = aggregate(&store.list().await?);
    assert_eq!(summary.status_counts.active, 0);
    Ok(())
}
