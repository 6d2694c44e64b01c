//! Campaign dashboard core — store, summary statistics, list filtering,
//! creation form validation and the demo login gate.
//!
//! Data lives in an injectable in-memory store; a network-backed client
//! implements the same `CampaignStore` trait.

pub mod aggregator;
pub mod auth;
pub mod filter;
pub mod models;
pub mod seed;
pub mod store;
pub mod validation;

pub use aggregator::{aggregate, DashboardSummary, StatusCounts};
pub use auth::{AuthDirectory, Session};
pub use filter::{filter, CampaignFilter, StatusFilter};
pub use models::{Campaign, CampaignDraft, CampaignStatus, CampaignUpdate};
pub use store::{CampaignStore, InMemoryCampaignStore, SimulatedLatency, TimeoutStore};
pub use validation::{build_campaign, CampaignForm};
