//! Campaign store: the async CRUD contract and its in-memory implementation.
//!
//! `InMemoryCampaignStore` keeps campaigns in insertion order and awaits a
//! configurable delay before each operation, standing in for the round trip
//! a network-backed store would make. A real client implements the same
//! `CampaignStore` trait.

use std::collections::HashSet;
use std::fmt;
use std::future::Future;
use std::time::Duration;

use async_trait::async_trait;
use campaign_core::config::StoreConfig;
use campaign_core::{CampaignError, CampaignResult};
use chrono::Utc;
use parking_lot::RwLock;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::models::*;
use crate::seed;

const ENTITY: &str = "campaign";

// ─── Latency ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreOp {
    List,
    Get,
    Create,
    Update,
    Delete,
}

impl fmt::Display for StoreOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            StoreOp::List => "list",
            StoreOp::Get => "get",
            StoreOp::Create => "create",
            StoreOp::Update => "update",
            StoreOp::Delete => "delete",
        };
        f.write_str(name)
    }
}

/// Per-operation delay awaited before the collection is touched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimulatedLatency {
    pub list: Duration,
    pub get: Duration,
    pub create: Duration,
    pub update: Duration,
    pub delete: Duration,
}

impl SimulatedLatency {
    pub fn none() -> Self {
        Self {
            list: Duration::ZERO,
            get: Duration::ZERO,
            create: Duration::ZERO,
            update: Duration::ZERO,
            delete: Duration::ZERO,
        }
    }

    pub fn from_config(cfg: &StoreConfig) -> Self {
        if !cfg.simulate_latency {
            return Self::none();
        }
        Self {
            list: Duration::from_millis(cfg.list_ms),
            get: Duration::from_millis(cfg.get_ms),
            create: Duration::from_millis(cfg.create_ms),
            update: Duration::from_millis(cfg.update_ms),
            delete: Duration::from_millis(cfg.delete_ms),
        }
    }

    pub fn delay(&self, op: StoreOp) -> Duration {
        match op {
            StoreOp::List => self.list,
            StoreOp::Get => self.get,
            StoreOp::Create => self.create,
            StoreOp::Update => self.update,
            StoreOp::Delete => self.delete,
        }
    }

    pub async fn wait(&self, op: StoreOp) {
        let delay = self.delay(op);
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
    }
}

impl Default for SimulatedLatency {
    fn default() -> Self {
        Self::from_config(&StoreConfig::default())
    }
}

// ─── Contract ──────────────────────────────────────────────────────────────

#[async_trait]
pub trait CampaignStore: Send + Sync {
    /// All campaigns in insertion order.
    async fn list(&self) -> CampaignResult<Vec<Campaign>>;

    async fn get(&self, id: &str) -> CampaignResult<Campaign>;

    /// Assign an id and timestamps, append, and return the stored record.
    async fn create(&self, draft: CampaignDraft) -> CampaignResult<Campaign>;

    async fn update(&self, id: &str, update: CampaignUpdate) -> CampaignResult<Campaign>;

    /// Returns whether a record was removed. Unknown ids are not an error.
    async fn delete(&self, id: &str) -> CampaignResult<bool>;

    async fn set_status(&self, id: &str, status: CampaignStatus) -> CampaignResult<Campaign> {
        self.update(id, CampaignUpdate::status(status)).await
    }
}

// ─── In-memory store ───────────────────────────────────────────────────────

pub struct InMemoryCampaignStore {
    campaigns: RwLock<Vec<Campaign>>,
    latency: SimulatedLatency,
}

impl InMemoryCampaignStore {
    pub fn new(latency: SimulatedLatency) -> Self {
        Self {
            campaigns: RwLock::new(Vec::new()),
            latency,
        }
    }

    /// Seed an isolated store. Ids must be unique.
    pub fn with_campaigns(seed: Vec<Campaign>, latency: SimulatedLatency) -> CampaignResult<Self> {
        let mut seen = HashSet::with_capacity(seed.len());
        for campaign in &seed {
            if !seen.insert(campaign.id.as_str()) {
                return Err(CampaignError::Conflict(format!("duplicate campaign id '{}'", campaign.id)));
            }
            campaign.check_invariants()?;
        }
        info!(campaigns = seed.len(), "Campaign store seeded");
        Ok(Self {
            campaigns: RwLock::new(seed),
            latency,
        })
    }

    pub fn with_demo_data(latency: SimulatedLatency) -> Self {
        let campaigns = seed::demo_campaigns();
        info!(campaigns = campaigns.len(), "Campaign store initialized with demo data");
        Self {
            campaigns: RwLock::new(campaigns),
            latency,
        }
    }

    pub fn latency(&self) -> &SimulatedLatency {
        &self.latency
    }

    pub fn len(&self) -> usize {
        self.campaigns.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.campaigns.read().is_empty()
    }

    fn fresh_id(campaigns: &[Campaign]) -> String {
        loop {
            let id = Uuid::new_v4().to_string();
            if !campaigns.iter().any(|c| c.id == id) {
                return id;
            }
        }
    }
}

impl Default for InMemoryCampaignStore {
    fn default() -> Self {
        Self::new(SimulatedLatency::default())
    }
}

#[async_trait]
impl CampaignStore for InMemoryCampaignStore {
    async fn list(&self) -> CampaignResult<Vec<Campaign>> {
        self.latency.wait(StoreOp::List).await;
        let campaigns = self.campaigns.read().clone();
        debug!(count = campaigns.len(), "Listed campaigns");
        Ok(campaigns)
    }

    async fn get(&self, id: &str) -> CampaignResult<Campaign> {
        self.latency.wait(StoreOp::Get).await;
        self.campaigns
            .read()
            .iter()
            .find(|c| c.id == id)
            .cloned()
            .ok_or_else(|| CampaignError::not_found(ENTITY, id))
    }

    async fn create(&self, draft: CampaignDraft) -> CampaignResult<Campaign> {
        self.latency.wait(StoreOp::Create).await;

        let mut campaigns = self.campaigns.write();
        let campaign = Campaign::from_draft(Self::fresh_id(&campaigns), draft, Utc::now());
        if let Err(err) = campaign.check_invariants() {
            warn!(error = %err, "Rejected campaign create");
            return Err(err);
        }
        campaigns.push(campaign.clone());
        drop(campaigns);

        metrics::counter!("management.campaigns.created").increment(1);
        info!(id = %campaign.id, name = %campaign.name, created_by = %campaign.created_by, "Campaign created");
        Ok(campaign)
    }

    async fn update(&self, id: &str, update: CampaignUpdate) -> CampaignResult<Campaign> {
        self.latency.wait(StoreOp::Update).await;

        let mut campaigns = self.campaigns.write();
        let slot = campaigns
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or_else(|| CampaignError::not_found(ENTITY, id))?;

        // Merge into a copy so a rejected update leaves the record untouched.
        let mut merged = slot.clone();
        update.apply_to(&mut merged);
        if let Err(err) = merged.check_invariants() {
            warn!(id, error = %err, "Rejected campaign update");
            return Err(err);
        }
        merged.updated_at = Utc::now();
        *slot = merged.clone();
        drop(campaigns);

        metrics::counter!("management.campaigns.updated").increment(1);
        info!(id, status = %merged.status, "Campaign updated");
        Ok(merged)
    }

    async fn delete(&self, id: &str) -> CampaignResult<bool> {
        self.latency.wait(StoreOp::Delete).await;

        let mut campaigns = self.campaigns.write();
        let removed = match campaigns.iter().position(|c| c.id == id) {
            Some(index) => {
                campaigns.remove(index);
                true
            }
            None => false,
        };
        drop(campaigns);

        if removed {
            metrics::counter!("management.campaigns.deleted").increment(1);
            info!(id, "Campaign deleted");
        } else {
            debug!(id, "Delete of unknown campaign ignored");
        }
        Ok(removed)
    }
}

// ─── Timeout decorator ─────────────────────────────────────────────────────

/// Bounds every call of the wrapped store; elapsed calls fail as `Transient`.
pub struct TimeoutStore<S> {
    inner: S,
    timeout: Duration,
}

impl<S: CampaignStore> TimeoutStore<S> {
    pub fn new(inner: S, timeout: Duration) -> Self {
        Self { inner, timeout }
    }

    pub fn inner(&self) -> &S {
        &self.inner
    }

    async fn bounded<T>(
        &self,
        op: StoreOp,
        fut: impl Future<Output = CampaignResult<T>> + Send,
    ) -> CampaignResult<T> {
        match tokio::time::timeout(self.timeout, fut).await {
            Ok(result) => result,
            Err(_) => {
                let timeout_ms = self.timeout.as_millis() as u64;
                warn!(%op, timeout_ms, "Campaign store call timed out");
                Err(CampaignError::Transient(format!("{op} timed out after {timeout_ms} ms")))
            }
        }
    }
}

#[async_trait]
impl<S: CampaignStore> CampaignStore for TimeoutStore<S> {
    async fn list(&self) -> CampaignResult<Vec<Campaign>> {
        self.bounded(StoreOp::List, self.inner.list()).await
    }

    async fn get(&self, id: &str) -> CampaignResult<Campaign> {
        self.bounded(StoreOp::Get, self.inner.get(id)).await
    }

    async fn create(&self, draft: CampaignDraft) -> CampaignResult<Campaign> {
        self.bounded(StoreOp::Create, self.inner.create(draft)).await
    }

    async fn update(&self, id: &str, update: CampaignUpdate) -> CampaignResult<Campaign> {
        self.bounded(StoreOp::Update, self.inner.update(id, update)).await
    }

    async fn delete(&self, id: &str) -> CampaignResult<bool> {
        self.bounded(StoreOp::Delete, self.inner.delete(id)).await
    }
}
