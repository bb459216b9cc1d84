//! In-memory fakes of the ports, shared by the service tests.
//!
//! Each fake has failure toggles so tests can exercise the absorption and
//! fallback paths; the link repo can additionally park inserts on a gate to
//! interleave a removal with an in-flight persistence call.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::Mutex;
use tokio::sync::Notify;
use uuid::Uuid;

use linkbio_core::entities::{Link, NewLink, NewProfile, Profile};
use linkbio_core::error::DomainError;
use linkbio_core::plan::Plan;
use linkbio_core::traits::{
    BlobStore, CounterRpc, IdentityProvider, LinkPatch, LinkRepository, ProfilePatch,
    ProfileRepository, PromoOutcome, PromoRedeemer, RepoResult,
};
use linkbio_core::value_objects::LinkKey;

use super::context::ServiceContext;

fn db_error() -> DomainError {
    DomainError::DatabaseError("injected failure".to_string())
}

// ============================================================================
// Profile repository fake
// ============================================================================

#[derive(Default)]
pub(crate) struct FakeProfileRepo {
    rows: Mutex<HashMap<Uuid, Profile>>,
    fail_reads: AtomicBool,
    fail_writes: AtomicBool,
}

impl FakeProfileRepo {
    pub fn seed(&self, profile: Profile) {
        self.rows.lock().insert(profile.id, profile);
    }

    pub fn get(&self, id: Uuid) -> Option<Profile> {
        self.rows.lock().get(&id).cloned()
    }

    pub fn get_by_username(&self, username: &str) -> Option<Profile> {
        self.rows
            .lock()
            .values()
            .find(|p| p.username == username)
            .cloned()
    }

    pub fn set_fail_reads(&self, fail: bool) {
        self.fail_reads.store(fail, Ordering::SeqCst);
    }

    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    fn check_read(&self) -> RepoResult<()> {
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(db_error());
        }
        Ok(())
    }

    fn check_write(&self) -> RepoResult<()> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(db_error());
        }
        Ok(())
    }
}

#[async_trait]
impl ProfileRepository for FakeProfileRepo {
    async fn find_by_id(&self, id: Uuid) -> RepoResult<Option<Profile>> {
        self.check_read()?;
        Ok(self.rows.lock().get(&id).cloned())
    }

    async fn find_by_username(&self, username: &str) -> RepoResult<Option<Profile>> {
        self.check_read()?;
        Ok(self
            .rows
            .lock()
            .values()
            .find(|p| p.username == username)
            .cloned())
    }

    async fn username_exists(&self, username: &str) -> RepoResult<bool> {
        self.check_read()?;
        Ok(self.rows.lock().values().any(|p| p.username == username))
    }

    async fn upsert(&self, profile: &NewProfile) -> RepoResult<()> {
        self.check_write()?;
        let mut rows = self.rows.lock();
        if rows.contains_key(&profile.id) {
            return Ok(());
        }
        if rows
            .values()
            .any(|p| p.username == profile.username)
        {
            return Err(DomainError::UsernameTaken(profile.username.clone()));
        }

        let mut row = Profile::new(profile.id, profile.username.clone());
        row.display_name = profile.display_name.clone();
        row.email = profile.email.clone();
        row.avatar_url = profile.avatar_url.clone();
        row.theme = profile.theme.clone();
        rows.insert(row.id, row);
        Ok(())
    }

    async fn update(&self, id: Uuid, patch: &ProfilePatch) -> RepoResult<()> {
        self.check_write()?;
        let mut rows = self.rows.lock();
        let row = rows.get_mut(&id).ok_or(DomainError::ProfileNotFound(id))?;

        if let Some(username) = &patch.username {
            if !username.is_empty() {
                row.username = username.clone();
            }
        }
        if let Some(v) = &patch.display_name {
            row.display_name = (!v.is_empty()).then(|| v.clone());
        }
        if let Some(v) = &patch.bio {
            row.bio = (!v.is_empty()).then(|| v.clone());
        }
        if let Some(v) = &patch.avatar_url {
            row.avatar_url = (!v.is_empty()).then(|| v.clone());
        }
        if let Some(theme) = &patch.theme {
            row.theme = theme.clone();
        }
        if let Some(plan) = patch.plan {
            row.plan = plan;
        }
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> RepoResult<()> {
        self.check_write()?;
        self.rows
            .lock()
            .remove(&id)
            .map(|_| ())
            .ok_or(DomainError::ProfileNotFound(id))
    }

    async fn get_page_views(&self, username: &str) -> RepoResult<Option<i64>> {
        self.check_read()?;
        Ok(self
            .rows
            .lock()
            .values()
            .find(|p| p.username == username)
            .map(|p| p.page_views))
    }

    async fn set_page_views(&self, username: &str, value: i64) -> RepoResult<bool> {
        self.check_write()?;
        let mut rows = self.rows.lock();
        match rows.values_mut().find(|p| p.username == username) {
            Some(row) => {
                row.page_views = value;
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

// ============================================================================
// Link repository fake
// ============================================================================

#[derive(Default)]
pub(crate) struct FakeLinkRepo {
    rows: Mutex<Vec<Link>>,
    fail_all: AtomicBool,
    inserts_held: AtomicBool,
    insert_started: Notify,
    gate: Notify,
    deleted_ids: Mutex<Vec<Uuid>>,
    position_log: Mutex<Vec<(Uuid, i32)>>,
}

impl FakeLinkRepo {
    pub fn seed_row(&self, link: Link) {
        self.rows.lock().push(link);
    }

    pub fn rows(&self) -> Vec<Link> {
        self.rows.lock().clone()
    }

    pub fn deleted(&self) -> Vec<Uuid> {
        self.deleted_ids.lock().clone()
    }

    pub fn position_writes(&self) -> Vec<(Uuid, i32)> {
        self.position_log.lock().clone()
    }

    pub fn set_fail_all(&self, fail: bool) {
        self.fail_all.store(fail, Ordering::SeqCst);
    }

    /// Park incoming inserts on the gate until released
    pub fn hold_inserts(&self, hold: bool) {
        self.inserts_held.store(hold, Ordering::SeqCst);
        if !hold {
            self.gate.notify_one();
        }
    }

    /// Wait until an insert call has entered the fake
    pub async fn wait_insert_started(&self) {
        self.insert_started.notified().await;
    }

    fn check(&self) -> RepoResult<()> {
        if self.fail_all.load(Ordering::SeqCst) {
            return Err(db_error());
        }
        Ok(())
    }
}

#[async_trait]
impl LinkRepository for FakeLinkRepo {
    async fn find_by_profile(&self, profile_id: Uuid) -> RepoResult<Vec<Link>> {
        self.check()?;
        let mut links: Vec<Link> = self
            .rows
            .lock()
            .iter()
            .filter(|l| l.profile_id == profile_id)
            .cloned()
            .collect();
        links.sort_by_key(|l| l.position);
        Ok(links)
    }

    async fn find_active_by_profile(&self, profile_id: Uuid) -> RepoResult<Vec<Link>> {
        let mut links = self.find_by_profile(profile_id).await?;
        links.retain(|l| l.is_active);
        Ok(links)
    }

    async fn insert(&self, link: &NewLink) -> RepoResult<Link> {
        self.insert_started.notify_one();
        while self.inserts_held.load(Ordering::SeqCst) {
            self.gate.notified().await;
        }
        self.check()?;

        let row = Link {
            key: LinkKey::Persisted(Uuid::new_v4()),
            profile_id: link.profile_id,
            title: link.title.clone(),
            url: link.url.clone(),
            icon: None,
            position: link.position,
            is_active: link.is_active,
            click_count: 0,
            scheduled_at: link.scheduled_at,
            created_at: chrono::Utc::now(),
        };
        self.rows.lock().push(row.clone());
        Ok(row)
    }

    async fn update(&self, id: Uuid, patch: &LinkPatch) -> RepoResult<bool> {
        self.check()?;
        let mut rows = self.rows.lock();
        let Some(row) = rows
            .iter_mut()
            .find(|l| l.key == LinkKey::Persisted(id))
        else {
            return Ok(false);
        };

        if let Some(title) = &patch.title {
            row.title = title.clone();
        }
        if let Some(url) = &patch.url {
            row.url = url.clone();
        }
        if let Some(icon) = &patch.icon {
            row.icon = (!icon.is_empty()).then(|| icon.clone());
        }
        if let Some(position) = patch.position {
            row.position = position;
        }
        if let Some(is_active) = patch.is_active {
            row.is_active = is_active;
        }
        if patch.clear_schedule {
            row.scheduled_at = None;
        } else if let Some(at) = patch.scheduled_at {
            row.scheduled_at = Some(at);
        }
        Ok(true)
    }

    async fn set_position(&self, id: Uuid, position: i32) -> RepoResult<()> {
        self.check()?;
        self.position_log.lock().push((id, position));
        let mut rows = self.rows.lock();
        let row = rows
            .iter_mut()
            .find(|l| l.key == LinkKey::Persisted(id))
            .ok_or(DomainError::LinkNotFound(id))?;
        row.position = position;
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> RepoResult<()> {
        self.check()?;
        self.deleted_ids.lock().push(id);
        let mut rows = self.rows.lock();
        let before = rows.len();
        rows.retain(|l| l.key != LinkKey::Persisted(id));
        if rows.len() == before {
            return Err(DomainError::LinkNotFound(id));
        }
        Ok(())
    }

    async fn delete_by_profile(&self, profile_id: Uuid) -> RepoResult<u64> {
        self.check()?;
        let mut rows = self.rows.lock();
        let before = rows.len();
        rows.retain(|l| l.profile_id != profile_id);
        Ok((before - rows.len()) as u64)
    }

    async fn get_click_count(&self, id: Uuid) -> RepoResult<Option<i64>> {
        self.check()?;
        Ok(self
            .rows
            .lock()
            .iter()
            .find(|l| l.key == LinkKey::Persisted(id))
            .map(|l| l.click_count))
    }

    async fn set_click_count(&self, id: Uuid, value: i64) -> RepoResult<bool> {
        self.check()?;
        let mut rows = self.rows.lock();
        match rows.iter_mut().find(|l| l.key == LinkKey::Persisted(id)) {
            Some(row) => {
                row.click_count = value;
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

// ============================================================================
// Counter RPC fake
// ============================================================================

#[derive(Default)]
pub(crate) struct FakeCounterRpc {
    fail: AtomicBool,
    clicks: Mutex<Vec<Uuid>>,
    views: Mutex<Vec<String>>,
}

impl FakeCounterRpc {
    pub fn set_fail(&self, fail: bool) {
        self.fail.store(fail, Ordering::SeqCst);
    }

    pub fn clicks(&self) -> Vec<Uuid> {
        self.clicks.lock().clone()
    }

    pub fn views(&self) -> Vec<String> {
        self.views.lock().clone()
    }
}

#[async_trait]
impl CounterRpc for FakeCounterRpc {
    async fn increment_click(&self, link_id: Uuid) -> RepoResult<()> {
        if self.fail.load(Ordering::SeqCst) {
            return Err(DomainError::RpcUnavailable("injected".to_string()));
        }
        self.clicks.lock().push(link_id);
        Ok(())
    }

    async fn increment_page_views(&self, username: &str) -> RepoResult<()> {
        if self.fail.load(Ordering::SeqCst) {
            return Err(DomainError::RpcUnavailable("injected".to_string()));
        }
        self.views.lock().push(username.to_string());
        Ok(())
    }
}

// ============================================================================
// Identity provider / blob store / promo fakes
// ============================================================================

#[derive(Default)]
pub(crate) struct FakeIdentityProvider {
    fail: AtomicBool,
    sign_outs: Mutex<Vec<Uuid>>,
}

impl FakeIdentityProvider {
    pub fn set_fail(&self, fail: bool) {
        self.fail.store(fail, Ordering::SeqCst);
    }

    pub fn sign_outs(&self) -> Vec<Uuid> {
        self.sign_outs.lock().clone()
    }
}

#[async_trait]
impl IdentityProvider for FakeIdentityProvider {
    async fn sign_out(&self, identity_id: Uuid) -> RepoResult<()> {
        if self.fail.load(Ordering::SeqCst) {
            return Err(DomainError::IdentityError("injected".to_string()));
        }
        self.sign_outs.lock().push(identity_id);
        Ok(())
    }
}

#[derive(Default)]
pub(crate) struct FakeBlobStore {
    fail: AtomicBool,
    objects: Mutex<HashMap<String, Vec<u8>>>,
    deletes: Mutex<Vec<String>>,
}

impl FakeBlobStore {
    pub fn set_fail(&self, fail: bool) {
        self.fail.store(fail, Ordering::SeqCst);
    }

    pub fn deletes(&self) -> Vec<String> {
        self.deletes.lock().clone()
    }

    pub fn has(&self, key: &str) -> bool {
        self.objects.lock().contains_key(key)
    }
}

#[async_trait]
impl BlobStore for FakeBlobStore {
    async fn put(&self, key: &str, bytes: &[u8], _content_type: &str) -> RepoResult<String> {
        if self.fail.load(Ordering::SeqCst) {
            return Err(DomainError::StorageError("injected".to_string()));
        }
        self.objects.lock().insert(key.to_string(), bytes.to_vec());
        Ok(format!("https://cdn.invalid/{key}"))
    }

    async fn delete(&self, key: &str) -> RepoResult<()> {
        if self.fail.load(Ordering::SeqCst) {
            return Err(DomainError::StorageError("injected".to_string()));
        }
        self.deletes.lock().push(key.to_string());
        self.objects.lock().remove(key);
        Ok(())
    }
}

pub(crate) struct FakePromoRedeemer {
    fail: AtomicBool,
    outcome: Mutex<PromoOutcome>,
    calls: Mutex<Vec<(String, Uuid)>>,
}

impl Default for FakePromoRedeemer {
    fn default() -> Self {
        Self {
            fail: AtomicBool::new(false),
            outcome: Mutex::new(PromoOutcome {
                success: true,
                plan: Some(Plan::Pro),
                message: None,
            }),
            calls: Mutex::new(Vec::new()),
        }
    }
}

impl FakePromoRedeemer {
    pub fn set_fail(&self, fail: bool) {
        self.fail.store(fail, Ordering::SeqCst);
    }

    pub fn set_outcome(&self, outcome: PromoOutcome) {
        *self.outcome.lock() = outcome;
    }

    pub fn calls(&self) -> Vec<(String, Uuid)> {
        self.calls.lock().clone()
    }
}

#[async_trait]
impl PromoRedeemer for FakePromoRedeemer {
    async fn redeem(&self, code: &str, profile_id: Uuid) -> RepoResult<PromoOutcome> {
        if self.fail.load(Ordering::SeqCst) {
            return Err(DomainError::RpcUnavailable("injected".to_string()));
        }
        self.calls.lock().push((code.to_string(), profile_id));
        Ok(self.outcome.lock().clone())
    }
}

// ============================================================================
// Dependency bundle
// ============================================================================

/// All fakes plus the wiring to build a `ServiceContext` from them
pub(crate) struct TestDeps {
    pub profile_repo: Arc<FakeProfileRepo>,
    pub link_repo: Arc<FakeLinkRepo>,
    pub privileged_profile_repo: Option<Arc<FakeProfileRepo>>,
    pub privileged_link_repo: Option<Arc<FakeLinkRepo>>,
    pub counter_rpc: Option<Arc<FakeCounterRpc>>,
    pub identity_provider: Arc<FakeIdentityProvider>,
    pub blob_store: Arc<FakeBlobStore>,
    pub promo: Arc<FakePromoRedeemer>,
}

impl TestDeps {
    pub fn new() -> Self {
        Self {
            profile_repo: Arc::new(FakeProfileRepo::default()),
            link_repo: Arc::new(FakeLinkRepo::default()),
            privileged_profile_repo: None,
            privileged_link_repo: None,
            counter_rpc: None,
            identity_provider: Arc::new(FakeIdentityProvider::default()),
            blob_store: Arc::new(FakeBlobStore::default()),
            promo: Arc::new(FakePromoRedeemer::default()),
        }
    }

    pub fn with_privileged(mut self) -> Self {
        self.privileged_profile_repo = Some(Arc::new(FakeProfileRepo::default()));
        self.privileged_link_repo = Some(Arc::new(FakeLinkRepo::default()));
        self
    }

    pub fn with_counter_rpc(mut self) -> Self {
        self.counter_rpc = Some(Arc::new(FakeCounterRpc::default()));
        self
    }

    pub fn context(&self) -> ServiceContext {
        ServiceContext::new(
            self.profile_repo.clone(),
            self.link_repo.clone(),
            self.privileged_profile_repo
                .clone()
                .map(|r| r as Arc<dyn ProfileRepository>),
            self.privileged_link_repo
                .clone()
                .map(|r| r as Arc<dyn LinkRepository>),
            self.counter_rpc
                .clone()
                .map(|r| r as Arc<dyn CounterRpc>),
            self.identity_provider.clone(),
            self.blob_store.clone(),
            self.promo.clone(),
        )
    }
}
