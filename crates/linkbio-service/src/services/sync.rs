//! Profile state synchronizer
//!
//! One `ProfileSync` per authenticated identity. Owns the session phase,
//! the profile, the local link collection, and the avatar preview behind a
//! mutex; the lock is never held across an await point. Mutations apply
//! locally first and persist best-effort: remote failures are absorbed with
//! a `warn` log and never revert local state. Every remote call is wrapped
//! in a timeout so a stalled store cannot wedge a session.

use std::future::Future;
use std::time::Duration;

use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use tokio::time::timeout;
use tracing::{info, instrument, warn};
use uuid::Uuid;

use linkbio_common::AppError;
use linkbio_core::entities::{Link, NewLink, NewProfile, Profile};
use linkbio_core::error::DomainError;
use linkbio_core::events::{Identity, IdentityEvent};
use linkbio_core::traits::{LinkPatch, ProfilePatch, RepoResult};
use linkbio_core::value_objects::username::derive_username;
use linkbio_core::value_objects::{LinkKey, Theme};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};
use super::links::LinkCollection;

/// Ceiling on any single remote persistence call
const REMOTE_OP_TIMEOUT: Duration = Duration::from_secs(10);

/// Session lifecycle phase. Ready never drops back to Loading; refreshes
/// overwrite data in place.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    Unauthenticated,
    Loading,
    Ready,
}

impl SessionPhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Unauthenticated => "unauthenticated",
            Self::Loading => "loading",
            Self::Ready => "ready",
        }
    }
}

/// Point-in-time copy of the session state
#[derive(Debug, Clone)]
pub struct SessionSnapshot {
    pub phase: SessionPhase,
    pub profile: Profile,
    pub links: Vec<Link>,
    pub avatar_preview: Option<String>,
}

struct SessionState {
    phase: SessionPhase,
    identity: Option<Identity>,
    profile: Profile,
    links: LinkCollection,
    avatar_preview: Option<String>,
}

impl SessionState {
    fn unauthenticated() -> Self {
        Self {
            phase: SessionPhase::Unauthenticated,
            identity: None,
            profile: Profile::placeholder(),
            links: LinkCollection::new(Uuid::nil()),
            avatar_preview: None,
        }
    }
}

/// Per-identity profile state synchronizer
pub struct ProfileSync {
    ctx: ServiceContext,
    state: Mutex<SessionState>,
}

/// Run a remote call under the persistence timeout, absorbing failure.
/// Returns None when the call failed or timed out; a warn is logged.
async fn remote<T>(op: &'static str, fut: impl Future<Output = RepoResult<T>>) -> Option<T> {
    match timeout(REMOTE_OP_TIMEOUT, fut).await {
        Ok(Ok(value)) => Some(value),
        Ok(Err(e)) => {
            warn!(op, error = %e, "remote operation failed, keeping local state");
            None
        }
        Err(_) => {
            warn!(op, "remote operation timed out, keeping local state");
            None
        }
    }
}

impl ProfileSync {
    /// Create a fresh unauthenticated session
    pub fn new(ctx: ServiceContext) -> Self {
        Self {
            ctx,
            state: Mutex::new(SessionState::unauthenticated()),
        }
    }

    /// React to an auth-state transition
    pub async fn handle_event(&self, event: IdentityEvent) {
        match event {
            IdentityEvent::SignedIn(identity) | IdentityEvent::TokenRefreshed(identity) => {
                self.ensure_loaded(identity).await;
            }
            IdentityEvent::SignedOut => self.reset_local(),
        }
    }

    /// Load the session for an identity if it is not already Ready.
    ///
    /// A repeat call for the same identity in Ready phase is a no-op. Read
    /// failures degrade to the placeholder profile and a Ready phase; this
    /// path never surfaces an error.
    #[instrument(skip(self, identity), fields(identity_id = %identity.id))]
    pub async fn ensure_loaded(&self, identity: Identity) -> SessionSnapshot {
        let already_ready = {
            let mut state = self.state.lock();
            let same = state.identity.as_ref().is_some_and(|i| i.id == identity.id);
            if state.phase == SessionPhase::Ready && same {
                true
            } else {
                if state.phase != SessionPhase::Ready {
                    state.phase = SessionPhase::Loading;
                }
                state.identity = Some(identity.clone());
                false
            }
        };

        if !already_ready {
            let (profile, links) = self.load(&identity).await;
            let mut collection = LinkCollection::new(profile.id);
            collection.replace_all(links);

            let mut state = self.state.lock();
            state.profile = profile;
            state.links = collection;
            state.phase = SessionPhase::Ready;
        }

        self.snapshot()
    }

    /// Re-fetch profile and links, overwriting in place. The phase never
    /// drops out of Ready; fetch failures keep the current data.
    #[instrument(skip(self))]
    pub async fn refresh_data(&self) -> SessionSnapshot {
        let identity = { self.state.lock().identity.clone() };
        let Some(identity) = identity else {
            return self.snapshot();
        };

        let fetched_profile = match self.fetch_or_provision(&identity).await {
            Ok(profile) => Some(profile),
            Err(e) => {
                warn!(error = %e, "profile refresh failed, keeping current data");
                None
            }
        };
        let fetched_links = match &fetched_profile {
            Some(profile) => remote(
                "fetch links",
                self.ctx.link_repo().find_by_profile(profile.id),
            )
            .await,
            None => None,
        };

        {
            let mut state = self.state.lock();
            if let Some(profile) = fetched_profile {
                if let Some(links) = fetched_links {
                    let mut collection = LinkCollection::new(profile.id);
                    collection.replace_all(links);
                    state.links = collection;
                }
                state.profile = profile;
            }
            state.phase = SessionPhase::Ready;
        }

        self.snapshot()
    }

    /// Sign out: best-effort provider invalidation, unconditional local reset
    #[instrument(skip(self))]
    pub async fn sign_out(&self) {
        let identity_id = { self.state.lock().identity.as_ref().map(|i| i.id) };

        if let Some(id) = identity_id {
            if let Err(e) = self.ctx.identity_provider().sign_out(id).await {
                warn!(error = %e, "identity sign-out failed, resetting locally anyway");
            }
        }

        self.reset_local();
    }

    /// Apply a profile patch locally, then persist best-effort
    #[instrument(skip(self, patch))]
    pub async fn update_profile(&self, patch: ProfilePatch) -> ServiceResult<Profile> {
        let (id, profile) = self.apply_profile_patch_local(&patch)?;
        let _ = remote("update profile", self.ctx.profile_repo().update(id, &patch)).await;
        Ok(profile)
    }

    /// Apply a profile patch locally only (no persistence)
    pub fn update_profile_local(&self, patch: &ProfilePatch) -> ServiceResult<Profile> {
        let (_, profile) = self.apply_profile_patch_local(patch)?;
        Ok(profile)
    }

    /// Stage a not-yet-uploaded avatar (data URL or object URL)
    pub fn set_avatar_preview(&self, preview: Option<String>) {
        self.state.lock().avatar_preview = preview;
    }

    /// Store avatar bytes under the identity's fixed key and persist the
    /// resulting URL. Upload failures surface; the URL cannot be invented.
    #[instrument(skip(self, bytes), fields(len = bytes.len()))]
    pub async fn upload_avatar(&self, bytes: &[u8], content_type: &str) -> ServiceResult<String> {
        let id = self.identity_id().ok_or(ServiceError::App(AppError::MissingAuth))?;

        let key = id.simple().to_string();
        let url = self.ctx.blob_store().put(&key, bytes, content_type).await?;

        {
            let mut state = self.state.lock();
            state.profile.avatar_url = Some(url.clone());
            state.avatar_preview = None;
        }

        let patch = ProfilePatch {
            avatar_url: Some(url.clone()),
            ..Default::default()
        };
        let _ = remote("update profile", self.ctx.profile_repo().update(id, &patch)).await;

        Ok(url)
    }

    /// Point-in-time copy of the session
    pub fn snapshot(&self) -> SessionSnapshot {
        let state = self.state.lock();
        SessionSnapshot {
            phase: state.phase,
            profile: state.profile.clone(),
            links: state.links.items().to_vec(),
            avatar_preview: state.avatar_preview.clone(),
        }
    }

    /// The authenticated identity id, if any
    pub fn identity_id(&self) -> Option<Uuid> {
        self.state.lock().identity.as_ref().map(|i| i.id)
    }

    // === Link mutations ===

    /// Add a link: optimistic draft insert, then persistence and in-place
    /// confirmation. If the draft was removed while persistence was in
    /// flight, the freshly persisted row gets a compensating delete.
    #[instrument(skip(self))]
    pub async fn add_link(
        &self,
        title: &str,
        url: &str,
        scheduled_at: Option<DateTime<Utc>>,
    ) -> ServiceResult<Link> {
        let (key, payload, draft) = {
            let mut state = self.state.lock();
            let key = state.links.insert_draft(title, url, scheduled_at)?;
            let draft = state
                .links
                .get(&key)
                .cloned()
                .ok_or_else(|| ServiceError::internal("draft missing after insert"))?;
            (key, NewLink::from_draft(&draft), draft)
        };

        let Some(persisted) = remote("insert link", self.ctx.link_repo().insert(&payload)).await
        else {
            // Persistence failed; the draft stays local-only
            return Ok(draft);
        };

        let persisted_id = persisted.key.persisted_id();
        let confirmed = {
            let mut state = self.state.lock();
            state.links.confirm_draft(&key, persisted.clone())
        };

        if confirmed {
            info!(key = %persisted.key, "link persisted and confirmed");
            return Ok(persisted);
        }

        // Removed while in flight; take the stored row back out
        if let Some(id) = persisted_id {
            let _ = remote("delete link", self.ctx.link_repo().delete(id)).await;
        }
        Ok(draft)
    }

    /// Remove a link locally; persisted rows get a best-effort remote delete.
    /// Returns false when the key is unknown.
    #[instrument(skip(self))]
    pub async fn remove_link(&self, key: &LinkKey) -> bool {
        let removed = { self.state.lock().links.remove(key) };

        let Some(link) = removed else {
            return false;
        };
        if let Some(id) = link.key.persisted_id() {
            let _ = remote("delete link", self.ctx.link_repo().delete(id)).await;
        }
        true
    }

    /// Merge a patch locally; persisted rows get a best-effort remote update
    #[instrument(skip(self, patch))]
    pub async fn update_link(&self, key: &LinkKey, patch: &LinkPatch) -> ServiceResult<Link> {
        let updated = {
            let mut state = self.state.lock();
            if !state.links.merge_update(key, patch) {
                return Err(ServiceError::not_found("Link", key.to_string()));
            }
            state.links.get(key).cloned()
        };
        let link =
            updated.ok_or_else(|| ServiceError::internal("link missing after merge"))?;

        if let Some(id) = key.persisted_id() {
            let _ = remote("update link", self.ctx.link_repo().update(id, patch)).await;
        }

        Ok(link)
    }

    /// Reorder locally, then dispatch one position write per persisted link
    /// concurrently. Completion means dispatched, not persisted.
    #[instrument(skip(self, keys), fields(count = keys.len()))]
    pub async fn reorder_links(&self, keys: &[LinkKey]) -> Vec<Link> {
        let targets: Vec<(Uuid, i32)> = {
            let mut state = self.state.lock();
            state.links.replace_order(keys);
            state
                .links
                .items()
                .iter()
                .filter_map(|l| l.key.persisted_id().map(|id| (id, l.position)))
                .collect()
        };

        let repo = self.ctx.link_repo();
        let writes = targets
            .iter()
            .map(|&(id, position)| remote("set link position", repo.set_position(id, position)));
        futures::future::join_all(writes).await;

        self.snapshot().links
    }

    // === Internals ===

    fn reset_local(&self) {
        *self.state.lock() = SessionState::unauthenticated();
    }

    fn apply_profile_patch_local(&self, patch: &ProfilePatch) -> ServiceResult<(Uuid, Profile)> {
        let mut state = self.state.lock();
        let id = state
            .identity
            .as_ref()
            .map(|i| i.id)
            .ok_or(ServiceError::App(AppError::MissingAuth))?;
        apply_profile_patch(&mut state.profile, patch);
        Ok((id, state.profile.clone()))
    }

    /// Initial load: fetch or provision the profile, then fetch links.
    /// Degrades to the placeholder on failure, never errors.
    async fn load(&self, identity: &Identity) -> (Profile, Vec<Link>) {
        let profile = match self.fetch_or_provision(identity).await {
            Ok(profile) => profile,
            Err(e) => {
                warn!(error = %e, "profile load failed, degrading to placeholder");
                Profile::placeholder()
            }
        };

        let links = if profile.is_placeholder() {
            Vec::new()
        } else {
            remote("fetch links", self.ctx.link_repo().find_by_profile(profile.id))
                .await
                .unwrap_or_default()
        };

        (profile, links)
    }

    /// Fetch the profile row, provisioning one when the identity has none
    async fn fetch_or_provision(&self, identity: &Identity) -> RepoResult<Profile> {
        if let Some(profile) = self.ctx.profile_repo().find_by_id(identity.id).await? {
            return Ok(profile);
        }

        let meta = &identity.metadata;
        let username = derive_username(
            meta.username.as_deref(),
            meta.email.as_deref(),
            identity.id,
        );
        let new_profile = NewProfile {
            id: identity.id,
            // Fresh profiles always carry a display name, falling back to
            // the derived username when the identity has no full name
            display_name: meta.full_name.clone().or_else(|| Some(username.clone())),
            username,
            email: meta.email.clone(),
            avatar_url: meta.avatar_url.clone(),
            theme: Theme::default(),
        };

        match self.ctx.profile_repo().upsert(&new_profile).await {
            Ok(()) => {}
            Err(DomainError::UsernameTaken(taken)) => {
                // Someone else holds the derived name; fall back to the
                // id-derived one, which is collision-free in practice
                info!(username = %taken, "derived username taken, using id-derived fallback");
                let fallback = NewProfile {
                    username: derive_username(None, None, identity.id),
                    ..new_profile
                };
                self.ctx.profile_repo().upsert(&fallback).await?;
            }
            Err(e) => return Err(e),
        }

        self.ctx
            .profile_repo()
            .find_by_id(identity.id)
            .await?
            .ok_or(DomainError::ProfileNotFound(identity.id))
    }
}

/// Merge a patch into the local profile copy. Same conventions as the
/// stored update: None leaves a field alone, an empty string clears a
/// nullable one.
fn apply_profile_patch(profile: &mut Profile, patch: &ProfilePatch) {
    if let Some(username) = &patch.username {
        if !username.is_empty() {
            profile.username = username.clone();
        }
    }
    if let Some(display_name) = &patch.display_name {
        profile.display_name = (!display_name.is_empty()).then(|| display_name.clone());
    }
    if let Some(bio) = &patch.bio {
        profile.bio = (!bio.is_empty()).then(|| bio.clone());
    }
    if let Some(avatar_url) = &patch.avatar_url {
        profile.avatar_url = (!avatar_url.is_empty()).then(|| avatar_url.clone());
    }
    if let Some(theme) = &patch.theme {
        profile.theme = theme.clone();
    }
    if let Some(plan) = patch.plan {
        profile.plan = plan;
    }
}
