//! Service context - dependency container for services
//!
//! Holds the repositories and external collaborators behind their ports.
//! The privileged repositories are second connections with elevated
//! credentials, present only when the deployment configures them; the
//! counter RPC and promo backend are likewise optional collaborators.

use std::sync::Arc;

use linkbio_core::traits::{
    BlobStore, CounterRpc, IdentityProvider, LinkRepository, ProfileRepository, PromoRedeemer,
};

/// Service context containing all dependencies
///
/// This is the main dependency container that gets passed to all services.
/// It provides access to:
/// - Profile and link repositories (public credentials)
/// - Optional privileged repositories for the counter fallback path
/// - Optional counter RPC for server-side atomic increments
/// - Identity provider, blob store, and promo backend ports
#[derive(Clone)]
pub struct ServiceContext {
    profile_repo: Arc<dyn ProfileRepository>,
    link_repo: Arc<dyn LinkRepository>,

    privileged_profile_repo: Option<Arc<dyn ProfileRepository>>,
    privileged_link_repo: Option<Arc<dyn LinkRepository>>,

    counter_rpc: Option<Arc<dyn CounterRpc>>,

    identity_provider: Arc<dyn IdentityProvider>,
    blob_store: Arc<dyn BlobStore>,
    promo_redeemer: Arc<dyn PromoRedeemer>,
}

impl ServiceContext {
    /// Create a new service context with all dependencies
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        profile_repo: Arc<dyn ProfileRepository>,
        link_repo: Arc<dyn LinkRepository>,
        privileged_profile_repo: Option<Arc<dyn ProfileRepository>>,
        privileged_link_repo: Option<Arc<dyn LinkRepository>>,
        counter_rpc: Option<Arc<dyn CounterRpc>>,
        identity_provider: Arc<dyn IdentityProvider>,
        blob_store: Arc<dyn BlobStore>,
        promo_redeemer: Arc<dyn PromoRedeemer>,
    ) -> Self {
        Self {
            profile_repo,
            link_repo,
            privileged_profile_repo,
            privileged_link_repo,
            counter_rpc,
            identity_provider,
            blob_store,
            promo_redeemer,
        }
    }

    /// Get the profile repository (public credentials)
    pub fn profile_repo(&self) -> &dyn ProfileRepository {
        self.profile_repo.as_ref()
    }

    /// Get the link repository (public credentials)
    pub fn link_repo(&self) -> &dyn LinkRepository {
        self.link_repo.as_ref()
    }

    /// Get the privileged profile repository, when configured
    pub fn privileged_profile_repo(&self) -> Option<&dyn ProfileRepository> {
        self.privileged_profile_repo.as_deref()
    }

    /// Get the privileged link repository, when configured
    pub fn privileged_link_repo(&self) -> Option<&dyn LinkRepository> {
        self.privileged_link_repo.as_deref()
    }

    /// Get the counter RPC, when the deployment carries the procedures
    pub fn counter_rpc(&self) -> Option<&dyn CounterRpc> {
        self.counter_rpc.as_deref()
    }

    /// Get the identity provider
    pub fn identity_provider(&self) -> &dyn IdentityProvider {
        self.identity_provider.as_ref()
    }

    /// Get the blob store
    pub fn blob_store(&self) -> &dyn BlobStore {
        self.blob_store.as_ref()
    }

    /// Get the promo redemption backend
    pub fn promo_redeemer(&self) -> &dyn PromoRedeemer {
        self.promo_redeemer.as_ref()
    }
}

impl std::fmt::Debug for ServiceContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceContext")
            .field("privileged", &self.privileged_profile_repo.is_some())
            .field("counter_rpc", &self.counter_rpc.is_some())
            .finish()
    }
}

/// Builder for creating ServiceContext with custom configuration
#[derive(Default)]
pub struct ServiceContextBuilder {
    profile_repo: Option<Arc<dyn ProfileRepository>>,
    link_repo: Option<Arc<dyn LinkRepository>>,
    privileged_profile_repo: Option<Arc<dyn ProfileRepository>>,
    privileged_link_repo: Option<Arc<dyn LinkRepository>>,
    counter_rpc: Option<Arc<dyn CounterRpc>>,
    identity_provider: Option<Arc<dyn IdentityProvider>>,
    blob_store: Option<Arc<dyn BlobStore>>,
    promo_redeemer: Option<Arc<dyn PromoRedeemer>>,
}

impl ServiceContextBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn profile_repo(mut self, repo: Arc<dyn ProfileRepository>) -> Self {
        self.profile_repo = Some(repo);
        self
    }

    pub fn link_repo(mut self, repo: Arc<dyn LinkRepository>) -> Self {
        self.link_repo = Some(repo);
        self
    }

    pub fn privileged_profile_repo(mut self, repo: Arc<dyn ProfileRepository>) -> Self {
        self.privileged_profile_repo = Some(repo);
        self
    }

    pub fn privileged_link_repo(mut self, repo: Arc<dyn LinkRepository>) -> Self {
        self.privileged_link_repo = Some(repo);
        self
    }

    pub fn counter_rpc(mut self, rpc: Arc<dyn CounterRpc>) -> Self {
        self.counter_rpc = Some(rpc);
        self
    }

    pub fn identity_provider(mut self, provider: Arc<dyn IdentityProvider>) -> Self {
        self.identity_provider = Some(provider);
        self
    }

    pub fn blob_store(mut self, store: Arc<dyn BlobStore>) -> Self {
        self.blob_store = Some(store);
        self
    }

    pub fn promo_redeemer(mut self, redeemer: Arc<dyn PromoRedeemer>) -> Self {
        self.promo_redeemer = Some(redeemer);
        self
    }

    /// Build the ServiceContext
    ///
    /// # Errors
    /// Returns `ServiceError::Validation` if any required dependency is missing
    pub fn build(self) -> super::error::ServiceResult<ServiceContext> {
        use super::error::ServiceError;

        Ok(ServiceContext::new(
            self.profile_repo
                .ok_or_else(|| ServiceError::validation("profile_repo is required"))?,
            self.link_repo
                .ok_or_else(|| ServiceError::validation("link_repo is required"))?,
            self.privileged_profile_repo,
            self.privileged_link_repo,
            self.counter_rpc,
            self.identity_provider
                .ok_or_else(|| ServiceError::validation("identity_provider is required"))?,
            self.blob_store
                .ok_or_else(|| ServiceError::validation("blob_store is required"))?,
            self.promo_redeemer
                .ok_or_else(|| ServiceError::validation("promo_redeemer is required"))?,
        ))
    }
}
