//! Ports - traits implemented by the infrastructure layer

pub mod repositories;

pub use repositories::{
    BlobStore, CounterRpc, IdentityProvider, LinkPatch, LinkRepository, ProfilePatch,
    ProfileRepository, PromoOutcome, PromoRedeemer, RepoResult,
};
