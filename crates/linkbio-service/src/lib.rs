//! # linkbio-service
//!
//! Application layer containing business logic, services, and DTOs.

pub mod dto;
pub mod services;

pub use services::{
    AccountService, CounterService, DeletionOutcome, LinkCollection, ProfileSync, PromoService,
    ServiceContext, ServiceContextBuilder, ServiceError, ServiceResult, SessionPhase,
    SessionSnapshot, TrackOutcome,
};
