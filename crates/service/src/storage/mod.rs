//! Repository backends for the contact collection.
//!
//! Both keep the whole collection under a single entry whose expiry restarts
//! on every save. `memory` tracks the deadline itself on tokio's clock;
//! `moka` leaves it to the cache's time-to-live.

pub mod memory;
pub mod moka_store;

use std::sync::Arc;

use crate::contact::repository::{ContactRepository, ExpiryPolicy};

pub use memory::InMemoryContactRepository;
pub use moka_store::MokaContactRepository;

/// Backend names accepted by [`build_repository`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Backend {
    Memory,
    Moka,
}

/// Construct the configured backend as a trait object for the service.
pub fn build_repository(backend: Backend, policy: ExpiryPolicy) -> Arc<dyn ContactRepository> {
    match backend {
        Backend::Memory => Arc::new(InMemoryContactRepository::new(policy)),
        Backend::Moka => Arc::new(MokaContactRepository::new(policy)),
    }
}
